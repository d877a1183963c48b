// Positional diagnostic arguments
//
// Diagnostic calls are variadic and loosely typed. `Arg` captures the handful
// of value shapes the formatter distinguishes between.

use serde_json::Value;

/// One positional argument of a diagnostic call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Undefined,
    Json(Value),
}

impl Arg {
    /// Truthiness as seen by the assert channel.
    ///
    /// `false`, `0`, `NaN`, `""`, `Null` and `Undefined` are falsy. JSON
    /// containers are truthy even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Arg::Str(s) => !s.is_empty(),
            Arg::Int(n) => *n != 0,
            Arg::Float(f) => *f != 0.0 && !f.is_nan(),
            Arg::Bool(b) => *b,
            Arg::Null | Arg::Undefined => false,
            Arg::Json(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

macro_rules! int_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Int(value as i64)
                }
            }
        )*
    };
}

int_arg!(i8, i16, i32, i64, isize, u8, u16, u32);

// Wide unsigned values that do not fit an i64 degrade to floats.
macro_rules! wide_int_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map(Arg::Int)
                        .unwrap_or(Arg::Float(value as f64))
                }
            }
        )*
    };
}

wide_int_arg!(u64, usize);

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(value as f64)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<()> for Arg {
    fn from(_: ()) -> Self {
        Arg::Undefined
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Json(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Arg::Null)
    }
}
