//! printf-style formatting of diagnostic arguments
//!
//! Mirrors the multi-argument formatter conventionally used by diagnostic
//! consoles: directives in a leading format string consume arguments left to
//! right, leftovers are appended separated by spaces.

use serde_json::Value;

use crate::console::Arg;

/// Format all positional arguments into one message.
pub fn format_args_list(args: &[Arg]) -> String {
    let Some(first) = args.first() else {
        return String::new();
    };

    let mut out = String::new();
    let mut next = 0;

    if let Arg::Str(template) = first {
        if args.len() == 1 {
            return template.clone();
        }
        next = 1;
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let Some(&directive) = chars.peek() else {
                out.push('%');
                break;
            };
            if directive == '%' {
                chars.next();
                out.push('%');
                continue;
            }
            let Some(arg) = args.get(next) else {
                out.push('%');
                continue;
            };
            let rendered = match directive {
                's' => string_form(arg),
                'd' => format_number(to_number(arg)),
                'i' => format_number(parse_int(arg)),
                'f' => format_number(parse_float(arg)),
                'j' => json_form(arg),
                'o' | 'O' => inspect(arg),
                'c' => String::new(),
                _ => {
                    out.push('%');
                    continue;
                }
            };
            chars.next();
            next += 1;
            out.push_str(&rendered);
        }
    }

    for arg in &args[next..] {
        if !out.is_empty() || next > 0 {
            out.push(' ');
        }
        match arg {
            Arg::Str(s) => out.push_str(s),
            other => out.push_str(&inspect(other)),
        }
        next += 1;
    }

    out
}

/// Render a number the way the diagnostics host prints it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn string_form(arg: &Arg) -> String {
    match arg {
        Arg::Str(s) => s.clone(),
        other => inspect(other),
    }
}

fn to_number(arg: &Arg) -> f64 {
    match arg {
        Arg::Str(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Arg::Int(n) => *n as f64,
        Arg::Float(f) => *f,
        Arg::Bool(b) => f64::from(u8::from(*b)),
        Arg::Null => 0.0,
        Arg::Undefined => f64::NAN,
        Arg::Json(value) => match value {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Null => 0.0,
            Value::String(s) => to_number(&Arg::Str(s.clone())),
            _ => f64::NAN,
        },
    }
}

fn parse_int(arg: &Arg) -> f64 {
    match arg {
        Arg::Int(n) => *n as f64,
        Arg::Float(f) => f.trunc(),
        other => {
            let text = string_form(other);
            let text = text.trim_start();
            let digits_end = text
                .char_indices()
                .skip_while(|(i, c)| *i == 0 && (*c == '-' || *c == '+'))
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            text[..digits_end]
                .parse::<i64>()
                .map(|n| n as f64)
                .unwrap_or(f64::NAN)
        }
    }
}

fn parse_float(arg: &Arg) -> f64 {
    match arg {
        Arg::Int(n) => *n as f64,
        Arg::Float(f) => *f,
        other => {
            let text = string_form(other);
            let text = text.trim_start();
            // Longest prefix that still parses as a float.
            (1..=text.len())
                .rev()
                .filter(|end| text.is_char_boundary(*end))
                .find_map(|end| {
                    let candidate = &text[..end];
                    if candidate
                        .chars()
                        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
                    {
                        return None;
                    }
                    candidate.parse::<f64>().ok()
                })
                .unwrap_or(f64::NAN)
        }
    }
}

fn json_form(arg: &Arg) -> String {
    match arg {
        Arg::Str(s) => Value::String(s.clone()).to_string(),
        Arg::Int(n) => n.to_string(),
        Arg::Float(f) if f.is_finite() => format_number(*f),
        Arg::Float(_) | Arg::Null => "null".to_string(),
        Arg::Bool(b) => b.to_string(),
        Arg::Undefined => "undefined".to_string(),
        Arg::Json(value) => value.to_string(),
    }
}

/// Inspection form: strings quoted, JSON rendered as object literals.
pub fn inspect(arg: &Arg) -> String {
    match arg {
        Arg::Str(s) => quote(s),
        Arg::Int(n) => n.to_string(),
        Arg::Float(f) => format_number(*f),
        Arg::Bool(b) => b.to_string(),
        Arg::Null => "null".to_string(),
        Arg::Undefined => "undefined".to_string(),
        Arg::Json(value) => inspect_value(value),
    }
}

fn inspect_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .unwrap_or_else(|| format_number(n.as_f64().unwrap_or(f64::NAN))),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(inspect_value).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", object_key(key), inspect_value(value)))
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}

fn object_key(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = chars
        .next()
        .map(|c| c.is_alphabetic() || c == '_' || c == '$')
        .unwrap_or(false)
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n");
    format!("'{}'", escaped)
}
