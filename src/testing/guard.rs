//! Scoped interception.

use crate::config::InterceptConfig;
use crate::console::{console, Channel, Console};
use crate::error::ConfigError;
use crate::interceptor::InterceptOptions;

/// Intercepts channels for as long as it lives; restores them on drop,
/// including when a test unwinds.
pub struct InterceptGuard<'a> {
    console: &'a Console,
    channels: Vec<Channel>,
}

impl InterceptGuard<'static> {
    /// Guard over the process-wide console.
    pub fn global() -> Self {
        InterceptGuard::new(console())
    }
}

impl<'a> InterceptGuard<'a> {
    pub fn new(console: &'a Console) -> Self {
        Self {
            console,
            channels: Vec::new(),
        }
    }

    /// Intercept `channel` with `options` until the guard drops.
    pub fn intercept(mut self, channel: Channel, options: InterceptOptions) -> Self {
        self.console.install(channel, options);
        if !self.channels.contains(&channel) {
            self.channels.push(channel);
        }
        self
    }

    /// Intercept every channel with the same options.
    pub fn all(console: &'a Console, options: InterceptOptions) -> Self {
        Channel::ALL
            .into_iter()
            .fold(Self::new(console), |guard, channel| {
                guard.intercept(channel, options.clone())
            })
    }

    /// Intercept the channels named by `config`.
    pub fn from_config(
        console: &'a Console,
        config: &InterceptConfig,
    ) -> Result<Self, ConfigError> {
        let mut guard = Self::new(console);
        for (channel, options) in config.channel_options()? {
            guard = guard.intercept(channel, options);
        }
        Ok(guard)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

impl Drop for InterceptGuard<'_> {
    fn drop(&mut self) {
        for channel in &self.channels {
            self.console.restore(*channel);
        }
    }
}
