use crate::DEFAULT_LOG_LEVEL;

use std::convert::Infallible;
use std::str::FromStr;

use log::LevelFilter;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Verbosity of the CLI's diagnostics.
///
/// Comes from `config.toml` or `VS_LOG_LEVEL`; a value that is not a level
/// name falls back to the default instead of stopping the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl LogLevel {
    pub fn parse_lenient(value: &str) -> Self {
        value
            .trim()
            .parse::<LevelFilter>()
            .map(Self)
            .unwrap_or_default()
    }

    pub fn filter(&self) -> LevelFilter {
        self.0
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self(DEFAULT_LOG_LEVEL)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Name(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level = match RawLevel::deserialize(deserializer)? {
            RawLevel::Name(name) => Self::parse_lenient(&name),
            RawLevel::Other(_) => Self::default(),
        };
        Ok(level)
    }
}
