//! Configuration errors
//!
//! The simulation itself never fails; only loading and validating a
//! [`Tuning`](crate::Tuning) or a saved [`Leaderboard`](crate::Leaderboard)
//! can.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Input was not valid JSON for the target type
    Parse(String),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid json: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
