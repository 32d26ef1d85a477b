//! Error types for invocation requests and configuration.
//!
//! Process failures are not errors here: spawn failures and non-zero exits are
//! reported as [`crate::runner::Outcome`] values.

use std::fmt;

// ---------------------------------------------------------------------------
// InvocationError
// ---------------------------------------------------------------------------

/// Errors rejecting an invocation before anything is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    /// The command line was empty or whitespace-only.
    EmptyCommand,
    /// An environment entry could not be parsed or is not representable.
    InvalidEnv(String),
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "command must not be empty"),
            Self::InvalidEnv(msg) => write!(f, "invalid environment entry: {msg}"),
        }
    }
}

impl std::error::Error for InvocationError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Encode(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Encode(e) => write!(f, "toml encode: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Encode(e)
    }
}

impl From<InvocationError> for ConfigError {
    fn from(e: InvocationError) -> Self {
        Self::Invalid(e.to_string())
    }
}
