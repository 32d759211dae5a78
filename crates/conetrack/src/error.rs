//! Error types surfaced by the ordering API.

use crate::cone::Side;

/// Errors returned by [`crate::ConeOrderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A side had no cones with finite coordinates, so no start cone can be
    /// selected.
    EmptyInput {
        /// Side whose cone set was empty.
        side: Side,
    },
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput { side } => {
                write!(f, "no cones on the {} side; cannot select a start cone", side)
            }
        }
    }
}

impl std::error::Error for OrderError {}

/// Errors from loading or validating an [`crate::OrderConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The config file could not be read.
    Read {
        /// Path as given by the caller.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
    /// The config text is not valid JSON for the config schema.
    Parse {
        /// Underlying parser message.
        message: String,
    },
    /// A field holds a value the engine cannot run with.
    Invalid {
        /// Dotted field path, e.g. `search.crossing_tolerance`.
        field: &'static str,
        /// Human-readable constraint that failed.
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read config {}: {}", path, message)
            }
            Self::Parse { message } => write!(f, "failed to parse config: {}", message),
            Self::Invalid { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}
