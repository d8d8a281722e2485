/*!
 * Error Types
 * Centralized error handling with thiserror
 */

use thiserror::Error;

/// Configuration intake errors
///
/// All variants are non-fatal to the library: a failed parse leaves the
/// default value in effect. Only the binary treats `UnrecognizedArgument`
/// as terminal (exit code 1).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{what} is expected to be an integer, but has value \"{value}\", which is invalid")]
    InvalidInt { what: String, value: String },

    #[error("{what} is expected to be an integer, but has value \"{value}\", which overflows")]
    IntOverflow { what: String, value: String },

    #[error("{what} has unsupported value \"{value}\" (expected one of: {expected})")]
    UnknownVariant {
        what: String,
        value: String,
        expected: &'static str,
    },

    #[error("unrecognized argument \"{0}\"")]
    UnrecognizedArgument(String),
}
