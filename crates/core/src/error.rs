//! Error types for the codec simulator.
//!
//! Decoding never surfaces these to callers as a hard failure: framing
//! errors are folded into an `Invalid` outcome carrying salvaged entries.
//! Only the transmission controller propagates an error, and only once its
//! attempt budget is spent.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Retry exhaustion: no clean decode within the attempt budget
/// - Configuration: channel or controller settings out of range
#[derive(Debug, Error)]
pub enum Error {
    /// The channel corrupted every attempt
    #[error("failed to transmit after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the strict framer.
///
/// Positions are byte offsets into the framed text (the blob with its
/// checksum suffix removed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// Text before the field delimiter is not a non-negative decimal integer
    #[error("malformed length field {field:?} at offset {position}")]
    MalformedLength { position: usize, field: String },

    /// Input remains but no field delimiter follows it
    #[error("missing field delimiter after offset {position}")]
    MissingDelimiter { position: usize },

    /// Declared length runs past the end of the input
    #[error("truncated payload at offset {position}: declared {declared} bytes, {available} available")]
    TruncatedPayload {
        position: usize,
        declared: usize,
        available: usize,
    },

    /// Declared length ends inside a multi-byte character
    #[error("payload at offset {position} does not end on a character boundary")]
    InvalidUtf8 { position: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
