//! Checksum wrapper around framed sequences.
//!
//! # Blob Format
//!
//! ```text
//! <framed entries>|<digest>
//! ```
//!
//! The digest is the CRC32 of the framed text, rendered as 8 lowercase hex
//! digits. It detects accidental corruption only; it is not authentication.
//!
//! Decoding splits on the *last* `|`, since payloads may contain `|` but
//! the digest never does.
//!
//! # Empty Sequence
//!
//! The empty sequence encodes as the reserved marker `0|<digest of "">`.
//! A sequence holding one empty string encodes as `0#|<digest of "0#">`, so
//! the two never collide at the blob level.

use crate::error::FramingError;
use crate::framing::{self, PartialDecode};

/// Separates the framed entries from the trailing digest.
pub const CHECKSUM_DELIMITER: char = '|';

/// Framed text standing in for the empty sequence.
pub const EMPTY_MARKER: &str = "0";

/// Number of characters in a rendered digest.
pub const DIGEST_LEN: usize = 8;

/// Why a blob failed to decode cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Blob was empty or had no checksum delimiter
    MissingChecksum,

    /// Digest disagreed with the framed text
    ChecksumMismatch { expected: String, received: String },

    /// Digest matched but the framed text did not parse
    Framing(FramingError),
}

/// Outcome of decoding a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    /// Checksum matched and every entry parsed
    Valid(Vec<String>),

    /// Corruption detected; `partial` holds whatever could be salvaged
    Invalid { partial: Vec<String>, fault: Fault },
}

impl DecodeResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, DecodeResult::Valid(_))
    }

    /// Decoded entries, or the salvaged prefix for an invalid blob.
    pub fn entries(&self) -> &[String] {
        match self {
            DecodeResult::Valid(entries) => entries,
            DecodeResult::Invalid { partial, .. } => partial,
        }
    }

    /// Split into `(success, entries)`.
    pub fn into_parts(self) -> (bool, Vec<String>) {
        match self {
            DecodeResult::Valid(entries) => (true, entries),
            DecodeResult::Invalid { partial, .. } => (false, partial),
        }
    }
}

/// Compute the digest of framed text.
pub fn digest(framed: &str) -> String {
    format!("{:08x}", crc32fast::hash(framed.as_bytes()))
}

/// Encode a sequence of strings into a checksummed blob.
///
/// Always succeeds and is deterministic.
pub fn encode<S: AsRef<str>>(strings: &[S]) -> String {
    if strings.is_empty() {
        return format!("{}{}{}", EMPTY_MARKER, CHECKSUM_DELIMITER, digest(""));
    }

    let mut blob = framing::frame(strings);
    let checksum = digest(&blob);
    blob.push(CHECKSUM_DELIMITER);
    blob.push_str(&checksum);
    blob
}

/// Decode a blob, validating its checksum.
///
/// Never fails: corruption yields [`DecodeResult::Invalid`] with a
/// best-effort partial sequence.
pub fn decode(blob: &str) -> DecodeResult {
    let Some((framed, received)) = blob.rsplit_once(CHECKSUM_DELIMITER) else {
        return DecodeResult::Invalid {
            partial: Vec::new(),
            fault: Fault::MissingChecksum,
        };
    };

    let expected = if framed == EMPTY_MARKER {
        digest("")
    } else {
        digest(framed)
    };

    if received != expected {
        return DecodeResult::Invalid {
            partial: framing::recover_partial(framed),
            fault: Fault::ChecksumMismatch {
                expected,
                received: received.to_string(),
            },
        };
    }

    if framed.is_empty() || framed == EMPTY_MARKER {
        return DecodeResult::Valid(Vec::new());
    }

    match framing::unframe(framed) {
        Ok(entries) => DecodeResult::Valid(entries),
        Err(PartialDecode { entries, error }) => DecodeResult::Invalid {
            partial: entries,
            fault: Fault::Framing(error),
        },
    }
}
