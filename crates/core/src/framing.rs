//! Length-prefixed framing of string sequences.
//!
//! A framed sequence is the concatenation of one entry per string, with no
//! separator between entries:
//!
//! # Entry Format
//!
//! ```text
//! +------------------+
//! | length (decimal) |  byte length of payload, ASCII digits
//! +------------------+
//! | '#'              |  field delimiter
//! +------------------+
//! | payload          |  exactly `length` bytes of UTF-8 text
//! | (variable)       |
//! +------------------+
//! ```
//!
//! Payload boundaries come from the declared length alone, so payloads may
//! freely contain `#`, `|` or digits.
//!
//! The framer knows nothing about checksums. See [`crate::integrity`] for
//! the wrapper that detects corruption.

use crate::error::FramingError;

/// Separates a length field from its payload.
pub const FIELD_DELIMITER: char = '#';

/// Strict decode failure: the error plus every entry parsed before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDecode {
    /// Complete entries read before the failure
    pub entries: Vec<String>,

    /// What stopped the scan
    pub error: FramingError,
}

/// Frame a sequence of strings.
///
/// The empty sequence frames to the empty string; the integrity layer
/// substitutes its own marker for that case.
pub fn frame<S: AsRef<str>>(strings: &[S]) -> String {
    let total: usize = strings.iter().map(|s| s.as_ref().len() + 4).sum();
    let mut framed = String::with_capacity(total);

    for s in strings {
        let s = s.as_ref();
        framed.push_str(&s.len().to_string());
        framed.push(FIELD_DELIMITER);
        framed.push_str(s);
    }

    framed
}

/// Parse framed text, failing on the first structural fault.
///
/// Reaching the end of input exactly on an entry boundary is success.
///
/// # Errors
/// Returns a [`PartialDecode`] holding the entries read so far and one of:
/// - `FramingError::MissingDelimiter` if trailing input has no delimiter
/// - `FramingError::MalformedLength` if a length field is not a number
/// - `FramingError::TruncatedPayload` if fewer bytes remain than declared
/// - `FramingError::InvalidUtf8` if a payload splits a character
pub fn unframe(framed: &str) -> Result<Vec<String>, PartialDecode> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < framed.len() {
        match read_entry(framed, pos) {
            Ok((payload, next)) => {
                entries.push(payload.to_string());
                pos = next;
            }
            Err(error) => return Err(PartialDecode { entries, error }),
        }
    }

    Ok(entries)
}

/// Salvage as many entries as possible from damaged framed text.
///
/// A malformed length field is skipped: scanning resumes one byte past the
/// delimiter that ended it. Any other fault ends the scan. Never fails.
pub fn recover_partial(framed: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < framed.len() {
        match read_entry(framed, pos) {
            Ok((payload, next)) => {
                entries.push(payload.to_string());
                pos = next;
            }
            // All-digit fields only fail to parse on overflow, which can
            // never fit in the remaining input.
            Err(FramingError::MalformedLength { position, field }) if !is_all_digits(&field) => {
                pos = position + field.len() + FIELD_DELIMITER.len_utf8();
            }
            Err(_) => break,
        }
    }

    entries
}

/// Read one entry starting at `pos`.
///
/// Returns the payload and the offset just past it.
fn read_entry(framed: &str, pos: usize) -> Result<(&str, usize), FramingError> {
    let rest = &framed[pos..];
    let delim = rest
        .find(FIELD_DELIMITER)
        .ok_or(FramingError::MissingDelimiter { position: pos })?;

    let field = &rest[..delim];
    let declared = parse_length(field).ok_or_else(|| FramingError::MalformedLength {
        position: pos,
        field: field.to_string(),
    })?;

    let start = pos + delim + FIELD_DELIMITER.len_utf8();
    let available = framed.len() - start;
    if declared > available {
        return Err(FramingError::TruncatedPayload {
            position: start,
            declared,
            available,
        });
    }

    let end = start + declared;
    let payload = framed
        .get(start..end)
        .ok_or(FramingError::InvalidUtf8 { position: start })?;

    Ok((payload, end))
}

/// Parse a length field: one or more ASCII digits, nothing else.
fn parse_length(field: &str) -> Option<usize> {
    if !is_all_digits(field) {
        return None;
    }
    field.parse().ok()
}

fn is_all_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        assert_eq!(frame(&["leet", "code"]), "4#leet4#code");
        assert_eq!(frame(&[""]), "0#");
        assert_eq!(frame::<&str>(&[]), "");
    }

    #[test]
    fn test_frame_unframe_round_trip() {
        let strings = vec!["we", "say", ":", "yes", "", "1#2|3"];
        let framed = frame(&strings);
        assert_eq!(unframe(&framed).unwrap(), strings);
    }

    #[test]
    fn test_length_counts_bytes() {
        let framed = frame(&["héllo"]);
        assert_eq!(framed, "6#héllo");
        assert_eq!(unframe(&framed).unwrap(), vec!["héllo"]);
    }

    #[test]
    fn test_empty_input_is_empty_sequence() {
        assert_eq!(unframe("").unwrap(), Vec::<String>::new());
        assert!(recover_partial("").is_empty());
    }

    #[test]
    fn test_malformed_length_keeps_prefix() {
        let err = unframe("2#hix#abc").unwrap_err();
        assert_eq!(err.entries, vec!["hi"]);
        assert_eq!(
            err.error,
            FramingError::MalformedLength {
                position: 4,
                field: "x".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_payload() {
        let err = unframe("4#leet9#code").unwrap_err();
        assert_eq!(err.entries, vec!["leet"]);
        assert_eq!(
            err.error,
            FramingError::TruncatedPayload {
                position: 8,
                declared: 9,
                available: 4
            }
        );
    }

    #[test]
    fn test_missing_delimiter() {
        let err = unframe("4#leet42").unwrap_err();
        assert_eq!(err.entries, vec!["leet"]);
        assert_eq!(err.error, FramingError::MissingDelimiter { position: 6 });
    }

    #[test]
    fn test_split_character_is_invalid() {
        let err = unframe("1#é").unwrap_err();
        assert!(err.entries.is_empty());
        assert_eq!(err.error, FramingError::InvalidUtf8 { position: 2 });
    }

    #[test]
    fn test_signed_length_is_malformed() {
        let err = unframe("+2#hi").unwrap_err();
        assert!(matches!(err.error, FramingError::MalformedLength { .. }));
    }

    #[test]
    fn test_recover_skips_malformed_field() {
        // "1x" is skipped; scanning resumes right after its delimiter
        assert_eq!(recover_partial("1x#2#hi"), vec!["hi"]);
        assert_eq!(recover_partial("2#ab#2#cd"), vec!["ab", "cd"]);
    }

    #[test]
    fn test_recover_resumes_past_delimiter_not_digits() {
        // After skipping "ab3#", "abc" has no delimiter and ends the scan
        assert!(recover_partial("ab3#abc").is_empty());
    }

    #[test]
    fn test_recover_skip_can_surface_payload_bytes() {
        // Damaged length of ["1#", "x"]; the skip lands inside the old payload
        let framed = frame(&["1#", "x"]).replacen('2', "z", 1);
        assert_eq!(framed, "z#1#1#x");

        assert!(unframe(&framed).unwrap_err().entries.is_empty());
        assert_eq!(recover_partial(&framed), vec!["1"]);
    }

    #[test]
    fn test_recover_stops_at_truncation() {
        assert_eq!(recover_partial("4#leet4#cde"), vec!["leet"]);
    }

    #[test]
    fn test_recover_stops_on_length_overflow() {
        assert_eq!(
            recover_partial("2#ok99999999999999999999999#x"),
            vec!["ok"]
        );
    }

    #[test]
    fn test_recover_matches_strict_on_clean_input() {
        let framed = frame(&["alpha", "", "#|#", "7"]);
        assert_eq!(recover_partial(&framed), unframe(&framed).unwrap());
    }
}
