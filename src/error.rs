//! Error type returned by generation, parsing and legacy conversion.

use thiserror::Error;

/// Errors that can occur while generating or parsing identifiers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system's secure random source failed to supply bytes.
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),

    /// The input has the wrong length or misplaced hyphens.
    #[error("invalid format: {message}")]
    InvalidFormat { message: &'static str },

    /// A hexadecimal group of the input contains a non-hex character.
    #[error("invalid hex in `{field}`: {source}")]
    HexDecode {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },
}

impl Error {
    pub(crate) const fn invalid_format(message: &'static str) -> Self {
        Self::InvalidFormat { message }
    }

    /// Returns true if the input text had the wrong shape (length or separators).
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Returns true if the input text contained non-hexadecimal characters.
    pub fn is_hex_decode(&self) -> bool {
        matches!(self, Self::HexDecode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    /// Names the failing field in the message
    #[test]
    fn names_the_failing_field_in_the_message() {
        let e = Error::HexDecode {
            field: "node",
            source: hex::FromHexError::InvalidHexCharacter { c: 'x', index: 3 },
        };
        assert!(e.is_hex_decode());
        assert!(!e.is_invalid_format());
        assert_eq!(
            e.to_string(),
            "invalid hex in `node`: Invalid character 'x' at position 3"
        );
        assert!(std::error::Error::source(&e).is_some());
    }

    /// Reports format problems without a source
    #[test]
    fn reports_format_problems_without_a_source() {
        let e = Error::invalid_format("expected 32 or 36 characters");
        assert!(e.is_invalid_format());
        assert_eq!(
            e.to_string(),
            "invalid format: expected 32 or 36 characters"
        );
        assert!(std::error::Error::source(&e).is_none());
    }
}
