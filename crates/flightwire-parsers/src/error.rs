//! Decoder error kinds.
//!
//! [`DecodeError`] is the single error type used by the CPDLC decoder.
//! All errors are values carried inside results at the parser boundary —
//! nothing here ever crosses the registry as a panic.

/// Errors produced while decoding an ARINC-622 envelope or its UPER
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The bit reader was asked to read past the end of the buffer.
    #[error("insufficient_bits")]
    InsufficientBits,

    /// A CHOICE alternative exceeded its declared maximum.
    #[error("invalid_choice")]
    InvalidChoice,

    /// The ARINC-622 CRC did not verify.
    #[error("crc_failed")]
    CrcFailed,

    /// The text prefix after the IMI was shorter than 10 characters.
    #[error("message_too_short")]
    MessageTooShort,

    /// The hex payload was malformed.
    #[error("invalid_hex")]
    InvalidHex,

    /// The envelope was intact but carried no binary payload.
    #[error("no_payload_data")]
    NoPayloadData,

    /// The UPER decode did not complete.
    #[error("decode_failed: {0}")]
    DecodeFailed(String),
}

impl DecodeError {
    /// Shorthand for a [`DecodeError::DecodeFailed`] with a cause.
    pub fn failed(cause: impl Into<String>) -> Self {
        DecodeError::DecodeFailed(cause.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_strings_match_wire_kinds() {
        assert_eq!(DecodeError::InsufficientBits.to_string(), "insufficient_bits");
        assert_eq!(DecodeError::CrcFailed.to_string(), "crc_failed");
        assert_eq!(
            DecodeError::failed("element id 201 out of range").to_string(),
            "decode_failed: element id 201 out of range"
        );
    }
}
