//! Error types for the `flightwire-models` crate.
//!
//! All fallible constructors and `TryFrom` implementations in this crate
//! return variants of [`ModelError`]. Normalisation helpers that have a
//! defined fallback (flight numbers pass through untouched, registration
//! slots yield `None`) stay infallible instead of erroring.

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// An airport code failed length, prefix, or blocklist validation.
    #[error("invalid airport code \"{value}\": {reason}")]
    InvalidAirportCode {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_airport() {
        let err = ModelError::InvalidAirportCode {
            value: "WHEN".into(),
            reason: "blocklisted common word".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid airport code \"WHEN\": blocklisted common word"
        );
    }
}
