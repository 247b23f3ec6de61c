//! Validated identity types: airport codes, flight numbers, registrations.
//!
//! ACARS free text is full of four-letter words that look like airport
//! codes and callsigns that vary between IATA and ICAO spellings. This
//! module centralises the validation and normalisation rules so every
//! parser and the aggregator agree on them.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// AirportCode
// ---------------------------------------------------------------------------

/// Common English words that pattern-match as airport codes in clearance
/// text. Anything here is rejected outright.
const AIRPORT_BLOCKLIST: &[&str] = &[
    "ASAT", "ATIS", "CTOT", "DATA", "DOOR", "FANS", "FROM", "FUEL", "GATE",
    "INFO", "INTO", "MINS", "MUST", "NEXT", "ONLY", "ONTO", "OVER", "STOP",
    "THAN", "THAT", "THEN", "THIS", "TIME", "WHEN", "WILL", "WIND", "WITH",
];

/// ICAO region letters never allocated as a code's first character.
const RESERVED_PREFIXES: &[char] = &['I', 'J', 'Q', 'X'];

/// A validated 3- or 4-letter airport code (IATA or ICAO).
///
/// Validation applies three rules: 3–4 uppercase ASCII letters, a first
/// letter that is an allocated ICAO region prefix, and absence from the
/// common-word blocklist.
///
/// # Examples
///
/// ```
/// use flightwire_models::AirportCode;
///
/// let code: AirportCode = "YSSY".parse().unwrap();
/// assert_eq!(code.as_str(), "YSSY");
///
/// assert!("WHEN".parse::<AirportCode>().is_err());
/// assert!("XYZ".parse::<AirportCode>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AirportCode(String);

impl AirportCode {
    /// Create a new airport code **without validation**.
    ///
    /// Prefer [`TryFrom`] or [`FromStr`] when the input is untrusted.
    pub fn new(code: &str) -> Self {
        Self(code.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ModelError> {
        let invalid = |reason: &str| ModelError::InvalidAirportCode {
            value: s.to_string(),
            reason: reason.to_string(),
        };
        if !(3..=4).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(invalid("must be 3 or 4 uppercase ASCII letters"));
        }
        let first = s.chars().next().unwrap_or('?');
        if RESERVED_PREFIXES.contains(&first) {
            return Err(invalid("unallocated ICAO region prefix"));
        }
        if AIRPORT_BLOCKLIST.contains(&s) {
            return Err(invalid("blocklisted common word"));
        }
        Ok(())
    }
}

/// Check whether `s` passes airport-code validation.
pub fn is_valid_airport_code(s: &str) -> bool {
    AirportCode::validate(s).is_ok()
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for AirportCode {
    type Error = ModelError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for AirportCode {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl FromStr for AirportCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

// ---------------------------------------------------------------------------
// Flight numbers
// ---------------------------------------------------------------------------

static FLIGHT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,3})0*([0-9]+)([A-Z]?)$").unwrap());

/// Normalise a flight number by stripping leading zeros from the numeric
/// suffix (`QF001` → `QF1`, `UAL0042` → `UAL42`).
///
/// The degenerate all-zero suffix keeps a single zero (`QF000` → `QF0`).
/// Inputs that are not prefix-plus-digits shaped are returned trimmed but
/// otherwise untouched; IATA↔ICAO airline-code conversion is deliberately
/// not attempted here.
pub fn normalize_flight_number(raw: &str) -> String {
    let trimmed = raw.trim();
    match FLIGHT_NUMBER.captures(trimmed) {
        Some(caps) => format!("{}{}{}", &caps[1], &caps[2], &caps[3]),
        None => trimmed.to_string(),
    }
}

static CALLSIGN_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)[A-Z]?$").unwrap());

/// The numeric suffix of a callsign, used to match IATA and ICAO variants
/// of the same flight (`QF1255` and `QFA1255` both yield `"1255"`).
pub fn callsign_suffix(callsign: &str) -> Option<String> {
    CALLSIGN_SUFFIX
        .captures(callsign.trim())
        .map(|caps| caps[1].trim_start_matches('0').to_string())
        .map(|s| if s.is_empty() { "0".to_string() } else { s })
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

/// Known registration shapes, most specific first. The ARINC envelope's
/// 7-character registration slot is matched against these in order.
static REGISTRATION_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // European / Oceanian hyphenated: F-GSQC, VH-VXM, PH-BHA
        r"^[A-Z]{1,2}-[A-Z]{3,5}$",
        // Hyphenated with a digit in the prefix: A4O-SI, 9V-SKA, B-16701
        r"^[A-Z0-9]{1,3}-[A-Z0-9]{2,5}$",
        // US N-numbers: N104UA, N1KE
        r"^N[1-9][0-9]{0,4}[A-Z]{0,2}$",
        // Unhyphenated prefixed: JA8089, HL7714, B1234
        r"^[A-Z]{1,2}[0-9]{2,5}[A-Z]{0,2}$",
        // Generic fallback, two letters then alphanumerics
        r"^[A-Z]{2}[A-Z0-9]{2,5}$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Strip the leading-dot padding from an ARINC registration slot and
/// validate the remainder against the known national shapes.
///
/// Returns `None` when nothing in the slot matches.
pub fn clean_registration(slot: &str) -> Option<String> {
    let candidate = slot.trim_start_matches('.').trim();
    if candidate.is_empty() {
        return None;
    }
    REGISTRATION_SHAPES
        .iter()
        .any(|re| re.is_match(candidate))
        .then(|| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airport_codes_valid() {
        for code in ["YSSY", "KLAX", "EGLL", "SYD", "LAX"] {
            assert!(is_valid_airport_code(code), "{code} should be valid");
        }
    }

    #[test]
    fn airport_codes_invalid() {
        for code in ["WHEN", "WITH", "ABCDE", "XYZ", "1234", "", "ysSY", "QNH"] {
            assert!(!is_valid_airport_code(code), "{code} should be invalid");
        }
    }

    #[test]
    fn airport_code_parse() {
        let code: AirportCode = "YMML".parse().unwrap();
        assert_eq!(code.to_string(), "YMML");
        assert!("MUST".parse::<AirportCode>().is_err());
    }

    #[test]
    fn flight_number_normalisation() {
        assert_eq!(normalize_flight_number("QF001"), "QF1");
        assert_eq!(normalize_flight_number("QF008"), "QF8");
        assert_eq!(normalize_flight_number("QFA001"), "QFA1");
        assert_eq!(normalize_flight_number("UAL0042"), "UAL42");
        assert_eq!(normalize_flight_number("QF000"), "QF0");
        assert_eq!(normalize_flight_number("QF1"), "QF1");
        assert_eq!(normalize_flight_number(""), "");
        assert_eq!(normalize_flight_number("  JST501 "), "JST501");
    }

    #[test]
    fn callsign_suffixes_match_across_forms() {
        assert_eq!(callsign_suffix("QF1255").as_deref(), Some("1255"));
        assert_eq!(callsign_suffix("QFA1255").as_deref(), Some("1255"));
        assert_eq!(callsign_suffix("UAL0042").as_deref(), Some("42"));
        assert_eq!(callsign_suffix("NOFLIGHT"), None);
    }

    #[test]
    fn registration_shapes() {
        assert_eq!(clean_registration(".F-GSQC").as_deref(), Some("F-GSQC"));
        assert_eq!(clean_registration(".A4O-SI").as_deref(), Some("A4O-SI"));
        assert!(clean_registration("N104UA.").is_none());
        assert_eq!(clean_registration(".N104UA").as_deref(), Some("N104UA"));
        assert_eq!(clean_registration("..JA8089").as_deref(), Some("JA8089"));
        assert_eq!(clean_registration("......."), None);
    }
}
