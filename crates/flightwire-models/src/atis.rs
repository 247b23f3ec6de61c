//! ATIS (Automated Terminal Information Service) records.
//!
//! `atis_current` holds exactly one row per airport; any change of the
//! rolling information letter appends the superseded row to
//! `atis_history`. Parsed sub-fields are best-effort — a missing field
//! means the broadcast did not carry it in a recognisable form.

use serde::{Deserialize, Serialize};

/// Whether an ATIS bulletin covers arrivals, departures, or both.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AtisType {
    /// Arrival-only bulletin.
    Arr,
    /// Departure-only bulletin.
    Dep,
    /// Combined bulletin (serialised as the empty string).
    #[default]
    #[serde(rename = "")]
    Combined,
}

/// One parsed ATIS bulletin.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AtisReport {
    /// Airport ICAO code.
    pub airport: String,
    /// Rolling information letter, `A`..=`Z`.
    pub letter: char,
    /// Arrival / departure / combined.
    #[serde(default)]
    pub atis_type: AtisType,
    /// Bulletin time as transmitted (e.g. `"0530Z"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// The raw bulletin text.
    pub raw: String,
    /// Runways in use.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runways: Vec<String>,
    /// Approach types in use.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approaches: Vec<String>,
    /// Wind as transmitted (e.g. `"240/12"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
    /// Visibility as transmitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Cloud groups as transmitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clouds: Option<String>,
    /// Temperature in °C.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i16>,
    /// Dew point in °C.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<i16>,
    /// QNH as transmitted (hPa or inHg per the broadcast).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qnh: Option<String>,
    /// Trailing remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atis_type_serialises_per_wire_convention() {
        assert_eq!(serde_json::to_string(&AtisType::Arr).unwrap(), "\"ARR\"");
        assert_eq!(serde_json::to_string(&AtisType::Dep).unwrap(), "\"DEP\"");
        assert_eq!(serde_json::to_string(&AtisType::Combined).unwrap(), "\"\"");
    }
}
