//! The ACARS message input unit.
//!
//! An [`AcarsMessage`] is what the ingest boundary hands to the parser
//! registry: a label, a text body, and whatever envelope metadata the feed
//! decoder was able to attach (airframe identity, flight leg, link
//! direction, radio). Messages are constructed once by the decoder and
//! read-only thereafter; every parser in a dispatch cycle receives the
//! same `&AcarsMessage`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LinkDirection
// ---------------------------------------------------------------------------

/// Whether a message travelled air→ground or ground→air.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LinkDirection {
    /// Ground → aircraft.
    Uplink,
    /// Aircraft → ground.
    Downlink,
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkDirection::Uplink => f.write_str("uplink"),
            LinkDirection::Downlink => f.write_str("downlink"),
        }
    }
}

// ---------------------------------------------------------------------------
// Airframe / FlightLeg / RadioMetadata
// ---------------------------------------------------------------------------

/// Airframe identity carried in the feed envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Airframe {
    /// 24-bit ICAO address as uppercase hex (e.g. `"7C6B2D"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao_hex: Option<String>,
    /// Tail registration (e.g. `"VH-VXM"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    /// ICAO aircraft type designator (e.g. `"B738"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<String>,
    /// Operating airline name or code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Flight leg information carried in the feed envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FlightLeg {
    /// Flight callsign as transmitted (e.g. `"QF0012"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,
    /// Departure airport code when the feed knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departing: Option<String>,
    /// Destination airport code when the feed knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// Radio-level reception metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RadioMetadata {
    /// Receive frequency in MHz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_mhz: Option<f64>,
    /// Signal level reported by the decoder (dB, decoder-specific).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_level: Option<f64>,
    /// Receiving station identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

// ---------------------------------------------------------------------------
// AcarsMessage
// ---------------------------------------------------------------------------

/// One ACARS message as normalised by the ingest boundary.
///
/// `label` is the two-character ACARS label (`"H1"`, `"AA"`, `"17"`, …)
/// and `text` the free-form body. All other fields are optional envelope
/// metadata; parsers must tolerate their absence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AcarsMessage {
    /// Monotonic message id assigned by the ingest layer.
    pub id: u64,
    /// Two-character ACARS label.
    pub label: String,
    /// Message body.
    pub text: String,
    /// Tail registration from the ACARS block header, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    /// Airframe identity block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airframe: Option<Airframe>,
    /// Flight leg block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightLeg>,
    /// Link direction, when the feed decoder reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_direction: Option<LinkDirection>,
    /// ACARS block id character (downlinks use `0`–`9`, uplinks `A`–`Z`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    /// Reception timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Radio reception metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio: Option<RadioMetadata>,
}

impl AcarsMessage {
    /// Construct a bare message with just the fields every parser needs.
    pub fn new(id: u64, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// The ICAO hex address from the airframe block, if any.
    pub fn icao_hex(&self) -> Option<&str> {
        self.airframe.as_ref().and_then(|a| a.icao_hex.as_deref())
    }

    /// The best available registration: airframe block first, then the
    /// block-header tail.
    pub fn registration(&self) -> Option<&str> {
        self.airframe
            .as_ref()
            .and_then(|a| a.tail.as_deref())
            .or(self.tail.as_deref())
    }

    /// The flight callsign from the flight block, if any.
    pub fn callsign(&self) -> Option<&str> {
        self.flight.as_ref().and_then(|f| f.callsign.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_new_defaults() {
        let msg = AcarsMessage::new(7, "H1", "POS N12 E034");
        assert_eq!(msg.id, 7);
        assert_eq!(msg.label, "H1");
        assert!(msg.tail.is_none());
        assert!(msg.registration().is_none());
    }

    #[test]
    fn registration_prefers_airframe_tail() {
        let mut msg = AcarsMessage::new(1, "AA", "x");
        msg.tail = Some("VH.VXM".into());
        msg.airframe = Some(Airframe {
            tail: Some("VH-VXM".into()),
            ..Airframe::default()
        });
        assert_eq!(msg.registration(), Some("VH-VXM"));
    }

    #[test]
    fn link_direction_serde_snake_case() {
        let json = serde_json::to_string(&LinkDirection::Downlink).unwrap();
        assert_eq!(json, "\"downlink\"");
    }
}
