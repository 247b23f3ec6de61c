//! Per-flight aggregate state and the update records that feed it.
//!
//! A [`FlightState`] exists for an aircraft as soon as one message has
//! contributed identity (ICAO hex or registration). Updates are merged in
//! by the aggregator; a change of flight number starts a new flight and
//! resets the per-flight fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AircraftPosition
// ---------------------------------------------------------------------------

/// The most recent known position of an aircraft.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AircraftPosition {
    /// Latitude in decimal degrees, south negative.
    pub latitude: f64,
    /// Longitude in decimal degrees, west negative.
    pub longitude: f64,
    /// Altitude in feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<i32>,
    /// Ground speed in knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_speed_kt: Option<f64>,
    /// Track in degrees true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_deg: Option<f64>,
}

/// Whether a lat/lon pair counts as a real position.
///
/// `(0, 0)` together is treated as unset (a common null sentinel in
/// avionics output); a single zero on the equator or prime meridian is
/// perfectly valid.
pub fn position_is_set(latitude: f64, longitude: f64) -> bool {
    latitude != 0.0 || longitude != 0.0
}

// ---------------------------------------------------------------------------
// FlightState
// ---------------------------------------------------------------------------

/// The aggregate record for one aircraft's current flight.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlightState {
    /// 24-bit ICAO address as uppercase hex, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao_hex: Option<String>,
    /// Registration, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// Normalised flight number of the current flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    /// Origin airport code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Destination airport code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Last reported position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<AircraftPosition>,
    /// Waypoints seen for this flight, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<String>,
    /// When the current flight was first seen.
    pub first_seen: DateTime<Utc>,
    /// When the aircraft was last heard.
    pub last_seen: DateTime<Utc>,
    /// Messages contributing to the current flight.
    pub message_count: u64,
}

impl FlightState {
    /// Create an empty state first seen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            icao_hex: None,
            registration: None,
            flight_number: None,
            origin: None,
            destination: None,
            position: None,
            waypoints: Vec::new(),
            first_seen: now,
            last_seen: now,
            message_count: 0,
        }
    }

    /// The aggregation key: ICAO hex when available, else registration.
    pub fn key(&self) -> Option<&str> {
        self.icao_hex.as_deref().or(self.registration.as_deref())
    }
}

// ---------------------------------------------------------------------------
// FlightUpdate / WaypointUpdate
// ---------------------------------------------------------------------------

/// One message's contribution to a flight, as produced by the extractor.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FlightUpdate {
    /// ICAO hex from the message envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao_hex: Option<String>,
    /// Registration from the envelope or a parser result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// ICAO type designator from the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<String>,
    /// Operator from the envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Normalised flight number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    /// Origin airport code (already validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Destination airport code (already validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Latitude, when the message carried a position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, when the message carried a position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Altitude in feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<i32>,
    /// Ground speed in knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_speed_kt: Option<f64>,
    /// Track in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_deg: Option<f64>,
    /// Route waypoint names carried by the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<String>,
    /// The message timestamp, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl FlightUpdate {
    /// Whether this update can be keyed to an aircraft at all.
    pub fn has_identity(&self) -> bool {
        self.icao_hex.is_some() || self.registration.is_some()
    }

    /// The aggregation key: ICAO hex when available, else registration.
    pub fn key(&self) -> Option<&str> {
        self.icao_hex.as_deref().or(self.registration.as_deref())
    }

    /// Whether the update carries a usable position per the `(0,0)` rule.
    pub fn has_position(&self) -> bool {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => position_is_set(lat, lon),
            _ => false,
        }
    }
}

/// A named waypoint with resolved coordinates, destined for the
/// reference store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WaypointUpdate {
    /// The waypoint name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_zero_is_unset() {
        assert!(!position_is_set(0.0, 0.0));
        assert!(position_is_set(0.0, 151.177));
        assert!(position_is_set(-33.95, 0.0));
        assert!(position_is_set(-33.95, 151.177));
    }

    #[test]
    fn update_key_prefers_icao() {
        let update = FlightUpdate {
            icao_hex: Some("7C6B2D".into()),
            registration: Some("VH-VXM".into()),
            ..FlightUpdate::default()
        };
        assert_eq!(update.key(), Some("7C6B2D"));
        assert!(update.has_identity());
    }

    #[test]
    fn update_without_identity() {
        let update = FlightUpdate::default();
        assert!(!update.has_identity());
        assert!(update.key().is_none());
    }
}
