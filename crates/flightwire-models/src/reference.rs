//! Reference records learned from traffic: aircraft, waypoints, routes.
//!
//! All reference records carry a nullable `synced_at` marker used by the
//! export boundary — rows with `synced_at == None` are pending export and
//! are flipped to the export time by the store's `mark_*_synced`
//! operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An aircraft learned from traffic, keyed by ICAO hex.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AircraftRecord {
    /// 24-bit ICAO address as uppercase hex. Unique.
    pub icao_hex: String,
    /// Registration, when learned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// ICAO type designator, when learned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<String>,
    /// Operator, when learned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// First time this airframe was heard.
    pub first_seen: DateTime<Utc>,
    /// Last time this airframe was heard.
    pub last_seen: DateTime<Utc>,
    /// Total messages attributed to this airframe.
    pub message_count: u64,
    /// Export marker; `None` until exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

/// A waypoint with coordinates, keyed by name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WaypointRecord {
    /// The waypoint name. Unique.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// How many messages have reported this waypoint.
    pub source_count: u64,
    /// Export marker; `None` until exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

/// A route observation, keyed by (flight pattern, origin, destination).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteRecord {
    /// The normalised flight-number pattern (e.g. `QF1`).
    pub flight_pattern: String,
    /// Origin airport code.
    pub origin_icao: String,
    /// Destination airport code.
    pub dest_icao: String,
    /// How many times this route has been observed.
    pub observation_count: u64,
    /// Export marker; `None` until exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

impl RouteRecord {
    /// The uniqueness key for this route.
    pub fn key(&self) -> (String, String, String) {
        (
            self.flight_pattern.clone(),
            self.origin_icao.clone(),
            self.dest_icao.clone(),
        )
    }
}

/// The route × registration join: which airframes have flown a route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteAircraft {
    /// The route's flight pattern.
    pub flight_pattern: String,
    /// The route's origin.
    pub origin_icao: String,
    /// The route's destination.
    pub dest_icao: String,
    /// The registration observed on the route.
    pub registration: String,
}
