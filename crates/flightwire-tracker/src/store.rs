//! The reference store boundary.
//!
//! Persistence proper is an external collaborator; the core talks to it
//! through [`ReferenceStore`]. The in-memory implementation keeps the
//! same uniqueness keys a backing database would enforce (ICAO hex,
//! waypoint name, (pattern, origin, dest)) and the `synced_at` export
//! boundary: unsynced rows are handed out by the `unsynced_*` getters
//! and flipped by `mark_*_synced`.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use flightwire_models::{
    AircraftRecord, AtisReport, RouteAircraft, RouteRecord, WaypointRecord, WaypointUpdate,
};

/// Identity fields for an aircraft upsert.
#[derive(Debug, Clone, Default)]
pub struct AircraftFacts {
    /// ICAO hex address. Required.
    pub icao_hex: String,
    /// Registration, when known.
    pub registration: Option<String>,
    /// Type designator, when known.
    pub aircraft_type: Option<String>,
    /// Operator, when known.
    pub operator: Option<String>,
}

/// Store operations the aggregator depends on.
pub trait ReferenceStore: Send + Sync {
    /// Merge non-empty aircraft facts, bumping the message counter.
    fn upsert_aircraft(&self, facts: &AircraftFacts, now: DateTime<Utc>);

    /// Insert or refresh a waypoint, bumping its source counter.
    fn upsert_waypoint(&self, waypoint: &WaypointUpdate);

    /// Record one observation of a route.
    fn upsert_route(&self, pattern: &str, origin: &str, dest: &str);

    /// Record that `registration` has flown the route.
    fn upsert_route_aircraft(&self, pattern: &str, origin: &str, dest: &str, registration: &str);

    /// Replace the current ATIS for its airport. A change of letter
    /// moves the superseded bulletin to history.
    fn upsert_atis(&self, report: &AtisReport);
}

/// In-memory reference store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    aircraft: HashMap<String, AircraftRecord>,
    waypoints: HashMap<String, WaypointRecord>,
    routes: HashMap<(String, String, String), RouteRecord>,
    route_aircraft: HashSet<RouteAircraft>,
    atis_current: HashMap<String, AtisReport>,
    atis_history: Vec<AtisReport>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aircraft rows not yet exported.
    pub fn unsynced_aircraft(&self) -> Vec<AircraftRecord> {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .aircraft
            .values()
            .filter(|a| a.synced_at.is_none())
            .cloned()
            .collect()
    }

    /// Flip the named aircraft rows to synced.
    pub fn mark_aircraft_synced(&self, icao_hexes: &[String], now: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("store poisoned");
        for hex in icao_hexes {
            if let Some(record) = inner.aircraft.get_mut(hex) {
                record.synced_at = Some(now);
            }
        }
    }

    /// Waypoint rows not yet exported.
    pub fn unsynced_waypoints(&self) -> Vec<WaypointRecord> {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .waypoints
            .values()
            .filter(|w| w.synced_at.is_none())
            .cloned()
            .collect()
    }

    /// Flip the named waypoint rows to synced.
    pub fn mark_waypoints_synced(&self, names: &[String], now: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("store poisoned");
        for name in names {
            if let Some(record) = inner.waypoints.get_mut(name) {
                record.synced_at = Some(now);
            }
        }
    }

    /// Route rows not yet exported.
    pub fn unsynced_routes(&self) -> Vec<RouteRecord> {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .routes
            .values()
            .filter(|r| r.synced_at.is_none())
            .cloned()
            .collect()
    }

    /// Flip the named route rows to synced.
    pub fn mark_routes_synced(&self, keys: &[(String, String, String)], now: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("store poisoned");
        for key in keys {
            if let Some(record) = inner.routes.get_mut(key) {
                record.synced_at = Some(now);
            }
        }
    }

    /// The registrations recorded for a route.
    pub fn route_registrations(&self, pattern: &str, origin: &str, dest: &str) -> Vec<String> {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .route_aircraft
            .iter()
            .filter(|ra| {
                ra.flight_pattern == pattern && ra.origin_icao == origin && ra.dest_icao == dest
            })
            .map(|ra| ra.registration.clone())
            .collect()
    }

    /// The current ATIS for an airport.
    pub fn current_atis(&self, airport: &str) -> Option<AtisReport> {
        let inner = self.inner.lock().expect("store poisoned");
        inner.atis_current.get(airport).cloned()
    }

    /// Superseded ATIS bulletins, oldest first.
    pub fn atis_history(&self, airport: &str) -> Vec<AtisReport> {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .atis_history
            .iter()
            .filter(|r| r.airport == airport)
            .cloned()
            .collect()
    }

    /// A snapshot of one aircraft record.
    pub fn aircraft(&self, icao_hex: &str) -> Option<AircraftRecord> {
        let inner = self.inner.lock().expect("store poisoned");
        inner.aircraft.get(icao_hex).cloned()
    }

    /// A snapshot of one route record.
    pub fn route(&self, pattern: &str, origin: &str, dest: &str) -> Option<RouteRecord> {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .routes
            .get(&(pattern.to_string(), origin.to_string(), dest.to_string()))
            .cloned()
    }
}

fn merge_field(target: &mut Option<String>, source: &Option<String>) {
    if target.is_none() {
        if let Some(value) = source {
            if !value.is_empty() {
                *target = Some(value.clone());
            }
        }
    }
}

impl ReferenceStore for MemoryStore {
    fn upsert_aircraft(&self, facts: &AircraftFacts, now: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("store poisoned");
        let record = inner
            .aircraft
            .entry(facts.icao_hex.clone())
            .or_insert_with(|| AircraftRecord {
                icao_hex: facts.icao_hex.clone(),
                registration: None,
                aircraft_type: None,
                operator: None,
                first_seen: now,
                last_seen: now,
                message_count: 0,
                synced_at: None,
            });
        merge_field(&mut record.registration, &facts.registration);
        merge_field(&mut record.aircraft_type, &facts.aircraft_type);
        merge_field(&mut record.operator, &facts.operator);
        record.last_seen = now;
        record.message_count += 1;
    }

    fn upsert_waypoint(&self, waypoint: &WaypointUpdate) {
        let mut inner = self.inner.lock().expect("store poisoned");
        let record = inner
            .waypoints
            .entry(waypoint.name.clone())
            .or_insert_with(|| WaypointRecord {
                name: waypoint.name.clone(),
                latitude: waypoint.latitude,
                longitude: waypoint.longitude,
                source_count: 0,
                synced_at: None,
            });
        record.latitude = waypoint.latitude;
        record.longitude = waypoint.longitude;
        record.source_count += 1;
    }

    fn upsert_route(&self, pattern: &str, origin: &str, dest: &str) {
        let mut inner = self.inner.lock().expect("store poisoned");
        let key = (pattern.to_string(), origin.to_string(), dest.to_string());
        let record = inner.routes.entry(key).or_insert_with(|| RouteRecord {
            flight_pattern: pattern.to_string(),
            origin_icao: origin.to_string(),
            dest_icao: dest.to_string(),
            observation_count: 0,
            synced_at: None,
        });
        record.observation_count += 1;
    }

    fn upsert_route_aircraft(&self, pattern: &str, origin: &str, dest: &str, registration: &str) {
        let mut inner = self.inner.lock().expect("store poisoned");
        inner.route_aircraft.insert(RouteAircraft {
            flight_pattern: pattern.to_string(),
            origin_icao: origin.to_string(),
            dest_icao: dest.to_string(),
            registration: registration.to_string(),
        });
    }

    fn upsert_atis(&self, report: &AtisReport) {
        let mut inner = self.inner.lock().expect("store poisoned");
        match inner.atis_current.get(&report.airport) {
            Some(current) if current.letter == report.letter => {
                inner
                    .atis_current
                    .insert(report.airport.clone(), report.clone());
            }
            Some(current) => {
                let superseded = current.clone();
                inner.atis_history.push(superseded);
                inner
                    .atis_current
                    .insert(report.airport.clone(), report.clone());
            }
            None => {
                inner
                    .atis_current
                    .insert(report.airport.clone(), report.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-21T17:36:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn aircraft_merge_keeps_known_fields() {
        let store = MemoryStore::new();
        store.upsert_aircraft(
            &AircraftFacts {
                icao_hex: "7C6B2D".into(),
                registration: Some("VH-VXM".into()),
                ..AircraftFacts::default()
            },
            now(),
        );
        store.upsert_aircraft(
            &AircraftFacts {
                icao_hex: "7C6B2D".into(),
                aircraft_type: Some("B738".into()),
                ..AircraftFacts::default()
            },
            now(),
        );
        let record = store.aircraft("7C6B2D").unwrap();
        assert_eq!(record.registration.as_deref(), Some("VH-VXM"));
        assert_eq!(record.aircraft_type.as_deref(), Some("B738"));
        assert_eq!(record.message_count, 2);
    }

    #[test]
    fn sync_boundary_round_trip() {
        let store = MemoryStore::new();
        store.upsert_aircraft(
            &AircraftFacts {
                icao_hex: "7C6B2D".into(),
                ..AircraftFacts::default()
            },
            now(),
        );
        let unsynced = store.unsynced_aircraft();
        assert_eq!(unsynced.len(), 1);

        store.mark_aircraft_synced(&["7C6B2D".to_string()], now());
        assert!(store.unsynced_aircraft().is_empty());
        assert_eq!(store.aircraft("7C6B2D").unwrap().synced_at, Some(now()));
    }

    #[test]
    fn route_uniqueness_key() {
        let store = MemoryStore::new();
        store.upsert_route("QF1", "YSSY", "EGLL");
        store.upsert_route("QF1", "YSSY", "EGLL");
        store.upsert_route("QF1", "YSSY", "WSSS");
        assert_eq!(store.route("QF1", "YSSY", "EGLL").unwrap().observation_count, 2);
        assert_eq!(store.route("QF1", "YSSY", "WSSS").unwrap().observation_count, 1);
    }

    #[test]
    fn atis_letter_change_appends_history() {
        let store = MemoryStore::new();
        let mut report = AtisReport {
            airport: "YSSY".into(),
            letter: 'A',
            raw: "info a".into(),
            ..AtisReport::default()
        };
        store.upsert_atis(&report);
        assert!(store.atis_history("YSSY").is_empty());

        // Same letter replaces in place.
        report.raw = "info a amended".into();
        store.upsert_atis(&report);
        assert!(store.atis_history("YSSY").is_empty());
        assert_eq!(store.current_atis("YSSY").unwrap().raw, "info a amended");

        // New letter supersedes.
        report.letter = 'B';
        store.upsert_atis(&report);
        let history = store.atis_history("YSSY");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].letter, 'A');
        assert_eq!(store.current_atis("YSSY").unwrap().letter, 'B');
    }
}
