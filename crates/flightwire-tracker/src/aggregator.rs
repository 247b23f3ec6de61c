//! The per-flight aggregator.
//!
//! Flight states are keyed by ICAO hex (registration as fallback) and
//! mutated under a single exclusive lock per update; reference-record
//! upserts happen inside the same critical section so a crash cannot
//! leave the store ahead of the flight table.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use flightwire_models::{callsign_suffix, AircraftPosition, FlightState, FlightUpdate};
use tracing::debug;

use crate::store::{AircraftFacts, ReferenceStore};

/// The flight aggregator.
pub struct FlightTracker<S: ReferenceStore> {
    flights: Mutex<HashMap<String, FlightState>>,
    store: S,
}

impl<S: ReferenceStore> FlightTracker<S> {
    /// Create an aggregator over the given store.
    pub fn new(store: S) -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
            store,
        }
    }

    /// Access the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Merge one update into the flight table.
    ///
    /// Returns the post-update state, or `None` when the update carries
    /// no identity at all. A change of flight number starts a new
    /// flight: a fresh record is built and only the aircraft-level
    /// identity (and last position) moves across.
    pub fn update_flight(&self, update: &FlightUpdate, now: DateTime<Utc>) -> Option<FlightState> {
        let key = update.key()?.to_string();
        let seen_at = update.timestamp.unwrap_or(now);

        let mut flights = self.flights.lock().expect("flight table poisoned");
        let state = flights
            .entry(key.clone())
            .or_insert_with(|| FlightState::new(seen_at));

        if let Some(incoming) = update.flight_number.as_deref() {
            let changed = state
                .flight_number
                .as_deref()
                .is_some_and(|current| current != incoming);
            if changed {
                debug!(
                    key = %key,
                    from = state.flight_number.as_deref(),
                    to = incoming,
                    "new flight for airframe"
                );
                *state = new_flight_from(state, seen_at);
            }
            state.flight_number = Some(incoming.to_string());
        }

        if state.icao_hex.is_none() {
            state.icao_hex = update.icao_hex.clone();
        }
        if state.registration.is_none() {
            state.registration = update.registration.clone();
        }
        if update.origin.is_some() {
            state.origin = update.origin.clone();
        }
        if update.destination.is_some() {
            state.destination = update.destination.clone();
        }
        if update.has_position() {
            state.position = Some(AircraftPosition {
                latitude: update.latitude.unwrap_or_default(),
                longitude: update.longitude.unwrap_or_default(),
                altitude_ft: update.altitude_ft,
                ground_speed_kt: update.ground_speed_kt,
                track_deg: update.track_deg,
            });
        }
        for waypoint in &update.waypoints {
            if !state.waypoints.iter().any(|w| w == waypoint) {
                state.waypoints.push(waypoint.clone());
            }
        }
        state.message_count += 1;
        state.last_seen = seen_at;

        // Reference records, same critical section.
        if let (Some(icao_hex), Some(registration)) = (&update.icao_hex, &update.registration) {
            self.store.upsert_aircraft(
                &AircraftFacts {
                    icao_hex: icao_hex.clone(),
                    registration: Some(registration.clone()),
                    aircraft_type: update.aircraft_type.clone(),
                    operator: update.operator.clone(),
                },
                seen_at,
            );
        }
        if let (Some(flight), Some(origin), Some(dest)) =
            (&state.flight_number, &update.origin, &update.destination)
        {
            self.store.upsert_route(flight, origin, dest);
            if let Some(registration) = &state.registration {
                self.store
                    .upsert_route_aircraft(flight, origin, dest, registration);
            }
        }

        Some(state.clone())
    }

    /// A snapshot of one flight state.
    pub fn flight(&self, key: &str) -> Option<FlightState> {
        self.flights
            .lock()
            .expect("flight table poisoned")
            .get(key)
            .cloned()
    }

    /// Number of tracked airframes.
    pub fn len(&self) -> usize {
        self.flights.lock().expect("flight table poisoned").len()
    }

    /// `true` when nothing is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the fresh record for a new flight, moving the aircraft-level
/// identity across and leaving the per-flight fields empty.
fn new_flight_from(previous: &FlightState, now: DateTime<Utc>) -> FlightState {
    FlightState {
        icao_hex: previous.icao_hex.clone(),
        registration: previous.registration.clone(),
        flight_number: None,
        origin: None,
        destination: None,
        position: previous.position.clone(),
        waypoints: Vec::new(),
        first_seen: now,
        last_seen: now,
        message_count: 0,
    }
}

// ---------------------------------------------------------------------------
// Callsign-suffix matching
// ---------------------------------------------------------------------------

/// `true` when two callsigns refer to the same flight by numeric suffix
/// (`QF1255` vs `QFA1255`). Callers gate this on matching ICAO hex and
/// flight date.
pub fn callsigns_match(a: &str, b: &str) -> bool {
    match (callsign_suffix(a), callsign_suffix(b)) {
        (Some(sa), Some(sb)) => sa == sb,
        _ => false,
    }
}

/// Pick the canonical form when suffix-matched callsign variants
/// collide: the longer (ICAO) spelling wins; ties keep the first.
pub fn canonical_callsign<'a>(a: &'a str, b: &'a str) -> &'a str {
    if b.len() > a.len() {
        b
    } else {
        a
    }
}
