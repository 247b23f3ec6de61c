//! # Flightwire Tracker
//!
//! The extractor and per-flight aggregator: parser results become
//! canonical updates, updates merge into flight states, and reference
//! records (aircraft, waypoints, routes, ATIS) accumulate behind the
//! store boundary.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`extract`] | `(message, results)` → flight / waypoint / ATIS updates |
//! | [`aggregator`] | `FlightTracker` with the new-flight transition |
//! | [`store`] | `ReferenceStore` trait and the in-memory implementation |

pub mod aggregator;
pub mod extract;
pub mod store;

pub use aggregator::{callsigns_match, canonical_callsign, FlightTracker};
pub use extract::{extract, Extraction};
pub use store::{AircraftFacts, MemoryStore, ReferenceStore};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use flightwire_models::{AcarsMessage, Airframe, FlightLeg, ParserResult, PdcResult};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-21T17:36:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn extract_then_aggregate() {
        let mut msg = AcarsMessage::new(1, "H1", "irrelevant");
        msg.airframe = Some(Airframe {
            icao_hex: Some("7C6B2D".into()),
            tail: Some("VH-VQF".into()),
            ..Airframe::default()
        });
        msg.flight = Some(FlightLeg {
            callsign: Some("JST501".into()),
            ..FlightLeg::default()
        });
        let results = vec![ParserResult::Pdc(PdcResult {
            message_id: 1,
            format: "au_regional".into(),
            flight: Some("JST501".into()),
            origin: Some("YSSY".into()),
            destination: Some("YMML".into()),
            route_waypoints: vec!["WOL".into()],
            ..PdcResult::default()
        })];

        let extraction = extract(&msg, &results);
        let tracker = FlightTracker::new(MemoryStore::new());
        let state = tracker.update_flight(&extraction.flight, now()).unwrap();

        assert_eq!(state.flight_number.as_deref(), Some("JST501"));
        assert_eq!(state.origin.as_deref(), Some("YSSY"));
        assert_eq!(state.destination.as_deref(), Some("YMML"));
        assert_eq!(state.waypoints, vec!["WOL"]);
        assert!(tracker
            .store()
            .route("JST501", "YSSY", "YMML")
            .is_some());
    }
}
