//! Turning parser results into canonical updates.
//!
//! Extraction starts from the message envelope (identity is envelope
//! business, not parser business) and then lets each result variant
//! contribute its recognised fields. No JSON round-trip is involved —
//! every variant knows which of its fields feed the flight update, the
//! waypoint list, and the ATIS slot.

use flightwire_models::{
    position_is_set, AcarsMessage, AtisReport, ElementValue, FlightUpdate, ParserResult, Position,
    RouteItem, WaypointUpdate, is_valid_airport_code, normalize_flight_number,
};

/// Everything one `(message, results)` pair contributes downstream.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// The merged flight update.
    pub flight: FlightUpdate,
    /// Waypoints with resolved coordinates.
    pub waypoints: Vec<WaypointUpdate>,
    /// An ATIS bulletin, when one of the results carried one.
    pub atis: Option<AtisReport>,
}

/// Build the canonical updates for a message and its results.
pub fn extract(msg: &AcarsMessage, results: &[ParserResult]) -> Extraction {
    let mut extraction = Extraction::default();
    let update = &mut extraction.flight;

    update.icao_hex = msg.icao_hex().map(str::to_uppercase);
    update.registration = msg.registration().map(str::to_string);
    if let Some(airframe) = &msg.airframe {
        update.aircraft_type = airframe.aircraft_type.clone();
        update.operator = airframe.operator.clone();
    }
    update.timestamp = msg.timestamp;
    if let Some(callsign) = msg.callsign() {
        set_flight_number(update, callsign);
    }
    if let Some(flight) = &msg.flight {
        set_airport(&mut update.origin, flight.departing.as_deref());
        set_airport(&mut update.destination, flight.destination.as_deref());
    }

    for result in results {
        extract_into(result, &mut extraction);
    }
    extraction
}

fn set_flight_number(update: &mut FlightUpdate, raw: &str) {
    let normalised = normalize_flight_number(raw);
    if !normalised.is_empty() {
        update.flight_number = Some(normalised);
    }
}

fn set_airport(slot: &mut Option<String>, candidate: Option<&str>) {
    if slot.is_some() {
        return;
    }
    if let Some(code) = candidate {
        if is_valid_airport_code(code) {
            *slot = Some(code.to_string());
        }
    }
}

fn set_position(update: &mut FlightUpdate, latitude: f64, longitude: f64) {
    if position_is_set(latitude, longitude) {
        update.latitude = Some(latitude);
        update.longitude = Some(longitude);
    }
}

fn add_waypoint_name(update: &mut FlightUpdate, name: &str) {
    if !update.waypoints.iter().any(|w| w == name) {
        update.waypoints.push(name.to_string());
    }
}

/// Merge one result's contribution into the extraction.
fn extract_into(result: &ParserResult, extraction: &mut Extraction) {
    let update = &mut extraction.flight;
    match result {
        ParserResult::Cpdlc(cpdlc) => {
            if update.registration.is_none() {
                update.registration = cpdlc.registration.clone();
            }
            for element in cpdlc.elements.iter().flatten() {
                for value in &element.data {
                    match value {
                        ElementValue::PositionReport(report) => {
                            if let Position::LatLon {
                                latitude,
                                longitude,
                            } = report.position
                            {
                                set_position(update, latitude, longitude);
                            }
                            if let Some(next) = &report.next_fix {
                                add_waypoint_name(update, &next.to_string());
                            }
                        }
                        ElementValue::RouteClearance(route) => {
                            for item in &route.route {
                                if let RouteItem::PublishedIdentifier {
                                    name,
                                    latitude,
                                    longitude,
                                } = item
                                {
                                    add_waypoint_name(update, name);
                                    if position_is_set(*latitude, *longitude) {
                                        extraction.waypoints.push(WaypointUpdate {
                                            name: name.clone(),
                                            latitude: *latitude,
                                            longitude: *longitude,
                                        });
                                    }
                                } else {
                                    add_waypoint_name(update, &item.to_string());
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
        ParserResult::Pdc(pdc) => {
            if let Some(flight) = &pdc.flight {
                set_flight_number(update, flight);
            }
            set_airport(&mut update.origin, pdc.origin.as_deref());
            set_airport(&mut update.destination, pdc.destination.as_deref());
            for waypoint in &pdc.route_waypoints {
                add_waypoint_name(update, waypoint);
            }
        }
        ParserResult::Loadsheet(loadsheet) => {
            if let Some(flight) = &loadsheet.flight {
                set_flight_number(update, flight);
            }
            set_airport(&mut update.origin, loadsheet.origin.as_deref());
            set_airport(&mut update.destination, loadsheet.destination.as_deref());
            if update.registration.is_none() {
                update.registration = loadsheet.tail.clone();
            }
        }
        ParserResult::Label17(label17) => {
            set_position(update, label17.latitude, label17.longitude);
            if update.has_position() {
                update.altitude_ft = label17.altitude_ft;
                update.ground_speed_kt = label17.ground_speed_kt;
                update.track_deg = label17.track_deg;
            }
            if update.timestamp.is_none() {
                update.timestamp = label17.reported_at;
            }
        }
        ParserResult::Envelope(envelope) => {
            if update.registration.is_none() {
                update.registration = envelope.registration.clone();
            }
            if let (Some(lat), Some(lon)) = (envelope.latitude, envelope.longitude) {
                set_position(update, lat, lon);
                if update.has_position() {
                    update.altitude_ft = envelope.altitude_ft;
                }
            }
        }
        ParserResult::FlightSubscription(subscription) => {
            if let Some(flight) = &subscription.flight {
                set_flight_number(update, flight);
            }
            set_airport(&mut update.origin, subscription.origin.as_deref());
            set_airport(&mut update.destination, subscription.destination.as_deref());
        }
        ParserResult::PaxBag(pax_bag) => {
            if let Some(flight) = &pax_bag.flight {
                set_flight_number(update, flight);
            }
        }
        ParserResult::PaxConnStatus(status) => {
            if let Some(flight) = &status.flight {
                set_flight_number(update, flight);
            }
        }
        ParserResult::Atis(atis) => {
            let report = &atis.report;
            if is_valid_airport_code(&report.airport) && report.letter.is_ascii_uppercase() {
                extraction.atis = Some(report.clone());
            }
        }
        ParserResult::Weather(_) | ParserResult::Dispatcher(_) => {}
    }

    // Waypoint updates need both a name and real coordinates; names
    // without coordinates stay on the flight update only.
    extraction
        .waypoints
        .retain(|w| !w.name.is_empty() && position_is_set(w.latitude, w.longitude));
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightwire_models::{
        Airframe, AtisResult, FlightLeg, Label17Result, PdcResult,
    };

    fn base_message() -> AcarsMessage {
        let mut msg = AcarsMessage::new(1, "H1", "x");
        msg.airframe = Some(Airframe {
            icao_hex: Some("7c6b2d".into()),
            tail: Some("VH-VXM".into()),
            ..Airframe::default()
        });
        msg.flight = Some(FlightLeg {
            callsign: Some("QF001".into()),
            departing: Some("YSSY".into()),
            destination: Some("YMML".into()),
        });
        msg
    }

    #[test]
    fn envelope_identity_is_extracted() {
        let extraction = extract(&base_message(), &[]);
        assert_eq!(extraction.flight.icao_hex.as_deref(), Some("7C6B2D"));
        assert_eq!(extraction.flight.registration.as_deref(), Some("VH-VXM"));
        assert_eq!(extraction.flight.flight_number.as_deref(), Some("QF1"));
        assert_eq!(extraction.flight.origin.as_deref(), Some("YSSY"));
        assert_eq!(extraction.flight.destination.as_deref(), Some("YMML"));
    }

    #[test]
    fn invalid_envelope_airports_are_dropped() {
        let mut msg = base_message();
        msg.flight = Some(FlightLeg {
            callsign: None,
            departing: Some("WHEN".into()),
            destination: Some("ABCDE".into()),
        });
        let extraction = extract(&msg, &[]);
        assert!(extraction.flight.origin.is_none());
        assert!(extraction.flight.destination.is_none());
    }

    #[test]
    fn zero_zero_position_is_unset() {
        let result = ParserResult::Label17(Label17Result {
            message_id: 1,
            latitude: 0.0,
            longitude: 0.0,
            altitude_ft: Some(37_000),
            ..Label17Result::default()
        });
        let extraction = extract(&base_message(), &[result]);
        assert!(extraction.flight.latitude.is_none());
        assert!(extraction.flight.altitude_ft.is_none());
    }

    #[test]
    fn equator_crossing_position_is_kept() {
        let result = ParserResult::Label17(Label17Result {
            message_id: 1,
            latitude: 0.0,
            longitude: 151.177,
            ..Label17Result::default()
        });
        let extraction = extract(&base_message(), &[result]);
        assert_eq!(extraction.flight.latitude, Some(0.0));
        assert_eq!(extraction.flight.longitude, Some(151.177));
    }

    #[test]
    fn pdc_fills_flight_fields() {
        let result = ParserResult::Pdc(PdcResult {
            message_id: 1,
            format: "au_regional".into(),
            flight: Some("JST501".into()),
            origin: Some("YSSY".into()),
            destination: Some("YMML".into()),
            route_waypoints: vec!["WOL".into(), "RAZZI".into()],
            ..PdcResult::default()
        });
        let msg = AcarsMessage::new(2, "H1", "x");
        let extraction = extract(&msg, &[result]);
        assert_eq!(extraction.flight.flight_number.as_deref(), Some("JST501"));
        assert_eq!(extraction.flight.waypoints, vec!["WOL", "RAZZI"]);
    }

    #[test]
    fn atis_requires_valid_airport_and_letter() {
        let good = ParserResult::Atis(AtisResult {
            message_id: 1,
            report: AtisReport {
                airport: "YSSY".into(),
                letter: 'B',
                raw: "x".into(),
                ..AtisReport::default()
            },
        });
        let extraction = extract(&AcarsMessage::new(3, "H1", "x"), &[good]);
        assert!(extraction.atis.is_some());

        let bad = ParserResult::Atis(AtisResult {
            message_id: 1,
            report: AtisReport {
                airport: "WHEN".into(),
                letter: 'B',
                raw: "x".into(),
                ..AtisReport::default()
            },
        });
        let extraction = extract(&AcarsMessage::new(4, "H1", "x"), &[bad]);
        assert!(extraction.atis.is_none());
    }
}
