//! Ground-ops free-text families: flight subscriptions, passenger and
//! bag counts, connection status, and dispatcher chatter.

use std::sync::LazyLock;

use flightwire_models::{
    AcarsMessage, Connection, DispatcherResult, FlightSubscriptionResult, ParserResult,
    PaxBagResult, PaxConnStatusResult,
};
use regex::Regex;

use crate::registry::MessageParser;

// ---------------------------------------------------------------------------
// Flight subscriptions
// ---------------------------------------------------------------------------

static SUBSCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"SUB[ /](?P<flight>[A-Z]{2,3}[0-9]{1,4}[A-Z]?)(?:[ /](?P<date>[0-9]{1,2}[A-Z]{3}[0-9]{2}))?(?:[ /](?P<origin>[A-Z]{4})[ /-](?P<dest>[A-Z]{4}))?",
    )
    .unwrap()
});

/// Flight-subscription parser.
pub struct FlightSubscriptionParser;

impl MessageParser for FlightSubscriptionParser {
    fn name(&self) -> &'static str {
        "flight_subscription"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("SUB/") || text.contains("SUB ")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        let caps = SUBSCRIPTION.captures(&msg.text)?;
        Some(ParserResult::FlightSubscription(FlightSubscriptionResult {
            message_id: msg.id,
            format: "slash_subscription".to_string(),
            flight: Some(caps["flight"].to_string()),
            date: caps.name("date").map(|m| m.as_str().to_string()),
            origin: caps.name("origin").map(|m| m.as_str().to_string()),
            destination: caps.name("dest").map(|m| m.as_str().to_string()),
        }))
    }
}

// ---------------------------------------------------------------------------
// Passenger / bag counts
// ---------------------------------------------------------------------------

static PAX_BAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PAX[ :/]*(?P<pax>[0-9]{1,3})\b.*?BAGS?[ :/]*(?P<bags>[0-9]{1,4})\b").unwrap()
});

static PAX_FLIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<flight>[A-Z]{2,3}[0-9]{1,4})\b").unwrap());

/// Passenger and bag count parser.
pub struct PaxBagParser;

impl MessageParser for PaxBagParser {
    fn name(&self) -> &'static str {
        "pax_bag"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("PAX") && text.contains("BAG")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        let caps = PAX_BAG.captures(&msg.text)?;
        Some(ParserResult::PaxBag(PaxBagResult {
            message_id: msg.id,
            flight: PAX_FLIGHT
                .captures(&msg.text)
                .map(|f| f["flight"].to_string()),
            pax: caps["pax"].parse().ok(),
            bags: caps["bags"].parse().ok(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Connection status
// ---------------------------------------------------------------------------

static CONNECTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<flight>[A-Z]{2,3}[0-9]{1,4})\s+(?:GATE\s+(?P<gate>[A-Z]?[0-9]{1,3}[A-Z]?))?\s*(?:DEP\s+(?P<time>[0-2][0-9][0-5][0-9]))?$",
    )
    .unwrap()
});

static CONN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CONNECTIONS? (?:FOR|TO)\s+(?P<flight>[A-Z]{2,3}[0-9]{1,4})").unwrap()
});

/// Passenger connection-status parser.
pub struct PaxConnStatusParser;

impl MessageParser for PaxConnStatusParser {
    fn name(&self) -> &'static str {
        "pax_conn_status"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("CONNECTION")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        let header = CONN_HEADER.captures(&msg.text)?;
        let mut connections = Vec::new();
        for line in msg.text.lines().skip(1) {
            let Some(caps) = CONNECTION_LINE.captures(line.trim()) else {
                continue;
            };
            connections.push(Connection {
                flight: caps["flight"].to_string(),
                gate: caps.name("gate").map(|m| m.as_str().to_string()),
                time: caps.name("time").map(|m| m.as_str().to_string()),
            });
        }
        if connections.is_empty() {
            return None;
        }
        Some(ParserResult::PaxConnStatus(PaxConnStatusResult {
            message_id: msg.id,
            flight: Some(header["flight"].to_string()),
            connections,
        }))
    }
}

// ---------------------------------------------------------------------------
// Dispatcher chatter (catch-all)
// ---------------------------------------------------------------------------

static DISPATCH_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:FROM|FM)[ :]+(?P<from>[A-Z]{2,12})").unwrap());

/// Last-resort parser for dispatcher free text. Registered as a
/// catch-all: it runs with the quick check bypassed, so the gate lives
/// in `parse`.
pub struct DispatcherParser;

impl MessageParser for DispatcherParser {
    fn name(&self) -> &'static str {
        "dispatcher"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("DISPATCH")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        if !msg.text.contains("DISPATCH") {
            return None;
        }
        Some(ParserResult::Dispatcher(DispatcherResult {
            message_id: msg.id,
            from: DISPATCH_FROM
                .captures(&msg.text)
                .map(|caps| caps["from"].to_string()),
            text: msg.text.trim().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_with_route() {
        let parser = FlightSubscriptionParser;
        let msg = AcarsMessage::new(1, "RA", "SUB/QF12/21JAN26/YSSY/KLAX");
        let Some(ParserResult::FlightSubscription(result)) = parser.parse(&msg) else {
            panic!("expected subscription");
        };
        assert_eq!(result.flight.as_deref(), Some("QF12"));
        assert_eq!(result.date.as_deref(), Some("21JAN26"));
        assert_eq!(result.origin.as_deref(), Some("YSSY"));
        assert_eq!(result.destination.as_deref(), Some("KLAX"));
    }

    #[test]
    fn pax_bag_counts() {
        let parser = PaxBagParser;
        let msg = AcarsMessage::new(2, "H1", "QF431 PAX 134 BAGS 1020");
        let Some(ParserResult::PaxBag(result)) = parser.parse(&msg) else {
            panic!("expected pax_bag");
        };
        assert_eq!(result.flight.as_deref(), Some("QF431"));
        assert_eq!(result.pax, Some(134));
        assert_eq!(result.bags, Some(1020));
    }

    #[test]
    fn connection_listing() {
        let parser = PaxConnStatusParser;
        let msg = AcarsMessage::new(
            3,
            "H1",
            "CONNECTIONS FOR QF12\nQF401 GATE 23 DEP 0915\nQF567 GATE 8\nEND",
        );
        let Some(ParserResult::PaxConnStatus(result)) = parser.parse(&msg) else {
            panic!("expected pax_conn_status");
        };
        assert_eq!(result.flight.as_deref(), Some("QF12"));
        assert_eq!(result.connections.len(), 2);
        assert_eq!(result.connections[0].flight, "QF401");
        assert_eq!(result.connections[0].gate.as_deref(), Some("23"));
        assert_eq!(result.connections[0].time.as_deref(), Some("0915"));
    }

    #[test]
    fn dispatcher_requires_marker() {
        let parser = DispatcherParser;
        let msg = AcarsMessage::new(4, "H1", "FROM DISPATCH: CALL OPS ON ARRIVAL");
        assert!(parser.parse(&msg).is_some());
        let msg = AcarsMessage::new(5, "H1", "CALL OPS ON ARRIVAL");
        assert!(parser.parse(&msg).is_none());
    }
}
