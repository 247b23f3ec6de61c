//! # Flightwire Parsers
//!
//! The parser registry, the FANS-1/A CPDLC decoder, and the grok-style
//! format engine for free-text operational messages.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`registry`] | `MessageParser` trait, label/global/catch-all dispatch |
//! | [`cpdlc`] | ARINC-622 envelope, CRC-16/ARINC, UPER bit reader, FANS-1/A decode |
//! | [`grok`] | `{NAME}` pattern expansion and compile-once format sets |
//! | [`formats`] | PDC, loadsheet, weather, label-17, ATIS, envelope, ground-ops |
//! | [`error`] | `DecodeError` value-error kinds |

pub mod cpdlc;
pub mod error;
pub mod formats;
pub mod grok;
pub mod registry;

use std::sync::Arc;

use crate::cpdlc::CpdlcParser;
use crate::formats::atis::AtisParser;
use crate::formats::envelope::EnvelopeParser;
use crate::formats::label17::Label17Parser;
use crate::formats::loadsheet::LoadsheetParser;
use crate::formats::pdc::PdcParser;
use crate::formats::subscription::{
    DispatcherParser, FlightSubscriptionParser, PaxBagParser, PaxConnStatusParser,
};
use crate::formats::weather::WeatherParser;
use crate::registry::Registry;

pub use crate::error::DecodeError;
pub use crate::registry::{FormatTrace, MessageParser};

/// Build the production parser set.
///
/// Label-indexed parsers: CPDLC (`AA`/`BA`), label-17 (`17`), loadsheet
/// (`RA`/`H1`/`C1`). Content-based parsers run against every message;
/// the dispatcher parser is the catch-all.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(Arc::new(CpdlcParser));
    registry.register(Arc::new(Label17Parser));
    registry.register(Arc::new(LoadsheetParser));
    registry.register(Arc::new(EnvelopeParser));
    registry.register(Arc::new(AtisParser));
    registry.register(Arc::new(PdcParser));
    registry.register(Arc::new(WeatherParser));
    registry.register(Arc::new(FlightSubscriptionParser));
    registry.register(Arc::new(PaxBagParser));
    registry.register(Arc::new(PaxConnStatusParser));
    registry.register_catch_all(Arc::new(DispatcherParser));
    registry.sort();
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightwire_models::AcarsMessage;

    #[test]
    fn loadsheet_and_weather_multi_match_order() {
        let mut registry = default_registry();
        // A label-RA message carrying both a loadsheet and a METAR: the
        // label-indexed loadsheet parser runs before the global weather
        // parser, so its result comes first.
        let text = "LOADSHEET FINAL 1736 EDNO1\nLX1376/21  21JAN26\nZRH WRO HB-AZH   2/3\nZFW 39754  MAX 46700\nTOW 44554\nMETAR LSZH 210630Z 24012KT CAVOK";
        let msg = AcarsMessage::new(1, "RA", text);
        let results = registry.dispatch(&msg);
        let kinds: Vec<&str> = results.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["loadsheet", "weather"]);
    }

    #[test]
    fn unmatched_message_yields_nothing() {
        let mut registry = default_registry();
        let msg = AcarsMessage::new(2, "H1", "FUEL ON BOARD 12000");
        assert!(registry.dispatch(&msg).is_empty());
    }

    #[test]
    fn catch_all_dispatcher() {
        let mut registry = default_registry();
        let msg = AcarsMessage::new(3, "5Z", "FROM DISPATCH PLEASE CALL OPS");
        let results = registry.dispatch(&msg);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind(), "dispatcher");
    }

    #[test]
    fn cpdlc_sample_through_registry() {
        let mut registry = default_registry();
        let msg = AcarsMessage::new(4, "AA", "/BOMCAYA.AT1.A4O-SI005080204A");
        let results = registry.dispatch(&msg);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind(), "cpdlc");
    }
}
