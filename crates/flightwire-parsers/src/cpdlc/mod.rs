//! FANS-1/A CPDLC over the ARINC-622 envelope.
//!
//! The parser recognises the `.AT1.` / `.CR1.` / `.CC1.` / `.DR1.` IMIs
//! on labels `AA` and `BA`, verifies the envelope CRC, and decodes the
//! UPER payload into header and elements. Failures are carried inside
//! the result (`error` field) so dispatch continues and downstream sinks
//! see the failure rate.

pub mod arinc;
pub mod bits;
pub mod crc;
pub mod decoder;
pub mod elements;
pub mod tables;

use flightwire_models::{
    AcarsMessage, CpdlcResult, LinkDirection, ParserResult,
};
use tracing::debug;

use crate::cpdlc::arinc::{contains_cpdlc_imi, split_envelope, Imi};
use crate::cpdlc::decoder::decode_message;
use crate::registry::MessageParser;

/// Resolve the link direction for a message, in priority order: the
/// explicit envelope field, the block-id first character (digits are
/// downlinks), then the label (`BA` uplink, `AA` downlink).
pub fn resolve_direction(msg: &AcarsMessage) -> LinkDirection {
    if let Some(direction) = msg.link_direction {
        return direction;
    }
    if let Some(first) = msg.block_id.as_deref().and_then(|b| b.chars().next()) {
        if first.is_ascii_digit() {
            return LinkDirection::Downlink;
        }
        if first.is_ascii_uppercase() {
            return LinkDirection::Uplink;
        }
    }
    if msg.label == "BA" {
        LinkDirection::Uplink
    } else {
        LinkDirection::Downlink
    }
}

/// The CPDLC parser.
pub struct CpdlcParser;

impl MessageParser for CpdlcParser {
    fn name(&self) -> &'static str {
        "cpdlc"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["AA", "BA"]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn quick_check(&self, text: &str) -> bool {
        contains_cpdlc_imi(text)
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        let envelope = split_envelope(&msg.text)?;
        let message_type = envelope.imi.message_kind()?;
        let direction = resolve_direction(msg);

        let mut result = CpdlcResult {
            message_id: msg.id,
            message_type,
            direction,
            ground_station: envelope.ground_station,
            registration: envelope.registration,
            header: None,
            elements: None,
            formatted_text: String::new(),
            raw_hex: envelope.raw_hex,
            error: None,
        };

        match envelope.payload {
            Err(err) => {
                debug!(id = msg.id, error = %err, "CPDLC envelope failed");
                result.error = Some(err.to_string());
            }
            // Connection management messages routinely carry no
            // application payload beyond the CRC.
            Ok(payload) if payload.is_empty() && envelope.imi != Imi::At1 => {}
            Ok(payload) => match decode_message(&payload, direction) {
                Ok(decoded) => {
                    result.formatted_text = decoded
                        .elements
                        .iter()
                        .map(|e| e.text.clone())
                        .collect::<Vec<_>>()
                        .join(" / ");
                    result.header = Some(decoded.header);
                    result.elements = Some(decoded.elements);
                }
                Err(err) => {
                    debug!(id = msg.id, error = %err, "CPDLC payload undecodable");
                    result.error = Some(err.to_string());
                }
            },
        }

        Some(ParserResult::Cpdlc(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightwire_models::CpdlcMessageKind;

    #[test]
    fn direction_priority_order() {
        let mut msg = AcarsMessage::new(1, "AA", "x");
        assert_eq!(resolve_direction(&msg), LinkDirection::Downlink);

        msg.label = "BA".into();
        assert_eq!(resolve_direction(&msg), LinkDirection::Uplink);

        msg.block_id = Some("4".into());
        assert_eq!(resolve_direction(&msg), LinkDirection::Downlink);

        msg.block_id = Some("D".into());
        assert_eq!(resolve_direction(&msg), LinkDirection::Uplink);

        msg.link_direction = Some(LinkDirection::Downlink);
        assert_eq!(resolve_direction(&msg), LinkDirection::Downlink);
    }

    #[test]
    fn quick_check_requires_an_imi() {
        let parser = CpdlcParser;
        assert!(parser.quick_check("/KUSACYA.AT1.F-GSQC00"));
        assert!(parser.quick_check("x.CR1.x"));
        assert!(!parser.quick_check("POSITION REPORT"));
        assert!(!parser.quick_check("/KUSACYA.ADS.F-GSQC00"));
    }

    #[test]
    fn deviating_sample_end_to_end() {
        let parser = CpdlcParser;
        let msg = AcarsMessage::new(7, "AA", "/BOMCAYA.AT1.A4O-SI005080204A");
        let result = parser.parse(&msg).expect("IMI present");
        let ParserResult::Cpdlc(cpdlc) = result else {
            panic!("expected CPDLC result");
        };
        assert_eq!(cpdlc.message_type, CpdlcMessageKind::Cpdlc);
        assert_eq!(cpdlc.direction, LinkDirection::Downlink);
        assert_eq!(cpdlc.ground_station, "BOMCAYA");
        assert_eq!(cpdlc.registration.as_deref(), Some("A4O-SI"));
        assert!(cpdlc.error.is_none());
        let elements = cpdlc.elements.expect("decoded elements");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].id, 80);
        assert_eq!(
            elements[0].label,
            "DEVIATING [distanceoffset] [direction] OF ROUTE"
        );
    }

    #[test]
    fn non_envelope_text_yields_empty_result() {
        let parser = CpdlcParser;
        let msg = AcarsMessage::new(8, "AA", "FUEL 12000 KG");
        assert!(parser.parse(&msg).is_none());
    }

    #[test]
    fn crc_failure_is_carried_in_result() {
        let parser = CpdlcParser;
        // Valid shape, corrupt checksum.
        let msg = AcarsMessage::new(9, "AA", "/BOMCAYA.AT1.A4O-SI005080204B");
        let result = parser.parse(&msg).expect("envelope recognised");
        let ParserResult::Cpdlc(cpdlc) = result else {
            panic!("expected CPDLC result");
        };
        assert_eq!(cpdlc.error.as_deref(), Some("crc_failed"));
        assert!(cpdlc.elements.is_none());
    }
}
