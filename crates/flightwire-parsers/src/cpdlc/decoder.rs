//! FANS-1/A message decoding: header, elements, and the two-attempt
//! standard/legacy strategy.
//!
//! `FANSATC{Uplink,Downlink}Message ::= SEQUENCE { header, elementId,
//! elementId_seqOf OPTIONAL }`. Standard encodings lead with the
//! presence bit for the optional element sequence; a legacy encoder
//! population omits it. Both layouts are attempted and the better
//! consumer wins: clean decodes beat truncation-tolerant ones, then
//! fewer bits left, then more elements.

use flightwire_models::{CpdlcElement, CpdlcHeader, CpdlcTime, LinkDirection};
use tracing::trace;

use crate::cpdlc::bits::BitReader;
use crate::cpdlc::elements::decode_field;
use crate::cpdlc::tables::{downlink_spec, uplink_spec, DOWNLINK_MAX_ID, UPLINK_MAX_ID};
use crate::error::DecodeError;

/// A fully decoded CPDLC message.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// The message header.
    pub header: CpdlcHeader,
    /// Primary element plus any additional elements.
    pub elements: Vec<CpdlcElement>,
}

/// One decode attempt's outcome, scored for selection.
struct Attempt {
    message: DecodedMessage,
    /// Bits left unread when the attempt finished.
    remaining: usize,
    /// Whether the primary element decode had to tolerate a clipped tail.
    tolerated: bool,
}

impl Attempt {
    /// `true` when `self` is the better decode.
    fn beats(&self, other: &Attempt) -> bool {
        if self.tolerated != other.tolerated {
            return !self.tolerated;
        }
        if self.remaining != other.remaining {
            return self.remaining < other.remaining;
        }
        self.message.elements.len() > other.message.elements.len()
    }
}

/// Decode `payload` as a CPDLC message in the given direction.
pub fn decode_message(
    payload: &[u8],
    direction: LinkDirection,
) -> Result<DecodedMessage, DecodeError> {
    let standard = run_attempt(payload, direction, true);
    let legacy = run_attempt(payload, direction, false);

    match (standard, legacy) {
        (Ok(standard), Ok(legacy)) => {
            trace!(
                standard_left = standard.remaining,
                legacy_left = legacy.remaining,
                "both CPDLC decode attempts succeeded"
            );
            if legacy.beats(&standard) {
                Ok(legacy.message)
            } else {
                Ok(standard.message)
            }
        }
        (Ok(attempt), Err(_)) | (Err(_), Ok(attempt)) => Ok(attempt.message),
        (Err(standard_err), Err(legacy_err)) => Err(DecodeError::failed(format!(
            "standard: {standard_err}; legacy: {legacy_err}"
        ))),
    }
}

fn run_attempt(
    payload: &[u8],
    direction: LinkDirection,
    with_presence_bit: bool,
) -> Result<Attempt, DecodeError> {
    let mut reader = BitReader::new(payload);
    let mut tolerated = false;

    let has_extra = if with_presence_bit {
        reader.read_bool()?
    } else {
        false
    };
    let header = decode_header(&mut reader)?;
    let mut elements = vec![decode_element(&mut reader, direction, &mut tolerated)?];

    if has_extra {
        let count = reader.read_constrained_int(1, 4)? as usize;
        for _ in 0..count {
            elements.push(decode_element_strict(&mut reader, direction)?);
        }
    } else if !with_presence_bit && reader.remaining() > 0 {
        // Legacy heuristic: leftover bits may be an element sequence.
        // Speculatively decode it, rolling the cursor back on failure.
        let saved = reader.offset();
        let extras = (|| -> Result<Vec<CpdlcElement>, DecodeError> {
            let count = reader.read_constrained_int(1, 4)? as usize;
            let mut extras = Vec::with_capacity(count);
            for _ in 0..count {
                extras.push(decode_element_strict(&mut reader, direction)?);
            }
            Ok(extras)
        })();
        match extras {
            Ok(mut extras) => elements.append(&mut extras),
            Err(_) => reader.set_offset(saved),
        }
    }

    Ok(Attempt {
        message: DecodedMessage { header, elements },
        remaining: reader.remaining(),
        tolerated,
    })
}

/// Decode the message header. The header timestamp carries seconds on
/// the wire; they are consumed and dropped.
fn decode_header(reader: &mut BitReader<'_>) -> Result<CpdlcHeader, DecodeError> {
    let has_ref = reader.read_bool()?;
    let has_timestamp = reader.read_bool()?;
    let msg_id = reader.read_bits(6)? as u8;
    let msg_ref = if has_ref {
        Some(reader.read_bits(6)? as u8)
    } else {
        None
    };
    let timestamp = if has_timestamp {
        let hours = reader.read_constrained_int(0, 23)? as u8;
        let minutes = reader.read_constrained_int(0, 59)? as u8;
        let _seconds = reader.read_constrained_int(0, 59)?;
        Some(CpdlcTime { hours, minutes })
    } else {
        None
    };
    Ok(CpdlcHeader {
        msg_id,
        msg_ref,
        timestamp,
    })
}

/// Decode one element: 8-bit id, then the payload fields per the catalog.
///
/// Tolerates a truncated tail (legacy feeds clip the final field of some
/// messages): fields decoded so far are kept, the rest of the buffer is
/// consumed, and `tolerated` is flagged so attempt selection can prefer
/// clean decodes.
fn decode_element(
    reader: &mut BitReader<'_>,
    direction: LinkDirection,
    tolerated: &mut bool,
) -> Result<CpdlcElement, DecodeError> {
    let (id, spec) = read_element_id(reader, direction)?;
    let mut values = Vec::new();
    for field in spec.fields {
        let before = values.len();
        match decode_field(reader, *field, &mut values) {
            Ok(()) => {}
            Err(DecodeError::InsufficientBits) => {
                values.truncate(before);
                let end = reader.offset() + reader.remaining();
                reader.set_offset(end);
                *tolerated = true;
                break;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(CpdlcElement::new(id, spec.label, values))
}

/// Strict element decode for speculative sequences: any failure
/// propagates so the caller can roll back.
fn decode_element_strict(
    reader: &mut BitReader<'_>,
    direction: LinkDirection,
) -> Result<CpdlcElement, DecodeError> {
    let (id, spec) = read_element_id(reader, direction)?;
    let mut values = Vec::new();
    for field in spec.fields {
        decode_field(reader, *field, &mut values)?;
    }
    Ok(CpdlcElement::new(id, spec.label, values))
}

fn read_element_id(
    reader: &mut BitReader<'_>,
    direction: LinkDirection,
) -> Result<(u8, crate::cpdlc::tables::ElementSpec), DecodeError> {
    let id = reader.read_bits(8)? as u8;
    let (max_id, spec) = match direction {
        LinkDirection::Uplink => (UPLINK_MAX_ID, uplink_spec(id)),
        LinkDirection::Downlink => (DOWNLINK_MAX_ID, downlink_spec(id)),
    };
    if id > max_id {
        return Err(DecodeError::InvalidChoice);
    }
    let spec = spec.ok_or_else(|| {
        DecodeError::failed(format!("no schema for {direction} element {id}"))
    })?;
    Ok((id, spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightwire_models::ElementValue;

    /// The libacars reference downlink: msg id 8, 15:56 timestamp,
    /// position report element.
    const REFERENCE_HEX: &str =
        "243F880C3D903BB412903604FE326C2479F4A64F7F62528B1A9CF8382738186AC28B16668E013DF464D8";

    #[test]
    fn reference_position_report_header() {
        let payload = hex::decode(REFERENCE_HEX).unwrap();
        let message = decode_message(&payload, LinkDirection::Downlink).unwrap();
        assert_eq!(message.header.msg_id, 8);
        assert_eq!(message.header.msg_ref, None);
        let timestamp = message.header.timestamp.expect("timestamp present");
        assert_eq!((timestamp.hours, timestamp.minutes), (15, 56));
        assert_eq!(message.elements[0].id, 48);
        assert!(matches!(
            message.elements[0].data.first(),
            Some(ElementValue::PositionReport(_))
        ));
    }

    #[test]
    fn legacy_truncated_deviation() {
        // Payload of /BOMCAYA.AT1.A4O-SI005080204A after CRC strip.
        let payload = [0x00, 0x50, 0x80];
        let message = decode_message(&payload, LinkDirection::Downlink).unwrap();
        assert_eq!(message.header.msg_id, 0);
        assert_eq!(message.elements.len(), 1);
        assert_eq!(message.elements[0].id, 80);
        assert_eq!(
            message.elements[0].label,
            "DEVIATING [distanceoffset] [direction] OF ROUTE"
        );
    }

    #[test]
    fn clean_standard_beats_tolerant_legacy() {
        // Standard layout: no seqOf, no ref, no timestamp, msgID 5,
        // element id 0 (UNABLE), trailing pad bits.
        let payload = [0b0000_0010, 0b1000_0000, 0b0000_0000];
        let message = decode_message(&payload, LinkDirection::Uplink).unwrap();
        assert_eq!(message.header.msg_id, 5);
        assert_eq!(message.elements[0].id, 0);
        assert_eq!(message.elements[0].text, "UNABLE");
        assert!(message.elements[0].data.is_empty());
    }

    #[test]
    fn out_of_range_element_id_fails_both_attempts() {
        // msgID zero then element id 0xC8 = 200 in both alignments.
        let payload = [0b0000_0000, 0b1100_1000, 0b1100_1000];
        let err = decode_message(&payload, LinkDirection::Downlink).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailed(_)));
    }

    #[test]
    fn empty_payload_is_insufficient() {
        let err = decode_message(&[], LinkDirection::Downlink).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailed(_)));
    }
}
