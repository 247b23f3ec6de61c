//! ARINC-622 envelope handling.
//!
//! An enveloped message looks like `/<station>.<IMI><registration><hex>`:
//! the ground-station address, a dot, a three-character Interchange
//! Message Identifier, a seven-character registration slot (left-padded
//! with dots), and an even-length hex payload whose last two binary
//! bytes are the CRC-16/ARINC.

use flightwire_models::{clean_registration, CpdlcMessageKind};

use crate::cpdlc::crc::verify_crc;
use crate::error::DecodeError;

/// Length of the CRC-covered text prefix: 3-char IMI + 7-char slot.
const TEXT_PREFIX_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Imi
// ---------------------------------------------------------------------------

/// The Interchange Message Identifiers this decoder recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imi {
    /// CPDLC application message.
    At1,
    /// Connect request.
    Cr1,
    /// Connect confirm.
    Cc1,
    /// Disconnect.
    Dr1,
    /// ADS-C report (envelope recognised, payload not CPDLC).
    Ads,
}

impl Imi {
    /// All IMIs with their dotted search markers, scan order.
    pub const MARKERS: [(Imi, &'static str); 5] = [
        (Imi::At1, ".AT1"),
        (Imi::Cr1, ".CR1"),
        (Imi::Cc1, ".CC1"),
        (Imi::Dr1, ".DR1"),
        (Imi::Ads, ".ADS"),
    ];

    /// The three-character identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Imi::At1 => "AT1",
            Imi::Cr1 => "CR1",
            Imi::Cc1 => "CC1",
            Imi::Dr1 => "DR1",
            Imi::Ads => "ADS",
        }
    }

    /// The CPDLC message kind this IMI maps to, `None` for ADS.
    pub fn message_kind(self) -> Option<CpdlcMessageKind> {
        Some(match self {
            Imi::At1 => CpdlcMessageKind::Cpdlc,
            Imi::Cr1 => CpdlcMessageKind::ConnectRequest,
            Imi::Cc1 => CpdlcMessageKind::ConnectConfirm,
            Imi::Dr1 => CpdlcMessageKind::Disconnect,
            Imi::Ads => return None,
        })
    }
}

/// `true` when `text` contains any CPDLC IMI marker (cheap pre-check).
pub fn contains_cpdlc_imi(text: &str) -> bool {
    text.contains(".AT1")
        || text.contains(".CR1")
        || text.contains(".CC1")
        || text.contains(".DR1")
}

// ---------------------------------------------------------------------------
// ArincEnvelope
// ---------------------------------------------------------------------------

/// A split ARINC-622 envelope.
///
/// `payload` holds the CRC-stripped binary on success, or the failure
/// kind; the envelope identity fields are populated as far as the split
/// got so a result can still be emitted around a failure.
#[derive(Debug, Clone)]
pub struct ArincEnvelope {
    /// Ground-station address preceding the IMI.
    pub ground_station: String,
    /// The recognised IMI.
    pub imi: Imi,
    /// Cleaned registration from the slot, when it matched a known shape.
    pub registration: Option<String>,
    /// The hex payload text as received.
    pub raw_hex: String,
    /// CRC-stripped binary payload, or the failure that stopped the split.
    pub payload: Result<Vec<u8>, DecodeError>,
}

/// Locate the earliest IMI marker in `text`.
fn find_imi(text: &str) -> Option<(usize, Imi)> {
    Imi::MARKERS
        .iter()
        .filter_map(|(imi, marker)| text.find(marker).map(|at| (at, *imi)))
        .min_by_key(|(at, _)| *at)
}

/// Split an ARINC-622 envelope out of `text`.
///
/// Returns `None` when no IMI is present: the message is not an
/// enveloped one and other parsers should inspect it.
pub fn split_envelope(text: &str) -> Option<ArincEnvelope> {
    let stripped = text.strip_prefix('/').unwrap_or(text);
    let (at, imi) = find_imi(stripped)?;
    let ground_station = stripped[..at].to_string();
    // The CRC-covered prefix starts right after the dot introducing the IMI.
    let after_dot = &stripped[at + 1..];

    if after_dot.len() < TEXT_PREFIX_LEN {
        return Some(ArincEnvelope {
            ground_station,
            imi,
            registration: None,
            raw_hex: String::new(),
            payload: Err(DecodeError::MessageTooShort),
        });
    }

    let text_prefix = &after_dot[..TEXT_PREFIX_LEN];
    let registration = clean_registration(&text_prefix[3..]);
    let raw_hex = after_dot[TEXT_PREFIX_LEN..].trim().to_string();

    let payload = decode_payload(text_prefix, &raw_hex);
    Some(ArincEnvelope {
        ground_station,
        imi,
        registration,
        raw_hex,
        payload,
    })
}

/// Hex-decode the payload and verify its CRC over prefix + payload.
fn decode_payload(text_prefix: &str, raw_hex: &str) -> Result<Vec<u8>, DecodeError> {
    if raw_hex.is_empty() {
        return Err(DecodeError::NoPayloadData);
    }
    let binary = hex::decode(raw_hex).map_err(|_| DecodeError::InvalidHex)?;
    if binary.len() < 2 {
        return Err(DecodeError::NoPayloadData);
    }

    let mut covered = Vec::with_capacity(text_prefix.len() + binary.len());
    covered.extend_from_slice(text_prefix.as_bytes());
    covered.extend_from_slice(&binary);

    if verify_crc(&covered) {
        return Ok(binary[..binary.len() - 2].to_vec());
    }
    // Some legacy feeds append two junk bytes after the CRC; retry with
    // the tail trimmed.
    if binary.len() >= 4 && verify_crc(&covered[..covered.len() - 2]) {
        return Ok(binary[..binary.len() - 4].to_vec());
    }
    Err(DecodeError::CrcFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpdlc::crc::calculate_crc;

    /// Build a syntactically-valid envelope around `payload` with a
    /// correct CRC.
    fn make_envelope(station: &str, imi: &str, reg: &str, payload: &[u8]) -> String {
        let slot = format!("{:.>7}", reg);
        let prefix = format!("{imi}{slot}");
        let mut covered = prefix.as_bytes().to_vec();
        covered.extend_from_slice(payload);
        let crc = calculate_crc(&covered);
        let mut binary = payload.to_vec();
        binary.extend_from_slice(&crc);
        format!("/{station}.{prefix}{}", hex::encode_upper(binary))
    }

    #[test]
    fn splits_station_imi_and_registration() {
        let text = make_envelope("KUSACYA", "AT1", "F-GSQC", &[0x01, 0x02, 0x03]);
        let envelope = split_envelope(&text).expect("IMI present");
        assert_eq!(envelope.ground_station, "KUSACYA");
        assert_eq!(envelope.imi, Imi::At1);
        assert_eq!(envelope.registration.as_deref(), Some("F-GSQC"));
        assert_eq!(envelope.payload.unwrap(), vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn short_registration_is_dot_padded() {
        let text = make_envelope("BOMCAYA", "AT1", "A4O-SI", &[0xAA]);
        let envelope = split_envelope(&text).unwrap();
        assert_eq!(envelope.registration.as_deref(), Some("A4O-SI"));
    }

    #[test]
    fn no_imi_is_not_an_envelope() {
        assert!(split_envelope("POSITION REPORT FL350").is_none());
        assert!(!contains_cpdlc_imi("POSITION REPORT FL350"));
    }

    #[test]
    fn corrupt_crc_is_reported_not_dropped() {
        let mut text = make_envelope("AKLCDYA", "CR1", "VH-EBO", &[0x10, 0x20]);
        // Corrupt the final hex digit.
        let last = text.pop().unwrap();
        text.push(if last == '0' { '1' } else { '0' });
        let envelope = split_envelope(&text).unwrap();
        assert_eq!(envelope.imi, Imi::Cr1);
        assert_eq!(envelope.payload, Err(DecodeError::CrcFailed));
    }

    #[test]
    fn legacy_two_byte_tail_is_trimmed() {
        let mut text = make_envelope("SYDCDYA", "AT1", "VH-OQA", &[0x42, 0x43, 0x44]);
        text.push_str("BEEF"); // two junk bytes after the CRC
        let envelope = split_envelope(&text).unwrap();
        assert_eq!(envelope.payload.unwrap(), vec![0x42, 0x43, 0x44]);
    }

    #[test]
    fn odd_hex_is_invalid() {
        let text = "/KUSACYA.AT1.F-GSQCABC";
        let envelope = split_envelope(text).unwrap();
        assert_eq!(envelope.payload, Err(DecodeError::InvalidHex));
    }

    #[test]
    fn truncated_prefix_is_too_short() {
        let text = "/KUSACYA.AT1.F-G";
        let envelope = split_envelope(text).unwrap();
        assert_eq!(envelope.payload, Err(DecodeError::MessageTooShort));
        assert!(envelope.registration.is_none());
    }
}
