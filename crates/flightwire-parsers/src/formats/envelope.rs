//! ARINC-622 envelopes recognised without full payload decode.
//!
//! Two families land here: `.ADS.` surveillance reports (only the
//! position and altitude are lifted from the TLV stream) and FPN flight
//! plans whose CRC rides as four ASCII hex characters at the end of the
//! text.

use flightwire_models::{AcarsMessage, EnvelopeResult, ParserResult};

use crate::cpdlc::arinc::{split_envelope, Imi};
use crate::cpdlc::crc::verify_crc_value;
use crate::registry::MessageParser;

/// ADS-C group tags whose first eight payload bytes carry lat/lon/alt.
const ADS_POSITION_TAGS: &[u8] = &[0x07, 0x09, 0x0A, 0x12, 0x14];

/// Lift latitude, longitude, and altitude from an ADS-C basic group.
///
/// Coordinates are 3-byte two's-complement fractions of a semicircle;
/// altitude is a 2-byte signed count of 4-foot increments. Anything
/// beyond that is out of scope.
fn extract_ads_position(payload: &[u8]) -> Option<(f64, f64, i32)> {
    let tag = *payload.first()?;
    if !ADS_POSITION_TAGS.contains(&tag) {
        return None;
    }
    let body = payload.get(1..9)?;
    let lat = signed_24(&body[0..3]) as f64 * 180.0 / 8_388_608.0;
    let lon = signed_24(&body[3..6]) as f64 * 180.0 / 8_388_608.0;
    let alt = i32::from(i16::from_be_bytes([body[6], body[7]])) * 4;
    Some((lat, lon, alt))
}

fn signed_24(bytes: &[u8]) -> i32 {
    let raw = (i32::from(bytes[0]) << 16) | (i32::from(bytes[1]) << 8) | i32::from(bytes[2]);
    (raw << 8) >> 8
}

/// Verify an FPN text whose last four characters are the hex CRC.
/// Returns `None` when the tail is not hex.
pub fn verify_fpn_text(text: &str) -> Option<bool> {
    let trimmed = text.trim_end();
    if trimmed.len() <= 4 {
        return None;
    }
    let (body, tail) = trimmed.split_at(trimmed.len() - 4);
    let crc = u16::from_str_radix(tail, 16).ok()?;
    Some(verify_crc_value(body.as_bytes(), crc))
}

/// The envelope parser for ADS and FPN traffic.
pub struct EnvelopeParser;

impl MessageParser for EnvelopeParser {
    fn name(&self) -> &'static str {
        "envelope"
    }

    fn priority(&self) -> i32 {
        15
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains(".ADS") || text.contains("FPN/")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        if msg.text.contains("FPN/") {
            let crc_ok = verify_fpn_text(&msg.text)?;
            return Some(ParserResult::Envelope(EnvelopeResult {
                message_id: msg.id,
                imi: "FPN".to_string(),
                crc_ok,
                error: (!crc_ok).then(|| "crc_failed".to_string()),
                ..EnvelopeResult::default()
            }));
        }

        let envelope = split_envelope(&msg.text)?;
        if envelope.imi != Imi::Ads {
            return None;
        }
        let mut result = EnvelopeResult {
            message_id: msg.id,
            imi: envelope.imi.as_str().to_string(),
            ground_station: Some(envelope.ground_station),
            registration: envelope.registration,
            ..EnvelopeResult::default()
        };
        match envelope.payload {
            Ok(payload) => {
                result.crc_ok = true;
                if let Some((lat, lon, alt)) = extract_ads_position(&payload) {
                    result.latitude = Some(lat);
                    result.longitude = Some(lon);
                    result.altitude_ft = Some(alt);
                }
            }
            Err(err) => {
                result.crc_ok = false;
                result.error = Some(err.to_string());
            }
        }
        Some(ParserResult::Envelope(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpdlc::crc::calculate_crc;

    fn fpn_with_valid_crc(body: &str) -> String {
        let crc = u16::from_be_bytes(calculate_crc(body.as_bytes()));
        format!("{body}{crc:04X}")
    }

    #[test]
    fn fpn_crc_round_trip() {
        let text = fpn_with_valid_crc("FPN/ID23565S,WIDE12,RW26R.BEruza1/WD,,,,");
        assert_eq!(verify_fpn_text(&text), Some(true));
    }

    #[test]
    fn fpn_crc_ffff_fails() {
        let body = "FPN/ID38883S,ROMA94/WD,,,,";
        let text = format!("{body}FFFF");
        // The all-ones checksum can only verify for one specific body;
        // this is not it.
        assert_eq!(verify_fpn_text(&text), Some(false));
    }

    #[test]
    fn fpn_truncation_fails() {
        let text = fpn_with_valid_crc("FPN/ID00339S,RCH12/WD,,,,");
        let truncated = format!("{}{}", &text[1..text.len() - 4], &text[text.len() - 4..]);
        assert_eq!(verify_fpn_text(&truncated), Some(false));
    }

    #[test]
    fn ads_envelope_with_position() {
        // Tag 0x07, lat/lon thirds of a semicircle, altitude 9000 ft.
        let mut payload = vec![0x07];
        payload.extend_from_slice(&[0x20, 0x00, 0x00]); // +45°
        payload.extend_from_slice(&[0xE0, 0x00, 0x00]); // -45°
        payload.extend_from_slice(&2250i16.to_be_bytes());
        payload.push(0x00);

        let slot = ".VH-OQA";
        let prefix = format!("ADS{slot}");
        let mut covered = prefix.as_bytes().to_vec();
        covered.extend_from_slice(&payload);
        let crc = calculate_crc(&covered);
        let mut binary = payload;
        binary.extend_from_slice(&crc);
        let text = format!("/SYDCDYA.{prefix}{}", hex::encode_upper(binary));

        let parser = EnvelopeParser;
        let msg = AcarsMessage::new(1, "B6", text);
        let Some(ParserResult::Envelope(result)) = parser.parse(&msg) else {
            panic!("expected envelope result");
        };
        assert!(result.crc_ok);
        assert_eq!(result.registration.as_deref(), Some("VH-OQA"));
        assert!((result.latitude.unwrap() - 45.0).abs() < 1e-6);
        assert!((result.longitude.unwrap() + 45.0).abs() < 1e-6);
        assert_eq!(result.altitude_ft, Some(9000));
    }
}
