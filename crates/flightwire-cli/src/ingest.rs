//! JSONL line decoding with shape autodetection.
//!
//! Three input shapes are recognised, in detection order:
//!
//! 1. A NATS-feed wrapper carrying the real object in a `message` key.
//! 2. A flat object with `label` and `text` at the top level.
//! 3. A nested decoder log where the ACARS block is reached via a
//!    ranked list of dotted paths (`vdl2.avlc.acars`, …).
//!
//! A nested log carrying both an outer ACARS message and an embedded
//! MIAM-decoded inner one yields two messages.

use chrono::{DateTime, TimeZone, Utc};
use flightwire_models::{AcarsMessage, Airframe, FlightLeg, LinkDirection, RadioMetadata};
use serde_json::Value;

/// Ranked dotted paths to the ACARS block inside decoder logs.
const ACARS_PATHS: &[&str] = &[
    "vdl2.avlc.acars",
    "hfdl.lpdu.hfnpdu.acars",
    "hfdl.spdu.acars",
    "acars",
];

/// Dotted paths from an ACARS block to an embedded MIAM-decoded inner
/// message.
const MIAM_PATHS: &[&str] = &[
    "miam.single_transfer.miam_core.acars",
    "miam.acars",
    "message.acars",
];

fn get_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

/// Coerce a label value: decoder logs sometimes carry numeric labels.
fn coerce_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_at(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|s| !s.is_empty())
    })
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    if let Some(text) = value.get("timestamp").and_then(Value::as_str) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    // dumpvdl2-style split epoch
    if let Some(sec) = get_path(value, "t.sec").and_then(Value::as_i64) {
        return Utc.timestamp_opt(sec, 0).single();
    }
    None
}

fn parse_direction(value: &Value) -> Option<LinkDirection> {
    let dir = string_at(value, &["dir", "direction"])?.to_ascii_lowercase();
    if dir.contains("down") || dir.contains("air2gnd") {
        Some(LinkDirection::Downlink)
    } else if dir.contains("up") || dir.contains("gnd2air") {
        Some(LinkDirection::Uplink)
    } else {
        None
    }
}

fn parse_radio(value: &Value) -> Option<RadioMetadata> {
    let freq = value.get("freq").and_then(Value::as_f64);
    let level = value
        .get("sig_level")
        .or_else(|| value.get("level"))
        .and_then(Value::as_f64);
    let station = string_at(value, &["station", "station_id"]);
    if freq.is_none() && level.is_none() && station.is_none() {
        return None;
    }
    Some(RadioMetadata {
        frequency_mhz: freq.map(|f| if f > 1_000_000.0 { f / 1_000_000.0 } else { f }),
        signal_level: level,
        station,
    })
}

/// Build a message from a flat ACARS-shaped object. `ancestors` are the
/// enclosing decoder-log objects, nearest first — timestamps, link
/// direction, and radio metadata often live a level or two up.
fn message_from_flat(value: &Value, ancestors: &[&Value]) -> Option<AcarsMessage> {
    let label = coerce_label(value.get("label")?)?;
    let text = string_at(value, &["text", "msg_text"]).unwrap_or_default();

    let icao_hex = value
        .get("icao")
        .and_then(|icao| match icao {
            Value::String(s) => Some(s.to_uppercase()),
            Value::Number(n) => n.as_u64().map(|n| format!("{n:06X}")),
            _ => None,
        })
        .or_else(|| string_at(value, &["icao_hex"]).map(|s| s.to_uppercase()));
    let tail = string_at(value, &["tail", "reg", "registration"]);
    let airframe = (icao_hex.is_some() || tail.is_some()).then(|| Airframe {
        icao_hex,
        tail: tail.clone(),
        aircraft_type: string_at(value, &["type", "aircraft_type"]),
        operator: string_at(value, &["operator", "airline"]),
    });

    let callsign = string_at(value, &["flight", "callsign"]);
    let departing = string_at(value, &["depa", "departing", "origin"]);
    let destination = string_at(value, &["dsta", "destination"]);
    let flight = (callsign.is_some() || departing.is_some() || destination.is_some()).then(|| {
        FlightLeg {
            callsign,
            departing,
            destination,
        }
    });

    Some(AcarsMessage {
        id: 0,
        label,
        text,
        tail,
        airframe,
        flight,
        link_direction: parse_direction(value)
            .or_else(|| ancestors.iter().find_map(|v| parse_direction(v))),
        block_id: string_at(value, &["block_id", "blk_id"]),
        timestamp: parse_timestamp(value)
            .or_else(|| ancestors.iter().find_map(|v| parse_timestamp(v))),
        radio: parse_radio(value).or_else(|| ancestors.iter().find_map(|v| parse_radio(v))),
    })
}

/// Decode one JSONL line into zero, one, or two messages.
///
/// Returns an error only when the line is not valid JSON; a valid
/// object with no recognisable shape yields an empty vector.
pub fn decode_line(line: &str) -> Result<Vec<AcarsMessage>, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    Ok(decode_value(&value))
}

fn decode_value(value: &Value) -> Vec<AcarsMessage> {
    // 1. NATS wrapper
    if let Some(inner) = value.get("message").filter(|m| m.is_object()) {
        let messages = decode_value(inner);
        if !messages.is_empty() {
            return messages;
        }
    }

    // 2. Flat object
    if value.get("label").is_some() {
        return message_from_flat(value, &[]).into_iter().collect();
    }

    // 3. Nested decoder log
    for path in ACARS_PATHS {
        let Some(acars) = get_path(value, path) else {
            continue;
        };
        // Enclosing objects along the dotted path, nearest first.
        let mut ancestors: Vec<&Value> = Vec::new();
        let mut cursor = value;
        ancestors.push(value);
        for key in path.split('.') {
            match cursor.get(key) {
                Some(next) if !std::ptr::eq(next, acars) => {
                    ancestors.insert(0, next);
                    cursor = next;
                }
                _ => break,
            }
        }
        let Some(outer_msg) = message_from_flat(acars, &ancestors) else {
            continue;
        };
        let mut messages = vec![outer_msg];
        for miam_path in MIAM_PATHS {
            if let Some(inner) = get_path(acars, miam_path) {
                if let Some(inner_msg) = message_from_flat(inner, &ancestors) {
                    messages.push(inner_msg);
                    break;
                }
            }
        }
        return messages;
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_shape() {
        let line = r#"{"label":"H1","text":"POS REPORT","tail":"VH-VXM","flight":"QF12"}"#;
        let messages = decode_line(line).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].label, "H1");
        assert_eq!(messages[0].text, "POS REPORT");
        assert_eq!(messages[0].registration(), Some("VH-VXM"));
        assert_eq!(messages[0].callsign(), Some("QF12"));
    }

    #[test]
    fn nats_wrapper_shape() {
        let line = r#"{"subject":"acars.feed","message":{"label":"17","text":"031324,37995"}}"#;
        let messages = decode_line(line).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].label, "17");
    }

    #[test]
    fn nested_vdl2_shape() {
        let line = r#"{"vdl2":{"t":{"sec":1769000000},"avlc":{"dir":"Air2Gnd","acars":{"label":"AA","text":"/BOMCAYA.AT1.A4O-SI005080204A","reg":"A4O-SI"}}}}"#;
        let messages = decode_line(line).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].label, "AA");
        assert_eq!(messages[0].link_direction, Some(LinkDirection::Downlink));
        assert!(messages[0].timestamp.is_some());
    }

    #[test]
    fn numeric_label_is_coerced() {
        let line = r#"{"label":17,"text":"031324,37995"}"#;
        let messages = decode_line(line).unwrap();
        assert_eq!(messages[0].label, "17");
    }

    #[test]
    fn miam_inner_message_double_emit() {
        let line = r#"{"vdl2":{"avlc":{"acars":{"label":"H1","text":"outer","miam":{"single_transfer":{"miam_core":{"acars":{"label":"C1","text":"inner"}}}}}}}}"#;
        let messages = decode_line(line).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "outer");
        assert_eq!(messages[1].label, "C1");
        assert_eq!(messages[1].text, "inner");
    }

    #[test]
    fn unrecognised_object_is_empty() {
        assert!(decode_line(r#"{"foo":1}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(decode_line("not json").is_err());
    }
}
