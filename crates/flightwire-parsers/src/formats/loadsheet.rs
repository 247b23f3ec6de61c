//! Loadsheet (weight and balance) parsing.
//!
//! A loadsheet format matches only when the message's ACARS label is in
//! the format's allowed set *and* the pattern matches. Weights are
//! normalised to integer kilograms according to the format's unit tag.

use std::sync::LazyLock;

use flightwire_models::{AcarsMessage, LoadsheetResult, ParserResult};

use crate::grok::{compile, CompiledFormat, FormatDef, GrokMatch, WeightUnit};
use crate::registry::{FormatTrace, MessageParser};

static FORMATS: LazyLock<Vec<CompiledFormat>> = LazyLock::new(|| compile(FORMAT_DEFS));

static FORMAT_DEFS: &[FormatDef] = &[
    // European dispatch loadsheet with weights in whole kilograms.
    FormatDef {
        name: "standard_kg",
        pattern: r"(?s)LOADSHEET (?P<edition>FINAL|PRELIM|REVISED)\s+(?P<time>{TIME4}).*?\n(?P<flight>{FLIGHT})/[0-9]{1,2}\s+(?P<date>{DATE})\s*\n(?P<origin>[A-Z]{3,4}) (?P<dest>[A-Z]{3,4}) (?P<tail>{REGISTRATION}).*?ZFW\s+(?P<zfw>[0-9]+)(?:\s+MAX\s+(?P<maxzfw>[0-9]+))?.*?TOW\s+(?P<tow>[0-9]+)(?:.*?LAW\s+(?P<law>[0-9]+))?(?:.*?TOF\s+(?P<fuel>[0-9]+))?(?:.*?PAX\S*\s+TTL\s+(?P<pax>[0-9]+))?",
        fields: &[
            "edition", "time", "flight", "date", "origin", "dest", "tail", "zfw", "maxzfw",
            "tow", "law", "fuel", "pax",
        ],
        labels: &["RA", "H1"],
        unit: Some(WeightUnit::Kg),
    },
    // Same shape with decimal tonnes.
    FormatDef {
        name: "standard_tonnes",
        pattern: r"(?s)LOADSHEET (?P<edition>FINAL|PRELIM|REVISED).*?\n(?P<flight>{FLIGHT})/[0-9]{1,2}\s+(?P<date>{DATE}).*?ZFW\s+(?P<zfw>[0-9]+\.[0-9])(?:\s+MAX\s+(?P<maxzfw>[0-9]+\.[0-9]))?.*?TOW\s+(?P<tow>[0-9]+\.[0-9])",
        fields: &["edition", "flight", "date", "zfw", "maxzfw", "tow"],
        labels: &["RA", "H1"],
        unit: Some(WeightUnit::Tonnes),
    },
    // North American ramp loadsheet in pounds.
    FormatDef {
        name: "us_lb",
        pattern: r"(?s)LOADSHEET\s+(?P<flight>{FLIGHT}).*?ZFW\s+(?P<zfw>[0-9]+)\s*LBS?.*?TOW\s+(?P<tow>[0-9]+)\s*LBS?",
        fields: &["flight", "zfw", "tow"],
        labels: &["H1", "C1"],
        unit: Some(WeightUnit::Lb),
    },
];

fn match_for_label(label: &str, text: &str) -> (Option<GrokMatch<'static>>, Vec<FormatTrace>) {
    let mut traces = Vec::new();
    for format in FORMATS.iter() {
        if !format.applies_to_label(label) {
            continue;
        }
        let captures = format.regex.captures(text);
        let matched = captures.is_some();
        let map = captures.map(|caps| {
            let mut map = std::collections::BTreeMap::new();
            for name in format.regex.capture_names().flatten() {
                if let Some(value) = caps.name(name) {
                    map.insert(name.to_string(), value.as_str().to_string());
                }
            }
            map
        });
        traces.push(FormatTrace {
            format: format.name.to_string(),
            pattern: Some(format.regex.as_str().to_string()),
            matched,
            captures: map
                .as_ref()
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default(),
        });
        if let Some(captures) = map {
            return (Some(GrokMatch { format, captures }), traces);
        }
    }
    (None, traces)
}

/// The loadsheet parser.
pub struct LoadsheetParser;

impl LoadsheetParser {
    fn build_result(&self, msg: &AcarsMessage) -> (Option<LoadsheetResult>, Vec<FormatTrace>) {
        let (matched, traces) = match_for_label(&msg.label, &msg.text);
        let Some(matched) = matched else {
            return (None, traces);
        };
        let unit = matched.format.unit.unwrap_or(WeightUnit::Kg);
        let weight = |key: &str| {
            matched
                .captures
                .get(key)
                .and_then(|raw| raw.parse::<f64>().ok())
                .map(|raw| unit.to_kg(raw))
        };
        let get = |key: &str| matched.captures.get(key).cloned();

        let result = LoadsheetResult {
            message_id: msg.id,
            format: matched.format.name.to_string(),
            flight: get("flight"),
            origin: get("origin"),
            destination: get("dest"),
            tail: get("tail"),
            edition: get("edition"),
            zfw_kg: weight("zfw"),
            max_zfw_kg: weight("maxzfw"),
            tow_kg: weight("tow"),
            law_kg: weight("law"),
            fuel_kg: weight("fuel"),
            pax: matched.captures.get("pax").and_then(|p| p.parse().ok()),
        };
        (Some(result), traces)
    }
}

impl MessageParser for LoadsheetParser {
    fn name(&self) -> &'static str {
        "loadsheet"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["RA", "H1", "C1"]
    }

    fn priority(&self) -> i32 {
        60
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("LOADSHEET")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        self.build_result(msg).0.map(ParserResult::Loadsheet)
    }

    fn parse_with_trace(&self, msg: &AcarsMessage) -> (Option<ParserResult>, Vec<FormatTrace>) {
        let (result, traces) = self.build_result(msg);
        (result.map(ParserResult::Loadsheet), traces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LX1376: &str = "LOADSHEET FINAL 1736 EDNO1\nLX1376/21  21JAN26\nZRH WRO HB-AZH   2/3\nZFW 39754  MAX 46700\nTOF 4800\nTOW 44554  MAX 70200\nTIF 2400\nLAW 42154  MAX 57500\nUNDLD 11646\nPAX/6/59 TTL 65";

    fn parse_on(label: &str, text: &str) -> Option<LoadsheetResult> {
        let parser = LoadsheetParser;
        let msg = AcarsMessage::new(1, label, text);
        match parser.parse(&msg) {
            Some(ParserResult::Loadsheet(result)) => Some(result),
            None => None,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn standard_kg_sample() {
        let result = parse_on("RA", LX1376).expect("should match");
        assert_eq!(result.format, "standard_kg");
        assert_eq!(result.flight.as_deref(), Some("LX1376"));
        assert_eq!(result.origin.as_deref(), Some("ZRH"));
        assert_eq!(result.destination.as_deref(), Some("WRO"));
        assert_eq!(result.tail.as_deref(), Some("HB-AZH"));
        assert_eq!(result.edition.as_deref(), Some("FINAL"));
        assert_eq!(result.zfw_kg, Some(39_754));
        assert_eq!(result.max_zfw_kg, Some(46_700));
        assert_eq!(result.tow_kg, Some(44_554));
        assert_eq!(result.law_kg, Some(42_154));
        assert_eq!(result.pax, Some(65));
    }

    #[test]
    fn label_gate_blocks_unlisted_labels() {
        assert!(parse_on("C1", LX1376).is_none());
    }

    #[test]
    fn tonnes_convert_to_kg() {
        let text = "LOADSHEET FINAL 0910\nBAW12/07  07FEB26\nZFW 139.7  MAX 145.0\nTOW 175.3";
        let result = parse_on("RA", text).expect("should match");
        assert_eq!(result.format, "standard_tonnes");
        assert_eq!(result.zfw_kg, Some(139_700));
        assert_eq!(result.tow_kg, Some(175_300));
    }

    #[test]
    fn pounds_convert_to_kg() {
        let text = "LOADSHEET UAL42\nZFW 200000 LBS\nTOW 250000 LBS";
        let result = parse_on("C1", text).expect("should match");
        assert_eq!(result.format, "us_lb");
        assert_eq!(result.zfw_kg, Some(90_718));
        assert_eq!(result.tow_kg, Some(113_398));
    }
}
