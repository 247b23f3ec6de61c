//! Pre-Departure Clearance parsing.
//!
//! PDCs arrive in several regional dialects; the format list is ordered
//! most-specific first and that order is behaviourally significant (the
//! AU regional and Virgin Australia shapes overlap on some texts).
//! After a format match, single-purpose extractors sweep the full text
//! for fields the format did not bind.

use std::sync::LazyLock;

use flightwire_models::{AcarsMessage, ParserResult, PdcResult};
use regex::Regex;

use crate::grok::{compile, match_text_traced, CompiledFormat, FormatDef};
use crate::registry::{FormatTrace, MessageParser};

/// Phrases that mark a PDC *rejection* or service chatter, not a
/// clearance.
const FAILED_PDC_PHRASES: &[&str] = &[
    "NO DEPARTURE CLEARANCE",
    "NO PDC ON FILE",
    "PDC NOT AVAILABLE",
    "PDC/ASAT",
    "UNABLE PDC",
    "LID",
];

/// Keywords that are never waypoints.
const WAYPOINT_BLOCKLIST: &[&str] = &[
    "ROUTE", "CLIMB", "SQUAWK", "VIA", "DCT", "DEP", "ARR", "CLEARED", "EXPECT",
    "MAINTAIN", "CONTACT", "DEPART", "RUNWAY", "FREQ", "ATIS", "INITIAL", "ALT",
    "THEN", "DIRECT", "FILED", "PLAN", "WHEN", "WITH", "TRANS", "LEVEL", "FLT",
    "REMARKS", "NEXT", "AS", "TO", "AND", "THE", "OF", "AT", "ON",
];

static FORMATS: LazyLock<Vec<CompiledFormat>> = LazyLock::new(|| compile(FORMAT_DEFS));

/// PDC formats, most specific first. Reordering changes behaviour.
static FORMAT_DEFS: &[FormatDef] = &[
    // Compact APCDC clearance. The trailing capture is ambiguous in the
    // wild (squawk or time); it is surfaced as both candidates and never
    // as a plain squawk.
    FormatDef {
        name: "apcdc_compact",
        pattern: r"APCDC[ /](?P<flight>{FLIGHT})[ /](?P<origin>{ICAO})[ /](?P<dest>{ICAO})[ /](?P<squawk>[0-9]{3,4}(?: [0-9]{3,4}Z?)?)",
        fields: &["flight", "origin", "dest", "squawk"],
        labels: &[],
        unit: None,
    },
    // Australian regional tower PDC.
    FormatDef {
        name: "au_regional",
        pattern: r"PDC (?P<pdcnum>{PDCNUM})\s*\n(?P<flight>{FLIGHT}) (?P<aircraft>{AIRCRAFT}) (?P<origin>{ICAO}) (?P<time>{TIME4})\s*\nCLEARED TO (?P<dest>{ICAO}) VIA\s*\n(?P<runway>{RUNWAY}) (?P<sid>{SID})",
        fields: &["pdcnum", "flight", "aircraft", "origin", "time", "dest", "runway", "sid"],
        labels: &[],
        unit: None,
    },
    // Virgin Australia dispatch PDC; overlaps the regional shape on some
    // texts, so it must stay below it.
    FormatDef {
        name: "virgin_australia",
        pattern: r"PDC (?P<pdcnum>{PDCNUM})\s*\n(?P<flight>{FLIGHT}) (?P<aircraft>{AIRCRAFT}) (?P<origin>{ICAO})(?: (?P<time>{TIME4}))?\s*\n(?:CLEARED|CLRD) TO (?P<dest>{ICAO})",
        fields: &["pdcnum", "flight", "aircraft", "origin", "time", "dest"],
        labels: &[],
        unit: None,
    },
    // US tower PDC.
    FormatDef {
        name: "us_tower",
        pattern: r"(?P<flight>{FLIGHT}) CLEARED TO (?P<dest>{ICAO}) AIRPORT VIA (?P<sid>{SID})",
        fields: &["flight", "dest", "sid"],
        labels: &[],
        unit: None,
    },
    // Anything that self-identifies as a clearance and names a flight.
    FormatDef {
        name: "generic",
        pattern: r"(?:PDC|PRE[- ]DEPARTURE CLEARANCE).{0,40}?(?P<flight>{FLIGHT})",
        fields: &["flight"],
        labels: &[],
        unit: None,
    },
];

// ---------------------------------------------------------------------------
// Post-extractors
// ---------------------------------------------------------------------------

static SQUAWK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:SQUAWK|SQWK|XPDR|SQ)[ :]*([0-7]{4})\b").unwrap());

static FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:DEP(?:ARTURE)? FREQ(?:UENCY)?|FREQ|CONTACT)[ :]*(1[0-9]{2}\.[0-9]{1,3})")
        .unwrap()
});

static ATIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:ATIS|INFORMATION|INFO)[ :]+([A-Z])\b").unwrap());

static INITIAL_ALTITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:INITIAL (?:ALT(?:ITUDE)?|CLIMB)|CLIMB AND MAINTAIN)[ :]*([0-9]{3,5})\b")
        .unwrap()
});

static CRUISE_FL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:CRZ|CRUISE)[ :]*FL?([0-9]{2,3})\b").unwrap());

static DEPARTURE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:OFF|ETD|EOBT|DEP TIME)[ :]*([0-2][0-9][0-5][0-9])Z?\b").unwrap()
});

static WAYPOINT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}[0-9]{0,2}$").unwrap());

static LOOKS_LIKE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}(?: [0-9]{3,4}Z)?$|Z$").unwrap());

fn extract_first(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| caps[1].to_string())
}

/// Walk the text line by line collecting waypoints from the two route
/// regions: after the aircraft-type line up to `CLEARED`, and after a
/// `ROUTE:` line up to the next terminating keyword.
fn extract_waypoints(text: &str, aircraft: Option<&str>) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut waypoints: Vec<String> = Vec::new();

    let mut in_type_region = false;
    let mut in_route_region = false;
    for line in &lines {
        let upper = line.trim();

        if in_type_region && upper.contains("CLEARED") {
            in_type_region = false;
        }
        if in_route_region
            && ["CLIMB", "SQUAWK", "CONTACT", "DEPART", "REMARKS", "NEXT"]
                .iter()
                .any(|kw| upper.starts_with(kw))
        {
            in_route_region = false;
        }

        if in_type_region || in_route_region {
            collect_waypoint_tokens(upper, &mut waypoints);
        }

        if let Some(aircraft) = aircraft {
            if upper.contains(aircraft) {
                in_type_region = true;
            }
        }
        if upper.contains("ROUTE:") {
            in_route_region = true;
            // Tokens after the marker on the same line count too.
            if let Some((_, rest)) = upper.split_once("ROUTE:") {
                collect_waypoint_tokens(rest, &mut waypoints);
            }
        }
    }
    waypoints
}

fn collect_waypoint_tokens(line: &str, waypoints: &mut Vec<String>) {
    for token in line.split(|c: char| c.is_whitespace() || c == ',' || c == '.') {
        let token = token.trim();
        if token.is_empty()
            || !WAYPOINT_TOKEN.is_match(token)
            || WAYPOINT_BLOCKLIST.contains(&token)
        {
            continue;
        }
        if !waypoints.iter().any(|w| w == token) {
            waypoints.push(token.to_string());
        }
    }
}

/// `true` when `PDC` occurs at a word boundary: not preceded or followed
/// by an ASCII alphanumeric. Substring scan only.
fn has_pdc_word(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(at) = text[from..].find("PDC").map(|i| i + from) {
        let before_ok = at == 0 || !bytes[at - 1].is_ascii_alphanumeric();
        let end = at + 3;
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        from = at + 3;
    }
    false
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// The PDC parser.
pub struct PdcParser;

impl PdcParser {
    fn build_result(&self, msg: &AcarsMessage) -> Option<(PdcResult, Vec<FormatTrace>)> {
        let (matched, traces) = match_text_traced(&FORMATS, &msg.text);
        let matched = matched?;
        let captures = &matched.captures;
        let get = |key: &str| captures.get(key).cloned();

        let mut result = PdcResult {
            message_id: msg.id,
            format: matched.format.name.to_string(),
            flight: get("flight"),
            origin: get("origin"),
            destination: get("dest"),
            runway: get("runway"),
            sid: get("sid"),
            departure_time: get("time"),
            ..PdcResult::default()
        };

        if matched.format.name == "apcdc_compact" {
            // Ambiguous capture: surface both readings, decide nothing.
            if let Some(raw) = get("squawk") {
                if LOOKS_LIKE_TIME.is_match(&raw) {
                    result.time_candidate = Some(raw.clone());
                }
                result.squawk_candidate = Some(raw);
            }
        }

        // Fill anything the format left open from the whole text.
        if result.squawk.is_none() && matched.format.name != "apcdc_compact" {
            result.squawk = extract_first(&SQUAWK, &msg.text);
        }
        if result.frequency.is_none() {
            result.frequency = extract_first(&FREQUENCY, &msg.text);
        }
        if result.atis.is_none() {
            result.atis = extract_first(&ATIS, &msg.text);
        }
        if result.initial_altitude_ft.is_none() {
            result.initial_altitude_ft =
                extract_first(&INITIAL_ALTITUDE, &msg.text).and_then(|v| v.parse().ok());
        }
        if result.cruise_fl.is_none() {
            result.cruise_fl = extract_first(&CRUISE_FL, &msg.text).and_then(|v| v.parse().ok());
        }
        if result.departure_time.is_none() {
            result.departure_time = extract_first(&DEPARTURE_TIME, &msg.text);
        }
        result.route_waypoints =
            extract_waypoints(&msg.text, captures.get("aircraft").map(String::as_str));

        Some((result, traces))
    }
}

impl MessageParser for PdcParser {
    fn name(&self) -> &'static str {
        "pdc"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn quick_check(&self, text: &str) -> bool {
        if FAILED_PDC_PHRASES.iter().any(|phrase| text.contains(phrase)) {
            return false;
        }
        has_pdc_word(text)
            || text.contains("APCDC")
            || text.contains("PRE DEPARTURE CLEARANCE")
            || text.contains("PRE-DEPARTURE CLEARANCE")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        self.build_result(msg)
            .map(|(result, _)| ParserResult::Pdc(result))
    }

    fn parse_with_trace(&self, msg: &AcarsMessage) -> (Option<ParserResult>, Vec<FormatTrace>) {
        match self.build_result(msg) {
            Some((result, traces)) => (Some(ParserResult::Pdc(result)), traces),
            None => (None, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JST501: &str = "PDC 291826\nJST501 A320 YSSY 1900\nCLEARED TO YMML VIA\n16L ABBEY3 DEP: XXX\nROUTE: DCT WOL H65 RAZZI Q29 LIZZI\nCLIMB VIA SID SQUAWK 3670";

    fn parse(text: &str) -> PdcResult {
        let parser = PdcParser;
        let msg = AcarsMessage::new(1, "H1", text);
        match parser.parse(&msg) {
            Some(ParserResult::Pdc(result)) => result,
            other => panic!("expected PDC result, got {other:?}"),
        }
    }

    #[test]
    fn quick_check_word_boundary() {
        let parser = PdcParser;
        assert!(!parser.quick_check("KPDXKMSPDC311225"));
        assert!(!parser.quick_check("NO DEPARTURE CLEARANCE MESSAGE ON FILE"));
        assert!(!parser.quick_check("NO PDC ON FILE"));
        assert!(parser.quick_check("PDC 291826"));
        assert!(parser.quick_check("YOUR PDC:"));
        assert!(parser.quick_check("APCDC/JST501/YSSY/YMML/3670"));
    }

    #[test]
    fn au_regional_sample() {
        let result = parse(JST501);
        assert_eq!(result.format, "au_regional");
        assert_eq!(result.flight.as_deref(), Some("JST501"));
        assert_eq!(result.origin.as_deref(), Some("YSSY"));
        assert_eq!(result.destination.as_deref(), Some("YMML"));
        assert_eq!(result.runway.as_deref(), Some("16L"));
        assert_eq!(result.sid.as_deref(), Some("ABBEY3"));
        assert_eq!(result.squawk.as_deref(), Some("3670"));
    }

    #[test]
    fn route_waypoints_from_route_region() {
        let result = parse(JST501);
        // Single-letter airway designators fall outside the token shape;
        // only the named fixes survive.
        assert_eq!(result.route_waypoints, vec!["WOL", "RAZZI", "LIZZI"]);
    }

    #[test]
    fn apcdc_records_both_candidates() {
        let result = parse("APCDC/JST501/YSSY/YMML/524 1804Z");
        assert_eq!(result.format, "apcdc_compact");
        assert!(result.squawk.is_none());
        assert_eq!(result.squawk_candidate.as_deref(), Some("524 1804Z"));
        assert_eq!(result.time_candidate.as_deref(), Some("524 1804Z"));
    }

    #[test]
    fn declaration_order_prefers_au_regional() {
        // This text satisfies both the AU regional and Virgin Australia
        // shapes; declaration order is the disambiguator.
        let result = parse("PDC 010203\nVOZ871 B738 YSSY 0910\nCLEARED TO YMML VIA\n34R OLSEM1 DEP");
        assert_eq!(result.format, "au_regional");
    }

    #[test]
    fn generic_fallback_still_extracts() {
        let result = parse("PRE DEPARTURE CLEARANCE FOR UAL42 SQUAWK 2200 INFO B");
        assert_eq!(result.format, "generic");
        assert_eq!(result.flight.as_deref(), Some("UAL42"));
        assert_eq!(result.squawk.as_deref(), Some("2200"));
        assert_eq!(result.atis.as_deref(), Some("B"));
    }
}
