//! D-ATIS bulletin parsing.
//!
//! Datalink ATIS texts vary by provider; the parser extracts the
//! airport, the rolling information letter, the bulletin type, and the
//! recognisable weather sub-fields. Runway extraction mirrors the usual
//! spoken forms (`RWY 34L AND 34R`, `RUNWAY 01 IN USE`, `APPROACH RWY
//! 16R`).

use std::sync::LazyLock;

use flightwire_models::{AcarsMessage, AtisReport, AtisResult, AtisType, ParserResult};
use regex::Regex;

use crate::registry::MessageParser;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<airport>[A-Z]{4})\s+(?:(?P<kind>ARR|DEP)\s+)?ATIS\s+(?:INFO\s+)?(?P<letter>[A-Z])\b(?:\s+(?P<time>[0-2][0-9][0-5][0-9])Z?)?",
    )
    .unwrap()
});

static RUNWAY_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:RWY|RUNWAY)S?\s+([0-9]{2}[LRC]?)(?:\s+AND\s+([0-9]{2}[LRC]?))?").unwrap()
});

static APPROACH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(ILS|RNP|RNAV|VOR|NDB|VISUAL|GLS)(?:\s+[A-Z])?\s+(?:APCH|APPROACH)").unwrap()
});

static WIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bWIND:?\s+((?:VRB|[0-9]{3})[/ ]?[0-9]{1,3}(?:G[0-9]{1,3})?(?:KT)?)").unwrap()
});

static VISIBILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:VIS|VISIBILITY):?\s+([0-9]+\s?KM|[0-9]{4}|CAVOK|GT 10KM)").unwrap());

static CLOUDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b((?:FEW|SCT|BKN|OVC)[0-9]{3}(?:\s+(?:FEW|SCT|BKN|OVC)[0-9]{3})*|CLD:?\s+\S+|SKC|NSC)")
        .unwrap()
});

static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:TMP|TEMP|T):?\s+(M?-?[0-9]{1,2})\b").unwrap());

static DEW_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:DP|DEWPOINT):?\s+(M?-?[0-9]{1,2})\b").unwrap());

static QNH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bQNH:?\s+([0-9]{3,4})\b").unwrap());

static REMARKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bRMK:?\s+(.+)$").unwrap());

fn parse_temperature(raw: &str) -> Option<i16> {
    let normalised = raw.replace('M', "-");
    normalised.parse().ok()
}

/// Parse a D-ATIS text into a report, `None` when the header is absent.
pub fn parse_atis_text(text: &str) -> Option<AtisReport> {
    let header = HEADER.captures(text)?;
    let letter = header["letter"].chars().next()?;

    let mut runways: Vec<String> = Vec::new();
    for caps in RUNWAY_SINGLE.captures_iter(text) {
        for group in [caps.get(1), caps.get(2)].into_iter().flatten() {
            let runway = group.as_str().to_string();
            if !runways.contains(&runway) {
                runways.push(runway);
            }
        }
    }

    let mut approaches: Vec<String> = Vec::new();
    for caps in APPROACH.captures_iter(text) {
        let approach = caps[1].to_string();
        if !approaches.contains(&approach) {
            approaches.push(approach);
        }
    }

    let first = |re: &Regex| re.captures(text).map(|caps| caps[1].trim().to_string());

    Some(AtisReport {
        airport: header["airport"].to_string(),
        letter,
        atis_type: match header.name("kind").map(|m| m.as_str()) {
            Some("ARR") => AtisType::Arr,
            Some("DEP") => AtisType::Dep,
            _ => AtisType::Combined,
        },
        time: header.name("time").map(|m| format!("{}Z", m.as_str())),
        raw: text.trim().to_string(),
        runways,
        approaches,
        wind: first(&WIND),
        visibility: first(&VISIBILITY),
        clouds: first(&CLOUDS),
        temperature: TEMPERATURE
            .captures(text)
            .and_then(|caps| parse_temperature(&caps[1])),
        dew_point: DEW_POINT
            .captures(text)
            .and_then(|caps| parse_temperature(&caps[1])),
        qnh: first(&QNH),
        remarks: first(&REMARKS),
    })
}

/// The D-ATIS parser.
pub struct AtisParser;

impl MessageParser for AtisParser {
    fn name(&self) -> &'static str {
        "atis"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("ATIS")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        parse_atis_text(&msg.text).map(|report| {
            ParserResult::Atis(AtisResult {
                message_id: msg.id,
                report,
            })
        })
    }
}
