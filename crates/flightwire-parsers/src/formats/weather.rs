//! Weather product extraction (METAR / TAF / SIGMET).
//!
//! Uplinked weather messages frequently bundle several products; each
//! recognised product is surfaced separately with the station it names.

use std::sync::LazyLock;

use flightwire_models::{
    AcarsMessage, ParserResult, WeatherProduct, WeatherProductKind, WeatherResult,
};
use regex::Regex;

use crate::registry::MessageParser;

static PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(METAR|TAF|SIGMET)\b[ :]*(?:(?P<airport>[A-Z]{4})\b)?").unwrap()
});

/// The weather parser.
pub struct WeatherParser;

impl MessageParser for WeatherParser {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains("METAR") || text.contains(" TAF ") || text.contains("SIGMET")
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        let mut products = Vec::new();
        let matches: Vec<_> = PRODUCT.captures_iter(&msg.text).collect();
        for (index, caps) in matches.iter().enumerate() {
            let whole = caps.get(0)?;
            let kind = match &caps[1] {
                "METAR" => WeatherProductKind::Metar,
                "TAF" => WeatherProductKind::Taf,
                _ => WeatherProductKind::Sigmet,
            };
            // The product body runs to the next product keyword or the
            // end of the message.
            let end = matches
                .get(index + 1)
                .and_then(|next| next.get(0))
                .map_or(msg.text.len(), |m| m.start());
            let text = msg.text[whole.start()..end].trim().to_string();
            products.push(WeatherProduct {
                kind,
                airport: caps.name("airport").map(|m| m.as_str().to_string()),
                text,
            });
        }
        if products.is_empty() {
            return None;
        }
        Some(ParserResult::Weather(WeatherResult {
            message_id: msg.id,
            products,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> WeatherResult {
        let parser = WeatherParser;
        let msg = AcarsMessage::new(1, "RA", text);
        match parser.parse(&msg) {
            Some(ParserResult::Weather(result)) => result,
            other => panic!("expected weather result, got {other:?}"),
        }
    }

    #[test]
    fn single_metar() {
        let result = parse("METAR YSSY 210630Z 24012KT CAVOK 22/12 Q1013");
        assert_eq!(result.products.len(), 1);
        assert_eq!(result.products[0].kind, WeatherProductKind::Metar);
        assert_eq!(result.products[0].airport.as_deref(), Some("YSSY"));
        assert!(result.products[0].text.contains("Q1013"));
    }

    #[test]
    fn bundled_products_split() {
        let result = parse("METAR YMML 210630Z 35008KT 9999\nTAF YMML 210500Z 2106/2212 35010KT");
        assert_eq!(result.products.len(), 2);
        assert_eq!(result.products[0].kind, WeatherProductKind::Metar);
        assert_eq!(result.products[1].kind, WeatherProductKind::Taf);
        assert!(!result.products[0].text.contains("TAF"));
    }

    #[test]
    fn quick_check_taf_needs_spacing() {
        let parser = WeatherParser;
        assert!(!parser.quick_check("STAFF NOTE"));
        assert!(parser.quick_check("REQ TAF YSSY"));
        assert!(parser.quick_check("SIGMET ALFA 4 VALID"));
    }
}
