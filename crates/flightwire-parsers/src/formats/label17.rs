//! Label-17 compact CSV position reports.
//!
//! A fixed ten-field comma-separated row:
//! `HHMMSS,altitude,gs,track,lat,lon,date,winddir,windspeed,temp` with
//! track and wind direction in hundredths of a degree and hemisphere
//! prefixes on the coordinates.

use chrono::{DateTime, NaiveDate, Utc};
use flightwire_models::{AcarsMessage, Label17Result, ParserResult};
use tracing::debug;

use crate::registry::MessageParser;

const KNOTS_TO_KMH: f64 = 1.852;

fn parse_coord(field: &str) -> Option<f64> {
    let field = field.trim();
    let (hemisphere, rest) = field.split_at(1);
    let value: f64 = rest.trim().parse().ok()?;
    match hemisphere {
        "N" | "E" => Some(value),
        "S" | "W" => Some(-value),
        _ => None,
    }
}

fn parse_signed(field: &str) -> Option<i16> {
    field.replace(' ', "").parse().ok()
}

fn month_number(name: &str) -> Option<u32> {
    Some(match name {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return None,
    })
}

/// Combine `06OCT25`-style date and `031324`-style time fields.
fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();
    let time = time.trim();
    if date.len() != 7 || time.len() != 6 {
        return None;
    }
    let day: u32 = date[..2].parse().ok()?;
    let month = month_number(&date[2..5])?;
    let year: i32 = date[5..].parse::<i32>().ok()? + 2000;
    let hour: u32 = time[..2].parse().ok()?;
    let minute: u32 = time[2..4].parse().ok()?;
    let second: u32 = time[4..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)
        .map(|naive| naive.and_utc())
}

/// The label-17 parser.
pub struct Label17Parser;

impl MessageParser for Label17Parser {
    fn name(&self) -> &'static str {
        "label17"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["17"]
    }

    fn priority(&self) -> i32 {
        20
    }

    fn quick_check(&self, text: &str) -> bool {
        text.contains(',') && (text.contains("N ") || text.contains("S "))
    }

    fn parse(&self, msg: &AcarsMessage) -> Option<ParserResult> {
        let fields: Vec<&str> = msg.text.split(',').collect();
        if fields.len() < 10 {
            debug!(id = msg.id, count = fields.len(), "label 17 row too short");
            return None;
        }

        let latitude = parse_coord(fields[4])?;
        let longitude = parse_coord(fields[5])?;
        let ground_speed_kt: Option<f64> = fields[2].trim().parse().ok();

        let result = Label17Result {
            message_id: msg.id,
            latitude,
            longitude,
            altitude_ft: fields[1].trim().parse().ok(),
            ground_speed_kt,
            ground_speed_kmh: ground_speed_kt.map(|kt| kt * KNOTS_TO_KMH),
            track_deg: fields[3]
                .trim()
                .parse::<f64>()
                .ok()
                .map(|hundredths| hundredths / 100.0),
            wind_dir_deg: fields[7]
                .trim()
                .parse::<f64>()
                .ok()
                .map(|hundredths| hundredths / 100.0),
            wind_speed_kt: fields[8].trim().parse().ok(),
            temperature_c: parse_signed(fields[9]),
            reported_at: parse_timestamp(fields[6], fields[0]),
        };
        Some(ParserResult::Label17(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "031324,37995,0413, 7360,N 46.943,E 18.634,06OCT25,25680, 19,- 47";

    fn parse(text: &str) -> Option<Label17Result> {
        let parser = Label17Parser;
        let msg = AcarsMessage::new(1, "17", text);
        match parser.parse(&msg) {
            Some(ParserResult::Label17(result)) => Some(result),
            None => None,
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn reference_row() {
        let result = parse(SAMPLE).expect("should parse");
        assert!((result.latitude - 46.943).abs() < 1e-9);
        assert!((result.longitude - 18.634).abs() < 1e-9);
        assert_eq!(result.altitude_ft, Some(37_995));
        assert_eq!(result.ground_speed_kt, Some(413.0));
        assert!((result.ground_speed_kmh.unwrap() - 413.0 * 1.852).abs() < 1e-9);
        assert_eq!(result.track_deg, Some(73.60));
        assert_eq!(result.wind_dir_deg, Some(256.80));
        assert_eq!(result.wind_speed_kt, Some(19.0));
        assert_eq!(result.temperature_c, Some(-47));
        assert_eq!(
            result.reported_at.unwrap().to_rfc3339(),
            "2025-10-06T03:13:24+00:00"
        );
    }

    #[test]
    fn southern_western_hemispheres_negate() {
        let result =
            parse("120000,35000,0450, 9000,S 33.946,W 151.177,01JAN26,18000, 25,- 52").unwrap();
        assert!(result.latitude < 0.0);
        assert!(result.longitude < 0.0);
    }

    #[test]
    fn quick_check_needs_comma_and_hemisphere() {
        let parser = Label17Parser;
        assert!(parser.quick_check(SAMPLE));
        assert!(!parser.quick_check("no commas here N "));
        assert!(!parser.quick_check("1,2,3,4"));
    }

    #[test]
    fn short_rows_are_skipped() {
        assert!(parse("031324,37995,0413").is_none());
    }
}
