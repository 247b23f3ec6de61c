//! The parser result sum type.
//!
//! Every parser emits at most one [`ParserResult`] per message. The enum
//! is internally tagged so serialised objects lead with a `type`
//! discriminator (`"cpdlc"`, `"pdc"`, `"loadsheet"`, …) followed by the
//! variant's payload fields. Results are value objects — they never
//! reference the message that produced them, only its id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::atis::AtisReport;
use crate::cpdlc::{CpdlcElement, CpdlcHeader, CpdlcMessageKind};
use crate::message::LinkDirection;

// ---------------------------------------------------------------------------
// CPDLC
// ---------------------------------------------------------------------------

/// The CPDLC parser's output: envelope identity plus the decoded message.
///
/// `error` is populated (and the structured fields left partial) when the
/// envelope or payload could not be fully decoded; the result is still
/// emitted so the failure is visible downstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CpdlcResult {
    /// Originating message id.
    pub message_id: u64,
    /// Which IMI the envelope carried.
    pub message_type: CpdlcMessageKind,
    /// Resolved link direction.
    pub direction: LinkDirection,
    /// Ground station address from the envelope.
    pub ground_station: String,
    /// Registration from the envelope slot, when validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// Decoded header, when payload decode reached it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<CpdlcHeader>,
    /// Decoded elements, when payload decode succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<CpdlcElement>>,
    /// All element texts joined for display.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formatted_text: String,
    /// The raw hex payload as received.
    pub raw_hex: String,
    /// Failure kind, when decoding did not complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// PDC
// ---------------------------------------------------------------------------

/// A parsed Pre-Departure Clearance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PdcResult {
    /// Originating message id.
    pub message_id: u64,
    /// Name of the format that matched.
    pub format: String,
    /// Flight callsign.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    /// Departure airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Destination airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Departure runway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runway: Option<String>,
    /// Standard instrument departure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Assigned squawk code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squawk: Option<String>,
    /// ATIS letter in effect at clearance time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atis: Option<String>,
    /// Initial altitude in feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_altitude_ft: Option<i32>,
    /// Cruise flight level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cruise_fl: Option<u16>,
    /// Scheduled departure time as transmitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    /// Departure frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Route waypoints in clearance order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route_waypoints: Vec<String>,
    /// The compact-format capture that may be a squawk (intent ambiguous).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squawk_candidate: Option<String>,
    /// The same capture when it looks like a time instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_candidate: Option<String>,
}

// ---------------------------------------------------------------------------
// Loadsheet
// ---------------------------------------------------------------------------

/// A parsed loadsheet. All weights are normalised to kilograms.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LoadsheetResult {
    /// Originating message id.
    pub message_id: u64,
    /// Name of the format that matched.
    pub format: String,
    /// Flight number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    /// Origin airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Destination airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Tail registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    /// Edition (e.g. `FINAL`, `PRELIM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    /// Zero-fuel weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zfw_kg: Option<i64>,
    /// Maximum zero-fuel weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zfw_kg: Option<i64>,
    /// Take-off weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tow_kg: Option<i64>,
    /// Landing weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub law_kg: Option<i64>,
    /// Total fuel in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_kg: Option<i64>,
    /// Total passengers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pax: Option<u32>,
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Kind of a standard weather product.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeatherProductKind {
    /// Aerodrome routine report.
    Metar,
    /// Terminal aerodrome forecast.
    Taf,
    /// Significant meteorological information.
    Sigmet,
}

/// One weather product inside a weather message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeatherProduct {
    /// The product kind.
    pub kind: WeatherProductKind,
    /// The station / airport the product refers to, when extractable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
    /// The product text.
    pub text: String,
}

/// A weather message, possibly carrying several products.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WeatherResult {
    /// Originating message id.
    pub message_id: u64,
    /// The products found in the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<WeatherProduct>,
}

// ---------------------------------------------------------------------------
// Envelope (ADS / FPN)
// ---------------------------------------------------------------------------

/// An ARINC-622 envelope recognised without full payload decode
/// (`.ADS.` reports and FPN flight plans), with its CRC verdict.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EnvelopeResult {
    /// Originating message id.
    pub message_id: u64,
    /// The IMI or text marker that identified the envelope.
    pub imi: String,
    /// Ground station address, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_station: Option<String>,
    /// Registration, when validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// Whether the CRC verified.
    pub crc_ok: bool,
    /// Latitude trivially extracted from an ADS TLV, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude trivially extracted from an ADS TLV, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Altitude trivially extracted from an ADS TLV, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<i32>,
    /// Failure kind, when the envelope was malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Label 17 (compact CSV position)
// ---------------------------------------------------------------------------

/// A compact CSV position report (ACARS label 17).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Label17Result {
    /// Originating message id.
    pub message_id: u64,
    /// Latitude in decimal degrees, south negative.
    pub latitude: f64,
    /// Longitude in decimal degrees, west negative.
    pub longitude: f64,
    /// Altitude in feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<i32>,
    /// Ground speed in knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_speed_kt: Option<f64>,
    /// Ground speed converted to km/h.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_speed_kmh: Option<f64>,
    /// Track in degrees (hundredths on the wire).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_deg: Option<f64>,
    /// Wind direction in degrees (hundredths on the wire).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_dir_deg: Option<f64>,
    /// Wind speed in knots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_kt: Option<f64>,
    /// Outside air temperature in °C.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<i16>,
    /// Report timestamp reconstructed from the date and time fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Subscription / operational free-text families
// ---------------------------------------------------------------------------

/// A flight-subscription request or confirmation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FlightSubscriptionResult {
    /// Originating message id.
    pub message_id: u64,
    /// Name of the format that matched.
    pub format: String,
    /// The flight number subscribed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    /// Subscription date as transmitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Origin airport, when carried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Destination airport, when carried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// Passenger and bag counts from a ground-ops message.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaxBagResult {
    /// Originating message id.
    pub message_id: u64,
    /// The flight the counts apply to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    /// Passenger count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pax: Option<u32>,
    /// Bag count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bags: Option<u32>,
}

/// A dispatcher free-text exchange.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DispatcherResult {
    /// Originating message id.
    pub message_id: u64,
    /// Sender, when identified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// The free-text body.
    pub text: String,
}

/// One connecting flight within a connection-status message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Connection {
    /// Connecting flight number.
    pub flight: String,
    /// Departure gate, when listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    /// Departure time, when listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// A passenger connection-status message.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaxConnStatusResult {
    /// Originating message id.
    pub message_id: u64,
    /// The inbound flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    /// The connections listed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
}

/// An ATIS bulletin result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AtisResult {
    /// Originating message id.
    pub message_id: u64,
    /// The parsed bulletin.
    #[serde(flatten)]
    pub report: AtisReport,
}

// ---------------------------------------------------------------------------
// ParserResult
// ---------------------------------------------------------------------------

/// The tagged union of every parser's output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParserResult {
    /// FANS-1/A CPDLC.
    Cpdlc(CpdlcResult),
    /// Pre-departure clearance.
    Pdc(PdcResult),
    /// Weight and balance loadsheet.
    Loadsheet(LoadsheetResult),
    /// METAR / TAF / SIGMET weather.
    Weather(WeatherResult),
    /// ARINC-622 envelope without full decode (ADS, FPN).
    Envelope(EnvelopeResult),
    /// Label-17 compact CSV position.
    Label17(Label17Result),
    /// Flight subscription.
    FlightSubscription(FlightSubscriptionResult),
    /// Passenger / bag counts.
    PaxBag(PaxBagResult),
    /// Dispatcher free text.
    Dispatcher(DispatcherResult),
    /// Passenger connection status.
    PaxConnStatus(PaxConnStatusResult),
    /// D-ATIS bulletin.
    Atis(AtisResult),
}

impl ParserResult {
    /// The `type` discriminator as serialised.
    pub fn kind(&self) -> &'static str {
        match self {
            ParserResult::Cpdlc(_) => "cpdlc",
            ParserResult::Pdc(_) => "pdc",
            ParserResult::Loadsheet(_) => "loadsheet",
            ParserResult::Weather(_) => "weather",
            ParserResult::Envelope(_) => "envelope",
            ParserResult::Label17(_) => "label17",
            ParserResult::FlightSubscription(_) => "flight_subscription",
            ParserResult::PaxBag(_) => "pax_bag",
            ParserResult::Dispatcher(_) => "dispatcher",
            ParserResult::PaxConnStatus(_) => "pax_conn_status",
            ParserResult::Atis(_) => "atis",
        }
    }

    /// The originating message id.
    pub fn message_id(&self) -> u64 {
        match self {
            ParserResult::Cpdlc(r) => r.message_id,
            ParserResult::Pdc(r) => r.message_id,
            ParserResult::Loadsheet(r) => r.message_id,
            ParserResult::Weather(r) => r.message_id,
            ParserResult::Envelope(r) => r.message_id,
            ParserResult::Label17(r) => r.message_id,
            ParserResult::FlightSubscription(r) => r.message_id,
            ParserResult::PaxBag(r) => r.message_id,
            ParserResult::Dispatcher(r) => r.message_id,
            ParserResult::PaxConnStatus(r) => r.message_id,
            ParserResult::Atis(r) => r.message_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serialises_with_leading_type_tag() {
        let result = ParserResult::Loadsheet(LoadsheetResult {
            message_id: 9,
            format: "standard_kg".into(),
            zfw_kg: Some(39_754),
            ..LoadsheetResult::default()
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "loadsheet");
        assert_eq!(json["message_id"], 9);
        assert_eq!(json["zfw_kg"], 39_754);
    }

    #[test]
    fn kind_matches_serialised_tag() {
        let result = ParserResult::PaxBag(PaxBagResult {
            message_id: 1,
            ..PaxBagResult::default()
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], result.kind());
    }
}
