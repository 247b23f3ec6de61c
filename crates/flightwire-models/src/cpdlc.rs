//! Decoded CPDLC (Controller–Pilot Data Link Communications) structures.
//!
//! These are the *outputs* of the FANS-1/A UPER decoder: a header, a list
//! of elements, and the typed values that fill each element's bracketed
//! template placeholders. The decoder itself lives in the parsers crate;
//! this module owns the value types and their canonical string forms.
//!
//! ## Key types
//!
//! - [`CpdlcMessageKind`] — which IMI the envelope carried.
//! - [`CpdlcHeader`] — message id, optional reference, optional time.
//! - [`CpdlcElement`] — one element: id, template, data, substituted text.
//! - [`ElementValue`] — one typed value within an element's payload.
//! - [`substitute_placeholders`] — literal `[placeholder]` substitution.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display as StrumDisplay;

use crate::message::LinkDirection;

// ---------------------------------------------------------------------------
// CpdlcMessageKind
// ---------------------------------------------------------------------------

/// Which kind of FANS-1/A exchange the ARINC-622 envelope carried.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CpdlcMessageKind {
    /// `.AT1.` — a CPDLC application message.
    Cpdlc,
    /// `.CR1.` — connect request.
    ConnectRequest,
    /// `.CC1.` — connect confirm.
    ConnectConfirm,
    /// `.DR1.` — disconnect.
    Disconnect,
}

impl fmt::Display for CpdlcMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpdlcMessageKind::Cpdlc => f.write_str("cpdlc"),
            CpdlcMessageKind::ConnectRequest => f.write_str("connect_request"),
            CpdlcMessageKind::ConnectConfirm => f.write_str("connect_confirm"),
            CpdlcMessageKind::Disconnect => f.write_str("disconnect"),
        }
    }
}

// ---------------------------------------------------------------------------
// CpdlcTime / CpdlcHeader
// ---------------------------------------------------------------------------

/// An HH:MM time of day carried in headers and time-typed elements.
///
/// The wire format of the *header* variant also carries seconds; those are
/// consumed by the decoder but never exposed, so this type does not hold
/// them. dM48 extended times allow hours up to 47.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpdlcTime {
    /// Hours, 0..=23 (0..=47 for extended position-report times).
    pub hours: u8,
    /// Minutes, 0..=59.
    pub minutes: u8,
}

impl fmt::Display for CpdlcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// The decoded message header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CpdlcHeader {
    /// Mandatory message identification number, 0..=63.
    pub msg_id: u8,
    /// Optional reference to the message being answered, 0..=63.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_ref: Option<u8>,
    /// Optional time of day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<CpdlcTime>,
}

// ---------------------------------------------------------------------------
// Element value primitives
// ---------------------------------------------------------------------------

/// Altitude reference / unit selected by the 3-bit altitude choice.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeUnit {
    /// QNH altitude in feet (encoded in tens).
    QnhFeet,
    /// QNH altitude in metres.
    QnhMetres,
    /// QFE height in feet (encoded in tens).
    QfeFeet,
    /// QFE height in metres.
    QfeMetres,
    /// GNSS altitude in feet.
    GnssFeet,
    /// GNSS altitude in metres.
    GnssMetres,
    /// Flight level in hundreds of feet.
    FlightLevel,
    /// Metric flight level in tens of metres.
    MetricFlightLevel,
}

/// A decoded altitude value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Altitude {
    /// The unit / reference selected on the wire.
    pub unit: AltitudeUnit,
    /// The value in the unit's natural scale (feet, metres, or level).
    pub value: i32,
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AltitudeUnit::QnhFeet | AltitudeUnit::QfeFeet | AltitudeUnit::GnssFeet => {
                write!(f, "{} FT", self.value)
            }
            AltitudeUnit::QnhMetres | AltitudeUnit::QfeMetres | AltitudeUnit::GnssMetres => {
                write!(f, "{} M", self.value)
            }
            AltitudeUnit::FlightLevel => write!(f, "FL{}", self.value),
            AltitudeUnit::MetricFlightLevel => write!(f, "FL{}M", self.value),
        }
    }
}

/// Speed unit selected by the 3-bit speed choice.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Indicated airspeed, knots (encoded in tens).
    IasKnots,
    /// Indicated airspeed, km/h (encoded in tens).
    IasKmh,
    /// True airspeed, knots (encoded in tens).
    TasKnots,
    /// True airspeed, km/h (encoded in tens).
    TasKmh,
    /// Ground speed, knots.
    GsKnots,
    /// Ground speed, km/h.
    GsKmh,
    /// Mach number, stored in thousandths.
    Mach,
}

/// A decoded speed value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed {
    /// The unit selected on the wire.
    pub unit: SpeedUnit,
    /// Knots or km/h for airspeed/ground speed; thousandths for Mach.
    pub value: i32,
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            SpeedUnit::IasKnots | SpeedUnit::TasKnots | SpeedUnit::GsKnots => {
                write!(f, "{} KT", self.value)
            }
            SpeedUnit::IasKmh | SpeedUnit::TasKmh | SpeedUnit::GsKmh => {
                write!(f, "{} KMH", self.value)
            }
            SpeedUnit::Mach => {
                if self.value % 10 == 0 {
                    write!(f, "M.{:02}", self.value / 10)
                } else {
                    write!(f, "M.{:03}", self.value)
                }
            }
        }
    }
}

/// Distance unit for route offsets and place/bearing/distance positions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Nautical miles.
    Nm,
    /// Kilometres.
    Km,
}

/// A decoded distance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distance {
    /// The unit selected on the wire.
    pub unit: DistanceUnit,
    /// Magnitude in the selected unit.
    pub value: u16,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DistanceUnit::Nm => write!(f, "{} NM", self.value),
            DistanceUnit::Km => write!(f, "{} KM", self.value),
        }
    }
}

/// A lateral offset from route, rendered lowercase per FANS display
/// convention (`13 nm`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceOffset {
    /// The unit selected on the wire.
    pub unit: DistanceUnit,
    /// Magnitude in the selected unit.
    pub value: u16,
}

impl fmt::Display for DistanceOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DistanceUnit::Nm => write!(f, "{} nm", self.value),
            DistanceUnit::Km => write!(f, "{} km", self.value),
        }
    }
}

/// The eleven compass terms of the 4-bit direction enumeration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompassDirection {
    /// Left of route.
    Left,
    /// Right of route.
    Right,
    /// Either side of route.
    EitherSide,
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// North-east.
    NorthEast,
    /// North-west.
    NorthWest,
    /// South-east.
    SouthEast,
    /// South-west.
    SouthWest,
}

impl CompassDirection {
    /// Map the wire enumeration index to a direction.
    pub fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => CompassDirection::Left,
            1 => CompassDirection::Right,
            2 => CompassDirection::EitherSide,
            3 => CompassDirection::North,
            4 => CompassDirection::South,
            5 => CompassDirection::East,
            6 => CompassDirection::West,
            7 => CompassDirection::NorthEast,
            8 => CompassDirection::NorthWest,
            9 => CompassDirection::SouthEast,
            10 => CompassDirection::SouthWest,
            _ => return None,
        })
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            CompassDirection::Left => "left",
            CompassDirection::Right => "right",
            CompassDirection::EitherSide => "either side",
            CompassDirection::North => "north",
            CompassDirection::South => "south",
            CompassDirection::East => "east",
            CompassDirection::West => "west",
            CompassDirection::NorthEast => "northeast",
            CompassDirection::NorthWest => "northwest",
            CompassDirection::SouthEast => "southeast",
            CompassDirection::SouthWest => "southwest",
        };
        f.write_str(word)
    }
}

/// A position value from the position choice.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Position {
    /// Published fix name, 1..=5 characters.
    Fix {
        /// The fix identifier.
        name: String,
    },
    /// Navaid identifier, 1..=4 characters.
    Navaid {
        /// The navaid identifier.
        name: String,
    },
    /// Airport, exactly 4 characters.
    Airport {
        /// The airport ICAO code.
        code: String,
    },
    /// Raw latitude / longitude.
    LatLon {
        /// Latitude in decimal degrees, south negative.
        latitude: f64,
        /// Longitude in decimal degrees, west negative.
        longitude: f64,
    },
    /// Place / bearing / distance, with an optional resolved lat/lon.
    PlaceBearingDistance {
        /// The reference place identifier.
        place: String,
        /// Optional resolved latitude of the place.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        latitude: Option<f64>,
        /// Optional resolved longitude of the place.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        longitude: Option<f64>,
        /// Magnetic bearing from the place, 1..=360.
        bearing: u16,
        /// Distance from the place.
        distance: Distance,
    },
}

/// Format a latitude or longitude with hemisphere suffix (`46.943N`).
fn format_coord(value: f64, pos: char, neg: char) -> String {
    let hemi = if value < 0.0 { neg } else { pos };
    format!("{:.3}{hemi}", value.abs())
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Fix { name } | Position::Navaid { name } => f.write_str(name),
            Position::Airport { code } => f.write_str(code),
            Position::LatLon {
                latitude,
                longitude,
            } => write!(
                f,
                "{} {}",
                format_coord(*latitude, 'N', 'S'),
                format_coord(*longitude, 'E', 'W')
            ),
            Position::PlaceBearingDistance {
                place,
                bearing,
                distance,
                ..
            } => write!(f, "{place}/{bearing:03}/{distance}"),
        }
    }
}

/// Frequency band selected by the 2-bit frequency choice.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyBand {
    /// HF, 2850..=28000 kHz.
    Hf,
    /// VHF, 117000..=138000 kHz.
    Vhf,
    /// UHF, 225000..=399975 kHz.
    Uhf,
    /// Satcom channel (string-addressed).
    Satcom,
}

/// A decoded frequency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Which band the choice selected.
    pub band: FrequencyBand,
    /// Frequency in kHz for HF/VHF/UHF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub khz: Option<u32>,
    /// Satcom channel designator, when decodable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.band, self.khz, self.channel.as_deref()) {
            (FrequencyBand::Hf, Some(khz), _) => write!(f, "{khz} KHZ"),
            (FrequencyBand::Vhf | FrequencyBand::Uhf, Some(khz), _) => {
                write!(f, "{}.{:03}", khz / 1000, khz % 1000)
            }
            (FrequencyBand::Satcom, _, Some(channel)) => f.write_str(channel),
            (FrequencyBand::Satcom, _, None) => f.write_str("SATCOM"),
            _ => f.write_str("?"),
        }
    }
}

/// The 3-bit ATC facility function enumeration.
#[derive(
    Serialize, Deserialize, StrumDisplay, Debug, Clone, Copy, PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FacilityFunction {
    /// Area control centre.
    Center,
    /// Approach control.
    Approach,
    /// Aerodrome tower.
    Tower,
    /// Final approach.
    Final,
    /// Ground movement control.
    Ground,
    /// Clearance delivery.
    Clearance,
    /// Departure control.
    Departure,
    /// Generic control.
    Control,
}

impl FacilityFunction {
    /// Map the wire enumeration index to a function.
    pub fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => FacilityFunction::Center,
            1 => FacilityFunction::Approach,
            2 => FacilityFunction::Tower,
            3 => FacilityFunction::Final,
            4 => FacilityFunction::Ground,
            5 => FacilityFunction::Clearance,
            6 => FacilityFunction::Departure,
            7 => FacilityFunction::Control,
            _ => return None,
        })
    }
}

/// An ATC unit: facility designator plus function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnitName {
    /// Four-character facility designator, when the id choice carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    /// The facility function.
    pub function: FacilityFunction,
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.facility {
            Some(facility) => write!(f, "{facility} {}", self.function),
            None => write!(f, "{}", self.function),
        }
    }
}

/// Hours + minutes of fuel remaining, rendered `2h30m`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelTime {
    /// Hours, 0..=99.
    pub hours: u8,
    /// Minutes, 0..=59.
    pub minutes: u8,
}

impl fmt::Display for FuelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}m", self.hours, self.minutes)
    }
}

/// To/from qualifier used by the time/distance/position report element.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToFrom {
    /// Inbound to the position.
    To,
    /// Outbound from the position.
    From,
}

impl fmt::Display for ToFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToFrom::To => f.write_str("TO"),
            ToFrom::From => f.write_str("FROM"),
        }
    }
}

/// A runway: number 1..=36 plus configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runway {
    /// Runway number, 1..=36.
    pub number: u8,
    /// Left / right / centre qualifier.
    pub config: RunwayConfig,
}

/// The 2-bit runway configuration enumeration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunwayConfig {
    /// Left parallel.
    Left,
    /// Right parallel.
    Right,
    /// Centre parallel.
    Center,
    /// No parallel qualifier.
    None,
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.config {
            RunwayConfig::Left => "L",
            RunwayConfig::Right => "R",
            RunwayConfig::Center => "C",
            RunwayConfig::None => "",
        };
        write!(f, "{:02}{}", self.number, suffix)
    }
}

/// A named procedure (SID, STAR, approach) within a route clearance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProcedureName {
    /// Procedure kind from the 2-bit wire enumeration.
    pub kind: ProcedureKind,
    /// The procedure identifier.
    pub name: String,
    /// Optional transition identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

/// Procedure kind enumeration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    /// Arrival (STAR).
    Arrival,
    /// Approach.
    Approach,
    /// Departure (SID).
    Departure,
}

impl fmt::Display for ProcedureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.transition {
            Some(transition) => write!(f, "{}.{}", self.name, transition),
            None => f.write_str(&self.name),
        }
    }
}

/// One entry of a route-information sequence (4-bit choice, 11 kinds).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteItem {
    /// A published identifier with its resolved position.
    PublishedIdentifier {
        /// The published fix or navaid name.
        name: String,
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
    /// A raw latitude / longitude point.
    LatLon {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
    /// Place / bearing / distance.
    PlaceBearingDistance {
        /// Reference place.
        place: String,
        /// Bearing from the place, 1..=360.
        bearing: u16,
        /// Distance from the place.
        distance: Distance,
    },
    /// An airway identifier to join.
    Airway {
        /// The airway designator.
        designator: String,
    },
    /// A named fix.
    Fix {
        /// The fix name.
        name: String,
    },
    /// A navaid.
    Navaid {
        /// The navaid identifier.
        name: String,
    },
    /// An airport.
    Airport {
        /// The airport code.
        code: String,
    },
    /// An airway intersection (two airway designators).
    AirwayIntersection {
        /// First airway.
        first: String,
        /// Second airway.
        second: String,
    },
    /// A track between two named points.
    TrackDetail {
        /// Track name.
        name: String,
    },
    /// A reporting point requirement.
    ReportingPoint {
        /// The reporting point name.
        name: String,
    },
    /// A hold at a published fix.
    HoldAt {
        /// The holding fix name.
        name: String,
    },
}

impl fmt::Display for RouteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteItem::PublishedIdentifier { name, .. }
            | RouteItem::Fix { name }
            | RouteItem::Navaid { name }
            | RouteItem::TrackDetail { name }
            | RouteItem::ReportingPoint { name } => f.write_str(name),
            RouteItem::HoldAt { name } => write!(f, "HOLD {name}"),
            RouteItem::Airport { code } => f.write_str(code),
            RouteItem::Airway { designator } => f.write_str(designator),
            RouteItem::AirwayIntersection { first, second } => {
                write!(f, "{first}X{second}")
            }
            RouteItem::LatLon {
                latitude,
                longitude,
            } => write!(
                f,
                "{} {}",
                format_coord(*latitude, 'N', 'S'),
                format_coord(*longitude, 'E', 'W')
            ),
            RouteItem::PlaceBearingDistance {
                place,
                bearing,
                distance,
            } => write!(f, "{place}/{bearing:03}/{distance}"),
        }
    }
}

/// A full route clearance: ten optional fields in wire order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RouteClearance {
    /// Departure airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Destination airport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Departure runway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_runway: Option<Runway>,
    /// Departure procedure (SID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_procedure: Option<ProcedureName>,
    /// Arrival runway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_runway: Option<Runway>,
    /// Approach procedure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach_procedure: Option<ProcedureName>,
    /// Arrival procedure (STAR).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_procedure: Option<ProcedureName>,
    /// Airway to join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airway: Option<String>,
    /// Route information sequence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route: Vec<RouteItem>,
    /// Additional free-text route information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_text: Option<String>,
}

impl fmt::Display for RouteClearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(origin) = &self.origin {
            parts.push(origin.clone());
        }
        if let Some(runway) = &self.departure_runway {
            parts.push(format!("RWY {runway}"));
        }
        if let Some(procedure) = &self.departure_procedure {
            parts.push(procedure.to_string());
        }
        if let Some(airway) = &self.airway {
            parts.push(airway.clone());
        }
        parts.extend(self.route.iter().map(ToString::to_string));
        if let Some(procedure) = &self.arrival_procedure {
            parts.push(procedure.to_string());
        }
        if let Some(procedure) = &self.approach_procedure {
            parts.push(procedure.to_string());
        }
        if let Some(runway) = &self.arrival_runway {
            parts.push(format!("RWY {runway}"));
        }
        if let Some(destination) = &self.destination {
            parts.push(destination.clone());
        }
        if let Some(text) = &self.additional_text {
            parts.push(text.clone());
        }
        f.write_str(&parts.join(" "))
    }
}

/// Reported winds within a position report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Winds {
    /// Wind direction in degrees true, 1..=360.
    pub direction: u16,
    /// Wind speed.
    pub speed: Speed,
}

impl fmt::Display for Winds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}/{}", self.direction, self.speed)
    }
}

/// A reported temperature with its wire unit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature {
    /// Degrees in the selected unit.
    pub value: i16,
    /// `true` when the wire choice selected Celsius.
    pub celsius: bool,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, if self.celsius { "C" } else { "F" })
    }
}

/// The optional waypoint triplet at the end of a position report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportedWaypoint {
    /// The waypoint position.
    pub position: Position,
    /// Time over the waypoint.
    pub time: CpdlcTime,
    /// Altitude over the waypoint.
    pub altitude: Altitude,
}

/// A full dM48 position report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PositionReport {
    /// Mandatory current position.
    pub position: Position,
    /// Time at the current position (extended 0..=47 hour range).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_at_position: Option<CpdlcTime>,
    /// Current altitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Altitude>,
    /// Next fix on route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_fix: Option<Position>,
    /// ETA at the next fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_next: Option<CpdlcTime>,
    /// The fix after the next one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_next_fix: Option<Position>,
    /// ETA at the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_destination: Option<CpdlcTime>,
    /// Outside air temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    /// Reported winds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winds: Option<Winds>,
    /// Current speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
    /// Optional trailing reported-waypoint triplet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_waypoint: Option<ReportedWaypoint>,
}

impl fmt::Display for PositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.position.to_string()];
        if let Some(time) = &self.time_at_position {
            parts.push(format!("AT {time}"));
        }
        if let Some(altitude) = &self.altitude {
            parts.push(altitude.to_string());
        }
        if let Some(fix) = &self.next_fix {
            parts.push(format!("NEXT {fix}"));
        }
        if let Some(eta) = &self.eta_next {
            parts.push(format!("AT {eta}"));
        }
        f.write_str(&parts.join(" "))
    }
}

// ---------------------------------------------------------------------------
// VerticalRate
// ---------------------------------------------------------------------------

/// Vertical rate unit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerticalRateUnit {
    /// Feet per minute.
    FeetPerMinute,
    /// Metres per minute.
    MetresPerMinute,
}

/// A decoded vertical rate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalRate {
    /// The unit selected on the wire.
    pub unit: VerticalRateUnit,
    /// Magnitude in the selected unit.
    pub value: i32,
}

impl fmt::Display for VerticalRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            VerticalRateUnit::FeetPerMinute => write!(f, "{} FT/MIN", self.value),
            VerticalRateUnit::MetresPerMinute => write!(f, "{} M/MIN", self.value),
        }
    }
}

// ---------------------------------------------------------------------------
// ElementValue
// ---------------------------------------------------------------------------

/// One typed value that fills a template placeholder.
///
/// An element's payload is an ordered `Vec<ElementValue>`; compound
/// schemas (time + altitude, offset + direction, …) contribute several
/// values, matched left-to-right against the template's placeholders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ElementValue {
    /// An altitude or flight level.
    Altitude(Altitude),
    /// A speed or Mach number.
    Speed(Speed),
    /// An HH:MM time.
    Time(CpdlcTime),
    /// A position.
    Position(Position),
    /// A distance.
    Distance(Distance),
    /// A lateral route offset.
    DistanceOffset(DistanceOffset),
    /// A compass direction term.
    Direction(CompassDirection),
    /// Heading or track degrees, 1..=360.
    Degrees(u16),
    /// A vertical rate.
    VerticalRate(VerticalRate),
    /// A transponder beacon code (4 octal digits).
    BeaconCode(String),
    /// An ATIS information letter.
    AtisCode(String),
    /// An altimeter setting rendered as transmitted.
    Altimeter(String),
    /// A decoded error reason.
    ErrorInfo(String),
    /// An ICAO facility designation.
    Facility(String),
    /// A CPDLC version number.
    VersionNumber(u8),
    /// A to/from qualifier.
    ToFrom(ToFrom),
    /// Remaining fuel as hours and minutes.
    FuelRemaining(FuelTime),
    /// Persons on board, 0..=1023.
    PersonsOnBoard(u16),
    /// A frequency.
    Frequency(Frequency),
    /// An ATC unit name.
    UnitName(UnitName),
    /// A procedure name.
    Procedure(ProcedureName),
    /// A holding leg time in minutes.
    LegTime(String),
    /// A route clearance.
    RouteClearance(Box<RouteClearance>),
    /// A dM48 position report.
    PositionReport(Box<PositionReport>),
    /// Free text.
    FreeText(String),
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementValue::Altitude(v) => write!(f, "{v}"),
            ElementValue::Speed(v) => write!(f, "{v}"),
            ElementValue::Time(v) => write!(f, "{v}"),
            ElementValue::Position(v) => write!(f, "{v}"),
            ElementValue::Distance(v) => write!(f, "{v}"),
            ElementValue::DistanceOffset(v) => write!(f, "{v}"),
            ElementValue::Direction(v) => write!(f, "{v}"),
            ElementValue::Degrees(v) => write!(f, "{v}"),
            ElementValue::VerticalRate(v) => write!(f, "{v}"),
            ElementValue::BeaconCode(v)
            | ElementValue::AtisCode(v)
            | ElementValue::Altimeter(v)
            | ElementValue::ErrorInfo(v)
            | ElementValue::Facility(v)
            | ElementValue::LegTime(v)
            | ElementValue::FreeText(v) => f.write_str(v),
            ElementValue::VersionNumber(v) => write!(f, "{v}"),
            ElementValue::ToFrom(v) => write!(f, "{v}"),
            ElementValue::FuelRemaining(v) => write!(f, "{v}"),
            ElementValue::PersonsOnBoard(v) => write!(f, "{v}"),
            ElementValue::Frequency(v) => write!(f, "{v}"),
            ElementValue::UnitName(v) => write!(f, "{v}"),
            ElementValue::Procedure(v) => write!(f, "{v}"),
            ElementValue::RouteClearance(v) => write!(f, "{v}"),
            ElementValue::PositionReport(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CpdlcElement / substitution
// ---------------------------------------------------------------------------

/// One decoded CPDLC element.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CpdlcElement {
    /// The element id within its direction's alphabet.
    pub id: u8,
    /// The label template with bracketed placeholders.
    pub label: String,
    /// The decoded payload values, in placeholder order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<ElementValue>,
    /// The template with every placeholder substituted.
    pub text: String,
}

impl CpdlcElement {
    /// Build an element from its template and values, computing the
    /// substituted text.
    pub fn new(id: u8, label: &str, data: Vec<ElementValue>) -> Self {
        let args: Vec<String> = data.iter().map(ToString::to_string).collect();
        Self {
            id,
            label: label.to_string(),
            text: substitute_placeholders(label, &args),
            data,
        }
    }
}

/// Substitute every `[placeholder]` in `template` with the next value
/// from `args`, in order. Surplus placeholders are left as-is; surplus
/// args are dropped. Literal string replacement only — the placeholder
/// grammar is closed, so no regex is involved.
pub fn substitute_placeholders(template: &str, args: &[String]) -> String {
    let mut result = template.to_string();
    let mut search_from = 0;
    for arg in args {
        let Some(start) = result[search_from..].find('[').map(|i| i + search_from) else {
            break;
        };
        let Some(end) = result[start..].find(']').map(|i| i + start) else {
            break;
        };
        result.replace_range(start..=end, arg);
        search_from = start + arg.len();
    }
    result
}

/// The direction a decoded CPDLC message travelled, re-exported alias for
/// readability at call sites.
pub type CpdlcDirection = LinkDirection;

#[cfg(test)]
mod tests {
    use super::*;

    fn fl(value: i32) -> ElementValue {
        ElementValue::Altitude(Altitude {
            unit: AltitudeUnit::FlightLevel,
            value,
        })
    }

    #[test]
    fn substitute_single_altitude() {
        let element = CpdlcElement::new(6, "REQUEST [altitude]", vec![fl(350)]);
        assert_eq!(element.text, "REQUEST FL350");
    }

    #[test]
    fn substitute_mach_speed() {
        let speed = ElementValue::Speed(Speed {
            unit: SpeedUnit::Mach,
            value: 820,
        });
        let element = CpdlcElement::new(106, "MAINTAIN [speed]", vec![speed]);
        assert_eq!(element.text, "MAINTAIN M.82");
    }

    #[test]
    fn substitute_time() {
        let time = ElementValue::Time(CpdlcTime {
            hours: 14,
            minutes: 30,
        });
        let element = CpdlcElement::new(93, "EXPECT AT [time]", vec![time]);
        assert_eq!(element.text, "EXPECT AT 14:30");
    }

    #[test]
    fn substitute_beacon_code() {
        let code = ElementValue::BeaconCode("7500".into());
        let element = CpdlcElement::new(123, "SQUAWK [beaconcode]", vec![code]);
        assert_eq!(element.text, "SQUAWK 7500");
    }

    #[test]
    fn substitute_fuel_and_souls() {
        let element = CpdlcElement::new(
            57,
            "[remainingfuel] OF FUEL REMAINING AND [remainingsouls] SOULS ON BOARD",
            vec![
                ElementValue::FuelRemaining(FuelTime {
                    hours: 2,
                    minutes: 30,
                }),
                ElementValue::PersonsOnBoard(150),
            ],
        );
        assert_eq!(
            element.text,
            "2h30m OF FUEL REMAINING AND 150 SOULS ON BOARD"
        );
    }

    #[test]
    fn substitute_altitude_block_fills_both() {
        let element = CpdlcElement::new(
            30,
            "MAINTAIN BLOCK [altitude] TO [altitude]",
            vec![fl(310), fl(350)],
        );
        assert_eq!(element.text, "MAINTAIN BLOCK FL310 TO FL350");
    }

    #[test]
    fn substitute_surplus_placeholder_left_alone() {
        let text = substitute_placeholders("CROSS [position] AT [time]", &["TULTO".to_string()]);
        assert_eq!(text, "CROSS TULTO AT [time]");
    }

    #[test]
    fn substitute_deviating_offset() {
        let element = CpdlcElement::new(
            80,
            "DEVIATING [distanceoffset] [direction] OF ROUTE",
            vec![
                ElementValue::DistanceOffset(DistanceOffset {
                    unit: DistanceUnit::Nm,
                    value: 13,
                }),
                ElementValue::Direction(CompassDirection::Left),
            ],
        );
        assert_eq!(element.text, "DEVIATING 13 nm left OF ROUTE");
    }

    #[test]
    fn mach_large_renders_three_digits() {
        let speed = Speed {
            unit: SpeedUnit::Mach,
            value: 825,
        };
        assert_eq!(speed.to_string(), "M.825");
    }

    #[test]
    fn frequency_vhf_renders_mhz() {
        let freq = Frequency {
            band: FrequencyBand::Vhf,
            khz: Some(131_950),
            channel: None,
        };
        assert_eq!(freq.to_string(), "131.950");
    }

    #[test]
    fn runway_display() {
        let runway = Runway {
            number: 16,
            config: RunwayConfig::Left,
        };
        assert_eq!(runway.to_string(), "16L");
    }

    #[test]
    fn time_zero_pads() {
        let time = CpdlcTime {
            hours: 3,
            minutes: 45,
        };
        assert_eq!(time.to_string(), "03:45");
    }
}
