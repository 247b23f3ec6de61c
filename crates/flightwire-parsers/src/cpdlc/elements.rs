//! Field decoders for CPDLC element payloads.
//!
//! Each function consumes exactly the wire representation of one
//! [`Field`](crate::cpdlc::tables::Field) and fails strictly; tolerance
//! for truncated tails lives one level up in the message decoder.

use flightwire_models::{
    Altitude, AltitudeUnit, CompassDirection, CpdlcTime, Distance, DistanceOffset, DistanceUnit,
    ElementValue, FacilityFunction, Frequency, FrequencyBand, FuelTime, Position, PositionReport,
    ProcedureKind, ProcedureName, ReportedWaypoint, RouteClearance, RouteItem, Runway,
    RunwayConfig, Speed, SpeedUnit, Temperature, ToFrom, UnitName, VerticalRate, VerticalRateUnit,
    Winds,
};

use crate::cpdlc::bits::BitReader;
use crate::cpdlc::tables::{Field, ERROR_REASONS};
use crate::error::DecodeError;

/// Decode a field sequence into its element values.
pub fn decode_fields(
    reader: &mut BitReader<'_>,
    fields: &[Field],
) -> Result<Vec<ElementValue>, DecodeError> {
    let mut values = Vec::new();
    for field in fields {
        decode_field(reader, *field, &mut values)?;
    }
    Ok(values)
}

/// Decode one field, pushing its value(s) onto `values`.
pub fn decode_field(
    reader: &mut BitReader<'_>,
    field: Field,
    values: &mut Vec<ElementValue>,
) -> Result<(), DecodeError> {
    match field {
        Field::Altitude => values.push(ElementValue::Altitude(decode_altitude(reader)?)),
        Field::Speed => values.push(ElementValue::Speed(decode_speed(reader)?)),
        Field::Time => values.push(ElementValue::Time(decode_time(reader)?)),
        Field::Position => values.push(ElementValue::Position(decode_position(reader)?)),
        Field::Distance => values.push(ElementValue::Distance(decode_distance(reader)?)),
        Field::Degrees => values.push(ElementValue::Degrees(decode_degrees(reader)?)),
        Field::TurnDirection => {
            let direction = if reader.read_bool()? {
                CompassDirection::Right
            } else {
                CompassDirection::Left
            };
            values.push(ElementValue::Direction(direction));
        }
        Field::OffsetDirection => {
            let (offset, direction) = decode_offset_direction(reader)?;
            values.push(ElementValue::DistanceOffset(offset));
            values.push(ElementValue::Direction(direction));
        }
        Field::ToFrom => values.push(ElementValue::ToFrom(decode_to_from(reader)?)),
        Field::FuelRemaining => {
            let hours = reader.read_constrained_int(0, 99)? as u8;
            let minutes = reader.read_constrained_int(0, 59)? as u8;
            values.push(ElementValue::FuelRemaining(FuelTime { hours, minutes }));
        }
        Field::PersonsOnBoard => {
            values.push(ElementValue::PersonsOnBoard(reader.read_bits(10)? as u16));
        }
        Field::Frequency => values.push(ElementValue::Frequency(decode_frequency(reader)?)),
        Field::UnitName => values.push(ElementValue::UnitName(decode_unit_name(reader)?)),
        Field::BeaconCode => {
            let mut code = String::with_capacity(4);
            for _ in 0..4 {
                let digit = reader.read_bits(3)?;
                code.push(char::from(b'0' + digit as u8));
            }
            values.push(ElementValue::BeaconCode(code));
        }
        Field::AtisCode => {
            let index = reader.read_constrained_int(0, 25)?;
            values.push(ElementValue::AtisCode(
                char::from(b'A' + index as u8).to_string(),
            ));
        }
        Field::Altimeter => values.push(ElementValue::Altimeter(decode_altimeter(reader)?)),
        Field::ErrorInfo => {
            let index = reader.read_constrained_int(0, ERROR_REASONS.len() as i64 - 1)?;
            values.push(ElementValue::ErrorInfo(
                ERROR_REASONS[index as usize].to_string(),
            ));
        }
        Field::Facility => values.push(ElementValue::Facility(reader.read_ia5_string(4)?)),
        Field::Version => {
            values.push(ElementValue::VersionNumber(reader.read_bits(4)? as u8));
        }
        Field::VerticalRate => {
            values.push(ElementValue::VerticalRate(decode_vertical_rate(reader)?));
        }
        Field::Procedure => values.push(ElementValue::Procedure(decode_procedure(reader)?)),
        Field::RouteClearance => {
            let route = decode_route_clearance(reader)?;
            values.push(ElementValue::RouteClearance(Box::new(route)));
        }
        Field::HoldClearance => decode_hold_clearance(reader, values)?,
        Field::PositionReport => {
            let report = decode_position_report(reader)?;
            values.push(ElementValue::PositionReport(Box::new(report)));
        }
        Field::FreeText => {
            let len = reader.read_constrained_int(1, 256)? as usize;
            values.push(ElementValue::FreeText(reader.read_ia5_string(len)?));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scalar fields
// ---------------------------------------------------------------------------

pub(crate) fn decode_altitude(reader: &mut BitReader<'_>) -> Result<Altitude, DecodeError> {
    let choice = reader.read_bits(3)?;
    let (unit, value) = match choice {
        0 => (AltitudeUnit::QnhFeet, reader.read_bits(12)? as i32 * 10),
        1 => (AltitudeUnit::QnhMetres, reader.read_bits(14)? as i32),
        2 => (AltitudeUnit::QfeFeet, reader.read_bits(12)? as i32 * 10),
        3 => (AltitudeUnit::QfeMetres, reader.read_bits(13)? as i32),
        4 => (AltitudeUnit::GnssFeet, reader.read_bits(18)? as i32),
        5 => (AltitudeUnit::GnssMetres, reader.read_bits(16)? as i32),
        6 => (
            AltitudeUnit::FlightLevel,
            reader.read_constrained_int(30, 600)? as i32,
        ),
        7 => (
            AltitudeUnit::MetricFlightLevel,
            reader.read_constrained_int(100, 2000)? as i32,
        ),
        _ => return Err(DecodeError::InvalidChoice),
    };
    Ok(Altitude { unit, value })
}

pub(crate) fn decode_speed(reader: &mut BitReader<'_>) -> Result<Speed, DecodeError> {
    let choice = reader.read_bits(3)?;
    let (unit, value) = match choice {
        0 => (SpeedUnit::IasKnots, reader.read_bits(5)? as i32 * 10),
        1 => (SpeedUnit::IasKmh, reader.read_bits(7)? as i32 * 10),
        2 => (SpeedUnit::TasKnots, reader.read_bits(6)? as i32 * 10),
        3 => (SpeedUnit::TasKmh, reader.read_bits(7)? as i32 * 10),
        4 => (SpeedUnit::GsKnots, reader.read_bits(6)? as i32 * 10),
        5 => (SpeedUnit::GsKmh, reader.read_bits(7)? as i32 * 10),
        6 => (
            SpeedUnit::Mach,
            reader.read_constrained_int(61, 92)? as i32 * 10,
        ),
        7 => (SpeedUnit::Mach, reader.read_constrained_int(93, 604)? as i32),
        _ => return Err(DecodeError::InvalidChoice),
    };
    Ok(Speed { unit, value })
}

/// HH:MM element time, hours 0..=23.
pub(crate) fn decode_time(reader: &mut BitReader<'_>) -> Result<CpdlcTime, DecodeError> {
    let hours = reader.read_constrained_int(0, 23)? as u8;
    let minutes = reader.read_constrained_int(0, 59)? as u8;
    Ok(CpdlcTime { hours, minutes })
}

/// Extended position-report time, hours 0..=47.
fn decode_time_extended(reader: &mut BitReader<'_>) -> Result<CpdlcTime, DecodeError> {
    let hours = reader.read_constrained_int(0, 47)? as u8;
    let minutes = reader.read_constrained_int(0, 59)? as u8;
    Ok(CpdlcTime { hours, minutes })
}

fn decode_latitude(reader: &mut BitReader<'_>) -> Result<f64, DecodeError> {
    let degrees = reader.read_constrained_int(0, 90)? as f64;
    let minutes = reader.read_constrained_int(0, 59)? as f64;
    let seconds = reader.read_constrained_int(0, 59)? as f64;
    let south = reader.read_bool()?;
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    Ok(if south { -value } else { value })
}

fn decode_longitude(reader: &mut BitReader<'_>) -> Result<f64, DecodeError> {
    let degrees = reader.read_constrained_int(0, 180)? as f64;
    let minutes = reader.read_constrained_int(0, 59)? as f64;
    let seconds = reader.read_constrained_int(0, 59)? as f64;
    let west = reader.read_bool()?;
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    Ok(if west { -value } else { value })
}

/// Coarse lat/lon used only inside position reports: whole degrees plus
/// minutes in tenths, no seconds.
fn decode_latlon_coarse(reader: &mut BitReader<'_>) -> Result<(f64, f64), DecodeError> {
    let lat_deg = reader.read_constrained_int(0, 90)? as f64;
    let lat_tenths = reader.read_constrained_int(0, 599)? as f64;
    let south = reader.read_bool()?;
    let lon_deg = reader.read_constrained_int(0, 180)? as f64;
    let lon_tenths = reader.read_constrained_int(0, 599)? as f64;
    let west = reader.read_bool()?;
    let lat = lat_deg + lat_tenths / 600.0;
    let lon = lon_deg + lon_tenths / 600.0;
    Ok((
        if south { -lat } else { lat },
        if west { -lon } else { lon },
    ))
}

fn decode_fix_name(reader: &mut BitReader<'_>) -> Result<String, DecodeError> {
    let len = reader.read_constrained_int(1, 5)? as usize;
    reader.read_ia5_string(len)
}

pub(crate) fn decode_position(reader: &mut BitReader<'_>) -> Result<Position, DecodeError> {
    let choice = reader.read_bits(3)?;
    decode_position_choice(reader, choice, false)
}

/// The position-report variant allows three extra alternatives on top of
/// the base five.
fn decode_report_position(reader: &mut BitReader<'_>) -> Result<Position, DecodeError> {
    let choice = reader.read_bits(3)?;
    decode_position_choice(reader, choice, true)
}

fn decode_position_choice(
    reader: &mut BitReader<'_>,
    choice: u32,
    extended: bool,
) -> Result<Position, DecodeError> {
    match choice {
        0 => Ok(Position::Fix {
            name: decode_fix_name(reader)?,
        }),
        1 => {
            let len = reader.read_constrained_int(1, 4)? as usize;
            Ok(Position::Navaid {
                name: reader.read_ia5_string(len)?,
            })
        }
        2 => Ok(Position::Airport {
            code: reader.read_ia5_string(4)?,
        }),
        3 => {
            let latitude = decode_latitude(reader)?;
            let longitude = decode_longitude(reader)?;
            Ok(Position::LatLon {
                latitude,
                longitude,
            })
        }
        4 => decode_place_bearing_distance(reader),
        5 if extended => {
            let (latitude, longitude) = decode_latlon_coarse(reader)?;
            Ok(Position::LatLon {
                latitude,
                longitude,
            })
        }
        6 if extended => {
            // fix name with its resolved coordinates
            let name = decode_fix_name(reader)?;
            let _ = decode_latitude(reader)?;
            let _ = decode_longitude(reader)?;
            Ok(Position::Fix { name })
        }
        7 if extended => {
            let code = reader.read_ia5_string(4)?;
            let _ = decode_latitude(reader)?;
            let _ = decode_longitude(reader)?;
            Ok(Position::Airport { code })
        }
        _ => Err(DecodeError::InvalidChoice),
    }
}

fn decode_place_bearing_distance(reader: &mut BitReader<'_>) -> Result<Position, DecodeError> {
    let has_latlon = reader.read_bool()?;
    let place = decode_fix_name(reader)?;
    let (latitude, longitude) = if has_latlon {
        (
            Some(decode_latitude(reader)?),
            Some(decode_longitude(reader)?),
        )
    } else {
        (None, None)
    };
    let bearing = reader.read_constrained_int(1, 360)? as u16;
    let distance = decode_distance(reader)?;
    Ok(Position::PlaceBearingDistance {
        place,
        latitude,
        longitude,
        bearing,
        distance,
    })
}

pub(crate) fn decode_distance(reader: &mut BitReader<'_>) -> Result<Distance, DecodeError> {
    if reader.read_bool()? {
        Ok(Distance {
            unit: DistanceUnit::Km,
            value: reader.read_constrained_int(1, 1024)? as u16,
        })
    } else {
        Ok(Distance {
            unit: DistanceUnit::Nm,
            value: reader.read_constrained_int(0, 9999)? as u16,
        })
    }
}

fn decode_degrees(reader: &mut BitReader<'_>) -> Result<u16, DecodeError> {
    Ok(reader.read_constrained_int(1, 360)? as u16)
}

fn decode_offset_direction(
    reader: &mut BitReader<'_>,
) -> Result<(DistanceOffset, CompassDirection), DecodeError> {
    let offset = if reader.read_bool()? {
        DistanceOffset {
            unit: DistanceUnit::Km,
            value: reader.read_bits(8)? as u16,
        }
    } else {
        DistanceOffset {
            unit: DistanceUnit::Nm,
            value: reader.read_bits(7)? as u16,
        }
    };
    let index = reader.read_bits(4)? as u8;
    let direction = CompassDirection::from_index(index).ok_or(DecodeError::InvalidChoice)?;
    Ok((offset, direction))
}

fn decode_to_from(reader: &mut BitReader<'_>) -> Result<ToFrom, DecodeError> {
    Ok(if reader.read_bool()? {
        ToFrom::From
    } else {
        ToFrom::To
    })
}

fn decode_frequency(reader: &mut BitReader<'_>) -> Result<Frequency, DecodeError> {
    let choice = reader.read_bits(2)?;
    let frequency = match choice {
        0 => Frequency {
            band: FrequencyBand::Hf,
            khz: Some(reader.read_constrained_int(2850, 28_000)? as u32),
            channel: None,
        },
        1 => Frequency {
            band: FrequencyBand::Vhf,
            khz: Some(reader.read_constrained_int(117_000, 138_000)? as u32),
            channel: None,
        },
        2 => Frequency {
            band: FrequencyBand::Uhf,
            khz: Some(reader.read_constrained_int(225_000, 399_975)? as u32),
            channel: None,
        },
        3 => {
            // Satcom channel string; some encoders omit it entirely, so a
            // failed read leaves just the band.
            let saved = reader.offset();
            let channel = (|| -> Result<String, DecodeError> {
                let len = reader.read_constrained_int(1, 16)? as usize;
                reader.read_ia5_string(len)
            })();
            match channel {
                Ok(channel) => Frequency {
                    band: FrequencyBand::Satcom,
                    khz: None,
                    channel: Some(channel),
                },
                Err(_) => {
                    reader.set_offset(saved);
                    Frequency {
                        band: FrequencyBand::Satcom,
                        khz: None,
                        channel: None,
                    }
                }
            }
        }
        _ => return Err(DecodeError::InvalidChoice),
    };
    Ok(frequency)
}

fn decode_unit_name(reader: &mut BitReader<'_>) -> Result<UnitName, DecodeError> {
    let facility = if reader.read_bool()? {
        let len = reader.read_constrained_int(1, 18)? as usize;
        Some(reader.read_ia5_string(len)?)
    } else {
        Some(reader.read_ia5_string(4)?)
    };
    let index = reader.read_bits(3)? as u8;
    let function = FacilityFunction::from_index(index).ok_or(DecodeError::InvalidChoice)?;
    Ok(UnitName { facility, function })
}

fn decode_altimeter(reader: &mut BitReader<'_>) -> Result<String, DecodeError> {
    if reader.read_bool()? {
        let hpa = reader.read_constrained_int(750, 1250)?;
        Ok(format!("{hpa} HPA"))
    } else {
        let hundredths = reader.read_constrained_int(2200, 3200)?;
        Ok(format!("{}.{:02}", hundredths / 100, hundredths % 100))
    }
}

fn decode_vertical_rate(reader: &mut BitReader<'_>) -> Result<VerticalRate, DecodeError> {
    if reader.read_bool()? {
        Ok(VerticalRate {
            unit: VerticalRateUnit::MetresPerMinute,
            value: reader.read_bits(10)? as i32 * 10,
        })
    } else {
        Ok(VerticalRate {
            unit: VerticalRateUnit::FeetPerMinute,
            value: reader.read_bits(11)? as i32 * 10,
        })
    }
}

// ---------------------------------------------------------------------------
// Procedures and route clearances
// ---------------------------------------------------------------------------

fn decode_procedure(reader: &mut BitReader<'_>) -> Result<ProcedureName, DecodeError> {
    let has_transition = reader.read_bool()?;
    let kind = match reader.read_constrained_int(0, 2)? {
        0 => ProcedureKind::Arrival,
        1 => ProcedureKind::Approach,
        _ => ProcedureKind::Departure,
    };
    let len = reader.read_constrained_int(1, 20)? as usize;
    let name = reader.read_ia5_string(len)?;
    let transition = if has_transition {
        let len = reader.read_constrained_int(1, 5)? as usize;
        Some(reader.read_ia5_string(len)?)
    } else {
        None
    };
    Ok(ProcedureName {
        kind,
        name,
        transition,
    })
}

fn decode_runway(reader: &mut BitReader<'_>) -> Result<Runway, DecodeError> {
    let number = reader.read_constrained_int(1, 36)? as u8;
    let config = match reader.read_bits(2)? {
        0 => RunwayConfig::Left,
        1 => RunwayConfig::Right,
        2 => RunwayConfig::Center,
        _ => RunwayConfig::None,
    };
    Ok(Runway { number, config })
}

fn decode_airway(reader: &mut BitReader<'_>) -> Result<String, DecodeError> {
    let len = reader.read_constrained_int(2, 7)? as usize;
    reader.read_ia5_string(len)
}

fn decode_route_item(reader: &mut BitReader<'_>) -> Result<RouteItem, DecodeError> {
    let choice = reader.read_bits(4)?;
    Ok(match choice {
        0 => RouteItem::Fix {
            name: decode_fix_name(reader)?,
        },
        1 => {
            let len = reader.read_constrained_int(1, 4)? as usize;
            RouteItem::Navaid {
                name: reader.read_ia5_string(len)?,
            }
        }
        2 => RouteItem::Airport {
            code: reader.read_ia5_string(4)?,
        },
        3 => {
            let latitude = decode_latitude(reader)?;
            let longitude = decode_longitude(reader)?;
            RouteItem::LatLon {
                latitude,
                longitude,
            }
        }
        4 => {
            let place = decode_fix_name(reader)?;
            let bearing = reader.read_constrained_int(1, 360)? as u16;
            let distance = decode_distance(reader)?;
            RouteItem::PlaceBearingDistance {
                place,
                bearing,
                distance,
            }
        }
        5 => RouteItem::Airway {
            designator: decode_airway(reader)?,
        },
        6 => RouteItem::AirwayIntersection {
            first: decode_airway(reader)?,
            second: decode_airway(reader)?,
        },
        7 => {
            let name = decode_fix_name(reader)?;
            let latitude = decode_latitude(reader)?;
            let longitude = decode_longitude(reader)?;
            RouteItem::PublishedIdentifier {
                name,
                latitude,
                longitude,
            }
        }
        8 => {
            let len = reader.read_constrained_int(1, 8)? as usize;
            RouteItem::TrackDetail {
                name: reader.read_ia5_string(len)?,
            }
        }
        9 => RouteItem::ReportingPoint {
            name: decode_fix_name(reader)?,
        },
        10 => RouteItem::HoldAt {
            name: decode_fix_name(reader)?,
        },
        _ => return Err(DecodeError::InvalidChoice),
    })
}

pub(crate) fn decode_route_clearance(
    reader: &mut BitReader<'_>,
) -> Result<RouteClearance, DecodeError> {
    let mut present = [false; 10];
    for flag in &mut present {
        *flag = reader.read_bool()?;
    }
    let mut route = RouteClearance::default();
    if present[0] {
        route.origin = Some(reader.read_ia5_string(4)?);
    }
    if present[1] {
        route.destination = Some(reader.read_ia5_string(4)?);
    }
    if present[2] {
        route.departure_runway = Some(decode_runway(reader)?);
    }
    if present[3] {
        route.departure_procedure = Some(decode_procedure(reader)?);
    }
    if present[4] {
        route.arrival_runway = Some(decode_runway(reader)?);
    }
    if present[5] {
        route.approach_procedure = Some(decode_procedure(reader)?);
    }
    if present[6] {
        route.arrival_procedure = Some(decode_procedure(reader)?);
    }
    if present[7] {
        route.airway = Some(decode_airway(reader)?);
    }
    if present[8] {
        let count = reader.read_constrained_int(1, 128)? as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(decode_route_item(reader)?);
        }
        route.route = items;
    }
    if present[9] {
        let len = reader.read_constrained_int(1, 256)? as usize;
        route.additional_text = Some(reader.read_ia5_string(len)?);
    }
    Ok(route)
}

fn decode_hold_clearance(
    reader: &mut BitReader<'_>,
    values: &mut Vec<ElementValue>,
) -> Result<(), DecodeError> {
    let position = decode_position(reader)?;
    let altitude = decode_altitude(reader)?;
    let degrees = decode_degrees(reader)?;
    let index = reader.read_bits(4)? as u8;
    let direction = CompassDirection::from_index(index).ok_or(DecodeError::InvalidChoice)?;
    let leg_time = if reader.read_bool()? {
        let tenths = reader.read_bits(8)?;
        format!("{}.{} MIN", tenths / 10, tenths % 10)
    } else {
        "STANDARD".to_string()
    };
    values.push(ElementValue::Position(position));
    values.push(ElementValue::Altitude(altitude));
    values.push(ElementValue::Degrees(degrees));
    values.push(ElementValue::Direction(direction));
    values.push(ElementValue::LegTime(leg_time));
    Ok(())
}

// ---------------------------------------------------------------------------
// Position report (dM48)
// ---------------------------------------------------------------------------

const REPORT_OPTIONAL_FIELDS: usize = 10;

fn decode_temperature(reader: &mut BitReader<'_>) -> Result<Temperature, DecodeError> {
    if reader.read_bool()? {
        Ok(Temperature {
            value: reader.read_constrained_int(-112, 117)? as i16,
            celsius: false,
        })
    } else {
        Ok(Temperature {
            value: reader.read_constrained_int(-80, 47)? as i16,
            celsius: true,
        })
    }
}

fn decode_winds(reader: &mut BitReader<'_>) -> Result<Winds, DecodeError> {
    let direction = reader.read_constrained_int(1, 360)? as u16;
    let speed = if reader.read_bool()? {
        Speed {
            unit: SpeedUnit::GsKmh,
            value: reader.read_bits(9)? as i32,
        }
    } else {
        Speed {
            unit: SpeedUnit::GsKnots,
            value: reader.read_bits(8)? as i32,
        }
    };
    Ok(Winds { direction, speed })
}

/// Decode the dM48 position report, preferring the bitmap layout and
/// retrying without it. If neither layout holds, the mandatory current
/// position is kept and the unrecognised optional block is consumed.
pub(crate) fn decode_position_report(
    reader: &mut BitReader<'_>,
) -> Result<PositionReport, DecodeError> {
    let saved = reader.offset();
    if let Ok(report) = decode_report_with_bitmap(reader) {
        return Ok(report);
    }
    reader.set_offset(saved);
    if let Ok(report) = decode_report_inline(reader) {
        return Ok(report);
    }
    reader.set_offset(saved);
    let report = empty_report(decode_report_position(reader)?);
    let end = reader.offset() + reader.remaining();
    reader.set_offset(end);
    Ok(report)
}

fn decode_report_with_bitmap(
    reader: &mut BitReader<'_>,
) -> Result<PositionReport, DecodeError> {
    let bitmap = reader.read_bits(20)?;
    // Only the leading ten bits are assigned; set trailing bits mean this
    // is not the bitmap layout.
    if bitmap & 0x3FF != 0 {
        return Err(DecodeError::failed("unassigned report bitmap bits set"));
    }
    let present = |index: usize| bitmap >> (19 - index) & 1 == 1;
    let mut report = empty_report(decode_report_position(reader)?);
    decode_report_optionals(reader, &mut report, present)?;
    Ok(report)
}

fn decode_report_inline(reader: &mut BitReader<'_>) -> Result<PositionReport, DecodeError> {
    let position = decode_report_position(reader)?;
    let mut flags = [false; REPORT_OPTIONAL_FIELDS];
    for flag in &mut flags {
        *flag = reader.read_bool()?;
    }
    let mut report = empty_report(position);
    decode_report_optionals(reader, &mut report, |index| flags[index])?;
    Ok(report)
}

fn empty_report(position: Position) -> PositionReport {
    PositionReport {
        position,
        time_at_position: None,
        altitude: None,
        next_fix: None,
        eta_next: None,
        next_next_fix: None,
        eta_destination: None,
        temperature: None,
        winds: None,
        speed: None,
        reported_waypoint: None,
    }
}

fn decode_report_optionals(
    reader: &mut BitReader<'_>,
    report: &mut PositionReport,
    present: impl Fn(usize) -> bool,
) -> Result<(), DecodeError> {
    if present(0) {
        report.time_at_position = Some(decode_time_extended(reader)?);
    }
    if present(1) {
        report.altitude = Some(decode_altitude(reader)?);
    }
    if present(2) {
        report.next_fix = Some(decode_position(reader)?);
    }
    if present(3) {
        report.eta_next = Some(decode_time(reader)?);
    }
    if present(4) {
        report.next_next_fix = Some(decode_position(reader)?);
    }
    if present(5) {
        report.eta_destination = Some(decode_time(reader)?);
    }
    if present(6) {
        report.temperature = Some(decode_temperature(reader)?);
    }
    if present(7) {
        report.winds = Some(decode_winds(reader)?);
    }
    if present(8) {
        report.speed = Some(decode_speed(reader)?);
    }
    if present(9) {
        // The trailing triplet is only decodable when the encoder left
        // enough bits; roll back and drop it otherwise.
        let saved = reader.offset();
        let triplet = (|| -> Result<ReportedWaypoint, DecodeError> {
            let position = decode_position(reader)?;
            let time = decode_time(reader)?;
            let altitude = decode_altitude(reader)?;
            Ok(ReportedWaypoint {
                position,
                time,
                altitude,
            })
        })();
        match triplet {
            Ok(triplet) => report.reported_waypoint = Some(triplet),
            Err(_) => reader.set_offset(saved),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpdlc::tables::{downlink_spec, uplink_spec, DOWNLINK_NULL_IDS, UPLINK_NULL_IDS};

    const ZEROS: [u8; 100] = [0; 100];

    #[test]
    fn flight_level_altitude_decodes() {
        // choice 6 (110) + 10-bit offset 320 → FL350
        let data = [0b1100_1010, 0b0000_0000];
        let mut reader = BitReader::new(&data);
        let altitude = decode_altitude(&mut reader).unwrap();
        assert_eq!(altitude.unit, AltitudeUnit::FlightLevel);
        assert_eq!(altitude.value, 350);
        assert_eq!(reader.offset(), 13);
    }

    #[test]
    fn mach_small_decodes() {
        // choice 6 (110) + 5-bit offset 21 → Mach 0.82
        let data = [0b1101_0101, 0b0000_0000];
        let mut reader = BitReader::new(&data);
        let speed = decode_speed(&mut reader).unwrap();
        assert_eq!(speed.unit, SpeedUnit::Mach);
        assert_eq!(speed.value, 820);
    }

    #[test]
    fn null_elements_decode_from_zero_buffer() {
        for &id in DOWNLINK_NULL_IDS {
            let spec = downlink_spec(id).unwrap();
            let mut reader = BitReader::new(&ZEROS);
            let values = decode_fields(&mut reader, spec.fields).unwrap();
            assert!(values.is_empty(), "downlink {id}");
            assert_eq!(reader.offset(), 0, "downlink {id} must consume nothing");
        }
        for &id in UPLINK_NULL_IDS {
            let spec = uplink_spec(id).unwrap();
            let mut reader = BitReader::new(&ZEROS);
            let values = decode_fields(&mut reader, spec.fields).unwrap();
            assert!(values.is_empty(), "uplink {id}");
        }
    }

    #[test]
    fn every_cataloged_element_decodes_or_fails_cleanly() {
        for id in 0..=182u8 {
            if let Some(spec) = uplink_spec(id) {
                let mut reader = BitReader::new(&ZEROS);
                // Must not panic; zero bits are a valid encoding for most
                // schemas and a clean error for the rest.
                let _ = decode_fields(&mut reader, spec.fields);
            }
        }
        for id in 0..=128u8 {
            if let Some(spec) = downlink_spec(id) {
                let mut reader = BitReader::new(&ZEROS);
                let _ = decode_fields(&mut reader, spec.fields);
            }
        }
    }

    #[test]
    fn beacon_code_decodes_octal_digits() {
        // 7500 → 111 101 000 000
        let data = [0b1111_0100, 0b0000_0000];
        let mut reader = BitReader::new(&data);
        let mut values = Vec::new();
        decode_field(&mut reader, Field::BeaconCode, &mut values).unwrap();
        assert_eq!(values, vec![ElementValue::BeaconCode("7500".into())]);
    }

    #[test]
    fn offset_direction_yields_two_values() {
        // unit nm (0), 7-bit magnitude 13, direction 0 (left)
        let data = [0b0000_1101, 0b0000_0000];
        let mut reader = BitReader::new(&data);
        let mut values = Vec::new();
        decode_field(&mut reader, Field::OffsetDirection, &mut values).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(
            values[0],
            ElementValue::DistanceOffset(DistanceOffset {
                unit: DistanceUnit::Nm,
                value: 13,
            })
        );
        assert_eq!(values[1], ElementValue::Direction(CompassDirection::Left));
    }

    #[test]
    fn free_text_round_trip() {
        // length 1..256: "AT" → len offset 1 in 8 bits, then 7-bit chars
        let mut bits: Vec<bool> = Vec::new();
        let push_n = |bits: &mut Vec<bool>, value: u32, width: usize| {
            for i in (0..width).rev() {
                bits.push(value >> i & 1 == 1);
            }
        };
        push_n(&mut bits, 1, 8); // len 2
        push_n(&mut bits, u32::from(b'A'), 7);
        push_n(&mut bits, u32::from(b'T'), 7);
        let mut data = vec![0u8; bits.len().div_ceil(8)];
        for (i, bit) in bits.iter().enumerate() {
            if *bit {
                data[i / 8] |= 1 << (7 - i % 8);
            }
        }
        let mut reader = BitReader::new(&data);
        let mut values = Vec::new();
        decode_field(&mut reader, Field::FreeText, &mut values).unwrap();
        assert_eq!(values, vec![ElementValue::FreeText("AT".into())]);
    }

    #[test]
    fn position_report_zero_buffer_has_mandatory_position() {
        let mut reader = BitReader::new(&ZEROS);
        let report = decode_position_report(&mut reader).unwrap();
        // Zero bitmap → no optional fields, fix-name position of one NUL.
        assert!(report.altitude.is_none());
        assert!(report.reported_waypoint.is_none());
        assert!(matches!(report.position, Position::Fix { .. }));
    }
}
