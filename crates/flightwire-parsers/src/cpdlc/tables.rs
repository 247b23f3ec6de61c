//! FANS-1/A element catalog: label templates and payload schemas.
//!
//! Every element id maps to a human-readable template (bracketed
//! lowercase placeholders) and the ordered list of wire fields that fill
//! it. The uplink alphabet covers 0..=182 and the downlink alphabet
//! 0..=128; downlink ids above the FANS-1/A set decode deterministically
//! as unsupported rather than panicking.

/// One wire field within an element payload.
///
/// Each field decodes to one [`ElementValue`](flightwire_models::ElementValue)
/// except the fused pairs ([`Field::OffsetDirection`] yields offset then
/// direction, [`Field::HoldClearance`] yields five values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// 3-bit altitude choice.
    Altitude,
    /// 3-bit speed choice.
    Speed,
    /// HH:MM time (5 + 6 bits).
    Time,
    /// 3-bit position choice.
    Position,
    /// Distance with a 1-bit unit choice (nm 0..=9999 / km 1..=1024).
    Distance,
    /// Degrees 1..=360 (9 bits).
    Degrees,
    /// 1-bit left/right turn direction.
    TurnDirection,
    /// Fused lateral offset: 1-bit unit, 7/8-bit magnitude, 4-bit
    /// compass term. Yields two values.
    OffsetDirection,
    /// 1-bit to/from qualifier.
    ToFrom,
    /// Remaining fuel: hours 0..=99, minutes 0..=59.
    FuelRemaining,
    /// Persons on board, 10 bits.
    PersonsOnBoard,
    /// 2-bit frequency choice.
    Frequency,
    /// ICAO unit name: 1-bit id choice, designator, 3-bit function.
    UnitName,
    /// Beacon code: four octal digits.
    BeaconCode,
    /// ATIS letter.
    AtisCode,
    /// 1-bit altimeter choice (inHg / hPa).
    Altimeter,
    /// Enumerated error reason.
    ErrorInfo,
    /// Four-character facility designation.
    Facility,
    /// Version number, 4 bits.
    Version,
    /// 1-bit vertical-rate unit choice plus magnitude.
    VerticalRate,
    /// Procedure name with optional transition.
    Procedure,
    /// Full route clearance (ten presence bits).
    RouteClearance,
    /// Hold clearance: position, altitude, track, direction, leg time.
    /// Yields five values.
    HoldClearance,
    /// dM48 position report.
    PositionReport,
    /// Length-prefixed IA5 free text.
    FreeText,
}

/// A catalog row: template plus payload schema.
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    /// The label template with bracketed placeholders.
    pub label: &'static str,
    /// Wire fields in decode order.
    pub fields: &'static [Field],
}

const fn spec(label: &'static str, fields: &'static [Field]) -> ElementSpec {
    ElementSpec { label, fields }
}

use Field as F;

/// Look up an uplink (ground → air) element, ids 0..=182.
#[rustfmt::skip]
pub fn uplink_spec(id: u8) -> Option<ElementSpec> {
    Some(match id {
        0   => spec("UNABLE", &[]),
        1   => spec("STANDBY", &[]),
        2   => spec("REQUEST DEFERRED", &[]),
        3   => spec("ROGER", &[]),
        4   => spec("AFFIRM", &[]),
        5   => spec("NEGATIVE", &[]),
        6   => spec("EXPECT [altitude]", &[F::Altitude]),
        7   => spec("EXPECT CLIMB AT [time]", &[F::Time]),
        8   => spec("EXPECT CLIMB AT [position]", &[F::Position]),
        9   => spec("EXPECT DESCENT AT [time]", &[F::Time]),
        10  => spec("EXPECT DESCENT AT [position]", &[F::Position]),
        11  => spec("EXPECT CRUISE CLIMB AT [time]", &[F::Time]),
        12  => spec("EXPECT CRUISE CLIMB AT [position]", &[F::Position]),
        13  => spec("AT [time] EXPECT CLIMB TO [altitude]", &[F::Time, F::Altitude]),
        14  => spec("AT [position] EXPECT CLIMB TO [altitude]", &[F::Position, F::Altitude]),
        15  => spec("AT [time] EXPECT DESCENT TO [altitude]", &[F::Time, F::Altitude]),
        16  => spec("AT [position] EXPECT DESCENT TO [altitude]", &[F::Position, F::Altitude]),
        17  => spec("AT [time] EXPECT CRUISE CLIMB TO [altitude]", &[F::Time, F::Altitude]),
        18  => spec("AT [position] EXPECT CRUISE CLIMB TO [altitude]", &[F::Position, F::Altitude]),
        19  => spec("MAINTAIN [altitude]", &[F::Altitude]),
        20  => spec("CLIMB TO AND MAINTAIN [altitude]", &[F::Altitude]),
        21  => spec("AT [time] CLIMB TO AND MAINTAIN [altitude]", &[F::Time, F::Altitude]),
        22  => spec("AT [position] CLIMB TO AND MAINTAIN [altitude]", &[F::Position, F::Altitude]),
        23  => spec("DESCEND TO AND MAINTAIN [altitude]", &[F::Altitude]),
        24  => spec("AT [time] DESCEND TO AND MAINTAIN [altitude]", &[F::Time, F::Altitude]),
        25  => spec("AT [position] DESCEND TO AND MAINTAIN [altitude]", &[F::Position, F::Altitude]),
        26  => spec("CLIMB TO REACH [altitude] BY [time]", &[F::Altitude, F::Time]),
        27  => spec("CLIMB TO REACH [altitude] BY [position]", &[F::Altitude, F::Position]),
        28  => spec("DESCEND TO REACH [altitude] BY [time]", &[F::Altitude, F::Time]),
        29  => spec("DESCEND TO REACH [altitude] BY [position]", &[F::Altitude, F::Position]),
        30  => spec("MAINTAIN BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        31  => spec("CLIMB TO AND MAINTAIN BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        32  => spec("DESCEND TO AND MAINTAIN BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        33  => spec("CRUISE [altitude]", &[F::Altitude]),
        34  => spec("CRUISE CLIMB TO [altitude]", &[F::Altitude]),
        35  => spec("CRUISE CLIMB ABOVE [altitude]", &[F::Altitude]),
        36  => spec("EXPEDITE CLIMB TO [altitude]", &[F::Altitude]),
        37  => spec("EXPEDITE DESCENT TO [altitude]", &[F::Altitude]),
        38  => spec("IMMEDIATELY CLIMB TO [altitude]", &[F::Altitude]),
        39  => spec("IMMEDIATELY DESCEND TO [altitude]", &[F::Altitude]),
        40  => spec("IMMEDIATELY STOP CLIMB AT [altitude]", &[F::Altitude]),
        41  => spec("IMMEDIATELY STOP DESCENT AT [altitude]", &[F::Altitude]),
        42  => spec("EXPECT TO CROSS [position] AT [altitude]", &[F::Position, F::Altitude]),
        43  => spec("EXPECT TO CROSS [position] AT OR ABOVE [altitude]", &[F::Position, F::Altitude]),
        44  => spec("EXPECT TO CROSS [position] AT OR BELOW [altitude]", &[F::Position, F::Altitude]),
        45  => spec("EXPECT TO CROSS [position] AT AND MAINTAIN [altitude]", &[F::Position, F::Altitude]),
        46  => spec("CROSS [position] AT [altitude]", &[F::Position, F::Altitude]),
        47  => spec("CROSS [position] AT OR ABOVE [altitude]", &[F::Position, F::Altitude]),
        48  => spec("CROSS [position] AT OR BELOW [altitude]", &[F::Position, F::Altitude]),
        49  => spec("CROSS [position] AT AND MAINTAIN [altitude]", &[F::Position, F::Altitude]),
        50  => spec("CROSS [position] BETWEEN [altitude] AND [altitude]", &[F::Position, F::Altitude, F::Altitude]),
        51  => spec("CROSS [position] AT [time]", &[F::Position, F::Time]),
        52  => spec("CROSS [position] AT OR BEFORE [time]", &[F::Position, F::Time]),
        53  => spec("CROSS [position] AT OR AFTER [time]", &[F::Position, F::Time]),
        54  => spec("CROSS [position] BETWEEN [time] AND [time]", &[F::Position, F::Time, F::Time]),
        55  => spec("CROSS [position] AT [speed]", &[F::Position, F::Speed]),
        56  => spec("CROSS [position] AT OR LESS THAN [speed]", &[F::Position, F::Speed]),
        57  => spec("CROSS [position] AT OR GREATER THAN [speed]", &[F::Position, F::Speed]),
        58  => spec("CROSS [position] AT [time] AT [altitude]", &[F::Position, F::Time, F::Altitude]),
        59  => spec("CROSS [position] AT OR BEFORE [time] AT [altitude]", &[F::Position, F::Time, F::Altitude]),
        60  => spec("CROSS [position] AT OR AFTER [time] AT [altitude]", &[F::Position, F::Time, F::Altitude]),
        61  => spec("CROSS [position] AT AND MAINTAIN [altitude] AT [speed]", &[F::Position, F::Altitude, F::Speed]),
        62  => spec("AT [time] CROSS [position] AT AND MAINTAIN [altitude]", &[F::Time, F::Position, F::Altitude]),
        63  => spec("AT [time] CROSS [position] AT AND MAINTAIN [altitude] AT [speed]", &[F::Time, F::Position, F::Altitude, F::Speed]),
        64  => spec("OFFSET [distanceoffset] [direction] OF ROUTE", &[F::OffsetDirection]),
        65  => spec("AT [position] OFFSET [distanceoffset] [direction] OF ROUTE", &[F::Position, F::OffsetDirection]),
        66  => spec("AT [time] OFFSET [distanceoffset] [direction] OF ROUTE", &[F::Time, F::OffsetDirection]),
        67  => spec("PROCEED BACK ON ROUTE", &[]),
        68  => spec("REJOIN ROUTE BY [position]", &[F::Position]),
        69  => spec("REJOIN ROUTE BY [time]", &[F::Time]),
        70  => spec("EXPECT BACK ON ROUTE BY [position]", &[F::Position]),
        71  => spec("EXPECT BACK ON ROUTE BY [time]", &[F::Time]),
        72  => spec("RESUME OWN NAVIGATION", &[]),
        73  => spec("[departureclearance]", &[F::RouteClearance]),
        74  => spec("PROCEED DIRECT TO [position]", &[F::Position]),
        75  => spec("WHEN ABLE PROCEED DIRECT TO [position]", &[F::Position]),
        76  => spec("AT [time] PROCEED DIRECT TO [position]", &[F::Time, F::Position]),
        77  => spec("AT [position] PROCEED DIRECT TO [position]", &[F::Position, F::Position]),
        78  => spec("AT [altitude] PROCEED DIRECT TO [position]", &[F::Altitude, F::Position]),
        79  => spec("CLEARED TO [position] VIA [routeclearance]", &[F::Position, F::RouteClearance]),
        80  => spec("CLEARED [routeclearance]", &[F::RouteClearance]),
        81  => spec("CLEARED [procedurename]", &[F::Procedure]),
        82  => spec("CLEARED TO DEVIATE UP TO [distanceoffset] [direction] OF ROUTE", &[F::OffsetDirection]),
        83  => spec("AT [position] CLEARED [routeclearance]", &[F::Position, F::RouteClearance]),
        84  => spec("AT [position] CLEARED [procedurename]", &[F::Position, F::Procedure]),
        85  => spec("EXPECT [routeclearance]", &[F::RouteClearance]),
        86  => spec("AT [position] EXPECT [routeclearance]", &[F::Position, F::RouteClearance]),
        87  => spec("EXPECT DIRECT TO [position]", &[F::Position]),
        88  => spec("AT [position] EXPECT DIRECT TO [position]", &[F::Position, F::Position]),
        89  => spec("AT [time] EXPECT DIRECT TO [position]", &[F::Time, F::Position]),
        90  => spec("AT [altitude] EXPECT DIRECT TO [position]", &[F::Altitude, F::Position]),
        91  => spec("HOLD AT [position] MAINTAIN [altitude] INBOUND TRACK [degrees] [direction] TURN LEG TIME [legtime]", &[F::HoldClearance]),
        92  => spec("HOLD AT [position] AS PUBLISHED MAINTAIN [altitude]", &[F::Position, F::Altitude]),
        93  => spec("EXPECT FURTHER CLEARANCE AT [time]", &[F::Time]),
        94  => spec("TURN [direction] HEADING [degrees]", &[F::TurnDirection, F::Degrees]),
        95  => spec("TURN [direction] GROUND TRACK [degrees]", &[F::TurnDirection, F::Degrees]),
        96  => spec("CONTINUE PRESENT HEADING", &[]),
        97  => spec("AT [position] FLY HEADING [degrees]", &[F::Position, F::Degrees]),
        98  => spec("IMMEDIATELY TURN [direction] HEADING [degrees]", &[F::TurnDirection, F::Degrees]),
        99  => spec("EXPECT [procedurename]", &[F::Procedure]),
        100 => spec("AT [time] EXPECT [speed]", &[F::Time, F::Speed]),
        101 => spec("AT [position] EXPECT [speed]", &[F::Position, F::Speed]),
        102 => spec("AT [altitude] EXPECT [speed]", &[F::Altitude, F::Speed]),
        103 => spec("AT [time] EXPECT [speed] TO [speed]", &[F::Time, F::Speed, F::Speed]),
        104 => spec("AT [position] EXPECT [speed] TO [speed]", &[F::Position, F::Speed, F::Speed]),
        105 => spec("AT [altitude] EXPECT [speed] TO [speed]", &[F::Altitude, F::Speed, F::Speed]),
        106 => spec("MAINTAIN [speed]", &[F::Speed]),
        107 => spec("MAINTAIN PRESENT SPEED", &[]),
        108 => spec("MAINTAIN [speed] OR GREATER", &[F::Speed]),
        109 => spec("MAINTAIN [speed] OR LESS", &[F::Speed]),
        110 => spec("MAINTAIN [speed] TO [speed]", &[F::Speed, F::Speed]),
        111 => spec("INCREASE SPEED TO [speed]", &[F::Speed]),
        112 => spec("INCREASE SPEED TO [speed] OR GREATER", &[F::Speed]),
        113 => spec("REDUCE SPEED TO [speed]", &[F::Speed]),
        114 => spec("REDUCE SPEED TO [speed] OR LESS", &[F::Speed]),
        115 => spec("DO NOT EXCEED [speed]", &[F::Speed]),
        116 => spec("RESUME NORMAL SPEED", &[]),
        117 => spec("CONTACT [icaounitname] [frequency]", &[F::UnitName, F::Frequency]),
        118 => spec("AT [position] CONTACT [icaounitname] [frequency]", &[F::Position, F::UnitName, F::Frequency]),
        119 => spec("AT [time] CONTACT [icaounitname] [frequency]", &[F::Time, F::UnitName, F::Frequency]),
        120 => spec("MONITOR [icaounitname] [frequency]", &[F::UnitName, F::Frequency]),
        121 => spec("AT [position] MONITOR [icaounitname] [frequency]", &[F::Position, F::UnitName, F::Frequency]),
        122 => spec("AT [time] MONITOR [icaounitname] [frequency]", &[F::Time, F::UnitName, F::Frequency]),
        123 => spec("SQUAWK [beaconcode]", &[F::BeaconCode]),
        124 => spec("STOP SQUAWK", &[]),
        125 => spec("SQUAWK ALTITUDE", &[]),
        126 => spec("STOP ALTITUDE SQUAWK", &[]),
        127 => spec("REPORT BACK ON ROUTE", &[]),
        128 => spec("REPORT LEAVING [altitude]", &[F::Altitude]),
        129 => spec("REPORT LEVEL [altitude]", &[F::Altitude]),
        130 => spec("REPORT PASSING [position]", &[F::Position]),
        131 => spec("REPORT REMAINING FUEL AND SOULS ON BOARD", &[]),
        132 => spec("CONFIRM POSITION", &[]),
        133 => spec("CONFIRM ALTITUDE", &[]),
        134 => spec("CONFIRM SPEED", &[]),
        135 => spec("CONFIRM ASSIGNED ALTITUDE", &[]),
        136 => spec("CONFIRM ASSIGNED SPEED", &[]),
        137 => spec("CONFIRM ASSIGNED ROUTE", &[]),
        138 => spec("CONFIRM TIME OVER REPORTED WAYPOINT", &[]),
        139 => spec("CONFIRM REPORTED WAYPOINT", &[]),
        140 => spec("CONFIRM NEXT WAYPOINT", &[]),
        141 => spec("CONFIRM NEXT WAYPOINT ETA", &[]),
        142 => spec("CONFIRM ENSUING WAYPOINT", &[]),
        143 => spec("CONFIRM REQUEST", &[]),
        144 => spec("CONFIRM SQUAWK", &[]),
        145 => spec("CONFIRM HEADING", &[]),
        146 => spec("CONFIRM GROUND TRACK", &[]),
        147 => spec("REQUEST POSITION REPORT", &[]),
        148 => spec("WHEN CAN YOU ACCEPT [altitude]", &[F::Altitude]),
        149 => spec("CAN YOU ACCEPT [altitude] AT [position]", &[F::Altitude, F::Position]),
        150 => spec("CAN YOU ACCEPT [altitude] AT [time]", &[F::Altitude, F::Time]),
        151 => spec("WHEN CAN YOU ACCEPT [speed]", &[F::Speed]),
        152 => spec("WHEN CAN YOU ACCEPT [distanceoffset] [direction] OFFSET", &[F::OffsetDirection]),
        153 => spec("ALTIMETER [altimeter]", &[F::Altimeter]),
        154 => spec("RADAR SERVICES TERMINATED", &[]),
        155 => spec("RADAR CONTACT [position]", &[F::Position]),
        156 => spec("RADAR CONTACT LOST", &[]),
        157 => spec("CHECK STUCK MICROPHONE [frequency]", &[F::Frequency]),
        158 => spec("ATIS [atiscode]", &[F::AtisCode]),
        159 => spec("ERROR [errorinformation]", &[F::ErrorInfo]),
        160 => spec("NEXT DATA AUTHORITY [icaofacilitydesignation]", &[F::Facility]),
        161 => spec("END SERVICE", &[]),
        162 => spec("SERVICE UNAVAILABLE", &[]),
        163 => spec("[icaofacilitydesignation]", &[F::Facility]),
        164 => spec("WHEN READY", &[]),
        165 => spec("THEN", &[]),
        166 => spec("DUE TO TRAFFIC", &[]),
        167 => spec("DUE TO AIRSPACE RESTRICTION", &[]),
        168 => spec("DISREGARD", &[]),
        169 => spec("[freetext]", &[F::FreeText]),
        170 => spec("[freetext]", &[F::FreeText]),
        171 => spec("CLIMB AT [verticalrate] MINIMUM", &[F::VerticalRate]),
        172 => spec("CLIMB AT [verticalrate] MAXIMUM", &[F::VerticalRate]),
        173 => spec("DESCEND AT [verticalrate] MINIMUM", &[F::VerticalRate]),
        174 => spec("DESCEND AT [verticalrate] MAXIMUM", &[F::VerticalRate]),
        175 => spec("REPORT REACHING [altitude]", &[F::Altitude]),
        176 => spec("MAINTAIN OWN SEPARATION AND VMC", &[]),
        177 => spec("AT PILOTS DISCRETION", &[]),
        178 => spec("RESERVED", &[]),
        179 => spec("SQUAWK IDENT", &[]),
        180 => spec("REPORT REACHING BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        181 => spec("REPORT DISTANCE [tofrom] [position]", &[F::ToFrom, F::Position]),
        182 => spec("CONFIRM ATIS CODE", &[]),
        _ => return None,
    })
}

/// Look up a downlink (air → ground) element, ids 0..=128.
///
/// Ids above the FANS-1/A set are accepted by the CHOICE range but have
/// no schema here; the decoder fails them deterministically.
#[rustfmt::skip]
pub fn downlink_spec(id: u8) -> Option<ElementSpec> {
    Some(match id {
        0  => spec("WILCO", &[]),
        1  => spec("UNABLE", &[]),
        2  => spec("STANDBY", &[]),
        3  => spec("ROGER", &[]),
        4  => spec("AFFIRM", &[]),
        5  => spec("NEGATIVE", &[]),
        6  => spec("REQUEST [altitude]", &[F::Altitude]),
        7  => spec("REQUEST BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        8  => spec("REQUEST CRUISE CLIMB TO [altitude]", &[F::Altitude]),
        9  => spec("REQUEST CLIMB TO [altitude]", &[F::Altitude]),
        10 => spec("REQUEST DESCENT TO [altitude]", &[F::Altitude]),
        11 => spec("AT [position] REQUEST CLIMB TO [altitude]", &[F::Position, F::Altitude]),
        12 => spec("AT [position] REQUEST DESCENT TO [altitude]", &[F::Position, F::Altitude]),
        13 => spec("AT [time] REQUEST CLIMB TO [altitude]", &[F::Time, F::Altitude]),
        14 => spec("AT [time] REQUEST DESCENT TO [altitude]", &[F::Time, F::Altitude]),
        15 => spec("REQUEST OFFSET [distanceoffset] [direction] OF ROUTE", &[F::OffsetDirection]),
        16 => spec("AT [position] REQUEST OFFSET [distanceoffset] [direction] OF ROUTE", &[F::Position, F::OffsetDirection]),
        17 => spec("AT [time] REQUEST OFFSET [distanceoffset] [direction] OF ROUTE", &[F::Time, F::OffsetDirection]),
        18 => spec("REQUEST [speed]", &[F::Speed]),
        19 => spec("REQUEST [speed] TO [speed]", &[F::Speed, F::Speed]),
        20 => spec("REQUEST VOICE CONTACT", &[]),
        21 => spec("REQUEST VOICE CONTACT [frequency]", &[F::Frequency]),
        22 => spec("REQUEST DIRECT TO [position]", &[F::Position]),
        23 => spec("REQUEST [procedurename]", &[F::Procedure]),
        24 => spec("REQUEST [routeclearance]", &[F::RouteClearance]),
        25 => spec("REQUEST CLEARANCE", &[]),
        26 => spec("REQUEST WEATHER DEVIATION TO [position] VIA [routeclearance]", &[F::Position, F::RouteClearance]),
        27 => spec("REQUEST WEATHER DEVIATION UP TO [distanceoffset] [direction] OF ROUTE", &[F::OffsetDirection]),
        28 => spec("LEAVING [altitude]", &[F::Altitude]),
        29 => spec("CLIMBING TO [altitude]", &[F::Altitude]),
        30 => spec("DESCENDING TO [altitude]", &[F::Altitude]),
        31 => spec("PASSING [position]", &[F::Position]),
        32 => spec("PRESENT ALTITUDE [altitude]", &[F::Altitude]),
        33 => spec("PRESENT POSITION [position]", &[F::Position]),
        34 => spec("PRESENT SPEED [speed]", &[F::Speed]),
        35 => spec("PRESENT HEADING [degrees]", &[F::Degrees]),
        36 => spec("PRESENT GROUND TRACK [degrees]", &[F::Degrees]),
        37 => spec("LEVEL [altitude]", &[F::Altitude]),
        38 => spec("ASSIGNED ALTITUDE [altitude]", &[F::Altitude]),
        39 => spec("ASSIGNED SPEED [speed]", &[F::Speed]),
        40 => spec("ASSIGNED ROUTE [routeclearance]", &[F::RouteClearance]),
        41 => spec("BACK ON ROUTE", &[]),
        42 => spec("NEXT WAYPOINT [position]", &[F::Position]),
        43 => spec("NEXT WAYPOINT ETA [time]", &[F::Time]),
        44 => spec("ENSUING WAYPOINT [position]", &[F::Position]),
        45 => spec("REPORTED WAYPOINT [position]", &[F::Position]),
        46 => spec("REPORTED WAYPOINT [time]", &[F::Time]),
        47 => spec("SQUAWKING [beaconcode]", &[F::BeaconCode]),
        48 => spec("POSITION REPORT [positionreport]", &[F::PositionReport]),
        49 => spec("WHEN CAN WE EXPECT [speed]", &[F::Speed]),
        50 => spec("WHEN CAN WE EXPECT [speed] TO [speed]", &[F::Speed, F::Speed]),
        51 => spec("WHEN CAN WE EXPECT BACK ON ROUTE", &[]),
        52 => spec("WHEN CAN WE EXPECT LOWER ALTITUDE", &[]),
        53 => spec("WHEN CAN WE EXPECT HIGHER ALTITUDE", &[]),
        54 => spec("WHEN CAN WE EXPECT CRUISE CLIMB TO [altitude]", &[F::Altitude]),
        55 => spec("PAN PAN PAN", &[]),
        56 => spec("MAYDAY MAYDAY MAYDAY", &[]),
        57 => spec("[remainingfuel] OF FUEL REMAINING AND [remainingsouls] SOULS ON BOARD", &[F::FuelRemaining, F::PersonsOnBoard]),
        58 => spec("CANCEL EMERGENCY", &[]),
        59 => spec("DIVERTING TO [position] VIA [routeclearance]", &[F::Position, F::RouteClearance]),
        60 => spec("OFFSETTING [distanceoffset] [direction] OF ROUTE", &[F::OffsetDirection]),
        61 => spec("DESCENDING TO [altitude]", &[F::Altitude]),
        62 => spec("ERROR [errorinformation]", &[F::ErrorInfo]),
        63 => spec("NOT CURRENT DATA AUTHORITY", &[]),
        64 => spec("[icaofacilitydesignation]", &[F::Facility]),
        65 => spec("DUE TO WEATHER", &[]),
        66 => spec("DUE TO AIRCRAFT PERFORMANCE", &[]),
        67 => spec("[freetext]", &[F::FreeText]),
        68 => spec("[freetext]", &[F::FreeText]),
        69 => spec("REQUEST VMC DESCENT", &[]),
        70 => spec("REQUEST HEADING [degrees]", &[F::Degrees]),
        71 => spec("REQUEST GROUND TRACK [degrees]", &[F::Degrees]),
        72 => spec("REACHING [altitude]", &[F::Altitude]),
        73 => spec("[version]", &[F::Version]),
        74 => spec("REQUEST TO MAINTAIN OWN SEPARATION AND VMC", &[]),
        75 => spec("AT PILOTS DISCRETION", &[]),
        76 => spec("REACHING BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        77 => spec("ASSIGNED BLOCK [altitude] TO [altitude]", &[F::Altitude, F::Altitude]),
        78 => spec("AT [time] [distance] [tofrom] [position]", &[F::Time, F::Distance, F::ToFrom, F::Position]),
        79 => spec("ATIS [atiscode]", &[F::AtisCode]),
        80 => spec("DEVIATING [distanceoffset] [direction] OF ROUTE", &[F::OffsetDirection]),
        81 => spec("WE CAN ACCEPT [altitude] AT [time]", &[F::Altitude, F::Time]),
        82 => spec("WE CANNOT ACCEPT [altitude]", &[F::Altitude]),
        83 => spec("WE CAN ACCEPT [speed] AT [time]", &[F::Speed, F::Time]),
        84 => spec("WE CANNOT ACCEPT [speed]", &[F::Speed]),
        85 => spec("WE CAN ACCEPT [distanceoffset] [direction] AT [time]", &[F::OffsetDirection, F::Time]),
        86 => spec("WE CANNOT ACCEPT [distanceoffset] [direction]", &[F::OffsetDirection]),
        87 => spec("WHEN CAN WE EXPECT CLIMB TO [altitude]", &[F::Altitude]),
        88 => spec("WHEN CAN WE EXPECT DESCENT TO [altitude]", &[F::Altitude]),
        89 => spec("MONITORING [icaounitname] [frequency]", &[F::UnitName, F::Frequency]),
        98 => spec("[freetext]", &[F::FreeText]),
        100 => spec("LOGICAL ACKNOWLEDGEMENT", &[]),
        _ => return None,
    })
}

/// The downlink ids the FANS-1/A set defines with a NULL payload.
pub const DOWNLINK_NULL_IDS: &[u8] = &[
    0, 1, 2, 3, 4, 5, 20, 25, 41, 51, 52, 53, 55, 56, 58, 63, 65, 66, 69, 74, 75,
];

/// The uplink ids the FANS-1/A set defines with a NULL payload.
pub const UPLINK_NULL_IDS: &[u8] = &[
    0, 1, 2, 3, 4, 5, 67, 72, 96, 107, 116, 124, 125, 126, 127, 131, 132, 133, 134, 135, 136,
    137, 138, 139, 140, 141, 142, 143, 144, 145, 146, 147, 154, 156, 161, 162, 164, 165, 166,
    167, 168, 176, 177, 178, 179, 182,
];

/// Maximum valid uplink element id.
pub const UPLINK_MAX_ID: u8 = 182;
/// Maximum valid downlink element id.
pub const DOWNLINK_MAX_ID: u8 = 128;

/// Enumerated error reasons for the `[errorinformation]` payload.
pub const ERROR_REASONS: &[&str] = &[
    "APPLICATION ERROR",
    "DUPLICATE MESSAGE IDENTIFICATION NUMBER",
    "UNRECOGNIZED MESSAGE REFERENCE NUMBER",
    "END SERVICE WITH PENDING MESSAGES",
    "END SERVICE WITH NO VALID RESPONSE",
    "INSUFFICIENT RESOURCES",
    "INVALID RESPONSE",
    "COMMANDED TERMINATION",
    "INSUFFICIENT DATA",
    "UNEXPECTED DATA",
    "INVALID DATA",
    "RESERVED",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_ids_have_empty_field_lists() {
        for &id in DOWNLINK_NULL_IDS {
            let spec = downlink_spec(id).expect("NULL downlink id must be in catalog");
            assert!(spec.fields.is_empty(), "downlink {id} should be NULL");
        }
        for &id in UPLINK_NULL_IDS {
            let spec = uplink_spec(id).expect("NULL uplink id must be in catalog");
            assert!(spec.fields.is_empty(), "uplink {id} should be NULL");
        }
    }

    #[test]
    fn full_uplink_alphabet_is_cataloged() {
        for id in 0..=UPLINK_MAX_ID {
            assert!(uplink_spec(id).is_some(), "uplink {id} missing");
        }
        assert!(uplink_spec(183).is_none());
    }

    #[test]
    fn deviating_offset_is_downlink_80() {
        let spec = downlink_spec(80).unwrap();
        assert_eq!(spec.label, "DEVIATING [distanceoffset] [direction] OF ROUTE");
        assert_eq!(spec.fields, &[Field::OffsetDirection]);
    }

    #[test]
    fn downlink_78_is_wired() {
        let spec = downlink_spec(78).unwrap();
        assert_eq!(
            spec.fields,
            &[Field::Time, Field::Distance, Field::ToFrom, Field::Position]
        );
    }

    #[test]
    fn position_report_is_downlink_48() {
        let spec = downlink_spec(48).unwrap();
        assert_eq!(spec.fields, &[Field::PositionReport]);
    }
}
