#![deny(missing_docs)]

//! # Flightwire Models
//!
//! Core data types for the flightwire ACARS extraction pipeline.
//!
//! ## Data flow
//!
//! ```text
//! AcarsMessage (decoded feed line)
//! └── ParserResult (one per matching parser)
//!     ├── Cpdlc / Pdc / Loadsheet / Weather / Label17 / …
//!     └── extracted into
//!         ├── FlightUpdate  → FlightState (per-aircraft)
//!         ├── WaypointUpdate → reference store
//!         └── AtisReport    → atis_current / atis_history
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | The `AcarsMessage` input unit and its envelope metadata |
//! | [`result`] | The `ParserResult` sum type and per-parser payloads |
//! | [`cpdlc`] | Decoded CPDLC message structures and element values |
//! | [`flight`] | Per-flight aggregate state and update records |
//! | [`reference`] | Aircraft / waypoint / route reference records |
//! | [`atis`] | Current-and-history ATIS records |
//! | [`identity`] | Validated airport codes, flight numbers, registrations |

pub mod atis;
pub mod cpdlc;
pub mod error;
pub mod flight;
pub mod identity;
pub mod message;
pub mod reference;
pub mod result;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `flightwire_models::AcarsMessage` directly.
pub use atis::*;
pub use cpdlc::*;
pub use error::*;
pub use flight::*;
pub use identity::*;
pub use message::*;
pub use reference::*;
pub use result::*;
