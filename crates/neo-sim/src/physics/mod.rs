//! Building Physics
//!
//! First-order model of one office building: an air handler serving six VAV
//! zones, a chiller plant and the main electrical service.
//!
//! The model is advanced one tick at a time by [`BuildingState::update`],
//! which runs the control loops in a fixed order:
//! occupancy, outdoor air, air handler, zones, chiller, power.

mod clock;
mod loops;
mod noise;
mod state;

pub use clock::{Clock, FixedClock, SystemClock, is_business_hours};
pub use loops::{chiller_power_kw, fan_power_kw, reheat_power_kw};
pub use noise::Noise;
pub use state::{BuildingState, StateField, ZONE_COUNT, ZoneState};
