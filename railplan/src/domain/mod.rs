//! Domain types for the route planner.
//!
//! This module contains the core domain model types that represent
//! validated catalog data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod route;
mod station;
mod time;
mod train;

pub use route::{MalformedRoute, Stop, TrainRoute};
pub use station::{InvalidStationCode, StationCode};
pub use time::{
    NormalizedTime, SchedTime, TimeError, duration_between, format_duration, span_minutes,
};
pub use train::{InvalidTrainNumber, TrainIdentity, TrainNumber};
