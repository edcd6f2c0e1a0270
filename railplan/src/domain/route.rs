//! Train routes: ordered stop sequences with scheduled times.

use super::station::StationCode;
use super::time::SchedTime;
use super::train::TrainIdentity;

/// Error returned when a stop sequence cannot form a valid route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed route: {reason}")]
pub struct MalformedRoute {
    reason: &'static str,
}

/// One scheduled stop in a train's route.
///
/// Terminal stops legitimately miss one time: the origin has no scheduled
/// arrival and the final stop has no scheduled departure. Technical stops
/// where passengers cannot board or alight carry `is_halt = false` and never
/// become graph edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub station_code: StationCode,
    pub station_name: String,
    pub scheduled_arrival: Option<SchedTime>,
    pub scheduled_departure: Option<SchedTime>,
    /// 1-based day of the train's run on which this stop occurs.
    pub day_offset: u8,
    pub is_halt: bool,
}

/// A train's validated route: its identity plus an ordered stop sequence.
///
/// Construction enforces the route invariants — at least two stops, 1-based
/// day offsets that never decrease along the sequence — so downstream code
/// can trust any `TrainRoute` it is handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRoute {
    identity: TrainIdentity,
    stops: Vec<Stop>,
}

impl TrainRoute {
    /// Build a route from an ordered stop sequence.
    pub fn new(identity: TrainIdentity, stops: Vec<Stop>) -> Result<Self, MalformedRoute> {
        if stops.len() < 2 {
            return Err(MalformedRoute {
                reason: "fewer than two stops",
            });
        }

        for stop in &stops {
            if stop.day_offset < 1 {
                return Err(MalformedRoute {
                    reason: "day offsets are 1-based",
                });
            }
        }

        if stops.windows(2).any(|w| w[1].day_offset < w[0].day_offset) {
            return Err(MalformedRoute {
                reason: "day offsets decrease along the route",
            });
        }

        Ok(Self { identity, stops })
    }

    /// The train this route belongs to.
    pub fn identity(&self) -> &TrainIdentity {
        &self.identity
    }

    /// All stops in order, including non-halts.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The stops where passengers can board or alight, in order.
    pub fn halted_stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(|s| s.is_halt)
    }
}
