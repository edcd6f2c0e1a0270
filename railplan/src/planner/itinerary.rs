//! Itinerary assembly and validation.
//!
//! A station path says nothing about which trains to ride. This module
//! enumerates the cartesian product of candidate rides over a path, collapses
//! consecutive rides on the same train into one leg ("stay seated"), and
//! checks the layover at every real transfer. Only combinations that survive
//! come out as itineraries.

use tracing::warn;

use crate::domain::{SchedTime, StationCode, TrainNumber, span_minutes};
use crate::graph::{LegEdge, StationPairGraph};

use super::paths::StationPath;

/// One boarded train within an itinerary.
///
/// A leg may cover several path edges when the same train serves them
/// back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryLeg {
    /// Position in the itinerary, starting at 1.
    pub leg_number: u32,
    /// Train ridden.
    pub train_number: TrainNumber,
    /// Display name of the train.
    pub train_name: String,
    /// Boarding station.
    pub from_station: StationCode,
    /// Alighting station.
    pub to_station: StationCode,
    /// Scheduled departure from the boarding station.
    pub departure: SchedTime,
    /// Scheduled arrival at the alighting station.
    pub arrival: SchedTime,
    /// Day of the train's run at boarding (1-based).
    pub from_day: u8,
    /// Day of the train's run at alighting (1-based).
    pub to_day: u8,
    /// Minutes waited at the boarding station after the previous train.
    /// `None` on the first leg.
    pub layover_before: Option<i64>,
}

/// A validated journey along one station path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// Number of path edges this was built from, before collapse.
    pub total_hops: usize,
    /// Minutes from first departure to final arrival.
    pub total_minutes: i64,
    /// Stations passed through between source and destination.
    pub intermediate_stations: Vec<StationCode>,
    /// Boarded trains, in riding order.
    pub legs: Vec<ItineraryLeg>,
}

/// Build every valid itinerary for `path`.
///
/// Transfers must wait between `min_layover` and `max_layover` minutes
/// (inclusive); staying on the same train needs no wait at all. The cap
/// bounds how many ride combinations are evaluated for this path; when it
/// bites, the remainder is dropped with a warning rather than an error.
pub fn build_itineraries(
    graph: &StationPairGraph,
    path: &StationPath,
    min_layover: i64,
    max_layover: i64,
    combination_cap: Option<usize>,
) -> Vec<Itinerary> {
    let candidates: Vec<&[LegEdge]> = path
        .iter()
        .map(|(from, to)| graph.edges_between(from, to))
        .collect();
    if candidates.is_empty() || candidates.iter().any(|c| c.is_empty()) {
        return Vec::new();
    }

    let mut itineraries = Vec::new();
    let mut indices = vec![0usize; candidates.len()];
    let mut evaluated = 0usize;

    'combinations: loop {
        if let Some(cap) = combination_cap {
            if evaluated >= cap {
                warn!(
                    hops = path.len(),
                    cap, "combination cap reached, dropping remaining combinations"
                );
                break;
            }
        }
        evaluated += 1;

        if let Some(itinerary) = assemble(&candidates, &indices, path, min_layover, max_layover) {
            itineraries.push(itinerary);
        }

        // Advance the rightmost index; carry leftwards on overflow.
        let mut slot = indices.len();
        loop {
            if slot == 0 {
                break 'combinations;
            }
            slot -= 1;
            indices[slot] += 1;
            if indices[slot] < candidates[slot].len() {
                break;
            }
            indices[slot] = 0;
        }
    }

    itineraries
}

/// Validate one ride combination and assemble its legs.
fn assemble(
    candidates: &[&[LegEdge]],
    indices: &[usize],
    path: &StationPath,
    min_layover: i64,
    max_layover: i64,
) -> Option<Itinerary> {
    let mut legs: Vec<ItineraryLeg> = Vec::new();

    for (slot, &choice) in indices.iter().enumerate() {
        let edge = &candidates[slot][choice];

        match legs.last_mut() {
            Some(prev) if prev.train_number == edge.train_number => {
                // Stay seated: the ride continues on the same train.
                prev.to_station = edge.to_station;
                prev.arrival = edge.arrival;
                prev.to_day = edge.to_day;
            }
            Some(prev) => {
                // Layovers are intra-day: each train's day offsets count
                // from its own first day, so they cannot be compared
                // across trains.
                let gap = i64::from(edge.departure.minutes_from_midnight())
                    - i64::from(prev.arrival.minutes_from_midnight());
                if gap < min_layover || gap > max_layover {
                    return None;
                }
                legs.push(leg_from_edge(edge, legs.len() as u32 + 1, Some(gap)));
            }
            None => legs.push(leg_from_edge(edge, 1, None)),
        }
    }

    // Total journey time is the sum of time on trains and time waiting
    // between them. Summing per leg keeps the total right even when a leg
    // crosses midnight and the next train's day axis restarts at 1.
    let mut total_minutes: i64 = 0;
    for leg in &legs {
        let ride = span_minutes(leg.departure, leg.from_day, leg.arrival, leg.to_day);
        if ride < 0 {
            return None;
        }
        total_minutes += ride + leg.layover_before.unwrap_or(0);
    }
    if total_minutes < 0 {
        return None;
    }

    let intermediate_stations = path[..path.len() - 1].iter().map(|(_, to)| *to).collect();

    Some(Itinerary {
        total_hops: path.len(),
        total_minutes,
        intermediate_stations,
        legs,
    })
}

fn leg_from_edge(edge: &LegEdge, leg_number: u32, layover_before: Option<i64>) -> ItineraryLeg {
    ItineraryLeg {
        leg_number,
        train_number: edge.train_number,
        train_name: edge.train_name.clone(),
        from_station: edge.from_station,
        to_station: edge.to_station,
        departure: edge.departure,
        arrival: edge.arrival,
        from_day: edge.from_day,
        to_day: edge.to_day,
        layover_before,
    }
}
