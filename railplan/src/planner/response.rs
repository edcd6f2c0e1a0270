//! Response shaping for the planner.
//!
//! Everything the planner hands back is a plain serializable record: times
//! as canonical `HHMM` strings, durations as `"{h}h {m}m"` strings. Callers
//! wrap these in whatever transport they like.

use serde::Serialize;

use crate::domain::format_duration;
use crate::graph::LegEdge;

use super::itinerary::{Itinerary, ItineraryLeg};
use super::plan::RouteQuery;

/// A single-train route from source to destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectRoute {
    pub train_number: String,
    pub train_name: String,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub total_journey_time: String,
    pub from_day: u8,
    pub to_day: u8,
}

impl DirectRoute {
    pub(crate) fn from_edge(edge: &LegEdge) -> Self {
        Self {
            train_number: edge.train_number.to_string(),
            train_name: edge.train_name.clone(),
            from_station: edge.from_station.to_string(),
            to_station: edge.to_station.to_string(),
            departure_time: edge.departure.to_string(),
            arrival_time: edge.arrival.to_string(),
            total_journey_time: format_duration(edge.ride_minutes()),
            from_day: edge.from_day,
            to_day: edge.to_day,
        }
    }
}

/// One leg of a multi-hop route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLeg {
    pub leg_number: u32,
    pub train_number: String,
    pub train_name: String,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: String,
    pub arrival_time: String,
    /// Wait before boarding this leg. Absent on the first leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layover_before_this_leg: Option<String>,
}

impl RouteLeg {
    fn from_leg(leg: &ItineraryLeg) -> Self {
        Self {
            leg_number: leg.leg_number,
            train_number: leg.train_number.to_string(),
            train_name: leg.train_name.clone(),
            from_station: leg.from_station.to_string(),
            to_station: leg.to_station.to_string(),
            departure_time: leg.departure.to_string(),
            arrival_time: leg.arrival.to_string(),
            layover_before_this_leg: leg.layover_before.map(format_duration),
        }
    }
}

/// A validated multi-train route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiHopRoute {
    pub total_hops: usize,
    pub total_journey_time: String,
    pub intermediate_stations: Vec<String>,
    pub legs: Vec<RouteLeg>,
}

impl MultiHopRoute {
    pub(crate) fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            total_hops: itinerary.total_hops,
            total_journey_time: format_duration(itinerary.total_minutes),
            intermediate_stations: itinerary
                .intermediate_stations
                .iter()
                .map(|s| s.to_string())
                .collect(),
            legs: itinerary.legs.iter().map(RouteLeg::from_leg).collect(),
        }
    }
}

/// The query echo and counts attached to every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub from_station: String,
    pub to_station: String,
    pub journey_date: String,
    pub total_direct_routes: usize,
    pub total_multi_hop_routes: usize,
    pub total_routes: usize,
}

/// Everything the planner found for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResponse {
    pub direct_routes: Vec<DirectRoute>,
    pub multi_hop_routes: Vec<MultiHopRoute>,
    pub summary: PlanSummary,
}

impl PlanResponse {
    pub(crate) fn new(
        query: &RouteQuery,
        direct_routes: Vec<DirectRoute>,
        multi_hop_routes: Vec<MultiHopRoute>,
    ) -> Self {
        let summary = PlanSummary {
            from_station: query.from_station.to_string(),
            to_station: query.to_station.to_string(),
            journey_date: query.journey_date.format("%Y-%m-%d").to_string(),
            total_direct_routes: direct_routes.len(),
            total_multi_hop_routes: multi_hop_routes.len(),
            total_routes: direct_routes.len() + multi_hop_routes.len(),
        };
        Self {
            direct_routes,
            multi_hop_routes,
            summary,
        }
    }

    /// A response with no routes at all, echoing the query.
    pub fn empty(query: &RouteQuery) -> Self {
        Self::new(query, Vec::new(), Vec::new())
    }

    /// Whether the response carries no routes.
    pub fn is_empty(&self) -> bool {
        self.summary.total_routes == 0
    }
}
