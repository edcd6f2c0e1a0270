//! Multi-leg route planner.
//!
//! This module answers: "how do I get from here to there on this date?"
//! It enumerates simple station paths over the ride graph with a bounded
//! breadth-first search, expands each path into concrete itineraries that
//! respect transfer-wait bounds, and shapes the result into a serializable
//! response.

mod config;
mod itinerary;
mod paths;
mod plan;
mod response;

pub use config::PlannerConfig;
pub use itinerary::{Itinerary, ItineraryLeg, build_itineraries};
pub use paths::{StationPath, enumerate_paths};
pub use plan::{
    DEFAULT_MAX_HOPS, DEFAULT_MAX_LAYOVER_MINUTES, DEFAULT_MIN_LAYOVER_MINUTES, PlanError,
    RoutePlanner, RouteQuery, plan_with_graph,
};
pub use response::{DirectRoute, MultiHopRoute, PlanResponse, PlanSummary, RouteLeg};
