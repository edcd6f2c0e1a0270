//! Route planning over the station-pair graph.
//!
//! Takes a validated query, enumerates station paths, expands them into
//! concrete rides, and shapes the result into a response. The graph itself
//! is built (or reused) per journey date by [`RoutePlanner`];
//! [`plan_with_graph`] is the synchronous core that works on any graph.

use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{GraphCache, GraphKey};
use crate::catalog::CatalogSource;
use crate::domain::StationCode;
use crate::graph::{BuildError, GraphBuilder, StationPairGraph};

use super::config::PlannerConfig;
use super::itinerary::build_itineraries;
use super::paths::enumerate_paths;
use super::response::{DirectRoute, MultiHopRoute, PlanResponse};

/// Default maximum number of rides per itinerary.
pub const DEFAULT_MAX_HOPS: usize = 2;

/// Default minimum transfer wait, in minutes.
pub const DEFAULT_MIN_LAYOVER_MINUTES: i64 = 30;

/// Default maximum transfer wait, in minutes.
pub const DEFAULT_MAX_LAYOVER_MINUTES: i64 = 360;

/// Error from route planning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// The query cannot be planned as posed.
    #[error("invalid request: {reason}")]
    InvalidArgument { reason: String },

    /// The catalog could not supply the data needed to build a graph.
    #[error("catalog unavailable: {message}")]
    CatalogUnavailable { message: String },
}

/// A request to plan routes between two stations on a date.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    /// Origin station.
    pub from_station: StationCode,

    /// Destination station.
    pub to_station: StationCode,

    /// Date the journey starts.
    pub journey_date: NaiveDate,

    /// Maximum number of rides per itinerary.
    pub max_hops: usize,

    /// Minimum transfer wait, in minutes.
    pub min_layover_minutes: i64,

    /// Maximum transfer wait, in minutes.
    pub max_layover_minutes: i64,
}

impl RouteQuery {
    /// Create a query with default hop and layover bounds.
    pub fn new(from_station: StationCode, to_station: StationCode, journey_date: NaiveDate) -> Self {
        Self {
            from_station,
            to_station,
            journey_date,
            max_hops: DEFAULT_MAX_HOPS,
            min_layover_minutes: DEFAULT_MIN_LAYOVER_MINUTES,
            max_layover_minutes: DEFAULT_MAX_LAYOVER_MINUTES,
        }
    }

    /// Parse a query from raw strings.
    ///
    /// Station codes are validated and uppercased; the date must be
    /// `YYYY-MM-DD`.
    pub fn parse(from: &str, to: &str, journey_date: &str) -> Result<Self, PlanError> {
        let from_station = StationCode::parse(from).map_err(|e| PlanError::InvalidArgument {
            reason: format!("from_station: {e}"),
        })?;
        let to_station = StationCode::parse(to).map_err(|e| PlanError::InvalidArgument {
            reason: format!("to_station: {e}"),
        })?;
        let journey_date = NaiveDate::parse_from_str(journey_date, "%Y-%m-%d").map_err(|_| {
            PlanError::InvalidArgument {
                reason: format!("journey_date: expected YYYY-MM-DD, got {journey_date:?}"),
            }
        })?;

        Ok(Self::new(from_station, to_station, journey_date))
    }

    /// Set the maximum number of rides per itinerary.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Set the transfer wait bounds, in minutes (inclusive).
    pub fn with_layover_bounds(mut self, min: i64, max: i64) -> Self {
        self.min_layover_minutes = min;
        self.max_layover_minutes = max;
        self
    }

    /// Validate the query.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.max_hops == 0 {
            return Err(PlanError::InvalidArgument {
                reason: "max_hops must be at least 1".to_string(),
            });
        }
        if self.min_layover_minutes > self.max_layover_minutes {
            return Err(PlanError::InvalidArgument {
                reason: format!(
                    "layover bounds are inverted: min {} > max {}",
                    self.min_layover_minutes, self.max_layover_minutes
                ),
            });
        }
        if self.from_station == self.to_station {
            return Err(PlanError::InvalidArgument {
                reason: "origin and destination are the same station".to_string(),
            });
        }

        Ok(())
    }
}

/// Plan routes for `query` over an already-built graph.
///
/// Single-ride paths become direct routes, sorted by departure time then
/// train number. Longer paths are expanded into itineraries and sorted by
/// total journey time, then hop count, then first departure. A destination
/// the graph cannot reach yields an empty response, not an error.
pub fn plan_with_graph(
    graph: &StationPairGraph,
    query: &RouteQuery,
    max_combinations: Option<usize>,
) -> Result<PlanResponse, PlanError> {
    query.validate()?;

    let paths = enumerate_paths(graph, query.from_station, query.to_station, query.max_hops);

    let mut direct = Vec::new();
    let mut itineraries = Vec::new();
    for path in &paths {
        if let [(from, to)] = path.as_slice() {
            direct.extend(graph.edges_between(from, to));
        } else {
            itineraries.extend(build_itineraries(
                graph,
                path,
                query.min_layover_minutes,
                query.max_layover_minutes,
                max_combinations,
            ));
        }
    }

    direct.sort_by_key(|edge| (edge.departure.minutes_from_midnight(), edge.train_number));
    itineraries.sort_by_key(|itinerary| {
        let first_ride = itinerary
            .legs
            .first()
            .map(|leg| (leg.departure.minutes_from_midnight(), leg.train_number));
        (itinerary.total_minutes, itinerary.total_hops, first_ride)
    });

    let direct_routes = direct.iter().map(|edge| DirectRoute::from_edge(edge)).collect();
    let multi_hop_routes = itineraries.iter().map(MultiHopRoute::from_itinerary).collect();

    Ok(PlanResponse::new(query, direct_routes, multi_hop_routes))
}

/// Route planner that owns a catalog source and a graph cache.
///
/// Graphs are cached per (journey date, train-universe cap); concurrent
/// queries for the same date share one build.
pub struct RoutePlanner<C: CatalogSource> {
    catalog: C,
    config: PlannerConfig,
    cache: GraphCache,
}

impl<C: CatalogSource> RoutePlanner<C> {
    /// Create a planner with default configuration.
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, PlannerConfig::default())
    }

    /// Create a planner with explicit configuration.
    pub fn with_config(catalog: C, config: PlannerConfig) -> Self {
        let cache = GraphCache::new(&config.cache);
        Self {
            catalog,
            config,
            cache,
        }
    }

    /// Plan routes for `query`, building or reusing the graph for its date.
    ///
    /// A date with no usable train legs yields an empty response; a catalog
    /// that cannot even be listed is an error.
    pub async fn find_routes(&self, query: &RouteQuery) -> Result<PlanResponse, PlanError> {
        query.validate()?;

        let key: GraphKey = (query.journey_date, self.config.build.max_trains);
        let built = self
            .cache
            .get_or_build(key, async {
                GraphBuilder::new(&self.catalog, &self.config.build)
                    .build(query.journey_date)
                    .await
                    .map(|outcome| outcome.graph)
            })
            .await;

        let graph = match built {
            Ok(graph) => graph,
            Err(err) => match err.as_ref() {
                BuildError::EmptyGraph { journey_date, .. } => {
                    debug!(%journey_date, "no usable graph for date, returning empty response");
                    return Ok(PlanResponse::empty(query));
                }
                other => {
                    return Err(PlanError::CatalogUnavailable {
                        message: other.to_string(),
                    });
                }
            },
        };

        plan_with_graph(&graph, query, self.config.max_combinations)
    }

    /// Number of cached graphs.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached graph, forcing a rebuild on the next query.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
