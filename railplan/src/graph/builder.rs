//! Station-pair graph construction.
//!
//! Builds the planning graph for one journey date: list the train universe,
//! fetch each train's route in parallel batches, then merge serially in
//! listing order so the same catalog data always produces the same graph.
//! Each route contributes one edge per consecutive pair of halting stops;
//! non-halt technical stops are bridged over.

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info};

use crate::catalog::{CatalogError, CatalogSource};
use crate::domain::{Stop, TrainRoute, span_minutes};

use super::model::{LegEdge, StationPairGraph};

/// Configuration for a graph build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Cap on the number of trains fetched from the catalog.
    /// Trains past the cap are dropped from the universe.
    pub max_trains: usize,

    /// Number of route fetches to run in parallel.
    pub batch_size: usize,
}

impl BuildConfig {
    /// Set the train-universe cap.
    pub fn with_max_trains(mut self, n: usize) -> Self {
        self.max_trains = n;
        self
    }

    /// Set the route-fetch batch size.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_trains: 1000,
            batch_size: 16,
        }
    }
}

/// Counters from one graph build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Trains in the catalog listing, before the universe cap.
    pub trains_listed: usize,
    /// Routes fetched and converted successfully.
    pub routes_fetched: usize,
    /// Trains the catalog had no route for on this date.
    pub trains_not_found: usize,
    /// Routes present but unusable, including routes with fewer than
    /// two halting stops.
    pub malformed_routes: usize,
    /// Transport-level failures on individual trains.
    pub fetch_failures: usize,
    /// Edges inserted into the graph.
    pub edges_emitted: usize,
    /// Halt pairs skipped for a missing time, identical stations, or an
    /// arrival before the departure.
    pub edges_skipped: usize,
    /// Edges discarded because the (pair, train) slot was already taken.
    pub duplicate_edges_discarded: usize,
}

/// Error from a graph build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The build completed with zero edges.
    #[error("no usable train legs for {journey_date}")]
    EmptyGraph {
        journey_date: NaiveDate,
        stats: BuildStats,
    },

    /// The catalog listing failed outright.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result of a successful graph build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The completed graph. Has at least one edge.
    pub graph: StationPairGraph,
    /// What the build saw along the way.
    pub stats: BuildStats,
}

/// Builds the station-pair graph for a journey date.
pub struct GraphBuilder<'a, C: CatalogSource> {
    catalog: &'a C,
    config: &'a BuildConfig,
}

impl<'a, C: CatalogSource> GraphBuilder<'a, C> {
    /// Create a new builder.
    pub fn new(catalog: &'a C, config: &'a BuildConfig) -> Self {
        Self { catalog, config }
    }

    /// Build the graph for `journey_date`.
    ///
    /// Per-train failures are counted and skipped; the build only fails when
    /// the listing itself fails or no train contributes a single edge.
    pub async fn build(&self, journey_date: NaiveDate) -> Result<BuildOutcome, BuildError> {
        let mut stats = BuildStats::default();

        let mut trains = self.catalog.list_trains().await?;
        stats.trains_listed = trains.len();

        if trains.len() > self.config.max_trains {
            debug!(
                listed = trains.len(),
                cap = self.config.max_trains,
                "capping train universe"
            );
            trains.truncate(self.config.max_trains);
        }

        // Fetch routes in parallel batches. join_all keeps input order, so
        // the merged route list follows the catalog listing.
        let mut routes: Vec<TrainRoute> = Vec::new();
        for batch in trains.chunks(self.config.batch_size) {
            let futures: Vec<_> = batch
                .iter()
                .map(|train| async move {
                    let result = self.catalog.train_route(train, journey_date).await;
                    (train, result)
                })
                .collect();

            for (train, result) in join_all(futures).await {
                match result {
                    Ok(route) => {
                        stats.routes_fetched += 1;
                        routes.push(route);
                    }
                    Err(CatalogError::TrainNotFound { .. }) => {
                        stats.trains_not_found += 1;
                        debug!(train_number = %train.number, "no route for train on this date");
                    }
                    Err(CatalogError::MalformedRoute { reason, .. }) => {
                        stats.malformed_routes += 1;
                        debug!(
                            train_number = %train.number,
                            reason = %reason,
                            "skipping malformed route"
                        );
                    }
                    Err(e) => {
                        stats.fetch_failures += 1;
                        debug!(train_number = %train.number, error = %e, "failed to fetch route");
                    }
                }
            }
        }

        let mut graph = StationPairGraph::new();
        for route in &routes {
            emit_route_edges(route, &mut graph, &mut stats);
        }

        if graph.is_empty() {
            return Err(BuildError::EmptyGraph {
                journey_date,
                stats,
            });
        }

        info!(
            %journey_date,
            stations = graph.station_count(),
            pairs = graph.pair_count(),
            edges = graph.edge_count(),
            trains = stats.routes_fetched,
            "graph build complete"
        );

        Ok(BuildOutcome { graph, stats })
    }
}

/// Emit one edge per consecutive pair of halting stops.
fn emit_route_edges(route: &TrainRoute, graph: &mut StationPairGraph, stats: &mut BuildStats) {
    let identity = route.identity();
    let halts: Vec<&Stop> = route.halted_stops().collect();

    if halts.len() < 2 {
        stats.malformed_routes += 1;
        debug!(train_number = %identity.number, "route has fewer than two halting stops");
        return;
    }

    for pair in halts.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        if from.station_code == to.station_code {
            stats.edges_skipped += 1;
            continue;
        }
        let Some(departure) = from.scheduled_departure else {
            stats.edges_skipped += 1;
            continue;
        };
        let Some(arrival) = to.scheduled_arrival else {
            stats.edges_skipped += 1;
            continue;
        };
        // A leg that arrives before it departs is corrupt data, not a ride.
        if span_minutes(departure, from.day_offset, arrival, to.day_offset) < 0 {
            stats.edges_skipped += 1;
            debug!(
                train_number = %identity.number,
                from = %from.station_code,
                to = %to.station_code,
                "skipping leg arriving before it departs"
            );
            continue;
        }

        let inserted = graph.insert_edge(LegEdge {
            train_number: identity.number,
            train_name: identity.name.clone(),
            from_station: from.station_code,
            to_station: to.station_code,
            departure,
            arrival,
            from_day: from.day_offset,
            to_day: to.day_offset,
        });
        if inserted {
            stats.edges_emitted += 1;
        } else {
            stats.duplicate_edges_discarded += 1;
        }
    }
}
