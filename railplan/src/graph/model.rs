//! Station-pair graph model.
//!
//! The planning graph flattens every train route into direct rides between
//! consecutive halts: a train halting at A, B and C contributes the rides
//! A->B and B->C. Path search then works purely on stations, and itinerary
//! assembly looks up the concrete rides for each hop.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{SchedTime, StationCode, TrainNumber, span_minutes};

/// One direct ride between two stations on a single train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegEdge {
    /// Train running the ride.
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
}

impl LegEdge {
    /// Scheduled riding time in minutes, accounting for day offsets.
    pub fn ride_minutes(&self) -> i64 {
        span_minutes(self.departure, self.from_day, self.arrival, self.to_day)
    }
}

/// Directed multigraph of stations connected by train rides.
///
/// Edges are grouped by (board, alight) station pair; a pair holds one edge
/// per train serving it, in the order trains were merged. Keys are ordered,
/// so iteration and everything derived from it is deterministic.
#[derive(Debug, Clone, Default)]
pub struct StationPairGraph {
    /// Rides grouped by (board, alight) station pair.
    edges: BTreeMap<(StationCode, StationCode), Vec<LegEdge>>,

    /// Stations reachable in one ride from each station.
    adjacency: BTreeMap<StationCode, BTreeSet<StationCode>>,

    /// Every station appearing on either side of an edge.
    stations: BTreeSet<StationCode>,
}

impl StationPairGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a ride, keeping at most one edge per (pair, train).
    ///
    /// Returns `false` and leaves the graph unchanged when the pair already
    /// has an edge for the same train, or when the edge is a self-loop.
    pub fn insert_edge(&mut self, edge: LegEdge) -> bool {
        if edge.from_station == edge.to_station {
            return false;
        }
        let pair = (edge.from_station, edge.to_station);
        let rides = self.edges.entry(pair).or_default();
        if rides.iter().any(|e| e.train_number == edge.train_number) {
            return false;
        }

        self.adjacency
            .entry(edge.from_station)
            .or_default()
            .insert(edge.to_station);
        self.stations.insert(edge.from_station);
        self.stations.insert(edge.to_station);
        rides.push(edge);
        true
    }

    /// Get the rides from one station to another.
    pub fn edges_between(&self, from: &StationCode, to: &StationCode) -> &[LegEdge] {
        self.edges
            .get(&(*from, *to))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Stations reachable in one ride from `station`, in code order.
    pub fn neighbors(&self, station: &StationCode) -> impl Iterator<Item = &StationCode> {
        self.adjacency.get(station).into_iter().flatten()
    }

    /// Whether any edge touches `station`.
    pub fn has_station(&self, station: &StationCode) -> bool {
        self.stations.contains(station)
    }

    /// Number of distinct stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of connected (board, alight) pairs.
    pub fn pair_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of rides.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|v| v.len()).sum()
    }

    /// Whether the graph has no edges at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn time(s: &str) -> SchedTime {
        SchedTime::parse(s).unwrap()
    }

    fn edge(
        train: &str,
        from: &str,
        to: &str,
        dep: &str,
        arr: &str,
        from_day: u8,
        to_day: u8,
    ) -> LegEdge {
        LegEdge {
            train_number: TrainNumber::parse(train).unwrap(),
            train_name: format!("{train} EXP"),
            from_station: station(from),
            to_station: station(to),
            departure: time(dep),
            arrival: time(arr),
            from_day,
            to_day,
        }
    }

    #[test]
    fn empty_graph() {
        let graph = StationPairGraph::new();

        assert!(graph.is_empty());
        assert_eq!(graph.station_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges_between(&station("AAA"), &station("BBB")).is_empty());
        assert_eq!(graph.neighbors(&station("AAA")).count(), 0);
    }

    #[test]
    fn insert_and_look_up() {
        let mut graph = StationPairGraph::new();
        assert!(graph.insert_edge(edge("11111", "AAA", "BBB", "0900", "1200", 1, 1)));

        let rides = graph.edges_between(&station("AAA"), &station("BBB"));
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].train_name, "11111 EXP");

        // Directed: nothing in the other direction.
        assert!(graph.edges_between(&station("BBB"), &station("AAA")).is_empty());

        assert!(graph.has_station(&station("AAA")));
        assert!(graph.has_station(&station("BBB")));
        assert!(!graph.has_station(&station("CCC")));
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut graph = StationPairGraph::new();
        assert!(!graph.insert_edge(edge("11111", "AAA", "AAA", "0900", "1200", 1, 1)));
        assert!(graph.is_empty());
    }

    #[test]
    fn duplicate_pair_and_train_is_rejected() {
        let mut graph = StationPairGraph::new();
        assert!(graph.insert_edge(edge("11111", "AAA", "BBB", "0900", "1200", 1, 1)));
        assert!(!graph.insert_edge(edge("11111", "AAA", "BBB", "0930", "1230", 1, 1)));

        let rides = graph.edges_between(&station("AAA"), &station("BBB"));
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].departure, time("0900"));
    }

    #[test]
    fn same_pair_different_trains_both_kept() {
        let mut graph = StationPairGraph::new();
        assert!(graph.insert_edge(edge("11111", "AAA", "BBB", "0900", "1200", 1, 1)));
        assert!(graph.insert_edge(edge("22222", "AAA", "BBB", "0800", "1100", 1, 1)));

        assert_eq!(graph.edges_between(&station("AAA"), &station("BBB")).len(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.pair_count(), 1);
    }

    #[test]
    fn neighbors_are_ordered() {
        let mut graph = StationPairGraph::new();
        graph.insert_edge(edge("11111", "AAA", "CCC", "0900", "1200", 1, 1));
        graph.insert_edge(edge("22222", "AAA", "BBB", "0800", "1100", 1, 1));
        graph.insert_edge(edge("33333", "BBB", "CCC", "1300", "1500", 1, 1));

        let from_a: Vec<_> = graph.neighbors(&station("AAA")).collect();
        assert_eq!(from_a, vec![&station("BBB"), &station("CCC")]);
        assert_eq!(graph.station_count(), 3);
    }

    #[test]
    fn ride_minutes_spans_days() {
        let overnight = edge("12951", "BCT", "NDLS", "1700", "0832", 1, 2);
        assert_eq!(overnight.ride_minutes(), 932);

        let same_day = edge("11111", "AAA", "BBB", "0900", "1200", 1, 1);
        assert_eq!(same_day.ride_minutes(), 180);
    }
}
