//! Multi-leg train route planner.
//!
//! A library that answers: "how do I get from station A to station B on
//! this date?", including itineraries that chain several trains with sane
//! transfer waits.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod graph;
pub mod planner;
