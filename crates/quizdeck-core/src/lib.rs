//! quizdeck-core — Problem loading, shuffling, and the timed quiz session.
//!
//! This crate holds everything the `quizdeck` binary builds on: the data
//! model, the CSV loader, the shuffler, and the answer-loop-vs-deadline race.

pub mod error;
pub mod loader;
pub mod model;
pub mod session;
pub mod shuffle;
