//! Scenario files for generating synthetic gridview grids.
//!
//! A [`Scenario`] only decides how many fuses to generate; the store pairs
//! them into cables and hangs one meter on each.

pub mod spec;

pub use spec::{load_scenario_from_path, FeederSpec, Scenario, MAX_FUSES};
