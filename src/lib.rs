//! Battery energy storage dispatch simulator for a co-located variable producer.

pub mod config;
pub mod devices;
pub mod error;
pub mod io;
pub mod price;
pub mod runner;
/// Dispatch simulation and derived metrics.
pub mod sim;

pub use devices::BatteryParams;
pub use error::{ConfigurationWarning, SimError};
pub use sim::{DispatchThresholds, ResultsView, SimulationTrace, simulate};
