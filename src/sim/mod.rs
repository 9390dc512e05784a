//! Dispatch simulation and derived analytics.

pub mod engine;
/// Revenue, loss, and summary analytics over a trace.
pub mod kpi;
pub mod types;

pub use engine::{DispatchThresholds, simulate};
pub use kpi::{ResultsView, Summary};
pub use types::{Action, SimulationTrace};
