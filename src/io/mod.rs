//! Output formats for simulation results.

pub mod export;
