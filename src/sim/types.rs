//! Core simulation types: dispatch actions and the simulation trace.

use std::fmt;

use serde::Serialize;

/// Dispatch decision taken at one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Price below the low threshold and the charge fits in the battery.
    Charge,
    /// Price below the low threshold but the charge would overflow capacity.
    ChargeBlocked,
    /// Price above the high threshold.
    Discharge,
    /// Price inside the threshold band.
    Hold,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Charge => "charge",
            Self::ChargeBlocked => "charge_blocked",
            Self::Discharge => "discharge",
            Self::Hold => "hold",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete record of one dispatch simulation.
///
/// For a horizon of `T` steps the trace holds `T + 1` SoC samples bounding
/// each step and `T` entries in every per-step series, with
/// `soc[t + 1] == soc[t] + stored_energy[t]` for every `t`. A trace is
/// immutable once built and does not reference the battery it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationTrace {
    soc: Vec<f64>,
    stored_energy: Vec<f64>,
    sold_energy: Vec<f64>,
    actions: Vec<Action>,
}

impl SimulationTrace {
    pub(crate) fn new(
        soc: Vec<f64>,
        stored_energy: Vec<f64>,
        sold_energy: Vec<f64>,
        actions: Vec<Action>,
    ) -> Self {
        debug_assert_eq!(soc.len(), stored_energy.len() + 1);
        debug_assert_eq!(stored_energy.len(), sold_energy.len());
        debug_assert_eq!(stored_energy.len(), actions.len());
        Self {
            soc,
            stored_energy,
            sold_energy,
            actions,
        }
    }

    /// Battery energy content (MWh) at the start of each step and after the last.
    pub fn soc(&self) -> &[f64] {
        &self.soc
    }

    /// Net energy moved into the battery per step (MWh; negative on discharge).
    pub fn stored_energy(&self) -> &[f64] {
        &self.stored_energy
    }

    /// Energy delivered to the grid per step: `production - stored_energy`.
    pub fn sold_energy(&self) -> &[f64] {
        &self.sold_energy
    }

    /// Dispatch decision per step.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of simulated steps `T`.
    pub fn horizon(&self) -> usize {
        self.stored_energy.len()
    }

    /// SoC after the final step (the initial SoC when `T == 0`).
    pub fn final_soc(&self) -> f64 {
        self.soc.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trace_keeps_initial_soc() {
        let trace = SimulationTrace::new(vec![4.0], Vec::new(), Vec::new(), Vec::new());
        assert_eq!(trace.horizon(), 0);
        assert_eq!(trace.final_soc(), 4.0);
    }

    #[test]
    fn accessors_expose_series() {
        let trace = SimulationTrace::new(
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0],
            vec![2.0, 3.0],
            vec![Action::Charge, Action::Hold],
        );
        assert_eq!(trace.horizon(), 2);
        assert_eq!(trace.soc(), &[0.0, 1.0, 1.0]);
        assert_eq!(trace.sold_energy(), &[2.0, 3.0]);
        assert_eq!(trace.actions()[1], Action::Hold);
        assert_eq!(trace.final_soc(), 1.0);
    }

    #[test]
    fn action_display() {
        assert_eq!(Action::ChargeBlocked.to_string(), "charge_blocked");
        assert_eq!(format!("{}", Action::Discharge), "discharge");
    }
}
