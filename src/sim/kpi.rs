//! Post-hoc revenue and loss analytics over a simulation trace.

use std::fmt;

use crate::devices::BatteryParams;
use crate::error::SimError;

use super::types::{Action, SimulationTrace};

/// Read-only analytics bound to one simulation run.
///
/// Binds a [`SimulationTrace`] to the battery, the input curves, and the step
/// duration it was computed from. Every accessor is a pure function of those
/// inputs. The charge/discharge decomposition is computed once here; the
/// remaining curves are cheap element-wise maps and are rebuilt per call.
#[derive(Debug, Clone)]
pub struct ResultsView {
    battery: BatteryParams,
    trace: SimulationTrace,
    price: Vec<f64>,
    production: Vec<f64>,
    dt_hours: f64,
    charging: Vec<f64>,
    discharging: Vec<f64>,
}

impl ResultsView {
    /// Binds a trace to its inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::LengthMismatch`] if the curves differ in length,
    /// [`SimError::TraceMismatch`] if the trace horizon differs from them, or
    /// [`SimError::InvalidParameter`] for a non-positive `dt_hours`.
    pub fn new(
        battery: BatteryParams,
        trace: SimulationTrace,
        price: Vec<f64>,
        production: Vec<f64>,
        dt_hours: f64,
    ) -> Result<Self, SimError> {
        if price.len() != production.len() {
            return Err(SimError::LengthMismatch {
                production: production.len(),
                price: price.len(),
            });
        }
        if trace.horizon() != production.len() {
            return Err(SimError::TraceMismatch {
                expected: production.len(),
                found: trace.horizon(),
            });
        }
        if !(dt_hours.is_finite() && dt_hours > 0.0) {
            return Err(SimError::invalid("dt_hours", "must be finite and > 0"));
        }

        let (charging, discharging) = decompose(trace.soc(), production.len());
        Ok(Self {
            battery,
            trace,
            price,
            production,
            dt_hours,
            charging,
            discharging,
        })
    }

    pub fn battery(&self) -> &BatteryParams {
        &self.battery
    }

    pub fn trace(&self) -> &SimulationTrace {
        &self.trace
    }

    pub fn price(&self) -> &[f64] {
        &self.price
    }

    pub fn production(&self) -> &[f64] {
        &self.production
    }

    pub fn dt_hours(&self) -> f64 {
        self.dt_hours
    }

    /// Number of simulated steps.
    pub fn horizon(&self) -> usize {
        self.production.len()
    }

    /// SoC rise per step (MWh, >= 0).
    ///
    /// Only the first `T - 1` transitions are decomposed; the last index is
    /// always zero.
    pub fn charging_curve(&self) -> &[f64] {
        &self.charging
    }

    /// SoC fall per step as a positive magnitude (MWh). Last index always zero.
    pub fn discharging_curve(&self) -> &[f64] {
        &self.discharging
    }

    pub fn cumulative_charging_curve(&self) -> Vec<f64> {
        cumulative(&self.charging)
    }

    pub fn cumulative_discharging_curve(&self) -> Vec<f64> {
        cumulative(&self.discharging)
    }

    /// Per-step revenue: `sold_energy * price`.
    pub fn revenue_curve(&self) -> Vec<f64> {
        self.trace
            .sold_energy()
            .iter()
            .zip(&self.price)
            .map(|(sold, price)| sold * price)
            .collect()
    }

    pub fn cumulative_revenue_curve(&self) -> Vec<f64> {
        cumulative(&self.revenue_curve())
    }

    /// Total revenue over the horizon.
    pub fn revenue(&self) -> f64 {
        self.revenue_curve().iter().sum()
    }

    /// `charging - discharging` per step.
    pub fn charge_discharge_curve(&self) -> Vec<f64> {
        self.charging
            .iter()
            .zip(&self.discharging)
            .map(|(c, d)| c - d)
            .collect()
    }

    /// Net SoC movement accumulated over the decomposed transitions.
    pub fn cumulative_charge_discharge_curve(&self) -> Vec<f64> {
        cumulative(&self.charge_discharge_curve())
    }

    /// Energy drawn from production that never reached storage.
    ///
    /// Inferred as `charging * (1 - eta_c) / eta_c`.
    pub fn loss_charge_curve(&self) -> Vec<f64> {
        let eta = self.battery.charge_efficiency();
        self.charging.iter().map(|c| c * (1.0 - eta) / eta).collect()
    }

    /// Discharge-side loss: `discharging * (1 - eta_d) / eta_d`.
    pub fn loss_discharge_curve(&self) -> Vec<f64> {
        let eta = self.battery.discharge_efficiency();
        self.discharging
            .iter()
            .map(|d| d * (1.0 - eta) / eta)
            .collect()
    }

    pub fn loss_charge_discharge_curve(&self) -> Vec<f64> {
        self.loss_charge_curve()
            .iter()
            .zip(self.loss_discharge_curve())
            .map(|(c, d)| c + d)
            .collect()
    }

    pub fn cumulative_loss_charge_curve(&self) -> Vec<f64> {
        cumulative(&self.loss_charge_curve())
    }

    pub fn cumulative_loss_discharge_curve(&self) -> Vec<f64> {
        cumulative(&self.loss_discharge_curve())
    }

    pub fn cumulative_loss_charge_discharge_curve(&self) -> Vec<f64> {
        cumulative(&self.loss_charge_discharge_curve())
    }

    /// Total round-trip energy lost to inefficiency (MWh).
    pub fn charge_discharge_loss(&self) -> f64 {
        self.loss_charge_discharge_curve().iter().sum()
    }
}

/// Splits SoC movement into charge and discharge magnitudes.
///
/// Transition `soc[t - 1] -> soc[t]` for `t in 1..horizon` lands at index
/// `t - 1`, which leaves index `horizon - 1` at zero. The final transition
/// `soc[T - 1] -> soc[T]` is never decomposed.
// TODO: offer a full-length decomposition covering soc[T - 1] -> soc[T] once
// downstream reports can take the changed totals.
fn decompose(soc: &[f64], horizon: usize) -> (Vec<f64>, Vec<f64>) {
    let mut charging = vec![0.0; horizon];
    let mut discharging = vec![0.0; horizon];
    for t in 1..horizon {
        let (prev, cur) = (soc[t - 1], soc[t]);
        if cur > prev {
            charging[t - 1] = cur - prev;
        } else if cur < prev {
            discharging[t - 1] = prev - cur;
        }
    }
    (charging, discharging)
}

/// Running prefix sum: `out[i] = values[0] + ... + values[i]`.
fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Aggregate indicators derived from a complete [`ResultsView`].
#[derive(Debug, Clone)]
pub struct Summary {
    /// Number of simulated steps.
    pub horizon: usize,
    /// Total production (MWh).
    pub production_mwh: f64,
    /// Total energy sold (MWh).
    pub sold_mwh: f64,
    /// Total SoC rise from the decomposition (MWh).
    pub charged_mwh: f64,
    /// Total SoC fall from the decomposition (MWh).
    pub discharged_mwh: f64,
    /// Total revenue in price units.
    pub revenue: f64,
    /// Total round-trip loss (MWh).
    pub loss_mwh: f64,
    /// Discharged energy divided by capacity.
    pub equivalent_full_cycles: f64,
    /// SoC after the final step (MWh).
    pub final_soc_mwh: f64,
    pub charge_steps: usize,
    pub blocked_steps: usize,
    pub discharge_steps: usize,
    pub hold_steps: usize,
}

impl Summary {
    /// Computes all aggregates from a bound results view.
    pub fn from_view(view: &ResultsView) -> Self {
        let trace = view.trace();
        let count = |wanted: Action| trace.actions().iter().filter(|&&a| a == wanted).count();
        let discharged_mwh: f64 = view.discharging_curve().iter().sum();

        Self {
            horizon: view.horizon(),
            production_mwh: view.production().iter().sum(),
            sold_mwh: trace.sold_energy().iter().sum(),
            charged_mwh: view.charging_curve().iter().sum(),
            discharged_mwh,
            revenue: view.revenue(),
            loss_mwh: view.charge_discharge_loss(),
            equivalent_full_cycles: discharged_mwh / view.battery().capacity_mwh(),
            final_soc_mwh: trace.final_soc(),
            charge_steps: count(Action::Charge),
            blocked_steps: count(Action::ChargeBlocked),
            discharge_steps: count(Action::Discharge),
            hold_steps: count(Action::Hold),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Summary ---")?;
        writeln!(f, "Steps simulated:       {}", self.horizon)?;
        writeln!(f, "Production:            {:.3} MWh", self.production_mwh)?;
        writeln!(f, "Sold:                  {:.3} MWh", self.sold_mwh)?;
        writeln!(
            f,
            "Charged / discharged:  {:.3} / {:.3} MWh ({:.2} equiv. cycles)",
            self.charged_mwh, self.discharged_mwh, self.equivalent_full_cycles
        )?;
        writeln!(f, "Round-trip loss:       {:.3} MWh", self.loss_mwh)?;
        writeln!(f, "Final SoC:             {:.3} MWh", self.final_soc_mwh)?;
        writeln!(
            f,
            "Actions:               charge={} blocked={} discharge={} hold={}",
            self.charge_steps, self.blocked_steps, self.discharge_steps, self.hold_steps
        )?;
        write!(f, "Revenue:               {:.2}", self.revenue)
    }
}
