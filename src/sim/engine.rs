//! Threshold-based dispatch simulator.

use tracing::{debug, trace, warn};

use crate::devices::BatteryParams;
use crate::error::{ConfigurationWarning, SimError};

use super::types::{Action, SimulationTrace};

/// Price thresholds driving the dispatch policy.
///
/// Prices strictly below `low` charge, prices strictly above `high`
/// discharge, anything else holds. The low test runs first, so with
/// `low > high` the hold band is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchThresholds {
    low: f64,
    high: f64,
}

impl DispatchThresholds {
    /// Creates thresholds, rejecting non-finite values.
    ///
    /// An inverted band (`low > high`) is accepted; see [`Self::warnings`].
    pub fn new(low: f64, high: f64) -> Result<Self, SimError> {
        let thresholds = Self { low, high };
        thresholds.check()?;
        Ok(thresholds)
    }

    /// Charge when the price is below this value.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Discharge when the price is above this value.
    pub fn high(&self) -> f64 {
        self.high
    }

    fn check(&self) -> Result<(), SimError> {
        if !self.low.is_finite() {
            return Err(SimError::invalid("low_price_threshold", "must be finite"));
        }
        if !self.high.is_finite() {
            return Err(SimError::invalid("high_price_threshold", "must be finite"));
        }
        Ok(())
    }

    /// Returns non-fatal findings about this configuration.
    pub fn warnings(&self) -> Vec<ConfigurationWarning> {
        let mut warnings = Vec::new();
        if self.low > self.high {
            warnings.push(ConfigurationWarning::InvertedThresholds {
                low: self.low,
                high: self.high,
            });
        }
        warnings
    }
}

/// Simulates greedy threshold dispatch of one battery over a price curve.
///
/// A single left-to-right pass with no look-ahead. At each step `t` with
/// SoC `s` and production `p`:
/// - cheap (`price < low`): draw `min(charge_rate * dt, p)`; if it fits under
///   capacity, SoC gains the drawn energy times the charge efficiency,
///   otherwise nothing happens.
/// - expensive (`price > high`): release `min(discharge_rate * dt, s)`; SoC
///   loses the released energy times the discharge efficiency.
/// - otherwise hold.
///
/// Then `stored[t] = soc[t + 1] - soc[t]` and `sold[t] = p - stored[t]`, so a
/// discharge step sells production plus the SoC drop.
///
/// The battery is only read; its initial SoC seeds a private trace.
///
/// # Errors
///
/// Fails before any step runs if the curves differ in length, `dt_hours` is
/// not a positive finite number, a production sample is negative or
/// non-finite, a price is non-finite, or a threshold is non-finite.
pub fn simulate(
    battery: &BatteryParams,
    production: &[f64],
    price: &[f64],
    dt_hours: f64,
    thresholds: &DispatchThresholds,
) -> Result<SimulationTrace, SimError> {
    validate_inputs(production, price, dt_hours)?;
    thresholds.check()?;
    for warning in thresholds.warnings() {
        warn!(%warning, "dispatch thresholds");
    }

    let horizon = production.len();
    debug!(
        horizon,
        dt_hours,
        initial_soc_mwh = battery.initial_soc_mwh(),
        low = thresholds.low(),
        high = thresholds.high(),
        "starting dispatch simulation"
    );

    let capacity = battery.capacity_mwh();
    let charge_limit = battery.usable_charge_mwh(dt_hours);
    let discharge_limit = battery.usable_discharge_mwh(dt_hours);

    let mut soc = Vec::with_capacity(horizon + 1);
    let mut stored_energy = Vec::with_capacity(horizon);
    let mut sold_energy = Vec::with_capacity(horizon);
    let mut actions = Vec::with_capacity(horizon);
    soc.push(battery.initial_soc_mwh());

    for (t, (&p, &price_t)) in production.iter().zip(price).enumerate() {
        let s = soc[t];

        let (next, action) = if price_t < thresholds.low() {
            let want = charge_limit.min(p);
            if s + want <= capacity {
                (s + want * battery.charge_efficiency(), Action::Charge)
            } else {
                (s, Action::ChargeBlocked)
            }
        } else if price_t > thresholds.high() {
            let want = discharge_limit.min(s);
            let released = want * battery.discharge_efficiency();
            trace!(t, provisional_sold_mwh = released, "discharge");
            (s - released, Action::Discharge)
        } else {
            (s, Action::Hold)
        };

        debug_assert!((0.0..=capacity).contains(&next));
        let stored = next - s;
        soc.push(next);
        stored_energy.push(stored);
        sold_energy.push(p - stored);
        actions.push(action);

        trace!(t, soc_mwh = next, stored_mwh = stored, action = %action, "step");
    }

    let trace = SimulationTrace::new(soc, stored_energy, sold_energy, actions);
    debug!(
        horizon,
        final_soc_mwh = trace.final_soc(),
        "dispatch simulation finished"
    );
    Ok(trace)
}

fn validate_inputs(production: &[f64], price: &[f64], dt_hours: f64) -> Result<(), SimError> {
    if production.len() != price.len() {
        return Err(SimError::LengthMismatch {
            production: production.len(),
            price: price.len(),
        });
    }
    if !(dt_hours.is_finite() && dt_hours > 0.0) {
        return Err(SimError::invalid("dt_hours", "must be finite and > 0"));
    }
    if let Some(t) = production.iter().position(|p| !(p.is_finite() && *p >= 0.0)) {
        return Err(SimError::invalid(
            "production",
            format!("sample {t} must be finite and >= 0, got {}", production[t]),
        ));
    }
    if let Some(t) = price.iter().position(|p| !p.is_finite()) {
        return Err(SimError::invalid(
            "price",
            format!("sample {t} must be finite, got {}", price[t]),
        ));
    }
    Ok(())
}
