use serde::Serialize;

use crate::error::SimError;

/// Static parameters of one battery energy storage system.
///
/// `BatteryParams` is validated once at construction and is immutable
/// afterwards. The simulator only reads it, so the same value can be reused
/// across any number of runs.
///
/// # Energy Convention
/// - Capacity and state of charge are in MWh.
/// - Charge/discharge limits are in MW; multiply by the step duration in
///   hours to get the energy that can move within one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryParams {
    capacity_mwh: f64,
    max_charge_rate_mw: f64,
    max_discharge_rate_mw: f64,
    charge_efficiency: f64,
    discharge_efficiency: f64,
    initial_soc_mwh: f64,
}

impl BatteryParams {
    /// Creates a validated set of battery parameters.
    ///
    /// # Arguments
    ///
    /// * `capacity_mwh` - Maximum storable energy in MWh (must be > 0)
    /// * `max_charge_rate_mw` - Maximum charging power in MW (>= 0)
    /// * `max_discharge_rate_mw` - Maximum discharging power in MW (>= 0)
    /// * `charge_efficiency` - Fraction of drawn energy that reaches storage, in (0, 1]
    /// * `discharge_efficiency` - One-way discharge loss factor, in (0, 1]
    /// * `initial_soc_mwh` - Starting energy content in MWh, in [0, capacity]
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] naming the first violated constraint.
    pub fn new(
        capacity_mwh: f64,
        max_charge_rate_mw: f64,
        max_discharge_rate_mw: f64,
        charge_efficiency: f64,
        discharge_efficiency: f64,
        initial_soc_mwh: f64,
    ) -> Result<Self, SimError> {
        if !(capacity_mwh.is_finite() && capacity_mwh > 0.0) {
            return Err(SimError::invalid("capacity_mwh", "must be finite and > 0"));
        }
        if !(max_charge_rate_mw.is_finite() && max_charge_rate_mw >= 0.0) {
            return Err(SimError::invalid(
                "max_charge_rate_mw",
                "must be finite and >= 0",
            ));
        }
        if !(max_discharge_rate_mw.is_finite() && max_discharge_rate_mw >= 0.0) {
            return Err(SimError::invalid(
                "max_discharge_rate_mw",
                "must be finite and >= 0",
            ));
        }
        check_efficiency("charge_efficiency", charge_efficiency)?;
        check_efficiency("discharge_efficiency", discharge_efficiency)?;
        if !(0.0..=capacity_mwh).contains(&initial_soc_mwh) {
            return Err(SimError::invalid(
                "initial_soc_mwh",
                format!("must be in [0, {capacity_mwh}], got {initial_soc_mwh}"),
            ));
        }

        Ok(Self {
            capacity_mwh,
            max_charge_rate_mw,
            max_discharge_rate_mw,
            charge_efficiency,
            discharge_efficiency,
            initial_soc_mwh,
        })
    }

    pub fn capacity_mwh(&self) -> f64 {
        self.capacity_mwh
    }

    pub fn max_charge_rate_mw(&self) -> f64 {
        self.max_charge_rate_mw
    }

    pub fn max_discharge_rate_mw(&self) -> f64 {
        self.max_discharge_rate_mw
    }

    pub fn charge_efficiency(&self) -> f64 {
        self.charge_efficiency
    }

    pub fn discharge_efficiency(&self) -> f64 {
        self.discharge_efficiency
    }

    pub fn initial_soc_mwh(&self) -> f64 {
        self.initial_soc_mwh
    }

    /// Energy the charge limit allows within one step of `dt_hours`.
    pub fn usable_charge_mwh(&self, dt_hours: f64) -> f64 {
        self.max_charge_rate_mw * dt_hours
    }

    /// Energy the discharge limit allows within one step of `dt_hours`.
    pub fn usable_discharge_mwh(&self, dt_hours: f64) -> f64 {
        self.max_discharge_rate_mw * dt_hours
    }

    /// Fraction of energy retained over one full charge and discharge.
    pub fn round_trip_efficiency(&self) -> f64 {
        self.charge_efficiency * self.discharge_efficiency
    }
}

fn check_efficiency(field: &'static str, value: f64) -> Result<(), SimError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SimError::invalid(
            field,
            format!("must be in (0, 1], got {value}"),
        ))
    }
}
