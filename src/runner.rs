//! Config-driven scenario construction and execution.

use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::config::ScenarioConfig;
use crate::devices::{BatteryParams, LinearPv, ProductionProfile, SinusoidalPv, Solar};
use crate::error::SimError;
use crate::price::DailyPriceProfile;
use crate::sim::{DispatchThresholds, ResultsView, Summary, simulate};

/// Outcome of one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub view: ResultsView,
    pub summary: Summary,
}

/// Builds the battery, production and price curves from `cfg` and simulates them.
///
/// Deterministic for a fixed `simulation.seed`.
///
/// # Errors
///
/// Returns the first [`SimError`] raised while building the scenario
/// components or running the simulation.
pub fn run_scenario(cfg: &ScenarioConfig) -> Result<ScenarioRun, SimError> {
    let bat = &cfg.battery;
    let battery = BatteryParams::new(
        bat.capacity_mwh,
        bat.max_charge_rate_mw,
        bat.max_discharge_rate_mw,
        bat.charge_efficiency,
        bat.discharge_efficiency,
        bat.initial_soc_mwh,
    )?;

    let solar = build_solar(cfg)?;
    let horizon = cfg.horizon();
    let mut rng = StdRng::seed_from_u64(cfg.simulation.seed);
    let production = solar.generate(horizon, &mut rng);
    let price = DailyPriceProfile.tile(&cfg.price.daily_profile, horizon);

    let s = &cfg.simulation;
    let thresholds = DispatchThresholds::new(s.low_price_threshold, s.high_price_threshold)?;
    let trace = simulate(&battery, &production, &price, s.dt_hours, &thresholds)?;

    let view = ResultsView::new(battery, trace, price, production, s.dt_hours)?;
    let summary = Summary::from_view(&view);
    info!(
        profile = solar.profile_type(),
        horizon,
        revenue = summary.revenue,
        loss_mwh = summary.loss_mwh,
        "scenario finished"
    );
    Ok(ScenarioRun { view, summary })
}

fn build_solar(cfg: &ScenarioConfig) -> Result<Solar, SimError> {
    let sol = &cfg.solar;
    match sol.model.as_str() {
        "sinusoidal" => Ok(Solar::Sinusoidal(SinusoidalPv::new(
            sol.sunrise,
            sol.sunset,
            sol.peak_power_mw,
            sol.peak_noise,
            sol.noise,
        )?)),
        "linear" => Ok(Solar::Linear(LinearPv::new(
            sol.sunrise,
            sol.peak,
            sol.sunset,
            sol.peak_power_mw,
            sol.peak_noise,
            sol.noise,
        )?)),
        other => Err(SimError::invalid(
            "solar.model",
            format!("must be \"linear\" or \"sinusoidal\", got \"{other}\""),
        )),
    }
}
