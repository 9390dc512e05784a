//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use bess_sim::{BatteryParams, DispatchThresholds};

/// Absolute tolerance for float comparisons.
pub const EPS: f64 = 1e-9;

/// Reference battery (100 MWh, 10 MW both ways, 95% efficiency, empty).
pub fn default_battery() -> BatteryParams {
    BatteryParams::new(100.0, 10.0, 10.0, 0.95, 0.95, 0.0).expect("valid battery")
}

/// Reference thresholds: charge below 10, discharge above 90.
pub fn default_thresholds() -> DispatchThresholds {
    DispatchThresholds::new(10.0, 90.0).expect("finite thresholds")
}

/// Two days of a hand-authored bell-shaped production curve (MWh per hour).
pub fn two_day_production() -> Vec<f64> {
    let day = [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 6.0, 12.0, 18.0, 24.0, 28.0, 30.0, 28.0, 24.0, 18.0,
        12.0, 6.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ];
    day.iter().chain(day.iter()).copied().collect()
}

/// Two days of prices with cheap midday and expensive evening hours.
pub fn two_day_price() -> Vec<f64> {
    let day = [
        40.0, 38.0, 35.0, 33.0, 32.0, 35.0, 45.0, 60.0, 55.0, 40.0, 20.0, 8.0, 5.0, 6.0, 9.0,
        25.0, 50.0, 80.0, 120.0, 110.0, 95.0, 70.0, 55.0, 45.0,
    ];
    day.iter().chain(day.iter()).copied().collect()
}

/// Asserts `a` and `b` agree within [`EPS`].
pub fn assert_close(a: f64, b: f64, what: &str) {
    assert!((a - b).abs() < EPS, "{what}: {a} != {b}");
}
