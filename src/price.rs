//! Price curve construction for the simulator.

/// A single day of hourly prices repeated across a horizon.
///
/// Prices are in currency per MWh; the simulator only compares them
/// against thresholds and multiplies them by sold energy.
#[derive(Debug, Default, Clone, Copy)]
pub struct DailyPriceProfile;

impl DailyPriceProfile {
    /// Repeat or truncate `profile` to exactly `horizon` samples.
    ///
    /// # Arguments
    ///
    /// * `profile` - Template prices, typically one per hour of a day
    /// * `horizon` - Number of steps to cover
    ///
    /// # Returns
    ///
    /// A vector of length `horizon`; all zeros if `profile` is empty.
    pub fn tile(&self, profile: &[f64], horizon: usize) -> Vec<f64> {
        if profile.is_empty() {
            return vec![0.0; horizon];
        }
        profile.iter().copied().cycle().take(horizon).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DailyPriceProfile;

    #[test]
    fn tile_matches_horizon_length() {
        let curve = DailyPriceProfile.tile(&[1.0, 2.0, 3.0], 7);
        assert_eq!(curve, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn tile_truncates_long_profile() {
        let curve = DailyPriceProfile.tile(&[1.0, 2.0, 3.0], 2);
        assert_eq!(curve, vec![1.0, 2.0]);
    }

    #[test]
    fn tile_zero_horizon_is_empty() {
        assert!(DailyPriceProfile.tile(&[5.0], 0).is_empty());
    }

    #[test]
    fn tile_empty_profile_is_zeros() {
        assert_eq!(DailyPriceProfile.tile(&[], 3), vec![0.0; 3]);
    }
}
