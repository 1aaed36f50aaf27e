//! Gusting wind applied uniformly to every particle of a cloth.

use crate::error::{ClothError, Result};
use crate::float::Float;
use crate::vec::{Vec, Vec3};

/// Wind parameters.
///
/// At time `t` the wind blows along `±X` (the sign of `sin(t / gust_period)`),
/// rotated about `+Y` by `yaw`, with magnitude
/// `base_strength + amplitude * cos(t / strength_period)`.
/// The force is applied as-is to every particle; it is not scaled by mass.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindConfig<F: Float> {
    pub enabled: bool,
    /// Rotation of the wind direction about +Y, in radians.
    pub yaw: F,
    pub base_strength: F,
    pub amplitude: F,
    /// Seconds per radian of the strength oscillation.
    pub strength_period: F,
    /// Seconds per radian of the direction reversal.
    pub gust_period: F,
}

impl<F: Float> WindConfig<F> {
    pub fn new() -> Self {
        WindConfig {
            enabled: true,
            yaw: F::pi() / F::from_f32(4.0),
            base_strength: F::two(),
            amplitude: F::one(),
            strength_period: F::from_f32(7.0),
            gust_period: F::two(),
        }
    }

    /// Calm air.
    pub fn disabled() -> Self {
        WindConfig { enabled: false, ..Self::new() }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_yaw(mut self, yaw: F) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_strength(mut self, base_strength: F, amplitude: F) -> Self {
        self.base_strength = base_strength;
        self.amplitude = amplitude;
        self
    }

    pub fn with_periods(mut self, strength_period: F, gust_period: F) -> Self {
        self.strength_period = strength_period;
        self.gust_period = gust_period;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.yaw.is_finite()
            && self.base_strength.is_finite()
            && self.amplitude.is_finite();
        if !finite || !self.strength_period.is_positive_finite() || !self.gust_period.is_positive_finite() {
            return Err(ClothError::InvalidEnvironment);
        }
        Ok(())
    }

    /// Wind force at elapsed time `t`, or zero when disabled.
    pub fn force_at(&self, t: F) -> Vec3<F> {
        if !self.enabled {
            return Vec3::zero();
        }
        let strength = self.base_strength + self.amplitude * (t / self.strength_period).cos();
        let heading = Vec3::new((t / self.gust_period).sin(), F::zero(), F::zero()).normalize();
        heading.rotate_y(self.yaw).scale(strength)
    }
}

impl<F: Float> Default for WindConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn disabled_wind_is_zero() {
        let wind = WindConfig::<f64>::disabled();
        assert_eq!(wind.force_at(3.0), Vec3::zero());
    }

    #[test]
    fn zero_phase_gives_no_heading() {
        // sin(0) = 0 normalizes to the zero vector
        let wind = WindConfig::<f64>::new();
        assert_eq!(wind.force_at(0.0), Vec3::zero());
    }

    #[test]
    fn unrotated_wind_blows_along_x() {
        let wind = WindConfig::<f64>::new().with_yaw(0.0);
        let t = 1.0;
        let f = wind.force_at(t);
        let strength = 2.0 + (t / 7.0).cos();
        assert_relative_eq!(f.x, strength, epsilon = 1e-12);
        assert_relative_eq!(f.y, 0.0);
        assert_relative_eq!(f.z, 0.0);
    }

    #[test]
    fn direction_reverses_with_gust_phase() {
        let wind = WindConfig::<f64>::new().with_yaw(0.0);
        // sin(5 / 2) > 0, sin(8 / 2) < 0
        assert!(wind.force_at(5.0).x > 0.0);
        assert!(wind.force_at(8.0).x < 0.0);
    }

    #[test]
    fn yaw_rotates_heading_in_xz_plane() {
        let wind = WindConfig::<f64>::new();
        let f = wind.force_at(1.0);
        assert_relative_eq!(f.x, -f.z, epsilon = 1e-12);
        assert_relative_eq!(f.y, 0.0);
        assert_relative_eq!(f.length(), 2.0 + (1.0f64 / 7.0).cos(), epsilon = 1e-12);
    }

    #[test]
    fn validate_rejects_zero_period() {
        let wind = WindConfig::<f32>::new().with_periods(0.0, 2.0);
        assert_eq!(wind.validate(), Err(ClothError::InvalidEnvironment));
        assert!(WindConfig::<f32>::new().validate().is_ok());
    }
}
