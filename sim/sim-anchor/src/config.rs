//! Anchor configuration.
//!
//! All numeric tunings (marker mass, radii, state colors, controller gain
//! and force limit, minimum anchor spacing) live in one immutable
//! [`AnchorConfig`] value passed explicitly into each operation. There is no
//! module-level mutable state.

use crate::error::AnchorError;
use crate::types::Rgba;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunings for anchor markers and the velocity controller.
///
/// The defaults describe a 100 g, 7 mm gripper marker with a proportional
/// velocity gain of 50 and a 10 N per-axis force limit, which works well for
/// light cloth. Fixed pins use the smaller `pin_radius`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnchorConfig {
    /// Marker mass in kg. Zero makes the marker immovable.
    pub mass: f64,
    /// Visual/collision radius of gripper markers, in meters.
    pub radius: f64,
    /// Visual radius of fixed pins, in meters.
    pub pin_radius: f64,
    /// Marker color while constraints are active.
    pub active_color: Rgba,
    /// Marker color after release (and at creation).
    pub inactive_color: Rgba,
    /// Marker color for fixed pins.
    pub fixed_color: Rgba,
    /// Proportional gain of the velocity controller.
    pub kd: f64,
    /// Per-axis force limit of the velocity controller, in Newtons.
    pub max_force: f64,
    /// Minimum distance between two anchor markers, in meters.
    pub min_spacing: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            mass: 0.1,
            radius: 0.007,
            pin_radius: 0.002,
            active_color: Rgba::opaque(1.0, 0.0, 1.0),         // magenta
            inactive_color: Rgba::opaque(0.5, 0.5, 0.5),       // gray
            fixed_color: Rgba::opaque(0.9, 0.75, 0.65),        // peach
            kd: 50.0,
            max_force: 10.0,
            min_spacing: 0.02,
        }
    }
}

impl AnchorConfig {
    /// Set the marker mass.
    #[must_use]
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the gripper marker radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the fixed-pin radius.
    #[must_use]
    pub fn with_pin_radius(mut self, pin_radius: f64) -> Self {
        self.pin_radius = pin_radius;
        self
    }

    /// Set the velocity controller gain and per-axis force limit.
    #[must_use]
    pub fn with_controller(mut self, kd: f64, max_force: f64) -> Self {
        self.kd = kd;
        self.max_force = max_force;
        self
    }

    /// Set the minimum anchor spacing.
    #[must_use]
    pub fn with_min_spacing(mut self, min_spacing: f64) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::InvalidConfig`] if any tuning is negative,
    /// non-finite, or a radius is zero.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(AnchorError::invalid_config(format!(
                "mass must be finite and >= 0, got {}",
                self.mass
            )));
        }
        for (name, radius) in [("radius", self.radius), ("pin_radius", self.pin_radius)] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(AnchorError::invalid_config(format!(
                    "{name} must be finite and > 0, got {radius}"
                )));
            }
        }
        if !self.kd.is_finite() || self.kd < 0.0 {
            return Err(AnchorError::invalid_config(format!(
                "kd must be finite and >= 0, got {}",
                self.kd
            )));
        }
        if !self.max_force.is_finite() || self.max_force < 0.0 {
            return Err(AnchorError::invalid_config(format!(
                "max_force must be finite and >= 0, got {}",
                self.max_force
            )));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(AnchorError::invalid_config(format!(
                "min_spacing must be finite and >= 0, got {}",
                self.min_spacing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tunings() {
        let config = AnchorConfig::default();
        assert_eq!(config.mass, 0.1);
        assert_eq!(config.radius, 0.007);
        assert_eq!(config.pin_radius, 0.002);
        assert_eq!(config.kd, 50.0);
        assert_eq!(config.max_force, 10.0);
        assert_eq!(config.min_spacing, 0.02);
        assert_eq!(config.active_color, Rgba::opaque(1.0, 0.0, 1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AnchorConfig::default()
            .with_mass(0.25)
            .with_controller(80.0, 20.0);
        assert_eq!(config.mass, 0.25);
        assert_eq!(config.kd, 80.0);
        assert_eq!(config.max_force, 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AnchorConfig::default().with_mass(-1.0).validate().is_err());
        assert!(AnchorConfig::default().with_radius(0.0).validate().is_err());
        assert!(AnchorConfig::default()
            .with_controller(f64::NAN, 10.0)
            .validate()
            .is_err());
        assert!(AnchorConfig::default()
            .with_controller(50.0, -1.0)
            .validate()
            .is_err());
        assert!(AnchorConfig::default()
            .with_min_spacing(f64::INFINITY)
            .validate()
            .is_err());
    }
}
