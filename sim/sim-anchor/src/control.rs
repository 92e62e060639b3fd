//! Clamped proportional velocity tracking for anchor markers.
//!
//! Anchors are assumed nearly free-floating, so a single proportional term
//! on the velocity error is enough to track a commanded velocity; a full PD
//! position controller would need per-object gain tuning against the mass
//! and stiffness of whatever the anchor is gripping. For anchors heavily
//! constrained by the deformable (attached on multiple sides), callers
//! should use a stronger control scheme of their own.
//!
//! The controller is stateless. The force acts for the current step only and
//! must be reissued every simulation step to maintain tracking.

use nalgebra::Vector3;
use tracing::trace;

use crate::anchor::Anchor;
use crate::backend::PhysicsBackend;
use crate::config::AnchorConfig;
use crate::error::AnchorError;
use crate::Result;

/// Force that nudges a body from `current` velocity toward `target`.
///
/// `kd * (target - current)`, clamped to `[-max_force, max_force]` on each
/// axis independently.
///
/// # Example
///
/// ```
/// use nalgebra::Vector3;
/// use sim_anchor::tracking_force;
///
/// // Large velocity error saturates at the force limit.
/// let force = tracking_force(
///     &Vector3::zeros(),
///     &Vector3::new(100.0, 0.0, -100.0),
///     50.0,
///     10.0,
/// );
/// assert_eq!(force, Vector3::new(10.0, 0.0, -10.0));
/// ```
#[must_use]
pub fn tracking_force(
    current: &Vector3<f64>,
    target: &Vector3<f64>,
    kd: f64,
    max_force: f64,
) -> Vector3<f64> {
    let raw = (target - current) * kd;
    Vector3::new(
        raw.x.clamp(-max_force, max_force),
        raw.y.clamp(-max_force, max_force),
        raw.z.clamp(-max_force, max_force),
    )
}

/// Drive an anchor toward a target velocity for the current step.
///
/// Queries the marker's linear velocity, computes the clamped proportional
/// [`tracking_force`], applies it at the marker's center, and returns the
/// force that was applied. Reissue once per simulation step.
///
/// # Errors
///
/// [`AnchorError::FixedAnchor`] if the anchor is a fixed pin or has zero
/// mass (only dynamic anchors are force-eligible), or
/// [`AnchorError::Backend`] from the velocity query or force application.
pub fn command_velocity<B: PhysicsBackend + ?Sized>(
    backend: &mut B,
    anchor: &Anchor,
    target: &Vector3<f64>,
    config: &AnchorConfig,
) -> Result<Vector3<f64>> {
    if !anchor.is_dynamic() {
        return Err(AnchorError::FixedAnchor(anchor.body()));
    }
    let current = backend.linear_velocity(anchor.body())?;
    let force = tracking_force(&current, target, config.kd, config.max_force);
    backend.apply_force(anchor.body(), force)?;
    trace!(
        body = %anchor.body(),
        fx = force.x,
        fy = force.y,
        fz = force.z,
        "velocity command"
    );
    Ok(force)
}
