//! The capability boundary toward the external physics engine.
//!
//! Every simulator interaction in this crate goes through the
//! [`PhysicsBackend`] trait: shape and body creation, state queries, point
//! constraints, force application, and visual recoloring. Any engine binding
//! can implement it, and tests drive the anchor logic against a scripted
//! mock instead of a live simulator.
//!
//! The trait is deliberately narrow. It covers only what anchors need, not a
//! general rigid-body API: markers are spheres, constraints are
//! vertex-to-body points, forces are applied at the body origin in the world
//! frame for the current step only.

use nalgebra::{Point3, Vector3};

use crate::types::{BodyId, ConstraintId, DeformableId, Rgba, ShapeId};
use crate::Result;

/// Simulator capabilities required by the anchor helpers.
///
/// Implementations report failures (invalid handles, out-of-range vertex
/// indices, engine faults) as [`AnchorError::Backend`](crate::AnchorError::Backend);
/// this layer performs no validation, retry, or recovery on top.
pub trait PhysicsBackend {
    /// Create a sphere-shaped visual shape with the given radius and color.
    fn create_visual_sphere(&mut self, radius: f64, rgba: Rgba) -> Result<ShapeId>;

    /// Create a sphere-shaped collision shape with the given radius.
    fn create_collision_sphere(&mut self, radius: f64) -> Result<ShapeId>;

    /// Create a rigid body.
    ///
    /// A zero `mass` makes the body immovable. A body created without a
    /// collision shape is excluded from collision detection and is purely
    /// advisory.
    fn create_rigid_body(
        &mut self,
        mass: f64,
        position: Point3<f64>,
        collision: Option<ShapeId>,
        visual: ShapeId,
    ) -> Result<BodyId>;

    /// Read a body's current linear velocity.
    fn linear_velocity(&self, body: BodyId) -> Result<Vector3<f64>>;

    /// Read a full snapshot of a deformable object's current vertex positions.
    fn mesh_positions(&self, deformable: DeformableId) -> Result<Vec<Point3<f64>>>;

    /// Create a point constraint binding one mesh vertex to a rigid body.
    fn create_vertex_constraint(
        &mut self,
        deformable: DeformableId,
        vertex: usize,
        body: BodyId,
    ) -> Result<ConstraintId>;

    /// Remove a previously created constraint.
    fn remove_constraint(&mut self, constraint: ConstraintId) -> Result<()>;

    /// Apply an external force at the body origin, in the world frame, for
    /// the current simulation step only.
    fn apply_force(&mut self, body: BodyId, force: Vector3<f64>) -> Result<()>;

    /// Change a body's visual color.
    fn set_color(&mut self, body: BodyId, rgba: Rgba) -> Result<()>;
}
