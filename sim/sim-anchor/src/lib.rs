//! Anchor manipulation for deformable bodies.
//!
//! This crate provides the thin layer between a manipulation policy and an
//! external physics engine when grasping or pinning deformable objects
//! (cloth, ropes, soft bodies). An *anchor* is a small rigid marker body
//! bound to a cluster of mesh vertices through simulator-level point
//! constraints; moving the marker drags the cloth with it.
//!
//! The crate owns exactly three concerns:
//!
//! - **Vertex selection**: picking which mesh vertices an anchor grips,
//!   either from a caller-supplied preset or by a density-proportional
//!   nearest-cluster search ([`select_cluster`]).
//! - **Anchor lifecycle**: creating the marker body, binding and unbinding
//!   the selected vertices, and pinning vertices permanently
//!   ([`Anchor`], [`pin_fixed`]).
//! - **Velocity tracking**: a clamped proportional controller that nudges a
//!   free-floating anchor toward a target velocity
//!   ([`command_velocity`]).
//!
//! Everything else — integration, collision, soft-body dynamics — belongs to
//! the engine behind the [`PhysicsBackend`] trait. Any engine binding (or a
//! test mock) that implements the trait can drive these helpers.
//!
//! # Anchor states
//!
//! ```text
//! create ──► Unbound ──attach──► Bound ──release──► Unbound ──attach──► ...
//!
//! pin_fixed ──► Fixed   (terminal: never re-attached, never force-driven)
//! ```
//!
//! Re-attaching after a release reuses the vertex set chosen at creation;
//! a different grip requires creating a new anchor.
//!
//! # Quick start
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use sim_anchor::{select_cluster, tracking_force, AnchorConfig};
//!
//! # fn main() -> sim_anchor::Result<()> {
//! // A 200-vertex strip of cloth along the x axis.
//! let mesh: Vec<Point3<f64>> = (0..200)
//!     .map(|i| Point3::new(f64::from(i) * 0.01, 0.0, 0.0))
//!     .collect();
//!
//! // Grip near the origin: 200 vertices => a cluster of 4.
//! let grip = select_cluster(&Point3::origin(), &mesh, None)?;
//! assert_eq!(grip.vertices.len(), 4);
//!
//! // Proportional force toward a target velocity, clamped per axis.
//! let config = AnchorConfig::default();
//! let force = tracking_force(
//!     &Vector3::zeros(),
//!     &Vector3::new(1.0, 0.0, 0.0),
//!     config.kd,
//!     config.max_force,
//! );
//! assert!(force.x.abs() <= config.max_force);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Single-threaded, synchronous, call-and-return. The caller owns the
//! simulation step loop and reissues velocity commands every step; nothing
//! here buffers engine state between calls.

#![doc(html_root_url = "https://docs.rs/sim-anchor/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
// Vertex counts converted to f64 for centroids; meshes are far below 2^52.
#![allow(clippy::cast_precision_loss)]

pub mod anchor;
pub mod backend;
pub mod config;
pub mod control;
pub mod error;
pub mod select;
pub mod types;

pub use anchor::{create_marker, pin_fixed, too_close, Anchor, VertexSelection};
pub use backend::PhysicsBackend;
pub use config::AnchorConfig;
pub use control::{command_velocity, tracking_force};
pub use error::AnchorError;
pub use select::{centroid_of, cluster_size, select_cluster, ClusterSelection};
pub use types::{AnchorState, BodyId, ConstraintId, DeformableId, Rgba, ShapeId};

/// Result type for anchor operations.
pub type Result<T> = std::result::Result<T, AnchorError>;
