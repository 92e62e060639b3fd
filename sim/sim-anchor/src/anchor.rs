//! Anchor creation and binding lifecycle.
//!
//! An [`Anchor`] is a small rigid marker body plus the set of mesh vertices
//! it grips. Creation resolves the vertex set (preset list, nearest-cluster
//! search, or none) and spawns the marker; [`Anchor::attach`] binds each
//! selected vertex to the marker with a simulator point constraint, and
//! [`Anchor::release`] removes them again. [`pin_fixed`] creates terminal
//! zero-mass pins that hold single vertices in place permanently.
//!
//! The vertex set chosen at creation is kept for the anchor's lifetime:
//! attach after release rebinds the same vertices. A different grip requires
//! creating a new anchor from a fresh selection.

use nalgebra::Point3;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::backend::PhysicsBackend;
use crate::config::AnchorConfig;
use crate::error::AnchorError;
use crate::select::{centroid_of, select_cluster};
use crate::types::{AnchorState, BodyId, ConstraintId, DeformableId, Rgba};
use crate::Result;

/// How an anchor picks the mesh vertices it grips.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VertexSelection {
    /// Grip exactly these vertex indices; the anchor positions itself at
    /// their centroid in the current mesh.
    Preset(Vec<usize>),
    /// Grip the cluster of vertices nearest the requested position.
    NearestCluster,
    /// Grip nothing. The marker is purely visual until a new anchor is made.
    Unbound,
}

impl VertexSelection {
    /// Resolve a selection from a per-slot preset table and the two policy
    /// flags, in priority order: preset, then nearest-cluster, then none.
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::PresetSlotOutOfBounds`] when presets are
    /// enabled and supplied but the table has no entry for `slot`.
    pub fn resolve(
        presets: Option<&[Vec<usize>]>,
        slot: usize,
        use_preset: bool,
        use_closest: bool,
    ) -> Result<Self> {
        if use_preset {
            if let Some(table) = presets {
                let vertices = table
                    .get(slot)
                    .ok_or(AnchorError::PresetSlotOutOfBounds {
                        slot,
                        slots: table.len(),
                    })?
                    .clone();
                return Ok(Self::Preset(vertices));
            }
        }
        if use_closest {
            Ok(Self::NearestCluster)
        } else {
            Ok(Self::Unbound)
        }
    }
}

/// A rigid marker body gripping (or pinning) part of a deformable mesh.
///
/// Constraint handles are tracked here, not queried from the engine, so
/// release is exact: only constraints this anchor created are removed.
#[derive(Debug, Clone)]
pub struct Anchor {
    body: BodyId,
    position: Point3<f64>,
    mass: f64,
    vertices: SmallVec<[usize; 8]>,
    constraints: SmallVec<[ConstraintId; 8]>,
    state: AnchorState,
}

impl Anchor {
    /// Create an anchor: resolve its vertex set and position, then spawn the
    /// marker body.
    ///
    /// The marker is created with the configured mass and radius in the
    /// inactive color, collision-enabled, and starts [`AnchorState::Unbound`]
    /// with no constraints; call [`Anchor::attach`] to bind it.
    ///
    /// Position resolution follows the selection policy: preset lists anchor
    /// at their centroid in `mesh`, [`VertexSelection::NearestCluster`] runs
    /// the cluster search seeded from `position` with no distance cap, and
    /// [`VertexSelection::Unbound`] keeps `position` as given.
    ///
    /// # Errors
    ///
    /// Selection errors from [`select_cluster`]/[`centroid_of`], or
    /// [`AnchorError::Backend`] from marker creation.
    pub fn create<B: PhysicsBackend + ?Sized>(
        backend: &mut B,
        config: &AnchorConfig,
        position: Point3<f64>,
        selection: VertexSelection,
        mesh: &[Point3<f64>],
    ) -> Result<Self> {
        let (position, vertices): (Point3<f64>, SmallVec<[usize; 8]>) = match selection {
            VertexSelection::Preset(indices) => {
                let centroid = centroid_of(mesh, &indices)?;
                (centroid, SmallVec::from_vec(indices))
            }
            VertexSelection::NearestCluster => {
                let cluster = select_cluster(&position, mesh, None)?;
                (cluster.centroid, cluster.vertices)
            }
            VertexSelection::Unbound => (position, SmallVec::new()),
        };

        let body = create_marker(
            backend,
            position,
            config.mass,
            config.radius,
            config.inactive_color,
            true,
        )?;
        info!(
            body = %body,
            vertices = vertices.len(),
            x = position.x,
            y = position.y,
            z = position.z,
            "created anchor"
        );

        Ok(Self {
            body,
            position,
            mass: config.mass,
            vertices,
            constraints: SmallVec::new(),
            state: AnchorState::Unbound,
        })
    }

    /// The marker body handle.
    #[must_use]
    pub const fn body(&self) -> BodyId {
        self.body
    }

    /// The resolved world position the marker was created at.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// The marker mass in kg.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// The mesh vertices this anchor grips.
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of currently active constraints.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AnchorState {
        self.state
    }

    /// Whether the marker can be force-driven: positive mass and not a
    /// fixed pin.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0 && !self.state.is_fixed()
    }

    /// Bind the selected vertices to the marker.
    ///
    /// Optionally recolors the marker to the active color first, then
    /// creates one point constraint per selected vertex. Over an empty
    /// vertex set this creates nothing and the anchor stays unbound.
    /// Attaching an already-bound anchor is a no-op.
    ///
    /// # Errors
    ///
    /// [`AnchorError::FixedAnchor`] for fixed pins, or
    /// [`AnchorError::Backend`] from the engine.
    pub fn attach<B: PhysicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        config: &AnchorConfig,
        deformable: DeformableId,
        recolor: bool,
    ) -> Result<()> {
        if self.state.is_fixed() {
            return Err(AnchorError::FixedAnchor(self.body));
        }
        if self.state.is_bound() {
            debug!(body = %self.body, "attach on bound anchor ignored");
            return Ok(());
        }
        if recolor {
            backend.set_color(self.body, config.active_color)?;
        }
        for &vertex in &self.vertices {
            let constraint = backend.create_vertex_constraint(deformable, vertex, self.body)?;
            self.constraints.push(constraint);
        }
        if !self.constraints.is_empty() {
            self.state = AnchorState::Bound;
        }
        info!(
            body = %self.body,
            constraints = self.constraints.len(),
            "attached anchor"
        );
        Ok(())
    }

    /// Remove every constraint this anchor created and recolor the marker
    /// to the inactive color.
    ///
    /// The marker body itself survives; the anchor returns to
    /// [`AnchorState::Unbound`] and can be re-attached to the same
    /// vertices. Releasing an already-released anchor is a no-op apart from
    /// the recolor, since the tracked constraint list is already empty.
    ///
    /// # Errors
    ///
    /// [`AnchorError::FixedAnchor`] for fixed pins, or
    /// [`AnchorError::Backend`] from the engine.
    pub fn release<B: PhysicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        config: &AnchorConfig,
    ) -> Result<()> {
        if self.state.is_fixed() {
            return Err(AnchorError::FixedAnchor(self.body));
        }
        let removed = self.constraints.len();
        for constraint in self.constraints.drain(..) {
            backend.remove_constraint(constraint)?;
        }
        backend.set_color(self.body, config.inactive_color)?;
        self.state = AnchorState::Unbound;
        info!(body = %self.body, removed, "released anchor");
        Ok(())
    }
}

/// Create a small spherical marker body at `position`.
///
/// A zero `mass` makes the marker immovable. The collision shape is only
/// requested for dynamic markers with `use_collision` set; otherwise the
/// marker is excluded from collision detection and just shows a grip
/// location.
///
/// # Errors
///
/// [`AnchorError::Backend`] from shape or body creation.
pub fn create_marker<B: PhysicsBackend + ?Sized>(
    backend: &mut B,
    position: Point3<f64>,
    mass: f64,
    radius: f64,
    rgba: Rgba,
    use_collision: bool,
) -> Result<BodyId> {
    let visual = backend.create_visual_sphere(radius, rgba)?;
    let collision = if mass > 0.0 && use_collision {
        Some(backend.create_collision_sphere(radius)?)
    } else {
        None
    };
    backend.create_rigid_body(mass, position, collision, visual)
}

/// Permanently pin mesh vertices in place.
///
/// For each vertex index, reads the deformable's current vertex position,
/// creates a zero-mass pin marker there in the fixed-pin color, and binds
/// that single vertex to it. The returned anchors are
/// [`AnchorState::Fixed`]: they never transition and are rejected by the
/// velocity controller.
///
/// # Errors
///
/// [`AnchorError::VertexOutOfBounds`] for indices missing from the mesh
/// snapshot, or [`AnchorError::Backend`] from the engine.
pub fn pin_fixed<B: PhysicsBackend + ?Sized>(
    backend: &mut B,
    config: &AnchorConfig,
    deformable: DeformableId,
    vertices: &[usize],
) -> Result<Vec<Anchor>> {
    let mesh = backend.mesh_positions(deformable)?;
    let mut pins = Vec::with_capacity(vertices.len());
    for &vertex in vertices {
        let position = *mesh.get(vertex).ok_or(AnchorError::VertexOutOfBounds {
            vertex,
            mesh_len: mesh.len(),
        })?;
        let body = create_marker(
            backend,
            position,
            0.0,
            config.pin_radius,
            config.fixed_color,
            true,
        )?;
        let constraint = backend.create_vertex_constraint(deformable, vertex, body)?;
        pins.push(Anchor {
            body,
            position,
            mass: 0.0,
            vertices: smallvec![vertex],
            constraints: smallvec![constraint],
            state: AnchorState::Fixed,
        });
    }
    info!(deformable = %deformable, pins = pins.len(), "pinned vertices");
    Ok(pins)
}

/// Whether two anchor positions violate the configured minimum spacing.
///
/// Callers placing several grippers on the same object use this to keep
/// markers from overlapping.
#[must_use]
pub fn too_close(a: &Point3<f64>, b: &Point3<f64>, config: &AnchorConfig) -> bool {
    (a - b).norm() < config.min_spacing
}
