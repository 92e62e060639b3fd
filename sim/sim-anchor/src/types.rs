//! Handle and state types shared across the crate.
//!
//! Simulator handles are opaque newtypes over `u64`. The engine behind the
//! [`PhysicsBackend`](crate::PhysicsBackend) trait mints them; this crate
//! only stores and passes them back.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a rigid body in the external simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    /// Create a new body ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for BodyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Unique identifier for a collision or visual shape in the external simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeId(pub u64);

impl ShapeId {
    /// Create a new shape ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ShapeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shape({})", self.0)
    }
}

/// Unique identifier for a point constraint binding a mesh vertex to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintId(pub u64);

impl ConstraintId {
    /// Create a new constraint ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ConstraintId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Constraint({})", self.0)
    }
}

/// Unique identifier for a deformable object in the external simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeformableId(pub u64);

impl DeformableId {
    /// Create a new deformable ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for DeformableId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DeformableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deformable({})", self.0)
    }
}

/// An RGBA color with components in `[0, 1]`.
///
/// Anchor markers encode their lifecycle state visually; the three state
/// colors live in [`AnchorConfig`](crate::AnchorConfig).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
    /// Alpha component (1 = opaque).
    pub a: f64,
}

impl Rgba {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[must_use]
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Lifecycle state of an anchor.
///
/// Transitions are driven by [`Anchor::attach`](crate::Anchor::attach) and
/// [`Anchor::release`](crate::Anchor::release); `Fixed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnchorState {
    /// Marker exists but no constraints are active.
    Unbound,
    /// Vertex constraints are active; the anchor grips the deformable.
    Bound,
    /// Zero-mass permanent pin. Never re-attached, never force-controlled.
    Fixed,
}

impl AnchorState {
    /// Check whether constraints are currently active.
    #[must_use]
    pub const fn is_bound(self) -> bool {
        matches!(self, Self::Bound)
    }

    /// Check whether this is a terminal fixed pin.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed)
    }
}
