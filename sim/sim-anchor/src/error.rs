//! Error types for anchor operations.

use crate::types::BodyId;
use thiserror::Error;

/// Errors that can occur while selecting, creating, or driving anchors.
///
/// Engine-side failures are not interpreted here: whatever the simulator
/// reports is carried verbatim in [`AnchorError::Backend`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnchorError {
    /// The mesh snapshot has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A vertex index set was empty where at least one vertex is required.
    #[error("no vertices selected")]
    EmptySelection,

    /// The distance cap excluded every vertex of the selected cluster.
    #[error("no mesh vertices within {max_dist} of the target position")]
    NoVerticesInRange {
        /// The distance cap that filtered out the whole cluster.
        max_dist: f64,
    },

    /// A vertex index does not exist in the mesh snapshot.
    #[error("vertex index {vertex} out of bounds for mesh of {mesh_len} vertices")]
    VertexOutOfBounds {
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices in the mesh snapshot.
        mesh_len: usize,
    },

    /// An anchor slot index has no entry in the preset vertex table.
    #[error("anchor slot {slot} out of bounds for preset table of {slots} slots")]
    PresetSlotOutOfBounds {
        /// The requested anchor slot.
        slot: usize,
        /// Number of slots in the preset table.
        slots: usize,
    },

    /// The operation is not permitted on a fixed (zero-mass) anchor.
    #[error("anchor {0} is a fixed pin and cannot be re-attached or force-controlled")]
    FixedAnchor(BodyId),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// The external simulator reported a failure.
    #[error("backend error: {reason}")]
    Backend {
        /// The engine's failure message, carried verbatim.
        reason: String,
    },
}

impl AnchorError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a backend error from an engine failure message.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }

    /// Check if this error originated in the external simulator.
    #[must_use]
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// Check if this error came from vertex selection (empty mesh, empty
    /// selection, or a distance cap excluding the whole cluster).
    #[must_use]
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Self::EmptyMesh | Self::EmptySelection | Self::NoVerticesInRange { .. }
        )
    }
}
