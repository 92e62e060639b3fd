//! Nearest-cluster vertex selection.
//!
//! An anchor does not grip a single mesh vertex: under solver jitter a
//! one-vertex grip makes the anchor position noisy, and on dense meshes it
//! concentrates the constraint force on one particle. Instead the selector
//! picks a small cluster whose size scales with mesh density — one vertex
//! per 50 mesh vertices, at least one — and anchors at the cluster centroid.
//!
//! # Algorithm
//!
//! ```text
//! k = min(N, max(1, N / 50))
//! take the k vertices with smallest Euclidean distance to the target
//! optionally drop vertices beyond the distance cap
//! centroid of the survivors = resolved anchor position
//! ```
//!
//! Selection is a partial sort: the *set* of the k closest vertices is
//! deterministic up to distance ties, but their order is not guaranteed.

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::AnchorError;
use crate::Result;

/// Vertices per cluster member; one anchor vertex per this many mesh vertices.
const VERTICES_PER_PIN: usize = 50;

/// Result of a nearest-cluster selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterSelection {
    /// Mean position of the selected vertices; the resolved anchor position.
    pub centroid: Point3<f64>,
    /// Indices of the selected mesh vertices.
    pub vertices: SmallVec<[usize; 8]>,
}

/// Number of vertices an anchor grips on a mesh of `mesh_len` vertices.
///
/// `min(N, max(1, N / 50))`: density-proportional, never zero for a
/// non-empty mesh. A 200-vertex mesh yields 4, a 10-vertex mesh yields 1.
#[must_use]
pub const fn cluster_size(mesh_len: usize) -> usize {
    let per_density = mesh_len / VERTICES_PER_PIN;
    let at_least_one = if per_density > 1 { per_density } else { 1 };
    if at_least_one < mesh_len {
        at_least_one
    } else {
        mesh_len
    }
}

/// Select the cluster of mesh vertices closest to `target`.
///
/// Computes the Euclidean distance from `target` to every vertex, keeps the
/// [`cluster_size`] closest, and optionally drops any kept vertex farther
/// than `max_dist`. The returned centroid is the mean position of the
/// surviving vertices.
///
/// # Errors
///
/// - [`AnchorError::EmptyMesh`] if `mesh` has no vertices.
/// - [`AnchorError::NoVerticesInRange`] if `max_dist` excludes the entire
///   cluster. The degenerate mean-of-nothing centroid is never produced.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use sim_anchor::select_cluster;
///
/// # fn main() -> sim_anchor::Result<()> {
/// let mesh = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ];
/// // Small mesh: cluster size 1, nearest vertex wins.
/// let selection = select_cluster(&Point3::new(0.9, 0.0, 0.0), &mesh, None)?;
/// assert_eq!(selection.vertices.as_slice(), &[1]);
/// # Ok(())
/// # }
/// ```
pub fn select_cluster(
    target: &Point3<f64>,
    mesh: &[Point3<f64>],
    max_dist: Option<f64>,
) -> Result<ClusterSelection> {
    if mesh.is_empty() {
        return Err(AnchorError::EmptyMesh);
    }

    let k = cluster_size(mesh.len());
    let mut by_dist: Vec<(usize, f64)> = mesh
        .iter()
        .enumerate()
        .map(|(index, point)| (index, (point - target).norm()))
        .collect();

    // Partial selection: everything at or before index k-1 is among the k
    // smallest distances. Ties across the pivot break arbitrarily.
    if k < by_dist.len() {
        by_dist.select_nth_unstable_by(k - 1, |a, b| a.1.total_cmp(&b.1));
    }

    let mut vertices = SmallVec::new();
    let mut sum = Vector3::zeros();
    let mut dropped = 0usize;
    for &(index, dist) in &by_dist[..k] {
        if let Some(cap) = max_dist {
            if dist > cap {
                dropped += 1;
                continue;
            }
        }
        vertices.push(index);
        sum += mesh[index].coords;
    }

    if dropped > 0 {
        warn!(
            dropped,
            cluster = k,
            "distance cap excluded selected vertices"
        );
    }
    if vertices.is_empty() {
        // k >= 1, so only the cap can empty the cluster.
        return Err(AnchorError::NoVerticesInRange {
            max_dist: max_dist.unwrap_or(f64::INFINITY),
        });
    }

    let centroid = Point3::from(sum / vertices.len() as f64);
    Ok(ClusterSelection { centroid, vertices })
}

/// Mean position of the given mesh vertices.
///
/// Used to resolve the anchor position for preset vertex lists.
///
/// # Errors
///
/// - [`AnchorError::EmptySelection`] if `indices` is empty.
/// - [`AnchorError::VertexOutOfBounds`] if any index does not exist in the
///   mesh snapshot.
pub fn centroid_of(mesh: &[Point3<f64>], indices: &[usize]) -> Result<Point3<f64>> {
    if indices.is_empty() {
        return Err(AnchorError::EmptySelection);
    }
    let mut sum = Vector3::zeros();
    for &index in indices {
        let point = mesh.get(index).ok_or(AnchorError::VertexOutOfBounds {
            vertex: index,
            mesh_len: mesh.len(),
        })?;
        sum += point.coords;
    }
    Ok(Point3::from(sum / indices.len() as f64))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Deterministic scattered mesh: no two vertices equidistant from origin.
    fn scattered_mesh(n: usize) -> Vec<Point3<f64>> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Point3::new(
                    (t * 0.37).sin() * (1.0 + t * 0.01),
                    (t * 0.71).cos() * (1.0 + t * 0.02),
                    (t * 0.13).sin() * (1.0 + t * 0.03),
                )
            })
            .collect()
    }

    #[test]
    fn test_cluster_size_law() {
        assert_eq!(cluster_size(1), 1);
        assert_eq!(cluster_size(10), 1);
        assert_eq!(cluster_size(49), 1);
        assert_eq!(cluster_size(50), 1);
        assert_eq!(cluster_size(100), 2);
        assert_eq!(cluster_size(200), 4);
        assert_eq!(cluster_size(1000), 20);
    }

    #[test]
    fn test_selects_expected_count() {
        let target = Point3::origin();
        for n in [1usize, 7, 50, 120, 200, 500] {
            let mesh = scattered_mesh(n);
            let selection = select_cluster(&target, &mesh, None).unwrap();
            assert_eq!(selection.vertices.len(), cluster_size(n), "mesh of {n}");
        }
    }

    #[test]
    fn test_selects_the_k_closest() {
        let target = Point3::new(0.3, -0.2, 0.1);
        let mesh = scattered_mesh(200);
        let selection = select_cluster(&target, &mesh, None).unwrap();

        let mut dists: Vec<f64> = mesh.iter().map(|p| (p - target).norm()).collect();
        dists.sort_by(f64::total_cmp);

        // Every selected vertex must be at least as close as the (k+1)-th
        // smallest distance, regardless of tie order.
        let k = selection.vertices.len();
        let bound = dists[k];
        for &v in &selection.vertices {
            assert!((mesh[v] - target).norm() <= bound);
        }
    }

    #[test]
    fn test_centroid_is_mean_of_selection() {
        let target = Point3::origin();
        let mesh = scattered_mesh(200);
        let selection = select_cluster(&target, &mesh, None).unwrap();

        let mut sum = Vector3::zeros();
        for &v in &selection.vertices {
            sum += mesh[v].coords;
        }
        let mean = Point3::from(sum / selection.vertices.len() as f64);
        assert_relative_eq!(selection.centroid, mean, epsilon = 1e-12);
    }

    #[test]
    fn test_single_vertex_mesh() {
        let mesh = vec![Point3::new(5.0, 5.0, 5.0)];
        let selection = select_cluster(&Point3::origin(), &mesh, None).unwrap();
        assert_eq!(selection.vertices.as_slice(), &[0]);
        assert_relative_eq!(selection.centroid, mesh[0]);
    }

    #[test]
    fn test_empty_mesh_is_an_error() {
        let err = select_cluster(&Point3::origin(), &[], None).unwrap_err();
        assert_eq!(err, AnchorError::EmptyMesh);
    }

    #[test]
    fn test_cap_below_all_distances_is_an_error() {
        let mesh = scattered_mesh(200);
        // Every vertex of the scattered mesh is at least ~0.5 from this point.
        let target = Point3::new(100.0, 100.0, 100.0);
        let err = select_cluster(&target, &mesh, Some(1e-6)).unwrap_err();
        assert!(matches!(err, AnchorError::NoVerticesInRange { .. }));
    }

    #[test]
    fn test_cap_shrinks_cluster() {
        // Two vertices next to the target, the rest far away. Cluster size
        // for 100 vertices is 2; the cap keeps both near vertices.
        let mut mesh = vec![Point3::new(0.0, 0.0, 0.01), Point3::new(0.0, 0.0, 0.02)];
        mesh.extend((0..98).map(|i| Point3::new(10.0 + i as f64, 0.0, 0.0)));

        let full = select_cluster(&Point3::origin(), &mesh, None).unwrap();
        assert_eq!(full.vertices.len(), 2);

        // A cap between the two near vertices shrinks the cluster to one.
        let capped = select_cluster(&Point3::origin(), &mesh, Some(0.015)).unwrap();
        assert_eq!(capped.vertices.as_slice(), &[0]);
        assert_relative_eq!(capped.centroid, mesh[0]);
    }

    #[test]
    fn test_centroid_of_preset() {
        let mesh = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let centroid = centroid_of(&mesh, &[1, 2]).unwrap();
        assert_relative_eq!(centroid, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_centroid_of_rejects_bad_input() {
        let mesh = vec![Point3::origin()];
        assert_eq!(
            centroid_of(&mesh, &[]).unwrap_err(),
            AnchorError::EmptySelection
        );
        assert_eq!(
            centroid_of(&mesh, &[3]).unwrap_err(),
            AnchorError::VertexOutOfBounds {
                vertex: 3,
                mesh_len: 1
            }
        );
    }
}
