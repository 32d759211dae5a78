//! Proximity filter: drops cones that have no other cone nearby.
//!
//! Isolated detections are almost always sensor noise. Dropping them before
//! graph construction keeps the search from jumping to stray points.

use crate::cone::Cone;
use crate::distance::DistanceMatrix;

/// Cones that survived the proximity filter, in input order.
///
/// `original_indices[k]` is the index of `cones[k]` in the list the distance
/// matrix was built over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidCones {
    cones: Vec<Cone>,
    original_indices: Vec<usize>,
}

impl ValidCones {
    pub fn cones(&self) -> &[Cone] {
        &self.cones
    }

    pub fn original_indices(&self) -> &[usize] {
        &self.original_indices
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }

    /// Filtered index of the cone at `original` in the unfiltered list.
    pub fn position_of(&self, original: usize) -> Option<usize> {
        // Indices are strictly increasing.
        self.original_indices.binary_search(&original).ok()
    }
}

/// Keep every cone with at least one other cone within `max_distance`
/// (inclusive). A lone cone is always dropped.
pub fn filter_valid_cones(
    cones: &[Cone],
    distances: &DistanceMatrix,
    max_distance: f64,
) -> ValidCones {
    debug_assert_eq!(cones.len(), distances.len());

    let mut out = ValidCones::default();
    for (i, cone) in cones.iter().enumerate() {
        let has_neighbor = distances
            .row(i)
            .enumerate()
            .any(|(j, d)| j != i && d <= max_distance);
        if has_neighbor {
            out.cones.push(*cone);
            out.original_indices.push(i);
        }
    }

    tracing::debug!(
        "valid-cone filter kept {}/{} cones (radius {:.2})",
        out.len(),
        cones.len(),
        max_distance
    );
    out
}
