//! Radius neighbor graph over the filtered cone set.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::filter::ValidCones;

/// One graph edge: filtered index of the neighbor and its distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Per-cone neighbor lists, ascending by distance then by index.
///
/// Indices live in the filtered index space of the [`ValidCones`] the graph
/// was built from. A cone never lists itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborGraph {
    lists: Vec<Vec<Neighbor>>,
}

impl NeighborGraph {
    /// Build the graph from a distance matrix over the *unfiltered* cones.
    ///
    /// Distances are looked up through `valid.original_indices()`, so the
    /// matrix does not have to be rebuilt after filtering.
    pub fn build(valid: &ValidCones, distances: &DistanceMatrix, max_distance: f64) -> Self {
        let original = valid.original_indices();
        let lists: Vec<Vec<Neighbor>> = original
            .iter()
            .enumerate()
            .map(|(a, &oa)| {
                let mut list: Vec<Neighbor> = original
                    .iter()
                    .enumerate()
                    .filter(|&(b, _)| b != a)
                    .filter_map(|(b, &ob)| {
                        let d = distances.get(oa, ob);
                        (d <= max_distance).then_some(Neighbor {
                            index: b,
                            distance: d,
                        })
                    })
                    .collect();
                list.sort_by(|x, y| {
                    x.distance
                        .total_cmp(&y.distance)
                        .then_with(|| x.index.cmp(&y.index))
                });
                list
            })
            .collect();

        let n_edges: usize = lists.iter().map(Vec::len).sum();
        tracing::debug!(
            "neighbor graph: {} nodes, {} directed edges",
            lists.len(),
            n_edges
        );
        Self { lists }
    }

    /// Neighbors of the cone at filtered index `i`.
    pub fn neighbors(&self, i: usize) -> &[Neighbor] {
        self.lists.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
