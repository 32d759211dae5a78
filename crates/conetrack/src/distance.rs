use nalgebra::DMatrix;

use crate::cone::Cone;

/// Pairwise Euclidean distances over a fixed cone list.
///
/// Square, symmetric and zero on the diagonal. Each pair is computed once and
/// mirrored, so `get(i, j) == get(j, i)` holds bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    mat: DMatrix<f64>,
}

impl DistanceMatrix {
    pub fn from_cones(cones: &[Cone]) -> Self {
        let n = cones.len();
        let mut mat = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cones[i].distance_to(&cones[j]);
                mat[(i, j)] = d;
                mat[(j, i)] = d;
            }
        }
        Self { mat }
    }

    /// Number of cones the matrix was built over.
    pub fn len(&self) -> usize {
        self.mat.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.mat.nrows() == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.mat[(i, j)]
    }

    /// Distances from cone `i` to every cone, in input order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |j| self.mat[(i, j)])
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.mat
    }
}
