//! Square label-indexed matrix of co-mortality rates

use serde::Serialize;

/// Mortality rates (%) for pairs of labs, indexed by lab label on both axes
///
/// Cell `(i, j)` holds the in-hospital mortality among admissions abnormal in
/// both lab `i` and lab `j`; the diagonal holds the single-lab rate. Writes
/// go through [`CoMortalityMatrix::set_pair`], which fills both triangles, so
/// the matrix is symmetric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoMortalityMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CoMortalityMatrix {
    /// Create a zero-filled matrix for the given labels
    #[must_use]
    pub fn zeros(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self {
            labels,
            values: vec![vec![0.0; n]; n],
        }
    }

    /// Axis labels, in row order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rows of the matrix
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Value at row `i`, column `j`
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i)?.get(j).copied()
    }

    /// Value for a pair of labels
    #[must_use]
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<f64> {
        self.get(self.index_of(row)?, self.index_of(col)?)
    }

    /// Position of a label on the axes
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Set cells `(i, j)` and `(j, i)`
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    pub fn set_pair(&mut self, i: usize, j: usize, value: f64) {
        self.values[i][j] = value;
        self.values[j][i] = value;
    }

    /// Largest cell value, 0 for an empty matrix
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }

    /// Whether every cell equals its transposed cell
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|i| (0..i).all(|j| self.values[i][j] == self.values[j][i]))
    }
}
