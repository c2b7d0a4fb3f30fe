//! Dense pairwise cosine similarity.
//!
//! The matrix is n x n f32, built once per corpus. Rows are computed in
//! parallel from an inverted index over term ids, so each row costs the
//! postings it touches rather than n full dot products.

use crate::vectorizer::SparseVector;
use data_loader::Row;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Square, symmetric matrix of cosine similarities in [0, 1].
///
/// The diagonal is always 1, including rows whose vector is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute every pair from unit-length document vectors.
    #[instrument(skip_all, fields(documents = vectors.len()))]
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();

        let vocab_len = vectors
            .iter()
            .flat_map(|v| v.entries().iter().map(|&(term, _)| term as usize + 1))
            .max()
            .unwrap_or(0);
        let mut postings: Vec<Vec<(Row, f32)>> = vec![Vec::new(); vocab_len];
        for (row, vector) in vectors.iter().enumerate() {
            for &(term, weight) in vector.entries() {
                postings[term as usize].push((row, weight));
            }
        }

        let mut values = vec![0.0f32; size * size];
        values
            .par_chunks_mut(size.max(1))
            .enumerate()
            .for_each(|(row, out)| {
                for &(term, weight) in vectors[row].entries() {
                    for &(other, other_weight) in &postings[term as usize] {
                        out[other] += weight * other_weight;
                    }
                }
                for value in out.iter_mut() {
                    *value = value.clamp(0.0, 1.0);
                }
                out[row] = 1.0;
            });

        debug!(size, "Computed similarity matrix");
        Self { size, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Similarity of `row` to every row, indexed by column
    pub fn row(&self, row: Row) -> Option<&[f32]> {
        if row >= self.size {
            return None;
        }
        Some(&self.values[row * self.size..(row + 1) * self.size])
    }

    pub fn get(&self, row: Row, col: Row) -> Option<f32> {
        self.row(row).and_then(|values| values.get(col).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(entries: Vec<(u32, f32)>) -> SparseVector {
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        SparseVector::from_entries(entries.into_iter().map(|(t, w)| (t, w / norm)).collect())
    }

    #[test]
    fn test_identity_and_symmetry() {
        let vectors = vec![
            unit(vec![(0, 1.0), (1, 2.0)]),
            unit(vec![(1, 1.0), (2, 1.0)]),
            unit(vec![(3, 5.0)]),
        ];
        let matrix = SimilarityMatrix::from_vectors(&vectors);

        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert_eq!(matrix.get(0, 2), Some(0.0));
        let expected = vectors[0].dot(&vectors[1]);
        assert!((matrix.get(0, 1).unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_empty_vector_row() {
        let vectors = vec![SparseVector::default(), unit(vec![(0, 1.0)])];
        let matrix = SimilarityMatrix::from_vectors(&vectors);
        assert_eq!(matrix.row(0), Some(&[1.0, 0.0][..]));
        assert_eq!(matrix.row(1), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn test_out_of_range() {
        let matrix = SimilarityMatrix::from_vectors(&[unit(vec![(0, 1.0)])]);
        assert!(matrix.row(1).is_none());
        assert!(matrix.get(0, 1).is_none());
    }
}
