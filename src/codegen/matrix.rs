//! Row-major matrix of expressions for vector/matrix-valued functions

use crate::{CodeGenError, Expr};

/// `rows x cols` expressions stored flat in row-major order
///
/// Entry `(r, c)` is written to `m[r * cols + c]` by the generated function.
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    entries: Vec<Expr>,
}

impl Matrix {
    /// Wrap a flat row-major entry list
    ///
    /// # Errors
    /// `ShapeMismatch` if `entries.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, entries: Vec<Expr>) -> Result<Self, CodeGenError> {
        if rows.checked_mul(cols) != Some(entries.len()) {
            return Err(CodeGenError::ShapeMismatch {
                rows,
                cols,
                len: entries.len(),
            });
        }
        Ok(Matrix {
            rows,
            cols,
            entries,
        })
    }

    /// An `n x 1` column vector
    pub fn column(entries: Vec<Expr>) -> Self {
        Matrix {
            rows: entries.len(),
            cols: 1,
            entries,
        }
    }

    /// Build from nested rows
    ///
    /// # Errors
    /// `ShapeMismatch` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> Result<Self, CodeGenError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return Err(CodeGenError::ShapeMismatch {
                rows: n_rows,
                cols: n_cols,
                len: rows.iter().map(Vec::len).sum(),
            });
        }
        let entries: Vec<Expr> = rows.into_iter().flatten().collect();
        Self::new(n_rows, n_cols, entries)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat row-major entries
    #[inline]
    pub fn entries(&self) -> &[Expr] {
        &self.entries
    }

    /// Entry at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&Expr> {
        if row < self.rows && col < self.cols {
            self.entries.get(row * self.cols + col)
        } else {
            None
        }
    }
}
