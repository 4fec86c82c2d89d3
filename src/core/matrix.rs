//! Dense matrices of expressions.
//!
//! Not a node kind: a matrix is a container that algorithms walk entry by
//! entry.

use std::sync::Arc;

use crate::core::Expr;
use crate::error::ExprError;

/// Row-major `rows x cols` matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<Arc<Expr>>,
}

impl DenseMatrix {
    /// # Errors
    ///
    /// Returns [`ExprError::InvalidMatrix`] if `entries` does not hold exactly
    /// `rows * cols` values.
    pub fn new(rows: usize, cols: usize, entries: Vec<Arc<Expr>>) -> Result<Self, ExprError> {
        if rows.checked_mul(cols) != Some(entries.len()) {
            return Err(ExprError::InvalidMatrix {
                rows,
                cols,
                len: entries.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            entries,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Arc<Expr>> {
        if row < self.rows && col < self.cols {
            self.entries.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Expr>> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    #[test]
    fn test_shape_checked() {
        let x = Expr::symbol("x");
        let m = DenseMatrix::new(1, 2, vec![x.clone(), Expr::integer(1)]).unwrap();
        assert_eq!(m.get(0, 0), Some(&x));
        assert_eq!(m.get(1, 0), None);
        assert_eq!(m.iter().count(), 2);

        let err = DenseMatrix::new(2, 2, vec![x]).unwrap_err();
        assert_eq!(
            err,
            ExprError::InvalidMatrix {
                rows: 2,
                cols: 2,
                len: 1
            }
        );
    }
}
