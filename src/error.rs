//! Error types for node construction.
//!
//! Dispatch, traversal and rewrite are infallible for well-formed trees; only
//! building nodes from untrusted shapes can fail.

use thiserror::Error;

use crate::core::TypeCode;

/// Errors raised while constructing expression nodes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Matrix dimensions don't match the number of entries
    #[error("invalid matrix: {rows}x{cols} does not hold {len} entries")]
    InvalidMatrix {
        rows: usize,
        cols: usize,
        len: usize,
    },

    /// A node was rebuilt from an argument list of the wrong length
    #[error("{kind:?} takes {expected} argument(s), got {got}")]
    ArityMismatch {
        kind: TypeCode,
        expected: usize,
        got: usize,
    },

    /// A rational number was requested with a zero denominator
    #[error("division by zero in rational constructor")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ExprError::InvalidMatrix {
            rows: 2,
            cols: 3,
            len: 5,
        };
        assert_eq!(err.to_string(), "invalid matrix: 2x3 does not hold 5 entries");

        let err = ExprError::ArityMismatch {
            kind: TypeCode::ATan2,
            expected: 2,
            got: 3,
        };
        assert_eq!(err.to_string(), "ATan2 takes 2 argument(s), got 3");
    }
}
