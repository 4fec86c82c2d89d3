//! Interned symbols.
//!
//! Symbols are interned globally: each name maps to exactly one key, and
//! equality and hashing use that key only.
//!
//! ```
//! use symb_visit::{symb, symb_dummy};
//!
//! let x = symb("doc_x");
//! assert_eq!(x, symb("doc_x"));
//! assert_ne!(symb_dummy("doc_x"), x);
//! ```

pub mod registry;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use slotmap::{DefaultKey, Key};

use crate::core::Expr;

pub use registry::{symb, symb_dummy, symb_get, symbol_count};

/// An interned variable name
#[derive(Clone)]
pub struct Symbol {
    pub(crate) key: DefaultKey,
    pub(crate) name: Arc<str>,
}

impl Symbol {
    /// Unique id of this symbol
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.key.data().as_ffi()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrap the symbol in a fresh expression node
    #[must_use]
    pub fn to_expr(&self) -> Arc<Expr> {
        Expr::from_symbol(self.clone())
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

// Alphabetical, ties (dummies sharing a name) broken by id
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id().cmp(&other.id()))
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}#{})", self.name, self.id())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
