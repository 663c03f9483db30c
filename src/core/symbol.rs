//! Variables: the free symbols an expression is evaluated over
//!
//! Every call to [`Variable::new`] yields a distinct identity, even for equal
//! names. Code generation keys its parameter layout on that identity, never on
//! the name.
//!
//! # Example
//! ```
//! use symb_codegen::Variable;
//!
//! let x = Variable::new("x");
//! let other_x = Variable::new("x");
//! assert_ne!(x, other_x);
//! assert_eq!(x.name(), other_x.name());
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Expr;

static VARIABLE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_variable_id() -> u64 {
    VARIABLE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A symbolic variable with an opaque unique id
///
/// Equality and hashing use the id only.
#[derive(Debug, Clone)]
pub struct Variable {
    id: u64,
    name: Arc<str>,
}

impl Variable {
    /// Create a fresh variable
    pub fn new(name: impl AsRef<str>) -> Self {
        Variable {
            id: next_variable_id(),
            name: Arc::from(name.as_ref()),
        }
    }

    /// The unique id of this variable
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The display name (not necessarily unique)
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Variable {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<Variable> for Expr {
    fn from(v: Variable) -> Self {
        Expr::variable(&v)
    }
}

impl From<&Variable> for Expr {
    fn from(v: &Variable) -> Self {
        Expr::variable(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_not_name() {
        let a = Variable::new("a");
        let a2 = Variable::new("a");
        assert_ne!(a.id(), a2.id());
        assert_eq!(a, a.clone());

        let set: HashSet<Variable> = [a.clone(), a2, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_uses_name() {
        let theta = Variable::new("theta");
        assert_eq!(theta.to_string(), "theta");
    }
}
