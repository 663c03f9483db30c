//! Expression constructors.
//!
//! Provides all constructor methods for building expressions. None of them
//! simplify: what goes in is exactly what the generator will see.

use std::sync::Arc;

use super::{BinaryFunction, Condition, Expr, ExprKind, UnaryFunction, next_id};
use crate::core::symbol::Variable;

impl Expr {
    /// Create a new expression with fresh ID
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        Self { id: next_id(), kind }
    }

    /// Get the unique ID of the expression node
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Get the node kind
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    // -------------------------------------------------------------------------
    // Accessor methods
    // -------------------------------------------------------------------------

    /// Check if expression is a constant and return its value
    #[inline]
    #[must_use]
    pub const fn as_constant(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Constant(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this expression is exactly the constant one
    #[inline]
    pub fn is_one(&self) -> bool {
        self.as_constant() == Some(1.0)
    }

    /// Return the variable if this node is one
    #[inline]
    pub const fn as_variable(&self) -> Option<&Variable> {
        match &self.kind {
            ExprKind::Variable(v) => Some(v),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Leaf constructors
    // -------------------------------------------------------------------------

    /// Create a constant expression
    #[must_use]
    pub fn constant(n: f64) -> Self {
        Self::new(ExprKind::Constant(n))
    }

    /// Create a variable expression
    pub fn variable(v: &Variable) -> Self {
        Self::new(ExprKind::Variable(v.clone()))
    }

    // -------------------------------------------------------------------------
    // N-ary constructors
    // -------------------------------------------------------------------------

    /// Create `constant + sum(coeff_i * term_i)`, terms kept in the given order
    pub fn addition<E>(constant: f64, terms: impl IntoIterator<Item = (E, f64)>) -> Self
    where
        E: Into<Arc<Expr>>,
    {
        Self::new(ExprKind::Addition {
            constant,
            terms: terms.into_iter().map(|(e, c)| (e.into(), c)).collect(),
        })
    }

    /// Create `constant * prod(base_i ^ exponent_i)`, factors kept in the given order
    pub fn multiplication<B, X>(constant: f64, factors: impl IntoIterator<Item = (B, X)>) -> Self
    where
        B: Into<Arc<Expr>>,
        X: Into<Arc<Expr>>,
    {
        Self::new(ExprKind::Multiplication {
            constant,
            factors: factors
                .into_iter()
                .map(|(b, x)| (b.into(), x.into()))
                .collect(),
        })
    }

    // -------------------------------------------------------------------------
    // Binary constructors
    // -------------------------------------------------------------------------

    /// Create `numerator / denominator`
    pub fn division(numerator: impl Into<Arc<Expr>>, denominator: impl Into<Arc<Expr>>) -> Self {
        Self::new(ExprKind::Division(numerator.into(), denominator.into()))
    }

    /// Create `base ^ exponent` as a dedicated power node
    pub fn power(base: impl Into<Arc<Expr>>, exponent: impl Into<Arc<Expr>>) -> Self {
        Self::new(ExprKind::Pow(base.into(), exponent.into()))
    }

    /// Raise to a power: `x.pow(2.0)`
    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Self::power(self, exponent.into())
    }

    /// Apply a single-argument function
    pub fn unary(f: UnaryFunction, arg: impl Into<Arc<Expr>>) -> Self {
        Self::new(ExprKind::Unary(f, arg.into()))
    }

    /// Apply a two-argument function
    pub fn binary(
        f: BinaryFunction,
        first: impl Into<Arc<Expr>>,
        second: impl Into<Arc<Expr>>,
    ) -> Self {
        Self::new(ExprKind::Binary(f, first.into(), second.into()))
    }

    // -------------------------------------------------------------------------
    // Constructs with no numeric rendering
    // -------------------------------------------------------------------------

    /// Create `if condition then then_branch else else_branch`
    pub fn if_then_else(
        condition: Condition,
        then_branch: impl Into<Arc<Expr>>,
        else_branch: impl Into<Arc<Expr>>,
    ) -> Self {
        Self::new(ExprKind::IfThenElse {
            condition,
            then_branch: then_branch.into(),
            else_branch: else_branch.into(),
        })
    }

    /// Create an application of an opaque, user-named function
    pub fn uninterpreted<E>(name: impl Into<String>, args: impl IntoIterator<Item = E>) -> Self
    where
        E: Into<Arc<Expr>>,
    {
        Self::new(ExprKind::UninterpretedFunction {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    // -------------------------------------------------------------------------
    // Elementary function helpers
    // -------------------------------------------------------------------------

    pub fn abs(self) -> Self {
        Self::unary(UnaryFunction::Abs, self)
    }

    pub fn log(self) -> Self {
        Self::unary(UnaryFunction::Log, self)
    }

    pub fn exp(self) -> Self {
        Self::unary(UnaryFunction::Exp, self)
    }

    pub fn sqrt(self) -> Self {
        Self::unary(UnaryFunction::Sqrt, self)
    }

    pub fn sin(self) -> Self {
        Self::unary(UnaryFunction::Sin, self)
    }

    pub fn cos(self) -> Self {
        Self::unary(UnaryFunction::Cos, self)
    }

    pub fn tan(self) -> Self {
        Self::unary(UnaryFunction::Tan, self)
    }

    pub fn asin(self) -> Self {
        Self::unary(UnaryFunction::Asin, self)
    }

    pub fn acos(self) -> Self {
        Self::unary(UnaryFunction::Acos, self)
    }

    pub fn atan(self) -> Self {
        Self::unary(UnaryFunction::Atan, self)
    }

    pub fn sinh(self) -> Self {
        Self::unary(UnaryFunction::Sinh, self)
    }

    pub fn cosh(self) -> Self {
        Self::unary(UnaryFunction::Cosh, self)
    }

    pub fn tanh(self) -> Self {
        Self::unary(UnaryFunction::Tanh, self)
    }

    pub fn ceil(self) -> Self {
        Self::unary(UnaryFunction::Ceil, self)
    }

    pub fn floor(self) -> Self {
        Self::unary(UnaryFunction::Floor, self)
    }

    /// `atan2(self, other)`
    pub fn atan2(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryFunction::Atan2, self, other.into())
    }

    pub fn min(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryFunction::Min, self, other.into())
    }

    pub fn max(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryFunction::Max, self, other.into())
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::constant(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids() {
        let a = Expr::constant(1.0);
        let b = Expr::constant(1.0);
        assert_ne!(a.id(), b.id());
        // Structurally equal all the same
        assert_eq!(a, b);
        assert!(a.is_one());
    }

    #[test]
    fn test_shared_child_keeps_identity() {
        let x = Variable::new("x");
        let shared = Arc::new(Expr::from(&x).sin());
        let e = Expr::division(Arc::clone(&shared), Arc::clone(&shared));
        match e.kind() {
            ExprKind::Division(n, d) => {
                assert_eq!(n.id(), d.id());
                assert!(Arc::ptr_eq(n, d));
            }
            other => panic!("expected division, got {other:?}"),
        }
    }

    #[test]
    fn test_terms_keep_insertion_order() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let e = Expr::addition(3.0, [(Expr::from(&y), 2.0), (Expr::from(&x), 1.0)]);
        let ExprKind::Addition { constant, terms } = e.kind() else {
            panic!("expected addition");
        };
        assert_eq!(*constant, 3.0);
        assert_eq!(terms[0].0.as_variable(), Some(&y));
        assert_eq!(terms[1].0.as_variable(), Some(&x));
    }
}
