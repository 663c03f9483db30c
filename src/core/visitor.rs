//! Expression visitor pattern for AST traversal
//!
//! Provides a clean interface for walking the expression tree without
//! manually handling the recursive structure. Shared sub-expressions are
//! walked once per parent, exactly like rendering treats them.

use crate::core::symbol::Variable;
use crate::{Expr, ExprKind};
use rustc_hash::FxHashSet;

/// Trait for visiting expression nodes in the AST
///
/// Each method returns a boolean indicating whether to continue visiting children.
///
/// # Example
/// ```
/// use symb_codegen::{Expr, ExprVisitor, Variable, walk_expr};
///
/// struct ConstantSum(f64);
///
/// impl ExprVisitor for ConstantSum {
///     fn visit_constant(&mut self, n: f64) -> bool { self.0 += n; true }
///     fn visit_variable(&mut self, _v: &Variable) -> bool { true }
///     fn visit_composite(&mut self, _e: &Expr) -> bool { true }
/// }
///
/// let x = Variable::new("x");
/// let e = Expr::from(&x).pow(2.0);
/// let mut sum = ConstantSum(0.0);
/// walk_expr(&e, &mut sum);
/// assert_eq!(sum.0, 2.0);
/// ```
pub trait ExprVisitor {
    /// Visit a constant leaf
    fn visit_constant(&mut self, n: f64) -> bool;

    /// Visit a variable leaf
    fn visit_variable(&mut self, var: &Variable) -> bool;

    /// Visit any non-leaf node, returns true to visit its children
    fn visit_composite(&mut self, expr: &Expr) -> bool;
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children), children left to
/// right as stored. Every `Multiplication` exponent is visited, including the
/// constant `1` exponents the renderer leaves out. Numeric offsets and
/// coefficients stored inline in `Addition`/`Multiplication` are not nodes and
/// are skipped.
pub fn walk_expr<V: ExprVisitor>(expr: &Expr, visitor: &mut V) {
    match &expr.kind {
        ExprKind::Constant(n) => {
            visitor.visit_constant(*n);
        }
        ExprKind::Variable(v) => {
            visitor.visit_variable(v);
        }
        ExprKind::Addition { terms, .. } => {
            if visitor.visit_composite(expr) {
                for (term, _) in terms {
                    walk_expr(term, visitor);
                }
            }
        }
        ExprKind::Multiplication { factors, .. } => {
            if visitor.visit_composite(expr) {
                for (base, exponent) in factors {
                    walk_expr(base, visitor);
                    walk_expr(exponent, visitor);
                }
            }
        }
        ExprKind::Division(l, r) | ExprKind::Pow(l, r) | ExprKind::Binary(_, l, r) => {
            if visitor.visit_composite(expr) {
                walk_expr(l, visitor);
                walk_expr(r, visitor);
            }
        }
        ExprKind::Unary(_, arg) => {
            if visitor.visit_composite(expr) {
                walk_expr(arg, visitor);
            }
        }
        ExprKind::IfThenElse {
            condition,
            then_branch,
            else_branch,
        } => {
            if visitor.visit_composite(expr) {
                walk_expr(&condition.lhs, visitor);
                walk_expr(&condition.rhs, visitor);
                walk_expr(then_branch, visitor);
                walk_expr(else_branch, visitor);
            }
        }
        ExprKind::UninterpretedFunction { args, .. } => {
            if visitor.visit_composite(expr) {
                for arg in args {
                    walk_expr(arg, visitor);
                }
            }
        }
    }
}

/// A simple visitor that counts nodes
#[derive(Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit_constant(&mut self, _n: f64) -> bool {
        self.count += 1;
        true
    }

    fn visit_variable(&mut self, _var: &Variable) -> bool {
        self.count += 1;
        true
    }

    fn visit_composite(&mut self, _expr: &Expr) -> bool {
        self.count += 1;
        true
    }
}

/// A visitor that collects distinct variables in first-appearance order
#[derive(Default)]
pub struct VariableCollector {
    pub variables: Vec<Variable>,
    seen: FxHashSet<u64>,
}

impl ExprVisitor for VariableCollector {
    fn visit_constant(&mut self, _n: f64) -> bool {
        true
    }

    fn visit_variable(&mut self, var: &Variable) -> bool {
        if self.seen.insert(var.id()) {
            self.variables.push(var.clone());
        }
        true
    }

    fn visit_composite(&mut self, _expr: &Expr) -> bool {
        true
    }
}

/// Count the nodes of an expression (shared nodes counted per occurrence)
pub fn node_count(expr: &Expr) -> usize {
    let mut counter = NodeCounter::default();
    walk_expr(expr, &mut counter);
    counter.count
}

/// Collect the free variables of several expressions, in first-appearance order
///
/// Useful for building a parameter list when the caller has no fixed layout
/// in mind.
pub fn infer_parameters<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> Vec<Variable> {
    let mut collector = VariableCollector::default();
    for expr in exprs {
        walk_expr(expr, &mut collector);
    }
    collector.variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_node_counter() {
        let x = Variable::new("x");
        let expr = Expr::from(&x) + Expr::from(&x).pow(2.0);
        // Addition, x, Pow, x, 2
        assert_eq!(node_count(&expr), 5);
    }

    #[test]
    fn test_unit_exponents_are_nodes() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let expr = Expr::from(&x) * Expr::from(&y);
        // Multiplication, x, 1, y, 1
        assert_eq!(node_count(&expr), 5);
    }

    #[test]
    fn test_shared_nodes_counted_per_parent() {
        let x = Variable::new("x");
        let shared = Arc::new(Expr::from(&x).sin());
        let expr = Expr::division(Arc::clone(&shared), shared);
        // Division, sin, x, sin, x
        assert_eq!(node_count(&expr), 5);
    }

    #[test]
    fn test_variable_collector_order() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let a = Expr::from(&y) * Expr::from(&x);
        let b = Expr::from(&x).exp();
        assert_eq!(infer_parameters([&a, &b]), vec![y, x]);
    }

    #[test]
    fn test_collector_sees_condition_operands() {
        let x = Variable::new("x");
        let t = Variable::new("t");
        let cond = crate::Condition::new(crate::Comparison::Gt, Expr::from(&t), Expr::constant(0.0));
        let e = Expr::if_then_else(cond, Expr::from(&x), Expr::constant(0.0));
        assert_eq!(infer_parameters([&e]), vec![t, x]);
    }
}
