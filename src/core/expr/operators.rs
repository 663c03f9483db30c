//! Operator overloading for building expressions
//!
//! `+`/`-` append terms to an `Addition`, `*` appends factors to a
//! `Multiplication`. A direct `Addition`/`Multiplication` operand is
//! flattened, two constants collapse to one. That is all: `/` always creates a
//! `Division` node and nothing is sorted or merged.

use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use super::{Expr, ExprKind};

type Terms = Vec<(Arc<Expr>, f64)>;
type Factors = Vec<(Arc<Expr>, Arc<Expr>)>;

fn addition_parts(e: Expr) -> (f64, Terms) {
    let Expr { id, kind } = e;
    match kind {
        ExprKind::Constant(c) => (c, Vec::new()),
        ExprKind::Addition { constant, terms } => (constant, terms),
        kind => (0.0, vec![(Arc::new(Expr { id, kind }), 1.0)]),
    }
}

fn multiplication_parts(e: Expr) -> (f64, Factors) {
    let Expr { id, kind } = e;
    match kind {
        ExprKind::Constant(c) => (c, Vec::new()),
        ExprKind::Multiplication { constant, factors } => (constant, factors),
        kind => (
            1.0,
            vec![(Arc::new(Expr { id, kind }), Arc::new(Expr::constant(1.0)))],
        ),
    }
}

/// `lhs + sign * rhs`
fn combine_sum(lhs: Expr, rhs: Expr, sign: f64) -> Expr {
    let (lhs_constant, mut terms) = addition_parts(lhs);
    let (rhs_constant, rhs_terms) = addition_parts(rhs);
    terms.extend(rhs_terms.into_iter().map(|(e, c)| (e, sign * c)));
    let constant = lhs_constant + sign * rhs_constant;
    if terms.is_empty() {
        Expr::constant(constant)
    } else {
        Expr::new(ExprKind::Addition { constant, terms })
    }
}

fn combine_product(lhs: Expr, rhs: Expr) -> Expr {
    let (lhs_constant, mut factors) = multiplication_parts(lhs);
    let (rhs_constant, rhs_factors) = multiplication_parts(rhs);
    factors.extend(rhs_factors);
    let constant = lhs_constant * rhs_constant;
    if factors.is_empty() {
        Expr::constant(constant)
    } else {
        Expr::new(ExprKind::Multiplication { constant, factors })
    }
}

fn plus(lhs: Expr, rhs: Expr) -> Expr {
    combine_sum(lhs, rhs, 1.0)
}

fn minus(lhs: Expr, rhs: Expr) -> Expr {
    combine_sum(lhs, rhs, -1.0)
}

fn divide(lhs: Expr, rhs: Expr) -> Expr {
    Expr::division(lhs, rhs)
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $combine:path) => {
        impl $op for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $combine(self, rhs)
            }
        }

        impl $op<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                $combine(self, Expr::constant(rhs))
            }
        }

        impl $op<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $combine(Expr::constant(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, plus);
impl_binary_op!(Sub, sub, minus);
impl_binary_op!(Mul, mul, combine_product);
impl_binary_op!(Div, div, divide);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        combine_product(Expr::constant(-1.0), self)
    }
}
