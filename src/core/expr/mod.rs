//! Expression tree for code generation.
//!
//! This module defines:
//! - `Expr` - An immutable expression node with a unique node id
//! - `ExprKind` - The closed set of node kinds the generator knows about
//! - `UnaryFunction` / `BinaryFunction` - Elementary function tags
//! - `Condition` / `Comparison` - The predicate of an if-then-else node
//!
//! # Sharing
//!
//! Children are held in `Arc<Expr>`, so one sub-expression instance may sit
//! under several parents. The tree is then a DAG. Node ids are unique per
//! constructed node and stay the same when the `Arc` is cloned, which makes
//! them usable as identity keys within one immutable tree.
//!
//! # Term order
//!
//! `Addition` terms and `Multiplication` factors keep insertion order. The
//! operator overloads only flatten a direct `Addition`/`Multiplication`
//! operand. They never sort, merge or fold anything else.
//!
//! ```
//! use symb_codegen::{Expr, ExprKind, Variable};
//!
//! let x = Variable::new("x");
//! let e = Expr::from(&x) + 1.0;
//! assert!(matches!(e.kind(), ExprKind::Addition { constant, .. } if *constant == 1.0));
//! ```

mod constructors;
mod operators;

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::symbol::Variable;

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// =============================================================================
// EXPR - The main expression type
// =============================================================================

#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique node id (not used in equality comparisons)
    pub(crate) id: u64,
    /// The kind of expression (structure)
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

// Same node, or structurally equal kind
impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id || self.kind == other.kind
    }
}

// =============================================================================
// FUNCTION TAGS
// =============================================================================

/// Single-argument elementary functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    Abs,
    Log,
    Exp,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Ceil,
    Floor,
}

impl UnaryFunction {
    /// Every unary function, in declaration order
    pub const ALL: [UnaryFunction; 15] = [
        UnaryFunction::Abs,
        UnaryFunction::Log,
        UnaryFunction::Exp,
        UnaryFunction::Sqrt,
        UnaryFunction::Sin,
        UnaryFunction::Cos,
        UnaryFunction::Tan,
        UnaryFunction::Asin,
        UnaryFunction::Acos,
        UnaryFunction::Atan,
        UnaryFunction::Sinh,
        UnaryFunction::Cosh,
        UnaryFunction::Tanh,
        UnaryFunction::Ceil,
        UnaryFunction::Floor,
    ];

    /// Mathematical name, as shown by `Display`
    pub const fn name(self) -> &'static str {
        match self {
            UnaryFunction::Abs => "abs",
            UnaryFunction::Log => "log",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Asin => "asin",
            UnaryFunction::Acos => "acos",
            UnaryFunction::Atan => "atan",
            UnaryFunction::Sinh => "sinh",
            UnaryFunction::Cosh => "cosh",
            UnaryFunction::Tanh => "tanh",
            UnaryFunction::Ceil => "ceil",
            UnaryFunction::Floor => "floor",
        }
    }
}

/// Two-argument elementary functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFunction {
    Atan2,
    Min,
    Max,
}

impl BinaryFunction {
    /// Mathematical name, as shown by `Display`
    pub const fn name(self) -> &'static str {
        match self {
            BinaryFunction::Atan2 => "atan2",
            BinaryFunction::Min => "min",
            BinaryFunction::Max => "max",
        }
    }
}

// =============================================================================
// CONDITIONS
// =============================================================================

/// Relational operator of a [`Condition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
}

impl Comparison {
    pub const fn symbol(self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Neq => "!=",
            Comparison::Lt => "<",
            Comparison::Leq => "<=",
            Comparison::Gt => ">",
            Comparison::Geq => ">=",
        }
    }
}

/// Predicate guarding an if-then-else node: `lhs op rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: Comparison,
    pub lhs: Arc<Expr>,
    pub rhs: Arc<Expr>,
}

impl Condition {
    pub fn new(op: Comparison, lhs: impl Into<Arc<Expr>>, rhs: impl Into<Arc<Expr>>) -> Self {
        Condition {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

// =============================================================================
// EXPRKIND - closed set of node kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Free variable, rendered as a parameter-array access
    Variable(Variable),

    /// Numeric constant
    Constant(f64),

    /// `constant + c_1*e_1 + c_2*e_2 + ...`
    Addition {
        constant: f64,
        terms: Vec<(Arc<Expr>, f64)>,
    },

    /// `constant * b_1^x_1 * b_2^x_2 * ...`
    Multiplication {
        constant: f64,
        factors: Vec<(Arc<Expr>, Arc<Expr>)>,
    },

    /// Division (numerator, denominator)
    Division(Arc<Expr>, Arc<Expr>),

    /// Exponentiation (base, exponent)
    Pow(Arc<Expr>, Arc<Expr>),

    /// Elementary single-argument function
    Unary(UnaryFunction, Arc<Expr>),

    /// Elementary two-argument function
    Binary(BinaryFunction, Arc<Expr>, Arc<Expr>),

    /// Conditional expression
    IfThenElse {
        condition: Condition,
        then_branch: Arc<Expr>,
        else_branch: Arc<Expr>,
    },

    /// Opaque function application
    UninterpretedFunction { name: String, args: Vec<Arc<Expr>> },
}
