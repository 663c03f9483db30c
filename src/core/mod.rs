//! Core types for symbolic expressions
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - Expression tree (a DAG when children are shared)
//! - `Variable` - Free symbols with opaque unique ids
//! - `CodeGenError` - Error types
//! - Display formatting for diagnostics
//! - Visitor pattern for tree traversal

mod display; // Display implementations for Expr
pub(crate) mod error;
pub(crate) mod expr;
pub(crate) mod symbol;
pub mod visitor; // Public visitor pattern

// Public re-exports (for external API)
pub use error::{CodeGenError, UnsupportedKind};
pub use expr::{BinaryFunction, Comparison, Condition, Expr, ExprKind, UnaryFunction};
pub use symbol::Variable;
