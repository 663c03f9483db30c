//! Symbolic Expression Code Generation
//!
//! Turns symbolic scalar expressions (and row-major arrays of them) into
//! standalone C source that evaluates them over a flat parameter vector
//! `const double* p`.
//!
//! # Features
//! - Fully parenthesized rendering of sums, products, powers, divisions and
//!   the usual elementary functions (`fabs`, `log`, `sin`, `atan2`, `fmin`, ...)
//! - Scalar functions with a `<name>_meta()` shape descriptor
//! - Vector/matrix functions streamed into any [`std::io::Write`] sink
//! - All-or-nothing failure: unknown variables and unsupported constructs
//!   (if-then-else, uninterpreted functions) abort before any text is emitted
//! - Optional per-request memoization of shared sub-expressions
//!
//! The generator only emits text. It never simplifies the input and never
//! evaluates the functions it writes.
//!
//! # Usage Examples
//!
//! ## Scalar function
//! ```
//! use symb_codegen::{codegen, Expr, Variable};
//!
//! let x = Variable::new("x");
//! let y = Variable::new("y");
//! let e = 2.0 * Expr::from(&x) * Expr::from(&y);
//! let src = codegen("g", &[x, y], &e).unwrap();
//! assert!(src.contains("return (2 * p[0] * p[1]);"));
//! ```
//!
//! ## Matrix function
//! ```
//! use symb_codegen::{codegen_matrix, Expr, Matrix, Variable};
//!
//! let x = Variable::new("x");
//! let y = Variable::new("y");
//! let m = Matrix::column(vec![
//!     Expr::from(&x) + Expr::from(&y),
//!     Expr::from(&x) * Expr::from(&y),
//! ]);
//! let mut out = Vec::new();
//! codegen_matrix("m", &[x, y], &m, &mut out).unwrap();
//! let src = String::from_utf8(out).unwrap();
//! assert!(src.contains("m[0] = (p[0] + p[1]);"));
//! assert!(src.contains("m_meta_t m_meta() { return {{2}, {2, 1}}; }"));
//! ```

mod codegen;
mod core;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use codegen::{
    CodeGen, DEFAULT_MAX_DEPTH, DuplicatePolicy, IdToIndexMap, Matrix, Renderer,
    format_constant, is_c_identifier,
};
pub use crate::core::visitor::{
    ExprVisitor, NodeCounter, VariableCollector, infer_parameters, node_count, walk_expr,
};
pub use crate::core::{
    BinaryFunction, CodeGenError, Comparison, Condition, Expr, ExprKind, UnaryFunction,
    UnsupportedKind, Variable,
};

/// Generate a scalar C function with default settings
///
/// # Arguments
/// * `function_name` - Name of the generated function (and its `_meta` companions)
/// * `parameters` - Ordered parameter list; position `i` becomes `p[i]`
/// * `expr` - Expression to evaluate
///
/// # Returns
/// The function definition followed by its metadata type and constructor.
///
/// # Note
/// For more control (duplicate handling, memoization, depth limit), use the
/// [`CodeGen`] builder.
pub fn codegen(
    function_name: &str,
    parameters: &[Variable],
    expr: &Expr,
) -> Result<String, CodeGenError> {
    CodeGen::new().generate(function_name, parameters, expr)
}

/// Write only the data function of a flat expression array
///
/// `data[i]` is assigned to `m[i]`. Pair with [`codegen_meta`], possibly into
/// a different sink.
pub fn codegen_data<W: std::io::Write + ?Sized>(
    function_name: &str,
    parameters: &[Variable],
    data: &[Expr],
    sink: &mut W,
) -> Result<(), CodeGenError> {
    CodeGen::new().generate_data(function_name, parameters, data, sink)
}

/// Write only the metadata of a vector/matrix function
pub fn codegen_meta<W: std::io::Write + ?Sized>(
    function_name: &str,
    parameter_size: usize,
    rows: usize,
    cols: usize,
    sink: &mut W,
) -> Result<(), CodeGenError> {
    CodeGen::new().generate_meta(function_name, parameter_size, rows, cols, sink)
}

/// Write a matrix function and its metadata with default settings
pub fn codegen_matrix<W: std::io::Write + ?Sized>(
    function_name: &str,
    parameters: &[Variable],
    matrix: &Matrix,
    sink: &mut W,
) -> Result<(), CodeGenError> {
    CodeGen::new().generate_matrix(function_name, parameters, matrix, sink)
}
