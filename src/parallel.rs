//! Parallel batch generation using Rayon
//!
//! Rendering is a pure function of an immutable tree, so independent
//! requests can run concurrently over shared (even overlapping) expressions.
//! Each request still builds its own index map and output string.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_codegen = { version = "0.1", features = ["parallel"] }
//! ```

use crate::{CodeGen, CodeGenError, Expr, Variable};
use rayon::prelude::*;

/// Generate one scalar function per `(name, expr)` pair, in parallel
///
/// All functions share the same parameter list. Results come back in input
/// order; a failing item does not affect the others.
///
/// # Example
/// ```
/// use symb_codegen::{CodeGen, Expr, Variable};
/// use symb_codegen::parallel::generate_batch;
///
/// let x = Variable::new("x");
/// let f = Expr::from(&x).sin();
/// let g = Expr::from(&x).cos();
/// let out = generate_batch(&CodeGen::new(), &[x], &[("f", &f), ("g", &g)]);
/// assert!(out.iter().all(Result::is_ok));
/// assert!(out[1].as_ref().is_ok_and(|src| src.contains("return cos(p[0]);")));
/// ```
pub fn generate_batch(
    codegen: &CodeGen,
    parameters: &[Variable],
    items: &[(&str, &Expr)],
) -> Vec<Result<String, CodeGenError>> {
    items
        .par_iter()
        .map(|(name, expr)| codegen.generate(name, parameters, expr))
        .collect()
}

/// Render many expressions against one parameter list, in parallel
///
/// Returns the fragments in input order, or an error if any entry fails.
pub fn render_all(
    codegen: &CodeGen,
    parameters: &[Variable],
    exprs: &[Expr],
) -> Result<Vec<String>, CodeGenError> {
    let index_map = codegen.index_map(parameters)?;
    exprs
        .par_iter()
        .map(|e| codegen.renderer(&index_map).render(e))
        .collect()
}
