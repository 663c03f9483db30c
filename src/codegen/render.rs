//! Expression rendering into C expression syntax.
//!
//! [`Renderer`] turns one expression node into a self-contained fragment
//! whose only free references are `p[i]` parameter accesses:
//!
//! | node | fragment |
//! |------|----------|
//! | variable | `p[i]` |
//! | constant | round-trip literal, see [`format_constant`] |
//! | addition | `(c + t_1 + (k_2 * t_2) + ...)` |
//! | multiplication | `(c * b_1 * pow(b_2, x_2) * ...)` |
//! | division | `(n / d)` |
//! | pow | `pow(b, x)` |
//! | unary / binary function | `sin(a)`, `fmin(a, b)`, ... |
//!
//! Every composite fragment is parenthesized or a function call, so fragments
//! can be pasted into any context without precedence surprises.
//!
//! # Shared sub-expressions
//!
//! A sub-expression referenced from several parents is rendered once per
//! reference and its text repeated. With memoization enabled the text is
//! computed once per node id and reused for the rest of the request. The
//! cache also remembers how deep the subtree below each node goes, so a reuse
//! at a deeper position fails the depth limit exactly where plain rendering
//! would. The output, or the error, is identical either way.
//!
//! # Signed zero
//!
//! A zero offset is left out of a sum that has terms, so `(p[0])` rather than
//! `(0 + p[0])`. The two differ only for `p[0] == -0.0`, where the fragment
//! yields `-0.0` instead of `+0.0`.

use crate::codegen::index_map::IdToIndexMap;
use crate::{BinaryFunction, CodeGenError, Expr, ExprKind, UnaryFunction, UnsupportedKind};
use log::trace;
use rustc_hash::FxHashMap;

/// Default recursion limit for rendering
///
/// Fits a 2 MiB thread stack in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// C math library name of a unary function
pub const fn unary_c_name(f: UnaryFunction) -> &'static str {
    match f {
        UnaryFunction::Abs => "fabs",
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

/// C math library name of a binary function
pub const fn binary_c_name(f: BinaryFunction) -> &'static str {
    match f {
        BinaryFunction::Atan2 => "atan2",
        BinaryFunction::Min => "fmin",
        BinaryFunction::Max => "fmax",
    }
}

/// Format a constant as a C `double` literal that parses back to the same value
///
/// - Integral values below 1e15 print without a fractional part: `1`, `-3`
/// - `-0.0` keeps its sign: `-0.0`
/// - Everything else uses the shortest round-trip form: `0.1`, `1e-7`, `1e300`
/// - Non-finite values use the `<math.h>` macros: `NAN`, `INFINITY`, `(-INFINITY)`
pub fn format_constant(n: f64) -> String {
    if n.is_nan() {
        "NAN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 {
            "INFINITY".to_owned()
        } else {
            "(-INFINITY)".to_owned()
        }
    } else if n == 0.0 && n.is_sign_negative() {
        "-0.0".to_owned()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n}")
    } else {
        format!("{n:?}")
    }
}

/// Renders expression nodes against a fixed variable-to-slot mapping
///
/// One renderer serves one generation request. It never mutates the tree;
/// the only state it carries is the optional per-request cache.
pub struct Renderer<'a> {
    index_map: &'a IdToIndexMap,
    max_depth: usize,
    /// Node id -> (rendered text, height of its subtree), present only when memoizing
    cache: Option<FxHashMap<u64, (String, usize)>>,
    /// Deepest level reached since the enclosing node started rendering
    reached: usize,
}

impl<'a> Renderer<'a> {
    /// Create a renderer bound to an index map
    pub fn new(index_map: &'a IdToIndexMap) -> Self {
        Renderer {
            index_map,
            max_depth: DEFAULT_MAX_DEPTH,
            cache: None,
            reached: 0,
        }
    }

    /// Set the recursion limit
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Reuse rendered text for repeated references to the same node
    #[must_use]
    pub fn memoize(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(FxHashMap::default);
        self
    }

    /// Render an expression to a C expression fragment
    ///
    /// # Errors
    /// - `UnknownVariable`: a variable has no slot in the index map
    /// - `UnsupportedConstruct`: an if-then-else or uninterpreted function
    ///   appears anywhere in the tree
    /// - `MaxDepthExceeded`: nesting deeper than the configured limit
    pub fn render(&mut self, expr: &Expr) -> Result<String, CodeGenError> {
        self.reached = 0;
        self.render_at(expr, 0)
    }

    fn render_at(&mut self, expr: &Expr, depth: usize) -> Result<String, CodeGenError> {
        if depth > self.max_depth {
            return Err(CodeGenError::MaxDepthExceeded {
                limit: self.max_depth,
            });
        }

        if let Some(cache) = &self.cache
            && let Some((text, height)) = cache.get(&expr.id())
        {
            trace!("render cache hit for node {}", expr.id());
            if depth + height > self.max_depth {
                return Err(CodeGenError::MaxDepthExceeded {
                    limit: self.max_depth,
                });
            }
            self.reached = self.reached.max(depth + height);
            return Ok(text.clone());
        }

        let outer = std::mem::replace(&mut self.reached, depth);
        let text = self.render_kind(expr, depth)?;
        let height = self.reached - depth;
        self.reached = self.reached.max(outer);

        if let Some(cache) = &mut self.cache {
            cache.insert(expr.id(), (text.clone(), height));
        }
        Ok(text)
    }

    fn render_kind(&mut self, expr: &Expr, depth: usize) -> Result<String, CodeGenError> {
        let child = depth + 1;
        match &expr.kind {
            ExprKind::Variable(v) => match self.index_map.get(v) {
                Some(idx) => Ok(format!("p[{idx}]")),
                None => Err(CodeGenError::unknown_variable(v.name(), v.id())),
            },

            ExprKind::Constant(n) => Ok(format_constant(*n)),

            ExprKind::Addition { constant, terms } => {
                let mut parts = Vec::with_capacity(terms.len() + 1);
                if *constant != 0.0 || terms.is_empty() {
                    parts.push(format_constant(*constant));
                }
                for (term, coeff) in terms {
                    let rendered = self.render_at(term, child)?;
                    if *coeff == 1.0 {
                        parts.push(rendered);
                    } else {
                        parts.push(format!("({} * {rendered})", format_constant(*coeff)));
                    }
                }
                Ok(format!("({})", parts.join(" + ")))
            }

            ExprKind::Multiplication { constant, factors } => {
                let mut parts = Vec::with_capacity(factors.len() + 1);
                if *constant != 1.0 || factors.is_empty() {
                    parts.push(format_constant(*constant));
                }
                for (base, exponent) in factors {
                    let rendered = self.render_at(base, child)?;
                    if exponent.is_one() {
                        parts.push(rendered);
                    } else {
                        let exponent = self.render_at(exponent, child)?;
                        parts.push(format!("pow({rendered}, {exponent})"));
                    }
                }
                Ok(format!("({})", parts.join(" * ")))
            }

            ExprKind::Division(num, den) => {
                let num = self.render_at(num, child)?;
                let den = self.render_at(den, child)?;
                Ok(format!("({num} / {den})"))
            }

            ExprKind::Pow(base, exponent) => self.render_call("pow", &[base, exponent], child),

            ExprKind::Unary(f, arg) => self.render_call(unary_c_name(*f), &[arg], child),

            ExprKind::Binary(f, first, second) => {
                self.render_call(binary_c_name(*f), &[first, second], child)
            }

            ExprKind::IfThenElse { .. } => Err(CodeGenError::unsupported(
                UnsupportedKind::IfThenElse,
                expr.to_string(),
            )),

            ExprKind::UninterpretedFunction { .. } => Err(CodeGenError::unsupported(
                UnsupportedKind::UninterpretedFunction,
                expr.to_string(),
            )),
        }
    }

    /// `name(arg_1, arg_2, ...)`
    fn render_call(
        &mut self,
        name: &str,
        args: &[&std::sync::Arc<Expr>],
        depth: usize,
    ) -> Result<String, CodeGenError> {
        let mut rendered = Vec::with_capacity(args.len());
        for arg in args {
            rendered.push(self.render_at(arg, depth)?);
        }
        Ok(format!("{name}({})", rendered.join(", ")))
    }
}
