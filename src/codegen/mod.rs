//! C code generation for expressions
//!
//! [`CodeGen`] is the configurable entry point. A generation request builds
//! its own [`IdToIndexMap`] from the caller's parameter list, renders every
//! expression with a [`Renderer`], and only then emits text. A failure at any
//! point returns an error before a single byte of function text is produced.
//!
//! # Example
//! ```
//! use symb_codegen::{CodeGen, Expr, Variable};
//!
//! let x = Variable::new("x");
//! let src = CodeGen::new()
//!     .generate("f", &[x.clone()], &(Expr::from(&x) + 1.0))
//!     .unwrap();
//! assert!(src.contains("return (1 + p[0]);"));
//! assert!(src.contains("f_meta_t f_meta() { return {{1}}; }"));
//! ```

mod emit;
pub mod index_map;
mod matrix;
pub mod render;

pub use index_map::{DuplicatePolicy, IdToIndexMap};
pub use matrix::Matrix;
pub use render::{DEFAULT_MAX_DEPTH, Renderer, format_constant};

use crate::core::visitor::node_count;
use crate::{BinaryFunction, CodeGenError, Expr, UnaryFunction, Variable};
use log::{Level, debug, log_enabled};
use std::io::Write;

/// C and C++ keywords that cannot name a generated function
///
/// The metadata initializer `return {{n}};` needs a C++ compiler, so C++
/// keywords count too.
const RESERVED_NAMES: &[&str] = &[
    // C
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
    // C++
    "alignas", "alignof", "and", "and_eq", "asm", "bitand", "bitor", "bool", "catch", "char16_t",
    "char32_t", "char8_t", "class", "compl", "concept", "consteval", "constexpr", "constinit",
    "const_cast", "co_await", "co_return", "co_yield", "decltype", "delete", "dynamic_cast",
    "explicit", "export", "false", "friend", "mutable", "namespace", "new", "noexcept", "not",
    "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
    "reinterpret_cast", "requires", "static_assert", "static_cast", "template", "this",
    "thread_local", "throw", "true", "try", "typeid", "typename", "using", "virtual", "wchar_t",
    "xor", "xor_eq",
    // <math.h> macros used for non-finite constants
    "NAN", "INFINITY",
];

/// Whether `name` is a math function the generated code calls
fn is_emitted_function(name: &str) -> bool {
    name == "pow"
        || UnaryFunction::ALL
            .into_iter()
            .any(|f| render::unary_c_name(f) == name)
        || [BinaryFunction::Atan2, BinaryFunction::Min, BinaryFunction::Max]
            .into_iter()
            .any(|f| render::binary_c_name(f) == name)
}

/// Check that a name can be used as the name of a generated function
///
/// Rejects non-identifiers, C/C++ keywords, and the math functions the
/// function body itself calls.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_NAMES.contains(&name)
        && !is_emitted_function(name)
}

/// Builder for code generation requests
#[derive(Debug, Clone)]
pub struct CodeGen {
    duplicate_policy: DuplicatePolicy,
    memoize: bool,
    max_depth: usize,
    validate_names: bool,
}

impl Default for CodeGen {
    fn default() -> Self {
        CodeGen {
            duplicate_policy: DuplicatePolicy::Error,
            memoize: false,
            max_depth: DEFAULT_MAX_DEPTH,
            validate_names: true,
        }
    }
}

impl CodeGen {
    /// Create a new code generation builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// How a variable listed twice in the parameters is treated
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Render each shared node once per request and reuse its text
    pub fn memoize(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Maximum expression nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Reject function names that are not C identifiers
    pub fn validate_names(mut self, enabled: bool) -> Self {
        self.validate_names = enabled;
        self
    }

    /// Build the variable-to-slot map for a parameter list
    ///
    /// # Errors
    /// `DuplicateParameter` under [`DuplicatePolicy::Error`].
    pub fn index_map(&self, parameters: &[Variable]) -> Result<IdToIndexMap, CodeGenError> {
        IdToIndexMap::from_parameters(parameters, self.duplicate_policy)
    }

    /// A renderer configured like this builder
    pub fn renderer<'a>(&self, index_map: &'a IdToIndexMap) -> Renderer<'a> {
        Renderer::new(index_map)
            .max_depth(self.max_depth)
            .memoize(self.memoize)
    }

    /// Render a single expression fragment, without any function wrapper
    pub fn render(&self, parameters: &[Variable], expr: &Expr) -> Result<String, CodeGenError> {
        let index_map = self.index_map(parameters)?;
        self.renderer(&index_map).render(expr)
    }

    /// Generate a scalar function `double name(const double* p)` and its metadata
    ///
    /// # Errors
    /// Any rendering error, `DuplicateParameter`, or `InvalidFunctionName`.
    /// No text is returned on failure.
    pub fn generate(
        &self,
        name: &str,
        parameters: &[Variable],
        expr: &Expr,
    ) -> Result<String, CodeGenError> {
        self.check_name(name)?;
        let index_map = self.index_map(parameters)?;
        if log_enabled!(Level::Debug) {
            debug!(
                "generating scalar function '{name}': {} parameters, {} nodes",
                parameters.len(),
                node_count(expr)
            );
        }
        let body = self.renderer(&index_map).render(expr)?;
        Ok(emit::scalar_source(name, parameters.len(), &body))
    }

    /// Write `void name(const double* p, double* m)` filling `m[i]` from `data[i]`
    ///
    /// Every entry is rendered before the first line is written, so a
    /// rendering failure leaves `sink` untouched.
    ///
    /// # Errors
    /// Any rendering error, `DuplicateParameter`, `InvalidFunctionName`, or
    /// `Io` if the sink fails.
    pub fn generate_data<W: Write + ?Sized>(
        &self,
        name: &str,
        parameters: &[Variable],
        data: &[Expr],
        sink: &mut W,
    ) -> Result<(), CodeGenError> {
        self.check_name(name)?;
        let index_map = self.index_map(parameters)?;
        debug!(
            "generating data function '{name}': {} parameters, {} entries",
            parameters.len(),
            data.len()
        );
        let mut renderer = self.renderer(&index_map);
        let entries = data
            .iter()
            .map(|e| renderer.render(e))
            .collect::<Result<Vec<_>, _>>()?;
        emit::write_data(sink, name, &entries)?;
        Ok(())
    }

    /// Write the metadata type and `name_meta()` constructor for a data function
    ///
    /// # Errors
    /// `InvalidFunctionName`, or `Io` if the sink fails.
    pub fn generate_meta<W: Write + ?Sized>(
        &self,
        name: &str,
        parameter_size: usize,
        rows: usize,
        cols: usize,
        sink: &mut W,
    ) -> Result<(), CodeGenError> {
        self.check_name(name)?;
        emit::write_meta(sink, name, parameter_size, rows, cols)?;
        Ok(())
    }

    /// Write both the data function and its metadata for a matrix
    pub fn generate_matrix<W: Write + ?Sized>(
        &self,
        name: &str,
        parameters: &[Variable],
        matrix: &Matrix,
        sink: &mut W,
    ) -> Result<(), CodeGenError> {
        self.generate_data(name, parameters, matrix.entries(), sink)?;
        self.generate_meta(name, parameters.len(), matrix.rows(), matrix.cols(), sink)
    }

    fn check_name(&self, name: &str) -> Result<(), CodeGenError> {
        if self.validate_names && !is_c_identifier(name) {
            return Err(CodeGenError::InvalidFunctionName(name.to_owned()));
        }
        Ok(())
    }
}
