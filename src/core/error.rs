//! Error types for code generation
//!
//! Every failure aborts the whole generation request. Nothing is retried and
//! no partially rendered function is ever handed back to the caller.

use std::fmt;
use thiserror::Error;

/// The two node kinds the generator refuses to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    /// Conditional `if-then-else` expression
    IfThenElse,
    /// Opaque function call with no known target-language counterpart
    UninterpretedFunction,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedKind::IfThenElse => write!(f, "if-then-else expressions"),
            UnsupportedKind::UninterpretedFunction => write!(f, "uninterpreted functions"),
        }
    }
}

/// Errors that can occur while rendering or emitting generated code
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodeGenError {
    /// A variable in the expression has no slot in the parameter array
    #[error("Variable '{name}' (id {id}) is not in the parameter list")]
    UnknownVariable { name: String, id: u64 },

    /// A conditional or uninterpreted-function node was reached
    #[error("Codegen does not support {kind}: {node}")]
    UnsupportedConstruct { kind: UnsupportedKind, node: String },

    /// The same variable was listed twice in the parameter list
    #[error(
        "Variable '{name}' (id {id}) appears twice in the parameter list, at positions {first} and {second}"
    )]
    DuplicateParameter {
        name: String,
        id: u64,
        first: usize,
        second: usize,
    },

    /// Flat entry count does not match the declared matrix extents
    #[error("Matrix of {rows}x{cols} needs {expected} entries, but {len} were given", expected = .rows * .cols)]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    /// Function name cannot be used as a C identifier
    #[error("'{0}' is not a valid C function name")]
    InvalidFunctionName(String),

    /// Expression nesting exceeded the configured recursion limit
    #[error("Expression nesting depth exceeds maximum limit of {limit}")]
    MaxDepthExceeded { limit: usize },

    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(String),
}

impl CodeGenError {
    /// Create `UnknownVariable` for a variable id and its display name
    pub fn unknown_variable(name: impl Into<String>, id: u64) -> Self {
        CodeGenError::UnknownVariable {
            name: name.into(),
            id,
        }
    }

    /// Create `UnsupportedConstruct` naming the offending node
    pub fn unsupported(kind: UnsupportedKind, node: impl Into<String>) -> Self {
        CodeGenError::UnsupportedConstruct {
            kind,
            node: node.into(),
        }
    }

    /// Whether this error came from a node the generator cannot express
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodeGenError::UnsupportedConstruct { .. })
    }
}

impl From<std::io::Error> for CodeGenError {
    fn from(err: std::io::Error) -> Self {
        CodeGenError::Io(err.to_string())
    }
}
