//! Text emission for generated functions and their metadata
//!
//! The layouts below are consumed by tooling that compiles the output and
//! looks up `<name>_meta()` by name, so they are fixed byte for byte.
//!
//! Scalar function:
//! ```text
//! double f(const double* p) {
//!     return (1 + p[0]);
//! }
//! typedef struct {
//!     struct { int size; } p;
//! } f_meta_t;
//! f_meta_t f_meta() { return {{1}}; }
//! ```
//!
//! Vector/matrix data and metadata:
//! ```text
//! void m(const double* p, double* m) {
//!     m[0] = (p[0] + p[1]);
//! }
//! typedef struct {
//!     struct { int size; } p;
//!     struct { int rows; int cols; } m;
//! } m_meta_t;
//! m_meta_t m_meta() { return {{2}, {1, 1}}; }
//! ```
//!
//! Callers render every fragment before anything reaches these functions.

use std::io::{self, Write};

/// Complete scalar function plus its metadata
pub(crate) fn scalar_source(name: &str, parameter_size: usize, body: &str) -> String {
    let mut out = format!("double {name}(const double* p) {{\n    return {body};\n}}\n");
    out.push_str(&scalar_meta(name, parameter_size));
    out
}

/// Metadata type and constructor for a scalar function
pub(crate) fn scalar_meta(name: &str, parameter_size: usize) -> String {
    format!(
        "typedef struct {{\n    struct {{ int size; }} p;\n}} {name}_meta_t;\n\
         {name}_meta_t {name}_meta() {{ return {{{{{parameter_size}}}}}; }}\n"
    )
}

/// Function body filling `m[i]` from pre-rendered entries, streamed line by line
pub(crate) fn write_data<W: Write + ?Sized>(
    sink: &mut W,
    name: &str,
    entries: &[String],
) -> io::Result<()> {
    writeln!(sink, "void {name}(const double* p, double* m) {{")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(sink, "    m[{i}] = {entry};")?;
    }
    writeln!(sink, "}}")
}

/// Metadata type and constructor for a vector/matrix function
pub(crate) fn write_meta<W: Write + ?Sized>(
    sink: &mut W,
    name: &str,
    parameter_size: usize,
    rows: usize,
    cols: usize,
) -> io::Result<()> {
    writeln!(sink, "typedef struct {{")?;
    writeln!(sink, "    struct {{ int size; }} p;")?;
    writeln!(sink, "    struct {{ int rows; int cols; }} m;")?;
    writeln!(sink, "}} {name}_meta_t;")?;
    writeln!(
        sink,
        "{name}_meta_t {name}_meta() {{ return {{{{{parameter_size}}}, {{{rows}, {cols}}}}}; }}"
    )
}
