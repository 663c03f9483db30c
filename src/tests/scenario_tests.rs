//! End-to-end generation scenarios: exact text of scalar and matrix output

use crate::{
    CodeGen, CodeGenError, Comparison, Condition, Expr, Matrix, UnsupportedKind, Variable,
    codegen, codegen_data, codegen_matrix, codegen_meta,
};
use std::sync::Arc;

fn sink_text(sink: Vec<u8>) -> String {
    String::from_utf8(sink).unwrap()
}

#[test]
fn test_scalar_offset_then_variable() {
    let x = Variable::new("x");
    let src = codegen("f", &[x.clone()], &(Expr::from(&x) + 1.0)).unwrap();
    assert_eq!(
        src,
        "double f(const double* p) {\n    return (1 + p[0]);\n}\n\
         typedef struct {\n    struct { int size; } p;\n} f_meta_t;\n\
         f_meta_t f_meta() { return {{1}}; }\n"
    );
}

#[test]
fn test_scalar_product() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let e = 2.0 * Expr::from(&x) * Expr::from(&y);
    let src = codegen("g", &[x, y], &e).unwrap();
    assert!(src.starts_with("double g(const double* p) {\n"));
    assert!(src.contains("    return (2 * p[0] * p[1]);\n"));
    assert!(src.ends_with("g_meta_t g_meta() { return {{2}}; }\n"));
}

#[test]
fn test_scalar_quotient_of_functions() {
    let x = Variable::new("x");
    let e = Expr::from(&x).sin() / Expr::from(&x).cos();
    let src = codegen("h", &[x], &e).unwrap();
    assert!(src.contains("return (sin(p[0]) / cos(p[0]));"));
}

#[test]
fn test_scalar_pow_node() {
    let x = Variable::new("x");
    let src = codegen("sq", &[x.clone()], &Expr::from(&x).pow(2.0)).unwrap();
    assert!(src.contains("return pow(p[0], 2);"));
    assert!(src.contains("sq_meta_t sq_meta() { return {{1}}; }"));
}

#[test]
fn test_scalar_conditional_fails_without_text() {
    let x = Variable::new("x");
    let cond = Condition::new(Comparison::Gt, Expr::from(&x), Expr::constant(0.0));
    let e = Expr::if_then_else(cond, Expr::from(&x), Expr::constant(0.0));
    let err = codegen("relu", &[x], &e).unwrap_err();
    assert!(matches!(
        err,
        CodeGenError::UnsupportedConstruct {
            kind: UnsupportedKind::IfThenElse,
            ..
        }
    ));
}

#[test]
fn test_matrix_data_and_meta_separately() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let params = [x.clone(), y.clone()];
    let data = [
        Expr::from(&x) + Expr::from(&y),
        Expr::from(&x) - Expr::from(&y),
    ];

    let mut data_sink = Vec::new();
    let mut meta_sink = Vec::new();
    codegen_data("m", &params, &data, &mut data_sink).unwrap();
    codegen_meta("m", params.len(), 2, 1, &mut meta_sink).unwrap();

    assert_eq!(
        sink_text(data_sink),
        "void m(const double* p, double* m) {\n\
         \x20   m[0] = (p[0] + p[1]);\n\
         \x20   m[1] = (p[0] + (-1 * p[1]));\n\
         }\n"
    );
    assert_eq!(
        sink_text(meta_sink),
        "typedef struct {\n\
         \x20   struct { int size; } p;\n\
         \x20   struct { int rows; int cols; } m;\n\
         } m_meta_t;\n\
         m_meta_t m_meta() { return {{2}, {2, 1}}; }\n"
    );
}

#[test]
fn test_matrix_row_major_order() {
    let x = Variable::new("x");
    let m = Matrix::from_rows(vec![
        vec![Expr::constant(11.0), Expr::constant(12.0)],
        vec![Expr::from(&x), Expr::from(&x).exp()],
    ])
    .unwrap();
    let mut sink = Vec::new();
    codegen_matrix("jac", &[x], &m, &mut sink).unwrap();
    let text = sink_text(sink);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "    m[0] = 11;");
    assert_eq!(lines[2], "    m[1] = 12;");
    assert_eq!(lines[3], "    m[2] = p[0];");
    assert_eq!(lines[4], "    m[3] = exp(p[0]);");
    assert!(text.ends_with("jac_meta_t jac_meta() { return {{1}, {2, 2}}; }\n"));
}

#[test]
fn test_matrix_failure_writes_nothing() {
    let x = Variable::new("x");
    let stray = Variable::new("w");
    let m = Matrix::column(vec![Expr::from(&x), Expr::from(&x) * Expr::from(&stray)]);
    let mut sink = Vec::new();
    let err = codegen_matrix("v", &[x], &m, &mut sink).unwrap_err();
    assert_eq!(err, CodeGenError::unknown_variable("w", stray.id()));
    assert!(sink.is_empty());
}

#[test]
fn test_empty_matrix() {
    let m = Matrix::new(0, 3, Vec::new()).unwrap();
    let mut sink = Vec::new();
    codegen_matrix("nothing", &[], &m, &mut sink).unwrap();
    assert_eq!(
        sink_text(sink),
        "void nothing(const double* p, double* m) {\n}\n\
         typedef struct {\n    struct { int size; } p;\n    struct { int rows; int cols; } m;\n} nothing_meta_t;\n\
         nothing_meta_t nothing_meta() { return {{0}, {0, 3}}; }\n"
    );
}

#[test]
fn test_unused_parameters_still_counted() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let z = Variable::new("z");
    let src = codegen("f", &[x, y.clone(), z], &Expr::from(&y).tanh()).unwrap();
    assert!(src.contains("return tanh(p[1]);"));
    assert!(src.contains("f_meta() { return {{3}}; }"));
}

#[test]
fn test_shared_subexpression_repeated() {
    let x = Variable::new("x");
    let shared = Arc::new(Expr::from(&x).sqrt());
    let e = Expr::multiplication(
        1.0,
        [
            (Arc::clone(&shared), Arc::new(Expr::constant(1.0))),
            (Arc::clone(&shared), Arc::new(Expr::constant(3.0))),
        ],
    );
    for generator in [CodeGen::new(), CodeGen::new().memoize(true)] {
        let src = generator.generate("f", &[x.clone()], &e).unwrap();
        assert!(src.contains("return (sqrt(p[0]) * pow(sqrt(p[0]), 3));"));
    }
}
