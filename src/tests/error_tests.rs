//! Error reporting through the public entry points

use crate::{CodeGen, CodeGenError, DuplicatePolicy, Expr, Matrix, Variable};
use std::io::{self, Write};

/// Sink that refuses every write
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_duplicate_parameter_is_error_by_default() {
    let x = Variable::new("x");
    let err = CodeGen::new()
        .generate("f", &[x.clone(), x.clone()], &Expr::from(&x))
        .unwrap_err();
    assert_eq!(
        err,
        CodeGenError::DuplicateParameter {
            name: "x".to_owned(),
            id: x.id(),
            first: 0,
            second: 1,
        }
    );
}

#[test]
fn test_duplicate_parameter_last_wins() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let src = CodeGen::new()
        .duplicate_policy(DuplicatePolicy::LastWins)
        .generate(
            "f",
            &[x.clone(), y.clone(), x.clone()],
            &(Expr::from(&x) * Expr::from(&y)),
        )
        .unwrap();
    assert!(src.contains("return (p[2] * p[1]);"));
    // Array size is still the list length
    assert!(src.contains("f_meta() { return {{3}}; }"));
}

#[test]
fn test_same_name_different_variable_is_unknown() {
    let x = Variable::new("x");
    let impostor = Variable::new("x");
    let err = CodeGen::new()
        .generate("f", &[x], &Expr::from(&impostor))
        .unwrap_err();
    assert_eq!(err, CodeGenError::unknown_variable("x", impostor.id()));
}

#[test]
fn test_io_failure_surfaces() {
    let x = Variable::new("x");
    let m = Matrix::column(vec![Expr::from(&x)]);
    let err = CodeGen::new()
        .generate_matrix("v", &[x], &m, &mut BrokenSink)
        .unwrap_err();
    assert_eq!(err, CodeGenError::Io("pipe closed".to_owned()));
}

#[test]
fn test_depth_limit_through_builder() {
    let x = Variable::new("x");
    let mut e = Expr::from(&x);
    for _ in 0..50 {
        e = e.exp();
    }
    let err = CodeGen::new()
        .max_depth(20)
        .generate("deep", &[x.clone()], &e)
        .unwrap_err();
    assert_eq!(err, CodeGenError::MaxDepthExceeded { limit: 20 });
    assert!(CodeGen::new().generate("deep", &[x], &e).is_ok());
}

#[test]
fn test_first_failing_entry_wins() {
    let x = Variable::new("x");
    let a = Variable::new("a");
    let b = Variable::new("b");
    let data = [Expr::from(&x), Expr::from(&a), Expr::from(&b)];
    let mut sink = Vec::new();
    let err = CodeGen::new()
        .generate_data("m", &[x], &data, &mut sink)
        .unwrap_err();
    assert_eq!(err, CodeGenError::unknown_variable("a", a.id()));
    assert!(sink.is_empty());
}

#[test]
fn test_invalid_name_checked_before_rendering() {
    let x = Variable::new("x");
    let stray = Variable::new("s");
    let err = CodeGen::new()
        .generate("not valid", &[x], &Expr::from(&stray))
        .unwrap_err();
    assert_eq!(err, CodeGenError::InvalidFunctionName("not valid".to_owned()));
}
