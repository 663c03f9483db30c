//! Human-readable display for expressions.
//!
//! This is the notation used in diagnostics (error messages, logs), not the
//! generated target-language code:
//! - `1 + 2*x + y`
//! - `sin(x) / cos(x)`
//! - `if x < 0 then -x else x`
//!
//! Composite children are wrapped in parentheses whenever they are not
//! atoms, so the printed form is unambiguous without precedence rules.

use crate::{Expr, ExprKind};
use std::fmt;

/// Format a number for display: integers without a fractional part
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Checked fract() == 0.0 and abs() < 1e10"
        )]
        let int = n as i64;
        format!("{int}")
    } else {
        format!("{n}")
    }
}

fn is_atom(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Variable(_)
        | ExprKind::Unary(..)
        | ExprKind::Binary(..)
        | ExprKind::UninterpretedFunction { .. } => true,
        ExprKind::Constant(n) => *n >= 0.0,
        _ => false,
    }
}

/// Write a child, parenthesized unless it is an atom
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if is_atom(expr) {
        write!(f, "{expr}")
    } else {
        write!(f, "({expr})")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Variable(v) => write!(f, "{v}"),

            ExprKind::Constant(n) => write!(f, "{}", format_number(*n)),

            ExprKind::Addition { constant, terms } => {
                let mut first = true;
                if *constant != 0.0 || terms.is_empty() {
                    write!(f, "{}", format_number(*constant))?;
                    first = false;
                }
                for (term, coeff) in terms {
                    if !first {
                        write!(f, " + ")?;
                    }
                    first = false;
                    if *coeff != 1.0 {
                        write!(f, "{}*", format_number(*coeff))?;
                    }
                    write_operand(f, term)?;
                }
                Ok(())
            }

            ExprKind::Multiplication { constant, factors } => {
                let mut first = true;
                if *constant != 1.0 || factors.is_empty() {
                    write!(f, "{}", format_number(*constant))?;
                    first = false;
                }
                for (base, exponent) in factors {
                    if !first {
                        write!(f, "*")?;
                    }
                    first = false;
                    write_operand(f, base)?;
                    if !exponent.is_one() {
                        write!(f, "^")?;
                        write_operand(f, exponent)?;
                    }
                }
                Ok(())
            }

            ExprKind::Division(num, den) => {
                write_operand(f, num)?;
                write!(f, " / ")?;
                write_operand(f, den)
            }

            ExprKind::Pow(base, exp) => {
                write_operand(f, base)?;
                write!(f, "^")?;
                write_operand(f, exp)
            }

            ExprKind::Unary(func, arg) => write!(f, "{}({arg})", func.name()),

            ExprKind::Binary(func, a, b) => write!(f, "{}({a}, {b})", func.name()),

            ExprKind::IfThenElse {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "if {condition} then {then_branch} else {else_branch}"),

            ExprKind::UninterpretedFunction { name, args } => {
                let args_str: Vec<String> = args.iter().map(|arg| format!("{arg}")).collect();
                write!(f, "{}({})", name, args_str.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Comparison, Condition, Expr, Variable};

    #[test]
    fn test_sum_and_product() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let e = Expr::from(&x) * 2.0 + Expr::from(&y) + 1.0;
        assert_eq!(e.to_string(), "1 + (2*x) + y");

        let p = Expr::multiplication(3.0, [(Expr::from(&x), Expr::constant(2.0))]);
        assert_eq!(p.to_string(), "3*x^2");
    }

    #[test]
    fn test_functions() {
        let x = Variable::new("x");
        let e = Expr::from(&x).sin() / Expr::from(&x).cos();
        assert_eq!(e.to_string(), "sin(x) / cos(x)");

        let e = Expr::from(&x).atan2(Expr::constant(1.5));
        assert_eq!(e.to_string(), "atan2(x, 1.5)");
    }

    #[test]
    fn test_conditional_and_opaque() {
        let x = Variable::new("x");
        let cond = Condition::new(Comparison::Lt, Expr::from(&x), Expr::constant(0.0));
        let e = Expr::if_then_else(cond, -Expr::from(&x), Expr::from(&x));
        assert_eq!(e.to_string(), "if x < 0 then -1*x else x");

        let u = Expr::uninterpreted("f", [Expr::from(&x), Expr::constant(2.0)]);
        assert_eq!(u.to_string(), "f(x, 2)");
    }
}
