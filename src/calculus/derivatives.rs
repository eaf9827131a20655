//! Derivative service: symbolic derivatives of any order, tangent and normal
//! lines at a point, implicit differentiation of F(x, y) = 0.

use crate::calculus::adapter::{CalcError, ExprInput};
use crate::symbolic::symbolic_engine::Expr;

/// Tangent line of f at a point: line = slope*(var - point) + f(point).
#[derive(Debug, Clone, PartialEq)]
pub struct TangentLine {
    pub line: Expr,
    pub slope: f64,
    pub value: f64,
}

/// Normal (perpendicular to the tangent) line of f at a point.
/// `line` is None when the tangent slope is zero: the normal is vertical and
/// has no expression of the form m*(var - point) + b.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalLine {
    pub line: Option<Expr>,
    pub value: f64,
}

/// Computes the order-th symbolic derivative of `expr` with respect to `var`.
/// Order 0 returns the (simplified) expression unchanged.
pub fn compute_derivative(
    expr: impl Into<ExprInput>,
    var: &str,
    order: usize,
) -> Result<Expr, CalcError> {
    let expr = expr.into().resolve()?;
    Ok(expr.n_th_derivative1D(var, order))
}

/// Evaluates `expr` at `var = point`, rejecting undefined (non-finite) values.
fn eval_finite(expr: &Expr, var: &str, point: f64) -> Result<f64, CalcError> {
    let value = expr.eval_at(var, point).map_err(CalcError::Symbolic)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Symbolic(format!(
            "{} is undefined at {} = {}",
            expr, var, point
        )))
    }
}

/// Tangent line of `func` at `point`.
pub fn tangent_line(
    func: impl Into<ExprInput>,
    point: f64,
    var: &str,
) -> Result<TangentLine, CalcError> {
    let func = func.into().resolve()?;
    let slope = eval_finite(&func.diff(var).simplify(), var, point)?;
    let value = eval_finite(&func, var, point)?;
    let line = (Expr::Const(slope) * (Expr::Var(var.to_string()) - Expr::Const(point))
        + Expr::Const(value))
    .simplify();
    Ok(TangentLine { line, slope, value })
}

/// Normal line of `func` at `point`; vertical normals yield `line: None`.
pub fn normal_line(
    func: impl Into<ExprInput>,
    point: f64,
    var: &str,
) -> Result<NormalLine, CalcError> {
    let func = func.into().resolve()?;
    let slope = eval_finite(&func.diff(var).simplify(), var, point)?;
    let value = eval_finite(&func, var, point)?;
    if slope == 0.0 {
        return Ok(NormalLine { line: None, value });
    }
    let normal_slope = -1.0 / slope;
    let line = (Expr::Const(normal_slope) * (Expr::Var(var.to_string()) - Expr::Const(point))
        + Expr::Const(value))
    .simplify();
    Ok(NormalLine {
        line: Some(line),
        value,
    })
}

/// Implicit derivative dy/dx of a relation F(x, y) = 0:
/// dy/dx = -(∂F/∂x)/(∂F/∂y). The caller guarantees F depends on both
/// variables; a zero ∂F/∂y is passed through as an undefined quotient.
pub fn implicit_derivative(
    equation: impl Into<ExprInput>,
    dependent_var: &str,
    independent_var: &str,
) -> Result<Expr, CalcError> {
    let equation = equation.into().resolve()?;
    let df_dx = equation.diff(independent_var);
    let df_dy = equation.diff(dependent_var);
    Ok((-(df_dx / df_dy)).simplify())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_derivative_first_order() {
        let df = compute_derivative("x^3", "x", 1).unwrap();
        assert_relative_eq!(df.eval_at("x", 2.0).unwrap(), 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_compute_derivative_order_zero_is_identity() {
        let f = compute_derivative("sin(x)", "x", 0).unwrap();
        assert_eq!(f, Expr::sin(Expr::Var("x".to_string()).boxed()));
    }

    #[test]
    fn test_tangent_passes_through_the_point() {
        // tangent of f at a evaluated at a equals f(a) exactly
        let a = 1.3;
        let tangent = tangent_line("x^2 + exp(x)", a, "x").unwrap();
        let at_a = tangent.line.eval_at("x", a).unwrap();
        assert_eq!(at_a, tangent.value);
    }

    #[test]
    fn test_tangent_slope_of_parabola() {
        let tangent = tangent_line("x^2", 3.0, "x").unwrap();
        assert_relative_eq!(tangent.slope, 6.0, max_relative = 1e-12);
        assert_relative_eq!(tangent.value, 9.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tangent_at_undefined_point_is_error() {
        let result = tangent_line("1/x", 0.0, "x");
        assert!(matches!(result, Err(CalcError::Symbolic(_))));
    }

    #[test]
    fn test_normal_line_perpendicular() {
        let tangent = tangent_line("x^2", 1.0, "x").unwrap();
        let normal = normal_line("x^2", 1.0, "x").unwrap();
        let normal_slope = normal
            .line
            .as_ref()
            .unwrap()
            .diff("x")
            .simplify()
            .eval_at("x", 1.0)
            .unwrap();
        assert_relative_eq!(tangent.slope * normal_slope, -1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_normal_line_vertical_sentinel() {
        // slope of x^2 at 0 is zero, normal is vertical
        let normal = normal_line("x^2", 0.0, "x").unwrap();
        assert!(normal.line.is_none());
        assert_eq!(normal.value, 0.0);
    }

    #[test]
    fn test_implicit_derivative_circle() {
        // x^2 + y^2 - 25 = 0 => dy/dx = -x/y
        let dy_dx = implicit_derivative("x^2 + y^2 - 25", "y", "x").unwrap();
        let at = dy_dx.set_variable("x", 3.0).set_variable("y", 4.0).simplify();
        match at {
            Expr::Const(v) => assert_relative_eq!(v, -0.75, max_relative = 1e-12),
            other => panic!("expected a constant, got {}", other),
        }
    }
}
