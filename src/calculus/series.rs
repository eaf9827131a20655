//! Series service: Taylor and Maclaurin expansions built from successive
//! symbolic derivatives.

use crate::calculus::adapter::{CalcError, ExprInput};
use crate::symbolic::symbolic_engine::Expr;

/// Expansion order used by `power_series_representation`.
const DEFAULT_SERIES_ORDER: usize = 10;

/// Taylor polynomial of `func` around `point` up to degree `order`:
/// Σ f⁽ᵏ⁾(point)/k! · (var - point)ᵏ.
///
/// Each derivative must evaluate to a finite value at `point`; otherwise the
/// expansion does not exist there and a symbolic error is returned.
pub fn taylor_series(
    func: impl Into<ExprInput>,
    var: &str,
    point: f64,
    order: usize,
) -> Result<Expr, CalcError> {
    let func = func.into().resolve()?;
    let offset = Expr::Var(var.to_string()) - Expr::Const(point);

    let mut series = Expr::Const(0.0);
    let mut derivative = func;
    let mut factorial = 1.0;
    for k in 0..=order {
        if k > 0 {
            derivative = derivative.diff(var).simplify();
            factorial *= k as f64;
        }
        let coefficient = derivative.eval_at(var, point).map_err(CalcError::Symbolic)?;
        if !coefficient.is_finite() {
            return Err(CalcError::Symbolic(format!(
                "derivative of order {} is undefined at {} = {}",
                k, var, point
            )));
        }
        let term = Expr::Const(coefficient / factorial)
            * offset.clone().pow(Expr::Const(k as f64));
        series = series + term;
    }
    Ok(series.simplify())
}

/// Maclaurin expansion: Taylor series around zero.
pub fn maclaurin_series(
    func: impl Into<ExprInput>,
    var: &str,
    order: usize,
) -> Result<Expr, CalcError> {
    taylor_series(func, var, 0.0, order)
}

/// Power series representation of `func` around zero at the default order.
pub fn power_series_representation(
    func: impl Into<ExprInput>,
    var: &str,
) -> Result<Expr, CalcError> {
    maclaurin_series(func, var, DEFAULT_SERIES_ORDER)
}
