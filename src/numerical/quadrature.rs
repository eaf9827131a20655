//! Numerical integration: Riemann sums over four grid placements and
//! Simpson's rule.

use crate::calculus::adapter::{CalcError, ExprInput};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use itertools::Itertools;
use strum_macros::{Display, EnumString};

/// Sample placement for a Riemann sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RiemannMethod {
    Left,
    Right,
    Midpoint,
    Trapezoid,
}

fn single_variable_closure(
    expr: &Expr,
    var: &str,
) -> Result<Box<dyn Fn(f64) -> f64>, CalcError> {
    let variables = expr.all_arguments_are_variables();
    if variables.iter().any(|v| v != var) {
        return Err(CalcError::InvalidArgument(format!(
            "integrand {} depends on variables other than {}",
            expr, var
        )));
    }
    Ok(expr.lambdify1D())
}

/// Riemann sum of `func` over [lower, upper] with `n` equal subintervals.
pub fn riemann_sum(
    func: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
    n: usize,
    method: RiemannMethod,
) -> Result<f64, CalcError> {
    if n == 0 {
        return Err(CalcError::InvalidArgument(
            "riemann sum needs at least one subinterval".to_string(),
        ));
    }
    let func = func.into().resolve()?;
    let f = single_variable_closure(&func, var)?;
    let h = (upper - lower) / n as f64;

    let sum = match method {
        RiemannMethod::Left => (0..n).map(|i| f(lower + i as f64 * h)).sum::<f64>(),
        RiemannMethod::Right => (1..=n).map(|i| f(lower + i as f64 * h)).sum::<f64>(),
        RiemannMethod::Midpoint => (0..n)
            .map(|i| f(lower + (i as f64 + 0.5) * h))
            .sum::<f64>(),
        RiemannMethod::Trapezoid => {
            let grid = linspace(lower, upper, n + 1);
            grid.iter()
                .tuple_windows()
                .map(|(a, b)| (f(*a) + f(*b)) / 2.0)
                .sum::<f64>()
        }
    };
    Ok(sum * h)
}

/// Simpson's rule over `n` subintervals; `n` must be even and nonzero.
/// Weights run (1, 4, 2, ..., 2, 4, 1) scaled by h/3.
pub fn simpsons_rule(
    func: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
    n: usize,
) -> Result<f64, CalcError> {
    if n == 0 || n % 2 != 0 {
        return Err(CalcError::InvalidArgument(format!(
            "Simpson's rule needs an even nonzero number of subintervals, got {}",
            n
        )));
    }
    let func = func.into().resolve()?;
    let f = single_variable_closure(&func, var)?;
    let h = (upper - lower) / n as f64;

    let grid = linspace(lower, upper, n + 1);
    let sum: f64 = grid
        .iter()
        .enumerate()
        .map(|(i, x)| {
            let weight = if i == 0 || i == n {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            weight * f(*x)
        })
        .sum();
    Ok(sum * h / 3.0)
}
