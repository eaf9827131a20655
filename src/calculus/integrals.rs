//! Integral service: symbolic antiderivatives, definite integrals over
//! numeric bounds, area between curves, solids of revolution and arc length.

use crate::calculus::adapter::{CalcError, ExprInput};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use std::f64::consts::PI;

/// Sample count for the sign scan in `area_between_curves`.
const SIGN_SCAN_POINTS: usize = 101;

/// Indefinite integral (without the constant of integration).
pub fn indefinite_integral(expr: impl Into<ExprInput>, var: &str) -> Result<Expr, CalcError> {
    let expr = expr.into().resolve()?;
    expr.integrate(var)
        .map(|antiderivative| antiderivative.simplify())
        .map_err(CalcError::Unevaluated)
}

/// Definite integral of `expr` over [lower, upper].
pub fn definite_integral(
    expr: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
) -> Result<f64, CalcError> {
    let expr = expr.into().resolve()?;
    definite(&expr, var, lower, upper)
}

fn definite(expr: &Expr, var: &str, lower: f64, upper: f64) -> Result<f64, CalcError> {
    match expr.integrate(var) {
        Ok(antiderivative) => {
            let antiderivative = antiderivative.simplify();
            let at_upper = eval_bound(&antiderivative, var, upper)?;
            let at_lower = eval_bound(&antiderivative, var, lower)?;
            Ok(at_upper - at_lower)
        }
        Err(msg) => Err(CalcError::Unevaluated(msg)),
    }
}

fn eval_bound(antiderivative: &Expr, var: &str, bound: f64) -> Result<f64, CalcError> {
    let value = antiderivative
        .eval_at(var, bound)
        .map_err(CalcError::Symbolic)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Symbolic(format!(
            "{} is undefined at {} = {}",
            antiderivative, var, bound
        )))
    }
}

/// Sign of `expr` over [lower, upper], determined by sampling.
enum IntervalSign {
    NonNegative,
    NonPositive,
    Changes,
    /// the expression evaluates to NaN across the scan
    Undefined,
}

fn interval_sign(expr: &Expr, var: &str, lower: f64, upper: f64) -> IntervalSign {
    let mut seen_positive = false;
    let mut seen_negative = false;
    let mut nan_count = 0usize;
    for x in linspace(lower, upper, SIGN_SCAN_POINTS).iter() {
        let value = expr.eval_at(var, *x).unwrap_or(f64::NAN);
        if value.is_nan() {
            nan_count += 1;
        } else if value > 1e-12 {
            seen_positive = true;
        } else if value < -1e-12 {
            seen_negative = true;
        }
        if seen_positive && seen_negative {
            return IntervalSign::Changes;
        }
    }
    if 2 * nan_count > SIGN_SCAN_POINTS {
        IntervalSign::Undefined
    } else if seen_negative {
        IntervalSign::NonPositive
    } else {
        IntervalSign::NonNegative
    }
}

/// Area between two curves: ∫ |f1 - f2| over [lower, upper].
///
/// The absolute value is resolved by determining the sign of the simplified
/// difference over the interval. When the curves cross and no single sign
/// holds, the integral is left unevaluated (`CalcError::Unevaluated`) - the
/// interval is NOT subdivided at the crossing points.
pub fn area_between_curves(
    f1: impl Into<ExprInput>,
    f2: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
) -> Result<f64, CalcError> {
    let f1 = f1.into().resolve()?;
    let f2 = f2.into().resolve()?;
    let difference = (f1 - f2).simplify();
    if difference.is_zero() {
        return Ok(0.0);
    }
    match interval_sign(&difference, var, lower, upper) {
        IntervalSign::NonNegative => definite(&difference, var, lower, upper),
        IntervalSign::NonPositive => Ok(-definite(&difference, var, lower, upper)?),
        IntervalSign::Changes => Err(CalcError::Unevaluated(format!(
            "sign of {} changes on [{}, {}]; ∫ |f1 - f2| has no closed form here",
            difference, lower, upper
        ))),
        IntervalSign::Undefined => Err(CalcError::Unevaluated(format!(
            "{} is undefined on [{}, {}]",
            difference, lower, upper
        ))),
    }
}

/// Volume by the disk method: V = π ∫ R(x)² dx.
pub fn volume_disk_method(
    radius_func: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
) -> Result<f64, CalcError> {
    let radius = radius_func.into().resolve()?;
    let integrand = radius.clone().pow(Expr::Const(2.0)).simplify();
    Ok(PI * definite(&integrand, var, lower, upper)?)
}

/// Volume by the shell method: V = 2π ∫ r(x)·h(x) dx.
pub fn volume_shell_method(
    radius_func: impl Into<ExprInput>,
    height_func: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
) -> Result<f64, CalcError> {
    let radius = radius_func.into().resolve()?;
    let height = height_func.into().resolve()?;
    let integrand = (radius * height).simplify();
    Ok(2.0 * PI * definite(&integrand, var, lower, upper)?)
}

/// Arc length: L = ∫ √(1 + f'(x)²) dx.
pub fn arc_length(
    func: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
) -> Result<f64, CalcError> {
    let func = func.into().resolve()?;
    let derivative = func.diff(var).simplify();
    let integrand = (Expr::Const(1.0) + derivative.pow(Expr::Const(2.0)))
        .sqrt()
        .simplify();
    definite(&integrand, var, lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_indefinite_integral_polynomial() {
        let result = indefinite_integral("3*x^2", "x").unwrap();
        // x^3 up to the dropped constant
        assert_relative_eq!(result.eval_at("x", 2.0).unwrap(), 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_definite_integral_parabola() {
        let result = definite_integral("x^2", "x", 0.0, 1.0).unwrap();
        assert_relative_eq!(result, 1.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_definite_integral_equal_bounds_is_zero() {
        let result = definite_integral("exp(x) + sin(x)", "x", 2.2, 2.2).unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_area_between_identical_curves_is_zero() {
        let result = area_between_curves("x^2", "x^2", "x", 0.0, 5.0).unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_area_between_ordered_curves() {
        // x over x^2 on [0,1]: area = 1/2 - 1/3 = 1/6
        let result = area_between_curves("x", "x^2", "x", 0.0, 1.0).unwrap();
        assert_relative_eq!(result, 1.0 / 6.0, max_relative = 1e-12);
    }

    #[test]
    fn test_area_between_reversed_curves_is_positive() {
        let result = area_between_curves("x^2", "x", "x", 0.0, 1.0).unwrap();
        assert_relative_eq!(result, 1.0 / 6.0, max_relative = 1e-12);
    }

    #[test]
    fn test_area_between_crossing_curves_left_unevaluated() {
        // x and x^3 cross at 0; sign changes over [-1, 1]
        let result = area_between_curves("x", "x^3", "x", -1.0, 1.0);
        assert!(matches!(result, Err(CalcError::Unevaluated(_))));
    }

    #[test]
    fn test_area_undefined_difference_left_unevaluated() {
        // ln(x) has no real values on [-2, -1]; NaN is not an area
        let result = area_between_curves("ln(x)", "0", "x", -2.0, -1.0);
        assert!(matches!(result, Err(CalcError::Unevaluated(_))));
    }

    #[test]
    fn test_definite_integral_undefined_at_bound_is_error() {
        let result = definite_integral("ln(x)", "x", -2.0, -1.0);
        assert!(matches!(result, Err(CalcError::Symbolic(_))));
    }

    #[test]
    fn test_volume_disk_cone() {
        // rotating y = x around the x axis over [0,1]: V = π/3
        let volume = volume_disk_method("x", "x", 0.0, 1.0).unwrap();
        assert_relative_eq!(volume, PI / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_volume_shell_cylinder() {
        // shells of height 1 at radius x over [0,1]: V = 2π·1/2 = π
        let volume = volume_shell_method("x", "1", "x", 0.0, 1.0).unwrap();
        assert_relative_eq!(volume, PI, max_relative = 1e-12);
    }

    #[test]
    fn test_arc_length_of_line() {
        // y = 2x over [0,1]: L = √5
        let length = arc_length("2*x", "x", 0.0, 1.0).unwrap();
        assert_relative_eq!(length, 5.0f64.sqrt(), max_relative = 1e-12);
    }
}
