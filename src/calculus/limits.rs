//! Limit service: directional limits, continuity checks and L'Hopital
//! iteration for indeterminate forms.
//!
//! Limits are resolved in two stages: exact substitution first, and when the
//! substituted value is undefined, directional numeric sampling at shrinking
//! offsets from the limit point. The sampled ladder is classified as
//! convergence to a finite value, signed divergence, or `Undefined` (which is
//! also the verdict when the two sides of a two-sided limit disagree).

use crate::calculus::adapter::{CalcError, ExprInput};
use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

/// Point a limit is taken at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitPoint {
    Finite(f64),
    PlusInfinity,
    MinusInfinity,
}

impl From<f64> for LimitPoint {
    fn from(value: f64) -> Self {
        LimitPoint::Finite(value)
    }
}

/// Approach direction; ignored for limits at infinity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LimitDirection {
    #[default]
    TwoSided,
    FromAbove,
    FromBelow,
}

/// Result of a limit evaluation. `Undefined` is the engine's native
/// undefined-value sentinel: oscillation, disagreeing one-sided limits, or a
/// form the sampler cannot classify.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitValue {
    Finite(f64),
    PlusInfinity,
    MinusInfinity,
    Undefined,
}

impl LimitValue {
    pub fn is_zero(&self) -> bool {
        matches!(self, LimitValue::Finite(v) if v.abs() < 1e-12)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, LimitValue::Finite(_))
    }
}

impl fmt::Display for LimitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitValue::Finite(v) => write!(f, "{}", v),
            LimitValue::PlusInfinity => write!(f, "oo"),
            LimitValue::MinusInfinity => write!(f, "-oo"),
            LimitValue::Undefined => write!(f, "undefined"),
        }
    }
}

/// Continuity verdict with a human-readable reason. Fails closed: any
/// evaluation problem yields `continuous: false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuityVerdict {
    pub continuous: bool,
    pub reason: String,
}

/// One examined form in the L'Hopital iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct LhopitalStep {
    pub iteration: usize,
    pub numerator: Expr,
    pub denominator: Expr,
    pub num_limit: LimitValue,
    pub den_limit: LimitValue,
}

/// Offsets for the sampling ladder at a finite point.
const FINITE_DELTAS: [f64; 7] = [1e-2, 1e-3, 1e-4, 1e-5, 1e-6, 1e-7, 1e-8];
/// Magnitudes for the sampling ladder at infinity.
const INFINITE_MAGNITUDES: [f64; 7] = [1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8];

/// Computes the limit of `expr` as `var` approaches `point`.
pub fn compute_limit(
    expr: impl Into<ExprInput>,
    var: &str,
    point: impl Into<LimitPoint>,
    direction: LimitDirection,
) -> Result<LimitValue, CalcError> {
    let expr = expr.into().resolve()?.simplify();
    Ok(limit_of(&expr, var, point.into(), direction))
}

/// Limit of an already-resolved expression; never fails, undefined forms
/// come back as `LimitValue::Undefined`.
pub(crate) fn limit_of(
    expr: &Expr,
    var: &str,
    point: LimitPoint,
    direction: LimitDirection,
) -> LimitValue {
    match point {
        LimitPoint::Finite(a) => {
            // exact substitution settles the continuous case
            if let Ok(value) = expr.eval_at(var, a) {
                if value.is_finite() {
                    return LimitValue::Finite(value);
                }
            }
            match direction {
                LimitDirection::FromAbove => one_sided(expr, var, a, 1.0),
                LimitDirection::FromBelow => one_sided(expr, var, a, -1.0),
                LimitDirection::TwoSided => {
                    let above = one_sided(expr, var, a, 1.0);
                    let below = one_sided(expr, var, a, -1.0);
                    merge_two_sided(above, below)
                }
            }
        }
        LimitPoint::PlusInfinity => {
            classify_ladder(&sample(expr, var, INFINITE_MAGNITUDES.iter().copied()))
        }
        LimitPoint::MinusInfinity => {
            classify_ladder(&sample(expr, var, INFINITE_MAGNITUDES.iter().map(|m| -m)))
        }
    }
}

fn sample(expr: &Expr, var: &str, points: impl Iterator<Item = f64>) -> Vec<f64> {
    points
        .map(|x| expr.eval_at(var, x).unwrap_or(f64::NAN))
        .collect()
}

fn one_sided(expr: &Expr, var: &str, a: f64, sign: f64) -> LimitValue {
    let values = sample(expr, var, FINITE_DELTAS.iter().map(|d| a + sign * d));
    classify_ladder(&values)
}

/// Classifies a ladder of samples taken ever closer to the limit point.
fn classify_ladder(values: &[f64]) -> LimitValue {
    if values.len() < 2 || values.iter().any(|v| v.is_nan()) {
        return LimitValue::Undefined;
    }
    let last = values[values.len() - 1];
    if last.is_infinite() {
        return if last.is_sign_positive() {
            LimitValue::PlusInfinity
        } else {
            LimitValue::MinusInfinity
        };
    }

    // signed, strictly growing magnitudes mean divergence
    let all_positive = values.iter().all(|&v| v > 0.0);
    let all_negative = values.iter().all(|&v| v < 0.0);
    let magnitudes_grow = values.windows(2).all(|w| w[1].abs() > w[0].abs());
    if magnitudes_grow
        && (all_positive || all_negative)
        && last.abs() > 2.0 * values[0].abs()
    {
        return if all_positive {
            LimitValue::PlusInfinity
        } else {
            LimitValue::MinusInfinity
        };
    }

    // monotone decay toward zero: the relative test below never fires for a
    // geometric tail, classify it directly
    let magnitudes_shrink = values.windows(2).all(|w| w[1].abs() < w[0].abs());
    if magnitudes_shrink && last.abs() < 1e-6 {
        return LimitValue::Finite(0.0);
    }

    // convergence: the tail stops moving
    let second_last = values[values.len() - 2];
    let diff = (last - second_last).abs();
    let scale = last.abs().max(second_last.abs()).max(1e-15);
    if diff / scale < 1e-3 || diff < 1e-10 {
        return LimitValue::Finite(snap(last));
    }

    LimitValue::Undefined
}

/// Snaps a sampled value to the nearest integer when it is within sampling
/// noise of one, so classification against exact forms like 0 works.
fn snap(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-6 {
        rounded
    } else {
        value
    }
}

fn merge_two_sided(above: LimitValue, below: LimitValue) -> LimitValue {
    match (above, below) {
        (LimitValue::Finite(a), LimitValue::Finite(b)) => {
            let diff = (a - b).abs();
            let scale = a.abs().max(b.abs()).max(1e-15);
            if diff / scale < 1e-3 || diff < 1e-10 {
                LimitValue::Finite(a)
            } else {
                LimitValue::Undefined
            }
        }
        (LimitValue::PlusInfinity, LimitValue::PlusInfinity) => LimitValue::PlusInfinity,
        (LimitValue::MinusInfinity, LimitValue::MinusInfinity) => LimitValue::MinusInfinity,
        _ => LimitValue::Undefined,
    }
}

/// Checks continuity of `func` at `point`: f(point) exists, the two-sided
/// limit exists, and the two agree. Every failure mode - including a parse
/// or evaluation error - is reported as a negative verdict, never an Err.
pub fn check_continuity(
    func: impl Into<ExprInput>,
    var: &str,
    point: f64,
) -> ContinuityVerdict {
    let func = match func.into().resolve() {
        Ok(expr) => expr.simplify(),
        Err(e) => {
            return ContinuityVerdict {
                continuous: false,
                reason: format!("error checking continuity: {}", e),
            };
        }
    };

    let f_at_point = match func.eval_at(var, point) {
        Ok(v) if v.is_finite() => v,
        _ => {
            return ContinuityVerdict {
                continuous: false,
                reason: format!("f({}) does not exist", point),
            };
        }
    };

    let limit = limit_of(&func, var, LimitPoint::Finite(point), LimitDirection::TwoSided);
    let limit_value = match limit {
        LimitValue::Finite(v) => v,
        _ => {
            return ContinuityVerdict {
                continuous: false,
                reason: format!("limit as {} -> {} does not exist", var, point),
            };
        }
    };

    let diff = (limit_value - f_at_point).abs();
    if diff <= 1e-9 * f_at_point.abs().max(1.0) {
        ContinuityVerdict {
            continuous: true,
            reason: "function is continuous".to_string(),
        }
    } else {
        ContinuityVerdict {
            continuous: false,
            reason: format!(
                "limit = {} != f({}) = {}",
                limit_value, point, f_at_point
            ),
        }
    }
}

/// Ratio of two already-classified limits; two infinities never make a
/// determinate quotient here.
fn limit_ratio(num: LimitValue, den: LimitValue) -> LimitValue {
    use LimitValue::*;
    match (num, den) {
        (Finite(n), Finite(d)) => Finite(n / d),
        (Finite(_), PlusInfinity) | (Finite(_), MinusInfinity) => Finite(0.0),
        (PlusInfinity, Finite(d)) => {
            if d >= 0.0 { PlusInfinity } else { MinusInfinity }
        }
        (MinusInfinity, Finite(d)) => {
            if d >= 0.0 { MinusInfinity } else { PlusInfinity }
        }
        _ => Undefined,
    }
}

/// Applies L'Hopital's rule iteratively to num/den at `point`.
///
/// Every examined form is recorded. A non-indeterminate pair resolves
/// immediately (infinity when the denominator limit is zero); after
/// `max_iterations` differentiations the limit of the final ratio is returned
/// directly - best-effort, the caller must treat a remaining `Undefined` as
/// unresolved.
pub fn lhopital_rule(
    numerator: impl Into<ExprInput>,
    denominator: impl Into<ExprInput>,
    var: &str,
    point: impl Into<LimitPoint>,
    max_iterations: usize,
) -> Result<(LimitValue, Vec<LhopitalStep>), CalcError> {
    let point = point.into();
    let mut num = numerator.into().resolve()?.simplify();
    let mut den = denominator.into().resolve()?.simplify();
    let mut steps = Vec::new();

    for iteration in 0..max_iterations {
        let num_limit = limit_of(&num, var, point, LimitDirection::TwoSided);
        let den_limit = limit_of(&den, var, point, LimitDirection::TwoSided);
        steps.push(LhopitalStep {
            iteration,
            numerator: num.clone(),
            denominator: den.clone(),
            num_limit,
            den_limit,
        });

        let indeterminate = (num_limit.is_zero() && den_limit.is_zero())
            || (num_limit == LimitValue::PlusInfinity && den_limit == LimitValue::PlusInfinity)
            || (num_limit == LimitValue::MinusInfinity
                && den_limit == LimitValue::MinusInfinity);

        if !indeterminate {
            if den_limit.is_zero() {
                return Ok((LimitValue::PlusInfinity, steps));
            }
            return Ok((limit_ratio(num_limit, den_limit), steps));
        }

        num = num.diff(var).simplify();
        den = den.diff(var).simplify();
    }

    // budget exhausted: take the limit of the final ratio directly
    let ratio = (num / den).simplify();
    let result = limit_of(&ratio, var, point, LimitDirection::TwoSided);
    Ok((result, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_limit_by_substitution() {
        let limit = compute_limit("x^2 + 1", "x", 2.0, LimitDirection::TwoSided).unwrap();
        assert_eq!(limit, LimitValue::Finite(5.0));
    }

    #[test]
    fn test_limit_sin_x_over_x() {
        let limit = compute_limit("sin(x)/x", "x", 0.0, LimitDirection::TwoSided).unwrap();
        match limit {
            LimitValue::Finite(v) => assert_relative_eq!(v, 1.0, max_relative = 1e-6),
            other => panic!("expected finite limit, got {:?}", other),
        }
    }

    #[test]
    fn test_one_sided_limits_of_reciprocal() {
        let above = compute_limit("1/x", "x", 0.0, LimitDirection::FromAbove).unwrap();
        let below = compute_limit("1/x", "x", 0.0, LimitDirection::FromBelow).unwrap();
        assert_eq!(above, LimitValue::PlusInfinity);
        assert_eq!(below, LimitValue::MinusInfinity);
    }

    #[test]
    fn test_two_sided_limit_of_reciprocal_undefined() {
        let limit = compute_limit("1/x", "x", 0.0, LimitDirection::TwoSided).unwrap();
        assert_eq!(limit, LimitValue::Undefined);
    }

    #[test]
    fn test_limit_at_infinity() {
        let limit = compute_limit(
            "1/x",
            "x",
            LimitPoint::PlusInfinity,
            LimitDirection::TwoSided,
        )
        .unwrap();
        assert_eq!(limit, LimitValue::Finite(0.0));
    }

    #[test]
    fn test_divergent_limit_at_infinity() {
        let limit = compute_limit(
            "x^2",
            "x",
            LimitPoint::PlusInfinity,
            LimitDirection::TwoSided,
        )
        .unwrap();
        assert_eq!(limit, LimitValue::PlusInfinity);
    }

    #[test]
    fn test_oscillating_limit_undefined() {
        let limit = compute_limit("sin(1/x)", "x", 0.0, LimitDirection::TwoSided).unwrap();
        assert_eq!(limit, LimitValue::Undefined);
    }

    #[test]
    fn test_continuity_of_polynomial() {
        let verdict = check_continuity("x^2 - 3*x", "x", 1.5);
        assert!(verdict.continuous);
    }

    #[test]
    fn test_discontinuity_of_reciprocal_at_zero() {
        let verdict = check_continuity("1/x", "x", 0.0);
        assert!(!verdict.continuous);
        assert!(verdict.reason.contains("does not exist"));
        assert!(verdict.reason.contains('0'));
    }

    #[test]
    fn test_continuity_catches_parse_error() {
        let verdict = check_continuity("(x +", "x", 0.0);
        assert!(!verdict.continuous);
        assert!(verdict.reason.contains("error checking continuity"));
    }

    #[test]
    fn test_lhopital_sin_x_over_x() {
        let (limit, steps) = lhopital_rule("sin(x)", "x", "x", 0.0, 5).unwrap();
        assert_eq!(limit, LimitValue::Finite(1.0));
        // the 0/0 form resolves after exactly one differentiation
        assert_eq!(steps.len(), 2);
        assert!(steps[0].num_limit.is_zero());
        assert!(steps[0].den_limit.is_zero());
    }

    #[test]
    fn test_lhopital_non_indeterminate_resolves_immediately() {
        let (limit, steps) = lhopital_rule("x + 2", "x + 1", "x", 1.0, 5).unwrap();
        assert_eq!(limit, LimitValue::Finite(1.5));
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_lhopital_denominator_zero_gives_infinity() {
        let (limit, _) = lhopital_rule("x + 1", "x", "x", 0.0, 5).unwrap();
        assert_eq!(limit, LimitValue::PlusInfinity);
    }

    #[test]
    fn test_lhopital_exp_over_x_at_infinity() {
        let (limit, _) =
            lhopital_rule("exp(x)", "x", "x", LimitPoint::PlusInfinity, 5).unwrap();
        assert_eq!(limit, LimitValue::PlusInfinity);
    }
}
