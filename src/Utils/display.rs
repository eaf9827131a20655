//! LaTeX rendering: expressions and full calculus statements (equations,
//! derivatives, integrals, limits, series) as LaTeX strings. Rendering only -
//! nothing here evaluates anything.

use crate::calculus::limits::{LimitDirection, LimitPoint, LimitValue};
use crate::symbolic::symbolic_engine::Expr;

/// Formats a constant without a trailing `.0` when it is an integer.
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn wrap_if_sum(expr: &Expr) -> String {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => format!("\\left({}\\right)", latex(expr)),
        _ => latex(expr),
    }
}

fn wrap_pow_base(expr: &Expr) -> String {
    match expr {
        Expr::Var(_) => latex(expr),
        Expr::Const(c) if *c >= 0.0 => latex(expr),
        _ => format!("\\left({}\\right)", latex(expr)),
    }
}

fn unary(name: &str, arg: &Expr) -> String {
    format!("{}\\left({}\\right)", name, latex(arg))
}

/// Renders an expression as LaTeX.
pub fn latex(expr: &Expr) -> String {
    match expr {
        Expr::Var(name) => name.clone(),
        Expr::Const(value) => fmt_number(*value),
        Expr::Add(lhs, rhs) => format!("{} + {}", latex(lhs), latex(rhs)),
        Expr::Sub(lhs, rhs) => format!("{} - {}", latex(lhs), wrap_if_sum(rhs)),
        Expr::Mul(lhs, rhs) => {
            // -1 * e is a negation, not a product
            if matches!(lhs.as_ref(), Expr::Const(c) if *c == -1.0) {
                return format!("-{}", wrap_if_sum(rhs));
            }
            format!("{} \\cdot {}", wrap_if_sum(lhs), wrap_if_sum(rhs))
        }
        Expr::Div(num, den) => format!("\\frac{{{}}}{{{}}}", latex(num), latex(den)),
        Expr::Pow(base, exp) => format!("{}^{{{}}}", wrap_pow_base(base), latex(exp)),
        Expr::Exp(arg) => format!("e^{{{}}}", latex(arg)),
        Expr::Ln(arg) => unary("\\ln", arg),
        Expr::sin(arg) => unary("\\sin", arg),
        Expr::cos(arg) => unary("\\cos", arg),
        Expr::tg(arg) => unary("\\tan", arg),
        Expr::ctg(arg) => unary("\\cot", arg),
        Expr::arcsin(arg) => unary("\\arcsin", arg),
        Expr::arccos(arg) => unary("\\arccos", arg),
        Expr::arctg(arg) => unary("\\arctan", arg),
        Expr::arcctg(arg) => unary("\\operatorname{arccot}", arg),
        Expr::abs(arg) => format!("\\left|{}\\right|", latex(arg)),
    }
}

/// `name = expr`, e.g. `f(x) = x^{2}`.
pub fn format_equation(name: &str, expr: &Expr) -> String {
    format!("{} = {}", name, latex(expr))
}

/// Derivative statement: `\frac{d}{dx}[f] = f'` (with `d^{n}` above order 1).
pub fn format_derivative(func: &Expr, derivative: &Expr, var: &str, order: usize) -> String {
    let operator = if order == 1 {
        format!("\\frac{{d}}{{d{}}}", var)
    } else {
        format!("\\frac{{d^{{{}}}}}{{d{}^{{{}}}}}", order, var, order)
    };
    format!(
        "{}\\left[{}\\right] = {}",
        operator,
        latex(func),
        latex(derivative)
    )
}

/// Integral statement. Without bounds the constant of integration is
/// appended: `\int f\, dx = F + C`.
pub fn format_integral(
    integrand: &Expr,
    var: &str,
    bounds: Option<(f64, f64)>,
    result: &str,
) -> String {
    match bounds {
        Some((lower, upper)) => format!(
            "\\int_{{{}}}^{{{}}} {} \\, d{} = {}",
            fmt_number(lower),
            fmt_number(upper),
            latex(integrand),
            var,
            result
        ),
        None => format!(
            "\\int {} \\, d{} = {} + C",
            latex(integrand),
            var,
            result
        ),
    }
}

fn latex_point(point: &LimitPoint) -> String {
    match point {
        LimitPoint::Finite(a) => fmt_number(*a),
        LimitPoint::PlusInfinity => "\\infty".to_string(),
        LimitPoint::MinusInfinity => "-\\infty".to_string(),
    }
}

fn latex_limit_value(value: &LimitValue) -> String {
    match value {
        LimitValue::Finite(v) => fmt_number(*v),
        LimitValue::PlusInfinity => "\\infty".to_string(),
        LimitValue::MinusInfinity => "-\\infty".to_string(),
        LimitValue::Undefined => "\\text{undefined}".to_string(),
    }
}

/// Limit statement with a directional superscript for one-sided limits:
/// `\lim_{x \to 0^{+}} ... = ...`.
pub fn format_limit(
    expr: &Expr,
    var: &str,
    point: &LimitPoint,
    direction: LimitDirection,
    value: &LimitValue,
) -> String {
    let approach = match direction {
        LimitDirection::TwoSided => latex_point(point),
        LimitDirection::FromAbove => format!("{}^{{+}}", latex_point(point)),
        LimitDirection::FromBelow => format!("{}^{{-}}", latex_point(point)),
    };
    format!(
        "\\lim_{{{} \\to {}}} {} = {}",
        var,
        approach,
        latex(expr),
        latex_limit_value(value)
    )
}

/// Series statement: the truncated expansion with its order term,
/// `f \approx p(x) + O\left((x - a)^{n+1}\right)`.
pub fn format_series(
    func: &Expr,
    var: &str,
    point: f64,
    order: usize,
    series: &Expr,
) -> String {
    let offset = if point == 0.0 {
        var.to_string()
    } else {
        format!("\\left({} - {}\\right)", var, fmt_number(point))
    };
    format!(
        "{} \\approx {} + O\\left({}^{{{}}}\\right)",
        latex(func),
        latex(series),
        offset,
        order + 1
    )
}
