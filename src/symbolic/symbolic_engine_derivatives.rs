//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with analytical differentiation, closure
//! generation (lambdification) and direct numeric evaluation. These three
//! operations are the computational backbone of the calculus services: every
//! tangent line, Taylor coefficient, Newton step and quadrature sample goes
//! through this module.
//!
//! ## Key Methods
//! - `diff(var: &str)` - analytical partial derivative
//! - `n_th_derivative1D()` - higher-order derivatives with simplification
//! - `lambdify1D()` - single-variable expression to executable Rust closure
//! - `eval_at()` - direct evaluation at a point without closure creation

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard rules from calculus:
    /// - Power rule: d/dx(x^n) = n*x^(n-1)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
    ///
    /// For multivariable expressions this is the partial derivative.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x"); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * (**rhs).clone() + (**lhs).clone() * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                (lhs.diff(var) * (**rhs).clone() - rhs.diff(var) * (**lhs).clone())
                    / ((**rhs).clone() * (**rhs).clone())
            }
            Expr::Pow(base, exp) => {
                if exp.contains_variable(var) {
                    // general case f^g = exp(g*ln f)
                    self.clone()
                        * (exp.diff(var) * (**base).clone().ln()
                            + (**exp).clone() * base.diff(var) / (**base).clone())
                } else {
                    (**exp).clone()
                        * (**base)
                            .clone()
                            .pow((**exp).clone() - Expr::Const(1.0))
                        * base.diff(var)
                }
            }
            Expr::Exp(expr) => Expr::Exp(expr.clone()) * expr.diff(var),
            Expr::Ln(expr) => expr.diff(var) / (**expr).clone(),
            Expr::sin(expr) => Expr::cos(expr.clone()) * expr.diff(var),
            Expr::cos(expr) => {
                Expr::Const(-1.0) * Expr::sin(expr.clone()) * expr.diff(var)
            }
            Expr::tg(expr) => {
                expr.diff(var)
                    / Expr::cos(expr.clone()).pow(Expr::Const(2.0))
            }
            Expr::ctg(expr) => {
                Expr::Const(-1.0) * expr.diff(var)
                    / Expr::sin(expr.clone()).pow(Expr::Const(2.0))
            }
            Expr::arcsin(expr) => {
                expr.diff(var)
                    / (Expr::Const(1.0) - (**expr).clone().pow(Expr::Const(2.0)))
                        .pow(Expr::Const(0.5))
            }
            Expr::arccos(expr) => {
                Expr::Const(-1.0) * expr.diff(var)
                    / (Expr::Const(1.0) - (**expr).clone().pow(Expr::Const(2.0)))
                        .pow(Expr::Const(0.5))
            }
            Expr::arctg(expr) => {
                expr.diff(var)
                    / (Expr::Const(1.0) + (**expr).clone().pow(Expr::Const(2.0)))
            }
            Expr::arcctg(expr) => {
                Expr::Const(-1.0) * expr.diff(var)
                    / (Expr::Const(1.0) + (**expr).clone().pow(Expr::Const(2.0)))
            }
            // d|u|/dx = u/|u| * u', undefined at u = 0
            Expr::abs(expr) => {
                (**expr).clone() / Expr::abs(expr.clone()) * expr.diff(var)
            }
        }
    }

    /// Computes the nth derivative of a single-variable expression,
    /// simplifying after every differentiation.
    pub fn n_th_derivative1D(&self, var_name: &str, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff(var_name).simplify();
        }
        expr.simplify()
    }

    /// LAMBDIFICATION

    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// Whatever the variable is named, it becomes the closure argument.
    /// Expressions with no variables compile to constant closures.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp_fn = exp.lambdify1D();
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).cos())
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).tan())
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| 1.0 / expr_fn(x).tan())
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).asin())
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).acos())
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).atan())
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| PI / 2.0 - expr_fn(x).atan())
            }
            Expr::abs(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).abs())
            }
        }
    }

    /// DIRECT EVALUATION

    /// Evaluates the expression with a single variable bound to `x`.
    ///
    /// Unlike `lambdify1D`, a free variable other than `var` is an error
    /// rather than a silent rebinding.
    pub fn eval_at(&self, var: &str, x: f64) -> Result<f64, String> {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Ok(x)
                } else {
                    Err(format!("unbound variable '{}' in expression", name))
                }
            }
            Expr::Const(val) => Ok(*val),
            Expr::Add(lhs, rhs) => Ok(lhs.eval_at(var, x)? + rhs.eval_at(var, x)?),
            Expr::Sub(lhs, rhs) => Ok(lhs.eval_at(var, x)? - rhs.eval_at(var, x)?),
            Expr::Mul(lhs, rhs) => Ok(lhs.eval_at(var, x)? * rhs.eval_at(var, x)?),
            Expr::Div(lhs, rhs) => Ok(lhs.eval_at(var, x)? / rhs.eval_at(var, x)?),
            Expr::Pow(base, exp) => Ok(base.eval_at(var, x)?.powf(exp.eval_at(var, x)?)),
            Expr::Exp(expr) => Ok(expr.eval_at(var, x)?.exp()),
            Expr::Ln(expr) => Ok(expr.eval_at(var, x)?.ln()),
            Expr::sin(expr) => Ok(expr.eval_at(var, x)?.sin()),
            Expr::cos(expr) => Ok(expr.eval_at(var, x)?.cos()),
            Expr::tg(expr) => Ok(expr.eval_at(var, x)?.tan()),
            Expr::ctg(expr) => Ok(1.0 / expr.eval_at(var, x)?.tan()),
            Expr::arcsin(expr) => Ok(expr.eval_at(var, x)?.asin()),
            Expr::arccos(expr) => Ok(expr.eval_at(var, x)?.acos()),
            Expr::arctg(expr) => Ok(expr.eval_at(var, x)?.atan()),
            Expr::arcctg(expr) => Ok(PI / 2.0 - expr.eval_at(var, x)?.atan()),
            Expr::abs(expr) => Ok(expr.eval_at(var, x)?.abs()),
        }
    }
}
