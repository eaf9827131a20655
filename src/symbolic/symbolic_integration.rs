//! Analytical (symbolic) integration. Rule dispatch per expression variant,
//! with a linear-argument substitution for the transcendental integrands.
//! Forms without a closed-form rule here return `Err` - callers treat that as
//! "the integral is left unevaluated", not as a crash.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// Main integration method - indefinite integral with respect to `var`,
    /// without the constant of integration.
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        match self {
            // ∫ c dx = c*x
            Expr::Const(c) => Ok(Expr::Const(*c) * Expr::Var(var.to_string())),

            // ∫ x dx = x²/2, ∫ y dx = y*x (if y ≠ x)
            Expr::Var(name) => {
                if name == var {
                    Ok(Expr::Var(var.to_string()).pow(Expr::Const(2.0)) / Expr::Const(2.0))
                } else {
                    Ok(Expr::Var(name.clone()) * Expr::Var(var.to_string()))
                }
            }

            // ∫ (f ± g) dx = ∫ f dx ± ∫ g dx
            Expr::Add(lhs, rhs) => Ok(lhs.integrate(var)? + rhs.integrate(var)?),
            Expr::Sub(lhs, rhs) => Ok(lhs.integrate(var)? - rhs.integrate(var)?),

            Expr::Mul(lhs, rhs) => self.integrate_multiplication(lhs, rhs, var),
            Expr::Div(lhs, rhs) => self.integrate_division(lhs, rhs, var),
            Expr::Pow(base, exp) => self.integrate_power(base, exp, var),

            // ∫ exp(a*x+b) dx = exp(a*x+b)/a
            Expr::Exp(inner) => {
                let (a, _) = linear_in(inner, var)
                    .ok_or_else(|| format!("no closed form for ∫ exp({}) d{}", inner, var))?;
                Ok(Expr::Exp(inner.clone()) / Expr::Const(a))
            }

            // ∫ ln(a*x+b) dx = (a*x+b)*(ln(a*x+b) - 1)/a
            Expr::Ln(inner) => {
                let (a, _) = linear_in(inner, var)
                    .ok_or_else(|| format!("no closed form for ∫ ln({}) d{}", inner, var))?;
                let u = (**inner).clone();
                Ok(u.clone() * (u.ln() - Expr::Const(1.0)) / Expr::Const(a))
            }

            // ∫ sin(a*x+b) dx = -cos(a*x+b)/a
            Expr::sin(inner) => {
                let (a, _) = linear_in(inner, var)
                    .ok_or_else(|| format!("no closed form for ∫ sin({}) d{}", inner, var))?;
                Ok(Expr::Const(-1.0) * Expr::cos(inner.clone()) / Expr::Const(a))
            }

            // ∫ cos(a*x+b) dx = sin(a*x+b)/a
            Expr::cos(inner) => {
                let (a, _) = linear_in(inner, var)
                    .ok_or_else(|| format!("no closed form for ∫ cos({}) d{}", inner, var))?;
                Ok(Expr::sin(inner.clone()) / Expr::Const(a))
            }

            // ∫ tg(a*x+b) dx = -ln|cos(a*x+b)|/a
            Expr::tg(inner) => {
                let (a, _) = linear_in(inner, var)
                    .ok_or_else(|| format!("no closed form for ∫ tg({}) d{}", inner, var))?;
                Ok(Expr::Const(-1.0) * Expr::Ln(Expr::abs(Expr::cos(inner.clone()).boxed()).boxed())
                    / Expr::Const(a))
            }

            // ∫ ctg(a*x+b) dx = ln|sin(a*x+b)|/a
            Expr::ctg(inner) => {
                let (a, _) = linear_in(inner, var)
                    .ok_or_else(|| format!("no closed form for ∫ ctg({}) d{}", inner, var))?;
                Ok(Expr::Ln(Expr::abs(Expr::sin(inner.clone()).boxed()).boxed()) / Expr::Const(a))
            }

            // ∫ arcsin(x) dx = x*arcsin(x) + sqrt(1-x²)
            Expr::arcsin(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    Ok(x.clone() * Expr::arcsin(inner.clone())
                        + (Expr::Const(1.0) - x.pow(Expr::Const(2.0))).sqrt())
                }
                _ => Err(format!("no closed form for ∫ arcsin({}) d{}", inner, var)),
            },

            // ∫ arccos(x) dx = x*arccos(x) - sqrt(1-x²)
            Expr::arccos(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    Ok(x.clone() * Expr::arccos(inner.clone())
                        - (Expr::Const(1.0) - x.pow(Expr::Const(2.0))).sqrt())
                }
                _ => Err(format!("no closed form for ∫ arccos({}) d{}", inner, var)),
            },

            // ∫ arctg(x) dx = x*arctg(x) - ln(1+x²)/2
            Expr::arctg(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    Ok(x.clone() * Expr::arctg(inner.clone())
                        - (Expr::Const(1.0) + x.pow(Expr::Const(2.0))).ln() / Expr::Const(2.0))
                }
                _ => Err(format!("no closed form for ∫ arctg({}) d{}", inner, var)),
            },

            // ∫ arcctg(x) dx = x*arcctg(x) + ln(1+x²)/2
            Expr::arcctg(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    Ok(x.clone() * Expr::arcctg(inner.clone())
                        + (Expr::Const(1.0) + x.pow(Expr::Const(2.0))).ln() / Expr::Const(2.0))
                }
                _ => Err(format!("no closed form for ∫ arcctg({}) d{}", inner, var)),
            },

            // |f| has no general antiderivative unless the sign of f is known;
            // the area-between-curves service resolves the sign numerically
            // before it ever reaches this rule
            Expr::abs(inner) => {
                if inner.contains_variable(var) {
                    Err(format!("∫ abs({}) d{} left unevaluated", inner, var))
                } else {
                    Ok(Expr::abs(inner.clone()) * Expr::Var(var.to_string()))
                }
            }
        }
    }

    /// Constant factors move outside the integral; anything else is out of
    /// scope for this rule set.
    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        if !lhs.contains_variable(var) {
            return Ok(lhs.clone() * rhs.integrate(var)?);
        }
        if !rhs.contains_variable(var) {
            return Ok(rhs.clone() * lhs.integrate(var)?);
        }
        Err(format!("no closed form for ∫ {} d{}", self, var))
    }

    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ f(x)/c dx = (1/c) * ∫ f(x) dx
        if !rhs.contains_variable(var) {
            return Ok(lhs.integrate(var)? / rhs.clone());
        }
        // ∫ c/(a*x+b) dx = (c/a) * ln|a*x+b|
        if !lhs.contains_variable(var) {
            if let Some((a, _)) = linear_in(rhs, var) {
                return Ok(
                    lhs.clone() * Expr::Ln(Expr::abs(rhs.clone().boxed()).boxed())
                        / Expr::Const(a),
                );
            }
        }
        Err(format!("no closed form for ∫ {} d{}", self, var))
    }

    /// Power rule over a linear base: ∫ (a*x+b)^n dx = (a*x+b)^(n+1)/(a*(n+1)),
    /// with the n = -1 logarithmic special case.
    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        if !self.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        let n = match exp {
            Expr::Const(n) => *n,
            _ => return Err(format!("no closed form for ∫ {} d{}", self, var)),
        };
        let (a, _) = linear_in(base, var)
            .ok_or_else(|| format!("no closed form for ∫ {} d{}", self, var))?;
        if n == -1.0 {
            return Ok(Expr::Ln(Expr::abs(base.clone().boxed()).boxed()) / Expr::Const(a));
        }
        Ok(base.clone().pow(Expr::Const(n + 1.0)) / Expr::Const(a * (n + 1.0)))
    }

    /// Definite integral over numeric bounds: F(upper) - F(lower).
    pub fn definite_integrate(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        let antiderivative = self.integrate(var)?.simplify();
        let at_upper = antiderivative.eval_at(var, upper)?;
        let at_lower = antiderivative.eval_at(var, lower)?;
        Ok(at_upper - at_lower)
    }
}

/// Recognises `a*var + b` with numeric `a != 0`, `b`; returns (a, b).
fn linear_in(expr: &Expr, var: &str) -> Option<(f64, f64)> {
    fn go(expr: &Expr, var: &str) -> Option<(f64, f64)> {
        match expr {
            Expr::Const(c) => Some((0.0, *c)),
            Expr::Var(name) if name == var => Some((1.0, 0.0)),
            Expr::Var(_) => None,
            Expr::Add(lhs, rhs) => {
                let (a1, b1) = go(lhs, var)?;
                let (a2, b2) = go(rhs, var)?;
                Some((a1 + a2, b1 + b2))
            }
            Expr::Sub(lhs, rhs) => {
                let (a1, b1) = go(lhs, var)?;
                let (a2, b2) = go(rhs, var)?;
                Some((a1 - a2, b1 - b2))
            }
            Expr::Mul(lhs, rhs) => {
                let (a1, b1) = go(lhs, var)?;
                let (a2, b2) = go(rhs, var)?;
                // at most one side may carry the variable
                if a1 != 0.0 && a2 != 0.0 {
                    None
                } else {
                    Some((a1 * b2 + a2 * b1, b1 * b2))
                }
            }
            Expr::Div(lhs, rhs) => {
                let (a1, b1) = go(lhs, var)?;
                let (a2, b2) = go(rhs, var)?;
                if a2 != 0.0 || b2 == 0.0 {
                    None
                } else {
                    Some((a1 / b2, b1 / b2))
                }
            }
            _ => None,
        }
    }
    match go(expr, var) {
        Some((a, b)) if a != 0.0 => Some((a, b)),
        _ => None,
    }
}
