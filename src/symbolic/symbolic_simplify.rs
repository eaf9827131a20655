//! Algebraic simplification. One bottom-up rewrite pass folds numeric
//! constants and applies the identity rules (`x + 0`, `x * 1`, `0 * x`,
//! `x ^ 1`, `x - x`, ...); `simplify()` iterates the pass to a fixpoint.
//! Simplification only ever shrinks the tree, it never changes the value.

use crate::symbolic::symbolic_engine::Expr;

const MAX_SIMPLIFY_PASSES: usize = 50;

impl Expr {
    /// Simplifies the expression by repeated rule application until the tree
    /// stops changing.
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        for _ in 0..MAX_SIMPLIFY_PASSES {
            let next = current.simplify_once();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn simplify_once(&self) -> Expr {
        let expr = self.map_children(&|child| child.simplify_once());
        match &expr {
            Expr::Add(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                (e, z) if z.is_zero() => e.clone(),
                (z, e) if z.is_zero() => e.clone(),
                _ => expr.clone(),
            },
            Expr::Sub(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                (e, z) if z.is_zero() => e.clone(),
                (a, b) if a == b => Expr::Const(0.0),
                (z, e) if z.is_zero() => Expr::Const(-1.0) * e.clone(),
                _ => expr.clone(),
            },
            Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (z, _) | (_, z) if z.is_zero() => Expr::Const(0.0),
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                (Expr::Const(c), e) if *c == 1.0 => e.clone(),
                (e, Expr::Const(c)) if *c == 1.0 => e.clone(),
                // a * (b * e) = (a*b) * e, folds stacked negations too
                (Expr::Const(a), Expr::Mul(inner_lhs, inner_rhs)) => {
                    if let Expr::Const(b) = inner_lhs.as_ref() {
                        Expr::Const(a * b) * (**inner_rhs).clone()
                    } else {
                        expr.clone()
                    }
                }
                _ => expr.clone(),
            },
            Expr::Div(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (z, e) if z.is_zero() && !e.is_zero() => Expr::Const(0.0),
                (e, Expr::Const(c)) if *c == 1.0 => e.clone(),
                (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                (a, b) if a == b && !a.is_zero() => Expr::Const(1.0),
                _ => expr.clone(),
            },
            Expr::Pow(base, exp) => match (base.as_ref(), exp.as_ref()) {
                (_, z) if z.is_zero() => Expr::Const(1.0),
                (b, Expr::Const(c)) if *c == 1.0 => b.clone(),
                (z, Expr::Const(c)) if z.is_zero() && *c > 0.0 => Expr::Const(0.0),
                (Expr::Const(a), Expr::Const(b)) => fold_finite(a.powf(*b), &expr),
                _ => expr.clone(),
            },
            Expr::Exp(inner) => match inner.as_ref() {
                Expr::Const(c) => fold_finite(c.exp(), &expr),
                _ => expr.clone(),
            },
            Expr::Ln(inner) => match inner.as_ref() {
                Expr::Const(c) => fold_finite(c.ln(), &expr),
                _ => expr.clone(),
            },
            Expr::sin(inner) => match inner.as_ref() {
                Expr::Const(c) => fold_finite(c.sin(), &expr),
                _ => expr.clone(),
            },
            Expr::cos(inner) => match inner.as_ref() {
                Expr::Const(c) => fold_finite(c.cos(), &expr),
                _ => expr.clone(),
            },
            Expr::abs(inner) => match inner.as_ref() {
                Expr::Const(c) => Expr::Const(c.abs()),
                // |u^(2k)| = u^(2k)
                Expr::Pow(_, e)
                    if matches!(e.as_ref(), Expr::Const(c) if c.rem_euclid(2.0) == 0.0) =>
                {
                    (**inner).clone()
                }
                _ => expr.clone(),
            },
            _ => expr,
        }
    }
}

/// Folds a numerically evaluated constant back into the tree only when it is
/// finite; NaN or infinite folds would erase the undefined-value information.
fn fold_finite(value: f64, original: &Expr) -> Expr {
    if value.is_finite() {
        Expr::Const(value)
    } else {
        original.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_add_zero() {
        let expr = x() + Expr::Const(0.0);
        assert_eq!(expr.simplify(), x());
    }

    #[test]
    fn test_mul_zero_collapses() {
        let expr = (x() * Expr::Const(0.0)) + Expr::Const(0.0);
        assert_eq!(expr.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_mul_one() {
        let expr = Expr::Const(1.0) * x();
        assert_eq!(expr.simplify(), x());
    }

    #[test]
    fn test_double_negation_folds() {
        let expr = -(-x());
        assert_eq!(expr.simplify(), x());
    }

    #[test]
    fn test_sub_self_is_zero() {
        let expr = x() - x();
        assert_eq!(expr.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_pow_one() {
        let expr = x().pow(Expr::Const(1.0));
        assert_eq!(expr.simplify(), x());
    }

    #[test]
    fn test_constant_folding() {
        let expr = Expr::Const(2.0) * Expr::Const(3.0) + Expr::Const(4.0);
        assert_eq!(expr.simplify(), Expr::Const(10.0));
    }

    #[test]
    fn test_ln_of_negative_not_folded() {
        let expr = Expr::Ln(Expr::Const(-1.0).boxed());
        // NaN must not be baked into the tree
        assert_eq!(expr.simplify(), expr);
    }

    #[test]
    fn test_abs_of_square() {
        let expr = Expr::abs(x().pow(Expr::Const(2.0)).boxed());
        assert_eq!(expr.simplify(), x().pow(Expr::Const(2.0)));
    }

    #[test]
    fn test_derivative_of_quadratic_simplifies() {
        let f = x().pow(Expr::Const(2.0));
        let df = f.diff("x").simplify();
        // 2 * x^1 * 1 -> 2 * x
        assert_eq!(df, Expr::Const(2.0) * x());
    }
}
