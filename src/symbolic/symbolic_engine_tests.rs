#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_symbols_creation() {
        let vars = Expr::Symbols("x, y, z");
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[1], Expr::Var("y".to_string()));
    }

    #[test]
    fn test_set_variable() {
        let expr = x() + Expr::Var("y".to_string());
        let result = expr.set_variable("x", 2.0).simplify();
        assert_eq!(result, Expr::Const(2.0) + Expr::Var("y".to_string()));
    }

    #[test]
    fn test_substitute_variable() {
        // x^2 with x -> (u + 1)
        let u_plus_1 = Expr::Var("u".to_string()) + Expr::Const(1.0);
        let expr = x().pow(Expr::Const(2.0)).substitute_variable("x", &u_plus_1);
        assert_eq!(expr.eval_at("u", 2.0).unwrap(), 9.0);
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::sin((x() * Expr::Var("y".to_string())).boxed());
        assert!(expr.contains_variable("x"));
        assert!(expr.contains_variable("y"));
        assert!(!expr.contains_variable("z"));
    }

    #[test]
    fn test_all_arguments_are_variables() {
        let expr = x() * Expr::Var("y".to_string()) + x();
        assert_eq!(expr.all_arguments_are_variables(), vec!["x", "y"]);
    }

    #[test]
    fn test_display_roundtrip_through_parser() {
        let expr = x().pow(Expr::Const(2.0)) + Expr::sin(x().boxed());
        let printed = format!("{}", expr);
        let reparsed = Expr::parse_expression(&printed).unwrap();
        assert_relative_eq!(
            reparsed.eval_at("x", 0.7).unwrap(),
            expr.eval_at("x", 0.7).unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_diff_product_rule() {
        // d/dx (x * sin(x)) = sin(x) + x*cos(x)
        let f = x() * Expr::sin(x().boxed());
        let df = f.diff("x");
        let expected = |v: f64| v.sin() + v * v.cos();
        for v in [0.3, 1.1, 2.9] {
            assert_relative_eq!(df.eval_at("x", v).unwrap(), expected(v), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_diff_quotient_rule() {
        // d/dx (sin(x)/x) = (x*cos(x) - sin(x))/x^2
        let f = Expr::sin(x().boxed()) / x();
        let df = f.diff("x");
        let expected = |v: f64| (v * v.cos() - v.sin()) / (v * v);
        assert_relative_eq!(df.eval_at("x", 1.3).unwrap(), expected(1.3), max_relative = 1e-12);
    }

    #[test]
    fn test_diff_chain_rule_exp() {
        // d/dx exp(x^2) = 2x*exp(x^2)
        let f = x().pow(Expr::Const(2.0)).exp();
        let df = f.diff("x");
        let v: f64 = 0.8;
        assert_relative_eq!(
            df.eval_at("x", v).unwrap(),
            2.0 * v * (v * v).exp(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_diff_variable_exponent() {
        // d/dx x^x = x^x (ln x + 1)
        let f = x().clone().pow(x());
        let df = f.diff("x");
        let v: f64 = 1.7;
        assert_relative_eq!(
            df.eval_at("x", v).unwrap(),
            v.powf(v) * (v.ln() + 1.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_diff_abs() {
        let f = Expr::abs(x().boxed());
        let df = f.diff("x");
        assert_eq!(df.eval_at("x", 2.0).unwrap(), 1.0);
        assert_eq!(df.eval_at("x", -2.0).unwrap(), -1.0);
    }

    #[test]
    fn test_high_order_derivative_of_polynomial_is_zero() {
        // (d/dx)^(d+1) of a degree-d polynomial is the zero expression
        let p = x().pow(Expr::Const(3.0)) - Expr::Const(2.0) * x().pow(Expr::Const(2.0))
            + Expr::Const(5.0) * x()
            - Expr::Const(7.0);
        let d4 = p.n_th_derivative1D("x", 4);
        assert_eq!(d4, Expr::Const(0.0));
    }

    #[test]
    fn test_lambdify1d() {
        let f = x().pow(Expr::Const(2.0)) - Expr::Const(2.0);
        let func = f.lambdify1D();
        assert_eq!(func(3.0), 7.0);
    }

    #[test]
    fn test_lambdify1d_constant_expression() {
        let f = Expr::Const(4.0) * Expr::Const(0.5);
        let func = f.lambdify1D();
        assert_eq!(func(123.0), 2.0);
    }

    #[test]
    fn test_eval_at_unbound_variable_is_error() {
        let expr = x() + Expr::Var("y".to_string());
        assert!(expr.eval_at("x", 1.0).is_err());
    }

    #[test]
    fn test_numerical_vs_analytical_derivative() {
        let f = Expr::sin(x().boxed()) * x().exp();
        let df = f.diff("x");
        let func = f.lambdify1D();
        let h = 1e-6;
        for v in [0.2, 1.0, 2.4] {
            let numeric = (func(v + h) - func(v - h)) / (2.0 * h);
            assert_relative_eq!(df.eval_at("x", v).unwrap(), numeric, max_relative = 1e-5);
        }
    }
}
