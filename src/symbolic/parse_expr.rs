use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::{E, PI};

//                  search recursion diagram
//                "y^2+exp(x)+log(x)/y-x^2.3"
//   split at the rightmost '+'/'-' outside brackets, recurse on both sides;
//   failing that, the rightmost '*'/'/' outside brackets; failing that, the
//   leftmost '^' (right-associative); failing that the input is a bracketed
//   subexpression, a function application, a literal or a variable.

/// Unary function names accepted by the parser, with their aliases.
/// Longest names first so "arctan(" is not matched as "tan(".
const FUNCTIONS: &[(&str, fn(Box<Expr>) -> Expr)] = &[
    ("arcsin", Expr::arcsin),
    ("arccos", Expr::arccos),
    ("arctan", Expr::arctg),
    ("arcctg", Expr::arcctg),
    ("arctg", Expr::arctg),
    ("asin", Expr::arcsin),
    ("acos", Expr::arccos),
    ("atan", Expr::arctg),
    ("acot", Expr::arcctg),
    ("sqrt", sqrt_expr),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tg),
    ("cot", Expr::ctg),
    ("ctg", Expr::ctg),
    ("abs", Expr::abs),
    ("exp", Expr::Exp),
    ("log", Expr::Ln),
    ("tg", Expr::tg),
    ("ln", Expr::Ln),
];

fn sqrt_expr(inner: Box<Expr>) -> Expr {
    Expr::Pow(inner, Box::new(Expr::Const(0.5)))
}

/// Finds the rightmost occurrence of one of `operators` at bracket depth zero.
///
/// A '+'/'-' is skipped when it is unary (start of input or directly after
/// another operator or an opening bracket) or when it belongs to a float
/// exponent like "1e-5".
fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let bytes: Vec<char> = input.chars().collect();
    let mut bracket_depth = 0;
    let mut found = None;

    for (i, &c) in bytes.iter().enumerate() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && operators.contains(&c) => {
                if c == '+' || c == '-' {
                    let prev = bytes[..i].iter().rev().find(|ch| !ch.is_whitespace());
                    match prev {
                        None => continue, // unary sign at the start
                        Some(&p) if "+-*/^(".contains(p) => continue,
                        Some(&p) if (p == 'e' || p == 'E') && is_exponent_context(&bytes, i) => {
                            continue; // "2e-3"
                        }
                        _ => {}
                    }
                }
                found = Some((i, c));
            }
            _ => {}
        }
    }
    found
}

/// True when the sign at position `i` sits inside a float exponent: the
/// preceding 'e'/'E' is itself preceded by a digit or a dot.
fn is_exponent_context(chars: &[char], i: usize) -> bool {
    if i < 2 {
        return false;
    }
    let before_e = chars[i - 2];
    before_e.is_ascii_digit() || before_e == '.'
}

/// Position of the ')' matching the '(' at `open`.
fn find_pair_to_this_bracket(input: &str, open: usize) -> Option<usize> {
    let mut stack = 0;
    for (i, c) in input.chars().enumerate().skip(open) {
        if c == '(' {
            stack += 1;
        } else if c == ')' {
            stack -= 1;
            if stack == 0 {
                return Some(i);
            }
        }
    }
    None
}

pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }

    // addition/subtraction, then multiplication/division: rightmost split
    // keeps the left associativity of the original notation
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = parse_expression_func(&input[..pos])?;
        let right = parse_expression_func(&input[pos + 1..])?;
        return Ok(match op {
            '+' => left + right,
            _ => left - right,
        });
    }

    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = parse_expression_func(&input[..pos])?;
        let right = parse_expression_func(&input[pos + 1..])?;
        return Ok(match op {
            '*' => left * right,
            _ => left / right,
        });
    }

    // unary minus survives operator splitting only as a prefix
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(-parse_expression_func(rest)?);
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression_func(rest);
    }

    // power is right-associative: split at the leftmost '^'
    if let Some(pos) = input
        .char_indices()
        .scan(0i32, |depth, (i, c)| {
            match c {
                '(' => *depth += 1,
                ')' => *depth -= 1,
                _ => {}
            }
            Some((i, c, *depth))
        })
        .find(|&(_, c, depth)| c == '^' && depth == 0)
        .map(|(i, _, _)| i)
    {
        let base = parse_expression_func(&input[..pos])?;
        let exponent = parse_expression_func(&input[pos + 1..])?;
        return Ok(base.pow(exponent));
    }

    // whole expression in brackets
    if input.starts_with('(') {
        match find_pair_to_this_bracket(input, 0) {
            Some(end) if end == input.len() - 1 => {
                return parse_expression_func(&input[1..end]);
            }
            Some(_) => return Err(format!("malformed bracket expression: {}", input)),
            None => return Err(format!("unmatched bracket in: {}", input)),
        }
    }

    // function application
    for (name, constructor) in FUNCTIONS {
        if let Some(rest) = input.strip_prefix(name) {
            if rest.starts_with('(') && input.ends_with(')') {
                let open = name.len();
                match find_pair_to_this_bracket(input, open) {
                    Some(end) if end == input.len() - 1 => {
                        let inner = parse_expression_func(&input[open + 1..end])?;
                        return Ok(constructor(inner.boxed()));
                    }
                    _ => return Err(format!("unmatched bracket in: {}", input)),
                }
            }
        }
    }

    // constants and variables
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }
    match input {
        "pi" | "Pi" | "PI" => return Ok(Expr::Const(PI)),
        "e" | "E" => return Ok(Expr::Const(E)),
        _ => {}
    }
    if !input.is_empty()
        && input.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && input.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(format!("invalid expression fragment: {}", input))
}

impl Expr {
    /// Parses a textual expression into a symbolic one.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("x^2 - sin(x)").unwrap();
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        parse_expression_func(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_func("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression_func("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_logarithm_alias() {
        let expr = parse_expression_func("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_tan_alias() {
        let expr = parse_expression_func("tan(x)").unwrap();
        assert_eq!(expr, Expr::tg(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_sqrt_desugars_to_pow() {
        let expr = parse_expression_func("sqrt(x)").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(0.5))
            )
        );
    }

    #[test]
    fn test_parse_abs() {
        let expr = parse_expression_func("abs(x - 1)").unwrap();
        assert_eq!(
            expr,
            Expr::abs(Box::new(Expr::Sub(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(1.0))
            )))
        );
    }

    #[test]
    fn test_parse_pi() {
        let expr = parse_expression_func("pi").unwrap();
        assert_eq!(expr, Expr::Const(PI));
    }

    #[test]
    fn test_parse_with_brackets() {
        let expr = parse_expression_func("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        let expr = parse_expression_func("-x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_polynomial_associativity() {
        let result = parse_expression_func("x^2 - x - 1").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let to_check = Expr::Pow(x.clone(), Box::new(Expr::Const(2.0))) - *x - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_parse_float_exponent_literal() {
        let expr = parse_expression_func("2e-3 * x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(2e-3)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_invalid_expression() {
        assert!(parse_expression_func("(x +").is_err());
    }

    #[test]
    fn test_unmatched_brackets() {
        assert!(parse_expression_func("(x + y").is_err());
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = parse_expression_func("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }

    #[test]
    fn test_sin_division_roundtrip_evaluates() {
        let expr = parse_expression_func("sin(x) / x").unwrap();
        let f = expr.lambdify1D();
        let v = f(0.5);
        assert!((v - 0.5f64.sin() / 0.5).abs() < 1e-12);
    }
}
