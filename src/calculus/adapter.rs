//! Entry-point plumbing shared by every calculus service: the
//! parse-or-pass-through input adapter, the error taxonomy and the default
//! placeholder variables.
//!
//! Each public service function accepts `impl Into<ExprInput>` and resolves
//! it exactly once; past that point everything is a typed `Expr` and no
//! string-vs-symbolic dispatch happens anywhere else.

use crate::symbolic::symbolic_engine::Expr;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fmt;

/// Default independent variable used when a caller does not name one.
/// Fixed at compile time, never mutated.
pub const DEFAULT_VAR: &str = "x";
/// Default dependent variable for implicit differentiation.
pub const DEFAULT_DEPENDENT: &str = "y";

/// Error taxonomy of the calculus services.
///
/// Degenerate iteration outcomes (near-zero derivative, exhausted iteration
/// budget) are deliberately NOT here - those are ordinary outcome variants of
/// the numerical methods, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Malformed textual expression.
    Parse(String),
    /// Rejected argument (odd n for Simpson's rule, zero partitions, ...).
    InvalidArgument(String),
    /// A symbolic-engine operation failed (evaluation at an undefined point,
    /// unbound variable, ...).
    Symbolic(String),
    /// The engine could not resolve the expression to a closed form; the
    /// result is left unevaluated.
    Unevaluated(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Parse(msg) => write!(f, "parse error: {}", msg),
            CalcError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CalcError::Symbolic(msg) => write!(f, "symbolic error: {}", msg),
            CalcError::Unevaluated(msg) => write!(f, "left unevaluated: {}", msg),
        }
    }
}

impl std::error::Error for CalcError {}

/// A caller-supplied expression: either raw text still to be parsed, or an
/// already-built symbolic value passed through untouched.
#[derive(Debug, Clone)]
pub enum ExprInput {
    Text(String),
    Symbolic(Expr),
}

impl ExprInput {
    /// The single parse-or-pass-through step.
    pub fn resolve(self) -> Result<Expr, CalcError> {
        match self {
            ExprInput::Text(text) => Expr::parse_expression(&text).map_err(CalcError::Parse),
            ExprInput::Symbolic(expr) => Ok(expr),
        }
    }
}

impl From<&str> for ExprInput {
    fn from(text: &str) -> Self {
        ExprInput::Text(text.to_string())
    }
}

impl From<String> for ExprInput {
    fn from(text: String) -> Self {
        ExprInput::Text(text)
    }
}

impl From<Expr> for ExprInput {
    fn from(expr: Expr) -> Self {
        ExprInput::Symbolic(expr)
    }
}

impl From<&Expr> for ExprInput {
    fn from(expr: &Expr) -> Self {
        ExprInput::Symbolic(expr.clone())
    }
}

/// Terminal logger setup; call once at program start. Repeated calls are
/// ignored (the first logger wins).
pub fn init_logging(level: LevelFilter) {
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_text() {
        let input: ExprInput = "x^2 + 1".into();
        let expr = input.resolve().unwrap();
        assert_eq!(expr.eval_at(DEFAULT_VAR, 2.0).unwrap(), 5.0);
    }

    #[test]
    fn test_resolve_symbolic_passthrough() {
        let expr = Expr::Var("t".to_string());
        let input: ExprInput = expr.clone().into();
        assert_eq!(input.resolve().unwrap(), expr);
    }

    #[test]
    fn test_resolve_parse_failure() {
        let input: ExprInput = "(x +".into();
        match input.resolve() {
            Err(CalcError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
