//! Newton-Raphson root finding on a symbolic function of one variable.
//!
//! The solver records every iteration and reports the outcome as a tagged
//! value: converged, derivative too small to continue, or iteration budget
//! exhausted. Degenerate outcomes are data, not errors - the caller decides
//! what to do with them, the solver only logs a warning.

use crate::calculus::adapter::{CalcError, ExprInput, DEFAULT_VAR};
use crate::symbolic::symbolic_engine::Expr;
use log::{info, warn};
use tabled::{Table, Tabled};

/// Derivative magnitudes below this stall the iteration.
const DERIVATIVE_GUARD: f64 = 1e-15;

/// One Newton step: the iterate and the function/derivative values there.
#[derive(Debug, Clone, Copy, PartialEq, Tabled)]
pub struct IterationRecord {
    pub iteration: usize,
    pub x: f64,
    pub f_x: f64,
    pub df_x: f64,
}

/// Outcome of a Newton-Raphson run. Every variant carries the full
/// iteration history.
#[derive(Debug, Clone, PartialEq)]
pub enum NewtonOutcome {
    /// |f(root)| dropped below the tolerance.
    Converged {
        root: f64,
        history: Vec<IterationRecord>,
    },
    /// |f'(x)| fell below the guard; the step x - f/f' is numerically
    /// meaningless past this point.
    DerivativeDegenerate { history: Vec<IterationRecord> },
    /// The iteration budget ran out before convergence.
    Exhausted {
        last: f64,
        history: Vec<IterationRecord>,
    },
}

impl NewtonOutcome {
    pub fn history(&self) -> &[IterationRecord] {
        match self {
            NewtonOutcome::Converged { history, .. }
            | NewtonOutcome::DerivativeDegenerate { history }
            | NewtonOutcome::Exhausted { history, .. } => history,
        }
    }

    pub fn root(&self) -> Option<f64> {
        match self {
            NewtonOutcome::Converged { root, .. } => Some(*root),
            _ => None,
        }
    }

    /// Iteration history rendered as a text table.
    pub fn history_table(&self) -> String {
        Table::new(self.history()).to_string()
    }
}

/// Newton-Raphson solver. Configure with the setters, then call `solve`.
pub struct NewtonSolver {
    equation: Expr,
    variable: String,
    initial_guess: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl NewtonSolver {
    pub fn new(equation: impl Into<ExprInput>) -> Result<Self, CalcError> {
        let equation = equation.into().resolve()?.simplify();
        Ok(Self {
            equation,
            variable: DEFAULT_VAR.to_string(),
            initial_guess: 0.0,
            tolerance: 1e-10,
            max_iterations: 100,
        })
    }

    pub fn set_variable(mut self, variable: &str) -> Self {
        self.variable = variable.to_string();
        self
    }

    pub fn set_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn set_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn set_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn solve(&self) -> Result<NewtonOutcome, CalcError> {
        let variables = self.equation.all_arguments_are_variables();
        if variables.iter().any(|v| v != &self.variable) {
            return Err(CalcError::InvalidArgument(format!(
                "equation {} depends on variables other than {}",
                self.equation, self.variable
            )));
        }
        if !(self.tolerance > 0.0) {
            return Err(CalcError::InvalidArgument(
                "tolerance must be positive".to_string(),
            ));
        }

        let derivative = self.equation.diff(&self.variable).simplify();
        let f = self.equation.lambdify1D();
        let df = derivative.lambdify1D();

        let mut x = self.initial_guess;
        let mut history = Vec::new();
        for iteration in 0..self.max_iterations {
            let f_x = f(x);
            let df_x = df(x);
            history.push(IterationRecord {
                iteration,
                x,
                f_x,
                df_x,
            });
            if f_x.abs() < self.tolerance {
                info!(
                    "Newton-Raphson converged to {} in {} iterations",
                    x,
                    iteration + 1
                );
                return Ok(NewtonOutcome::Converged { root: x, history });
            }
            if df_x.abs() < DERIVATIVE_GUARD {
                warn!(
                    "Newton-Raphson stalled at x = {}: |f'(x)| = {:e} below guard",
                    x,
                    df_x.abs()
                );
                return Ok(NewtonOutcome::DerivativeDegenerate { history });
            }
            x = x - f_x / df_x;
        }
        warn!(
            "Newton-Raphson exhausted {} iterations, last iterate {}",
            self.max_iterations, x
        );
        Ok(NewtonOutcome::Exhausted { last: x, history })
    }
}

/// One-call Newton-Raphson for f(var) = 0 starting at `initial_guess`.
pub fn newtons_method(
    func: impl Into<ExprInput>,
    var: &str,
    initial_guess: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<NewtonOutcome, CalcError> {
    NewtonSolver::new(func)?
        .set_variable(var)
        .set_initial_guess(initial_guess)
        .set_tolerance(tolerance)
        .set_max_iterations(max_iterations)
        .solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newton_sqrt_two() {
        let outcome = newtons_method("x^2 - 2", "x", 1.0, 1e-10, 10).unwrap();
        match outcome {
            NewtonOutcome::Converged { root, ref history } => {
                assert!((root - 1.41421356237).abs() < 1e-10);
                assert!(history.len() <= 10);
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_newton_transcendental() {
        // cos(x) = x near 0.739
        let outcome = newtons_method("cos(x) - x", "x", 1.0, 1e-12, 50).unwrap();
        let root = outcome.root().unwrap();
        assert!((root.cos() - root).abs() < 1e-12);
    }

    #[test]
    fn test_newton_flat_derivative_degenerate() {
        // f = 1 everywhere: f' = 0, first step already stalls
        let outcome = newtons_method("1", "x", 0.0, 1e-10, 10).unwrap();
        match outcome {
            NewtonOutcome::DerivativeDegenerate { history } => {
                assert_eq!(history.len(), 1);
            }
            other => panic!("expected degenerate outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_newton_exhausted_budget() {
        // x^2 + 1 has no real root
        let outcome = newtons_method("x^2 + 1", "x", 0.7, 1e-10, 5).unwrap();
        assert!(matches!(outcome, NewtonOutcome::Exhausted { .. }));
        assert_eq!(outcome.history().len(), 5);
    }

    #[test]
    fn test_newton_rejects_foreign_variable() {
        let result = newtons_method("x + y", "x", 0.0, 1e-10, 10);
        assert!(matches!(result, Err(CalcError::InvalidArgument(_))));
    }

    #[test]
    fn test_history_table_renders() {
        let outcome = newtons_method("x^2 - 2", "x", 1.5, 1e-10, 10).unwrap();
        let table = outcome.history_table();
        assert!(table.contains("iteration"));
        assert!(table.contains("f_x"));
    }
}
