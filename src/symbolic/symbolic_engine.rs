//! # Symbolic Engine Module
//!
//! Core symbolic mathematics engine for creating and manipulating symbolic
//! expressions. It is the foundation every calculus service in this crate is
//! built on: analytical differentiation, integration, limits, series and the
//! numerical methods all operate on the `Expr` tree defined here.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! The core symbolic expression type supporting:
//! - **Variables**: `Var(String)` - symbolic variables like "x", "y"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, `abs`, etc.
//!
//! ### Key Methods
//! - `Symbols(symbols: &str)` - create multiple variables from comma-separated string
//! - `diff(var: &str)` - analytical differentiation (see symbolic_engine_derivatives)
//! - `integrate(var: &str)` - analytical integration (see symbolic_integration)
//! - `lambdify1D()` - convert to executable function
//! - `simplify()` - algebraic simplification
//! - `set_variable()` - substitute a variable with a value
//!
//! Non-standard function names (tg, ctg) follow mathematical notation rather
//! than programming conventions (tan, cot).

#![allow(non_camel_case_types)]

use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an
/// abstract syntax tree. Uses Box<Expr> for recursive structures, allowing
/// arbitrarily deep expression trees.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine function
    sin(Box<Expr>),
    /// Cosine function
    cos(Box<Expr>),
    /// Tangent function - mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function - mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Arcsine function
    arcsin(Box<Expr>),
    /// Arccosine function
    arccos(Box<Expr>),
    /// Arctangent function - mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function - mathematical notation 'arcctg'
    arcctg(Box<Expr>),
    /// Absolute value: |x|
    abs(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Square root written as a power, so the differentiation and
    /// integration rules for Pow apply to it unchanged.
    pub fn sqrt(self) -> Expr {
        Expr::Pow(self.boxed(), Expr::Const(0.5).boxed())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Rebuilds the node with every direct child replaced by `f(child)`.
    /// Leaves (Var, Const) are returned unchanged. All recursive tree
    /// rewrites below are expressed through this single traversal.
    pub(crate) fn map_children(&self, f: &dyn Fn(&Expr) -> Expr) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Mul(lhs, rhs) => Expr::Mul(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Div(lhs, rhs) => Expr::Div(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Pow(base, exp) => Expr::Pow(f(base).boxed(), f(exp).boxed()),
            Expr::Exp(expr) => Expr::Exp(f(expr).boxed()),
            Expr::Ln(expr) => Expr::Ln(f(expr).boxed()),
            Expr::sin(expr) => Expr::sin(f(expr).boxed()),
            Expr::cos(expr) => Expr::cos(f(expr).boxed()),
            Expr::tg(expr) => Expr::tg(f(expr).boxed()),
            Expr::ctg(expr) => Expr::ctg(f(expr).boxed()),
            Expr::arcsin(expr) => Expr::arcsin(f(expr).boxed()),
            Expr::arccos(expr) => Expr::arccos(f(expr).boxed()),
            Expr::arctg(expr) => Expr::arctg(f(expr).boxed()),
            Expr::arcctg(expr) => Expr::arcctg(f(expr).boxed()),
            Expr::abs(expr) => Expr::abs(f(expr).boxed()),
        }
    }

    /// Direct children of the node, empty for leaves.
    pub(crate) fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => vec![],
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => vec![lhs, rhs],
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr)
            | Expr::abs(expr) => vec![expr],
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            _ => self.map_children(&|child| child.set_variable(var, value)),
        }
    }

    /// Substitutes a variable with another symbolic expression.
    pub fn substitute_variable(&self, var: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => replacement.clone(),
            _ => self.map_children(&|child| child.substitute_variable(var, replacement)),
        }
    }

    /// Checks whether the expression contains the given variable.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            _ => self
                .children()
                .iter()
                .any(|child| child.contains_variable(var_name)),
        }
    }

    /// Returns all variable names of the expression, sorted and deduplicated.
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        fn collect(expr: &Expr, out: &mut Vec<String>) {
            match expr {
                Expr::Var(name) => out.push(name.clone()),
                _ => {
                    for child in expr.children() {
                        collect(child, out);
                    }
                }
            }
        }
        let mut vars = Vec::new();
        collect(self, &mut vars);
        vars.sort();
        vars.dedup();
        vars
    }
}
