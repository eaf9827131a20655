/// core symbolic expression type and its basic manipulation methods
pub mod symbolic_engine;
/// a module turns a String expression into a symbolic expression
pub mod parse_expr;
/// analytical differentiation, lambdification and direct evaluation
pub mod symbolic_engine_derivatives;
/// algebraic simplification of symbolic expressions
pub mod symbolic_simplify;
/// analytical (symbolic) integration
pub mod symbolic_integration;
/// small numeric helpers shared by the symbolic and numerical layers
pub mod utils;

mod symbolic_engine_tests;
