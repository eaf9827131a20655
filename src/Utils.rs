/// LaTeX rendering of expressions and calculus statements
pub mod display;
/// function plots rendered to PNG files
pub mod plots;
