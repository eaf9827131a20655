/// Newton-Raphson root finding with per-iteration history
pub mod newton;
/// Riemann sums and Simpson's rule
pub mod quadrature;
