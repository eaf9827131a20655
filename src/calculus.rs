/// typed input adapter (string or symbolic), error taxonomy, default symbols
pub mod adapter;
/// derivatives, tangent/normal lines, implicit differentiation
pub mod derivatives;
/// indefinite/definite integrals, areas, volumes of revolution, arc length
pub mod integrals;
/// limits, continuity checks and L'Hopital iteration
pub mod limits;
/// Taylor and Maclaurin expansions
pub mod series;
