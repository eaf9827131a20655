//! Plotting to PNG files via plotters: a single function over a range, or a
//! function together with its tangent line at a point.

use crate::calculus::adapter::{CalcError, ExprInput};
use crate::calculus::derivatives::tangent_line;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use plotters::prelude::*;

fn plot_error<E: std::fmt::Display>(e: E) -> CalcError {
    CalcError::Symbolic(format!("plotting failed: {}", e))
}

/// `lambdify1D` binds any variable to the sample value, so a stray second
/// variable must be rejected before sampling.
fn validate_single_variable(expr: &Expr, var: &str) -> Result<(), CalcError> {
    let variables = expr.all_arguments_are_variables();
    if variables.iter().any(|v| v != var) {
        return Err(CalcError::InvalidArgument(format!(
            "{} depends on variables other than {}",
            expr, var
        )));
    }
    Ok(())
}

/// Samples `expr` on a uniform grid, keeping only finite points.
fn sample_curve(expr: &Expr, lower: f64, upper: f64, n_points: usize) -> Vec<(f64, f64)> {
    let f = expr.lambdify1D();
    linspace(lower, upper, n_points)
        .iter()
        .map(|&x| (x, f(x)))
        .filter(|(_, y)| y.is_finite())
        .collect()
}

fn y_bounds(curves: &[&[(f64, f64)]]) -> (f64, f64) {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for curve in curves {
        for &(_, y) in *curve {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if y_min == y_max {
        // flat curve, open the window up
        (y_min - 1.0, y_max + 1.0)
    } else {
        let pad = 0.05 * (y_max - y_min);
        (y_min - pad, y_max + pad)
    }
}

fn draw_curves(
    filename: &str,
    caption: &str,
    var: &str,
    lower: f64,
    upper: f64,
    curves: &[(&str, &[(f64, f64)])],
) -> Result<(), CalcError> {
    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_error)?;

    let (y_min, y_max) = y_bounds(&curves.iter().map(|(_, c)| *c).collect::<Vec<_>>());
    let mut chart = ChartBuilder::on(&root_area)
        .caption(caption, ("sans-serif", 50))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(lower..upper, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(var)
        .y_desc(caption)
        .draw()
        .map_err(plot_error)?;

    for (i, (label, curve)) in curves.iter().enumerate() {
        chart
            .draw_series(LineSeries::new(curve.to_vec(), &Palette99::pick(i)))
            .map_err(plot_error)?
            .label(format!(" {}", label))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(i))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;
    root_area.present().map_err(plot_error)?;
    Ok(())
}

/// Plots `func` over [lower, upper] into a PNG file.
pub fn plot_function(
    func: impl Into<ExprInput>,
    var: &str,
    lower: f64,
    upper: f64,
    n_points: usize,
    filename: &str,
) -> Result<(), CalcError> {
    if n_points < 2 {
        return Err(CalcError::InvalidArgument(
            "a plot needs at least two sample points".to_string(),
        ));
    }
    let func = func.into().resolve()?;
    validate_single_variable(&func, var)?;
    let curve = sample_curve(&func, lower, upper, n_points);
    if curve.is_empty() {
        return Err(CalcError::InvalidArgument(format!(
            "{} has no finite values on [{}, {}]",
            func, lower, upper
        )));
    }
    let caption = format!("{}", func);
    draw_curves(filename, &caption, var, lower, upper, &[(&caption, &curve)])
}

/// Plots `func` together with its tangent line at `point`.
pub fn plot_with_tangent(
    func: impl Into<ExprInput>,
    point: f64,
    var: &str,
    lower: f64,
    upper: f64,
    n_points: usize,
    filename: &str,
) -> Result<(), CalcError> {
    if n_points < 2 {
        return Err(CalcError::InvalidArgument(
            "a plot needs at least two sample points".to_string(),
        ));
    }
    let func = func.into().resolve()?;
    validate_single_variable(&func, var)?;
    let tangent = tangent_line(&func, point, var)?;
    let curve = sample_curve(&func, lower, upper, n_points);
    if curve.is_empty() {
        return Err(CalcError::InvalidArgument(format!(
            "{} has no finite values on [{}, {}]",
            func, lower, upper
        )));
    }
    let tangent_curve = sample_curve(&tangent.line, lower, upper, n_points);
    let caption = format!("{}", func);
    let tangent_label = format!("tangent at {} = {}", var, point);
    draw_curves(
        filename,
        &caption,
        var,
        lower,
        upper,
        &[(&caption, &curve), (&tangent_label, &tangent_curve)],
    )
}
