use nalgebra::DVector;

/// n equally spaced samples from start to end inclusive (n >= 2).
pub fn linspace(start: f64, end: f64, n: usize) -> DVector<f64> {
    assert!(n >= 2, "linspace needs at least two points");
    let step = (end - start) / (n - 1) as f64;
    DVector::from_fn(n, |i, _| start + step * i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(0.0, 1.0, 11);
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[10], 1.0);
        assert!((grid[5] - 0.5).abs() < 1e-15);
    }
}
