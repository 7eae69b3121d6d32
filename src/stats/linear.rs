//! Ordinary least squares line fit.

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Value at `x = 0`.
    pub intercept: f64,
    /// Change in `y` per unit `x`.
    pub slope: f64,
    /// Number of points fitted.
    pub samples: usize,
}

impl LinearFit {
    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit a least squares line through `(x, y)` points.
///
/// Returns `None` for no points. When every `x` is equal the slope is zero
/// and the intercept is the mean of `y`.
#[allow(clippy::cast_precision_loss)]
pub fn fit_linear(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), &(x, y)| {
        let dx = x - mean_x;
        (dx.mul_add(y - mean_y, sxy), dx.mul_add(dx, sxx))
    });

    let slope = if sxx > f64::EPSILON { sxy / sxx } else { 0.0 };
    Some(LinearFit {
        intercept: slope.mul_add(-mean_x, mean_y),
        slope,
        samples: points.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_points_on_a_line() {
        let points: Vec<(f64, f64)> = [0.1, 0.4, 0.7, 0.9]
            .iter()
            .map(|&x| (x, 2.0f64.mul_add(x, 0.25)))
            .collect();
        let fit = fit_linear(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 0.25).abs() < 1e-12);
        assert_eq!(fit.samples, 4);
        assert!((fit.predict(0.5) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_constant_x() {
        let fit = fit_linear(&[(0.5, 1.0), (0.5, 0.0), (0.5, 1.0), (0.5, 1.0)]).unwrap();
        assert!(fit.slope.abs() < f64::EPSILON);
        assert!((fit.intercept - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        assert!(fit_linear(&[]).is_none());
    }
}
