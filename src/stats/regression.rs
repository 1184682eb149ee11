//! Least-squares line used for scatter regression overlays.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Line endpoints spanning the fitted x range.
    pub fn endpoints(&self) -> [[f64; 2]; 2] {
        [
            [self.x_min, self.predict(self.x_min)],
            [self.x_max, self.predict(self.x_max)],
        ]
    }
}

/// Ordinary least squares. `None` with fewer than two points or no spread in x.
pub fn linear_fit(points: &[[f64; 2]]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for p in points {
        let dx = p[0] - mean_x;
        sxx += dx * dx;
        sxy += dx * (p[1] - mean_y);
        x_min = x_min.min(p[0]);
        x_max = x_max.max(p[0]);
    }

    if x_min == x_max {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        x_min,
        x_max,
    })
}
