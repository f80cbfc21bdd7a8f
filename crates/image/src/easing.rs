//! Cubic-Bézier easing curves.
//!
//! Same parameterisation as CSS `cubic-bezier(x1, y1, x2, y2)`: the curve runs
//! from `(0, 0)` to `(1, 1)` with two free control points. Easing an input
//! fraction `x` means finding the curve parameter `t` whose x-coordinate is
//! `x` and returning the y-coordinate at that `t`.

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 48;

/// A CSS-style cubic-Bézier timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Create a curve from its two control points.
    ///
    /// `x1` and `x2` are clamped into `[0, 1]` so the curve stays a function of x.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// The identity curve.
    pub fn linear() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Control points as `[x1, y1, x2, y2]`.
    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Map `x` in `[0, 1]` to its eased value.
    ///
    /// Inputs outside the unit interval are clamped to it.
    pub fn ease(&self, x: f64) -> f64 {
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x.clamp(0.0, 1.0);
        }
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        bezier(t, self.y1, self.y2)
    }

    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let s = slope(t, self.x1, self.x2);
            if s < NEWTON_MIN_SLOPE {
                break;
            }
            let error = bezier(t, self.x1, self.x2) - x;
            if error.abs() < SUBDIVISION_PRECISION {
                return t;
            }
            t -= error / s;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            let error = bezier(t, self.x1, self.x2) - x;
            if error.abs() < SUBDIVISION_PRECISION {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::linear()
    }
}

// Polynomial coefficients for one axis with endpoints fixed at 0 and 1.
fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (a, b, c)
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    ((a * t + b) * t + c) * t
}

fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let (a, b, c) = coefficients(p1, p2);
    3.0 * a * t * t + 2.0 * b * t + c
}
