//! Membership functions: map a crisp point of a universe to a degree in [0, 1].

use crate::error::{Error, Result};
use crate::math::{interp, interp_one};

/// Triangular membership with breakpoints `a <= b <= c`.
///
/// Zero at or outside `[a, c]`, one at `b`, linear in between. `a == b` or
/// `b == c` give left/right shoulders, which still evaluate to one at `b`.
pub fn trimf(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x == b {
        return 1.;
    }
    // Also rejects NaN
    if !(x > a && x < c) {
        return 0.;
    }

    if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MembershipFn {
    Triangular { a: f64, b: f64, c: f64 },
    /// Linear interpolation through `(x, degree)` points, flat beyond the ends
    Piecewise(Vec<(f64, f64)>),
}

impl MembershipFn {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();

        if !finite || a > b || b > c {
            return Err(Error::InvalidBreakpoints { a, b, c });
        }

        Ok(Self::Triangular { a, b, c })
    }

    pub fn piecewise(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let points: Vec<_> = points.into_iter().collect();

        if points.is_empty() {
            return Err(Error::InvalidMembership("no points given".into()));
        }

        for &(x, y) in &points {
            if !x.is_finite() || !(0. ..=1.).contains(&y) {
                return Err(Error::InvalidMembership(format!("bad point ({x}, {y})")));
            }
        }

        if points.windows(2).any(|w| w[0].0 > w[1].0) {
            return Err(Error::InvalidMembership("points are not sorted by x".into()));
        }

        Ok(Self::Piecewise(points))
    }

    pub fn degree(&self, x: f64) -> f64 {
        match self {
            Self::Triangular { a, b, c } => trimf(x, *a, *b, *c),
            Self::Piecewise(_) if x.is_nan() => 0.,
            Self::Piecewise(points) => interp_one(x, points),
        }
    }

    /// Evaluates the function at every point of `universe`.
    pub fn sample(&self, universe: &[f64]) -> Vec<f64> {
        match self {
            Self::Triangular { .. } => universe.iter().map(|x| self.degree(*x)).collect(),
            Self::Piecewise(points) => interp(universe.iter().copied(), points),
        }
    }
}
