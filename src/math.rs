use num::Float;

use crate::error::{Error, Result};

/// Similar to `numpy.interp`: evaluates the piecewise linear function through
/// `coords` at every `x`, holding the first/last `y` outside the covered range.
/// `coords` must be sorted by x and non-empty.
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_one(x, coords)).collect()
}

pub(crate) fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    if x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Only reachable for NaN inputs
    F::zero()
}

/// Rounds to cents.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.).round() / 100.
}

/// Prices and salaries must be finite and non-negative.
pub(crate) fn check_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0. {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

#[test]
fn test_round2() {
    assert_eq!(round2(23.004), 23.);
    assert_eq!(round2(1933.3333), 1933.33);
    assert_eq!(round2(0.125), 0.13);
    assert!(check_amount(-1.).is_err());
    assert!(check_amount(f64::INFINITY).is_err());
    assert_eq!(check_amount(0.).unwrap(), 0.);
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_degenerate() {
    assert_eq!(interp_one(1.0f64, &[]), 0.);
    assert_eq!(interp_one(f64::NAN, &[(0., 0.), (1., 1.)]), 0.);
    // Vertical step: the first segment reaching x wins
    assert_eq!(interp_one(1.0f64, &[(0., 0.), (1., 0.), (1., 1.), (2., 1.)]), 0.);
    assert_eq!(interp_one(1.5f64, &[(0., 0.), (1., 0.), (1., 1.), (2., 1.)]), 1.);
}
