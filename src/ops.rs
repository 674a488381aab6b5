use num::Float;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => ProductionLink::Min.apply(u, v),
            Self::Prod => ProductionLink::Prod.apply(u, v),
            Self::BoundedProd => ProductionLink::BoundedProd.apply(u, v),
            Self::DrasticProd => ProductionLink::DrasticProd.apply(u, v),
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.apply(u, v),
            Self::ProbOr => ProductionLink::ProbOr.apply(u, v),
            Self::BoundedSum => ProductionLink::BoundedSum.apply(u, v),
            Self::DrasticSum => ProductionLink::DrasticSum.apply(u, v),
        }
    }
}

/// How a rule's firing strength shapes its consequent set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ImplicationOp {
    /// Clip the set at the firing strength (Mamdani)
    #[default]
    Min,
    /// Scale the set by the firing strength (Larsen)
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
        membership.into_iter().map(move |mu| match self {
            Self::Min => F::min(strength, mu),
            Self::Prod => strength * mu,
        })
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProductionLink {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DefuzzificationOp {
    /// Sampled centroid: sum(x * mu) / sum(mu)
    #[default]
    Centroid,
    /// Center of Gravity of the piecewise linear shape through the samples
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Returns `None` when the shape has no mass to locate.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        if membership.iter().all(|mu| *mu <= F::zero()) {
            return None;
        }

        let two = F::one() + F::one();

        match self {
            Self::Centroid => {
                let (num, den) = universe
                    .iter()
                    .zip(membership)
                    .fold((F::zero(), F::zero()), |(num, den), (x, mu)| (num + *x * *mu, den + *mu));

                Some(num / den)
            },
            Self::Cog => {
                let three = two + F::one();
                let mut num = F::zero();
                let mut den = F::zero();

                for i in 0..universe.len().saturating_sub(1) {
                    let base = universe[i + 1] - universe[i];
                    let area_rect = F::min(membership[i], membership[i + 1]) * base;
                    let center_rect = universe[i] + base / two;
                    let area_tria = base * F::abs(membership[i + 1] - membership[i]) / two;
                    let center_tria = if membership[i + 1] > membership[i] {
                        universe[i] + two / three * base
                    } else {
                        universe[i] + F::one() / three * base
                    };

                    num = num + area_rect * center_rect + area_tria * center_tria;
                    den = den + area_rect + area_tria;
                }

                (den > F::zero()).then(|| num / den)
            },
            Self::Boa => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(x, mu)| (mu[0] + mu[1]) * (x[1] - x[0]) / two)
                    .collect();
                let total_area = areas.iter().fold(F::zero(), |acc, a| acc + *a);

                if total_area <= F::zero() {
                    return None;
                }

                let target = total_area / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().enumerate() {
                    if cum_area + *area >= target {
                        let fraction = if *area > F::zero() {
                            (target - cum_area) / *area
                        } else {
                            F::zero()
                        };

                        return Some(universe[i] + fraction * (universe[i + 1] - universe[i]));
                    }

                    cum_area = cum_area + *area;
                }

                universe.last().copied()
            },
            Self::Mom | Self::Lom | Self::Som => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);
                let mut at_max = universe
                    .iter()
                    .zip(membership)
                    .filter_map(|(u, m)| (*m == maximum).then_some(*u));

                match self {
                    Self::Mom => {
                        let (len, sum) = at_max.fold((0usize, F::zero()), |(len, sum), u| (len + 1, sum + u));

                        F::from(len).map(|len| sum / len)
                    },
                    Self::Lom => at_max.reduce(F::max),
                    _ => at_max.next(),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSE: [f64; 5] = [0., 1., 2., 3., 4.];

    #[test]
    fn test_norms() {
        assert_eq!(AndOp::Min.apply(0.3, 0.6), 0.3);
        assert_eq!(AndOp::Prod.apply(0.5, 0.6), 0.3);
        assert_eq!(AndOp::BoundedProd.apply(0.5, 0.4), 0.);
        assert_eq!(AndOp::DrasticProd.apply(0.5, 1.), 0.5);
        assert_eq!(AndOp::DrasticProd.apply(0.5, 0.9), 0.);
        assert_eq!(OrOp::Max.apply(0.3, 0.6), 0.6);
        assert_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
        assert_eq!(OrOp::BoundedSum.apply(0.7, 0.6), 1.);
        assert_eq!(OrOp::DrasticSum.apply(0.7, 0.), 0.7);
        assert_eq!(OrOp::DrasticSum.apply(0.7, 0.1), 1.);
    }

    #[test]
    fn test_implication() {
        let mu = [0., 0.5, 1., 0.5, 0.];

        assert_eq!(
            ImplicationOp::Min.call(0.6, mu).collect::<Vec<_>>(),
            vec![0., 0.5, 0.6, 0.5, 0.]
        );
        assert_eq!(
            ImplicationOp::Prod.call(0.5, mu).collect::<Vec<_>>(),
            vec![0., 0.25, 0.5, 0.25, 0.]
        );
        assert_eq!(
            ProductionLink::Max.call(mu, [0.2; 5]).collect::<Vec<_>>(),
            vec![0.2, 0.5, 1., 0.5, 0.2]
        );
    }

    #[test]
    fn test_symmetric_shape_lands_on_peak() {
        let mu = [0., 0.5, 1., 0.5, 0.];

        for op in [
            DefuzzificationOp::Centroid,
            DefuzzificationOp::Cog,
            DefuzzificationOp::Boa,
            DefuzzificationOp::Mom,
            DefuzzificationOp::Lom,
            DefuzzificationOp::Som,
        ] {
            let x = op.call(&UNIVERSE, &mu).unwrap();

            assert!((x - 2.).abs() < 1e-9, "{op:?} gave {x}");
        }
    }

    #[test]
    fn test_plateau() {
        let mu = [0., 1., 1., 1., 0.];

        assert_eq!(DefuzzificationOp::Mom.call(&UNIVERSE, &mu), Some(2.));
        assert_eq!(DefuzzificationOp::Lom.call(&UNIVERSE, &mu), Some(3.));
        assert_eq!(DefuzzificationOp::Som.call(&UNIVERSE, &mu), Some(1.));
    }

    #[test]
    fn test_centroid_right_shoulder() {
        // very_high = [1.7, 2.0, 2.0] fully fired, sampled every 0.1
        let universe = [1.7, 1.8, 1.9, 2.0];
        let mu = [0., 1. / 3., 2. / 3., 1.];
        let centroid = DefuzzificationOp::Centroid.call(&universe, &mu).unwrap();
        let cog = DefuzzificationOp::Cog.call(&universe, &mu).unwrap();

        assert!((centroid - 1.9333).abs() < 1e-3);
        assert!((cog - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_shape() {
        let mu = [0.; 5];

        assert_eq!(DefuzzificationOp::Centroid.call(&UNIVERSE, &mu), None);
        assert_eq!(DefuzzificationOp::Cog.call(&UNIVERSE, &mu), None);
        assert_eq!(DefuzzificationOp::Mom.call(&UNIVERSE, &mu), None);
    }
}
