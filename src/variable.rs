use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::linspace::Linspace;
use crate::membership::MembershipFn;
use crate::terms::{Term, Terms};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable whose sets are identified by `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Debug for Variable<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Antecedent,
    Consequent,
}

/// Upper bound on the sample count of a stepped universe.
const MAX_STEPS: f64 = 1e6;

/// Sampled domain of discourse. Sorted, at least two points, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe(Vec<f64>);

impl Universe {
    /// Samples `range` every `step`, including both ends when the step divides the range.
    pub fn range(range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let (min, max) = range.into_inner();

        if !(step.is_finite() && step > 0.) {
            return Err(Error::InvalidUniverse(format!("step must be positive, got {step}")));
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidUniverse(format!("empty range {min}..={max}")));
        }

        // Nudge before flooring so 1.2 / 0.1 = 11.999999999999998 still counts 12 steps
        let steps = ((max - min) / step + 1e-9).floor();

        if !(steps.is_finite() && steps <= MAX_STEPS) {
            return Err(Error::InvalidUniverse(format!(
                "{min}..={max} every {step} needs more than {MAX_STEPS} samples"
            )));
        }

        let end = min + steps * step;
        let end = if (end - max).abs() <= 1e-9 * step { max } else { end };
        let num = (steps as usize)
            .checked_add(1)
            .ok_or_else(|| Error::InvalidUniverse(format!("too many samples in {min}..={max}")))?;

        Self::from_points(Linspace::new(min, end, num).collect())
    }

    pub fn from_points(points: Vec<f64>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidUniverse("needs at least two points".into()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidUniverse("points must be finite".into()));
        }
        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidUniverse("points must be strictly increasing".into()));
        }

        Ok(Self(points))
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min()..=self.max()).contains(&x)
    }
}

pub struct Variables<T>(pub(crate) SlotMap<VariableKey, VariableConstraints<T>>);

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self(SlotMap::with_key())
    }
}

impl<T: Copy + Eq + Hash + Debug> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_antecedent<I>(&mut self, name: &str, universe: Universe, terms: Terms<I>) -> Result<Variable<I>>
    where
        I: Into<T> + Term + Copy + Debug,
    {
        self.add(name, Role::Antecedent, universe, terms)
    }

    pub fn add_consequent<I>(&mut self, name: &str, universe: Universe, terms: Terms<I>) -> Result<Variable<I>>
    where
        I: Into<T> + Term + Copy + Debug,
    {
        self.add(name, Role::Consequent, universe, terms)
    }

    fn add<I>(&mut self, name: &str, role: Role, universe: Universe, terms: Terms<I>) -> Result<Variable<I>>
    where
        I: Into<T> + Term + Copy + Debug,
    {
        if terms.is_empty() {
            return Err(Error::NoTerms {
                variable: name.to_owned(),
            });
        }

        let mut sets = HashMap::with_capacity(terms.len());

        for (key, membership) in terms.0.iter() {
            let sampled = match role {
                Role::Consequent => membership.sample(universe.points()),
                Role::Antecedent => Vec::new(),
            };

            sets.insert(
                key.into(),
                FuzzySet {
                    membership: membership.clone(),
                    sampled,
                },
            );
        }

        let key = self.0.insert(VariableConstraints {
            name: name.to_owned(),
            role,
            universe,
            terms: sets,
        });

        Ok(Variable(key, PhantomData))
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&VariableConstraints<T>> {
        self.0.get(var.0)
    }

    pub fn name<I>(&self, var: Variable<I>) -> Option<&str> {
        self.get(var).map(|v| v.name.as_str())
    }

    /// Degree of `value` in every set of `var`.
    pub fn fuzzify<I>(&self, var: Variable<I>, value: f64) -> Result<HashMap<T, f64>> {
        self.get(var).map(|v| v.fuzzify(value)).ok_or(Error::UnknownVariable)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (VariableKey, &VariableConstraints<T>)> {
        self.0.iter()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FuzzySet {
    pub(crate) membership: MembershipFn,
    /// Membership over the universe; only filled in for consequents
    pub(crate) sampled: Vec<f64>,
}

#[derive(Debug)]
pub struct VariableConstraints<T> {
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) universe: Universe,
    pub(crate) terms: HashMap<T, FuzzySet>,
}

impl<T: Copy + Eq + Hash> VariableConstraints<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn has_term(&self, term: &T) -> bool {
        self.terms.contains_key(term)
    }

    /// First universe sample that no set gives a non-zero degree.
    pub fn uncovered_point(&self) -> Option<f64> {
        self.universe
            .points()
            .iter()
            .copied()
            .find(|x| self.terms.values().all(|set| set.membership.degree(*x) <= 0.))
    }

    pub(crate) fn fuzzify(&self, value: f64) -> HashMap<T, f64> {
        self.terms
            .iter()
            .map(|(term, set)| (*term, set.membership.degree(value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Season {
        Low,
        Medium,
        High,
    }

    #[test]
    fn test_universe_range() {
        let universe = Universe::range(0.8..=2.0, 0.1).unwrap();

        assert_eq!(universe.points().len(), 13);
        assert_eq!(universe.max(), 2.0);

        let universe = Universe::range(0.5..=2.0, 0.1).unwrap();

        assert_eq!(universe.points().len(), 16);

        let universe = Universe::range(0. ..=2., 1.).unwrap();

        assert_eq!(universe.points(), &[0., 1., 2.]);
        assert!(universe.contains(1.5));
        assert!(!universe.contains(2.5));
        assert!(!universe.contains(f64::NAN));

        // A step that doesn't divide the range stops short of the end, like numpy.arange
        let universe = Universe::range(0. ..=1., 0.3).unwrap();

        assert_eq!(universe.points().len(), 4);
        assert!((universe.max() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_universe_rejects() {
        assert!(Universe::range(0. ..=1., 0.).is_err());
        assert!(Universe::range(1. ..=1., 0.1).is_err());
        assert!(Universe::range(2. ..=1., 0.1).is_err());
        assert!(Universe::from_points(vec![1.]).is_err());
        assert!(Universe::from_points(vec![0., 2., 1.]).is_err());
        assert!(Universe::from_points(vec![0., 0.5, 3.]).is_ok());

        // Step so fine the sample count cannot be held
        assert!(matches!(
            Universe::range(0. ..=1e300, 1e-300),
            Err(Error::InvalidUniverse(_))
        ));
        assert!(matches!(Universe::range(0. ..=1e7, 1.), Err(Error::InvalidUniverse(_))));
        assert_eq!(Universe::range(0. ..=1e6, 1.).unwrap().points().len(), 1_000_001);
    }

    #[test]
    fn test_fuzzify() {
        let mut terms = Terms::new();

        terms.triangle(Season::Low, 0., 0., 1.).unwrap();
        terms.triangle(Season::Medium, 0., 1., 2.).unwrap();
        terms.triangle(Season::High, 1., 2., 2.).unwrap();

        let mut vars = Variables::<Season>::new();
        let season = vars
            .add_antecedent("season", Universe::range(0. ..=2., 1.).unwrap(), terms)
            .unwrap();

        let degrees = vars.fuzzify(season, 0.25).unwrap();

        assert_eq!(degrees[&Season::Low], 0.75);
        assert_eq!(degrees[&Season::Medium], 0.25);
        assert_eq!(degrees[&Season::High], 0.);

        // Outside the universe nothing is rejected, it just saturates
        let degrees = vars.fuzzify(season, 7.).unwrap();

        assert!(degrees.values().all(|d| *d == 0.));
        assert_eq!(vars.name(season), Some("season"));
    }

    #[test]
    fn test_variable_without_terms() {
        let mut vars = Variables::<Season>::new();
        let result = vars.add_consequent("empty", Universe::range(0. ..=1., 0.5).unwrap(), Terms::<Season>::new());

        assert!(matches!(result, Err(Error::NoTerms { variable }) if variable == "empty"));
    }
}
