use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::dsl::Expr;
use crate::error::{Error, Result};
use crate::ops::{AndOp, OrOp};
use crate::variable::VariableKey;

/// Per-call fuzzified inputs: variable -> set -> degree
pub type Fuzzified<T> = HashMap<VariableKey, HashMap<T, f64>>;

pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// The consequence must name exactly one output set, e.g. `price.is(Level::High)`.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) -> Result<()> {
        let Expr::Is(variable, term) = consequence else {
            return Err(Error::InvalidRule {
                rule: self.0.len(),
                reason: "consequence must be a single `is` proposition".into(),
            });
        };

        self.0.push(Rule {
            premise,
            consequence: (variable, term),
            weight: 1.0,
        });

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }
}

#[derive(Debug)]
pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: (VariableKey, T),
    pub(crate) weight: f64,
}

impl<T: Copy + Eq + Hash + Debug> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> (VariableKey, T) {
        self.consequence
    }

    /// Degree to which the premise holds for `fuzzified`, in [0, 1].
    ///
    /// `names` is only used to label errors.
    pub(crate) fn firing_strength(
        &self,
        fuzzified: &Fuzzified<T>,
        and_op: AndOp,
        or_op: OrOp,
        names: &dyn Fn(VariableKey) -> String,
    ) -> Result<f64> {
        fn eval<T: Copy + Eq + Hash + Debug>(
            expr: &Expr<T>,
            fuzzified: &Fuzzified<T>,
            and_op: AndOp,
            or_op: OrOp,
            names: &dyn Fn(VariableKey) -> String,
        ) -> Result<f64> {
            match expr {
                Expr::Is(var_key, term) => {
                    let degrees = fuzzified.get(var_key).ok_or_else(|| Error::MissingInput {
                        variable: names(*var_key),
                    })?;

                    degrees.get(term).copied().ok_or_else(|| Error::UnknownTerm {
                        variable: names(*var_key),
                        term: format!("{term:?}"),
                    })
                },
                Expr::And(exprs) => exprs.iter().try_fold(1.0, |acc, expr| {
                    Ok(and_op.apply(acc, eval(expr, fuzzified, and_op, or_op, names)?))
                }),
                Expr::Or(exprs) => exprs.iter().try_fold(0.0, |acc, expr| {
                    Ok(or_op.apply(acc, eval(expr, fuzzified, and_op, or_op, names)?))
                }),
            }
        }

        let strength = eval(&self.premise, fuzzified, and_op, or_op, names)? * self.weight;

        Ok(strength.clamp(0., 1.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use slotmap::SlotMap;

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum Level {
        Low,
        High,
    }

    fn unnamed(_: VariableKey) -> String {
        "var".into()
    }

    fn setup(a: f64, b: f64) -> (VariableKey, VariableKey, Fuzzified<Level>) {
        let mut keys = SlotMap::<VariableKey, ()>::with_key();
        let x = keys.insert(());
        let y = keys.insert(());
        let mut fuzzified = Fuzzified::new();

        fuzzified.insert(x, HashMap::from([(Level::Low, 1. - a), (Level::High, a)]));
        fuzzified.insert(y, HashMap::from([(Level::Low, 1. - b), (Level::High, b)]));

        (x, y, fuzzified)
    }

    #[test]
    fn test_consequence_must_be_single_set() {
        let (x, y, _) = setup(0., 0.);
        let mut rules = Rules::new();

        rules
            .add(Expr::Is(x, Level::High), Expr::Is(y, Level::High))
            .unwrap();

        let result = rules.add(
            Expr::Is(x, Level::High),
            Expr::Is(y, Level::High).and(Expr::Is(y, Level::Low)),
        );

        assert!(matches!(result, Err(Error::InvalidRule { rule: 1, .. })));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_missing_input() {
        let (x, y, mut fuzzified) = setup(0.5, 0.5);
        let mut rules = Rules::new();

        fuzzified.remove(&y);
        rules
            .add(Expr::Is(x, Level::High).and(Expr::Is(y, Level::Low)), Expr::Is(x, Level::Low))
            .unwrap();

        let result = rules.0[0].firing_strength(&fuzzified, AndOp::Min, OrOp::Max, &unnamed);

        assert!(matches!(result, Err(Error::MissingInput { .. })));
    }

    #[test]
    fn test_or() {
        let (x, y, fuzzified) = setup(0.2, 0.7);
        let rule = Rule {
            premise: Expr::Is(x, Level::High).or(Expr::Is(y, Level::High)),
            consequence: (x, Level::High),
            weight: 1.0,
        };

        assert_eq!(
            rule.firing_strength(&fuzzified, AndOp::Min, OrOp::Max, &unnamed).unwrap(),
            0.7
        );
    }

    proptest! {
        /// Property: min-conjunction never exceeds any of its clauses and stays in [0, 1]
        #[test]
        fn test_firing_strength_bounds(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
            let (x, y, fuzzified) = setup(a, b);
            let rule = Rule {
                premise: Expr::Is(x, Level::High).and(Expr::Is(y, Level::Low)),
                consequence: (x, Level::High),
                weight: 1.0,
            };
            let strength = rule.firing_strength(&fuzzified, AndOp::Min, OrOp::Max, &unnamed).unwrap();

            prop_assert!((0. ..=1.).contains(&strength));
            prop_assert!(strength <= a);
            prop_assert!(strength <= 1. - b);
            prop_assert_eq!(strength, f64::min(a, 1. - b));
        }
    }
}
