use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::{Outputs, UniverseWarning};
use crate::rules::{Fuzzified, Rules};
use crate::variable::{Role, VariableKey, Variables};

/// What to do with a crisp input outside its variable's universe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UniversePolicy {
    /// Evaluate anyway and report it in `Outputs::warnings`
    #[default]
    Warn,
    /// Fail with `Error::OutOfUniverse`
    Reject,
}

/// Mamdani-style inference: fuzzify, fire, clip, aggregate, defuzzify.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mamdani {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    prod_link: ProductionLink,
    defuzz_op: DefuzzificationOp,
    universe_policy: UniversePolicy,
}

impl Mamdani {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
            universe_policy: UniversePolicy::default(),
        }
    }

    pub fn with_universe_policy(mut self, universe_policy: UniversePolicy) -> Self {
        self.universe_policy = universe_policy;
        self
    }

    pub fn universe_policy(&self) -> UniversePolicy {
        self.universe_policy
    }

    pub fn eval<T: Copy + Eq + Hash + Debug>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        inputs: &Inputs,
    ) -> Result<Outputs> {
        let names = |key: VariableKey| {
            vars.0
                .get(key)
                .map_or_else(|| format!("{key:?}"), |v| v.name.clone())
        };

        if let Some(key) = inputs.0.keys().find(|key| !vars.0.contains_key(**key)) {
            debug!(variable = ?key, "input given for an unknown variable");
            return Err(Error::UnknownVariable);
        }

        // Fuzzificate facts: every antecedent needs a finite crisp value
        let mut fuzzified = Fuzzified::with_capacity(inputs.0.len());
        let mut warnings = Vec::new();

        for (key, var) in vars.iter().filter(|(_, v)| v.role == Role::Antecedent) {
            let value = *inputs.0.get(&key).ok_or_else(|| Error::MissingInput {
                variable: var.name.clone(),
            })?;

            if !value.is_finite() {
                return Err(Error::NonFiniteInput {
                    variable: var.name.clone(),
                    value,
                });
            }

            let degrees = var.fuzzify(value);

            if !var.universe.contains(value) {
                let (min, max) = (var.universe.min(), var.universe.max());

                if self.universe_policy == UniversePolicy::Reject {
                    return Err(Error::OutOfUniverse {
                        variable: var.name.clone(),
                        value,
                        min,
                        max,
                    });
                }

                let all_zero = degrees.values().all(|d| *d == 0.);

                warn!(variable = %var.name, value, min, max, all_zero, "input outside universe");
                warnings.push(UniverseWarning {
                    variable: var.name.clone(),
                    value,
                    min,
                    max,
                    all_zero,
                });
            }

            trace!(variable = %var.name, value, ?degrees, "fuzzified");
            fuzzified.insert(key, degrees);
        }

        // Fire rules, folding strengths of rules that share a consequent set
        let mut firing_strengths = Vec::with_capacity(rules.len());
        let mut set_strengths: HashMap<VariableKey, HashMap<T, f64>> = HashMap::new();

        for (i, rule) in rules.0.iter().enumerate() {
            let strength = rule.firing_strength(&fuzzified, self.and_op, self.or_op, &names)?;
            let (var_key, term) = rule.consequence;

            trace!(rule = i, strength, consequence = ?term, "rule fired");
            firing_strengths.push(strength);

            let entry = set_strengths.entry(var_key).or_default().entry(term).or_insert(0.);

            *entry = f64::max(*entry, strength);
        }

        // Clip each consequent set, aggregate the clipped shapes, defuzzificate
        let mut defuzzificated = HashMap::with_capacity(set_strengths.len());

        for (var_key, strengths) in set_strengths {
            let var = vars.0.get(var_key).ok_or(Error::UnknownVariable)?;

            if var.role != Role::Consequent {
                return Err(Error::InvalidRule {
                    rule: rules.0.iter().position(|r| r.consequence.0 == var_key).unwrap_or_default(),
                    reason: format!("`{}` is not a consequent", var.name),
                });
            }

            let mut aggregated: Option<Vec<f64>> = None;

            for (term, strength) in strengths.iter().filter(|(_, s)| **s > 0.) {
                let set = var.terms.get(term).ok_or_else(|| Error::UnknownTerm {
                    variable: var.name.clone(),
                    term: format!("{term:?}"),
                })?;
                let implied = self.imp_op.call(*strength, set.sampled.iter().copied());

                aggregated = Some(match aggregated {
                    None => implied.collect(),
                    Some(agg) => self.prod_link.call(agg, implied).collect(),
                });
            }

            let aggregated = aggregated.unwrap_or_else(|| vec![0.; var.universe.points().len()]);
            let crisp = self
                .defuzz_op
                .call(var.universe.points(), &aggregated)
                .ok_or_else(|| Error::NoRuleFired {
                    variable: var.name.clone(),
                })?;

            debug!(variable = %var.name, ?strengths, crisp, "defuzzificated");
            defuzzificated.insert(var_key, crisp);
        }

        Ok(Outputs::new(defuzzificated, firing_strengths, warnings))
    }
}
