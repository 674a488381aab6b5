use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// An input that fell outside its variable's universe.
#[derive(Clone, Debug, PartialEq)]
pub struct UniverseWarning {
    pub variable: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Every set of the variable fuzzified to zero
    pub all_zero: bool,
}

#[derive(Debug)]
pub struct Outputs {
    defuzzificated_inferred_memberships: HashMap<VariableKey, f64>,
    firing_strengths: Vec<f64>,
    warnings: Vec<UniverseWarning>,
}

impl Outputs {
    pub(crate) fn new(
        defuzzificated_inferred_memberships: HashMap<VariableKey, f64>,
        firing_strengths: Vec<f64>,
        warnings: Vec<UniverseWarning>,
    ) -> Self {
        Self {
            defuzzificated_inferred_memberships,
            firing_strengths,
            warnings,
        }
    }

    pub fn get_inferred_membership<I>(&self, var: Variable<I>) -> Option<f64> {
        self.defuzzificated_inferred_memberships.get(&var.0).copied()
    }

    /// Firing strength of every rule, in the order the rules were added.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn warnings(&self) -> &[UniverseWarning] {
        &self.warnings
    }
}
