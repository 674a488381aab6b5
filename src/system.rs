use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::inference::Mamdani;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{Role, VariableKey, Variables};

/// Variables, rules and operators bundled into one immutable, checked system.
pub struct ControlSystem<T> {
    vars: Variables<T>,
    rules: Rules<T>,
    inference: Mamdani,
}

impl<T: Copy + Eq + Hash + Debug> ControlSystem<T> {
    /// Checks every rule against the variables before accepting them.
    pub fn new(vars: Variables<T>, rules: Rules<T>, inference: Mamdani) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            for (var_key, term) in rule.premise().propositions() {
                check_term(&vars, i, var_key, term, Role::Antecedent)?;
            }

            let (var_key, term) = rule.consequence();

            check_term(&vars, i, var_key, &term, Role::Consequent)?;
        }

        // Every sampled antecedent value must belong to some set, or it can never fire a rule
        for (_, var) in vars.iter().filter(|(_, v)| v.role() == Role::Antecedent) {
            if let Some(point) = var.uncovered_point() {
                return Err(Error::UncoveredUniverse {
                    variable: var.name().to_owned(),
                    point,
                });
            }
        }

        Ok(Self { vars, rules, inference })
    }

    pub fn compute(&self, inputs: &Inputs) -> Result<Outputs> {
        self.inference.eval(&self.vars, &self.rules, inputs)
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.vars
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn inference(&self) -> &Mamdani {
        &self.inference
    }

    pub fn with_inference(mut self, inference: Mamdani) -> Self {
        self.inference = inference;
        self
    }
}

fn check_term<T: Copy + Eq + Hash + Debug>(
    vars: &Variables<T>,
    rule: usize,
    var_key: VariableKey,
    term: &T,
    role: Role,
) -> Result<()> {
    let var = vars.0.get(var_key).ok_or_else(|| Error::InvalidRule {
        rule,
        reason: "refers to a variable of another system".into(),
    })?;

    if var.role() != role {
        return Err(Error::InvalidRule {
            rule,
            reason: format!("`{}` is used as {role:?} but declared as {:?}", var.name(), var.role()),
        });
    }

    if !var.has_term(term) {
        return Err(Error::UnknownTerm {
            variable: var.name().to_owned(),
            term: format!("{term:?}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{Key, Terms};
    use crate::variable::Universe;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Size {
        Small,
        Big,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Cost {
        Cheap,
        Dear,
    }

    crate::term_union! {
        enum VarTerms {
            Size(Size),
            Cost(Cost),
        }
    }

    fn universe() -> Universe {
        Universe::range(0. ..=10., 0.5).unwrap()
    }

    #[test]
    fn test_rejects_undefined_term() {
        let mut size_terms = Terms::new();
        let mut cost_terms = Terms::new();

        size_terms.triangle(Size::Small, 0., 0., 10.).unwrap();
        cost_terms.triangle(Cost::Cheap, 0., 0., 10.).unwrap();
        cost_terms.triangle(Cost::Dear, 0., 10., 10.).unwrap();

        let mut vars = Variables::<VarTerms>::new();
        let size = vars.add_antecedent("size", universe(), size_terms).unwrap();
        let cost = vars.add_consequent("cost", universe(), cost_terms).unwrap();
        let mut rules = Rules::new();

        rules.add(size.is(Size::Small), cost.is(Cost::Cheap)).unwrap();
        rules.add(size.is(Size::Big), cost.is(Cost::Dear)).unwrap();

        let result = ControlSystem::new(vars, rules, Mamdani::default());

        assert!(matches!(
            result,
            Err(Error::UnknownTerm { variable, term }) if variable == "size" && term.contains("Big")
        ));
    }

    #[test]
    fn test_rejects_role_mixups() {
        let mut size_terms = Terms::new();
        let mut cost_terms = Terms::new();

        size_terms.triangle(Size::Small, 0., 0., 10.).unwrap();
        cost_terms.triangle(Cost::Cheap, 0., 0., 10.).unwrap();

        let mut vars = Variables::<VarTerms>::new();
        let size = vars.add_antecedent("size", universe(), size_terms).unwrap();
        let cost = vars.add_consequent("cost", universe(), cost_terms).unwrap();
        let mut rules = Rules::new();

        rules.add(cost.is(Cost::Cheap), size.is(Size::Small)).unwrap();

        let result = ControlSystem::new(vars, rules, Mamdani::default());

        assert!(matches!(result, Err(Error::InvalidRule { rule: 0, .. })));
    }

    #[test]
    fn test_rejects_gap_between_sets() {
        let mut size_terms = Terms::new();
        let mut cost_terms = Terms::new();

        // Small ends where Big starts, so 5.0 belongs to neither
        size_terms.triangle(Size::Small, 0., 0., 5.).unwrap();
        size_terms.triangle(Size::Big, 5., 10., 10.).unwrap();
        cost_terms.triangle(Cost::Cheap, 0., 0., 10.).unwrap();

        let mut vars = Variables::<VarTerms>::new();
        let size = vars.add_antecedent("size", universe(), size_terms).unwrap();
        let cost = vars.add_consequent("cost", universe(), cost_terms).unwrap();
        let mut rules = Rules::new();

        rules.add(size.is(Size::Small), cost.is(Cost::Cheap)).unwrap();

        let result = ControlSystem::new(vars, rules, Mamdani::default());

        assert!(matches!(
            result,
            Err(Error::UncoveredUniverse { variable, point }) if variable == "size" && point == 5.
        ));
    }

    #[test]
    fn test_compute() {
        let mut size_terms = Terms::new();
        let mut cost_terms = Terms::new();

        size_terms.triangle(Size::Small, 0., 0., 10.).unwrap();
        size_terms.triangle(Size::Big, 0., 10., 10.).unwrap();
        cost_terms.triangle(Cost::Cheap, 0., 2., 4.).unwrap();
        cost_terms.triangle(Cost::Dear, 6., 8., 10.).unwrap();

        let mut vars = Variables::<VarTerms>::new();
        let size = vars.add_antecedent("size", universe(), size_terms).unwrap();
        let cost = vars.add_consequent("cost", universe(), cost_terms).unwrap();
        let mut rules = Rules::new();

        rules.add(size.is(Size::Small), cost.is(Cost::Cheap)).unwrap();
        rules.add(size.is(Size::Big), cost.is(Cost::Dear)).unwrap();

        let system = ControlSystem::new(vars, rules, Mamdani::default()).unwrap();
        let outputs = system.compute(&Inputs::new().with(size, 10.)).unwrap();

        assert!((outputs.get_inferred_membership(cost).unwrap() - 8.).abs() < 1e-9);
        assert_eq!(system.rules().len(), 2);
        assert_eq!(system.variables().len(), 2);
    }

    #[test]
    fn test_shareable_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}

        assert_send_sync::<ControlSystem<VarTerms>>();
    }
}
