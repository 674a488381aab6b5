//! Hand-authored variable and rule tables.
//!
//! Each adapter ships a TOML table (see `config/`) describing its universes,
//! triangular sets and rule rows. Set names deserialize straight into the
//! adapter's closed set enums, so a misspelled set is a parse error.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::membership::MembershipFn;
use crate::terms::{Term, Terms};
use crate::variable::Universe;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UniverseSpec {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl UniverseSpec {
    pub fn build(&self) -> Result<Universe> {
        Universe::range(self.start..=self.end, self.step)
    }
}

/// One triangular set: `points = [a, b, c]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TermSpec<K> {
    pub name: K,
    pub points: [f64; 3],
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec<K> {
    pub universe: UniverseSpec,
    pub terms: Vec<TermSpec<K>>,
}

impl<K: Term + Copy + Debug> VariableSpec<K> {
    pub fn terms(&self) -> Result<Terms<K>> {
        let mut terms = Terms::new();

        for spec in &self.terms {
            let [a, b, c] = spec.points;

            terms.insert(spec.name, MembershipFn::triangular(a, b, c)?)?;
        }

        Ok(terms)
    }
}

pub fn from_toml_str<C: DeserializeOwned>(source: &str) -> Result<C> {
    Ok(toml::from_str(source)?)
}

pub fn load<C: DeserializeOwned>(path: impl AsRef<Path>) -> Result<C> {
    let source = std::fs::read_to_string(path)?;

    from_toml_str(&source)
}

/// Every combination in `expected` must be matched by exactly one rule key.
pub fn check_coverage<K: Eq + Hash + Debug>(
    expected: impl IntoIterator<Item = K>,
    rule_keys: impl IntoIterator<Item = K>,
) -> Result<()> {
    let mut seen = HashSet::new();

    for key in rule_keys {
        if seen.contains(&key) {
            return Err(Error::DuplicateRule(format!("{key:?}")));
        }

        seen.insert(key);
    }

    for key in expected {
        if !seen.contains(&key) {
            return Err(Error::IncompleteRuleTable(format!("{key:?}")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, PartialEq)]
    #[serde(rename_all = "snake_case")]
    enum Level {
        Low,
        High,
    }

    #[test]
    fn test_parse_variable() {
        let spec: VariableSpec<Level> = from_toml_str(
            r#"
            universe = { start = 0.0, end = 2.0, step = 1.0 }
            terms = [
                { name = "low", points = [0.0, 0.0, 1.0] },
                { name = "high", points = [1.0, 2.0, 2.0] },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(spec.universe.build().unwrap().points(), &[0., 1., 2.]);
        assert_eq!(spec.terms().unwrap().len(), 2);
    }

    #[test]
    fn test_typo_in_set_name() {
        let result: Result<VariableSpec<Level>> = from_toml_str(
            r#"
            universe = { start = 0.0, end = 2.0, step = 1.0 }
            terms = [{ name = "hihg", points = [1.0, 2.0, 2.0] }]
            "#,
        );

        assert!(matches!(result, Err(Error::Config(_))));
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_bad_breakpoints_and_duplicates() {
        let spec: VariableSpec<Level> = from_toml_str(
            r#"
            universe = { start = 0.0, end = 2.0, step = 1.0 }
            terms = [{ name = "low", points = [1.0, 0.0, 2.0] }]
            "#,
        )
        .unwrap();

        assert!(matches!(spec.terms(), Err(Error::InvalidBreakpoints { .. })));

        let spec: VariableSpec<Level> = from_toml_str(
            r#"
            universe = { start = 0.0, end = 2.0, step = 1.0 }
            terms = [
                { name = "low", points = [0.0, 0.0, 1.0] },
                { name = "low", points = [0.0, 1.0, 2.0] },
            ]
            "#,
        )
        .unwrap();

        assert!(matches!(spec.terms(), Err(Error::DuplicateTerm { .. })));
    }

    #[test]
    fn test_coverage() {
        let all = [(Level::Low, Level::Low), (Level::Low, Level::High), (Level::High, Level::Low)];

        assert!(check_coverage(all, all).is_ok());
        assert!(matches!(
            check_coverage(all, all[..2].iter().copied()),
            Err(Error::IncompleteRuleTable(missing)) if missing.contains("High")
        ));
        assert!(matches!(
            check_coverage(all, all.into_iter().chain(Some(all[0]))),
            Err(Error::DuplicateRule(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result: Result<VariableSpec<Level>> = load("/definitely/not/here.toml");

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
