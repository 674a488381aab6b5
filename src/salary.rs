//! Salary multiplier from job seniority and hotel star rating.

use serde::Deserialize;
use tracing::debug;

use crate::config::{self, check_coverage, VariableSpec};
use crate::error::{Error, Result};
use crate::inference::{Mamdani, UniversePolicy};
use crate::inputs::Inputs;
use crate::math::{check_amount, round2};
use crate::rules::Rules;
use crate::system::ControlSystem;
use crate::terms::Key;
use crate::variable::{Variable, Variables};

const DEFAULT_TABLE: &str = include_str!("../config/salary.toml");

/// Seniority sets over positions 1 (junior) to 5 (executive).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum JobPosition {
    Junior,
    Mid,
    Senior,
    Executive,
}

impl JobPosition {
    pub const ALL: &'static [JobPosition] = &[Self::Junior, Self::Mid, Self::Senior, Self::Executive];
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum HotelRating {
    Three,
    Four,
    Five,
}

impl HotelRating {
    pub const ALL: &'static [HotelRating] = &[Self::Three, Self::Four, Self::Five];
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum SalaryLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

crate::term_union! {
    pub enum SalaryTerm {
        Job(JobPosition),
        Rating(HotelRating),
        Level(SalaryLevel),
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SalaryRule {
    pub job_position: JobPosition,
    pub hotel_rating: HotelRating,
    pub salary_multiplier: SalaryLevel,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SalaryConfig {
    pub rules: Vec<SalaryRule>,
    pub job_position: VariableSpec<JobPosition>,
    pub hotel_rating: VariableSpec<HotelRating>,
    pub salary_multiplier: VariableSpec<SalaryLevel>,
}

impl SalaryConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        config::from_toml_str(source)
    }
}

pub struct EmployeeSalary {
    system: ControlSystem<SalaryTerm>,
    job_position: Variable<JobPosition>,
    hotel_rating: Variable<HotelRating>,
    salary_multiplier: Variable<SalaryLevel>,
}

impl EmployeeSalary {
    /// Builds the system from the bundled table.
    pub fn new() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TABLE)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::from_config(SalaryConfig::from_toml_str(source)?)
    }

    pub fn from_config(config: SalaryConfig) -> Result<Self> {
        let combinations = JobPosition::ALL
            .iter()
            .flat_map(|j| HotelRating::ALL.iter().map(move |h| (*j, *h)));

        check_coverage(
            combinations,
            config.rules.iter().map(|r| (r.job_position, r.hotel_rating)),
        )?;

        let mut vars = Variables::new();
        let job_position = vars.add_antecedent(
            "job_position",
            config.job_position.universe.build()?,
            config.job_position.terms()?,
        )?;
        let hotel_rating = vars.add_antecedent(
            "hotel_rating",
            config.hotel_rating.universe.build()?,
            config.hotel_rating.terms()?,
        )?;
        let salary_multiplier = vars.add_consequent(
            "salary_multiplier",
            config.salary_multiplier.universe.build()?,
            config.salary_multiplier.terms()?,
        )?;

        let mut rules = Rules::with_capacity(config.rules.len());

        for rule in &config.rules {
            rules.add(
                job_position.is(rule.job_position).and(hotel_rating.is(rule.hotel_rating)),
                salary_multiplier.is(rule.salary_multiplier),
            )?;
        }

        let inference = Mamdani::default().with_universe_policy(UniversePolicy::Reject);

        Ok(Self {
            system: ControlSystem::new(vars, rules, inference)?,
            job_position,
            hotel_rating,
            salary_multiplier,
        })
    }

    pub fn with_universe_policy(self, policy: UniversePolicy) -> Self {
        let inference = self.system.inference().with_universe_policy(policy);

        Self {
            system: self.system.with_inference(inference),
            ..self
        }
    }

    pub fn system(&self) -> &ControlSystem<SalaryTerm> {
        &self.system
    }

    /// Multiplier for a job position in 1..=5 at a hotel rated 3..=5 stars.
    pub fn salary_multiplier(&self, job_position: f64, hotel_rating: f64) -> Result<f64> {
        let inputs = Inputs::new()
            .with(self.job_position, job_position)
            .with(self.hotel_rating, hotel_rating);

        self.system
            .compute(&inputs)?
            .get_inferred_membership(self.salary_multiplier)
            .ok_or_else(|| Error::NoRuleFired {
                variable: "salary_multiplier".into(),
            })
    }

    pub fn salary_calculator(&self, job_position: u8, hotel_rating: u8, base_salary: f64) -> Result<f64> {
        let base_salary = check_amount(base_salary)?;
        let multiplier = self.salary_multiplier(f64::from(job_position), f64::from(hotel_rating))?;
        let salary = round2(base_salary * multiplier);

        debug!(job_position, hotel_rating, base_salary, multiplier, salary, "adjusted salary");

        Ok(salary)
    }
}
