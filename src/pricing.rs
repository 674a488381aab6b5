//! Room price multiplier from season, room type and location.

use std::fmt;

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

const DEFAULT_TABLE: &str = include_str!("../config/pricing.toml");

/// Gives an input enum its 0, 1, 2, .. crisp codes.
macro_rules! coded {
    ($name:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> f64 {
                self as u8 as f64
            }
        }

        impl TryFrom<u8> for $name {
            type Error = Error;

            fn try_from(code: u8) -> Result<Self> {
                Self::ALL
                    .get(code as usize)
                    .copied()
                    .ok_or(Error::InvalidCode { kind: $kind, code })
            }
        }
    };
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Low,
    Medium,
    High,
}

coded!(Season, "season", [Low, Medium, High]);

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Double,
    Deluxe,
    Suite,
}

coded!(RoomType, "room type", [Double, Deluxe, Suite]);

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Double => "double",
            Self::Deluxe => "deluxe",
            Self::Suite => "suite",
        })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Rural,
    #[serde(alias = "ciudad")]
    City,
    #[serde(alias = "mar")]
    Sea,
}

coded!(Location, "location", [Rural, City, Sea]);

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum PriceLevel {
    Lowest,
    Low,
    Medium,
    High,
    VeryHigh,
}

crate::term_union! {
    pub enum PriceTerm {
        Season(Season),
        RoomType(RoomType),
        Location(Location),
        Level(PriceLevel),
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PriceRule {
    pub season: Season,
    pub room_type: RoomType,
    pub location: Location,
    pub multiplier: PriceLevel,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    pub rules: Vec<PriceRule>,
    pub season: VariableSpec<Season>,
    pub room_type: VariableSpec<RoomType>,
    pub location: VariableSpec<Location>,
    pub multiplier: VariableSpec<PriceLevel>,
}

impl PricingConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        config::from_toml_str(source)
    }
}

/// Price multiplier system: three antecedents, one consequent.
pub struct PricePercentage {
    system: ControlSystem<PriceTerm>,
    season: Variable<Season>,
    room_type: Variable<RoomType>,
    location: Variable<Location>,
    multiplier: Variable<PriceLevel>,
}

impl PricePercentage {
    /// Builds the system from the bundled table.
    pub fn new() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TABLE)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Self::from_config(PricingConfig::from_toml_str(source)?)
    }

    pub fn from_config(config: PricingConfig) -> Result<Self> {
        let combinations = Season::ALL.iter().flat_map(|s| {
            RoomType::ALL
                .iter()
                .flat_map(move |r| Location::ALL.iter().map(move |l| (*s, *r, *l)))
        });

        check_coverage(
            combinations,
            config.rules.iter().map(|r| (r.season, r.room_type, r.location)),
        )?;

        let mut vars = Variables::new();
        let season = vars.add_antecedent("season", config.season.universe.build()?, config.season.terms()?)?;
        let room_type = vars.add_antecedent(
            "room_type",
            config.room_type.universe.build()?,
            config.room_type.terms()?,
        )?;
        let location = vars.add_antecedent(
            "location",
            config.location.universe.build()?,
            config.location.terms()?,
        )?;
        let multiplier = vars.add_consequent(
            "multiplier",
            config.multiplier.universe.build()?,
            config.multiplier.terms()?,
        )?;

        let mut rules = Rules::with_capacity(config.rules.len());

        for rule in &config.rules {
            rules.add(
                season
                    .is(rule.season)
                    .and2(room_type.is(rule.room_type), location.is(rule.location)),
                multiplier.is(rule.multiplier),
            )?;
        }

        let inference = Mamdani::default().with_universe_policy(UniversePolicy::Reject);

        Ok(Self {
            system: ControlSystem::new(vars, rules, inference)?,
            season,
            room_type,
            location,
            multiplier,
        })
    }

    pub fn with_universe_policy(self, policy: UniversePolicy) -> Self {
        let inference = self.system.inference().with_universe_policy(policy);

        Self {
            system: self.system.with_inference(inference),
            ..self
        }
    }

    pub fn system(&self) -> &ControlSystem<PriceTerm> {
        &self.system
    }

    /// Multiplier for raw crisp inputs; fractional codes blend neighbouring sets.
    pub fn calculate_multiplier(&self, season: f64, room_type: f64, location: f64) -> Result<f64> {
        let inputs = Inputs::new()
            .with(self.season, season)
            .with(self.room_type, room_type)
            .with(self.location, location);
        let outputs = self.system.compute(&inputs)?;

        outputs
            .get_inferred_membership(self.multiplier)
            .ok_or_else(|| Error::NoRuleFired {
                variable: "multiplier".into(),
            })
    }

    /// `base_price` scaled by the multiplier, rounded to cents.
    pub fn calculated_price(
        &self,
        season: Season,
        room_type: RoomType,
        location: Location,
        base_price: f64,
    ) -> Result<f64> {
        let base_price = check_amount(base_price)?;
        let multiplier = self.calculate_multiplier(season.code(), room_type.code(), location.code())?;
        let price = round2(base_price * multiplier);

        debug!(?season, %room_type, ?location, base_price, multiplier, price, "priced room");

        Ok(price)
    }
}
