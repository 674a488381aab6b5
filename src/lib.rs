//! Mamdani fuzzy inference with two ready-made systems: a room price
//! multiplier driven by season, room type and location, and a salary
//! multiplier driven by job position and hotel star rating.
//!
//! ```no_run
//! use hotel_fuzzy::pricing::{Location, PricePercentage, RoomType, Season};
//!
//! let pricing = PricePercentage::new()?;
//! let price = pricing.calculated_price(Season::Low, RoomType::Double, Location::Rural, 30.)?;
//!
//! assert!(price < 30.);
//! # Ok::<(), hotel_fuzzy::Error>(())
//! ```

mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod system;
mod terms;
mod variable;

pub mod config;
pub mod employee;
pub mod guest;
pub mod hotel;
pub mod pricing;
pub mod salary;

pub use dsl::Expr;
pub use error::{Error, Result};
pub use inference::{Mamdani, UniversePolicy};
pub use inputs::Inputs;
pub use membership::{trimf, MembershipFn};
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::{Outputs, UniverseWarning};
pub use rules::{Fuzzified, Rule, Rules};
pub use system::ControlSystem;
pub use terms::{Key, Term, Terms};
pub use variable::{Role, Universe, Variable, VariableConstraints, VariableKey, Variables};
