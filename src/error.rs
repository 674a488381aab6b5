use thiserror::Error;

use crate::pricing::RoomType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Triangular breakpoints must be finite and satisfy a <= b <= c
    #[error("invalid triangular breakpoints a={a}, b={b}, c={c}; expected a <= b <= c")]
    InvalidBreakpoints { a: f64, b: f64, c: f64 },

    #[error("invalid membership points: {0}")]
    InvalidMembership(String),

    #[error("invalid universe: {0}")]
    InvalidUniverse(String),

    #[error("term `{term}` is defined more than once")]
    DuplicateTerm { term: String },

    #[error("variable `{variable}` has no terms")]
    NoTerms { variable: String },

    #[error("no set of `{variable}` covers {point}")]
    UncoveredUniverse { variable: String, point: f64 },

    #[error("variable is not registered with this system")]
    UnknownVariable,

    #[error("term `{term}` is not defined on variable `{variable}`")]
    UnknownTerm { variable: String, term: String },

    #[error("rule #{rule}: {reason}")]
    InvalidRule { rule: usize, reason: String },

    #[error("rule table has no rule for {0}")]
    IncompleteRuleTable(String),

    #[error("rule table has more than one rule for {0}")]
    DuplicateRule(String),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing input for antecedent `{variable}`")]
    MissingInput { variable: String },

    #[error("input for `{variable}` is not finite: {value}")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("input {value} for `{variable}` lies outside its universe [{min}, {max}]")]
    OutOfUniverse {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("no rule fired for `{variable}`: aggregated membership is zero over the whole universe")]
    NoRuleFired { variable: String },

    #[error("amount must be a finite non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("{code} is not a valid {kind} code")]
    InvalidCode { kind: &'static str, code: u8 },

    #[error("no {room_type} room is available")]
    RoomUnavailable { room_type: RoomType },
}

impl Error {
    /// Errors caused by a malformed system definition rather than by the
    /// values handed to a single evaluation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidBreakpoints { .. }
                | Self::InvalidMembership(_)
                | Self::InvalidUniverse(_)
                | Self::DuplicateTerm { .. }
                | Self::NoTerms { .. }
                | Self::UncoveredUniverse { .. }
                | Self::UnknownTerm { .. }
                | Self::InvalidRule { .. }
                | Self::IncompleteRuleTable(_)
                | Self::DuplicateRule(_)
                | Self::Config(_)
        )
    }
}
