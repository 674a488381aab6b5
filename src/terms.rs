use std::fmt::Debug;

pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::{Error, Result};
use crate::membership::MembershipFn;

/// The fuzzy sets of one variable, keyed by a closed enum of set identifiers.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, MembershipFn>);

impl<K: Term + Copy + Debug> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, membership: MembershipFn) -> Result<()> {
        if self.0.contains_key(key) {
            return Err(Error::DuplicateTerm {
                term: format!("{key:?}"),
            });
        }

        self.0.insert(key, membership);

        Ok(())
    }

    /// Shorthand for inserting a triangular set.
    pub fn triangle(&mut self, key: K, a: f64, b: f64, c: f64) -> Result<()> {
        self.insert(key, MembershipFn::triangular(a, b, c)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Term + Copy + Debug> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares the union of every set identifier used by one system, along with
/// the `From` impls that let `Variable<I>::is` lift a per-variable term into it.
#[macro_export]
macro_rules! term_union {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        $vis enum $name {
            $($variant($ty)),+
        }

        $(
            impl From<$ty> for $name {
                fn from(term: $ty) -> Self {
                    Self::$variant(term)
                }
            }
        )+
    };
}

#[test]
fn test_duplicate_terms() {
    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Level {
        Low,
        High,
    }

    let mut terms = Terms::new();

    terms.triangle(Level::Low, 0., 0., 1.).unwrap();
    terms.triangle(Level::High, 0., 1., 1.).unwrap();

    assert_eq!(terms.len(), 2);
    assert!(matches!(
        terms.triangle(Level::Low, 0., 0.5, 1.),
        Err(Error::DuplicateTerm { term }) if term == "Low"
    ));
    assert!(matches!(
        terms.triangle(Level::High, 1., 0., 1.),
        Err(Error::InvalidBreakpoints { .. })
    ));
}
