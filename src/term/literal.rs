//! Variables and literals
//!
//! A [`Literal`] is a signed reference to a variable index. Literals are plain
//! `Copy` values; ordering is by variable index first and polarity second, which
//! gives every collection built from them a stable iteration order.

use std::fmt;
use std::sync::Arc;

/// A declared input variable
///
/// Variables are identified by their index in `[0, n_variables)`. The name is
/// optional and only used for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    index: usize,
    name: Option<Arc<str>>,
}

impl Variable {
    /// Create an unnamed variable
    pub fn new(index: usize) -> Self {
        Variable { index, name: None }
    }

    /// Create a named variable
    pub fn named(index: usize, name: impl AsRef<str>) -> Self {
        Variable {
            index,
            name: Some(Arc::from(name.as_ref())),
        }
    }

    /// Get the variable index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the variable name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The normal (uncomplemented) literal of this variable
    pub fn normal(&self) -> Literal {
        Literal::normal(self.index)
    }

    /// The complemented literal of this variable
    pub fn complement(&self) -> Literal {
        Literal::complement(self.index)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "x{}", self.index),
        }
    }
}

/// Polarity of a literal
///
/// `Complement` sorts before `Normal` so that a term's literals read in the
/// same order as a PLA row (`0` before `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    /// Variable appears complemented (value 0)
    Complement,
    /// Variable appears uncomplemented (value 1)
    Normal,
}

impl Polarity {
    /// The opposite polarity
    pub fn flip(self) -> Self {
        match self {
            Polarity::Complement => Polarity::Normal,
            Polarity::Normal => Polarity::Complement,
        }
    }

    /// The truth value a variable takes under this polarity
    pub fn value(self) -> bool {
        matches!(self, Polarity::Normal)
    }
}

impl From<bool> for Polarity {
    fn from(value: bool) -> Self {
        if value {
            Polarity::Normal
        } else {
            Polarity::Complement
        }
    }
}

/// A signed variable reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    variable: usize,
    polarity: Polarity,
}

impl Literal {
    /// Create a literal from a variable index and polarity
    pub fn new(variable: usize, polarity: Polarity) -> Self {
        Literal { variable, polarity }
    }

    /// The normal literal of `variable`
    pub fn normal(variable: usize) -> Self {
        Literal::new(variable, Polarity::Normal)
    }

    /// The complemented literal of `variable`
    pub fn complement(variable: usize) -> Self {
        Literal::new(variable, Polarity::Complement)
    }

    /// Index of the referenced variable
    pub fn variable(&self) -> usize {
        self.variable
    }

    /// Polarity of this literal
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Whether this is the normal form of its variable
    pub fn is_normal(&self) -> bool {
        self.polarity == Polarity::Normal
    }

    /// The literal of the same variable with opposite polarity
    pub fn negated(&self) -> Self {
        Literal::new(self.variable, self.polarity.flip())
    }

    /// Whether `other` refers to the same variable with opposite polarity
    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.variable == other.variable && self.polarity != other.polarity
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.polarity {
            Polarity::Normal => write!(f, "x{}", self.variable),
            Polarity::Complement => write!(f, "~x{}", self.variable),
        }
    }
}
