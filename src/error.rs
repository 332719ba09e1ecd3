//! Error types for the BOOM minimizer
//!
//! Every failure the core can report is a variant of [`MinimizeError`], so callers
//! can tell caller-data problems (overlapping onset/offset, malformed minterms)
//! apart from configuration mistakes and exhausted work budgets.

use std::fmt;
use std::io;

use crate::term::{Term, TermSet};

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Coverage-Directed Search
    Search,
    /// Implicant Expansion
    Expansion,
    /// Unate covering
    Covering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Search => write!(f, "coverage-directed search"),
            Stage::Expansion => write!(f, "implicant expansion"),
            Stage::Covering => write!(f, "unate covering"),
        }
    }
}

/// The main error type for the minimizer
#[derive(Debug, Clone, PartialEq)]
pub enum MinimizeError {
    /// A data set element is not a fully specified minterm
    ///
    /// Every onset/offset element must hold exactly one literal for each
    /// variable in `[0, n_variables)`.
    IncompleteMinterm {
        /// Position of the offending element in its data set
        index: usize,
        /// Declared number of variables
        n_variables: usize,
        /// The offending term
        term: Term,
    },

    /// Two inputs disagree on the number of variables
    DimensionMismatch {
        /// Expected number of variables
        expected: usize,
        /// Number of variables actually found
        actual: usize,
    },

    /// The same minterm appears in both the onset and the offset
    OverlappingSets {
        /// A minterm present in both sets
        minterm: Term,
    },

    /// A scoring strategy offered no candidate where one was structurally required
    ///
    /// During search this means a partial term cannot be made offset-safe,
    /// which only happens when onset and offset are not disjoint.
    NoCandidates {
        /// Stage that requested candidates
        stage: Stage,
        /// The term under construction at the time
        term: Term,
    },

    /// A term handed to expansion already intersects the offset
    UnsafeImplicant {
        /// The offending input term
        term: Term,
    },

    /// Interactivity weight outside `[0, 1]`
    InvalidInteractivity {
        /// The rejected value
        value: f64,
    },

    /// Centrality blend weight outside `[0, 1]`
    InvalidBlendWeight {
        /// The rejected value
        value: f64,
    },

    /// Score resolution must be a positive finite number
    InvalidResolution {
        /// The rejected value
        value: f64,
    },

    /// An onset minterm is covered by no prime implicant
    UncoverableMinterm {
        /// The uncovered minterm
        minterm: Term,
    },

    /// A stage exceeded its work-list budget before finishing
    ///
    /// The partial result is not a valid final answer.
    BudgetExhausted {
        /// Stage that ran out of budget
        stage: Stage,
        /// The configured budget
        budget: usize,
        /// Results accumulated before the budget ran out
        partial: TermSet,
    },
}

impl fmt::Display for MinimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizeError::IncompleteMinterm {
                index,
                n_variables,
                term,
            } => write!(
                f,
                "Element {} ({}) is not a fully specified minterm over {} variables",
                index, term, n_variables
            ),
            MinimizeError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: expected {} variables, found {}",
                expected, actual
            ),
            MinimizeError::OverlappingSets { minterm } => write!(
                f,
                "Onset and offset are not disjoint: minterm {} appears in both",
                minterm
            ),
            MinimizeError::NoCandidates { stage, term } => write!(
                f,
                "No literal candidates during {} for term {}; onset and offset are not disjoint",
                stage, term
            ),
            MinimizeError::UnsafeImplicant { term } => {
                write!(f, "Term {} is not an implicant: it intersects the offset", term)
            }
            MinimizeError::InvalidInteractivity { value } => {
                write!(f, "Interactivity {} is outside the range [0, 1]", value)
            }
            MinimizeError::InvalidBlendWeight { value } => {
                write!(f, "Centrality blend weight {} is outside the range [0, 1]", value)
            }
            MinimizeError::InvalidResolution { value } => {
                write!(f, "Score resolution {} must be positive and finite", value)
            }
            MinimizeError::UncoverableMinterm { minterm } => {
                write!(f, "Onset minterm {} is not covered by any prime implicant", minterm)
            }
            MinimizeError::BudgetExhausted {
                stage,
                budget,
                partial,
            } => write!(
                f,
                "{} exceeded its budget of {} nodes with {} partial results",
                stage,
                budget,
                partial.len()
            ),
        }
    }
}

impl std::error::Error for MinimizeError {}

impl From<MinimizeError> for io::Error {
    fn from(err: MinimizeError) -> Self {
        let kind = match err {
            MinimizeError::InvalidInteractivity { .. }
            | MinimizeError::InvalidBlendWeight { .. }
            | MinimizeError::InvalidResolution { .. } => io::ErrorKind::InvalidInput,
            MinimizeError::BudgetExhausted { .. } => io::ErrorKind::TimedOut,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}
