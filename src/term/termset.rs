//! Deduplicating term accumulator

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use super::{Term, VariableLabels};

/// A set of terms: implicants, prime implicants or a cover
///
/// Inserting a term that is already present is a no-op. Iteration order is the
/// terms' total order, independent of insertion history, so results built from
/// a fixed random source are reproducible.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TermSet {
    terms: BTreeSet<Term>,
}

impl TermSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term, returning `false` if it was already present
    pub fn insert(&mut self, term: Term) -> bool {
        self.terms.insert(term)
    }

    /// Remove a term, returning `true` if it was present
    pub fn remove(&mut self, term: &Term) -> bool {
        self.terms.remove(term)
    }

    /// Whether `term` is in the set
    pub fn contains(&self, term: &Term) -> bool {
        self.terms.contains(term)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over terms in order
    pub fn iter(&self) -> btree_set::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Add every term of `other`
    pub fn union_with(&mut self, other: &TermSet) {
        self.terms.extend(other.terms.iter().cloned());
    }

    /// Whether every term of `other` is also in this set
    pub fn is_superset(&self, other: &TermSet) -> bool {
        self.terms.is_superset(&other.terms)
    }

    /// Whether some term of this set matches `minterm`
    pub fn matches(&self, minterm: &Term) -> bool {
        self.terms.iter().any(|term| term.matches(minterm))
    }

    /// Total number of literals over all terms
    pub fn literal_count(&self) -> usize {
        self.terms.iter().map(Term::len).sum()
    }

    /// Render as a sum of products using variable names from `labels`
    pub fn display_with<'a>(&'a self, labels: &'a VariableLabels) -> impl fmt::Display + 'a {
        SumOfProducts {
            set: self,
            labels: Some(labels),
        }
    }
}

impl fmt::Debug for TermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.terms.iter()).finish()
    }
}

impl fmt::Display for TermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(
            &SumOfProducts {
                set: self,
                labels: None,
            },
            f,
        )
    }
}

struct SumOfProducts<'a> {
    set: &'a TermSet,
    labels: Option<&'a VariableLabels>,
}

impl fmt::Display for SumOfProducts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.set.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.set.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match self.labels {
                Some(labels) => write!(f, "{}", term.display_with(labels))?,
                None => write!(f, "{}", term)?,
            }
        }
        Ok(())
    }
}

impl FromIterator<Term> for TermSet {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        TermSet {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Term> for TermSet {
    fn extend<I: IntoIterator<Item = Term>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl IntoIterator for TermSet {
    type Item = Term;
    type IntoIter = btree_set::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a TermSet {
    type Item = &'a Term;
    type IntoIter = btree_set::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
