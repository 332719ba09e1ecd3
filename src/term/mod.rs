//! Terms, data sets and result sets
//!
//! This module provides the data model shared by every stage of the minimizer:
//! - [`Literal`] / [`Variable`]: signed variable references
//! - [`Term`]: a conflict-free set of literals (minterm, implicant or partial term)
//! - [`DataSet`]: an ordered, validated list of fully specified minterms (onset/offset)
//! - [`TermSet`]: a deduplicating accumulator for implicants and covers

mod dataset;
mod labels;
mod literal;
mod termset;

pub use dataset::{ConflictReport, DataSet};
pub use labels::VariableLabels;
pub use literal::{Literal, Polarity, Variable};
pub use termset::TermSet;

use std::fmt;
use std::sync::Arc;

/// A product term: a set of literals with no polarity conflicts
///
/// Terms are persistent. Growing or shrinking a term returns a new `Term` and
/// leaves the original untouched, so terms can be shared freely between search
/// branches. Literals are kept sorted by variable index, one per variable.
///
/// # Examples
///
/// ```
/// use boom_logic::{Literal, Term};
///
/// let minterm = Term::from_bits(&[true, false, true]);
/// let implicant = Term::universal()
///     .with_literal(Literal::normal(0))
///     .with_literal(Literal::complement(1));
///
/// assert!(implicant.covers(&minterm));
/// assert_eq!(implicant.to_string(), "x0*~x1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    literals: Arc<[Literal]>,
}

impl Term {
    /// The empty term (no literals)
    ///
    /// As a cube the empty term is the universal term: it matches every minterm.
    pub fn universal() -> Self {
        Term {
            literals: Arc::from(Vec::<Literal>::new()),
        }
    }

    /// Build a term by inserting literals in order
    ///
    /// Insertion follows [`Term::with_literal`]: the first literal seen for a
    /// variable wins and a later complementary literal is ignored.
    pub fn from_literals<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let mut sorted: Vec<Literal> = Vec::new();
        for literal in literals {
            if let Err(pos) = sorted.binary_search_by_key(&literal.variable(), |l| l.variable()) {
                sorted.insert(pos, literal);
            }
        }
        Term {
            literals: sorted.into(),
        }
    }

    /// Build a fully specified minterm from a row of truth values
    ///
    /// Variable `i` takes the polarity of `bits[i]`.
    pub fn from_bits(bits: &[bool]) -> Self {
        let literals: Vec<Literal> = bits
            .iter()
            .enumerate()
            .map(|(i, &bit)| Literal::new(i, Polarity::from(bit)))
            .collect();
        Term {
            literals: literals.into(),
        }
    }

    /// Number of literals
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether this term has no literals
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Alias for [`Term::is_empty`] that reads better in cube contexts
    pub fn is_universal(&self) -> bool {
        self.is_empty()
    }

    /// Literals sorted by variable index
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Iterate over literals in variable order
    pub fn iter(&self) -> impl Iterator<Item = &Literal> + '_ {
        self.literals.iter()
    }

    fn position(&self, variable: usize) -> Result<usize, usize> {
        self.literals.binary_search_by_key(&variable, |l| l.variable())
    }

    /// Polarity this term fixes for `variable`, if any
    pub fn polarity_of(&self, variable: usize) -> Option<Polarity> {
        self.position(variable)
            .ok()
            .map(|pos| self.literals[pos].polarity())
    }

    /// Whether this term already holds a literal of `variable`
    pub fn fixes(&self, variable: usize) -> bool {
        self.position(variable).is_ok()
    }

    /// Whether this term holds exactly `literal`
    pub fn contains(&self, literal: &Literal) -> bool {
        self.polarity_of(literal.variable()) == Some(literal.polarity())
    }

    /// Return a new term with `literal` added
    ///
    /// Adding a literal that is already present, or whose complement is present,
    /// is a no-op and returns an equal term.
    pub fn with_literal(&self, literal: Literal) -> Term {
        match self.position(literal.variable()) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut literals = Vec::with_capacity(self.literals.len() + 1);
                literals.extend_from_slice(&self.literals[..pos]);
                literals.push(literal);
                literals.extend_from_slice(&self.literals[pos..]);
                Term {
                    literals: literals.into(),
                }
            }
        }
    }

    /// Return a new term with `literal` removed (no-op if absent)
    pub fn without_literal(&self, literal: &Literal) -> Term {
        if !self.contains(literal) {
            return self.clone();
        }
        let literals: Vec<Literal> = self
            .literals
            .iter()
            .filter(|l| *l != literal)
            .copied()
            .collect();
        Term {
            literals: literals.into(),
        }
    }

    /// Whether every literal of this term is present in `other`
    ///
    /// An empty term covers nothing.
    pub fn covers(&self, other: &Term) -> bool {
        if self.is_empty() {
            return false;
        }
        self.literals.iter().all(|literal| other.contains(literal))
    }

    /// Cube membership: whether `minterm` lies inside this term
    ///
    /// Identical to [`Term::covers`] except that the universal term matches
    /// every minterm.
    pub fn matches(&self, minterm: &Term) -> bool {
        self.is_empty() || self.covers(minterm)
    }

    /// Whether this term fixes every variable in `[0, n_variables)` and nothing else
    pub fn is_minterm(&self, n_variables: usize) -> bool {
        self.literals.len() == n_variables
            && self
                .literals
                .iter()
                .enumerate()
                .all(|(i, l)| l.variable() == i)
    }

    /// Number of literals of this term that `minterm` does not contain
    ///
    /// Zero means the minterm lies inside the cube.
    pub fn distance(&self, minterm: &Term) -> usize {
        self.literals
            .iter()
            .filter(|literal| !minterm.contains(literal))
            .count()
    }

    /// Render the term using variable names from `labels`
    pub fn display_with<'a>(&'a self, labels: &'a VariableLabels) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            labels: Some(labels),
        }
    }
}

impl Default for Term {
    fn default() -> Self {
        Term::universal()
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TermDisplay {
            term: self,
            labels: None,
        }
        .fmt(f)
    }
}

impl FromIterator<Literal> for Term {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Term::from_literals(iter)
    }
}

impl<'a> IntoIterator for &'a Term {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

/// Display adapter returned by [`Term::display_with`]
pub struct TermDisplay<'a> {
    term: &'a Term,
    labels: Option<&'a VariableLabels>,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.term.is_empty() {
            return write!(f, "1");
        }
        for (i, literal) in self.term.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            if !literal.is_normal() {
                write!(f, "~")?;
            }
            match self.labels.and_then(|l| l.get(literal.variable())) {
                Some(name) => write!(f, "{}", name)?,
                None => write!(f, "x{}", literal.variable())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
