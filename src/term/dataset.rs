//! Ordered minterm data sets (onset / offset)

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::Term;
use crate::error::MinimizeError;

/// An ordered list of fully specified minterms over `n_variables` variables
///
/// Construction validates that every element fixes each variable in
/// `[0, n_variables)` exactly once. Data sets are read-only inputs to the
/// pipeline; the filtering operations return new sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSet {
    n_variables: usize,
    minterms: Vec<Term>,
}

/// Minterms dropped by [`DataSet::resolve_conflicts`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    /// Onset rows removed because the offset claims the minterm more strongly
    pub removed_from_onset: Vec<Term>,
    /// Offset rows removed because the onset claims the minterm more strongly
    pub removed_from_offset: Vec<Term>,
}

impl ConflictReport {
    /// Whether no conflicts were found
    pub fn is_empty(&self) -> bool {
        self.removed_from_onset.is_empty() && self.removed_from_offset.is_empty()
    }
}

impl DataSet {
    /// Create a data set, validating that every element is a minterm
    pub fn new(n_variables: usize, minterms: Vec<Term>) -> Result<Self, MinimizeError> {
        if let Some((index, term)) = minterms
            .iter()
            .enumerate()
            .find(|(_, term)| !term.is_minterm(n_variables))
        {
            return Err(MinimizeError::IncompleteMinterm {
                index,
                n_variables,
                term: term.clone(),
            });
        }
        Ok(DataSet {
            n_variables,
            minterms,
        })
    }

    /// Create a data set from rows of truth values
    ///
    /// # Examples
    ///
    /// ```
    /// use boom_logic::DataSet;
    ///
    /// let onset = DataSet::from_rows(2, &[[true, true], [true, false]]).unwrap();
    /// assert_eq!(onset.len(), 2);
    /// ```
    pub fn from_rows<R: AsRef<[bool]>>(
        n_variables: usize,
        rows: &[R],
    ) -> Result<Self, MinimizeError> {
        let mut minterms = Vec::with_capacity(rows.len());
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_variables {
                return Err(MinimizeError::DimensionMismatch {
                    expected: n_variables,
                    actual: row.len(),
                });
            }
            minterms.push(Term::from_bits(row));
        }
        Ok(DataSet {
            n_variables,
            minterms,
        })
    }

    /// An empty data set over `n_variables` variables
    pub fn empty(n_variables: usize) -> Self {
        DataSet {
            n_variables,
            minterms: Vec::new(),
        }
    }

    /// Number of declared variables
    pub fn n_variables(&self) -> usize {
        self.n_variables
    }

    /// Number of minterms
    pub fn len(&self) -> usize {
        self.minterms.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty()
    }

    /// Minterms in their original order
    pub fn minterms(&self) -> &[Term] {
        &self.minterms
    }

    /// Iterate over minterms in order
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.minterms.iter()
    }

    /// Remove, in place, every minterm covered by `term`
    ///
    /// Returns the number of minterms removed.
    pub fn remove_covered_by(&mut self, term: &Term) -> usize {
        let before = self.minterms.len();
        self.minterms.retain(|minterm| !term.covers(minterm));
        before - self.minterms.len()
    }

    /// The minterms not covered by `term`, as a new data set
    pub fn uncovered_by(&self, term: &Term) -> DataSet {
        DataSet {
            n_variables: self.n_variables,
            minterms: self
                .minterms
                .iter()
                .filter(|minterm| !term.covers(minterm))
                .cloned()
                .collect(),
        }
    }

    /// Minterms lying inside the cube `term` (all of them for the universal term)
    pub fn matched_by<'a>(&'a self, term: &'a Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.minterms.iter().filter(move |minterm| term.matches(minterm))
    }

    /// Offset safety test: whether the cube `term` contains any minterm of this set
    ///
    /// The universal term intersects every non-empty set.
    pub fn intersected_by(&self, term: &Term) -> bool {
        if term.is_universal() {
            return !self.minterms.is_empty();
        }
        self.minterms.iter().any(|minterm| term.covers(minterm))
    }

    /// Minimum distance between `term` and any minterm of this set
    ///
    /// Returns `None` for an empty set.
    pub fn min_distance(&self, term: &Term) -> Option<usize> {
        self.minterms.iter().map(|minterm| term.distance(minterm)).min()
    }

    /// First minterm of this set that also appears in `other`
    pub fn first_shared_minterm(&self, other: &DataSet) -> Option<&Term> {
        let others: HashSet<&Term> = other.minterms.iter().collect();
        self.minterms.iter().find(|minterm| others.contains(minterm))
    }

    /// Check that onset and offset share a variable range and no minterm
    pub fn check_disjoint(onset: &DataSet, offset: &DataSet) -> Result<(), MinimizeError> {
        if onset.n_variables != offset.n_variables {
            return Err(MinimizeError::DimensionMismatch {
                expected: onset.n_variables,
                actual: offset.n_variables,
            });
        }
        match onset.first_shared_minterm(offset) {
            Some(minterm) => Err(MinimizeError::OverlappingSets {
                minterm: minterm.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Resolve minterms present in both the onset and the offset
    ///
    /// A conflicting minterm stays only in the set where it makes up the larger
    /// share of rows; on a tie it is removed from both. Returns the cleaned
    /// onset and offset together with what was dropped.
    pub fn resolve_conflicts(
        onset: &DataSet,
        offset: &DataSet,
    ) -> Result<(DataSet, DataSet, ConflictReport), MinimizeError> {
        if onset.n_variables != offset.n_variables {
            return Err(MinimizeError::DimensionMismatch {
                expected: onset.n_variables,
                actual: offset.n_variables,
            });
        }

        let onset_counts = occurrences(&onset.minterms);
        let offset_counts = occurrences(&offset.minterms);
        let on_total = onset.len();
        let off_total = offset.len();

        let mut drop_from_onset: HashSet<&Term> = HashSet::new();
        let mut drop_from_offset: HashSet<&Term> = HashSet::new();
        for (minterm, &on_count) in &onset_counts {
            let Some(&off_count) = offset_counts.get(minterm) else {
                continue;
            };
            // on_count/on_total vs off_count/off_total without division
            let on_share = on_count * off_total;
            let off_share = off_count * on_total;
            if on_share >= off_share {
                drop_from_offset.insert(minterm);
            }
            if off_share >= on_share {
                drop_from_onset.insert(minterm);
            }
        }

        let mut report = ConflictReport::default();
        let clean_onset = split_rows(onset, &drop_from_onset, &mut report.removed_from_onset);
        let clean_offset = split_rows(offset, &drop_from_offset, &mut report.removed_from_offset);

        if !report.removed_from_onset.is_empty() {
            warn!(
                removed = report.removed_from_onset.len(),
                "removed conflicting minterms from the onset"
            );
        }
        if !report.removed_from_offset.is_empty() {
            warn!(
                removed = report.removed_from_offset.len(),
                "removed conflicting minterms from the offset"
            );
        }
        Ok((clean_onset, clean_offset, report))
    }
}

fn occurrences(minterms: &[Term]) -> HashMap<&Term, usize> {
    let mut counts = HashMap::new();
    for minterm in minterms {
        *counts.entry(minterm).or_insert(0) += 1;
    }
    counts
}

fn split_rows(set: &DataSet, drop: &HashSet<&Term>, removed: &mut Vec<Term>) -> DataSet {
    let mut kept = Vec::with_capacity(set.len());
    for minterm in &set.minterms {
        if drop.contains(minterm) {
            removed.push(minterm.clone());
        } else {
            kept.push(minterm.clone());
        }
    }
    DataSet {
        n_variables: set.n_variables,
        minterms: kept,
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.minterms.iter()
    }
}
