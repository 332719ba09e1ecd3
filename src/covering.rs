//! Unate covering (UCP)
//!
//! Picks a small subset of prime implicants that still covers the onset,
//! using the least-covered / most-covering greedy rule of Fišer & Hlávička:
//!
//! 1. Tally, for each prime, the uncovered minterms that only it covers, and
//!    keep the primes with the highest tally.
//! 2. Among those, prefer the prime covering the most uncovered minterms;
//!    remaining ties go to the shared random tie-break.
//!
//! The winner joins the cover, its minterms leave the matrix, and the loop
//! repeats. A final pass in reverse selection order drops any chosen prime
//! whose minterms are all covered by the others.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, trace};

use crate::budget::NodeBudget;
use crate::error::{MinimizeError, Stage};
use crate::strategy::select_best;
use crate::term::{DataSet, Term, TermSet};

/// Rows are distinct onset minterms, entries are the indices of covering primes
struct CoverMatrix<'a> {
    primes: Vec<&'a Term>,
    rows: Vec<Vec<usize>>,
}

impl<'a> CoverMatrix<'a> {
    fn build(onset: &DataSet, primes: &'a TermSet) -> Result<Self, MinimizeError> {
        let primes: Vec<&Term> = primes.iter().collect();
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(onset.len());
        for minterm in onset {
            if !seen.insert(minterm) {
                continue;
            }
            let covering: Vec<usize> = primes
                .iter()
                .enumerate()
                .filter(|(_, prime)| prime.matches(minterm))
                .map(|(j, _)| j)
                .collect();
            if covering.is_empty() {
                return Err(MinimizeError::UncoverableMinterm {
                    minterm: minterm.clone(),
                });
            }
            rows.push(covering);
        }
        Ok(CoverMatrix { primes, rows })
    }

    /// Prime index chosen for the next cover slot
    fn next_choice<R: Rng + ?Sized>(&self, uncovered: &[usize], rng: &mut R) -> Option<usize> {
        let n = self.primes.len();
        let mut unique = vec![0usize; n];
        let mut coverage = vec![0usize; n];
        for &row in uncovered {
            let covering = &self.rows[row];
            if let [only] = covering.as_slice() {
                unique[*only] += 1;
            }
            for &j in covering {
                coverage[j] += 1;
            }
        }

        let best_unique = unique.iter().copied().max().unwrap_or(0);
        let scored: Vec<(usize, f64)> = (0..n)
            .filter(|&j| unique[j] == best_unique && coverage[j] > 0)
            .map(|j| (j, coverage[j] as f64))
            .collect();
        select_best(&scored, rng)
    }
}

/// Select a cover of the onset from `primes`
///
/// # Errors
///
/// - [`MinimizeError::UncoverableMinterm`] if some onset minterm lies in no
///   prime implicant
/// - [`MinimizeError::BudgetExhausted`] if more than `node_budget` selections
///   are needed
pub fn cover<R: Rng + ?Sized>(
    onset: &DataSet,
    primes: &TermSet,
    rng: &mut R,
    node_budget: Option<usize>,
) -> Result<TermSet, MinimizeError> {
    let matrix = CoverMatrix::build(onset, primes)?;
    let mut budget = NodeBudget::new(Stage::Covering, node_budget);
    let mut uncovered: Vec<usize> = (0..matrix.rows.len()).collect();
    let mut selected: Vec<usize> = Vec::new();
    let mut partial = TermSet::new();

    while !uncovered.is_empty() {
        budget.spend(&partial)?;
        let Some(choice) = matrix.next_choice(&uncovered, rng) else {
            // Every row has at least one covering prime, so this is unreachable
            // for a matrix built by `CoverMatrix::build`.
            break;
        };
        uncovered.retain(|&row| !matrix.rows[row].contains(&choice));
        trace!(prime = %matrix.primes[choice], remaining = uncovered.len(), "selected");
        selected.push(choice);
        partial.insert(matrix.primes[choice].clone());
    }

    let kept = irredundant(&matrix, &selected);
    debug!(
        selected = selected.len(),
        redundant = selected.len() - kept.len(),
        nodes = budget.spent(),
        "unate covering finished"
    );
    Ok(kept
        .into_iter()
        .map(|j| matrix.primes[j].clone())
        .collect())
}

/// Drop selections whose rows are all covered by other kept selections
fn irredundant(matrix: &CoverMatrix<'_>, selected: &[usize]) -> Vec<usize> {
    let mut kept: Vec<usize> = selected.to_vec();
    for &candidate in selected.iter().rev() {
        let others: Vec<usize> = kept.iter().copied().filter(|&j| j != candidate).collect();
        let redundant = matrix
            .rows
            .iter()
            .filter(|covering| covering.contains(&candidate))
            .all(|covering| covering.iter().any(|j| others.contains(j)));
        if redundant {
            kept = others;
        }
    }
    kept
}
