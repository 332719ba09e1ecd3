//! Coverage-Directed Search (CDS)
//!
//! One search pass covers the onset with implicants. A FIFO work-list holds
//! onset remainders; each popped remainder grows one implicant from the
//! universal term, literal by literal, until the term no longer intersects the
//! offset. The minterms the implicant covers are dropped and the rest is
//! queued as a new branch. The pass deliberately over-covers: overlapping
//! implicants are left for the covering stage to sort out.

use std::collections::VecDeque;

use rand::Rng;
use tracing::trace;

use crate::budget::NodeBudget;
use crate::error::{MinimizeError, Stage};
use crate::strategy::{select_best, ScoringStrategy};
use crate::term::{DataSet, Term, TermSet};

/// Run a single randomized search pass
///
/// Every returned implicant avoids the offset, and together they cover every
/// onset minterm. An empty onset yields an empty set.
///
/// # Errors
///
/// - [`MinimizeError::NoCandidates`] if a term still intersects the offset but
///   no literal can be added, which means onset and offset overlap
/// - [`MinimizeError::BudgetExhausted`] if `node_budget` work-list pops are
///   not enough
pub fn search_once<S, R>(
    onset: &DataSet,
    offset: &DataSet,
    strategy: &S,
    rng: &mut R,
    node_budget: Option<usize>,
) -> Result<TermSet, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
    R: Rng + ?Sized,
{
    let mut budget = NodeBudget::new(Stage::Search, node_budget);
    let mut implicants = TermSet::new();
    let mut worklist = VecDeque::from([onset.clone()]);

    while let Some(remainder) = worklist.pop_front() {
        budget.spend(&implicants)?;
        if remainder.is_empty() {
            continue;
        }

        let implicant = grow_implicant(&remainder, offset, strategy, rng)?;
        let rest = if implicant.is_universal() {
            DataSet::empty(remainder.n_variables())
        } else {
            remainder.uncovered_by(&implicant)
        };
        if rest.len() == remainder.len() {
            // Only a strategy offering literals outside the remainder gets here
            return Err(MinimizeError::NoCandidates {
                stage: Stage::Search,
                term: implicant,
            });
        }

        trace!(
            implicant = %implicant,
            covered = remainder.len() - rest.len(),
            remaining = rest.len(),
            "found implicant"
        );
        implicants.insert(implicant);
        worklist.push_back(rest);
    }

    trace!(implicants = implicants.len(), nodes = budget.spent(), "search pass finished");
    Ok(implicants)
}

/// Grow one offset-safe term for `remainder`, starting from the universal term
pub fn grow_implicant<S, R>(
    remainder: &DataSet,
    offset: &DataSet,
    strategy: &S,
    rng: &mut R,
) -> Result<Term, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
    R: Rng + ?Sized,
{
    let mut term = Term::universal();
    while offset.intersected_by(&term) {
        let mut scored = strategy.score_growth(&term, remainder);
        scored.retain(|(literal, _)| !term.fixes(literal.variable()));
        let literal = select_best(&scored, rng).ok_or_else(|| MinimizeError::NoCandidates {
            stage: Stage::Search,
            term: term.clone(),
        })?;
        term = term.with_literal(literal);
    }
    Ok(term)
}
