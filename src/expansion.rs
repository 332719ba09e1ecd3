//! Implicant Expansion (IE)
//!
//! Each implicant found by the search is shrunk into a prime implicant. The
//! work-list holds one lineage per seed: at every step the literals whose
//! removal keeps the term off the offset are scored, one is removed through
//! the shared tie-break, and the smaller term is queued again. A term with no
//! removable literal is prime.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{trace, warn};

use crate::budget::NodeBudget;
use crate::error::{MinimizeError, Stage};
use crate::strategy::{select_best, ScoringStrategy};
use crate::term::{DataSet, Literal, Term, TermSet};

/// Literals of `term` whose removal leaves a term that avoids the offset
pub fn removal_candidates(term: &Term, offset: &DataSet) -> Vec<Literal> {
    term.iter()
        .filter(|literal| !offset.intersected_by(&term.without_literal(literal)))
        .copied()
        .collect()
}

/// Whether `term` avoids the offset and no literal can be removed safely
pub fn is_prime(term: &Term, offset: &DataSet) -> bool {
    !offset.intersected_by(term) && removal_candidates(term, offset).is_empty()
}

/// Expand every implicant into a prime implicant
///
/// # Errors
///
/// - [`MinimizeError::UnsafeImplicant`] if an input term already intersects
///   the offset
/// - [`MinimizeError::NoCandidates`] if the strategy scores none of the safe
///   removal candidates
/// - [`MinimizeError::BudgetExhausted`] if `node_budget` work-list pops are
///   not enough
pub fn expand<S, R>(
    offset: &DataSet,
    implicants: &TermSet,
    strategy: &S,
    rng: &mut R,
    node_budget: Option<usize>,
) -> Result<TermSet, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
    R: Rng + ?Sized,
{
    let mut budget = NodeBudget::new(Stage::Expansion, node_budget);
    let mut primes = TermSet::new();
    let mut worklist: VecDeque<Term> = VecDeque::with_capacity(implicants.len());

    for implicant in implicants {
        if offset.intersected_by(implicant) {
            warn!(term = %implicant, "input term intersects the offset");
            return Err(MinimizeError::UnsafeImplicant {
                term: implicant.clone(),
            });
        }
        worklist.push_back(implicant.clone());
    }

    while let Some(term) = worklist.pop_front() {
        budget.spend(&primes)?;

        let candidates = removal_candidates(&term, offset);
        if candidates.is_empty() {
            trace!(prime = %term, "no removable literal");
            primes.insert(term);
            continue;
        }

        let mut scored = strategy.score_removal(&term, &candidates, offset);
        scored.retain(|(literal, _)| candidates.contains(literal));
        let literal = select_best(&scored, rng).ok_or_else(|| MinimizeError::NoCandidates {
            stage: Stage::Expansion,
            term: term.clone(),
        })?;
        worklist.push_back(term.without_literal(&literal));
    }

    Ok(primes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::LiteralFrequency;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn set(terms: Vec<Term>) -> TermSet {
        terms.into_iter().collect()
    }

    #[test]
    fn test_shrinks_minterm_to_prime() {
        // f = x0 over two variables
        let offset = DataSet::from_rows(2, &[[false, false], [false, true]]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let primes = expand(
            &offset,
            &set(vec![Term::from_bits(&[true, true]), Term::from_bits(&[true, false])]),
            &LiteralFrequency,
            &mut rng,
            None,
        )
        .unwrap();
        assert_eq!(primes, set(vec![Term::from_literals([Literal::normal(0)])]));
    }

    #[test]
    fn test_universal_term_blocks_last_removal() {
        let offset = DataSet::from_rows(1, &[[false]]).unwrap();
        let x0 = Term::from_literals([Literal::normal(0)]);
        assert!(removal_candidates(&x0, &offset).is_empty());
        assert!(is_prime(&x0, &offset));
    }

    #[test]
    fn test_empty_offset_expands_to_universal() {
        let mut rng = StdRng::seed_from_u64(1);
        let primes = expand(
            &DataSet::empty(3),
            &set(vec![Term::from_bits(&[true, false, true])]),
            &LiteralFrequency,
            &mut rng,
            None,
        )
        .unwrap();
        assert_eq!(primes, set(vec![Term::universal()]));
    }

    #[test]
    fn test_results_are_prime_and_safe() {
        // Majority of three
        let mut onset = Vec::new();
        let mut offset = Vec::new();
        for i in 0..8u8 {
            let bits: Vec<bool> = (0..3).map(|b| i >> b & 1 == 1).collect();
            if i.count_ones() >= 2 {
                onset.push(bits);
            } else {
                offset.push(bits);
            }
        }
        let onset = DataSet::from_rows(3, &onset).unwrap();
        let offset = DataSet::from_rows(3, &offset).unwrap();
        let seeds: TermSet = onset.iter().cloned().collect();

        let mut rng = StdRng::seed_from_u64(11);
        let primes = expand(&offset, &seeds, &LiteralFrequency, &mut rng, None).unwrap();
        assert!(!primes.is_empty());
        for prime in &primes {
            assert_eq!(prime.len(), 2);
            assert!(is_prime(prime, &offset));
        }
    }

    #[test]
    fn test_rejects_input_intersecting_offset() {
        let offset = DataSet::from_rows(1, &[[false]]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = expand(
            &offset,
            &set(vec![Term::from_bits(&[false]), Term::from_bits(&[true])]),
            &LiteralFrequency,
            &mut rng,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MinimizeError::UnsafeImplicant {
                term: Term::from_bits(&[false])
            }
        );
    }

    #[test]
    fn test_budget() {
        let offset = DataSet::from_rows(2, &[[false, false]]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err = expand(
            &offset,
            &set(vec![Term::from_bits(&[true, true])]),
            &LiteralFrequency,
            &mut rng,
            Some(1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MinimizeError::BudgetExhausted {
                stage: Stage::Expansion,
                ..
            }
        ));
    }
}
