//! Literal frequency over the uncovered onset

use std::collections::BTreeMap;

use super::ScoringStrategy;
use crate::term::{DataSet, Literal, Term};

/// Plain BOOM scoring
///
/// The growth score of a literal is the number of remainder minterms still
/// inside the partial term that contain it. Literals that no such minterm
/// contains are not offered, so every grown term keeps covering part of the
/// remainder. Removal uses [`ManhattanDistance`](super::ManhattanDistance).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralFrequency;

impl LiteralFrequency {
    /// Raw occurrence counts of candidate literals, ordered by literal
    pub fn counts(&self, term: &Term, remainder: &DataSet) -> BTreeMap<Literal, usize> {
        let mut counts = BTreeMap::new();
        for minterm in remainder.matched_by(term) {
            for literal in minterm.iter() {
                if !term.fixes(literal.variable()) {
                    *counts.entry(*literal).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Frequency scores for coverage-directed search
    pub fn growth_scores(&self, term: &Term, remainder: &DataSet) -> Vec<(Literal, f64)> {
        self.counts(term, remainder)
            .into_iter()
            .map(|(literal, count)| (literal, count as f64))
            .collect()
    }
}

impl ScoringStrategy for LiteralFrequency {
    fn name(&self) -> &str {
        "frequency"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_over_reachable_minterms() {
        let remainder =
            DataSet::from_rows(2, &[[true, true], [true, false], [false, false]]).unwrap();
        let scores = LiteralFrequency.growth_scores(&Term::universal(), &remainder);
        assert_eq!(
            scores,
            vec![
                (Literal::complement(0), 1.0),
                (Literal::normal(0), 2.0),
                (Literal::complement(1), 2.0),
                (Literal::normal(1), 1.0),
            ]
        );

        // Once x0 is fixed only x1 literals of minterms inside x0 are offered
        let term = Term::universal().with_literal(Literal::normal(0));
        let scores = LiteralFrequency.growth_scores(&term, &remainder);
        assert_eq!(
            scores,
            vec![(Literal::complement(1), 1.0), (Literal::normal(1), 1.0)]
        );
    }

    #[test]
    fn test_no_candidates_for_full_term() {
        let remainder = DataSet::from_rows(2, &[[true, true]]).unwrap();
        let term = Term::from_bits(&[true, true]);
        assert!(LiteralFrequency.growth_scores(&term, &remainder).is_empty());
    }

    #[test]
    fn test_default_hooks() {
        let offset = DataSet::from_rows(2, &[[false, false]]).unwrap();
        let term = Term::from_bits(&[true, true]);
        let candidates = [Literal::normal(0), Literal::normal(1)];
        let scores = LiteralFrequency.score_removal(&term, &candidates, &offset);
        assert_eq!(scores.len(), 2);
        assert_eq!(LiteralFrequency.name(), "frequency");
    }
}
