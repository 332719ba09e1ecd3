//! Distance to the offset after a literal is removed

use super::ScoringStrategy;
use crate::term::{DataSet, Literal, Term};

/// Removal scoring by Manhattan (Hamming) distance
///
/// The score of a removal candidate is the minimum distance between the shrunk
/// term and any offset minterm. Removals that leave the term far from the
/// offset are preferred, which keeps later removals possible. Growth uses
/// [`LiteralFrequency`](super::LiteralFrequency).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManhattanDistance;

impl ManhattanDistance {
    /// Distance scores for implicant expansion
    ///
    /// With an empty offset every candidate scores the size of the shrunk term.
    pub fn removal_scores(
        &self,
        term: &Term,
        candidates: &[Literal],
        offset: &DataSet,
    ) -> Vec<(Literal, f64)> {
        candidates
            .iter()
            .map(|literal| {
                let shrunk = term.without_literal(literal);
                let distance = offset.min_distance(&shrunk).unwrap_or(shrunk.len());
                (*literal, distance as f64)
            })
            .collect()
    }
}

impl ScoringStrategy for ManhattanDistance {
    fn name(&self) -> &str {
        "distance"
    }
}
