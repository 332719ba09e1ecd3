//! Candidate scoring for search and expansion
//!
//! Both randomized stages ask a [`ScoringStrategy`] to score their candidates
//! and then pick one through [`select_best`]: keep every candidate at the
//! maximum score and draw one of them uniformly from the injected random
//! source. The draw is the search's exploration mechanism; a fixed seed makes
//! it reproducible.
//!
//! Strategies:
//! - [`LiteralFrequency`]: plain BOOM (frequency for growth, distance for removal)
//! - [`Social`]: CARE, blending graph centrality into the growth score

mod distance;
mod frequency;
mod social;

pub use distance::ManhattanDistance;
pub use frequency::LiteralFrequency;
pub use social::Social;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::term::{DataSet, Literal, Term};

/// Scores candidate literals for the randomized pipeline stages
///
/// Implementations must be stateless over their inputs: any precomputation
/// (for example centrality over the onset/offset graphs) happens once at
/// construction. The trait is `Send + Sync` so one strategy can be shared by
/// parallel search iterations.
pub trait ScoringStrategy: Send + Sync {
    /// Score literals that may be added to `term` during coverage-directed search
    ///
    /// `remainder` is the branch's still-uncovered onset. Only literals of
    /// variables not fixed in `term` may be returned. An empty result while
    /// `term` still intersects the offset is a precondition violation.
    fn score_growth(&self, term: &Term, remainder: &DataSet) -> Vec<(Literal, f64)> {
        LiteralFrequency.growth_scores(term, remainder)
    }

    /// Score removal candidates during implicant expansion
    ///
    /// Every literal of `candidates` is present in `term` and its removal
    /// keeps the term offset-safe. Higher scores are preferred.
    fn score_removal(
        &self,
        term: &Term,
        candidates: &[Literal],
        offset: &DataSet,
    ) -> Vec<(Literal, f64)> {
        ManhattanDistance.removal_scores(term, candidates, offset)
    }

    /// Short name for logs and reports
    fn name(&self) -> &str;
}

impl<S: ScoringStrategy + ?Sized> ScoringStrategy for &S {
    fn score_growth(&self, term: &Term, remainder: &DataSet) -> Vec<(Literal, f64)> {
        (**self).score_growth(term, remainder)
    }

    fn score_removal(
        &self,
        term: &Term,
        candidates: &[Literal],
        offset: &DataSet,
    ) -> Vec<(Literal, f64)> {
        (**self).score_removal(term, candidates, offset)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: ScoringStrategy + ?Sized> ScoringStrategy for Box<S> {
    fn score_growth(&self, term: &Term, remainder: &DataSet) -> Vec<(Literal, f64)> {
        (**self).score_growth(term, remainder)
    }

    fn score_removal(
        &self,
        term: &Term,
        candidates: &[Literal],
        offset: &DataSet,
    ) -> Vec<(Literal, f64)> {
        (**self).score_removal(term, candidates, offset)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Shared tie-break: pick uniformly among the maximum-scoring candidates
///
/// Non-finite scores are never selected. Returns `None` when no candidate has
/// a finite score.
///
/// # Examples
///
/// ```
/// use boom_logic::strategy::select_best;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let scored = vec![('a', 1.0), ('b', 3.0), ('c', 2.0)];
/// assert_eq!(select_best(&scored, &mut rng), Some('b'));
/// ```
pub fn select_best<T, R>(scored: &[(T, f64)], rng: &mut R) -> Option<T>
where
    T: Clone + std::fmt::Debug,
    R: Rng + ?Sized,
{
    let max = scored
        .iter()
        .map(|(_, score)| *score)
        .filter(|score| score.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return None;
    }

    let ties: Vec<&T> = scored
        .iter()
        .filter(|(_, score)| *score == max)
        .map(|(candidate, _)| candidate)
        .collect();
    if ties.len() > 1 {
        trace!(score = max, ties = ?ties, "breaking tie at random");
    }
    ties.choose(rng).map(|candidate| (*candidate).clone())
}

/// Min-max normalization into `[0, 1]`
///
/// When every value is equal the result is all zeros.
pub fn rescale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() || min == max {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Round `value` to the nearest multiple of `resolution`
pub fn round_to_resolution(value: f64, resolution: f64) -> f64 {
    (value / resolution).round() * resolution
}
