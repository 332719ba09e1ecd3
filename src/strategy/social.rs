//! CARE social scoring: centrality blended with literal frequency

use tracing::debug;

use super::{rescale, round_to_resolution, LiteralFrequency, ScoringStrategy};
use crate::error::MinimizeError;
use crate::graph::{Centrality, Graph, IdSequence, DEFAULT_DENSITY_CAP};
use crate::term::{DataSet, Literal, Term};

/// Growth scoring that mixes a per-variable social score into literal frequency
///
/// The blended score of a candidate literal is
/// `α * social(variable) + (1 - α) * frequency`, where frequency is the
/// [`LiteralFrequency`] count rescaled to `[0, 1]` over the current candidates.
/// Blended scores are rounded to `resolution`, so literals with nearly equal
/// scores tie and are drawn at random. Removal scoring is the default
/// Manhattan distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Social {
    interactivity: f64,
    resolution: f64,
    scores: Vec<f64>,
}

impl Social {
    /// Rounding applied to blended scores unless configured otherwise
    pub const DEFAULT_RESOLUTION: f64 = 1e-5;

    /// Compute social scores from the onset and offset co-occurrence graphs
    ///
    /// The social score of a variable is the onset centrality minus the offset
    /// centrality, rescaled to `[0, 1]`.
    pub fn new(
        onset: &DataSet,
        offset: &DataSet,
        interactivity: f64,
        centrality: Centrality,
        resolution: f64,
    ) -> Result<Self, MinimizeError> {
        validate(interactivity, resolution)?;
        if let Centrality::Blend(weight) = centrality {
            if !(0.0..=1.0).contains(&weight) {
                return Err(MinimizeError::InvalidBlendWeight { value: weight });
            }
        }
        if onset.n_variables() != offset.n_variables() {
            return Err(MinimizeError::DimensionMismatch {
                expected: onset.n_variables(),
                actual: offset.n_variables(),
            });
        }

        let mut ids = IdSequence::new();
        let onset_graph = Graph::from_data_set(onset, Some(DEFAULT_DENSITY_CAP), &mut ids);
        let offset_graph = Graph::from_data_set(offset, Some(DEFAULT_DENSITY_CAP), &mut ids);
        let on = centrality.scores(&onset_graph);
        let off = centrality.scores(&offset_graph);
        let overall: Vec<f64> = on.iter().zip(&off).map(|(a, b)| a - b).collect();

        debug!(
            %centrality,
            onset_edges = onset_graph.edge_count(),
            offset_edges = offset_graph.edge_count(),
            "computed social scores"
        );

        Ok(Social {
            interactivity,
            resolution,
            scores: rescale(&overall),
        })
    }

    /// Use precomputed per-variable social scores
    ///
    /// Variables beyond the end of `scores` score zero.
    pub fn from_scores(
        scores: Vec<f64>,
        interactivity: f64,
        resolution: f64,
    ) -> Result<Self, MinimizeError> {
        validate(interactivity, resolution)?;
        Ok(Social {
            interactivity,
            resolution,
            scores,
        })
    }

    /// Weight of the social score in the blend
    pub fn interactivity(&self) -> f64 {
        self.interactivity
    }

    /// Rounding resolution of blended scores
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Social score of `variable`
    pub fn social_score(&self, variable: usize) -> f64 {
        self.scores.get(variable).copied().unwrap_or(0.0)
    }

    /// Per-variable social scores
    pub fn social_scores(&self) -> &[f64] {
        &self.scores
    }
}

fn validate(interactivity: f64, resolution: f64) -> Result<(), MinimizeError> {
    if !(0.0..=1.0).contains(&interactivity) {
        return Err(MinimizeError::InvalidInteractivity {
            value: interactivity,
        });
    }
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(MinimizeError::InvalidResolution { value: resolution });
    }
    Ok(())
}

impl ScoringStrategy for Social {
    fn score_growth(&self, term: &Term, remainder: &DataSet) -> Vec<(Literal, f64)> {
        let counts = LiteralFrequency.counts(term, remainder);
        let raw: Vec<f64> = counts.values().map(|&c| c as f64).collect();
        let frequency = rescale(&raw);
        counts
            .keys()
            .zip(frequency)
            .map(|(literal, freq)| {
                let blended = self.interactivity * self.social_score(literal.variable())
                    + (1.0 - self.interactivity) * freq;
                (*literal, round_to_resolution(blended, self.resolution))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "social"
    }
}
