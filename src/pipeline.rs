//! Pipeline driver: search, expansion, covering
//!
//! The free functions mirror the three stages and their composition. They take
//! the random source explicitly; with a seeded generator every run over the
//! same inputs gives the same result.
//!
//! [`Minimizer`] bundles a strategy with a [`MinimizerConfig`] and adds input
//! validation, work budgets and parallel search iterations.
//!
//! Every search iteration draws its own 64-bit seed from the caller's random
//! source before any work starts, runs on a private generator, and results are
//! merged in iteration order. The outcome is therefore the same for any number
//! of worker threads, and the implicant set only grows with more iterations.

use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::covering;
use crate::error::MinimizeError;
use crate::expansion;
use crate::search;
use crate::strategy::ScoringStrategy;
use crate::term::{DataSet, TermSet};
use crate::MinimizerConfig;

/// Coverage-directed search repeated `iterations` times, results unioned
///
/// # Errors
///
/// [`MinimizeError::DimensionMismatch`] if onset and offset disagree on the
/// number of variables, [`MinimizeError::NoCandidates`] if they overlap.
pub fn run_cds<S, R>(
    onset: &DataSet,
    offset: &DataSet,
    strategy: &S,
    iterations: usize,
    rng: &mut R,
) -> Result<TermSet, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
    R: Rng + ?Sized,
{
    check_dimensions(onset, offset)?;
    let seeds = draw_seeds(iterations, rng);
    search_iterations(onset, offset, strategy, &seeds, 1, None)
}

/// Expand implicants into prime implicants
pub fn run_ie<S, R>(
    offset: &DataSet,
    implicants: &TermSet,
    strategy: &S,
    rng: &mut R,
) -> Result<TermSet, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
    R: Rng + ?Sized,
{
    expansion::expand(offset, implicants, strategy, rng, None)
}

/// Select a cover of the onset from prime implicants
pub fn run_ucp<R>(
    onset: &DataSet,
    primes: &TermSet,
    rng: &mut R,
) -> Result<TermSet, MinimizeError>
where
    R: Rng + ?Sized,
{
    covering::cover(onset, primes, rng, None)
}

/// Full pipeline: `run_ucp(onset, run_ie(offset, run_cds(...)))`
///
/// Onset and offset are checked for disjointness first.
///
/// # Examples
///
/// ```
/// use boom_logic::{run_pipeline, DataSet, Literal, LiteralFrequency, Term};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let onset = DataSet::from_rows(2, &[[true, true], [true, false]]).unwrap();
/// let offset = DataSet::from_rows(2, &[[false, false], [false, true]]).unwrap();
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let cover = run_pipeline(&onset, &offset, &LiteralFrequency, 2, &mut rng).unwrap();
/// assert_eq!(cover.len(), 1);
/// assert!(cover.contains(&Term::from_literals([Literal::normal(0)])));
/// ```
pub fn run_pipeline<S, R>(
    onset: &DataSet,
    offset: &DataSet,
    strategy: &S,
    iterations: usize,
    rng: &mut R,
) -> Result<TermSet, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
    R: Rng + ?Sized,
{
    DataSet::check_disjoint(onset, offset)?;
    let implicants = run_cds(onset, offset, strategy, iterations, rng)?;
    let primes = run_ie(offset, &implicants, strategy, rng)?;
    run_ucp(onset, &primes, rng)
}

/// Result sets of every pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    /// Implicants found by coverage-directed search
    pub implicants: TermSet,
    /// Prime implicants produced by expansion
    pub prime_implicants: TermSet,
    /// Selected cover
    pub cover: TermSet,
}

impl Solution {
    /// Whether the cover contains every onset minterm and no offset minterm
    pub fn verify(&self, onset: &DataSet, offset: &DataSet) -> bool {
        onset.iter().all(|minterm| self.cover.matches(minterm))
            && self.cover.iter().all(|term| !offset.intersected_by(term))
    }
}

/// A configured minimizer
///
/// # Examples
///
/// ```
/// use boom_logic::{DataSet, LiteralFrequency, Minimizer, MinimizerConfig};
///
/// let onset = DataSet::from_rows(3, &[[true, true, false], [true, true, true]]).unwrap();
/// let offset = DataSet::from_rows(3, &[[false, true, true], [true, false, true]]).unwrap();
///
/// let config = MinimizerConfig {
///     iterations: 4,
///     seed: Some(7),
///     ..MinimizerConfig::default()
/// };
/// let solution = Minimizer::with_config(LiteralFrequency, config)
///     .minimize(&onset, &offset)
///     .unwrap();
/// assert!(solution.verify(&onset, &offset));
/// ```
#[derive(Debug, Clone)]
pub struct Minimizer<S> {
    strategy: S,
    config: MinimizerConfig,
}

impl<S: ScoringStrategy> Minimizer<S> {
    /// Minimizer with the default configuration
    pub fn new(strategy: S) -> Self {
        Self::with_config(strategy, MinimizerConfig::default())
    }

    /// Minimizer with an explicit configuration
    pub fn with_config(strategy: S, config: MinimizerConfig) -> Self {
        Minimizer { strategy, config }
    }

    /// The scoring strategy
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The configuration
    pub fn config(&self) -> &MinimizerConfig {
        &self.config
    }

    /// Run the pipeline with a generator seeded from the configuration
    ///
    /// Without a configured seed the generator is seeded from system entropy.
    pub fn minimize(&self, onset: &DataSet, offset: &DataSet) -> Result<Solution, MinimizeError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.minimize_with_rng(onset, offset, &mut rng)
    }

    /// Run the pipeline with an explicit random source
    pub fn minimize_with_rng<R: Rng + ?Sized>(
        &self,
        onset: &DataSet,
        offset: &DataSet,
        rng: &mut R,
    ) -> Result<Solution, MinimizeError> {
        if self.config.validate {
            DataSet::check_disjoint(onset, offset)?;
        } else {
            check_dimensions(onset, offset)?;
        }
        debug!(
            strategy = self.strategy.name(),
            variables = onset.n_variables(),
            onset = onset.len(),
            offset = offset.len(),
            iterations = self.config.iterations,
            threads = self.config.threads,
            "starting minimization"
        );

        let seeds = draw_seeds(self.config.iterations, rng);
        let implicants = search_iterations(
            onset,
            offset,
            &self.strategy,
            &seeds,
            self.config.threads,
            self.config.node_budget,
        )?;
        debug!(implicants = implicants.len(), "coverage-directed search finished");

        let prime_implicants = expansion::expand(
            offset,
            &implicants,
            &self.strategy,
            rng,
            self.config.node_budget,
        )?;
        debug!(primes = prime_implicants.len(), "implicant expansion finished");

        let cover = covering::cover(onset, &prime_implicants, rng, self.config.node_budget)?;
        debug!(
            cover = cover.len(),
            literals = cover.literal_count(),
            "minimization finished"
        );

        Ok(Solution {
            implicants,
            prime_implicants,
            cover,
        })
    }
}

fn check_dimensions(onset: &DataSet, offset: &DataSet) -> Result<(), MinimizeError> {
    if onset.n_variables() != offset.n_variables() {
        return Err(MinimizeError::DimensionMismatch {
            expected: onset.n_variables(),
            actual: offset.n_variables(),
        });
    }
    Ok(())
}

fn draw_seeds<R: Rng + ?Sized>(iterations: usize, rng: &mut R) -> Vec<u64> {
    (0..iterations).map(|_| rng.gen()).collect()
}

/// One search pass per seed, on up to `threads` scoped workers
fn search_iterations<S>(
    onset: &DataSet,
    offset: &DataSet,
    strategy: &S,
    seeds: &[u64],
    threads: usize,
    node_budget: Option<usize>,
) -> Result<TermSet, MinimizeError>
where
    S: ScoringStrategy + ?Sized,
{
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        search::search_once(onset, offset, strategy, &mut rng, node_budget)
    };

    if threads <= 1 || seeds.len() <= 1 {
        return merge_in_order(seeds.iter().map(|&seed| run(seed)));
    }

    let chunk_size = (seeds.len() + threads - 1) / threads;
    let results: Vec<Result<TermSet, MinimizeError>> = thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || chunk.iter().map(|&seed| run(seed)).collect::<Vec<_>>())
            })
            .collect();
        let mut results = Vec::with_capacity(seeds.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        results
    });
    merge_in_order(results)
}

/// Union iteration results in order, stopping at the first failure
///
/// A budget failure carries everything merged so far plus the failing
/// iteration's partial set.
fn merge_in_order<I>(results: I) -> Result<TermSet, MinimizeError>
where
    I: IntoIterator<Item = Result<TermSet, MinimizeError>>,
{
    let mut implicants = TermSet::new();
    for result in results {
        match result {
            Ok(found) => implicants.extend(found),
            Err(MinimizeError::BudgetExhausted {
                stage,
                budget,
                partial,
            }) => {
                implicants.extend(partial);
                return Err(MinimizeError::BudgetExhausted {
                    stage,
                    budget,
                    partial: implicants,
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(implicants)
}
