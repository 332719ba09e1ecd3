//! # BOOM Logic Minimizer
//!
//! This crate implements heuristic two-level Boolean minimization in the style
//! of BOOM (Fišer & Hlávička) and its CARE variant.
//!
//! ## Overview
//!
//! Given an explicit onset (input combinations where a function is true) and
//! offset (combinations where it is false), the minimizer produces a small set
//! of product terms whose union contains every onset minterm and no offset
//! minterm. Instead of exact enumeration it uses a randomized greedy search:
//!
//! 1. **Coverage-Directed Search** ([`search`]) grows implicants literal by
//!    literal until they avoid the offset, until the whole onset is covered.
//! 2. **Implicant Expansion** ([`expansion`]) removes literals while the term
//!    stays off the offset, producing prime implicants.
//! 3. **Unate Covering** ([`covering`]) selects an irredundant cover from the
//!    prime implicants.
//!
//! Literal choices in the first two stages are made by a pluggable
//! [`ScoringStrategy`]; ties are broken at random from an injected generator,
//! so a fixed seed gives reproducible results.
//!
//! ## Quick start
//!
//! ```
//! use boom_logic::{DataSet, LiteralFrequency, Minimizer, MinimizerConfig};
//!
//! # fn main() -> Result<(), boom_logic::MinimizeError> {
//! // f(a, b, c) = a*b over a partially specified truth table
//! let onset = DataSet::from_rows(3, &[[true, true, false], [true, true, true]])?;
//! let offset = DataSet::from_rows(3, &[[false, true, true], [true, false, false]])?;
//!
//! let config = MinimizerConfig {
//!     seed: Some(42),
//!     ..MinimizerConfig::default()
//! };
//! let solution = Minimizer::with_config(LiteralFrequency, config).minimize(&onset, &offset)?;
//!
//! println!("{}", solution.cover);
//! assert!(solution.verify(&onset, &offset));
//! # Ok(())
//! # }
//! ```
//!
//! ## Composable stages
//!
//! The stages are also exposed as free functions, taking the random source
//! explicitly:
//!
//! ```
//! use boom_logic::{run_cds, run_ie, run_ucp, DataSet, LiteralFrequency};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), boom_logic::MinimizeError> {
//! let onset = DataSet::from_rows(2, &[[true, true], [true, false]])?;
//! let offset = DataSet::from_rows(2, &[[false, false], [false, true]])?;
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let implicants = run_cds(&onset, &offset, &LiteralFrequency, 2, &mut rng)?;
//! let primes = run_ie(&offset, &implicants, &LiteralFrequency, &mut rng)?;
//! let cover = run_ucp(&onset, &primes, &mut rng)?;
//! assert_eq!(cover.to_string(), "x0");
//! # Ok(())
//! # }
//! ```
//!
//! ## Social scoring
//!
//! [`Social`] blends a per-variable centrality score, computed over variable
//! co-occurrence graphs of the onset and offset ([`graph`]), into literal
//! frequency:
//!
//! ```
//! use boom_logic::graph::Centrality;
//! use boom_logic::{DataSet, Minimizer, Social};
//!
//! # fn main() -> Result<(), boom_logic::MinimizeError> {
//! let onset = DataSet::from_rows(3, &[[true, true, false], [true, true, true]])?;
//! let offset = DataSet::from_rows(3, &[[false, true, true], [true, false, false]])?;
//!
//! let social = Social::new(&onset, &offset, 0.5, Centrality::Degree, Social::DEFAULT_RESOLUTION)?;
//! let solution = Minimizer::new(social).minimize(&onset, &offset)?;
//! assert!(solution.verify(&onset, &offset));
//! # Ok(())
//! # }
//! ```
//!
//! ## PLA files
//!
//! The [`pla`] module reads single-output PLA truth tables into an onset and
//! offset and writes covers back as PLA text.

mod budget;
pub mod covering;
pub mod error;
pub mod expansion;
pub mod graph;
pub mod pipeline;
pub mod pla;
pub mod search;
pub mod strategy;
pub mod term;

pub use error::{MinimizeError, Stage};
pub use pipeline::{run_cds, run_ie, run_pipeline, run_ucp, Minimizer, Solution};
pub use pla::{PLAError, PLAReadError, PLAReader, PLAWriteError, PLAWriter, PlaCover, PlaProblem};
pub use strategy::{LiteralFrequency, ManhattanDistance, ScoringStrategy, Social};
pub use term::{ConflictReport, DataSet, Literal, Polarity, Term, TermSet, Variable, VariableLabels};

/// Configuration for the minimizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizerConfig {
    /// Number of independent coverage-directed search iterations
    ///
    /// More iterations find more implicants and usually a smaller cover.
    pub iterations: usize,
    /// Seed for the random tie-break; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Worker threads for search iterations
    pub threads: usize,
    /// Maximum work-list pops per stage (per iteration during search)
    pub node_budget: Option<usize>,
    /// Check that onset and offset are disjoint before searching
    pub validate: bool,
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        MinimizerConfig {
            iterations: 2,
            seed: None,
            threads: 1,
            node_budget: None,
            validate: true,
        }
    }
}

impl MinimizerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}
