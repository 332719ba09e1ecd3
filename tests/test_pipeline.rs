//! Integration tests for the minimization pipeline
//!
//! These tests drive the public entry points end to end: the composable
//! stages, the configured minimizer, scoring strategies and error reporting.

use boom_logic::graph::Centrality;
use boom_logic::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn truth_table(n: usize, f: impl Fn(&[bool]) -> bool) -> (DataSet, DataSet) {
    let mut onset = Vec::new();
    let mut offset = Vec::new();
    for i in 0..(1usize << n) {
        let row: Vec<bool> = (0..n).map(|b| i >> b & 1 == 1).collect();
        if f(&row) {
            onset.push(row);
        } else {
            offset.push(row);
        }
    }
    (
        DataSet::from_rows(n, &onset).unwrap(),
        DataSet::from_rows(n, &offset).unwrap(),
    )
}

fn x(i: usize) -> Term {
    Term::from_literals([Literal::normal(i)])
}

// Composable stages

#[test]
fn test_single_literal_function_end_to_end() {
    let onset = DataSet::from_rows(2, &[[true, true], [true, false]]).unwrap();
    let offset = DataSet::from_rows(2, &[[false, false], [false, true]]).unwrap();

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let implicants = run_cds(&onset, &offset, &LiteralFrequency, 2, &mut rng).unwrap();
        assert!(implicants.contains(&x(0)), "seed {}", seed);

        let primes = run_ie(&offset, &implicants, &LiteralFrequency, &mut rng).unwrap();
        assert_eq!(primes, [x(0)].into_iter().collect::<TermSet>());

        let cover = run_ucp(&onset, &primes, &mut rng).unwrap();
        assert_eq!(cover, [x(0)].into_iter().collect::<TermSet>());
    }
}

#[test]
fn test_run_pipeline_matches_composed_stages() {
    let (onset, offset) = truth_table(4, |r| (r[0] && r[1]) || (r[2] && !r[3]));

    let mut rng = StdRng::seed_from_u64(7);
    let piped = run_pipeline(&onset, &offset, &LiteralFrequency, 3, &mut rng).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let implicants = run_cds(&onset, &offset, &LiteralFrequency, 3, &mut rng).unwrap();
    let primes = run_ie(&offset, &implicants, &LiteralFrequency, &mut rng).unwrap();
    let composed = run_ucp(&onset, &primes, &mut rng).unwrap();

    assert_eq!(piped, composed);
}

#[test]
fn test_two_term_function_finds_minimum() {
    let (onset, offset) = truth_table(4, |r| (r[0] && r[1]) || (r[2] && !r[3]));
    let config = MinimizerConfig {
        iterations: 8,
        seed: Some(3),
        ..MinimizerConfig::default()
    };
    let solution = Minimizer::with_config(LiteralFrequency, config)
        .minimize(&onset, &offset)
        .unwrap();

    assert!(solution.verify(&onset, &offset));
    assert_eq!(solution.cover.len(), 2);
    assert_eq!(solution.cover.literal_count(), 4);
}

// Reproducibility and accumulation

#[test]
fn test_fixed_seed_is_reproducible() {
    let (onset, offset) = truth_table(5, |r| r.iter().filter(|&&b| b).count() >= 3);
    let config = MinimizerConfig {
        iterations: 4,
        seed: Some(99),
        ..MinimizerConfig::default()
    };
    let minimizer = Minimizer::with_config(LiteralFrequency, config);
    let first = minimizer.minimize(&onset, &offset).unwrap();
    let second = minimizer.minimize(&onset, &offset).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_implicants_accumulate_with_iterations() {
    let (onset, offset) = truth_table(4, |r| r[0] ^ (r[1] && r[2]) ^ r[3]);
    let mut previous = TermSet::new();
    for k in 0..6 {
        let mut rng = StdRng::seed_from_u64(21);
        let implicants = run_cds(&onset, &offset, &LiteralFrequency, k, &mut rng).unwrap();
        assert!(implicants.is_superset(&previous), "iteration {}", k);
        previous = implicants;
    }
}

#[test]
fn test_thread_count_does_not_change_result() {
    let (onset, offset) = truth_table(5, |r| (r[0] && !r[4]) || (r[1] && r[2] && r[3]));
    let solve = |threads| {
        let config = MinimizerConfig {
            iterations: 7,
            seed: Some(5),
            threads,
            ..MinimizerConfig::default()
        };
        Minimizer::with_config(LiteralFrequency, config)
            .minimize(&onset, &offset)
            .unwrap()
    };
    let sequential = solve(1);
    assert_eq!(solve(2), sequential);
    assert_eq!(solve(4), sequential);
    assert_eq!(solve(16), sequential);
}

// Degenerate inputs

#[test]
fn test_empty_onset_gives_empty_sets() {
    let offset = DataSet::from_rows(3, &[[false, false, false]]).unwrap();
    let solution = Minimizer::new(LiteralFrequency)
        .minimize(&DataSet::empty(3), &offset)
        .unwrap();
    assert_eq!(solution, Solution::default());
}

#[test]
fn test_empty_offset_gives_universal_cover() {
    let onset = DataSet::from_rows(3, &[[true, false, true], [false, false, false]]).unwrap();
    let solution = Minimizer::new(LiteralFrequency)
        .minimize(&onset, &DataSet::empty(3))
        .unwrap();
    assert_eq!(solution.cover, [Term::universal()].into_iter().collect::<TermSet>());
    assert_eq!(solution.cover.to_string(), "1");
}

#[test]
fn test_parity_cannot_be_compressed() {
    let (onset, offset) = truth_table(4, |r| r.iter().filter(|&&b| b).count() % 2 == 1);
    let config = MinimizerConfig {
        seed: Some(0),
        ..MinimizerConfig::default()
    };
    let solution = Minimizer::with_config(LiteralFrequency, config)
        .minimize(&onset, &offset)
        .unwrap();
    assert_eq!(solution.cover.len(), 8);
    assert!(solution.cover.iter().all(|t| t.is_minterm(4)));
}

// Errors

#[test]
fn test_overlapping_sets_rejected() {
    let onset = DataSet::from_rows(2, &[[true, true], [false, true]]).unwrap();
    let offset = DataSet::from_rows(2, &[[false, false], [true, true]]).unwrap();
    let err = Minimizer::new(LiteralFrequency)
        .minimize(&onset, &offset)
        .unwrap_err();
    assert_eq!(
        err,
        MinimizeError::OverlappingSets {
            minterm: Term::from_bits(&[true, true])
        }
    );

    let mut rng = StdRng::seed_from_u64(0);
    let err = run_pipeline(&onset, &offset, &LiteralFrequency, 1, &mut rng).unwrap_err();
    assert!(matches!(err, MinimizeError::OverlappingSets { .. }));
}

#[test]
fn test_overlap_without_validation_is_distinguishable() {
    let onset = DataSet::from_rows(2, &[[true, true]]).unwrap();
    let offset = DataSet::from_rows(2, &[[true, true]]).unwrap();
    let config = MinimizerConfig {
        seed: Some(0),
        validate: false,
        ..MinimizerConfig::default()
    };
    let err = Minimizer::with_config(LiteralFrequency, config)
        .minimize(&onset, &offset)
        .unwrap_err();
    assert!(matches!(
        err,
        MinimizeError::NoCandidates {
            stage: Stage::Search,
            ..
        }
    ));
}

#[test]
fn test_expansion_rejects_non_implicant() {
    let offset = DataSet::from_rows(2, &[[false, false], [false, true]]).unwrap();
    let implicants: TermSet = [x(0), Term::from_literals([Literal::complement(0)])]
        .into_iter()
        .collect();
    let mut rng = StdRng::seed_from_u64(0);
    let err = run_ie(&offset, &implicants, &LiteralFrequency, &mut rng).unwrap_err();
    assert_eq!(
        err,
        MinimizeError::UnsafeImplicant {
            term: Term::from_literals([Literal::complement(0)])
        }
    );
}

#[test]
fn test_incomplete_minterm_rejected() {
    let err = DataSet::new(3, vec![Term::from_literals([Literal::normal(0)])]).unwrap_err();
    assert!(matches!(
        err,
        MinimizeError::IncompleteMinterm {
            index: 0,
            n_variables: 3,
            ..
        }
    ));
}

#[test]
fn test_dimension_mismatch_rejected() {
    let onset = DataSet::from_rows(2, &[[true, true]]).unwrap();
    let offset = DataSet::from_rows(3, &[[false, false, false]]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let err = run_cds(&onset, &offset, &LiteralFrequency, 1, &mut rng).unwrap_err();
    assert_eq!(
        err,
        MinimizeError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_budget_reports_partial_result() {
    let (onset, offset) = truth_table(4, |r| r.iter().filter(|&&b| b).count() % 2 == 1);
    let config = MinimizerConfig {
        seed: Some(1),
        node_budget: Some(3),
        ..MinimizerConfig::default()
    };
    let err = Minimizer::with_config(LiteralFrequency, config)
        .minimize(&onset, &offset)
        .unwrap_err();
    match err {
        MinimizeError::BudgetExhausted {
            stage,
            budget,
            partial,
        } => {
            assert_eq!(stage, Stage::Search);
            assert_eq!(budget, 3);
            assert!(!partial.is_empty());
            assert!(partial.iter().all(|t| !offset.intersected_by(t)));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// Strategies

#[test]
fn test_social_strategy_solves_function() {
    let (onset, offset) = truth_table(4, |r| (r[0] && r[1]) || (r[2] && !r[3]));
    for centrality in [Centrality::Degree, Centrality::Betweenness, Centrality::Blend(0.5)] {
        let social =
            Social::new(&onset, &offset, 0.5, centrality, Social::DEFAULT_RESOLUTION).unwrap();
        let config = MinimizerConfig {
            iterations: 4,
            seed: Some(8),
            ..MinimizerConfig::default()
        };
        let solution = Minimizer::with_config(social, config)
            .minimize(&onset, &offset)
            .unwrap();
        assert!(solution.verify(&onset, &offset), "{}", centrality);
    }
}

#[test]
fn test_social_rejects_bad_interactivity() {
    let (onset, offset) = truth_table(2, |r| r[0]);
    for value in [-0.1, 1.5] {
        let err = Social::new(
            &onset,
            &offset,
            value,
            Centrality::Degree,
            Social::DEFAULT_RESOLUTION,
        )
        .unwrap_err();
        assert_eq!(err, MinimizeError::InvalidInteractivity { value });
    }
}

#[test]
fn test_boxed_strategy_object() {
    let (onset, offset) = truth_table(3, |r| r[0] || (r[1] && r[2]));
    let strategies: Vec<Box<dyn ScoringStrategy>> = vec![
        Box::new(LiteralFrequency),
        Box::new(
            Social::from_scores(vec![0.0, 1.0, 0.5], 0.3, Social::DEFAULT_RESOLUTION).unwrap(),
        ),
    ];
    for strategy in strategies {
        let mut rng = StdRng::seed_from_u64(2);
        let cover = run_pipeline(&onset, &offset, &strategy, 3, &mut rng).unwrap();
        assert!(onset.iter().all(|m| cover.matches(m)), "{}", strategy.name());
        assert!(offset.iter().all(|m| !cover.matches(m)), "{}", strategy.name());
    }
}

#[test]
fn test_cleaning_then_minimizing() {
    let onset = DataSet::from_rows(2, &[[true, true], [true, true], [true, false]]).unwrap();
    let offset = DataSet::from_rows(2, &[[true, true], [false, false], [false, true]]).unwrap();
    let (onset, offset, report) = DataSet::resolve_conflicts(&onset, &offset).unwrap();
    assert_eq!(report.removed_from_offset, vec![Term::from_bits(&[true, true])]);

    let config = MinimizerConfig {
        seed: Some(4),
        ..MinimizerConfig::default()
    };
    let solution = Minimizer::with_config(LiteralFrequency, config)
        .minimize(&onset, &offset)
        .unwrap();
    assert_eq!(solution.cover, [x(0)].into_iter().collect::<TermSet>());
}
