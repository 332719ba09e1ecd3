//! Tests for the term data model

use super::*;

fn term(literals: &[Literal]) -> Term {
    Term::from_literals(literals.iter().copied())
}

#[test]
fn test_universal_term() {
    let t = Term::universal();
    assert!(t.is_empty());
    assert!(t.is_universal());
    assert_eq!(t, Term::default());
    assert_eq!(t.to_string(), "1");
}

#[test]
fn test_with_literal_keeps_polarity_invariant() {
    let t = Term::universal().with_literal(Literal::normal(2));
    let same = t.with_literal(Literal::complement(2));
    assert_eq!(same, t);
    assert_eq!(same.polarity_of(2), Some(Polarity::Normal));

    let again = t.with_literal(Literal::normal(2));
    assert_eq!(again.len(), 1);
}

#[test]
fn test_terms_are_persistent() {
    let base = term(&[Literal::normal(0)]);
    let grown = base.with_literal(Literal::complement(1));
    assert_eq!(base.len(), 1);
    assert_eq!(grown.len(), 2);

    let shrunk = grown.without_literal(&Literal::normal(0));
    assert_eq!(grown.len(), 2);
    assert_eq!(shrunk, term(&[Literal::complement(1)]));
}

#[test]
fn test_without_absent_literal_is_noop() {
    let t = term(&[Literal::normal(0)]);
    assert_eq!(t.without_literal(&Literal::complement(0)), t);
    assert_eq!(t.without_literal(&Literal::normal(5)), t);
}

#[test]
fn test_literals_sorted_by_variable() {
    let t = term(&[Literal::normal(3), Literal::complement(0), Literal::normal(1)]);
    let vars: Vec<usize> = t.iter().map(|l| l.variable()).collect();
    assert_eq!(vars, vec![0, 1, 3]);
    assert_eq!(t.to_string(), "~x0*x1*x3");
}

#[test]
fn test_from_literals_first_wins() {
    let t = term(&[Literal::complement(1), Literal::normal(1)]);
    assert_eq!(t.len(), 1);
    assert!(t.contains(&Literal::complement(1)));
}

#[test]
fn test_covers() {
    let minterm = Term::from_bits(&[true, false, true]);
    assert!(term(&[Literal::normal(0)]).covers(&minterm));
    assert!(term(&[Literal::normal(0), Literal::complement(1)]).covers(&minterm));
    assert!(!term(&[Literal::complement(0)]).covers(&minterm));
    assert!(minterm.covers(&minterm));
}

#[test]
fn test_empty_term_covers_nothing_but_matches_everything() {
    let minterm = Term::from_bits(&[false, false]);
    let empty = Term::universal();
    assert!(!empty.covers(&minterm));
    assert!(empty.matches(&minterm));
    assert!(!empty.covers(&empty));
}

#[test]
fn test_is_minterm() {
    assert!(Term::from_bits(&[true, false]).is_minterm(2));
    assert!(!Term::from_bits(&[true, false]).is_minterm(3));
    assert!(!term(&[Literal::normal(0), Literal::normal(2)]).is_minterm(2));
    assert!(Term::universal().is_minterm(0));
}

#[test]
fn test_distance() {
    let minterm = Term::from_bits(&[true, true, false]);
    let t = term(&[Literal::normal(0), Literal::complement(1), Literal::normal(2)]);
    assert_eq!(t.distance(&minterm), 2);
    assert_eq!(Term::universal().distance(&minterm), 0);
    assert_eq!(minterm.distance(&minterm), 0);
}

#[test]
fn test_display_with_labels() {
    let labels = VariableLabels::from_labels(&["a", "b"]);
    let t = term(&[Literal::normal(0), Literal::complement(1)]);
    assert_eq!(t.display_with(&labels).to_string(), "a*~b");
}

#[test]
fn test_term_ordering_is_total() {
    let a = term(&[Literal::complement(0)]);
    let b = term(&[Literal::normal(0)]);
    let c = term(&[Literal::normal(0), Literal::normal(1)]);
    let mut terms = vec![c.clone(), b.clone(), a.clone()];
    terms.sort();
    assert_eq!(terms, vec![a, b, c]);
}

#[test]
fn test_termset_dedup_and_order() {
    let mut set = TermSet::new();
    assert!(set.insert(term(&[Literal::normal(1)])));
    assert!(set.insert(term(&[Literal::normal(0)])));
    assert!(!set.insert(term(&[Literal::normal(1)])));
    assert_eq!(set.len(), 2);
    let first = set.iter().next().cloned();
    assert_eq!(first, Some(term(&[Literal::normal(0)])));
    assert_eq!(set.to_string(), "x0 + x1");
    assert_eq!(TermSet::new().to_string(), "0");
}

#[test]
fn test_termset_superset() {
    let small: TermSet = vec![term(&[Literal::normal(0)])].into_iter().collect();
    let mut big = small.clone();
    big.insert(term(&[Literal::complement(2)]));
    assert!(big.is_superset(&small));
    assert!(!small.is_superset(&big));
    assert_eq!(big.literal_count(), 2);
}

#[test]
fn test_dataset_rejects_partial_minterm() {
    let err = DataSet::new(2, vec![Term::from_bits(&[true, true]), term(&[Literal::normal(0)])])
        .unwrap_err();
    match err {
        crate::MinimizeError::IncompleteMinterm { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_dataset_from_rows_checks_width() {
    let err = DataSet::from_rows(3, &[vec![true, false]]).unwrap_err();
    assert_eq!(
        err,
        crate::MinimizeError::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn test_dataset_filtering() {
    let onset = DataSet::from_rows(2, &[[true, true], [true, false], [false, true]]).unwrap();
    let x0 = term(&[Literal::normal(0)]);

    let rest = onset.uncovered_by(&x0);
    assert_eq!(rest.len(), 1);
    assert_eq!(onset.len(), 3);

    let mut inplace = onset.clone();
    assert_eq!(inplace.remove_covered_by(&x0), 2);
    assert_eq!(inplace, rest);

    // The universal term filters nothing
    assert_eq!(onset.uncovered_by(&Term::universal()).len(), 3);
    assert_eq!(onset.matched_by(&Term::universal()).count(), 3);
}

#[test]
fn test_dataset_intersection() {
    let offset = DataSet::from_rows(2, &[[false, false]]).unwrap();
    assert!(offset.intersected_by(&Term::universal()));
    assert!(offset.intersected_by(&term(&[Literal::complement(0)])));
    assert!(!offset.intersected_by(&term(&[Literal::normal(1)])));
    assert!(!DataSet::empty(2).intersected_by(&Term::universal()));
}

#[test]
fn test_dataset_min_distance() {
    let offset = DataSet::from_rows(3, &[[false, false, false], [true, true, false]]).unwrap();
    let t = term(&[Literal::normal(0), Literal::normal(1), Literal::normal(2)]);
    assert_eq!(offset.min_distance(&t), Some(1));
    assert_eq!(DataSet::empty(3).min_distance(&t), None);
}

#[test]
fn test_check_disjoint() {
    let onset = DataSet::from_rows(2, &[[true, true], [false, true]]).unwrap();
    let offset = DataSet::from_rows(2, &[[false, true]]).unwrap();
    let err = DataSet::check_disjoint(&onset, &offset).unwrap_err();
    assert_eq!(
        err,
        crate::MinimizeError::OverlappingSets {
            minterm: Term::from_bits(&[false, true])
        }
    );
    assert!(DataSet::check_disjoint(&onset, &DataSet::empty(2)).is_ok());
    assert!(DataSet::check_disjoint(&onset, &DataSet::empty(3)).is_err());
}

#[test]
fn test_resolve_conflicts() {
    // [1,1] is 2/3 of the onset but 1/2 of the offset: kept in the onset
    // [0,0] is 1/3 of the onset but 1/2 of the offset: kept in the offset
    let onset = DataSet::from_rows(2, &[[true, true], [true, true], [false, false]]).unwrap();
    let offset = DataSet::from_rows(2, &[[true, true], [false, false]]).unwrap();

    let (on, off, report) = DataSet::resolve_conflicts(&onset, &offset).unwrap();
    assert_eq!(on.minterms(), &[Term::from_bits(&[true, true]), Term::from_bits(&[true, true])]);
    assert_eq!(off.minterms(), &[Term::from_bits(&[false, false])]);
    assert_eq!(report.removed_from_onset, vec![Term::from_bits(&[false, false])]);
    assert_eq!(report.removed_from_offset, vec![Term::from_bits(&[true, true])]);
    assert!(DataSet::check_disjoint(&on, &off).is_ok());
}

#[test]
fn test_resolve_conflicts_tie_drops_both() {
    let onset = DataSet::from_rows(1, &[[true], [false]]).unwrap();
    let offset = DataSet::from_rows(1, &[[true], [true]]).unwrap();
    // [1]: 1/2 of onset, 2/2 of offset -> offset wins
    // [0]: onset only
    let (on, off, report) = DataSet::resolve_conflicts(&onset, &offset).unwrap();
    assert_eq!(on.len(), 1);
    assert_eq!(off.len(), 2);
    assert_eq!(report.removed_from_onset.len(), 1);

    let tie_on = DataSet::from_rows(1, &[[true]]).unwrap();
    let tie_off = DataSet::from_rows(1, &[[true]]).unwrap();
    let (on, off, report) = DataSet::resolve_conflicts(&tie_on, &tie_off).unwrap();
    assert!(on.is_empty());
    assert!(off.is_empty());
    assert!(!report.is_empty());
}
