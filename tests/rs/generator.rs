//! Integration tests for the combination search strategies and ranking.

use grade_target::core::generator::{
    run_search, Backtracking, GradeSearch, MonteCarlo, SamplingOptions, SearchOutcome,
    SearchRequest,
};
use grade_target::core::models::{Combination, Constraints, GradeRules, GradeScale};
use grade_target::core::ranking::{select, Selection, SelectionMode};
use std::collections::BTreeSet;

fn searched(outcome: SearchOutcome) -> Vec<Combination> {
    match outcome {
        SearchOutcome::Searched(report) => report.combinations,
        SearchOutcome::Impossible { .. } => panic!("expected a search"),
    }
}

fn multisets(combinations: &[Combination]) -> BTreeSet<Vec<usize>> {
    combinations.iter().map(|c| c.grades().to_vec()).collect()
}

#[test]
fn exhaustive_counts_every_multiset_without_a_target() {
    let scale = GradeScale::university();
    let rules = GradeRules::unrestricted(scale.len());
    let request = SearchRequest {
        scale: &scale,
        rules: &rules,
        courses: 3,
        required_average: None,
    };
    let found = searched(run_search(&request, &Backtracking));
    // multisets of size 3 over 7 grades
    assert_eq!(found.len(), 84);
    assert_eq!(multisets(&found).len(), 84);
}

#[test]
fn perfect_average_needs_all_top_grades() {
    let scale = GradeScale::university();
    let rules = GradeRules::unrestricted(scale.len());
    let request = SearchRequest {
        scale: &scale,
        rules: &rules,
        courses: 4,
        required_average: Some(4.0),
    };
    let found = searched(run_search(&request, &Backtracking));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].letters(&scale), vec!["A", "A", "A", "A"]);
}

#[test]
fn capped_top_grade_limits_results() {
    let scale = GradeScale::university();
    let rules = Constraints::new()
        .max_occurrences_of("A", 1)
        .resolve(&scale)
        .expect("valid constraints");
    let request = SearchRequest {
        scale: &scale,
        rules: &rules,
        courses: 2,
        required_average: Some(3.5),
    };
    let found = searched(run_search(&request, &Backtracking));

    let mut labels: Vec<Vec<&str>> = found.iter().map(|c| c.letters(&scale)).collect();
    labels.sort();
    assert_eq!(
        labels,
        vec![vec!["A", "B"], vec!["A", "B+"], vec!["B+", "B+"]]
    );
}

#[test]
fn unreachable_average_skips_search() {
    let scale = GradeScale::university();
    let rules = GradeRules::unrestricted(scale.len());
    let request = SearchRequest {
        scale: &scale,
        rules: &rules,
        courses: 5,
        required_average: Some(4.2),
    };
    match run_search(&request, &Backtracking) {
        SearchOutcome::Impossible {
            required_average,
            max_points,
        } => {
            assert!((required_average - 4.2).abs() < 1e-9);
            assert!((max_points - 4.0).abs() < 1e-9);
        }
        SearchOutcome::Searched(_) => panic!("expected impossible"),
    }
}

#[test]
fn seeded_sampling_agrees_with_exhaustive() {
    let scale = GradeScale::university();
    let rules = Constraints::new()
        .exclude_grade("E")
        .resolve(&scale)
        .expect("valid constraints");
    let request = SearchRequest {
        scale: &scale,
        rules: &rules,
        courses: 4,
        required_average: Some(3.0),
    };

    let exhaustive = multisets(&searched(run_search(&request, &Backtracking)));
    let sampler = MonteCarlo::new(SamplingOptions {
        trials: 2_000,
        seed: Some(7),
        stop_after: None,
    });
    let first = sampler.search(&request);
    let second = sampler.search(&request);

    assert!(!first.complete);
    assert!(!first.combinations.is_empty());
    assert_eq!(multisets(&first.combinations), multisets(&second.combinations));
    assert!(multisets(&first.combinations).is_subset(&exhaustive));
}

#[test]
fn ranking_puts_best_first_and_representative_spans_the_range() {
    let scale = GradeScale::university();
    let rules = GradeRules::unrestricted(scale.len());
    let request = SearchRequest {
        scale: &scale,
        rules: &rules,
        courses: 3,
        required_average: Some(3.0),
    };
    let found = searched(run_search(&request, &Backtracking));
    let total = found.len();

    let top = select(found.clone(), Selection::Top(3));
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].letters(&scale), vec!["A", "A", "A"]);
    assert!(top
        .windows(2)
        .all(|w| w[0].average_gpa() >= w[1].average_gpa()));

    let spread = select(
        found,
        Selection::for_mode(SelectionMode::Representative, 6),
    );
    assert_eq!(spread.len(), 6.min(total));
    assert_eq!(spread[0].letters(&scale), vec!["A", "A", "A"]);
    let last = spread.last().expect("non-empty");
    assert!(last.average_gpa() >= 3.0 - 1e-9);
    assert!(last.average_gpa() < 3.2);
}
