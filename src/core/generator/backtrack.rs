//! Exhaustive search with best-case pruning.
//!
//! Sequences are built in canonical order: each course takes a grade at the
//! same or a lower position than the course before it. Every multiset of
//! grades therefore appears exactly once, which is all the histograms in the
//! output need.

use super::{GradeSearch, SearchReport, SearchRequest, Strategy};
use crate::core::models::{Combination, GradeRules, GradeScale};

/// Complete enumeration of valid multisets
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracking;

impl GradeSearch for Backtracking {
    fn strategy(&self) -> Strategy {
        Strategy::Exhaustive
    }

    fn search(&self, request: &SearchRequest<'_>) -> SearchReport {
        let scale = request.scale;
        let rules = request.rules;
        let courses = request.courses;
        let required_sum = request.required_sum();
        let allowed: Vec<usize> = rules.allowed_indices().collect();

        let mut report = SearchReport {
            complete: true,
            ..SearchReport::default()
        };
        let mut counts = vec![0usize; scale.len()];
        // path[d] is the position in `allowed` chosen for course d,
        // sums[d] the point total of the first d courses,
        // cursor[d] the next position to try for course d
        let mut path: Vec<usize> = Vec::with_capacity(courses);
        let mut sums: Vec<f64> = Vec::with_capacity(courses + 1);
        let mut cursor: Vec<usize> = Vec::with_capacity(courses + 1);
        sums.push(0.0);
        cursor.push(0);

        loop {
            let depth = path.len();
            let sum = sums[depth];

            if depth == courses {
                if request.accepts(&counts, sum) {
                    let grades = path.iter().map(|&pos| allowed[pos]).collect();
                    report
                        .combinations
                        .push(Combination::from_canonical(grades, sum));
                }
            } else if let Some(pos) = next_branch(
                &allowed,
                cursor[depth],
                &counts,
                sum,
                courses - depth,
                required_sum,
                scale,
                rules,
                &mut report.rejected,
            ) {
                let grade = allowed[pos];
                cursor[depth] = pos + 1;
                cursor.push(pos);
                path.push(pos);
                sums.push(sum + scale.points_at(grade));
                counts[grade] += 1;
                report.explored += 1;
                continue;
            }

            // Depth finished or exhausted: undo the choice that led here
            cursor.pop();
            sums.pop();
            match path.pop() {
                Some(pos) => counts[allowed[pos]] -= 1,
                None => break,
            }
        }

        report
    }
}

/// First position at or after `start` worth extending with, or `None` when
/// no later grade can still reach `required_sum`.
///
/// The best-case bound never increases with the position, so the first
/// branch that fails the bound ends the scan.
#[allow(clippy::too_many_arguments)]
fn next_branch(
    allowed: &[usize],
    start: usize,
    counts: &[usize],
    sum: f64,
    slots: usize,
    required_sum: f64,
    scale: &GradeScale,
    rules: &GradeRules,
    rejected: &mut usize,
) -> Option<usize> {
    for (pos, &grade) in allowed.iter().enumerate().skip(start) {
        if counts[grade] >= rules.cap(grade) {
            continue;
        }
        let bound = best_fill(allowed, pos, counts, slots, scale, rules);
        if sum + bound < required_sum {
            *rejected += 1;
            return None;
        }
        return Some(pos);
    }
    None
}

/// Highest point total for `slots` courses drawn from `allowed[from..]`
/// without breaking any occurrence cap. Negative infinity when the caps
/// leave too few grades to fill every slot.
#[allow(clippy::cast_precision_loss)]
fn best_fill(
    allowed: &[usize],
    from: usize,
    counts: &[usize],
    slots: usize,
    scale: &GradeScale,
    rules: &GradeRules,
) -> f64 {
    let mut left = slots;
    let mut total = 0.0;
    for &grade in &allowed[from..] {
        if left == 0 {
            break;
        }
        let take = rules.cap(grade).saturating_sub(counts[grade]).min(left);
        total += take as f64 * scale.points_at(grade);
        left -= take;
    }
    if left == 0 {
        total
    } else {
        f64::NEG_INFINITY
    }
}
