//! Ranking and selection of valid combinations

use crate::core::models::Combination;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Which slice of the ranked list to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The best `n` combinations
    #[default]
    Top,
    /// A spread from the top, middle and bottom of the list
    Representative,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "top-n" => Ok(Self::Top),
            "representative" | "spread" => Ok(Self::Representative),
            _ => Err(format!("Unknown selection mode: '{s}'")),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Representative => write!(f, "representative"),
        }
    }
}

/// How many combinations to take and from where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First `n` after ranking
    Top(usize),
    /// Slices from each part of the ranked list
    Representative {
        /// Taken from the start
        top: usize,
        /// Taken around the midpoint
        middle: usize,
        /// Taken from the end
        bottom: usize,
    },
}

impl Selection {
    /// Build a selection for `mode` returning at most `count` combinations.
    ///
    /// Representative mode splits `count` into thirds, giving any remainder
    /// to the top slice first and the bottom slice second.
    #[must_use]
    pub const fn for_mode(mode: SelectionMode, count: usize) -> Self {
        match mode {
            SelectionMode::Top => Self::Top(count),
            SelectionMode::Representative => {
                let top = (count + 2) / 3;
                let bottom = (count + 1) / 3;
                Self::Representative {
                    top,
                    middle: count - top - bottom,
                    bottom,
                }
            }
        }
    }

    /// Upper bound on the number of combinations returned
    #[must_use]
    pub const fn limit(&self) -> usize {
        match *self {
            Self::Top(n) => n,
            Self::Representative {
                top,
                middle,
                bottom,
            } => top + middle + bottom,
        }
    }
}

/// Presentation order: higher average first, then more top grades, then the
/// lexicographically better canonical sequence.
#[must_use]
pub fn compare(a: &Combination, b: &Combination) -> Ordering {
    b.average_gpa()
        .total_cmp(&a.average_gpa())
        .then_with(|| b.count_of(0).cmp(&a.count_of(0)))
        .then_with(|| a.grades().cmp(b.grades()))
}

/// Sort in presentation order. The order is total, so repeated runs over
/// the same set always agree regardless of input order.
pub fn rank(combinations: &mut [Combination]) {
    combinations.sort_by(compare);
}

/// Rank `combinations` and keep the slice `selection` asks for.
///
/// Duplicated multisets are dropped. The result never exceeds
/// [`Selection::limit`] and is shorter when fewer combinations exist.
#[must_use]
pub fn select(mut combinations: Vec<Combination>, selection: Selection) -> Vec<Combination> {
    rank(&mut combinations);
    combinations.dedup_by(|a, b| a.grades() == b.grades());

    match selection {
        Selection::Top(n) => {
            combinations.truncate(n);
            combinations
        }
        Selection::Representative {
            top,
            middle,
            bottom,
        } => {
            let len = combinations.len();
            if len <= top + middle + bottom {
                return combinations;
            }

            let mid_start = (len / 2).saturating_sub(middle / 2);
            let picks = (0..top)
                .chain(mid_start..mid_start + middle)
                .chain(len - bottom..len);

            let mut seen = HashSet::new();
            let mut chosen: Vec<Combination> = picks
                .filter(|&i| seen.insert(i))
                .map(|i| combinations[i].clone())
                .collect();
            rank(&mut chosen);
            chosen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GradeScale;

    fn combo(grades: &[usize]) -> Combination {
        Combination::from_indices(grades.to_vec(), &GradeScale::university())
    }

    fn averages(list: &[Combination]) -> Vec<f64> {
        list.iter().map(Combination::average_gpa).collect()
    }

    #[test]
    fn test_rank_by_average_then_top_grades() {
        // A + B and B+ + B+ tie at 3.5; A + C trails at 3.0
        let mut list = vec![combo(&[0, 4]), combo(&[1, 1]), combo(&[0, 2])];
        rank(&mut list);
        assert_eq!(list[0].grades(), &[0, 2]);
        assert_eq!(list[1].grades(), &[1, 1]);
        assert_eq!(list[2].grades(), &[0, 4]);
    }

    #[test]
    fn test_rank_is_stable_across_input_orders() {
        let base = vec![
            combo(&[0, 3, 3]),
            combo(&[1, 1, 3]),
            combo(&[0, 2, 4]),
            combo(&[2, 2, 2]),
            combo(&[1, 2, 2]),
        ];
        let mut forward = base.clone();
        let mut reversed: Vec<_> = base.into_iter().rev().collect();
        rank(&mut forward);
        rank(&mut reversed);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_top_selection_respects_limit() {
        let list: Vec<_> = (0..7).map(|g| combo(&[g, g])).collect();
        let picked = select(list.clone(), Selection::Top(3));
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0].grades(), &[0, 0]);

        let all = select(list, Selection::Top(10));
        assert_eq!(all.len(), 7);
    }

    #[test]
    fn test_duplicates_removed() {
        let list = vec![combo(&[0, 1]), combo(&[1, 0]), combo(&[2, 2])];
        let picked = select(list, Selection::Top(5));
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_representative_spread() {
        let list: Vec<_> = (0..7).map(|g| combo(&[g])).collect();
        let picked = select(
            list,
            Selection::Representative {
                top: 2,
                middle: 1,
                bottom: 2,
            },
        );
        let letters: Vec<usize> = picked.iter().map(|c| c.grades()[0]).collect();
        assert_eq!(letters, vec![0, 1, 3, 5, 6]);
        let avgs = averages(&picked);
        assert!(avgs.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_representative_short_list_returns_everything() {
        let list: Vec<_> = (0..4).map(|g| combo(&[g])).collect();
        let picked = select(list, Selection::for_mode(SelectionMode::Representative, 6));
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn test_for_mode_split() {
        assert_eq!(
            Selection::for_mode(SelectionMode::Representative, 5),
            Selection::Representative {
                top: 2,
                middle: 1,
                bottom: 2
            }
        );
        assert_eq!(
            Selection::for_mode(SelectionMode::Representative, 1),
            Selection::Representative {
                top: 1,
                middle: 0,
                bottom: 0
            }
        );
        assert_eq!(Selection::for_mode(SelectionMode::Top, 6).limit(), 6);
    }

    #[test]
    fn test_selection_mode_parse() {
        assert_eq!("Top".parse::<SelectionMode>(), Ok(SelectionMode::Top));
        assert_eq!(
            "representative".parse::<SelectionMode>(),
            Ok(SelectionMode::Representative)
        );
        assert!("middle".parse::<SelectionMode>().is_err());
    }
}
