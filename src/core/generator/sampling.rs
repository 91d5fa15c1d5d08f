//! Randomized search for large course counts.
//!
//! Each trial draws an independent, uniformly chosen allowed grade for every
//! course and keeps the draw when it is valid. This is an approximation:
//! valid multisets may be missed, and unseeded runs differ from each other.

use super::{GradeSearch, SearchReport, SearchRequest, Strategy};
use crate::core::models::Combination;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Default number of trials per search
pub const DEFAULT_TRIALS: usize = 10_000;

/// Tuning for [`MonteCarlo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingOptions {
    /// Maximum number of draws
    pub trials: usize,
    /// Seed for reproducible runs; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Stop once this many distinct valid multisets are collected
    pub stop_after: Option<usize>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            stop_after: None,
        }
    }
}

/// Monte-Carlo sampler over the grade space
#[derive(Debug, Clone, Copy, Default)]
pub struct MonteCarlo {
    options: SamplingOptions,
}

impl MonteCarlo {
    /// Create a sampler with the given options
    #[must_use]
    pub const fn new(options: SamplingOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &SamplingOptions {
        &self.options
    }

    fn rng(&self) -> StdRng {
        self.options
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}

impl GradeSearch for MonteCarlo {
    fn strategy(&self) -> Strategy {
        Strategy::Sampling
    }

    fn search(&self, request: &SearchRequest<'_>) -> SearchReport {
        let mut report = SearchReport::default();
        let allowed: Vec<usize> = request.rules.allowed_indices().collect();
        if allowed.is_empty() {
            return report;
        }

        let mut rng = self.rng();
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut counts = vec![0usize; request.scale.len()];
        let mut draw = Vec::with_capacity(request.courses);

        for _ in 0..self.options.trials {
            if let Some(limit) = self.options.stop_after {
                if report.combinations.len() >= limit {
                    crate::debug!("Sampling stopped early after {} trials", report.explored);
                    break;
                }
            }
            report.explored += 1;

            draw.clear();
            counts.iter_mut().for_each(|c| *c = 0);
            let mut sum = 0.0;
            for _ in 0..request.courses {
                let grade = allowed[rng.gen_range(0..allowed.len())];
                draw.push(grade);
                counts[grade] += 1;
                sum += request.scale.points_at(grade);
            }

            if !request.accepts(&counts, sum) {
                report.rejected += 1;
                continue;
            }
            draw.sort_unstable();
            if seen.insert(draw.clone()) {
                report
                    .combinations
                    .push(Combination::from_canonical(draw.clone(), sum));
            }
        }

        report
    }
}
