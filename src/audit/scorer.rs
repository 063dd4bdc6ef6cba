//! Category scoring, health score and grade derivation.
//!
//! A category score is the severity-weighted share of credit earned by its
//! applicable checks. The health score is the weighted mean of category
//! scores, with the weights of N/A categories redistributed over the rest.

use crate::config::ScoringConfig;
use crate::model::{Category, CategoryKind, Check, Grade};
use crate::utils::round1;

/// Scores evaluated checks with an injected [`ScoringConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> Scorer<'a> {
    #[must_use]
    pub const fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Score of a set of checks, `None` when none is applicable
    #[must_use]
    pub fn score_checks(&self, checks: &[Check]) -> Option<f64> {
        let (earned, possible) = checks.iter().fold((0.0, 0.0), |(earned, possible), check| {
            match self.config.result_values.value(check.result) {
                Some(value) => {
                    let weight = self.config.severity_weights.weight(check.severity);
                    (earned + weight * value, possible + weight)
                }
                None => (earned, possible),
            }
        });

        if possible > 0.0 {
            Some(round1(100.0 * earned / possible))
        } else {
            None
        }
    }

    /// Map a score onto a grade (`None` is N/A)
    #[must_use]
    pub fn grade(&self, score: Option<f64>) -> Grade {
        score.map_or(Grade::NotApplicable, |s| self.config.grade_bands.grade(s))
    }

    /// Build a scored category from its checks
    #[must_use]
    pub fn score_category(&self, kind: CategoryKind, checks: Vec<Check>) -> Category {
        let score = self.score_checks(&checks);
        let grade = self.grade(score);
        tracing::debug!(category = %kind, ?score, %grade, "scored category");
        Category {
            kind,
            name: kind.name().to_string(),
            weight: self.config.category_weights.label(kind),
            score,
            grade,
            checks,
        }
    }

    /// Overall health score (0-100) and its grade.
    ///
    /// All categories N/A yields `(0, F)`.
    #[must_use]
    pub fn health(&self, categories: &[Category]) -> (u32, Grade) {
        let weights = &self.config.category_weights;
        let (weighted, available) = categories
            .iter()
            .filter_map(|c| c.score.map(|s| (s, weights.weight(c.kind))))
            .fold((0.0, 0.0), |(sum, total), (score, weight)| {
                (sum + score * weight, total + weight)
            });

        if available <= 0.0 {
            return (0, Grade::F);
        }

        let health = (weighted / available).round().clamp(0.0, 100.0) as u32;
        (health, self.config.grade_bands.grade(f64::from(health)))
    }
}

/// One-line verdict for an overall grade
#[must_use]
pub const fn verdict(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "Well-managed account with strong fundamentals; focus on incremental scaling",
        Grade::B => "Solid account with a few optimization gaps worth closing",
        Grade::C => "Average performance with notable gaps in tracking or structure",
        Grade::D => "Significant issues are limiting performance; fix the foundation first",
        Grade::F => "Critical problems are wasting spend; immediate intervention required",
        Grade::NotApplicable => "Assessment pending",
    }
}
