mod config;
mod rules;
mod verdict;

pub use config::EvaluationConfig;
pub use verdict::{
    EligibilityDetails, EligibilityStatus, EligibilityVerdict, Recommendation, RecommendationKind,
    VerdictView,
};

use super::domain::ScreeningProfile;
use chrono::NaiveDate;

/// Stateless evaluator applying the statutory rule chain to a profile.
///
/// Evaluation is a total function: any combination of answered and
/// unanswered questions yields a well-formed verdict, and the reference
/// date is always passed in explicitly so results are reproducible.
pub struct EligibilityEngine {
    config: EvaluationConfig,
}

impl EligibilityEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn evaluate(&self, profile: &ScreeningProfile, as_of: NaiveDate) -> EligibilityVerdict {
        let signals = rules::collect_signals(profile, as_of);

        let hit = rules::PRIORITY_CHAIN
            .iter()
            .find_map(|rule| (rule.check)(profile, &signals, &self.config))
            .unwrap_or_else(|| rules::fallback_outcome(profile, &signals, &self.config));

        let mut recommendations = hit.recommendations;
        recommendations.push(rules::report_recommendation());
        recommendations.sort_by_key(|recommendation| recommendation.priority);

        EligibilityVerdict {
            questionnaire_id: profile.questionnaire_id.clone(),
            status: hit.status,
            details: hit.details,
            recommendations,
        }
    }

    /// Name of the chain rule that decided the verdict, or `None` when the
    /// fallback branch applied. Used for audit output and precedence tests.
    pub fn explain(&self, profile: &ScreeningProfile, as_of: NaiveDate) -> Option<&'static str> {
        let signals = rules::collect_signals(profile, as_of);
        rules::PRIORITY_CHAIN
            .iter()
            .find(|rule| (rule.check)(profile, &signals, &self.config).is_some())
            .map(|rule| rule.name)
    }
}
