//! Questionnaire intake, eligibility evaluation, and screening workflow for
//! New York marijuana conviction record relief.

pub mod domain;
pub(crate) mod evaluation;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, ConvictionLevel, ConvictionState, OffenseType, QuestionnaireId,
    QuestionnaireSubmission, ScreeningProfile, ScreeningStatus,
};
pub use evaluation::{
    EligibilityDetails, EligibilityEngine, EligibilityStatus, EligibilityVerdict, EvaluationConfig,
    Recommendation, RecommendationKind, VerdictView,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{
    NotificationError, NotificationPublisher, ReliefNotification, RepositoryError,
    ScreeningRecord, ScreeningRepository, ScreeningStatusView,
};
pub use router::relief_router;
pub use service::{ReliefScreeningService, ScreeningServiceError};
