pub mod assignment;
pub mod candidate;
pub mod feedback;
pub mod jd;
pub mod role;
pub mod scores;
pub mod verdict;

pub use assignment::Assignment;
pub use candidate::{CandidateProfile, ExtractedSkill, Project, SkillConfidence, WorkExperience};
pub use feedback::{CandidateFeedback, FeedbackStage};
pub use jd::{AmbiguityLevel, IntensityLevel, JdSpec, RoleDuration};
pub use role::{BehavioralWeights, RelevanceWeights, RoleContext};
pub use scores::{
    ExecutionFitScore, FounderConfidenceScore, FounderMetrics, RelevanceScore, TechnicalMetrics,
};
pub use verdict::{ExternalVerdict, InternalVerdict, ProcessingResult, Recommendation, VerdictRow};
