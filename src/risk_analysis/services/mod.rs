/// Analysis services: scoring, recommendation, enrichment, and the
/// orchestrator that drives one run end to end.
pub mod action_recommender;
pub mod analyzer;
pub mod enricher;
pub mod registry_cache;
pub mod risk_scorer;

pub use action_recommender::ActionRecommender;
pub use analyzer::{AnalysisOptions, RiskAnalyzer};
pub use enricher::{EnrichedDependency, MetadataEnricher};
pub use registry_cache::CachingRegistryRepository;
pub use risk_scorer::{RiskAssessment, RiskScorer};
