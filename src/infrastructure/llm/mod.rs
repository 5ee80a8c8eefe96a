//! LLM integration - clothing recommendations

pub mod gigachat;
pub mod types;

pub use gigachat::RecommendationClient;
