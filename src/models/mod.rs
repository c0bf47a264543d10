pub mod result;
pub mod sentiment;
pub mod summary;

pub use result::{AnalysisResult, Judgment, FALLBACK_EXPLANATION};
pub use sentiment::Sentiment;
pub use summary::BatchSummary;
