pub mod classifier;
pub mod export;
pub mod ingest;
pub mod llm_service;

pub use classifier::RemoteClassifier;
pub use export::{ExportFormat, ReportRow};
pub use ingest::FileFormat;
pub use llm_service::LlmService;
