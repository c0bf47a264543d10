//! # Sentix
//!
//! 批量情感分析：收集文本（直接输入或文件导入），分块交给兼容 OpenAI 接口的
//! 大模型分类，对齐结果后展示汇总并导出 JSON / CSV / PDF。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力
//! - `IdGenerator` - 结果 ID 生成，可注入确定性实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `RemoteClassifier` / `LlmService` - 远程情感分类能力
//! - `ingest` - 文件导入能力
//! - `export` - 导出能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个分块"的对齐流程
//! - `reconcile` - 请求与响应按位置配对，缺失处兜底
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 分块、顺序调用、整批成功或整批失败
//! - `orchestrator/history` - 最近优先的有界结果历史
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::{Config, CHUNK_SIZE, HISTORY_CAPACITY, MAX_INGEST_ITEMS};
pub use error::{AppError, AppResult};
pub use infrastructure::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use models::{AnalysisResult, BatchSummary, Judgment, Sentiment};
pub use orchestrator::{BatchOrchestrator, ResultHistory};
pub use services::{ExportFormat, FileFormat, LlmService, RemoteClassifier};
pub use workflow::{reconcile, ChunkOutcome};
