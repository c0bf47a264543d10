//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量分析编排
//! - 把任意长度的文本列表按 `CHUNK_SIZE` 切块
//! - 逐块顺序调用远程分类能力（不并发）
//! - 交给 workflow::reconcile 对齐，拼接结果
//! - 任一分块失败即整批失败，已完成分块的结果丢弃
//!
//! ### `history` - 结果历史
//! - 最近优先的有界缓冲，容量 `HISTORY_CAPACITY`
//! - 每次完整的分析调用后写入一次
//!
//! ## 层次关系
//!
//! ```text
//! app (CLI / 交互会话，持有 history)
//!     ↓
//! batch_processor (处理 Vec<String>)
//!     ↓
//! workflow::reconcile (处理一个分块)
//!     ↓
//! services (能力层：classifier / ingest / export)
//!     ↓
//! infrastructure (基础设施：IdGenerator)
//! ```

pub mod batch_processor;
pub mod history;

pub use batch_processor::BatchOrchestrator;
pub use history::ResultHistory;
