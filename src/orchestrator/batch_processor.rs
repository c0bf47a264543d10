//! 批量分析编排 - 编排层
//!
//! ## 核心流程
//!
//! 1. **分块**：按 `CHUNK_SIZE` 切分输入，保持相对顺序，最后一块可以不满
//! 2. **顺序调用**：一次只发出一个远程请求，等待返回后再处理下一块
//! 3. **对齐**：每块的请求与响应交给 `reconcile`，结果依次追加
//! 4. **整批失败**：任一分块调用失败立即中止，不返回部分结果，不重试

use tracing::{error, info};

use crate::config::CHUNK_SIZE;
use crate::error::AppResult;
use crate::infrastructure::{IdGenerator, UuidIdGenerator};
use crate::models::AnalysisResult;
use crate::services::RemoteClassifier;
use crate::utils::logging::{log_batch_complete, log_batch_start};
use crate::workflow::reconcile;

/// 批量分析编排器
///
/// 只持有远程分类能力和 ID 生成能力，不缓存、不去重。
pub struct BatchOrchestrator {
    classifier: Box<dyn RemoteClassifier>,
    ids: Box<dyn IdGenerator>,
}

impl BatchOrchestrator {
    /// 使用随机 ID 创建编排器
    pub fn new(classifier: impl RemoteClassifier + 'static) -> Self {
        Self {
            classifier: Box::new(classifier),
            ids: Box::new(UuidIdGenerator),
        }
    }

    /// 替换 ID 生成器
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// 分析一组文本
    ///
    /// 成功时结果与输入等长同序；任一分块失败时返回该错误，已完成的分块一并丢弃。
    pub async fn analyze(&self, items: &[String]) -> AppResult<Vec<AnalysisResult>> {
        let total = items.len();
        let total_chunks = total.div_ceil(CHUNK_SIZE);
        let mut all_results = Vec::with_capacity(total);
        let mut fallbacks = 0;

        for (idx, chunk) in items.chunks(CHUNK_SIZE).enumerate() {
            let chunk_num = idx + 1;
            let start = idx * CHUNK_SIZE;
            log_batch_start(chunk_num, total_chunks, start + 1, start + chunk.len(), total);

            let response = self.classifier.classify(chunk).await.map_err(|e| {
                error!("❌ 第 {}/{} 块调用失败，整批作废: {}", chunk_num, total_chunks, e);
                e
            })?;

            let outcome = reconcile(chunk, &response, self.ids.as_ref());
            log_batch_complete(chunk_num, chunk.len() - outcome.fallbacks, chunk.len());

            fallbacks += outcome.fallbacks;
            all_results.extend(outcome.results);
        }

        info!(
            "✓ 分析完成: {} 条文本, {} 个分块, 兜底 {} 条",
            total, total_chunks, fallbacks
        );
        Ok(all_results)
    }
}
