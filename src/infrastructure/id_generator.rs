//! 结果 ID 生成器 - 基础设施层
//!
//! ID 只用于区分结果，不从文本内容派生。以能力的形式注入编排层，
//! 测试中可以换成确定性的实现。

use std::sync::atomic::{AtomicU64, Ordering};

/// 结果 ID 生成能力
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 随机 ID：uuid v4 的前 9 位十六进制字符
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()[..9].to_string()
    }
}

/// 运行前缀 + 单调递增计数
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
