//! 远程分类能力 - 业务能力层
//!
//! 编排层只依赖这个 trait，不关心背后是哪家模型服务。

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::RemoteError;

/// 远程情感分类能力
///
/// - 输入：按顺序排列的一组文本（不超过一个分块）
/// - 输出：远程返回的原始 JSON 数组，元素尚未校验，长度可能不足
/// - 整次调用失败（网络 / 鉴权 / 顶层格式错误）时返回 `Err`
pub trait RemoteClassifier: Send + Sync {
    fn classify<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Value>, RemoteError>>;
}
