/// 日志工具模块
///
/// 提供批量分析过程中的日志格式化和输出
use tracing::info;

use crate::models::BatchSummary;

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 使用的模型名称
/// - `chunk_size`: 每块文本数
pub fn log_startup(model: &str, chunk_size: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量情感分析模式");
    info!("🤖 模型: {}", model);
    info!("📊 每块文本数: {}", chunk_size);
    info!("{}", "=".repeat(60));
}

/// 记录文本加载信息
pub fn log_texts_loaded(total: usize, source: &str) {
    info!("✓ 从 {} 读取到 {} 条待分析文本", source, total);
}

/// 记录分块开始信息
///
/// # 参数
/// - `chunk_num`: 分块编号
/// - `total_chunks`: 分块总数
/// - `start`: 起始文本编号
/// - `end`: 结束文本编号
/// - `total`: 文本总数
pub fn log_batch_start(chunk_num: usize, total_chunks: usize, start: usize, end: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("📦 开始处理第 {}/{} 块", chunk_num, total_chunks);
    info!("📄 本块文本: {}-{} / 共 {} 条", start, end, total);
}

/// 记录分块完成信息
///
/// # 参数
/// - `chunk_num`: 分块编号
/// - `matched`: 拿到有效结果的数量
/// - `size`: 本块文本数
pub fn log_batch_complete(chunk_num: usize, matched: usize, size: usize) {
    info!("✓ 第 {} 块完成: 有效结果 {}/{}", chunk_num, matched, size);
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &BatchSummary, history_len: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 本次分析统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 共 {} 条: 正面 {} / 负面 {} / 中性 {} / 其他 {}",
        summary.total, summary.positive, summary.negative, summary.neutral, summary.unrecognized
    );
    info!("🎯 平均置信度: {}%", summary.avg_confidence_percent());
    info!("🗂 历史记录: {} 条", history_len);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
