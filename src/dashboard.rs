//! 文本仪表盘
//!
//! 把结果列表渲染成终端可读的汇总：总数与平均置信度、情感分布、
//! 前 10 条的置信度条形图、逐条明细表。纯函数，不做输出。

use std::fmt::Write;

use crate::models::summary::confidence_percent;
use crate::models::{AnalysisResult, BatchSummary};
use crate::utils::logging::truncate_text;

const BAR_WIDTH: usize = 30;
const CONFIDENCE_CHART_ITEMS: usize = 10;
const TABLE_KEYWORDS: usize = 3;
const TABLE_TEXT_CHARS: usize = 48;

pub fn render(results: &[AnalysisResult]) -> String {
    let mut out = String::new();
    let summary = BatchSummary::from_results(results);

    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Insights Dashboard");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(
        out,
        "Total Analyzed: {:<8} Avg Confidence: {}%",
        summary.total,
        summary.avg_confidence_percent()
    );

    if results.is_empty() {
        let _ = writeln!(out, "\nNo results yet. Submit text or a file to analyze.");
        return out;
    }

    let _ = writeln!(out, "\nSentiment Distribution");
    for (label, count) in summary.distribution() {
        let _ = writeln!(out, "  {:<10} {:>4}  {}", label, count, bar(count as f64 / summary.total as f64));
    }

    let _ = writeln!(out, "\nConfidence");
    for (i, result) in results.iter().take(CONFIDENCE_CHART_ITEMS).enumerate() {
        let _ = writeln!(
            out,
            "  Doc {:<5} {:>4}%  {}",
            i + 1,
            confidence_percent(result.confidence),
            bar(result.confidence)
        );
    }

    let _ = writeln!(out, "\nResults");
    let _ = writeln!(out, "  {:>3}  {:<10} {:>5}  {:<32}  Text", "#", "Sentiment", "Conf.", "Keywords");
    for (i, result) in results.iter().enumerate() {
        let keywords = result
            .keywords
            .iter()
            .take(TABLE_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  {:>3}  {:<10} {:>4}%  {:<32}  {}",
            i + 1,
            result.sentiment.as_str(),
            confidence_percent(result.confidence),
            truncate_text(&keywords, 30),
            truncate_text(&single_line(&result.text), TABLE_TEXT_CHARS)
        );
        if !result.explanation.is_empty() {
            let _ = writeln!(out, "       ↳ {}", single_line(&result.explanation));
        }
    }

    out
}

/// 条形长度按 [0, 1] 截断，仅影响显示
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
