//! 结果导出 - 业务能力层
//!
//! 三种一次性导出：JSON、CSV、PDF 报表。都是对内存中结果列表的纯函数，
//! 只有 `write_export` 会落盘。

use chrono::{DateTime, Local};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportError;
use crate::models::summary::confidence_percent;
use crate::models::AnalysisResult;

pub const CSV_HEADERS: [&str; 6] = ["ID", "Text", "Sentiment", "Confidence", "Keywords", "Explanation"];
pub const REPORT_TITLE: &str = "Sentix Analysis Report";
const REPORT_HEADERS: [&str; 4] = ["Sentiment", "Conf.", "Keywords", "Text Snippet"];
const SNIPPET_MAX_CHARS: usize = 60;
const REPORT_KEYWORDS: usize = 3;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

/// 带日期的导出文件名（不含扩展名）
pub fn export_base_name(now: &DateTime<Local>) -> String {
    format!("sentix_results_{}", now.format("%Y-%m-%d"))
}

/// 把结果序列化为指定格式的字节
pub fn render(
    results: &[AnalysisResult],
    format: ExportFormat,
    now: &DateTime<Local>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Json => to_json(results).map(String::into_bytes),
        ExportFormat::Csv => to_csv(results).map(String::into_bytes),
        ExportFormat::Pdf => to_pdf(&Report::build(results, now)),
    }
}

/// 写出导出文件，返回文件路径
pub async fn write_export(
    dir: &Path,
    results: &[AnalysisResult],
    format: ExportFormat,
    now: &DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    if results.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let bytes = render(results, format, now)?;
    let path = dir.join(format!("{}.{}", export_base_name(now), format.extension()));

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| ExportError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;

    info!("💾 已导出 {} 条结果: {}", results.len(), path.display());
    Ok(path)
}

// ========== JSON ==========

pub fn to_json(results: &[AnalysisResult]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(results).map_err(|e| ExportError::serialize("json", e))
}

// ========== CSV ==========

pub fn to_csv(results: &[AnalysisResult]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| ExportError::serialize("csv", e))?;

    for result in results {
        let confidence = result.confidence.to_string();
        let keywords = result.keywords.join(", ");
        writer
            .write_record([
                result.id.as_str(),
                result.text.as_str(),
                result.sentiment.as_str(),
                confidence.as_str(),
                keywords.as_str(),
                result.explanation.as_str(),
            ])
            .map_err(|e| ExportError::serialize("csv", e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::serialize("csv", e))?;
    String::from_utf8(bytes).map_err(|e| ExportError::serialize("csv", e))
}

// ========== PDF 报表 ==========

/// 报表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub sentiment: String,
    pub confidence: String,
    pub keywords: String,
    pub snippet: String,
}

impl ReportRow {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            sentiment: result.sentiment.to_string(),
            confidence: format!("{}%", confidence_percent(result.confidence)),
            keywords: result
                .keywords
                .iter()
                .take(REPORT_KEYWORDS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            snippet: truncate_snippet(&result.text),
        }
    }

    fn cells(&self) -> [&str; 4] {
        [
            self.sentiment.as_str(),
            self.confidence.as_str(),
            self.keywords.as_str(),
            self.snippet.as_str(),
        ]
    }
}

/// 报表内容，与排版无关
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub generated_at: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn build(results: &[AnalysisResult], now: &DateTime<Local>) -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            generated_at: format!("Generated on: {}", now.format("%Y-%m-%d %H:%M:%S")),
            rows: results.iter().map(ReportRow::from_result).collect(),
        }
    }
}

/// 超过 60 个字符时截取前 57 个并加省略号
pub fn truncate_snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_MAX_CHARS {
        text.chars().take(SNIPPET_MAX_CHARS - 3).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 15.0;
const ROW_HEIGHT: f32 = 6.0;
const COLUMN_X: [f32; 4] = [14.0, 38.0, 54.0, 100.0];

pub fn to_pdf(report: &Report) -> Result<Vec<u8>, ExportError> {
    let pdf_err = |e: printpdf::Error| ExportError::serialize("pdf", e);

    let (doc, page, layer) = PdfDocument::new(&report.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let mut canvas = doc.get_page(page).get_layer(layer);
    canvas.use_text(report.title.as_str(), 18.0, Mm(MARGIN_LEFT), Mm(PAGE_HEIGHT - 22.0), &bold);
    canvas.use_text(report.generated_at.as_str(), 11.0, Mm(MARGIN_LEFT), Mm(PAGE_HEIGHT - 30.0), &regular);

    let mut y = PAGE_HEIGHT - 38.0;
    draw_row(&canvas, &REPORT_HEADERS, y, &bold);
    y -= ROW_HEIGHT;

    for row in &report.rows {
        if y < MARGIN_BOTTOM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            canvas = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT - 20.0;
            draw_row(&canvas, &REPORT_HEADERS, y, &bold);
            y -= ROW_HEIGHT;
        }
        draw_row(&canvas, &row.cells(), y, &regular);
        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn draw_row(canvas: &PdfLayerReference, cells: &[&str; 4], y: f32, font: &IndirectFontRef) {
    for (cell, x) in cells.iter().zip(COLUMN_X) {
        canvas.use_text(*cell, 8.0, Mm(x), Mm(y), font);
    }
}
