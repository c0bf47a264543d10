//! 文件导入 - 业务能力层
//!
//! 把上传文件的字节切成一组待分析文本。只做简单的格式分支，
//! 不尝试理解 CSV 引号或多列结构。

use phf::phf_map;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::config::MAX_INGEST_ITEMS;
use crate::error::{InputError, ParseError};

/// 支持的文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Text,
    Json,
    Csv,
}

static EXTENSIONS: phf::Map<&'static str, FileFormat> = phf_map! {
    "txt" => FileFormat::Text,
    "text" => FileFormat::Text,
    "json" => FileFormat::Json,
    "csv" => FileFormat::Csv,
};

/// 一个或多个空行（含只有空格/制表符的行）
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("段落分隔正则无效"));

impl FileFormat {
    /// 按扩展名识别格式（不区分大小写）
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| EXTENSIONS.get(ext.to_ascii_lowercase().as_str()).copied())
            .ok_or_else(|| InputError::UnsupportedFormat {
                file: path.display().to_string(),
            })
    }
}

/// 从文件内容中提取文本，最多保留前 50 条
///
/// 任一分支解析失败时整体报错，不返回部分结果。
pub fn extract_texts(bytes: &[u8], format: FileFormat) -> Result<Vec<String>, ParseError> {
    let content = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;

    let mut texts = match format {
        FileFormat::Json => extract_json(content)?,
        FileFormat::Csv => extract_csv_lines(content),
        FileFormat::Text => extract_paragraphs(content),
    };

    if texts.len() > MAX_INGEST_ITEMS {
        debug!("导入 {} 条文本，截取前 {} 条", texts.len(), MAX_INGEST_ITEMS);
        texts.truncate(MAX_INGEST_ITEMS);
    }
    Ok(texts)
}

/// 直接输入的单条文本，空白文本视为无效
pub fn direct_text(input: &str) -> Result<String, InputError> {
    if input.trim().is_empty() {
        return Err(InputError::EmptyText);
    }
    Ok(input.to_string())
}

fn extract_json(content: &str) -> Result<Vec<String>, ParseError> {
    let parsed: Value = serde_json::from_str(content)?;

    Ok(match parsed {
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        Value::Object(ref map) => match map.get("text") {
            Some(Value::String(text)) => vec![text.clone()],
            _ => vec![parsed.to_string()],
        },
        other => vec![other.to_string()],
    })
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// 逐行读取，去掉空行；多于一行时第一行当作表头丢弃
fn extract_csv_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() > 1 {
        lines.remove(0);
    }
    lines
}

/// 按空行分段
fn extract_paragraphs(content: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(content)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
