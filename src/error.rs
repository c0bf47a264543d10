//! 错误类型
//!
//! 按来源分层：输入校验、文件解析、远程调用、导出、配置。
//! 输入与解析错误在边界处就地报告，不会进入编排层；
//! 远程调用错误在任意分块失败时向上传播，整批作废。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 文件解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 远程分类服务错误
    #[error("远程调用错误: {0}")]
    Remote(#[from] RemoteError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入校验错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 直接输入的文本为空
    #[error("请输入需要分析的文本")]
    EmptyText,
    /// 不支持的文件类型
    #[error("不支持的文件格式: {file}（仅支持 .txt / .json / .csv）")]
    UnsupportedFormat { file: String },
    /// 文件中没有可用文本
    #[error("文件中没有找到有效文本")]
    NoTexts,
}

/// 文件解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 文件内容不是 UTF-8
    #[error("文件内容不是有效的 UTF-8 文本")]
    InvalidUtf8,
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 远程分类服务错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// 未配置 API 密钥
    #[error("未配置 LLM API 密钥 (LLM_API_KEY)")]
    MissingCredential,
    /// 网络 / 鉴权 / 限流等调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    Request { model: String, message: String },
    /// 返回结果中没有 choices
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyChoices { model: String },
    /// 顶层响应格式不正确
    #[error("LLM返回格式错误: {reason}")]
    MalformedResponse { reason: String },
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 没有可导出的结果
    #[error("没有可导出的结果")]
    NothingToExport,
    /// 序列化失败
    #[error("序列化失败 ({format}): {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl RemoteError {
    /// 创建 API 调用失败错误
    pub fn request(model: impl Into<String>, source: impl std::fmt::Display) -> Self {
        RemoteError::Request {
            model: model.into(),
            message: source.to_string(),
        }
    }

    /// 创建响应格式错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        RemoteError::MalformedResponse {
            reason: reason.into(),
        }
    }
}

impl ExportError {
    pub(crate) fn serialize(format: &'static str, source: impl std::fmt::Display) -> Self {
        ExportError::Serialize {
            format,
            message: source.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_wraps_into_app_error() {
        let err: AppError = RemoteError::request("gemini", "401 Unauthorized").into();
        assert!(matches!(err, AppError::Remote(RemoteError::Request { .. })));
        assert!(err.to_string().contains("401 Unauthorized"));
    }

    #[test]
    fn test_unsupported_format_names_file() {
        let err = InputError::UnsupportedFormat {
            file: "notes.docx".to_string(),
        };
        assert!(err.to_string().contains("notes.docx"));
    }
}
