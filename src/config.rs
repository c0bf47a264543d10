use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 每次远程调用携带的最大文本条数
pub const CHUNK_SIZE: usize = 10;
/// 单个文件最多导入的文本条数
pub const MAX_INGEST_ITEMS: usize = 50;
/// 内存中保留的历史结果上限
pub const HISTORY_CAPACITY: usize = 200;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 采样温度
    pub temperature: f32,
    /// 导出文件目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-3-flash-preview".to_string(),
            temperature: 0.2,
            output_dir: ".".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 按 默认值 → TOML 文件 → 环境变量 的顺序加载配置
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }

    /// 从 TOML 文件读取配置，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原样
    pub fn with_env(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.temperature),
            output_dir: std::env::var("SENTIX_OUTPUT_DIR").unwrap_or(self.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}
