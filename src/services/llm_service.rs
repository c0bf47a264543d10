//! LLM 服务 - 业务能力层
//!
//! 只负责"把一组文本交给模型做情感判断"这一能力，不关心分块和对齐
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini, Azure, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::RemoteError;
use crate::services::classifier::RemoteClassifier;

const SYSTEM_MESSAGE: &str = "You are a sentiment analysis engine. \
Reply with a JSON array only, one element per input text and in the same order. \
Each element must be an object with exactly these fields: \
\"sentiment\" (one of \"Positive\", \"Negative\", \"Neutral\"), \
\"confidence\" (number from 0.0 to 1.0), \
\"keywords\" (array of the key sentiment-driving words or phrases), \
\"explanation\" (a brief explanation of why this sentiment was chosen). \
Do not wrap the array in any other object and do not add commentary.";

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 对一组文本做情感分类
/// - 只返回原始数组，逐条校验交给对齐流程
/// - 不做分块，不生成结果 ID
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    has_credential: bool,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.temperature,
            has_credential: !config.llm_api_key.trim().is_empty(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串），没有内容时返回空串
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, RemoteError> {
        if !self.has_credential {
            return Err(RemoteError::MissingCredential);
        }

        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let build_err = |e: OpenAIError| RemoteError::request(&self.model_name, e);

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(build_err)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_err)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(build_err)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            RemoteError::request(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response
            .choices
            .first()
            .ok_or_else(|| RemoteError::EmptyChoices {
                model: self.model_name.clone(),
            })?;

        Ok(choice
            .message
            .content
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// 对一组文本做情感分类，返回远程的原始数组
    pub async fn classify_texts(&self, texts: &[String]) -> Result<Vec<Value>, RemoteError> {
        debug!("开始情感分类，文本数量: {}, 模型: {}", texts.len(), self.model_name);

        let user_message = build_user_message(texts);
        let reply = self.send_to_llm(&user_message, Some(SYSTEM_MESSAGE)).await?;
        let items = parse_classifier_reply(&reply)?;

        if items.len() != texts.len() {
            warn!(
                "LLM 返回 {} 条结果，请求 {} 条，缺失部分将使用兜底结果",
                items.len(),
                texts.len()
            );
        }
        Ok(items)
    }
}

impl RemoteClassifier for LlmService {
    fn classify<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Value>, RemoteError>> {
        self.classify_texts(texts).boxed()
    }
}

/// 构建用户消息：逐条编号列出文本
fn build_user_message(texts: &[String]) -> String {
    let listing: Vec<String> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("[{}] {}", i + 1, text))
        .collect();

    format!(
        "Perform sentiment analysis on the following texts. For each text, identify:\n\
         1. Sentiment (Positive, Negative, or Neutral)\n\
         2. Confidence Score (0.0 to 1.0)\n\
         3. Key sentiment-driving keywords or phrases\n\
         4. A brief explanation of why this sentiment was chosen.\n\n\
         Texts:\n{}",
        listing.join("\n")
    )
}

/// 解析模型回复
///
/// 去掉 Markdown 代码块包裹后按 JSON 解析；空回复视为空数组，
/// 顶层不是数组时整次调用失败。
pub fn parse_classifier_reply(reply: &str) -> Result<Vec<Value>, RemoteError> {
    let body = strip_code_fence(reply);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| RemoteError::malformed(format!("无法解析为 JSON: {}", e)))?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(RemoteError::malformed(format!(
            "顶层应为数组，实际为 {}",
            json_kind(&other)
        ))),
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // 语言标记（如 json）后必须跟空白，否则整段都是正文
    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let after_tag = &rest[tag_len..];
    let body = if after_tag.starts_with(char::is_whitespace) {
        after_tag
    } else {
        rest
    };
    body.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let items = parse_classifier_reply(
            r#"[{"sentiment":"Positive","confidence":0.9,"keywords":["love"],"explanation":"warm"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["sentiment"], "Positive");
    }

    #[test]
    fn test_parse_fenced_array() {
        let reply = "```json\n[{\"sentiment\":\"Neutral\"}, 3]\n```";
        let items = parse_classifier_reply(reply).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_parse_single_line_fenced_array() {
        let item = r#"[{"sentiment":"Positive","confidence":0.9,"keywords":[],"explanation":"x"}]"#;

        let tagged = parse_classifier_reply(&format!("```json {}```", item)).unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0]["sentiment"], "Positive");

        let bare = parse_classifier_reply(&format!("```{}```", item)).unwrap();
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_fenced_garbage_is_malformed() {
        for reply in ["```garbage", "```oops", "```json\nnot json\n```"] {
            let err = parse_classifier_reply(reply).unwrap_err();
            assert!(matches!(err, RemoteError::MalformedResponse { .. }), "{}", reply);
        }
    }

    #[test]
    fn test_empty_fence_is_empty_array() {
        assert!(parse_classifier_reply("```json\n```").unwrap().is_empty());
    }

    #[test]
    fn test_empty_reply_is_empty_array() {
        assert!(parse_classifier_reply("   ").unwrap().is_empty());
    }

    #[test]
    fn test_object_reply_is_malformed() {
        let err = parse_classifier_reply(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse { .. }));
    }

    #[test]
    fn test_garbage_reply_is_malformed() {
        let err = parse_classifier_reply("I think these are positive.").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse { .. }));
    }

    #[test]
    fn test_user_message_numbers_texts() {
        let msg = build_user_message(&["good".to_string(), "bad".to_string()]);
        assert!(msg.contains("[1] good\n[2] bad"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let service = LlmService::new(&Config::default());
        let err = service.classify_texts(&["hello".to_string()]).await.unwrap_err();
        assert!(matches!(err, RemoteError::MissingCredential));
    }

    /// 真实 API 调用，需要设置 LLM_API_KEY
    ///
    /// ```bash
    /// cargo test test_live_classification -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_live_classification() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = LlmService::new(&Config::from_env());
        let texts = vec![
            "I absolutely love this product!".to_string(),
            "The delivery was late and the box was crushed.".to_string(),
        ];

        let items = service.classify_texts(&texts).await.expect("LLM 调用失败");
        println!("{}", serde_json::to_string_pretty(&items).unwrap());
        assert!(!items.is_empty());
    }
}
