use serde::{Deserialize, Serialize};

use super::Sentiment;

/// 无法对应到远程结果时使用的说明文字
pub const FALLBACK_EXPLANATION: &str = "Error processing this segment.";

/// 远程模型对单条文本的判断
///
/// 只要求四个字段齐全且类型正确，多余字段忽略；
/// `confidence` 不做范围校验，原样透传。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Judgment {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub explanation: String,
}

impl Judgment {
    /// 兜底判断：Neutral / 0.0 / 无关键词 / 固定错误说明
    pub fn fallback() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
            keywords: Vec::new(),
            explanation: FALLBACK_EXPLANATION.to_string(),
        }
    }
}

/// 单条文本的分析结果，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AnalysisResult {
    pub fn new(id: String, text: String, judgment: Judgment) -> Self {
        Self {
            id,
            text,
            sentiment: judgment.sentiment,
            confidence: judgment.confidence,
            keywords: judgment.keywords,
            explanation: judgment.explanation,
            source: None,
        }
    }

    /// 是否为兜底结果
    pub fn is_fallback(&self) -> bool {
        self.sentiment == Sentiment::Neutral
            && self.confidence == 0.0
            && self.keywords.is_empty()
            && self.explanation == FALLBACK_EXPLANATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judgment_requires_all_fields() {
        let missing_keywords = serde_json::json!({
            "sentiment": "Positive",
            "confidence": 0.9,
            "explanation": "great"
        });
        assert!(serde_json::from_value::<Judgment>(missing_keywords).is_err());
    }

    #[test]
    fn test_integer_confidence_is_accepted() {
        let judgment: Judgment = serde_json::from_value(serde_json::json!({
            "sentiment": "Negative",
            "confidence": 1,
            "keywords": ["awful"],
            "explanation": "bad",
            "extra": true
        }))
        .unwrap();
        assert_eq!(judgment.confidence, 1.0);
    }

    #[test]
    fn test_source_is_omitted_when_absent() {
        let result = AnalysisResult::new("a1".into(), "hi".into(), Judgment::fallback());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("source").is_none());
        assert!(result.is_fallback());
    }
}
