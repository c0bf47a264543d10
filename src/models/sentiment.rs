use serde::{Deserialize, Serialize};
use std::fmt;

/// 情感标签
///
/// 远程模型返回的标签不做校验：三种已知取值映射到对应变体，
/// 其他任何字符串原样保存在 `Unrecognized` 中，序列化时写回原文。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Unrecognized(String),
}

impl Sentiment {
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Sentiment {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            "Neutral" => Sentiment::Neutral,
            _ => Sentiment::Unrecognized(raw),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_to_variants() {
        assert_eq!(Sentiment::from("Positive".to_string()), Sentiment::Positive);
        assert_eq!(Sentiment::from("Negative".to_string()), Sentiment::Negative);
        assert_eq!(Sentiment::from("Neutral".to_string()), Sentiment::Neutral);
    }

    #[test]
    fn test_unknown_label_is_kept_verbatim() {
        // 大小写不同也不归一化
        let sentiment: Sentiment = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(sentiment, Sentiment::Unrecognized("positive".to_string()));
        assert_eq!(serde_json::to_string(&sentiment).unwrap(), "\"positive\"");
    }
}
