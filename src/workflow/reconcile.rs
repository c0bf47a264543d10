//! 结果对齐 - 流程层
//!
//! 把一个分块的请求文本与远程返回的数组按位置配对。
//! 返回数组过短、元素缺失或结构不完整时，该位置使用兜底判断。
//! 输出长度恒等于请求长度。

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::infrastructure::IdGenerator;
use crate::models::{AnalysisResult, Judgment};

/// 单个分块的对齐结果
#[derive(Debug, Clone)]
pub struct ChunkOutcome {
    pub results: Vec<AnalysisResult>,
    /// 使用兜底判断的位置数量
    pub fallbacks: usize,
}

/// 按位置对齐请求与响应
///
/// 不校验标签是否属于三种取值，也不校验置信度范围，存在即原样透传。
pub fn reconcile(requested: &[String], response: &[Value], ids: &dyn IdGenerator) -> ChunkOutcome {
    let mut fallbacks = 0;

    let results = requested
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let judgment = match response.get(i).map(parse_judgment) {
                Some(Ok(judgment)) => judgment,
                Some(Err(e)) => {
                    warn!("第 {} 条结果结构不完整，使用兜底结果: {}", i + 1, e);
                    fallbacks += 1;
                    Judgment::fallback()
                }
                None => {
                    debug!("第 {} 条没有对应的返回结果，使用兜底结果", i + 1);
                    fallbacks += 1;
                    Judgment::fallback()
                }
            };
            AnalysisResult::new(ids.next_id(), text.clone(), judgment)
        })
        .collect();

    ChunkOutcome { results, fallbacks }
}

fn parse_judgment(value: &Value) -> Result<Judgment, serde_json::Error> {
    Judgment::deserialize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SequentialIdGenerator;
    use crate::models::{Sentiment, FALLBACK_EXPLANATION};
    use serde_json::json;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn judgment(sentiment: &str, confidence: f64) -> Value {
        json!({
            "sentiment": sentiment,
            "confidence": confidence,
            "keywords": ["k"],
            "explanation": "because"
        })
    }

    #[test]
    fn test_full_response_pairs_by_position() {
        let ids = SequentialIdGenerator::new("t");
        let requested = texts(&["good", "bad"]);
        let response = vec![judgment("Positive", 0.9), judgment("Negative", 0.8)];

        let outcome = reconcile(&requested, &response, &ids);

        assert_eq!(outcome.fallbacks, 0);
        assert_eq!(outcome.results[0].text, "good");
        assert_eq!(outcome.results[0].sentiment, Sentiment::Positive);
        assert_eq!(outcome.results[0].id, "t-1");
        assert_eq!(outcome.results[1].text, "bad");
        assert_eq!(outcome.results[1].sentiment, Sentiment::Negative);
        assert_eq!(outcome.results[1].id, "t-2");
    }

    #[test]
    fn test_short_response_fills_tail_with_fallback() {
        let ids = SequentialIdGenerator::new("t");
        let requested = texts(&["a", "b", "c"]);
        let response = vec![judgment("Positive", 0.9)];

        let outcome = reconcile(&requested, &response, &ids);

        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.fallbacks, 2);
        assert!(!outcome.results[0].is_fallback());
        for result in &outcome.results[1..] {
            assert_eq!(result.sentiment, Sentiment::Neutral);
            assert_eq!(result.confidence, 0.0);
            assert!(result.keywords.is_empty());
            assert_eq!(result.explanation, FALLBACK_EXPLANATION);
        }
        assert_eq!(outcome.results[2].text, "c");
    }

    #[test]
    fn test_malformed_elements_fall_back_in_place() {
        let ids = SequentialIdGenerator::new("t");
        let requested = texts(&["a", "b", "c", "d"]);
        let response = vec![
            json!(null),
            json!({"sentiment": "Positive", "confidence": "high", "keywords": [], "explanation": ""}),
            judgment("Negative", 0.4),
            json!("Positive"),
        ];

        let outcome = reconcile(&requested, &response, &ids);

        assert_eq!(outcome.fallbacks, 3);
        assert!(outcome.results[0].is_fallback());
        assert!(outcome.results[1].is_fallback());
        assert_eq!(outcome.results[2].sentiment, Sentiment::Negative);
        assert!(outcome.results[3].is_fallback());
    }

    #[test]
    fn test_extra_response_items_are_ignored() {
        let ids = SequentialIdGenerator::new("t");
        let requested = texts(&["only"]);
        let response = vec![judgment("Neutral", 0.5), judgment("Positive", 0.9)];

        let outcome = reconcile(&requested, &response, &ids);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].confidence, 0.5);
    }

    #[test]
    fn test_unexpected_values_pass_through_unvalidated() {
        let ids = SequentialIdGenerator::new("t");
        let requested = texts(&["a", "b"]);
        let response = vec![judgment("Ecstatic", 1.7), judgment("Negative", -0.3)];

        let outcome = reconcile(&requested, &response, &ids);

        assert_eq!(outcome.fallbacks, 0);
        assert_eq!(
            outcome.results[0].sentiment,
            Sentiment::Unrecognized("Ecstatic".to_string())
        );
        assert_eq!(outcome.results[0].confidence, 1.7);
        assert_eq!(outcome.results[1].confidence, -0.3);
    }

    #[test]
    fn test_empty_request_yields_nothing() {
        let ids = SequentialIdGenerator::new("t");
        let outcome = reconcile(&[], &[judgment("Positive", 1.0)], &ids);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.fallbacks, 0);
    }
}
