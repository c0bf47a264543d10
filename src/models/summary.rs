use serde::Serialize;

use super::{AnalysisResult, Sentiment};

/// 一组结果的汇总统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub unrecognized: usize,
    pub avg_confidence: f64,
}

impl BatchSummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a AnalysisResult>,
    {
        let mut summary = Self::default();
        let mut confidence_sum = 0.0;

        for result in results {
            summary.total += 1;
            confidence_sum += result.confidence;
            match result.sentiment {
                Sentiment::Positive => summary.positive += 1,
                Sentiment::Negative => summary.negative += 1,
                Sentiment::Neutral => summary.neutral += 1,
                Sentiment::Unrecognized(_) => summary.unrecognized += 1,
            }
        }

        if summary.total > 0 {
            summary.avg_confidence = confidence_sum / summary.total as f64;
        }
        summary
    }

    /// 平均置信度的百分比（四舍五入）
    pub fn avg_confidence_percent(&self) -> i64 {
        confidence_percent(self.avg_confidence)
    }

    /// 非零的分类计数，按 Positive / Negative / Neutral / 其他 排列
    pub fn distribution(&self) -> Vec<(&'static str, usize)> {
        [
            ("Positive", self.positive),
            ("Negative", self.negative),
            ("Neutral", self.neutral),
            ("Other", self.unrecognized),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// 置信度转百分比整数，不截断越界值
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Judgment;

    fn result(sentiment: Sentiment, confidence: f64) -> AnalysisResult {
        AnalysisResult::new(
            "x".into(),
            "t".into(),
            Judgment {
                sentiment,
                confidence,
                keywords: vec![],
                explanation: String::new(),
            },
        )
    }

    #[test]
    fn test_empty_summary_has_zero_average() {
        let summary = BatchSummary::from_results(&Vec::<AnalysisResult>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_confidence, 0.0);
        assert!(summary.distribution().is_empty());
    }

    #[test]
    fn test_counts_and_average() {
        let results = vec![
            result(Sentiment::Positive, 0.9),
            result(Sentiment::Positive, 0.7),
            result(Sentiment::Negative, 0.5),
            result(Sentiment::Unrecognized("Mixed".into()), 0.3),
        ];
        let summary = BatchSummary::from_results(&results);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 0);
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(summary.avg_confidence_percent(), 60);
        assert_eq!(
            summary.distribution(),
            vec![("Positive", 2), ("Negative", 1), ("Other", 1)]
        );
    }

    #[test]
    fn test_out_of_range_confidence_passes_through() {
        assert_eq!(confidence_percent(1.7), 170);
        assert_eq!(confidence_percent(-0.25), -25);
    }
}
