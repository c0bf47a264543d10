//! 结果历史
//!
//! 最近优先的有界缓冲。每次写入一整批：整批插到最前面并保持批内顺序，
//! 超出容量的部分从尾部丢弃。只存在于内存中。

use std::collections::VecDeque;

use crate::config::HISTORY_CAPACITY;
use crate::models::{AnalysisResult, BatchSummary};

#[derive(Debug, Clone)]
pub struct ResultHistory {
    entries: VecDeque<AnalysisResult>,
    capacity: usize,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 写入一批结果
    pub fn record(&mut self, batch: Vec<AnalysisResult>) {
        for result in batch.into_iter().rev() {
            self.entries.push_front(result);
        }
        self.entries.truncate(self.capacity);
    }

    /// 最近优先
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<AnalysisResult> {
        self.entries.iter().cloned().collect()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_results(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ResultHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Judgment;

    fn batch(texts: &[&str]) -> Vec<AnalysisResult> {
        texts
            .iter()
            .map(|t| AnalysisResult::new(t.to_string(), t.to_string(), Judgment::fallback()))
            .collect()
    }

    fn texts(history: &ResultHistory) -> Vec<String> {
        history.iter().map(|r| r.text.clone()).collect()
    }

    #[test]
    fn test_new_batch_goes_first_in_order() {
        let mut history = ResultHistory::new();
        history.record(batch(&["a1", "a2"]));
        history.record(batch(&["b1", "b2", "b3"]));

        assert_eq!(texts(&history), vec!["b1", "b2", "b3", "a1", "a2"]);
    }

    #[test]
    fn test_oldest_entries_are_dropped() {
        let mut history = ResultHistory::with_capacity(4);
        history.record(batch(&["a1", "a2", "a3"]));
        history.record(batch(&["b1", "b2"]));

        assert_eq!(texts(&history), vec!["b1", "b2", "a1", "a2"]);
    }

    #[test]
    fn test_oversized_batch_keeps_its_head() {
        let mut history = ResultHistory::with_capacity(2);
        history.record(batch(&["x1", "x2", "x3"]));
        assert_eq!(texts(&history), vec!["x1", "x2"]);
    }

    #[test]
    fn test_default_capacity() {
        let mut history = ResultHistory::default();
        let big: Vec<String> = (0..250).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = big.iter().map(String::as_str).collect();
        history.record(batch(&refs));

        assert_eq!(history.capacity(), HISTORY_CAPACITY);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.summary().total, HISTORY_CAPACITY);
    }
}
