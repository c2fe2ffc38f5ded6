//! Sentence segmentation for quiz generation.
//!
//! The default [`NaiveSegmenter`] splits on every `.` and keeps the pieces
//! untouched, so decimals and abbreviations break sentences and leading
//! whitespace survives. [`TrimmedSegmenter`] is the stricter alternative.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Splits article text into sentence candidates.
pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Raw split on `.`; never returns an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSegmenter;

impl SentenceSegmenter for NaiveSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split('.').map(str::to_string).collect()
    }
}

/// Split on `.`, trim each piece and drop the blank ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimmedSegmenter;

impl SentenceSegmenter for TrimmedSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Segmenter selectable from config or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    #[default]
    Naive,
    Trimmed,
}

impl SentenceSegmenter for SegmenterKind {
    fn segment(&self, text: &str) -> Vec<String> {
        match self {
            SegmenterKind::Naive => NaiveSegmenter.segment(text),
            SegmenterKind::Trimmed => TrimmedSegmenter.segment(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_keeps_whitespace_and_trailing_piece() {
        let parts = NaiveSegmenter.segment("One. Two. Three.");
        assert_eq!(parts, vec!["One", " Two", " Three", ""]);
    }

    #[test]
    fn test_naive_empty_text() {
        assert_eq!(NaiveSegmenter.segment(""), vec![""]);
    }

    #[test]
    fn test_naive_splits_decimals() {
        let parts = NaiveSegmenter.segment("Rates rose 2.5 percent");
        assert_eq!(parts, vec!["Rates rose 2", "5 percent"]);
    }

    #[test]
    fn test_trimmed_drops_blanks() {
        let parts = TrimmedSegmenter.segment("  One.  Two. . Three.");
        assert_eq!(parts, vec!["One", "Two", "Three"]);
        assert!(TrimmedSegmenter.segment("").is_empty());
    }

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(SegmenterKind::Naive.segment("A. B"), vec!["A", " B"]);
        assert_eq!(SegmenterKind::Trimmed.segment("A. B"), vec!["A", "B"]);
        let kind: SegmenterKind = serde_yaml::from_str("trimmed").unwrap();
        assert_eq!(kind, SegmenterKind::Trimmed);
    }
}
