//! Fenced code block segmentation.

use regex::Regex;

/// One segment of assistant text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain prose, possibly containing inline markdown.
    Prose(String),
    /// A fenced code block with the fences stripped.
    Code { language: String, content: String },
}

/// Splits text into alternating prose and code segments.
pub struct Segmenter {
    fence: Regex,
}

impl Segmenter {
    pub fn new() -> Self {
        Self {
            fence: Regex::new(r"```(\w+)?\n?([\s\S]*?)```").unwrap(),
        }
    }

    /// Partition `text` into prose and code segments.
    ///
    /// Whitespace-only prose between fences is dropped. Code content is
    /// trimmed and excludes the fences; a missing language tag maps to
    /// `"text"`. Input without fences yields exactly one prose segment
    /// equal to the input.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let mut parts = Vec::new();
        let mut last_end = 0;

        for caps in self.fence.captures_iter(text) {
            let whole = caps.get(0).expect("capture 0 always present");

            if whole.start() > last_end {
                let before = &text[last_end..whole.start()];
                if !before.trim().is_empty() {
                    parts.push(Segment::Prose(before.to_string()));
                }
            }

            let language = caps
                .get(1)
                .map(|m| m.as_str())
                .unwrap_or("text")
                .to_string();
            let content = caps
                .get(2)
                .map(|m| m.as_str())
                .unwrap_or("")
                .trim()
                .to_string();
            parts.push(Segment::Code { language, content });

            last_end = whole.end();
        }

        if last_end < text.len() {
            let rest = &text[last_end..];
            if !rest.trim().is_empty() {
                parts.push(Segment::Prose(rest.to_string()));
            }
        }

        // No fences found: the whole input is one prose segment.
        if parts.is_empty() {
            parts.push(Segment::Prose(text.to_string()));
        }

        parts
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}
