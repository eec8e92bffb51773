//! Per-line block classification and inline span parsing.

use regex::Regex;

/// An inline run within a prose line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    /// Inline code with the backticks stripped.
    Code(String),
    Link {
        label: String,
        url: String,
    },
}

/// Classification of a single prose line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Quote(Vec<Span>),
    Bullet(Vec<Span>),
    Numbered(Vec<Span>),
    Paragraph(Vec<Span>),
    Blank,
}

/// Parses prose lines into blocks and inline spans.
///
/// Each line is classified independently; there is no multi-line state and
/// no nesting. Links are parsed before inline code, so code inside a link
/// label is left as-is.
pub struct LineParser {
    bullet: Regex,
    numbered: Regex,
    link: Regex,
    code: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            bullet: Regex::new(r"^\s*[-*+]\s").unwrap(),
            numbered: Regex::new(r"^\s*\d+\.\s").unwrap(),
            link: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap(),
            code: Regex::new(r"`[^`]+`").unwrap(),
        }
    }

    /// Classify one line of prose.
    pub fn classify_line(&self, line: &str) -> Block {
        if line.trim().is_empty() {
            return Block::Blank;
        }

        if line.starts_with('#') {
            let level = line.chars().take_while(|&c| c == '#').count().min(6) as u8;
            let text = line.trim_start_matches('#').trim_start();
            return Block::Heading {
                level,
                spans: self.parse_spans(text),
            };
        }

        if line.starts_with('>') {
            let text = line[1..].trim_start();
            return Block::Quote(self.parse_spans(text));
        }

        if self.numbered.is_match(line) {
            let text = self.numbered.replace(line, "");
            return Block::Numbered(self.parse_spans(&text));
        }

        if self.bullet.is_match(line) {
            let text = self.bullet.replace(line, "");
            return Block::Bullet(self.parse_spans(&text));
        }

        Block::Paragraph(self.parse_spans(line))
    }

    /// Parse inline links and code spans.
    pub fn parse_spans(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut last_end = 0;

        for caps in self.link.captures_iter(text) {
            let whole = caps.get(0).expect("capture 0 always present");
            if whole.start() > last_end {
                self.push_code_spans(&text[last_end..whole.start()], &mut spans);
            }
            spans.push(Span::Link {
                label: caps[1].to_string(),
                url: caps[2].to_string(),
            });
            last_end = whole.end();
        }

        if last_end < text.len() {
            self.push_code_spans(&text[last_end..], &mut spans);
        }

        spans
    }

    /// Split a link-free run into text and inline code spans.
    fn push_code_spans(&self, text: &str, spans: &mut Vec<Span>) {
        let mut last_end = 0;

        for m in self.code.find_iter(text) {
            if m.start() > last_end {
                spans.push(Span::Text(text[last_end..m.start()].to_string()));
            }
            spans.push(Span::Code(text[m.start() + 1..m.end() - 1].to_string()));
            last_end = m.end();
        }

        if last_end < text.len() {
            spans.push(Span::Text(text[last_end..].to_string()));
        }
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}
