//! Terminal rendering of assistant replies.

use crossterm::style::Stylize;

use crate::inline::{Block, LineParser, Span};
use crate::segment::{Segment, Segmenter};

/// Renders assistant markdown as styled terminal text.
pub struct Renderer {
    segmenter: Segmenter,
    lines: LineParser,
    color: bool,
}

impl Renderer {
    /// Renderer with ANSI styling enabled.
    pub fn new() -> Self {
        Self {
            segmenter: Segmenter::new(),
            lines: LineParser::new(),
            color: true,
        }
    }

    /// Renderer without styling, for tests and non-tty output.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::new()
        }
    }

    /// Render a full assistant reply.
    pub fn render(&self, text: &str) -> String {
        let mut out = String::new();

        for segment in self.segmenter.segment(text) {
            match segment {
                Segment::Code { language, content } => {
                    self.render_code(&language, &content, &mut out)
                }
                Segment::Prose(prose) => self.render_prose(&prose, &mut out),
            }
        }

        out
    }

    fn render_code(&self, language: &str, content: &str, out: &mut String) {
        let header = format!("── {} ──", language);
        if self.color {
            out.push_str(&format!("{}\n", header.as_str().dark_grey()));
            for line in content.lines() {
                out.push_str(&format!("    {}\n", line.cyan()));
            }
        } else {
            out.push_str(&header);
            out.push('\n');
            for line in content.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    fn render_prose(&self, prose: &str, out: &mut String) {
        // Numbered items are renumbered per contiguous run.
        let mut number = 0usize;

        for line in prose.lines() {
            let block = self.lines.classify_line(line);
            if !matches!(block, Block::Numbered(_)) {
                number = 0;
            }

            match block {
                Block::Blank => out.push('\n'),
                Block::Heading { spans, .. } => {
                    let text = self.spans_to_plain(&spans);
                    if self.color {
                        out.push_str(&format!("{}\n", text.as_str().bold()));
                    } else {
                        out.push_str(&text);
                        out.push('\n');
                    }
                }
                Block::Quote(spans) => {
                    let text = self.render_spans(&spans);
                    if self.color {
                        out.push_str(&format!("{} {}\n", "│".dark_grey(), text));
                    } else {
                        out.push_str("│ ");
                        out.push_str(&text);
                        out.push('\n');
                    }
                }
                Block::Bullet(spans) => {
                    out.push_str("  • ");
                    out.push_str(&self.render_spans(&spans));
                    out.push('\n');
                }
                Block::Numbered(spans) => {
                    number += 1;
                    out.push_str(&format!("  {}. ", number));
                    out.push_str(&self.render_spans(&spans));
                    out.push('\n');
                }
                Block::Paragraph(spans) => {
                    out.push_str(&self.render_spans(&spans));
                    out.push('\n');
                }
            }
        }
    }

    fn render_spans(&self, spans: &[Span]) -> String {
        let mut out = String::new();
        for span in spans {
            match span {
                Span::Text(text) => out.push_str(text),
                Span::Code(code) => {
                    if self.color {
                        out.push_str(&format!("{}", code.as_str().yellow()));
                    } else {
                        out.push('`');
                        out.push_str(code);
                        out.push('`');
                    }
                }
                Span::Link { label, url } => {
                    if self.color {
                        out.push_str(&format!("{} ({})", label.as_str().underlined(), url));
                    } else {
                        out.push_str(&format!("{} ({})", label, url));
                    }
                }
            }
        }
        out
    }

    fn spans_to_plain(&self, spans: &[Span]) -> String {
        let mut out = String::new();
        for span in spans {
            match span {
                Span::Text(text) => out.push_str(text),
                Span::Code(code) => out.push_str(code),
                Span::Link { label, url } => out.push_str(&format!("{} ({})", label, url)),
            }
        }
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraphs_and_blanks() {
        let renderer = Renderer::plain();
        let out = renderer.render("first\n\nsecond");
        assert_eq!(out, "first\n\nsecond\n");
    }

    #[test]
    fn test_plain_bullets_and_numbering() {
        let renderer = Renderer::plain();
        let out = renderer.render("- alpha\n- beta\n\n3. one\n7. two");
        assert_eq!(out, "  • alpha\n  • beta\n\n  1. one\n  2. two\n");
    }

    #[test]
    fn test_numbering_resets_between_runs() {
        let renderer = Renderer::plain();
        let out = renderer.render("1. first\ntext\n1. again");
        assert_eq!(out, "  1. first\ntext\n  1. again\n");
    }

    #[test]
    fn test_code_block_rendering() {
        let renderer = Renderer::plain();
        let out = renderer.render("intro\n```rust\nlet x = 1;\n```");
        assert_eq!(out, "intro\n── rust ──\n    let x = 1;\n");
    }

    #[test]
    fn test_inline_code_kept_in_plain_mode() {
        let renderer = Renderer::plain();
        let out = renderer.render("run `cargo test` now");
        assert_eq!(out, "run `cargo test` now\n");
    }

    #[test]
    fn test_quote_and_heading() {
        let renderer = Renderer::plain();
        let out = renderer.render("# Title\n> words");
        assert_eq!(out, "Title\n│ words\n");
    }
}
