//! # Plume markdown
//!
//! A small markdown subset used to render assistant replies in a terminal:
//!
//! - [`Segmenter`] splits text into alternating prose and fenced-code
//!   segments with a single non-nested pattern.
//! - [`LineParser`] classifies prose lines (headings, quotes, list items)
//!   and parses inline code spans and links.
//! - [`Renderer`] turns the whole thing into styled terminal output.
//!
//! This is deliberately not a full markdown grammar: no nesting, no escape
//! handling for malformed fences, the entire string is processed at once.

mod inline;
mod render;
mod segment;

pub use inline::{Block, LineParser, Span};
pub use render::Renderer;
pub use segment::{Segment, Segmenter};
