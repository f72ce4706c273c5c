//! The scriv markdown dialect
//!
//! This module contains the hand-written parser for the constrained markdown
//! dialect that scriv documents are authored in. The dialect is deliberately
//! small: headings, paragraphs, fenced code, flat lists, pipe tables, block
//! quotes, and horizontal rules. Nested lists and nested quotes are outside
//! the dialect, as is most of CommonMark's lookahead machinery.
//!
//! Parsing never fails. Anything the dialect does not recognize degrades to
//! a plain paragraph, so every input maps to some valid block sequence.

pub mod block;
pub mod inline;

pub use block::parse;
pub use inline::{format_inline, InlineRun};

/// A top-level structural unit of a document.
///
/// The variant set is the complete dialect: a line of input is owned by
/// exactly one of these after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockElement {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    CodeBlock {
        lines: Vec<String>,
        language: Option<String>,
    },
    List { items: Vec<String>, ordered: bool },
    Table { rows: Vec<Vec<String>> },
    Blockquote { text: String },
    Rule,
}
