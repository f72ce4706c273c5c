//! Block-level parsing
//!
//! A line cursor walks the input once. Each non-blank line is classified
//! into a [`LineKind`] and the matching consumer takes over until its block
//! ends. [`classify`] is the single place the match priority lives, so the
//! rule order can be audited and tested in isolation instead of being
//! implied by a chain of `if` fallthroughs.

use super::BlockElement;

/// Classification of a single source line.
///
/// `classify` tries the variants top to bottom and returns the first hit;
/// `Text` is the fallback for anything unrecognized.
#[derive(Debug, Clone, PartialEq)]
enum LineKind {
    Blank,
    Rule,
    Heading { level: u8, text: String },
    FenceOpen { language: Option<String> },
    UnorderedItem(String),
    OrderedItem(String),
    TableRow,
    Quote(String),
    Text,
}

fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    let trimmed = line.trim();
    if trimmed == "---" || trimmed == "***" || trimmed == "___" {
        return LineKind::Rule;
    }
    if let Some((level, text)) = match_heading(line) {
        return LineKind::Heading { level, text };
    }
    if let Some(language) = match_fence(line) {
        return LineKind::FenceOpen { language };
    }
    if let Some(text) = match_unordered_item(line) {
        return LineKind::UnorderedItem(text);
    }
    if let Some(text) = match_ordered_item(line) {
        return LineKind::OrderedItem(text);
    }
    if line.contains('|') {
        return LineKind::TableRow;
    }
    if line.starts_with('>') {
        return LineKind::Quote(strip_quote_marker(line));
    }
    LineKind::Text
}

/// One to six `#` characters, mandatory whitespace, non-empty remainder.
///
/// Seven or more hashes (or a missing space) is not a heading and falls
/// through to the paragraph rule.
fn match_heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text.to_string()))
}

fn match_fence(line: &str) -> Option<Option<String>> {
    let rest = line.strip_prefix("```")?;
    let tag = rest.trim();
    if tag.is_empty() {
        Some(None)
    } else {
        Some(Some(tag.to_string()))
    }
}

fn match_unordered_item(line: &str) -> Option<String> {
    let mut chars = line.chars();
    let marker = chars.next()?;
    if !matches!(marker, '-' | '*' | '+') {
        return None;
    }
    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start().to_string())
}

fn match_ordered_item(line: &str) -> Option<String> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start().to_string())
}

/// Strips the `>` marker and one optional following space.
fn strip_quote_marker(line: &str) -> String {
    let rest = &line[1..];
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

fn split_table_row(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.split('|').map(|cell| cell.trim().to_string()).collect();
    // Outer pipes produce empty first/last cells; interior empties survive.
    if cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    cells
}

/// A separator row is discarded rather than added to the table: every
/// non-empty cell consists solely of `-` and `:` characters.
fn is_separator_row(cells: &[String]) -> bool {
    cells
        .iter()
        .filter(|cell| !cell.is_empty())
        .all(|cell| cell.chars().all(|ch| ch == '-' || ch == ':'))
}

/// Parses raw dialect text into an ordered block sequence.
///
/// This function cannot fail: unrecognized input is accumulated into
/// paragraphs. An unterminated code fence deliberately swallows the rest of
/// the input as a single code block.
pub fn parse(text: &str) -> Vec<BlockElement> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match classify(lines[i]) {
            LineKind::Blank => {
                i += 1;
            }
            LineKind::Rule => {
                blocks.push(BlockElement::Rule);
                i += 1;
            }
            LineKind::Heading { level, text } => {
                blocks.push(BlockElement::Heading { level, text });
                i += 1;
            }
            LineKind::FenceOpen { language } => {
                i += 1;
                let mut code_lines = Vec::new();
                while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                    code_lines.push(lines[i].to_string());
                    i += 1;
                }
                if i < lines.len() {
                    // Skip the closing fence.
                    i += 1;
                }
                blocks.push(BlockElement::CodeBlock {
                    lines: code_lines,
                    language,
                });
            }
            LineKind::UnorderedItem(first) => {
                let mut items = vec![first];
                i += 1;
                while i < lines.len() {
                    match match_unordered_item(lines[i]) {
                        Some(item) => {
                            items.push(item);
                            i += 1;
                        }
                        None => break,
                    }
                }
                blocks.push(BlockElement::List {
                    items,
                    ordered: false,
                });
            }
            LineKind::OrderedItem(first) => {
                let mut items = vec![first];
                i += 1;
                while i < lines.len() {
                    match match_ordered_item(lines[i]) {
                        Some(item) => {
                            items.push(item);
                            i += 1;
                        }
                        None => break,
                    }
                }
                blocks.push(BlockElement::List {
                    items,
                    ordered: true,
                });
            }
            LineKind::TableRow => {
                let mut rows = Vec::new();
                while i < lines.len() && lines[i].contains('|') {
                    let cells = split_table_row(lines[i]);
                    if !is_separator_row(&cells) {
                        rows.push(cells);
                    }
                    i += 1;
                }
                blocks.push(BlockElement::Table { rows });
            }
            LineKind::Quote(first) => {
                let mut parts = vec![first];
                i += 1;
                while i < lines.len() && lines[i].starts_with('>') {
                    parts.push(strip_quote_marker(lines[i]));
                    i += 1;
                }
                blocks.push(BlockElement::Blockquote {
                    text: parts.join("\n"),
                });
            }
            LineKind::Text => {
                let mut parts = vec![lines[i].trim().to_string()];
                i += 1;
                while i < lines.len() && classify(lines[i]) == LineKind::Text {
                    parts.push(lines[i].trim().to_string());
                    i += 1;
                }
                blocks.push(BlockElement::Paragraph {
                    text: parts.join(" "),
                });
            }
        }
    }

    blocks
}
