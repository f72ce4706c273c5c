//! Block sequence → document node list.

use crate::markdown::{format_inline, BlockElement};
use crate::model::DocumentNode;
use crate::options::GenerationOptions;
use chrono::Local;

/// A code line with no visible content still needs a rendered row; a
/// single non-breaking space guarantees one in every backend.
const BLANK_CODE_LINE: &str = "\u{00A0}";

/// Combines parsed blocks and generation options into the node list all
/// backends consume.
pub fn assemble(blocks: &[BlockElement], options: &GenerationOptions) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();

    if options.include_cover_page && !options.cover.title.is_empty() {
        push_cover_nodes(&mut nodes, options);
    }

    for block in blocks {
        match block {
            BlockElement::Heading { level, text } => {
                nodes.push(DocumentNode::Heading {
                    level: clamp_level(*level),
                    runs: format_inline(text),
                });
            }
            BlockElement::Paragraph { text } => {
                nodes.push(DocumentNode::Paragraph {
                    runs: format_inline(text),
                });
            }
            BlockElement::CodeBlock { lines, language } => {
                if let Some(language) = language {
                    nodes.push(DocumentNode::CodeLabel {
                        language: language.clone(),
                    });
                }
                for line in lines {
                    let text = if line.trim().is_empty() {
                        BLANK_CODE_LINE.to_string()
                    } else {
                        line.clone()
                    };
                    nodes.push(DocumentNode::CodeLine { text });
                }
                nodes.push(DocumentNode::CodeSpacer);
            }
            BlockElement::List { items, ordered } => {
                for (index, item) in items.iter().enumerate() {
                    let prefix = if *ordered {
                        format!("{}. ", index + 1)
                    } else {
                        "\u{2022} ".to_string()
                    };
                    nodes.push(DocumentNode::ListItem {
                        prefix,
                        runs: format_inline(item),
                    });
                }
            }
            BlockElement::Table { rows } => {
                let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
                nodes.push(DocumentNode::TableGrid {
                    rows: rows.clone(),
                    columns,
                });
            }
            BlockElement::Blockquote { text } => {
                nodes.push(DocumentNode::Blockquote { text: text.clone() });
            }
            BlockElement::Rule => nodes.push(DocumentNode::Divider),
        }
    }

    nodes
}

/// Heading levels are stored as parsed; values outside 1..6 clamp to 1 at
/// this boundary, never earlier.
fn clamp_level(level: u8) -> u8 {
    if (1..=6).contains(&level) {
        level
    } else {
        1
    }
}

fn push_cover_nodes(nodes: &mut Vec<DocumentNode>, options: &GenerationOptions) {
    let cover = &options.cover;
    nodes.push(DocumentNode::CoverTitle {
        text: cover.title.clone(),
    });
    if let Some(subtitle) = &cover.subtitle {
        nodes.push(DocumentNode::CoverSubtitle {
            text: subtitle.clone(),
        });
    }
    if let Some(author) = &cover.author {
        nodes.push(DocumentNode::CoverByline {
            text: author.clone(),
        });
    }
    if let Some(organization) = &cover.organization {
        nodes.push(DocumentNode::CoverByline {
            text: organization.clone(),
        });
    }
    let date = cover
        .date
        .clone()
        .unwrap_or_else(|| Local::now().format("%B %-d, %Y").to_string());
    nodes.push(DocumentNode::CoverDate { text: date });
    nodes.push(DocumentNode::PageBreak);
}
