//! Shared source writer for the external-converter backends.
//!
//! Re-flattens the document node list back into markdown-like source plus
//! layout directives. The typesetting profile emits raw layout commands
//! for the cover block and page breaks; the slide profile skips the cover
//! (the converter builds the title slide from metadata) and turns page
//! breaks into slide breaks.

use crate::markdown::InlineRun;
use crate::model::DocumentNode;

/// Which converter profile the source is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceProfile {
    Typeset,
    Slides,
}

/// Flattens nodes into converter source text.
pub fn flatten_to_source(nodes: &[DocumentNode], profile: SourceProfile) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_code = false;

    for node in nodes {
        // Any non-code node closes an open fence first.
        if in_code
            && !matches!(
                node,
                DocumentNode::CodeLine { .. } | DocumentNode::CodeSpacer
            )
        {
            out.push("```\n".to_string());
            in_code = false;
        }

        match node {
            DocumentNode::CoverTitle { text } => {
                if profile == SourceProfile::Typeset {
                    out.push(format!(
                        "\\begin{{center}}\\Huge \\textbf{{{text}}}\\end{{center}}\n"
                    ));
                }
            }
            DocumentNode::CoverSubtitle { text } => {
                if profile == SourceProfile::Typeset {
                    out.push(format!("\\begin{{center}}\\Large {text}\\end{{center}}\n"));
                }
            }
            DocumentNode::CoverByline { text } | DocumentNode::CoverDate { text } => {
                if profile == SourceProfile::Typeset {
                    out.push(format!("\\begin{{center}}{text}\\end{{center}}\n"));
                }
            }
            DocumentNode::PageBreak => match profile {
                SourceProfile::Typeset => out.push("\\newpage\n".to_string()),
                SourceProfile::Slides => out.push("---\n".to_string()),
            },
            DocumentNode::Heading { level, runs } => {
                let marks = "#".repeat(*level as usize);
                out.push(format!("{marks} {}\n", runs_to_source(runs)));
            }
            DocumentNode::Paragraph { runs } => {
                out.push(format!("{}\n", runs_to_source(runs)));
            }
            DocumentNode::CodeLabel { language } => {
                out.push(format!("```{language}"));
                in_code = true;
            }
            DocumentNode::CodeLine { text } => {
                if !in_code {
                    out.push("```".to_string());
                    in_code = true;
                }
                // The assembler substitutes a non-breaking space for blank
                // code lines; restore the blank line in source form.
                if text == "\u{00A0}" {
                    out.push(String::new());
                } else {
                    out.push(text.clone());
                }
            }
            DocumentNode::CodeSpacer => {
                if in_code {
                    out.push("```\n".to_string());
                    in_code = false;
                }
            }
            DocumentNode::ListItem { prefix, runs } => {
                let text = runs_to_source(runs);
                if prefix.starts_with(|c: char| c.is_ascii_digit()) {
                    out.push(format!("{prefix}{text}\n"));
                } else {
                    out.push(format!("- {text}\n"));
                }
            }
            DocumentNode::TableGrid { rows, columns } => {
                if !rows.is_empty() && *columns > 0 {
                    out.push(grid_to_source(rows, *columns));
                }
            }
            DocumentNode::Blockquote { text } => {
                let quoted: Vec<String> =
                    text.lines().map(|line| format!("> {line}")).collect();
                out.push(format!("{}\n", quoted.join("\n")));
            }
            DocumentNode::Divider => out.push("---\n".to_string()),
        }
    }
    if in_code {
        out.push("```\n".to_string());
    }

    let mut source = out.join("\n");
    source.push('\n');
    source
}

fn grid_to_source(rows: &[Vec<String>], columns: usize) -> String {
    let mut lines = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns);
        for col in 0..columns {
            cells.push(row.get(col).map(String::as_str).unwrap_or(""));
        }
        lines.push(format!("| {} |", cells.join(" | ")));
        if index == 0 {
            let separator = vec!["---"; columns];
            lines.push(format!("| {} |", separator.join(" | ")));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

fn runs_to_source(runs: &[InlineRun]) -> String {
    let mut text = String::new();
    for run in runs {
        match run {
            InlineRun::Plain(t) => text.push_str(t),
            InlineRun::Bold(t) => {
                text.push_str("**");
                text.push_str(t);
                text.push_str("**");
            }
            InlineRun::Italic(t) => {
                text.push('*');
                text.push_str(t);
                text.push('*');
            }
            InlineRun::BoldItalic(t) => {
                text.push_str("***");
                text.push_str(t);
                text.push_str("***");
            }
            InlineRun::Code(t) => {
                text.push('`');
                text.push_str(t);
                text.push('`');
            }
            InlineRun::Link { text: label, url } => {
                text.push_str(&format!("[{label}]({url})"));
            }
        }
    }
    text
}
