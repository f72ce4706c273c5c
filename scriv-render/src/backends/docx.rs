//! Word-processor package export built on docx-rs.
//!
//! The node list maps one-to-one onto package paragraphs and tables:
//! heading nodes use named heading styles, code lines render in the
//! configured monospace face, tables bold their first row and pad ragged
//! rows to the grid's column count, and a running footer carries a
//! page-number field. Document defaults (font family and size) come from
//! the options, never from constants baked into this module.
//!
//! The package is serialized into a memory buffer first and the output
//! file is written in a single step, so a failure part-way through the
//! build never leaves a truncated package on disk.

use crate::backends::{Backend, RenderedOutput};
use crate::error::RenderError;
use crate::markdown::InlineRun;
use crate::model::DocumentNode;
use crate::options::GenerationOptions;
use docx_rs::{
    AlignmentType, BreakType, Docx, FieldCharType, Footer, Hyperlink, HyperlinkType, InstrText,
    Paragraph, Run, RunFonts, Style, StyleType, Table, TableCell, TableOfContents, TableRow,
};
use std::fs;
use std::io::Cursor;
use std::path::Path;

const LINK_COLOR: &str = "0563C1";
const BLOCKQUOTE_INDENT: i32 = 720;
const LIST_INDENT: i32 = 360;

/// Backend producing the word-processor package.
#[derive(Default)]
pub struct DocxBackend;

impl Backend for DocxBackend {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word-processor package export"
    }

    fn file_extension(&self) -> &str {
        "docx"
    }

    fn render(
        &self,
        nodes: &[DocumentNode],
        options: &GenerationOptions,
        output: &Path,
    ) -> Result<RenderedOutput, RenderError> {
        let package = build_package(nodes, options);

        let mut buffer = Cursor::new(Vec::new());
        package
            .build()
            .pack(&mut buffer)
            .map_err(|e| RenderError::Render(format!("package serialization failed: {e}")))?;
        fs::write(output, buffer.into_inner())
            .map_err(|e| RenderError::Io(format!("{}: {e}", output.display())))?;

        Ok(RenderedOutput {
            path: output.to_path_buf(),
            page_count: None,
        })
    }
}

fn build_package(nodes: &[DocumentNode], options: &GenerationOptions) -> Docx {
    let base_size = options.font_size_pt as usize * 2;
    let (width, height) = options.page_size.package_dimensions();

    let mut package = Docx::new()
        .default_fonts(RunFonts::new().ascii(&options.font_family))
        .default_size(base_size)
        .page_size(width, height)
        .footer(page_number_footer());

    for level in 1..=6u8 {
        package = package.add_style(heading_style(level, options));
    }

    if options.include_toc {
        package = package.add_table_of_contents(
            TableOfContents::new()
                .heading_styles_range(1, options.toc_depth as usize)
                .alias("Table of Contents"),
        );
    }

    for node in nodes {
        package = append_node(package, node, options);
    }
    package
}

/// Heading sizes scale off the base font size rather than fixed points.
fn heading_style(level: u8, options: &GenerationOptions) -> Style {
    let base = options.font_size_pt as usize * 2;
    let extra = match level {
        1 => 12,
        2 => 8,
        3 => 4,
        _ => 2,
    };
    Style::new(format!("Heading{level}"), StyleType::Paragraph)
        .name(format!("Heading {level}"))
        .size(base + extra)
        .bold()
}

/// Centered footer with a live PAGE field so the numbering follows the
/// final pagination instead of being baked in.
fn page_number_footer() -> Footer {
    let paragraph = Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(Run::new().add_field_char(FieldCharType::Begin, false))
        .add_run(Run::new().add_instr_text(InstrText::Unsupported("PAGE".to_string())))
        .add_run(Run::new().add_field_char(FieldCharType::End, false));
    Footer::new().add_paragraph(paragraph)
}

fn append_node(package: Docx, node: &DocumentNode, options: &GenerationOptions) -> Docx {
    let base_size = options.font_size_pt as usize * 2;
    match node {
        DocumentNode::CoverTitle { text } => package.add_paragraph(
            cover_paragraph(text, base_size * 2, true),
        ),
        DocumentNode::CoverSubtitle { text } => {
            package.add_paragraph(cover_paragraph(text, base_size * 3 / 2, false))
        }
        DocumentNode::CoverByline { text } | DocumentNode::CoverDate { text } => {
            package.add_paragraph(cover_paragraph(text, base_size, false))
        }
        DocumentNode::PageBreak => package
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page))),
        DocumentNode::Heading { level, runs } => package.add_paragraph(
            paragraph_from_runs(runs, options).style(&format!("Heading{level}")),
        ),
        DocumentNode::Paragraph { runs } => {
            package.add_paragraph(paragraph_from_runs(runs, options))
        }
        DocumentNode::CodeLabel { language } => package.add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(language)
                    .italic()
                    .size(base_size.saturating_sub(4)),
            ),
        ),
        DocumentNode::CodeLine { text } => package.add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(text)
                    .fonts(RunFonts::new().ascii(&options.code_font_family))
                    .size(base_size.saturating_sub(2)),
            ),
        ),
        DocumentNode::CodeSpacer => package.add_paragraph(Paragraph::new()),
        DocumentNode::ListItem { prefix, runs } => {
            let mut paragraph = Paragraph::new()
                .indent(Some(LIST_INDENT), None, None, None)
                .add_run(Run::new().add_text(prefix));
            paragraph = extend_with_runs(paragraph, runs, options);
            package.add_paragraph(paragraph)
        }
        DocumentNode::TableGrid { rows, columns } => {
            if rows.is_empty() || *columns == 0 {
                package
            } else {
                package.add_table(grid_table(rows, *columns))
            }
        }
        DocumentNode::Blockquote { text } => {
            let mut package = package;
            for line in text.lines() {
                package = package.add_paragraph(
                    Paragraph::new()
                        .indent(Some(BLOCKQUOTE_INDENT), None, None, None)
                        .add_run(Run::new().add_text(line).italic()),
                );
            }
            package
        }
        DocumentNode::Divider => package.add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text("\u{2500}".repeat(30))),
        ),
    }
}

fn cover_paragraph(text: &str, size: usize, bold: bool) -> Paragraph {
    let mut run = Run::new().add_text(text).size(size);
    if bold {
        run = run.bold();
    }
    Paragraph::new().align(AlignmentType::Center).add_run(run)
}

fn paragraph_from_runs(runs: &[InlineRun], options: &GenerationOptions) -> Paragraph {
    extend_with_runs(Paragraph::new(), runs, options)
}

fn extend_with_runs(
    mut paragraph: Paragraph,
    runs: &[InlineRun],
    options: &GenerationOptions,
) -> Paragraph {
    for run in runs {
        paragraph = match run {
            InlineRun::Plain(text) => paragraph.add_run(Run::new().add_text(text)),
            InlineRun::Bold(text) => paragraph.add_run(Run::new().add_text(text).bold()),
            InlineRun::Italic(text) => paragraph.add_run(Run::new().add_text(text).italic()),
            InlineRun::BoldItalic(text) => {
                paragraph.add_run(Run::new().add_text(text).bold().italic())
            }
            InlineRun::Code(text) => paragraph.add_run(
                Run::new()
                    .add_text(text)
                    .fonts(RunFonts::new().ascii(&options.code_font_family)),
            ),
            InlineRun::Link { text, url } => paragraph.add_hyperlink(
                Hyperlink::new(url, HyperlinkType::External).add_run(
                    Run::new()
                        .add_text(text)
                        .underline("single")
                        .color(LINK_COLOR),
                ),
            ),
        };
    }
    paragraph
}

/// The first row is the header row; short rows pad with empty cells so
/// every row spans the full grid.
fn grid_table(rows: &[Vec<String>], columns: usize) -> Table {
    let mut table_rows = Vec::with_capacity(rows.len());
    for (row_index, row) in rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns);
        for col in 0..columns {
            let text = row.get(col).map(String::as_str).unwrap_or("");
            let mut run = Run::new().add_text(text);
            if row_index == 0 {
                run = run.bold();
            }
            cells.push(TableCell::new().add_paragraph(Paragraph::new().add_run(run)));
        }
        table_rows.push(TableRow::new(cells));
    }
    Table::new(table_rows)
}
