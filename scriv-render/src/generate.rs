//! Document generation pipeline.
//!
//! Provides the high-level API for turning markdown input into an output
//! document. This module bridges the gap between the backend registry and
//! the callers: it accepts raw text, a file path, or ordered sections,
//! runs the one shared parse → assemble → render path, and reports the
//! outcome as a plain result value.
//!
//! Nothing in this module panics across its boundary. Parsing by design
//! cannot fail; everything else (missing converters, I/O, external process
//! exits) is folded into [`GenerationResult::error`].
//!
//! For more control over the conversion process, use [`BackendRegistry`]
//! directly.

use crate::backends::{BackendRegistry, RenderedOutput};
use crate::error::RenderError;
use crate::markdown::parse;
use crate::model::assemble;
use crate::options::GenerationOptions;
use crate::section::{aggregate, Section};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Source collaborator for reference lists.
///
/// Implementations own all citation logic; this crate only appends the
/// returned markdown fragment to the document body behind a divider.
pub trait ReferenceSource {
    /// Returns a pre-rendered markdown reference list for the given
    /// document and citation style, or None when nothing applies.
    fn reference_list(&self, document: &Path, style: &str) -> Option<String>;
}

/// The document input accepted by the generation entry points.
pub enum GenerateInput<'a> {
    /// Raw dialect text.
    Markdown(&'a str),
    /// Path to a UTF-8 document file.
    File(&'a Path),
    /// Ordered sections, merged through the aggregator.
    Sections(&'a [Section]),
}

/// Specifies one generation run.
///
/// Use the builder methods to configure the run:
///
/// ```ignore
/// let spec = GenerateSpec::new(GenerateInput::File(path), "pdf", output)
///     .with_options(options)
///     .with_reference_source(&citations);
/// ```
pub struct GenerateSpec<'a> {
    /// The document input to render.
    pub input: GenerateInput<'a>,
    /// Target backend name (e.g., "docx", "slides", "pdf").
    pub backend: &'a str,
    /// Path the output file is written to.
    pub output: PathBuf,
    /// Rendering options.
    pub options: GenerationOptions,
    /// Optional reference-list collaborator.
    pub references: Option<&'a dyn ReferenceSource>,
}

impl<'a> GenerateSpec<'a> {
    /// Creates a specification with default options and no collaborator.
    pub fn new(input: GenerateInput<'a>, backend: &'a str, output: impl Into<PathBuf>) -> Self {
        Self {
            input,
            backend,
            output: output.into(),
            options: GenerationOptions::default(),
            references: None,
        }
    }

    /// Replaces the rendering options.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches a reference-list collaborator.
    pub fn with_reference_source(mut self, source: &'a dyn ReferenceSource) -> Self {
        self.references = Some(source);
        self
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GenerationResult {
    pub success: bool,
    /// Path of the written output, present on success.
    pub output_path: Option<PathBuf>,
    /// Failure description, present on failure.
    pub error: Option<String>,
    /// Page count of the output when the backend could determine one.
    pub page_count: Option<u32>,
}

impl GenerationResult {
    fn completed(rendered: RenderedOutput) -> Self {
        GenerationResult {
            success: true,
            output_path: Some(rendered.path),
            error: None,
            page_count: rendered.page_count,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        GenerationResult {
            success: false,
            output_path: None,
            error: Some(error.into()),
            page_count: None,
        }
    }
}

/// Runs one generation. This is the only place errors cross from the
/// `Result` world into the flat result value handed back to callers.
pub fn generate(spec: GenerateSpec<'_>) -> GenerationResult {
    match run_pipeline(spec) {
        Ok(rendered) => GenerationResult::completed(rendered),
        Err(err) => GenerationResult::failed(err.to_string()),
    }
}

/// Renders raw dialect text.
pub fn generate_from_markdown(
    text: &str,
    backend: &str,
    output: impl Into<PathBuf>,
    options: GenerationOptions,
) -> GenerationResult {
    generate(GenerateSpec::new(GenerateInput::Markdown(text), backend, output).with_options(options))
}

/// Renders a document file (read as UTF-8).
pub fn generate_from_file(
    path: &Path,
    backend: &str,
    output: impl Into<PathBuf>,
    options: GenerationOptions,
) -> GenerationResult {
    generate(GenerateSpec::new(GenerateInput::File(path), backend, output).with_options(options))
}

/// Renders ordered sections through the aggregator.
pub fn generate_from_sections(
    sections: &[Section],
    backend: &str,
    output: impl Into<PathBuf>,
    options: GenerationOptions,
) -> GenerationResult {
    generate(
        GenerateSpec::new(GenerateInput::Sections(sections), backend, output)
            .with_options(options),
    )
}

fn run_pipeline(spec: GenerateSpec<'_>) -> Result<RenderedOutput, RenderError> {
    let source_file: Option<&Path> = match &spec.input {
        GenerateInput::File(path) => Some(path),
        _ => None,
    };

    let text = match &spec.input {
        GenerateInput::Markdown(text) => (*text).to_string(),
        GenerateInput::File(path) => fs::read_to_string(path)
            .map_err(|e| RenderError::Io(format!("{}: {e}", path.display())))?,
        GenerateInput::Sections(sections) => aggregate(sections),
    };
    let text = append_references(text, &spec, source_file);

    let blocks = parse(&text);
    let nodes = assemble(&blocks, &spec.options);

    let registry = BackendRegistry::with_defaults();
    let backend = registry.get(spec.backend)?;
    backend.render(&nodes, &spec.options, &spec.output)
}

/// Appends the collaborator's reference list behind a rule divider. The
/// lookup needs a file-backed document; other inputs skip it.
fn append_references(body: String, spec: &GenerateSpec<'_>, source_file: Option<&Path>) -> String {
    if !spec.options.include_citations {
        return body;
    }
    let Some(source) = spec.references else {
        return body;
    };
    let Some(document) = source_file else {
        debug!("reference lookup skipped: input is not file-backed");
        return body;
    };
    match source.reference_list(document, &spec.options.citation_style) {
        Some(fragment) if !fragment.trim().is_empty() => {
            format!("{body}\n\n---\n\n{fragment}")
        }
        _ => body,
    }
}
