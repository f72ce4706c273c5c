//! Slide-deck export via the external converter.
//!
//! Shares the source writer with the typesetting backend: level-1 headings
//! open new slides, page breaks become slide breaks, and the cover block
//! is handed over as metadata so the converter builds the title slide. A
//! named theme resolves to `<theme>.pptx` in the configured theme
//! directory and rides along as the reference document.

use crate::backends::external::{apply_metadata_flags, resolve_converter, run_converter};
use crate::backends::source::{flatten_to_source, SourceProfile};
use crate::backends::{Backend, RenderedOutput};
use crate::error::RenderError;
use crate::model::DocumentNode;
use crate::options::GenerationOptions;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Backend that shells out to the converter to produce slide decks.
#[derive(Default)]
pub struct SlidesBackend;

impl Backend for SlidesBackend {
    fn name(&self) -> &str {
        "slides"
    }

    fn description(&self) -> &str {
        "Slide-deck export via the external converter"
    }

    fn file_extension(&self) -> &str {
        "pptx"
    }

    fn render(
        &self,
        nodes: &[DocumentNode],
        options: &GenerationOptions,
        output: &Path,
    ) -> Result<RenderedOutput, RenderError> {
        let tool = resolve_converter(options)?;

        let staging = tempdir().map_err(|e| RenderError::Io(format!("staging dir: {e}")))?;
        let source_path = staging.path().join("deck.md");
        let source = flatten_to_source(nodes, SourceProfile::Slides);
        fs::write(&source_path, source).map_err(|e| RenderError::Io(e.to_string()))?;

        let mut command = Command::new(&tool);
        command
            .arg(&source_path)
            .arg("-t")
            .arg("pptx")
            .arg("--slide-level")
            .arg("1")
            .arg("-o")
            .arg(output);
        if let Some(reference) = resolve_theme_reference(options) {
            command.arg(format!("--reference-doc={}", reference.display()));
        }
        apply_metadata_flags(&mut command, options);
        run_converter(&mut command, &tool)?;

        Ok(RenderedOutput {
            path: output.to_path_buf(),
            page_count: None,
        })
    }
}

/// Maps a theme name to a reference document, if one is installed.
fn resolve_theme_reference(options: &GenerationOptions) -> Option<PathBuf> {
    let theme = options.theme.as_ref()?;
    let dir = options.theme_dir.as_ref()?;
    let candidate = dir.join(format!("{theme}.pptx"));
    if candidate.exists() {
        Some(candidate)
    } else {
        warn!(
            "theme '{theme}' has no reference document in {}; using converter defaults",
            dir.display()
        );
        None
    }
}
