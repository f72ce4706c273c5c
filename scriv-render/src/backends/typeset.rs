//! PDF export via the external typesetting converter.
//!
//! The node list is re-flattened to converter source, staged in a private
//! temporary directory, and handed to the converter together with layout
//! flags derived from the options. Every invocation gets its own staging
//! directory, so concurrent calls cannot collide; cleanup happens when the
//! directory guard drops and any failure there is ignored.
//!
//! The page count comes from a second, optional utility (`pdfinfo`). Its
//! absence degrades to "no page count", never to a failed generation.

use crate::backends::external::{apply_metadata_flags, resolve_converter, run_converter};
use crate::backends::source::{flatten_to_source, SourceProfile};
use crate::backends::{Backend, RenderedOutput};
use crate::error::RenderError;
use crate::model::DocumentNode;
use crate::options::GenerationOptions;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use which::which;

/// Backend that shells out to the typesetting converter to produce PDFs.
#[derive(Default)]
pub struct TypesetBackend;

impl Backend for TypesetBackend {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "PDF export via the external typesetting converter"
    }

    fn file_extension(&self) -> &str {
        "pdf"
    }

    fn render(
        &self,
        nodes: &[DocumentNode],
        options: &GenerationOptions,
        output: &Path,
    ) -> Result<RenderedOutput, RenderError> {
        let tool = resolve_converter(options)?;

        let staging = tempdir().map_err(|e| RenderError::Io(format!("staging dir: {e}")))?;
        let source_path = staging.path().join("document.md");
        let source = flatten_to_source(nodes, SourceProfile::Typeset);
        fs::write(&source_path, source).map_err(|e| RenderError::Io(e.to_string()))?;

        let mut command = Command::new(&tool);
        command.arg(&source_path).arg("-s").arg("-o").arg(output);
        apply_layout_flags(&mut command, options);
        apply_metadata_flags(&mut command, options);
        run_converter(&mut command, &tool)?;

        Ok(RenderedOutput {
            path: output.to_path_buf(),
            page_count: query_page_count(output),
        })
    }
}

fn apply_layout_flags(command: &mut Command, options: &GenerationOptions) {
    if options.include_toc {
        command
            .arg("--toc")
            .arg(format!("--toc-depth={}", options.toc_depth));
    }
    command
        .arg("-V")
        .arg(format!("papersize={}", options.page_size.papersize_value()));
    command
        .arg("-V")
        .arg(format!("geometry:margin={}", options.margin));
    command
        .arg("-V")
        .arg(format!("fontsize={}pt", options.font_size_pt));
}

/// Best-effort page count via `pdfinfo`. Returns None when the utility is
/// missing, fails, or prints something unexpected.
fn query_page_count(pdf: &Path) -> Option<u32> {
    let tool = resolve_page_count_tool()?;
    let output = Command::new(tool).arg(pdf).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout.lines().find_map(|line| {
        line.strip_prefix("Pages:")
            .and_then(|rest| rest.trim().parse().ok())
    })
}

fn resolve_page_count_tool() -> Option<PathBuf> {
    if let Some(path) = env::var_os("SCRIV_PDFINFO_BIN") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    match which("pdfinfo") {
        Ok(path) => Some(path),
        Err(_) => {
            debug!("pdfinfo not found; page count unavailable");
            None
        }
    }
}

/// Best-effort first-page preview next to the PDF via the external
/// rasterizer (`pdftoppm`). Returns the PNG path on success, None when the
/// rasterizer is missing or fails.
pub fn rasterize_preview(pdf: &Path) -> Option<PathBuf> {
    let tool = match env::var_os("SCRIV_PDFTOPPM_BIN") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => which("pdftoppm").ok()?,
    };
    let prefix = pdf.with_extension("");
    let status = Command::new(tool)
        .arg("-png")
        .arg("-f")
        .arg("1")
        .arg("-l")
        .arg("1")
        .arg("-singlefile")
        .arg(pdf)
        .arg(&prefix)
        .status()
        .ok()?;
    if !status.success() {
        debug!("preview rasterization failed for {}", pdf.display());
        return None;
    }
    Some(prefix.with_extension("png"))
}
