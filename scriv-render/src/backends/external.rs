//! Discovery and invocation of external converter binaries.
//!
//! The typesetting and slide backends both drive the same external
//! converter (pandoc). Discovery walks: explicit options override,
//! `SCRIV_PANDOC_BIN`, a fixed list of well-known install paths for the
//! current platform, then a PATH lookup. Absence is a structured error,
//! never a panic.

use crate::error::RenderError;
use crate::options::GenerationOptions;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which;

/// Resolves the converter binary to invoke.
pub fn resolve_converter(options: &GenerationOptions) -> Result<PathBuf, RenderError> {
    if let Some(path) = &options.typeset_tool {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(RenderError::ToolNotFound(format!(
            "configured converter {} does not exist",
            path.display()
        )));
    }

    if let Some(path) = env::var_os("SCRIV_PANDOC_BIN") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    for candidate in fixed_install_paths() {
        let path = PathBuf::from(candidate);
        if path.exists() {
            debug!("converter found at well-known path {}", path.display());
            return Ok(path);
        }
    }

    if let Ok(path) = which("pandoc") {
        return Ok(path);
    }

    Err(RenderError::ToolNotFound(
        "unable to locate the pandoc converter. Set SCRIV_PANDOC_BIN to override the detection."
            .to_string(),
    ))
}

#[cfg(target_os = "linux")]
fn fixed_install_paths() -> &'static [&'static str] {
    &[
        "/usr/bin/pandoc",
        "/usr/local/bin/pandoc",
        "/opt/pandoc/bin/pandoc",
    ]
}

#[cfg(target_os = "macos")]
fn fixed_install_paths() -> &'static [&'static str] {
    &["/usr/local/bin/pandoc", "/opt/homebrew/bin/pandoc"]
}

#[cfg(target_os = "windows")]
fn fixed_install_paths() -> &'static [&'static str] {
    &[
        r"C:\Program Files\Pandoc\pandoc.exe",
        r"C:\Program Files (x86)\Pandoc\pandoc.exe",
    ]
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn fixed_install_paths() -> &'static [&'static str] {
    &[]
}

/// Runs a fully-assembled converter command, mapping failures into the
/// error taxonomy: a spawn failure and a non-zero exit are both
/// `ToolFailed`, with captured stderr preferred over the bare exit code.
pub fn run_converter(command: &mut Command, tool: &Path) -> Result<(), RenderError> {
    debug!("invoking converter {}", tool.display());
    let output = command.output().map_err(|e| {
        RenderError::ToolFailed(format!("failed to launch {}: {e}", tool.display()))
    })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.trim().is_empty() {
        format!("exited with code {}", output.status.code().unwrap_or(-1))
    } else {
        stderr.trim().to_string()
    };
    Err(RenderError::ToolFailed(message))
}

/// Adds the converter metadata flags derived from the cover block.
pub fn apply_metadata_flags(command: &mut Command, options: &GenerationOptions) {
    let cover = &options.cover;
    if cover.title.is_empty() {
        return;
    }
    command.arg("-M").arg(format!("title={}", cover.title));
    if let Some(author) = &cover.author {
        command.arg("-M").arg(format!("author={author}"));
    }
    if let Some(subtitle) = &cover.subtitle {
        command.arg("-M").arg(format!("subject={subtitle}"));
    }
    if let Some(organization) = &cover.organization {
        command.arg("-M").arg(format!("keywords={organization}"));
    }
}
