//! Generation options
//!
//! Every knob a render call needs travels through [`GenerationOptions`];
//! nothing is read from module-level defaults at render time. The struct
//! derives `Deserialize` so the scriv-config crate can build it straight
//! from layered TOML.

use serde::Deserialize;
use std::path::PathBuf;

/// Physical page size for paged backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PageSize {
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "letter")]
    Letter,
}

impl PageSize {
    /// Value for the converter's `papersize` variable.
    pub fn papersize_value(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
        }
    }

    /// Page dimensions in twentieths of a point, as the word-processor
    /// package expects them.
    pub fn package_dimensions(&self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }
}

/// Cover page metadata. A cover is emitted only when the title is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoverMetadata {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub organization: Option<String>,
    /// Pre-formatted date line; defaults to today as "Month Day, Year".
    pub date: Option<String>,
}

/// Options threaded through parsing, assembly, and every backend render.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub include_toc: bool,
    pub toc_depth: u8,
    pub include_cover_page: bool,
    pub cover: CoverMetadata,
    pub include_citations: bool,
    pub citation_style: String,
    pub font_family: String,
    pub code_font_family: String,
    pub font_size_pt: u8,
    pub page_size: PageSize,
    /// Page margin for the typesetting backend, e.g. "1in" or "25mm".
    pub margin: String,
    /// Named visual theme for the slide backend.
    pub theme: Option<String>,
    /// Directory searched for `<theme>.pptx` reference documents.
    pub theme_dir: Option<PathBuf>,
    /// Explicit converter binary, bypassing discovery. Mostly for tests
    /// and pinned installations.
    pub typeset_tool: Option<PathBuf>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            include_toc: false,
            toc_depth: 3,
            include_cover_page: false,
            cover: CoverMetadata::default(),
            include_citations: false,
            citation_style: "apa".to_string(),
            font_family: "Times New Roman".to_string(),
            code_font_family: "Courier New".to_string(),
            font_size_pt: 12,
            page_size: PageSize::A4,
            margin: "1in".to_string(),
            theme: None,
            theme_dir: None,
            typeset_tool: None,
        }
    }
}
