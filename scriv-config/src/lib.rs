//! Shared configuration loader for the scriv toolchain.
//!
//! `defaults/scriv.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`ScrivConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use scriv_render::{GenerationOptions, PageSize};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/scriv.default.toml");

/// Top-level configuration consumed by scriv applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrivConfig {
    pub document: DocumentConfig,
    pub toc: TocConfig,
    pub typeset: TypesetConfig,
    pub slides: SlidesConfig,
}

/// Base styling applied to every backend.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub font_family: String,
    pub code_font_family: String,
    pub font_size_pt: u8,
    pub page_size: PageSize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TocConfig {
    pub include: bool,
    pub depth: u8,
}

/// Knobs for the typesetting (PDF) backend.
#[derive(Debug, Clone, Deserialize)]
pub struct TypesetConfig {
    pub margin: String,
    /// Pinned converter binary; discovery runs when absent.
    pub tool: Option<PathBuf>,
}

/// Knobs for the slide-deck backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SlidesConfig {
    pub theme: String,
    pub theme_dir: Option<PathBuf>,
}

impl From<&ScrivConfig> for GenerationOptions {
    fn from(config: &ScrivConfig) -> Self {
        GenerationOptions {
            include_toc: config.toc.include,
            toc_depth: config.toc.depth,
            font_family: config.document.font_family.clone(),
            code_font_family: config.document.code_font_family.clone(),
            font_size_pt: config.document.font_size_pt,
            page_size: config.document.page_size,
            margin: config.typeset.margin.clone(),
            theme: Some(config.slides.theme.clone()),
            theme_dir: config.slides.theme_dir.clone(),
            typeset_tool: config.typeset.tool.clone(),
            ..GenerationOptions::default()
        }
    }
}

impl From<ScrivConfig> for GenerationOptions {
    fn from(config: ScrivConfig) -> Self {
        (&config).into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ScrivConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ScrivConfig, ConfigError> {
    Loader::new().build()
}
