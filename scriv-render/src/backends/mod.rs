//! Backend renderers
//!
//! Each backend consumes the same [`DocumentNode`] list and produces one
//! output file. The [`Backend`] trait is the uniform seam; the registry
//! handles discovery and selection by name or output extension. Backends
//! that shell out to an external converter are gated behind the
//! `native-export` feature.

pub mod docx;
pub mod source;

#[cfg(feature = "native-export")]
pub mod external;
#[cfg(feature = "native-export")]
pub mod slides;
#[cfg(feature = "native-export")]
pub mod typeset;

pub use docx::DocxBackend;
#[cfg(feature = "native-export")]
pub use slides::SlidesBackend;
#[cfg(feature = "native-export")]
pub use typeset::{rasterize_preview, TypesetBackend};

use crate::error::RenderError;
use crate::model::DocumentNode;
use crate::options::GenerationOptions;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What a successful render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOutput {
    /// Path of the written output file.
    pub path: PathBuf,
    /// Number of pages in the output, when the backend can determine it
    /// (typesetting backend only, best effort).
    pub page_count: Option<u32>,
}

/// Trait for output backends.
///
/// Implementors translate the shared node list into one concrete output
/// format and write exactly one file at the given path.
pub trait Backend: Send + Sync {
    /// The name of this backend (e.g., "docx", "slides", "pdf")
    fn name(&self) -> &str;

    /// Optional description of this backend
    fn description(&self) -> &str {
        ""
    }

    /// File extension of the produced output, without the leading dot.
    fn file_extension(&self) -> &str;

    /// Render the node list to `output`.
    fn render(
        &self,
        nodes: &[DocumentNode],
        options: &GenerationOptions,
        output: &Path,
    ) -> Result<RenderedOutput, RenderError>;
}

/// Registry of output backends
///
/// Provides a centralized registry for all available backends. Backends
/// can be registered and retrieved by name.
pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn Backend>>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        BackendRegistry {
            backends: HashMap::new(),
        }
    }

    /// Register a backend
    ///
    /// If a backend with the same name already exists, it will be replaced.
    pub fn register<B: Backend + 'static>(&mut self, backend: B) {
        self.backends
            .insert(backend.name().to_string(), Box::new(backend));
    }

    /// Get a backend by name
    pub fn get(&self, name: &str) -> Result<&dyn Backend, RenderError> {
        self.backends
            .get(name)
            .map(|b| b.as_ref())
            .ok_or_else(|| RenderError::BackendNotFound(name.to_string()))
    }

    /// Check if a backend exists
    pub fn has(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// List all available backend names (sorted)
    pub fn list_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect a backend from a filename based on its extension.
    ///
    /// Returns the backend name if a matching extension is found.
    pub fn detect_backend_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension().and_then(|ext| ext.to_str())?;
        for backend in self.backends.values() {
            if backend.file_extension() == extension {
                return Some(backend.name().to_string());
            }
        }
        None
    }

    /// Create a registry with the built-in backends
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(docx::DocxBackend);
        #[cfg(feature = "native-export")]
        registry.register(typeset::TypesetBackend);
        #[cfg(feature = "native-export")]
        registry.register(slides::SlidesBackend);

        registry
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestBackend;
    impl Backend for TestBackend {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test backend"
        }
        fn file_extension(&self) -> &str {
            "tst"
        }
        fn render(
            &self,
            _nodes: &[DocumentNode],
            _options: &GenerationOptions,
            output: &Path,
        ) -> Result<RenderedOutput, RenderError> {
            Ok(RenderedOutput {
                path: output.to_path_buf(),
                page_count: None,
            })
        }
    }

    #[test]
    fn registry_starts_empty() {
        let registry = BackendRegistry::new();
        assert_eq!(registry.backends.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let mut registry = BackendRegistry::new();
        registry.register(TestBackend);

        assert!(registry.has("test"));
        assert_eq!(registry.list_backends(), vec!["test"]);
        assert_eq!(registry.get("test").unwrap().name(), "test");
    }

    #[test]
    fn registry_get_nonexistent_is_an_error() {
        let registry = BackendRegistry::new();
        match registry.get("nope") {
            Err(RenderError::BackendNotFound(name)) => assert_eq!(name, "nope"),
            Err(other) => panic!("expected BackendNotFound, got {other:?}"),
            Ok(_) => panic!("expected BackendNotFound, got Ok"),
        }
    }

    #[test]
    fn registry_replace_keeps_single_entry() {
        let mut registry = BackendRegistry::new();
        registry.register(TestBackend);
        registry.register(TestBackend);
        assert_eq!(registry.list_backends().len(), 1);
    }

    #[test]
    fn detect_backend_from_filename() {
        let mut registry = BackendRegistry::new();
        registry.register(TestBackend);

        assert_eq!(
            registry.detect_backend_from_filename("report.tst"),
            Some("test".to_string())
        );
        assert_eq!(registry.detect_backend_from_filename("report.unknown"), None);
        assert_eq!(registry.detect_backend_from_filename("report"), None);
    }

    #[test]
    fn default_registry_has_word_processor_backend() {
        let registry = BackendRegistry::with_defaults();
        assert!(registry.has("docx"));
        assert_eq!(
            registry.detect_backend_from_filename("paper.docx"),
            Some("docx".to_string())
        );
    }

    #[cfg(feature = "native-export")]
    #[test]
    fn default_registry_has_external_backends() {
        let registry = BackendRegistry::with_defaults();
        assert!(registry.has("pdf"));
        assert!(registry.has("slides"));
        assert_eq!(
            registry.detect_backend_from_filename("deck.pptx"),
            Some("slides".to_string())
        );
    }
}
