//! Document generation for scriv documents
//!
//!     This crate turns the scriv markdown dialect into finished documents:
//!     a word-processor package, a slide deck, or a typeset PDF produced
//!     through an external converter.
//!
//!     TLDR: For backend authors:
//!         - Backends never parse text; they consume the shared DocumentNode list.
//!         - New backends implement the Backend trait and register in BackendRegistry::with_defaults.
//!         - Anything that can fail must come back as a RenderError; the generate layer folds those
//!           into the flat GenerationResult handed to callers.
//!
//! Architecture
//!
//!     The pipeline is deliberately one-directional and shared by every entry point:
//!
//!     markdown text ──parse──> [BlockElement] ──assemble──> [DocumentNode] ──backend──> file
//!
//!     Sections go through the aggregator first, producing one markdown text, so a multi-section
//!     document and its hand-concatenated equivalent render identically. There is exactly one
//!     parser and one assembler; backends are the only place output formats diverge.
//!
//!     This is a pure lib, that is, it powers the scriv-cli but is shell agnostic: no code here
//!     prints, reads env vars (beyond the documented converter overrides), or assumes a terminal.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── options.rs              # GenerationOptions threaded through every call
//!     ├── section.rs              # Section aggregation
//!     ├── generate.rs             # Entry points + GenerationResult
//!     ├── markdown
//!     │   ├── block.rs            # Block parser (line classifier)
//!     │   └── inline.rs           # Inline run tokenizer
//!     ├── model
//!     │   ├── nodes.rs            # DocumentNode
//!     │   └── assemble.rs         # blocks + options -> nodes
//!     ├── backends
//!     │   ├── mod.rs              # Backend trait + BackendRegistry
//!     │   ├── source.rs           # Shared converter-source writer
//!     │   ├── external.rs         # Converter discovery/invocation
//!     │   ├── docx.rs             # Word-processor package
//!     │   ├── slides.rs           # Slide deck (external converter)
//!     │   └── typeset.rs          # PDF (external converter)
//!     └── lib.rs
//!
//! Parsing
//!
//!     The dialect is constrained on purpose: headings, paragraphs, fenced code, flat lists,
//!     pipe tables, block quotes, and rules. Classification is ordered and first-match; anything
//!     unrecognized degrades to a paragraph, so parsing cannot fail. Full CommonMark compliance,
//!     nested lists, and nested quotes are non-goals; authors write the dialect, not GFM.
//!
//! Backends
//!
//!     The word-processor backend builds its package in memory and writes the file in one step.
//!     The slide and PDF backends write converter source to a private staging directory and shell
//!     out to pandoc; the converter is discovered through an options override, an env override,
//!     well-known install paths, then PATH. A missing converter is a structured failure carried
//!     in the result, never a panic. Page counts come from an optional second utility and are
//!     best-effort only.
//!
//! Concurrency
//!
//!     Parsing and assembly are pure functions over immutable input. Render calls share no
//!     mutable state; each external invocation gets its own staging directory, so concurrent
//!     generations are safe. There is no cancellation: once a converter process is spawned the
//!     call waits for it to exit.

pub mod backends;
pub mod error;
pub mod generate;
pub mod markdown;
pub mod model;
pub mod options;
pub mod section;

pub use backends::{Backend, BackendRegistry, RenderedOutput};
pub use error::RenderError;
pub use generate::{
    generate, generate_from_file, generate_from_markdown, generate_from_sections, GenerateInput,
    GenerateSpec, GenerationResult, ReferenceSource,
};
pub use markdown::{format_inline, parse, BlockElement, InlineRun};
pub use model::{assemble, DocumentNode};
pub use options::{CoverMetadata, GenerationOptions, PageSize};
pub use section::{aggregate, Section};
