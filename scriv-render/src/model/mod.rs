//! The renderer-agnostic document model
//!
//! Backends never see raw dialect text. The assembler turns the parsed
//! block sequence (plus generation options) into a flat node list that all
//! backends consume identically, which is what keeps the three outputs in
//! agreement about the document's structure.

pub mod assemble;
pub mod nodes;

pub use assemble::assemble;
pub use nodes::DocumentNode;
