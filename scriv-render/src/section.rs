//! Section aggregation
//!
//! Callers can hand over a set of named, ordered sections instead of one
//! markdown string. Aggregation concatenates them into a single dialect
//! text which then runs through the exact same parse/assemble/render path
//! as single-document input, so both entry points render identically.

/// A caller-supplied chunk of markdown content. The aggregator only reads
/// these; ownership stays with the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Sort key; values need not be contiguous. Equal values keep their
    /// original relative order.
    pub order: i32,
}

/// Merges sections into one dialect text: sorted by `order`, each section
/// rendered as an H1 plus its content, joined by horizontal-rule dividers.
pub fn aggregate(sections: &[Section]) -> String {
    let mut ordered: Vec<&Section> = sections.iter().collect();
    ordered.sort_by_key(|section| section.order);
    ordered
        .iter()
        .map(|section| format!("# {}\n\n{}", section.title, section.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
