//! Section aggregation against the full pipeline.

use scriv_render::{aggregate, assemble, parse, GenerationOptions, Section};

fn section(title: &str, content: &str, order: i32) -> Section {
    Section {
        id: title.to_lowercase(),
        title: title.to_string(),
        content: content.to_string(),
        order,
    }
}

#[test]
fn sections_render_in_order_value_order() {
    let sections = [
        section("A", "alpha content", 2),
        section("B", "beta content", 1),
    ];
    let text = aggregate(&sections);
    let beta = text.find("beta content").unwrap();
    let alpha = text.find("alpha content").unwrap();
    assert!(beta < alpha, "order 1 body must precede order 2 body");
}

#[test]
fn aggregated_sections_match_hand_concatenated_text() {
    let sections = [
        section("Methods", "We did *things*.\n\n- step one\n- step two", 1),
        section("Results", "| a | b |\n|---|---|\n| 1 | 2 |", 2),
    ];
    let manual = "# Methods\n\nWe did *things*.\n\n- step one\n- step two\n\n---\n\n# Results\n\n| a | b |\n|---|---|\n| 1 | 2 |";

    assert_eq!(aggregate(&sections), manual);

    // Same node sequence whether the caller aggregates or we do.
    let options = GenerationOptions::default();
    let from_sections = assemble(&parse(&aggregate(&sections)), &options);
    let from_manual = assemble(&parse(manual), &options);
    assert_eq!(from_sections, from_manual);
}

#[test]
fn section_divider_becomes_a_divider_node() {
    let sections = [section("One", "x", 1), section("Two", "y", 2)];
    let options = GenerationOptions::default();
    let nodes = assemble(&parse(&aggregate(&sections)), &options);
    let dividers = nodes
        .iter()
        .filter(|node| matches!(node, scriv_render::DocumentNode::Divider))
        .count();
    assert_eq!(dividers, 1);
}
