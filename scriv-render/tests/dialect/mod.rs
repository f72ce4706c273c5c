//! End-to-end checks of the dialect surface: parsing and inline runs as
//! observed through the public API.

use scriv_render::{format_inline, parse, BlockElement, InlineRun};

#[test]
fn heading_parse_contract() {
    assert_eq!(
        parse("### Title"),
        vec![BlockElement::Heading {
            level: 3,
            text: "Title".to_string()
        }]
    );
}

#[test]
fn inline_run_contract() {
    assert_eq!(
        format_inline("**bold** and *italic* and `code`"),
        vec![
            InlineRun::Bold("bold".to_string()),
            InlineRun::Plain(" and ".to_string()),
            InlineRun::Italic("italic".to_string()),
            InlineRun::Plain(" and ".to_string()),
            InlineRun::Code("code".to_string()),
        ]
    );
}

#[test]
fn link_contract_survives_other_markers() {
    let runs = format_inline("**x** then [docs](http://x) now");
    let link = runs.iter().find_map(|run| match run {
        InlineRun::Link { text, url } => Some((text.clone(), url.clone())),
        _ => None,
    });
    assert_eq!(link, Some(("docs".to_string(), "http://x".to_string())));
}

#[test]
fn table_separator_rows_never_survive() {
    let blocks = parse("| Name | Score |\n---|---\n");
    assert_eq!(
        blocks,
        vec![BlockElement::Table {
            rows: vec![vec!["Name".to_string(), "Score".to_string()]],
        }]
    );
}

#[test]
fn blank_line_interrupts_a_list() {
    let blocks = parse("- 1\n- 2\n- 3\n- 4\n- 5\n\n- 6");
    let list_sizes: Vec<usize> = blocks
        .iter()
        .filter_map(|block| match block {
            BlockElement::List { items, .. } => Some(items.len()),
            _ => None,
        })
        .collect();
    assert_eq!(list_sizes, vec![5, 1]);
}

#[test]
fn a_document_mixes_all_block_kinds() {
    let src = "\
# Report

Intro paragraph
continued on a second line.

```python
print(1)
```

- a
- b

1. first

| h1 | h2 |
|----|----|
| c1 | c2 |

> a quote

---

The end.
";
    let blocks = parse(src);
    let kinds: Vec<&str> = blocks
        .iter()
        .map(|block| match block {
            BlockElement::Heading { .. } => "heading",
            BlockElement::Paragraph { .. } => "paragraph",
            BlockElement::CodeBlock { .. } => "code",
            BlockElement::List { .. } => "list",
            BlockElement::Table { .. } => "table",
            BlockElement::Blockquote { .. } => "quote",
            BlockElement::Rule => "rule",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "code",
            "list",
            "list",
            "table",
            "quote",
            "rule",
            "paragraph"
        ]
    );
}
