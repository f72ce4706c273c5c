//! Inline formatting
//!
//! Turns a block's raw text into an ordered run sequence. Two passes: link
//! spans are lifted out first into an explicit segment list, then each text
//! segment goes through the emphasis/code tokenizer. Keeping links as
//! [`Segment::LinkRef`] tokens (rather than rewriting the string around a
//! sentinel character) means emphasis markers inside link labels can never
//! be mis-tokenized, and labels are carried through untouched.
//!
//! Like block parsing, this never fails: a marker without a matching closer
//! is emitted as literal text and scanning resumes one character later.

/// A styled fragment of text within a block.
///
/// Runs are flat and ordered; concatenating their text reconstructs the
/// source left to right.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineRun {
    Plain(String),
    Bold(String),
    Italic(String),
    BoldItalic(String),
    Code(String),
    Link { text: String, url: String },
}

/// Working representation after link extraction.
enum Segment {
    Text(String),
    LinkRef(usize),
}

struct LinkSpan {
    label: String,
    url: String,
}

/// Converts raw text into an ordered run sequence.
pub fn format_inline(text: &str) -> Vec<InlineRun> {
    let (segments, links) = extract_links(text);
    let mut runs = Vec::new();
    for segment in &segments {
        match segment {
            Segment::Text(chunk) => tokenize_markers(chunk, &mut runs),
            Segment::LinkRef(index) => {
                let link = &links[*index];
                runs.push(InlineRun::Link {
                    text: link.label.clone(),
                    url: link.url.clone(),
                });
            }
        }
    }
    runs
}

/// First pass: lift `[label](url)` spans out of the text, left to right.
///
/// Incomplete spans (a `[` that never closes into a full link) stay in the
/// text and are handled by the marker tokenizer as literal characters.
fn extract_links(text: &str) -> (Vec<Segment>, Vec<LinkSpan>) {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut links = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'[' {
            if let Some((label, url, end)) = match_link_at(text, i) {
                if plain_start < i {
                    segments.push(Segment::Text(text[plain_start..i].to_string()));
                }
                segments.push(Segment::LinkRef(links.len()));
                links.push(LinkSpan { label, url });
                i = end;
                plain_start = i;
                continue;
            }
        }
        i += 1;
    }
    if plain_start < bytes.len() {
        segments.push(Segment::Text(text[plain_start..].to_string()));
    }
    (segments, links)
}

/// Matches `[label](url)` starting at byte offset `open` (which must point
/// at a `[`). Returns the label, url, and the byte offset just past `)`.
fn match_link_at(text: &str, open: usize) -> Option<(String, String, usize)> {
    let close = text[open..].find(']').map(|pos| open + pos)?;
    let rest = &text[close + 1..];
    if !rest.starts_with('(') {
        return None;
    }
    let paren_close = rest.find(')')?;
    let label = text[open + 1..close].to_string();
    let url = rest[1..paren_close].to_string();
    Some((label, url, close + 1 + paren_close + 1))
}

/// Second pass: emphasis and inline-code tokenization over one text chunk.
///
/// Precedence per opener position: backtick code, then the triple marker
/// (`***`/`___`), then strong (`**`/`__`), then emphasis (`*`/`_`, only
/// when not immediately followed by the same character). Closer search is
/// greedy-nearest for the same marker; there is no retroactive re-parse.
fn tokenize_markers(chunk: &str, runs: &mut Vec<InlineRun>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '`' {
            if let Some(close) = find_single(&chars, i + 1, '`') {
                flush_plain(&mut plain, runs);
                runs.push(InlineRun::Code(collect(&chars[i + 1..close])));
                i = close + 1;
                continue;
            }
        } else if c == '*' || c == '_' {
            if repeats(&chars, i, c, 3) {
                if let Some(close) = find_repeated(&chars, i + 3, c, 3) {
                    flush_plain(&mut plain, runs);
                    runs.push(InlineRun::BoldItalic(collect(&chars[i + 3..close])));
                    i = close + 3;
                    continue;
                }
            }
            if repeats(&chars, i, c, 2) {
                if let Some(close) = find_repeated(&chars, i + 2, c, 2) {
                    flush_plain(&mut plain, runs);
                    runs.push(InlineRun::Bold(collect(&chars[i + 2..close])));
                    i = close + 2;
                    continue;
                }
            }
            if !repeats(&chars, i, c, 2) {
                if let Some(close) = find_single(&chars, i + 1, c) {
                    flush_plain(&mut plain, runs);
                    runs.push(InlineRun::Italic(collect(&chars[i + 1..close])));
                    i = close + 1;
                    continue;
                }
            }
        }
        plain.push(c);
        i += 1;
    }
    flush_plain(&mut plain, runs);
}

fn flush_plain(plain: &mut String, runs: &mut Vec<InlineRun>) {
    if !plain.is_empty() {
        runs.push(InlineRun::Plain(std::mem::take(plain)));
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// True when `count` copies of `marker` start at `at`.
fn repeats(chars: &[char], at: usize, marker: char, count: usize) -> bool {
    chars.len() >= at + count && chars[at..at + count].iter().all(|&c| c == marker)
}

fn find_single(chars: &[char], from: usize, marker: char) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == marker)
}

fn find_repeated(chars: &[char], from: usize, marker: char, count: usize) -> Option<usize> {
    if chars.len() < count {
        return None;
    }
    (from..=chars.len() - count).find(|&i| repeats(chars, i, marker, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_markers_produce_ordered_runs() {
        let runs = format_inline("**bold** and *italic* and `code`");
        assert_eq!(
            runs,
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
    fn plain_text_is_a_single_run() {
        assert_eq!(
            format_inline("nothing special"),
            vec![InlineRun::Plain("nothing special".to_string())]
        );
    }

    #[test]
    fn link_spans_are_extracted() {
        let runs = format_inline("see [docs](http://x) now");
        assert_eq!(
            runs,
            vec![
                InlineRun::Plain("see ".to_string()),
                InlineRun::Link {
                    text: "docs".to_string(),
                    url: "http://x".to_string(),
                },
                InlineRun::Plain(" now".to_string()),
            ]
        );
    }

    #[test]
    fn emphasis_inside_link_labels_is_not_honored() {
        let runs = format_inline("[**not bold**](http://x)");
        assert_eq!(
            runs,
            vec![InlineRun::Link {
                text: "**not bold**".to_string(),
                url: "http://x".to_string(),
            }]
        );
    }

    #[test]
    fn incomplete_link_stays_literal() {
        let runs = format_inline("a [label without url");
        assert_eq!(
            runs,
            vec![InlineRun::Plain("a [label without url".to_string())]
        );
    }

    #[test]
    fn underscore_markers_work_like_asterisks() {
        assert_eq!(
            format_inline("__strong__ and _soft_"),
            vec![
                InlineRun::Bold("strong".to_string()),
                InlineRun::Plain(" and ".to_string()),
                InlineRun::Italic("soft".to_string()),
            ]
        );
    }

    #[test]
    fn triple_marker_produces_bold_italic() {
        assert_eq!(
            format_inline("***both***"),
            vec![InlineRun::BoldItalic("both".to_string())]
        );
    }

    #[test]
    fn unmatched_opener_is_emitted_literally() {
        assert_eq!(
            format_inline("2 * 3 is six"),
            vec![InlineRun::Plain("2 * 3 is six".to_string())]
        );
        // The lone '*' pairs with nothing; the text around it coalesces
        // back into a single plain run.
        assert_eq!(
            format_inline("a * b"),
            vec![InlineRun::Plain("a * b".to_string())]
        );
    }

    #[test]
    fn unmatched_strong_opener_degrades_without_reparse() {
        assert_eq!(
            format_inline("**never closed"),
            vec![InlineRun::Plain("**never closed".to_string())]
        );
    }

    #[test]
    fn code_wins_over_emphasis_markers() {
        assert_eq!(
            format_inline("`let *p = &x;`"),
            vec![InlineRun::Code("let *p = &x;".to_string())]
        );
    }

    #[test]
    fn adjacent_spans_stay_separate_runs() {
        assert_eq!(
            format_inline("**a****b**"),
            vec![
                InlineRun::Bold("a".to_string()),
                InlineRun::Bold("b".to_string()),
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_runs() {
        assert!(format_inline("").is_empty());
    }
}
