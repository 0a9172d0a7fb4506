//! Reply text segmentation
//!
//! Converts an assistant reply's raw text into renderable blocks using a
//! fixed minimal grammar: paragraphs, ordered lists, unordered lists, and
//! bold/plain inline spans. This is deliberately not markdown; there are no
//! links, italics, nesting, or escapes, and malformed input degrades to
//! plain text instead of erroring.

use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\.\s+").expect("valid regex"));
static UNORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*•]\s+").expect("valid regex"));
static BOLD_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

/// An inline run of styled text within one block line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub bold: bool,
    pub text: String,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            bold: false,
            text: text.into(),
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            text: text.into(),
        }
    }
}

/// A structural unit derived from a message's raw text
///
/// Never stored; always recomputed from `Message.content` at render time.
/// Paragraph lines are kept separate so renderers emit forced line breaks
/// between them rather than merging into one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { lines: Vec<Vec<Span>> },
    OrderedList { items: Vec<Vec<Span>> },
    UnorderedList { items: Vec<Vec<Span>> },
}

impl Block {
    /// Flat text with styling and list markers stripped, lines joined with
    /// newlines. Used for accessibility labels and assertions.
    pub fn plain_text(&self) -> String {
        let rows = match self {
            Block::Paragraph { lines } => lines,
            Block::OrderedList { items } | Block::UnorderedList { items } => items,
        };
        rows.iter()
            .map(|spans| {
                spans
                    .iter()
                    .map(|span| span.text.as_str())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse reply text into blocks
///
/// Total and deterministic: any input produces a block list, re-parsing the
/// same text yields the same blocks, and no block ever has zero lines/items.
/// Blank lines terminate the current run and are not represented.
pub fn parse(text: &str) -> Vec<Block> {
    #[derive(PartialEq, Clone, Copy)]
    enum Run {
        Other,
        Ordered,
        Unordered,
    }

    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<Vec<Span>> = Vec::new();
    let mut run = Run::Other;

    for line in text.lines() {
        if let Some(item) = strip_marker(&ORDERED_MARKER, line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            match blocks.last_mut() {
                Some(Block::OrderedList { items }) if run == Run::Ordered => {
                    items.push(line_spans(item));
                }
                _ => blocks.push(Block::OrderedList {
                    items: vec![line_spans(item)],
                }),
            }
            run = Run::Ordered;
        } else if let Some(item) = strip_marker(&UNORDERED_MARKER, line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            match blocks.last_mut() {
                Some(Block::UnorderedList { items }) if run == Run::Unordered => {
                    items.push(line_spans(item));
                }
                _ => blocks.push(Block::UnorderedList {
                    items: vec![line_spans(item)],
                }),
            }
            run = Run::Unordered;
        } else if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            run = Run::Other;
        } else {
            paragraph.push(line_spans(line));
            run = Run::Other;
        }
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    blocks
}

fn flush_paragraph(paragraph: &mut Vec<Vec<Span>>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph {
            lines: std::mem::take(paragraph),
        });
    }
}

fn strip_marker<'a>(marker: &Regex, line: &'a str) -> Option<&'a str> {
    marker.find(line).map(|m| &line[m.end()..])
}

/// Split one line into bold/plain spans
///
/// `**...**` matches non-greedily with no nesting; a `**` without a closing
/// pair stays in the surrounding plain span. Adjacent spans are not merged.
fn line_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0usize;

    for m in BOLD_SEGMENT.find_iter(line) {
        if m.start() > cursor {
            spans.push(Span::plain(&line[cursor..m.start()]));
        }
        spans.push(Span::bold(&line[m.start() + 2..m.end() - 2]));
        cursor = m.end();
    }
    if cursor < line.len() {
        spans.push(Span::plain(&line[cursor..]));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_string_yields_no_blocks() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_bold_only_line() {
        let blocks = parse("**bold**");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                lines: vec![vec![Span::bold("bold")]],
            }]
        );
    }

    #[test]
    fn test_ordered_list_strips_numerals() {
        let blocks = parse("1. a\n2. b");
        assert_eq!(
            blocks,
            vec![Block::OrderedList {
                items: vec![vec![Span::plain("a")], vec![Span::plain("b")]],
            }]
        );
    }

    #[test]
    fn test_unordered_list_then_paragraph() {
        let blocks = parse("- a\n\nplain text");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::UnorderedList { .. }));
        assert!(matches!(blocks[1], Block::Paragraph { .. }));
        assert_eq!(blocks[1].plain_text(), "plain text");
    }

    #[test]
    fn test_paragraph_list_paragraph_yields_three_blocks() {
        let blocks = parse("Here is how:\n1. Sign up\n2. Post food\nThat's it!");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
        assert!(matches!(blocks[1], Block::OrderedList { .. }));
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
        assert_eq!(blocks[1].plain_text(), "Sign up\nPost food");
    }

    #[test]
    fn test_leading_digit_without_marker_is_a_paragraph() {
        let blocks = parse("2024 was a good year");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                lines: vec![vec![Span::plain("2024 was a good year")]],
            }]
        );
    }

    #[test]
    fn test_marker_requires_trailing_whitespace() {
        assert!(matches!(parse("1.nope")[0], Block::Paragraph { .. }));
        assert!(matches!(parse("-nope")[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_single_item_list_is_allowed() {
        let blocks = parse("- only item");
        assert_eq!(
            blocks,
            vec![Block::UnorderedList {
                items: vec![vec![Span::plain("only item")]],
            }]
        );
    }

    #[test]
    fn test_bullet_variants_group_into_one_list() {
        let blocks = parse("- a\n* b\n• c");
        assert_eq!(
            blocks,
            vec![Block::UnorderedList {
                items: vec![
                    vec![Span::plain("a")],
                    vec![Span::plain("b")],
                    vec![Span::plain("c")],
                ],
            }]
        );
    }

    #[test]
    fn test_blank_line_splits_a_list() {
        let blocks = parse("1. a\n\n2. b");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::OrderedList { .. }));
        assert!(matches!(blocks[1], Block::OrderedList { .. }));
    }

    #[test]
    fn test_paragraph_preserves_internal_line_breaks() {
        let blocks = parse("line one\nline two");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                lines: vec![vec![Span::plain("line one")], vec![Span::plain("line two")]],
            }]
        );
        assert_eq!(blocks[0].plain_text(), "line one\nline two");
    }

    #[test]
    fn test_mixed_spans_within_a_line() {
        let blocks = parse("Use the **Browse Food** page");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                lines: vec![vec![
                    Span::plain("Use the "),
                    Span::bold("Browse Food"),
                    Span::plain(" page"),
                ]],
            }]
        );
    }

    #[test]
    fn test_unmatched_bold_markers_stay_plain() {
        assert_eq!(
            parse("**oops"),
            vec![Block::Paragraph {
                lines: vec![vec![Span::plain("**oops")]],
            }]
        );
        assert_eq!(
            parse("****"),
            vec![Block::Paragraph {
                lines: vec![vec![Span::plain("****")]],
            }]
        );
    }

    #[test]
    fn test_bold_inside_list_items() {
        let blocks = parse("1. Open **Settings**\n2. Pick a theme");
        assert_eq!(
            blocks,
            vec![Block::OrderedList {
                items: vec![
                    vec![Span::plain("Open "), Span::bold("Settings")],
                    vec![Span::plain("Pick a theme")],
                ],
            }]
        );
    }

    #[test]
    fn test_parse_twice_yields_equal_blocks() {
        let text = "Intro **here**\n\n1. one\n2. two\n- bullet";
        assert_eq!(parse(text), parse(text));
    }

    proptest! {
        #[test]
        fn test_parse_never_panics_and_is_deterministic(text in any::<String>()) {
            let first = parse(&text);
            prop_assert_eq!(&first, &parse(&text));
        }

        #[test]
        fn test_no_block_is_ever_empty(
            text in r"(\d+\. [a-z ]{0,12}\n|[-*•] [a-z ]{0,12}\n|\*\*[a-z]{0,6}\*\*|[a-z *]{0,16}\n|\n){0,10}"
        ) {
            for block in parse(&text) {
                let rows = match &block {
                    Block::Paragraph { lines } => lines,
                    Block::OrderedList { items } | Block::UnorderedList { items } => items,
                };
                prop_assert!(!rows.is_empty());
            }
        }
    }
}
