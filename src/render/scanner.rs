//! Tokenizing scanner for the markdown subset produced by the model
//!
//! Grammar, in precedence order:
//!
//! ```text
//! document   := (fence | prose)*
//! fence      := "```" [tag "\n"] body "```"        tag has no whitespace or '`'
//! prose line := heading | list_item | plain
//! heading    := "#"{1,6} ws+ inline+
//! list_item  := ("-" | "*" | "+" | digits ".") ws+ inline+
//! inline     := "`" [^`]+ "`" | "**" .*? "**" | text
//! ```
//!
//! Fences are cut out first, so nothing inside a code block is ever seen by
//! the line or inline rules. Within a line, code spans are cut out before bold
//! is looked for. An unterminated delimiter is plain text.

use super::fragment::{Fragment, Inline};
use regex::Regex;
use std::sync::LazyLock;

const FENCE: &str = "```";
const BOLD: &str = "**";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern"));
static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(.+)$").expect("bullet pattern"));
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+(.+)$").expect("numbered pattern"));

/// Top-level split of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Prose(&'a str),
    Code {
        language: Option<&'a str>,
        body: &'a str,
    },
}

/// Classification of one prose line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Heading { level: u8, text: &'a str },
    ListItem(&'a str),
    Plain(&'a str),
}

/// Kind of the item the scanner emitted last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    /// Text line; also stands for the document edges
    Inline,
    ListItem,
    /// Heading or code block
    Block,
}

/// Scan `text` into fragments. Never fails.
///
/// Newlines are counted in runs between items (lines and code blocks). A run
/// between two text lines becomes that many breaks. A run touching a heading,
/// list or code block is structural when it is a single newline and becomes
/// breaks only when it holds a blank line. List items separated by blank
/// lines stay in one list.
pub fn scan(text: &str) -> Vec<Fragment> {
    let normalized;
    let text = if text.contains("\r\n") {
        normalized = text.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        text
    };

    let mut scanner = Scanner::default();

    for segment in split_fences(text) {
        match segment {
            Segment::Code { language, body } => scanner.code_block(language, body),
            Segment::Prose(prose) => {
                for (i, line) in prose.split('\n').enumerate() {
                    if i > 0 {
                        scanner.pending_newlines += 1;
                    }
                    if !line.trim().is_empty() {
                        scanner.line(classify(line));
                    }
                }
            }
        }
    }

    scanner.finish()
}

#[derive(Debug)]
struct Scanner {
    fragments: Vec<Fragment>,
    last: Last,
    pending_newlines: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            fragments: Vec::new(),
            last: Last::Inline,
            pending_newlines: 0,
        }
    }
}

impl Scanner {
    fn code_block(&mut self, language: Option<&str>, body: &str) {
        self.breaks_before(Last::Block);
        self.fragments
            .push(Fragment::code_block(language, body.trim()));
        self.last = Last::Block;
    }

    fn line(&mut self, line: Line<'_>) {
        self.last = match line {
            Line::Heading { level, text } => {
                self.breaks_before(Last::Block);
                self.fragments
                    .push(Fragment::heading(level, parse_inline(text)));
                Last::Block
            }
            Line::ListItem(text) if self.last == Last::ListItem => {
                self.pending_newlines = 0;
                if let Some(Fragment::List { items }) = self.fragments.last_mut() {
                    items.push(parse_inline(text));
                }
                Last::ListItem
            }
            Line::ListItem(text) => {
                self.breaks_before(Last::ListItem);
                self.fragments.push(Fragment::List {
                    items: vec![parse_inline(text)],
                });
                Last::ListItem
            }
            Line::Plain(text) => {
                self.breaks_before(Last::Inline);
                self.fragments
                    .extend(parse_inline(text).into_iter().map(Fragment::from));
                Last::Inline
            }
        };
    }

    /// Turn the pending newline run into breaks ahead of an item of kind `next`
    fn breaks_before(&mut self, next: Last) {
        let run = std::mem::take(&mut self.pending_newlines);
        let between_text = self.last == Last::Inline && next == Last::Inline;
        let count = if between_text || run > 1 { run } else { 0 };
        self.fragments
            .extend(std::iter::repeat_n(Fragment::LineBreak, count));
    }

    fn finish(mut self) -> Vec<Fragment> {
        self.breaks_before(Last::Inline);
        self.fragments
    }
}

fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let (before, fenced) = rest.split_at(open);
        let after_open = fenced.strip_prefix(FENCE).unwrap_or(fenced);
        let (language, body_start) = fence_header(after_open);

        let Some(close) = body_start.find(FENCE) else {
            // Unterminated fence: everything left is literal
            break;
        };
        let (body, closing) = body_start.split_at(close);

        if !before.is_empty() {
            segments.push(Segment::Prose(before));
        }
        segments.push(Segment::Code { language, body });
        rest = closing.strip_prefix(FENCE).unwrap_or(closing);
    }

    if !rest.is_empty() {
        segments.push(Segment::Prose(rest));
    }
    segments
}

/// Split the text after an opening fence into the optional language tag and
/// the start of the body.
fn fence_header(after_open: &str) -> (Option<&str>, &str) {
    let tag_len = after_open
        .find(|c: char| c.is_whitespace() || c == '`')
        .unwrap_or(after_open.len());
    let (tag, tail) = after_open.split_at(tag_len);

    if tag.is_empty() {
        return (None, after_open.strip_prefix('\n').unwrap_or(after_open));
    }
    match tail.strip_prefix('\n') {
        Some(body) => (Some(tag), body),
        None => (None, after_open),
    }
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = HEADING.captures(line) {
        if let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) {
            let level = u8::try_from(hashes.len()).unwrap_or(6);
            return Line::Heading {
                level,
                text: text.as_str(),
            };
        }
    }

    let item = BULLET_ITEM
        .captures(line)
        .or_else(|| NUMBERED_ITEM.captures(line))
        .and_then(|caps| caps.get(1));
    match item {
        Some(text) => Line::ListItem(text.as_str()),
        None => Line::Plain(line),
    }
}

/// Parse one line of inline content: code spans first, then bold in the
/// remaining text.
fn parse_inline(line: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut plain_start = 0;
    let mut open = find_from(line, 0, "`");

    while let Some(o) = open {
        let Some(close) = find_from(line, o + 1, "`") else {
            break;
        };
        if close == o + 1 {
            // "``" holds no code; the second tick may open a span
            open = Some(close);
            continue;
        }
        push_bold_and_text(&mut out, slice(line, plain_start, o));
        out.push(Inline::code(slice(line, o + 1, close)));
        plain_start = close + 1;
        open = find_from(line, plain_start, "`");
    }

    push_bold_and_text(&mut out, slice(line, plain_start, line.len()));
    out
}

fn push_bold_and_text(out: &mut Vec<Inline>, text: &str) {
    let mut start = 0;

    while let Some(open) = find_from(text, start, BOLD) {
        let Some(close) = find_from(text, open + BOLD.len(), BOLD) else {
            break;
        };
        let before = slice(text, start, open);
        if !before.is_empty() {
            out.push(Inline::text(before));
        }
        out.push(Inline::bold(slice(text, open + BOLD.len(), close)));
        start = close + BOLD.len();
    }

    let rest = slice(text, start, text.len());
    if !rest.is_empty() {
        out.push(Inline::text(rest));
    }
}

/// Byte offset of `needle` in `haystack` at or after `from`
fn find_from(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|tail| tail.find(needle))
        .map(|i| i + from)
}

/// Substring between two offsets produced by `find_from` on ASCII delimiters
fn slice(s: &str, start: usize, end: usize) -> &str {
    s.get(start..end).unwrap_or_default()
}
