/// Block-level line classification
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```(\w*)$").unwrap());
static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) (.*)$").unwrap());
static ORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)(\d+)\. (.*)$").unwrap());
static UNORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\* (.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// What a single line looks like at the block level, with the pieces the
/// engine needs extracted out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind<'a> {
    Header { level: usize, content: &'a str },
    HorizontalRule,
    Blockquote { content: &'a str },
    Fence { language: &'a str },
    ListItem {
        kind: ListKind,
        /// Raw leading whitespace of the marker; its length is the
        /// nesting comparison key.
        indent: &'a str,
        content: &'a str,
    },
    Plain,
}

/// Classify a right-trimmed line. Kinds are tested in a fixed priority
/// order and the first match wins: fence > blockquote > list item >
/// header > horizontal rule > plain.
pub fn classify(line: &str) -> BlockKind<'_> {
    if let Some(caps) = FENCE_RE.captures(line) {
        return BlockKind::Fence {
            language: caps.get(1).map_or("", |m| m.as_str()),
        };
    }
    if let Some(content) = line.strip_prefix("> ") {
        return BlockKind::Blockquote { content };
    }
    if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
        return BlockKind::ListItem {
            kind: ListKind::Ordered,
            indent: caps.get(1).map_or("", |m| m.as_str()),
            content: caps.get(3).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = UNORDERED_ITEM_RE.captures(line) {
        return BlockKind::ListItem {
            kind: ListKind::Unordered,
            indent: caps.get(1).map_or("", |m| m.as_str()),
            content: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = HEADER_RE.captures(line) {
        return BlockKind::Header {
            level: caps.get(1).map_or(0, |m| m.as_str().len()),
            content: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if line.trim() == "---" {
        return BlockKind::HorizontalRule;
    }
    BlockKind::Plain
}

/// Whether a line is a code fence (opening or closing).
pub fn is_fence(line: &str) -> bool {
    FENCE_RE.is_match(line)
}
