/// Line-by-line conversion engine: block state machine, list nesting
/// stack, and paragraph accumulator.
use crate::block::{self, BlockKind, ListKind};
use crate::inline::apply_inline_rules;

/// The block context the engine is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    InList,
    InBlockquote,
    InFencedCode,
}

/// One open list container, innermost last on the stack.
#[derive(Debug, Clone, Copy)]
struct ListFrame {
    kind: ListKind,
    indent: usize,
}

/// Per-document conversion state. Created fresh for each conversion and
/// consumed by it.
pub struct Engine {
    context: Context,
    list_stack: Vec<ListFrame>,
    paragraph: Vec<String>,
    out: Vec<String>,
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            context: Context::None,
            list_stack: Vec::new(),
            paragraph: Vec::new(),
            out: Vec::new(),
        }
    }

    /// Convert a full Markdown document into an HTML fragment.
    pub fn convert(mut self, markdown: &str) -> String {
        for line in markdown.split('\n') {
            self.process_line(line.trim_end());
        }
        // End of input closes whatever is still open, exactly like a
        // blank line would.
        self.close_current();
        self.out.join("\n").trim().to_string()
    }

    fn process_line(&mut self, line: &str) {
        // An open fence suppresses every other classification until the
        // closing fence, blank lines included.
        if self.context == Context::InFencedCode {
            if block::is_fence(line) {
                self.close_current();
            } else {
                self.append_code_line(line);
            }
            return;
        }

        if line.trim().is_empty() {
            self.close_current();
            return;
        }

        let kind = block::classify(line);
        if target_context(&kind) != self.context {
            self.close_current();
            self.open(&kind);
        }

        match kind {
            BlockKind::Header { level, content } => {
                self.flush_paragraph();
                self.out.push(format!(
                    "<h{level}>{}</h{level}>",
                    apply_inline_rules(content)
                ));
            }
            BlockKind::HorizontalRule => {
                self.flush_paragraph();
                self.out.push("<hr>".to_string());
            }
            BlockKind::Blockquote { content } => {
                // Each quoted line becomes its own paragraph.
                self.out
                    .push(format!("<p>{}</p>", apply_inline_rules(content)));
            }
            BlockKind::Fence { .. } => {
                // The opening tag was emitted on entering the context; the
                // fence line itself produces no content.
            }
            BlockKind::ListItem {
                kind,
                indent,
                content,
            } => self.handle_list_item(kind, indent, content),
            BlockKind::Plain => self.paragraph.push(line.to_string()),
        }
    }

    /// Emit the opening markup for the context a line transitions into.
    fn open(&mut self, kind: &BlockKind<'_>) {
        match kind {
            BlockKind::Blockquote { .. } => {
                self.out.push("<blockquote>".to_string());
                self.context = Context::InBlockquote;
            }
            BlockKind::Fence { language } => {
                let tag = if language.is_empty() {
                    "<pre><code>".to_string()
                } else {
                    format!("<pre><code class=\"language-{language}\">")
                };
                self.out.push(tag);
                self.context = Context::InFencedCode;
            }
            BlockKind::ListItem { .. } => {
                // Opening tags are driven by the nesting stack.
                self.context = Context::InList;
            }
            _ => {}
        }
    }

    /// Close the active context and return to `None`.
    fn close_current(&mut self) {
        match self.context {
            Context::None => self.flush_paragraph(),
            Context::InList => self.close_all_lists(),
            Context::InBlockquote => self.out.push("</blockquote>".to_string()),
            Context::InFencedCode => {
                if let Some(last) = self.out.last_mut() {
                    last.push_str("\n</code></pre>");
                }
            }
        }
        self.context = Context::None;
    }

    /// Adjust the nesting stack for a list item, then emit the item.
    fn handle_list_item(&mut self, kind: ListKind, indent: &str, content: &str) {
        let depth = indent.len();

        // A shallower item closes every deeper list first.
        while self.list_stack.last().is_some_and(|top| depth < top.indent) {
            self.close_top_list();
        }

        match self.list_stack.last().copied() {
            None => self.open_list(kind, depth),
            Some(top) if depth > top.indent => self.open_list(kind, depth),
            Some(top) if top.kind != kind => {
                // Same depth, different marker: switch list type in place.
                self.close_top_list();
                self.open_list(kind, depth);
            }
            Some(_) => {}
        }

        self.out.push(format!(
            "{indent}<li>{}</li>",
            apply_inline_rules(content)
        ));
    }

    fn open_list(&mut self, kind: ListKind, indent: usize) {
        let tag = match kind {
            ListKind::Ordered => "<ol>",
            ListKind::Unordered => "<ul>",
        };
        self.out.push(tag.to_string());
        self.list_stack.push(ListFrame { kind, indent });
    }

    fn close_top_list(&mut self) {
        if let Some(frame) = self.list_stack.pop() {
            let tag = match frame.kind {
                ListKind::Ordered => "</ol>",
                ListKind::Unordered => "</ul>",
            };
            self.out.push(tag.to_string());
        }
    }

    fn close_all_lists(&mut self) {
        while !self.list_stack.is_empty() {
            self.close_top_list();
        }
    }

    /// Join buffered plain lines into one paragraph and emit it. An empty
    /// buffer is a no-op.
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.out
            .push(format!("<p>{}</p>", apply_inline_rules(&text)));
    }

    /// Append a raw code line to the open fenced block, entity-escaped,
    /// never inline-processed.
    fn append_code_line(&mut self, line: &str) {
        if let Some(last) = self.out.last_mut() {
            last.push('\n');
            last.push_str(&escape_html(line));
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// The context a classified line belongs to.
fn target_context(kind: &BlockKind<'_>) -> Context {
    match kind {
        BlockKind::ListItem { .. } => Context::InList,
        BlockKind::Blockquote { .. } => Context::InBlockquote,
        BlockKind::Fence { .. } => Context::InFencedCode,
        _ => Context::None,
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '&' => "&amp;".to_string(),
            '"' => "&quot;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(markdown: &str) -> String {
        Engine::new().convert(markdown)
    }

    #[test]
    fn test_single_line_paragraph() {
        assert_eq!(
            convert("This is a single line."),
            "<p>This is a single line.</p>"
        );
    }

    #[test]
    fn test_consecutive_lines_merge_into_one_paragraph() {
        assert_eq!(
            convert("This is the first line.\nThis is the second line."),
            "<p>This is the first line. This is the second line.</p>"
        );
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        assert_eq!(
            convert("This is paragraph one.\n\nThis is paragraph two."),
            "<p>This is paragraph one.</p>\n<p>This is paragraph two.</p>"
        );
    }

    #[test]
    fn test_header_is_not_wrapped_in_paragraph() {
        assert_eq!(
            convert("# A Header\n\nJust a paragraph."),
            "<h1>A Header</h1>\n<p>Just a paragraph.</p>"
        );
    }

    #[test]
    fn test_header_interrupts_a_paragraph() {
        assert_eq!(
            convert("This is a paragraph.\n# This is a header."),
            "<p>This is a paragraph.</p>\n<h1>This is a header.</h1>"
        );
    }

    #[test]
    fn test_horizontal_rule_between_paragraphs() {
        assert_eq!(
            convert("above\n\n---\n\nbelow"),
            "<p>above</p>\n<hr>\n<p>below</p>"
        );
    }

    #[test]
    fn test_simple_unordered_list() {
        assert_eq!(
            convert("* One\n* Two"),
            "<ul>\n<li>One</li>\n<li>Two</li>\n</ul>"
        );
    }

    #[test]
    fn test_simple_ordered_list() {
        assert_eq!(
            convert("1. One\n2. Two"),
            "<ol>\n<li>One</li>\n<li>Two</li>\n</ol>"
        );
    }

    #[test]
    fn test_list_opens_and_closes_between_paragraphs() {
        assert_eq!(
            convert("Para 1\n* Item 1\n* Item 2\nPara 2"),
            "<p>Para 1</p>\n<ul>\n<li>Item 1</li>\n<li>Item 2</li>\n</ul>\n<p>Para 2</p>"
        );
    }

    #[test]
    fn test_ordered_list_with_nested_unordered() {
        assert_eq!(
            convert("1. First\n  * Nested A\n  * Nested B\n2. Second"),
            "<ol>\n<li>First</li>\n<ul>\n  <li>Nested A</li>\n  <li>Nested B</li>\n</ul>\n<li>Second</li>\n</ol>"
        );
    }

    #[test]
    fn test_unordered_list_with_nested_ordered() {
        assert_eq!(
            convert("* First\n  1. Nested A\n  2. Nested B\n* Second"),
            "<ul>\n<li>First</li>\n<ol>\n  <li>Nested A</li>\n  <li>Nested B</li>\n</ol>\n<li>Second</li>\n</ul>"
        );
    }

    #[test]
    fn test_multiple_levels_of_nesting() {
        assert_eq!(
            convert("1. Level 1\n  * Level 2\n    1. Level 3"),
            "<ol>\n<li>Level 1</li>\n<ul>\n  <li>Level 2</li>\n<ol>\n    <li>Level 3</li>\n</ol>\n</ul>\n</ol>"
        );
    }

    #[test]
    fn test_all_lists_close_after_blank_line() {
        assert_eq!(
            convert("* Item A\n  1. Item B\n\nA new paragraph."),
            "<ul>\n<li>Item A</li>\n<ol>\n  <li>Item B</li>\n</ol>\n</ul>\n<p>A new paragraph.</p>"
        );
    }

    #[test]
    fn test_list_type_switch_at_same_depth() {
        assert_eq!(
            convert("* bullet\n1. number"),
            "<ul>\n<li>bullet</li>\n</ul>\n<ol>\n<li>number</li>\n</ol>"
        );
    }

    #[test]
    fn test_open_lists_close_at_end_of_document() {
        assert_eq!(
            convert("* a\n  * b"),
            "<ul>\n<li>a</li>\n<ul>\n  <li>b</li>\n</ul>\n</ul>"
        );
    }

    #[test]
    fn test_single_line_blockquote() {
        assert_eq!(
            convert("> Hello world"),
            "<blockquote>\n<p>Hello world</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_quoted_lines_stay_separate_paragraphs() {
        assert_eq!(
            convert("> First line.\n> Second line."),
            "<blockquote>\n<p>First line.</p>\n<p>Second line.</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_blockquote_with_inline_styles() {
        assert_eq!(
            convert("> This is **bold** and *italic*."),
            "<blockquote>\n<p>This is <strong>bold</strong> and <em>italic</em>.</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_blank_line_separates_blockquotes() {
        assert_eq!(
            convert("> Quote one.\n\n> Quote two."),
            "<blockquote>\n<p>Quote one.</p>\n</blockquote>\n<blockquote>\n<p>Quote two.</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(convert("```\ncode\n```"), "<pre><code>\ncode\n</code></pre>");
    }

    #[test]
    fn test_fenced_code_with_language() {
        assert_eq!(
            convert("```rust\nlet x = 1;\n```"),
            "<pre><code class=\"language-rust\">\nlet x = 1;\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_is_entity_escaped() {
        assert_eq!(
            convert("```\n<p>Hello</p>\n```"),
            "<pre><code>\n&lt;p&gt;Hello&lt;/p&gt;\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_is_never_inline_processed() {
        assert_eq!(
            convert("```\n`code`\n```"),
            "<pre><code>\n`code`\n</code></pre>"
        );
    }

    #[test]
    fn test_blank_lines_inside_fence_are_preserved() {
        assert_eq!(
            convert("```\nline 1\n\nline 3\n```"),
            "<pre><code>\nline 1\n\nline 3\n</code></pre>"
        );
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(convert("```\n```"), "<pre><code>\n</code></pre>");
    }

    #[test]
    fn test_unterminated_fence_closes_at_end_of_document() {
        assert_eq!(convert("```\nlet x;"), "<pre><code>\nlet x;\n</code></pre>");
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let markdown = "# T\n\n* a\n  * b\n\n> q\n\n```\nx\n```";
        assert_eq!(convert(markdown), convert(markdown));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }
}
