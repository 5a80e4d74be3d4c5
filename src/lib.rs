/// A line-oriented Markdown to HTML converter
pub mod block;
pub mod engine;
pub mod inline;
pub mod page;

use engine::Engine;

/// Convert Markdown text to an HTML fragment.
///
/// The fragment has no surrounding `<html>`/`<body>`; lines are joined
/// with `\n` and the result is trimmed of leading and trailing whitespace.
pub fn markdown_to_html(markdown: &str) -> String {
    Engine::new().convert(markdown)
}
