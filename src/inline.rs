/// Ordered inline substitution rules
use once_cell::sync::Lazy;
use regex::Regex;

/// The rule order is load-bearing: escapes resolve before any other rule
/// can read a backslashed marker as live syntax, images match before links
/// (link syntax is image syntax minus the leading `!`), and the
/// three-asterisk form matches before its two- and one-asterisk prefixes.
/// Inline code runs last, matching the reference behavior.
static INLINE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\\([\\`*_{}\[\]()#+\-.!])").unwrap(),
            "$1",
        ),
        (
            Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap(),
            r#"<img src="$2" alt="$1">"#,
        ),
        (
            Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap(),
            r#"<a href="$2">$1</a>"#,
        ),
        (
            Regex::new(r"\*\*\*(.*?)\*\*\*").unwrap(),
            "<strong><em>$1</em></strong>",
        ),
        (
            Regex::new(r"\*\*(.*?)\*\*").unwrap(),
            "<strong>$1</strong>",
        ),
        (Regex::new(r"\*(.*?)\*").unwrap(), "<em>$1</em>"),
        (Regex::new(r"`(.*?)`").unwrap(), "<code>$1</code>"),
    ]
});

/// Run the full rule chain over the textual content of a block.
pub fn apply_inline_rules(text: &str) -> String {
    INLINE_RULES.iter().fold(text.to_string(), |acc, (re, rep)| {
        re.replace_all(&acc, *rep).into_owned()
    })
}
