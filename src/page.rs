/// HTML5 document wrapper around a converted fragment
use crate::engine::escape_html;

/// Wrap an HTML fragment in a complete HTML5 document with the given
/// title. Pure formatting; the fragment is inserted unchanged.
pub fn render(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    html.push_str("  <style>\n");
    html.push_str(
        "    body { font-family: sans-serif; line-height: 1.6; padding: 2em; max-width: 800px; margin: 0 auto; }\n",
    );
    html.push_str(
        "    code { background-color: #f4f4f4; padding: 0.2em 0.4em; margin: 0; border-radius: 3px; }\n",
    );
    html.push_str(
        "    blockquote { border-left: 5px solid #ccc; padding-left: 1.5em; margin-left: 0; color: #666; }\n",
    );
    html.push_str("  </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n");
    html.push_str("</html>\n");
    html
}
