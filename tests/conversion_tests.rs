use marky::markdown_to_html;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    markdown: String,
    html: String,
}

#[test]
fn conversion_cases() {
    let data = fs::read_to_string("tests/data/cases.json").expect("Failed to read cases.json");

    let cases: Vec<Case> = serde_json::from_str(&data).expect("Failed to parse cases.json");

    for case in &cases {
        let result = markdown_to_html(&case.markdown);
        assert_eq!(
            result, case.html,
            "case '{}' failed\n  input: {:?}",
            case.name, case.markdown
        );
    }
}
