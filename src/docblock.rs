//! Doc-comment parser.
//!
//! Splits a raw `/** ... */` block into a free-text description and an
//! ordered map of `@tag` bodies. Never fails: anything that does not look
//! like a tag is treated as text.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

// `@name` followed by whitespace or end of line
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z][A-Za-z0-9_:\\-]*)(?:[[:space:]]+(.*))?$").unwrap()
});

/// Parsed doc-comment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    /// Free text before the first tag; may be empty.
    pub description: String,
    /// Tag name (without `@`) to bodies, in first-seen order.
    pub tags: IndexMap<String, Vec<String>>,
}

impl ParsedDoc {
    /// All bodies of a tag, in source order.
    pub fn tag(&self, name: &str) -> &[String] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.tag(name).first().map(String::as_str)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }
}

/// Parse an optional raw doc-comment.
pub fn parse_opt(raw: Option<&str>) -> ParsedDoc {
    raw.map(parse).unwrap_or_default()
}

/// Parse a raw doc-comment.
pub fn parse(raw: &str) -> ParsedDoc {
    let mut doc = ParsedDoc::default();
    let mut preamble: Vec<&str> = Vec::new();
    // (tag name, index of the body in its list)
    let mut current: Option<(String, usize)> = None;

    for line in strip_delimiters(raw).lines() {
        let line = strip_line_marker(line);

        if let Some(caps) = RE_TAG.captures(line) {
            let name = caps[1].to_string();
            let body = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            let bodies = doc.tags.entry(name.clone()).or_default();
            bodies.push(body);
            current = Some((name, bodies.len() - 1));
            continue;
        }

        match current {
            None => preamble.push(line.trim_end()),
            Some((ref name, idx)) => {
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                if let Some(body) = doc.tags.get_mut(name).and_then(|b| b.get_mut(idx)) {
                    if !body.is_empty() {
                        body.push(' ');
                    }
                    body.push_str(text);
                }
            }
        }
    }

    doc.description = trim_blank_lines(&preamble);
    doc
}

/// Remove `/**`, `/*` and `*/` around the block.
fn strip_delimiters(raw: &str) -> &str {
    let text = raw.trim();
    let text = text
        .strip_prefix("/**")
        .or_else(|| text.strip_prefix("/*"))
        .unwrap_or(text);
    text.strip_suffix("*/").unwrap_or(text)
}

/// Remove leading whitespace, one `*` marker and the single space after it.
fn strip_line_marker(line: &str) -> &str {
    let line = line.trim_start();
    match line.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

/// Split a tag body into its leading type expression and the rest.
///
/// The type ends at the first whitespace outside `<>`, `()`, `{}` and `[]`,
/// so `array<string, int> $map` yields `array<string, int>`. Whitespace
/// around a top-level `|` or after a callable's `:` stays inside the type.
/// Bodies that open with a variable (`$x`, `&$x`, `...$x`) have no type.
pub fn split_type(body: &str) -> (&str, &str) {
    let body = body.trim_start();
    if starts_with_variable(body) {
        return ("", body);
    }

    let mut depth = 0usize;
    let mut prev = None;
    let mut iter = body.char_indices().peekable();
    while let Some((pos, c)) = iter.next() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                let rest = body[pos..].trim_start();
                let joined = matches!(prev, Some(':' | '|')) || rest.starts_with('|');
                if !joined || rest.is_empty() {
                    return (&body[..pos], rest);
                }
                // skip to the next token, still inside the type
                while iter.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
                    iter.next();
                }
                continue;
            }
            _ => {}
        }
        prev = Some(c);
    }
    (body, "")
}

fn starts_with_variable(text: &str) -> bool {
    let text = text.strip_prefix('&').unwrap_or(text);
    let text = text.strip_prefix("...").unwrap_or(text);
    text.starts_with('$')
}

/// Join lines, dropping blank lines at either end but keeping interior ones.
fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comment() {
        assert_eq!(parse(""), ParsedDoc::default());
        assert_eq!(parse("/** */"), ParsedDoc::default());
        assert_eq!(parse_opt(None), ParsedDoc::default());
    }

    #[test]
    fn description_only() {
        let doc = parse("/**\n * Gets the name.\n */");
        assert_eq!(doc.description, "Gets the name.");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn single_line_comment() {
        let doc = parse("/** Gets the name. */");
        assert_eq!(doc.description, "Gets the name.");
    }

    #[test]
    fn paragraphs_kept() {
        let doc = parse("/**\n *\n * First.\n *\n * Second.\n *\n */");
        assert_eq!(doc.description, "First.\n\nSecond.");
    }

    #[test]
    fn indentation_inside_description_kept() {
        let doc = parse("/**\n * Example:\n *     $x = 1;\n */");
        assert_eq!(doc.description, "Example:\n    $x = 1;");
    }

    #[test]
    fn repeated_tags_keep_order() {
        let doc = parse(
            "/**\n * Adds.\n *\n * @param int $a First\n * @param int $b Second\n * @return int\n */",
        );
        assert_eq!(doc.description, "Adds.");
        assert_eq!(doc.tag("param"), ["int $a First", "int $b Second"]);
        assert_eq!(doc.first("return"), Some("int"));
        let names: Vec<&str> = doc.tags.keys().map(String::as_str).collect();
        assert_eq!(names, ["param", "return"]);
    }

    #[test]
    fn continuation_lines_appended() {
        let doc = parse("/**\n * @param string $s A long\n *     description here\n */");
        assert_eq!(doc.tag("param"), ["string $s A long description here"]);
    }

    #[test]
    fn tag_without_body() {
        let doc = parse("/**\n * @deprecated\n * @internal\n */");
        assert_eq!(doc.first("deprecated"), Some(""));
        assert!(doc.has_tag("internal"));
    }

    #[test]
    fn malformed_tag_is_text() {
        let doc = parse("/**\n * Mail me @ home.\n * @ not a tag\n * @1abc\n */");
        assert_eq!(doc.description, "Mail me @ home.\n@ not a tag\n@1abc");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn malformed_line_after_tag_joins_tag() {
        let doc = parse("/**\n * @return string\n * @)\n */");
        assert_eq!(doc.tag("return"), ["string @)"]);
    }

    #[test]
    fn namespaced_tag_names() {
        let doc = parse("/** @phpstan-return list<int> */");
        assert_eq!(doc.first("phpstan-return"), Some("list<int>"));
    }

    #[test]
    fn split_type_simple() {
        assert_eq!(split_type("string $s Text"), ("string", "$s Text"));
        assert_eq!(split_type("int"), ("int", ""));
        assert_eq!(split_type("$s Text"), ("", "$s Text"));
        assert_eq!(split_type("&$out"), ("", "&$out"));
        assert_eq!(split_type("...$rest"), ("", "...$rest"));
        assert_eq!(split_type(""), ("", ""));
    }

    #[test]
    fn split_type_keeps_spaces_inside_brackets() {
        assert_eq!(
            split_type("array<string, int> $map Lookup table"),
            ("array<string, int>", "$map Lookup table")
        );
        assert_eq!(
            split_type("array{id: int, name: string} Row"),
            ("array{id: int, name: string}", "Row")
        );
    }

    #[test]
    fn split_type_callable_and_union() {
        assert_eq!(
            split_type("callable(int, string): void $cb Handler"),
            ("callable(int, string): void", "$cb Handler")
        );
        assert_eq!(split_type("int | null $n"), ("int | null", "$n"));
        assert_eq!(split_type("Closure(): "), ("Closure():", ""));
    }
}
