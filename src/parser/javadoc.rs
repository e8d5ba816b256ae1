//! Doc-comment block parsing
//!
//! Takes the interior of a `/** ... */` block and splits it into leading
//! description prose plus an ordered tag table. A tag line starts with `@`
//! followed by the tag name; its value runs until the next tag line or the end
//! of the block, and repeated tags accumulate instead of overwriting.

use crate::model::TagTable;

/// Parsed contents of one documentation block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub description: String,
    pub tags: TagTable,
}

/// Parse the text between `/**` and `*/`
pub fn parse_doc_block(body: &str) -> DocBlock {
    let mut description_lines: Vec<String> = Vec::new();
    let mut tags = TagTable::new();
    // (name, value-so-far) of the tag currently being accumulated
    let mut open_tag: Option<(String, String)> = None;

    for raw_line in body.lines() {
        let line = strip_comment_decoration(raw_line);

        if let Some(rest) = tag_line(line) {
            if let Some((name, value)) = open_tag.take() {
                tags.insert(&name, value.trim().to_string());
            }
            let (name, value) = split_tag(rest);
            open_tag = Some((name.to_string(), value.to_string()));
        } else if let Some((_, value)) = open_tag.as_mut() {
            if !line.trim().is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line.trim());
            }
        } else {
            description_lines.push(line.trim_end().to_string());
        }
    }

    if let Some((name, value)) = open_tag {
        tags.insert(&name, value.trim().to_string());
    }

    let description = description_lines.join("\n").trim().to_string();
    DocBlock { description, tags }
}

/// Drop the leading `*` decoration doc blocks conventionally carry
fn strip_comment_decoration(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    }
}

/// If the line opens a tag, return the text after the `@`
///
/// Inline constructs like `{@link Foo}` never start a line after decoration
/// stripping unless the author wrapped mid-construct, which we treat as prose.
fn tag_line(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('@')?;
    let first = rest.chars().next()?;
    if first.is_alphabetic() {
        Some(rest)
    } else {
        None
    }
}

fn split_tag(rest: &str) -> (&str, &str) {
    match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim_start()),
        None => (rest, ""),
    }
}
