//! Comment-tag source parser
//!
//! A single character-level pass over one Java source file. The walker tracks
//! comments, string/char literals, and brace depth; captures the doc block
//! preceding each class and field declaration; and records each field's raw
//! declared type verbatim. It deliberately does no type checking, and it never
//! looks at annotations beyond skipping over them, so sources that only carry
//! annotation-based metadata parse cleanly into tag-less classes.

pub mod javadoc;

use crate::model::{ClassUnit, FieldUnit, SourceUnit};
use javadoc::DocBlock;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Structural parse failure, isolated to one file
#[derive(Debug, Error)]
#[error("{path}:{line}: {reason}")]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub reason: String,
}

/// Parse one source file into its transient model
pub fn parse_source(path: &Path, text: &str) -> Result<SourceUnit, ParseError> {
    Walker::new(path, text).run()
}

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "transient",
    "volatile",
    "native",
    "synchronized",
    "strictfp",
    "default",
];

fn class_decl_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?:public|protected|private|abstract|final|static|strictfp)\s+)*(class|interface|enum)\s+([A-Za-z_$][\w$]*)(.*)$",
        )
        .expect("valid regex")
    })
}

fn field_decl_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+?)\s+([A-Za-z_$][\w$]*)\s*((?:\[\s*\])*)$").expect("valid regex")
    })
}

fn extra_declarator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_$][\w$]*)\s*((?:\[\s*\])*)$").expect("valid regex")
    })
}

/// A class currently open in the walk: index into the unit plus the brace
/// depth of its body
struct OpenClass {
    index: usize,
    body_depth: usize,
}

struct Walker<'a> {
    path: &'a Path,
    chars: Vec<char>,
    i: usize,
    line: usize,
    depth: usize,
    statement: String,
    pending_doc: Option<DocBlock>,
    unit: SourceUnit,
    open_classes: Vec<OpenClass>,
    // Field initializer bodies suspended at an opening brace, restored on close
    suspended: Vec<(usize, String, Option<DocBlock>)>,
}

impl<'a> Walker<'a> {
    fn new(path: &'a Path, text: &str) -> Self {
        Self {
            path,
            chars: text.chars().collect(),
            i: 0,
            line: 1,
            depth: 0,
            statement: String::new(),
            pending_doc: None,
            unit: SourceUnit {
                path: path.to_path_buf(),
                package: String::new(),
                imports: Vec::new(),
                classes: Vec::new(),
            },
            open_classes: Vec::new(),
            suspended: Vec::new(),
        }
    }

    fn error(&self, line: usize, reason: impl Into<String>) -> ParseError {
        ParseError {
            path: self.path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.i + offset).copied()
    }

    fn run(mut self) -> Result<SourceUnit, ParseError> {
        while self.i < self.chars.len() {
            match self.chars[self.i] {
                '/' if self.peek(1) == Some('/') => self.consume_line_comment(),
                '/' if self.peek(1) == Some('*') => self.consume_block_comment()?,
                '"' => self.consume_string_literal()?,
                '\'' => self.consume_char_literal()?,
                '@' => self.consume_annotation()?,
                '{' => self.on_open_brace(),
                '}' => self.on_close_brace()?,
                ';' => self.on_statement_end(),
                '\n' => {
                    self.line += 1;
                    self.statement.push(' ');
                    self.i += 1;
                }
                c => {
                    self.statement.push(c);
                    self.i += 1;
                }
            }
        }

        if self.depth != 0 {
            return Err(self.error(self.line, "unbalanced braces at end of file"));
        }
        Ok(self.unit)
    }

    fn consume_line_comment(&mut self) {
        while self.i < self.chars.len() && self.chars[self.i] != '\n' {
            self.i += 1;
        }
    }

    fn consume_block_comment(&mut self) -> Result<(), ParseError> {
        let start_line = self.line;
        self.i += 2;
        let is_doc = self.peek(0) == Some('*') && self.peek(1) != Some('/');
        if is_doc {
            self.i += 1;
        }

        let mut body = String::new();
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.i += 2;
                    break;
                }
                (Some(c), _) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    body.push(c);
                    self.i += 1;
                }
                (None, _) => {
                    return Err(self.error(start_line, "unterminated block comment"));
                }
            }
        }

        if is_doc {
            self.pending_doc = Some(javadoc::parse_doc_block(&body));
        }
        Ok(())
    }

    fn consume_string_literal(&mut self) -> Result<(), ParseError> {
        let start_line = self.line;
        // Text block
        if self.peek(1) == Some('"') && self.peek(2) == Some('"') {
            self.i += 3;
            loop {
                match self.peek(0) {
                    Some('"') if self.peek(1) == Some('"') && self.peek(2) == Some('"') => {
                        self.i += 3;
                        break;
                    }
                    Some(c) => {
                        if c == '\n' {
                            self.line += 1;
                        }
                        self.i += 1;
                    }
                    None => return Err(self.error(start_line, "unterminated text block")),
                }
            }
            self.statement.push_str("\"\"");
            return Ok(());
        }

        self.skip_quoted('"', "unterminated string literal")?;
        // Keep the statement structurally intact without the literal contents
        self.statement.push_str("\"\"");
        Ok(())
    }

    fn consume_char_literal(&mut self) -> Result<(), ParseError> {
        self.skip_quoted('\'', "unterminated character literal")?;
        self.statement.push_str("''");
        Ok(())
    }

    /// Advance past a quoted literal starting at the current position
    fn skip_quoted(&mut self, quote: char, unterminated: &str) -> Result<(), ParseError> {
        let start_line = self.line;
        self.i += 1;
        loop {
            match self.peek(0) {
                Some('\\') => self.i += 2,
                Some(c) if c == quote => {
                    self.i += 1;
                    return Ok(());
                }
                Some('\n') | None => {
                    return Err(self.error(start_line, unterminated));
                }
                Some(_) => self.i += 1,
            }
        }
    }

    /// Advance past an annotation, including a balanced argument list
    ///
    /// Argument lists may carry braces (`@SuppressWarnings({"unchecked"})`),
    /// nested annotations with their own parens, and string literals, none of
    /// which may leak into the statement or the brace depth.
    fn consume_annotation(&mut self) -> Result<(), ParseError> {
        let start_line = self.line;
        self.i += 1;
        while let Some(c) = self.peek(0) {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                self.i += 1;
            } else {
                break;
            }
        }

        // Look past whitespace for an argument list without committing to it
        let mut lookahead = 0;
        let mut newlines = 0;
        while let Some(c) = self.peek(lookahead) {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                newlines += 1;
            }
            lookahead += 1;
        }
        if self.peek(lookahead) != Some('(') {
            self.statement.push(' ');
            return Ok(());
        }

        self.i += lookahead + 1;
        self.line += newlines;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek(0) {
                Some('(') => {
                    depth += 1;
                    self.i += 1;
                }
                Some(')') => {
                    depth -= 1;
                    self.i += 1;
                }
                Some('"') => self.skip_quoted('"', "unterminated string literal")?,
                Some('\'') => self.skip_quoted('\'', "unterminated character literal")?,
                Some('\n') => {
                    self.line += 1;
                    self.i += 1;
                }
                Some(_) => self.i += 1,
                None => {
                    return Err(self.error(start_line, "unterminated annotation arguments"));
                }
            }
        }
        self.statement.push(' ');
        Ok(())
    }

    fn on_open_brace(&mut self) {
        let header = collapse_whitespace(&self.statement);
        self.statement.clear();
        self.i += 1;
        self.depth += 1;

        if let Some(index) = self.try_open_class(&header) {
            self.open_classes.push(OpenClass {
                index,
                body_depth: self.depth,
            });
            self.pending_doc = None;
            return;
        }

        if header.contains('=') && self.at_class_body_depth_before_open() {
            // Array or anonymous-class initializer: keep the declaration text
            // and the field's doc block alive across the braces
            let doc = self.pending_doc.take();
            self.suspended.push((self.depth, header, doc));
            return;
        }

        // Method body, initializer block, enum constant body, ...
        self.pending_doc = None;
    }

    fn at_class_body_depth_before_open(&self) -> bool {
        self.open_classes
            .last()
            .map(|open| self.depth == open.body_depth + 1)
            .unwrap_or(false)
    }

    fn on_close_brace(&mut self) -> Result<(), ParseError> {
        if self.depth == 0 {
            return Err(self.error(self.line, "unexpected closing brace"));
        }

        if let Some((suspended_depth, _, _)) = self.suspended.last() {
            if *suspended_depth == self.depth {
                let (_, header, doc) = self.suspended.pop().expect("checked non-empty");
                self.statement = header;
                self.pending_doc = doc;
                self.depth -= 1;
                self.i += 1;
                return Ok(());
            }
        }

        if let Some(open) = self.open_classes.last() {
            if open.body_depth == self.depth {
                self.open_classes.pop();
            }
        }

        self.statement.clear();
        self.pending_doc = None;
        self.depth -= 1;
        self.i += 1;
        Ok(())
    }

    fn on_statement_end(&mut self) {
        let stmt = collapse_whitespace(&self.statement);
        self.statement.clear();
        self.i += 1;

        if self.depth == 0 && self.open_classes.is_empty() {
            self.on_top_level_statement(&stmt);
            self.pending_doc = None;
            return;
        }

        let at_body_depth = self
            .open_classes
            .last()
            .map(|open| open.body_depth == self.depth)
            .unwrap_or(false);
        if at_body_depth {
            let doc = self.pending_doc.take().unwrap_or_default();
            let class_index = self.open_classes.last().map(|open| open.index);
            if let Some(index) = class_index {
                let fields = parse_field_statement(&stmt, &doc);
                self.unit.classes[index].fields.extend(fields);
            }
        }
        self.pending_doc = None;
    }

    fn on_top_level_statement(&mut self, stmt: &str) {
        if let Some(rest) = stmt.strip_prefix("package ") {
            self.unit.package = rest.trim().to_string();
        } else if stmt.starts_with("import static ") {
            // Static imports never name a field type
        } else if let Some(rest) = stmt.strip_prefix("import ") {
            self.unit.imports.push(rest.trim().to_string());
        }
    }

    /// If the header is a type declaration, record it and return its index
    fn try_open_class(&mut self, header: &str) -> Option<usize> {
        let captures = class_decl_regex().captures(header)?;

        let simple_name = captures[2].to_string();
        let remainder = strip_leading_type_params(captures[3].trim());

        let (extends_part, implements_part) = split_keyword(remainder, "implements");
        let superclass = split_keyword(extends_part, "extends")
            .1
            .and_then(|text| split_top_level_commas(text).first().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty());
        let interfaces = implements_part
            .map(|text| {
                split_top_level_commas(text)
                    .iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let mut qualifier: Vec<&str> = Vec::new();
        if !self.unit.package.is_empty() {
            qualifier.push(&self.unit.package);
        }
        for open in &self.open_classes {
            qualifier.push(&self.unit.classes[open.index].simple_name);
        }
        let qualified_name = if qualifier.is_empty() {
            simple_name.clone()
        } else {
            format!("{}.{}", qualifier.join("."), simple_name)
        };

        let doc = self.pending_doc.take().unwrap_or_default();
        self.unit.classes.push(ClassUnit {
            qualified_name,
            simple_name,
            superclass,
            interfaces,
            tags: doc.tags,
            description: doc.description,
            fields: Vec::new(),
        });
        Some(self.unit.classes.len() - 1)
    }
}

/// Parse a class-body statement into field declarations
///
/// Method signatures (anything with a parameter list) and bare enum constants
/// yield nothing. `int a, b;` yields two fields sharing the doc block.
fn parse_field_statement(stmt: &str, doc: &DocBlock) -> Vec<FieldUnit> {
    let declaration = stmt.split('=').next().unwrap_or(stmt).trim();
    // A parameter list left of any initializer means this is a method, not a field
    if declaration.contains('(') {
        return Vec::new();
    }
    let segments = split_top_level_commas(declaration);
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let without_modifiers = strip_modifiers(first.trim());
    let Some(captures) = field_decl_regex().captures(without_modifiers) else {
        return Vec::new();
    };

    let base_type = captures[1].trim().to_string();
    if base_type.is_empty() || MODIFIERS.contains(&base_type.as_str()) {
        return Vec::new();
    }
    let first_name = captures[2].to_string();
    let first_type = append_brackets(&base_type, &captures[3]);

    let make_field = |name: String, raw_type: String| FieldUnit {
        name,
        raw_type,
        tags: doc.tags.clone(),
        description: doc.description.clone(),
    };

    let mut fields = vec![make_field(first_name, first_type)];
    for segment in &segments[1..] {
        if let Some(captures) = extra_declarator_regex().captures(segment.trim()) {
            let raw_type = append_brackets(&base_type, &captures[2]);
            fields.push(make_field(captures[1].to_string(), raw_type));
        }
    }
    fields
}

fn strip_modifiers(text: &str) -> &str {
    let mut rest = text;
    loop {
        let Some(word_end) = rest.find(char::is_whitespace) else {
            return rest;
        };
        if MODIFIERS.contains(&&rest[..word_end]) {
            rest = rest[word_end..].trim_start();
        } else {
            return rest;
        }
    }
}

fn append_brackets(base: &str, brackets: &str) -> String {
    let pairs = brackets.matches('[').count();
    let mut result = base.to_string();
    for _ in 0..pairs {
        result.push_str("[]");
    }
    result
}

fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_space = true;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
            }
            last_was_space = true;
        } else {
            result.push(c);
            last_was_space = false;
        }
    }
    result.trim_end().to_string()
}

/// Drop a leading balanced `<...>` type-parameter section
fn strip_leading_type_params(text: &str) -> &str {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('<') {
        return trimmed;
    }
    let mut depth = 0usize;
    for (pos, c) in trimmed.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return trimmed[pos + 1..].trim_start();
                }
            }
            _ => {}
        }
    }
    trimmed
}

/// Split `text` at a standalone keyword, returning (before, Some(after))
fn split_keyword<'t>(text: &'t str, keyword: &str) -> (&'t str, Option<&'t str>) {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(keyword) {
        let start = search_from + found;
        let end = start + keyword.len();
        let before_ok = start == 0
            || text[..start]
                .chars()
                .next_back()
                .map(char::is_whitespace)
                .unwrap_or(true);
        let after_ok = text[end..]
            .chars()
            .next()
            .map(char::is_whitespace)
            .unwrap_or(false);
        if before_ok && after_ok {
            return (text[..start].trim(), Some(text[end..].trim()));
        }
        search_from = end;
    }
    (text.trim(), None)
}

/// Split on commas that sit outside angle brackets, parens, and brackets
fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0isize;
    let mut start = 0;
    for (pos, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&text[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
