//! Transient parse model
//!
//! These types exist only for the duration of one extraction run. The parser
//! builds them, the extractor consumes them, and nothing is cached across runs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Ordered mapping of tag-name to one-or-many values
///
/// Lookup is by name, but insertion order is preserved so that repeated runs
/// re-serialize identically. Repeated occurrences of the same tag accumulate
/// in declaration order instead of overwriting each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagTable {
    entries: IndexMap<String, Vec<String>>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: String) {
        self.entries.entry(name.to_string()).or_default().push(value);
    }

    /// First value recorded for a tag, if any
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values recorded for a tag, in declaration order
    pub fn all(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate (name, values) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Layer `other`'s tags underneath this table's own
    ///
    /// Used for supertype tag inheritance: names already present here win
    /// wholesale; names only present in `other` are appended.
    pub fn merged_over(&self, other: &TagTable) -> TagTable {
        let mut merged = self.clone();
        for (name, values) in other.entries.iter() {
            if !merged.entries.contains_key(name) {
                merged.entries.insert(name.clone(), values.clone());
            }
        }
        merged
    }
}

/// One field declaration inside a class body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldUnit {
    /// Declared field name
    pub name: String,
    /// Declared type text, verbatim from source (may be generic or an array)
    pub raw_type: String,
    /// Field-level doc tags
    pub tags: TagTable,
    /// Leading prose of the field's doc block
    pub description: String,
}

/// One class/interface declaration with its doc tags and fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassUnit {
    /// Fully qualified name (package + simple name)
    pub qualified_name: String,
    /// Simple name as declared
    pub simple_name: String,
    /// Raw superclass text from the extends clause, if present
    pub superclass: Option<String>,
    /// Raw interface names from the implements clause
    pub interfaces: Vec<String>,
    /// Class-level doc tags
    pub tags: TagTable,
    /// Leading prose of the class's doc block
    pub description: String,
    /// Fields in declaration order
    pub fields: Vec<FieldUnit>,
}

impl ClassUnit {
    /// Superclass simple name with any type arguments stripped
    pub fn superclass_simple_name(&self) -> Option<&str> {
        let raw = self.superclass.as_deref()?;
        let erased = raw.split('<').next().unwrap_or(raw).trim();
        Some(erased.rsplit('.').next().unwrap_or(erased))
    }
}

/// One parsed source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceUnit {
    /// Path the file was read from
    pub path: PathBuf,
    /// Declared package, empty for the default package
    pub package: String,
    /// Import statements, fully qualified (wildcards keep their trailing `*`)
    pub imports: Vec<String>,
    /// Classes in declaration order
    pub classes: Vec<ClassUnit>,
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} classes)",
            self.path.display(),
            self.classes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_preserves_repeated_values() {
        let mut tags = TagTable::new();
        tags.insert("execute", "phase=compile".to_string());
        tags.insert("execute", "goal=other".to_string());

        assert_eq!(tags.all("execute").len(), 2);
        assert_eq!(tags.first("execute"), Some("phase=compile"));
    }

    #[test]
    fn test_tag_table_preserves_insertion_order() {
        let mut tags = TagTable::new();
        tags.insert("goal", "compile".to_string());
        tags.insert("phase", "process-sources".to_string());
        tags.insert("threadSafe", String::new());

        let names: Vec<&str> = tags.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["goal", "phase", "threadSafe"]);
    }

    #[test]
    fn test_tag_table_missing_name() {
        let tags = TagTable::new();
        assert_eq!(tags.first("goal"), None);
        assert!(tags.all("goal").is_empty());
        assert!(!tags.contains("goal"));
    }

    #[test]
    fn test_merged_over_own_tags_win() {
        let mut own = TagTable::new();
        own.insert("goal", "child".to_string());

        let mut inherited = TagTable::new();
        inherited.insert("goal", "parent".to_string());
        inherited.insert("phase", "compile".to_string());

        let merged = own.merged_over(&inherited);
        assert_eq!(merged.first("goal"), Some("child"));
        assert_eq!(merged.first("phase"), Some("compile"));
    }

    #[test]
    fn test_superclass_simple_name_strips_generics_and_package() {
        let class = ClassUnit {
            qualified_name: "org.example.MyMojo".to_string(),
            simple_name: "MyMojo".to_string(),
            superclass: Some("support.AbstractMojo<String>".to_string()),
            interfaces: vec![],
            tags: TagTable::new(),
            description: String::new(),
            fields: vec![],
        };
        assert_eq!(class.superclass_simple_name(), Some("AbstractMojo"));
    }
}
