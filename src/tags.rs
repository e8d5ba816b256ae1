//! Recognized doc-comment tag vocabulary
//!
//! Every tag the assembler understands is enumerated here once, with its scope,
//! shape, and default value. The assembler consults this table uniformly
//! instead of special-casing tag names at each use site, and the `tags` CLI
//! subcommand prints it.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Tag name constants, to keep call sites typo-proof
pub mod names {
    pub const GOAL: &str = "goal";
    pub const PHASE: &str = "phase";
    pub const EXECUTE: &str = "execute";
    pub const REQUIRES_DEPENDENCY_RESOLUTION: &str = "requiresDependencyResolution";
    pub const REQUIRES_DEPENDENCY_COLLECTION: &str = "requiresDependencyCollection";
    pub const THREAD_SAFE: &str = "threadSafe";
    pub const AGGREGATOR: &str = "aggregator";
    pub const REQUIRES_PROJECT: &str = "requiresProject";
    pub const REQUIRES_ONLINE: &str = "requiresOnline";
    pub const REQUIRES_REPORTS: &str = "requiresReports";
    pub const REQUIRES_DIRECT_INVOCATION: &str = "requiresDirectInvocation";
    pub const EXECUTION_STRATEGY: &str = "executionStrategy";
    pub const INHERIT_BY_DEFAULT: &str = "inheritByDefault";
    pub const INSTANTIATION_STRATEGY: &str = "instantiationStrategy";
    pub const CONFIGURATOR: &str = "configurator";
    pub const SINCE: &str = "since";
    pub const DEPRECATED: &str = "deprecated";

    pub const PARAMETER: &str = "parameter";
    pub const REQUIRED: &str = "required";
    pub const READONLY: &str = "readonly";
    pub const COMPONENT: &str = "component";

    /// Attributes carried by the `parameter` tag value
    pub const ATTR_ALIAS: &str = "alias";
    pub const ATTR_EXPRESSION: &str = "expression";
    pub const ATTR_PROPERTY: &str = "property";
    pub const ATTR_DEFAULT_VALUE: &str = "default-value";
    pub const ATTR_IMPLEMENTATION: &str = "implementation";
    /// Attributes carried by the `component` tag value
    pub const ATTR_ROLE: &str = "role";
    pub const ATTR_ROLE_HINT: &str = "roleHint";
}

/// Where a tag may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagScope {
    Class,
    Field,
}

/// The shape of a tag's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// Presence alone carries the meaning; an optional value refines it
    Flag,
    /// Free-form single value
    Text,
    /// Value is a list of `name="value"` attributes
    Attributed,
}

/// One recognized tag with its documented default
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TagSpec {
    pub name: &'static str,
    pub scope: TagScope,
    pub kind: TagKind,
    /// Value assumed when the tag is absent, if the attribute has one
    pub default: Option<&'static str>,
}

/// The full recognized vocabulary, class tags first
pub const TAGS: &[TagSpec] = &[
    TagSpec {
        name: names::GOAL,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::PHASE,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::EXECUTE,
        scope: TagScope::Class,
        kind: TagKind::Attributed,
        default: None,
    },
    TagSpec {
        name: names::REQUIRES_DEPENDENCY_RESOLUTION,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: Some("runtime"),
    },
    TagSpec {
        name: names::REQUIRES_DEPENDENCY_COLLECTION,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::THREAD_SAFE,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::AGGREGATOR,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::REQUIRES_PROJECT,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("true"),
    },
    TagSpec {
        name: names::REQUIRES_ONLINE,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::REQUIRES_REPORTS,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::REQUIRES_DIRECT_INVOCATION,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::EXECUTION_STRATEGY,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: Some("once-per-session"),
    },
    TagSpec {
        name: names::INHERIT_BY_DEFAULT,
        scope: TagScope::Class,
        kind: TagKind::Flag,
        default: Some("true"),
    },
    TagSpec {
        name: names::INSTANTIATION_STRATEGY,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: Some("per-lookup"),
    },
    TagSpec {
        name: names::CONFIGURATOR,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::SINCE,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::DEPRECATED,
        scope: TagScope::Class,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::PARAMETER,
        scope: TagScope::Field,
        kind: TagKind::Attributed,
        default: None,
    },
    TagSpec {
        name: names::REQUIRED,
        scope: TagScope::Field,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::READONLY,
        scope: TagScope::Field,
        kind: TagKind::Flag,
        default: Some("false"),
    },
    TagSpec {
        name: names::COMPONENT,
        scope: TagScope::Field,
        kind: TagKind::Attributed,
        default: None,
    },
    TagSpec {
        name: names::SINCE,
        scope: TagScope::Field,
        kind: TagKind::Text,
        default: None,
    },
    TagSpec {
        name: names::DEPRECATED,
        scope: TagScope::Field,
        kind: TagKind::Text,
        default: None,
    },
];

/// Look up a tag by name within a scope
pub fn spec_for(name: &str, scope: TagScope) -> Option<&'static TagSpec> {
    TAGS.iter()
        .find(|spec| spec.name == name && spec.scope == scope)
}

/// Interpret a flag tag's value: bare presence means true
pub fn flag_value(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => false,
        Some("") => true,
        Some(text) => !text.eq_ignore_ascii_case("false"),
    }
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([\w.-]+)\s*=\s*"([^"]*)""#).expect("valid regex"))
}

/// Parse an attributed tag value into ordered `name="value"` pairs
///
/// Text before the first attribute (e.g. a bare expression on the parameter
/// tag) is returned separately so callers can honor the older bare form.
pub fn parse_attributes(value: &str) -> (String, IndexMap<String, String>) {
    let mut attributes = IndexMap::new();
    let first_attr = attribute_regex().find(value).map(|m| m.start());
    let bare = match first_attr {
        Some(start) => value[..start].trim().to_string(),
        None => value.trim().to_string(),
    };

    for capture in attribute_regex().captures_iter(value) {
        attributes.insert(capture[1].to_string(), capture[2].to_string());
    }

    (bare, attributes)
}

/// Derive a property key from an interpolation expression
///
/// `${project.build}` yields `project.build`; anything else yields nothing.
pub fn property_from_expression(expression: &str) -> Option<&str> {
    let trimmed = expression.trim();
    trimmed.strip_prefix("${")?.strip_suffix('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_no_duplicate_entries() {
        for (i, a) in TAGS.iter().enumerate() {
            for b in &TAGS[i + 1..] {
                assert!(
                    !(a.name == b.name && a.scope == b.scope),
                    "duplicate tag spec: {}",
                    a.name
                );
            }
        }
    }

    #[test]
    fn test_spec_lookup_is_scope_sensitive() {
        assert!(spec_for(names::GOAL, TagScope::Class).is_some());
        assert!(spec_for(names::GOAL, TagScope::Field).is_none());
        assert!(spec_for(names::PARAMETER, TagScope::Field).is_some());
    }

    #[test]
    fn test_flag_value_semantics() {
        assert!(!flag_value(None));
        assert!(flag_value(Some("")));
        assert!(flag_value(Some("true")));
        assert!(!flag_value(Some("false")));
        assert!(!flag_value(Some("FALSE")));
    }

    #[test]
    fn test_parse_attributes_ordered() {
        let (bare, attrs) =
            parse_attributes(r#"expression="${outDir}" default-value="target" alias="out""#);
        assert!(bare.is_empty());
        let keys: Vec<&str> = attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["expression", "default-value", "alias"]);
        assert_eq!(attrs["expression"], "${outDir}");
    }

    #[test]
    fn test_parse_attributes_bare_prefix() {
        let (bare, attrs) = parse_attributes(r#"${project.build} default-value="x""#);
        assert_eq!(bare, "${project.build}");
        assert_eq!(attrs["default-value"], "x");
    }

    #[test]
    fn test_parse_attributes_empty_value() {
        let (bare, attrs) = parse_attributes("");
        assert!(bare.is_empty());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_property_from_expression() {
        assert_eq!(
            property_from_expression("${project.build}"),
            Some("project.build")
        );
        assert_eq!(property_from_expression("plain"), None);
        assert_eq!(property_from_expression("${unterminated"), None);
    }
}
