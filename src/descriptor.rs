//! Goal descriptor output model
//!
//! These are the durable products of an extraction run, owned by the caller
//! once returned and ready for serialization into a plugin-descriptor format.
//! The extractor never writes them to disk itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plugin-level metadata not derivable from source, passed through untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginCoordinates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
}

/// Forked execution requested by an `execute` tag
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<String>,
}

/// One configurable parameter of a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Field-level alias when present, otherwise the field name
    pub name: String,
    /// Canonical resolved type of the backing field
    #[serde(rename = "type")]
    pub type_name: String,
    /// Interpolation expression supplying the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Property key, explicit or derived from the expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub required: bool,
    pub editable: bool,
    /// Literal implementation override from the tag, propagated verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

/// The extraction output for one eligible class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalDescriptor {
    /// Goal name, non-empty and unique within one run
    pub goal: String,
    /// Fully qualified name of the implementing class
    pub implementation: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub executions: Vec<ExecutionSpec>,
    pub thread_safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_dependency_resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_dependency_collection: Option<String>,
    pub aggregator: bool,
    pub requires_project: bool,
    pub requires_online: bool,
    pub requires_reports: bool,
    pub requires_direct_invocation: bool,
    pub inherit_by_default: bool,
    pub execution_strategy: String,
    pub instantiation_strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(default)]
    pub plugin: PluginCoordinates,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl GoalDescriptor {
    /// Parameter lookup by final (possibly aliased) name
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl fmt::Display for GoalDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} parameters)",
            self.goal,
            self.implementation,
            self.parameters.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GoalDescriptor {
        GoalDescriptor {
            goal: "compile".to_string(),
            implementation: "org.example.CompileMojo".to_string(),
            description: String::new(),
            phase: None,
            executions: vec![],
            thread_safe: false,
            requires_dependency_resolution: None,
            requires_dependency_collection: None,
            aggregator: false,
            requires_project: true,
            requires_online: false,
            requires_reports: false,
            requires_direct_invocation: false,
            inherit_by_default: true,
            execution_strategy: "once-per-session".to_string(),
            instantiation_strategy: "per-lookup".to_string(),
            configurator: None,
            since: None,
            deprecated: None,
            plugin: PluginCoordinates::default(),
            parameters: vec![ParameterDescriptor {
                name: "sources".to_string(),
                type_name: "java.lang.String[]".to_string(),
                expression: None,
                property: None,
                default_value: None,
                required: true,
                editable: true,
                implementation: None,
                description: String::new(),
                since: None,
                deprecated: None,
            }],
        }
    }

    #[test]
    fn test_parameter_lookup() {
        let descriptor = sample();
        assert!(descriptor.parameter("sources").is_some());
        assert!(descriptor.parameter("missing").is_none());
    }

    #[test]
    fn test_json_omits_absent_optionals() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("phase"));
        assert!(!json.contains("implementation\":null"));
        assert!(json.contains("\"type\":\"java.lang.String[]\""));
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.contains("compile"));
        assert!(text.contains("1 parameters"));
    }
}
