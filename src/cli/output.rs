//! Output formatting for extraction results
//!
//! Formatters for JSON, YAML, and human-readable text, shared by the CLI
//! subcommands.

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::extractor::ExtractionOutcome;
use crate::tags::{TagKind, TagScope, TAGS};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Formatter for extraction outcomes and the tag vocabulary
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_outcome(&self, outcome: &ExtractionOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(outcome).context("Failed to serialize outcome as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(outcome).context("Failed to serialize outcome as YAML")
            }
            OutputFormat::Human => Ok(self.format_outcome_human(outcome)),
        }
    }

    pub fn format_tags(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(TAGS).context("Failed to serialize tags as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(TAGS).context("Failed to serialize tags as YAML")
            }
            OutputFormat::Human => Ok(self.format_tags_human()),
        }
    }

    fn format_outcome_human(&self, outcome: &ExtractionOutcome) -> String {
        let mut out = String::new();
        if outcome.descriptors.is_empty() {
            out.push_str("No goals found.\n");
        }
        for descriptor in &outcome.descriptors {
            let _ = writeln!(out, "goal: {}", descriptor.goal);
            let _ = writeln!(out, "  implementation: {}", descriptor.implementation);
            if let Some(phase) = &descriptor.phase {
                let _ = writeln!(out, "  phase: {}", phase);
            }
            if descriptor.thread_safe {
                out.push_str("  thread-safe\n");
            }
            for parameter in &descriptor.parameters {
                let mut annotations = Vec::new();
                if parameter.required {
                    annotations.push("required");
                }
                if !parameter.editable {
                    annotations.push("readonly");
                }
                let suffix = if annotations.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", annotations.join(", "))
                };
                let _ = writeln!(
                    out,
                    "  parameter: {} : {}{}",
                    parameter.name, parameter.type_name, suffix
                );
            }
            out.push('\n');
        }

        if !outcome.diagnostics.is_empty() {
            out.push_str("Diagnostics:\n");
            for diagnostic in &outcome.diagnostics {
                let _ = writeln!(out, "  {}", diagnostic);
            }
        }
        out
    }

    fn format_tags_human(&self) -> String {
        let mut out = String::new();
        for scope in [TagScope::Class, TagScope::Field] {
            let heading = match scope {
                TagScope::Class => "Class-level tags:",
                TagScope::Field => "Field-level tags:",
            };
            let _ = writeln!(out, "{}", heading);
            for spec in TAGS.iter().filter(|spec| spec.scope == scope) {
                let kind = match spec.kind {
                    TagKind::Flag => "flag",
                    TagKind::Text => "text",
                    TagKind::Attributed => "attributed",
                };
                match spec.default {
                    Some(default) => {
                        let _ = writeln!(
                            out,
                            "  @{:<30} {:<11} default: {}",
                            spec.name, kind, default
                        );
                    }
                    None => {
                        let _ = writeln!(out, "  @{:<30} {}", spec.name, kind);
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
