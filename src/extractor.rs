//! Extraction pipeline
//!
//! Ties the scanner, parser, and resolver together: scans the configured
//! source roots, parses every file (isolating structurally broken ones),
//! decides per class whether it exposes a goal, merges inherited parameter
//! fields from in-scope supertypes, and assembles one [`GoalDescriptor`] per
//! eligible class. One bad file or class never aborts the run; only a failed
//! scan does.

use crate::config::ExtractConfig;
use crate::descriptor::{
    ExecutionSpec, GoalDescriptor, ParameterDescriptor, PluginCoordinates,
};
use crate::error::{Diagnostic, ExtractError};
use crate::model::{ClassUnit, FieldUnit, SourceUnit, TagTable};
use crate::parser;
use crate::resolver::{canonical_type_name, TypeScope};
use crate::scanner::SourceScanner;
use crate::tags::{self, names, TagScope};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything one extraction run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub descriptors: Vec<GoalDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Doc-comment driven goal extractor
pub struct Extractor {
    config: ExtractConfig,
}

/// A field together with the compilation unit that declared it, so inherited
/// fields resolve types against their own imports
struct ScopedField<'a> {
    field: &'a FieldUnit,
    unit: &'a SourceUnit,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline over the configured source roots
    pub fn run(&self) -> Result<ExtractionOutcome, ExtractError> {
        let start = Instant::now();
        let sources = SourceScanner::new(&self.config).scan()?;

        let mut units = Vec::new();
        let mut diagnostics = Vec::new();
        for source in &sources {
            match parser::parse_source(&source.path, &source.text) {
                Ok(unit) => units.push(unit),
                Err(err) => {
                    warn!(path = %err.path.display(), line = err.line, reason = err.reason.as_str(),
                        "Skipping structurally broken source file");
                    diagnostics.push(Diagnostic::MalformedSource {
                        path: err.path.display().to_string(),
                        line: err.line,
                        reason: err.reason,
                    });
                }
            }
        }

        let mut outcome = self.assemble(&units);
        let mut all_diagnostics = diagnostics;
        all_diagnostics.append(&mut outcome.diagnostics);
        outcome.diagnostics = all_diagnostics;

        info!(
            descriptors = outcome.descriptors.len(),
            diagnostics = outcome.diagnostics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extraction completed"
        );
        Ok(outcome)
    }

    /// Assemble descriptors from parsed units, in declaration order
    fn assemble(&self, units: &[SourceUnit]) -> ExtractionOutcome {
        let in_scope: BTreeSet<String> = units
            .iter()
            .flat_map(|unit| unit.classes.iter())
            .map(|class| class.qualified_name.clone())
            .collect();

        // Qualified name -> (unit index, class index), first declaration wins
        let mut class_index: HashMap<&str, (usize, usize)> = HashMap::new();
        for (u, unit) in units.iter().enumerate() {
            for (c, class) in unit.classes.iter().enumerate() {
                class_index
                    .entry(class.qualified_name.as_str())
                    .or_insert((u, c));
            }
        }

        let mut outcome = ExtractionOutcome::default();
        let mut goals_seen: HashMap<String, String> = HashMap::new();

        for unit in units {
            for class in &unit.classes {
                let chain = self.supertype_chain(unit, class, &class_index, units, &in_scope);
                let effective_tags = effective_tags(&chain);

                if !effective_tags.contains(names::GOAL) {
                    debug!(class = class.qualified_name.as_str(), "No goal tag, skipping");
                    continue;
                }

                let goal = effective_tags
                    .first(names::GOAL)
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                if goal.is_empty() {
                    outcome.diagnostics.push(Diagnostic::MalformedTag {
                        class: class.qualified_name.clone(),
                        tag: names::GOAL.to_string(),
                        reason: "empty value".to_string(),
                    });
                    continue;
                }

                if let Some(previous) = goals_seen.get(&goal) {
                    outcome.diagnostics.push(Diagnostic::DuplicateGoal {
                        goal: goal.clone(),
                        class: class.qualified_name.clone(),
                        previous: previous.clone(),
                    });
                    continue;
                }

                let fields = effective_fields(&chain);
                let descriptor =
                    self.build_descriptor(goal.clone(), class, &effective_tags, &fields, &in_scope);
                goals_seen.insert(goal, class.qualified_name.clone());
                outcome.descriptors.push(descriptor);
            }
        }

        outcome
    }

    /// Walk from the class up through its in-scope supertypes
    ///
    /// The chain starts at the class itself. Resolution uses the declaring
    /// unit's imports; a supertype outside the extraction scope simply ends
    /// the chain. A cycle guard keeps pathological inputs from looping.
    fn supertype_chain<'a>(
        &self,
        unit: &'a SourceUnit,
        class: &'a ClassUnit,
        class_index: &HashMap<&str, (usize, usize)>,
        units: &'a [SourceUnit],
        in_scope: &BTreeSet<String>,
    ) -> Vec<(&'a SourceUnit, &'a ClassUnit)> {
        let mut chain = vec![(unit, class)];
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(class.qualified_name.as_str());

        let mut current_unit = unit;
        let mut current = class;
        while let Some(raw_super) = current.superclass.as_deref() {
            let scope = TypeScope {
                package: &current_unit.package,
                imports: &current_unit.imports,
                in_scope,
            };
            let qualified = canonical_type_name(raw_super, &scope);
            let Some(&(u, c)) = class_index.get(qualified.as_str()) else {
                break;
            };
            let parent_unit = &units[u];
            let parent = &parent_unit.classes[c];
            if !visited.insert(parent.qualified_name.as_str()) {
                warn!(
                    class = class.qualified_name.as_str(),
                    "Supertype cycle detected, truncating inheritance chain"
                );
                break;
            }
            chain.push((parent_unit, parent));
            current_unit = parent_unit;
            current = parent;
        }
        chain
    }

    fn build_descriptor(
        &self,
        goal: String,
        class: &ClassUnit,
        effective: &TagTable,
        fields: &[ScopedField<'_>],
        in_scope: &BTreeSet<String>,
    ) -> GoalDescriptor {
        let mut parameters: Vec<ParameterDescriptor> = Vec::new();
        for scoped in fields {
            let Some(parameter) = self.build_parameter(scoped, in_scope) else {
                continue;
            };
            if parameters.iter().any(|p| p.name == parameter.name) {
                warn!(
                    class = class.qualified_name.as_str(),
                    parameter = parameter.name.as_str(),
                    "Duplicate parameter name, keeping the first"
                );
                continue;
            }
            parameters.push(parameter);
        }

        let executions = effective
            .all(names::EXECUTE)
            .iter()
            .map(|value| {
                let (_, attrs) = tags::parse_attributes(value);
                ExecutionSpec {
                    phase: attrs.get("phase").cloned(),
                    goal: attrs.get("goal").cloned(),
                    lifecycle: attrs.get("lifecycle").cloned(),
                }
            })
            .collect();

        GoalDescriptor {
            goal,
            implementation: class.qualified_name.clone(),
            description: class.description.clone(),
            phase: text_tag(effective, names::PHASE),
            executions,
            thread_safe: class_flag(effective, names::THREAD_SAFE),
            requires_dependency_resolution: scoped_text_tag(
                effective,
                names::REQUIRES_DEPENDENCY_RESOLUTION,
            ),
            requires_dependency_collection: scoped_text_tag(
                effective,
                names::REQUIRES_DEPENDENCY_COLLECTION,
            ),
            aggregator: class_flag(effective, names::AGGREGATOR),
            requires_project: class_flag(effective, names::REQUIRES_PROJECT),
            requires_online: class_flag(effective, names::REQUIRES_ONLINE),
            requires_reports: class_flag(effective, names::REQUIRES_REPORTS),
            requires_direct_invocation: class_flag(effective, names::REQUIRES_DIRECT_INVOCATION),
            inherit_by_default: class_flag(effective, names::INHERIT_BY_DEFAULT),
            execution_strategy: defaulted_text_tag(effective, names::EXECUTION_STRATEGY),
            instantiation_strategy: defaulted_text_tag(effective, names::INSTANTIATION_STRATEGY),
            configurator: text_tag(effective, names::CONFIGURATOR),
            since: text_tag(effective, names::SINCE),
            deprecated: deprecated_tag(effective),
            plugin: PluginCoordinates {
                goal_prefix: self.config.goal_prefix.clone(),
                artifact_id: self.config.artifact_id.clone(),
            },
            parameters,
        }
    }

    /// Map one field to a parameter, or nothing if it carries no marker tag
    fn build_parameter(
        &self,
        scoped: &ScopedField<'_>,
        in_scope: &BTreeSet<String>,
    ) -> Option<ParameterDescriptor> {
        let field = scoped.field;
        let is_parameter = field.tags.contains(names::PARAMETER);
        let is_component = field.tags.contains(names::COMPONENT);
        if !is_parameter && !is_component {
            return None;
        }

        let scope = TypeScope {
            package: &scoped.unit.package,
            imports: &scoped.unit.imports,
            in_scope,
        };
        let resolved_type = canonical_type_name(&field.raw_type, &scope);

        if is_component {
            let (bare, attrs) = tags::parse_attributes(field.tags.first(names::COMPONENT)?);
            let role = attrs
                .get(names::ATTR_ROLE)
                .cloned()
                .or_else(|| (!bare.is_empty()).then(|| bare.clone()))
                .unwrap_or(resolved_type);
            return Some(ParameterDescriptor {
                name: field.name.clone(),
                type_name: role,
                expression: None,
                property: attrs.get(names::ATTR_ROLE_HINT).cloned(),
                default_value: None,
                required: true,
                editable: false,
                implementation: None,
                description: field.description.clone(),
                since: text_tag(&field.tags, names::SINCE),
                deprecated: deprecated_tag(&field.tags),
            });
        }

        let (bare, attrs) = tags::parse_attributes(field.tags.first(names::PARAMETER)?);
        let expression = attrs
            .get(names::ATTR_EXPRESSION)
            .cloned()
            .or_else(|| (!bare.is_empty()).then(|| bare.clone()));
        let property = attrs.get(names::ATTR_PROPERTY).cloned().or_else(|| {
            expression
                .as_deref()
                .and_then(tags::property_from_expression)
                .map(str::to_string)
        });

        Some(ParameterDescriptor {
            name: attrs
                .get(names::ATTR_ALIAS)
                .cloned()
                .unwrap_or_else(|| field.name.clone()),
            type_name: resolved_type,
            expression,
            property,
            default_value: attrs.get(names::ATTR_DEFAULT_VALUE).cloned(),
            required: field_flag(&field.tags, names::REQUIRED),
            editable: !field_flag(&field.tags, names::READONLY),
            implementation: attrs.get(names::ATTR_IMPLEMENTATION).cloned(),
            description: field.description.clone(),
            since: text_tag(&field.tags, names::SINCE),
            deprecated: deprecated_tag(&field.tags),
        })
    }
}

/// Own tags layered over the supertype chain's
fn effective_tags(chain: &[(&SourceUnit, &ClassUnit)]) -> TagTable {
    let mut effective = TagTable::new();
    for (_, class) in chain {
        effective = effective.merged_over(&class.tags);
    }
    effective
}

/// Inherited fields first, subtype declarations of the same name overriding
fn effective_fields<'a>(chain: &[(&'a SourceUnit, &'a ClassUnit)]) -> Vec<ScopedField<'a>> {
    let mut fields: Vec<ScopedField<'a>> = Vec::new();
    for &(unit, class) in chain.iter().rev() {
        for field in &class.fields {
            if let Some(existing) = fields.iter_mut().find(|f| f.field.name == field.name) {
                existing.field = field;
                existing.unit = unit;
            } else {
                fields.push(ScopedField { field, unit });
            }
        }
    }
    fields
}

fn class_flag(table: &TagTable, name: &str) -> bool {
    if table.contains(name) {
        tags::flag_value(Some(table.first(name).unwrap_or_default()))
    } else {
        default_flag(name, TagScope::Class)
    }
}

fn field_flag(table: &TagTable, name: &str) -> bool {
    if table.contains(name) {
        tags::flag_value(Some(table.first(name).unwrap_or_default()))
    } else {
        default_flag(name, TagScope::Field)
    }
}

fn default_flag(name: &str, scope: TagScope) -> bool {
    tags::spec_for(name, scope)
        .and_then(|spec| spec.default)
        .map(|default| default == "true")
        .unwrap_or(false)
}

/// Present-and-non-empty text tags only
fn text_tag(table: &TagTable, name: &str) -> Option<String> {
    table
        .first(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Text tag whose absence still yields the documented default
fn defaulted_text_tag(table: &TagTable, name: &str) -> String {
    text_tag(table, name).unwrap_or_else(|| {
        tags::spec_for(name, TagScope::Class)
            .and_then(|spec| spec.default)
            .unwrap_or_default()
            .to_string()
    })
}

/// Text tag that keeps its documented default when declared bare
///
/// `@requiresDependencyResolution` with no value means the `runtime` scope;
/// `@requiresDependencyCollection test` keeps its literal value.
fn scoped_text_tag(table: &TagTable, name: &str) -> Option<String> {
    if !table.contains(name) {
        return None;
    }
    let value = table.first(name).unwrap_or_default().trim();
    if value.is_empty() {
        tags::spec_for(name, TagScope::Class)
            .and_then(|spec| spec.default)
            .map(str::to_string)
            .or_else(|| Some(String::new()))
    } else {
        Some(value.to_string())
    }
}

/// Deprecated is meaningful even with an empty explanation
fn deprecated_tag(table: &TagTable) -> Option<String> {
    table
        .first(names::DEPRECATED)
        .map(|value| value.trim().to_string())
}
