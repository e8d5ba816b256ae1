//! End-to-end extraction over the checked-in fixture source trees.
//!
//! Each fixture directory under `tests/fixtures/` is one self-contained
//! source root. The scenarios cover the classic doc-tag conventions, the
//! annotation-style sources this extractor deliberately ignores, and the
//! determinism of repeated runs.

use mojoscan::{Diagnostic, ExtractConfig, ExtractionOutcome, Extractor};
use std::path::PathBuf;

fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn extract(name: &str) -> ExtractionOutcome {
    let config = ExtractConfig::with_roots(vec![fixture_root(name)])
        .with_goal_prefix("test")
        .with_artifact_id("maven-unit-plugin");
    Extractor::new(config).run().unwrap()
}

#[test]
fn test_two_goals_in_one_tree() {
    let outcome = extract("two-goals");
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.descriptors.len(), 2);

    // Files walk in sorted order, so FirstMojo comes before SecondMojo
    assert_eq!(outcome.descriptors[0].goal, "first");
    assert_eq!(outcome.descriptors[1].goal, "second");

    for descriptor in &outcome.descriptors {
        assert_eq!(descriptor.parameters.len(), 1);
        let parameter = descriptor.parameter("project").unwrap();
        assert_eq!(parameter.type_name, "java.lang.String[]");
        assert!(parameter.required);
        assert!(!parameter.editable);
        assert_eq!(
            parameter.expression.as_deref(),
            Some("${project.compileSourceRoots}")
        );
    }

    assert_eq!(outcome.descriptors[0].phase.as_deref(), Some("process-sources"));
    assert_eq!(outcome.descriptors[1].phase, None);
}

#[test]
fn test_implementation_attribute_passed_through_verbatim() {
    let outcome = extract("override");
    assert_eq!(outcome.descriptors.len(), 1);

    let parameter = outcome.descriptors[0].parameter("myBla").unwrap();
    assert_eq!(parameter.implementation.as_deref(), Some("source2.sub.MyBla"));
    assert!(parameter.required);
}

#[test]
fn test_class_level_tags_on_override_fixture() {
    let outcome = extract("override");
    let descriptor = &outcome.descriptors[0];

    assert_eq!(descriptor.goal, "my");
    assert_eq!(descriptor.implementation, "source2.MyMojo");
    assert!(descriptor.thread_safe);
    assert_eq!(
        descriptor.requires_dependency_collection.as_deref(),
        Some("test")
    );
    assert_eq!(descriptor.requires_dependency_resolution, None);
}

#[test]
fn test_annotation_only_sources_yield_nothing() {
    let outcome = extract("annotations-only");
    assert!(outcome.descriptors.is_empty());
    assert!(outcome.diagnostics.is_empty());

    // Re-running over the same tree stays empty
    let again = extract("annotations-only");
    assert!(again.descriptors.is_empty());
}

#[test]
fn test_generic_declarations_parse() {
    let outcome = extract("generics");
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.descriptors.len(), 1);

    let descriptor = &outcome.descriptors[0];
    assert_eq!(descriptor.goal, "generify");
    assert_eq!(descriptor.parameters.len(), 1);

    // Generic arguments erase down to the raw imported type
    let parameter = descriptor.parameter("buckets").unwrap();
    assert_eq!(parameter.type_name, "java.util.Map");
}

#[test]
fn test_inherited_fields_and_subtype_override() {
    let outcome = extract("inheritance");
    assert_eq!(outcome.descriptors.len(), 1);

    let descriptor = &outcome.descriptors[0];
    assert_eq!(descriptor.goal, "scan");
    assert!(descriptor.requires_project);
    assert_eq!(descriptor.parameters.len(), 2);

    // The subtype redeclares directory, dropping @required and changing
    // the default value
    let directory = descriptor.parameter("directory").unwrap();
    assert_eq!(directory.default_value.as_deref(), Some("target"));
    assert!(!directory.required);

    let skip = descriptor.parameter("skip").unwrap();
    assert_eq!(skip.type_name, "boolean");
    assert_eq!(skip.default_value.as_deref(), Some("false"));
}

#[test]
fn test_repeated_runs_serialize_identically() {
    let first = serde_json::to_string(&extract("two-goals")).unwrap();
    let second = serde_json::to_string(&extract("two-goals")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_diagnostics_do_not_abort_mixed_roots() {
    let config = ExtractConfig::with_roots(vec![
        fixture_root("two-goals"),
        fixture_root("annotations-only"),
    ]);
    let outcome = Extractor::new(config).run().unwrap();
    assert_eq!(outcome.descriptors.len(), 2);
    assert!(!outcome
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::MalformedSource { .. })));
}
