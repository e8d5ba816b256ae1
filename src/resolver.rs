//! Best-effort type resolution
//!
//! Converts a field's raw declared type text into the canonical form the
//! descriptor output needs: fully qualified, generics erased, array dimensions
//! rendered as trailing `[]`. Resolution is a pure function over the
//! compilation unit's imports, its package, and the class names seen during
//! the current run. There is no classpath and no failure mode: a simple name
//! that cannot be resolved comes back unchanged.

use std::collections::BTreeSet;

/// Names resolvable without a classpath
pub struct TypeScope<'a> {
    /// Package of the compilation unit being resolved
    pub package: &'a str,
    /// The unit's import list (wildcards keep their trailing `*`)
    pub imports: &'a [String],
    /// Qualified names of every class parsed in this extraction run
    pub in_scope: &'a BTreeSet<String>,
}

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Types importable without an import statement
const JAVA_LANG: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Cloneable",
    "Comparable",
    "Double",
    "Error",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Math",
    "Number",
    "Object",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuffer",
    "StringBuilder",
    "System",
    "Thread",
    "Throwable",
    "Void",
];

/// Resolve raw declared-type text to its canonical name
pub fn canonical_type_name(raw: &str, scope: &TypeScope<'_>) -> String {
    let (base, dimensions) = strip_array_suffix(raw.trim());
    let erased = base.split('<').next().unwrap_or(base).trim();

    let resolved = resolve_base(erased, scope);

    let mut canonical = resolved;
    for _ in 0..dimensions {
        canonical.push_str("[]");
    }
    canonical
}

fn resolve_base(name: &str, scope: &TypeScope<'_>) -> String {
    if name.is_empty() || name.contains('.') || PRIMITIVES.contains(&name) {
        return name.to_string();
    }

    // An exact import wins over everything else
    let import_suffix = format!(".{}", name);
    for import in scope.imports {
        if import.ends_with(&import_suffix) {
            return import.clone();
        }
    }

    // Same-package classes seen during this run
    if !scope.package.is_empty() {
        let sibling = format!("{}.{}", scope.package, name);
        if scope.in_scope.contains(&sibling) {
            return sibling;
        }
    }

    // Wildcard imports expand only against classes seen during this run
    for import in scope.imports {
        if let Some(prefix) = import.strip_suffix(".*") {
            let candidate = format!("{}.{}", prefix, name);
            if scope.in_scope.contains(&candidate) {
                return candidate;
            }
        }
    }

    if JAVA_LANG.contains(&name) {
        return format!("java.lang.{}", name);
    }

    name.to_string()
}

/// Split trailing `[]` pairs off, tolerating interior whitespace
fn strip_array_suffix(raw: &str) -> (&str, usize) {
    let mut rest = raw.trim_end();
    let mut dimensions = 0;
    loop {
        let Some(without_close) = rest.strip_suffix(']') else {
            return (rest, dimensions);
        };
        let Some(without_open) = without_close.trim_end().strip_suffix('[') else {
            return (rest, dimensions);
        };
        rest = without_open.trim_end();
        dimensions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope<'a>(
        package: &'a str,
        imports: &'a [String],
        in_scope: &'a BTreeSet<String>,
    ) -> TypeScope<'a> {
        TypeScope {
            package,
            imports,
            in_scope,
        }
    }

    fn empty_scope() -> (Vec<String>, BTreeSet<String>) {
        (Vec::new(), BTreeSet::new())
    }

    #[test]
    fn test_string_array_is_java_lang() {
        let (imports, in_scope) = empty_scope();
        let scope = scope("org.example", &imports, &in_scope);
        assert_eq!(
            canonical_type_name("String[]", &scope),
            "java.lang.String[]"
        );
    }

    #[test]
    fn test_primitives_unchanged() {
        let (imports, in_scope) = empty_scope();
        let scope = scope("", &imports, &in_scope);
        assert_eq!(canonical_type_name("int", &scope), "int");
        assert_eq!(canonical_type_name("boolean[]", &scope), "boolean[]");
    }

    #[test]
    fn test_qualified_name_passes_through() {
        let (imports, in_scope) = empty_scope();
        let scope = scope("p", &imports, &in_scope);
        assert_eq!(
            canonical_type_name("java.io.File", &scope),
            "java.io.File"
        );
    }

    #[test]
    fn test_import_resolves_simple_name() {
        let imports = vec!["java.util.List".to_string()];
        let in_scope = BTreeSet::new();
        let scope = scope("p", &imports, &in_scope);
        assert_eq!(canonical_type_name("List", &scope), "java.util.List");
    }

    #[test]
    fn test_generics_erased_to_raw_type() {
        let imports = vec!["java.util.Map".to_string()];
        let in_scope = BTreeSet::new();
        let scope = scope("p", &imports, &in_scope);
        assert_eq!(
            canonical_type_name("Map<String, List<Integer>>", &scope),
            "java.util.Map"
        );
    }

    #[test]
    fn test_same_package_class_qualified() {
        let (imports, _) = empty_scope();
        let mut in_scope = BTreeSet::new();
        in_scope.insert("org.example.Helper".to_string());
        let scope = scope("org.example", &imports, &in_scope);
        assert_eq!(
            canonical_type_name("Helper", &scope),
            "org.example.Helper"
        );
    }

    #[test]
    fn test_wildcard_import_expands_against_scanned_classes() {
        let imports = vec!["other.pkg.*".to_string()];
        let mut in_scope = BTreeSet::new();
        in_scope.insert("other.pkg.Widget".to_string());
        let scope = scope("org.example", &imports, &in_scope);
        assert_eq!(canonical_type_name("Widget", &scope), "other.pkg.Widget");
    }

    #[test]
    fn test_unimported_foreign_package_class_left_alone() {
        // A class in another scanned package is not in scope without an import
        let (imports, _) = empty_scope();
        let mut in_scope = BTreeSet::new();
        in_scope.insert("other.pkg.Widget".to_string());
        let scope = scope("org.example", &imports, &in_scope);
        assert_eq!(canonical_type_name("Widget", &scope), "Widget");
    }

    #[test]
    fn test_unresolvable_simple_name_returned_as_is() {
        let (imports, in_scope) = empty_scope();
        let scope = scope("p", &imports, &in_scope);
        assert_eq!(canonical_type_name("Mystery", &scope), "Mystery");
    }

    #[test]
    fn test_multi_dimensional_array() {
        let (imports, in_scope) = empty_scope();
        let scope = scope("", &imports, &in_scope);
        assert_eq!(
            canonical_type_name("String [] []", &scope),
            "java.lang.String[][]"
        );
    }

    #[test]
    fn test_generic_array() {
        let imports = vec!["java.util.List".to_string()];
        let in_scope = BTreeSet::new();
        let scope = scope("p", &imports, &in_scope);
        assert_eq!(
            canonical_type_name("List<String>[]", &scope),
            "java.util.List[]"
        );
    }

    #[test]
    fn test_exact_import_beats_java_lang() {
        let imports = vec!["my.own.String".to_string()];
        let in_scope = BTreeSet::new();
        let scope = scope("p", &imports, &in_scope);
        assert_eq!(canonical_type_name("String", &scope), "my.own.String");
    }
}
