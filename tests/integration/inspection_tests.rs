//! End-to-end inspection runs over the Java fixture files.

use javagadget::config::Config;
use javagadget::exclusions::ExclusionRegistry;
use javagadget::inspections::{default_inspections, sort_diagnostics, Diagnostic, Rule};
use javagadget::parser::ModelBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/java")
        .join(name)
}

fn inspect(name: &str) -> Vec<Diagnostic> {
    let mut builder = ModelBuilder::new().expect("grammar loads");
    builder.process_file(&fixture(name)).expect("fixture parses");
    let model = builder.build();

    let config = Config::default();
    let exclusions = Arc::new(ExclusionRegistry::with_defaults());
    let mut diagnostics = Vec::new();
    for inspection in default_inspections(config.method_may_be_static_options(), exclusions) {
        diagnostics.extend(inspection.inspect(&model));
    }
    sort_diagnostics(&mut diagnostics);
    diagnostics
}

fn names_for(diagnostics: &[Diagnostic], rule: Rule) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.rule == rule)
        .map(|d| d.name.as_str())
        .collect()
}

#[test]
fn flags_methods_that_never_touch_the_instance() {
    let diagnostics = inspect("MayBeStatic.java");
    assert_eq!(
        names_for(&diagnostics, Rule::MethodMayBeStatic),
        vec!["add", "quadruple"]
    );
    // nothing else fires on this fixture
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn override_relationships_suppress_in_both_directions() {
    let diagnostics = inspect("Overrides.java");
    assert_eq!(
        names_for(&diagnostics, Rule::MethodMayBeStatic),
        vec!["greeting"]
    );
}

#[test]
fn test_methods_are_never_flagged() {
    let diagnostics = inspect("JunitTests.java");
    assert!(diagnostics.is_empty());
}

#[test]
fn empty_overridable_method_is_an_extension_trap() {
    let diagnostics = inspect("Extendable.java");
    assert_eq!(
        names_for(&diagnostics, Rule::DesignForExtension),
        vec!["onFinished"]
    );
    // final, private and non-empty methods survive
    assert!(names_for(&diagnostics, Rule::MethodMayBeStatic).is_empty());
}

#[test]
fn overridable_clone_flagged_final_class_spared() {
    let diagnostics = inspect("Copyable.java");
    let clones = names_for(&diagnostics, Rule::NonFinalClone);
    assert_eq!(clones, vec!["clone"]);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn clean_file_produces_no_findings() {
    let diagnostics = inspect("Clean.java");
    assert!(diagnostics.is_empty());
}

#[test]
fn may_be_static_findings_carry_a_fix() {
    let diagnostics = inspect("Fixable.java");
    let static_candidates: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.rule == Rule::MethodMayBeStatic)
        .collect();
    assert_eq!(static_candidates.len(), 2);
    for d in static_candidates {
        let fix = d.fix.as_ref().expect("fix offered");
        assert_eq!(fix.description(), format!("make '{}' static", d.name));
    }
}

#[test]
fn diagnostics_sort_by_file_then_line() {
    let mut builder = ModelBuilder::new().expect("grammar loads");
    builder
        .process_file(&fixture("Overrides.java"))
        .expect("fixture parses");
    builder
        .process_file(&fixture("MayBeStatic.java"))
        .expect("fixture parses");
    let model = builder.build();

    let exclusions = Arc::new(ExclusionRegistry::with_defaults());
    let mut diagnostics = Vec::new();
    for inspection in default_inspections(Default::default(), exclusions) {
        diagnostics.extend(inspection.inspect(&model));
    }
    sort_diagnostics(&mut diagnostics);

    let mut sorted = diagnostics.clone();
    sorted.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
    });
    let order: Vec<_> = diagnostics.iter().map(|d| d.name.as_str()).collect();
    let expected: Vec<_> = sorted.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(order, expected);
}
