//! The make-static quick-fix, applied to real files on disk.

use javagadget::exclusions::ExclusionRegistry;
use javagadget::inspections::{Inspection, MethodMayBeStaticInspection};
use javagadget::parser::ModelBuilder;
use javagadget::refactor::{FileEditor, FixError, MakeStaticFix};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/java")
        .join(name);
    let target = dir.join(name);
    fs::copy(&source, &target).expect("fixture copies");
    target
}

fn fixes_for(path: &Path) -> Vec<MakeStaticFix> {
    let mut builder = ModelBuilder::new().expect("grammar loads");
    builder.process_file(path).expect("fixture parses");
    let model = builder.build();

    let inspection = MethodMayBeStaticInspection::new(
        Default::default(),
        Arc::new(ExclusionRegistry::with_defaults()),
    );
    inspection
        .inspect(&model)
        .into_iter()
        .filter_map(|d| d.fix)
        .collect()
}

#[test]
fn single_fix_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = copy_fixture("Fixable.java", dir.path());

    let fixes = fixes_for(&path);
    let shout = fixes
        .iter()
        .find(|f| f.description().contains("shout"))
        .expect("shout fix offered");
    shout.apply().unwrap();

    let edited = fs::read_to_string(&path).unwrap();
    assert!(edited.contains("static String shout(String input)"));
    assert!(edited.contains("String whisper(String input)"));
    assert!(!edited.contains("static String whisper"));
}

#[test]
fn multiple_fixes_in_one_file_apply_highest_offset_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = copy_fixture("Fixable.java", dir.path());

    let mut fixes = fixes_for(&path);
    assert_eq!(fixes.len(), 2);
    fixes.sort_by(|a, b| b.insert_byte().cmp(&a.insert_byte()));

    let mut editor = FileEditor::load(&path).unwrap();
    for fix in &fixes {
        fix.apply_to(&mut editor).unwrap();
    }
    editor.save().unwrap();

    let edited = fs::read_to_string(&path).unwrap();
    assert!(edited.contains("static String shout(String input)"));
    assert!(edited.contains("static String whisper(String input)"));
}

#[test]
fn fixed_file_has_no_remaining_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let path = copy_fixture("Fixable.java", dir.path());

    let mut fixes = fixes_for(&path);
    fixes.sort_by(|a, b| b.insert_byte().cmp(&a.insert_byte()));
    let mut editor = FileEditor::load(&path).unwrap();
    for fix in &fixes {
        fix.apply_to(&mut editor).unwrap();
    }
    editor.save().unwrap();

    assert!(fixes_for(&path).is_empty());
}

#[test]
fn edited_file_rejects_stale_fix() {
    let dir = tempfile::tempdir().unwrap();
    let path = copy_fixture("Fixable.java", dir.path());

    let fixes = fixes_for(&path);
    // someone renames the method between scan and fix
    let contents = fs::read_to_string(&path).unwrap();
    fs::write(&path, contents.replace("shout", "yell")).unwrap();

    let shout = fixes
        .iter()
        .find(|f| f.description().contains("shout"))
        .expect("shout fix offered");
    let err = shout.apply().unwrap_err();
    assert!(matches!(err, FixError::Stale { .. }));
}
