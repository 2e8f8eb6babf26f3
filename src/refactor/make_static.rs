use super::{FileEditor, FixError, TextEdit};
use crate::model::MethodDecl;
use std::path::{Path, PathBuf};

/// Quick-fix that adds the `static` modifier to a method declaration.
///
/// Captures everything it needs at scan time so it can run on its own
/// later. Before editing it re-verifies that the declaration header still
/// reads exactly as it did when the method was flagged; a mismatch is a
/// [`FixError::Stale`] the caller must surface.
#[derive(Debug, Clone)]
pub struct MakeStaticFix {
    path: PathBuf,
    method_name: String,
    header_start: usize,
    header: String,
    insert_byte: usize,
}

impl MakeStaticFix {
    pub fn new(method: &MethodDecl) -> Self {
        Self {
            path: method.location.file.clone(),
            method_name: method.display_name().to_string(),
            header_start: method.location.start_byte,
            header: method.header.clone(),
            insert_byte: method.modifier_insert_byte,
        }
    }

    pub fn description(&self) -> String {
        format!("make '{}' static", self.method_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset of the insertion. Callers applying several fixes to one
    /// file should go highest-offset first so earlier spans stay valid.
    pub fn insert_byte(&self) -> usize {
        self.insert_byte
    }

    pub fn edit(&self) -> TextEdit {
        TextEdit::insert_at(self.insert_byte, "static ")
    }

    /// Load, verify, edit, save.
    pub fn apply(&self) -> Result<(), FixError> {
        let mut editor = FileEditor::load(&self.path)?;
        self.apply_to(&mut editor)?;
        editor.save()
    }

    /// Verify and edit an already-loaded buffer. Does not save.
    pub fn apply_to(&self, editor: &mut FileEditor) -> Result<(), FixError> {
        let end = self.header_start + self.header.len();
        if editor.text().get(self.header_start..end) != Some(self.header.as_str()) {
            return Err(FixError::Stale {
                path: self.path.clone(),
                name: self.method_name.clone(),
            });
        }
        editor.apply(&self.edit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use std::path::PathBuf;

    fn fix_for(source: &str, name: &str) -> MakeStaticFix {
        let mut parser = JavaParser::new().expect("grammar loads");
        let model = parser
            .parse_source(source, &PathBuf::from("A.java"))
            .expect("parses");
        let method = model
            .methods()
            .map(|(_, m)| m)
            .find(|m| m.name.as_deref() == Some(name))
            .expect("method present");
        MakeStaticFix::new(method)
    }

    #[test]
    fn inserts_static_before_return_type() {
        let source = "class A { private int helper(int x) { return x + 1; } }";
        let fix = fix_for(source, "helper");
        let mut editor = FileEditor::from_string(&PathBuf::from("A.java"), source.to_string());
        fix.apply_to(&mut editor).unwrap();
        assert_eq!(
            editor.text(),
            "class A { private static int helper(int x) { return x + 1; } }"
        );
    }

    #[test]
    fn stale_buffer_is_rejected() {
        let source = "class A { private int helper() { return 1; } }";
        let fix = fix_for(source, "helper");
        let edited = source.replace("helper", "renamed");
        let mut editor = FileEditor::from_string(&PathBuf::from("A.java"), edited);
        let err = fix.apply_to(&mut editor).unwrap_err();
        assert!(matches!(err, FixError::Stale { .. }));
    }

    #[test]
    fn two_fixes_apply_highest_offset_first() {
        let source = "class A { void a() {} void b() {} }";
        let first = fix_for(source, "a");
        let second = fix_for(source, "b");
        let mut editor = FileEditor::from_string(&PathBuf::from("A.java"), source.to_string());
        // descending offset order keeps the earlier span untouched
        second.apply_to(&mut editor).unwrap();
        first.apply_to(&mut editor).unwrap();
        assert_eq!(editor.text(), "class A { static void a() {} static void b() {} }");
    }

    #[test]
    fn description_names_the_method() {
        let fix = fix_for("class A { void run() {} }", "run");
        assert_eq!(fix.description(), "make 'run' static");
    }
}
