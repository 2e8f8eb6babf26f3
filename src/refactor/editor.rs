use super::FixError;
use std::path::{Path, PathBuf};

/// A single insertion or replacement at a byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub offset: usize,
    pub delete: usize,
    pub insert: String,
}

impl TextEdit {
    pub fn insert_at(offset: usize, insert: impl Into<String>) -> Self {
        Self {
            offset,
            delete: 0,
            insert: insert.into(),
        }
    }
}

/// In-memory buffer for one file, accepting edits before a final save
pub struct FileEditor {
    path: PathBuf,
    contents: String,
}

impl FileEditor {
    pub fn load(path: &Path) -> Result<Self, FixError> {
        let contents = std::fs::read_to_string(path).map_err(|e| FixError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Buffer that never touches disk, for previews and tests
    pub fn from_string(path: &Path, contents: String) -> Self {
        Self {
            path: path.to_path_buf(),
            contents,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.contents
    }

    pub fn apply(&mut self, edit: &TextEdit) -> Result<(), FixError> {
        let end = edit.offset + edit.delete;
        if end > self.contents.len()
            || !self.contents.is_char_boundary(edit.offset)
            || !self.contents.is_char_boundary(end)
        {
            return Err(FixError::OutOfBounds {
                path: self.path.clone(),
                offset: edit.offset,
            });
        }
        self.contents.replace_range(edit.offset..end, &edit.insert);
        Ok(())
    }

    pub fn save(&self) -> Result<(), FixError> {
        std::fs::write(&self.path, &self.contents).map_err(|e| FixError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn insert_edit_applies() {
        let mut editor =
            FileEditor::from_string(&PathBuf::from("A.java"), "void m() {}".to_string());
        editor.apply(&TextEdit::insert_at(0, "static ")).unwrap();
        assert_eq!(editor.text(), "static void m() {}");
    }

    #[test]
    fn replacement_edit_applies() {
        let mut editor = FileEditor::from_string(&PathBuf::from("A.java"), "abc".to_string());
        editor
            .apply(&TextEdit {
                offset: 1,
                delete: 1,
                insert: "XY".to_string(),
            })
            .unwrap();
        assert_eq!(editor.text(), "aXYc");
    }

    #[test]
    fn edit_ending_inside_a_multibyte_char_rejected() {
        // "é" occupies bytes 1..3; deleting one byte of it is not a valid range
        let mut editor = FileEditor::from_string(&PathBuf::from("A.java"), "aéb".to_string());
        let err = editor
            .apply(&TextEdit {
                offset: 1,
                delete: 1,
                insert: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, FixError::OutOfBounds { offset: 1, .. }));
        assert_eq!(editor.text(), "aéb");
    }

    #[test]
    fn out_of_bounds_edit_rejected() {
        let mut editor = FileEditor::from_string(&PathBuf::from("A.java"), "ab".to_string());
        let err = editor.apply(&TextEdit::insert_at(99, "x")).unwrap_err();
        assert!(matches!(err, FixError::OutOfBounds { offset: 99, .. }));
        assert_eq!(editor.text(), "ab");
    }
}
