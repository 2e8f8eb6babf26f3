use super::display_path;
use crate::inspections::Diagnostic;
use std::path::PathBuf;

/// One diagnostic per line, grep-friendly:
/// `path:line:column: severity [CODE] message`
pub struct CompactReporter {
    base_path: Option<PathBuf>,
}

impl CompactReporter {
    pub fn new() -> Self {
        Self { base_path: None }
    }

    pub fn with_base_path(mut self, base: PathBuf) -> Self {
        self.base_path = Some(base);
        self
    }

    pub fn report(&self, diagnostics: &[Diagnostic]) {
        for d in diagnostics {
            println!(
                "{}:{}:{}: {} [{}] {}",
                display_path(&d.location.file, self.base_path.as_deref()),
                d.location.line,
                d.location.column,
                d.severity,
                d.rule.code(),
                d.message
            );
        }
    }
}

impl Default for CompactReporter {
    fn default() -> Self {
        Self::new()
    }
}
