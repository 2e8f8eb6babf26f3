use crate::inspections::Diagnostic;
use miette::{IntoDiagnostic, Result};
use serde_json::json;
use std::path::PathBuf;

/// Machine-readable output, to stdout or a file
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, diagnostics: &[Diagnostic]) -> Result<()> {
        let payload = json!({
            "version": env!("CARGO_PKG_VERSION"),
            "findings": diagnostics.iter().map(|d| {
                json!({
                    "rule": d.rule.code(),
                    "rule_name": d.rule.display_name(),
                    "severity": d.severity.as_str(),
                    "method": d.name,
                    "message": d.message,
                    "file": d.location.file,
                    "line": d.location.line,
                    "column": d.location.column,
                    "fix": d.fix.as_ref().map(|f| f.description()),
                })
            }).collect::<Vec<_>>(),
        });

        let rendered = serde_json::to_string_pretty(&payload).into_diagnostic()?;
        match &self.output_path {
            Some(path) => std::fs::write(path, rendered).into_diagnostic()?,
            None => println!("{rendered}"),
        }
        Ok(())
    }
}
