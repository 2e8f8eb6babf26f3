use super::display_path;
use crate::inspections::{Diagnostic, Severity};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default human-readable output, grouped by file
pub struct TerminalReporter {
    base_path: Option<PathBuf>,
    fix_hints: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            base_path: None,
            fix_hints: true,
        }
    }

    pub fn with_base_path(mut self, base: PathBuf) -> Self {
        self.base_path = Some(base);
        self
    }

    pub fn with_fix_hints(mut self, show: bool) -> Self {
        self.fix_hints = show;
        self
    }

    pub fn report(&self, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            println!("{}", "✓ No inspection findings".green());
            return;
        }

        let mut by_file: BTreeMap<String, Vec<&Diagnostic>> = BTreeMap::new();
        for d in diagnostics {
            let key = display_path(&d.location.file, self.base_path.as_deref());
            by_file.entry(key).or_default().push(d);
        }

        for (file, items) in &by_file {
            println!();
            println!("{}", file.bold().underline());
            for d in items {
                let marker = match d.severity {
                    Severity::Error => "✖".red(),
                    Severity::Warning => "⚠".yellow(),
                    Severity::Info => "ℹ".cyan(),
                };
                let mut line = format!(
                    "  {} {}:{} [{}] {}",
                    marker,
                    d.location.line,
                    d.location.column,
                    d.rule.code().dimmed(),
                    d.message
                );
                if self.fix_hints {
                    if let Some(fix) = &d.fix {
                        line.push_str(&format!("  ({})", fix.description()).dimmed().to_string());
                    }
                }
                println!("{line}");
            }
        }

        println!();
        let warnings = diagnostics
            .iter()
            .filter(|d| d.severity >= Severity::Warning)
            .count();
        println!(
            "{}",
            format!(
                "{} finding(s) in {} file(s), {} warning(s)",
                diagnostics.len(),
                by_file.len(),
                warnings
            )
            .yellow()
        );
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
