mod compact;
mod json;
mod terminal;

pub use compact::CompactReporter;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::inspections::Diagnostic;
use miette::Result;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Default terminal output, grouped by file
    #[default]
    Terminal,
    /// One line per diagnostic
    Compact,
    /// JSON machine-readable format
    Json,
}

/// Options for report generation
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Output file path (JSON format)
    pub output_path: Option<PathBuf>,
    /// Base path stripped from file paths for shorter display
    pub base_path: Option<PathBuf>,
    /// Mention available quick-fixes in terminal output
    pub show_fix_hints: bool,
}

/// Reporter for inspection diagnostics
pub struct Reporter {
    format: ReportFormat,
    options: ReportOptions,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            options: ReportOptions {
                output_path,
                show_fix_hints: true,
                ..Default::default()
            },
        }
    }

    pub fn with_options(format: ReportFormat, options: ReportOptions) -> Self {
        Self { format, options }
    }

    pub fn report(&self, diagnostics: &[Diagnostic]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                let mut reporter = TerminalReporter::new().with_fix_hints(self.options.show_fix_hints);
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(diagnostics);
                Ok(())
            }
            ReportFormat::Compact => {
                let mut reporter = CompactReporter::new();
                if let Some(base) = &self.options.base_path {
                    reporter = reporter.with_base_path(base.clone());
                }
                reporter.report(diagnostics);
                Ok(())
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.options.output_path.clone());
                reporter.report(diagnostics)
            }
        }
    }
}

pub(crate) fn display_path(
    path: &std::path::Path,
    base: Option<&std::path::Path>,
) -> String {
    let shortened = base.and_then(|b| path.strip_prefix(b).ok()).unwrap_or(path);
    shortened.display().to_string()
}
