//! Method-declaration inspections
//!
//! Each inspection is an ordered chain of short-circuiting guards over one
//! method declaration at a time: the first failing guard skips the method,
//! and a method that survives every guard is reported as a [`Diagnostic`].
//! Inspections hold no mutable state; a scan is a pure pass over the model.

mod design_for_extension;
mod method_may_be_static;
mod non_final_clone;

pub use design_for_extension::DesignForExtensionInspection;
pub use method_may_be_static::{MethodMayBeStaticInspection, MethodMayBeStaticOptions};
pub use non_final_clone::NonFinalCloneInspection;

use crate::exclusions::ExclusionRegistry;
use crate::model::{Location, MethodId, SourceModel};
use crate::refactor::MakeStaticFix;
use std::sync::Arc;

/// Inspection rules shipped with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MethodMayBeStatic,
    DesignForExtension,
    NonFinalClone,
}

impl Rule {
    pub fn code(&self) -> &'static str {
        match self {
            Rule::MethodMayBeStatic => "JG001",
            Rule::DesignForExtension => "JG002",
            Rule::NonFinalClone => "JG003",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rule::MethodMayBeStatic => "method may be static",
            Rule::DesignForExtension => "design for extension",
            Rule::NonFinalClone => "non-final clone()",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Rule::MethodMayBeStatic => Severity::Warning,
            Rule::DesignForExtension => Severity::Warning,
            Rule::NonFinalClone => Severity::Warning,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "JG001" => Some(Rule::MethodMayBeStatic),
            "JG002" => Some(Rule::DesignForExtension),
            "JG003" => Some(Rule::NonFinalClone),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Severity levels for reported diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flagged method declaration
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub method: MethodId,
    /// Display name of the flagged method
    pub name: String,
    pub location: Location,
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
    /// Offered quick-fix, when the rule has one
    pub fix: Option<MakeStaticFix>,
}

impl Diagnostic {
    pub fn new(model: &SourceModel, method: MethodId, rule: Rule, message: String) -> Option<Self> {
        let decl = model.method(method)?;
        Some(Self {
            method,
            name: decl.display_name().to_string(),
            location: decl.location.clone(),
            rule,
            severity: rule.default_severity(),
            message,
            fix: None,
        })
    }

    pub fn with_fix(mut self, fix: MakeStaticFix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// A predicate-plus-fix unit producing diagnostics over a source model
pub trait Inspection {
    fn rule(&self) -> Rule;

    /// Run the guard chain over every method in the model
    fn inspect(&self, model: &SourceModel) -> Vec<Diagnostic>;
}

/// All shipped inspections, in reporting order
pub fn default_inspections(
    options: MethodMayBeStaticOptions,
    exclusions: Arc<ExclusionRegistry>,
) -> Vec<Box<dyn Inspection>> {
    vec![
        Box::new(MethodMayBeStaticInspection::new(options, exclusions)),
        Box::new(DesignForExtensionInspection::new()),
        Box::new(NonFinalCloneInspection::new()),
    ]
}

/// Stable ordering for reports: file, then line
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.rule.code().cmp(b.rule.code()))
    });
}
