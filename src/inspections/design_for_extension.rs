//! Design For Extension inspection
//!
//! Flags an overridable method with a trivially empty body in an
//! extensible class: an extension point in appearance only, which
//! silently swallows subclass overrides that forget to call super.
//!
//! ```java
//! abstract class Lifecycle {
//!     void onStart() {}   // flagged: overridable and does nothing
//! }
//! ```
//!
//! Making the method `final`, `abstract` or non-empty, or the class
//! `final`, all suppress the report. Anonymous classes cannot be
//! extended, so their methods are never flagged.

use super::{Diagnostic, Inspection, Rule};
use crate::model::{MethodId, Modifier, SourceModel};

/// Inspection for empty overridable methods
pub struct DesignForExtensionInspection;

impl DesignForExtensionInspection {
    pub fn new() -> Self {
        Self
    }

    fn should_flag(&self, model: &SourceModel, id: MethodId) -> bool {
        let Some(method) = model.method(id) else {
            return false;
        };
        if method.is_constructor {
            return false;
        }
        if method.has(Modifier::Private)
            || method.has(Modifier::Final)
            || method.has(Modifier::Abstract)
            || method.has(Modifier::Static)
        {
            return false;
        }
        let Some(class) = model.class(method.class) else {
            return false;
        };
        if class.is_final() || class.name.is_none() {
            return false;
        }
        match &method.body {
            Some(body) => body.statements == 0,
            None => false,
        }
    }
}

impl Default for DesignForExtensionInspection {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspection for DesignForExtensionInspection {
    fn rule(&self) -> Rule {
        Rule::DesignForExtension
    }

    fn inspect(&self, model: &SourceModel) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (id, method) in model.methods() {
            if !self.should_flag(model, id) {
                continue;
            }
            let message = format!(
                "empty method '{}' is overridable; make it abstract, final or give it a body",
                method.display_name()
            );
            if let Some(diagnostic) = Diagnostic::new(model, id, Rule::DesignForExtension, message)
            {
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }
}
