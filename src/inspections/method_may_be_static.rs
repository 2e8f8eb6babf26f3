//! Method May Be Static inspection
//!
//! Flags an instance method that never needs its instance: no `this`, no
//! instance fields, no instance calls, no override relationship. The
//! offered quick-fix adds the `static` modifier.
//!
//! ## Detected
//!
//! ```java
//! class StringUtils {
//!     private String pad(String s, int width) {   // never touches fields
//!         return " ".repeat(width - s.length()) + s;
//!     }
//! }
//! ```
//!
//! ## Not Detected
//!
//! - methods reading or writing instance state, directly or via calls
//! - methods participating in overriding, in either direction
//! - methods of inner (non-static nested) classes, which capture the
//!   enclosing instance implicitly
//! - test-framework lifecycle and test methods
//! - `default` interface methods

use super::{Diagnostic, Inspection, Rule};
use crate::exclusions::ExclusionRegistry;
use crate::model::{MethodId, Modifier, SourceModel};
use crate::refactor::MakeStaticFix;
use crate::resolve::ClassIndex;
use std::sync::Arc;

/// Configuration toggles for [`MethodMayBeStaticInspection`]
#[derive(Debug, Clone, Copy)]
pub struct MethodMayBeStaticOptions {
    /// Skip methods whose body has no statements
    pub ignore_empty_methods: bool,
    /// Only report private or final methods (never part of a type contract)
    pub only_private_or_final: bool,
}

impl Default for MethodMayBeStaticOptions {
    fn default() -> Self {
        Self {
            ignore_empty_methods: true,
            only_private_or_final: false,
        }
    }
}

/// Inspection for instance methods that could be static
pub struct MethodMayBeStaticInspection {
    options: MethodMayBeStaticOptions,
    exclusions: Arc<ExclusionRegistry>,
}

impl MethodMayBeStaticInspection {
    pub fn new(options: MethodMayBeStaticOptions, exclusions: Arc<ExclusionRegistry>) -> Self {
        Self {
            options,
            exclusions,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            MethodMayBeStaticOptions::default(),
            Arc::new(ExclusionRegistry::with_defaults()),
        )
    }

    /// The guard chain. First failing guard skips the method.
    fn should_flag(&self, model: &SourceModel, index: &ClassIndex, id: MethodId) -> bool {
        let Some(method) = model.method(id) else {
            return false;
        };
        // `default` methods stay instance methods; `default static` is illegal
        if method.has(Modifier::Static)
            || method.has(Modifier::Abstract)
            || method.has(Modifier::Synchronized)
            || method.has(Modifier::Default)
        {
            return false;
        }
        if method.is_constructor || method.name.is_none() {
            return false;
        }
        if self.options.ignore_empty_methods && method.has_empty_body() {
            return false;
        }
        let Some(class) = model.class(method.class) else {
            return false;
        };
        if self.exclusions.is_exempt(method, model) {
            return false;
        }
        // Inner and local classes capture the enclosing instance; their
        // methods cannot become static.
        if !class.is_top_level() && !class.is_static_nested() {
            return false;
        }
        if self.options.only_private_or_final
            && !method.has(Modifier::Private)
            && !method.has(Modifier::Final)
        {
            return false;
        }
        if index.is_test_method(id) {
            return false;
        }
        if index.overrides_super(id) || index.overridden_by_sub(id) {
            return false;
        }
        index.is_statically_accessible(id)
    }
}

impl Inspection for MethodMayBeStaticInspection {
    fn rule(&self) -> Rule {
        Rule::MethodMayBeStatic
    }

    fn inspect(&self, model: &SourceModel) -> Vec<Diagnostic> {
        let index = ClassIndex::new(model);
        let mut diagnostics = Vec::new();
        for (id, method) in model.methods() {
            if !self.should_flag(model, &index, id) {
                continue;
            }
            let message = format!(
                "method '{}' may be declared 'static'",
                method.display_name()
            );
            if let Some(diagnostic) = Diagnostic::new(model, id, Rule::MethodMayBeStatic, message)
            {
                diagnostics.push(diagnostic.with_fix(MakeStaticFix::new(method)));
            }
        }
        diagnostics
    }
}
