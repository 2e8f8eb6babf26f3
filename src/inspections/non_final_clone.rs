//! Non-Final clone() inspection
//!
//! Flags a `clone()` method that subclasses can override. An overridable
//! clone lets a malicious or careless subclass return an object that
//! violates the cloning contract; declaring the method (or the class)
//! `final` closes the hole.
//!
//! ```java
//! class Token implements Cloneable {
//!     public Object clone() { ... }   // flagged
//! }
//! final class Token2 implements Cloneable {
//!     public Object clone() { ... }   // fine
//! }
//! ```

use super::{Diagnostic, Inspection, Rule};
use crate::model::{MethodId, Modifier, SourceModel};

const CLONE: &str = "clone";

/// Inspection for overridable clone methods
pub struct NonFinalCloneInspection;

impl NonFinalCloneInspection {
    pub fn new() -> Self {
        Self
    }

    fn should_flag(&self, model: &SourceModel, id: MethodId) -> bool {
        let Some(method) = model.method(id) else {
            return false;
        };
        if method.name.as_deref() != Some(CLONE) {
            return false;
        }
        if method.arity() != 0 {
            return false;
        }
        if method.has(Modifier::Final) || method.has(Modifier::Abstract) {
            return false;
        }
        let Some(class) = model.class(method.class) else {
            return false;
        };
        !class.is_final() && !class.is_interface()
    }
}

impl Default for NonFinalCloneInspection {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspection for NonFinalCloneInspection {
    fn rule(&self) -> Rule {
        Rule::NonFinalClone
    }

    fn inspect(&self, model: &SourceModel) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (id, _) in model.methods() {
            if !self.should_flag(model, id) {
                continue;
            }
            let message =
                "'clone()' is overridable; declare the method or its class 'final'".to_string();
            if let Some(diagnostic) = Diagnostic::new(model, id, Rule::NonFinalClone, message) {
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use std::path::PathBuf;

    fn run(source: &str) -> usize {
        let mut parser = JavaParser::new().expect("grammar loads");
        let model = parser
            .parse_source(source, &PathBuf::from("Test.java"))
            .expect("parses");
        NonFinalCloneInspection::new().inspect(&model).len()
    }

    #[test]
    fn flags_overridable_clone() {
        assert_eq!(run("class C { void clone() {} }"), 1);
    }

    #[test]
    fn final_class_not_flagged() {
        assert_eq!(run("final class C { void clone() {} }"), 0);
    }

    #[test]
    fn final_or_abstract_method_not_flagged() {
        assert_eq!(run("class C { final void clone() {} }"), 0);
        assert_eq!(run("abstract class C { abstract Object clone(); }"), 0);
    }

    #[test]
    fn clone_with_parameters_not_flagged() {
        assert_eq!(run("class C { void clone(int depth) {} }"), 0);
        assert_eq!(run("class C { void clone(int a, int b) {} }"), 0);
    }

    #[test]
    fn interface_clone_not_flagged() {
        assert_eq!(run("interface I { Object clone(); }"), 0);
    }

    #[test]
    fn other_names_not_flagged() {
        assert_eq!(run("class C { void cloneAll() {} void copy() {} }"), 0);
    }

    #[test]
    fn enum_clone_not_flagged() {
        // enums cannot be extended
        assert_eq!(run("enum E { A; public Object clone() { return null; } }"), 0);
    }
}
