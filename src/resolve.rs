//! Semantic queries over a [`SourceModel`]
//!
//! Approximates what a full resolver would answer: supertype signature
//! search (does a method override, or get overridden?), member-access
//! classification for the "never touches instance state" check, and
//! test-framework method detection. Signatures are matched by simple name
//! and arity; references that cannot be resolved inside the parsed file
//! set are classified conservatively, so inspections skip rather than
//! produce false positives.

use crate::model::{ClassId, MethodId, Modifier, BodyRef, SourceModel};
use std::collections::HashSet;

/// `java.lang.Object` instance methods every class inherits
const OBJECT_METHODS: [(&str, usize); 5] = [
    ("toString", 0),
    ("hashCode", 0),
    ("equals", 1),
    ("clone", 0),
    ("finalize", 0),
];

const TEST_ANNOTATIONS: [&str; 11] = [
    "Test",
    "Before",
    "After",
    "BeforeEach",
    "AfterEach",
    "BeforeClass",
    "AfterClass",
    "BeforeAll",
    "AfterAll",
    "ParameterizedTest",
    "RepeatedTest",
];

/// How an unqualified member reference resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Static,
    Instance,
    Unknown,
}

/// Semantic index over one source model
pub struct ClassIndex<'a> {
    model: &'a SourceModel,
}

impl<'a> ClassIndex<'a> {
    pub fn new(model: &'a SourceModel) -> Self {
        Self { model }
    }

    fn resolve_name(&self, name: &str) -> Option<ClassId> {
        self.model.classes_named(name).first().copied()
    }

    /// Direct supertypes resolvable inside the model
    fn supertypes(&self, id: ClassId) -> Vec<ClassId> {
        let Some(class) = self.model.class(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some(sup) = class.superclass.as_deref() {
            if let Some(sid) = self.resolve_name(sup) {
                if sid != id {
                    out.push(sid);
                }
            }
        }
        for itf in &class.interfaces {
            if let Some(iid) = self.resolve_name(itf) {
                if iid != id {
                    out.push(iid);
                }
            }
        }
        out
    }

    fn supertype_closure(&self, id: ClassId) -> Vec<ClassId> {
        let mut seen = HashSet::new();
        let mut stack = self.supertypes(id);
        let mut out = Vec::new();
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur) {
                continue;
            }
            out.push(cur);
            stack.extend(self.supertypes(cur));
        }
        out
    }

    fn subtype_closure(&self, id: ClassId) -> Vec<ClassId> {
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        let mut out = Vec::new();
        while let Some(cur) = stack.pop() {
            for (cid, _) in self.model.classes() {
                if cid != cur && !seen.contains(&cid) && self.supertypes(cid).contains(&cur) {
                    seen.insert(cid);
                    out.push(cid);
                    stack.push(cid);
                }
            }
        }
        out
    }

    fn has_overridable_method(&self, class: ClassId, name: &str, arity: usize) -> bool {
        let Some(class) = self.model.class(class) else {
            return false;
        };
        class
            .methods
            .iter()
            .filter_map(|m| self.model.method(*m))
            .any(|m| {
                !m.is_constructor
                    && m.name.as_deref() == Some(name)
                    && m.arity() == arity
                    && !m.has(Modifier::Static)
                    && !m.has(Modifier::Private)
            })
    }

    /// Supertype signature search: does this method override anything?
    ///
    /// `@Override` always counts. Signatures matching a `java.lang.Object`
    /// instance method count regardless of declared supertypes, since
    /// every class inherits them.
    pub fn overrides_super(&self, id: MethodId) -> bool {
        let Some(method) = self.model.method(id) else {
            return false;
        };
        if method.is_constructor || method.has(Modifier::Static) {
            return false;
        }
        let Some(name) = method.name.as_deref() else {
            return false;
        };
        if method.has_annotation("Override") {
            return true;
        }
        if !method.has(Modifier::Private)
            && OBJECT_METHODS
                .iter()
                .any(|(n, a)| *n == name && *a == method.arity())
        {
            return true;
        }
        self.supertype_closure(method.class)
            .into_iter()
            .any(|sup| self.has_overridable_method(sup, name, method.arity()))
    }

    /// Subtype signature search: is this method overridden anywhere?
    pub fn overridden_by_sub(&self, id: MethodId) -> bool {
        let Some(method) = self.model.method(id) else {
            return false;
        };
        if method.is_constructor
            || method.has(Modifier::Static)
            || method.has(Modifier::Private)
            || method.has(Modifier::Final)
        {
            return false;
        }
        let Some(name) = method.name.as_deref() else {
            return false;
        };
        let Some(class) = self.model.class(method.class) else {
            return false;
        };
        if class.is_final() {
            return false;
        }
        self.subtype_closure(method.class)
            .into_iter()
            .any(|sub| self.has_overridable_method(sub, name, method.arity()))
    }

    /// Does the body stay clear of instance state? True only when every
    /// reference is a local, a static member, or a type name. `this`,
    /// `super`, instance members and unresolvable references all fail.
    pub fn is_statically_accessible(&self, id: MethodId) -> bool {
        let Some(method) = self.model.method(id) else {
            return false;
        };
        let Some(body) = &method.body else {
            return true;
        };
        for r in &body.refs {
            match r {
                BodyRef::This => return false,
                BodyRef::Name(name) => {
                    if body.locals.contains(name) {
                        continue;
                    }
                    match self.classify_field(method.class, name) {
                        Access::Static => {}
                        Access::Instance => return false,
                        Access::Unknown => {
                            if !self.is_type_name(name) {
                                return false;
                            }
                        }
                    }
                }
                BodyRef::Call(name) => match self.classify_method(method.class, name) {
                    Access::Static => {}
                    Access::Instance | Access::Unknown => return false,
                },
            }
        }
        true
    }

    /// Classes whose members are in scope for unqualified references:
    /// the owning class, its supertypes, and the enclosing chain with
    /// their supertypes.
    fn member_scope(&self, class: ClassId) -> Vec<ClassId> {
        let mut out = vec![class];
        out.extend(self.supertype_closure(class));
        let mut enclosing = self.model.class(class).and_then(|c| c.enclosing);
        while let Some(e) = enclosing {
            out.push(e);
            out.extend(self.supertype_closure(e));
            enclosing = self.model.class(e).and_then(|c| c.enclosing);
        }
        out
    }

    fn classify_field(&self, class: ClassId, name: &str) -> Access {
        for scope in self.member_scope(class) {
            let Some(c) = self.model.class(scope) else {
                continue;
            };
            if let Some(field) = c.fields.iter().find(|f| f.name == name) {
                return if field.is_static {
                    Access::Static
                } else {
                    Access::Instance
                };
            }
        }
        Access::Unknown
    }

    fn classify_method(&self, class: ClassId, name: &str) -> Access {
        let mut found_static = false;
        for scope in self.member_scope(class) {
            let Some(c) = self.model.class(scope) else {
                continue;
            };
            for m in c.methods.iter().filter_map(|m| self.model.method(*m)) {
                if m.is_constructor || m.name.as_deref() != Some(name) {
                    continue;
                }
                if m.has(Modifier::Static) {
                    found_static = true;
                } else {
                    return Access::Instance;
                }
            }
            if found_static {
                // Overloads in an outer scope cannot shadow a hit here
                return Access::Static;
            }
        }
        if found_static {
            Access::Static
        } else {
            Access::Unknown
        }
    }

    fn is_type_name(&self, name: &str) -> bool {
        if !self.model.classes_named(name).is_empty() {
            return true;
        }
        // Unresolved but capitalized: almost certainly a type reference
        name.chars().next().map_or(false, |c| c.is_uppercase())
    }

    /// JUnit 3/4/5 test and lifecycle methods
    pub fn is_test_method(&self, id: MethodId) -> bool {
        let Some(method) = self.model.method(id) else {
            return false;
        };
        if TEST_ANNOTATIONS.iter().any(|a| method.has_annotation(a)) {
            return true;
        }
        // JUnit 3: testXxx/setUp/tearDown in a TestCase subclass
        let Some(name) = method.name.as_deref() else {
            return false;
        };
        let junit3_name = name.starts_with("test") || name == "setUp" || name == "tearDown";
        junit3_name && self.extends_type_named(method.class, "TestCase")
    }

    /// Walks declared superclass names, including ones that do not
    /// resolve inside the model.
    fn extends_type_named(&self, class: ClassId, target: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(class);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            let Some(c) = self.model.class(id) else {
                break;
            };
            match c.superclass.as_deref() {
                Some(name) if name == target => return true,
                Some(name) => current = self.resolve_name(name),
                None => break,
            }
        }
        false
    }
}
