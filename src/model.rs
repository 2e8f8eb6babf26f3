//! Read-only source model built from parsed Java files.
//!
//! The model is an immutable snapshot: inspections borrow declarations,
//! they never create or mutate them. Each [`MethodDecl`] carries enough
//! of its declaration site (byte spans, header text) for quick-fixes to
//! operate on the original file independently of the scanning pass.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;

/// Index of a class in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub usize);

/// Index of a method in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub usize);

/// Source location of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based line of the declaration name
    pub line: usize,
    /// 1-based column of the declaration name
    pub column: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Location {
    pub fn new(
        file: PathBuf,
        line: usize,
        column: usize,
        start_byte: usize,
        end_byte: usize,
    ) -> Self {
        Self {
            file,
            line,
            column,
            start_byte,
            end_byte,
        }
    }
}

/// Java declaration modifiers relevant to the inspections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Synchronized,
    Native,
    Strictfp,
    /// `default` on interface methods
    Default,
}

impl Modifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Modifier::Public),
            "protected" => Some(Modifier::Protected),
            "private" => Some(Modifier::Private),
            "static" => Some(Modifier::Static),
            "final" => Some(Modifier::Final),
            "abstract" => Some(Modifier::Abstract),
            "synchronized" => Some(Modifier::Synchronized),
            "native" => Some(Modifier::Native),
            "strictfp" => Some(Modifier::Strictfp),
            "default" => Some(Modifier::Default),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        }
    }
}

/// Set of modifiers on a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet {
    mods: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: Modifier) {
        if !self.mods.contains(&modifier) {
            self.mods.push(modifier);
        }
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.mods.contains(&modifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.mods.iter().copied()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::new();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

/// Kind of type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// Where a type is declared relative to its file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Declared directly in a file
    TopLevel,
    /// Member of another type
    Nested,
    /// Declared inside a method body
    Local,
    /// Anonymous class from `new T() { ... }`
    Anonymous,
}

/// A field of a class, as far as the inspections need to know it
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub is_static: bool,
}

/// Snapshot of a type declaration
#[derive(Debug, Clone)]
pub struct ClassDecl {
    /// `None` for anonymous classes
    pub name: Option<String>,
    pub modifiers: ModifierSet,
    pub kind: TypeKind,
    pub nesting: Nesting,
    pub enclosing: Option<ClassId>,
    /// Simple name of the extended class, if any
    pub superclass: Option<String>,
    /// Simple names of implemented (or extended, for interfaces) interfaces
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodId>,
    pub location: Location,
}

impl ClassDecl {
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.has(Modifier::Final)
    }

    pub fn is_anonymous(&self) -> bool {
        self.nesting == Nesting::Anonymous
    }

    pub fn is_top_level(&self) -> bool {
        self.nesting == Nesting::TopLevel
    }

    /// A member type declared `static` (explicitly or implicitly)
    pub fn is_static_nested(&self) -> bool {
        self.nesting == Nesting::Nested && self.modifiers.has(Modifier::Static)
    }
}

/// A reference found inside a method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRef {
    /// `this` or `super`
    This,
    /// Unqualified value reference, including the base of a qualified chain
    Name(String),
    /// Unqualified method call
    Call(String),
}

/// Body of a concrete method
#[derive(Debug, Clone, Default)]
pub struct Body {
    /// Number of top-level statements (comments excluded)
    pub statements: usize,
    /// References collected from the whole body subtree
    pub refs: Vec<BodyRef>,
    /// Names declared anywhere in the body (locals, parameters of nested
    /// lambdas, catch/resource bindings). Flow-insensitive.
    pub locals: HashSet<String>,
}

/// Snapshot of a method or constructor declaration
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// `None` when the parse could not recover an identifier
    pub name: Option<String>,
    pub is_constructor: bool,
    pub modifiers: ModifierSet,
    /// Simple annotation names, e.g. `Override`, `Test`
    pub annotations: Vec<String>,
    /// Declared parameter names (position matters only for arity)
    pub parameters: Vec<Option<String>>,
    /// `None` for abstract and native methods
    pub body: Option<Body>,
    pub class: ClassId,
    pub location: Location,
    /// Byte offset where a `static ` modifier can be inserted
    pub modifier_insert_byte: usize,
    /// Declaration text from `location.start_byte` up to the body (or the
    /// whole declaration when there is none). Used to detect staleness
    /// before a quick-fix touches the file.
    pub header: String,
}

impl MethodDecl {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.has(modifier)
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations.iter().any(|a| a == simple_name)
    }

    /// Absent body counts as empty, matching "nothing to lose an instance
    /// context over".
    pub fn has_empty_body(&self) -> bool {
        self.body.as_ref().map_or(true, |b| b.statements == 0)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// All classes and methods extracted from a set of files
#[derive(Debug, Default)]
pub struct SourceModel {
    classes: Vec<ClassDecl>,
    methods: Vec<MethodDecl>,
    files: Vec<PathBuf>,
    by_name: HashMap<String, Vec<ClassId>>,
}

impl SourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: PathBuf) {
        self.files.push(path);
    }

    pub fn add_class(&mut self, class: ClassDecl) -> ClassId {
        let id = ClassId(self.classes.len());
        if let Some(name) = &class.name {
            self.by_name.entry(name.clone()).or_default().push(id);
        }
        self.classes.push(class);
        id
    }

    pub fn add_method(&mut self, method: MethodDecl) -> MethodId {
        let id = MethodId(self.methods.len());
        let class = method.class;
        self.methods.push(method);
        if let Some(class) = self.classes.get_mut(class.0) {
            class.methods.push(id);
        }
        id
    }

    pub fn add_field(&mut self, id: ClassId, field: FieldDecl) {
        if let Some(class) = self.classes.get_mut(id.0) {
            class.fields.push(field);
        }
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDecl> {
        self.classes.get(id.0)
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodDecl> {
        self.methods.get(id.0)
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDecl)> {
        self.classes.iter().enumerate().map(|(i, c)| (ClassId(i), c))
    }

    pub fn methods(&self) -> impl Iterator<Item = (MethodId, &MethodDecl)> {
        self.methods.iter().enumerate().map(|(i, m)| (MethodId(i), m))
    }

    pub fn classes_named<'a>(&'a self, name: &str) -> &'a [ClassId] {
        self.by_name.get(name).map_or(&[], |ids| ids.as_slice())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Merge another model into this one, remapping its ids.
    pub fn merge(&mut self, other: SourceModel) {
        let class_offset = self.classes.len();
        let method_offset = self.methods.len();

        for mut class in other.classes {
            if let Some(enclosing) = class.enclosing.as_mut() {
                *enclosing = ClassId(enclosing.0 + class_offset);
            }
            for m in class.methods.iter_mut() {
                *m = MethodId(m.0 + method_offset);
            }
            let id = ClassId(self.classes.len());
            if let Some(name) = &class.name {
                self.by_name.entry(name.clone()).or_default().push(id);
            }
            self.classes.push(class);
        }
        for mut method in other.methods {
            method.class = ClassId(method.class.0 + class_offset);
            self.methods.push(method);
        }
        self.files.extend(other.files);
    }
}
