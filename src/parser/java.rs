//! Java source extraction
//!
//! Walks the tree-sitter parse tree once and produces the read-only
//! [`SourceModel`]: type declarations with their nesting and supertypes,
//! method declarations with modifier sets and parameter lists, and a
//! reference scan of each method body (used to decide whether a body ever
//! touches instance state).

use super::ParseError;
use crate::model::{
    Body, BodyRef, ClassDecl, ClassId, FieldDecl, Location, MethodDecl, Modifier, ModifierSet,
    Nesting, SourceModel, TypeKind,
};
use std::path::Path;
use tree_sitter::Node;

/// Parser for Java source files
pub struct JavaParser {
    parser: tree_sitter::Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(Self { parser })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<SourceModel, ParseError> {
        let source = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_source(&source, path)
    }

    /// Parse a single compilation unit into its own model.
    ///
    /// tree-sitter is error-tolerant; declarations inside ERROR nodes are
    /// extracted on a best-effort basis rather than failing the file.
    pub fn parse_source(&mut self, source: &str, file: &Path) -> Result<SourceModel, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree {
                path: file.to_path_buf(),
            })?;

        let mut extractor = Extractor {
            source,
            file,
            model: SourceModel::new(),
        };
        extractor.model.add_file(file.to_path_buf());
        let root = tree.root_node();
        for i in 0..root.named_child_count() {
            if let Some(child) = root.named_child(i) {
                extractor.walk(child, None, Ctx::File);
            }
        }
        Ok(extractor.model)
    }
}

/// Syntactic context a declaration was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ctx {
    File,
    ClassBody,
    Statement,
}

struct Extractor<'a> {
    source: &'a str,
    file: &'a Path,
    model: SourceModel,
}

const TYPE_DECL_KINDS: [&str; 5] = [
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

impl<'a> Extractor<'a> {
    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn walk(&mut self, node: Node, enclosing: Option<ClassId>, ctx: Ctx) {
        let kind = node.kind();
        if TYPE_DECL_KINDS.contains(&kind) {
            self.add_type(node, enclosing, ctx);
            return;
        }
        if kind == "object_creation_expression" {
            self.add_object_creation(node, enclosing);
            return;
        }
        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i) {
                self.walk(child, enclosing, ctx);
            }
        }
    }

    fn add_type(&mut self, node: Node, enclosing: Option<ClassId>, ctx: Ctx) {
        let kind = match node.kind() {
            "class_declaration" => TypeKind::Class,
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            "record_declaration" => TypeKind::Record,
            "annotation_type_declaration" => TypeKind::Annotation,
            _ => return,
        };
        let name_node = node.child_by_field_name("name");
        let name = name_node.map(|n| self.text(n).to_string());
        let (mut modifiers, _annotations) = self.modifiers_of(node);

        let nesting = match ctx {
            Ctx::File => Nesting::TopLevel,
            Ctx::ClassBody => Nesting::Nested,
            Ctx::Statement => Nesting::Local,
        };

        // Implicit modifiers: interface members and non-class member types
        // are static; enums and records cannot be extended.
        if nesting == Nesting::Nested {
            let enclosing_is_interface = enclosing
                .and_then(|id| self.model.class(id))
                .map_or(false, |c| c.is_interface());
            if enclosing_is_interface || kind != TypeKind::Class {
                modifiers.insert(Modifier::Static);
            }
        }
        if matches!(kind, TypeKind::Enum | TypeKind::Record) {
            modifiers.insert(Modifier::Final);
        }

        let superclass = node
            .child_by_field_name("superclass")
            .and_then(|sc| sc.named_child(0))
            .map(|t| simple_type_name(self.text(t)));
        let interfaces = self.supertype_interfaces(node);

        let id = self.model.add_class(ClassDecl {
            name,
            modifiers,
            kind,
            nesting,
            enclosing,
            superclass,
            interfaces,
            fields: Vec::new(),
            methods: Vec::new(),
            location: self.location_of(node, name_node),
        });

        if let Some(body) = node.child_by_field_name("body") {
            self.class_body(body, id);
        }
    }

    /// `extends`/`implements` clauses, as simple names
    fn supertype_interfaces(&self, node: Node) -> Vec<String> {
        let mut out = Vec::new();
        for i in 0..node.named_child_count() {
            let Some(clause) = node.named_child(i) else {
                continue;
            };
            if clause.kind() != "super_interfaces" && clause.kind() != "extends_interfaces" {
                continue;
            }
            for j in 0..clause.named_child_count() {
                let Some(list) = clause.named_child(j) else {
                    continue;
                };
                if list.kind() != "type_list" {
                    continue;
                }
                for k in 0..list.named_child_count() {
                    if let Some(ty) = list.named_child(k) {
                        out.push(simple_type_name(self.text(ty)));
                    }
                }
            }
        }
        out
    }

    fn class_body(&mut self, body: Node, class: ClassId) {
        for i in 0..body.named_child_count() {
            let Some(member) = body.named_child(i) else {
                continue;
            };
            match member.kind() {
                "method_declaration" | "constructor_declaration" => {
                    self.add_method(member, class);
                }
                "field_declaration" => {
                    self.add_fields(member, class);
                    // Field initializers can hold anonymous classes
                    self.walk_children(member, Some(class), Ctx::Statement);
                }
                "enum_constant" => {
                    if let Some(name) = member.child_by_field_name("name") {
                        let name = self.text(name).to_string();
                        self.model.add_field(
                            class,
                            FieldDecl {
                                name,
                                is_static: true,
                            },
                        );
                    }
                    // Constant bodies are anonymous subclasses of the enum
                    self.walk_children(member, Some(class), Ctx::Statement);
                }
                "enum_body_declarations" => self.class_body(member, class),
                kind if TYPE_DECL_KINDS.contains(&kind) => {
                    self.add_type(member, Some(class), Ctx::ClassBody);
                }
                _ => self.walk(member, Some(class), Ctx::Statement),
            }
        }
    }

    fn walk_children(&mut self, node: Node, enclosing: Option<ClassId>, ctx: Ctx) {
        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i) {
                self.walk(child, enclosing, ctx);
            }
        }
    }

    fn add_fields(&mut self, field_decl: Node, class: ClassId) {
        let (modifiers, _) = self.modifiers_of(field_decl);
        let is_static = modifiers.has(Modifier::Static);
        for i in 0..field_decl.named_child_count() {
            let Some(child) = field_decl.named_child(i) else {
                continue;
            };
            if child.kind() != "variable_declarator" {
                continue;
            }
            if let Some(name) = child.child_by_field_name("name") {
                self.model.add_field(
                    class,
                    FieldDecl {
                        name: self.text(name).to_string(),
                        is_static,
                    },
                );
            }
        }
    }

    fn add_method(&mut self, node: Node, class: ClassId) {
        let is_constructor = node.kind() == "constructor_declaration";
        let (mut modifiers, annotations) = self.modifiers_of(node);
        let name_node = node.child_by_field_name("name");
        let name = name_node.map(|n| self.text(n).to_string());
        let parameters = self.parameters_of(node);

        let body_node = node.child_by_field_name("body");
        let in_interface = self
            .model
            .class(class)
            .map_or(false, |c| c.is_interface());
        if in_interface
            && body_node.is_none()
            && !modifiers.has(Modifier::Static)
            && !modifiers.has(Modifier::Default)
            && !modifiers.has(Modifier::Private)
        {
            modifiers.insert(Modifier::Abstract);
        }

        let body = body_node.map(|b| self.scan_body(b, &parameters));

        // `static` must precede any type parameters and the return type
        let modifier_insert_byte = node
            .child_by_field_name("type_parameters")
            .or_else(|| node.child_by_field_name("type"))
            .or(name_node)
            .map_or(node.start_byte(), |n| n.start_byte());

        let header_end = body_node.map_or(node.end_byte(), |b| b.start_byte());
        let header = self.source[node.start_byte()..header_end].to_string();

        self.model.add_method(MethodDecl {
            name,
            is_constructor,
            modifiers,
            annotations,
            parameters,
            body,
            class,
            location: self.location_of(node, name_node),
            modifier_insert_byte,
            header,
        });

        // Local and anonymous classes declared inside the body
        if let Some(b) = body_node {
            self.walk_children(b, Some(class), Ctx::Statement);
        }
    }

    fn add_object_creation(&mut self, node: Node, enclosing: Option<ClassId>) {
        let mut anon_body = None;
        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i) {
                if child.kind() == "class_body" {
                    anon_body = Some(child);
                }
            }
        }
        let Some(body) = anon_body else {
            // Plain `new T(...)`: keep looking for nested creations in args
            self.walk_children(node, enclosing, Ctx::Statement);
            return;
        };

        let superclass = node
            .child_by_field_name("type")
            .map(|t| simple_type_name(self.text(t)));
        let id = self.model.add_class(ClassDecl {
            name: None,
            modifiers: ModifierSet::new(),
            kind: TypeKind::Class,
            nesting: Nesting::Anonymous,
            enclosing,
            superclass,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            location: self.location_of(node, None),
        });
        self.class_body(body, id);

        // Constructor arguments may themselves contain creations
        if let Some(args) = node.child_by_field_name("arguments") {
            self.walk_children(args, enclosing, Ctx::Statement);
        }
    }

    fn modifiers_of(&self, node: Node) -> (ModifierSet, Vec<String>) {
        let mut modifiers = ModifierSet::new();
        let mut annotations = Vec::new();
        for i in 0..node.named_child_count() {
            let Some(child) = node.named_child(i) else {
                continue;
            };
            if child.kind() != "modifiers" {
                continue;
            }
            let mut cursor = child.walk();
            if cursor.goto_first_child() {
                loop {
                    let m = cursor.node();
                    match m.kind() {
                        "marker_annotation" | "annotation" => {
                            if let Some(name) = m.child_by_field_name("name") {
                                annotations.push(simple_type_name(self.text(name)));
                            }
                        }
                        kind => {
                            if let Some(modifier) = Modifier::from_keyword(kind) {
                                modifiers.insert(modifier);
                            }
                        }
                    }
                    if !cursor.goto_next_sibling() {
                        break;
                    }
                }
            }
        }
        (modifiers, annotations)
    }

    fn parameters_of(&self, node: Node) -> Vec<Option<String>> {
        let mut params = Vec::new();
        let Some(list) = node.child_by_field_name("parameters") else {
            return params;
        };
        for i in 0..list.named_child_count() {
            let Some(param) = list.named_child(i) else {
                continue;
            };
            match param.kind() {
                "formal_parameter" => {
                    params.push(
                        param
                            .child_by_field_name("name")
                            .map(|n| self.text(n).to_string()),
                    );
                }
                "spread_parameter" => {
                    let mut name = None;
                    for j in 0..param.named_child_count() {
                        if let Some(d) = param.named_child(j) {
                            if d.kind() == "variable_declarator" {
                                name = d
                                    .child_by_field_name("name")
                                    .map(|n| self.text(n).to_string());
                            }
                        }
                    }
                    params.push(name);
                }
                // receiver parameters do not contribute to arity
                _ => {}
            }
        }
        params
    }

    fn scan_body(&self, block: Node, parameters: &[Option<String>]) -> Body {
        let mut body = Body::default();
        for i in 0..block.named_child_count() {
            if let Some(stmt) = block.named_child(i) {
                if !stmt.kind().ends_with("comment") {
                    body.statements += 1;
                }
            }
        }
        for name in parameters.iter().flatten() {
            body.locals.insert(name.clone());
        }
        self.collect_refs(block, &mut body);
        body
    }

    fn collect_refs(&self, node: Node, body: &mut Body) {
        match node.kind() {
            "this" | "super" => {
                body.refs.push(BodyRef::This);
                return;
            }
            "method_invocation" => {
                if node.child_by_field_name("object").is_none() {
                    if let Some(name) = node.child_by_field_name("name") {
                        body.refs.push(BodyRef::Call(self.text(name).to_string()));
                    }
                }
            }
            "identifier" => {
                if let Some(name) = self.value_reference(node) {
                    body.refs.push(BodyRef::Name(name));
                }
                return;
            }
            "local_variable_declaration" => {
                for i in 0..node.named_child_count() {
                    if let Some(d) = node.named_child(i) {
                        if d.kind() == "variable_declarator" {
                            if let Some(name) = d.child_by_field_name("name") {
                                body.locals.insert(self.text(name).to_string());
                            }
                        }
                    }
                }
            }
            "formal_parameter"
            | "catch_formal_parameter"
            | "resource"
            | "enhanced_for_statement" => {
                if let Some(name) = node.child_by_field_name("name") {
                    body.locals.insert(self.text(name).to_string());
                }
            }
            "inferred_parameters" => {
                for i in 0..node.named_child_count() {
                    if let Some(p) = node.named_child(i) {
                        if p.kind() == "identifier" {
                            body.locals.insert(self.text(p).to_string());
                        }
                    }
                }
            }
            "lambda_expression" => {
                if let Some(params) = node.child_by_field_name("parameters") {
                    if params.kind() == "identifier" {
                        body.locals.insert(self.text(params).to_string());
                    }
                }
            }
            _ => {}
        }
        for i in 0..node.named_child_count() {
            if let Some(child) = node.named_child(i) {
                self.collect_refs(child, body);
            }
        }
    }

    /// Decide whether an identifier node is a value read worth resolving.
    /// Declaration sites, member-selection names, labels and annotation
    /// names are not.
    fn value_reference(&self, node: Node) -> Option<String> {
        let parent = node.parent()?;
        let is_field = |field: &str| {
            parent
                .child_by_field_name(field)
                .map_or(false, |c| c.id() == node.id())
        };
        match parent.kind() {
            "method_invocation" if is_field("name") => None,
            "field_access" if is_field("field") => None,
            "variable_declarator"
            | "formal_parameter"
            | "catch_formal_parameter"
            | "resource"
            | "enhanced_for_statement"
                if is_field("name") =>
            {
                None
            }
            "lambda_expression" if is_field("parameters") => None,
            "labeled_statement" | "break_statement" | "continue_statement" => None,
            "inferred_parameters" => None,
            "marker_annotation" | "annotation" => None,
            "scoped_identifier" if is_field("name") => None,
            "method_reference" => {
                // `recv::name` - only the receiver side is a value read
                let last = parent
                    .named_child(parent.named_child_count().saturating_sub(1));
                if last.map_or(false, |l| l.id() == node.id()) {
                    None
                } else {
                    Some(self.text(node).to_string())
                }
            }
            _ => Some(self.text(node).to_string()),
        }
    }

    fn location_of(&self, node: Node, name_node: Option<Node>) -> Location {
        let pos = name_node.unwrap_or(node).start_position();
        Location::new(
            self.file.to_path_buf(),
            pos.row + 1,
            pos.column + 1,
            node.start_byte(),
            node.end_byte(),
        )
    }
}

/// Simple name of a possibly qualified, possibly generic type reference
fn simple_type_name(raw: &str) -> String {
    let base = raw.split('<').next().unwrap_or(raw).trim();
    base.rsplit('.').next().unwrap_or(base).trim().to_string()
}
