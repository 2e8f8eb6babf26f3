//! javagadget - method-declaration inspections for Java
//!
//! This library flags three method-level code smells in Java sources and
//! can fix one of them automatically.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .java files
//! 2. **Parsing** - Parse source files using tree-sitter
//! 3. **Model Building** - Extract classes, methods and body references
//! 4. **Semantic Queries** - Override search and member-access resolution
//! 5. **Inspections** - Guard-chain predicates producing diagnostics
//! 6. **Quick-Fixes** - Optional text edits applied after scanning
//! 7. **Reporting** - Output results in various formats

pub mod config;
pub mod discovery;
pub mod exclusions;
pub mod inspections;
pub mod model;
pub mod parser;
pub mod refactor;
pub mod report;
pub mod resolve;

pub use config::Config;
pub use discovery::FileFinder;
pub use exclusions::{ExclusionOracle, ExclusionRegistry};
pub use inspections::{
    default_inspections, DesignForExtensionInspection, Diagnostic, Inspection,
    MethodMayBeStaticInspection, MethodMayBeStaticOptions, NonFinalCloneInspection, Rule, Severity,
};
pub use model::{ClassDecl, ClassId, MethodDecl, MethodId, SourceModel};
pub use parser::{JavaParser, ModelBuilder, ParallelModelBuilder, ParseError};
pub use refactor::{FileEditor, FixError, MakeStaticFix};
pub use report::{ReportFormat, Reporter};
pub use resolve::ClassIndex;
