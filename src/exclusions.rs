//! Veto hooks for the method-may-be-static inspection
//!
//! Other components can register an [`ExclusionOracle`] to exempt methods
//! they know must keep an instance context. The registry is injected into
//! the inspection at construction time and is read-only during a scan.

use crate::model::{MethodDecl, SourceModel};
use tracing::trace;

/// Capability interface: "is this method exempt from being made static?"
pub trait ExclusionOracle: Send + Sync {
    /// Short name used in trace logs
    fn name(&self) -> &str;

    fn is_exempt(&self, method: &MethodDecl, model: &SourceModel) -> bool;
}

/// Ordered collection of registered oracles
#[derive(Default)]
pub struct ExclusionRegistry {
    oracles: Vec<Box<dyn ExclusionOracle>>,
}

impl ExclusionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in oracles
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SerializationMethodsOracle));
        registry
    }

    pub fn register(&mut self, oracle: Box<dyn ExclusionOracle>) {
        self.oracles.push(oracle);
    }

    pub fn len(&self) -> usize {
        self.oracles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oracles.is_empty()
    }

    /// Any registered oracle may veto
    pub fn is_exempt(&self, method: &MethodDecl, model: &SourceModel) -> bool {
        for oracle in &self.oracles {
            if oracle.is_exempt(method, model) {
                trace!(
                    "oracle '{}' exempted method '{}'",
                    oracle.name(),
                    method.display_name()
                );
                return true;
            }
        }
        false
    }
}

/// Java serialization hooks are looked up reflectively on the instance and
/// stop working when declared static.
pub struct SerializationMethodsOracle;

const SERIALIZATION_METHODS: [&str; 5] = [
    "writeObject",
    "readObject",
    "readObjectNoData",
    "writeReplace",
    "readResolve",
];

impl ExclusionOracle for SerializationMethodsOracle {
    fn name(&self) -> &str {
        "serialization-methods"
    }

    fn is_exempt(&self, method: &MethodDecl, _model: &SourceModel) -> bool {
        method
            .name
            .as_deref()
            .map_or(false, |n| SERIALIZATION_METHODS.contains(&n))
    }
}
