//! Adapter between finished documents and the `jsonschema` engine.
//!
//! The builder layer never validates data; it only produces documents. At
//! validate time this adapter compiles a [`SchemaNode`] with the
//! [`jsonschema`] crate and wires the `custom` extension keyword to a
//! [`ValidatorRegistry`], so predicate-based checks registered while
//! authoring the schema are reachable from inside the engine.
//!
//! Documents compile as draft-07: the vocabulary uses `dependencies` and
//! `additionalItems`, which later drafts dropped.
//!
//! Registry keys are resolved per validation call, not at compile time,
//! so a predicate registered after compilation is still found — and a key
//! with no registered predicate fails the node rather than silently
//! passing.

use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, ValidationError};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::node::SchemaNode;
use crate::registry::{PredicateContext, ValidatorRegistry};

/// One violation found while validating data against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value within the instance.
    pub instance_path: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "path={}: {}", self.instance_path, self.message)
    }
}

/// Errors returned by the engine adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The document could not be serialized to JSON.
    #[error("schema document cannot be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The engine rejected the document itself.
    #[error("schema document failed to compile: {reason}")]
    Compile {
        /// Human-readable reason from the engine.
        reason: String,
    },
    /// The data did not validate; all violations are listed.
    #[error("validation failed with {count} violation(s)")]
    ValidationFailed {
        /// Number of violations.
        count: usize,
        /// Per-violation details.
        details: Vec<Violation>,
    },
}

/// A conformant validation engine bound to one predicate registry.
///
/// # Examples
///
/// ```
/// use fluent_schema_core::{SchemaFactory, ValidationEngine, ValidatorRegistry};
/// use serde_json::json;
///
/// let registry = ValidatorRegistry::new();
/// let factory = SchemaFactory::with_registry(registry.clone());
/// let engine = ValidationEngine::new(registry);
///
/// let schema = factory.string().min_length(3);
/// assert!(engine.check(schema.node(), &json!("long enough")).is_ok());
/// assert!(engine.check(schema.node(), &json!("no")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    registry: ValidatorRegistry,
}

impl ValidationEngine {
    /// Creates an engine resolving `custom` keywords against `registry`.
    pub fn new(registry: ValidatorRegistry) -> Self {
        ValidationEngine { registry }
    }

    /// An engine over the process-wide shared registry, matching the free
    /// builder functions.
    pub fn shared() -> Self {
        Self::new(ValidatorRegistry::shared())
    }

    fn compile(&self, document: &Value) -> Result<jsonschema::Validator, EngineError> {
        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .with_keyword("custom", custom_keyword_factory(self.registry.clone()))
            .build(document)
            .map_err(|error| EngineError::Compile {
                reason: error.to_string(),
            })
    }

    /// Validates `data` against `schema`, reporting every violation.
    pub fn check(&self, schema: &SchemaNode, data: &Value) -> Result<(), EngineError> {
        let document = serde_json::to_value(schema)?;
        let validator = self.compile(&document)?;

        let details: Vec<Violation> = validator
            .iter_errors(data)
            .map(|error| Violation {
                instance_path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        if details.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = details.len(), "document validation failed");
            Err(EngineError::ValidationFailed {
                count: details.len(),
                details,
            })
        }
    }

    /// Boolean form of [`check`](Self::check); compile failures still
    /// surface as errors.
    pub fn is_valid(&self, schema: &SchemaNode, data: &Value) -> Result<bool, EngineError> {
        let document = serde_json::to_value(schema)?;
        Ok(self.compile(&document)?.is_valid(data))
    }
}

struct CustomKeyword {
    registry: ValidatorRegistry,
    key: String,
    args: Vec<Value>,
    parent: Value,
}

impl CustomKeyword {
    fn passes(&self, instance: &Value, instance_path: &str) -> bool {
        match self.registry.get(&self.key) {
            Some(predicate) => {
                let ctx = PredicateContext {
                    args: &self.args,
                    parent: &self.parent,
                    instance_path,
                };
                predicate.as_ref()(instance, &ctx)
            }
            None => {
                tracing::debug!(key = %self.key, "no predicate registered; failing node");
                false
            }
        }
    }
}

impl Keyword for CustomKeyword {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        let path: Location = location.into();
        if self.passes(instance, &path.to_string()) {
            Ok(())
        } else {
            Err(ValidationError::custom(
                Location::new(),
                path,
                instance,
                format!("custom check {} failed", self.key),
            ))
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        self.passes(instance, "")
    }
}

fn custom_keyword_factory(
    registry: ValidatorRegistry,
) -> impl for<'a> Fn(
    &'a Map<String, Value>,
    &'a Value,
    Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>>
+ Send
+ Sync
+ 'static {
    move |parent, value, location| {
        let Some(entries) = value.as_array() else {
            return Err(ValidationError::custom(
                Location::new(),
                location,
                value,
                "the custom keyword expects [registryKey, ...args]",
            ));
        };
        let Some(key) = entries.first().and_then(Value::as_str) else {
            return Err(ValidationError::custom(
                Location::new(),
                location,
                value,
                "the custom keyword's first element must be a registry key",
            ));
        };
        Ok(Box::new(CustomKeyword {
            registry: registry.clone(),
            key: key.to_string(),
            args: entries[1..].to_vec(),
            parent: Value::Object(parent.clone()),
        }))
    }
}
