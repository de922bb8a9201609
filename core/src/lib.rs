//! Fluent, immutable builders for JSON Schema documents.
//!
//! This crate composes structural-validation documents (a draft-07-style
//! keyword vocabulary) through chained, type-narrowing operations:
//!
//! - [`SchemaBuilder`] — an immutable wrapper pairing a document fragment
//!   with a required-flag; every operation returns a new builder.
//! - [`SchemaNode`] — the plain, serializable document tree, merged
//!   through one total patch primitive ([`SchemaNode::apply`]).
//! - [`SchemaFactory`] and the free functions ([`string()`],
//!   [`object()`], [`shape()`], …) — entry points that pre-seed
//!   cross-cutting metadata before a concrete type is chosen.
//! - [`ValidatorRegistry`] — the escape hatch for checks the declarative
//!   vocabulary cannot express: predicates registered while authoring a
//!   schema, referenced from the document by generated key.
//! - [`ValidationEngine`] — the adapter handing finished documents plus
//!   the registry to the [`jsonschema`] engine.
//! - [`merge_schemas`], [`merge_multiple_schemas`], [`pick_from_schema`],
//!   [`omit_from_schema`] — pure utilities over built object schemas.
//!
//! Builders never validate data and never fail: logically inconsistent
//! keyword combinations are deferred to the engine at validate time.
//!
//! # Example
//!
//! ```
//! use fluent_schema_core::*;
//! use serde_json::json;
//!
//! let registry = ValidatorRegistry::new();
//! let factory = SchemaFactory::with_registry(registry.clone());
//!
//! let schema = factory.shape(
//!     [
//!         ("name", factory.string().min_length(1).erase()),
//!         ("age", factory.integer().minimum(0.0, false).optional().erase()),
//!     ],
//!     false,
//! );
//! assert_eq!(schema.node().required, Some(vec!["name".to_string()]));
//!
//! let engine = ValidationEngine::new(registry);
//! assert!(engine.check(schema.node(), &json!({"name": "Ada"})).is_ok());
//! assert!(engine.check(schema.node(), &json!({"age": 36})).is_err());
//! ```

mod array;
mod builder;
mod engine;
mod factory;
mod function;
mod merge;
mod node;
mod numeric;
mod object;
mod registry;
mod string;

pub use builder::{
    AnySchema, ArraySchema, FunctionSchema, NumericSchema, ObjectSchema, SchemaBuilder,
    StringSchema, kind,
};
pub use engine::{EngineError, ValidationEngine, Violation};
pub use factory::{
    SchemaFactory, all_of, any, any_of, array, boolean, constant, custom, date, datetime,
    enum_values, function, if_then, if_then_else, integer, list, not, null, number, object,
    one_of, shape, string,
};
pub use function::Callable;
pub use merge::{merge_multiple_schemas, merge_schemas, omit_from_schema, pick_from_schema};
pub use node::{
    BoolOrNode, Dependency, Items, NodePatch, RequiredPatch, SchemaNode, TypeTag, TypeValue,
};
pub use registry::{Predicate, PredicateContext, ValidatorRegistry};
