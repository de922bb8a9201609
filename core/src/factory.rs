//! Entry points: the metadata-seeding factory and the free builder
//! functions.
//!
//! A [`SchemaFactory`] accumulates cross-cutting metadata (title,
//! description, identifiers, default, sub-definitions) *before* a concrete
//! type is chosen, then seeds it into whichever typed builder the caller
//! picks. The free functions ([`string()`], [`object()`], …) are
//! shorthands over a fresh factory bound to the process-wide registry, so
//! most call sites never name the factory at all.
//!
//! ```
//! use fluent_schema_core::{SchemaFactory, shape, string};
//!
//! // free-function style
//! let quick = shape([("name", string().erase())], false);
//!
//! // factory style, with pre-seeded metadata and an isolated registry
//! let registry = fluent_schema_core::ValidatorRegistry::new();
//! let described = SchemaFactory::with_registry(registry)
//!     .title("Person")
//!     .shape([("name", string().erase())], false);
//!
//! assert_eq!(described.node().title.as_deref(), Some("Person"));
//! assert_eq!(quick.node().title, None);
//! ```

use indexmap::IndexMap;
use serde_json::Value;

use crate::builder::{
    AnySchema, ArraySchema, FunctionSchema, NumericSchema, ObjectSchema, SchemaBuilder,
    StringSchema,
};
use crate::node::{NodePatch, SchemaNode, TypeTag};
use crate::registry::{PredicateContext, ValidatorRegistry};

/// Shared entry point that pre-seeds metadata before a type is chosen.
#[derive(Debug, Clone)]
pub struct SchemaFactory {
    seed: NodePatch,
    registry: ValidatorRegistry,
}

impl Default for SchemaFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaFactory {
    /// Creates a factory over the process-wide shared registry.
    pub fn new() -> Self {
        Self::with_registry(ValidatorRegistry::shared())
    }

    /// Creates a factory over an explicit registry. Builders made by this
    /// factory register their `custom` predicates there, and the same
    /// handle must be given to the engine adapter.
    pub fn with_registry(registry: ValidatorRegistry) -> Self {
        SchemaFactory {
            seed: NodePatch::default(),
            registry,
        }
    }

    /// The registry this factory hands to its builders.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    fn seeded<K>(&self, builder: SchemaBuilder<K>) -> SchemaBuilder<K> {
        builder.copy_with(self.seed.clone())
    }

    fn seeded_node(&self, node: SchemaNode) -> AnySchema {
        self.seeded(AnySchema::from_parts(node, true, self.registry.clone()))
    }

    // ---- metadata accumulated before the type is chosen ----

    /// Pre-seeds `title`.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.seed.node.title = Some(title.into());
        self
    }

    /// Pre-seeds `description`.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.seed.node.description = Some(description.into());
        self
    }

    /// Pre-seeds `$id`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.seed.node.id = Some(id.into());
        self
    }

    /// Pre-seeds `$schema`.
    pub fn dialect(mut self, uri: impl Into<String>) -> Self {
        self.seed.node.dialect = Some(uri.into());
        self
    }

    /// Pre-seeds `$ref`.
    pub fn reference(mut self, uri: impl Into<String>) -> Self {
        self.seed.node.reference = Some(uri.into());
        self
    }

    /// Pre-seeds the `default` annotation.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.seed.node.default = Some(value.into());
        self
    }

    /// Pre-seeds the `examples` annotation.
    pub fn examples<I, V>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.seed.node.examples = Some(examples.into_iter().map(Into::into).collect());
        self
    }

    /// Pre-seeds a named sub-definition under `$defs`.
    pub fn definition<K>(mut self, name: impl Into<String>, schema: SchemaBuilder<K>) -> Self {
        self.seed
            .node
            .defs
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), schema.into_node());
        self
    }

    // ---- typed entry points ----

    /// An empty document: `{}`.
    pub fn any(&self) -> AnySchema {
        self.seeded_node(SchemaNode::default())
    }

    /// `{"type": "string"}`.
    pub fn string(&self) -> StringSchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::String, self.registry.clone()))
    }

    /// A string in `date` format.
    pub fn date(&self) -> StringSchema {
        self.string().format("date")
    }

    /// A string in `date-time` format.
    pub fn datetime(&self) -> StringSchema {
        self.string().format("date-time")
    }

    /// `{"type": "number"}`.
    pub fn number(&self) -> NumericSchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Number, self.registry.clone()))
    }

    /// `{"type": "integer"}`.
    pub fn integer(&self) -> NumericSchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Integer, self.registry.clone()))
    }

    /// `{"type": "boolean"}`.
    pub fn boolean(&self) -> AnySchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Boolean, self.registry.clone()))
    }

    /// `{"type": "null"}`.
    pub fn null(&self) -> AnySchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Null, self.registry.clone()))
    }

    /// `{"type": "array"}`.
    pub fn array(&self) -> ArraySchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Array, self.registry.clone()))
    }

    /// An array whose elements all validate against `items`.
    pub fn list<K>(&self, items: SchemaBuilder<K>) -> ArraySchema {
        self.array().items(items)
    }

    /// `{"type": "object"}`.
    pub fn object(&self) -> ObjectSchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Object, self.registry.clone()))
    }

    /// An object with the given properties attached in order and
    /// `additionalProperties` set to `additional`.
    ///
    /// Children are erased builders so differently typed properties can
    /// share one list; required tracking works exactly as with
    /// [`prop`](ObjectSchema::prop).
    pub fn shape<I, N>(&self, props: I, additional: bool) -> ObjectSchema
    where
        I: IntoIterator<Item = (N, AnySchema)>,
        N: Into<String>,
    {
        let mut schema = self.object().additional_properties(additional);
        for (name, prop) in props {
            schema = schema.prop(name, prop);
        }
        schema
    }

    /// A callable-value schema (host-side checks only; see
    /// [`FunctionSchema`]).
    pub fn function(&self) -> FunctionSchema {
        self.seeded(SchemaBuilder::of_type(TypeTag::Function, self.registry.clone()))
    }

    /// An untyped document restricted to the given values.
    pub fn enum_values<I, V>(&self, values: I) -> AnySchema
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.any().enum_values(values)
    }

    /// An untyped document restricted to one value.
    pub fn constant(&self, value: impl Into<Value>) -> AnySchema {
        self.any().constant(value)
    }

    // ---- combinators ----
    //
    // Child nodes are taken verbatim; a child's required-flag does not
    // survive into the combinator document.

    /// `anyOf`: at least one child must match.
    pub fn any_of<I>(&self, schemas: I) -> AnySchema
    where
        I: IntoIterator<Item = AnySchema>,
    {
        let nodes: Vec<_> = schemas.into_iter().map(AnySchema::into_node).collect();
        self.seeded_node(SchemaNode {
            any_of: Some(nodes),
            ..Default::default()
        })
    }

    /// `oneOf`: exactly one child must match.
    pub fn one_of<I>(&self, schemas: I) -> AnySchema
    where
        I: IntoIterator<Item = AnySchema>,
    {
        let nodes: Vec<_> = schemas.into_iter().map(AnySchema::into_node).collect();
        self.seeded_node(SchemaNode {
            one_of: Some(nodes),
            ..Default::default()
        })
    }

    /// `allOf`: every child must match.
    pub fn all_of<I>(&self, schemas: I) -> AnySchema
    where
        I: IntoIterator<Item = AnySchema>,
    {
        let nodes: Vec<_> = schemas.into_iter().map(AnySchema::into_node).collect();
        self.seeded_node(SchemaNode {
            all_of: Some(nodes),
            ..Default::default()
        })
    }

    /// `not`: the child must not match.
    pub fn not<K>(&self, schema: SchemaBuilder<K>) -> AnySchema {
        self.seeded_node(SchemaNode {
            not: Some(Box::new(schema.into_node())),
            ..Default::default()
        })
    }

    /// `if`/`then`, with no `else` branch emitted.
    pub fn if_then<K1, K2>(&self, condition: SchemaBuilder<K1>, then: SchemaBuilder<K2>) -> AnySchema {
        self.seeded_node(SchemaNode {
            if_schema: Some(Box::new(condition.into_node())),
            then_schema: Some(Box::new(then.into_node())),
            ..Default::default()
        })
    }

    /// `if`/`then`/`else`.
    pub fn if_then_else<K1, K2, K3>(
        &self,
        condition: SchemaBuilder<K1>,
        then: SchemaBuilder<K2>,
        otherwise: SchemaBuilder<K3>,
    ) -> AnySchema {
        self.seeded_node(SchemaNode {
            if_schema: Some(Box::new(condition.into_node())),
            then_schema: Some(Box::new(then.into_node())),
            else_schema: Some(Box::new(otherwise.into_node())),
            ..Default::default()
        })
    }

    /// A document whose only constraint is a registered predicate; see
    /// [`SchemaBuilder::custom`].
    pub fn custom<F>(&self, predicate: F) -> AnySchema
    where
        F: Fn(&Value, &PredicateContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.any().custom(predicate)
    }
}

// ---- free functions over the shared registry ----

/// An empty document over the shared registry.
pub fn any() -> AnySchema {
    SchemaFactory::new().any()
}

/// A `type: string` builder over the shared registry.
pub fn string() -> StringSchema {
    SchemaFactory::new().string()
}

/// A `date`-formatted string builder.
pub fn date() -> StringSchema {
    SchemaFactory::new().date()
}

/// A `date-time`-formatted string builder.
pub fn datetime() -> StringSchema {
    SchemaFactory::new().datetime()
}

/// A `type: number` builder over the shared registry.
pub fn number() -> NumericSchema {
    SchemaFactory::new().number()
}

/// A `type: integer` builder over the shared registry.
pub fn integer() -> NumericSchema {
    SchemaFactory::new().integer()
}

/// A `type: boolean` builder over the shared registry.
pub fn boolean() -> AnySchema {
    SchemaFactory::new().boolean()
}

/// A `type: null` builder over the shared registry.
pub fn null() -> AnySchema {
    SchemaFactory::new().null()
}

/// A `type: array` builder over the shared registry.
pub fn array() -> ArraySchema {
    SchemaFactory::new().array()
}

/// An array of `items` over the shared registry.
pub fn list<K>(items: SchemaBuilder<K>) -> ArraySchema {
    SchemaFactory::new().list(items)
}

/// A `type: object` builder over the shared registry.
pub fn object() -> ObjectSchema {
    SchemaFactory::new().object()
}

/// An object with the given properties; see [`SchemaFactory::shape`].
pub fn shape<I, N>(props: I, additional: bool) -> ObjectSchema
where
    I: IntoIterator<Item = (N, AnySchema)>,
    N: Into<String>,
{
    SchemaFactory::new().shape(props, additional)
}

/// A callable-value schema.
pub fn function() -> FunctionSchema {
    SchemaFactory::new().function()
}

/// An untyped document restricted to the given values.
pub fn enum_values<I, V>(values: I) -> AnySchema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    SchemaFactory::new().enum_values(values)
}

/// An untyped document restricted to one value.
pub fn constant(value: impl Into<Value>) -> AnySchema {
    SchemaFactory::new().constant(value)
}

/// `anyOf` over the shared registry.
pub fn any_of<I>(schemas: I) -> AnySchema
where
    I: IntoIterator<Item = AnySchema>,
{
    SchemaFactory::new().any_of(schemas)
}

/// `oneOf` over the shared registry.
pub fn one_of<I>(schemas: I) -> AnySchema
where
    I: IntoIterator<Item = AnySchema>,
{
    SchemaFactory::new().one_of(schemas)
}

/// `allOf` over the shared registry.
pub fn all_of<I>(schemas: I) -> AnySchema
where
    I: IntoIterator<Item = AnySchema>,
{
    SchemaFactory::new().all_of(schemas)
}

/// `not` over the shared registry.
pub fn not<K>(schema: SchemaBuilder<K>) -> AnySchema {
    SchemaFactory::new().not(schema)
}

/// `if`/`then` over the shared registry.
pub fn if_then<K1, K2>(condition: SchemaBuilder<K1>, then: SchemaBuilder<K2>) -> AnySchema {
    SchemaFactory::new().if_then(condition, then)
}

/// `if`/`then`/`else` over the shared registry.
pub fn if_then_else<K1, K2, K3>(
    condition: SchemaBuilder<K1>,
    then: SchemaBuilder<K2>,
    otherwise: SchemaBuilder<K3>,
) -> AnySchema {
    SchemaFactory::new().if_then_else(condition, then, otherwise)
}

/// A predicate-only document over the shared registry.
pub fn custom<F>(predicate: F) -> AnySchema
where
    F: Fn(&Value, &PredicateContext<'_>) -> bool + Send + Sync + 'static,
{
    SchemaFactory::new().custom(predicate)
}
