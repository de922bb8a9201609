//! The immutable schema builder and the vocabulary shared by every type.
//!
//! [`SchemaBuilder`] pairs a [`SchemaNode`] with a required-flag. Every
//! operation consumes the builder and returns a new one; nothing is ever
//! mutated in place, so holding an older builder in one hand and a derived
//! builder in the other is always safe. The marker parameter `K` selects
//! which specialized vocabulary is available on top of the shared one
//! (see [`kind`]); erasing it with [`erase`](SchemaBuilder::erase) costs
//! nothing.
//!
//! The required-flag is not part of the document. It is read by the parent
//! [`ObjectSchema`](crate::ObjectSchema) when this builder is attached as
//! a property, to decide whether the property name enters the parent's
//! `required` list.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::node::{NodePatch, SchemaNode, TypeTag, TypeValue};
use crate::registry::{PredicateContext, ValidatorRegistry};

/// Marker types selecting a builder's specialized vocabulary.
pub mod kind {
    /// No fixed type; only the shared vocabulary.
    #[derive(Debug, Clone, Copy)]
    pub struct Any;
    /// String-like values.
    #[derive(Debug, Clone, Copy)]
    pub struct Str;
    /// Numbers and integers.
    #[derive(Debug, Clone, Copy)]
    pub struct Num;
    /// Ordered lists.
    #[derive(Debug, Clone, Copy)]
    pub struct Arr;
    /// String-keyed mappings.
    #[derive(Debug, Clone, Copy)]
    pub struct Obj;
    /// Callable values (host-side checks only).
    #[derive(Debug, Clone, Copy)]
    pub struct Func;
}

/// A builder with no type-specific vocabulary.
pub type AnySchema = SchemaBuilder<kind::Any>;
/// A builder for `type: string` documents.
pub type StringSchema = SchemaBuilder<kind::Str>;
/// A builder for `type: number` / `type: integer` documents.
pub type NumericSchema = SchemaBuilder<kind::Num>;
/// A builder for `type: array` documents.
pub type ArraySchema = SchemaBuilder<kind::Arr>;
/// A builder for `type: object` documents.
pub type ObjectSchema = SchemaBuilder<kind::Obj>;
/// A builder for callable values.
pub type FunctionSchema = SchemaBuilder<kind::Func>;

/// An immutable wrapper around a [`SchemaNode`] plus a required-flag.
///
/// # Examples
///
/// ```
/// use fluent_schema_core::string;
///
/// let schema = string().min_length(1).nullable();
/// assert_eq!(
///     serde_json::to_string(&schema).unwrap(),
///     r#"{"type":["null","string"],"minLength":1}"#
/// );
/// ```
pub struct SchemaBuilder<K> {
    node: SchemaNode,
    is_required: bool,
    registry: ValidatorRegistry,
    _kind: PhantomData<K>,
}

impl<K> Clone for SchemaBuilder<K> {
    fn clone(&self) -> Self {
        SchemaBuilder {
            node: self.node.clone(),
            is_required: self.is_required,
            registry: self.registry.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> fmt::Debug for SchemaBuilder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("node", &self.node)
            .field("is_required", &self.is_required)
            .finish()
    }
}

impl<K> PartialEq for SchemaBuilder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.is_required == other.is_required
    }
}

impl<K> Serialize for SchemaBuilder<K> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node.serialize(serializer)
    }
}

impl<K> From<SchemaBuilder<K>> for SchemaNode {
    fn from(builder: SchemaBuilder<K>) -> Self {
        builder.into_node()
    }
}

impl<K> From<SchemaBuilder<K>> for crate::node::BoolOrNode {
    fn from(builder: SchemaBuilder<K>) -> Self {
        crate::node::BoolOrNode::Node(Box::new(builder.into_node()))
    }
}

impl<K> From<SchemaBuilder<K>> for crate::node::Dependency {
    fn from(builder: SchemaBuilder<K>) -> Self {
        crate::node::Dependency::Schema(Box::new(builder.into_node()))
    }
}

impl<K> SchemaBuilder<K> {
    pub(crate) fn from_parts(
        node: SchemaNode,
        is_required: bool,
        registry: ValidatorRegistry,
    ) -> Self {
        SchemaBuilder {
            node,
            is_required,
            registry,
            _kind: PhantomData,
        }
    }

    pub(crate) fn of_type(tag: TypeTag, registry: ValidatorRegistry) -> Self {
        Self::from_parts(SchemaNode::of_type(tag), true, registry)
    }

    pub(crate) fn into_parts(self) -> (SchemaNode, bool, ValidatorRegistry) {
        (self.node, self.is_required, self.registry)
    }

    /// The accumulated document.
    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    /// Consumes the builder, returning the accumulated document.
    pub fn into_node(self) -> SchemaNode {
        self.node
    }

    /// Whether a parent object builder will list this schema's property
    /// name in its `required` set. Defaults to `true`.
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// The registry this builder registers `custom` predicates into.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Applies a partial update and returns the new builder.
    ///
    /// This is the merge primitive every other operation is built on; the
    /// per-keyword rules are documented on [`SchemaNode::apply`]. It never
    /// fails and never validates cross-keyword consistency.
    pub fn copy_with(self, patch: NodePatch) -> Self {
        let flag = patch.is_required;
        let (node, mut is_required, registry) = self.into_parts();
        if let Some(flag) = flag {
            is_required = flag;
        }
        Self::from_parts(node.apply(patch), is_required, registry)
    }

    /// Discards the type-specific vocabulary, keeping the document.
    ///
    /// Useful for collecting differently typed builders into one list
    /// (e.g. for [`shape`](crate::SchemaFactory::shape)).
    pub fn erase(self) -> AnySchema {
        let (node, is_required, registry) = self.into_parts();
        AnySchema::from_parts(node, is_required, registry)
    }

    pub(crate) fn set(self, fill: impl FnOnce(&mut SchemaNode)) -> Self {
        let mut node = SchemaNode::default();
        fill(&mut node);
        self.copy_with(NodePatch::from_node(node))
    }

    /// Clears the required-flag without touching the document.
    pub fn optional(self) -> Self {
        self.copy_with(NodePatch::required_flag(false))
    }

    /// Admits null in addition to the current type.
    ///
    /// `type` becomes the set `[null, ...existing tags]`, and a present
    /// `enum` gains a null sentinel. Both transformations are idempotent.
    /// Note that a later [`enum_values`](Self::enum_values) call replaces
    /// the enumeration outright and loses the sentinel unless `nullable`
    /// is applied again.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_schema_core::string;
    ///
    /// let schema = string().enum_values(["a", "b"]).nullable();
    /// assert_eq!(
    ///     serde_json::to_string(&schema).unwrap(),
    ///     r#"{"type":["null","string"],"enum":["a","b",null]}"#
    /// );
    /// ```
    pub fn nullable(self) -> Self {
        let kind = match self.node.kind.clone() {
            None => TypeValue::Many(vec![TypeTag::Null]),
            Some(tags) => tags.with_null(),
        };
        let enumeration = self.node.enumeration.clone().map(|mut values| {
            if !values.iter().any(Value::is_null) {
                values.push(Value::Null);
            }
            values
        });
        self.set(move |n| {
            n.kind = Some(kind);
            n.enumeration = enumeration;
        })
    }

    /// Sets the enumerated allowed values, replacing any prior list.
    pub fn enum_values<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.set(move |n| n.enumeration = Some(values))
    }

    /// Sets the single allowed value (`const`).
    pub fn constant(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.set(move |n| n.constant = Some(value))
    }

    /// Sets `title`.
    pub fn title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.set(move |n| n.title = Some(title))
    }

    /// Sets `description`.
    pub fn description(self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.set(move |n| n.description = Some(description))
    }

    /// Sets `$id`, the identifier other documents may reference.
    pub fn id(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.set(move |n| n.id = Some(id))
    }

    /// Sets `$schema`, the URI of the dialect this document is written in.
    pub fn dialect(self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.set(move |n| n.dialect = Some(uri))
    }

    /// Sets `$ref`, a reference to another document by identifier.
    pub fn reference(self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.set(move |n| n.reference = Some(uri))
    }

    /// Sets the `default` value annotation.
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.set(move |n| n.default = Some(value))
    }

    /// Sets the `examples` annotation.
    pub fn examples<I, V>(self, examples: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let examples: Vec<Value> = examples.into_iter().map(Into::into).collect();
        self.set(move |n| n.examples = Some(examples))
    }

    /// Adds a named sub-definition under `$defs`.
    pub fn definition<K2>(self, name: impl Into<String>, schema: SchemaBuilder<K2>) -> Self {
        let name = name.into();
        let node = schema.into_node();
        self.set(move |n| n.defs = Some(IndexMap::from([(name, node)])))
    }

    /// Replaces this node with a predicate-based check.
    ///
    /// The predicate is registered in the builder's
    /// [`ValidatorRegistry`] under a freshly generated key, and the node
    /// becomes `{"custom": [key]}` — any declarative constraint
    /// previously on this node is discarded. The `custom` keyword is
    /// exclusive with declarative constraints on the same node; to
    /// combine both, wrap them in [`all_of`](crate::SchemaFactory::all_of).
    /// The required-flag survives.
    pub fn custom<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value, &PredicateContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.custom_with_args(predicate, Vec::new())
    }

    /// Like [`custom`](Self::custom), with auxiliary arguments stored
    /// after the key and handed back to the predicate at validate time.
    pub fn custom_with_args<F>(self, predicate: F, args: Vec<Value>) -> Self
    where
        F: Fn(&Value, &PredicateContext<'_>) -> bool + Send + Sync + 'static,
    {
        let (_, is_required, registry) = self.into_parts();
        let key = registry.register(predicate);
        let mut entries = vec![Value::String(key)];
        entries.extend(args);
        let node = SchemaNode {
            custom: Some(entries),
            ..Default::default()
        };
        Self::from_parts(node, is_required, registry)
    }
}

impl AnySchema {
    /// Creates an untyped builder over the shared registry.
    pub fn new() -> AnySchema {
        AnySchema::from_parts(SchemaNode::default(), true, ValidatorRegistry::shared())
    }
}

impl Default for AnySchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builders_default_to_required() {
        let schema = AnySchema::new();
        assert!(schema.is_required());
        assert!(!schema.optional().is_required());
    }

    #[test]
    fn test_optional_leaves_node_untouched() {
        let schema = AnySchema::new().title("t");
        let node_before = schema.node().clone();
        assert_eq!(schema.optional().node(), &node_before);
    }

    #[test]
    fn test_nullable_without_type() {
        let schema = AnySchema::new().nullable();
        assert_eq!(
            schema.node().kind,
            Some(TypeValue::Many(vec![TypeTag::Null]))
        );
    }

    #[test]
    fn test_nullable_is_idempotent() {
        let once = crate::string().nullable();
        let twice = crate::string().nullable().nullable();
        assert_eq!(once.node().kind, twice.node().kind);
        assert_eq!(
            once.node().kind,
            Some(TypeValue::Many(vec![TypeTag::Null, TypeTag::String]))
        );
    }

    #[test]
    fn test_nullable_appends_enum_sentinel_once() {
        let schema = crate::string().enum_values(["a", "b"]).nullable().nullable();
        assert_eq!(
            schema.node().enumeration,
            Some(vec![json!("a"), json!("b"), Value::Null])
        );
    }

    #[test]
    fn test_enum_after_nullable_loses_sentinel() {
        let schema = crate::string().nullable().enum_values(["a"]);
        assert_eq!(schema.node().enumeration, Some(vec![json!("a")]));
        // the type set keeps null; only the enumeration was replaced
        assert_eq!(
            schema.node().kind,
            Some(TypeValue::Many(vec![TypeTag::Null, TypeTag::String]))
        );
    }

    #[test]
    fn test_custom_replaces_declarative_constraints() {
        let schema = crate::string().min_length(3).custom(|v, _| v.is_string());
        let node = schema.node();
        assert!(node.custom.is_some());
        assert_eq!(node.kind, None);
        assert_eq!(node.min_length, None);
    }

    #[test]
    fn test_custom_keeps_required_flag() {
        let schema = crate::string().optional().custom(|_, _| true);
        assert!(!schema.is_required());
    }

    #[test]
    fn test_custom_with_args_stores_args_after_key() {
        let schema = AnySchema::new().custom_with_args(|_, _| true, vec![json!(10), json!("x")]);
        let entries = schema.node().custom.clone().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].as_str().unwrap().starts_with("custom_"));
        assert_eq!(entries[1], json!(10));
        assert_eq!(entries[2], json!("x"));
    }

    #[test]
    fn test_definition_accumulates() {
        let schema = AnySchema::new()
            .definition("a", crate::string())
            .definition("b", crate::number());
        let defs = schema.node().defs.clone().unwrap();
        assert_eq!(defs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_identical_chains_serialize_identically() {
        let build = || {
            crate::object()
                .prop("b", crate::string())
                .prop("a", crate::number().optional())
                .title("doc")
        };
        assert_eq!(
            serde_json::to_string(&build()).unwrap(),
            serde_json::to_string(&build()).unwrap()
        );
    }

    #[test]
    fn test_metadata_setters() {
        let schema = AnySchema::new()
            .id("ident")
            .dialect("https://json-schema.org/draft-07/schema#")
            .reference("other")
            .title("t")
            .description("d")
            .default_value("x")
            .examples(["a", "b"]);
        let node = schema.node();
        assert_eq!(node.id.as_deref(), Some("ident"));
        assert_eq!(node.reference.as_deref(), Some("other"));
        assert_eq!(node.default, Some(json!("x")));
        assert_eq!(node.examples, Some(vec![json!("a"), json!("b")]));
    }
}
