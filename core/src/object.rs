//! Object-specific vocabulary: the property and structural algebra.

use indexmap::IndexMap;
use regex::Regex;

use crate::builder::{AnySchema, ObjectSchema, SchemaBuilder};
use crate::node::{BoolOrNode, Dependency, NodePatch, RequiredPatch, SchemaNode, TypeTag, TypeValue};
use crate::registry::ValidatorRegistry;

impl ObjectSchema {
    /// Creates a `type: object` builder over the shared registry.
    pub fn new() -> ObjectSchema {
        Self::of_type(TypeTag::Object, ValidatorRegistry::shared())
    }

    /// Attaches a named property.
    ///
    /// The child's document is copied into `properties` under `name`
    /// (insertion order is preserved and survives serialization). When the
    /// child builder is required — the default — `name` also enters the
    /// `required` list, deduplicated; an [`optional`](Self::optional)
    /// child leaves the list untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_schema_core::{object, string};
    ///
    /// let schema = object()
    ///     .prop("name", string())
    ///     .prop("nick", string().optional());
    /// assert_eq!(schema.node().required, Some(vec!["name".to_string()]));
    /// ```
    pub fn prop<K>(self, name: impl Into<String>, schema: SchemaBuilder<K>) -> Self {
        let name = name.into();
        let required = schema
            .is_required()
            .then(|| RequiredPatch::Extend(vec![name.clone()]));

        let mut node = SchemaNode::default();
        node.properties = Some(IndexMap::from([(name, schema.into_node())]));

        let mut patch = NodePatch::from_node(node);
        patch.required = required;
        self.copy_with(patch)
    }

    /// Replaces the `required` list with the given names (deduplicated).
    ///
    /// Names are not checked against `properties`; listing an unknown
    /// property is the validation engine's concern.
    pub fn required<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !list.contains(&name) {
                list.push(name);
            }
        }
        self.copy_with(NodePatch::default().with_required(RequiredPatch::Replace(list)))
    }

    /// Removes the given names from the `required` list.
    ///
    /// An absent list stays absent; filtering a present list to nothing
    /// leaves an explicit empty list in the document.
    pub fn not_required<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let drop: Vec<String> = names.into_iter().map(Into::into).collect();
        match self.node().required.clone() {
            None => self,
            Some(list) => {
                let kept = list.into_iter().filter(|n| !drop.contains(n)).collect();
                self.copy_with(NodePatch::default().with_required(RequiredPatch::Replace(kept)))
            }
        }
    }

    /// Sets `additionalProperties`: a boolean, or a schema that
    /// properties outside `properties`/`patternProperties` must satisfy.
    pub fn additional_properties(self, value: impl Into<BoolOrNode>) -> Self {
        let value = value.into();
        self.set(move |n| n.additional_properties = Some(value))
    }

    /// Requires every property name to validate against the given schema.
    pub fn property_names<K>(self, schema: SchemaBuilder<K>) -> Self {
        let node = schema.into_node();
        self.set(move |n| n.property_names = Some(Box::new(node)))
    }

    /// Sets the minimum property count.
    pub fn min_properties(self, count: u64) -> Self {
        self.set(move |n| n.min_properties = Some(count))
    }

    /// Sets the maximum property count.
    pub fn max_properties(self, count: u64) -> Self {
        self.set(move |n| n.max_properties = Some(count))
    }

    /// Sets `dependencies`. Each entry maps a property name to either a
    /// list of co-required property names or a schema the whole instance
    /// must satisfy when the property is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_schema_core::{object, string};
    ///
    /// let schema = object()
    ///     .prop("card", string().optional())
    ///     .prop("cvv", string().optional())
    ///     .dependencies([("card", vec!["cvv"])]);
    /// assert!(schema.node().dependencies.is_some());
    /// ```
    pub fn dependencies<I, N, D>(self, deps: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Dependency>,
    {
        let map: IndexMap<String, Dependency> = deps
            .into_iter()
            .map(|(name, dep)| (name.into(), dep.into()))
            .collect();
        self.set(move |n| n.dependencies = Some(map))
    }

    /// Sets `patternProperties`: properties whose name matches an
    /// expression must validate against the paired schema. The document
    /// stores each expression's source.
    pub fn pattern_properties<I>(self, props: I) -> Self
    where
        I: IntoIterator<Item = (Regex, AnySchema)>,
    {
        let map: IndexMap<String, SchemaNode> = props
            .into_iter()
            .map(|(pattern, schema)| (pattern.as_str().to_string(), schema.into_node()))
            .collect();
        self.set(move |n| n.pattern_properties = Some(map))
    }

    /// Removes `required` from this document and, recursively, from every
    /// property whose `type` is exactly the single `object` tag.
    ///
    /// The recursion deliberately does not descend anywhere else: not
    /// into array items, not into combinators, and not into properties
    /// whose type is a set (a nullable object is a set, not the single
    /// tag). In particular an object schema inside an array's `items`
    /// keeps its `required` list. This asymmetry is a documented policy
    /// of the operation, not an oversight.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_schema_core::{list, shape, string};
    ///
    /// let schema = shape(
    ///     [
    ///         ("a", shape([("b", string().erase())], false).erase()),
    ///         ("arr", list(shape([("c", string().erase())], false)).erase()),
    ///     ],
    ///     false,
    /// );
    /// let partial = schema.partial();
    ///
    /// let props = partial.node().properties.as_ref().unwrap();
    /// assert_eq!(partial.node().required, None);
    /// assert_eq!(props["a"].required, None);
    /// ```
    pub fn partial(self) -> Self {
        let (node, is_required, registry) = self.into_parts();
        Self::from_parts(strip_required(node), is_required, registry)
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_required(mut node: SchemaNode) -> SchemaNode {
    if let Some(props) = node.properties.as_mut() {
        for (_, child) in props.iter_mut() {
            if child.kind == Some(TypeValue::One(TypeTag::Object)) {
                *child = strip_required(std::mem::take(child));
            }
        }
    }
    node.required = None;
    node
}
