//! Schema document model and the keyword-merge primitive.
//!
//! This module defines the core data model used to represent schema
//! documents. [`SchemaNode`] is a plain, serializable tree: one optional
//! field per recognized keyword, every unset field omitted from the
//! serialized form, so a node serializes to exactly the keywords that were
//! set on it. The types round-trip through JSON with [`serde`].
//!
//! Builders never mutate a node in place. Every transformation goes through
//! [`SchemaNode::apply`], which overlays a [`NodePatch`] onto an existing
//! node and returns the combined document. The per-keyword rules live in
//! that one function so they can be tested independently of any builder
//! chaining.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A primitive or compound type tag.
///
/// `Function` is a non-standard tag used for callable values; it has no
/// declarative vocabulary and is only meaningful to host-side checks (see
/// [`FunctionSchema`](crate::FunctionSchema)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// The null value.
    Null,
    /// true or false.
    Boolean,
    /// A string.
    String,
    /// Any number.
    Number,
    /// A whole number.
    Integer,
    /// An ordered list.
    Array,
    /// A string-keyed mapping.
    Object,
    /// A callable value (non-standard).
    Function,
}

/// The value of the `type` keyword: a single tag or an ordered tag set.
///
/// The set form exists for nullability. [`with_null`](TypeValue::with_null)
/// produces `[null, ...existing]` and is idempotent.
///
/// # Examples
///
/// ```
/// use fluent_schema_core::{TypeTag, TypeValue};
///
/// let tv = TypeValue::One(TypeTag::String).with_null();
/// assert_eq!(tv, TypeValue::Many(vec![TypeTag::Null, TypeTag::String]));
/// assert_eq!(tv.clone().with_null(), tv);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeValue {
    /// A single type tag, serialized as a bare string.
    One(TypeTag),
    /// An ordered set of tags, serialized as an array.
    Many(Vec<TypeTag>),
}

impl TypeValue {
    /// Returns the set `{null, ...existing tags}`, null first.
    ///
    /// Idempotent: a null tag already present is not duplicated.
    pub fn with_null(self) -> TypeValue {
        let tags = match self {
            TypeValue::One(tag) => vec![tag],
            TypeValue::Many(tags) => tags,
        };
        let mut set = vec![TypeTag::Null];
        set.extend(tags.into_iter().filter(|tag| *tag != TypeTag::Null));
        TypeValue::Many(set)
    }
}

/// The `items` keyword: one schema for every element, or an ordered tuple
/// of per-position schemas (which enables `additionalItems`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Homogeneous form: every element validates against one schema.
    One(Box<SchemaNode>),
    /// Tuple form: element N validates against schema N.
    Tuple(Vec<SchemaNode>),
}

/// A keyword value that is either a boolean or a child schema
/// (`additionalProperties`, `additionalItems`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolOrNode {
    /// Allow-all (`true`) or deny-all (`false`).
    Bool(bool),
    /// A schema the extra members must validate against.
    Node(Box<SchemaNode>),
}

impl From<bool> for BoolOrNode {
    fn from(value: bool) -> Self {
        BoolOrNode::Bool(value)
    }
}

impl From<SchemaNode> for BoolOrNode {
    fn from(node: SchemaNode) -> Self {
        BoolOrNode::Node(Box::new(node))
    }
}

/// One entry of the `dependencies` keyword: the presence of a property
/// either co-requires other properties by name, or activates a schema the
/// whole instance must validate against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    /// Property names that must also be present.
    Requires(Vec<String>),
    /// A schema the instance must additionally satisfy.
    Schema(Box<SchemaNode>),
}

impl From<Vec<String>> for Dependency {
    fn from(names: Vec<String>) -> Self {
        Dependency::Requires(names)
    }
}

impl From<Vec<&str>> for Dependency {
    fn from(names: Vec<&str>) -> Self {
        Dependency::Requires(names.into_iter().map(String::from).collect())
    }
}

impl From<SchemaNode> for Dependency {
    fn from(node: SchemaNode) -> Self {
        Dependency::Schema(Box::new(node))
    }
}

/// One schema document fragment.
///
/// A node is pure data: it carries no behavior beyond serialization and
/// the [`apply`](SchemaNode::apply) merge primitive. Field order here is
/// the serialization order, so identical construction sequences produce
/// textually identical documents. `properties`, `patternProperties`,
/// `dependencies`, and `$defs` use [`IndexMap`] so insertion order
/// survives serialization.
///
/// # Examples
///
/// ```
/// use fluent_schema_core::{SchemaNode, TypeTag};
///
/// let node = SchemaNode::of_type(TypeTag::String);
/// assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"type":"string"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// `$schema`: URI of the dialect this document is written in.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    /// `$id`: identifier other documents may reference.
    #[serde(rename = "$id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `$ref`: reference to another document by identifier.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `type`: a single tag or an ordered tag set (see [`TypeValue`]).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeValue>,
    /// `enum`: the exhaustive list of allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,
    /// `const`: the single allowed value.
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub constant: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `pattern`: regular-expression source the string must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<BoolOrNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    /// Property name → child schema, in insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Property names that must be present. Absent and empty are distinct
    /// documents; order is deterministic (first appearance wins).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<BoolOrNode>,
    /// Schema every property name must validate against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_names: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, Dependency>>,
    /// Regular-expression source → child schema, in insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaNode>>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_schema: Option<Box<SchemaNode>>,
    #[serde(rename = "then", skip_serializing_if = "Option::is_none")]
    pub then_schema: Option<Box<SchemaNode>>,
    #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
    pub else_schema: Option<Box<SchemaNode>>,
    /// Extension keyword: `[registryKey, ...args]`. The engine resolves
    /// the key against a [`ValidatorRegistry`](crate::ValidatorRegistry)
    /// at validate time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// `$defs`: named sub-definitions for use with `$ref`.
    #[serde(rename = "$defs", skip_serializing_if = "Option::is_none")]
    pub defs: Option<IndexMap<String, SchemaNode>>,
}

/// How a patch updates the `required` list.
///
/// The implicit rule (used by `prop` and by schema merging) extends the
/// existing list; the explicit `required(...)` / `not_required(...)` calls
/// replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredPatch {
    /// Concatenate onto the existing list, deduplicated, creating the
    /// list when absent.
    Extend(Vec<String>),
    /// Replace the list outright.
    Replace(Vec<String>),
}

/// A partial update applied by [`SchemaNode::apply`].
///
/// `node` carries the keyword values to overlay; its own `required` field
/// is never read directly — [`NodePatch::from_node`] lifts it into the
/// implicit [`RequiredPatch::Extend`] rule. `is_required` is not a node
/// keyword at all; it updates the builder flag read by a parent object
/// builder (see [`SchemaBuilder`](crate::SchemaBuilder)).
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    /// Keyword values to overlay onto the target node.
    pub node: SchemaNode,
    /// Update to the `required` list, if any.
    pub required: Option<RequiredPatch>,
    /// Update to the builder's required-flag, if any.
    pub is_required: Option<bool>,
}

impl NodePatch {
    /// A patch that only changes the builder's required-flag.
    pub fn required_flag(is_required: bool) -> Self {
        NodePatch {
            is_required: Some(is_required),
            ..Default::default()
        }
    }

    /// Wraps a node as a patch, lifting its `required` list into the
    /// implicit concatenate-and-deduplicate rule.
    pub fn from_node(mut node: SchemaNode) -> Self {
        let required = node.required.take().map(RequiredPatch::Extend);
        NodePatch {
            node,
            required,
            is_required: None,
        }
    }

    /// Sets the `required` update on this patch.
    pub fn with_required(mut self, required: RequiredPatch) -> Self {
        self.required = Some(required);
        self
    }
}

impl From<SchemaNode> for NodePatch {
    fn from(node: SchemaNode) -> Self {
        NodePatch::from_node(node)
    }
}

// The merge rules of `apply`, written as two field tables.

/// Scalar keywords: the patch side overwrites when present.
macro_rules! overwrite {
    ($out:ident, $patch:ident: $($field:ident),+ $(,)?) => {
        $( if $patch.$field.is_some() { $out.$field = $patch.$field; } )+
    };
}

/// Ordered-map keywords: shallow-merged, the patch side wins per key,
/// first-appearance order preserved.
macro_rules! merge_map {
    ($out:ident, $patch:ident: $($field:ident),+ $(,)?) => {
        $( if let Some(entries) = $patch.$field {
            $out.$field.get_or_insert_with(IndexMap::new).extend(entries);
        } )+
    };
}

impl SchemaNode {
    /// A node whose only keyword is the given single type tag.
    pub fn of_type(tag: TypeTag) -> SchemaNode {
        SchemaNode {
            kind: Some(TypeValue::One(tag)),
            ..Default::default()
        }
    }

    /// Overlays `patch` onto this node and returns the combined node.
    ///
    /// This is the one merge primitive every builder operation goes
    /// through. Per keyword:
    ///
    /// - scalar keywords (including whole combinator arrays, and the
    ///   `dependencies`/`patternProperties` maps) are overwritten by the
    ///   patch when it sets them;
    /// - `properties` and `$defs` are shallow-merged — a key on both
    ///   sides takes the patch side's child wholly, with no recursive
    ///   merge of the two children;
    /// - `required` follows the patch's [`RequiredPatch`], or is kept
    ///   unchanged when the patch carries none.
    ///
    /// `apply` is total: it never fails and never checks cross-keyword
    /// consistency (setting `minimum` on a non-numeric node is the
    /// validation engine's concern, not a build-time error).
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_schema_core::{NodePatch, SchemaNode, TypeTag};
    ///
    /// let base = SchemaNode::of_type(TypeTag::String);
    /// let patch = SchemaNode { format: Some("email".into()), ..Default::default() };
    /// let node = base.apply(NodePatch::from_node(patch));
    /// assert_eq!(node.format.as_deref(), Some("email"));
    /// assert_eq!(node.kind, Some(fluent_schema_core::TypeValue::One(TypeTag::String)));
    /// ```
    pub fn apply(self, patch: NodePatch) -> SchemaNode {
        let mut out = self;
        let NodePatch { node, required, .. } = patch;

        overwrite!(out, node:
            dialect, id, reference, title, description,
            kind, enumeration, constant,
            format, pattern, content_media_type, content_encoding,
            min_length, max_length,
            minimum, maximum, exclusive_minimum, exclusive_maximum, multiple_of,
            items, additional_items, contains, min_items, max_items, unique_items,
            additional_properties, property_names, min_properties, max_properties,
            dependencies, pattern_properties,
            any_of, one_of, all_of, not, if_schema, then_schema, else_schema,
            custom, examples, default,
        );
        merge_map!(out, node: properties, defs);

        let current = out.required.take();
        out.required = match required {
            None => current,
            Some(RequiredPatch::Extend(names)) => {
                let mut list = current.unwrap_or_default();
                for name in names {
                    if !list.contains(&name) {
                        list.push(name);
                    }
                }
                Some(list)
            }
            Some(RequiredPatch::Replace(names)) => Some(names),
        };

        out
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn string_node() -> SchemaNode {
        SchemaNode::of_type(TypeTag::String)
    }

    #[test]
    fn test_apply_overwrites_scalar_keywords() {
        let base = SchemaNode {
            title: Some("old".into()),
            format: Some("date".into()),
            ..string_node()
        };
        let patch = SchemaNode {
            title: Some("new".into()),
            ..Default::default()
        };

        let out = base.apply(NodePatch::from_node(patch));
        assert_eq!(out.title.as_deref(), Some("new"));
        assert_eq!(out.format.as_deref(), Some("date"));
    }

    #[test]
    fn test_apply_shallow_merges_properties() {
        let mut base = SchemaNode::of_type(TypeTag::Object);
        base.properties = Some(IndexMap::from([
            ("a".to_string(), string_node()),
            ("b".to_string(), string_node()),
        ]));

        let replacement = SchemaNode::of_type(TypeTag::Number);
        let mut patch = SchemaNode::default();
        patch.properties = Some(IndexMap::from([
            ("b".to_string(), replacement.clone()),
            ("c".to_string(), string_node()),
        ]));

        let out = base.apply(NodePatch::from_node(patch));
        let props = out.properties.unwrap();
        assert_eq!(
            props.keys().collect::<Vec<_>>(),
            vec!["a", "b", "c"],
            "first-appearance order must survive the merge"
        );
        assert_eq!(props["b"], replacement, "patch side wins per key");
    }

    #[test]
    fn test_apply_extend_required_deduplicates() {
        let mut base = SchemaNode::of_type(TypeTag::Object);
        base.required = Some(vec!["a".into(), "b".into()]);

        let out = base.apply(
            NodePatch::default()
                .with_required(RequiredPatch::Extend(vec!["b".into(), "c".into()])),
        );
        assert_eq!(out.required, Some(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[test]
    fn test_apply_replace_required() {
        let mut base = SchemaNode::of_type(TypeTag::Object);
        base.required = Some(vec!["a".into(), "b".into()]);

        let out = base.apply(
            NodePatch::default().with_required(RequiredPatch::Replace(vec!["c".into()])),
        );
        assert_eq!(out.required, Some(vec!["c".into()]));
    }

    #[test]
    fn test_apply_without_required_patch_keeps_list() {
        let mut base = SchemaNode::of_type(TypeTag::Object);
        base.required = Some(vec!["a".into()]);

        let patch = SchemaNode {
            title: Some("t".into()),
            ..Default::default()
        };
        let out = base.apply(NodePatch::from_node(patch));
        assert_eq!(out.required, Some(vec!["a".into()]));
    }

    #[test]
    fn test_from_node_lifts_required_into_extend() {
        let mut base = SchemaNode::of_type(TypeTag::Object);
        base.required = Some(vec!["a".into()]);

        let mut patch_node = SchemaNode::default();
        patch_node.required = Some(vec!["b".into(), "a".into()]);

        let out = base.apply(NodePatch::from_node(patch_node));
        assert_eq!(out.required, Some(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_apply_overwrites_combinators_wholesale() {
        let mut base = SchemaNode::default();
        base.any_of = Some(vec![string_node(), SchemaNode::of_type(TypeTag::Number)]);

        let mut patch = SchemaNode::default();
        patch.any_of = Some(vec![SchemaNode::of_type(TypeTag::Boolean)]);

        let out = base.apply(NodePatch::from_node(patch));
        assert_eq!(out.any_of.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_with_null_is_idempotent() {
        let tv = TypeValue::One(TypeTag::Number).with_null();
        assert_eq!(
            tv,
            TypeValue::Many(vec![TypeTag::Null, TypeTag::Number])
        );
        assert_eq!(tv.clone().with_null(), tv);
    }

    #[test]
    fn test_serialization_skips_unset_keywords() {
        let node = string_node();
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "string"})
        );
    }

    #[test]
    fn test_serialization_keyword_names() {
        let node = SchemaNode {
            id: Some("root".into()),
            kind: Some(TypeValue::Many(vec![TypeTag::Null, TypeTag::String])),
            enumeration: Some(vec![json!("a"), Value::Null]),
            min_length: Some(1),
            additional_properties: Some(false.into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "$id": "root",
                "type": ["null", "string"],
                "enum": ["a", null],
                "minLength": 1,
                "additionalProperties": false,
            })
        );
    }

    #[test]
    fn test_dependency_round_trip() {
        let deps: IndexMap<String, Dependency> = IndexMap::from([
            ("a".to_string(), Dependency::from(vec!["b", "c"])),
            ("d".to_string(), Dependency::from(string_node())),
        ]);
        let value = serde_json::to_value(&deps).unwrap();
        assert_eq!(
            value,
            json!({"a": ["b", "c"], "d": {"type": "string"}})
        );
        let back: IndexMap<String, Dependency> = serde_json::from_value(value).unwrap();
        assert_eq!(back, deps);
    }

    #[test]
    fn test_empty_required_is_distinct_from_absent() {
        let absent = SchemaNode::of_type(TypeTag::Object);
        let empty = SchemaNode {
            required: Some(Vec::new()),
            ..SchemaNode::of_type(TypeTag::Object)
        };
        assert_eq!(
            serde_json::to_string(&absent).unwrap(),
            r#"{"type":"object"}"#
        );
        assert_eq!(
            serde_json::to_string(&empty).unwrap(),
            r#"{"type":"object","required":[]}"#
        );
    }
}
