//! Merging and projecting built object schemas.
//!
//! These are pure functions over already-built builders: combining two
//! object schemas into one, folding a whole sequence, and picking or
//! omitting properties by name.
//!
//! # Example
//!
//! ```
//! use fluent_schema_core::{merge_schemas, shape, string};
//!
//! let person = shape([("name", string().erase())], false);
//! let contact = shape([("email", string().erase())], false);
//!
//! let merged = merge_schemas(&person, &contact);
//! let props = merged.node().properties.as_ref().unwrap();
//! assert!(props.contains_key("name") && props.contains_key("email"));
//! ```

use crate::builder::ObjectSchema;
use crate::node::{NodePatch, RequiredPatch, SchemaNode};

/// Merges two object schemas, the second overlaid on the first.
///
/// `properties` is the base's mapping overwritten by the overlay's (the
/// overlay wins on a name collision, and a collided property is replaced
/// wholly). `required` is extended with the overlay's entries **only when
/// the base builder itself is marked required**; a base that was made
/// [`optional`](ObjectSchema::optional) keeps its own `required` list and
/// the overlay's entries are silently dropped, even though the overlay's
/// properties are still merged in. That gate is observed behavior this
/// crate preserves deliberately — see DESIGN.md before "fixing" it.
///
/// # Examples
///
/// ```
/// use fluent_schema_core::{merge_schemas, shape, string};
///
/// let base = shape([("a", string().erase())], false).optional();
/// let overlay = shape([("b", string().erase())], false);
///
/// let merged = merge_schemas(&base, &overlay);
/// assert!(merged.node().properties.as_ref().unwrap().contains_key("b"));
/// // base is optional, so overlay's required entry was dropped
/// assert_eq!(merged.node().required, Some(vec!["a".to_string()]));
/// ```
pub fn merge_schemas(base: &ObjectSchema, overlay: &ObjectSchema) -> ObjectSchema {
    let mut node = SchemaNode::default();
    node.properties = Some(overlay.node().properties.clone().unwrap_or_default());

    let required = base
        .is_required()
        .then(|| RequiredPatch::Extend(overlay.node().required.clone().unwrap_or_default()));

    let mut patch = NodePatch::from_node(node);
    patch.required = required;
    base.clone().copy_with(patch)
}

/// Folds [`merge_schemas`] over a sequence, starting from the *last*
/// schema and merging right-to-left: for `[a, b, c]` the result is
/// `merge(merge(c, b), a)`, so earlier schemas win property collisions.
///
/// Returns `None` for an empty slice.
pub fn merge_multiple_schemas(schemas: &[ObjectSchema]) -> Option<ObjectSchema> {
    let mut iter = schemas.iter().rev();
    let mut merged = iter.next()?.clone();
    for schema in iter {
        merged = merge_schemas(&merged, schema);
    }
    Some(merged)
}

/// Keeps only the named properties (and their `required` entries); every
/// other keyword passes through unchanged.
pub fn pick_from_schema(schema: &ObjectSchema, names: &[&str]) -> ObjectSchema {
    project(schema, |name| names.contains(&name))
}

/// Drops the named properties (and their `required` entries); every other
/// keyword passes through unchanged.
pub fn omit_from_schema(schema: &ObjectSchema, names: &[&str]) -> ObjectSchema {
    project(schema, |name| !names.contains(&name))
}

fn project(schema: &ObjectSchema, keep: impl Fn(&str) -> bool) -> ObjectSchema {
    let (mut node, is_required, registry) = schema.clone().into_parts();
    if let Some(props) = node.properties.take() {
        node.properties = Some(props.into_iter().filter(|(name, _)| keep(name)).collect());
    }
    if let Some(required) = node.required.take() {
        node.required = Some(required.into_iter().filter(|name| keep(name)).collect());
    }
    ObjectSchema::from_parts(node, is_required, registry)
}
