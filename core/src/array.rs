//! Array-specific vocabulary.

use crate::builder::{AnySchema, ArraySchema, SchemaBuilder};
use crate::node::{BoolOrNode, Items, TypeTag};
use crate::registry::ValidatorRegistry;

impl ArraySchema {
    /// Creates a `type: array` builder over the shared registry.
    pub fn new() -> ArraySchema {
        Self::of_type(TypeTag::Array, ValidatorRegistry::shared())
    }

    /// Homogeneous form of `items`: every element validates against the
    /// given schema.
    pub fn items<K>(self, schema: SchemaBuilder<K>) -> Self {
        let node = schema.into_node();
        self.set(move |n| n.items = Some(Items::One(Box::new(node))))
    }

    /// Tuple form of `items`: element N validates against schema N.
    /// Elements past the tuple are governed by
    /// [`additional_items`](Self::additional_items).
    pub fn items_tuple<I>(self, schemas: I) -> Self
    where
        I: IntoIterator<Item = AnySchema>,
    {
        let nodes: Vec<_> = schemas.into_iter().map(AnySchema::into_node).collect();
        self.set(move |n| n.items = Some(Items::Tuple(nodes)))
    }

    /// Sets `additionalItems`: a boolean, or a schema for elements past
    /// the tuple form of [`items_tuple`](Self::items_tuple).
    pub fn additional_items(self, value: impl Into<BoolOrNode>) -> Self {
        let value = value.into();
        self.set(move |n| n.additional_items = Some(value))
    }

    /// Requires at least one element to validate against the given schema.
    pub fn contains<K>(self, schema: SchemaBuilder<K>) -> Self {
        let node = schema.into_node();
        self.set(move |n| n.contains = Some(Box::new(node)))
    }

    /// Sets the minimum element count.
    pub fn min_items(self, count: u64) -> Self {
        self.set(move |n| n.min_items = Some(count))
    }

    /// Sets the maximum element count.
    pub fn max_items(self, count: u64) -> Self {
        self.set(move |n| n.max_items = Some(count))
    }

    /// Requires all elements to be distinct.
    pub fn unique_items(self) -> Self {
        self.set(|n| n.unique_items = Some(true))
    }
}

impl Default for ArraySchema {
    fn default() -> Self {
        Self::new()
    }
}
