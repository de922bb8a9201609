//! String-specific vocabulary.

use regex::Regex;

use crate::builder::StringSchema;
use crate::node::TypeTag;
use crate::registry::ValidatorRegistry;

impl StringSchema {
    /// Creates a `type: string` builder over the shared registry.
    pub fn new() -> StringSchema {
        Self::of_type(TypeTag::String, ValidatorRegistry::shared())
    }

    /// Sets `format` (e.g. `"email"`, `"date-time"`). Interpretation is
    /// the engine's concern.
    pub fn format(self, format: impl Into<String>) -> Self {
        let format = format.into();
        self.set(move |n| n.format = Some(format))
    }

    /// Sets `pattern` from a compiled expression; the document stores the
    /// expression source.
    pub fn pattern(self, pattern: &Regex) -> Self {
        let source = pattern.as_str().to_string();
        self.set(move |n| n.pattern = Some(source))
    }

    /// Sets the minimum length in characters.
    pub fn min_length(self, length: u64) -> Self {
        self.set(move |n| n.min_length = Some(length))
    }

    /// Sets the maximum length in characters.
    pub fn max_length(self, length: u64) -> Self {
        self.set(move |n| n.max_length = Some(length))
    }

    /// Sets `contentMediaType` (e.g. `"application/json"`).
    pub fn content_media_type(self, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        self.set(move |n| n.content_media_type = Some(media_type))
    }

    /// Sets `contentEncoding` (e.g. `"base64"`).
    pub fn content_encoding(self, encoding: impl Into<String>) -> Self {
        let encoding = encoding.into();
        self.set(move |n| n.content_encoding = Some(encoding))
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_string_schema_type_tag() {
        assert_eq!(
            serde_json::to_value(StringSchema::new()).unwrap(),
            json!({"type": "string"})
        );
    }

    #[test]
    fn test_length_bounds() {
        let schema = StringSchema::new().min_length(2).max_length(8);
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "string", "minLength": 2, "maxLength": 8})
        );
    }

    #[test]
    fn test_pattern_stores_source() {
        let re = Regex::new("^some$").unwrap();
        let schema = StringSchema::new().pattern(&re);
        assert_eq!(schema.node().pattern.as_deref(), Some("^some$"));
    }

    #[test]
    fn test_content_keywords() {
        let schema = StringSchema::new()
            .content_media_type("application/json")
            .content_encoding("base64");
        assert_eq!(
            schema.node().content_media_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(schema.node().content_encoding.as_deref(), Some("base64"));
    }

    #[test]
    fn test_later_format_wins() {
        let schema = StringSchema::new().format("date").format("date-time");
        assert_eq!(schema.node().format.as_deref(), Some("date-time"));
    }
}
