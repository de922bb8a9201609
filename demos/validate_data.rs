//! Validation example.
//!
//! Wires an isolated predicate registry into the engine adapter and
//! validates data against a document that mixes declarative keywords with
//! a predicate-based check.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p fluent-schema-demos --example validate_data
//! ```

use fluent_schema_core::{EngineError, SchemaFactory, ValidationEngine, ValidatorRegistry};
use serde_json::json;

fn main() {
    let registry = ValidatorRegistry::new();
    let factory = SchemaFactory::with_registry(registry.clone());
    let engine = ValidationEngine::new(registry);

    // "port is not reserved" is not expressible declaratively
    let port = factory
        .custom(|value, _| value.as_u64().is_some_and(|p| p >= 1024))
        .erase();

    let schema = factory.shape(
        [
            ("host", factory.string().min_length(1).erase()),
            ("port", port),
            ("tls", factory.boolean().optional().erase()),
        ],
        false,
    );

    for data in [
        json!({"host": "localhost", "port": 8080}),
        json!({"host": "localhost", "port": 80}),
        json!({"port": 8080}),
    ] {
        match engine.check(schema.node(), &data) {
            Ok(()) => println!("ok      {data}"),
            Err(EngineError::ValidationFailed { details, .. }) => {
                println!("invalid {data}");
                for violation in details {
                    println!("        {violation}");
                }
            }
            Err(other) => println!("error   {other}"),
        }
    }
}
