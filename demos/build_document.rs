//! Document composition example.
//!
//! Builds an address-book schema with the fluent surface, derives partial
//! and projected variants, and prints each document.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p fluent-schema-demos --example build_document
//! ```

use fluent_schema_core::{
    integer, list, merge_schemas, omit_from_schema, pick_from_schema, shape, string,
};

fn main() {
    let contact = shape(
        [
            ("email", string().format("email").erase()),
            ("phone", string().min_length(7).optional().erase()),
        ],
        false,
    );

    let person = shape(
        [
            ("name", string().min_length(1).erase()),
            ("age", integer().minimum(0.0, false).optional().erase()),
            ("contact", contact.clone().erase()),
            ("tags", list(string()).optional().erase()),
        ],
        false,
    )
    .title("Person");

    println!("person schema:");
    println!("{}", serde_json::to_string_pretty(&person).unwrap());

    // partial(): every field becomes optional, recursively for
    // object-typed properties
    println!("\npartial person:");
    println!(
        "{}",
        serde_json::to_string_pretty(&person.clone().partial()).unwrap()
    );

    // projections keep every non-property keyword
    let slim = pick_from_schema(&person, &["name", "contact"]);
    println!("\npicked (name, contact):");
    println!("{}", serde_json::to_string_pretty(&slim).unwrap());

    let anonymous = omit_from_schema(&person, &["name"]);
    println!("\nomitted (name):");
    println!("{}", serde_json::to_string_pretty(&anonymous).unwrap());

    // merging: the overlay's properties win on collision
    let merged = merge_schemas(&person, &contact);
    println!("\nperson merged with contact:");
    println!("{}", serde_json::to_string_pretty(&merged).unwrap());
}
