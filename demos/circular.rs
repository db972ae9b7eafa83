//! Serializing graphs that contain themselves.
//!
//! Run with: `cargo run --example circular`

use safe_json::{to_string, to_string_pretty, value, Value};

fn main() -> safe_json::Result<()> {
    // A direct self-reference.
    let obj = value!({"a": 1});
    obj.insert("b", obj.clone());
    println!("self-reference: {}", to_string(&obj)?);

    // Two objects referencing each other.
    let obj1 = Value::new_object();
    let obj2 = Value::new_object();
    obj1.insert("obj2", obj2.clone());
    obj2.insert("obj1", obj1.clone());

    let root = Value::new_object();
    root.insert("obj1", obj1);
    root.insert("obj2", obj2);
    println!("mutual cycle:\n{}", to_string_pretty(&root)?);

    // Shared but non-cyclic: the same instance twice is not a cycle and
    // serializes in full at both positions.
    let shared = value!({"kind": "shared"});
    let list = Value::new_array();
    list.push(shared.clone());
    list.push(shared);
    println!("shared subgraph: {}", to_string(&list)?);

    Ok(())
}
