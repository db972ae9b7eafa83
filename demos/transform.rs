//! Per-node transforms: rewriting values, omitting members, and giving
//! the cycle sentinel a custom face.
//!
//! Run with: `cargo run --example transform`

use safe_json::{to_string_with, value, Spacing, Value, CIRCULAR};

fn main() -> safe_json::Result<()> {
    let user = value!({
        "name": "Alice",
        "password": "hunter2",
        "visits": 3
    });
    user.insert("self", user.clone());

    // Redact one field, drop another, and rename the cycle marker.
    let out = to_string_with(
        &user,
        |key, value, depth| {
            if key == "password" {
                return None; // omitted from the output entirely
            }
            if value.as_str() == Some(CIRCULAR) {
                return Some(Value::from("<points back here>"));
            }
            println!("visiting {:?} at depth {}", key, depth);
            Some(value)
        },
        Spacing::None,
    )?;

    println!("{}", out);
    Ok(())
}
