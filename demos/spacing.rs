//! Indentation directives, passed through verbatim to the underlying
//! serde_json formatter.
//!
//! Run with: `cargo run --example spacing`

use safe_json::{to_string_with, value, Spacing, Value};

fn main() -> safe_json::Result<()> {
    let data = value!({
        "name": "widget",
        "sizes": [1, 2, 3]
    });

    let identity = |_: &str, v: Value, _: usize| Some(v);

    println!("compact:\n{}\n", to_string_with(&data, identity, Spacing::None)?);
    println!("two spaces:\n{}\n", to_string_with(&data, identity, Spacing::from(2))?);
    println!("tabs:\n{}\n", to_string_with(&data, identity, Spacing::from("\t"))?);

    // Widths above 10 are clamped, as JSON.stringify does.
    println!("clamped:\n{}", to_string_with(&data, identity, Spacing::Spaces(40))?);

    Ok(())
}
