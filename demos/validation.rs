//! Reserved type annotations and how violations are reported.
//!
//! Run with: cargo run --example validation

use kdl_reader::{from_str, parse, validate, Error};
use std::error::Error as StdError;

const INPUT: &str = r#"
service "billing" id=(uuid)"6f1c1f0e-7f4e-4b53-9c39-3b8c2f7a9d11" {
    listen (ipv4)"10.0.0.300" port=(u16)70000
    started (date-time)"2024-02-30T10:00:00Z"
    pattern (regex)"^[a-z+$"
    retries (u8)3
}
"#;

fn main() -> Result<(), Box<dyn StdError>> {
    // parse checks grammar only
    let doc = parse(INPUT)?;
    println!("parsed {} top-level node(s)", doc.len());

    // validate reports every violation at once
    if let Err(errors) = validate(&doc) {
        println!("{} violation(s):", errors.len());
        for error in &errors {
            println!("  [{}] {}: {}", error.reserved(), error.location(), error.message());
        }
    }

    // from_str parses and validates in one step
    match from_str(INPUT) {
        Ok(_) => println!("unexpectedly valid"),
        Err(Error::Validation(errors)) => println!("\nfrom_str rejected it:\n{}", errors),
        Err(other) => println!("other error: {}", other),
    }

    // grammar errors carry a position
    if let Err(err) = parse("node key = 1") {
        println!("\n{} (offset {:?})", err, err.offset());
    }
    Ok(())
}
