//! Reading a document, inspecting it and writing it back in both styles.
//!
//! Run with: cargo run --example read_and_write

use kdl_reader::{
    from_str, to_string, to_string_with_options, KdlReader, ReaderOptions, WriterOptions,
};
use std::error::Error;

const INPUT: &str = r#"
// server configuration
server "main" port=(u16)8080 {
    route "/"    handler=index
    route "/api" /- "deprecated" handler=api
    tls #true
}
limits max-body=0x10_0000 ratio=7.5e-1
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str(INPUT)?;

    for server in doc.nodes_named("server") {
        let port = server.property("port").and_then(|v| v.value().as_i64());
        let name = server.argument(0).map(|v| v.to_string()).unwrap_or_default();
        println!("server {} on port {:?}", name, port);
        for route in server.child_group("route") {
            let handler = route.property("handler").and_then(|v| v.value().as_str());
            let path = route.argument(0).map(|v| v.to_string()).unwrap_or_default();
            println!("  route {} -> {:?}", path, handler);
        }
    }

    // Canonical output drops comments and normalizes literals
    println!("\nCanonical:");
    println!("{}", to_string(&doc));

    // Verbatim output keeps literal spellings and slashdashed items
    let reader = KdlReader::with_options(ReaderOptions::new().with_preserve_slashdash(true));
    let kept = reader.read(INPUT)?;
    println!("Verbatim, 2-space indent:");
    println!("{}", to_string_with_options(&kept, &WriterOptions::verbatim().with_indent(2)));

    Ok(())
}
