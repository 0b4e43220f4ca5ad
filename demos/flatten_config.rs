//! Decoding nodes into application types and flattening a document into
//! `path -> value` pairs.
//!
//! Run with: cargo run --example flatten_config

use kdl_reader::binding::to_document;
use kdl_reader::{flatten_with_options, from_str, FlattenOptions, FromNode, Node, Result, ToNode};

#[derive(Debug)]
struct Database {
    name: String,
    url: String,
    pool: Option<u32>,
}

impl FromNode for Database {
    fn from_node(node: &Node) -> Result<Self> {
        Ok(Database {
            name: node.argument_as(0)?,
            url: node.property_as("url")?,
            pool: node.property_as("pool")?,
        })
    }
}

impl ToNode for Database {
    fn to_node(&self) -> Node {
        let mut builder = Node::builder("database")
            .argument(self.name.as_str())
            .property("url", self.url.as_str());
        if let Some(pool) = self.pool {
            builder = builder.property("pool", pool);
        }
        builder.build()
    }
}

const CONFIG: &str = r#"
app name=shop {
    logging level=info
    features "search" "cart"
}
database primary url="postgres://db1/shop" pool=16
database replica url="postgres://db2/shop"
"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let doc = from_str(CONFIG)?;

    let databases: Vec<Database> = doc.decode_group("database")?;
    for db in &databases {
        println!("{:?}", db);
    }
    println!("\nRe-encoded:\n{}", to_document(&databases));

    let flat = flatten_with_options(&doc, &FlattenOptions::new().with_separator("."));
    println!("Flattened:");
    for (key, value) in &flat {
        println!("  {} = {}", key, value);
    }
    Ok(())
}
