use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kdl_reader::{from_str, parse, to_string, to_string_with_options, WriterOptions};

const SIMPLE: &str = "user name=Alice email=\"alice@example.com\" id=(u32)123 active=#true";

const NESTED: &str = r#"
package "kdl_reader" version=(semver)"0.1.0" {
    // dependencies, one per node
    dependencies {
        serde "1.0" features=derive
        indexmap "2.0"
        /- chrono "0.4"
    }
    scripts {
        build """
            cargo build --release
            strip target/release/app
            """
    }
    limits max=(u16)8080 timeout=(i64)-1 ratio=0.75 mask=0xFF_FF
}
"#;

fn products(size: u32) -> String {
    (0..size)
        .map(|i| {
            format!(
                "product sku=\"SKU{}\" name=\"Product {}\" price={} quantity=(u32){}\n",
                i,
                i,
                9.99 + f64::from(i),
                i
            )
        })
        .collect()
}

fn benchmark_parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple_node", |b| b.iter(|| parse(black_box(SIMPLE))));
}

fn benchmark_parse_nested(c: &mut Criterion) {
    c.bench_function("parse_nested_document", |b| {
        b.iter(|| parse(black_box(NESTED)))
    });
}

fn benchmark_parse_and_validate(c: &mut Criterion) {
    c.bench_function("parse_and_validate_nested", |b| {
        b.iter(|| from_str(black_box(NESTED)))
    });
}

fn benchmark_parse_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_many_nodes");

    for size in [10, 50, 100, 500].iter() {
        let text = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_write_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_many_nodes");

    for size in [10, 50, 100, 500].iter() {
        let doc = parse(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_write_styles(c: &mut Criterion) {
    let doc = parse(NESTED).unwrap();
    let mut group = c.benchmark_group("write_nested");

    group.bench_function("canonical", |b| {
        b.iter(|| to_string_with_options(black_box(&doc), &WriterOptions::canonical()))
    });
    group.bench_function("verbatim", |b| {
        b.iter(|| to_string_with_options(black_box(&doc), &WriterOptions::verbatim()))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_parse_nested,
    benchmark_parse_and_validate,
    benchmark_parse_many,
    benchmark_write_many,
    benchmark_write_styles
);
criterion_main!(benches);
