use kdl_reader::{from_str, parse, validate, Error, ReservedType, ValueLocation};
use pretty_assertions::assert_eq;

fn violations(input: &str) -> usize {
    match validate(&parse(input).unwrap()) {
        Ok(()) => 0,
        Err(errors) => errors.len(),
    }
}

#[test]
fn test_integer_boundaries() {
    assert_eq!(violations("n (u8)255"), 0);
    assert_eq!(violations("n (u8)256"), 1);
    assert_eq!(violations("n (i8)-128 (i8)127"), 0);
    assert_eq!(violations("n (i8)128"), 1);
    assert_eq!(violations("n (i8)-129"), 1);
    assert_eq!(violations("n (u32)4294967295"), 0);
    assert_eq!(violations("n (u32)4294967296"), 1);
    assert_eq!(violations("n (i64)-9223372036854775808"), 0);
    assert_eq!(violations("n (u64)18446744073709551616"), 1);
}

#[test]
fn test_integer_radixes() {
    assert_eq!(violations("n (u8)0xff (u8)0o377 (u8)0b1111_1111"), 0);
    assert_eq!(violations("n (u8)0x100"), 1);
    assert_eq!(violations("n (i16)-0x8000"), 0);
}

#[test]
fn test_overflow_becomes_validation_error() {
    let err = from_str("n (u8)256").unwrap_err();
    let errors = err.validation_errors().unwrap();
    let first = errors.iter().next().unwrap();
    assert_eq!(first.reserved(), ReservedType::U8);
    assert!(first.message().contains("256"));
    assert_eq!(first.value().value().as_i64(), Some(256));
}

#[test]
fn test_wrong_category_names_the_found_type() {
    let doc = parse("n (u16)\"80\" (uuid)42 (f64)#null").unwrap();
    let errors = validate(&doc).unwrap_err();
    let messages: Vec<_> = errors.iter().map(|e| e.message().to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "u16 expects a number, found string",
            "uuid expects a string, found number",
            "f64 expects a number, found null",
        ]
    );
}

#[test]
fn test_all_violations_are_collected() {
    let input = r#"
server (ipv4)"300.1.1.1" {
    listen port=(u16)70000
    started (date-time)"not a time"
    nested {
        id (uuid)"xyz"
    }
}
ok (u8)1
"#;
    let errors = validate(&parse(input).unwrap()).unwrap_err();
    assert_eq!(errors.len(), 4);
    let locations: Vec<String> = errors.iter().map(|e| e.location().to_string()).collect();
    assert_eq!(
        locations,
        vec![
            "server[0] argument 0",
            "server[0]/listen[0] property `port`",
            "server[0]/started[1] argument 0",
            "server[0]/nested[2]/id[0] argument 0",
        ]
    );
}

#[test]
fn test_unknown_and_missing_annotations_pass() {
    assert_eq!(violations("n (color)\"blue\" (U8)999 999 (\"u8\")\"x\""), 1);
    assert_eq!(violations("n (semver)\"1.0\" plain=\"x\""), 0);
}

#[test]
fn test_node_annotations_are_not_values() {
    assert_eq!(violations("(u8)node 1"), 0);
}

#[test]
fn test_slashdashed_values_are_not_checked() {
    assert_eq!(violations("n /-(u8)999 /-bad=(ipv6)\"x\""), 0);
}

#[test]
fn test_string_rules() {
    assert_eq!(violations("n (date)\"2024-12-31\" (time)\"13:45:00Z\" (date-time)\"2024-12-31T13:45:00+01:00\""), 0);
    assert_eq!(violations("n (date)\"31/12/2024\""), 1);
    assert_eq!(violations("n (ipv6)\"fe80::1\" (ipv4)\"127.0.0.1\""), 0);
    assert_eq!(violations("n (url)\"https://kdl.dev/play\" (url)\"mailto:a@b.c\""), 0);
    assert_eq!(violations("n (url)\"not a url\""), 1);
    assert_eq!(violations("n (base64)\"SGVsbG8sIFdvcmxkIQ==\" (base64)\"@@\""), 1);
    assert_eq!(violations("n (regex)r#\"^[a-z]+\\d*$\"# (regex)\"[\""), 1);
}

#[test]
fn test_decimals() {
    assert_eq!(violations("n (decimal64)12.345 (decimal128)1e10 (decimal64)-0"), 0);
    assert_eq!(violations("n (decimal64)#nan (decimal128)\"1.5\""), 2);
}

#[test]
fn test_pass_through_names() {
    assert_eq!(
        violations("n (decimal)\"x\" (currency)1 (country-2)\"ZZZ\" (country-3)#null (duration)\"P1D\""),
        0
    );
}

#[test]
fn test_error_display() {
    let err = from_str("a (u8)300\nb (i8)-200").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let text = err.to_string();
    assert!(text.contains("2 reserved type violation(s)"));
    assert!(text.contains("a[0] argument 0"));
    assert!(text.contains("b[1] argument 0"));
}

#[test]
fn test_location_fields() {
    let errors = validate(&parse("a {\n  b k=(u8)-1\n}").unwrap()).unwrap_err();
    let location: &ValueLocation = errors.iter().next().unwrap().location();
    assert_eq!(location.path.len(), 2);
    assert_eq!(location.path[1].name, "b");
    assert_eq!(location.path[1].index, 0);
}

#[test]
fn test_extreme_decimal_exponent_is_a_violation() {
    let err = from_str("n (decimal64)1e-9223372036854775808 (decimal128)1e9223372036854775807")
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 2);
    let reserved: Vec<_> = errors.iter().map(|e| e.reserved()).collect();
    assert_eq!(reserved, vec![ReservedType::Decimal64, ReservedType::Decimal128]);
    assert_eq!(violations("n (f64)1e-9223372036854775808"), 0);
}
