/// Builds a [`TypedValue`](crate::TypedValue) using the document's own spelling.
///
/// ```rust
/// use kdl_reader::{kdl_value, TypedValue, Value};
///
/// assert_eq!(kdl_value!(null).value(), &Value::Null);
/// assert_eq!(kdl_value!(true), TypedValue::new(true));
/// assert_eq!(kdl_value!((u8) 255), TypedValue::new(255).with_annotation("u8"));
/// assert_eq!(kdl_value!(("date-time") "2024-01-15T00:00:00Z").annotation(), Some("date-time"));
/// ```
#[macro_export]
macro_rules! kdl_value {
    (null) => {
        $crate::TypedValue::new($crate::Value::Null)
    };

    (true) => {
        $crate::TypedValue::new(true)
    };

    (false) => {
        $crate::TypedValue::new(false)
    };

    (inf) => {
        $crate::TypedValue::new($crate::Number::infinity())
    };

    (-inf) => {
        $crate::TypedValue::new($crate::Number::neg_infinity())
    };

    (nan) => {
        $crate::TypedValue::new($crate::Number::nan())
    };

    // (annotation) value
    (($ann:ident) $($rest:tt)+) => {
        $crate::TypedValue::new($crate::kdl_value!($($rest)+).into_value())
            .with_annotation(stringify!($ann))
    };

    (($ann:literal) $($rest:tt)+) => {
        $crate::TypedValue::new($crate::kdl_value!($($rest)+).into_value())
            .with_annotation($ann)
    };

    ($value:expr) => {
        $crate::TypedValue::from($value)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, TypedValue, Value};

    #[test]
    fn test_kdl_value_keywords() {
        assert_eq!(kdl_value!(null), TypedValue::new(Value::Null));
        assert_eq!(kdl_value!(false).value(), &Value::Bool(false));
        assert_eq!(kdl_value!(-inf).value(), &Value::Number(Number::neg_infinity()));
        assert_eq!(kdl_value!(nan).value().as_number().map(Number::raw), Some("#nan"));
    }

    #[test]
    fn test_kdl_value_expressions() {
        let name = String::from("Alice");
        assert_eq!(kdl_value!(name.clone()).value().as_str(), Some("Alice"));
        assert_eq!(kdl_value!(-1).value().as_i64(), Some(-1));
        assert_eq!(kdl_value!(2.5).value().as_f64(), Some(2.5));
    }

    #[test]
    fn test_kdl_value_annotations() {
        let v = kdl_value!((i8) -128);
        assert_eq!(v.annotation(), Some("i8"));
        assert_eq!(v.value().as_i64(), Some(-128));

        let nested = kdl_value!((f64) nan);
        assert_eq!(nested.annotation(), Some("f64"));

        let quoted = kdl_value!(("country-2") "NL");
        assert_eq!(quoted.annotation(), Some("country-2"));
    }
}
