use super::{CoercerRegistry, CoercionError, FromParams, Value};
use smallvec::smallvec;

fn builtins() -> CoercerRegistry {
    CoercerRegistry::default()
}

#[test]
fn test_integer_accepts_signed_decimal() {
    let registry = builtins();
    assert_eq!(registry.coerce("Integer", "42").unwrap(), Value::Integer(42));
    assert_eq!(registry.coerce("Integer", "-7").unwrap(), Value::Integer(-7));
}

#[test]
fn test_integer_rejects_fraction_text_and_overflow() {
    let registry = builtins();
    for raw in ["4.2", "abc", "3.5", "2147483648", ""] {
        assert!(
            matches!(
                registry.coerce("Integer", raw),
                Err(CoercionError::Invalid { .. })
            ),
            "{raw:?} should not coerce to Integer"
        );
    }
    assert_eq!(
        registry.coerce("Long", "2147483648").unwrap(),
        Value::Long(2_147_483_648)
    );
}

#[test]
fn test_double_accepts_decimal_and_exponent() {
    let registry = builtins();
    let pi_ish: f64 = "3.14".parse().unwrap();
    assert_eq!(registry.coerce("Double", "3.14").unwrap(), Value::Double(pi_ish));
    assert_eq!(registry.coerce("Double", "-0.5").unwrap(), Value::Double(-0.5));
    assert_eq!(registry.coerce("Double", "2e3").unwrap(), Value::Double(2000.0));
    assert_eq!(registry.coerce("Double", "4").unwrap(), Value::Double(4.0));
    assert_eq!(registry.coerce("Double", ".5").unwrap(), Value::Double(0.5));
}

#[test]
fn test_double_rejects_words_and_locale_separators() {
    let registry = builtins();
    for raw in ["abc", "NaN", "inf", "Infinity", "3,5", "1e400", "0x10"] {
        assert!(
            registry.coerce("Double", raw).is_err(),
            "{raw:?} should not coerce to Double"
        );
    }
}

#[test]
fn test_boolean_and_character() {
    let registry = builtins();
    assert_eq!(registry.coerce("Boolean", "TRUE").unwrap(), Value::Boolean(true));
    assert_eq!(registry.coerce("Boolean", "false").unwrap(), Value::Boolean(false));
    assert!(registry.coerce("Boolean", "yes").is_err());
    assert_eq!(registry.coerce("Character", "x").unwrap(), Value::Character('x'));
    assert!(registry.coerce("Character", "xy").is_err());
}

#[test]
fn test_type_names_are_case_sensitive() {
    let registry = builtins();
    assert_eq!(
        registry.coerce("integer", "1"),
        Err(CoercionError::UnknownType("integer".to_string()))
    );
}

#[test]
fn test_register_custom_type() {
    let mut registry = CoercerRegistry::new();
    assert!(registry.names().is_empty());
    registry.register("Even", |raw| {
        let n: u32 = raw
            .parse()
            .map_err(|e| CoercionError::invalid("Even", raw, e))?;
        if n % 2 == 0 {
            Ok(Value::custom("Even", n))
        } else {
            Err(CoercionError::invalid("Even", raw, "odd"))
        }
    });
    let value = registry.coerce("Even", "8").unwrap();
    assert_eq!(value.kind(), "Even");
    assert_eq!(value.downcast_ref::<u32>(), Some(&8));
    assert!(registry.coerce("Even", "7").is_err());
    assert_eq!(registry.names(), vec!["Even"]);
}

#[test]
fn test_double_display_keeps_fraction() {
    assert_eq!(Value::Double(4.0).to_string(), "4.0");
    assert_eq!(Value::Double(7.5).to_string(), "7.5");
    assert_eq!(Value::Float(-2.0).to_string(), "-2.0");
    assert_eq!(Value::Double(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Value::Integer(7).to_string(), "7");
}

#[test]
fn test_from_params_tuple_extraction() {
    let (a, b) =
        <(i32, f64)>::from_args(smallvec![Value::Integer(3), Value::Double(0.5)]).unwrap();
    assert_eq!(a, 3);
    assert_eq!(b, 0.5);
    assert_eq!(<(i32, f64)>::type_names(), vec!["Integer", "Double"]);
    assert!(<()>::type_names().is_empty());
}

#[test]
fn test_from_params_rejects_wrong_shape() {
    let err = <(i32,)>::from_args(smallvec![Value::Text("x".into())]).unwrap_err();
    assert_eq!(
        err,
        CoercionError::UnexpectedValue {
            expected: "Integer",
            found: "String".to_string()
        }
    );
    let err = <(i32, i32)>::from_args(smallvec![Value::Integer(1)]).unwrap_err();
    assert_eq!(err, CoercionError::Arity { expected: 2, found: 1 });
}
