use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of coerced arguments kept inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Coerced placeholder values, in template order.
pub type Args = SmallVec<[Value; MAX_INLINE_PARAMS]>;

// Optional sign, digits with optional fraction (or a bare fraction), optional exponent.
static FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("float literal regex is valid")
});

/// Failure to turn a raw segment into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The raw text is not a valid literal of the declared type.
    #[error("{raw:?} is not a valid {type_name}: {reason}")]
    Invalid {
        type_name: String,
        raw: String,
        reason: String,
    },
    /// No coercer is registered under this name.
    #[error("no coercer registered for type {0:?}")]
    UnknownType(String),
    /// A coerced value did not have the shape the handler asked for.
    #[error("expected a {expected} value, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: String,
    },
    /// A literal segment did not match the request.
    #[error("literal segment {expected:?} does not match {found:?}")]
    LiteralMismatch { expected: String, found: String },
    /// Wrong number of segments or arguments.
    #[error("expected {expected} values, found {found}")]
    Arity { expected: usize, found: usize },
}

impl CoercionError {
    /// Build an [`CoercionError::Invalid`] from any displayable reason.
    pub fn invalid(type_name: &str, raw: &str, reason: impl fmt::Display) -> Self {
        CoercionError::Invalid {
            type_name: type_name.to_string(),
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A typed path parameter.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Integer(i32),
    Long(i64),
    Short(i16),
    Byte(i8),
    Double(f64),
    Float(f32),
    Boolean(bool),
    Character(char),
    /// Produced by user-registered coercers.
    Custom {
        type_name: Arc<str>,
        value: Arc<dyn Any + Send + Sync>,
    },
}

impl Value {
    /// Name of the kind of value, for error messages.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Value::Text(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Long(_) => "Long",
            Value::Short(_) => "Short",
            Value::Byte(_) => "Byte",
            Value::Double(_) => "Double",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Boolean",
            Value::Character(_) => "Character",
            Value::Custom { type_name, .. } => type_name.as_ref(),
        }
    }

    /// Wrap an arbitrary value produced by a custom coercer.
    pub fn custom<T: Any + Send + Sync>(type_name: &str, value: T) -> Self {
        Value::Custom {
            type_name: Arc::from(type_name),
            value: Arc::new(value),
        }
    }

    /// Borrow the payload of a [`Value::Custom`] as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom { value, .. } => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (
                Value::Custom {
                    type_name: ta,
                    value: va,
                },
                Value::Custom {
                    type_name: tb,
                    value: vb,
                },
            ) => ta == tb && Arc::ptr_eq(va, vb),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(v) => f.write_str(v),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Double(v) => write_decimal(f, *v),
            Value::Float(v) => write_decimal(f, f64::from(*v)),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Character(v) => write!(f, "{v}"),
            Value::Custom { type_name, .. } => write!(f, "<{type_name}>"),
        }
    }
}

// Whole floats keep one fractional digit so `4.0` never renders as `4`.
fn write_decimal(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v}")
    }
}

/// Signature of a coercion function.
pub type CoerceFn = dyn Fn(&str) -> Result<Value, CoercionError> + Send + Sync;

/// A named coercion function, resolved once at registration time.
#[derive(Clone)]
pub struct Coercer {
    name: Arc<str>,
    parse: Arc<CoerceFn>,
}

impl Coercer {
    pub fn new<F>(name: &str, parse: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            parse: Arc::new(parse),
        }
    }

    /// Type name this coercer was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert `raw` into a typed value.
    pub fn coerce(&self, raw: &str) -> Result<Value, CoercionError> {
        (self.parse)(raw)
    }

    /// `true` when `raw` is a valid literal of this type.
    #[must_use]
    pub fn accepts(&self, raw: &str) -> bool {
        self.coerce(raw).is_ok()
    }
}

impl fmt::Debug for Coercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coercer").field("name", &self.name).finish()
    }
}

/// Open registry of coercers keyed by case-sensitive type name.
///
/// [`CoercerRegistry::default`] carries the built-in types; [`CoercerRegistry::new`]
/// starts empty.
#[derive(Clone, Debug)]
pub struct CoercerRegistry {
    coercers: HashMap<Arc<str>, Coercer>,
}

impl Default for CoercerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl CoercerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coercers: HashMap::new(),
        }
    }

    /// A registry holding every built-in type.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("String", |raw| Ok(Value::Text(raw.to_string())));
        registry.register("Integer", |raw| {
            parse_integer::<i32>("Integer", raw).map(Value::Integer)
        });
        registry.register("Long", |raw| parse_integer::<i64>("Long", raw).map(Value::Long));
        registry.register("Short", |raw| {
            parse_integer::<i16>("Short", raw).map(Value::Short)
        });
        registry.register("Byte", |raw| parse_integer::<i8>("Byte", raw).map(Value::Byte));
        registry.register("Double", |raw| {
            parse_decimal::<f64>("Double", raw)
                .and_then(|v| finite("Double", raw, v, v.is_finite()))
                .map(Value::Double)
        });
        registry.register("Float", |raw| {
            parse_decimal::<f32>("Float", raw)
                .and_then(|v| finite("Float", raw, v, v.is_finite()))
                .map(Value::Float)
        });
        registry.register("Boolean", |raw| {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Boolean(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Boolean(false))
            } else {
                Err(CoercionError::invalid("Boolean", raw, "expected true or false"))
            }
        });
        registry.register("Character", |raw| {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Character(c)),
                _ => Err(CoercionError::invalid(
                    "Character",
                    raw,
                    "expected exactly one character",
                )),
            }
        });
        registry
    }

    /// Register (or replace) the coercer for `name`, returning the previous one.
    pub fn register<F>(&mut self, name: &str, parse: F) -> Option<Coercer>
    where
        F: Fn(&str) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        self.coercers
            .insert(Arc::from(name), Coercer::new(name, parse))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Coercer> {
        self.coercers.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.coercers.contains_key(name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.coercers.keys().map(|k| k.as_ref()).collect();
        names.sort_unstable();
        names
    }

    /// Coerce `raw` with the coercer registered under `name`.
    pub fn coerce(&self, name: &str, raw: &str) -> Result<Value, CoercionError> {
        self.get(name)
            .ok_or_else(|| CoercionError::UnknownType(name.to_string()))?
            .coerce(raw)
    }
}

fn parse_integer<T>(type_name: &str, raw: &str) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| CoercionError::invalid(type_name, raw, e))
}

fn parse_decimal<T>(type_name: &str, raw: &str) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if !FLOAT_LITERAL.is_match(raw) {
        return Err(CoercionError::invalid(
            type_name,
            raw,
            "not a decimal literal",
        ));
    }
    raw.parse::<T>()
        .map_err(|e| CoercionError::invalid(type_name, raw, e))
}

fn finite<T>(type_name: &str, raw: &str, v: T, is_finite: bool) -> Result<T, CoercionError> {
    if is_finite {
        Ok(v)
    } else {
        Err(CoercionError::invalid(type_name, raw, "value out of range"))
    }
}

/// A Rust type that can be extracted from one coerced [`Value`].
///
/// `TYPE_NAME` is the placeholder name a template must use for this parameter.
pub trait FromParam: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: Value) -> Result<Self, CoercionError>;
}

macro_rules! impl_from_param {
    ($ty:ty, $name:literal, $variant:ident) => {
        impl FromParam for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_value(value: Value) -> Result<Self, CoercionError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(CoercionError::UnexpectedValue {
                        expected: $name,
                        found: other.kind().to_string(),
                    }),
                }
            }
        }
    };
}

impl_from_param!(String, "String", Text);
impl_from_param!(i32, "Integer", Integer);
impl_from_param!(i64, "Long", Long);
impl_from_param!(i16, "Short", Short);
impl_from_param!(i8, "Byte", Byte);
impl_from_param!(f64, "Double", Double);
impl_from_param!(f32, "Float", Float);
impl_from_param!(bool, "Boolean", Boolean);
impl_from_param!(char, "Character", Character);

/// The full parameter list of a typed handler.
///
/// Implemented for `()` and tuples of up to six [`FromParam`] types. The
/// declared type names drive registration-time validation; `from_args`
/// runs per request.
pub trait FromParams: Sized {
    fn type_names() -> Vec<&'static str>;

    fn from_args(args: Args) -> Result<Self, CoercionError>;
}

impl FromParams for () {
    fn type_names() -> Vec<&'static str> {
        Vec::new()
    }

    fn from_args(args: Args) -> Result<Self, CoercionError> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(CoercionError::Arity {
                expected: 0,
                found: args.len(),
            })
        }
    }
}

macro_rules! impl_from_params {
    ($count:literal; $($ty:ident),+) => {
        impl<$($ty: FromParam),+> FromParams for ($($ty,)+) {
            fn type_names() -> Vec<&'static str> {
                vec![$(<$ty as FromParam>::TYPE_NAME),+]
            }

            fn from_args(args: Args) -> Result<Self, CoercionError> {
                let found = args.len();
                if found != $count {
                    return Err(CoercionError::Arity { expected: $count, found });
                }
                let mut values = args.into_iter();
                Ok(($(
                    <$ty as FromParam>::from_value(
                        values
                            .next()
                            .ok_or(CoercionError::Arity { expected: $count, found })?,
                    )?,
                )+))
            }
        }
    };
}

impl_from_params!(1; A);
impl_from_params!(2; A, B);
impl_from_params!(3; A, B, C);
impl_from_params!(4; A, B, C, D);
impl_from_params!(5; A, B, C, D, E);
impl_from_params!(6; A, B, C, D, E, F);
