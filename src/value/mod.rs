mod json;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::{self, Debug, Display};
use std::ops::Range;
use std::sync::Arc;

use crate::object::BaseObject;
use crate::render::Renderer;

/// Strip the module path and generic arguments from a Rust type name
///
/// `alloc::vec::Vec<u8>` becomes `Vec`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The kind of an ordered sequence or set-like container
pub enum SeqKind {
    Bytes,
    List,
    Tuple,
    Set,
    FrozenSet,
}

impl SeqKind {
    /// Container name used in multi-line output
    pub fn name(&self) -> &'static str {
        match self {
            SeqKind::Bytes => "bytes",
            SeqKind::List => "list",
            SeqKind::Tuple => "tuple",
            SeqKind::Set => "set",
            SeqKind::FrozenSet => "frozenset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() && !self.im.is_nan() {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// An integer range with a step, the way `(start..stop).step_by(step)` reads
pub struct RangeValue {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "{}..{}", self.start, self.stop)
        } else {
            write!(f, "({}..{}).step_by({})", self.start, self.stop, self.step)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A value of a type the renderer has no specific rules for
///
/// The display and debug forms are captured when the value is created.
pub struct Opaque {
    pub type_name: &'static str,
    pub display: String,
    pub debug: String,
}

#[derive(Debug, Clone)]
/// Any value that can be rendered
///
/// Variants are listed in the order the renderer checks them. Conversions
/// exist from the common Rust types, from [`serde_json::Value`] and from any
/// [`serde::Serialize`] type (see [`Value::from_serialize`]).
///
/// # Example
/// ```rust
/// use objrepr::Value;
///
/// assert_eq!(Value::from(true).to_string(), "true");
/// assert_eq!(Value::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
/// assert_eq!(Value::from(("a", 1)).to_string(), "(\"a\", 1)");
/// ```
pub enum Value {
    Null,
    /// A reference to a type rather than an instance of it
    Type(String),
    Bool(bool),
    Int(i128),
    Float(f64),
    Complex(Complex),
    Str(String),
    /// Key/value pairs in iteration order
    Map(Vec<(Value, Value)>),
    Seq(SeqKind, Vec<Value>),
    Range(RangeValue),
    /// A function or method reference, identified by its name
    Callable(String),
    Object(Arc<dyn BaseObject>),
    Opaque(Opaque),
}

impl Value {
    /// A reference to the type `T`, rendered as its unqualified name
    pub fn type_of<T: ?Sized>() -> Value {
        Value::Type(short_type_name(std::any::type_name::<T>()).to_string())
    }

    pub fn callable(name: impl Into<String>) -> Value {
        Value::Callable(name.into())
    }

    pub fn complex(re: f64, im: f64) -> Value {
        Value::Complex(Complex { re, im })
    }

    pub fn bytes(bytes: impl AsRef<[u8]>) -> Value {
        Value::Seq(
            SeqKind::Bytes,
            bytes.as_ref().iter().map(|b| Value::Int(*b as i128)).collect(),
        )
    }

    pub fn list<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::seq(SeqKind::List, items)
    }

    pub fn tuple<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::seq(SeqKind::Tuple, items)
    }

    pub fn set<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::seq(SeqKind::Set, items)
    }

    pub fn frozenset<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::seq(SeqKind::FrozenSet, items)
    }

    pub fn seq<I, T>(kind: SeqKind, items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Seq(kind, items.into_iter().map(Into::into).collect())
    }

    /// Build a map keeping the iteration order of `entries`
    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn range(start: i64, stop: i64) -> Value {
        Value::range_step(start, stop, 1)
    }

    pub fn range_step(start: i64, stop: i64, step: i64) -> Value {
        Value::Range(RangeValue { start, stop, step })
    }

    pub fn object<O: BaseObject + 'static>(object: O) -> Value {
        Value::Object(Arc::new(object))
    }

    pub fn shared<O: BaseObject + 'static>(object: Arc<O>) -> Value {
        Value::Object(object)
    }

    /// Capture a value with no specific rendering rules
    pub fn opaque<T: Display + Debug>(value: &T) -> Value {
        Value::Opaque(Opaque {
            type_name: short_type_name(std::any::type_name::<T>()),
            display: value.to_string(),
            debug: format!("{value:?}"),
        })
    }

    /// Like [`Value::opaque`] for types that only implement [`Debug`]
    pub fn opaque_debug<T: Debug>(value: &T) -> Value {
        let debug = format!("{value:?}");
        Value::Opaque(Opaque {
            type_name: short_type_name(std::any::type_name::<T>()),
            display: debug.clone(),
            debug,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    /// The native string form of the value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Renderer::new().native(self))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(value as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Value::Complex(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::list(value)
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(value: &[T]) -> Self {
        Value::list(value.iter().cloned())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        Value::list(value)
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(value: HashSet<T, S>) -> Self {
        Value::set(value)
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(value: BTreeSet<T>) -> Self {
        Value::set(value)
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(value: HashMap<K, V, S>) -> Self {
        Value::map(value)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Value::map(value)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Seq(SeqKind::Tuple, vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::Seq(SeqKind::Tuple, vec![a.into(), b.into(), c.into()])
    }
}

impl From<Range<i64>> for Value {
    fn from(value: Range<i64>) -> Self {
        Value::range(value.start, value.end)
    }
}

impl From<RangeValue> for Value {
    fn from(value: RangeValue) -> Self {
        Value::Range(value)
    }
}

impl From<Arc<dyn BaseObject>> for Value {
    fn from(value: Arc<dyn BaseObject>) -> Self {
        Value::Object(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn it_shortens_type_names() {
        assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec");
        assert_eq!(short_type_name("objrepr::timer::Timer"), "Timer");
        assert_eq!(short_type_name("i32"), "i32");
        assert!(matches!(Value::type_of::<String>(), Value::Type(name) if name == "String"));
    }

    #[test]
    fn it_converts_scalars() {
        assert!(matches!(Value::from(()), Value::Null));
        assert!(matches!(Value::from(false), Value::Bool(false)));
        assert!(matches!(Value::from(u64::MAX), Value::Int(i) if i == u64::MAX as i128));
        assert!(matches!(Value::from(1.5f32), Value::Float(x) if x == 1.5));
        assert!(matches!(Value::from(None::<i32>), Value::Null));
        assert!(matches!(Value::from(Some("x")), Value::Str(s) if s == "x"));
    }

    #[test]
    fn it_formats_scalars_natively() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(-3).to_string(), "-3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::complex(1.0, 2.0).to_string(), "1+2i");
        assert_eq!(Value::complex(1.5, -2.0).to_string(), "1.5-2i");
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::callable("main").to_string(), "main");
    }

    #[test]
    fn it_formats_ranges_natively() {
        assert_eq!(Value::from(0..10).to_string(), "0..10");
        assert_eq!(Value::range_step(0, 10, 2).to_string(), "(0..10).step_by(2)");
    }

    #[test]
    fn it_formats_containers_natively() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), r#"["a", "b"]"#);
        assert_eq!(Value::tuple([1]).to_string(), "(1,)");
        assert_eq!(Value::from((1, "x", true)).to_string(), r#"(1, "x", true)"#);
        assert_eq!(Value::set(BTreeSet::from([2, 1])).to_string(), "{1, 2}");
        assert_eq!(Value::set(Vec::<i32>::new()).to_string(), "set()");
        assert_eq!(Value::frozenset([3]).to_string(), "frozenset({3})");
        assert_eq!(Value::bytes(b"ab\n").to_string(), r#"b"ab\n""#);
        assert_eq!(
            Value::map([("a", Value::from(1)), ("b", Value::from("x"))]).to_string(),
            r#"{"a": 1, "b": "x"}"#
        );
    }

    #[test]
    fn it_keeps_map_order() {
        let value = Value::from(BTreeMap::from([("b", 2), ("a", 1)]));
        assert_eq!(value.to_string(), r#"{"a": 1, "b": 2}"#);
    }

    #[test]
    fn it_captures_opaque_values() {
        #[derive(Debug)]
        struct Handle(u32);

        impl Display for Handle {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "handle #{}", self.0)
            }
        }

        let value = Value::opaque(&Handle(7));
        if let Value::Opaque(opaque) = &value {
            assert_eq!(opaque.type_name, "Handle");
            assert_eq!(opaque.debug, "Handle(7)");
        } else {
            panic!("expected an opaque value");
        }
        assert_eq!(value.to_string(), "handle #7");
    }
}
