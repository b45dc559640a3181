//! The tagged JSON value tree.
//!
//! A [`Value`] is a closed enum over the seven JSON kinds. Containers own their
//! children outright: cloning a value deep-copies the subtree, and
//! [`Value::take`] moves a subtree out and leaves `Null` behind.
//!
//! Objects are stored in a `BTreeMap`, so iteration and serialization order is
//! lexicographic by key rather than insertion order.
//!
//! # Promotion
//!
//! A `Null` value silently becomes a container when it is used as one:
//! [`Value::push_back`] / [`Value::push_front`] turn it into a one-element
//! array and [`Value::entry`] turns it into an object. Any other kind must be
//! [`Value::clear`]ed before it can be redefined as a container.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{JsonError, Result};

/// Ordered key → value mapping used by [`Value::Object`].
pub type Map = BTreeMap<String, Value>;

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON document value. Integers and floating point numbers are distinct
/// kinds and never compare equal to each other.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in lexicographic key order.
    Object(Map),
}

static NULL: Value = Value::Null;

const REDEFINE_HINT: &str =
    "an array or null (call clear() before redefining this value as another kind)";

impl Value {
    /// Build the empty value of the given kind: `false`, `0`, `0.0`, `""`,
    /// `[]` or `{}`.
    pub fn with_kind(kind: Kind) -> Value {
        match kind {
            Kind::Null => Value::Null,
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::Double => Value::Double(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Array => Value::Array(Vec::new()),
            Kind::Object => Value::Object(Map::new()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // ------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------

    pub fn get_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch("Value::get_bool", "bool")),
        }
    }

    pub fn get_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.mismatch("Value::get_int", "int")),
        }
    }

    pub fn get_double(&self) -> Result<f64> {
        match self {
            Value::Double(f) => Ok(*f),
            other => Err(other.mismatch("Value::get_double", "double")),
        }
    }

    /// Returns a copy of the string payload.
    pub fn get_string(&self) -> Result<String> {
        self.as_str().map(str::to_owned)
    }

    /// Returns a deep copy of the array payload.
    pub fn get_array(&self) -> Result<Vec<Value>> {
        self.as_array().map(<[Value]>::to_vec)
    }

    /// Returns a deep copy of the object payload.
    pub fn get_object(&self) -> Result<Map> {
        self.as_object().cloned()
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch("Value::get_string", "string")),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("Value::get_array", "array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("Value::get_array", "array")),
        }
    }

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch("Value::get_object", "object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch("Value::get_object", "object")),
        }
    }

    // ------------------------------------------------------------------
    // Size and lifetime
    // ------------------------------------------------------------------

    /// Number of elements (array) or entries (object). `Null` has no size.
    pub fn size(&self) -> Result<usize> {
        match self {
            Value::Array(items) => Ok(items.len()),
            Value::Object(map) => Ok(map.len()),
            other => Err(other.mismatch("Value::size", "array or object")),
        }
    }

    /// `Null` is always empty; containers are empty when they hold nothing.
    pub fn empty(&self) -> Result<bool> {
        match self {
            Value::Null => Ok(true),
            Value::Array(items) => Ok(items.is_empty()),
            Value::Object(map) => Ok(map.is_empty()),
            other => Err(other.mismatch("Value::empty", "null, array or object")),
        }
    }

    /// Drop any owned children and reset to `Null`.
    pub fn clear(&mut self) {
        *self = Value::Null;
    }

    /// Move the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Move-assign from `other`: the current content is released, `other`'s
    /// subtree is moved in, and `other` is left `Null`.
    pub fn assign_from(&mut self, other: &mut Value) {
        *self = other.take();
    }

    // ------------------------------------------------------------------
    // Indexed and keyed access
    // ------------------------------------------------------------------

    /// Mutable reference to the array element at `index`. Never extends the
    /// array.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value> {
        match self {
            Value::Array(items) => {
                let len = items.len();
                items.get_mut(index).ok_or(JsonError::OutOfRange {
                    op: "Value::at_mut",
                    index,
                    len,
                })
            }
            other => Err(other.mismatch("Value::at_mut", "array")),
        }
    }

    /// Mutable reference to the entry under `key`, inserting `Null` first when
    /// the key is absent. A `Null` value is promoted to an empty object.
    pub fn entry(&mut self, key: &str) -> Result<&mut Value> {
        if self.is_null() {
            *self = Value::Object(Map::new());
        }
        match self {
            Value::Object(map) => Ok(map.entry(key.to_owned()).or_default()),
            other => Err(other.mismatch("Value::entry", "object or null")),
        }
    }

    /// Shared lookup by key. Returns `None` for an absent key or a non-object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Shared lookup by position. Returns `None` out of range or off-array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn has_key(&self, key: &str) -> Result<bool> {
        match self {
            Value::Object(map) => Ok(map.contains_key(key)),
            other => Err(other.mismatch("Value::has_key", "object")),
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append to an array; a `Null` value becomes a one-element array.
    pub fn push_back(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self {
            Value::Array(items) => items.push(value),
            Value::Null => *self = Value::Array(vec![value]),
            other => return Err(other.mismatch("Value::push_back", REDEFINE_HINT)),
        }
        Ok(())
    }

    /// Prepend to an array; a `Null` value becomes a one-element array.
    pub fn push_front(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self {
            Value::Array(items) => items.insert(0, value),
            Value::Null => *self = Value::Array(vec![value]),
            other => return Err(other.mismatch("Value::push_front", REDEFINE_HINT)),
        }
        Ok(())
    }

    /// Remove the array element at `index`.
    pub fn erase_at(&mut self, index: usize) -> Result<()> {
        match self {
            Value::Array(items) if index < items.len() => {
                items.remove(index);
                Ok(())
            }
            Value::Array(items) => Err(JsonError::OutOfRange {
                op: "Value::erase",
                index,
                len: items.len(),
            }),
            other => Err(other.mismatch("Value::erase", "array")),
        }
    }

    /// Remove the object entry under `key`. An absent key is not an error.
    pub fn erase_key(&mut self, key: &str) -> Result<()> {
        match self {
            Value::Object(map) => {
                map.remove(key);
                Ok(())
            }
            other => Err(other.mismatch("Value::erase", "object")),
        }
    }

    fn mismatch(&self, op: &'static str, expected: &'static str) -> JsonError {
        JsonError::type_mismatch(op, expected, self.kind())
    }
}

// ----------------------------------------------------------------------
// Operator sugar. These panic where the fallible methods return an error,
// the same way slice indexing does.
// ----------------------------------------------------------------------

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(index).unwrap_or_else(|| {
                panic!(
                    "{}",
                    JsonError::OutOfRange {
                        op: "Value::index",
                        index,
                        len: items.len(),
                    }
                )
            }),
            other => panic!("{}", other.mismatch("Value::index", "array")),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.at_mut(index).unwrap_or_else(|err| panic!("{err}"))
    }
}

/// Absent keys (and `Null` receivers) read as `Null` without inserting.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Object(map) => map.get(key).unwrap_or(&NULL),
            Value::Null => &NULL,
            other => panic!("{}", other.mismatch("Value::index", "object or null")),
        }
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.entry(key).unwrap_or_else(|err| panic!("{err}"))
    }
}

// ----------------------------------------------------------------------
// Construction
// ----------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Kind> for Value {
    fn from(kind: Kind) -> Self {
        Value::with_kind(kind)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// ----------------------------------------------------------------------
// Narrowing conversions: exact tag only, no coercion between kinds.
// ----------------------------------------------------------------------

macro_rules! narrow {
    ($target:ty, $variant:ident, $op:literal, $expected:literal) => {
        impl TryFrom<Value> for $target {
            type Error = JsonError;

            fn try_from(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(other.mismatch($op, $expected)),
                }
            }
        }

        impl TryFrom<&Value> for $target {
            type Error = JsonError;

            fn try_from(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok(inner.clone()),
                    other => Err(other.mismatch($op, $expected)),
                }
            }
        }
    };
}

narrow!(bool, Bool, "Value -> bool", "bool");
narrow!(i64, Int, "Value -> i64", "int");
narrow!(f64, Double, "Value -> f64", "double");
narrow!(String, String, "Value -> String", "string");
narrow!(Vec<Value>, Array, "Value -> Vec<Value>", "array");
narrow!(Map, Object, "Value -> Map", "object");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn with_kind_builds_empty_payloads() {
        assert_eq!(Value::with_kind(Kind::Array), Value::Array(vec![]));
        assert_eq!(Value::with_kind(Kind::Object), Value::Object(Map::new()));
        assert_eq!(Value::with_kind(Kind::String), Value::String(String::new()));
        assert!(Value::with_kind(Kind::Null).is_null());
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::from(1).kind(), Kind::Int);
        assert_eq!(Value::from(1.5).kind(), Kind::Double);
        assert_eq!(Value::from("x").kind(), Kind::String);
        assert_eq!(Kind::Object.to_string(), "object");
    }

    #[test]
    fn entry_on_string_is_type_mismatch() {
        let mut v = Value::from("text");
        let err = v.entry("k").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(v, Value::from("text"));
    }

    #[test]
    fn push_back_error_mentions_clear() {
        let mut v = Value::from(3);
        let err = v.push_back(Value::Null).unwrap_err();
        assert!(err.to_string().contains("clear()"), "message: {err}");
    }

    #[test]
    fn index_str_reads_null_for_missing_key() {
        let v: Value = [("a", Value::from(1))].into_iter().collect();
        assert!(v["missing"].is_null());
        assert_eq!(v.size().unwrap(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_usize_panics_out_of_range() {
        let v = Value::Array(vec![Value::from(1)]);
        let _ = &v[1];
    }
}
