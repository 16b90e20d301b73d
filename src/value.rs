// ABOUTME: Dynamic CBOR value type and its insertion-ordered map.
// ABOUTME: Similar to serde_json::Value but keyed by arbitrary values, with raw-byte strings.

use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Convert text-string bytes to a `&str` if they are valid UTF-8.
/// Uses simdutf8 for SIMD-accelerated validation when the feature is enabled.
#[cfg(feature = "simd-utf8")]
#[inline]
fn text_as_utf8(bytes: &[u8]) -> Option<&str> {
    simdutf8::basic::from_utf8(bytes).ok()
}

#[cfg(not(feature = "simd-utf8"))]
#[inline]
fn text_as_utf8(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}

/// A decoded value.
///
/// Text strings are carried as raw bytes: the decoder performs no UTF-8
/// validation, so `Text` and `Bytes` hold the same kind of data and differ only
/// in the major type they were decoded from. [`Value::as_str`] is the explicit
/// conversion point for callers that want validated text.
///
/// There is no floating-point variant; float headers fail decoding instead.
/// That keeps equality and hashing total across every variant, which is what
/// allows arbitrary values (including arrays and maps) to serve as map keys.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// null or undefined (simple values 22 and 23)
    #[default]
    Null,
    /// A boolean (simple values 20 and 21)
    Bool(bool),
    /// A signed 64-bit integer
    Int(i64),
    /// An unsigned integer above `i64::MAX`
    UInt(u64),
    /// A byte string
    Bytes(Vec<u8>),
    /// A text string, kept as raw bytes
    Text(Vec<u8>),
    /// An array of values, in decode order
    Array(Vec<Value>),
    /// A map from values to values
    Map(Map),
    /// A tagged value: the tag number and the single value it wraps
    Tagged(u64, Box<Value>),
    /// An extended simple value (the code following marker 24)
    Simple(u8),
}

impl Value {
    /// Returns true if this value is null.
    #[must_use] pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is a boolean.
    #[must_use] pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this value is an integer of either sign.
    #[must_use] pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_))
    }

    /// Returns true if this value is a byte string.
    #[must_use] pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Returns true if this value is a text string.
    #[must_use] pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns true if this value is an array.
    #[must_use] pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is a map.
    #[must_use] pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns true if this value is a tagged value.
    #[must_use] pub fn is_tagged(&self) -> bool {
        matches!(self, Value::Tagged(..))
    }

    /// If this is a boolean, returns the value.
    #[must_use] pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If this is an integer representable as i64, returns it.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // try_from check ensures no wrap
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) if i64::try_from(*n).is_ok() => Some(*n as i64),
            _ => None,
        }
    }

    /// If this is a non-negative integer, returns it as u64.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // >= 0 checked before cast
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            Value::Int(n) if *n >= 0 => Some(*n as u64),
            _ => None,
        }
    }

    /// If this is a byte string, returns its bytes.
    #[must_use] pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// If this is a text string, returns its raw (unvalidated) bytes.
    #[must_use] pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    /// If this is a text string holding valid UTF-8, returns it as a `&str`.
    ///
    /// The decoder never validates text, so this is where the check happens.
    #[must_use] pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) => text_as_utf8(t),
            _ => None,
        }
    }

    /// If this is an array, returns a reference to it.
    #[must_use] pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// If this is an array, returns a mutable reference to it.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// If this is a map, returns a reference to it.
    #[must_use] pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// If this is a map, returns a mutable reference to it.
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// If this is a tagged value, returns the tag number and the inner value.
    #[must_use] pub fn as_tagged(&self) -> Option<(u64, &Value)> {
        match self {
            Value::Tagged(tag, inner) => Some((*tag, inner)),
            _ => None,
        }
    }

    /// If this is an extended simple value, returns its code.
    #[must_use] pub fn as_simple(&self) -> Option<u8> {
        match self {
            Value::Simple(code) => Some(*code),
            _ => None,
        }
    }

    /// Index into an array. Returns None if not an array or index out of bounds.
    #[must_use] pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// Index into a map by text key. Returns None if not a map or key not found.
    #[must_use] pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(&Value::from(key)))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::UInt(n) => write!(f, "UInt({n})"),
            Value::Bytes(b) => write!(f, "Bytes({b:02x?})"),
            Value::Text(t) => match text_as_utf8(t) {
                Some(s) => write!(f, "Text({s:?})"),
                None => write!(f, "Text({t:02x?})"),
            },
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Tagged(tag, inner) => f.debug_tuple("Tagged").field(tag).field(inner).finish(),
            Value::Simple(code) => write!(f, "Simple({code})"),
        }
    }
}

// Display uses diagnostic notation: h'..' for bytes, tag(value) for tags.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Bytes(b) => write_hex_string(f, b),
            Value::Text(t) => match text_as_utf8(t) {
                Some(s) => write!(f, "\"{}\"", s.escape_default()),
                None => write_hex_string(f, t),
            },
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => write!(f, "{m}"),
            Value::Tagged(tag, inner) => write!(f, "{tag}({inner})"),
            Value::Simple(code) => write!(f, "simple({code})"),
        }
    }
}

fn write_hex_string(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "h'")?;
    for byte in bytes {
        write!(f, "{byte:02x}")?;
    }
    write!(f, "'")
}

/// An insertion-ordered map from [`Value`] to [`Value`].
///
/// Entries keep decode order. Inserting a key that is already present
/// overwrites the value and keeps the key's original position, so when the
/// same key is encoded twice the later value wins. Key uniqueness is not
/// otherwise enforced or diagnosed.
///
/// Equality and hashing are order-sensitive: two maps are equal only if they
/// hold the same entries in the same order. This keeps `Eq` and `Hash`
/// consistent with each other, which matters because maps can themselves be
/// keys of other maps.
#[derive(Clone, Default)]
pub struct Map {
    entries: IndexMap<Value, Value>,
}

impl Map {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create an empty map with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value for a key.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up the value for a key, mutably.
    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, returning the previous value for the key if any.
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.entries.keys()
    }

    /// Iterate values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Value, Value> {
        self.entries.values()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for Map {}

impl Hash for Map {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for (key, value) in self.iter() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Map {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(Value, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Value, Value)> for Map {
    fn extend<I: IntoIterator<Item = (Value, Value)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int(i64::from(n))
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

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u64> for Value {
    #[allow(clippy::cast_possible_wrap)] // try_from check ensures no wrap
    fn from(n: u64) -> Self {
        if i64::try_from(n).is_ok() {
            Value::Int(n as i64)
        } else {
            Value::UInt(n)
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

/// Macro for creating values easily.
///
/// Map keys can be any value expression, not just strings.
///
/// # Examples
///
/// ```rust
/// use cbor_dyn::cbor;
///
/// let value = cbor!({
///     "name": "test",
///     "sizes": [1, 2, 3],
///     "active": true
/// });
/// assert_eq!(value.get_key("name").and_then(|v| v.as_str()), Some("test"));
/// ```
#[macro_export]
macro_rules! cbor {
    // null
    (null) => {
        $crate::Value::Null
    };

    // bool
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };

    // array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![ $( $crate::cbor!($elem) ),* ])
    };

    // map
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            let mut map = $crate::Map::new();
            $(
                map.insert($crate::cbor!($key), $crate::cbor!($value));
            )*
            $crate::Value::Map(map)
        }
    };

    // other expressions (numbers, strings, etc.)
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
