// ABOUTME: Lenient CBOR-style decoder producing dynamically-typed values.
// ABOUTME: Provides hex/byte entry points and serde interop for the Value type.

//! # cbor_dyn
//!
//! A lenient decoder for CBOR-style binary data, producing dynamically-typed
//! [`Value`]s.
//!
//! The decoder handles definite-length items only: integers, byte and text
//! strings, arrays, maps (with arbitrary values as keys), booleans, null,
//! tagged values, and extended simple values. Floating-point values and
//! indefinite-length (streaming) items are rejected with
//! [`ErrorKind::NotImplemented`]. There is no encoder.
//!
//! ## Quick Start
//!
//! Entry points take raw bytes, or text that is hex-decoded when it consists
//! of hex digits:
//!
//! ```rust
//! use cbor_dyn::decode;
//!
//! let value = decode("187b").unwrap();
//! assert_eq!(value.as_i64(), Some(123));
//!
//! let value = decode(&[0x82, 0x01, 0x02]).unwrap();
//! assert_eq!(value, cbor_dyn::cbor!([1, 2]));
//!
//! let value = decode("6449455446").unwrap();
//! assert_eq!(value.as_str(), Some("IETF"));
//! ```
//!
//! ## Decoding concatenated values
//!
//! [`decode_with_consumed`] reports how many bytes the value occupied, so a
//! sequence of values can be walked by slicing; a [`Decoder`] does the same
//! without slicing:
//!
//! ```rust
//! use cbor_dyn::{decode_with_consumed, Value};
//!
//! let data = [0x01, 0xf5];
//! let (value, consumed) = decode_with_consumed(&data[..]).unwrap();
//! assert_eq!(value, Value::Int(1));
//! let (value, _) = decode_with_consumed(&data[consumed..]).unwrap();
//! assert_eq!(value, Value::Bool(true));
//! ```
//!
//! ## Leniency contract
//!
//! Reads past the end of the buffer yield `0x00` bytes instead of failing:
//! truncated input decodes as if the buffer were zero-padded, and an empty
//! buffer decodes to the integer 0. Malformed input can therefore produce an
//! incorrect-but-successful result rather than an error. Trailing bytes after
//! the decoded value are ignored.
//!
//! ## Resource Limits
//!
//! Untrusted input is bounded by [`DecoderConfig`]:
//! - Maximum container/tag nesting depth: 512
//! - Maximum container element/pair count: 1,000,000
//!
//! ## Feature flags
//!
//! - `simd-utf8`: SIMD-accelerated UTF-8 checking in [`Value::as_str`]. Text
//!   strings are never validated during decoding either way.

pub mod decoder;
pub mod error;
pub mod input;
pub mod types;
pub mod value;

// Re-export commonly used items at the crate root
pub use decoder::{Decoder, DecoderConfig};
pub use error::{Error, ErrorKind, Result};
pub use input::Input;
pub use types::MajorType;
pub use value::{Map, Value};

// The cbor! macro is automatically exported at crate root via #[macro_export]

use serde::{Deserialize, Serialize};

/// Decode exactly one value starting at offset 0.
///
/// Trailing bytes after the value are ignored.
///
/// # Example
///
/// ```rust
/// use cbor_dyn::decode;
///
/// let value = decode("a16161820102").unwrap();
/// assert_eq!(value.get_key("a"), Some(&cbor_dyn::cbor!([1, 2])));
/// ```
pub fn decode<'a, I: Input<'a>>(input: I) -> Result<Value> {
    let bytes = input.into_bytes();
    Decoder::new(&bytes).decode()
}

/// Decode exactly one value with custom configuration.
pub fn decode_with_config<'a, I: Input<'a>>(input: I, config: DecoderConfig) -> Result<Value> {
    let bytes = input.into_bytes();
    Decoder::with_config(&bytes, config).decode()
}

/// Decode exactly one value, also returning the number of bytes it occupied.
///
/// The count enables decoding a sequence of concatenated values by repeated
/// invocation with sliced input; the slicing is the caller's responsibility.
///
/// # Example
///
/// ```rust
/// use cbor_dyn::{decode_with_consumed, Value};
///
/// let (value, consumed) = decode_with_consumed("187bf5").unwrap();
/// assert_eq!(value, Value::Int(123));
/// assert_eq!(consumed, 2);
/// ```
pub fn decode_with_consumed<'a, I: Input<'a>>(input: I) -> Result<(Value, usize)> {
    let bytes = input.into_bytes();
    let mut decoder = Decoder::new(&bytes);
    let value = decoder.decode()?;
    Ok((value, decoder.position()))
}

/// Decode one value and its byte count, with custom configuration.
pub fn decode_with_consumed_and_config<'a, I: Input<'a>>(
    input: I,
    config: DecoderConfig,
) -> Result<(Value, usize)> {
    let bytes = input.into_bytes();
    let mut decoder = Decoder::with_config(&bytes, config);
    let value = decoder.decode()?;
    Ok((value, decoder.position()))
}

// Implement Serialize for Value so decoded data can bridge into other serde
// formats. Tag numbers and extended simple codes have no serde counterpart:
// a tagged value serializes as its inner value, a simple value as its code.
impl Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Text(bytes) => match self.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => serializer.serialize_bytes(bytes),
            },
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                use serde::ser::SerializeMap;
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (key, val) in map.iter() {
                    m.serialize_entry(key, val)?;
                }
                m.end()
            }
            Value::Tagged(_, inner) => inner.serialize(serializer),
            Value::Simple(code) => serializer.serialize_u8(*code),
        }
    }
}

// Implement Deserialize for Value
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> serde::de::Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "any non-float CBOR-compatible value")
            }

            fn visit_bool<E>(self, v: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Value, E> {
                Ok(Value::from(v))
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Value, E> {
                Ok(Value::from(v))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Value, E> {
                Ok(Value::from(v))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<Value, E> {
                Ok(Value::Bytes(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Value, E> {
                Ok(Value::Bytes(v))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> std::result::Result<Value, D::Error> {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Value, A::Error> {
                let mut arr = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    arr.push(elem);
                }
                Ok(Value::Array(arr))
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Value, A::Error> {
                let mut entries = Map::new();
                while let Some((key, val)) = map.next_entry::<Value, Value>()? {
                    entries.insert(key, val);
                }
                Ok(Value::Map(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
