//! Primitive value decoding
//!
//! Converts the value buffer of a primitive TLV unit into a typed
//! scalar, given its declared universal type.

use std::fmt;

use bytes::Bytes;
use receipt_core::{ReceiptError, ReceiptResult};

use crate::der::oid::ObjectIdentifier;
use crate::der::types::BufferKind;

/// A decoded primitive scalar
///
/// The variant always matches the universal type that produced it.
/// Unsupported types (real, external reference, bitmap string, etc.)
/// are a hard decode error rather than a silent default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
    Bytes(Bytes),
    /// Textual UTC/generalized-time form, left unparsed at this layer
    Date(String),
    ObjectIdentifier(ObjectIdentifier),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(boolean) => write!(f, "{}", boolean),
            Value::Integer(integer) => write!(f, "{}", integer),
            Value::String(string) => write!(f, "{}", string),
            Value::Bytes(bytes) => write!(f, "{} bytes", bytes.len()),
            Value::Date(date) => write!(f, "{}", date),
            Value::ObjectIdentifier(identifier) => write!(f, "{}", identifier),
        }
    }
}

/// Decode a big-endian unsigned integer from all bytes of a buffer
///
/// An empty buffer yields 0. Receipt type/version fields are small
/// non-negative integers, so no sign handling is performed. Callers
/// must bound the buffer at 8 bytes.
pub fn decode_uint(buffer: &[u8]) -> u64 {
    let mut result: u64 = 0;

    for &byte in buffer {
        result = (result << 8) | u64::from(byte);
    }

    result
}

/// Types for which a zero-length value buffer is valid
const ZERO_LENGTH_ALLOWED: [BufferKind; 6] = [
    BufferKind::Null,
    BufferKind::TeletexString,
    BufferKind::GraphicString,
    BufferKind::PrintableString,
    BufferKind::Utf8String,
    BufferKind::Ia5String,
];

impl Value {
    /// Decode a primitive value buffer as the given universal type
    ///
    /// # Error Handling
    /// - `InvalidBufferSize`: zero-length buffer outside the allow-list,
    ///   or a boolean that is not exactly one byte
    /// - `UnsupportedValueEncoding`: non-UTF8 string bytes, non-ASCII
    ///   date bytes, or an integer wider than 64 bits
    /// - `UnsupportedType`: a recognized type with no decoding rule
    pub fn from_buffer(buffer: Bytes, kind: BufferKind) -> ReceiptResult<Value> {
        if buffer.is_empty() && !ZERO_LENGTH_ALLOWED.contains(&kind) {
            return Err(ReceiptError::InvalidBufferSize {
                found: 0,
                kind: kind.raw(),
            });
        }

        match kind {
            BufferKind::Boolean => {
                if buffer.len() != 1 {
                    return Err(ReceiptError::InvalidBufferSize {
                        found: buffer.len(),
                        kind: kind.raw(),
                    });
                }

                Ok(Value::Boolean(buffer[0] != 0))
            }
            BufferKind::Integer => {
                if buffer.len() > 8 {
                    return Err(ReceiptError::UnsupportedValueEncoding(kind.raw()));
                }

                let value = decode_uint(&buffer);

                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| ReceiptError::UnsupportedValueEncoding(kind.raw()))
            }
            BufferKind::BitString | BufferKind::OctetString => Ok(Value::Bytes(buffer)),
            BufferKind::Null => Ok(Value::Null),
            BufferKind::ObjectIdentifier | BufferKind::RelativeObjectIdentifier => {
                Ok(Value::ObjectIdentifier(ObjectIdentifier::new(buffer)))
            }
            BufferKind::TeletexString
            | BufferKind::GraphicString
            | BufferKind::PrintableString
            | BufferKind::Utf8String
            | BufferKind::Ia5String => String::from_utf8(buffer.to_vec())
                .map(Value::String)
                .map_err(|_| ReceiptError::UnsupportedValueEncoding(kind.raw())),
            BufferKind::UtcTime | BufferKind::GeneralizedTime => {
                if !buffer.is_ascii() {
                    return Err(ReceiptError::UnsupportedValueEncoding(kind.raw()));
                }

                String::from_utf8(buffer.to_vec())
                    .map(Value::Date)
                    .map_err(|_| ReceiptError::UnsupportedValueEncoding(kind.raw()))
            }
            _ => Err(ReceiptError::UnsupportedType(kind.raw())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uint() {
        assert_eq!(decode_uint(&[]), 0);
        assert_eq!(decode_uint(&[0x2a]), 42);
        assert_eq!(decode_uint(&[0x01, 0x00]), 256);
        assert_eq!(decode_uint(&[0x06, 0xa6]), 1702);
    }

    #[test]
    fn test_boolean() {
        let value = Value::from_buffer(Bytes::from_static(&[0xff]), BufferKind::Boolean).unwrap();
        assert_eq!(value, Value::Boolean(true));

        let value = Value::from_buffer(Bytes::from_static(&[0x00]), BufferKind::Boolean).unwrap();
        assert_eq!(value, Value::Boolean(false));
    }

    #[test]
    fn test_boolean_wrong_size() {
        let result = Value::from_buffer(Bytes::from_static(&[0x00, 0x01]), BufferKind::Boolean);
        assert!(matches!(
            result,
            Err(ReceiptError::InvalidBufferSize { found: 2, .. })
        ));
    }

    #[test]
    fn test_integer() {
        let value =
            Value::from_buffer(Bytes::from_static(&[0x06, 0xa6]), BufferKind::Integer).unwrap();
        assert_eq!(value, Value::Integer(1702));
    }

    #[test]
    fn test_integer_too_wide() {
        let buffer = Bytes::from_static(&[0x01; 9]);
        let result = Value::from_buffer(buffer, BufferKind::Integer);
        assert!(matches!(
            result,
            Err(ReceiptError::UnsupportedValueEncoding(0x02))
        ));
    }

    #[test]
    fn test_utf8_string() {
        let value = Value::from_buffer(
            Bytes::from_static(b"com.example.app"),
            BufferKind::Utf8String,
        )
        .unwrap();
        assert_eq!(value, Value::String("com.example.app".to_string()));
    }

    #[test]
    fn test_invalid_utf8_string() {
        let result = Value::from_buffer(Bytes::from_static(&[0xff, 0xfe]), BufferKind::Utf8String);
        assert!(matches!(
            result,
            Err(ReceiptError::UnsupportedValueEncoding(0x0c))
        ));
    }

    #[test]
    fn test_date_text() {
        let value = Value::from_buffer(
            Bytes::from_static(b"20250101000000Z"),
            BufferKind::GeneralizedTime,
        )
        .unwrap();
        assert_eq!(value, Value::Date("20250101000000Z".to_string()));
    }

    #[test]
    fn test_zero_length_allow_list() {
        let empty = Bytes::new();

        assert_eq!(
            Value::from_buffer(empty.clone(), BufferKind::Null).unwrap(),
            Value::Null
        );
        assert_eq!(
            Value::from_buffer(empty.clone(), BufferKind::Utf8String).unwrap(),
            Value::String(String::new())
        );

        assert!(matches!(
            Value::from_buffer(empty.clone(), BufferKind::Integer),
            Err(ReceiptError::InvalidBufferSize { found: 0, .. })
        ));
        assert!(matches!(
            Value::from_buffer(empty, BufferKind::Boolean),
            Err(ReceiptError::InvalidBufferSize { found: 0, .. })
        ));
    }

    #[test]
    fn test_unsupported_type() {
        let result = Value::from_buffer(Bytes::from_static(&[0x01]), BufferKind::Real);
        assert!(matches!(result, Err(ReceiptError::UnsupportedType(0x09))));
    }
}
