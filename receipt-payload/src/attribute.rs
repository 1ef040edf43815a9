//! Receipt attribute tuples
//!
//! An attribute is a `(type, version, raw value)` triple as encoded in
//! the receipt's SET structure. The raw value is itself DER-encoded
//! content, so typed views re-decode it on demand.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use receipt_asn1::{BufferKind, Value, decode_length};
use receipt_core::date::parse_iso8601_lenient;

/// One attribute extracted from a receipt attribute SET
///
/// The typed accessors all return `Option`: a malformed inner encoding
/// yields `None` rather than an error, because only a strict subset of
/// attributes is semantically required.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptAttribute {
    /// The numeric attribute type code
    pub type_code: i64,
    /// The attribute version (always 1 in practice)
    pub version: i64,
    value: Bytes,
}

impl ReceiptAttribute {
    pub fn new(type_code: i64, version: i64, value: Bytes) -> Self {
        Self {
            type_code,
            version,
            value,
        }
    }

    /// The attribute value bytes, verbatim as they appeared on the wire
    ///
    /// For in-app purchase attributes this is a complete nested ASN.1
    /// buffer in its own right.
    pub fn raw_value(&self) -> &Bytes {
        &self.value
    }

    /// Decode the leading TLV header of the raw value
    fn typed_buffer(&self) -> Option<(BufferKind, Bytes)> {
        let &first = self.value.first()?;
        let kind = BufferKind::from_raw(first)?;

        let (length, remaining) = decode_length(&self.value.slice(1..)).ok()?;

        if length > remaining.len() {
            return None;
        }

        Some((kind, remaining.slice(..length)))
    }

    /// The value decoded as a string, if it is a string type
    pub fn string_value(&self) -> Option<String> {
        let (kind, buffer) = self.typed_buffer()?;

        match Value::from_buffer(buffer, kind).ok()? {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    /// The value decoded as an integer, if it is an INTEGER
    pub fn integer_value(&self) -> Option<i64> {
        let (kind, buffer) = self.typed_buffer()?;

        match Value::from_buffer(buffer, kind).ok()? {
            Value::Integer(integer) => Some(integer),
            _ => None,
        }
    }

    /// The value decoded as an ISO-8601 date
    ///
    /// Empty or unparsable date text yields `None`.
    pub fn date_value(&self) -> Option<DateTime<Utc>> {
        self.string_value()
            .and_then(|text| parse_iso8601_lenient(&text))
    }
}
