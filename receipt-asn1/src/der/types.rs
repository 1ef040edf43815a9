//! DER structural types (tag class, universal types, descriptors, length)

use bytes::Bytes;
use receipt_core::{ReceiptError, ReceiptResult};

use crate::der::value::decode_uint;

/// DER tag class
///
/// ASN.1 defines four tag classes, decoded from the top two bits of the
/// leading octet:
/// - **Universal**: standard ASN.1 types (INTEGER, OCTET STRING, etc.)
/// - **Application**: application-specific types
/// - **Context-specific**: context-dependent types (used in SEQUENCE/SET)
/// - **Private**: private/implementation-specific types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl TagClass {
    /// Get tag class from a leading tag octet (bits 8-7)
    pub fn from_bits(byte: u8) -> Self {
        match (byte >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

/// Recognized universal type numbers
///
/// The numbering follows ITU-T X.690. `LongForm` (0x1f) is not a type:
/// it marks the long-form tag number extension, which receipt payloads
/// never use and the parser rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BufferKind {
    Eoc = 0x00,
    Boolean = 0x01,
    Integer = 0x02,
    BitString = 0x03,
    OctetString = 0x04,
    Null = 0x05,
    ObjectIdentifier = 0x06,
    ObjectDescriptor = 0x07,
    ExternalReference = 0x08,
    Real = 0x09,
    Enumerated = 0x0a,
    EmbeddedPdv = 0x0b,
    Utf8String = 0x0c,
    RelativeObjectIdentifier = 0x0d,
    Sequence = 0x10,
    Set = 0x11,
    NumericString = 0x12,
    PrintableString = 0x13,
    TeletexString = 0x14,
    VideotexString = 0x15,
    Ia5String = 0x16,
    UtcTime = 0x17,
    GeneralizedTime = 0x18,
    GraphicString = 0x19,
    VisibleString = 0x1a,
    GeneralString = 0x1b,
    UniversalString = 0x1c,
    BitmapString = 0x1e,
    LongForm = 0x1f,
}

impl BufferKind {
    /// Resolve a 5-bit tag number to a recognized universal type
    pub fn from_raw(raw: u8) -> Option<Self> {
        let kind = match raw {
            0x00 => Self::Eoc,
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x07 => Self::ObjectDescriptor,
            0x08 => Self::ExternalReference,
            0x09 => Self::Real,
            0x0a => Self::Enumerated,
            0x0b => Self::EmbeddedPdv,
            0x0c => Self::Utf8String,
            0x0d => Self::RelativeObjectIdentifier,
            0x10 => Self::Sequence,
            0x11 => Self::Set,
            0x12 => Self::NumericString,
            0x13 => Self::PrintableString,
            0x14 => Self::TeletexString,
            0x15 => Self::VideotexString,
            0x16 => Self::Ia5String,
            0x17 => Self::UtcTime,
            0x18 => Self::GeneralizedTime,
            0x19 => Self::GraphicString,
            0x1a => Self::VisibleString,
            0x1b => Self::GeneralString,
            0x1c => Self::UniversalString,
            0x1e => Self::BitmapString,
            0x1f => Self::LongForm,
            _ => return None,
        };

        Some(kind)
    }

    /// The raw tag number
    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// A decoded tag number
///
/// Unknown tag numbers stay representable as `Custom`, so a unit with an
/// unrecognized tag still parses structurally (its length can be decoded
/// and the value skipped) even though its value cannot be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// A recognized universal type
    Kind(BufferKind),
    /// An opaque tag number (context-specific or unrecognized)
    Custom(u8),
}

impl Tag {
    pub fn from_raw(raw: u8) -> Self {
        BufferKind::from_raw(raw).map_or(Tag::Custom(raw), Tag::Kind)
    }

    /// The recognized universal type, if any
    pub fn kind(&self) -> Option<BufferKind> {
        match self {
            Tag::Kind(kind) => Some(*kind),
            Tag::Custom(_) => None,
        }
    }

    /// The raw tag number regardless of recognition
    pub fn raw(&self) -> u8 {
        match self {
            Tag::Kind(kind) => kind.raw(),
            Tag::Custom(raw) => *raw,
        }
    }
}

/// Descriptor decoded from one leading tag octet
///
/// ```text
/// Octet:   | 8 | 7 | 6 | 5 | 4 | 3 | 2 | 1 |
/// Decoded: |Class__|IsC|TagNumber__________|
/// ```
///
/// Class and constructedness are always derivable independently of tag
/// recognition, so decoding never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadDescriptor {
    class: TagClass,
    constructed: bool,
    tag: Tag,
}

impl PayloadDescriptor {
    pub fn new(class: TagClass, constructed: bool, tag: Tag) -> Self {
        Self {
            class,
            constructed,
            tag,
        }
    }

    /// Decode a descriptor from the leading octet of a TLV unit
    pub fn from_byte(byte: u8) -> Self {
        let class = TagClass::from_bits(byte);
        let constructed = ((byte >> 5) & 1) == 1;
        let tag = Tag::from_raw(byte & 0x1f);

        Self::new(class, constructed, tag)
    }

    pub fn class(&self) -> TagClass {
        self.class
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The same descriptor with its tag rebound
    ///
    /// Used to force primitive context-specific values to octet-string
    /// interpretation.
    pub fn with_tag(&self, tag: Tag) -> Self {
        Self::new(self.class, self.constructed, tag)
    }
}

/// Maximum number of octets accepted in a long-form length
///
/// Anything wider cannot fit a `u64` and is treated as malformed.
const MAX_LENGTH_OCTETS: usize = 8;

/// Decode a DER length field
///
/// # Returns
/// Returns `Ok((length, remaining))` where `remaining` starts at the
/// first value byte.
///
/// # Decoding Format
/// - Short form: one byte with bit 8 clear, value 0-127
/// - Long form: bit 8 set, bits 7-1 give the count of big-endian length
///   octets that follow; a count of zero (the indefinite form) is not
///   valid in DER
///
/// # Error Handling
/// Fails with `MalformedLength` if the buffer is empty, the long form
/// encodes a zero byte count, the byte count exceeds the buffer, or the
/// value does not fit the platform word.
pub fn decode_length(data: &Bytes) -> ReceiptResult<(usize, Bytes)> {
    let Some(&first) = data.first() else {
        return Err(ReceiptError::MalformedLength);
    };

    if (first & 0x80) == 0 {
        return Ok((first as usize, data.slice(1..)));
    }

    let count = (first & 0x7f) as usize;

    if count == 0 || count > MAX_LENGTH_OCTETS || count > data.len() - 1 {
        return Err(ReceiptError::MalformedLength);
    }

    let length = decode_uint(&data[1..1 + count]);
    let length = usize::try_from(length).map_err(|_| ReceiptError::MalformedLength)?;

    Ok((length, data.slice(1 + count..)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_byte_primitive_integer() {
        let descriptor = PayloadDescriptor::from_byte(0x02);
        assert_eq!(descriptor.class(), TagClass::Universal);
        assert!(!descriptor.is_constructed());
        assert_eq!(descriptor.tag().kind(), Some(BufferKind::Integer));
    }

    #[test]
    fn test_descriptor_from_byte_constructed_set() {
        let descriptor = PayloadDescriptor::from_byte(0x31);
        assert_eq!(descriptor.class(), TagClass::Universal);
        assert!(descriptor.is_constructed());
        assert_eq!(descriptor.tag().kind(), Some(BufferKind::Set));
    }

    #[test]
    fn test_descriptor_from_byte_context_specific() {
        // [3] EXPLICIT
        let descriptor = PayloadDescriptor::from_byte(0xa3);
        assert_eq!(descriptor.class(), TagClass::ContextSpecific);
        assert!(descriptor.is_constructed());
        assert_eq!(descriptor.tag().raw(), 3);
    }

    #[test]
    fn test_descriptor_unknown_tag_still_decodes() {
        // Universal 0x1d is not assigned
        let descriptor = PayloadDescriptor::from_byte(0x1d);
        assert_eq!(descriptor.tag(), Tag::Custom(0x1d));
        assert_eq!(descriptor.tag().kind(), None);
        assert_eq!(descriptor.tag().raw(), 0x1d);
    }

    #[test]
    fn test_decode_length_short_form() {
        let data = Bytes::from_static(&[0x05, 0xaa, 0xbb]);
        let (length, remaining) = decode_length(&data).unwrap();
        assert_eq!(length, 5);
        assert_eq!(&remaining[..], &[0xaa, 0xbb]);
    }

    #[test]
    fn test_decode_length_long_form() {
        let data = Bytes::from_static(&[0x82, 0x01, 0x00, 0xff]);
        let (length, remaining) = decode_length(&data).unwrap();
        assert_eq!(length, 256);
        assert_eq!(&remaining[..], &[0xff]);
    }

    #[test]
    fn test_decode_length_empty_buffer() {
        let data = Bytes::new();
        assert!(matches!(
            decode_length(&data),
            Err(ReceiptError::MalformedLength)
        ));
    }

    #[test]
    fn test_decode_length_indefinite_form_rejected() {
        let data = Bytes::from_static(&[0x80]);
        assert!(matches!(
            decode_length(&data),
            Err(ReceiptError::MalformedLength)
        ));
    }

    #[test]
    fn test_decode_length_truncated_long_form() {
        // Claims 2 length octets but only 1 remains
        let data = Bytes::from_static(&[0x82, 0x01]);
        assert!(matches!(
            decode_length(&data),
            Err(ReceiptError::MalformedLength)
        ));
    }
}
