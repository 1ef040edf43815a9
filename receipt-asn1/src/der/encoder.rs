//! Minimal DER encoder
//!
//! Produces definite-length DER. Used to build synthetic receipt
//! payloads for tests and to round-trip object identifiers; the
//! decoding core itself never encodes.

use bytes::Bytes;

use crate::der::oid::ObjectIdentifier;
use crate::der::types::BufferKind;

/// DER encoder accumulating TLV units into a buffer
///
/// Constructed types take a closure that encodes their content into a
/// nested encoder, so lengths always come out definite and exact.
#[derive(Default)]
pub struct DerEncoder {
    buffer: Vec<u8>,
}

impl DerEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Consume the encoder, yielding the encoded bytes
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buffer)
    }

    /// Append one TLV unit with the given leading tag octet
    pub fn encode_tlv(&mut self, tag_byte: u8, value: &[u8]) {
        self.buffer.push(tag_byte);
        self.encode_definite_length(value.len());
        self.buffer.extend_from_slice(value);
    }

    fn encode_definite_length(&mut self, length: usize) {
        if length < 0x80 {
            self.buffer.push(length as u8);
            return;
        }

        let mut octets = Vec::new();
        let mut remaining = length;

        while remaining > 0 {
            octets.push((remaining & 0xff) as u8);
            remaining >>= 8;
        }

        self.buffer.push(0x80 | octets.len() as u8);
        self.buffer.extend(octets.iter().rev());
    }

    /// Encode an INTEGER (minimal two's complement, big-endian)
    pub fn encode_integer(&mut self, value: i64) {
        let mut bytes = value.to_be_bytes().to_vec();

        while bytes.len() > 1
            && ((bytes[0] == 0x00 && (bytes[1] & 0x80) == 0)
                || (bytes[0] == 0xff && (bytes[1] & 0x80) != 0))
        {
            bytes.remove(0);
        }

        self.encode_tlv(BufferKind::Integer.raw(), &bytes);
    }

    /// Encode a BOOLEAN (DER: 0x00 = false, 0xff = true)
    pub fn encode_boolean(&mut self, value: bool) {
        self.encode_tlv(BufferKind::Boolean.raw(), &[if value { 0xff } else { 0x00 }]);
    }

    pub fn encode_null(&mut self) {
        self.encode_tlv(BufferKind::Null.raw(), &[]);
    }

    pub fn encode_octet_string(&mut self, value: &[u8]) {
        self.encode_tlv(BufferKind::OctetString.raw(), value);
    }

    pub fn encode_utf8_string(&mut self, value: &str) {
        self.encode_tlv(BufferKind::Utf8String.raw(), value.as_bytes());
    }

    pub fn encode_ia5_string(&mut self, value: &str) {
        self.encode_tlv(BufferKind::Ia5String.raw(), value.as_bytes());
    }

    /// Encode an OBJECT IDENTIFIER from dotted components
    pub fn encode_object_identifier(&mut self, components: &[u64]) {
        let identifier = ObjectIdentifier::from_components(components);
        self.encode_tlv(BufferKind::ObjectIdentifier.raw(), identifier.as_bytes());
    }

    /// Encode a constructed unit with an arbitrary leading tag octet
    pub fn encode_constructed(&mut self, tag_byte: u8, content: impl FnOnce(&mut DerEncoder)) {
        let mut nested = DerEncoder::new();
        content(&mut nested);
        self.encode_tlv(tag_byte, &nested.buffer);
    }

    /// Encode a SEQUENCE
    pub fn encode_sequence(&mut self, content: impl FnOnce(&mut DerEncoder)) {
        self.encode_constructed(0x20 | BufferKind::Sequence.raw(), content);
    }

    /// Encode a SET
    pub fn encode_set(&mut self, content: impl FnOnce(&mut DerEncoder)) {
        self.encode_constructed(0x20 | BufferKind::Set.raw(), content);
    }

    /// Encode a constructed context-specific unit `[tag_number]`
    pub fn encode_context(&mut self, tag_number: u8, content: impl FnOnce(&mut DerEncoder)) {
        self.encode_constructed(0xa0 | (tag_number & 0x1f), content);
    }

    /// Encode a primitive context-specific unit `[tag_number]`
    pub fn encode_context_primitive(&mut self, tag_number: u8, value: &[u8]) {
        self.encode_tlv(0x80 | (tag_number & 0x1f), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_integer_minimal() {
        let mut encoder = DerEncoder::new();
        encoder.encode_integer(127);
        assert_eq!(&encoder.into_bytes()[..], &[0x02, 0x01, 0x7f]);
    }

    #[test]
    fn test_encode_integer_leading_zero_kept() {
        // 200 needs a leading 0x00 to stay non-negative
        let mut encoder = DerEncoder::new();
        encoder.encode_integer(200);
        assert_eq!(&encoder.into_bytes()[..], &[0x02, 0x02, 0x00, 0xc8]);
    }

    #[test]
    fn test_encode_long_form_length() {
        let mut encoder = DerEncoder::new();
        encoder.encode_octet_string(&[0xab; 200]);
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..3], &[0x04, 0x81, 200]);
        assert_eq!(bytes.len(), 203);
    }

    #[test]
    fn test_encode_nested_set_of_sequence() {
        let mut encoder = DerEncoder::new();
        encoder.encode_set(|set| {
            set.encode_sequence(|sequence| {
                sequence.encode_integer(2);
            });
        });
        assert_eq!(
            &encoder.into_bytes()[..],
            &[0x31, 0x05, 0x30, 0x03, 0x02, 0x01, 0x02]
        );
    }

    #[test]
    fn test_encode_context_units() {
        let mut encoder = DerEncoder::new();
        encoder.encode_context(0, |inner| inner.encode_integer(2));
        encoder.encode_context_primitive(1, &[0xee]);
        assert_eq!(
            &encoder.into_bytes()[..],
            &[0xa0, 0x03, 0x02, 0x01, 0x02, 0x81, 0x01, 0xee]
        );
    }

    #[test]
    fn test_encode_object_identifier() {
        let mut encoder = DerEncoder::new();
        encoder.encode_object_identifier(&[1, 2, 840, 113549, 1, 7, 2]);
        assert_eq!(
            &encoder.into_bytes()[..],
            &[0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02]
        );
    }
}
