//! Object identifier representation

use std::fmt;

use bytes::Bytes;

/// An ASN.1 OBJECT IDENTIFIER
///
/// Wraps the raw content bytes; the dotted-decimal form is computed
/// lazily on request. Malformed encodings yield `None` rather than
/// trapping, since identifiers arrive inside untrusted payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifier {
    bytes: Bytes,
}

impl ObjectIdentifier {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Encode components per the standard base-128 continuation rules
    ///
    /// The first two components pack into a single leading octet as
    /// `40 * first + second`.
    pub fn from_components(components: &[u64]) -> Self {
        let first = components.first().copied().unwrap_or(0);
        let second = components.get(1).copied().unwrap_or(0);

        let mut bytes = vec![(first * 40 + second) as u8];

        for &component in components.iter().skip(2) {
            let mut chunks = vec![(component & 0x7f) as u8];
            let mut remaining = component >> 7;

            while remaining > 0 {
                chunks.push(((remaining & 0x7f) as u8) | 0x80);
                remaining >>= 7;
            }

            chunks.reverse();
            bytes.extend_from_slice(&chunks);
        }

        Self {
            bytes: Bytes::from(bytes),
        }
    }

    /// The raw content bytes
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// The dotted-decimal string form, e.g. `1.2.840.113549.1.7.2`
    ///
    /// Returns `None` for empty, truncated, or overflowing encodings.
    pub fn to_dotted_string(&self) -> Option<String> {
        let &first = self.bytes.first()?;

        let mut components: Vec<u64> = vec![u64::from(first) / 40, u64::from(first) % 40];

        let mut index = 1;

        while index < self.bytes.len() {
            let mut component: u64 = 0;

            loop {
                // Truncated continuation sequence
                if index >= self.bytes.len() {
                    return None;
                }

                let byte = self.bytes[index];
                index += 1;

                component = component
                    .checked_mul(128)?
                    .checked_add(u64::from(byte & 0x7f))?;

                if (byte & 0x80) == 0 {
                    break;
                }
            }

            components.push(component);
        }

        let dotted = components
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");

        Some(dotted)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_dotted_string() {
            Some(dotted) => write!(f, "{}", dotted),
            None => write!(f, "<invalid object identifier>"),
        }
    }
}
