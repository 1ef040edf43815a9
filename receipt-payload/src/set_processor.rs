//! Attribute SET processing
//!
//! Reassembles the token stream for one `SET OF SEQUENCE { type
//! INTEGER, version INTEGER, value OCTET STRING }` region into
//! [`ReceiptAttribute`] tuples.

use bytes::Bytes;
use receipt_asn1::{BufferKind, Directive, Parser, Token, TokenVisitor, Value};
use receipt_core::{ReceiptError, ReceiptResult};

use crate::attribute::ReceiptAttribute;

/// Which SEQUENCE element the processor expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expecting {
    Type,
    Version,
    Value,
}

/// Fields gathered for the SEQUENCE currently being walked
///
/// Finalized only when all three are present; incomplete tuples are
/// dropped without failing the parse.
#[derive(Debug, Default)]
struct PendingAttribute {
    type_code: Option<i64>,
    version: Option<i64>,
    value: Option<Bytes>,
}

impl PendingAttribute {
    fn finalize(self) -> Option<ReceiptAttribute> {
        Some(ReceiptAttribute::new(
            self.type_code?,
            self.version?,
            self.value?,
        ))
    }
}

/// Consumes the token stream of one attribute SET region
///
/// Drives a fresh [`Parser`] over the buffer and accumulates every
/// well-formed attribute SEQUENCE. Unexpected token ordering (two
/// scalars in a row, a scalar outside a sequence) is treated as a
/// silently-skipped malformed entry rather than a hard failure.
#[derive(Debug, Default)]
pub struct AttributeSetProcessor {
    started_set: bool,
    finished_set: bool,
    pending: Option<PendingAttribute>,
    expecting: Option<Expecting>,
    attributes: Vec<ReceiptAttribute>,
}

impl AttributeSetProcessor {
    /// Extract all attributes from the SET starting at the front of `data`
    ///
    /// # Error Handling
    /// Failures of the underlying DER parse (malformed length, unknown
    /// root-level type, empty input) surface unchanged. The stop the
    /// processor itself requests once the outermost SET closes is
    /// mapped back to success.
    pub fn process(data: Bytes) -> ReceiptResult<Vec<ReceiptAttribute>> {
        let mut processor = AttributeSetProcessor::default();
        let mut parser = Parser::new(data);

        match parser.parse(&mut processor) {
            Ok(()) => Ok(processor.attributes),
            Err(ReceiptError::Aborted) if processor.finished_set => Ok(processor.attributes),
            Err(error) => Err(error),
        }
    }
}

impl TokenVisitor for AttributeSetProcessor {
    fn on_token(&mut self, token: Token) -> Directive {
        match token {
            Token::ContainerStart(BufferKind::Set) => {
                self.started_set = true;
            }
            Token::ContainerEnd(BufferKind::Set) if self.started_set => {
                self.finished_set = true;
                return Directive::Stop;
            }
            Token::ContainerStart(BufferKind::Sequence) if self.started_set => {
                self.pending = Some(PendingAttribute::default());
                self.expecting = Some(Expecting::Type);
            }
            Token::ContainerEnd(BufferKind::Sequence) if self.started_set => {
                if let Some(attribute) = self.pending.take().and_then(PendingAttribute::finalize) {
                    self.attributes.push(attribute);
                }

                self.expecting = None;
            }
            Token::Value(Value::Integer(integer)) if self.expecting == Some(Expecting::Type) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.type_code = Some(integer);
                }

                self.expecting = Some(Expecting::Version);
            }
            Token::Value(Value::Integer(integer)) if self.expecting == Some(Expecting::Version) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.version = Some(integer);
                }

                self.expecting = Some(Expecting::Value);
            }
            Token::Value(Value::Bytes(bytes)) if self.expecting == Some(Expecting::Value) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.value = Some(bytes);
                }
            }
            _ => {}
        }

        Directive::Continue
    }
}
