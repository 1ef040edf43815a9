//! Event-driven DER stream parser
//!
//! Walks a byte buffer by recursive descent and relays structure as a
//! stream of [`Token`]s to a [`TokenVisitor`]. The parser owns no output
//! structure; it is a pure decoding engine. It aims to never trap on
//! malformed input: every failure is funneled through
//! [`receipt_core::ReceiptError`].

use bytes::Bytes;
use receipt_core::{ReceiptError, ReceiptResult};

use crate::der::types::{BufferKind, PayloadDescriptor, Tag, TagClass, decode_length};
use crate::der::value::Value;

/// Maximum nesting depth accepted before a parse fails
///
/// Recursion depth is otherwise bounded only by input nesting, and the
/// payload is attacker-controlled. Receipts nest a handful of levels at
/// most.
pub const MAX_NESTING_DEPTH: usize = 32;

/// A structural event emitted while walking the DER tree
///
/// Events are produced in a strict well-nested order: every `*Start`
/// has exactly one matching `*End`, LIFO-nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A context-specific unit opened; carries the raw tag number
    ContextStart(u8),
    /// A context-specific unit closed
    ContextEnd(u8),
    /// A constructed unit with a recognized universal type opened
    ContainerStart(BufferKind),
    /// A constructed unit closed
    ContainerEnd(BufferKind),
    /// A primitive value was decoded
    Value(Value),
}

/// Returned by a visitor from each token callback
///
/// `Stop` requests cooperative cancellation: the parser fails with
/// `Aborted` at the next unit boundary. At most one further token may
/// be observed before the stop takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Continue,
    Stop,
}

/// Receives the token stream of one parse call
pub trait TokenVisitor {
    fn on_token(&mut self, token: Token) -> Directive;
}

/// Recursive-descent DER stream parser
///
/// A parser instance services one `parse` call at a time; for
/// concurrent decoding of multiple payloads, instantiate independent
/// parsers. The abort flag resets when `parse` returns.
pub struct Parser {
    data: Bytes,
    aborted: bool,
}

impl Parser {
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            aborted: false,
        }
    }

    /// Request cooperative cancellation
    ///
    /// Takes effect at the next TLV unit boundary, which then fails with
    /// `Aborted`. Calling this before `parse` fails the very first unit.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    /// Walk the whole buffer, relaying tokens to `visitor`
    ///
    /// # Error Handling
    /// Fails with `EmptyInput` on an empty buffer; otherwise repeatedly
    /// consumes one TLV unit from the front until exhausted, surfacing
    /// the first decode error after unwinding (end tokens for already
    /// opened contexts and containers are still emitted on the way out).
    pub fn parse<V: TokenVisitor>(&mut self, visitor: &mut V) -> ReceiptResult<()> {
        let result = self.parse_all(visitor);
        self.aborted = false;
        result
    }

    fn parse_all<V: TokenVisitor>(&mut self, visitor: &mut V) -> ReceiptResult<()> {
        if self.data.is_empty() {
            return Err(ReceiptError::EmptyInput);
        }

        let mut remaining = self.data.clone();

        while !remaining.is_empty() {
            remaining = self.parse_unit(remaining, visitor, 0)?;
        }

        Ok(())
    }

    fn emit<V: TokenVisitor>(&mut self, visitor: &mut V, token: Token) {
        if visitor.on_token(token) == Directive::Stop {
            self.aborted = true;
        }
    }

    /// Consume one TLV unit from the front of `data`
    ///
    /// # Returns
    /// The remainder of `data` after the unit.
    fn parse_unit<V: TokenVisitor>(
        &mut self,
        data: Bytes,
        visitor: &mut V,
        depth: usize,
    ) -> ReceiptResult<Bytes> {
        if self.aborted {
            return Err(ReceiptError::Aborted);
        }

        if depth >= MAX_NESTING_DEPTH {
            return Err(ReceiptError::NestingTooDeep(MAX_NESTING_DEPTH));
        }

        let Some(&leading) = data.first() else {
            return Err(ReceiptError::InvariantViolation(
                "parse_unit invoked on an empty buffer",
            ));
        };

        let mut descriptor = PayloadDescriptor::from_byte(leading);

        if descriptor.tag().kind() == Some(BufferKind::LongForm) {
            return Err(ReceiptError::UnsupportedLongFormTag);
        }

        let (length, rest) = decode_length(&data.slice(1..))?;

        if length > rest.len() {
            return Err(ReceiptError::MalformedLength);
        }

        let buffer = rest.slice(..length);
        let after = rest.slice(length..);

        let context_tag =
            (descriptor.class() == TagClass::ContextSpecific).then(|| descriptor.tag().raw());

        if let Some(raw) = context_tag {
            self.emit(visitor, Token::ContextStart(raw));

            // Receipts wrap raw in-app purchase blocks as primitive
            // context values; interpret those as octet strings.
            if !descriptor.is_constructed() {
                descriptor = descriptor.with_tag(Tag::Kind(BufferKind::OctetString));
            }
        }

        let result = if descriptor.is_constructed() {
            // Unrecognized constructed tags are walked structurally
            // without container events.
            let container = descriptor.tag().kind();

            if let Some(kind) = container {
                self.emit(visitor, Token::ContainerStart(kind));
            }

            let walked = self.parse_children(buffer, visitor, depth + 1);

            if let Some(kind) = container {
                self.emit(visitor, Token::ContainerEnd(kind));
            }

            walked
        } else {
            match descriptor.tag().kind() {
                None => Err(ReceiptError::UnknownUniversalType(descriptor.tag().raw())),
                Some(kind) => Value::from_buffer(buffer, kind)
                    .map(|value| self.emit(visitor, Token::Value(value))),
            }
        };

        // Balanced even when the unit failed inside, so that open
        // contexts are always exited.
        if let Some(raw) = context_tag {
            self.emit(visitor, Token::ContextEnd(raw));
        }

        result?;

        Ok(after)
    }

    fn parse_children<V: TokenVisitor>(
        &mut self,
        buffer: Bytes,
        visitor: &mut V,
        depth: usize,
    ) -> ReceiptResult<()> {
        let mut remaining = buffer;

        while !remaining.is_empty() && !self.aborted {
            remaining = self.parse_unit(remaining, visitor, depth)?;
        }

        Ok(())
    }
}
