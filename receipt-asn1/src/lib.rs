//! ASN.1 DER processing for App Store receipt payloads
//!
//! This crate provides a recursive-descent DER stream parser that emits
//! structural tokens to a visitor, the TLV primitives it is built on,
//! and a minimal DER encoder used to build fixtures.
//!
//! The parser is deliberately schema-free: receipt payloads use a small
//! custom SET structure rather than a published ASN.1 module, so the
//! decoding is driven by tag/length/value rules alone. The aim of the
//! parser is to never trap on malformed input; all failures are funneled
//! through [`receipt_core::ReceiptError`].

pub mod der;

pub use der::encoder::DerEncoder;
pub use der::oid::ObjectIdentifier;
pub use der::parser::{Directive, MAX_NESTING_DEPTH, Parser, Token, TokenVisitor};
pub use der::types::{BufferKind, PayloadDescriptor, Tag, TagClass, decode_length};
pub use der::value::{Value, decode_uint};
