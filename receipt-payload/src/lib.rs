//! Attribute extraction and receipt assembly
//!
//! Receipt payloads are a custom `SET OF SEQUENCE { type INTEGER,
//! version INTEGER, value OCTET STRING }` structure. This crate layers
//! two parsing passes on top of the DER stream parser:
//!
//! 1. [`AttributeSetProcessor`] reassembles one attribute SET region
//!    into `(type, version, raw value)` tuples.
//! 2. [`PayloadParser`] runs a processor over the whole payload, then a
//!    second processor over each in-app purchase attribute's raw bytes,
//!    and assembles the final [`receipt_core::Receipt`].

pub mod attribute;
pub mod payload_parser;
pub mod set_processor;

pub use attribute::ReceiptAttribute;
pub use payload_parser::PayloadParser;
pub use set_processor::AttributeSetProcessor;
