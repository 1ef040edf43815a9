//! DER (Distinguished Encoding Rules) support
//!
//! Submodules:
//! - `types`: tag classes, universal type numbers, payload descriptors,
//!   and length decoding
//! - `value`: primitive value decoding into typed scalars
//! - `oid`: object identifier representation
//! - `parser`: the event-driven stream parser
//! - `encoder`: a minimal DER encoder for fixtures and round trips

pub mod encoder;
pub mod oid;
pub mod parser;
pub mod types;
pub mod value;
