//! App Store receipt decoding
//!
//! This library turns the raw ASN.1 payload of an App Store receipt (a
//! PKCS#7-enveloped structure; the cryptographic unwrap is performed
//! upstream) into a typed, queryable [`Receipt`].
//!
//! # Architecture
//!
//! The library is organized as a workspace with multiple crates:
//!
//! - `receipt-core`: error taxonomy, receipt domain model, date helpers
//! - `receipt-asn1`: DER stream parser, TLV primitives, encoder
//! - `receipt-payload`: attribute SET processing and payload parsing
//! - `receipt-storage`: purchase record persistence interfaces
//!
//! # Decoding Pipeline
//!
//! ```text
//! bytes -> DER stream parser (tokens)
//!       -> attribute SET processor (attributes)
//!       -> payload parser (receipt entries + metadata)
//! ```
//!
//! Decoding is synchronous and never panics on malformed input; the
//! result is either a complete [`Receipt`] (possibly with fewer entries
//! than truly present, if some blocks were malformed) or a single
//! terminal [`ReceiptError`].

pub use receipt_core::{
    Receipt, ReceiptEntry, ReceiptError, ReceiptMetadata, ReceiptResult, parse_iso8601,
};

pub use receipt_asn1::{
    BufferKind, DerEncoder, Directive, ObjectIdentifier, Parser, PayloadDescriptor, Tag, TagClass,
    Token, TokenVisitor, Value,
};

pub use receipt_payload::{AttributeSetProcessor, PayloadParser, ReceiptAttribute};

pub use receipt_storage::{
    EphemeralPurchaseStorage, PurchaseRecord, PurchaseStorage, StorageUpdateResult, record_receipt,
};
