//! Core types and utilities for App Store receipt decoding
//!
//! This crate provides the shared error taxonomy, the receipt domain
//! model, and date parsing helpers used throughout the workspace.

pub mod date;
pub mod error;
pub mod receipt;

pub use date::parse_iso8601;
pub use error::{ReceiptError, ReceiptResult};
pub use receipt::{Receipt, ReceiptEntry, ReceiptMetadata, ReceiptMetadataBuilder};
