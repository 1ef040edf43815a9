//! Purchase record storage
//!
//! Decoded receipts are consumed by a persistence layer with a simple
//! load/save/remove contract. This crate defines that contract
//! ([`PurchaseStorage`]), the stored record type ([`PurchaseRecord`]),
//! and an in-memory implementation for testing and debugging
//! ([`EphemeralPurchaseStorage`]).

pub mod ephemeral;
pub mod record;
pub mod storage;

pub use ephemeral::EphemeralPurchaseStorage;
pub use record::PurchaseRecord;
pub use storage::{PurchaseStorage, StorageUpdateResult, record_receipt};
