//! The purchase storage contract

use async_trait::async_trait;
use receipt_core::{Receipt, ReceiptResult};

use crate::record::PurchaseRecord;

/// Outcome of a mutating storage operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageUpdateResult {
    /// The stored records changed
    DidChangeRecords,
    /// The operation was a no-op (identical record, or nothing to remove)
    NoChanges,
}

/// Abstract persistence for purchase records
///
/// Implementations map product identifiers to at most one record each.
/// Failures are surfaced through `ReceiptError::Storage`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PurchaseStorage: Send + Sync {
    /// Load the record for a product identifier, if any
    async fn record(&self, product_identifier: &str) -> Option<PurchaseRecord>;

    /// Save a record, replacing any existing record for its product
    async fn save(&self, record: PurchaseRecord) -> ReceiptResult<StorageUpdateResult>;

    /// Remove the record for a product identifier
    async fn remove(&self, product_identifier: &str) -> ReceiptResult<StorageUpdateResult>;
}

/// Persist every entry of a decoded receipt
///
/// Saves one record per entry in payload order, so a later entry for
/// the same product wins. Returns the number of saves that changed the
/// stored records.
pub async fn record_receipt(
    receipt: &Receipt,
    storage: &dyn PurchaseStorage,
) -> ReceiptResult<usize> {
    let mut changed = 0;

    for entry in receipt.entries() {
        let record = PurchaseRecord::new(entry.product_identifier.clone(), entry.expiry_date);

        if storage.save(record).await? == StorageUpdateResult::DidChangeRecords {
            changed += 1;
        }
    }

    Ok(changed)
}
