//! In-memory purchase storage
//!
//! Not recommended for release builds; useful for testing and
//! debugging. Does not persist any state between launches.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use receipt_core::ReceiptResult;
use tokio::sync::RwLock;

use crate::record::PurchaseRecord;
use crate::storage::{PurchaseStorage, StorageUpdateResult};

/// Ephemeral [`PurchaseStorage`] backed by a map
#[derive(Debug, Clone, Default)]
pub struct EphemeralPurchaseStorage {
    records: Arc<RwLock<HashMap<String, PurchaseRecord>>>,
}

impl EphemeralPurchaseStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseStorage for EphemeralPurchaseStorage {
    async fn record(&self, product_identifier: &str) -> Option<PurchaseRecord> {
        self.records.read().await.get(product_identifier).cloned()
    }

    async fn save(&self, record: PurchaseRecord) -> ReceiptResult<StorageUpdateResult> {
        let mut records = self.records.write().await;

        let old = records.get(&record.product_identifier);

        if old == Some(&record) {
            return Ok(StorageUpdateResult::NoChanges);
        }

        records.insert(record.product_identifier.clone(), record);

        Ok(StorageUpdateResult::DidChangeRecords)
    }

    async fn remove(&self, product_identifier: &str) -> ReceiptResult<StorageUpdateResult> {
        let removed = self.records.write().await.remove(product_identifier);

        match removed {
            Some(_) => Ok(StorageUpdateResult::DidChangeRecords),
            None => Ok(StorageUpdateResult::NoChanges),
        }
    }
}
