//! Receipt domain model
//!
//! A [`Receipt`] is the fully decoded, immutable result of parsing an
//! App Store receipt payload: an ordered collection of
//! [`ReceiptEntry`] values (one per in-app purchase block) plus the
//! top-level [`ReceiptMetadata`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The pertinent information for one purchased product in a receipt
///
/// Entries are created once during a parse pass and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptEntry {
    /// The product identifier for the purchase
    pub product_identifier: String,
    /// The expiry date for a subscription purchase, if available
    pub expiry_date: Option<DateTime<Utc>>,
}

impl ReceiptEntry {
    pub fn new(product_identifier: impl Into<String>, expiry_date: Option<DateTime<Utc>>) -> Self {
        Self {
            product_identifier: product_identifier.into(),
            expiry_date,
        }
    }
}

/// Top-level metadata carried by a receipt payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptMetadata {
    /// Bundle identifier of the application the receipt was issued for
    pub bundle_identifier: String,
    /// Application version the receipt was originally created for
    pub original_application_version: String,
    /// Receipt creation date, if present in the payload
    pub creation_date: Option<DateTime<Utc>>,
}

impl ReceiptMetadata {
    pub fn builder() -> ReceiptMetadataBuilder {
        ReceiptMetadataBuilder::default()
    }
}

/// Accumulates metadata fields as top-level attributes are discovered
///
/// Fields not present in the payload keep their defaults.
#[derive(Debug, Default)]
pub struct ReceiptMetadataBuilder {
    pub bundle_identifier: String,
    pub original_application_version: String,
    pub creation_date: Option<DateTime<Utc>>,
}

impl ReceiptMetadataBuilder {
    pub fn build(self) -> ReceiptMetadata {
        ReceiptMetadata {
            bundle_identifier: self.bundle_identifier,
            original_application_version: self.original_application_version,
            creation_date: self.creation_date,
        }
    }
}

/// A decoded App Store receipt
///
/// Entries preserve the order in which their enclosing in-app purchase
/// blocks appeared in the payload. The caller owns the value outright;
/// the parser retains no reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    metadata: ReceiptMetadata,
    entries: Vec<ReceiptEntry>,
}

impl Receipt {
    pub fn new(entries: Vec<ReceiptEntry>, metadata: ReceiptMetadata) -> Self {
        Self { metadata, entries }
    }

    /// Top-level receipt metadata
    pub fn metadata(&self) -> &ReceiptMetadata {
        &self.metadata
    }

    /// All entries, in payload order
    pub fn entries(&self) -> &[ReceiptEntry] {
        &self.entries
    }

    /// Product identifiers represented in this receipt
    pub fn product_identifiers(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .map(|entry| entry.product_identifier.as_str())
            .collect()
    }

    /// All entries available for the given product identifier
    pub fn entries_for_product(&self, product_identifier: &str) -> Vec<&ReceiptEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.product_identifier == product_identifier)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_receipt() -> Receipt {
        let expiry = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        Receipt::new(
            vec![
                ReceiptEntry::new("com.example.sub", Some(expiry)),
                ReceiptEntry::new("com.example.coins", None),
                ReceiptEntry::new("com.example.sub", None),
            ],
            ReceiptMetadata {
                bundle_identifier: "com.example.app".to_string(),
                original_application_version: "1.0".to_string(),
                creation_date: None,
            },
        )
    }

    #[test]
    fn test_product_identifiers() {
        let receipt = sample_receipt();
        let identifiers = receipt.product_identifiers();
        assert_eq!(identifiers.len(), 2);
        assert!(identifiers.contains("com.example.sub"));
        assert!(identifiers.contains("com.example.coins"));
    }

    #[test]
    fn test_entries_for_product() {
        let receipt = sample_receipt();
        assert_eq!(receipt.entries_for_product("com.example.sub").len(), 2);
        assert_eq!(receipt.entries_for_product("com.example.coins").len(), 1);
        assert!(receipt.entries_for_product("com.example.unknown").is_empty());
    }

    #[test]
    fn test_entries_preserve_order() {
        let receipt = sample_receipt();
        let products: Vec<_> = receipt
            .entries()
            .iter()
            .map(|entry| entry.product_identifier.as_str())
            .collect();
        assert_eq!(
            products,
            ["com.example.sub", "com.example.coins", "com.example.sub"]
        );
    }

    #[test]
    fn test_metadata_builder() {
        let mut builder = ReceiptMetadata::builder();
        builder.bundle_identifier = "com.example.app".to_string();
        let metadata = builder.build();
        assert_eq!(metadata.bundle_identifier, "com.example.app");
        assert_eq!(metadata.original_application_version, "");
        assert_eq!(metadata.creation_date, None);
    }
}
