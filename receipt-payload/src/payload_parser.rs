//! Receipt payload parsing
//!
//! Orchestrates two attribute extraction passes: one over the whole
//! payload for top-level attributes, and one per in-app purchase block
//! over that attribute's raw bytes.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use receipt_core::{Receipt, ReceiptEntry, ReceiptError, ReceiptMetadata, ReceiptResult};

use crate::attribute::ReceiptAttribute;
use crate::set_processor::AttributeSetProcessor;

/// Top-level receipt attribute type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadAttributeType {
    BundleIdentifier,
    ApplicationVersion,
    OpaqueValue,
    Sha1Hash,
    CreationDate,
    InAppPurchase,
    OriginalApplicationVersion,
    ExpirationDate,
}

impl PayloadAttributeType {
    fn from_code(code: i64) -> Option<Self> {
        let attribute_type = match code {
            2 => Self::BundleIdentifier,
            3 => Self::ApplicationVersion,
            4 => Self::OpaqueValue,
            5 => Self::Sha1Hash,
            12 => Self::CreationDate,
            17 => Self::InAppPurchase,
            19 => Self::OriginalApplicationVersion,
            21 => Self::ExpirationDate,
            _ => return None,
        };

        Some(attribute_type)
    }
}

/// Per-purchase attribute type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InAppPurchaseAttributeType {
    Quantity,
    ProductIdentifier,
    TransactionIdentifier,
    PurchaseDate,
    OriginalTransactionIdentifier,
    OriginalPurchaseDate,
    SubscriptionExpirationDate,
    WebOrderLineItemIdentifier,
    CancellationDate,
}

impl InAppPurchaseAttributeType {
    fn from_code(code: i64) -> Option<Self> {
        let attribute_type = match code {
            1701 => Self::Quantity,
            1702 => Self::ProductIdentifier,
            1703 => Self::TransactionIdentifier,
            1704 => Self::PurchaseDate,
            1705 => Self::OriginalTransactionIdentifier,
            1706 => Self::OriginalPurchaseDate,
            1708 => Self::SubscriptionExpirationDate,
            1711 => Self::WebOrderLineItemIdentifier,
            1712 => Self::CancellationDate,
            _ => return None,
        };

        Some(attribute_type)
    }
}

/// Parses a payload extracted from a local App Store receipt file
///
/// Input is the raw ASN.1 payload bytes from inside the PKCS#7
/// envelope; the cryptographic unwrap happens upstream. Failures at the
/// root level are fatal; a failure inside one in-app purchase block
/// drops that block and keeps the rest of the receipt.
#[derive(Debug, Default)]
pub struct PayloadParser;

impl PayloadParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode a payload into a [`Receipt`]
    pub fn parse(&self, payload: Bytes) -> ReceiptResult<Receipt> {
        let attributes = AttributeSetProcessor::process(payload)?;

        let mut metadata = ReceiptMetadata::builder();
        let mut entries = Vec::new();
        let mut nested_error: Option<ReceiptError> = None;

        for attribute in attributes {
            let Some(attribute_type) = PayloadAttributeType::from_code(attribute.type_code) else {
                log::debug!("ignoring unrecognized attribute type {}", attribute.type_code);
                continue;
            };

            match attribute_type {
                PayloadAttributeType::InAppPurchase => {
                    match Self::parse_in_app_purchase(attribute.raw_value().clone()) {
                        Ok(Some(entry)) => entries.push(entry),
                        Ok(None) => {}
                        Err(error) => {
                            log::warn!("dropping malformed in-app purchase block: {}", error);
                            nested_error = Some(error);
                        }
                    }
                }
                PayloadAttributeType::BundleIdentifier => {
                    metadata.bundle_identifier = attribute.string_value().unwrap_or_default();
                }
                PayloadAttributeType::OriginalApplicationVersion => {
                    metadata.original_application_version =
                        attribute.string_value().unwrap_or_default();
                }
                PayloadAttributeType::CreationDate => {
                    metadata.creation_date = attribute.date_value();
                }
                _ => {}
            }
        }

        // With no entry decoded at all there is no partial result left
        // to protect, so a nested failure becomes the outcome.
        if entries.is_empty() {
            if let Some(error) = nested_error {
                return Err(error);
            }
        }

        Ok(Receipt::new(entries, metadata.build()))
    }

    /// Extract one receipt entry from an in-app purchase block
    ///
    /// The block is a nested ASN.1 attribute SET. A block without a
    /// usable product identifier contributes no entry.
    fn parse_in_app_purchase(data: Bytes) -> ReceiptResult<Option<ReceiptEntry>> {
        let attributes = AttributeSetProcessor::process(data)?;

        let mut product_identifier: Option<String> = None;
        let mut expiry_date: Option<DateTime<Utc>> = None;

        for attribute in &attributes {
            match InAppPurchaseAttributeType::from_code(attribute.type_code) {
                Some(InAppPurchaseAttributeType::ProductIdentifier) => {
                    product_identifier = attribute.string_value();
                }
                Some(InAppPurchaseAttributeType::SubscriptionExpirationDate) => {
                    expiry_date = attribute.date_value();
                }
                _ => {}
            }
        }

        Ok(product_identifier.map(|identifier| ReceiptEntry::new(identifier, expiry_date)))
    }
}
