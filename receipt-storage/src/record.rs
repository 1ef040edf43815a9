//! Stored purchase records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A storage item encapsulating information about a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// The unique string identifying a particular product
    pub product_identifier: String,
    /// The expiry date for the purchase, if appropriate
    pub expiry_date: Option<DateTime<Utc>>,
}

impl PurchaseRecord {
    pub fn new(product_identifier: impl Into<String>, expiry_date: Option<DateTime<Utc>>) -> Self {
        Self {
            product_identifier: product_identifier.into(),
            expiry_date,
        }
    }
}
