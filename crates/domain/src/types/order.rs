//! Order creation payload
//!
//! Serializes to the order API's wire shape:
//! `{"intent":"CAPTURE","purchase_units":[{"amount":{"currency_code":"USD","value":"100.00"}}]}`

use serde::{Deserialize, Serialize};

use super::is_blank;
use crate::errors::{Result, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderIntent {
    Capture,
    Authorize,
}

crate::impl_domain_status_conversions!(OrderIntent {
    Capture => "CAPTURE",
    Authorize => "AUTHORIZE",
});

/// Monetary amount; the value stays a decimal string as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: Amount,
}

/// Order request body.
///
/// Only structure is checked locally. Currency legality and amount
/// positivity are the server's call, and its rejection reaches the caller
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub intent: OrderIntent,
    pub purchase_units: Vec<PurchaseUnit>,
}

impl OrderPayload {
    pub fn new(intent: OrderIntent) -> Self {
        Self { intent, purchase_units: Vec::new() }
    }

    /// Append a purchase unit with the given currency and amount.
    pub fn with_unit(mut self, currency_code: impl Into<String>, value: impl Into<String>) -> Self {
        self.purchase_units.push(PurchaseUnit {
            amount: Amount { currency_code: currency_code.into(), value: value.into() },
        });
        self
    }

    /// Structural validation performed before any network attempt.
    ///
    /// # Errors
    /// Returns `SyncError::InvalidPayload` when there are no purchase units
    /// or a unit has a blank currency code or value.
    pub fn validate(&self) -> Result<()> {
        if self.purchase_units.is_empty() {
            return Err(SyncError::InvalidPayload(
                "Invalid payload provided for creating Buy Order: no purchase units".to_string(),
            ));
        }

        for (index, unit) in self.purchase_units.iter().enumerate() {
            if is_blank(&unit.amount.currency_code) {
                return Err(SyncError::InvalidPayload(format!(
                    "purchase_units[{index}].amount.currency_code is blank"
                )));
            }
            if is_blank(&unit.amount.value) {
                return Err(SyncError::InvalidPayload(format!(
                    "purchase_units[{index}].amount.value is blank"
                )));
            }
        }

        Ok(())
    }
}
