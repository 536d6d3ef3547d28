use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::models::Service;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Transfer,
    #[serde(rename = "QRIS")]
    Qris,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Transfer => "Transfer",
            Self::Qris => "QRIS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            "qris" => Some(Self::Qris),
            _ => None,
        }
    }

    pub fn all() -> &'static [PaymentMethod] {
        &[Self::Cash, Self::Transfer, Self::Qris]
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A completed sale. Append-only: once recorded it is never updated or
/// deleted. `service_name` and `amount` are snapshots of the Service at sale
/// time and are intentionally not kept in sync with later Service edits;
/// `service_id` may dangle after the Service is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_name: String,
    pub service_id: String,
    pub service_name: String,
    pub amount: i64,
    pub date: String,
    pub payment_method: PaymentMethod,
}

impl Transaction {
    /// Build a sale record from the live Service, denormalizing its name and
    /// price and stamping `date` with the current time.
    pub fn new(
        id: String,
        customer_name: String,
        service: &Service,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id,
            customer_name,
            service_id: service.id.clone(),
            service_name: service.name.clone(),
            amount: service.price,
            date: super::now_iso(),
            payment_method,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(LedgerError::Validation {
                entity: "transaction",
                reason: "customer name must not be empty".into(),
            });
        }
        if self.service_name.trim().is_empty() {
            return Err(LedgerError::Validation {
                entity: "transaction",
                reason: "service name must not be empty".into(),
            });
        }
        if self.amount < 0 {
            return Err(LedgerError::Validation {
                entity: "transaction",
                reason: format!("amount must not be negative (got {})", self.amount),
            });
        }
        Ok(())
    }
}
