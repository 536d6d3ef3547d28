use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// A sellable offering on the price list. Prices are integer amounts in the
/// smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl Service {
    pub fn new(id: String, name: String, price: i64) -> Self {
        Self { id, name, price }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation {
                entity: "service",
                reason: "name must not be empty".into(),
            });
        }
        if self.price < 0 {
            return Err(LedgerError::Validation {
                entity: "service",
                reason: format!("price must not be negative (got {})", self.price),
            });
        }
        Ok(())
    }
}
