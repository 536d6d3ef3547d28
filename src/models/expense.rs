use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// A recorded outflow. Created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: i64,
    pub date: String,
}

impl Expense {
    pub fn new(id: String, title: String, amount: i64) -> Self {
        Self {
            id,
            title,
            amount,
            date: super::now_iso(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(LedgerError::Validation {
                entity: "expense",
                reason: "title must not be empty".into(),
            });
        }
        if self.amount < 0 {
            return Err(LedgerError::Validation {
                entity: "expense",
                reason: format!("amount must not be negative (got {})", self.amount),
            });
        }
        Ok(())
    }
}
