mod expense;
mod service;
mod transaction;

pub use expense::Expense;
pub use service::Service;
pub use transaction::{PaymentMethod, Transaction};

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string with millisecond precision,
/// e.g. `2024-05-01T14:23:00.000Z`. Every persisted `date` field uses this
/// shape so that lexical prefix matching equals calendar-range containment.
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
