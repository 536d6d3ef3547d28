use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::models::{Expense, Service, Transaction};
use crate::store::RecordStore;

const SERVICES_KEY: &str = "services";
const TRANSACTIONS_KEY: &str = "transactions";
const EXPENSES_KEY: &str = "expenses";

const SCHEMA_VERSION: u32 = 1;

/// Versioned wrapper around a persisted collection. Reads also accept a bare
/// JSON array (the pre-envelope layout) so existing data keeps loading.
#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    records: Vec<T>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    records: &'a [T],
}

/// When the bootstrap seeder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Seed whenever the service list is empty. Note this re-seeds even
    /// after a user intentionally deletes every service.
    #[default]
    WhenEmpty,
    /// Seed only if the services collection has never been written.
    FirstRunOnly,
}

/// Typed CRUD facade over the three collections. The sole mutator of the
/// store: every write is a full read-modify-write cycle, and a corrupt read
/// aborts the write so unreadable prior data is never discarded.
pub struct Ledger<S: RecordStore> {
    store: S,
    seed_policy: SeedPolicy,
}

impl<S: RecordStore> Ledger<S> {
    pub fn new(store: S, seed_policy: SeedPolicy) -> Self {
        Self { store, seed_policy }
    }

    // ── Services ──────────────────────────────────────────────

    pub fn services(&self) -> Result<Vec<Service>> {
        self.read_collection(SERVICES_KEY)
    }

    /// Replace the service with the same id in place, or append it.
    /// Upserting the same service twice yields the same final state as once.
    pub fn upsert_service(&self, service: &Service) -> Result<()> {
        service.validate()?;
        let mut services = self.services()?;
        match services.iter_mut().find(|s| s.id == service.id) {
            Some(existing) => *existing = service.clone(),
            None => services.push(service.clone()),
        }
        self.write_collection(SERVICES_KEY, &services)
    }

    /// Idempotent: removing an absent id is a no-op, not an error. Existing
    /// transactions keep their snapshot of the deleted service.
    pub fn remove_service(&self, id: &str) -> Result<()> {
        let mut services = self.services()?;
        services.retain(|s| s.id != id);
        self.write_collection(SERVICES_KEY, &services)
    }

    // ── Transactions ──────────────────────────────────────────

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.read_collection(TRANSACTIONS_KEY)
    }

    /// Transactions are an append-only log: there is no update or delete.
    pub fn append_transaction(&self, transaction: &Transaction) -> Result<()> {
        transaction.validate()?;
        let mut transactions = self.transactions()?;
        transactions.push(transaction.clone());
        self.write_collection(TRANSACTIONS_KEY, &transactions)
    }

    // ── Expenses ──────────────────────────────────────────────

    pub fn expenses(&self) -> Result<Vec<Expense>> {
        self.read_collection(EXPENSES_KEY)
    }

    pub fn append_expense(&self, expense: &Expense) -> Result<()> {
        expense.validate()?;
        let mut expenses = self.expenses()?;
        expenses.push(expense.clone());
        self.write_collection(EXPENSES_KEY, &expenses)
    }

    pub fn remove_expense(&self, id: &str) -> Result<()> {
        let mut expenses = self.expenses()?;
        expenses.retain(|e| e.id != id);
        self.write_collection(EXPENSES_KEY, &expenses)
    }

    // ── Seeding ───────────────────────────────────────────────

    /// Populate the default catalog on a fresh install. Returns whether
    /// anything was written. Runs before any UI read of the service list.
    pub fn seed_if_empty(&self) -> Result<bool> {
        let should_seed = match self.seed_policy {
            SeedPolicy::WhenEmpty => self.services()?.is_empty(),
            SeedPolicy::FirstRunOnly => self.store.get(SERVICES_KEY)?.is_none(),
        };
        if !should_seed {
            return Ok(false);
        }

        let catalog: Vec<Service> = default_catalog()
            .iter()
            .map(|(id, name, price)| Service::new((*id).into(), (*name).into(), *price))
            .collect();
        self.write_collection(SERVICES_KEY, &catalog)?;
        Ok(true)
    }

    // ── Storage plumbing ──────────────────────────────────────

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(payload) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(&payload) {
            if envelope.version > SCHEMA_VERSION {
                return Err(LedgerError::CorruptData {
                    collection: key.into(),
                    detail: format!("unsupported schema version {}", envelope.version),
                });
            }
            return Ok(envelope.records);
        }

        // Legacy layout: a bare array of records.
        serde_json::from_str::<Vec<T>>(&payload).map_err(|e| LedgerError::CorruptData {
            collection: key.into(),
            detail: e.to_string(),
        })
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let envelope = EnvelopeRef {
            version: SCHEMA_VERSION,
            records,
        };
        let payload = serde_json::to_string(&envelope)?;
        self.store.set(key, &payload)
    }
}

/// Default price list installed on first run: (id, name, price).
fn default_catalog() -> &'static [(&'static str, &'static str, i64)] {
    &[
        ("1", "Haircut Premium", 50000),
        ("2", "Shaving & Massage", 30000),
        ("3", "Hair Dye", 120000),
        ("4", "Wash & Style", 20000),
    ]
}

#[cfg(test)]
mod tests;
