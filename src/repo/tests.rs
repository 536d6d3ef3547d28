#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::PaymentMethod;
use crate::store::MemoryStore;

fn open_ledger() -> Ledger<MemoryStore> {
    Ledger::new(MemoryStore::new(), SeedPolicy::WhenEmpty)
}

fn haircut() -> Service {
    Service::new("10".into(), "Haircut".into(), 25000)
}

fn sale(id: &str, customer: &str, service: &Service) -> Transaction {
    Transaction::new(id.into(), customer.into(), service, PaymentMethod::Cash)
}

// ── Seeding ───────────────────────────────────────────────────

#[test]
fn test_seed_populates_default_catalog() {
    let ledger = open_ledger();
    assert!(ledger.seed_if_empty().unwrap());

    let services = ledger.services().unwrap();
    assert_eq!(services.len(), 4);
    let ids: Vec<&str> = services.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    assert!(services
        .iter()
        .any(|s| s.name == "Haircut Premium" && s.price == 50000));
}

#[test]
fn test_seed_twice_is_noop() {
    let ledger = open_ledger();
    assert!(ledger.seed_if_empty().unwrap());
    assert!(!ledger.seed_if_empty().unwrap());
    assert_eq!(ledger.services().unwrap().len(), 4);
}

#[test]
fn test_seed_skipped_when_catalog_exists() {
    let ledger = open_ledger();
    ledger.upsert_service(&haircut()).unwrap();
    assert!(!ledger.seed_if_empty().unwrap());
    assert_eq!(ledger.services().unwrap().len(), 1);
}

#[test]
fn test_when_empty_policy_reseeds_after_deleting_everything() {
    let ledger = open_ledger();
    ledger.seed_if_empty().unwrap();
    for id in ["1", "2", "3", "4"] {
        ledger.remove_service(id).unwrap();
    }
    assert!(ledger.services().unwrap().is_empty());

    // The default policy brings the catalog back on next start.
    assert!(ledger.seed_if_empty().unwrap());
    assert_eq!(ledger.services().unwrap().len(), 4);
}

#[test]
fn test_first_run_only_policy_respects_deliberate_empty_list() {
    let ledger = Ledger::new(MemoryStore::new(), SeedPolicy::FirstRunOnly);
    assert!(ledger.seed_if_empty().unwrap());
    for id in ["1", "2", "3", "4"] {
        ledger.remove_service(id).unwrap();
    }

    assert!(!ledger.seed_if_empty().unwrap());
    assert!(ledger.services().unwrap().is_empty());
}

// ── Services ──────────────────────────────────────────────────

#[test]
fn test_list_on_empty_storage_is_empty_not_error() {
    let ledger = open_ledger();
    assert!(ledger.services().unwrap().is_empty());
    assert!(ledger.transactions().unwrap().is_empty());
    assert!(ledger.expenses().unwrap().is_empty());
}

#[test]
fn test_upsert_inserts_then_replaces_in_place() {
    let ledger = open_ledger();
    ledger.upsert_service(&haircut()).unwrap();
    ledger
        .upsert_service(&Service::new("20".into(), "Shave".into(), 15000))
        .unwrap();

    // Editing the first entry must not move it to the end.
    let renamed = Service::new("10".into(), "Haircut Deluxe".into(), 35000);
    ledger.upsert_service(&renamed).unwrap();

    let services = ledger.services().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0], renamed);
    assert_eq!(services[1].id, "20");
}

#[test]
fn test_upsert_is_idempotent() {
    let ledger = open_ledger();
    ledger.upsert_service(&haircut()).unwrap();
    ledger.upsert_service(&haircut()).unwrap();
    assert_eq!(ledger.services().unwrap(), vec![haircut()]);
}

#[test]
fn test_remove_service_is_idempotent() {
    let ledger = open_ledger();
    ledger.upsert_service(&haircut()).unwrap();

    ledger.remove_service("10").unwrap();
    assert!(ledger.services().unwrap().is_empty());
    ledger.remove_service("10").unwrap();
    assert!(ledger.services().unwrap().is_empty());
}

#[test]
fn test_upsert_rejects_invalid_service() {
    let ledger = open_ledger();
    let err = ledger
        .upsert_service(&Service::new("1".into(), "".into(), 100))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));
    assert!(ledger.services().unwrap().is_empty());
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_append_preserves_insertion_order() {
    let ledger = open_ledger();
    let service = haircut();
    for (id, customer) in [("1", "Budi"), ("2", "Sari"), ("3", "Agus")] {
        ledger.append_transaction(&sale(id, customer, &service)).unwrap();
    }

    let names: Vec<String> = ledger
        .transactions()
        .unwrap()
        .into_iter()
        .map(|t| t.customer_name)
        .collect();
    assert_eq!(names, ["Budi", "Sari", "Agus"]);
}

#[test]
fn test_append_rejects_invalid_transaction() {
    let ledger = open_ledger();
    let mut bad = sale("1", "Budi", &haircut());
    bad.amount = -100;

    let err = ledger.append_transaction(&bad).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));
    assert!(ledger.transactions().unwrap().is_empty());
}

#[test]
fn test_deleting_service_keeps_transaction_snapshot() {
    let ledger = open_ledger();
    let service = haircut();
    ledger.upsert_service(&service).unwrap();
    ledger.append_transaction(&sale("1", "Budi", &service)).unwrap();

    ledger.remove_service(&service.id).unwrap();

    // The sale record is a historical snapshot; the dangling service_id is
    // intentional and must be tolerated, not repaired.
    let transactions = ledger.transactions().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].service_id, "10");
    assert_eq!(transactions[0].service_name, "Haircut");
    assert_eq!(transactions[0].amount, 25000);
}

#[test]
fn test_later_service_edits_do_not_touch_past_sales() {
    let ledger = open_ledger();
    let service = haircut();
    ledger.upsert_service(&service).unwrap();
    ledger.append_transaction(&sale("1", "Budi", &service)).unwrap();

    ledger
        .upsert_service(&Service::new("10".into(), "Haircut".into(), 99000))
        .unwrap();

    assert_eq!(ledger.transactions().unwrap()[0].amount, 25000);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_expense_append_and_remove() {
    let ledger = open_ledger();
    ledger
        .append_expense(&Expense::new("1".into(), "Electricity".into(), 150000))
        .unwrap();
    ledger
        .append_expense(&Expense::new("2".into(), "Pomade stock".into(), 200000))
        .unwrap();

    ledger.remove_expense("1").unwrap();
    let expenses = ledger.expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, "2");

    // Second remove of the same id is a no-op.
    ledger.remove_expense("1").unwrap();
    assert_eq!(ledger.expenses().unwrap().len(), 1);
}

#[test]
fn test_append_rejects_invalid_expense() {
    let ledger = open_ledger();
    let err = ledger
        .append_expense(&Expense::new("1".into(), "  ".into(), 100))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));
    assert!(ledger.expenses().unwrap().is_empty());
}

// ── Corruption and persisted layout ───────────────────────────

#[test]
fn test_corrupt_payload_is_an_error_not_empty() {
    let store = MemoryStore::new();
    store.set(SERVICES_KEY, "{not json").unwrap();
    let ledger = Ledger::new(store, SeedPolicy::WhenEmpty);

    let err = ledger.services().unwrap_err();
    assert!(matches!(err, LedgerError::CorruptData { .. }));
}

#[test]
fn test_write_after_corrupt_read_aborts_without_writing() {
    let store = MemoryStore::new();
    store.set(SERVICES_KEY, "{not json").unwrap();
    let ledger = Ledger::new(store, SeedPolicy::WhenEmpty);

    let err = ledger.upsert_service(&haircut()).unwrap_err();
    assert!(matches!(err, LedgerError::CorruptData { .. }));

    // The unreadable payload must still be there for a human to inspect.
    assert_eq!(
        ledger.store.get(SERVICES_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn test_unknown_schema_version_is_corrupt() {
    let store = MemoryStore::new();
    store
        .set(SERVICES_KEY, r#"{"version":99,"records":[]}"#)
        .unwrap();
    let ledger = Ledger::new(store, SeedPolicy::WhenEmpty);

    let err = ledger.services().unwrap_err();
    assert!(matches!(err, LedgerError::CorruptData { .. }));
}

#[test]
fn test_legacy_bare_array_payload_still_loads() {
    let store = MemoryStore::new();
    store
        .set(
            SERVICES_KEY,
            r#"[{"id":"1","name":"Haircut Premium","price":50000}]"#,
        )
        .unwrap();
    let ledger = Ledger::new(store, SeedPolicy::WhenEmpty);

    let services = ledger.services().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].price, 50000);
}

#[test]
fn test_round_trip_including_empty_collection() {
    let ledger = open_ledger();
    ledger.upsert_service(&haircut()).unwrap();
    ledger.remove_service("10").unwrap();

    // An emptied collection reads back as empty, distinct from corrupt.
    assert!(ledger.services().unwrap().is_empty());
    assert!(ledger.store.get(SERVICES_KEY).unwrap().is_some());
}
