#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use crate::config::Variant;
use crate::db::Database;
use crate::models::{TransactionDraft, MAX_AMOUNT};
use crate::ui::app::{App, Field, InputMode, PendingAction, StatusKind};

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new(Variant::Extended);
    app.refresh(&db).unwrap();
    (app, db)
}

fn seed(db: &Database, category: &str, amount: &str, date: &str) -> i64 {
    let draft = TransactionDraft::parse(category, amount, date, None).unwrap();
    db.insert_transaction(&draft).unwrap().id
}

fn fill(app: &mut App, category: &str, amount: &str, date: &str) {
    app.form.category = category.into();
    app.form.amount = amount.into();
    app.form.date = date.into();
}

#[test]
fn test_new_prefills_date() {
    let app = App::new(Variant::Extended);
    assert_eq!(app.form.date.len(), 10);
    assert!(app.show_chart);
    assert!(!App::new(Variant::Basic).show_chart);
}

#[test]
fn test_add_success_refreshes() {
    let (mut app, db) = setup();
    fill(&mut app, "Food", "-12.50", "2024-01-15");
    app.form.description = "lunch".into();

    app.add_transaction(&db);

    assert_eq!(app.status_kind, StatusKind::Info);
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].description.as_deref(), Some("lunch"));
    assert_eq!(app.totals.expenses, dec!(-12.50));
    assert_eq!(app.category_totals.len(), 1);
    // Form cleared except the date
    assert!(app.form.category.is_empty());
    assert!(app.form.amount.is_empty());
    assert_eq!(app.form.date, "2024-01-15");
}

#[test]
fn test_add_invalid_amount_writes_nothing() {
    let (mut app, db) = setup();
    fill(&mut app, "Food", "abc", "2024-01-15");

    app.add_transaction(&db);

    assert_eq!(app.status_kind, StatusKind::Error);
    assert!(app.status_message.contains("abc"));
    assert_eq!(db.get_transaction_count().unwrap(), 0);
    // Input kept so it can be corrected
    assert_eq!(app.form.amount, "abc");
}

#[test]
fn test_add_basic_ignores_description() {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new(Variant::Basic);
    fill(&mut app, "Pay", "100", "2024-01-01");
    app.form.description = "hidden".into();

    app.add_transaction(&db);

    let txns = db.get_transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert!(txns[0].description.is_none());
}

#[test]
fn test_add_amount_over_limit_keeps_session() {
    let (mut app, db) = setup();
    fill(&mut app, "Big", "79228162514264337593543950335", "2024-01-15");

    app.add_transaction(&db);
    app.add_transaction(&db);

    assert!(app.running);
    assert_eq!(app.status_kind, StatusKind::Error);
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_add_largest_amounts_totals() {
    let (mut app, db) = setup();
    for _ in 0..2 {
        fill(&mut app, "Big", &MAX_AMOUNT.to_string(), "2024-01-15");
        app.add_transaction(&db);
    }

    assert_eq!(app.status_kind, StatusKind::Info);
    assert!(app.reload(&db));
    assert_eq!(app.totals.income, MAX_AMOUNT * rust_decimal::Decimal::from(2));
    assert_eq!(app.category_totals[0].total, app.totals.income);
}

#[test]
fn test_basic_update_keeps_description() {
    let db = Database::open_in_memory().unwrap();
    let draft = TransactionDraft::parse("Food", "-5", "2024-01-01", Some("snack")).unwrap();
    let id = db.insert_transaction(&draft).unwrap().id;

    let mut app = App::new(Variant::Basic);
    app.refresh(&db).unwrap();
    fill(&mut app, "Cafe", "-6", "2024-01-02");
    app.form.id = id.to_string();
    app.update_transaction(&db);

    assert_eq!(app.status_kind, StatusKind::Info);
    let txn = db.get_transaction(id).unwrap().unwrap();
    assert_eq!(txn.category, "Cafe");
    assert_eq!(txn.description.as_deref(), Some("snack"));
}

#[test]
fn test_update_changes_target() {
    let (mut app, db) = setup();
    let id = seed(&db, "Food", "-5", "2024-01-01");
    seed(&db, "Pay", "100", "2024-01-02");
    app.refresh(&db).unwrap();

    fill(&mut app, "Groceries", "-7.25", "2024-01-03");
    app.form.id = id.to_string();
    app.update_transaction(&db);

    assert_eq!(app.status_kind, StatusKind::Info);
    let txn = db.get_transaction(id).unwrap().unwrap();
    assert_eq!(txn.category, "Groceries");
    assert_eq!(txn.amount, dec!(-7.25));
    assert_eq!(app.transactions[1].category, "Pay");
    assert_eq!(app.transaction_index, 0);
}

#[test]
fn test_update_missing_id() {
    let (mut app, db) = setup();
    seed(&db, "Food", "-5", "2024-01-01");
    fill(&mut app, "Rent", "-500", "2024-01-01");
    app.form.id = "99".into();

    app.update_transaction(&db);

    assert_eq!(app.status_kind, StatusKind::Error);
    assert!(app.status_message.contains("#99"));
    assert_eq!(db.get_transactions().unwrap()[0].category, "Food");
}

#[test]
fn test_update_bad_id() {
    let (mut app, db) = setup();
    fill(&mut app, "Rent", "-500", "2024-01-01");
    app.form.id = "abc".into();

    app.update_transaction(&db);

    assert_eq!(app.status_kind, StatusKind::Error);
}

#[test]
fn test_delete_confirm() {
    let (mut app, db) = setup();
    let id = seed(&db, "Food", "-5", "2024-01-01");
    app.refresh(&db).unwrap();

    app.request_delete(&id.to_string());
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteTransaction { id })
    );
    assert!(app.confirm_message.contains("Food"));

    app.confirm_pending(&db);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
    assert!(app.transactions.is_empty());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_delete_cancel() {
    let (mut app, db) = setup();
    let id = seed(&db, "Food", "-5", "2024-01-01");
    app.refresh(&db).unwrap();

    app.request_delete(&id.to_string());
    app.cancel_pending();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

#[test]
fn test_delete_uses_form_id() {
    let (mut app, db) = setup();
    let id = seed(&db, "Food", "-5", "2024-01-01");
    app.form.id = id.to_string();

    app.request_delete("");
    app.confirm_pending(&db);

    assert_eq!(db.get_transaction_count().unwrap(), 0);
    assert!(app.form.id.is_empty());
}

#[test]
fn test_delete_missing_id() {
    let (mut app, db) = setup();
    seed(&db, "Food", "-5", "2024-01-01");

    app.request_delete("42");
    app.confirm_pending(&db);

    assert_eq!(app.status_kind, StatusKind::Error);
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

#[test]
fn test_delete_invalid_id_never_confirms() {
    let (mut app, _db) = setup();
    app.request_delete("-3");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
    assert_eq!(app.status_kind, StatusKind::Error);
}

#[test]
fn test_load_transaction() {
    let (mut app, db) = setup();
    seed(&db, "Food", "-5", "2024-01-01");
    let id = seed(&db, "Pay", "100.00", "2024-01-02");
    app.refresh(&db).unwrap();

    app.load_transaction(&db, &id.to_string());

    assert_eq!(app.form.category, "Pay");
    assert_eq!(app.form.amount, "100.00");
    assert_eq!(app.form.id, id.to_string());
    assert_eq!(app.transaction_index, 1);

    app.load_transaction(&db, "77");
    assert_eq!(app.status_kind, StatusKind::Error);
}

#[test]
fn test_focus_cycles_per_variant() {
    let mut app = App::new(Variant::Extended);
    let expected = [
        Field::Amount,
        Field::Date,
        Field::Description,
        Field::Id,
        Field::Category,
    ];
    for field in expected {
        app.focus_next();
        assert_eq!(app.focus, field);
    }

    let mut basic = App::new(Variant::Basic);
    basic.focus_prev();
    assert_eq!(basic.focus, Field::Id);
    basic.focus_prev();
    assert_eq!(basic.focus, Field::Date);
}

#[test]
fn test_toggle_chart() {
    let mut app = App::new(Variant::Extended);
    app.toggle_chart();
    assert!(!app.show_chart);

    let mut basic = App::new(Variant::Basic);
    basic.toggle_chart();
    assert!(!basic.show_chart);
    assert_eq!(basic.status_kind, StatusKind::Error);
}

#[test]
fn test_refresh_clamps_selection() {
    let (mut app, db) = setup();
    let a = seed(&db, "A", "1", "2024-01-01");
    let b = seed(&db, "B", "2", "2024-01-01");
    app.refresh(&db).unwrap();
    app.transaction_index = 1;

    db.delete_transaction(b).unwrap();
    db.delete_transaction(a).unwrap();
    app.refresh(&db).unwrap();

    assert_eq!(app.transaction_index, 0);
    assert!(app.selected_transaction().is_none());
}
