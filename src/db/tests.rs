#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Default data ──────────────────────────────────────────────

#[test]
fn test_default_categories_seeded() {
    let db = Database::open_in_memory().unwrap();
    let cats = db.get_categories().unwrap();
    assert!(!cats.is_empty());
    assert!(cats
        .iter()
        .any(|c| c.name == "Salário" && c.category_type == CategoryType::Income));
    assert!(cats
        .iter()
        .any(|c| c.name == "Alimentação" && c.category_type == CategoryType::Expense));
}

#[test]
fn test_default_categories_not_reseeded() {
    let mut db = Database::open_in_memory().unwrap();
    let count_before = db.get_categories().unwrap().len();
    db.seed_default_categories().unwrap();
    let count_after = db.get_categories().unwrap().len();
    assert_eq!(count_before, count_after);
}

#[test]
fn test_migrate_is_repeatable() {
    let mut db = Database::open_in_memory().unwrap();
    db.migrate().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

// ── Accounts ──────────────────────────────────────────────────

#[test]
fn test_account_crud() {
    let db = Database::open_in_memory().unwrap();
    let mut account = Account::new("Nubank".into(), AccountType::Checking);
    account.initial_balance = dec!(1250.75);
    let id = db.insert_account(&account).unwrap();

    let mut fetched = db.get_account_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.name, "Nubank");
    assert_eq!(fetched.account_type, AccountType::Checking);
    assert_eq!(fetched.currency, "BRL");
    assert_eq!(fetched.initial_balance, dec!(1250.75));

    fetched.name = "Nubank PJ".into();
    fetched.account_type = AccountType::CreditCard;
    db.update_account(&fetched).unwrap();
    let updated = db.get_account_by_id(id).unwrap().unwrap();
    assert_eq!(updated.name, "Nubank PJ");
    assert_eq!(updated.account_type, AccountType::CreditCard);

    db.delete_account(id).unwrap();
    assert!(db.get_account_by_id(id).unwrap().is_none());
}

#[test]
fn test_account_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_account_by_id(99999).unwrap().is_none());
}

#[test]
fn test_update_missing_account_fails() {
    let db = Database::open_in_memory().unwrap();
    let mut account = Account::new("Ghost".into(), AccountType::Cash);
    assert!(db.update_account(&account).is_err());
    account.id = Some(4242);
    assert!(db.update_account(&account).is_err());
}

#[test]
fn test_delete_missing_rows_fails() {
    let db = Database::open_in_memory().unwrap();
    let err = db.delete_transaction(999).unwrap_err();
    assert!(err.to_string().contains("Transaction 999 not found"));
    assert!(db.delete_account(999).is_err());
    assert!(db.delete_category(999).is_err());
    assert_eq!(db.get_categories().unwrap().len(), 9);
}

#[test]
fn test_accounts_sorted_by_name() {
    let db = Database::open_in_memory().unwrap();
    for name in ["Poupança", "Carteira", "Itaú"] {
        db.insert_account(&Account::new(name.into(), AccountType::Savings))
            .unwrap();
    }
    let names: Vec<String> = db
        .get_accounts()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_delete_account_with_transactions_fails() {
    let db = Database::open_in_memory().unwrap();
    let account_id = db
        .insert_account(&Account::new("Conta".into(), AccountType::Checking))
        .unwrap();
    let txn = Transaction::new(account_id, "2024-01-10".into(), "Café".into(), dec!(-8));
    db.insert_transaction(&txn).unwrap();

    assert!(db.delete_account(account_id).is_err());
    assert!(db.get_account_by_id(account_id).unwrap().is_some());
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_category_crud() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_category(&Category::new("Pets".into(), CategoryType::Expense))
        .unwrap();

    let mut cat = db.get_category_by_id(id).unwrap().unwrap();
    assert_eq!(cat.name, "Pets");
    assert_eq!(cat.category_type, CategoryType::Expense);

    cat.name = "Animais".into();
    db.update_category(&cat).unwrap();
    assert_eq!(db.get_category_by_id(id).unwrap().unwrap().name, "Animais");

    db.delete_category(id).unwrap();
    assert!(db.get_category_by_id(id).unwrap().is_none());
}

#[test]
fn test_duplicate_category_name_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .insert_category(&Category::new("Lazer".into(), CategoryType::Expense))
        .unwrap_err();
    assert!(err.to_string().contains("Lazer"));
}

#[test]
fn test_delete_category_uncategorizes_transactions() {
    let db = Database::open_in_memory().unwrap();
    let account_id = db
        .insert_account(&Account::new("Conta".into(), AccountType::Checking))
        .unwrap();
    let cat_id = db
        .insert_category(&Category::new("Assinaturas".into(), CategoryType::Expense))
        .unwrap();
    let mut txn = Transaction::new(account_id, "2024-02-01".into(), "Streaming".into(), dec!(-39.90));
    txn.category_id = Some(cat_id);
    let txn_id = db.insert_transaction(&txn).unwrap();

    db.delete_category(cat_id).unwrap();
    let fetched = db.get_transaction_by_id(txn_id).unwrap().unwrap();
    assert!(fetched.category_id.is_none());
}

// ── Transactions ──────────────────────────────────────────────

fn setup_test_data(db: &mut Database) -> i64 {
    let account_id = db
        .insert_account(&Account::new("Conta".into(), AccountType::Checking))
        .unwrap();
    let txns = vec![
        Transaction::new(account_id, "2024-01-10".into(), "Padaria".into(), dec!(-5.25)),
        Transaction::new(account_id, "2024-01-15".into(), "Farmácia".into(), dec!(-42.99)),
        Transaction::new(account_id, "2024-01-20".into(), "Salário".into(), dec!(3000.00)),
        Transaction::new(account_id, "2024-02-05".into(), "Aluguel".into(), dec!(-1200.00)),
    ];
    assert_eq!(db.insert_transactions_batch(&txns).unwrap(), 4);
    account_id
}

#[test]
fn test_transaction_amounts_roundtrip_exactly() {
    let mut db = Database::open_in_memory().unwrap();
    setup_test_data(&mut db);
    let total: Decimal = db
        .get_transactions(None, None)
        .unwrap()
        .iter()
        .map(|t| t.amount)
        .sum();
    assert_eq!(total, dec!(1751.76));
}

#[test]
fn test_get_transactions_ordered_newest_first() {
    let mut db = Database::open_in_memory().unwrap();
    setup_test_data(&mut db);
    let txns = db.get_transactions(None, None).unwrap();
    assert_eq!(txns.len(), 4);
    assert_eq!(txns[0].description, "Aluguel");
    assert_eq!(txns[3].description, "Padaria");
}

#[test]
fn test_get_transactions_by_month() {
    let mut db = Database::open_in_memory().unwrap();
    setup_test_data(&mut db);
    let jan = db
        .get_transactions(None, MonthKey::new(2024, 1))
        .unwrap();
    assert_eq!(jan.len(), 3);
    let mar = db
        .get_transactions(None, MonthKey::new(2024, 3))
        .unwrap();
    assert!(mar.is_empty());
}

#[test]
fn test_get_transactions_by_account() {
    let mut db = Database::open_in_memory().unwrap();
    let first = setup_test_data(&mut db);
    let other = db
        .insert_account(&Account::new("Outra".into(), AccountType::Cash))
        .unwrap();
    db.insert_transaction(&Transaction::new(
        other,
        "2024-01-11".into(),
        "Feira".into(),
        dec!(-30),
    ))
    .unwrap();

    assert_eq!(db.get_transactions(Some(first), None).unwrap().len(), 4);
    assert_eq!(db.get_transactions(Some(other), None).unwrap().len(), 1);
    assert_eq!(db.get_transaction_count().unwrap(), 5);
}

#[test]
fn test_update_and_delete_transaction() {
    let mut db = Database::open_in_memory().unwrap();
    setup_test_data(&mut db);
    let mut txn = db.get_transactions(None, None).unwrap().remove(0);
    let id = txn.id.unwrap();

    txn.amount = dec!(-1350.00);
    txn.description = "Aluguel + condomínio".into();
    db.update_transaction(&txn).unwrap();
    let fetched = db.get_transaction_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(-1350.00));
    assert_eq!(fetched.description, "Aluguel + condomínio");

    db.delete_transaction(id).unwrap();
    assert!(db.get_transaction_by_id(id).unwrap().is_none());
    assert_eq!(db.get_transaction_count().unwrap(), 3);
    assert!(db.delete_transaction(id).is_err());
}

#[test]
fn test_undated_transaction_is_stored() {
    let db = Database::open_in_memory().unwrap();
    let account_id = db
        .insert_account(&Account::new("Conta".into(), AccountType::Checking))
        .unwrap();
    let id = db
        .insert_transaction(&Transaction::new(account_id, String::new(), "Sem data".into(), dec!(-1)))
        .unwrap();
    let fetched = db.get_transaction_by_id(id).unwrap().unwrap();
    assert!(fetched.date().is_none());
}

#[test]
fn test_transaction_requires_existing_account() {
    let db = Database::open_in_memory().unwrap();
    let txn = Transaction::new(777, "2024-01-01".into(), "Órfã".into(), dec!(1));
    assert!(db.insert_transaction(&txn).is_err());
}
