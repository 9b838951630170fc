// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rentbook::error::StoreError;
use rentbook::models::{
    Expense, ExpenseCategory, Flat, FlatType, FlatUpdate, PaymentMethod, RentPayment, RentStatus,
};
use rentbook::store::Store;
use rust_decimal::Decimal;

const B1: &str = "bin-ehsan-1";
const B2: &str = "bin-ehsan-2";

fn setup() -> Store {
    Store::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()).unwrap()
}

fn expense(id: &str, amount: i64) -> Expense {
    Expense {
        id: id.to_string(),
        amount: Decimal::from(amount),
        category: ExpenseCategory::Water,
        date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        payment_method: PaymentMethod::Bank,
        notes: Some("Tanker".into()),
        created_at: Utc::now(),
    }
}

fn vacant_flat(id: &str, number: &str) -> Flat {
    Flat {
        id: id.to_string(),
        flat_number: number.to_string(),
        floor: 9,
        r#type: FlatType::Studio,
        tenant_name: None,
        tenant_phone: None,
        monthly_rent: Decimal::from(25_000),
        is_occupied: false,
    }
}

#[test]
fn reads_are_stable_until_mutated() {
    let store = setup();
    let first = store.expenses(B1).unwrap();
    assert_eq!(store.expenses(B1).unwrap(), first);
    assert_eq!(store.flats(B1).unwrap(), store.flats(B1).unwrap());
    assert_eq!(store.flats(B1).unwrap().len(), 12);
}

#[test]
fn add_expense_prepends_and_stays_per_building() {
    let store = setup();
    let before = store.expenses(B1).unwrap();
    let other_before = store.expenses(B2).unwrap();

    store.add_expense(B1, expense("exp-1", 1500)).unwrap();
    store.add_expense(B1, expense("exp-2", 700)).unwrap();

    let after = store.expenses(B1).unwrap();
    assert_eq!(after.len(), before.len() + 2);
    assert_eq!(after[0].id, "exp-2");
    assert_eq!(after[1].id, "exp-1");
    assert_eq!(&after[2..], &before[..]);
    assert_eq!(store.expenses(B2).unwrap(), other_before);
}

#[test]
fn remove_expense_reports_whether_it_existed() {
    let store = setup();
    store.add_expense(B1, expense("exp-x", 100)).unwrap();
    assert!(store.remove_expense(B1, "exp-x").unwrap());
    assert!(!store.remove_expense(B1, "exp-x").unwrap());
}

#[test]
fn unknown_building_is_an_error() {
    let store = setup();
    assert!(matches!(
        store.expenses("tower-9"),
        Err(StoreError::UnknownBuilding(_))
    ));
}

#[test]
fn update_flat_recomputes_occupancy() {
    let store = setup();
    store.add_flat(B1, vacant_flat("f-new", "901")).unwrap();

    let let_out = store
        .update_flat(
            B1,
            "f-new",
            FlatUpdate {
                tenant_name: Some(Some("Sana Malik".into())),
                tenant_phone: Some(Some("0300-1234567".into())),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(let_out.is_occupied);
    assert_eq!(store.flat(B1, "f-new").unwrap().unwrap(), let_out);

    let vacated = store
        .update_flat(
            B1,
            "f-new",
            FlatUpdate {
                tenant_name: Some(None),
                tenant_phone: Some(None),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(!vacated.is_occupied);
    assert!(vacated.tenant_name.is_none());

    let blank = store
        .update_flat(
            B1,
            "f-new",
            FlatUpdate {
                tenant_name: Some(Some("   ".into())),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(!blank.is_occupied);
}

#[test]
fn update_flat_with_unknown_id_changes_nothing() {
    let store = setup();
    let before = store.flats(B1).unwrap();
    let res = store
        .update_flat(
            B1,
            "no-such-flat",
            FlatUpdate {
                monthly_rent: Some(Decimal::from(1)),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(res.is_none());
    assert_eq!(store.flats(B1).unwrap(), before);
}

#[test]
fn duplicate_flat_numbers_are_rejected() {
    let store = setup();
    let err = store.add_flat(B1, vacant_flat("f-dup", "101")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateFlatNumber { .. }));
}

#[test]
fn find_flat_accepts_id_or_number() {
    let store = setup();
    let by_number = store.find_flat(B1, "101").unwrap().unwrap();
    let by_id = store.find_flat(B1, &by_number.id).unwrap().unwrap();
    assert_eq!(by_id, by_number);
    assert!(store.find_flat(B1, "999").unwrap().is_none());
}

#[test]
fn new_flat_starts_without_rent_history() {
    let store = setup();
    let mut flat = vacant_flat("f-let", "903");
    flat.tenant_name = Some("Hamza Qureshi".into());
    flat.tenant_phone = Some("0321-7654321".into());
    let flat = store.add_flat(B1, flat).unwrap();
    assert!(flat.is_occupied);

    assert!(store.rent_history(B1, &flat.id).unwrap().is_empty());
    let row = store
        .flats_with_rent_status(B1)
        .unwrap()
        .into_iter()
        .find(|f| f.flat.id == flat.id)
        .unwrap();
    assert_eq!(row.current_month_status, RentStatus::Pending);
    assert_eq!(row.total_due, Decimal::ZERO);
}

#[test]
fn generated_rent_history_ignores_earlier_flat_edits() {
    let untouched = setup().rent_payments(B1).unwrap();
    assert!(!untouched.is_empty());

    let store = setup();
    let mut flat = vacant_flat("f-first", "904");
    flat.tenant_name = Some("Zara Siddiqui".into());
    store.add_flat(B1, flat).unwrap();
    let vacated = store.find_flat(B1, "101").unwrap().unwrap();
    store
        .update_flat(
            B1,
            &vacated.id,
            FlatUpdate {
                tenant_name: Some(None),
                tenant_phone: Some(None),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(store.rent_payments(B1).unwrap(), untouched);
}

#[test]
fn recording_a_month_twice_keeps_one_record() {
    let store = setup();
    let flat = store.add_flat(B1, vacant_flat("f-rent", "902")).unwrap();
    let mut payment = RentPayment {
        id: format!("{}-rent-2025-03", flat.id),
        flat_id: flat.id.clone(),
        amount: Decimal::ZERO,
        month: "2025-03".into(),
        paid_date: None,
        status: RentStatus::Pending,
        notes: None,
    };
    store.upsert_rent_payment(B1, payment.clone()).unwrap();
    payment.status = RentStatus::Partial;
    payment.amount = Decimal::from(10_000);
    payment.paid_date = NaiveDate::from_ymd_opt(2025, 3, 10);
    store.upsert_rent_payment(B1, payment.clone()).unwrap();
    payment.status = RentStatus::Paid;
    payment.amount = flat.monthly_rent;
    store.upsert_rent_payment(B1, payment.clone()).unwrap();

    let history = store.rent_history(B1, &flat.id).unwrap();
    assert_eq!(history, vec![payment]);
}

#[test]
fn upsert_rejects_malformed_month() {
    let store = setup();
    let payment = RentPayment {
        id: "x".into(),
        flat_id: "f".into(),
        amount: Decimal::ZERO,
        month: "2025-3".into(),
        paid_date: None,
        status: RentStatus::Pending,
        notes: None,
    };
    assert!(matches!(
        store.upsert_rent_payment(B1, payment),
        Err(StoreError::Validation(_))
    ));
}

#[test]
fn removing_a_flat_keeps_its_payments() {
    let store = setup();
    let occupied = store
        .flats(B1)
        .unwrap()
        .into_iter()
        .find(|f| f.is_occupied)
        .unwrap();
    let before = store.rent_history(B1, &occupied.id).unwrap();
    assert!(!before.is_empty());

    assert!(store.remove_flat(B1, &occupied.id).unwrap());
    assert!(store.flat(B1, &occupied.id).unwrap().is_none());
    assert!(!store.remove_flat(B1, &occupied.id).unwrap());
    assert_eq!(store.rent_history(B1, &occupied.id).unwrap(), before);
    assert!(store
        .flats_with_rent_status(B1)
        .unwrap()
        .iter()
        .all(|f| f.flat.id != occupied.id));
}

#[test]
fn custom_expense_types_are_per_building() {
    let store = setup();
    assert!(store.add_custom_expense_type(B1, "Generator fuel").unwrap());
    assert!(!store.add_custom_expense_type(B1, " Generator fuel ").unwrap());
    assert!(store.add_custom_expense_type(B1, "Gardening").unwrap());
    assert!(matches!(
        store.add_custom_expense_type(B1, "  "),
        Err(StoreError::Validation(_))
    ));
    assert_eq!(
        store.custom_expense_types(B1).unwrap(),
        vec!["Generator fuel".to_string(), "Gardening".to_string()]
    );
    assert!(store.custom_expense_types(B2).unwrap().is_empty());
    assert!(store.remove_custom_expense_type(B1, "Gardening").unwrap());
    assert!(!store.remove_custom_expense_type(B1, "Gardening").unwrap());
}

#[test]
fn reset_regenerates_generated_data() {
    let store = setup();
    let generated = store.expenses(B1).unwrap();
    let flats = store.flats(B1).unwrap();
    store.add_expense(B1, expense("exp-gone", 10)).unwrap();
    store.remove_flat(B1, &flats[0].id).unwrap();

    store.reset(B1).unwrap();
    assert_eq!(store.expenses(B1).unwrap(), generated);
    assert_eq!(store.flats(B1).unwrap(), flats);
}
