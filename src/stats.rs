// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    CategoryTotal, Expense, ExpenseCategory, ExpenseSummary, Flat, FlatWithRent, RentPayment,
    RentStatus, RentalSummary, TrendPoint,
};
use crate::utils::{month_key, same_month};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub const TREND_DAYS: i64 = 30;

/// Per-category totals for `today`'s month, in first-seen order.
fn current_month_totals(expenses: &[Expense], today: NaiveDate) -> Vec<(ExpenseCategory, Decimal)> {
    let mut totals: Vec<(ExpenseCategory, Decimal)> = Vec::new();
    for e in expenses.iter().filter(|e| same_month(e.date, today)) {
        match totals.iter_mut().find(|(c, _)| *c == e.category) {
            Some((_, sum)) => *sum += e.amount,
            None => totals.push((e.category, e.amount)),
        }
    }
    totals
}

pub fn expense_summary(expenses: &[Expense], today: NaiveDate) -> ExpenseSummary {
    let current: Vec<&Expense> = expenses
        .iter()
        .filter(|e| same_month(e.date, today))
        .collect();
    let total_current_month: Decimal = current.iter().map(|e| e.amount).sum();

    // strictly greater keeps the first category on ties
    let mut highest = (ExpenseCategory::Other, Decimal::ZERO);
    for (category, total) in current_month_totals(expenses, today) {
        if total > highest.1 {
            highest = (category, total);
        }
    }

    let mut buckets: HashMap<(i32, u32), Decimal> = HashMap::new();
    for e in expenses {
        *buckets
            .entry((e.date.year(), e.date.month()))
            .or_insert(Decimal::ZERO) += e.amount;
    }
    let average_monthly = if buckets.is_empty() {
        Decimal::ZERO
    } else {
        buckets.values().copied().sum::<Decimal>() / Decimal::from(buckets.len())
    };

    ExpenseSummary {
        total_current_month,
        total_transactions: current.len(),
        highest_category: highest.0,
        highest_category_amount: highest.1,
        average_monthly,
    }
}

/// Daily totals from `today - 29` through `today`, always 30 points.
pub fn expense_trend(expenses: &[Expense], today: NaiveDate) -> Vec<TrendPoint> {
    let start = today - Duration::days(TREND_DAYS - 1);
    let mut points: Vec<TrendPoint> = (0..TREND_DAYS)
        .map(|i| {
            let date = start + Duration::days(i);
            TrendPoint {
                date,
                amount: Decimal::ZERO,
                formatted_date: date.format("%d %b").to_string(),
            }
        })
        .collect();
    for e in expenses {
        if let Some(p) = points.iter_mut().find(|p| p.date == e.date) {
            p.amount += e.amount;
        }
    }
    points
}

/// Current-month spend per category, largest first; empty categories omitted.
pub fn category_breakdown(expenses: &[Expense], today: NaiveDate) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = current_month_totals(expenses, today)
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    out
}

pub fn flat_with_rent(flat: &Flat, payments: &[RentPayment], today: NaiveDate) -> FlatWithRent {
    let current_key = month_key(today);
    let own: Vec<&RentPayment> = payments.iter().filter(|p| p.flat_id == flat.id).collect();

    let current_month_status = if !flat.is_occupied {
        RentStatus::Paid
    } else {
        own.iter()
            .find(|p| p.month == current_key)
            .map(|p| p.status)
            .unwrap_or(RentStatus::Pending)
    };

    let last_payment_date = own.iter().filter_map(|p| p.paid_date).max();

    let total_due = if flat.is_occupied {
        own.iter()
            .filter(|p| p.status.is_outstanding())
            .map(|p| flat.monthly_rent - p.amount)
            .sum()
    } else {
        Decimal::ZERO
    };

    FlatWithRent {
        flat: flat.clone(),
        current_month_status,
        last_payment_date,
        total_due,
    }
}

pub fn flats_with_rent_status(
    flats: &[Flat],
    payments: &[RentPayment],
    today: NaiveDate,
) -> Vec<FlatWithRent> {
    flats
        .iter()
        .map(|f| flat_with_rent(f, payments, today))
        .collect()
}

pub fn rental_summary(flats: &[FlatWithRent]) -> RentalSummary {
    let occupied: Vec<&FlatWithRent> = flats.iter().filter(|f| f.flat.is_occupied).collect();
    let count = |s: RentStatus| flats.iter().filter(|f| f.current_month_status == s).count();

    let expected_rent: Decimal = occupied.iter().map(|f| f.flat.monthly_rent).sum();
    // full rent is credited for every occupied flat marked paid this month
    let collected_rent: Decimal = occupied
        .iter()
        .filter(|f| f.current_month_status == RentStatus::Paid)
        .map(|f| f.flat.monthly_rent)
        .sum();
    let total_due: Decimal = flats.iter().map(|f| f.total_due).sum();

    let collection_rate = if expected_rent.is_zero() {
        0
    } else {
        let pct = (collected_rent / expected_rent * Decimal::from(100))
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        pct.to_u32().unwrap_or(0)
    };

    RentalSummary {
        total_flats: flats.len(),
        occupied_flats: occupied.len(),
        vacant_flats: flats.len() - occupied.len(),
        paid_count: count(RentStatus::Paid),
        pending_count: count(RentStatus::Pending),
        overdue_count: count(RentStatus::Overdue),
        partial_count: count(RentStatus::Partial),
        expected_rent,
        collected_rent,
        total_due,
        collection_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlatType, PaymentMethod};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn exp(category: ExpenseCategory, amount: i64, date: NaiveDate) -> Expense {
        Expense {
            id: format!("e-{}-{}", category, date),
            amount: Decimal::from(amount),
            category,
            date,
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at: date.and_hms_opt(0, 0, 0).unwrap().and_utc(),
        }
    }

    #[test]
    fn summary_tie_keeps_first_category() {
        let today = day(2025, 3, 15);
        let list = vec![
            exp(ExpenseCategory::Water, 100, day(2025, 3, 2)),
            exp(ExpenseCategory::Lift, 100, day(2025, 3, 3)),
        ];
        let s = expense_summary(&list, today);
        assert_eq!(s.highest_category, ExpenseCategory::Water);
        assert_eq!(s.highest_category_amount, Decimal::from(100));
    }

    #[test]
    fn vacant_flats_count_as_paid_in_summary() {
        let today = day(2025, 3, 15);
        let vacant = Flat {
            id: "f1".into(),
            flat_number: "101".into(),
            floor: 1,
            r#type: FlatType::Studio,
            tenant_name: None,
            tenant_phone: None,
            monthly_rent: Decimal::from(25_000),
            is_occupied: false,
        };
        let rows = flats_with_rent_status(&[vacant], &[], today);
        let s = rental_summary(&rows);
        assert_eq!(s.paid_count, 1);
        assert_eq!(s.collected_rent, Decimal::ZERO);
        assert_eq!(s.collection_rate, 0);
    }
}
