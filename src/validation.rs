// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::models::{ExpenseCategory, ExpenseForm, NewFlat, PaymentMethod};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// An expense form that passed every field check.
#[derive(Debug, Clone)]
pub struct ValidExpense {
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

pub fn expense_form(form: &ExpenseForm) -> Result<ValidExpense, ValidationError> {
    let amount = form
        .amount
        .trim()
        .parse::<Decimal>()
        .ok()
        .filter(|a| *a > Decimal::ZERO)
        .ok_or(ValidationError::Amount)?;
    let category = form.category.ok_or(ValidationError::Category)?;
    let date = NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::Date)?;
    let payment_method = form.payment_method.ok_or(ValidationError::PaymentMethod)?;
    let notes = Some(form.notes.trim().to_string()).filter(|n| !n.is_empty());
    Ok(ValidExpense {
        amount,
        category,
        date,
        payment_method,
        notes,
    })
}

pub fn new_flat(flat: &NewFlat) -> Result<(), ValidationError> {
    if flat.flat_number.trim().is_empty() {
        return Err(ValidationError::FlatNumber);
    }
    if flat.floor < 1 {
        return Err(ValidationError::Floor);
    }
    if flat.monthly_rent < Decimal::ZERO {
        return Err(ValidationError::Rent);
    }
    Ok(())
}

pub fn month(s: &str) -> Result<(), ValidationError> {
    let ok = s.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok();
    if ok {
        Ok(())
    } else {
        Err(ValidationError::Month(s.to_string()))
    }
}

pub fn payment_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::Amount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: &str) -> ExpenseForm {
        ExpenseForm {
            amount: amount.into(),
            category: Some(ExpenseCategory::Water),
            date: "2025-03-04".into(),
            payment_method: Some(PaymentMethod::Bank),
            notes: "  ".into(),
        }
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert_eq!(expense_form(&form("0")).unwrap_err(), ValidationError::Amount);
        assert_eq!(expense_form(&form("-5")).unwrap_err(), ValidationError::Amount);
        assert_eq!(expense_form(&form("abc")).unwrap_err(), ValidationError::Amount);
        let ok = expense_form(&form(" 1500.50 ")).unwrap();
        assert_eq!(ok.amount, Decimal::new(150050, 2));
        assert_eq!(ok.notes, None);
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut f = form("10");
        f.category = None;
        assert_eq!(expense_form(&f).unwrap_err(), ValidationError::Category);
        let mut f = form("10");
        f.date = "".into();
        assert_eq!(expense_form(&f).unwrap_err(), ValidationError::Date);
        let mut f = form("10");
        f.payment_method = None;
        assert_eq!(expense_form(&f).unwrap_err(), ValidationError::PaymentMethod);
    }

    #[test]
    fn month_keys() {
        assert!(month("2025-01").is_ok());
        assert!(month("2025-1").is_err());
        assert!(month("2025-00").is_err());
    }
}
