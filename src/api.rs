// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stand-in for the hosted backend.
//!
//! Reads are not available yet and fail with [`ApiError::NotImplemented`];
//! the session store serves them instead. Writes build the record the
//! backend would return so callers can cache it.

use crate::error::ApiError;
use crate::models::{
    Expense, ExpenseCategory, ExpenseForm, Flat, FlatUpdate, NewFlat, PaymentRequest, RentPayment,
    RentStatus,
};
use crate::validation;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cell::Cell;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub request: Duration,
    pub create_expense: Duration,
    pub settings: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(500),
            create_expense: Duration::from_millis(800),
            settings: Duration::from_millis(300),
        }
    }
}

impl Latency {
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    pub fn uniform(d: Duration) -> Self {
        Self {
            request: d,
            create_expense: d,
            settings: d,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSettings {
    pub expense_categories: Vec<ExpenseCategory>,
    pub custom_expense_types: Vec<String>,
}

pub struct RemoteApi {
    latency: Latency,
    seq: Cell<u64>,
}

impl RemoteApi {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            seq: Cell::new(0),
        }
    }

    fn wait(&self, d: Duration) {
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }

    // millisecond stamp plus a counter, unique within the session
    fn next_stamp(&self) -> String {
        let n = self.seq.get() + 1;
        self.seq.set(n);
        format!("{}{:03}", Utc::now().timestamp_millis(), n % 1000)
    }

    pub fn fetch_building_expenses(&self, building_id: &str) -> Result<Vec<Expense>, ApiError> {
        self.wait(self.latency.request);
        tracing::debug!(building = building_id, "fetch expenses");
        Err(ApiError::NotImplemented("using mock data"))
    }

    pub fn create_expense(&self, form: &ExpenseForm) -> Result<Expense, ApiError> {
        self.wait(self.latency.create_expense);
        let valid = validation::expense_form(form)?;
        let expense = Expense {
            id: format!("exp-{}", self.next_stamp()),
            amount: valid.amount,
            category: valid.category,
            date: valid.date,
            payment_method: valid.payment_method,
            notes: valid.notes,
            created_at: Utc::now(),
        };
        tracing::info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "created expense");
        Ok(expense)
    }

    pub fn update_expense(
        &self,
        building_id: &str,
        expense_id: &str,
        _form: &ExpenseForm,
    ) -> Result<Expense, ApiError> {
        self.wait(self.latency.request);
        tracing::debug!(building = building_id, id = expense_id, "update expense");
        Err(ApiError::NotImplemented("expense updates"))
    }

    pub fn delete_expense(&self, building_id: &str, expense_id: &str) -> Result<(), ApiError> {
        self.wait(self.latency.request);
        tracing::info!(building = building_id, id = expense_id, "deleted expense");
        Ok(())
    }

    pub fn fetch_building_flats(&self, building_id: &str) -> Result<Vec<Flat>, ApiError> {
        self.wait(self.latency.request);
        tracing::debug!(building = building_id, "fetch flats");
        Err(ApiError::NotImplemented("using mock data"))
    }

    pub fn create_flat(&self, building_id: &str, data: NewFlat) -> Result<Flat, ApiError> {
        self.wait(self.latency.request);
        validation::new_flat(&data)?;
        let flat = data.into_flat(format!("{}-flat-{}", building_id, self.next_stamp()));
        tracing::info!(building = building_id, id = %flat.id, "created flat");
        Ok(flat)
    }

    pub fn update_flat(
        &self,
        building_id: &str,
        flat_id: &str,
        update: &FlatUpdate,
    ) -> Result<Flat, ApiError> {
        self.wait(self.latency.request);
        tracing::debug!(building = building_id, id = flat_id, ?update, "update flat");
        Err(ApiError::NotImplemented("flat updates"))
    }

    pub fn delete_flat(&self, building_id: &str, flat_id: &str) -> Result<(), ApiError> {
        self.wait(self.latency.request);
        tracing::info!(building = building_id, id = flat_id, "deleted flat");
        Ok(())
    }

    pub fn fetch_rent_payments(&self, building_id: &str) -> Result<Vec<RentPayment>, ApiError> {
        self.wait(self.latency.request);
        tracing::debug!(building = building_id, "fetch rent payments");
        Err(ApiError::NotImplemented("using mock data"))
    }

    /// Builds the payment record for `req`. The id is derived from the flat
    /// and month, so re-recording a month yields the same id.
    pub fn record_rent_payment(
        &self,
        building_id: &str,
        req: &PaymentRequest,
        today: NaiveDate,
    ) -> Result<RentPayment, ApiError> {
        self.wait(self.latency.request);
        validation::month(&req.month)?;
        validation::payment_amount(req.amount)?;
        let money_received = match req.status {
            RentStatus::Paid => true,
            RentStatus::Partial => req.amount > Decimal::ZERO,
            RentStatus::Pending | RentStatus::Overdue => false,
        };
        let payment = RentPayment {
            id: format!("{}-rent-{}", req.flat_id, req.month),
            flat_id: req.flat_id.clone(),
            amount: req.amount,
            month: req.month.clone(),
            paid_date: money_received.then_some(today),
            status: req.status,
            notes: req.notes.clone().filter(|n| !n.trim().is_empty()),
        };
        tracing::info!(building = building_id, id = %payment.id, status = %payment.status, "recorded rent payment");
        Ok(payment)
    }

    pub fn fetch_building_settings(&self, building_id: &str) -> Result<BuildingSettings, ApiError> {
        self.wait(self.latency.settings);
        tracing::debug!(building = building_id, "fetch settings");
        Err(ApiError::NotImplemented("using mock data"))
    }

    pub fn update_building_settings(
        &self,
        building_id: &str,
        custom_expense_types: &[String],
    ) -> Result<(), ApiError> {
        self.wait(self.latency.request);
        tracing::info!(building = building_id, types = ?custom_expense_types, "updated settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_reads_are_not_implemented() {
        let api = RemoteApi::new(Latency::none());
        assert!(matches!(
            api.fetch_building_expenses("bin-ehsan-1"),
            Err(ApiError::NotImplemented(_))
        ));
        assert!(matches!(
            api.fetch_rent_payments("bin-ehsan-1"),
            Err(ApiError::NotImplemented(_))
        ));
        assert!(matches!(
            api.fetch_building_flats("bin-ehsan-1"),
            Err(ApiError::NotImplemented(_))
        ));
        assert!(matches!(
            api.fetch_building_settings("bin-ehsan-1"),
            Err(ApiError::NotImplemented(_))
        ));
        let update = FlatUpdate {
            tenant_name: Some(None),
            ..Default::default()
        };
        assert!(matches!(
            api.update_flat("bin-ehsan-1", "x", &update),
            Err(ApiError::NotImplemented(_))
        ));
        assert!(api.delete_flat("bin-ehsan-1", "x").is_ok());
        assert!(api.update_building_settings("bin-ehsan-1", &[]).is_ok());
    }

    #[test]
    fn create_expense_validates_the_form() {
        let api = RemoteApi::new(Latency::none());
        let mut form = ExpenseForm {
            amount: "abc".into(),
            category: Some(ExpenseCategory::Water),
            date: "2025-03-10".into(),
            payment_method: Some(crate::models::PaymentMethod::Cash),
            notes: "  ".into(),
        };
        assert!(matches!(
            api.create_expense(&form),
            Err(ApiError::Validation(crate::error::ValidationError::Amount))
        ));
        form.amount = "1200.50".into();
        let e = api.create_expense(&form).unwrap();
        assert!(e.id.starts_with("exp-"));
        assert_eq!(e.amount, Decimal::new(120050, 2));
        assert!(e.notes.is_none());
        assert!(matches!(
            api.update_expense("bin-ehsan-1", &e.id, &form),
            Err(ApiError::NotImplemented(_))
        ));
    }

    #[test]
    fn partial_with_zero_amount_has_no_paid_date() {
        let api = RemoteApi::new(Latency::none());
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let mut req = PaymentRequest {
            flat_id: "f1".into(),
            amount: Decimal::ZERO,
            status: RentStatus::Partial,
            month: "2025-03".into(),
            notes: None,
        };
        let p = api.record_rent_payment("bin-ehsan-1", &req, today).unwrap();
        assert_eq!(p.id, "f1-rent-2025-03");
        assert!(p.paid_date.is_none());
        req.status = RentStatus::Paid;
        req.amount = Decimal::from(25_000);
        let p = api.record_rent_payment("bin-ehsan-1", &req, today).unwrap();
        assert_eq!(p.paid_date, Some(today));
        req.month = "2025/03".into();
        assert!(api.record_rent_payment("bin-ehsan-1", &req, today).is_err());
    }

    #[test]
    fn stamps_are_unique() {
        let api = RemoteApi::new(Latency::none());
        let a = api.next_stamp();
        let b = api.next_stamp();
        assert_ne!(a, b);
    }
}
