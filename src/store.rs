// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-building session store.
//!
//! Each building's expenses, flats and rent payments are generated on first
//! read and cached in an in-memory SQLite database owned by the [`Store`].
//! Mutations apply to that cache only.

use crate::buildings::building;
use crate::db;
use crate::error::{StoreError, ValidationError};
use crate::generator::{self, GeneratorConfig};
use crate::models::{
    Building, Expense, Flat, FlatUpdate, FlatWithRent, RentPayment, RentalSummary,
};
use crate::stats;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

const EXPENSES: &str = "expenses";
const FLATS: &str = "flats";

pub struct Store {
    conn: Connection,
    today: NaiveDate,
    cfg: GeneratorConfig,
}

fn decode<T: FromStr>(column: &'static str, value: String) -> Result<T, StoreError> {
    value
        .parse::<T>()
        .map_err(|_| StoreError::Corrupt { column, value })
}

fn decode_opt<T: FromStr>(column: &'static str, value: Option<String>) -> Result<Option<T>, StoreError> {
    value.map(|v| decode(column, v)).transpose()
}

type ExpenseRaw = (String, String, String, String, String, Option<String>, String);
type FlatRaw = (String, String, u32, String, Option<String>, Option<String>, String, bool);
type PaymentRaw = (String, String, String, String, Option<String>, String, Option<String>);

fn expense_from_raw(r: ExpenseRaw) -> Result<Expense, StoreError> {
    let (id, amount, category, date, method, notes, created_at) = r;
    Ok(Expense {
        id,
        amount: decode("amount", amount)?,
        category: decode("category", category)?,
        date: decode("date", date)?,
        payment_method: decode("payment_method", method)?,
        notes,
        created_at: decode("created_at", created_at)?,
    })
}

fn flat_from_raw(r: FlatRaw) -> Result<Flat, StoreError> {
    let (id, flat_number, floor, flat_type, tenant_name, tenant_phone, rent, is_occupied) = r;
    Ok(Flat {
        id,
        flat_number,
        floor,
        r#type: decode("type", flat_type)?,
        tenant_name,
        tenant_phone,
        monthly_rent: decode("monthly_rent", rent)?,
        is_occupied,
    })
}

fn payment_from_raw(r: PaymentRaw) -> Result<RentPayment, StoreError> {
    let (id, flat_id, amount, month, paid_date, status, notes) = r;
    Ok(RentPayment {
        id,
        flat_id,
        amount: decode("amount", amount)?,
        month,
        paid_date: decode_opt("paid_date", paid_date)?,
        status: decode("status", status)?,
        notes,
    })
}

fn insert_expense(conn: &Connection, building_id: &str, e: &Expense) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO expenses(building_id, id, amount, category, date, payment_method, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            building_id,
            e.id,
            e.amount.to_string(),
            e.category.as_str(),
            e.date.to_string(),
            e.payment_method.as_str(),
            e.notes,
            e.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn insert_flat(conn: &Connection, building_id: &str, f: &Flat) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO flats(building_id, id, flat_number, floor, type, tenant_name, tenant_phone, monthly_rent, is_occupied)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            building_id,
            f.id,
            f.flat_number,
            f.floor,
            f.r#type.as_str(),
            f.tenant_name,
            f.tenant_phone,
            f.monthly_rent.to_string(),
            f.is_occupied,
        ],
    )?;
    Ok(())
}

fn upsert_payment(conn: &Connection, building_id: &str, p: &RentPayment) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO rent_payments(building_id, id, flat_id, amount, month, paid_date, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(building_id, flat_id, month) DO UPDATE SET
            id=excluded.id,
            amount=excluded.amount,
            paid_date=excluded.paid_date,
            status=excluded.status,
            notes=excluded.notes",
        params![
            building_id,
            p.id,
            p.flat_id,
            p.amount.to_string(),
            p.month,
            p.paid_date.map(|d| d.to_string()),
            p.status.as_str(),
            p.notes,
        ],
    )?;
    Ok(())
}

impl Store {
    pub fn new(today: NaiveDate) -> Result<Self, StoreError> {
        Self::with_config(today, GeneratorConfig::default())
    }

    pub fn with_config(today: NaiveDate, cfg: GeneratorConfig) -> Result<Self, StoreError> {
        Ok(Self {
            conn: db::open_session()?,
            today,
            cfg,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn is_materialized(&self, building_id: &str, collection: &str) -> Result<bool, StoreError> {
        let hit: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM materialized WHERE building_id=?1 AND collection=?2",
                params![building_id, collection],
                |r| r.get(0),
            )
            .optional()?;
        Ok(hit.is_some())
    }

    fn mark_materialized(conn: &Connection, building_id: &str, collection: &str) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO materialized(building_id, collection) VALUES (?1, ?2)",
            params![building_id, collection],
        )?;
        Ok(())
    }

    fn ensure_expenses(&self, b: &Building) -> Result<(), StoreError> {
        if self.is_materialized(b.id, EXPENSES)? {
            return Ok(());
        }
        let generated = generator::generate_expenses(b, self.today, &self.cfg);
        let tx = self.conn.unchecked_transaction()?;
        // oldest first so that seq DESC reproduces the newest-first order
        for e in generated.iter().rev() {
            insert_expense(&tx, b.id, e)?;
        }
        Self::mark_materialized(&tx, b.id, EXPENSES)?;
        tx.commit()?;
        Ok(())
    }

    /// Flats and their rent history are generated together, so payments
    /// always come from the seeded flat list and never from session edits.
    fn ensure_flats(&self, b: &Building) -> Result<(), StoreError> {
        if self.is_materialized(b.id, FLATS)? {
            return Ok(());
        }
        let flats = generator::generate_flats(b, b.unit_count, &self.cfg);
        let payments = generator::generate_rent_payments(b, &flats, self.today, &self.cfg);
        let tx = self.conn.unchecked_transaction()?;
        for f in &flats {
            insert_flat(&tx, b.id, f)?;
        }
        for p in &payments {
            upsert_payment(&tx, b.id, p)?;
        }
        Self::mark_materialized(&tx, b.id, FLATS)?;
        tx.commit()?;
        Ok(())
    }

    /// Drops a building's cached collections; the next read regenerates them.
    pub fn reset(&self, building_id: &str) -> Result<(), StoreError> {
        let b = building(building_id)?;
        let tx = self.conn.unchecked_transaction()?;
        for table in ["expenses", "flats", "rent_payments", "materialized"] {
            tx.execute(
                &format!("DELETE FROM {} WHERE building_id=?1", table),
                params![b.id],
            )?;
        }
        tx.commit()?;
        tracing::info!(building = b.id, "reset building cache");
        Ok(())
    }

    // ---- expenses ----

    pub fn expenses(&self, building_id: &str) -> Result<Vec<Expense>, StoreError> {
        let b = building(building_id)?;
        self.ensure_expenses(b)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category, date, payment_method, notes, created_at
             FROM expenses WHERE building_id=?1 ORDER BY seq DESC",
        )?;
        let rows = stmt.query_map::<ExpenseRaw, _, _>(params![b.id], |r| {
            Ok((
                r.get(0)?,
                r.get(1)?,
                r.get(2)?,
                r.get(3)?,
                r.get(4)?,
                r.get(5)?,
                r.get(6)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(expense_from_raw(row?)?);
        }
        Ok(out)
    }

    /// Puts `expense` at the front of the building's list.
    pub fn add_expense(&self, building_id: &str, expense: Expense) -> Result<Expense, StoreError> {
        let b = building(building_id)?;
        self.ensure_expenses(b)?;
        insert_expense(&self.conn, b.id, &expense)?;
        tracing::info!(building = b.id, id = %expense.id, amount = %expense.amount, "added expense");
        Ok(expense)
    }

    pub fn remove_expense(&self, building_id: &str, expense_id: &str) -> Result<bool, StoreError> {
        let b = building(building_id)?;
        self.ensure_expenses(b)?;
        let n = self.conn.execute(
            "DELETE FROM expenses WHERE building_id=?1 AND id=?2",
            params![b.id, expense_id],
        )?;
        if n > 0 {
            tracing::info!(building = b.id, id = expense_id, "removed expense");
        }
        Ok(n > 0)
    }

    // ---- flats ----

    fn load_flats(&self, building_id: &str) -> Result<Vec<Flat>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, flat_number, floor, type, tenant_name, tenant_phone, monthly_rent, is_occupied
             FROM flats WHERE building_id=?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map::<FlatRaw, _, _>(params![building_id], |r| {
            Ok((
                r.get(0)?,
                r.get(1)?,
                r.get(2)?,
                r.get(3)?,
                r.get(4)?,
                r.get(5)?,
                r.get(6)?,
                r.get(7)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(flat_from_raw(row?)?);
        }
        Ok(out)
    }

    pub fn flats(&self, building_id: &str) -> Result<Vec<Flat>, StoreError> {
        let b = building(building_id)?;
        self.ensure_flats(b)?;
        self.load_flats(b.id)
    }

    pub fn flat(&self, building_id: &str, flat_id: &str) -> Result<Option<Flat>, StoreError> {
        Ok(self
            .flats(building_id)?
            .into_iter()
            .find(|f| f.id == flat_id))
    }

    /// Looks a flat up by id or, failing that, by its flat number.
    pub fn find_flat(&self, building_id: &str, key: &str) -> Result<Option<Flat>, StoreError> {
        let key = key.trim();
        let flats = self.flats(building_id)?;
        let by_id = flats.iter().position(|f| f.id == key);
        let idx = by_id.or_else(|| flats.iter().position(|f| f.flat_number == key));
        Ok(idx.map(|i| flats[i].clone()))
    }

    fn check_flat_number(&self, b: &Building, number: &str, except_id: &str) -> Result<(), StoreError> {
        let taken: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM flats WHERE building_id=?1 AND flat_number=?2 AND id<>?3",
                params![b.id, number, except_id],
                |r| r.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(StoreError::DuplicateFlatNumber {
                building: b.id.to_string(),
                number: number.to_string(),
            });
        }
        Ok(())
    }

    pub fn add_flat(&self, building_id: &str, mut flat: Flat) -> Result<Flat, StoreError> {
        let b = building(building_id)?;
        self.ensure_flats(b)?;
        if flat.flat_number.trim().is_empty() {
            return Err(ValidationError::FlatNumber.into());
        }
        if flat.floor < 1 {
            return Err(ValidationError::Floor.into());
        }
        self.check_flat_number(b, &flat.flat_number, &flat.id)?;
        flat.is_occupied = flat.tenant_name.is_some();
        insert_flat(&self.conn, b.id, &flat)?;
        tracing::info!(building = b.id, id = %flat.id, number = %flat.flat_number, "added flat");
        Ok(flat)
    }

    pub fn remove_flat(&self, building_id: &str, flat_id: &str) -> Result<bool, StoreError> {
        let b = building(building_id)?;
        self.ensure_flats(b)?;
        let n = self.conn.execute(
            "DELETE FROM flats WHERE building_id=?1 AND id=?2",
            params![b.id, flat_id],
        )?;
        if n > 0 {
            tracing::info!(building = b.id, id = flat_id, "removed flat");
        }
        Ok(n > 0)
    }

    /// Merges `update` into the flat; `Ok(None)` when no flat has that id.
    pub fn update_flat(
        &self,
        building_id: &str,
        flat_id: &str,
        update: FlatUpdate,
    ) -> Result<Option<Flat>, StoreError> {
        let b = building(building_id)?;
        let Some(mut flat) = self.flat(b.id, flat_id)? else {
            return Ok(None);
        };
        flat.apply(update);
        if flat.flat_number.trim().is_empty() {
            return Err(ValidationError::FlatNumber.into());
        }
        if flat.floor < 1 {
            return Err(ValidationError::Floor.into());
        }
        self.check_flat_number(b, &flat.flat_number, &flat.id)?;
        self.conn.execute(
            "UPDATE flats SET flat_number=?3, floor=?4, type=?5, tenant_name=?6, tenant_phone=?7,
                monthly_rent=?8, is_occupied=?9
             WHERE building_id=?1 AND id=?2",
            params![
                b.id,
                flat.id,
                flat.flat_number,
                flat.floor,
                flat.r#type.as_str(),
                flat.tenant_name,
                flat.tenant_phone,
                flat.monthly_rent.to_string(),
                flat.is_occupied,
            ],
        )?;
        tracing::info!(building = b.id, id = flat_id, occupied = flat.is_occupied, "updated flat");
        Ok(Some(flat))
    }

    // ---- rent ----

    pub fn rent_payments(&self, building_id: &str) -> Result<Vec<RentPayment>, StoreError> {
        let b = building(building_id)?;
        self.ensure_flats(b)?;
        self.query_payments(
            "SELECT id, flat_id, amount, month, paid_date, status, notes
             FROM rent_payments WHERE building_id=?1 ORDER BY seq",
            params![b.id],
        )
    }

    /// Newest month first.
    pub fn rent_history(&self, building_id: &str, flat_id: &str) -> Result<Vec<RentPayment>, StoreError> {
        let b = building(building_id)?;
        self.ensure_flats(b)?;
        self.query_payments(
            "SELECT id, flat_id, amount, month, paid_date, status, notes
             FROM rent_payments WHERE building_id=?1 AND flat_id=?2 ORDER BY month DESC",
            params![b.id, flat_id],
        )
    }

    fn query_payments(
        &self,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<RentPayment>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map::<PaymentRaw, _, _>(args, |r| {
            Ok((
                r.get(0)?,
                r.get(1)?,
                r.get(2)?,
                r.get(3)?,
                r.get(4)?,
                r.get(5)?,
                r.get(6)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(payment_from_raw(row?)?);
        }
        Ok(out)
    }

    /// Inserts the payment or replaces the one already recorded for the
    /// same flat and month.
    pub fn upsert_rent_payment(
        &self,
        building_id: &str,
        payment: RentPayment,
    ) -> Result<RentPayment, StoreError> {
        let b = building(building_id)?;
        self.ensure_flats(b)?;
        crate::validation::month(&payment.month)?;
        upsert_payment(&self.conn, b.id, &payment)?;
        tracing::info!(
            building = b.id,
            flat = %payment.flat_id,
            month = %payment.month,
            status = %payment.status,
            "recorded rent payment"
        );
        Ok(payment)
    }

    pub fn flats_with_rent_status(&self, building_id: &str) -> Result<Vec<FlatWithRent>, StoreError> {
        let flats = self.flats(building_id)?;
        let payments = self.rent_payments(building_id)?;
        Ok(stats::flats_with_rent_status(&flats, &payments, self.today))
    }

    pub fn rental_summary(&self, building_id: &str) -> Result<RentalSummary, StoreError> {
        Ok(stats::rental_summary(&self.flats_with_rent_status(building_id)?))
    }

    // ---- settings ----

    pub fn custom_expense_types(&self, building_id: &str) -> Result<Vec<String>, StoreError> {
        let b = building(building_id)?;
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM expense_types WHERE building_id=?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![b.id], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Returns `false` when the type already exists.
    pub fn add_custom_expense_type(&self, building_id: &str, name: &str) -> Result<bool, StoreError> {
        let b = building(building_id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::ExpenseType.into());
        }
        let n = self.conn.execute(
            "INSERT OR IGNORE INTO expense_types(building_id, name) VALUES (?1, ?2)",
            params![b.id, name],
        )?;
        Ok(n > 0)
    }

    pub fn remove_custom_expense_type(&self, building_id: &str, name: &str) -> Result<bool, StoreError> {
        let b = building(building_id)?;
        let n = self.conn.execute(
            "DELETE FROM expense_types WHERE building_id=?1 AND name=?2",
            params![b.id, name.trim()],
        )?;
        Ok(n > 0)
    }
}
