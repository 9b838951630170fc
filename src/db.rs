// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

/// Opens a fresh session database. Nothing is written to disk; the data
/// lives exactly as long as the returned connection.
pub fn open_session() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    -- (building, collection) pairs that have been generated already
    CREATE TABLE IF NOT EXISTS materialized(
        building_id TEXT NOT NULL,
        collection TEXT NOT NULL,
        PRIMARY KEY(building_id, collection)
    );

    -- listed by seq DESC: the newest insert is always first
    CREATE TABLE IF NOT EXISTS expenses(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        building_id TEXT NOT NULL,
        id TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        payment_method TEXT NOT NULL,
        notes TEXT,
        created_at TEXT NOT NULL,
        UNIQUE(building_id, id)
    );

    CREATE TABLE IF NOT EXISTS flats(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        building_id TEXT NOT NULL,
        id TEXT NOT NULL,
        flat_number TEXT NOT NULL,
        floor INTEGER NOT NULL CHECK(floor >= 1),
        type TEXT NOT NULL,
        tenant_name TEXT,
        tenant_phone TEXT,
        monthly_rent TEXT NOT NULL,
        is_occupied INTEGER NOT NULL,
        UNIQUE(building_id, id),
        UNIQUE(building_id, flat_number),
        CHECK(is_occupied = (tenant_name IS NOT NULL))
    );

    -- flat_id is a reference, not a foreign key: removing a flat keeps its history
    CREATE TABLE IF NOT EXISTS rent_payments(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        building_id TEXT NOT NULL,
        id TEXT NOT NULL,
        flat_id TEXT NOT NULL,
        amount TEXT NOT NULL,
        month TEXT NOT NULL,
        paid_date TEXT,
        status TEXT NOT NULL CHECK(status IN ('paid','pending','overdue','partial')),
        notes TEXT,
        UNIQUE(building_id, flat_id, month)
    );
    CREATE INDEX IF NOT EXISTS idx_rent_payments_flat ON rent_payments(building_id, flat_id);

    CREATE TABLE IF NOT EXISTS expense_types(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        building_id TEXT NOT NULL,
        name TEXT NOT NULL,
        UNIQUE(building_id, name)
    );
    "#,
    )
}
