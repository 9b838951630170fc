// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::required_arg;
use anyhow::{bail, Result};
use serde_json::json;

pub fn handle(s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(s, sub),
        Some(("rent", sub)) => export_rent(s, sub),
        _ => Ok(()),
    }
}

fn format_arg(sub: &clap::ArgMatches) -> Result<String> {
    let fmt = required_arg(sub, "format")?.to_lowercase();
    match fmt.as_str() {
        "csv" | "json" => Ok(fmt),
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
}

fn export_expenses(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = format_arg(sub)?;
    let out = required_arg(sub, "out")?;
    let expenses = s.store.expenses(s.building_id())?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "category", "amount", "payment_method", "notes"])?;
            for e in &expenses {
                wtr.write_record([
                    e.id.clone(),
                    e.date.to_string(),
                    e.category.as_str().to_string(),
                    e.amount.to_string(),
                    e.payment_method.as_str().to_string(),
                    e.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&expenses)?)?;
        }
    }
    tracing::info!(building = s.building_id(), count = expenses.len(), out, "exported expenses");
    println!("Exported {} expenses to {}", expenses.len(), out);
    Ok(())
}

fn export_rent(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = format_arg(sub)?;
    let out = required_arg(sub, "out")?;
    let flats = s.store.flats(s.building_id())?;
    let payments = s.store.rent_payments(s.building_id())?;
    let flat_number = |flat_id: &str| {
        flats
            .iter()
            .find(|f| f.id == flat_id)
            .map(|f| f.flat_number.clone())
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "flat", "month", "status", "amount", "paid_date", "notes",
            ])?;
            for p in &payments {
                wtr.write_record([
                    flat_number(&p.flat_id).unwrap_or_else(|| p.flat_id.clone()),
                    p.month.clone(),
                    p.status.as_str().to_string(),
                    p.amount.to_string(),
                    p.paid_date.map(|d| d.to_string()).unwrap_or_default(),
                    p.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = payments
                .iter()
                .map(|p| {
                    json!({
                        "flat": flat_number(&p.flat_id),
                        "flatId": p.flat_id,
                        "month": p.month,
                        "status": p.status,
                        "amount": p.amount,
                        "paidDate": p.paid_date,
                        "notes": p.notes,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    tracing::info!(building = s.building_id(), count = payments.len(), out, "exported rent payments");
    println!("Exported {} rent payments to {}", payments.len(), out);
    Ok(())
}
