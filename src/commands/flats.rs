// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::generator::rent_for;
use crate::models::{Flat, FlatType, FlatUpdate, FlatWithRent, NewFlat};
use crate::session::Session;
use crate::stats;
use crate::utils::{
    fmt_money, maybe_print_json, optional_arg, parse_decimal, pretty_table, required_arg,
    CURRENCY,
};
use anyhow::{bail, Context, Result};
use serde_json::json;

pub fn handle(s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(s, sub)?,
        Some(("show", sub)) => show(s, sub)?,
        Some(("add", sub)) => add(s, sub)?,
        Some(("edit", sub)) => edit(s, sub)?,
        Some(("rm", sub)) => remove(s, sub)?,
        _ => {}
    }
    Ok(())
}

/// Finds a flat of the selected building by id or flat number.
pub fn resolve_flat(s: &Session, key: &str) -> Result<Flat> {
    s.store
        .find_flat(s.building_id(), key)?
        .with_context(|| format!("Flat '{}' not found in {}", key, s.building_id()))
}

pub fn flat_rows(flats: &[FlatWithRent]) -> Vec<Vec<String>> {
    flats
        .iter()
        .map(|f| {
            vec![
                f.flat.flat_number.clone(),
                f.flat.floor.to_string(),
                f.flat.r#type.label().to_string(),
                f.flat.tenant_name.clone().unwrap_or_else(|| "(vacant)".into()),
                f.flat.tenant_phone.clone().unwrap_or_default(),
                format!("{:.2}", f.flat.monthly_rent),
                f.current_month_status.label().to_string(),
                f.last_payment_date.map(|d| d.to_string()).unwrap_or_default(),
                format!("{:.2}", f.total_due),
            ]
        })
        .collect()
}

pub const FLAT_HEADERS: &[&str] = &[
    "Flat", "Floor", "Type", "Tenant", "Phone", "Rent", "Status", "Last paid", "Due",
];

fn list(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let flats = s.store.flats_with_rent_status(s.building_id())?;
    if !maybe_print_json(json_flag, jsonl_flag, &flats)? {
        println!("{}", pretty_table(FLAT_HEADERS, flat_rows(&flats)));
    }
    Ok(())
}

fn show(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let flat = resolve_flat(s, required_arg(sub, "flat")?)?;
    let history = s.store.rent_history(s.building_id(), &flat.id)?;
    let with_rent = stats::flat_with_rent(&flat, &history, s.store.today());
    let payload = json!({ "flat": with_rent, "history": history });
    if maybe_print_json(json_flag, jsonl_flag, &payload)? {
        return Ok(());
    }
    println!("{}", pretty_table(FLAT_HEADERS, flat_rows(&[with_rent])));
    if history.is_empty() {
        println!("No rent history");
        return Ok(());
    }
    let rows = history
        .iter()
        .map(|p| {
            vec![
                p.month.clone(),
                p.status.label().to_string(),
                format!("{:.2}", p.amount),
                p.paid_date.map(|d| d.to_string()).unwrap_or_default(),
                p.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Status", "Amount", "Paid on", "Notes"], rows)
    );
    Ok(())
}

fn add(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let flat_type = required_arg(sub, "type")?.parse::<FlatType>()?;
    let monthly_rent = match optional_arg(sub, "rent") {
        Some(r) => parse_decimal(r)?,
        None => rent_for(flat_type),
    };
    let data = NewFlat {
        flat_number: required_arg(sub, "number")?.to_string(),
        floor: *sub.get_one::<u32>("floor").context("Missing --floor")?,
        r#type: flat_type,
        tenant_name: optional_arg(sub, "tenant").map(str::to_string),
        tenant_phone: optional_arg(sub, "phone").map(str::to_string),
        monthly_rent,
    };
    let flat = s.api.create_flat(s.building_id(), data)?;
    let flat = s.store.add_flat(s.building_id(), flat)?;
    println!(
        "Added flat {} (floor {}, {}, {}/month){}",
        flat.flat_number,
        flat.floor,
        flat.r#type.label(),
        fmt_money(&flat.monthly_rent, CURRENCY),
        flat.tenant_name
            .as_deref()
            .map(|t| format!(" let to {}", t))
            .unwrap_or_default()
    );
    Ok(())
}

fn edit(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let flat = resolve_flat(s, required_arg(sub, "flat")?)?;
    let vacate = sub.get_flag("vacate");
    let update = FlatUpdate {
        flat_number: optional_arg(sub, "number").map(str::to_string),
        floor: sub.get_one::<u32>("floor").copied(),
        r#type: optional_arg(sub, "type").map(str::parse::<FlatType>).transpose()?,
        tenant_name: if vacate {
            Some(None)
        } else {
            optional_arg(sub, "tenant").map(|t| Some(t.to_string()))
        },
        tenant_phone: if vacate {
            Some(None)
        } else {
            optional_arg(sub, "phone").map(|p| Some(p.to_string()))
        },
        monthly_rent: optional_arg(sub, "rent").map(parse_decimal).transpose()?,
    };

    if let Err(e) = s.api.update_flat(s.building_id(), &flat.id, &update) {
        tracing::warn!(error = %e, "backend flat update skipped");
    }
    match s.store.update_flat(s.building_id(), &flat.id, update)? {
        Some(updated) => {
            let tenant = updated.tenant_name.as_deref().unwrap_or("vacant");
            println!("Updated flat {} ({})", updated.flat_number, tenant);
        }
        None => bail!("Flat '{}' not found", flat.id),
    }
    Ok(())
}

fn remove(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let flat = resolve_flat(s, required_arg(sub, "flat")?)?;
    s.api.delete_flat(s.building_id(), &flat.id)?;
    if !s.store.remove_flat(s.building_id(), &flat.id)? {
        bail!("Flat '{}' not found", flat.id);
    }
    println!("Removed flat {}", flat.flat_number);
    Ok(())
}
