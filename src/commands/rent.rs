// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::flats::{flat_rows, resolve_flat, FLAT_HEADERS};
use crate::models::{PaymentRequest, RentPayment, RentStatus};
use crate::session::Session;
use crate::utils::{
    fmt_money, maybe_print_json, month_key, optional_arg, parse_decimal, parse_month,
    pretty_table, required_arg, CURRENCY,
};
use anyhow::{bail, Result};
use rust_decimal::Decimal;

pub fn handle(s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("record", sub)) => {
            record(s, sub)?;
        }
        Some(("status", sub)) => status(s, sub)?,
        Some(("summary", sub)) => summary(s, sub)?,
        Some(("history", sub)) => history(s, sub)?,
        _ => {}
    }
    Ok(())
}

/// Records a month's rent, replacing whatever was recorded for that month.
/// Pending and overdue records always carry a zero amount.
pub fn record(s: &Session, sub: &clap::ArgMatches) -> Result<RentPayment> {
    let flat = resolve_flat(s, required_arg(sub, "flat")?)?;
    let status = required_arg(sub, "status")?.parse::<RentStatus>()?;
    let month = match optional_arg(sub, "month") {
        Some(m) => parse_month(m)?,
        None => month_key(s.store.today()),
    };
    let given = optional_arg(sub, "amount").map(parse_decimal).transpose()?;
    let amount = match status {
        RentStatus::Paid => given.unwrap_or(flat.monthly_rent),
        RentStatus::Pending | RentStatus::Overdue => {
            if given.is_some_and(|a| !a.is_zero()) {
                tracing::warn!(status = %status, "ignoring amount for unpaid status");
            }
            Decimal::ZERO
        }
        RentStatus::Partial => match given {
            Some(a) => a,
            None => bail!("Partial payments need --amount"),
        },
    };

    let req = PaymentRequest {
        flat_id: flat.id.clone(),
        amount,
        status,
        month,
        notes: optional_arg(sub, "notes").map(str::to_string),
    };
    let payment = s
        .api
        .record_rent_payment(s.building_id(), &req, s.store.today())?;
    let payment = s.store.upsert_rent_payment(s.building_id(), payment)?;
    println!(
        "Flat {} {}: {} ({})",
        flat.flat_number,
        payment.month,
        payment.status.label(),
        fmt_money(&payment.amount, CURRENCY)
    );
    Ok(payment)
}

fn status(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let outstanding: Vec<_> = s
        .store
        .flats_with_rent_status(s.building_id())?
        .into_iter()
        .filter(|f| f.current_month_status != RentStatus::Paid || !f.total_due.is_zero())
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &outstanding)? {
        if outstanding.is_empty() {
            println!("All rent collected");
        } else {
            println!("{}", pretty_table(FLAT_HEADERS, flat_rows(&outstanding)));
        }
    }
    Ok(())
}

fn summary(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let sum = s.store.rental_summary(s.building_id())?;
    if maybe_print_json(json_flag, jsonl_flag, &sum)? {
        return Ok(());
    }
    let rows = vec![
        vec![
            "Flats".to_string(),
            format!(
                "{} ({} occupied, {} vacant)",
                sum.total_flats, sum.occupied_flats, sum.vacant_flats
            ),
        ],
        vec!["Collection rate".to_string(), format!("{}%", sum.collection_rate)],
        vec![
            "Collected".to_string(),
            format!(
                "{} of {}",
                fmt_money(&sum.collected_rent, CURRENCY),
                fmt_money(&sum.expected_rent, CURRENCY)
            ),
        ],
        vec!["Outstanding".to_string(), fmt_money(&sum.total_due, CURRENCY)],
        vec![
            "Status".to_string(),
            format!(
                "{} paid, {} pending, {} overdue, {} partial",
                sum.paid_count, sum.pending_count, sum.overdue_count, sum.partial_count
            ),
        ],
    ];
    println!("{}", pretty_table(&["Rent", month_key(s.store.today()).as_str()], rows));
    Ok(())
}

fn history(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let flat = resolve_flat(s, required_arg(sub, "flat")?)?;
    let payments = s.store.rent_history(s.building_id(), &flat.id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &payments)? {
        let rows = payments
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    p.status.label().to_string(),
                    format!("{:.2}", p.amount),
                    format!("{:.2}", flat.monthly_rent - p.amount),
                    p.paid_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Status", "Paid", "Short", "Paid on"], rows)
        );
    }
    Ok(())
}
