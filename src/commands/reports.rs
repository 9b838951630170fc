// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::stats;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, CURRENCY};
use anyhow::Result;

pub fn handle(s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(s, sub)?,
        Some(("trend", sub)) => trend(s, sub)?,
        Some(("categories", sub)) => categories(s, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let expenses = s.store.expenses(s.building_id())?;
    let summary = stats::expense_summary(&expenses, s.store.today());
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let rows = vec![
            vec![
                "This month".to_string(),
                fmt_money(&summary.total_current_month, CURRENCY),
            ],
            vec![
                "Transactions".to_string(),
                summary.total_transactions.to_string(),
            ],
            vec![
                "Top category".to_string(),
                format!(
                    "{} ({})",
                    summary.highest_category.label(),
                    fmt_money(&summary.highest_category_amount, CURRENCY)
                ),
            ],
            vec![
                "Monthly average".to_string(),
                fmt_money(&summary.average_monthly, CURRENCY),
            ],
        ];
        println!(
            "{}",
            pretty_table(&[s.building()?.display_name, "Value"], rows)
        );
    }
    Ok(())
}

fn trend(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let expenses = s.store.expenses(s.building_id())?;
    let points = stats::expense_trend(&expenses, s.store.today());
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let rows = points
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    p.formatted_date.clone(),
                    format!("{:.2}", p.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Day", "Spent"], rows));
    }
    Ok(())
}

fn categories(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let expenses = s.store.expenses(s.building_id())?;
    let breakdown = stats::category_breakdown(&expenses, s.store.today());
    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let total: rust_decimal::Decimal = breakdown.iter().map(|c| c.amount).sum();
        let rows = breakdown
            .iter()
            .map(|c| {
                let share = if total.is_zero() {
                    rust_decimal::Decimal::ZERO
                } else {
                    c.amount / total * rust_decimal::Decimal::from(100)
                };
                vec![
                    c.category.label().to_string(),
                    format!("{:.2}", c.amount),
                    format!("{:.1}%", share),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}
