// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, ExpenseCategory, ExpenseForm, PaymentMethod};
use crate::session::Session;
use crate::utils::{
    fmt_money, maybe_print_json, optional_arg, parse_month, pretty_table, required_arg, CURRENCY,
};
use anyhow::{bail, Context, Result};
use regex::RegexBuilder;

pub fn handle(s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(s, sub)?,
        Some(("list", sub)) => list(s, sub)?,
        Some(("rm", sub)) => remove(s, sub)?,
        _ => {}
    }
    Ok(())
}

/// Resolves `--category`. Custom expense types configured for the building
/// are filed under `other` with the type name leading the notes.
fn resolve_category(
    s: &Session,
    raw: &str,
    notes: &str,
) -> Result<(ExpenseCategory, String)> {
    if let Ok(c) = raw.parse::<ExpenseCategory>() {
        return Ok((c, notes.to_string()));
    }
    let custom = s.store.custom_expense_types(s.building_id())?;
    match custom.iter().find(|t| t.eq_ignore_ascii_case(raw)) {
        Some(t) if notes.is_empty() => Ok((ExpenseCategory::Other, t.clone())),
        Some(t) => Ok((ExpenseCategory::Other, format!("{}: {}", t, notes))),
        None => bail!(
            "Unknown category '{}' (use one of: {})",
            raw,
            ExpenseCategory::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn add(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let notes = optional_arg(sub, "notes").unwrap_or_default();
    let (category, notes) = resolve_category(s, required_arg(sub, "category")?, notes)?;
    let payment_method = required_arg(sub, "method")?
        .parse::<PaymentMethod>()
        .context("Please select a payment method")?;
    let date = optional_arg(sub, "date")
        .map(str::to_string)
        .unwrap_or_else(|| s.store.today().to_string());

    let form = ExpenseForm {
        amount: required_arg(sub, "amount")?.to_string(),
        category: Some(category),
        date,
        payment_method: Some(payment_method),
        notes,
    };
    let expense = s.api.create_expense(&form)?;
    let expense = s.store.add_expense(s.building_id(), expense)?;
    println!(
        "Recorded {} for {} on {} ({})",
        fmt_money(&expense.amount, CURRENCY),
        expense.category.label(),
        expense.date,
        expense.id
    );
    Ok(())
}

fn list(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(s, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No expenses yet");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.category.label().to_string(),
                    format!("{:.2}", e.amount),
                    e.payment_method.label().to_string(),
                    e.notes.clone().unwrap_or_default(),
                    e.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Amount", "Method", "Notes", "Id"], rows)
        );
    }
    Ok(())
}

/// Expenses newest first, narrowed by the list filters and `--limit`.
pub fn query_rows(s: &Session, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let category = optional_arg(sub, "category")
        .map(|c| c.parse::<ExpenseCategory>())
        .transpose()?;
    let month = optional_arg(sub, "month").map(parse_month).transpose()?;
    let search = optional_arg(sub, "search")
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid search pattern '{}'", p))
        })
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(20);

    let rows = s
        .store
        .expenses(s.building_id())?
        .into_iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .filter(|e| {
            month
                .as_deref()
                .is_none_or(|m| e.date.to_string().starts_with(m))
        })
        .filter(|e| {
            search.as_ref().is_none_or(|re| {
                e.notes.as_deref().is_some_and(|n| re.is_match(n))
            })
        })
        .take(limit)
        .collect();
    Ok(rows)
}

fn remove(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_arg(sub, "id")?;
    s.api.delete_expense(s.building_id(), id)?;
    if !s.store.remove_expense(s.building_id(), id)? {
        bail!("Expense '{}' not found", id);
    }
    println!("Removed expense {}", id);
    Ok(())
}
