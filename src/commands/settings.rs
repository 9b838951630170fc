// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ExpenseCategory;
use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table, required_arg};
use anyhow::{bail, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExpenseType {
    pub name: String,
    pub custom: bool,
}

pub fn handle(s: &Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("types", types_m)) = m.subcommand() {
        match types_m.subcommand() {
            Some(("list", sub)) => list(s, sub)?,
            Some(("add", sub)) => add(s, sub)?,
            Some(("rm", sub)) => remove(s, sub)?,
            _ => {}
        }
    }
    Ok(())
}

/// Built-in categories followed by the building's custom types.
pub fn expense_types(s: &Session) -> Result<Vec<ExpenseType>> {
    let mut out: Vec<ExpenseType> = ExpenseCategory::ALL
        .iter()
        .map(|c| ExpenseType {
            name: c.as_str().to_string(),
            custom: false,
        })
        .collect();
    for name in s.store.custom_expense_types(s.building_id())? {
        out.push(ExpenseType { name, custom: true });
    }
    Ok(out)
}

fn list(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let types = expense_types(s)?;
    if !maybe_print_json(json_flag, jsonl_flag, &types)? {
        let rows = types
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    if t.custom { "custom" } else { "built-in" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Type", "Kind"], rows));
    }
    Ok(())
}

fn sync(s: &Session) -> Result<()> {
    let custom = s.store.custom_expense_types(s.building_id())?;
    s.api.update_building_settings(s.building_id(), &custom)?;
    Ok(())
}

fn add(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = required_arg(sub, "name")?;
    if name.parse::<ExpenseCategory>().is_ok() {
        bail!("'{}' is already a built-in category", name);
    }
    if !s.store.add_custom_expense_type(s.building_id(), name)? {
        println!("Expense type '{}' already exists", name);
        return Ok(());
    }
    sync(s)?;
    println!("Added expense type '{}'", name);
    Ok(())
}

fn remove(s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = required_arg(sub, "name")?;
    if !s.store.remove_custom_expense_type(s.building_id(), name)? {
        bail!("Expense type '{}' not found", name);
    }
    sync(s)?;
    println!("Removed expense type '{}'", name);
    Ok(())
}
