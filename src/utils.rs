// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub const CURRENCY: &str = "PKR";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    crate::validation::month(s)?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

/// `YYYY-MM` key for the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// First day of the month `back` months before the month containing `date`.
pub fn month_start_back(date: NaiveDate, back: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - back as i32;
    let (y, m0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    // day 1 always exists
    NaiveDate::from_ymd_opt(y, m0 + 1, 1).unwrap_or(date)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn days_in_month(first: NaiveDate) -> u32 {
    let next = month_start_back(first, 0)
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(first);
    next.signed_duration_since(month_start_back(first, 0)).num_days() as u32
}

/// Value of an argument clap already marks as required or defaulted.
pub fn required_arg<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.trim())
        .with_context(|| format!("Missing --{}", id))
}

pub fn optional_arg<'a>(m: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    m.get_one::<String>(id).map(|s| s.trim())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Splits a shell line into arguments, honouring single and double quotes.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut cur = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => cur.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut cur));
                    in_token = false;
                }
            }
            None => {
                cur.push(ch);
                in_token = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(anyhow::anyhow!("Unterminated {} quote", q));
    }
    if in_token {
        args.push(cur);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_start_back_crosses_year() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        assert_eq!(
            month_start_back(d, 3),
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
        );
        assert_eq!(month_key(month_start_back(d, 0)), "2025-02");
    }

    #[test]
    fn days_in_month_handles_leap_february() {
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()), 31);
    }

    #[test]
    fn split_command_line_keeps_quoted_notes() {
        let args = split_command_line(r#"expense add --notes "Gate motor repair" --amount 500"#)
            .unwrap();
        assert_eq!(
            args,
            vec!["expense", "add", "--notes", "Gate motor repair", "--amount", "500"]
        );
        assert!(split_command_line("rent record --notes \"oops").is_err());
    }

    #[test]
    fn parse_month_rejects_full_dates() {
        assert_eq!(parse_month(" 2025-07 ").unwrap(), "2025-07");
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-07-01").is_err());
        assert!(parse_month("2025-7").is_err());
    }

    #[test]
    fn parse_month_agrees_with_store_validation() {
        for m in ["2025-07", "2025-7", "25-07", "2025-00", "July", "2025-07-01"] {
            assert_eq!(
                parse_month(m).is_ok(),
                crate::validation::month(m).is_ok(),
                "{}",
                m
            );
        }
    }
}
