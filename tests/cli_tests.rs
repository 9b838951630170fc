// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rentbook::api::{Latency, RemoteApi};
use rentbook::cli;
use rentbook::commands::{self, expenses, rent, shell};
use rentbook::config::Config;
use rentbook::models::{ExpenseCategory, RentStatus};
use rentbook::session::Session;
use rentbook::store::Store;
use rust_decimal::Decimal;

const B1: &str = "bin-ehsan-1";

fn setup() -> Session {
    let store = Store::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()).unwrap();
    Session::from_parts(store, RemoteApi::new(Latency::none()), B1).unwrap()
}

fn run(session: &mut Session, args: &[&str]) -> anyhow::Result<bool> {
    let matches = cli::build_cli()
        .try_get_matches_from(std::iter::once("rentbook").chain(args.iter().copied()))?;
    commands::dispatch(session, &matches)
}

fn sub_matches(args: &[&str], path: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args.iter().copied());
    for name in path {
        m = match m.subcommand() {
            Some((n, sub)) if n == *name => sub.clone(),
            _ => panic!("no {} subcommand", name),
        };
    }
    m
}

#[test]
fn config_reads_global_flags() {
    let m = cli::build_cli().get_matches_from([
        "rentbook", "--building", "bin-ehsan-3", "--today", "2025-03-15", "--latency-ms", "0",
        "buildings",
    ]);
    let cfg = Config::from_matches(&m).unwrap();
    assert_eq!(cfg.building, "bin-ehsan-3");
    assert_eq!(cfg.today, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    assert!(cfg.latency.request.is_zero());

    let bad = cli::build_cli().get_matches_from(["rentbook", "--building", "nope", "buildings"]);
    assert!(Config::from_matches(&bad).is_err());
}

#[test]
fn expense_list_honours_limit_and_filters() {
    let s = setup();
    let m = sub_matches(&["rentbook", "expense", "list", "--limit", "3"], &["expense", "list"]);
    let rows = expenses::query_rows(&s, &m).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows, s.store.expenses(B1).unwrap()[..3].to_vec());

    let m = sub_matches(
        &["rentbook", "expense", "list", "--category", "electricity", "--limit", "100"],
        &["expense", "list"],
    );
    let rows = expenses::query_rows(&s, &m).unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|e| e.category == ExpenseCategory::Electricity));
}

#[test]
fn expense_add_lands_first_in_the_list() {
    let mut s = setup();
    assert!(run(
        &mut s,
        &["expense", "add", "--amount", "4200", "--category", "water", "--method", "cash", "--notes", "Tanker refill"],
    )
    .unwrap());
    let first = &s.store.expenses(B1).unwrap()[0];
    assert_eq!(first.amount, Decimal::from(4200));
    assert_eq!(first.category, ExpenseCategory::Water);
    assert_eq!(first.date, s.store.today());
    assert_eq!(first.notes.as_deref(), Some("Tanker refill"));
}

#[test]
fn expense_add_rejects_bad_amount() {
    let mut s = setup();
    let before = s.store.expenses(B1).unwrap().len();
    let err = run(
        &mut s,
        &["expense", "add", "--amount", "0", "--category", "water", "--method", "cash"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("valid amount"));
    assert_eq!(s.store.expenses(B1).unwrap().len(), before);
}

#[test]
fn custom_type_expenses_file_under_other() {
    let mut s = setup();
    run(&mut s, &["settings", "types", "add", "--name", "Generator fuel"]).unwrap();
    run(
        &mut s,
        &["expense", "add", "--amount", "900", "--category", "generator fuel", "--method", "online", "--notes", "20 litres"],
    )
    .unwrap();
    let first = &s.store.expenses(B1).unwrap()[0];
    assert_eq!(first.category, ExpenseCategory::Other);
    assert_eq!(first.notes.as_deref(), Some("Generator fuel: 20 litres"));
    assert!(run(&mut s, &["settings", "types", "add", "--name", "water"]).is_err());
}

#[test]
fn rent_record_replaces_the_month() {
    let s = setup();
    let m = sub_matches(
        &["rentbook", "rent", "record", "--flat", "101", "--status", "partial", "--amount", "10000"],
        &["rent", "record"],
    );
    let first = rent::record(&s, &m).unwrap();
    assert_eq!(first.month, "2025-03");
    assert_eq!(first.paid_date, Some(s.store.today()));

    let m = sub_matches(&["rentbook", "rent", "record", "--flat", "101"], &["rent", "record"]);
    let second = rent::record(&s, &m).unwrap();
    assert_eq!(second.status, RentStatus::Paid);

    let flat = s.store.find_flat(B1, "101").unwrap().unwrap();
    assert_eq!(second.amount, flat.monthly_rent);
    let march: Vec<_> = s
        .store
        .rent_history(B1, &flat.id)
        .unwrap()
        .into_iter()
        .filter(|p| p.month == "2025-03")
        .collect();
    assert_eq!(march, vec![second]);
}

#[test]
fn rent_record_requires_amount_for_partial() {
    let s = setup();
    let m = sub_matches(
        &["rentbook", "rent", "record", "--flat", "101", "--status", "partial"],
        &["rent", "record"],
    );
    assert!(rent::record(&s, &m).is_err());

    let m = sub_matches(
        &["rentbook", "rent", "record", "--flat", "101", "--month", "March"],
        &["rent", "record"],
    );
    assert!(rent::record(&s, &m).is_err());
}

#[test]
fn flat_edit_vacate_clears_tenant() {
    let mut s = setup();
    let occupied = s
        .store
        .flats(B1)
        .unwrap()
        .into_iter()
        .find(|f| f.is_occupied)
        .unwrap();
    run(&mut s, &["flat", "edit", "--flat", &occupied.flat_number, "--vacate"]).unwrap();
    let after = s.store.flat(B1, &occupied.id).unwrap().unwrap();
    assert!(!after.is_occupied);
    assert!(after.tenant_name.is_none());
    assert!(after.tenant_phone.is_none());

    let row = s
        .store
        .flats_with_rent_status(B1)
        .unwrap()
        .into_iter()
        .find(|f| f.flat.id == occupied.id)
        .unwrap();
    assert_eq!(row.current_month_status, RentStatus::Paid);
    assert_eq!(row.total_due, Decimal::ZERO);
}

#[test]
fn flat_add_defaults_rent_by_type() {
    let mut s = setup();
    run(
        &mut s,
        &["flat", "add", "--number", "901", "--floor", "9", "--type", "3bed", "--tenant", "Usman Tariq"],
    )
    .unwrap();
    let f = s.store.find_flat(B1, "901").unwrap().unwrap();
    assert_eq!(f.monthly_rent, Decimal::from(70_000));
    assert!(f.is_occupied);
    assert_eq!(s.store.flats(B1).unwrap().len(), 13);

    assert!(run(&mut s, &["flat", "add", "--number", "901", "--floor", "9", "--type", "studio"]).is_err());
}

#[test]
fn shell_keeps_edits_and_switches_buildings() {
    let mut s = setup();
    let before = s.store.expenses(B1).unwrap().len();
    let script = "\
expense add --amount 100 --category cleaning --method cash --notes 'Stairwell wash'
use bin-ehsan-2
bogus command
expense add --amount 50 --category lift --method bank --building bin-ehsan-3
exit
expense add --amount 1 --category other --method cash
";
    shell::run_lines(&mut s, script.as_bytes(), false).unwrap();

    assert_eq!(s.building_id(), "bin-ehsan-2");
    let b1 = s.store.expenses(B1).unwrap();
    assert_eq!(b1.len(), before + 1);
    assert_eq!(b1[0].notes.as_deref(), Some("Stairwell wash"));
    assert_eq!(s.store.expenses("bin-ehsan-3").unwrap()[0].amount, Decimal::from(50));
    assert!(s
        .store
        .expenses("bin-ehsan-2")
        .unwrap()
        .iter()
        .all(|e| e.amount != Decimal::ONE));
}

#[test]
fn shell_refresh_drops_edits() {
    let mut s = setup();
    let generated = s.store.expenses(B1).unwrap();
    shell::run_line(&mut s, "expense add --amount 10 --category other --method cash").unwrap();
    assert_eq!(s.store.expenses(B1).unwrap().len(), generated.len() + 1);
    assert!(shell::run_line(&mut s, "refresh").unwrap());
    assert_eq!(s.store.expenses(B1).unwrap(), generated);
    assert!(!shell::run_line(&mut s, "quit").unwrap());
}
