// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::buildings::DEFAULT_BUILDING;
use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn flat_arg() -> Arg {
    Arg::new("flat")
        .long("flat")
        .required(true)
        .help("Flat id or flat number, e.g. 101")
}

fn flat_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("number").long("number").required(required))
        .arg(
            Arg::new("floor")
                .long("floor")
                .value_parser(value_parser!(u32))
                .required(required),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .help("studio|1bed|2bed|3bed|penthouse")
                .required(required),
        )
        .arg(Arg::new("rent").long("rent").help("Monthly rent"))
        .arg(Arg::new("tenant").long("tenant"))
        .arg(Arg::new("phone").long("phone"))
}

pub fn build_cli() -> Command {
    Command::new("rentbook")
        .about("Building expenses, flats and rent collection")
        .version(clap::crate_version!())
        .arg(
            Arg::new("building")
                .long("building")
                .short('b')
                .global(true)
                .env("RENTBOOK_BUILDING")
                .default_value(DEFAULT_BUILDING)
                .help("Building id, see `rentbook buildings`"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Treat this date (YYYY-MM-DD) as today"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .global(true)
                .env("RENTBOOK_LATENCY_MS")
                .value_parser(value_parser!(u64))
                .help("Simulated backend latency for writes"),
        )
        .subcommand(json_flags(
            Command::new("buildings").about("List the buildings you can manage"),
        ))
        .subcommand(
            Command::new("expense")
                .about("Building expenses")
                .subcommand(
                    Command::new("add")
                        .about("Add a building expense")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("electricity|water|maintenance|cleaning|security|repairs|lift|other"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .required(true)
                                .help("cash|bank|online"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Recent expenses, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("20"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Regex matched against notes, case-insensitive"),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an expense")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Expense dashboard figures")
                .subcommand(json_flags(
                    Command::new("summary").about("This month's totals and monthly average"),
                ))
                .subcommand(json_flags(
                    Command::new("trend").about("Daily spend over the last 30 days"),
                ))
                .subcommand(json_flags(
                    Command::new("categories").about("This month's spend by category"),
                )),
        )
        .subcommand(
            Command::new("flat")
                .about("Flats and tenants")
                .subcommand(json_flags(
                    Command::new("list").about("All flats with this month's rent status"),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Flat details and rent history")
                        .arg(flat_arg()),
                ))
                .subcommand(flat_fields(Command::new("add").about("Add a flat"), true))
                .subcommand(
                    flat_fields(
                        Command::new("edit").about("Edit a flat").arg(flat_arg()),
                        false,
                    )
                    .arg(
                        Arg::new("vacate")
                            .long("vacate")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("tenant")
                            .help("Clear tenant name and phone"),
                    ),
                )
                .subcommand(Command::new("rm").about("Remove a flat").arg(flat_arg())),
        )
        .subcommand(
            Command::new("rent")
                .about("Rent collection")
                .subcommand(
                    Command::new("record")
                        .about("Record (or replace) a month's rent for a flat")
                        .arg(flat_arg())
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .default_value("paid")
                                .help("paid|pending|overdue|partial"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Defaults to full rent when paid, 0 when pending/overdue"),
                        )
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("status").about("Flats with outstanding rent"),
                ))
                .subcommand(json_flags(
                    Command::new("summary").about("Occupancy and collection figures"),
                ))
                .subcommand(json_flags(
                    Command::new("history")
                        .about("Rent history for one flat")
                        .arg(flat_arg()),
                )),
        )
        .subcommand(
            Command::new("settings").about("Building settings").subcommand(
                Command::new("types")
                    .about("Expense types")
                    .subcommand(json_flags(Command::new("list")))
                    .subcommand(
                        Command::new("add").arg(Arg::new("name").long("name").required(true)),
                    )
                    .subcommand(
                        Command::new("rm").arg(Arg::new("name").long("name").required(true)),
                    ),
            ),
        )
        .subcommand(
            Command::new("export")
                .about("Export building data")
                .subcommand(
                    Command::new("expenses")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("rent")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("shell").about("Interactive session; changes last until exit"))
}
