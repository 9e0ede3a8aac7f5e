// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn selection_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("category")
            .long("category")
            .default_value("All")
            .help("All, Income, Expense, or an exact category label"),
    )
    .arg(
        Arg::new("range")
            .long("range")
            .default_value("all")
            .help("all, today, yesterday, 30d, 6m, 1y, last-90-days, or START..END"),
    )
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(true)
        .value_parser(["income", "expense"])
}

fn entry_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a new entry")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("YYYY-MM-DD or D/M/YYYY"),
                )
                .arg(Arg::new("description").long("description"))
                .arg(
                    Arg::new("time")
                        .long("time")
                        .help("H:M:S, defaults to now"),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Change an existing entry")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("rm").about("Delete an entry").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

pub fn build_cli() -> Command {
    Command::new("ledgerly")
        .version(clap::crate_version!())
        .about("Personal income and expense tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("LEDGERLY_DB")
                .help("Path to the SQLite database"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(entry_cmd("income", "Record and edit income"))
        .subcommand(entry_cmd("expense", "Record and edit expenses"))
        .subcommand(
            Command::new("ledger")
                .about("Combined income and expense view")
                .subcommand_required(true)
                .subcommand(json_flags(selection_args(
                    Command::new("list").about("List entries, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(json_flags(selection_args(
                    Command::new("totals").about("Income, expense and balance"),
                )))
                .subcommand(json_flags(selection_args(
                    Command::new("chart").about("Income vs expense per date"),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Period summaries")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("summary").about("Totals for a period").arg(
                        Arg::new("period")
                            .long("period")
                            .value_parser(["all", "daily", "weekly", "monthly", "yearly"])
                            .default_value("all"),
                    ),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage category lists")
                .subcommand_required(true)
                .subcommand(Command::new("list").arg(kind_arg()))
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("User settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(Arg::new("symbol").required(true).help("Prefix for amounts, e.g. ₹ or $")),
                )
                .subcommand(
                    Command::new("set-profile")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("location").long("location").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the ledger to a file")
                .subcommand_required(true)
                .subcommand(selection_args(
                    Command::new("ledger")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
}
