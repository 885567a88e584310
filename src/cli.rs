// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

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
            .help("Print as JSON lines"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("7days")
        .help("Lookback window: 7days|30days|90days|1year")
}

pub fn build_cli() -> Command {
    Command::new("budgetpro")
        .about("Personal budgeting: income/expense ledger, per-category budgets, spending charts, financial reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage user profiles")
                .subcommand(
                    Command::new("add")
                        .about("Create a user (the first one becomes active)")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List users"))
                .subcommand(
                    Command::new("use")
                        .about("Switch the active user")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add a transaction")
                        .arg(Arg::new("type").long("type").required(true).help("income|expense"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace fields of a transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage per-category budgets")
                .subcommand(
                    Command::new("add")
                        .about("Create a budget for a category")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("color").long("color"))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm creation even when spend is near the limit"),
                        ),
                )
                .subcommand(
                    Command::new("update")
                        .about("Change a budget's limit or color")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").allow_hyphen_values(true))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget (transactions are untouched)")
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(json_flags(
                    Command::new("status").about("Spend vs limit for every budget"),
                )),
        )
        .subcommand(
            Command::new("chart")
                .about("Chart-ready spending series")
                .subcommand(json_flags(
                    Command::new("spending")
                        .about("Expense totals bucketed over time")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Expense totals grouped by category")
                        .arg(period_arg()),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Financial reports")
                .subcommand(json_flags(
                    Command::new("summary").about("Current-month financial summary"),
                ))
                .subcommand(json_flags(
                    Command::new("ai").about("Summary plus AI-generated analysis"),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Write a plain-text report file")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(
                            Arg::new("ai")
                                .long("ai")
                                .action(ArgAction::SetTrue)
                                .help("Include the AI analysis section"),
                        ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Category catalog")
                .subcommand(Command::new("list").about("List categories with transaction counts"))
                .subcommand(
                    Command::new("add")
                        .about("Add a user-defined category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("type").long("type").required(true).help("income|expense")),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Bulk import")
                .subcommand(
                    Command::new("transactions")
                        .about("Import transactions from CSV (date,type,category,amount,description)")
                        .arg(Arg::new("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Bulk export")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(
                    Command::new("set-ai-endpoint")
                        .about("Override the narrative-generation endpoint")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("show").about("Show settings")),
        )
        .subcommand(Command::new("doctor").about("Check ledger integrity"))
}
