// Copyright (c) 2025 Kasbook Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

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

fn yes_flag(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Skip the confirmation prompt"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kasbook")
        .about("Cash book for small businesses: ledger, reports, AI insight")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the data store"))
        .subcommand(
            Command::new("register")
                .about("Create an account and log in")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Prompted for when omitted"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in with an existing account")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Prompted for when omitted"),
                ),
        )
        .subcommand(yes_flag(
            Command::new("logout").about("End the current session"),
        ))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("tx")
                .about("Record and maintain transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD; defaults to today"),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of an existing transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(yes_flag(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(json_flags(
            Command::new("ledger").about("Show the ledger with running balances, newest first"),
        ))
        .subcommand(
            Command::new("report")
                .about("Aggregate views over the ledger")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("summary").about("Total income, expense and balance"),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category").about("Expense totals grouped by category"),
                )),
        )
        .subcommand(
            Command::new("categories")
                .about("List the category vocabulary")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["income", "expense"]),
                ),
        )
        .subcommand(
            Command::new("analyze")
                .about("Ask the model for a financial health insight")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as pretty JSON"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the ledger to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("csv or json")
                        .required(true),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect and change settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set-key")
                        .about("Store the Gemini API key")
                        .arg(Arg::new("key").required(true)),
                )
                .subcommand(
                    Command::new("set-model")
                        .about("Choose the insight model")
                        .arg(Arg::new("model").required(true)),
                )
                .subcommand(Command::new("show").about("Show current settings")),
        )
        .subcommand(yes_flag(
            Command::new("reset").about("Delete all ledger data for the logged-in user"),
        ))
}
