// Copyright (c) 2025 Pocketledger contributors.
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

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Local-first budget tracker with a spreadsheet-backed remote mirror")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("category")
                .about("Manage spending categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("emoji").long("emoji").default_value(""))
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Transactions in this category are income"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category (transactions keep their rows, lose the tag)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("payment")
                .about("Manage payment methods")
                .subcommand(
                    Command::new("add")
                        .about("Add a payment method")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("emoji").long("emoji").default_value("")),
                )
                .subcommand(json_flags(Command::new("list").about("List payment methods")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a payment method")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction (sign comes from the category)")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Magnitude; sign is derived from the category"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("payment").long("payment"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, most recent first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views")
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Income, expenses, net, and breakdowns for one month")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("sync")
                .about("Mirror to the remote endpoint")
                .subcommand(
                    Command::new("set-url")
                        .about("Set the remote base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(
                    Command::new("set-secret")
                        .about("Set the shared secret")
                        .arg(Arg::new("secret").required(true)),
                )
                .subcommand(Command::new("status").about("Show sync configuration"))
                .subcommand(Command::new("push").about("POST every local row to the mirror"))
                .subcommand(json_flags(
                    Command::new("pull")
                        .about("Fetch remote transactions for a date range")
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").required(true).help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("categories").about("Fetch remote categories"),
                ))
                .subcommand(json_flags(
                    Command::new("payments").about("Fetch remote payment methods"),
                )),
        )
}
