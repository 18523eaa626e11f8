// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn reorder_cmd() -> Command {
    Command::new("reorder")
        .about("Reorder by id; ids not listed keep their relative position")
        .arg(Arg::new("ids").num_args(1..).required(true))
}

fn taxonomy_verbs(side: Command) -> Command {
    side.subcommand(
        Command::new("add")
            .arg(Arg::new("name").required(true))
            .arg(Arg::new("color").long("color")),
    )
    .subcommand(
        Command::new("rename")
            .arg(Arg::new("id").required(true))
            .arg(Arg::new("name").required(true)),
    )
    .subcommand(
        Command::new("rm").arg(Arg::new("id").required(true)).arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Delete even when entities still reference this entry"),
        ),
    )
    .subcommand(json_flags(Command::new("list")))
    .subcommand(reorder_cmd())
}

pub fn build_cli() -> Command {
    Command::new("nestegg")
        .version(crate_version!())
        .about("Local net-worth, cash-flow, and budget ledger")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the ledger slot and print its location"))
        .subcommand(
            Command::new("asset")
                .about("Track things you own")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("class").long("class").required(true))
                        .arg(Arg::new("value").long("value").required(true).allow_hyphen_values(true))
                        .arg(Arg::new("institution").long("institution"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("class").long("class"))
                        .arg(Arg::new("value").long("value").allow_hyphen_values(true))
                        .arg(Arg::new("institution").long("institution"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("view").long("view").help("Named view, default all")),
                ))
                .subcommand(reorder_cmd()),
        )
        .subcommand(
            Command::new("liability")
                .about("Track things you owe")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("class").long("class").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).allow_hyphen_values(true))
                        .arg(Arg::new("interest-rate").long("interest-rate"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("class").long("class"))
                        .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
                        .arg(Arg::new("interest-rate").long("interest-rate"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("view").long("view").help("Named view, default all")),
                ))
                .subcommand(reorder_cmd()),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("type").long("type").required(true).value_parser(["income", "expense"]))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).allow_hyphen_values(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("merchant").long("merchant"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("merchant").long("merchant"))
                        .arg(
                            Arg::new("reviewed")
                                .long("reviewed")
                                .value_parser(clap::value_parser!(bool)),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("class")
                .about("Asset and liability classes")
                .subcommand(taxonomy_verbs(Command::new("asset")))
                .subcommand(taxonomy_verbs(Command::new("liability"))),
        )
        .subcommand(
            Command::new("view")
                .about("Saved views over assets and liabilities")
                .subcommand(
                    Command::new("asset")
                        .subcommand(
                            Command::new("add")
                                .arg(Arg::new("name").required(true))
                                .arg(
                                    Arg::new("classes")
                                        .long("classes")
                                        .num_args(0..)
                                        .help("Class filter; empty matches all assets"),
                                ),
                        )
                        .subcommand(
                            Command::new("update")
                                .arg(Arg::new("id").required(true))
                                .arg(Arg::new("name").long("name"))
                                .arg(Arg::new("classes").long("classes").num_args(0..)),
                        )
                        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                        .subcommand(json_flags(Command::new("list")))
                        .subcommand(reorder_cmd()),
                )
                .subcommand(
                    Command::new("liability")
                        .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                        .subcommand(
                            Command::new("update")
                                .arg(Arg::new("id").required(true))
                                .arg(Arg::new("name").long("name")),
                        )
                        .subcommand(
                            Command::new("add-member")
                                .arg(Arg::new("id").required(true))
                                .arg(Arg::new("liability-id").required(true)),
                        )
                        .subcommand(
                            Command::new("rm-member")
                                .arg(Arg::new("id").required(true))
                                .arg(Arg::new("liability-id").required(true)),
                        )
                        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                        .subcommand(json_flags(Command::new("list")))
                        .subcommand(reorder_cmd()),
                ),
        )
        .subcommand(
            Command::new("cashflow")
                .about("Recurring cash-flow line items and their taxonomies")
                .subcommand(
                    Command::new("item")
                        .subcommand(
                            Command::new("add")
                                .arg(Arg::new("name").required(true))
                                .arg(Arg::new("type").long("type").required(true).value_parser(["income", "expense"]))
                                .arg(Arg::new("group").long("group"))
                                .arg(Arg::new("category").long("category"))
                                .arg(Arg::new("notes").long("notes")),
                        )
                        .subcommand(
                            Command::new("update")
                                .arg(Arg::new("id").required(true))
                                .arg(Arg::new("name").long("name"))
                                .arg(
                                    Arg::new("group")
                                        .long("group")
                                        .help("Group id or name; empty value ungroups"),
                                )
                                .arg(
                                    Arg::new("category")
                                        .long("category")
                                        .help("Category id or name; empty value uncategorizes"),
                                )
                                .arg(Arg::new("notes").long("notes")),
                        )
                        .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                        .subcommand(json_flags(Command::new("list")))
                        .subcommand(reorder_cmd()),
                )
                .subcommand(taxonomy_verbs(Command::new("group")))
                .subcommand(taxonomy_verbs(Command::new("category"))),
        )
        .subcommand(
            Command::new("report")
                .about("Read-side aggregates")
                .subcommand(json_flags(Command::new("net-worth")))
                .subcommand(json_flags(
                    Command::new("cashflow").arg(Arg::new("month").long("month").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("allocation").arg(
                        Arg::new("side")
                            .long("side")
                            .value_parser(["asset", "liability"])
                            .default_value("asset"),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("change").arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(clap::value_parser!(u64))
                            .default_value("30"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write the whole ledger, or one collection, to a file")
                .subcommand(Command::new("ledger").arg(Arg::new("out").long("out")))
                .subcommand(
                    Command::new("tx")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore a backup into the store")
                .arg(Arg::new("path").long("path").required(true))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_parser(["replace", "merge"])
                        .default_value("merge"),
                )
                .arg(
                    Arg::new("backup-dir")
                        .long("backup-dir")
                        .help("Where the pre-replace safety backup is written, default data dir"),
                ),
        )
        .subcommand(Command::new("doctor").about("Report dangling references, mutate nothing"))
}
