// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use nestegg::{cli, commands, store};

fn main() -> Result<()> {
    flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = store::Store::open_default()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            store.save(&store.load());
            println!("Ledger slot at {}", store.path().display());
        }
        Some(("asset", sub)) => commands::assets::handle(&store, sub)?,
        Some(("liability", sub)) => commands::liabilities::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("class", sub)) => commands::classes::handle(&store, sub)?,
        Some(("view", sub)) => commands::views::handle(&store, sub)?,
        Some(("cashflow", sub)) => commands::cashflow::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
