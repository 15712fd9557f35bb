// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::sync::mirror_payment;
use crate::utils::{maybe_print_json, pretty_table};
use crate::db;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let emoji = sub.get_one::<String>("emoji").unwrap();
            let pm = db::insert_payment_method(conn, name, emoji)?;
            mirror_payment(conn, &pm)?;
            println!("Added payment method '{}'", name);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if db::delete_payment_method(conn, name)? {
                println!("Removed payment method '{}'", name);
            } else {
                println!("No payment method '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let seeded = db::seed_payment_methods_if_empty(conn)?;
    if seeded > 0 {
        println!("Seeded {} default payment methods", seeded);
    }
    db::renumber_if_degenerate(conn, "payment_methods")?;
    let pms = db::list_payment_methods(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &pms)? {
        let data = pms
            .iter()
            .map(|p| vec![p.emoji.clone(), p.name.clone(), p.sort_index.to_string()])
            .collect();
        println!("{}", pretty_table(&["", "Name", "Order"], data));
    }
    Ok(())
}
