// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::sync::mirror_category;
use crate::utils::{maybe_print_json, pretty_table};
use crate::db;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let emoji = sub.get_one::<String>("emoji").unwrap();
            let is_income = sub.get_flag("income");
            let cat = db::insert_category(conn, name, emoji, is_income)?;
            mirror_category(conn, &cat)?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            if db::delete_category(conn, name)? {
                println!("Removed category '{}' (its transactions are now uncategorized)", name);
            } else {
                println!("No category '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let seeded = db::seed_categories_if_empty(conn)?;
    if seeded > 0 {
        println!("Seeded {} default categories", seeded);
    }
    db::renumber_if_degenerate(conn, "categories")?;
    let cats = db::list_categories(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
        let data = cats
            .iter()
            .map(|c| {
                vec![
                    c.emoji.clone(),
                    c.name.clone(),
                    c.sort_index.to_string(),
                    if c.is_income { "income" } else { "expense" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Name", "Order", "Kind"], data));
    }
    Ok(())
}
