// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;

use crate::commands::sync::mirror_transaction;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::db;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if db::delete_transaction(conn, id)? {
                println!("Deleted transaction {}", id);
            } else {
                println!("No transaction {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let magnitude = parse_decimal(sub.get_one::<String>("amount").unwrap())?.abs();
    let category_name = sub.get_one::<String>("category").unwrap();
    let payment_name = sub.get_one::<String>("payment");
    let note = sub.get_one::<String>("note").map(|s| s.as_str());

    let Some(category) = db::category_by_name(conn, category_name)? else {
        bail!("Category '{}' not found", category_name);
    };
    let payment = match payment_name {
        Some(name) => match db::payment_method_by_name(conn, name)? {
            Some(pm) => Some(pm),
            None => bail!("Payment method '{}' not found", name),
        },
        None => None,
    };

    // Sign is fixed here, from the category's income flag as of right now.
    // Re-flagging the category later never re-signs existing rows.
    let amount = if category.is_income {
        magnitude
    } else {
        -magnitude
    };

    let tx = db::insert_transaction(
        conn,
        date.and_hms_opt(0, 0, 0).expect("midnight is valid"),
        amount,
        note,
        Some(category.id),
        payment.as_ref().map(|p| p.id),
    )?;
    mirror_transaction(conn, &tx)?;
    println!("Recorded {} on {} ({})", amount, date, category.name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub.get_one::<String>("month").map(|s| s.as_str());
    let limit = sub.get_one::<usize>("limit").copied();
    let txs = db::list_transactions(conn, month, limit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        let data = txs
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.format("%Y-%m-%d").to_string(),
                    format!("{:.2}", t.amount),
                    t.category.clone().unwrap_or_default(),
                    t.payment_method.clone().unwrap_or_default(),
                    t.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Category", "Payment", "Note"], data)
        );
    }
    Ok(())
}
