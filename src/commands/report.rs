// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::report::{aggregate, ReportRow};
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use crate::db;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let rows: Vec<ReportRow> = db::list_transactions(conn, None, None)?
        .into_iter()
        .map(|t| ReportRow {
            amount: t.amount,
            date: t.date,
            category: t.category,
            payment_method: t.payment_method,
        })
        .collect();
    let report = aggregate(&rows, month, year);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    println!("Income:   {:.2}", report.income);
    println!("Expenses: {:.2}", report.expenses);
    println!("Net:      {:.2}", report.net);

    let cat_rows = report
        .by_category
        .iter()
        .map(|(name, sum)| vec![name.clone(), format!("{:.2}", sum)])
        .collect();
    println!("{}", pretty_table(&["Category", "Total"], cat_rows));

    let pm_rows = report
        .by_payment
        .iter()
        .map(|(name, sum)| vec![name.clone(), format!("{:.2}", sum)])
        .collect();
    println!("{}", pretty_table(&["Payment", "Total"], pm_rows));
    Ok(())
}
