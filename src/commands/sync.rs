// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use tracing::warn;

use crate::client::{RemoteConfig, SyncClient, DEFAULT_PULL_LIMIT};
use crate::utils::{get_setting, maybe_print_json, parse_date, pretty_table, set_setting};
use crate::{db, models};

pub const SETTING_URL: &str = "sync_url";
pub const SETTING_SECRET: &str = "sync_secret";

/// Builds a client when both URL and secret are configured; otherwise the
/// mirror is simply off and local operations proceed alone.
pub fn client_if_configured(conn: &Connection) -> Result<Option<SyncClient>> {
    let url = get_setting(conn, SETTING_URL)?;
    let secret = get_setting(conn, SETTING_SECRET)?;
    match (url, secret) {
        (Some(base_url), Some(secret)) => Ok(Some(SyncClient::new(RemoteConfig {
            base_url,
            secret,
        })?)),
        _ => Ok(None),
    }
}

/// Fire-and-forget mirror of a freshly created row. The local write is
/// already committed and is never rolled back; failure is a warning.
pub fn mirror_transaction(conn: &Connection, tx: &models::Transaction) -> Result<()> {
    if let Some(client) = client_if_configured(conn)? {
        let resp = client.post_transaction(tx);
        if !resp.ok() {
            warn!(status = resp.status, body = %resp.body, "remote mirror of transaction failed; local row kept");
        }
    }
    Ok(())
}

pub fn mirror_category(conn: &Connection, cat: &models::Category) -> Result<()> {
    if let Some(client) = client_if_configured(conn)? {
        let resp = client.post_category(cat);
        if !resp.ok() {
            warn!(status = resp.status, body = %resp.body, "remote mirror of category failed; local row kept");
        }
    }
    Ok(())
}

pub fn mirror_payment(conn: &Connection, pm: &models::PaymentMethod) -> Result<()> {
    if let Some(client) = client_if_configured(conn)? {
        let resp = client.post_payment(pm);
        if !resp.ok() {
            warn!(status = resp.status, body = %resp.body, "remote mirror of payment method failed; local row kept");
        }
    }
    Ok(())
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            set_setting(conn, SETTING_URL, url)?;
            println!("Sync URL set");
        }
        Some(("set-secret", sub)) => {
            let secret = sub.get_one::<String>("secret").unwrap();
            set_setting(conn, SETTING_SECRET, secret)?;
            println!("Sync secret set");
        }
        Some(("status", _)) => status(conn)?,
        Some(("push", _)) => push(conn)?,
        Some(("pull", sub)) => pull(conn, sub)?,
        Some(("categories", sub)) => remote_categories(conn, sub)?,
        Some(("payments", sub)) => remote_payments(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn status(conn: &Connection) -> Result<()> {
    let url = get_setting(conn, SETTING_URL)?;
    let secret = get_setting(conn, SETTING_SECRET)?;
    match url {
        Some(u) => println!("URL:    {}", u),
        None => println!("URL:    (not set)"),
    }
    println!("Secret: {}", if secret.is_some() { "set" } else { "(not set)" });
    Ok(())
}

/// Re-posts every local row. This doubles as the manual catch-up after a
/// failed mirror; the endpoint dedupes on remoteID.
fn push(conn: &Connection) -> Result<()> {
    let Some(client) = client_if_configured(conn)? else {
        println!("Sync not configured; run 'sync set-url' and 'sync set-secret' first.");
        return Ok(());
    };
    let mut sent = 0usize;
    let mut failed = 0usize;
    for cat in db::list_categories(conn)? {
        let resp = client.post_category(&cat);
        if resp.ok() {
            sent += 1;
        } else {
            failed += 1;
            warn!(status = resp.status, name = %cat.name, "category push failed");
        }
    }
    for pm in db::list_payment_methods(conn)? {
        let resp = client.post_payment(&pm);
        if resp.ok() {
            sent += 1;
        } else {
            failed += 1;
            warn!(status = resp.status, name = %pm.name, "payment method push failed");
        }
    }
    for tx in db::list_transactions(conn, None, None)? {
        let resp = client.post_transaction(&tx);
        if resp.ok() {
            sent += 1;
        } else {
            failed += 1;
            warn!(status = resp.status, id = tx.id, "transaction push failed");
        }
    }
    println!("Pushed {} rows ({} failed)", sent, failed);
    Ok(())
}

fn pull(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let Some(client) = client_if_configured(conn)? else {
        println!("Sync not configured; run 'sync set-url' and 'sync set-secret' first.");
        return Ok(());
    };
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&DEFAULT_PULL_LIMIT);
    let rows = client.get_transactions(start, end, limit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|t| {
                vec![
                    t.remote_id.clone(),
                    t.date_iso.clone(),
                    t.amount.to_string(),
                    t.category_name.clone(),
                    t.payment_method.clone(),
                    t.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["RemoteID", "Date", "Amount", "Category", "Payment", "Note"], data)
        );
    }
    Ok(())
}

fn remote_categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let Some(client) = client_if_configured(conn)? else {
        println!("Sync not configured; run 'sync set-url' and 'sync set-secret' first.");
        return Ok(());
    };
    let mut rows = client.get_categories()?;
    // Decoder preserves server order; display order is ours.
    rows.sort_by_key(|c| c.sort_index);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|c| {
                vec![
                    c.emoji.clone(),
                    c.name.clone(),
                    c.sort_index.to_string(),
                    if c.is_income { "income" } else { "expense" }.to_string(),
                    c.remote_id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["", "Name", "Order", "Kind", "RemoteID"], data)
        );
    }
    Ok(())
}

fn remote_payments(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let Some(client) = client_if_configured(conn)? else {
        println!("Sync not configured; run 'sync set-url' and 'sync set-secret' first.");
        return Ok(());
    };
    let mut rows = client.get_payment_methods()?;
    rows.sort_by_key(|p| p.sort_index);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|p| {
                vec![
                    p.emoji.clone(),
                    p.name.clone(),
                    p.sort_index.to_string(),
                    p.remote_id.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Name", "Order", "RemoteID"], data));
    }
    Ok(())
}
