// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::PathBuf;

use crate::models::{Category, PaymentMethod, Transaction};
use crate::utils::new_remote_id;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev", "Pocketledger", "pocketledger"));

/// Seeded on first list when the local collection is empty.
const DEFAULT_CATEGORIES: &[(&str, &str, bool)] = &[
    ("Salary", "💼", true),
    ("Food", "🍔", false),
    ("Transport", "🚌", false),
    ("Shopping", "🛍️", false),
    ("Bills", "🧾", false),
    ("Entertainment", "🎬", false),
    ("Other", "📦", false),
];

const DEFAULT_PAYMENT_METHODS: &[(&str, &str)] = &[
    ("Cash", "💵"),
    ("Debit Card", "💳"),
    ("Credit Card", "💳"),
    ("Pix", "⚡"),
];

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pocketledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        emoji TEXT NOT NULL DEFAULT '',
        sort_index INTEGER NOT NULL DEFAULT 0,
        is_income INTEGER NOT NULL DEFAULT 0,
        remote_id TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS payment_methods(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        emoji TEXT NOT NULL DEFAULT '',
        sort_index INTEGER NOT NULL DEFAULT 0,
        remote_id TEXT NOT NULL UNIQUE
    );

    -- Deleting a category or payment method nullifies referencing
    -- transactions; it never cascades.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        note TEXT,
        category_id INTEGER,
        payment_method_id INTEGER,
        remote_id TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL,
        FOREIGN KEY(payment_method_id) REFERENCES payment_methods(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

/// Inserts the starter set when the table is empty. Returns how many rows
/// were seeded.
pub fn seed_categories_if_empty(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(0);
    }
    for (i, (name, emoji, is_income)) in DEFAULT_CATEGORIES.iter().enumerate() {
        conn.execute(
            "INSERT INTO categories(name, emoji, sort_index, is_income, remote_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, emoji, i as i64, *is_income as i64, new_remote_id()],
        )?;
    }
    Ok(DEFAULT_CATEGORIES.len())
}

pub fn seed_payment_methods_if_empty(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM payment_methods", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(0);
    }
    for (i, (name, emoji)) in DEFAULT_PAYMENT_METHODS.iter().enumerate() {
        conn.execute(
            "INSERT INTO payment_methods(name, emoji, sort_index, remote_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, emoji, i as i64, new_remote_id()],
        )?;
    }
    Ok(DEFAULT_PAYMENT_METHODS.len())
}

/// Renumbers sort indexes 0..N-1 in id order when every row in the table
/// carries the same value (the degenerate/unset state). A collection of one
/// is left alone. `table` must be `categories` or `payment_methods`.
pub fn renumber_if_degenerate(conn: &Connection, table: &str) -> Result<bool> {
    assert!(table == "categories" || table == "payment_methods");
    let (count, distinct): (i64, i64) = conn.query_row(
        &format!("SELECT COUNT(*), COUNT(DISTINCT sort_index) FROM {table}"),
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    if count < 2 || distinct > 1 {
        return Ok(false);
    }
    let mut stmt = conn.prepare(&format!("SELECT id FROM {table} ORDER BY id"))?;
    let ids: Vec<i64> = stmt
        .query_map([], |r| r.get(0))?
        .collect::<std::result::Result<_, _>>()?;
    for (i, id) in ids.iter().enumerate() {
        conn.execute(
            &format!("UPDATE {table} SET sort_index=?1 WHERE id=?2"),
            params![i as i64, id],
        )?;
    }
    Ok(true)
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, emoji, sort_index, is_income, remote_id
         FROM categories ORDER BY sort_index, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            emoji: r.get(2)?,
            sort_index: r.get(3)?,
            is_income: r.get::<_, i64>(4)? != 0,
            remote_id: r.get(5)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<_, _>>()?)
}

pub fn list_payment_methods(conn: &Connection) -> Result<Vec<PaymentMethod>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, emoji, sort_index, remote_id
         FROM payment_methods ORDER BY sort_index, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(PaymentMethod {
            id: r.get(0)?,
            name: r.get(1)?,
            emoji: r.get(2)?,
            sort_index: r.get(3)?,
            remote_id: r.get(4)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<_, _>>()?)
}

pub fn category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    let row = conn
        .query_row(
            "SELECT id, name, emoji, sort_index, is_income, remote_id
             FROM categories WHERE name=?1",
            params![name],
            |r| {
                Ok(Category {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    emoji: r.get(2)?,
                    sort_index: r.get(3)?,
                    is_income: r.get::<_, i64>(4)? != 0,
                    remote_id: r.get(5)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn payment_method_by_name(conn: &Connection, name: &str) -> Result<Option<PaymentMethod>> {
    let row = conn
        .query_row(
            "SELECT id, name, emoji, sort_index, remote_id
             FROM payment_methods WHERE name=?1",
            params![name],
            |r| {
                Ok(PaymentMethod {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    emoji: r.get(2)?,
                    sort_index: r.get(3)?,
                    remote_id: r.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

fn next_sort_index(conn: &Connection, table: &str) -> Result<i64> {
    let max: Option<i64> = conn.query_row(
        &format!("SELECT MAX(sort_index) FROM {table}"),
        [],
        |r| r.get(0),
    )?;
    Ok(max.map(|m| m + 1).unwrap_or(0))
}

pub fn insert_category(
    conn: &Connection,
    name: &str,
    emoji: &str,
    is_income: bool,
) -> Result<Category> {
    let sort_index = next_sort_index(conn, "categories")?;
    let remote_id = new_remote_id();
    conn.execute(
        "INSERT INTO categories(name, emoji, sort_index, is_income, remote_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, emoji, sort_index, is_income as i64, remote_id],
    )?;
    Ok(Category {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        emoji: emoji.to_string(),
        sort_index,
        is_income,
        remote_id,
    })
}

pub fn insert_payment_method(conn: &Connection, name: &str, emoji: &str) -> Result<PaymentMethod> {
    let sort_index = next_sort_index(conn, "payment_methods")?;
    let remote_id = new_remote_id();
    conn.execute(
        "INSERT INTO payment_methods(name, emoji, sort_index, remote_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, emoji, sort_index, remote_id],
    )?;
    Ok(PaymentMethod {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        emoji: emoji.to_string(),
        sort_index,
        remote_id,
    })
}

pub fn delete_category(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
    Ok(n > 0)
}

pub fn delete_payment_method(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM payment_methods WHERE name=?1", params![name])?;
    Ok(n > 0)
}

/// Inserts a transaction; the signed amount must already carry the sign
/// derived from the category's income flag at creation time.
pub fn insert_transaction(
    conn: &Connection,
    date: chrono::NaiveDateTime,
    amount: rust_decimal::Decimal,
    note: Option<&str>,
    category_id: Option<i64>,
    payment_method_id: Option<i64>,
) -> Result<Transaction> {
    let remote_id = new_remote_id();
    conn.execute(
        "INSERT INTO transactions(date, amount, note, category_id, payment_method_id, remote_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            amount.to_string(),
            note,
            category_id,
            payment_method_id,
            remote_id
        ],
    )?;
    let id = conn.last_insert_rowid();
    load_transaction(conn, id)?.context("Transaction just inserted is missing")
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

fn tx_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, String, Option<String>, Option<String>, Option<String>, String)> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn parse_tx(
    raw: (i64, String, String, Option<String>, Option<String>, Option<String>, String),
) -> Result<Transaction> {
    let (id, date, amount, note, category, payment_method, remote_id) = raw;
    Ok(Transaction {
        id,
        date: chrono::NaiveDateTime::parse_from_str(&date, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| format!("Invalid stored date '{}'", date))?,
        amount: amount
            .parse()
            .with_context(|| format!("Invalid stored amount '{}'", amount))?,
        note,
        category,
        payment_method,
        remote_id,
    })
}

const TX_SELECT: &str = "SELECT t.id, t.date, t.amount, t.note, c.name, p.name, t.remote_id
     FROM transactions t
     LEFT JOIN categories c ON t.category_id=c.id
     LEFT JOIN payment_methods p ON t.payment_method_id=p.id";

pub fn load_transaction(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let raw = conn
        .query_row(&format!("{TX_SELECT} WHERE t.id=?1"), params![id], tx_from_row)
        .optional()?;
    raw.map(parse_tx).transpose()
}

/// Most recent first; `month` filters to "YYYY-MM".
pub fn list_transactions(
    conn: &Connection,
    month: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<Transaction>> {
    let mut sql = format!("{TX_SELECT} WHERE 1=1");
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(m) = month {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(m.to_string());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(l) = limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(l.to_string());
    }
    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(parse_tx(tx_from_row(r)?)?);
    }
    Ok(out)
}
