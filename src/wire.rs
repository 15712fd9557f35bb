// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Decoding of the remote `{success, message, total, data}` envelope.
//!
//! The envelope itself must have the right shape or the whole call fails
//! with a decode error. Individual rows are another matter: a row missing
//! its identity fields is dropped and the rest of the batch decodes
//! normally, and every other field goes through the tolerant decoder.

use serde_json::Value;

use crate::coerce;
use crate::error::SyncError;
use crate::models::{RemoteCategory, RemotePaymentMethod, RemoteTransaction};

#[derive(Debug)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    pub total: i64,
    pub filtered: i64,
    pub data: Vec<Value>,
}

/// Parses the outer envelope. `success`, `message`, and `data` must be a
/// bool, a string, and an array; `total`/`filtered` are read tolerantly.
pub fn decode_envelope(body: &str) -> Result<Envelope, SyncError> {
    let root: Value =
        serde_json::from_str(body).map_err(|_| SyncError::decode("envelope"))?;
    let obj = root.as_object().ok_or_else(|| SyncError::decode("envelope"))?;

    let success = match obj.get("success") {
        Some(Value::Bool(b)) => *b,
        _ => return Err(SyncError::decode("envelope")),
    };
    let message = match obj.get("message") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(SyncError::decode("envelope")),
    };
    let data = match obj.get("data") {
        Some(Value::Array(rows)) => rows.clone(),
        _ => return Err(SyncError::decode("envelope")),
    };
    let total = obj.get("total").map(coerce::integer).unwrap_or(0);
    let filtered = obj.get("filtered").map(coerce::integer).unwrap_or(0);

    Ok(Envelope {
        success,
        message,
        total,
        filtered,
        data,
    })
}

fn required_string(row: &Value, key: &str) -> Option<String> {
    match row.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn field<'a>(row: &'a Value, key: &str) -> &'a Value {
    row.get(key).unwrap_or(&Value::Null)
}

/// Rows must carry non-empty `remoteID` and `name` strings; rows that do
/// not are dropped. Server ordering is preserved, sorting by sort_index is
/// the caller's job.
pub fn decode_categories(body: &str) -> Result<Vec<RemoteCategory>, SyncError> {
    let env = decode_envelope(body)?;
    let mut out = Vec::with_capacity(env.data.len());
    for row in &env.data {
        let (Some(remote_id), Some(name)) =
            (required_string(row, "remoteID"), required_string(row, "name"))
        else {
            continue;
        };
        out.push(RemoteCategory {
            remote_id,
            name,
            emoji: coerce::text(field(row, "emoji")),
            sort_index: coerce::integer(field(row, "sortIndex")),
            is_income: coerce::boolean(field(row, "isIncome")),
            timestamp: coerce::timestamp(field(row, "timestamp")),
        });
    }
    Ok(out)
}

pub fn decode_payment_methods(body: &str) -> Result<Vec<RemotePaymentMethod>, SyncError> {
    let env = decode_envelope(body)?;
    let mut out = Vec::with_capacity(env.data.len());
    for row in &env.data {
        let (Some(remote_id), Some(name)) =
            (required_string(row, "remoteID"), required_string(row, "name"))
        else {
            continue;
        };
        out.push(RemotePaymentMethod {
            remote_id,
            name,
            emoji: coerce::text(field(row, "emoji")),
            sort_index: coerce::integer(field(row, "sortIndex")),
            timestamp: coerce::timestamp(field(row, "timestamp")),
        });
    }
    Ok(out)
}

/// Transactions only need a non-empty `remoteID` to be kept; every other
/// field degrades to its tolerant default.
pub fn decode_transactions(body: &str) -> Result<Vec<RemoteTransaction>, SyncError> {
    let env = decode_envelope(body)?;
    let mut out = Vec::with_capacity(env.data.len());
    for row in &env.data {
        let Some(remote_id) = required_string(row, "remoteID") else {
            continue;
        };
        out.push(RemoteTransaction {
            remote_id,
            amount: coerce::amount(field(row, "amount")),
            category_name: coerce::text(field(row, "categoryName")),
            payment_method: coerce::text(field(row, "paymentMethod")),
            merchant_name: coerce::text(field(row, "merchantName")),
            note: coerce::text(field(row, "note")),
            date_iso: coerce::text(field(row, "dateISO")),
            transaction_type: coerce::text(field(row, "transactionType")),
        });
    }
    Ok(out)
}
