// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tolerant scalar decoding for the spreadsheet-backed endpoint.
//!
//! The backend is a spreadsheet script, not a typed API: the same field can
//! arrive as a string, a bare number, or null depending on the sheet state.
//! Every function here maps an arbitrary JSON value to its target type with
//! a defined fallback and never fails.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

/// Text fields (emoji, notes, names): strings pass through verbatim,
/// including the empty string; numbers and everything else collapse to "".
pub fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// Integer fields (sortIndex, total): numbers truncate, integer-literal
/// strings parse, anything else is 0.
pub fn integer(v: &Value) -> i64 {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// Money fields: numbers convert, numeric strings parse, anything else is 0.
pub fn amount(v: &Value) -> Decimal {
    match v {
        // Parse the number's own textual form to avoid binary-float noise.
        Value::Number(n) => n.to_string().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        Value::String(s) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Boolean fields (isIncome): bools pass through; nonzero numbers and the
/// strings "true"/"1" are true; everything else is false.
pub fn boolean(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s.trim() == "1",
        _ => false,
    }
}

/// Timestamps: a well-formed RFC 3339 string parses; null, absence, or a
/// malformed string means "no timestamp", not an error.
pub fn timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}
