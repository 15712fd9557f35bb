// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub sort_index: i64,
    pub is_income: bool,
    pub remote_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub sort_index: i64,
    pub remote_id: String,
}

/// Amount sign is fixed at creation from the category's income flag:
/// income rows are positive, expense rows negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub note: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub remote_id: String,
}

/// Category row as decoded off the wire. Fields already normalized by the
/// tolerant decoder; server ordering preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteCategory {
    pub remote_id: String,
    pub name: String,
    pub emoji: String,
    pub sort_index: i64,
    pub is_income: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemotePaymentMethod {
    pub remote_id: String,
    pub name: String,
    pub emoji: String,
    pub sort_index: i64,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteTransaction {
    pub remote_id: String,
    pub amount: Decimal,
    pub category_name: String,
    pub payment_method: String,
    pub merchant_name: String,
    pub note: String,
    pub date_iso: String,
    pub transaction_type: String,
}
