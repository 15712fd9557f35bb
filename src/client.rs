// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the spreadsheet-backed mirror endpoint.
//!
//! One fixed base URL, a static shared secret in the query string. Writes
//! are fire-and-forget: a failed POST is reported, never raised, and the
//! local row stays committed. Reads classify the response before any
//! decoding is attempted.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::error::SyncError;
use crate::models::{Category, PaymentMethod, RemoteCategory, RemotePaymentMethod, RemoteTransaction, Transaction};
use crate::utils::http_client;
use crate::wire;

pub const DEFAULT_PULL_LIMIT: usize = 300;

/// Injected configuration; the secret comes from the settings store, never
/// from a compile-time constant.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub secret: String,
}

/// Outcome of a fire-and-forget POST. Network failure is `status: -1` with
/// the error description as the body; callers treat any non-2xx as a
/// non-fatal warning.
#[derive(Debug, Clone)]
pub struct PostResponse {
    pub status: i32,
    pub body: String,
}

impl PostResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Classifies a raw HTTP outcome before decoding: non-2xx, empty body, and
/// HTML error pages are surfaced as their own variants.
pub fn classify(status: u16, body: &str) -> Result<(), SyncError> {
    if !(200..300).contains(&status) {
        return Err(SyncError::HttpStatus {
            code: status,
            body: body.to_string(),
        });
    }
    if body.trim().is_empty() {
        return Err(SyncError::EmptyBody);
    }
    if body.to_ascii_lowercase().contains("<html") {
        return Err(SyncError::HtmlErrorPage);
    }
    Ok(())
}

pub fn transaction_payload(tx: &Transaction) -> Value {
    let transaction_type = if tx.amount >= Decimal::ZERO {
        "income"
    } else {
        "expense"
    };
    json!({
        "type": "transaction",
        "remoteID": tx.remote_id,
        "amount": tx.amount.to_f64().unwrap_or(0.0),
        "dateISO": tx.date.format("%Y-%m-%d").to_string(),
        "categoryName": tx.category.clone().unwrap_or_default(),
        "paymentMethod": tx.payment_method.clone().unwrap_or_default(),
        "merchantName": "",
        "note": tx.note.clone().unwrap_or_default(),
        "transactionType": transaction_type,
    })
}

pub fn category_payload(cat: &Category) -> Value {
    json!({
        "type": "category",
        "remoteID": cat.remote_id,
        "name": cat.name,
        "emoji": cat.emoji,
        "sortIndex": cat.sort_index,
        "isIncome": cat.is_income,
    })
}

pub fn payment_payload(pm: &PaymentMethod) -> Value {
    json!({
        "type": "paymentMethod",
        "remoteID": pm.remote_id,
        "name": pm.name,
        "emoji": pm.emoji,
        "sortIndex": pm.sort_index,
    })
}

pub struct SyncClient {
    http: reqwest::blocking::Client,
    config: RemoteConfig,
}

impl SyncClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            config,
        })
    }

    fn post(&self, payload: &Value) -> PostResponse {
        let send = self
            .http
            .post(&self.config.base_url)
            .query(&[("secret", self.config.secret.as_str())])
            .json(payload)
            .send();
        match send {
            Ok(resp) => {
                let status = resp.status().as_u16() as i32;
                let body = resp.text().unwrap_or_default();
                PostResponse { status, body }
            }
            Err(e) => PostResponse {
                status: -1,
                body: e.to_string(),
            },
        }
    }

    pub fn post_transaction(&self, tx: &Transaction) -> PostResponse {
        self.post(&transaction_payload(tx))
    }

    pub fn post_category(&self, cat: &Category) -> PostResponse {
        self.post(&category_payload(cat))
    }

    pub fn post_payment(&self, pm: &PaymentMethod) -> PostResponse {
        self.post(&payment_payload(pm))
    }

    fn get(&self, query: &[(&str, String)]) -> Result<String, SyncError> {
        let mut params: Vec<(&str, String)> =
            vec![("secret", self.config.secret.clone())];
        params.extend_from_slice(query);
        let resp = self
            .http
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        classify(status, &body)?;
        Ok(body)
    }

    pub fn get_transactions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<RemoteTransaction>, SyncError> {
        let body = self.get(&[
            ("action", "getTransactions".to_string()),
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
            ("limit", limit.to_string()),
        ])?;
        wire::decode_transactions(&body)
    }

    /// Caller sorts by `sort_index`; the decoder preserves server order.
    pub fn get_categories(&self) -> Result<Vec<RemoteCategory>, SyncError> {
        let body = self.get(&[("action", "getCategories".to_string())])?;
        wire::decode_categories(&body)
    }

    pub fn get_payment_methods(&self) -> Result<Vec<RemotePaymentMethod>, SyncError> {
        let body = self.get(&[("action", "getPaymentMethods".to_string())])?;
        wire::decode_payment_methods(&body)
    }
}
