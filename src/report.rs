// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over locally stored transactions.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NO_PAYMENT_METHOD: &str = "—";

/// Minimal view of a transaction the aggregator needs.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub income: Decimal,
    /// Sum of negative amounts; zero or below.
    pub expenses: Decimal,
    pub net: Decimal,
    pub by_category: Vec<(String, Decimal)>,
    pub by_payment: Vec<(String, Decimal)>,
}

/// First day of the month and first day of the following month, as a
/// half-open interval. December rolls the year.
fn month_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

fn breakdown(groups: BTreeMap<String, Decimal>) -> Vec<(String, Decimal)> {
    let mut out: Vec<(String, Decimal)> = groups.into_iter().collect();
    // Stable sort over name-ordered input keeps ties deterministic.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Pure fold over the given rows; an empty month yields zeros and empty
/// breakdowns. An out-of-range month number also yields the empty report.
pub fn aggregate(rows: &[ReportRow], month: u32, year: i32) -> MonthlyReport {
    let bounds = month_bounds(month, year);

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut by_payment: BTreeMap<String, Decimal> = BTreeMap::new();

    if let Some((start, end)) = bounds {
        for row in rows {
            let d = row.date.date();
            if d < start || d >= end {
                continue;
            }
            if row.amount > Decimal::ZERO {
                income += row.amount;
            } else {
                expenses += row.amount;
            }
            let cat = row
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            *by_category.entry(cat).or_insert(Decimal::ZERO) += row.amount;
            let pm = row
                .payment_method
                .clone()
                .unwrap_or_else(|| NO_PAYMENT_METHOD.to_string());
            *by_payment.entry(pm).or_insert(Decimal::ZERO) += row.amount;
        }
    }

    MonthlyReport {
        income,
        expenses,
        net: income + expenses,
        by_category: breakdown(by_category),
        by_payment: breakdown(by_payment),
    }
}
