// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::client::{category_payload, payment_payload, transaction_payload};
use pocketledger::models::{Category, PaymentMethod, Transaction};
use pocketledger::wire::decode_categories;
use rust_decimal::Decimal;
use serde_json::json;

fn sample_category() -> Category {
    Category {
        id: 1,
        name: "Food".to_string(),
        emoji: "🍔".to_string(),
        sort_index: 3,
        is_income: false,
        remote_id: "cat-food".to_string(),
    }
}

#[test]
fn transaction_payload_fields() {
    let tx = Transaction {
        id: 9,
        date: NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        amount: Decimal::new(-4250, 2),
        note: Some("lunch".to_string()),
        category: Some("Food".to_string()),
        payment_method: Some("Pix".to_string()),
        remote_id: "t-2".to_string(),
    };
    let p = transaction_payload(&tx);
    assert_eq!(p["type"], "transaction");
    assert_eq!(p["remoteID"], "t-2");
    assert_eq!(p["amount"], json!(-42.5));
    assert_eq!(p["dateISO"], "2025-03-10");
    assert_eq!(p["categoryName"], "Food");
    assert_eq!(p["paymentMethod"], "Pix");
    assert_eq!(p["note"], "lunch");
    assert_eq!(p["transactionType"], "expense");
}

#[test]
fn transaction_type_follows_sign() {
    let mut tx = Transaction {
        id: 1,
        date: NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        amount: Decimal::new(150, 0),
        note: None,
        category: Some("Salary".to_string()),
        payment_method: None,
        remote_id: "t-1".to_string(),
    };
    assert_eq!(transaction_payload(&tx)["transactionType"], "income");
    assert_eq!(transaction_payload(&tx)["paymentMethod"], "");
    tx.amount = Decimal::new(-150, 0);
    assert_eq!(transaction_payload(&tx)["transactionType"], "expense");
}

#[test]
fn category_payload_fields() {
    let p = category_payload(&sample_category());
    assert_eq!(p["type"], "category");
    assert_eq!(p["remoteID"], "cat-food");
    assert_eq!(p["name"], "Food");
    assert_eq!(p["emoji"], "🍔");
    assert_eq!(p["sortIndex"], 3);
    assert_eq!(p["isIncome"], false);
}

#[test]
fn payment_payload_fields() {
    let pm = PaymentMethod {
        id: 2,
        name: "Pix".to_string(),
        emoji: "⚡".to_string(),
        sort_index: 2,
        remote_id: "pm-2".to_string(),
    };
    let p = payment_payload(&pm);
    assert_eq!(p["type"], "paymentMethod");
    assert_eq!(p["remoteID"], "pm-2");
    assert_eq!(p["sortIndex"], 2);
}

/// A category posted and then echoed back must decode to the same identity
/// whether the backend returns the emoji as a string or as a number.
#[test]
fn category_round_trip_survives_emoji_retyping() {
    let cat = sample_category();
    let posted = category_payload(&cat);

    for echoed_emoji in [json!("🍔"), json!(0)] {
        let body = json!({
            "success": true,
            "message": "ok",
            "total": 1,
            "data": [{
                "remoteID": posted["remoteID"],
                "name": posted["name"],
                "emoji": echoed_emoji,
                "sortIndex": posted["sortIndex"],
                "isIncome": posted["isIncome"],
                "timestamp": null
            }]
        })
        .to_string();
        let rows = decode_categories(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].remote_id, cat.remote_id);
        assert_eq!(rows[0].name, cat.name);
        assert_eq!(rows[0].sort_index, cat.sort_index);
        assert!(rows[0].emoji == cat.emoji || rows[0].emoji.is_empty());
    }
}

/// The sheet sometimes re-types sortIndex as a string too.
#[test]
fn category_round_trip_survives_sort_index_retyping() {
    let cat = sample_category();
    let body = json!({
        "success": true,
        "message": "ok",
        "data": [{
            "remoteID": cat.remote_id,
            "name": cat.name,
            "emoji": cat.emoji,
            "sortIndex": cat.sort_index.to_string(),
            "isIncome": "false"
        }]
    })
    .to_string();
    let rows = decode_categories(&body).unwrap();
    assert_eq!(rows[0].sort_index, cat.sort_index);
    assert!(!rows[0].is_income);
}
