// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::client::classify;
use pocketledger::error::SyncError;
use pocketledger::wire::{decode_categories, decode_envelope, decode_payment_methods, decode_transactions};
use rust_decimal::Decimal;

#[test]
fn envelope_happy_path() {
    let env = decode_envelope(r#"{"success":true,"message":"ok","total":"2","data":[]}"#).unwrap();
    assert!(env.success);
    assert_eq!(env.message, "ok");
    // total tolerated as a numeric string
    assert_eq!(env.total, 2);
    assert!(env.data.is_empty());
}

#[test]
fn envelope_shape_mismatch_fails_whole_call() {
    for body in [
        "not json at all",
        "[]",
        r#"{"success":"yes","message":"ok","data":[]}"#,
        r#"{"success":true,"data":[]}"#,
        r#"{"success":true,"message":"ok","data":{}}"#,
    ] {
        match decode_envelope(body) {
            Err(SyncError::Decode { context }) => assert_eq!(context, "envelope"),
            other => panic!("expected envelope decode error, got {:?}", other),
        }
    }
}

#[test]
fn payment_method_with_numeric_emoji_and_null_timestamp() {
    // Worked example: emoji echoed as a number must not fail the row.
    let body = r#"{"success":true,"message":"ok","total":1,
        "data":[{"remoteID":"pm-2","name":"Pix","emoji":0,"sortIndex":2,"timestamp":null}]}"#;
    let rows = decode_payment_methods(body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].remote_id, "pm-2");
    assert_eq!(rows[0].name, "Pix");
    assert_eq!(rows[0].emoji, "");
    assert_eq!(rows[0].sort_index, 2);
    assert_eq!(rows[0].timestamp, None);
}

#[test]
fn rows_missing_identity_fields_are_dropped_not_fatal() {
    let body = r#"{"success":true,"message":"ok","total":4,"data":[
        {"remoteID":"c-1","name":"Food","emoji":"🍔","sortIndex":1},
        {"name":"NoRemoteId","sortIndex":2},
        {"remoteID":"c-3","emoji":"🚌"},
        {"remoteID":"c-4","name":"Bills","sortIndex":"9"}
    ]}"#;
    let rows = decode_categories(body).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].remote_id, "c-1");
    assert_eq!(rows[1].remote_id, "c-4");
    assert_eq!(rows[1].sort_index, 9);
}

#[test]
fn empty_remote_id_counts_as_missing() {
    let body = r#"{"success":true,"message":"ok","data":[
        {"remoteID":"","name":"Ghost"},
        {"remoteID":"c-1","name":"Food"}
    ]}"#;
    let rows = decode_categories(body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Food");
}

#[test]
fn category_is_income_wire_variants() {
    let body = r#"{"success":true,"message":"ok","data":[
        {"remoteID":"a","name":"Salary","isIncome":true},
        {"remoteID":"b","name":"Bonus","isIncome":1},
        {"remoteID":"c","name":"Food","isIncome":"false"},
        {"remoteID":"d","name":"Rent"}
    ]}"#;
    let rows = decode_categories(body).unwrap();
    let flags: Vec<bool> = rows.iter().map(|c| c.is_income).collect();
    assert_eq!(flags, vec![true, true, false, false]);
}

#[test]
fn transactions_decode_tolerantly_and_preserve_server_order() {
    let body = r#"{"success":true,"message":"ok","total":3,"filtered":2,"data":[
        {"remoteID":"t-2","amount":"-42.50","categoryName":"Food","paymentMethod":"Pix",
         "merchantName":7,"note":null,"dateISO":"2025-03-10","transactionType":"expense"},
        {"amount":100},
        {"remoteID":"t-1","amount":150.0,"categoryName":"Salary","dateISO":"2025-03-05"}
    ]}"#;
    let rows = decode_transactions(body).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].remote_id, "t-2");
    assert_eq!(rows[0].amount, Decimal::new(-4250, 2));
    assert_eq!(rows[0].merchant_name, "");
    assert_eq!(rows[0].note, "");
    assert_eq!(rows[1].remote_id, "t-1");
    assert_eq!(rows[1].amount, Decimal::new(150, 0));
    assert_eq!(rows[1].payment_method, "");
}

#[test]
fn classify_http_status() {
    match classify(500, "boom") {
        Err(SyncError::HttpStatus { code, body }) => {
            assert_eq!(code, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[test]
fn classify_empty_body() {
    assert!(matches!(classify(200, "  \n"), Err(SyncError::EmptyBody)));
}

#[test]
fn classify_html_error_page() {
    let body = "<!DOCTYPE html><HTML><body>Sign-in required</body></HTML>";
    assert!(matches!(classify(200, body), Err(SyncError::HtmlErrorPage)));
}

#[test]
fn classify_passes_json_through() {
    assert!(classify(200, r#"{"success":true}"#).is_ok());
}
