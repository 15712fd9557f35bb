// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::report::{aggregate, ReportRow, NO_PAYMENT_METHOD, UNCATEGORIZED};
use rust_decimal::Decimal;

fn row(amount: &str, date: &str, category: Option<&str>, payment: Option<&str>) -> ReportRow {
    ReportRow {
        amount: amount.parse().unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        category: category.map(|s| s.to_string()),
        payment_method: payment.map(|s| s.to_string()),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn worked_example_march_2025() {
    let rows = vec![
        row("150.00", "2025-03-05", Some("Salary"), None),
        row("-42.50", "2025-03-10", Some("Food"), None),
        row("-10.00", "2025-04-01", Some("Food"), None),
    ];
    let r = aggregate(&rows, 3, 2025);
    assert_eq!(r.income, dec("150.00"));
    assert_eq!(r.expenses, dec("-42.50"));
    assert_eq!(r.net, dec("107.50"));
    assert_eq!(
        r.by_category,
        vec![
            ("Salary".to_string(), dec("150.00")),
            ("Food".to_string(), dec("-42.50")),
        ]
    );
}

#[test]
fn empty_month_is_zeroes_not_an_error() {
    let r = aggregate(&[], 6, 2025);
    assert_eq!(r.income, Decimal::ZERO);
    assert_eq!(r.expenses, Decimal::ZERO);
    assert_eq!(r.net, Decimal::ZERO);
    assert!(r.by_category.is_empty());
    assert!(r.by_payment.is_empty());
}

#[test]
fn net_is_income_plus_expenses() {
    let rows = vec![
        row("1000", "2025-07-01", Some("Salary"), Some("Cash")),
        row("-250.25", "2025-07-15", Some("Food"), Some("Pix")),
        row("-99.75", "2025-07-31", None, None),
        row("5", "2025-07-20", Some("Other"), Some("Cash")),
    ];
    let r = aggregate(&rows, 7, 2025);
    assert_eq!(r.net, r.income + r.expenses);
    assert_eq!(r.income, dec("1005"));
    assert_eq!(r.expenses, dec("-350.00"));
}

#[test]
fn month_interval_is_half_open() {
    let rows = vec![
        row("-1", "2025-02-28", Some("Food"), None),
        row("-2", "2025-03-01", Some("Food"), None),
        row("-4", "2025-03-31", Some("Food"), None),
        row("-8", "2025-04-01", Some("Food"), None),
    ];
    let r = aggregate(&rows, 3, 2025);
    assert_eq!(r.expenses, dec("-6"));
}

#[test]
fn december_rolls_into_next_year() {
    let rows = vec![
        row("-3", "2025-12-31", Some("Bills"), None),
        row("-7", "2026-01-01", Some("Bills"), None),
    ];
    let r = aggregate(&rows, 12, 2025);
    assert_eq!(r.expenses, dec("-3"));
}

#[test]
fn leap_february_includes_the_29th() {
    let rows = vec![
        row("-5", "2024-02-29", Some("Food"), None),
        row("-9", "2024-03-01", Some("Food"), None),
    ];
    let r = aggregate(&rows, 2, 2024);
    assert_eq!(r.expenses, dec("-5"));
}

#[test]
fn missing_labels_get_placeholder_groups() {
    let rows = vec![
        row("-10", "2025-05-02", None, None),
        row("-20", "2025-05-03", Some("Food"), Some("Cash")),
    ];
    let r = aggregate(&rows, 5, 2025);
    // Descending by summed value: -10 sorts above -20.
    assert_eq!(
        r.by_category,
        vec![
            (UNCATEGORIZED.to_string(), dec("-10")),
            ("Food".to_string(), dec("-20")),
        ]
    );
    assert_eq!(
        r.by_payment,
        vec![
            (NO_PAYMENT_METHOD.to_string(), dec("-10")),
            ("Cash".to_string(), dec("-20")),
        ]
    );
}

#[test]
fn breakdowns_sort_descending_with_deterministic_ties() {
    let rows = vec![
        row("-30", "2025-05-02", Some("Transport"), None),
        row("-30", "2025-05-03", Some("Food"), None),
        row("100", "2025-05-04", Some("Salary"), None),
    ];
    let a = aggregate(&rows, 5, 2025);
    let b = aggregate(&rows, 5, 2025);
    assert_eq!(a.by_category, b.by_category);
    assert_eq!(a.by_category[0].0, "Salary");
    // Tied groups come out in name order.
    assert_eq!(a.by_category[1].0, "Food");
    assert_eq!(a.by_category[2].0, "Transport");
}

#[test]
fn invalid_month_number_yields_empty_report() {
    let rows = vec![row("-1", "2025-03-01", Some("Food"), None)];
    let r = aggregate(&rows, 13, 2025);
    assert_eq!(r.net, Decimal::ZERO);
    assert!(r.by_category.is_empty());
}
