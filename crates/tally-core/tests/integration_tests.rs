//! Integration tests for tally-core
//!
//! These tests exercise the full load → analyze → export workflow.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{
    snapshot::{CUSTOMERS_FILE, ORDERS_FILE, ORDER_ITEMS_FILE, PRODUCTS_FILE},
    Analytics, AnalyticsConfig, CustomerId, MonthKey, OrderSheet, ProductId, Snapshot,
};

/// Catalog with two categorized syrups, an uncategorized butter and a
/// candy nobody has ordered
fn products_csv() -> &'static str {
    "id,item_code,description,category,unit_price,units_per_case,case_price,grade,ml
1,MS-250,Maple syrup 250 mL,Syrup,4.25,24,96.00,Amber,250
2,MS-500,Maple syrup 500 mL,Syrup,7.50,12,84.00,Amber,500
3,MB-100,Maple butter,,6.00,,,,
4,MC-050,Maple candy,Candy,2.00,,,,
"
}

fn customers_csv() -> &'static str {
    "id,name,email,phone,address,postal_code
1,Epicerie Nord,nord@example.com,,,
2,Fromagerie Lait,,,,
"
}

/// Customer 1 orders every 10 days in January; customer 2 once in February.
/// Order 6 belongs to a customer that is not on file.
fn orders_csv() -> &'static str {
    "id,customer_id,order_date
1,1,2024-01-01
2,1,2024-01-11
3,1,2024-01-21
4,2,2024-02-03
6,9,2024-02-04
"
}

fn order_items_csv() -> &'static str {
    "id,order_id,product_id,quantity
1,1,1,10
2,1,3,2
3,2,1,8
4,3,1,12
5,3,2,4
6,4,2,6
7,4,77,3
8,5,1,100
9,6,3,1
"
}

fn write_snapshot(dir: &Path) {
    fs::write(dir.join(PRODUCTS_FILE), products_csv()).unwrap();
    fs::write(dir.join(CUSTOMERS_FILE), customers_csv()).unwrap();
    fs::write(dir.join(ORDERS_FILE), orders_csv()).unwrap();
    fs::write(dir.join(ORDER_ITEMS_FILE), order_items_csv()).unwrap();
}

fn load() -> Snapshot {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_snapshot(dir.path());
    Snapshot::load(dir.path()).expect("Failed to load snapshot")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

// =============================================================================
// Customer Report
// =============================================================================

#[test]
fn test_customer_report_from_csv_snapshot() {
    let snapshot = load();
    assert_eq!(snapshot.products.len(), 4);
    assert_eq!(snapshot.order_items.len(), 9);

    let analytics = Analytics::new(&snapshot);
    let report = analytics
        .customer_report(CustomerId(1), date("2024-02-15"))
        .expect("Customer 1 exists");

    // 10×4.25 + 2×6.00 + 8×4.25 + 12×4.25 + 4×7.50
    assert_eq!(report.totals.total_amount, dec("169.50"));
    assert_eq!(report.totals.total_units, 36);
    assert_eq!(report.totals.order_count, 3);
    assert_eq!(report.average_order_value, Some(dec("56.50")));

    assert_eq!(report.order_frequency_days, Some(10));
    assert_eq!(report.next_order_date, Some(date("2024-01-31")));
    assert_eq!(report.days_since_last_order, Some(25));

    let always: Vec<ProductId> = report
        .buying_patterns
        .always_buys
        .iter()
        .map(|p| p.id)
        .collect();
    let sometimes: Vec<ProductId> = report
        .buying_patterns
        .sometimes_buys
        .iter()
        .map(|p| p.id)
        .collect();
    let not_recent: Vec<ProductId> = report
        .buying_patterns
        .not_bought_recently
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(always, vec![ProductId(1)]);
    assert_eq!(sometimes, vec![ProductId(2), ProductId(3)]);
    assert_eq!(not_recent, vec![ProductId(4)]);
}

#[test]
fn test_two_orders_never_always_buys() {
    let mut snapshot = load();
    // Drop customer 1's third order
    snapshot.orders.retain(|o| o.id.0 != 3);

    let analytics = Analytics::new(&snapshot);
    let report = analytics
        .customer_report(CustomerId(1), date("2024-02-15"))
        .unwrap();

    assert!(report.buying_patterns.always_buys.is_empty());
    assert!(report
        .buying_patterns
        .sometimes_buys
        .iter()
        .any(|p| p.id == ProductId(1)));
}

#[test]
fn test_pattern_window_from_config() {
    let snapshot = load();
    let config = AnalyticsConfig::from_toml("[patterns]\nwindow = 2\n").unwrap();
    let analytics = Analytics::with_config(&snapshot, config);
    let report = analytics
        .customer_report(CustomerId(1), date("2024-02-15"))
        .unwrap();

    // Orders 2 and 3 both contain product 1; butter only appears in order 1
    let always: Vec<ProductId> = report
        .buying_patterns
        .always_buys
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(always, vec![ProductId(1)]);
    assert!(report
        .buying_patterns
        .not_bought_recently
        .iter()
        .any(|p| p.id == ProductId(3)));
}

// =============================================================================
// Dashboard & Product Report
// =============================================================================

#[test]
fn test_dashboard_skips_dangling_references() {
    let snapshot = load();
    let analytics = Analytics::new(&snapshot);
    let report = analytics.dashboard(date("2024-02-15"));

    // Unknown product 77 and unknown order 5 contribute nothing
    let expected = dec("169.50") + dec("45.00") + dec("6.00");
    assert_eq!(report.totals.total_amount, expected);
    assert_eq!(report.totals.order_count, 5);

    let months: Vec<String> = report.monthly_revenue.keys().map(|k| k.to_string()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
    assert_eq!(
        report.monthly_revenue[&MonthKey::new(2024, 1).unwrap()],
        dec("169.50")
    );
    assert_eq!(
        report.monthly_revenue[&MonthKey::new(2024, 2).unwrap()],
        dec("51.00")
    );

    assert_eq!(report.top_customers.len(), 3);
    assert_eq!(report.top_customers[0].display_name(), "Epicerie Nord");
    assert_eq!(report.top_customers[2].display_name(), "Unknown");

    assert_eq!(report.recent_orders[0].order.id.0, 6);
    assert_eq!(report.recent_orders[0].customer_name, None);
    assert_eq!(report.active_customers.len(), 2);
}

#[test]
fn test_product_totals_match_resolvable_items() {
    let snapshot = load();
    let analytics = Analytics::new(&snapshot);
    let report = analytics.product_report();

    let total: Decimal = report.totals.iter().map(|t| t.revenue).sum();
    let dashboard = analytics.dashboard(date("2024-02-15"));
    // Order 5 does not exist but its product does, so product totals include it
    assert_eq!(total, dashboard.totals.total_amount + dec("425.00"));

    assert!(report.totals.iter().all(|t| t.product.id != ProductId(4)));
    assert_eq!(report.trends.len(), report.totals.len());
}

#[test]
fn test_reports_are_idempotent() {
    let snapshot = load();
    let analytics = Analytics::new(&snapshot);
    let today = date("2024-02-15");

    assert_eq!(
        analytics.customer_report(CustomerId(1), today).unwrap(),
        analytics.customer_report(CustomerId(1), today).unwrap()
    );
    assert_eq!(analytics.dashboard(today), analytics.dashboard(today));
}

// =============================================================================
// Order Sheet
// =============================================================================

#[test]
fn test_order_sheet_for_latest_order() {
    let snapshot = load();
    let customer = snapshot
        .customers
        .iter()
        .find(|c| c.id == CustomerId(1))
        .unwrap()
        .clone();
    let latest: Vec<_> = snapshot
        .orders_for_customer(CustomerId(1))
        .into_iter()
        .filter(|o| o.id.0 == 3)
        .collect();
    let items = snapshot.items_for_orders(&latest);

    let sheet = OrderSheet::build(&customer, &snapshot.products, &items, date("2024-01-21"));
    assert_eq!(sheet.grand_total(), dec("81.00"));
    assert_eq!(sheet.file_name(), "Order-Epicerie Nord-2024-01-21.csv");

    let csv = sheet.to_csv().unwrap();
    assert!(csv.contains("MS-250,Maple syrup 250 mL,Amber,250,4.25,12,51.00"));
    assert!(csv.contains("MB-100,Maple butter,,,6.00,,"));
    assert!(csv.contains("Uncategorized,,,,,,"));
}

#[test]
fn test_json_and_csv_snapshots_agree() {
    let snapshot = load();
    let json = serde_json::to_string(&snapshot).unwrap();
    let reloaded = Snapshot::from_json_reader(json.as_bytes()).unwrap();
    assert_eq!(snapshot, reloaded);
}
