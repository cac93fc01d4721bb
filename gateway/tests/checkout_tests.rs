//! Unit scan and batch checkout flow tests
//!
//! Covers the client-side checkout lifecycle that the gateway's
//! stock-out endpoint receives the result of:
//! - Scan deduplication and warehouse homogeneity in the cart
//! - Price snapshots taken at scan time
//! - Submission preconditions and the built stock-out request
//! - Failure keeping the cart, success resetting it

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{
    BuyerForm, CartError, CartLine, CheckoutError, CheckoutFlow, CheckoutPhase, ScanResponse,
    StockOutRequest,
};
use validator::Validate;

// ============================================================================
// Helpers
// ============================================================================

fn line(unit_id: i64, warehouse_id: i64, price: &str) -> CartLine {
    CartLine {
        unit_id,
        unit_code: format!("U-{unit_id:04}"),
        product_id: 7,
        sku: "SKU-7".to_string(),
        name: "Packing Tape".to_string(),
        price: price.parse().unwrap(),
        warehouse_id,
    }
}

fn buyer(name: &str, phone: &str, reference: &str) -> BuyerForm {
    BuyerForm {
        name: name.to_string(),
        phone: phone.to_string(),
        address: String::new(),
        reference: reference.to_string(),
        note: String::new(),
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Flow with `n` units scanned into warehouse 3 and a complete buyer form
fn ready_flow(n: i64) -> CheckoutFlow {
    let mut flow = CheckoutFlow::new();
    for unit_id in 1..=n {
        flow.record_scan(line(unit_id, 3, "1000")).unwrap();
    }
    flow.set_buyer(buyer("Budi", "0811", "INV-1")).unwrap();
    flow
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn unit_ids_strategy() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::btree_set(1i64..=10_000, 1..12)
        .prop_map(|set| set.into_iter().collect())
}

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1u64..=5_000_000, 0u32..=2).prop_map(|(units, scale)| Decimal::new(units as i64, scale))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Scanning distinct units accumulates one line each, and the cart
    /// total is the sum of the per-line snapshots.
    #[test]
    fn prop_distinct_scans_accumulate(
        unit_ids in unit_ids_strategy(),
        price in price_strategy(),
    ) {
        let mut flow = CheckoutFlow::new();
        for &unit_id in &unit_ids {
            let mut scanned = line(unit_id, 3, "0");
            scanned.price = price;
            flow.record_scan(scanned).unwrap();
        }

        prop_assert_eq!(flow.cart().unit_count(), unit_ids.len());
        prop_assert_eq!(flow.phase(), CheckoutPhase::Accumulating);
        prop_assert_eq!(
            flow.cart().total(),
            price * Decimal::from(unit_ids.len() as i64)
        );
    }

    /// Re-scanning an already carted unit never grows the cart, however
    /// many times it happens.
    #[test]
    fn prop_rescans_never_duplicate(
        unit_id in 1i64..=10_000,
        attempts in 1usize..6,
    ) {
        let mut flow = CheckoutFlow::new();
        flow.record_scan(line(unit_id, 3, "1000")).unwrap();

        for _ in 0..attempts {
            let err = flow.record_scan(line(unit_id, 3, "1000")).unwrap_err();
            prop_assert_eq!(err, CartError::DuplicateUnit { unit_id });
        }

        prop_assert_eq!(flow.cart().unit_count(), 1);
    }

    /// A serialized flow deserializes to the same flow, so persistence
    /// across page reloads cannot corrupt a checkout.
    #[test]
    fn prop_flow_survives_serde_round_trip(
        unit_ids in unit_ids_strategy(),
        name in "[A-Za-z ]{1,20}",
    ) {
        let mut flow = CheckoutFlow::new();
        for &unit_id in &unit_ids {
            flow.record_scan(line(unit_id, 3, "250.50")).unwrap();
        }
        flow.set_buyer(buyer(&name, "0811", "INV-1")).unwrap();

        let json = serde_json::to_string(&flow).unwrap();
        let restored: CheckoutFlow = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, flow);
    }
}

// ============================================================================
// Cart Accumulation Tests
// ============================================================================

mod cart_tests {
    use super::*;

    #[test]
    fn test_first_scan_moves_flow_out_of_empty() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.phase(), CheckoutPhase::Empty);

        flow.record_scan(line(41, 3, "1500")).unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Accumulating);
        assert_eq!(flow.cart().warehouse_id(), Some(3));
    }

    #[test]
    fn test_duplicate_scan_leaves_single_line() {
        let mut flow = CheckoutFlow::new();
        flow.record_scan(line(41, 3, "1500")).unwrap();

        let err = flow.record_scan(line(41, 3, "1500")).unwrap_err();
        assert_eq!(err, CartError::DuplicateUnit { unit_id: 41 });
        assert_eq!(flow.cart().unit_count(), 1);
    }

    #[test]
    fn test_cross_warehouse_scan_is_rejected() {
        let mut flow = CheckoutFlow::new();
        flow.record_scan(line(41, 3, "1500")).unwrap();

        let err = flow.record_scan(line(42, 9, "1500")).unwrap_err();
        assert_eq!(
            err,
            CartError::WarehouseMismatch {
                cart_warehouse: 3,
                unit_warehouse: 9,
            }
        );
        assert_eq!(flow.cart().unit_ids(), vec![41]);
    }

    #[test]
    fn test_price_snapshot_comes_from_scan_response() {
        // The gateway's scan reply carries the price that gets frozen
        let scan: ScanResponse = serde_json::from_str(
            r#"{
                "message": "Unit found",
                "unit": {
                    "id": 41,
                    "unit_code": "U-0041",
                    "status": "IN_STOCK",
                    "warehouse_id": 3,
                    "product": {
                        "id": 7,
                        "sku": "SKU-7",
                        "name": "Packing Tape",
                        "default_sell_price": "1000"
                    }
                }
            }"#,
        )
        .unwrap();

        let carted = CartLine::from_unit(&scan.unit, "QR-41");
        assert_eq!(carted.price, Decimal::from(1000));
        assert_eq!(carted.unit_code, "U-0041");

        let mut flow = CheckoutFlow::new();
        flow.record_scan(carted).unwrap();
        assert_eq!(flow.cart().total(), Decimal::from(1000));
    }

    #[test]
    fn test_cart_total_sums_snapshots() {
        let mut flow = CheckoutFlow::new();
        flow.record_scan(line(41, 3, "1000")).unwrap();
        flow.record_scan(line(42, 3, "250.50")).unwrap();

        assert_eq!(flow.cart().total(), "1250.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_removing_last_unit_returns_to_empty() {
        let mut flow = CheckoutFlow::new();
        flow.record_scan(line(41, 3, "1000")).unwrap();

        assert!(flow.remove_unit(41));
        assert_eq!(flow.phase(), CheckoutPhase::Empty);
        assert!(!flow.remove_unit(41));
    }
}

// ============================================================================
// Submission Precondition Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_empty_cart_cannot_submit() {
        let mut flow = CheckoutFlow::new();
        flow.set_buyer(buyer("Budi", "0811", "INV-1")).unwrap();

        let err = flow.begin_submit(date("2025-06-01")).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_missing_buyer_fields_reported_in_order() {
        let mut flow = CheckoutFlow::new();
        flow.record_scan(line(41, 3, "1000")).unwrap();

        let err = flow.begin_submit(date("2025-06-01")).unwrap_err();
        assert_eq!(err, CheckoutError::MissingBuyerName);

        flow.set_buyer(buyer("Budi", "", "")).unwrap();
        let err = flow.begin_submit(date("2025-06-01")).unwrap_err();
        assert_eq!(err, CheckoutError::MissingBuyerPhone);

        flow.set_buyer(buyer("Budi", "0811", "")).unwrap();
        let err = flow.begin_submit(date("2025-06-01")).unwrap_err();
        assert_eq!(err, CheckoutError::MissingReference);
    }

    #[test]
    fn test_built_request_matches_cart() {
        let mut flow = ready_flow(2);

        let request = flow.begin_submit(date("2025-06-01")).unwrap();
        assert_eq!(request.warehouse_id, 3);
        assert_eq!(request.units, vec![1, 2]);
        assert_eq!(request.date_out, date("2025-06-01"));
        assert_eq!(request.reference, "INV-1");
        assert_eq!(request.buyer.name, "Budi");
        assert_eq!(request.buyer.phone.as_deref(), Some("0811"));
        // Blank optional fields are dropped rather than sent empty
        assert_eq!(request.buyer.address, None);
        assert_eq!(request.note, None);
        assert_eq!(flow.phase(), CheckoutPhase::Submitting);
    }

    #[test]
    fn test_submitting_flow_locks_cart_and_form() {
        let mut flow = ready_flow(1);
        flow.begin_submit(date("2025-06-01")).unwrap();

        assert_eq!(
            flow.record_scan(line(99, 3, "1000")).unwrap_err(),
            CartError::SubmissionInProgress
        );
        assert!(!flow.remove_unit(1));
        assert_eq!(
            flow.set_buyer(buyer("Siti", "0812", "INV-2")).unwrap_err(),
            CheckoutError::AlreadySubmitting
        );
        assert_eq!(
            flow.begin_submit(date("2025-06-01")).unwrap_err(),
            CheckoutError::AlreadySubmitting
        );
    }

    #[test]
    fn test_request_validation_rejects_empty_units() {
        let request = StockOutRequest {
            warehouse_id: 3,
            buyer: shared::models::Buyer {
                name: "Budi".to_string(),
                phone: None,
                address: None,
            },
            date_out: date("2025-06-01"),
            reference: "INV-1".to_string(),
            note: None,
            units: Vec::new(),
        };

        let errors = request.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let messages: Vec<String> = field_errors["units"]
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        assert_eq!(messages, vec!["Units array must not be empty".to_string()]);
    }
}

// ============================================================================
// Outcome Tests
// ============================================================================

mod outcome_tests {
    use super::*;

    #[test]
    fn test_committed_checkout_resets_cart_and_form() {
        let mut flow = ready_flow(2);
        flow.begin_submit(date("2025-06-01")).unwrap();

        flow.complete();
        assert_eq!(flow.phase(), CheckoutPhase::Committed);
        assert!(flow.cart().is_empty());
        assert_eq!(flow.buyer(), &BuyerForm::default());
    }

    #[test]
    fn test_failed_checkout_keeps_cart_and_form() {
        let mut flow = ready_flow(2);
        flow.begin_submit(date("2025-06-01")).unwrap();

        flow.fail();
        assert_eq!(flow.phase(), CheckoutPhase::Failed);
        assert_eq!(flow.cart().unit_count(), 2);
        assert_eq!(flow.buyer().name, "Budi");
    }

    #[test]
    fn test_failed_checkout_can_retry() {
        let mut flow = ready_flow(1);
        flow.begin_submit(date("2025-06-01")).unwrap();
        flow.fail();

        // Same cart, second attempt
        let retry = flow.begin_submit(date("2025-06-02")).unwrap();
        assert_eq!(retry.units, vec![1]);
        assert_eq!(flow.phase(), CheckoutPhase::Submitting);
    }

    #[test]
    fn test_committed_flow_requires_new_scans() {
        let mut flow = ready_flow(1);
        flow.begin_submit(date("2025-06-01")).unwrap();
        flow.complete();

        let err = flow.begin_submit(date("2025-06-02")).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_discard_throws_everything_away() {
        let mut flow = ready_flow(2);

        flow.discard();
        assert_eq!(flow.phase(), CheckoutPhase::Empty);
        assert!(flow.cart().is_empty());
        assert_eq!(flow.buyer(), &BuyerForm::default());
    }
}
