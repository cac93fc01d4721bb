//! Warehouse authorization scoping tests
//!
//! Covers the scope derived from the authenticated user and its
//! application to query strings and JSON bodies:
//! - A bound user is always pinned to their own warehouse
//! - A global user's filters pass through untouched
//! - Non-warehouse parameters survive scoping unchanged

use proptest::prelude::*;
use serde_json::json;
use shared::types::WarehouseScope;
use warehouse_inventory_gateway::services::{scope_body, scope_query};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn warehouse_id_strategy() -> impl Strategy<Value = i64> {
    1i64..=500
}

fn requested_warehouse_strategy() -> impl Strategy<Value = Option<i64>> {
    proptest::option::of(1i64..=500)
}

/// Query parameters a report page might send, warehouse filter excluded
fn other_params_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(
        (
            "[a-z_]{2,12}".prop_filter("reserved key", |k| k != "warehouse_id"),
            "[a-z0-9-]{0,10}",
        ),
        0..6,
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A bound scope resolves to its own warehouse no matter what the
    /// request asked for.
    #[test]
    fn prop_bound_scope_always_wins(
        own in warehouse_id_strategy(),
        requested in requested_warehouse_strategy(),
    ) {
        let scope = WarehouseScope::Bound(own);
        prop_assert_eq!(scope.effective(requested), Some(own));
    }

    /// A global scope echoes the request's filter exactly.
    #[test]
    fn prop_global_scope_passes_through(
        requested in requested_warehouse_strategy(),
    ) {
        let scope = WarehouseScope::Global;
        prop_assert_eq!(scope.effective(requested), requested);
    }

    /// Scoping a query for a bound user leaves exactly one warehouse
    /// filter, set to their warehouse, and keeps every other pair.
    #[test]
    fn prop_scoped_query_pins_single_warehouse_filter(
        own in warehouse_id_strategy(),
        requested in requested_warehouse_strategy(),
        others in other_params_strategy(),
    ) {
        let mut params = others.clone();
        if let Some(id) = requested {
            params.push(("warehouse_id".to_string(), id.to_string()));
        }

        scope_query(&WarehouseScope::Bound(own), &mut params);

        let filters: Vec<&str> = params
            .iter()
            .filter(|(k, _)| k == "warehouse_id")
            .map(|(_, v)| v.as_str())
            .collect();
        let own_str = own.to_string();
        prop_assert_eq!(filters, vec![own_str.as_str()]);

        let kept: Vec<(String, String)> = params
            .iter()
            .filter(|(k, _)| k != "warehouse_id")
            .cloned()
            .collect();
        prop_assert_eq!(kept, others);
    }

    /// Scoping a body for a bound user pins `warehouse_id` and touches
    /// nothing else.
    #[test]
    fn prop_scoped_body_pins_warehouse_field(
        own in warehouse_id_strategy(),
        requested in requested_warehouse_strategy(),
        note in "[a-zA-Z ]{0,20}",
    ) {
        let mut body = json!({ "note": note, "qty": 4 });
        if let Some(id) = requested {
            body["warehouse_id"] = json!(id);
        }

        scope_body(&WarehouseScope::Bound(own), &mut body);

        prop_assert_eq!(body["warehouse_id"].as_i64(), Some(own));
        prop_assert_eq!(body["note"].as_str(), Some(note.as_str()));
        prop_assert_eq!(body["qty"].as_i64(), Some(4));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

mod scope_derivation_tests {
    use super::*;

    #[test]
    fn test_assignment_maps_to_scope() {
        assert_eq!(
            WarehouseScope::from_assignment(Some(7)),
            WarehouseScope::Bound(7)
        );
        assert_eq!(WarehouseScope::from_assignment(None), WarehouseScope::Global);
    }

    #[test]
    fn test_bound_user_cannot_reach_another_warehouse() {
        // A warehouse 5 user asking for warehouse 9 still gets warehouse 5
        let scope = WarehouseScope::Bound(5);
        assert_eq!(scope.effective(Some(9)), Some(5));
        assert_eq!(scope.effective(None), Some(5));
    }

    #[test]
    fn test_global_user_keeps_their_filter() {
        let scope = WarehouseScope::Global;
        assert_eq!(scope.effective(Some(9)), Some(9));
        assert_eq!(scope.effective(None), None);
    }

    #[test]
    fn test_scope_accessors() {
        assert!(WarehouseScope::Global.is_global());
        assert!(!WarehouseScope::Bound(3).is_global());
        assert_eq!(WarehouseScope::Bound(3).bound_warehouse(), Some(3));
        assert_eq!(WarehouseScope::Global.bound_warehouse(), None);
    }
}

mod query_scoping_tests {
    use super::*;

    #[test]
    fn test_bound_scope_replaces_requested_filter() {
        let mut params = vec![
            ("page".to_string(), "2".to_string()),
            ("warehouse_id".to_string(), "9".to_string()),
        ];

        scope_query(&WarehouseScope::Bound(5), &mut params);

        assert_eq!(
            params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("warehouse_id".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_bound_scope_adds_missing_filter() {
        let mut params = vec![("per_page".to_string(), "20".to_string())];

        scope_query(&WarehouseScope::Bound(5), &mut params);

        assert!(params.contains(&("warehouse_id".to_string(), "5".to_string())));
    }

    #[test]
    fn test_global_scope_leaves_query_alone() {
        // Unparseable admin input is the backend's problem, not ours
        let original = vec![
            ("warehouse_id".to_string(), "abc".to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        let mut params = original.clone();

        scope_query(&WarehouseScope::Global, &mut params);

        assert_eq!(params, original);
    }

    #[test]
    fn test_global_scope_does_not_invent_filter() {
        let mut params: Vec<(String, String)> = Vec::new();
        scope_query(&WarehouseScope::Global, &mut params);
        assert!(params.is_empty());
    }
}

mod body_scoping_tests {
    use super::*;

    #[test]
    fn test_bound_scope_overrides_body_warehouse() {
        let mut body = json!({ "warehouse_id": 9, "reference": "SI-100" });

        scope_body(&WarehouseScope::Bound(5), &mut body);

        assert_eq!(body["warehouse_id"], 5);
        assert_eq!(body["reference"], "SI-100");
    }

    #[test]
    fn test_bound_scope_fills_absent_body_warehouse() {
        let mut body = json!({ "reference": "SI-100" });

        scope_body(&WarehouseScope::Bound(5), &mut body);

        assert_eq!(body["warehouse_id"], 5);
    }

    #[test]
    fn test_global_scope_keeps_requested_body_warehouse() {
        let mut body = json!({ "warehouse_id": 9 });

        scope_body(&WarehouseScope::Global, &mut body);

        assert_eq!(body["warehouse_id"], 9);
    }

    #[test]
    fn test_global_scope_leaves_unfiltered_body_alone() {
        let mut body = json!({ "reference": "SI-100" });

        scope_body(&WarehouseScope::Global, &mut body);

        assert!(body.get("warehouse_id").is_none());
    }

    #[test]
    fn test_non_object_body_is_untouched() {
        let mut body = json!([1, 2, 3]);

        scope_body(&WarehouseScope::Bound(5), &mut body);

        assert_eq!(body, json!([1, 2, 3]));
    }
}
