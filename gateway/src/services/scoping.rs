//! Warehouse scoping for proxied requests.
//!
//! The backend trusts whatever `warehouse_id` it receives, so the gateway
//! rewrites outgoing queries and bodies before they leave: a caller that is
//! assigned to a warehouse only ever sees and writes that warehouse, while
//! an unassigned caller (central admin) keeps whatever filter they asked for.

use serde_json::Value;
use shared::WarehouseScope;

/// Applies the caller's warehouse scope to outgoing query parameters.
///
/// A bound caller always queries their own warehouse, whatever the request
/// asked for. A global caller's parameters pass through untouched, absent
/// ones included, which makes "no filter" mean "all warehouses" upstream.
pub fn scope_query(scope: &WarehouseScope, params: &mut Vec<(String, String)>) {
    if let Some(id) = scope.bound_warehouse() {
        params.retain(|(key, _)| key != "warehouse_id");
        params.push(("warehouse_id".to_string(), id.to_string()));
    }
}

/// Applies the caller's warehouse scope to an outgoing JSON body.
///
/// Mirrors [`scope_query`] for write payloads: a bound caller's warehouse
/// replaces whatever the client sent, a global caller's choice survives.
/// Non-object bodies are left alone and rejected upstream.
pub fn scope_body(scope: &WarehouseScope, body: &mut Value) {
    let Value::Object(map) = body else { return };
    let requested = map.get("warehouse_id").and_then(Value::as_i64);
    if let Some(id) = scope.effective(requested) {
        map.insert("warehouse_id".to_string(), Value::from(id));
    }
}
