//! WebAssembly module for the Warehouse Inventory Management frontend
//!
//! Provides client-side state for:
//! - The unit scan and batch checkout flow
//! - Buyer form handling and pre-submission checks
//! - Checkout persistence across page reloads
//!
//! Every function takes and returns the checkout flow as a JSON string,
//! so the browser keeps a single serialized flow and threads it through
//! each call.

use validator::Validate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Browser storage key for the in-progress checkout
const STORAGE_KEY: &str = "wim_checkout";

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_flow(flow_json: &str) -> Result<CheckoutFlow, JsValue> {
    serde_json::from_str(flow_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid checkout JSON: {}", e)))
}

fn flow_to_json(flow: &CheckoutFlow) -> Result<String, JsValue> {
    serde_json::to_string(flow)
        .map_err(|e| JsValue::from_str(&format!("Checkout serialization failed: {}", e)))
}

/// Start a fresh, empty checkout flow
#[wasm_bindgen]
pub fn checkout_new() -> String {
    serde_json::to_string(&CheckoutFlow::new()).unwrap_or_else(|_| String::from("{}"))
}

/// Trim a scanned QR payload, rejecting blank input before any network call
#[wasm_bindgen]
pub fn normalize_scan_input(code: &str) -> Result<String, JsValue> {
    normalize_scan_code(code).ok_or_else(|| JsValue::from_str("QR code must not be empty"))
}

/// Fold a resolved scan into the cart
///
/// `scan_json` is the gateway's scan response. Duplicate and
/// cross-warehouse units are rejected with the cart untouched.
#[wasm_bindgen]
pub fn checkout_record_scan(
    flow_json: &str,
    scan_json: &str,
    scanned_code: &str,
) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    let scan: ScanResponse = serde_json::from_str(scan_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid scan response JSON: {}", e)))?;

    let line = CartLine::from_unit(&scan.unit, scanned_code);
    flow.record_scan(line)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    flow_to_json(&flow)
}

/// Replace the buyer form fields
#[wasm_bindgen]
pub fn checkout_set_buyer(flow_json: &str, buyer_json: &str) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    let buyer: BuyerForm = serde_json::from_str(buyer_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid buyer JSON: {}", e)))?;
    flow.set_buyer(buyer)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    flow_to_json(&flow)
}

/// Drop one scanned unit from the cart
#[wasm_bindgen]
pub fn checkout_remove_unit(flow_json: &str, unit_id: i64) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    flow.remove_unit(unit_id);
    flow_to_json(&flow)
}

/// Check preconditions, lock the cart, and build the stock-out request
///
/// Returns `{"flow": ..., "request": ...}`; the caller posts the request
/// to the gateway and then reports back with `checkout_complete` or
/// `checkout_fail`.
#[wasm_bindgen]
pub fn checkout_begin_submit(flow_json: &str, date_out: &str) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    let date = parse_date_out(date_out).map_err(JsValue::from_str)?;
    let request = flow
        .begin_submit(date)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    request
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let payload = serde_json::json!({
        "flow": flow,
        "request": request,
    });
    Ok(payload.to_string())
}

/// Record that the backend accepted the submission; resets the checkout
#[wasm_bindgen]
pub fn checkout_complete(flow_json: &str) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    flow.complete();
    flow_to_json(&flow)
}

/// Record that the backend rejected the submission; cart and form survive
#[wasm_bindgen]
pub fn checkout_fail(flow_json: &str) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    flow.fail();
    flow_to_json(&flow)
}

/// Throw away the current cart and buyer form
#[wasm_bindgen]
pub fn checkout_discard(flow_json: &str) -> Result<String, JsValue> {
    let mut flow = parse_flow(flow_json)?;
    flow.discard();
    flow_to_json(&flow)
}

/// Number of units currently in the cart
#[wasm_bindgen]
pub fn checkout_unit_count(flow_json: &str) -> Result<u32, JsValue> {
    let flow = parse_flow(flow_json)?;
    Ok(flow.cart().unit_count() as u32)
}

/// Cart total from the per-line price snapshots, as a display float
#[wasm_bindgen]
pub fn checkout_total(flow_json: &str) -> Result<f64, JsValue> {
    let flow = parse_flow(flow_json)?;
    let total = flow.cart().total();
    Ok(total.to_string().parse().unwrap_or(0.0))
}

/// Current lifecycle phase as a lowercase string
#[wasm_bindgen]
pub fn checkout_phase(flow_json: &str) -> Result<String, JsValue> {
    let flow = parse_flow(flow_json)?;
    let phase = match flow.phase() {
        CheckoutPhase::Empty => "empty",
        CheckoutPhase::Accumulating => "accumulating",
        CheckoutPhase::Submitting => "submitting",
        CheckoutPhase::Committed => "committed",
        CheckoutPhase::Failed => "failed",
    };
    Ok(phase.to_string())
}

fn local_storage() -> Result<web_sys::Storage, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    window
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("Local storage is unavailable"))
}

/// Persist the flow for the next page load; only a parseable flow is stored
#[wasm_bindgen]
pub fn save_checkout(flow_json: &str) -> Result<(), JsValue> {
    parse_flow(flow_json)?;
    local_storage()?.set_item(STORAGE_KEY, flow_json)
}

/// Restore the last saved flow, or start fresh if nothing usable is stored
#[wasm_bindgen]
pub fn load_checkout() -> Result<String, JsValue> {
    match local_storage()?.get_item(STORAGE_KEY)? {
        Some(saved) if serde_json::from_str::<CheckoutFlow>(&saved).is_ok() => Ok(saved),
        _ => Ok(checkout_new()),
    }
}

/// Forget any saved flow
#[wasm_bindgen]
pub fn clear_saved_checkout() -> Result<(), JsValue> {
    local_storage()?.remove_item(STORAGE_KEY)
}
