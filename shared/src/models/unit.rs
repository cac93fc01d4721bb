//! Product unit and scan models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a physical unit
///
/// The backend owns the status vocabulary; anything it adds beyond the
/// known values decodes into `Other` instead of failing the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    InStock,
    OutOfStock,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitStatus::InStock => write!(f, "IN_STOCK"),
            UnitStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
            UnitStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Product details captured alongside a scanned unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: i64,
    pub sku: String,
    pub name: String,
    /// Selling price at scan time; the backend may omit it for legacy rows
    #[serde(default)]
    pub default_sell_price: Decimal,
}

/// One physically trackable inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUnit {
    pub id: i64,
    #[serde(default)]
    pub unit_code: Option<String>,
    #[serde(default)]
    pub qr_value: Option<String>,
    pub status: UnitStatus,
    pub warehouse_id: i64,
    pub product: ProductSnapshot,
}

impl ProductUnit {
    /// The code shown for this unit, falling back to the scanned input
    pub fn display_code(&self, scanned: &str) -> String {
        self.unit_code
            .clone()
            .or_else(|| self.qr_value.clone())
            .unwrap_or_else(|| scanned.to_string())
    }
}

/// Successful scan response from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub unit: ProductUnit,
}
