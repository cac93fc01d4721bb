//! Checkout cart models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductUnit;

/// One scanned unit waiting for checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub unit_id: i64,
    pub unit_code: String,
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    /// Price snapshot taken at scan time; never re-fetched at submission
    pub price: Decimal,
    pub warehouse_id: i64,
}

impl CartLine {
    /// Build a cart line from a resolved unit, keeping the scanned code
    /// as a fallback display code
    pub fn from_unit(unit: &ProductUnit, scanned_code: &str) -> Self {
        Self {
            unit_id: unit.id,
            unit_code: unit.display_code(scanned_code),
            product_id: unit.product.id,
            sku: unit.product.sku.clone(),
            name: unit.product.name.clone(),
            price: unit.product.default_sell_price,
            warehouse_id: unit.warehouse_id,
        }
    }
}

/// Why a scanned unit was not added to the cart
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("This unit is already in the cart")]
    DuplicateUnit { unit_id: i64 },
    #[error("Unit belongs to warehouse {unit_warehouse}, but the cart holds warehouse {cart_warehouse}")]
    WarehouseMismatch {
        cart_warehouse: i64,
        unit_warehouse: i64,
    },
    #[error("Cannot add units while a submission is in flight")]
    SubmissionInProgress,
}

/// The client-accumulated set of scanned units for one checkout
///
/// Ordered by scan sequence. Uniqueness over `unit_id` and warehouse
/// homogeneity are enforced on insertion, so a non-empty cart always maps
/// to exactly one warehouse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn unit_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the per-line price snapshots
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// The warehouse this cart belongs to (the first line's warehouse)
    pub fn warehouse_id(&self) -> Option<i64> {
        self.lines.first().map(|line| line.warehouse_id)
    }

    pub fn unit_ids(&self) -> Vec<i64> {
        self.lines.iter().map(|line| line.unit_id).collect()
    }

    pub fn contains_unit(&self, unit_id: i64) -> bool {
        self.lines.iter().any(|line| line.unit_id == unit_id)
    }

    /// Append a line, rejecting duplicates and cross-warehouse units
    ///
    /// A rejected line leaves the cart unchanged.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        if self.contains_unit(line.unit_id) {
            return Err(CartError::DuplicateUnit {
                unit_id: line.unit_id,
            });
        }
        if let Some(cart_warehouse) = self.warehouse_id() {
            if cart_warehouse != line.warehouse_id {
                return Err(CartError::WarehouseMismatch {
                    cart_warehouse,
                    unit_warehouse: line.warehouse_id,
                });
            }
        }
        self.lines.push(line);
        Ok(())
    }

    /// Drop one line by unit id; returns whether anything was removed
    pub fn remove(&mut self, unit_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.unit_id != unit_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
