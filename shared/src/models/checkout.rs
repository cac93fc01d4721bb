//! Batch checkout flow and stock-out request models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Cart, CartError, CartLine};

/// Where a checkout sits in its lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// Nothing scanned yet
    #[default]
    Empty,
    /// At least one unit in the cart, more scans welcome
    Accumulating,
    /// Request built and handed off; cart is locked
    Submitting,
    /// Backend accepted the transaction; cart and form were reset
    Committed,
    /// Backend rejected the submission; cart and form are intact
    Failed,
}

/// Why a checkout submission was blocked before any network call
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Buyer name is required")]
    MissingBuyerName,
    #[error("Buyer phone is required")]
    MissingBuyerPhone,
    #[error("Invoice reference is required")]
    MissingReference,
    #[error("A submission is already in flight")]
    AlreadySubmitting,
}

/// Buyer and invoice fields collected alongside the cart
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyerForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub reference: String,
    pub note: String,
}

impl BuyerForm {
    /// Check the required fields, reporting the first one missing
    pub fn validate_required(&self) -> Result<(), CheckoutError> {
        if self.name.trim().is_empty() {
            return Err(CheckoutError::MissingBuyerName);
        }
        if self.phone.trim().is_empty() {
            return Err(CheckoutError::MissingBuyerPhone);
        }
        if self.reference.trim().is_empty() {
            return Err(CheckoutError::MissingReference);
        }
        Ok(())
    }
}

/// Buyer block of the stock-out request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Buyer {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// The batch transaction posted to the backend
///
/// All consistency guarantees for the underlying inventory counts live
/// with the backend; this is the request shape only.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct StockOutRequest {
    pub warehouse_id: i64,
    pub buyer: Buyer,
    pub date_out: NaiveDate,
    pub reference: String,
    #[serde(default)]
    pub note: Option<String>,
    #[validate(length(min = 1, message = "Units array must not be empty"))]
    pub units: Vec<i64>,
}

fn blank_to_none(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// One checkout from first scan to committed transaction
///
/// Transitions: `Empty -> Accumulating -> Submitting -> Committed | Failed`.
/// A failed submission keeps the cart and form so the user can fix input
/// and retry; a committed one resets both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    cart: Cart,
    buyer: BuyerForm,
    #[serde(default)]
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn buyer(&self) -> &BuyerForm {
        &self.buyer
    }

    /// Update the buyer form; rejected while a submission is in flight
    pub fn set_buyer(&mut self, buyer: BuyerForm) -> Result<(), CheckoutError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::AlreadySubmitting);
        }
        self.buyer = buyer;
        Ok(())
    }

    /// Record a successfully resolved scan
    ///
    /// A duplicate or cross-warehouse unit is rejected without touching
    /// the cart; the flow stays where it was.
    pub fn record_scan(&mut self, line: CartLine) -> Result<(), CartError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CartError::SubmissionInProgress);
        }
        self.cart.add(line)?;
        self.phase = CheckoutPhase::Accumulating;
        Ok(())
    }

    /// Drop one scanned unit from the cart
    pub fn remove_unit(&mut self, unit_id: i64) -> bool {
        if self.phase == CheckoutPhase::Submitting {
            return false;
        }
        let removed = self.cart.remove(unit_id);
        if removed && self.cart.is_empty() {
            self.phase = CheckoutPhase::Empty;
        }
        removed
    }

    /// Check preconditions, lock the cart, and build the request
    ///
    /// The transaction's warehouse is the first cart line's warehouse;
    /// insertion already guarantees every line agrees with it.
    pub fn begin_submit(&mut self, date_out: NaiveDate) -> Result<StockOutRequest, CheckoutError> {
        match self.phase {
            CheckoutPhase::Submitting => return Err(CheckoutError::AlreadySubmitting),
            CheckoutPhase::Empty | CheckoutPhase::Committed => {
                return Err(CheckoutError::EmptyCart)
            }
            CheckoutPhase::Accumulating | CheckoutPhase::Failed => {}
        }
        let warehouse_id = self.cart.warehouse_id().ok_or(CheckoutError::EmptyCart)?;
        self.buyer.validate_required()?;

        let request = StockOutRequest {
            warehouse_id,
            buyer: Buyer {
                name: self.buyer.name.clone(),
                phone: blank_to_none(&self.buyer.phone),
                address: blank_to_none(&self.buyer.address),
            },
            date_out,
            reference: self.buyer.reference.clone(),
            note: blank_to_none(&self.buyer.note),
            units: self.cart.unit_ids(),
        };
        self.phase = CheckoutPhase::Submitting;
        Ok(request)
    }

    /// Backend accepted the transaction; reset for the next checkout
    pub fn complete(&mut self) {
        self.cart.clear();
        self.buyer = BuyerForm::default();
        self.phase = CheckoutPhase::Committed;
    }

    /// Backend rejected the submission; keep everything for a retry
    pub fn fail(&mut self) {
        self.phase = CheckoutPhase::Failed;
    }

    /// Throw away the cart and form entirely
    pub fn discard(&mut self) {
        self.cart.clear();
        self.buyer = BuyerForm::default();
        self.phase = CheckoutPhase::Empty;
    }
}
