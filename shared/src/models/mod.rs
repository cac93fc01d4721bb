//! Domain models for the Warehouse Inventory Management gateway

mod cart;
mod checkout;
mod identity;
mod unit;

pub use cart::*;
pub use checkout::*;
pub use identity::*;
pub use unit::*;
