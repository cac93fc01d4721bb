//! Shared types and models for the Warehouse Inventory Management gateway
//!
//! This crate contains types shared between the gateway, frontend (via WASM),
//! and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
