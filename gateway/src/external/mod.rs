//! External API integrations

pub mod inventory_api;

pub use inventory_api::{InventoryApiClient, UpstreamReply};
