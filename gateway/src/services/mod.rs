//! Business logic services for the Warehouse Inventory Management gateway

pub mod dashboard;
pub mod documents;
pub mod export;
pub mod scoping;

pub use dashboard::DashboardService;
pub use documents::DeliveryNote;
pub use export::rows_to_csv;
pub use scoping::{scope_body, scope_query};
