//! HTTP handlers for the Warehouse Inventory Management gateway

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod logs;
pub mod products;
pub mod reports;
pub mod scan;
pub mod stock_in;
pub mod stock_out;
pub mod units;
pub mod users;
pub mod warehouses;

pub use auth::{login, logout};
pub use dashboard::get_dashboard;
pub use health::health_check;
pub use logs::list_logs;
pub use products::{create_product, delete_product, get_product, list_products, update_product};
pub use reports::{
    export_stock_in_units, export_stock_out_units, get_sales_report, get_stock_balance_report,
    get_stock_in_report, get_stock_out_report,
};
pub use scan::scan_qr;
pub use stock_in::{create_stock_in, get_stock_in, list_stock_in, print_delivery_note};
pub use stock_out::{create_stock_out_from_units, list_stock_out};
pub use units::list_product_units;
pub use users::{create_user, delete_user, get_current_user, get_user, list_users, update_user};
pub use warehouses::{
    create_warehouse, delete_warehouse, get_warehouse, list_warehouses, update_warehouse,
};
