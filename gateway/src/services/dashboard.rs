//! Dashboard aggregation.
//!
//! The dashboard is built from the first page of four backend reports,
//! fetched concurrently with the caller's token and warehouse scope. A
//! section that fails or comes back in an unexpected shape degrades to its
//! empty value instead of failing the whole dashboard.
//!
//! Monetary fields arrive as decimal strings and are summed exactly before
//! being emitted as JSON numbers.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::WarehouseScope;

use crate::external::InventoryApiClient;
use crate::services::scoping::scope_query;

/// Sales report section as the backend returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesReport {
    #[serde(default)]
    pub summary: SalesSummary,
    #[serde(default)]
    pub data: Vec<SalesRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalesSummary {
    #[serde(default)]
    pub total_revenue: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesRow {
    #[serde(default)]
    pub date_out: Option<String>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockInReport {
    #[serde(default)]
    pub summary: StockInSummary,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockInSummary {
    #[serde(default)]
    pub total_units_in_page: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockOutReport {
    #[serde(default)]
    pub summary: StockOutSummary,
    #[serde(default)]
    pub data: Vec<StockOutTransaction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockOutSummary {
    #[serde(default)]
    pub total_units_out_page: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockOutTransaction {
    #[serde(default)]
    pub items: Vec<StockOutItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockOutItem {
    #[serde(default)]
    pub qty: Option<i64>,
    #[serde(default)]
    pub product: Option<ItemProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemProduct {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockBalanceReport {
    #[serde(default)]
    pub summary: StockBalanceSummary,
    #[serde(default)]
    pub data: Vec<StockBalanceRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockBalanceSummary {
    #[serde(default)]
    pub total_qty: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockBalanceRow {
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_units_in: f64,
    pub total_units_out: f64,
    pub total_stock_qty: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductQty {
    pub product_name: String,
    pub qty: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WarehouseQty {
    pub warehouse: String,
    pub qty: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopProduct {
    pub product_id: i64,
    pub product_name: String,
    pub qty: i64,
}

/// Aggregated dashboard payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub revenue_trend: Vec<RevenuePoint>,
    pub stock_by_product: Vec<ProductQty>,
    pub stock_out_by_product: Vec<ProductQty>,
    pub stock_by_warehouse: Vec<WarehouseQty>,
    pub top_products: Vec<TopProduct>,
    pub top_stock_out_products: Vec<ProductQty>,
}

/// Fetches the report sections and folds them into a dashboard.
#[derive(Clone)]
pub struct DashboardService {
    client: InventoryApiClient,
}

impl DashboardService {
    pub fn new(client: InventoryApiClient) -> Self {
        Self { client }
    }

    /// Builds the dashboard for one caller.
    ///
    /// All four report fetches run concurrently and carry the caller's
    /// warehouse scope, so a warehouse-bound user only ever aggregates
    /// their own warehouse.
    pub async fn build(&self, token: &str, scope: &WarehouseScope) -> DashboardResponse {
        let (sales, stock_in, stock_out, stock_balance) = tokio::join!(
            self.fetch_section::<SalesReport>("/reports/sales", token, scope, "fetching sales report"),
            self.fetch_section::<StockInReport>(
                "/reports/stock-in",
                token,
                scope,
                "fetching stock-in report"
            ),
            self.fetch_section::<StockOutReport>(
                "/reports/stock-out",
                token,
                scope,
                "fetching stock-out report"
            ),
            self.fetch_section::<StockBalanceReport>(
                "/reports/stock-balance",
                token,
                scope,
                "fetching stock-balance report"
            ),
        );

        assemble(sales, stock_in, stock_out, stock_balance)
    }

    async fn fetch_section<T>(
        &self,
        path: &str,
        token: &str,
        scope: &WarehouseScope,
        context: &str,
    ) -> T
    where
        T: DeserializeOwned + Default,
    {
        let mut params = vec![
            ("page".to_string(), "1".to_string()),
            ("per_page".to_string(), "20".to_string()),
        ];
        scope_query(scope, &mut params);

        match self.client.get(path, token, &params, context).await {
            Ok(reply) if reply.is_success() => match serde_json::from_value(reply.body) {
                Ok(section) => section,
                Err(err) => {
                    tracing::warn!("Dashboard section {context} had an unexpected shape: {err}");
                    T::default()
                }
            },
            Ok(reply) => {
                tracing::warn!(
                    "Dashboard section {context} failed with status {}",
                    reply.status
                );
                T::default()
            }
            Err(err) => {
                tracing::warn!("Dashboard section {context} is unavailable: {err}");
                T::default()
            }
        }
    }
}

/// Folds the four report sections into the dashboard payload.
pub fn assemble(
    sales: SalesReport,
    stock_in: StockInReport,
    stock_out: StockOutReport,
    stock_balance: StockBalanceReport,
) -> DashboardResponse {
    let summary = DashboardSummary {
        total_revenue: to_f64(sales.summary.total_revenue),
        total_units_in: to_f64(stock_in.summary.total_units_in_page),
        total_units_out: to_f64(stock_out.summary.total_units_out_page),
        total_stock_qty: stock_balance.summary.total_qty.unwrap_or(0),
    };

    let stock_out_rows = stock_out_by_product(&stock_out.data);

    DashboardResponse {
        summary,
        revenue_trend: revenue_trend(&sales.data),
        stock_by_product: stock_by_product(&stock_balance.data),
        stock_out_by_product: stock_out_rows.clone(),
        stock_by_warehouse: stock_by_warehouse(&stock_balance.data),
        top_products: top_products(&stock_balance.data),
        top_stock_out_products: top_five(stock_out_rows),
    }
}

/// Sums sale totals per calendar day, oldest day first.
///
/// `date_out` may carry a time component; only the first ten characters
/// identify the day. Rows without a date are skipped.
pub fn revenue_trend(rows: &[SalesRow]) -> Vec<RevenuePoint> {
    let mut by_date: BTreeMap<String, Decimal> = BTreeMap::new();

    for row in rows {
        let Some(date_out) = row.date_out.as_deref() else {
            continue;
        };
        let day = date_out.get(..10).unwrap_or(date_out);
        if day.is_empty() {
            continue;
        }
        let amount = row.total_price.unwrap_or_default();
        *by_date.entry(day.to_string()).or_default() += amount;
    }

    by_date
        .into_iter()
        .map(|(date, revenue)| RevenuePoint {
            date,
            revenue: revenue.to_f64().unwrap_or(0.0),
        })
        .collect()
}

/// Sums on-hand quantity per product name.
pub fn stock_by_product(rows: &[StockBalanceRow]) -> Vec<ProductQty> {
    let mut by_name: BTreeMap<String, i64> = BTreeMap::new();

    for row in rows {
        let name = product_name_or_unknown(row.product_name.as_deref());
        *by_name.entry(name).or_default() += row.qty.unwrap_or(0);
    }

    by_name
        .into_iter()
        .map(|(product_name, qty)| ProductQty { product_name, qty })
        .collect()
}

/// Sums on-hand quantity per warehouse name.
pub fn stock_by_warehouse(rows: &[StockBalanceRow]) -> Vec<WarehouseQty> {
    let mut by_warehouse: BTreeMap<String, i64> = BTreeMap::new();

    for row in rows {
        let warehouse = match row.warehouse_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "No Warehouse".to_string(),
        };
        *by_warehouse.entry(warehouse).or_default() += row.qty.unwrap_or(0);
    }

    by_warehouse
        .into_iter()
        .map(|(warehouse, qty)| WarehouseQty { warehouse, qty })
        .collect()
}

/// The five products with the most stock on hand.
///
/// Rows are merged per product id; the first row seen for a product names
/// it. Ties keep ascending product id order.
pub fn top_products(rows: &[StockBalanceRow]) -> Vec<TopProduct> {
    let mut by_id: BTreeMap<i64, TopProduct> = BTreeMap::new();

    for row in rows {
        let product_id = row.product_id.unwrap_or(0);
        let qty = row.qty.unwrap_or(0);
        by_id
            .entry(product_id)
            .and_modify(|entry| entry.qty += qty)
            .or_insert_with(|| TopProduct {
                product_id,
                product_name: product_name_or_unknown(row.product_name.as_deref()),
                qty,
            });
    }

    let mut products: Vec<TopProduct> = by_id.into_values().collect();
    products.sort_by(|a, b| b.qty.cmp(&a.qty));
    products.truncate(5);
    products
}

/// Sums outgoing quantity per product name across transaction lines.
pub fn stock_out_by_product(transactions: &[StockOutTransaction]) -> Vec<ProductQty> {
    let mut by_name: BTreeMap<String, i64> = BTreeMap::new();

    for transaction in transactions {
        for item in &transaction.items {
            let name = product_name_or_unknown(
                item.product.as_ref().and_then(|p| p.name.as_deref()),
            );
            *by_name.entry(name).or_default() += item.qty.unwrap_or(0);
        }
    }

    by_name
        .into_iter()
        .map(|(product_name, qty)| ProductQty { product_name, qty })
        .collect()
}

/// The five largest entries by quantity; ties keep their incoming order.
pub fn top_five(mut entries: Vec<ProductQty>) -> Vec<ProductQty> {
    entries.sort_by(|a, b| b.qty.cmp(&a.qty));
    entries.truncate(5);
    entries
}

fn product_name_or_unknown(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Unknown Product".to_string(),
    }
}

fn to_f64(value: Option<Decimal>) -> f64 {
    value.and_then(|d| d.to_f64()).unwrap_or(0.0)
}
