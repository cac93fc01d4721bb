//! Session identity models

use serde::{Deserialize, Serialize};

use crate::types::WarehouseScope;

/// The authenticated user as reported by the inventory backend
///
/// Resolved fresh on every request that needs it; never cached across
/// requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Warehouse the user is pinned to; `None` marks a central admin
    #[serde(default)]
    pub warehouse_id: Option<i64>,
}

impl SessionIdentity {
    /// Warehouse visibility for this user
    pub fn scope(&self) -> WarehouseScope {
        WarehouseScope::from_assignment(self.warehouse_id)
    }
}

/// Credentials posted to the login endpoint
///
/// Forwarded to the backend as-is; the backend decides whether they are
/// any good.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
