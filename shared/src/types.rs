//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Warehouse visibility derived from the authenticated user
///
/// A user bound to a warehouse only ever sees that warehouse, no matter
/// what a request asks for. A global user (central admin) sees whatever
/// the request asks for, including everything when no filter is given.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseScope {
    /// Restricted to a single warehouse
    Bound(i64),
    /// Unrestricted (central administrator)
    Global,
}

impl WarehouseScope {
    /// Derive the scope from a user's warehouse assignment
    pub fn from_assignment(warehouse_id: Option<i64>) -> Self {
        match warehouse_id {
            Some(id) => WarehouseScope::Bound(id),
            None => WarehouseScope::Global,
        }
    }

    /// Resolve the warehouse filter that actually applies to a request
    ///
    /// A bound scope overrides whatever the caller requested. A global
    /// scope passes the caller's request through untouched.
    pub fn effective(&self, requested: Option<i64>) -> Option<i64> {
        match self {
            WarehouseScope::Bound(id) => Some(*id),
            WarehouseScope::Global => requested,
        }
    }

    /// Whether this scope may see every warehouse
    pub fn is_global(&self) -> bool {
        matches!(self, WarehouseScope::Global)
    }

    /// The warehouse this scope is pinned to, if any
    pub fn bound_warehouse(&self) -> Option<i64> {
        match self {
            WarehouseScope::Bound(id) => Some(*id),
            WarehouseScope::Global => None,
        }
    }
}

/// Response envelope used by the inventory backend
///
/// The backend wraps most payloads as `{"data": ...}` but returns a few
/// bare. Decoding accepts either shape so handlers never care.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload regardless of which shape the backend used
    pub fn into_inner(self) -> T {
        match self {
            ApiEnvelope::Wrapped { data } => data,
            ApiEnvelope::Bare(inner) => inner,
        }
    }
}
