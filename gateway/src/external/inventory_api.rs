//! Inventory backend API client
//!
//! All proxied traffic goes through here: bearer auth taken from the
//! session cookie, JSON bodies both ways, and uniform decoding of the
//! backend's replies. The gateway never retries; one request in, one
//! upstream call out.

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::{header::ACCEPT, Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use shared::{ApiEnvelope, SessionIdentity};

use crate::error::{AppError, AppResult};

/// Client for the inventory backend API
#[derive(Clone)]
pub struct InventoryApiClient {
    client: Client,
    base_url: String,
}

/// Decoded upstream response: the backend's status plus parsed JSON body
///
/// A body that is not JSON decodes to `Null`, mirroring how the rest of
/// the proxying treats garbage replies.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The backend's own error message, if it sent one
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Laravel-style `errors` map, if present
    pub fn errors(&self) -> Option<Value> {
        self.body.get("errors").cloned()
    }

    /// Turn a failed reply into the relayed upstream error
    pub fn into_error(self, fallback: &str) -> AppError {
        let message = self.message().unwrap_or(fallback).to_string();
        let errors = self.errors();
        AppError::Upstream {
            status: self.status,
            message,
            errors,
        }
    }

    /// Success passes through; failure becomes the relayed error
    pub fn ok_or_upstream(self, fallback: &str) -> AppResult<UpstreamReply> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_error(fallback))
        }
    }
}

impl InventoryApiClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a prepared request and decode whatever comes back
    ///
    /// `context` names the operation for transport-error messages, e.g.
    /// "fetching products".
    async fn send(&self, builder: RequestBuilder, context: &str) -> AppResult<UpstreamReply> {
        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, context))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok(UpstreamReply { status, body })
    }

    /// GET with query parameters
    pub async fn get(
        &self,
        path: &str,
        token: &str,
        query: &[(String, String)],
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let mut builder = self.request(Method::GET, path, Some(token));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send(builder, context).await
    }

    /// GET bounded by a timeout; timing out is reported distinctly
    pub async fn get_with_timeout(
        &self,
        path: &str,
        token: &str,
        timeout: Duration,
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let builder = self.request(Method::GET, path, Some(token)).timeout(timeout);
        self.send(builder, context).await
    }

    /// POST a JSON body
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let builder = self.request(Method::POST, path, Some(token)).json(body);
        self.send(builder, context).await
    }

    /// POST without credentials; only the login call uses this
    pub async fn post_public<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let builder = self.request(Method::POST, path, None).json(body);
        self.send(builder, context).await
    }

    /// PUT a JSON body, bounded by a timeout
    pub async fn put_with_timeout<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
        timeout: Duration,
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let builder = self
            .request(Method::PUT, path, Some(token))
            .timeout(timeout)
            .json(body);
        self.send(builder, context).await
    }

    /// PUT a JSON body
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let builder = self.request(Method::PUT, path, Some(token)).json(body);
        self.send(builder, context).await
    }

    /// DELETE, bounded by a timeout
    pub async fn delete_with_timeout(
        &self,
        path: &str,
        token: &str,
        timeout: Duration,
        context: &str,
    ) -> AppResult<UpstreamReply> {
        let builder = self
            .request(Method::DELETE, path, Some(token))
            .timeout(timeout);
        self.send(builder, context).await
    }

    /// DELETE
    pub async fn delete(&self, path: &str, token: &str, context: &str) -> AppResult<UpstreamReply> {
        let builder = self.request(Method::DELETE, path, Some(token));
        self.send(builder, context).await
    }

    /// Resolve the session token into the authenticated user via `/me`
    ///
    /// Any failure here, transport included, means the caller cannot be
    /// identified and must not have anything forwarded on their behalf.
    pub async fn fetch_identity(&self, token: &str) -> AppResult<SessionIdentity> {
        let reply = self
            .get("/me", token, &[], "fetching the current user")
            .await
            .map_err(|e| {
                tracing::warn!("Identity lookup failed: {}", e);
                AppError::IdentityUnresolved
            })?;

        if !reply.is_success() {
            tracing::warn!("Identity lookup rejected: {}", reply.status);
            return Err(AppError::IdentityUnresolved);
        }

        let envelope: ApiEnvelope<SessionIdentity> =
            serde_json::from_value(reply.body).map_err(|e| {
                tracing::warn!("Identity payload did not decode: {}", e);
                AppError::IdentityUnresolved
            })?;

        Ok(envelope.into_inner())
    }
}

fn transport_error(err: reqwest::Error, context: &str) -> AppError {
    if err.is_timeout() {
        AppError::UpstreamTimeout(format!("Request timed out when {}", context))
    } else {
        tracing::error!("Transport failure when {}: {}", context, err);
        AppError::Transport(format!("Unexpected error when {}", context))
    }
}
