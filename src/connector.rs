//! The connector seam between capabilities and the network.
//!
//! Capabilities describe each remote operation as an [`ApiRequest`] and hand
//! it to whatever [`Connector`] their service was built with. The connector
//! owns authentication, transport and status mapping; capabilities only
//! decode what comes back.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, RemoteError, Result};

/// One logical remote call: verb, resource path, optional query and payload.
///
/// Paths are relative to the connector's base URL and must already be
/// percent-encoded (e.g. `repos/octo/hello/issues/7`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }

    /// DELETE carrying a JSON payload (GitHub uses this for assignee removal).
    pub fn delete_with_body(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::DELETE, path, Some(body))
    }

    /// Attach query parameters. An empty encoding leaves the query unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryEncoding`] if the parameters cannot be encoded.
    pub fn with_query<Q: Serialize>(mut self, query: &Q) -> Result<Self> {
        let encoded =
            serde_qs::to_string(query).map_err(|e| Error::QueryEncoding(e.to_string()))?;
        self.query = if encoded.is_empty() {
            None
        } else {
            Some(encoded)
        };
        Ok(self)
    }
}

/// Performs requests against the remote API.
///
/// Implementations return the decoded JSON body (`Value::Null` for empty
/// responses) or a [`RemoteError`] wrapped in [`Error::Remote`]. A connector
/// shared between services is responsible for its own thread safety.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Send a single request and return the response document.
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

#[async_trait]
impl<C: Connector + ?Sized> Connector for Arc<C> {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        (**self).send(request).await
    }
}

/// Send a request and decode the response into `T`.
pub(crate) async fn fetch<C, T>(connector: &C, request: ApiRequest) -> Result<T>
where
    C: Connector + ?Sized,
    T: DeserializeOwned,
{
    let value = connector.send(request).await?;
    serde_json::from_value(value).map_err(|e| Error::Remote(RemoteError::Decode(e)))
}

/// Serialize a request payload.
///
/// Failures here are local and surface as [`Error::Encode`], never as a
/// remote error.
pub(crate) fn encode_body<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(Error::Encode)
}

/// Send a request whose response body carries nothing of interest.
pub(crate) async fn execute<C>(connector: &C, request: ApiRequest) -> Result<()>
where
    C: Connector + ?Sized,
{
    connector.send(request).await.map(|_| ())
}
