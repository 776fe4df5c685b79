//! Dependency-injected REST client
//!
//! [`RestClient`] owns nothing but a base URL and a handle to the
//! injected transport. Every operation is one build/transmit/parse
//! pass; concurrent calls share no mutable state.

use bridge_traits::http::{HttpClient, HttpRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::query::Query;
use crate::request::{self, Key};
use crate::response::{self, QueryResult};

/// Client for a PostgREST-style interface.
///
/// Construct one per backend and pass it (or clones of it) to callers;
/// there is deliberately no global instance.
#[derive(Clone)]
pub struct RestClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl RestClient {
    /// Create a client against `base_url`. A trailing slash on the base
    /// URL is tolerated and stripped.
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read rows from a table or view.
    #[instrument(skip(self), fields(resource = query.resource.name()))]
    pub async fn select(&self, query: &Query) -> Result<QueryResult> {
        let request = request::select_request(&self.base_url, query);
        self.dispatch(request, query.exact_count).await
    }

    /// Insert one record or a sequence of records. The inserted
    /// representation (including server-assigned fields) comes back as
    /// rows.
    #[instrument(skip(self, records))]
    pub async fn insert<T: Serialize>(&self, table: &str, records: &T) -> Result<QueryResult> {
        let request = request::insert_request(&self.base_url, table, records)?;
        self.dispatch(request, false).await
    }

    /// Apply a partial record to the row selected by `key`. The updated
    /// representation comes back as rows.
    #[instrument(skip(self, patch))]
    pub async fn update<T: Serialize>(&self, table: &str, key: &Key, patch: &T) -> Result<QueryResult> {
        let request = request::update_request(&self.base_url, table, key, patch)?;
        self.dispatch(request, false).await
    }

    /// Delete the row selected by `key`. Success is an empty result.
    #[instrument(skip(self))]
    pub async fn delete(&self, table: &str, key: &Key) -> Result<QueryResult> {
        let request = request::delete_request(&self.base_url, table, key);
        self.dispatch(request, false).await
    }

    /// Invoke a stored procedure with a single argument record.
    #[instrument(skip(self, args))]
    pub async fn call<T: Serialize>(&self, procedure: &str, args: &T) -> Result<QueryResult> {
        let request = request::call_request(&self.base_url, procedure, args)?;
        self.dispatch(request, false).await
    }

    async fn dispatch(&self, request: HttpRequest, want_total: bool) -> Result<QueryResult> {
        let url = request.url.clone();
        let response = self.http.execute(request).await?;
        debug!(url = %url, status = response.status, "API response");

        let mut result = response::parse_response(response)?;
        // The total is only meaningful when the caller asked for it.
        if !want_total {
            result.total = None;
        }
        Ok(result)
    }
}
