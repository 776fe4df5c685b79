//! Wire request building
//!
//! Deterministic rendering of query descriptions and mutations into
//! [`HttpRequest`] values. Parameter order is fixed: filters in their
//! insertion order, then `order`, `limit`, `offset`, `select`.

use bridge_traits::http::{HttpMethod, HttpRequest};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::query::{Filter, FilterOp, Query, Resource};

/// Logical operation kinds, mapped onto HTTP methods at the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Method {
    pub fn http(&self) -> HttpMethod {
        match self {
            Method::Fetch => HttpMethod::Get,
            Method::Create => HttpMethod::Post,
            Method::Update => HttpMethod::Patch,
            Method::Delete => HttpMethod::Delete,
        }
    }
}

/// Identifies the record a mutation targets: an equality filter on an
/// identifying column, appended to the path's query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub column: String,
    pub value: Value,
}

impl Key {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Key on the conventional `id` column.
    pub fn id(value: impl Into<Value>) -> Self {
        Self::new("id", value)
    }

    fn as_filter(&self) -> Filter {
        Filter::new(self.column.clone(), FilterOp::Eq, self.value.clone())
    }
}

/// Render a query description into its ordered parameter pairs.
/// Values are rendered unencoded; percent-encoding happens in
/// [`build_url`].
pub(crate) fn query_pairs(query: &Query) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for filter in &query.filters {
        pairs.push((filter.column.clone(), filter.rendered()));
    }

    if let Some(order) = query.order_param() {
        pairs.push(("order".to_string(), order));
    }

    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }

    if query.offset > 0 {
        pairs.push(("offset".to_string(), query.offset.to_string()));
    }

    if let Some(select) = &query.select {
        pairs.push(("select".to_string(), select.clone()));
    }

    pairs
}

/// Assemble the final URL, percent-encoding parameter values.
pub(crate) fn build_url(base: &str, path: &str, pairs: &[(String, String)]) -> String {
    let mut url = format!("{}{}", base, path);
    for (i, (key, value)) in pairs.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

fn base_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest::new(method, url).header("Accept", "application/json")
}

fn with_json_body<T: Serialize>(request: HttpRequest, body: &T) -> Result<HttpRequest> {
    request
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

/// GET against a table or view, with the exact-count preference when
/// the query asks for it.
pub(crate) fn select_request(base: &str, query: &Query) -> HttpRequest {
    let pairs = query_pairs(query);
    let url = build_url(base, &query.resource.path(), &pairs);
    let mut request = base_request(Method::Fetch.http(), url);
    if query.exact_count {
        request = request.header("Prefer", "count=exact");
    }
    request
}

/// POST one record or a sequence of records. Bulk insert is the same
/// wire shape with an array body.
pub(crate) fn insert_request<T: Serialize>(base: &str, table: &str, records: &T) -> Result<HttpRequest> {
    let url = build_url(base, &Resource::table(table).path(), &[]);
    let request = base_request(Method::Create.http(), url)
        .header("Prefer", "return=representation");
    with_json_body(request, records)
}

/// PATCH the record selected by `key` with a partial record body.
pub(crate) fn update_request<T: Serialize>(
    base: &str,
    table: &str,
    key: &Key,
    patch: &T,
) -> Result<HttpRequest> {
    let pairs = vec![(key.column.clone(), key.as_filter().rendered())];
    let url = build_url(base, &Resource::table(table).path(), &pairs);
    let request = base_request(Method::Update.http(), url)
        .header("Prefer", "return=representation");
    with_json_body(request, patch)
}

/// DELETE the record selected by `key`. A 204 acknowledgment is
/// expected; no representation is requested.
pub(crate) fn delete_request(base: &str, table: &str, key: &Key) -> HttpRequest {
    let pairs = vec![(key.column.clone(), key.as_filter().rendered())];
    let url = build_url(base, &Resource::table(table).path(), &pairs);
    base_request(Method::Delete.http(), url)
}

/// POST to a procedure under the `/rpc` namespace. The argument record
/// is the whole body; no query parameters.
pub(crate) fn call_request<T: Serialize>(base: &str, procedure: &str, args: &T) -> Result<HttpRequest> {
    let url = build_url(base, &Resource::procedure(procedure).path(), &[]);
    let request = base_request(Method::Create.http(), url);
    with_json_body(request, args)
}
