//! # REST Request Translator
//!
//! Translates structured query descriptions into PostgREST wire requests
//! and wire responses back into row sets.
//!
//! ## Overview
//!
//! The translator is a single linear pass per call: build a request,
//! hand it to the injected transport, parse whatever comes back. There
//! is no retry, no session state, and no coordination between in-flight
//! calls; each [`Query`]/request/response triple is locally scoped.
//!
//! - [`Query`] describes intent: target, filters, sort, pagination,
//!   select list, exact-count flag
//! - [`RestClient`] turns queries and mutations into transport calls
//! - [`QueryResult`] carries the normalized rows plus the optional
//!   server-computed total
//! - [`ApiError`] is the only failure channel
//!
//! ## Example
//!
//! ```ignore
//! use core_rest::{Query, RestClient, SortDirection};
//!
//! let client = RestClient::new(http, "http://localhost:3000");
//! let query = Query::table("books")
//!     .ilike("title", "dragon")
//!     .order("title", SortDirection::Ascending)
//!     .limit(10)
//!     .with_exact_count();
//! let result = client.select(&query).await?;
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod request;
pub mod response;

pub use client::RestClient;
pub use error::{ApiError, Result};
pub use query::{Filter, FilterOp, Query, Resource, SortDirection, SortTerm};
pub use request::{Key, Method};
pub use response::QueryResult;
