//! # Transport Bridge Traits
//!
//! Transport abstraction between the catalog client core and whatever
//! actually moves bytes over the network.
//!
//! ## Overview
//!
//! This crate defines the contract the request translator depends on:
//! a wire-level request/response pair and an async [`HttpClient`] trait.
//! Production code injects the reqwest-backed implementation from
//! `bridge-reqwest`; tests inject a mock. The client core never
//! constructs a transport on its own; the transport is always passed
//! in explicitly, so there is no hidden process-wide state.
//!
//! ## Error Handling
//!
//! All transport failures surface as [`TransportError`](error::TransportError).
//! Implementations should:
//!
//! - Convert transport-specific errors to `TransportError`
//! - Distinguish connection failures from timeouts where possible
//! - Never retry internally: each call fails independently and the
//!   caller decides what to do next
//!
//! ## Thread Safety
//!
//! `HttpClient` requires `Send + Sync` so one client value can serve
//! many concurrent in-flight calls.

pub mod error;
pub mod http;

pub use error::TransportError;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
