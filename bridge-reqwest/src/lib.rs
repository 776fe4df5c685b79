//! # Reqwest Transport
//!
//! Production [`HttpClient`](bridge_traits::HttpClient) implementation
//! backed by `reqwest`.
//!
//! ## Overview
//!
//! This crate provides:
//! - Connection pooling via reqwest
//! - TLS support by default (rustls)
//! - A transport-owned request timeout
//!
//! It deliberately does NOT retry. The catalog client reports every
//! failure to its caller exactly once; retry policy belongs to whoever
//! drives the client, not the transport.

pub mod http;

pub use http::ReqwestHttpClient;
