//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the catalog client:
//! - Logging and tracing bootstrap
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend
//! on: where the backend lives, how long the transport may wait, and
//! how log output is formatted and filtered.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
