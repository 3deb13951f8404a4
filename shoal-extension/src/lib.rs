//! Shoal Extension Client - cluster client surface for out-of-process extensions
//!
//! Extensions run outside the cluster process and reach it over HTTP(S).
//! This crate adapts that transport behind two client surfaces so plugin
//! code can migrate to the extension model with minimal source changes.
//!
//! # Architecture
//!
//! - **Factory**: [`ExtensionClient`] builds one connection pool per client
//!   handle and owns pool lifecycle
//! - **Typed client**: [`ShoalClient`], structured async operations for new
//!   code
//! - **Legacy facade**: [`LegacyRestClient`], callback-shaped operations
//!   preserving the old in-process call shapes during migration
//! - **Handlers**: [`TransportResponseHandler`] consumes push-notification
//!   acknowledgements from the cluster
//!
//! # Key Operations
//!
//! - Document: index, get, delete, search
//! - Index admin: create, delete, put/get mapping, rollover, get aliases
//! - Cluster: root info, ping
//!
//! The adapter holds no state of its own beyond the pools: no retries, no
//! caching, no request queueing. Per-request outcomes reach the caller
//! through return values or listeners only.

pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod types;

mod client;
mod legacy;
mod rest;
mod transport;

pub use client::{ExtensionClient, IndicesClient, ShoalClient};
pub use config::{ConnectionConfig, TlsPolicy};
pub use error::ExtensionError;
pub use handler::{
    AcknowledgedResponseHandler, ExecutorQueue, TransportAck, TransportResponseHandler,
};
pub use legacy::{
    ActionListener, Cancellable, LegacyClusterAdminClient, LegacyIndicesClient, LegacyRestClient,
};
pub use types::*;
