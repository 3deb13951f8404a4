//! Client factory and typed client
//!
//! [`ExtensionClient`] builds the connection pools an extension talks to
//! the cluster through and owns their lifecycle. Each constructor builds
//! its own pool; the typed and legacy surfaces never share one.

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::legacy::LegacyRestClient;
use crate::rest;
use crate::transport::HttpTransport;
use crate::types::*;
use std::sync::Arc;
use tracing::debug;

/// Factory for cluster clients used by an extension.
///
/// Tracks at most one typed and one legacy transport at a time; building
/// a second client of the same kind replaces the tracked transport, so
/// close the previous client first.
#[derive(Default)]
pub struct ExtensionClient {
    typed_transport: Option<Arc<HttpTransport>>,
    legacy_transport: Option<Arc<HttpTransport>>,
}

impl ExtensionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the typed client for the given cluster address.
    ///
    /// Uses the default connection posture: strict deprecation checking,
    /// TLS with peer verification disabled. The caller is responsible
    /// for [`close_typed_transport`](Self::close_typed_transport) when
    /// finished.
    pub fn typed_client(&mut self, host: &str, port: u16) -> Result<ShoalClient> {
        self.typed_client_with_config(ConnectionConfig::new(host, port))
    }

    /// Build the typed client with an explicit connection config
    pub fn typed_client_with_config(&mut self, config: ConnectionConfig) -> Result<ShoalClient> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        self.typed_transport = Some(transport.clone());
        debug!("Initialized typed client for {}", config.base_url());
        Ok(ShoalClient::new(transport))
    }

    /// Build the legacy client for the given cluster address.
    ///
    /// The caller is responsible for
    /// [`close_legacy_transport`](Self::close_legacy_transport) when
    /// finished.
    #[deprecated(note = "compatibility surface for migrating plugins; use typed_client")]
    pub fn legacy_client(&mut self, host: &str, port: u16) -> Result<LegacyRestClient> {
        self.legacy_client_with_config(ConnectionConfig::new(host, port))
    }

    /// Build the legacy client with an explicit connection config
    #[deprecated(note = "compatibility surface for migrating plugins; use typed_client")]
    pub fn legacy_client_with_config(
        &mut self,
        config: ConnectionConfig,
    ) -> Result<LegacyRestClient> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        self.legacy_transport = Some(transport.clone());
        debug!("Initialized legacy client for {}", config.base_url());
        Ok(LegacyRestClient::new(transport))
    }

    /// Close the typed client's transport, if one was ever built
    pub fn close_typed_transport(&mut self) -> Result<()> {
        if let Some(transport) = self.typed_transport.take() {
            transport.close()?;
        }
        Ok(())
    }

    /// Close the legacy client's transport, if one was ever built
    pub fn close_legacy_transport(&mut self) -> Result<()> {
        if let Some(transport) = self.legacy_transport.take() {
            transport.close()?;
        }
        Ok(())
    }

    /// Close both transports in sequence.
    ///
    /// Not atomic: when closing the typed transport fails, the error
    /// propagates and the legacy transport is left untouched.
    pub fn close(&mut self) -> Result<()> {
        self.close_typed_transport()?;
        self.close_legacy_transport()
    }
}

/// Typed cluster client.
///
/// The surface new extension code should use: structured requests,
/// structured responses, `Result`-returning async operations.
pub struct ShoalClient {
    transport: Arc<HttpTransport>,
}

impl ShoalClient {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Root info of the cluster this client is bound to
    pub async fn info(&self) -> Result<InfoResponse> {
        rest::info(&self.transport).await
    }

    /// Probe the cluster. `Ok(false)` means it answered with an error,
    /// `Err` means it could not be reached at all.
    pub async fn ping(&self) -> Result<bool> {
        rest::ping(&self.transport).await
    }

    /// Index a document
    pub async fn index(&self, request: &IndexRequest) -> Result<IndexResponse> {
        rest::index_doc(&self.transport, request).await
    }

    /// Get a document by index and id
    pub async fn get(&self, request: &GetRequest) -> Result<GetResponse> {
        rest::get_doc(&self.transport, request).await
    }

    /// Delete a document by index and id
    pub async fn delete(&self, request: &DeleteRequest) -> Result<DeleteResponse> {
        rest::delete_doc(&self.transport, request).await
    }

    /// Search across one or more indices
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        rest::search(&self.transport, request).await
    }

    /// Namespace for index administration
    pub fn indices(&self) -> IndicesClient {
        IndicesClient {
            transport: self.transport.clone(),
        }
    }
}

/// Index administration on the typed client
pub struct IndicesClient {
    transport: Arc<HttpTransport>,
}

impl IndicesClient {
    /// Create an index
    pub async fn create(&self, request: &CreateIndexRequest) -> Result<CreateIndexResponse> {
        rest::create_index(&self.transport, request).await
    }

    /// Delete one or more indices
    pub async fn delete(&self, request: &DeleteIndexRequest) -> Result<AcknowledgedResponse> {
        rest::delete_index(&self.transport, request).await
    }

    /// Update the mappings on an index
    pub async fn put_mapping(&self, request: &PutMappingRequest) -> Result<AcknowledgedResponse> {
        rest::put_mapping(&self.transport, request).await
    }

    /// Retrieve the mappings of one or more indices
    pub async fn get_mapping(&self, request: &GetMappingsRequest) -> Result<GetMappingsResponse> {
        rest::get_mappings(&self.transport, request).await
    }

    /// Roll an alias over to a new index
    pub async fn rollover(&self, request: &RolloverRequest) -> Result<RolloverResponse> {
        rest::rollover(&self.transport, request).await
    }

    /// Get one or more aliases
    pub async fn get_aliases(&self, request: &GetAliasesRequest) -> Result<GetAliasesResponse> {
        rest::get_aliases(&self.transport, request).await
    }
}
