//! Backward-compatible client facade
//!
//! Preserves the callback call shapes that in-process plugin code used
//! before the extension split, so existing call sites migrate with
//! minimal changes. New code should use [`ShoalClient`](crate::ShoalClient)
//! instead.
//!
//! Every operation forwards the supplied request unchanged to the REST
//! layer and returns without blocking; the listener fires exactly once on
//! a runtime-managed thread. Callers must be inside a Tokio runtime.

use crate::error::{ExtensionError, Result};
use crate::rest;
use crate::transport::HttpTransport;
use crate::types::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Completion callback for one asynchronous operation.
///
/// Consumed by value, so at most one of the two methods can ever run.
/// Implemented for any `FnOnce(Result<T>)` closure.
pub trait ActionListener<T>: Send + 'static {
    fn on_response(self, response: T);
    fn on_failure(self, error: ExtensionError);
}

impl<T, F> ActionListener<T> for F
where
    F: FnOnce(Result<T>) + Send + 'static,
{
    fn on_response(self, response: T) {
        self(Ok(response))
    }

    fn on_failure(self, error: ExtensionError) {
        self(Err(error))
    }
}

/// Handle for aborting an in-flight operation.
///
/// Cancelling does not guarantee the remote side never executed the
/// operation; it guarantees the listener either already fired or will
/// fire once with a cancellation failure. Cancelling after completion is
/// a no-op.
#[derive(Debug)]
pub struct Cancellable {
    token: CancellationToken,
}

impl Cancellable {
    fn new() -> (Self, CancellationToken) {
        let token = CancellationToken::new();
        (
            Self {
                token: token.clone(),
            },
            token,
        )
    }

    /// Best-effort abort of the in-flight operation
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Drop-in replacement for the old in-process client surface.
///
/// Only the operations existing plugins actually use are present; this
/// is a deliberately narrow capability surface, not a partial
/// implementation of the old interface.
pub struct LegacyRestClient {
    transport: Arc<HttpTransport>,
}

impl LegacyRestClient {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// The admin client that can be used to perform administrative
    /// operations
    pub fn admin(&self) -> &Self {
        self
    }

    /// A client for operations against the cluster
    pub fn cluster(&self) -> LegacyClusterAdminClient {
        LegacyClusterAdminClient {
            _transport: self.transport.clone(),
        }
    }

    /// A client for operations against the indices
    pub fn indices(&self) -> LegacyIndicesClient {
        LegacyIndicesClient {
            transport: self.transport.clone(),
        }
    }

    /// Index a document. Without an id the cluster generates one.
    pub fn index<L>(&self, request: IndexRequest, listener: L)
    where
        L: ActionListener<IndexResponse>,
    {
        let transport = self.transport.clone();
        tokio::spawn(async move {
            match rest::index_doc(&transport, &request).await {
                Ok(response) => listener.on_response(response),
                Err(error) => listener.on_failure(error),
            }
        });
    }

    /// Get a previously indexed document by index and id
    pub fn get<L>(&self, request: GetRequest, listener: L)
    where
        L: ActionListener<GetResponse>,
    {
        let transport = self.transport.clone();
        tokio::spawn(async move {
            match rest::get_doc(&transport, &request).await {
                Ok(response) => listener.on_response(response),
                Err(error) => listener.on_failure(error),
            }
        });
    }

    /// Delete a document by index and id
    pub fn delete<L>(&self, request: DeleteRequest, listener: L)
    where
        L: ActionListener<DeleteResponse>,
    {
        let transport = self.transport.clone();
        tokio::spawn(async move {
            match rest::delete_doc(&transport, &request).await {
                Ok(response) => listener.on_response(response),
                Err(error) => listener.on_failure(error),
            }
        });
    }

    /// Search across one or more indices with a query
    pub fn search<L>(&self, request: SearchRequest, listener: L)
    where
        L: ActionListener<SearchResponse>,
    {
        let transport = self.transport.clone();
        tokio::spawn(async move {
            match rest::search(&transport, &request).await {
                Ok(response) => listener.on_response(response),
                Err(error) => listener.on_failure(error),
            }
        });
    }
}

/// Cluster-level admin facade.
///
/// Exposes no operations yet: extensions cannot query cluster state
/// through this surface, so there is nothing to forward. An absent
/// method here is absent at compile time, not a stub that pretends to
/// succeed.
pub struct LegacyClusterAdminClient {
    _transport: Arc<HttpTransport>,
}

// TODO: add state() once cluster state queries are exposed to extensions

/// Index-level admin facade. Each operation returns a [`Cancellable`]
/// for best-effort abort of the in-flight request.
pub struct LegacyIndicesClient {
    transport: Arc<HttpTransport>,
}

impl LegacyIndicesClient {
    /// Create an index
    pub fn create<L>(&self, request: CreateIndexRequest, listener: L) -> Cancellable
    where
        L: ActionListener<CreateIndexResponse>,
    {
        let transport = self.transport.clone();
        let (cancellable, token) = Cancellable::new();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    listener.on_failure(ExtensionError::Cancelled("create index".to_string()));
                }
                result = rest::create_index(&transport, &request) => match result {
                    Ok(response) => listener.on_response(response),
                    Err(error) => listener.on_failure(error),
                },
            }
        });
        cancellable
    }

    /// Delete one or more indices
    pub fn delete<L>(&self, request: DeleteIndexRequest, listener: L) -> Cancellable
    where
        L: ActionListener<AcknowledgedResponse>,
    {
        let transport = self.transport.clone();
        let (cancellable, token) = Cancellable::new();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    listener.on_failure(ExtensionError::Cancelled("delete index".to_string()));
                }
                result = rest::delete_index(&transport, &request) => match result {
                    Ok(response) => listener.on_response(response),
                    Err(error) => listener.on_failure(error),
                },
            }
        });
        cancellable
    }

    /// Update the mappings on an index
    pub fn put_mapping<L>(&self, request: PutMappingRequest, listener: L) -> Cancellable
    where
        L: ActionListener<AcknowledgedResponse>,
    {
        let transport = self.transport.clone();
        let (cancellable, token) = Cancellable::new();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    listener.on_failure(ExtensionError::Cancelled("put mapping".to_string()));
                }
                result = rest::put_mapping(&transport, &request) => match result {
                    Ok(response) => listener.on_response(response),
                    Err(error) => listener.on_failure(error),
                },
            }
        });
        cancellable
    }

    /// Retrieve the mappings of one or more indices
    pub fn get_mapping<L>(&self, request: GetMappingsRequest, listener: L) -> Cancellable
    where
        L: ActionListener<GetMappingsResponse>,
    {
        let transport = self.transport.clone();
        let (cancellable, token) = Cancellable::new();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    listener.on_failure(ExtensionError::Cancelled("get mapping".to_string()));
                }
                result = rest::get_mappings(&transport, &request) => match result {
                    Ok(response) => listener.on_response(response),
                    Err(error) => listener.on_failure(error),
                },
            }
        });
        cancellable
    }

    /// Roll an alias over to a new index
    pub fn rollover_index<L>(&self, request: RolloverRequest, listener: L) -> Cancellable
    where
        L: ActionListener<RolloverResponse>,
    {
        let transport = self.transport.clone();
        let (cancellable, token) = Cancellable::new();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    listener.on_failure(ExtensionError::Cancelled("rollover".to_string()));
                }
                result = rest::rollover(&transport, &request) => match result {
                    Ok(response) => listener.on_response(response),
                    Err(error) => listener.on_failure(error),
                },
            }
        });
        cancellable
    }

    /// Get one or more aliases
    pub fn get_aliases<L>(&self, request: GetAliasesRequest, listener: L) -> Cancellable
    where
        L: ActionListener<GetAliasesResponse>,
    {
        let transport = self.transport.clone();
        let (cancellable, token) = Cancellable::new();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    listener.on_failure(ExtensionError::Cancelled("get aliases".to_string()));
                }
                result = rest::get_aliases(&transport, &request) => match result {
                    Ok(response) => listener.on_response(response),
                    Err(error) => listener.on_failure(error),
                },
            }
        });
        cancellable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConnectionConfig, TlsPolicy};

    fn test_client() -> LegacyRestClient {
        let mut config = ConnectionConfig::new("127.0.0.1", 9200);
        config.tls = TlsPolicy::disabled();
        LegacyRestClient::new(Arc::new(HttpTransport::new(&config).unwrap()))
    }

    #[test]
    fn test_admin_returns_same_client() {
        let client = test_client();
        assert!(std::ptr::eq(client.admin(), &client));
    }

    #[test]
    fn test_facades_share_the_parent_transport() {
        let client = test_client();
        let indices = client.indices();
        assert!(Arc::ptr_eq(&client.transport, &indices.transport));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (cancellable, token) = Cancellable::new();
        assert!(!cancellable.is_cancelled());
        cancellable.cancel();
        cancellable.cancel();
        assert!(cancellable.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_listener_closure_receives_failure() {
        // Transport is already closed, so the spawned op fails without
        // touching the network and the closure still fires exactly once.
        let client = test_client();
        client.transport.close().unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel();
        client.get(
            GetRequest::new("products", "doc-1"),
            move |result: Result<GetResponse>| {
                tx.send(result.map(|_| ())).unwrap();
            },
        );

        let outcome = rx.await.unwrap();
        match outcome {
            Err(ExtensionError::Closed(_)) => {}
            other => panic!("expected Closed error, got {:?}", other),
        }
    }
}
