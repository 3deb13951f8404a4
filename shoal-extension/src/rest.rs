//! REST operation layer
//!
//! One function per cluster operation, mapping a request value onto the
//! wire and decoding the typed response. Both client surfaces forward
//! here with the request unchanged, so the path table lives in exactly
//! one place.

use crate::error::{ExtensionError, Result};
use crate::metrics::RequestTimer;
use crate::transport::HttpTransport;
use crate::types::*;
use reqwest::Method;

fn joined(indices: &[String]) -> String {
    indices.join(",")
}

// ========================================
// Cluster info
// ========================================

pub(crate) async fn info(transport: &HttpTransport) -> Result<InfoResponse> {
    let timer = RequestTimer::new("info");
    timer.observe(transport.send::<(), _>(Method::GET, "/", None).await)
}

pub(crate) async fn ping(transport: &HttpTransport) -> Result<bool> {
    let timer = RequestTimer::new("ping");
    match transport
        .send::<(), InfoResponse>(Method::GET, "/", None)
        .await
    {
        Ok(_) => {
            timer.success();
            Ok(true)
        }
        Err(ExtensionError::Remote { .. }) => {
            timer.success();
            Ok(false)
        }
        Err(e) => {
            timer.error(e.error_type());
            Err(e)
        }
    }
}

// ========================================
// Document operations
// ========================================

pub(crate) async fn index_doc(
    transport: &HttpTransport,
    request: &IndexRequest,
) -> Result<IndexResponse> {
    let timer = RequestTimer::new("index");
    let (method, path) = match &request.id {
        Some(id) => (Method::PUT, format!("/{}/_doc/{}", request.index, id)),
        None => (Method::POST, format!("/{}/_doc", request.index)),
    };
    timer.observe(transport.send(method, &path, Some(request)).await)
}

pub(crate) async fn get_doc(
    transport: &HttpTransport,
    request: &GetRequest,
) -> Result<GetResponse> {
    let timer = RequestTimer::new("get");
    let path = format!("/{}/_doc/{}", request.index, request.id);
    timer.observe(transport.send::<(), _>(Method::GET, &path, None).await)
}

pub(crate) async fn delete_doc(
    transport: &HttpTransport,
    request: &DeleteRequest,
) -> Result<DeleteResponse> {
    let timer = RequestTimer::new("delete");
    let path = format!("/{}/_doc/{}", request.index, request.id);
    timer.observe(transport.send::<(), _>(Method::DELETE, &path, None).await)
}

pub(crate) async fn search(
    transport: &HttpTransport,
    request: &SearchRequest,
) -> Result<SearchResponse> {
    let timer = RequestTimer::new("search");
    let path = if request.indices.is_empty() {
        "/_search".to_string()
    } else {
        format!("/{}/_search", joined(&request.indices))
    };
    timer.observe(transport.send(Method::POST, &path, Some(request)).await)
}

// ========================================
// Administrative operations
// ========================================

pub(crate) async fn create_index(
    transport: &HttpTransport,
    request: &CreateIndexRequest,
) -> Result<CreateIndexResponse> {
    let timer = RequestTimer::new("create_index");
    let path = format!("/{}", request.index);
    timer.observe(transport.send(Method::PUT, &path, Some(request)).await)
}

pub(crate) async fn delete_index(
    transport: &HttpTransport,
    request: &DeleteIndexRequest,
) -> Result<AcknowledgedResponse> {
    let timer = RequestTimer::new("delete_index");
    if request.indices.is_empty() {
        return timer.observe(Err(ExtensionError::Config(
            "delete index requires at least one index".to_string(),
        )));
    }
    let path = format!("/{}", joined(&request.indices));
    timer.observe(transport.send::<(), _>(Method::DELETE, &path, None).await)
}

pub(crate) async fn put_mapping(
    transport: &HttpTransport,
    request: &PutMappingRequest,
) -> Result<AcknowledgedResponse> {
    let timer = RequestTimer::new("put_mapping");
    let path = format!("/{}/_mapping", request.index);
    timer.observe(transport.send(Method::PUT, &path, Some(request)).await)
}

pub(crate) async fn get_mappings(
    transport: &HttpTransport,
    request: &GetMappingsRequest,
) -> Result<GetMappingsResponse> {
    let timer = RequestTimer::new("get_mapping");
    let path = if request.indices.is_empty() {
        "/_mapping".to_string()
    } else {
        format!("/{}/_mapping", joined(&request.indices))
    };
    timer.observe(transport.send::<(), _>(Method::GET, &path, None).await)
}

pub(crate) async fn rollover(
    transport: &HttpTransport,
    request: &RolloverRequest,
) -> Result<RolloverResponse> {
    let timer = RequestTimer::new("rollover");
    let path = match &request.new_index {
        Some(new_index) => format!("/{}/_rollover/{}", request.alias, new_index),
        None => format!("/{}/_rollover", request.alias),
    };
    timer.observe(transport.send(Method::POST, &path, Some(request)).await)
}

pub(crate) async fn get_aliases(
    transport: &HttpTransport,
    request: &GetAliasesRequest,
) -> Result<GetAliasesResponse> {
    let timer = RequestTimer::new("get_aliases");
    let path = match (request.indices.is_empty(), request.aliases.is_empty()) {
        (true, true) => "/_alias".to_string(),
        (true, false) => format!("/_alias/{}", joined(&request.aliases)),
        (false, true) => format!("/{}/_alias", joined(&request.indices)),
        (false, false) => format!(
            "/{}/_alias/{}",
            joined(&request.indices),
            joined(&request.aliases)
        ),
    };
    timer.observe(transport.send::<(), _>(Method::GET, &path, None).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_index_list() {
        assert_eq!(joined(&["a".to_string(), "b".to_string()]), "a,b");
        assert_eq!(joined(&["only".to_string()]), "only");
    }

    #[tokio::test]
    async fn test_delete_index_rejects_empty_list() {
        let mut config = crate::config::ConnectionConfig::new("127.0.0.1", 9200);
        config.tls = crate::config::TlsPolicy::disabled();
        let transport = HttpTransport::new(&config).unwrap();

        let result = delete_index(&transport, &DeleteIndexRequest::new(vec![])).await;
        match result {
            Err(ExtensionError::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }
}
