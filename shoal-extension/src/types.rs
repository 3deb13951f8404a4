//! Request and response values for cluster operations
//!
//! Wire shapes follow the cluster's REST API. Decoding is forward
//! compatible: fields this client does not model are ignored rather than
//! rejected. Fields that only select the request path carry
//! `#[serde(skip)]` so they never leak into a body.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ========================================
// Document operations
// ========================================

/// Request to index a document. Without an id the cluster generates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRequest {
    #[serde(skip)]
    pub index: String,
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub document: HashMap<String, Value>,
}

impl IndexRequest {
    pub fn new(index: impl Into<String>, document: HashMap<String, Value>) -> Self {
        Self {
            index: index.into(),
            id: None,
            document,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: u64,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetRequest {
    pub index: String,
    pub id: String,
}

impl GetRequest {
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub index: String,
    pub id: String,
}

impl DeleteRequest {
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: u64,
    pub result: String,
}

/// Search across one or more indices. An empty index list searches all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(skip)]
    pub indices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
}

impl SearchRequest {
    pub fn new(indices: Vec<String>) -> Self {
        Self {
            indices,
            query: None,
            size: None,
            from: None,
        }
    }

    pub fn query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub took: u64,
    pub timed_out: bool,
    #[serde(rename = "_shards", default)]
    pub shards: ShardStats,
    pub hits: SearchHits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHits {
    pub total: TotalHits,
    pub max_score: Option<f32>,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f32>,
    #[serde(rename = "_source", default)]
    pub source: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardStats {
    pub total: u32,
    pub successful: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl Default for ShardStats {
    fn default() -> Self {
        Self {
            total: 1,
            successful: 1,
            skipped: 0,
            failed: 0,
        }
    }
}

// ========================================
// Administrative operations
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    #[serde(skip)]
    pub index: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Value>,
}

impl CreateIndexRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            settings: None,
            mappings: None,
            aliases: None,
        }
    }

    pub fn settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn mappings(mut self, mappings: Value) -> Self {
        self.mappings = Some(mappings);
        self
    }

    pub fn aliases(mut self, aliases: Value) -> Self {
        self.aliases = Some(aliases);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexResponse {
    pub acknowledged: bool,
    #[serde(default)]
    pub shards_acknowledged: bool,
    pub index: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteIndexRequest {
    pub indices: Vec<String>,
}

impl DeleteIndexRequest {
    pub fn new(indices: Vec<String>) -> Self {
        Self { indices }
    }
}

/// Minimal acknowledgement returned by most administrative operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcknowledgedResponse {
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutMappingRequest {
    #[serde(skip)]
    pub index: String,
    pub properties: Value,
}

impl PutMappingRequest {
    pub fn new(index: impl Into<String>, properties: Value) -> Self {
        Self {
            index: index.into(),
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetMappingsRequest {
    pub indices: Vec<String>,
}

impl GetMappingsRequest {
    pub fn new(indices: Vec<String>) -> Self {
        Self { indices }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMappingsResponse {
    #[serde(flatten)]
    pub indices: HashMap<String, IndexMappings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMappings {
    pub mappings: Mappings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    #[serde(default)]
    pub properties: HashMap<String, FieldMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, FieldMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Roll an alias over to a new index, optionally gated on conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloverRequest {
    #[serde(skip)]
    pub alias: String,
    #[serde(skip)]
    pub new_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Value>,
}

impl RolloverRequest {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            new_index: None,
            conditions: None,
            settings: None,
            mappings: None,
        }
    }

    pub fn new_index(mut self, new_index: impl Into<String>) -> Self {
        self.new_index = Some(new_index.into());
        self
    }

    pub fn conditions(mut self, conditions: Value) -> Self {
        self.conditions = Some(conditions);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloverResponse {
    pub acknowledged: bool,
    #[serde(default)]
    pub shards_acknowledged: bool,
    pub old_index: String,
    pub new_index: String,
    pub rolled_over: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub conditions: HashMap<String, bool>,
}

/// Look up aliases, optionally narrowed to index and alias name patterns
#[derive(Debug, Clone, PartialEq)]
pub struct GetAliasesRequest {
    pub indices: Vec<String>,
    pub aliases: Vec<String>,
}

impl GetAliasesRequest {
    pub fn new(indices: Vec<String>) -> Self {
        Self {
            indices,
            aliases: Vec::new(),
        }
    }

    pub fn aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAliasesResponse {
    #[serde(flatten)]
    pub indices: HashMap<String, IndexAliases>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAliases {
    #[serde(default)]
    pub aliases: HashMap<String, Value>,
}

// ========================================
// Cluster info
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub cluster_name: String,
    pub version: VersionInfo,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ===================================================================
    // Forward-compatible decoding
    // ===================================================================

    #[test]
    fn test_search_response_ignores_unknown_fields() {
        let body = json!({
            "took": 5,
            "timed_out": false,
            "_shards": {"total": 1, "successful": 1, "skipped": 0, "failed": 0},
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "max_score": 1.2,
                "hits": [{
                    "_index": "products",
                    "_id": "doc-1",
                    "_score": 1.2,
                    "_source": {"title": "widget"},
                    "_ignored_new_field": true
                }]
            },
            "profile": {"not": "modeled"}
        });

        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.took, 5);
        assert_eq!(response.hits.total.value, 1);
        assert_eq!(response.hits.hits[0].id, "doc-1");
        assert_eq!(response.hits.hits[0].source["title"], json!("widget"));
    }

    #[test]
    fn test_get_response_defaults_missing_source() {
        let response: GetResponse = serde_json::from_value(json!({
            "_index": "products",
            "_id": "missing",
            "found": false
        }))
        .unwrap();
        assert!(!response.found);
        assert!(response.source.is_empty());
    }

    // ===================================================================
    // Body serialization keeps path fields out
    // ===================================================================

    #[test]
    fn test_index_request_body_is_just_the_document() {
        let mut document = HashMap::new();
        document.insert("title".to_string(), json!("widget"));
        let request = IndexRequest::new("products", document).with_id("doc-1");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"title": "widget"}));
    }

    #[test]
    fn test_create_index_request_body_omits_index_name() {
        let request = CreateIndexRequest::new("products")
            .settings(json!({"number_of_shards": 1}));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"settings": {"number_of_shards": 1}}));
    }

    #[test]
    fn test_search_request_body_omits_empty_options() {
        let request = SearchRequest::new(vec!["products".to_string()]);
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));

        let request = request.query(json!({"match_all": {}})).size(10);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": {"match_all": {}}, "size": 10})
        );
    }

    #[test]
    fn test_rollover_request_body() {
        let request = RolloverRequest::new("logs-write")
            .new_index("logs-000002")
            .conditions(json!({"max_docs": 1000}));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"conditions": {"max_docs": 1000}}));
    }

    // ===================================================================
    // Mapping and alias wire shapes
    // ===================================================================

    #[test]
    fn test_mappings_response_round_trip() {
        let body = json!({
            "products": {
                "mappings": {
                    "properties": {
                        "title": {
                            "type": "text",
                            "fields": {"keyword": {"type": "keyword"}}
                        },
                        "created": {
                            "type": "date",
                            "format": "strict_date_optional_time||epoch_millis"
                        }
                    }
                }
            }
        });

        let response: GetMappingsResponse = serde_json::from_value(body.clone()).unwrap();
        let mappings = &response.indices["products"].mappings;
        assert_eq!(mappings.properties["title"].field_type, "text");
        assert_eq!(
            mappings.properties["created"].format.as_deref(),
            Some("strict_date_optional_time||epoch_millis")
        );

        assert_eq!(serde_json::to_value(&response).unwrap(), body);
    }

    #[test]
    fn test_aliases_response_flattens_indices() {
        let response: GetAliasesResponse = serde_json::from_value(json!({
            "logs-000001": {"aliases": {"logs-write": {}}},
            "logs-000002": {"aliases": {}}
        }))
        .unwrap();
        assert_eq!(response.indices.len(), 2);
        assert!(response.indices["logs-000001"].aliases.contains_key("logs-write"));
    }

    #[test]
    fn test_shard_stats_default() {
        let s = ShardStats::default();
        assert_eq!(s.total, 1);
        assert_eq!(s.successful, 1);
        assert_eq!(s.skipped, 0);
        assert_eq!(s.failed, 0);
    }
}
