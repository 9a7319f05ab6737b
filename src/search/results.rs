//! Definitions of structs describing response data from the search
//! endpoints.

use std::collections::HashMap;

use serde::Deserialize;
use time::OffsetDateTime;

/// Response envelope shared by every search endpoint, generic over the
/// hit type the endpoint returns.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchResult<H> {
    /// Number of milliseconds the query took to execute.
    pub took: Option<u64>,
    pub total_num_hits: u64,
    pub max_score: Option<f64>,
    #[serde(default = "Vec::new")]
    pub hits: Vec<H>,
}

/// One matched PIF system record.
#[derive(Clone, Debug, Deserialize)]
pub struct PifSearchHit {
    pub id: Option<String>,
    pub dataset: Option<u64>,
    pub score: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    /// The full PIF record, present unless the query set
    /// `return_system(false)`.
    pub system: Option<serde_json::Value>,
    /// Values extracted per the query's `extract_as` labels.
    #[serde(default)]
    pub extracted: HashMap<String, serde_json::Value>,
    /// Document paths the extracted values came from, same labels.
    #[serde(default)]
    pub extracted_path: HashMap<String, String>,
}

/// One matched dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct DatasetSearchHit {
    pub id: Option<String>,
    pub score: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub email: Option<String>,
    pub num_pifs: Option<u64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// One matched dataset file.
#[derive(Clone, Debug, Deserialize)]
pub struct FileSearchHit {
    pub dataset_id: Option<u64>,
    pub id: Option<String>,
    pub score: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Response to a multi-query: one element per sub-query, in order.
#[derive(Clone, Debug, Deserialize)]
pub struct MultiSearchResult<H> {
    #[serde(default = "Vec::new")]
    pub results: Vec<MultiSearchResultElement<H>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MultiSearchResultElement<H> {
    pub status: Option<String>,
    pub result: SearchResult<H>,
}
