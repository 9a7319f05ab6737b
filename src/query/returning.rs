//! Top-level request objects combining a [DataQuery] with pagination
//! and scoring controls.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::DataQuery;

/// Request for PIF system records.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PifSystemReturningQuery {
    pub query: Option<DataQuery>,
    #[serde(rename = "from")]
    pub from_index: Option<u64>,
    pub size: Option<u64>,
    pub random_results: Option<bool>,
    pub score_relevance: Option<bool>,
    pub return_system: Option<bool>,
    /// Request timeout in milliseconds. Applied client-side, never sent.
    #[serde(skip)]
    pub timeout: Option<u64>,
}

impl PifSystemReturningQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: DataQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn from_index(mut self, from_index: u64) -> Self {
        self.from_index = Some(from_index);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn random_results(mut self, random_results: bool) -> Self {
        self.random_results = Some(random_results);
        self
    }

    pub fn score_relevance(mut self, score_relevance: bool) -> Self {
        self.score_relevance = Some(score_relevance);
        self
    }

    /// Whether hits should carry the full PIF system record.
    pub fn return_system(mut self, return_system: bool) -> Self {
        self.return_system = Some(return_system);
        self
    }

    pub fn timeout(mut self, milliseconds: u64) -> Self {
        self.timeout = Some(milliseconds);
        self
    }
}

/// Request for dataset metadata records.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetReturningQuery {
    pub query: Option<DataQuery>,
    #[serde(rename = "from")]
    pub from_index: Option<u64>,
    pub size: Option<u64>,
    pub random_results: Option<bool>,
    pub score_relevance: Option<bool>,
    pub count_pifs: Option<bool>,
    /// Request timeout in milliseconds. Applied client-side, never sent.
    #[serde(skip)]
    pub timeout: Option<u64>,
}

impl DatasetReturningQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: DataQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn from_index(mut self, from_index: u64) -> Self {
        self.from_index = Some(from_index);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn random_results(mut self, random_results: bool) -> Self {
        self.random_results = Some(random_results);
        self
    }

    pub fn score_relevance(mut self, score_relevance: bool) -> Self {
        self.score_relevance = Some(score_relevance);
        self
    }

    /// Ask the server to count the PIFs in each matched dataset.
    pub fn count_pifs(mut self, count_pifs: bool) -> Self {
        self.count_pifs = Some(count_pifs);
        self
    }

    pub fn timeout(mut self, milliseconds: u64) -> Self {
        self.timeout = Some(milliseconds);
        self
    }
}

/// Request for dataset file records.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileReturningQuery {
    pub query: Option<DataQuery>,
    #[serde(rename = "from")]
    pub from_index: Option<u64>,
    pub size: Option<u64>,
    pub random_results: Option<bool>,
    pub score_relevance: Option<bool>,
    /// Request timeout in milliseconds. Applied client-side, never sent.
    #[serde(skip)]
    pub timeout: Option<u64>,
}

impl FileReturningQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: DataQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn from_index(mut self, from_index: u64) -> Self {
        self.from_index = Some(from_index);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn random_results(mut self, random_results: bool) -> Self {
        self.random_results = Some(random_results);
        self
    }

    pub fn score_relevance(mut self, score_relevance: bool) -> Self {
        self.score_relevance = Some(score_relevance);
        self
    }

    pub fn timeout(mut self, milliseconds: u64) -> Self {
        self.timeout = Some(milliseconds);
        self
    }
}

/// Several PIF queries executed in one request; the server answers with
/// one result per sub-query, in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<PifSystemReturningQuery>,
}

impl MultiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(mut self, query: PifSystemReturningQuery) -> Self {
        self.queries.push(query);
        self
    }
}

/// Pagination controls shared by the returning queries, used by the
/// search client's depth guard and auto-pagination loop.
pub(crate) trait PagedQuery: Serialize + Clone {
    fn page_from(&self) -> Option<u64>;
    fn page_size(&self) -> Option<u64>;
    fn page_timeout(&self) -> Option<u64>;
    fn with_page(&self, from_index: u64, size: u64) -> Self;
}

macro_rules! impl_paged_query {
    ($query:ty) => {
        impl PagedQuery for $query {
            fn page_from(&self) -> Option<u64> {
                self.from_index
            }

            fn page_size(&self) -> Option<u64> {
                self.size
            }

            fn page_timeout(&self) -> Option<u64> {
                self.timeout
            }

            fn with_page(&self, from_index: u64, size: u64) -> Self {
                let mut page = self.clone();
                page.from_index = Some(from_index);
                page.size = Some(size);
                page
            }
        }
    };
}

impl_paged_query!(PifSystemReturningQuery);
impl_paged_query!(DatasetReturningQuery);
impl_paged_query!(FileReturningQuery);
