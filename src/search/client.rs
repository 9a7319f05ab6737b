use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{check, ApiError, SearchError};
use crate::query::{
    ChemicalFieldQuery, ChemicalFilter, DataQuery, DatasetQuery, DatasetReturningQuery,
    FieldQuery, FileReturningQuery, Filter, MultiQuery, PagedQuery, PifSystemQuery,
    PifSystemReturningQuery, PropertyQuery,
};
use crate::search::{
    DatasetSearchHit, FileSearchHit, MultiSearchResult, PifSearchHit, SearchResult,
};
use crate::types::SiteUrl;

/// Hard ceiling on `from + size`. Queries which would page past this
/// depth are rejected before any request is sent.
pub const MAX_QUERY_DEPTH: u64 = 50_000;

/// Page size used when the caller gives no pagination controls.
const AUTO_PAGINATION_CHUNK: u64 = 500;

/// Client for the search endpoints.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    url: SiteUrl,
}

impl SearchClient {
    pub(crate) fn new(client: reqwest::Client, url: SiteUrl) -> Self {
        SearchClient { client, url }
    }

    /// Search for PIF system records.
    ///
    /// When the query sets neither `size` nor `from_index`, every
    /// matching record up to [MAX_QUERY_DEPTH] is retrieved by paging
    /// internally; otherwise the query is sent exactly once, verbatim.
    pub async fn pif_search(
        &self,
        query: &PifSystemReturningQuery,
    ) -> Result<SearchResult<PifSearchHit>, SearchError> {
        self.search_paged("pif_search", query).await
    }

    /// Search for datasets. Pagination behaves as in [Self::pif_search].
    pub async fn dataset_search(
        &self,
        query: &DatasetReturningQuery,
    ) -> Result<SearchResult<DatasetSearchHit>, SearchError> {
        self.search_paged("dataset_search", query).await
    }

    /// Search for dataset files. Pagination behaves as in [Self::pif_search].
    pub async fn file_search(
        &self,
        query: &FileReturningQuery,
    ) -> Result<SearchResult<FileSearchHit>, SearchError> {
        self.search_paged("file_search", query).await
    }

    /// Execute several PIF queries in a single request. The response
    /// carries one result per sub-query, in submission order.
    pub async fn pif_multi_search(
        &self,
        multi_query: &MultiQuery,
    ) -> Result<MultiSearchResult<PifSearchHit>, SearchError> {
        for query in &multi_query.queries {
            check_depth(query.page_from(), query.page_size())?;
        }
        // The request is shared, so the tightest sub-query timeout applies.
        let timeout = multi_query.queries.iter().filter_map(|q| q.timeout).min();
        self.post_search("pif/multi_pif_search", multi_query, timeout)
            .await
    }

    /// Build a PIF query matching a chemical formula and/or a named
    /// property within a value range, restricted to the given datasets.
    /// The formula and property value carry `extract_as` labels so the
    /// hits come back with the matched values extracted.
    pub fn generate_simple_chemical_query(
        &self,
        params: &SimpleChemicalQuery,
    ) -> PifSystemReturningQuery {
        let mut system = PifSystemQuery::new();
        if let Some(formula) = &params.chemical_formula {
            system = system.chemical_formula(
                ChemicalFieldQuery::new()
                    .extract_as("Chemical formula")
                    .filter(ChemicalFilter::new().equal(formula)),
            );
        }
        if let Some(name) = &params.property_name {
            let mut value = FieldQuery::new().extract_as(name);
            let mut range = Filter::new();
            if let Some(min) = params.property_min {
                range = range.min(min);
            }
            if let Some(max) = params.property_max {
                range = range.max(max);
            }
            value = value.filter(range);
            let mut property = PropertyQuery::new()
                .name(FieldQuery::new().filter(Filter::new().equal(name)))
                .value(value);
            if let Some(units) = &params.property_units {
                property =
                    property.units(FieldQuery::new().filter(Filter::new().equal(units)));
            }
            system = system.properties(property);
        }

        let mut data_query = DataQuery::new().system(system);
        for id in &params.include_datasets {
            data_query = data_query.dataset(DatasetQuery::new().id(Filter::new().equal(id)));
        }
        for id in &params.exclude_datasets {
            data_query = data_query
                .dataset(DatasetQuery::new().id(Filter::new().equal(id).exclude(true)));
        }

        PifSystemReturningQuery::new()
            .score_relevance(true)
            .query(data_query)
    }

    // ==================================================
    //                 HELPER METHODS
    // ==================================================

    async fn search_paged<Q, H>(
        &self,
        route: &str,
        query: &Q,
    ) -> Result<SearchResult<H>, SearchError>
    where
        Q: PagedQuery,
        H: DeserializeOwned,
    {
        check_depth(query.page_from(), query.page_size())?;
        if query.page_from().is_some() || query.page_size().is_some() {
            return self.post_search(route, query, query.page_timeout()).await;
        }

        // No pagination controls given: retrieve the full result set with
        // successive paged requests.
        let first: SearchResult<H> = self
            .post_search(
                route,
                &query.with_page(0, AUTO_PAGINATION_CHUNK),
                query.page_timeout(),
            )
            .await?;
        let total = first.total_num_hits;
        let mut hits = first.hits;
        while (hits.len() as u64) < total {
            let from = hits.len() as u64;
            let size = AUTO_PAGINATION_CHUNK.min(total - from);
            if from + size > MAX_QUERY_DEPTH {
                break;
            }
            let page: SearchResult<H> = self
                .post_search(route, &query.with_page(from, size), query.page_timeout())
                .await?;
            if page.hits.is_empty() {
                break;
            }
            hits.extend(page.hits);
        }
        Ok(SearchResult {
            took: first.took,
            total_num_hits: total,
            max_score: first.max_score,
            hits,
        })
    }

    async fn post_search<Q, R>(
        &self,
        route: &str,
        body: &Q,
        timeout: Option<u64>,
    ) -> Result<R, SearchError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}v1/search/{}", self.url, route);
        debug!("POST {}", url);
        let mut req = self.client.post(&url).json(body);
        if let Some(milliseconds) = timeout {
            req = req.timeout(Duration::from_millis(milliseconds));
        }
        let res = req.send().await.map_err(ApiError::from)?;
        let data = check(res).await?.json().await.map_err(ApiError::from)?;
        Ok(data)
    }
}

fn check_depth(from_index: Option<u64>, size: Option<u64>) -> Result<(), SearchError> {
    let depth = from_index.unwrap_or(0).saturating_add(size.unwrap_or(0));
    if depth > MAX_QUERY_DEPTH {
        Err(SearchError::DepthLimit {
            depth,
            limit: MAX_QUERY_DEPTH,
        })
    } else {
        Ok(())
    }
}

/// Parameters for [SearchClient::generate_simple_chemical_query].
#[derive(Clone, Debug, Default)]
pub struct SimpleChemicalQuery {
    pub chemical_formula: Option<String>,
    pub property_name: Option<String>,
    pub property_units: Option<String>,
    pub property_min: Option<f64>,
    pub property_max: Option<f64>,
    pub include_datasets: Vec<String>,
    pub exclude_datasets: Vec<String>,
}

impl SimpleChemicalQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chemical_formula(mut self, formula: impl Into<String>) -> Self {
        self.chemical_formula = Some(formula.into());
        self
    }

    pub fn property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    pub fn property_units(mut self, units: impl Into<String>) -> Self {
        self.property_units = Some(units.into());
        self
    }

    pub fn property_min(mut self, min: f64) -> Self {
        self.property_min = Some(min);
        self
    }

    pub fn property_max(mut self, max: f64) -> Self {
        self.property_max = Some(max);
        self
    }

    pub fn include_dataset(mut self, id: impl Into<String>) -> Self {
        self.include_datasets.push(id.into());
        self
    }

    pub fn exclude_dataset(mut self, id: impl Into<String>) -> Self {
        self.exclude_datasets.push(id.into());
        self
    }
}
