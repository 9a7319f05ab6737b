use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;

use crate::data::DataClient;
use crate::models::ModelsClient;
use crate::search::SearchClient;
use crate::types::{ApiKey, SiteUrl};

/// Matgrid client object.
///
/// Holds the authenticated HTTP client and hands out per-domain
/// sub-clients. Sub-clients share cheap clones of the underlying
/// connection pool, so a [MatgridClient] can be created once and its
/// accessors called freely.
#[derive(Debug, Clone)]
pub struct MatgridClient {
    client: reqwest::Client,
    url: SiteUrl,
}

impl MatgridClient {
    pub fn new(url: SiteUrl, api_key: &ApiKey) -> Result<Self, reqwest::Error> {
        let client = reqwest::ClientBuilder::new()
            .default_headers(key2header(api_key))
            .build()?;
        Ok(MatgridClient { client, url })
    }

    /// Get the URL this client is connected to.
    pub fn url(&self) -> &SiteUrl {
        &self.url
    }

    /// Get a client for the search endpoints.
    pub fn search(&self) -> SearchClient {
        SearchClient::new(self.client.clone(), self.url.clone())
    }

    /// Get a client for the predictive-model and design endpoints.
    pub fn models(&self) -> ModelsClient {
        ModelsClient::new(self.client.clone(), self.url.clone())
    }

    /// Get a client for the data-management endpoints.
    pub fn data(&self) -> DataClient {
        DataClient::new(self.client.clone(), self.url.clone())
    }
}

fn key2header(key: &ApiKey) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let mut value: HeaderValue = key.as_str().parse().unwrap();
    value.set_sensitive(true);
    headers.insert("X-API-Key", value);
    headers.insert(ACCEPT, "application/json".parse().unwrap());
    headers
}

/// Top-level wrapper around non-search response payloads.
#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}
