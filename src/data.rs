//! Client for the data-management endpoints: datasets and their files.

use std::path::Path;

use fs_err::tokio::File;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use tokio_util::codec::{BytesCodec, FramedRead};

use crate::client::Envelope;
use crate::errors::{check, ApiError, UploadError};
use crate::types::{DatasetId, SiteUrl};

/// Client for dataset CRUD and file upload.
#[derive(Debug, Clone)]
pub struct DataClient {
    client: reqwest::Client,
    url: SiteUrl,
}

impl DataClient {
    pub(crate) fn new(client: reqwest::Client, url: SiteUrl) -> Self {
        DataClient { client, url }
    }

    /// Create a new dataset.
    pub async fn create_dataset(&self, metadata: &DatasetMetadata) -> Result<Dataset, ApiError> {
        let url = format!("{}v1/datasets", self.url);
        debug!("POST {}", url);
        let res = self.client.post(&url).json(metadata).send().await?;
        let envelope: Envelope<Dataset> = check(res).await?.json().await?;
        Ok(envelope.data)
    }

    /// Update the metadata of an existing dataset. Unset fields are left
    /// untouched server-side.
    pub async fn update_dataset(
        &self,
        id: DatasetId,
        metadata: &DatasetMetadata,
    ) -> Result<Dataset, ApiError> {
        let url = format!("{}v1/datasets/{}", self.url, id.0);
        debug!("POST {}", url);
        let res = self.client.post(&url).json(metadata).send().await?;
        let envelope: Envelope<Dataset> = check(res).await?.json().await?;
        Ok(envelope.data)
    }

    /// Bump a dataset to a new version; files uploaded afterwards land in
    /// the new version.
    pub async fn create_dataset_version(
        &self,
        id: DatasetId,
    ) -> Result<DatasetVersion, ApiError> {
        let url = format!("{}v1/datasets/{}/create_dataset_version", self.url, id.0);
        debug!("POST {}", url);
        let res = self.client.post(&url).send().await?;
        let envelope: Envelope<DatasetVersion> = check(res).await?.json().await?;
        Ok(envelope.data)
    }

    /// Upload a local file into a dataset. `dest_path` is the path the
    /// file gets within the dataset.
    pub async fn upload_file(
        &self,
        id: DatasetId,
        local_file: &Path,
        dest_path: &str,
    ) -> Result<FileUploadResponse, UploadError> {
        let filename = local_file
            .file_name()
            .ok_or_else(|| UploadError::PathError(local_file.to_string_lossy().to_string()))?
            .to_string_lossy()
            .to_string();
        let file = File::open(local_file).await.map_err(UploadError::IO)?;
        let content_length = fs_err::tokio::metadata(local_file).await?.len();
        let reader = Body::wrap_stream(FramedRead::new(file, BytesCodec::new()));

        let form = Form::new()
            .text("dest_path", dest_path.to_string())
            .part(
                "file",
                Part::stream_with_length(reader, content_length).file_name(filename),
            );
        let url = format!("{}v1/datasets/{}/files", self.url, id.0);
        debug!("POST {} (multipart)", url);
        let res = self.client.post(&url).multipart(form).send().await?;
        let envelope: Envelope<FileUploadResponse> =
            check(res).await?.json().await.map_err(ApiError::from)?;
        Ok(envelope.data)
    }

    /// List the files of a dataset's current version.
    pub async fn get_dataset_files(&self, id: DatasetId) -> Result<Vec<DatasetFile>, ApiError> {
        let url = format!("{}v1/datasets/{}/files", self.url, id.0);
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        let envelope: Envelope<DatasetFiles> = check(res).await?.json().await?;
        Ok(envelope.data.files)
    }

    /// Fetch one PIF record from a dataset by UID.
    pub async fn get_pif(
        &self,
        dataset_id: DatasetId,
        uid: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}v1/datasets/{}/pif/{}", self.url, dataset_id.0, uid);
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        Ok(check(res).await?.json().await?)
    }
}

/// Mutable dataset fields for create and update calls.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DatasetMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
}

impl DatasetMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatasetVersion {
    pub number: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FileUploadResponse {
    pub file_path: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatasetFile {
    pub path: String,
    pub url: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
struct DatasetFiles {
    files: Vec<DatasetFile>,
}
