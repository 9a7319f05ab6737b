//! Errors for this crate.

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum InvalidSiteUrl {
    #[error("Given URL does not end with \"/api/\": {0}")]
    EndpointRoot(String),

    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),
}

aliri_braid::from_infallible!(InvalidSiteUrl);

/// Errors representing failed interactions with the platform.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Error response with an explanation from the platform.
    #[error("({status:?} {reason:?}): {text}")]
    Server {
        status: StatusCode,
        reason: &'static str,
        text: String,
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Transport failure without a response from the platform.
    #[error(transparent)]
    Raw(reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e)
        } else {
            ApiError::Raw(e)
        }
    }
}

/// Errors from search operations.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// The query would page past the deepest result the server serves.
    #[error("from + size = {depth} exceeds the maximum query depth of {limit}")]
    DepthLimit { depth: u64, limit: u64 },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Api(e.into())
    }
}

/// Errors from experimental-design operations.
#[derive(thiserror::Error, Debug)]
pub enum DesignError {
    /// Design runs above the effort ceiling are rejected client-side.
    #[error("effort must be at most {limit} to trigger a design run, got {effort}")]
    EffortTooHigh { effort: u8, limit: u8 },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<reqwest::Error> for DesignError {
    fn from(e: reqwest::Error) -> Self {
        DesignError::Api(e.into())
    }
}

/// An error which might occur while uploading a file to a dataset.
#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("\"{0}\" is an invalid file path")]
    PathError(String),
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    IO(std::io::Error),
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        UploadError::Api(e.into())
    }
}

impl From<ApiError> for UploadError {
    fn from(e: ApiError) -> Self {
        UploadError::Api(e)
    }
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::IO(e)
    }
}

pub(crate) async fn check(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    match res.error_for_status_ref() {
        Ok(_) => Ok(res),
        Err(source) => {
            let status = res.status();
            let reason = status.canonical_reason().unwrap_or("unknown reason");
            let text = res.text().await.map_err(ApiError::from)?;
            Err(ApiError::Server {
                status,
                reason,
                text,
                source,
            })
        }
    }
}
