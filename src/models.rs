//! Client for the predictive-model and experimental-design endpoints.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::Envelope;
use crate::design::{DesignResults, DesignRun, DesignRunInput, ProcessStatus};
use crate::errors::{check, ApiError, DesignError};
use crate::types::{DataViewId, RunUid, SiteUrl};

/// Highest `effort` accepted for a design run. Larger values are
/// rejected client-side before any request is sent.
pub const MAX_DESIGN_EFFORT: u8 = 30;

/// Client for model predict requests and design runs on a data view.
#[derive(Debug, Clone)]
pub struct ModelsClient {
    client: reqwest::Client,
    url: SiteUrl,
}

impl ModelsClient {
    pub(crate) fn new(client: reqwest::Client, url: SiteUrl) -> Self {
        ModelsClient { client, url }
    }

    /// Submit candidates to the view's trained model for prediction.
    /// Returns the UID of the server-side predict run.
    pub async fn submit_predict_request(
        &self,
        data_view_id: &DataViewId,
        candidates: &[HashMap<String, String>],
    ) -> Result<RunUid, ApiError> {
        let url = format!("{}v1/data_views/{}/predict/submit", self.url, data_view_id);
        debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .json(&PredictRequest { candidates })
            .send()
            .await?;
        let envelope: Envelope<SubmittedRun> = check(res).await?.json().await?;
        Ok(envelope.data.uid)
    }

    /// Retrieve the status of an in-progress or completed predict run.
    pub async fn check_predict_status(
        &self,
        data_view_id: &DataViewId,
        run_uid: &RunUid,
    ) -> Result<ProcessStatus, ApiError> {
        let url = format!(
            "{}v1/data_views/{}/predict/{}/status",
            self.url, data_view_id, run_uid
        );
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        let envelope: Envelope<ProcessStatus> = check(res).await?.json().await?;
        Ok(envelope.data)
    }

    /// Submit a new experimental-design run.
    ///
    /// Fails with [DesignError::EffortTooHigh] before any network I/O if
    /// `input.effort` exceeds [MAX_DESIGN_EFFORT].
    pub async fn submit_design_run(
        &self,
        data_view_id: &DataViewId,
        input: &DesignRunInput,
    ) -> Result<DesignRun, DesignError> {
        if input.effort > MAX_DESIGN_EFFORT {
            return Err(DesignError::EffortTooHigh {
                effort: input.effort,
                limit: MAX_DESIGN_EFFORT,
            });
        }
        let url = format!("{}v1/data_views/{}/experimental_design", self.url, data_view_id);
        debug!("POST {}", url);
        let res = self.client.post(&url).json(input).send().await?;
        let envelope: Envelope<DesignRunData> =
            check(res).await?.json().await.map_err(ApiError::from)?;
        Ok(envelope.data.design_run)
    }

    /// Retrieve the status of an in-progress or completed design run.
    pub async fn get_design_run_status(
        &self,
        data_view_id: &DataViewId,
        run_uid: &RunUid,
    ) -> Result<ProcessStatus, ApiError> {
        let url = format!(
            "{}v1/data_views/{}/experimental_design/{}/status",
            self.url, data_view_id, run_uid
        );
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        let envelope: Envelope<ProcessStatus> = check(res).await?.json().await?;
        Ok(envelope.data)
    }

    /// Retrieve the candidate lists of a completed design run.
    pub async fn get_design_run_results(
        &self,
        data_view_id: &DataViewId,
        run_uid: &RunUid,
    ) -> Result<DesignResults, ApiError> {
        let url = format!(
            "{}v1/data_views/{}/experimental_design/{}/results",
            self.url, data_view_id, run_uid
        );
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        let envelope: Envelope<DesignResults> = check(res).await?.json().await?;
        Ok(envelope.data)
    }

    /// Kill an in-progress design run. Returns the UID of the killed run.
    pub async fn kill_design_run(
        &self,
        data_view_id: &DataViewId,
        run_uid: &RunUid,
    ) -> Result<RunUid, ApiError> {
        let url = format!(
            "{}v1/data_views/{}/experimental_design/{}",
            self.url, data_view_id, run_uid
        );
        debug!("DELETE {}", url);
        let res = self.client.delete(&url).send().await?;
        let envelope: Envelope<SubmittedRun> = check(res).await?.json().await?;
        Ok(envelope.data.uid)
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    candidates: &'a [HashMap<String, String>],
}

#[derive(Deserialize)]
struct SubmittedRun {
    uid: RunUid,
}

#[derive(Deserialize)]
struct DesignRunData {
    design_run: DesignRun,
}
