use async_trait::async_trait;
use reqwest::{multipart, Client, Response, StatusCode};
use shared::{
    domain::ResumeId,
    protocol::{AnalysisResponse, AnalysisResult, ErrorBody, ResumeRecord, PDF_MIME},
};
use tracing::warn;

use crate::{
    config::Settings,
    error::{ServiceError, GENERIC_SERVICE_FAILURE},
};

/// Typed boundary to the remote analysis service. Four operations, each one
/// request/response cycle with no internal retry.
#[async_trait]
pub trait ResumeGateway: Send + Sync {
    async fn submit(
        &self,
        filename: &str,
        file_bytes: Vec<u8>,
    ) -> Result<AnalysisResult, ServiceError>;
    async fn list(&self) -> Result<Vec<ResumeRecord>, ServiceError>;
    async fn fetch_one(&self, id: ResumeId) -> Result<AnalysisResult, ServiceError>;
    async fn delete(&self, id: ResumeId) -> Result<(), ServiceError>;
}

pub struct HttpResumeGateway {
    http: Client,
    base_url: String,
}

impl HttpResumeGateway {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
        })
    }

    fn transport_failure(op: &str, err: reqwest::Error) -> ServiceError {
        warn!(op, "resume service transport failure: {err}");
        ServiceError::service(GENERIC_SERVICE_FAILURE)
    }

    /// Normalizes a non-2xx response into the uniform error shape: the
    /// `{detail}` body when present, else the generic fallback.
    async fn failure(op: &str, response: Response) -> ServiceError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.detail)
            .filter(|detail| !detail.trim().is_empty());
        let message = detail.unwrap_or_else(|| GENERIC_SERVICE_FAILURE.to_string());
        warn!(op, %status, "resume service call failed: {message}");
        if status == StatusCode::NOT_FOUND {
            ServiceError::not_found(message)
        } else {
            ServiceError::service(message)
        }
    }

    async fn analysis_body(op: &str, response: Response) -> Result<AnalysisResult, ServiceError> {
        let body: AnalysisResponse = response.json().await.map_err(|err| {
            warn!(op, "resume service returned an undecodable analysis body: {err}");
            ServiceError::MalformedAnalysis
        })?;
        Ok(body.into_validated()?)
    }
}

#[async_trait]
impl ResumeGateway for HttpResumeGateway {
    async fn submit(
        &self,
        filename: &str,
        file_bytes: Vec<u8>,
    ) -> Result<AnalysisResult, ServiceError> {
        let part = multipart::Part::bytes(file_bytes)
            .file_name(filename.to_owned())
            .mime_str(PDF_MIME)
            .map_err(|err| HttpResumeGateway::transport_failure("submit", err))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| HttpResumeGateway::transport_failure("submit", err))?;

        if !response.status().is_success() {
            return Err(HttpResumeGateway::failure("submit", response).await);
        }
        HttpResumeGateway::analysis_body("submit", response).await
    }

    async fn list(&self) -> Result<Vec<ResumeRecord>, ServiceError> {
        let response = self
            .http
            .get(format!("{}/resumes", self.base_url))
            .send()
            .await
            .map_err(|err| HttpResumeGateway::transport_failure("list", err))?;

        if !response.status().is_success() {
            return Err(HttpResumeGateway::failure("list", response).await);
        }
        response.json::<Vec<ResumeRecord>>().await.map_err(|err| {
            warn!("resume service returned an undecodable record list: {err}");
            ServiceError::service(GENERIC_SERVICE_FAILURE)
        })
    }

    async fn fetch_one(&self, id: ResumeId) -> Result<AnalysisResult, ServiceError> {
        let response = self
            .http
            .get(format!("{}/resumes/{id}", self.base_url))
            .send()
            .await
            .map_err(|err| HttpResumeGateway::transport_failure("fetch_one", err))?;

        if !response.status().is_success() {
            return Err(HttpResumeGateway::failure("fetch_one", response).await);
        }
        HttpResumeGateway::analysis_body("fetch_one", response).await
    }

    async fn delete(&self, id: ResumeId) -> Result<(), ServiceError> {
        let response = self
            .http
            .delete(format!("{}/resumes/{id}", self.base_url))
            .send()
            .await
            .map_err(|err| HttpResumeGateway::transport_failure("delete", err))?;

        if !response.status().is_success() {
            return Err(HttpResumeGateway::failure("delete", response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
