//! # VSS API Client
//!
//! Outbound client for the video search and summarization service. The base
//! URL is resolved on every call through [`VssResolver`], so a missing
//! configuration surfaces as [`VssError::NotConfigured`] on the call that
//! needs it rather than at startup.
//!
//! Failed calls are turned into [`VssError::Api`] with the message format
//! `VSS API Error ({status} - Code: {code}): {message}` when the service
//! answers with a JSON error body, the raw body text otherwise, and a
//! generic status line when the body is empty.

mod error;
mod resolver;

pub use error::VssError;
pub use resolver::VssResolver;

use actix_web::web::Bytes;
use common::model::vss::{
    MediaType, VssFile, VssFileList, VssFileUpload, VssLiveStream, VssLiveStreamList,
    VssStreamDetails, DEFAULT_PURPOSE,
};
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Raw file bytes with the content type reported by VSS.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub content_type: String,
    pub bytes: Bytes,
}

pub struct VssClient {
    http: reqwest::Client,
    resolver: Arc<VssResolver>,
}

impl VssClient {
    pub fn new(resolver: Arc<VssResolver>, timeout: Duration) -> Result<Self, VssError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, resolver })
    }

    pub fn resolver(&self) -> &Arc<VssResolver> {
        &self.resolver
    }

    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        media_type: MediaType,
        purpose: Option<&str>,
    ) -> Result<VssFileUpload, VssError> {
        require("filename", filename)?;
        let purpose = purpose
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PURPOSE)
            .to_string();
        let form = Form::new()
            .text("purpose", purpose)
            .text("media_type", media_type.as_str())
            .part("file", Part::bytes(bytes).file_name(filename.to_string()))
            .text("filename", filename.to_string());
        let request = self.request(Method::POST, &["files"]).await?.multipart(form);
        json(send(request, "upload file").await?).await
    }

    pub async fn list_files(&self, purpose: Option<&str>) -> Result<VssFileList, VssError> {
        let mut request = self.request(Method::GET, &["files"]).await?;
        if let Some(purpose) = purpose.filter(|p| !p.trim().is_empty()) {
            request = request.query(&[("purpose", purpose)]);
        }
        json(send(request, "list files").await?).await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<VssFile, VssError> {
        require("file id", file_id)?;
        let request = self.request(Method::GET, &["files", file_id]).await?;
        json(send(request, "get file").await?).await
    }

    /// Succeeds on 200 and 204.
    pub async fn delete_file(&self, file_id: &str) -> Result<(), VssError> {
        require("file id", file_id)?;
        let request = self
            .request(Method::DELETE, &["files", file_id])
            .await?;
        let response = send(request, "delete file").await?;
        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(api_error(response, "delete file").await),
        }
    }

    pub async fn get_file_content(&self, file_id: &str) -> Result<FileContent, VssError> {
        require("file id", file_id)?;
        let request = self
            .request(Method::GET, &["files", file_id, "content"])
            .await?;
        let response = send(request, "get file content").await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?;
        Ok(FileContent {
            content_type,
            bytes: Bytes::from(bytes.to_vec()),
        })
    }

    pub async fn health(&self) -> Result<String, VssError> {
        let request = self.request(Method::GET, &["health", "ready"]).await?;
        Ok(send(request, "health check").await?.text().await?)
    }

    pub async fn list_models(&self) -> Result<Value, VssError> {
        let request = self.request(Method::GET, &["models"]).await?;
        json(send(request, "list models").await?).await
    }

    /// Prometheus text exposition.
    pub async fn metrics(&self) -> Result<String, VssError> {
        let request = self.request(Method::GET, &["metrics"]).await?;
        Ok(send(request, "metrics").await?.text().await?)
    }

    pub async fn summarize(&self, body: &Value) -> Result<Value, VssError> {
        let request = self.request(Method::POST, &["summarize"]).await?.json(body);
        json(send(request, "summarize").await?).await
    }

    pub async fn recommended_config(&self, body: &Value) -> Result<Value, VssError> {
        let request = self
            .request(Method::POST, &["recommended_config"])
            .await?
            .json(body);
        json(send(request, "recommended config").await?).await
    }

    pub async fn start_stream(&self, body: &Value) -> Result<Value, VssError> {
        let request = self.request(Method::POST, &["streams"]).await?.json(body);
        json(send(request, "start stream").await?).await
    }

    /// Returns the VSS answer, or null when it has no body.
    pub async fn stop_stream(&self, stream_id: &str) -> Result<Value, VssError> {
        require("stream id", stream_id)?;
        let request = self
            .request(Method::DELETE, &["streams", stream_id])
            .await?;
        let text = send(request, "stop stream").await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| VssError::Decode(e.to_string()))
    }

    pub async fn list_streams(&self) -> Result<Value, VssError> {
        let request = self.request(Method::GET, &["streams"]).await?;
        json(send(request, "list streams").await?).await
    }

    pub async fn get_stream(&self, stream_id: &str) -> Result<VssStreamDetails, VssError> {
        require("stream id", stream_id)?;
        let request = self
            .request(Method::GET, &["streams", stream_id])
            .await?;
        json(send(request, "get stream").await?).await
    }

    pub async fn list_live_streams(&self) -> Result<VssLiveStreamList, VssError> {
        let request = self.request(Method::GET, &["live-stream"]).await?;
        let value: Value = json(send(request, "list live streams").await?).await?;
        let items = match value {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };
        let data: Vec<VssLiveStream> =
            serde_json::from_value(items).map_err(|e| VssError::Decode(e.to_string()))?;
        Ok(VssLiveStreamList { data })
    }

    pub async fn get_live_stream(&self, stream_id: &str) -> Result<VssLiveStream, VssError> {
        require("stream id", stream_id)?;
        let request = self
            .request(Method::GET, &["live-stream", stream_id])
            .await?;
        json(send(request, "get live stream").await?).await
    }

    /// Builds a request to `segments` below the base URL. Each segment is
    /// percent-encoded, so ids cannot add query strings or path levels.
    async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, VssError> {
        let base = self.resolver.base_url().await?;
        let url = endpoint(&base, segments)?;
        debug!("VSS {method} {url}");
        Ok(self.http.request(method, url))
    }
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, VssError> {
    let invalid = || VssError::InvalidBaseUrl(base.to_string());
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn require(what: &'static str, value: &str) -> Result<(), VssError> {
    if value.trim().is_empty() {
        Err(VssError::MissingArgument(what))
    } else {
        Ok(())
    }
}

async fn send(request: RequestBuilder, action: &str) -> Result<Response, VssError> {
    let response = request.send().await.map_err(|e| {
        error!("Network error calling VSS API ({action}): {e}");
        VssError::Network(e)
    })?;
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(api_error(response, action).await)
    }
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, VssError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| VssError::Decode(e.to_string()))
}

async fn api_error(response: Response, action: &str) -> VssError {
    let status = response.status();
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let body = response.text().await.unwrap_or_default();
    let message = describe_error(code, reason, is_json, &body);
    error!("VSS API call failed ({action}): {message}");
    VssError::Api {
        status: code,
        message,
    }
}

fn describe_error(status: u16, reason: &str, is_json: bool, body: &str) -> String {
    let fallback = || format!("VSS API request failed with status {status}: {reason}");
    if !is_json {
        return if body.trim().is_empty() {
            fallback()
        } else {
            body.to_string()
        };
    }
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };
    let error_code = match map.get("code") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "UnknownError".to_string(),
    };
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("VSS API request failed with status {status}"));
    format!("VSS API Error ({status} - Code: {error_code}): {message}")
}
