use std::time::Duration;

use futures_util::StreamExt;
use radar_core::{AnalysisError, AnalysisRequest, AnalysisResult, ErrorKind, ModelInfo};
use radar_logging::{radar_debug, radar_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// The analysis backend serves its routes at the root. Behind the web frontend's
/// proxy the same routes live under `/api`.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const CONTENT_PATH: &str = "analyze/content";
const URL_PATH: &str = "analyze/url";
const MODEL_INFO_PATH: &str = "model/info";

const SERVER_ERROR_MESSAGE: &str = "Server error occurred";
const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";
const SETUP_ERROR_PREFIX: &str = "Error setting up request: ";
const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";
const TOO_LARGE_MESSAGE: &str = "Response from server too large";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Prefix every endpoint path is appended to, e.g. `http://host/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze_content(&self, content: &str) -> Result<AnalysisResult, AnalysisError>;

    async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, AnalysisError>;

    async fn model_info(&self) -> Result<ModelInfo, AnalysisError>;

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        match request {
            AnalysisRequest::Text { content } => self.analyze_content(content).await,
            AnalysisRequest::Url { url } => self.analyze_url(url).await,
        }
    }
}

#[derive(Serialize)]
struct ContentBody<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct UrlBody<'a> {
    url: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ClientSettings,
    // A build failure is reported as a setup error on every call.
    client: Result<reqwest::Client, String>,
}

impl ReqwestApiClient {
    pub fn new(settings: ClientSettings) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| err.to_string());
        Self { settings, client }
    }

    fn client(&self) -> Result<&reqwest::Client, AnalysisError> {
        self.client.as_ref().map_err(|message| setup_error(message))
    }

    fn endpoint(&self, path: &str) -> Result<Url, AnalysisError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(|err| {
            setup_error(format!(
                "invalid API base URL {:?}: {err}",
                self.settings.base_url
            ))
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AnalysisError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let client = self.client()?;
        let url = self.endpoint(path)?;
        let payload = serde_json::to_vec(body).map_err(|err| setup_error(err.to_string()))?;
        radar_debug!("POST {} ({} bytes)", url, payload.len());

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_send_error)?;
        self.read_json(response).await
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, AnalysisError>
    where
        T: DeserializeOwned,
    {
        let client = self.client()?;
        let url = self.endpoint(path)?;
        radar_debug!("GET {}", url);

        let response = client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_send_error)?;
        self.read_json(response).await
    }

    async fn read_json<T>(&self, response: reqwest::Response) -> Result<T, AnalysisError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let bytes = match self.read_body(response).await {
            Ok(bytes) => bytes,
            // An error body too large to inspect has no usable detail.
            Err(err) if !status.is_success() && matches!(err.kind, ErrorKind::Server { .. }) => {
                return Err(AnalysisError::server(status.as_u16(), SERVER_ERROR_MESSAGE));
            }
            Err(err) => return Err(err),
        };

        if !status.is_success() {
            let message =
                detail_message(&bytes).unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string());
            radar_warn!("Service answered {}: {}", status, message);
            return Err(AnalysisError::server(status.as_u16(), message));
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            radar_warn!("Undecodable response body ({} bytes): {}", bytes.len(), err);
            AnalysisError::server(status.as_u16(), INVALID_RESPONSE_MESSAGE)
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, AnalysisError> {
        let status = response.status().as_u16();
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                radar_warn!("Response of {} bytes exceeds limit {}", content_len, max_bytes);
                return Err(AnalysisError::server(status, TOO_LARGE_MESSAGE));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_send_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                radar_warn!("Response body exceeds limit {}", max_bytes);
                return Err(AnalysisError::server(status, TOO_LARGE_MESSAGE));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl AnalysisApi for ReqwestApiClient {
    async fn analyze_content(&self, content: &str) -> Result<AnalysisResult, AnalysisError> {
        self.post_json(CONTENT_PATH, &ContentBody { content }).await
    }

    async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        self.post_json(URL_PATH, &UrlBody { url }).await
    }

    async fn model_info(&self) -> Result<ModelInfo, AnalysisError> {
        self.get_json(MODEL_INFO_PATH).await
    }
}

fn setup_error(message: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::transport(format!("{SETUP_ERROR_PREFIX}{message}"))
}

fn map_send_error(err: reqwest::Error) -> AnalysisError {
    if err.is_builder() {
        return setup_error(err);
    }
    if err.is_timeout() {
        radar_warn!("Request timed out: {}", err);
    } else {
        radar_warn!("Request failed without response: {}", err);
    }
    AnalysisError::network(NO_RESPONSE_MESSAGE)
}

/// Extracts the human-readable `detail` of an error body.
///
/// A string detail is used verbatim. A list of validation entries is joined by
/// their `msg` fields. Anything else yields `None`.
fn detail_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        detail_message, ClientSettings, ReqwestApiClient, CONTENT_PATH, MODEL_INFO_PATH,
    };

    #[test]
    fn default_endpoints_hit_backend_root() {
        let client = ReqwestApiClient::new(ClientSettings::default());
        assert_eq!(
            client.endpoint(CONTENT_PATH).map(|url| url.to_string()).ok(),
            Some("http://localhost:8000/analyze/content".to_string())
        );
        assert_eq!(
            client.endpoint(MODEL_INFO_PATH).map(|url| url.to_string()).ok(),
            Some("http://localhost:8000/model/info".to_string())
        );
    }

    #[test]
    fn string_detail_is_verbatim() {
        assert_eq!(
            detail_message(br#"{"detail":"rate limited"}"#).as_deref(),
            Some("rate limited")
        );
    }

    #[test]
    fn validation_entries_are_joined() {
        let body = br#"{"detail":[{"loc":["body","url"],"msg":"invalid or missing URL scheme"},{"msg":"field required"}]}"#;
        assert_eq!(
            detail_message(body).as_deref(),
            Some("invalid or missing URL scheme; field required")
        );
    }

    #[test]
    fn missing_or_empty_detail_yields_none() {
        assert_eq!(detail_message(b"{}"), None);
        assert_eq!(detail_message(br#"{"detail":""}"#), None);
        assert_eq!(detail_message(br#"{"detail":42}"#), None);
        assert_eq!(detail_message(b"<html>oops</html>"), None);
        assert_eq!(detail_message(b""), None);
    }
}
