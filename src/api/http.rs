// src/api/http.rs

//! HTTP client wrapper for the backend REST API.
//!
//! Every response uses the uniform envelope `{statusCode, message, data}`.
//! The bearer token, when present, is attached to every request.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::multipart;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Uniform response envelope.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

/// Shared HTTP client for all resource clients.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a configured client. The base URL must parse; a trailing slash
    /// is dropped so endpoint paths can be appended verbatim.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.resolve_base_url();
        Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Install or clear the bearer token used for subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Some(token) = self.token.read().expect("token lock poisoned").as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request, mapping non-2xx responses to [`AppError::Api`] with
    /// the backend's `message` field when the body carries one.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(AppError::api(status.as_u16(), error_message(response).await))
    }

    async fn data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let envelope: Envelope<T> = self.send(builder).await?.json().await?;
        Ok(envelope.data)
    }

    /// GET the envelope's `data`.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.data(self.builder(Method::GET, path)).await
    }

    /// POST a JSON body, returning the envelope's `data`.
    pub async fn post_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.data(self.builder(Method::POST, path).json(body)).await
    }

    /// PUT a JSON body, returning the envelope's `data`.
    pub async fn put_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.data(self.builder(Method::PUT, path).json(body)).await
    }

    /// PATCH a JSON body, discarding any `data`.
    pub async fn patch_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.builder(Method::PATCH, path).json(body))
            .await?;
        Ok(())
    }

    /// POST a JSON body, discarding any `data`.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.builder(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    /// PUT a JSON body, discarding any `data`.
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(self.builder(Method::PUT, path).json(body))
            .await?;
        Ok(())
    }

    /// DELETE, discarding any `data`.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.builder(Method::DELETE, path)).await?;
        Ok(())
    }

    /// POST a JSON body and deserialize the whole response body.
    ///
    /// Used where the payload is not the uniform envelope, e.g. the login
    /// response carrying the token beside `data`.
    pub async fn post_raw<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        Ok(self
            .send(self.builder(Method::POST, path).json(body))
            .await?
            .json()
            .await?)
    }

    /// POST a single file as `multipart/form-data` under the `file` field,
    /// returning the envelope's `data`.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: String,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<T> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = multipart::Form::new().part("file", part);
        self.data(self.builder(Method::POST, path).multipart(form))
            .await
    }
}

/// Extract the backend's error message from a failed response body.
async fn error_message(response: Response) -> String {
    let fallback = "request failed".to_string();
    let Ok(body) = response.text().await else {
        return fallback;
    };
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(fallback)
}

/// True when a status code means the entity does not exist.
pub fn is_not_found(status: u16) -> bool {
    status == StatusCode::NOT_FOUND.as_u16()
}
