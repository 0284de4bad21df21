//! Async HTTP client wrapping the guest JSON API.

use std::time::Duration;

use concierge_core::{
  api::{CreateGuestBody, GuestApi, UpdateGuestBody},
  guest::{AccessibilityOption, Guest, GuestId, GuestInput, OptionSelection},
};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{NetworkError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the guest backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the guest REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    Url::parse(&config.base_url).map_err(|e| NetworkError::InvalidBaseUrl {
      url:    config.base_url.clone(),
      reason: e.to_string(),
    })?;
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(NetworkError::Client)?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self.client.request(method, self.url(path))
  }

  /// Send `req` and fail on anything but a 2xx status.
  async fn send(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Response> {
    tracing::debug!(%method, path, "sending request");
    let resp = req.send().await.map_err(|source| NetworkError::Transport {
      method: method.clone(),
      path: path.to_string(),
      source,
    })?;

    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    // FastAPI-style backends put the reason under `detail`.
    let detail = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|body| match body.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
      });
    Err(NetworkError::Status {
      method,
      path: path.to_string(),
      status,
      detail,
    })
  }

  async fn send_json<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    req: RequestBuilder,
  ) -> Result<T> {
    let resp = self.send(method.clone(), path, req).await?;
    resp.json().await.map_err(|source| {
      let path = path.to_string();
      // The timeout also covers reading the body.
      if source.is_timeout() {
        NetworkError::Transport { method, path, source }
      } else {
        NetworkError::Decode { method, path, source }
      }
    })
  }

  // ── Guests ────────────────────────────────────────────────────────────────

  /// `GET /guest/all`
  pub async fn list_guests(&self) -> Result<Vec<Guest>> {
    let path = "/guest/all";
    self
      .send_json(Method::GET, path, self.request(Method::GET, path))
      .await
  }

  /// `GET /guest/{id}`
  pub async fn get_guest(&self, id: GuestId) -> Result<Guest> {
    let path = format!("/guest/{id}");
    self
      .send_json(Method::GET, &path, self.request(Method::GET, &path))
      .await
  }

  /// `POST /guest/create`
  pub async fn create_guest(
    &self,
    input: &GuestInput,
    selection: &OptionSelection,
  ) -> Result<Guest> {
    let path = "/guest/create";
    let req = self
      .request(Method::POST, path)
      .json(&CreateGuestBody::new(input, selection));
    self.send_json(Method::POST, path, req).await
  }

  /// `PUT /guest/{id}`
  pub async fn update_guest(
    &self,
    id: GuestId,
    input: &GuestInput,
    selection: &OptionSelection,
  ) -> Result<Guest> {
    let path = format!("/guest/{id}");
    let req = self
      .request(Method::PUT, &path)
      .json(&UpdateGuestBody::new(input, selection));
    self.send_json(Method::PUT, &path, req).await
  }

  /// `DELETE /guest/{id}`. The response body is ignored.
  pub async fn delete_guest(&self, id: GuestId) -> Result<()> {
    let path = format!("/guest/{id}");
    self
      .send(Method::DELETE, &path, self.request(Method::DELETE, &path))
      .await?;
    Ok(())
  }

  // ── Accessibility options ─────────────────────────────────────────────────

  /// `GET /accessibility_option/all`
  pub async fn list_accessibility_options(&self) -> Result<Vec<AccessibilityOption>> {
    let path = "/accessibility_option/all";
    self
      .send_json(Method::GET, path, self.request(Method::GET, path))
      .await
  }
}

impl GuestApi for ApiClient {
  type Error = NetworkError;

  async fn list_guests(&self) -> Result<Vec<Guest>> { ApiClient::list_guests(self).await }

  async fn get_guest(&self, id: GuestId) -> Result<Guest> {
    ApiClient::get_guest(self, id).await
  }

  async fn create_guest<'a>(
    &'a self,
    input: &'a GuestInput,
    selection: &'a OptionSelection,
  ) -> Result<Guest> {
    ApiClient::create_guest(self, input, selection).await
  }

  async fn update_guest<'a>(
    &'a self,
    id: GuestId,
    input: &'a GuestInput,
    selection: &'a OptionSelection,
  ) -> Result<Guest> {
    ApiClient::update_guest(self, id, input, selection).await
  }

  async fn delete_guest(&self, id: GuestId) -> Result<()> {
    ApiClient::delete_guest(self, id).await
  }

  async fn list_accessibility_options(&self) -> Result<Vec<AccessibilityOption>> {
    ApiClient::list_accessibility_options(self).await
  }
}
