//! REST API client.
//!
//! Every screen talks to the API through [`ApiClient`]. Requests carry the
//! session's bearer token and `Accept: application/json`; a status outside
//! 200-299 becomes [`ConsoleError::Request`] with the server's `message` (or
//! `Request failed (<status>)`), and anything that prevents a readable
//! response becomes [`ConsoleError::Network`]. Each call is a single attempt.

pub mod endpoints;

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::session::SessionContext;

/// Most pages [`ApiClient::fetch_all_pages`] will request for one list.
pub const MAX_PAGES: u32 = 100;

/// All records of a paginated list, plus how the fetch went.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub records: Vec<T>,
    /// `pagination.last_page` of the first page.
    pub last_page: u32,
    /// `pagination.total` of the first page, when reported.
    pub total: Option<u64>,
    pub pages_fetched: u32,
    /// First page that failed; `records` holds everything before it.
    pub truncated_at: Option<u32>,
}

impl<T> Paginated<T> {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.truncated_at.is_none()
    }

    /// Server-reported total, or the number of records fetched.
    #[must_use]
    pub fn total_or_len(&self) -> u64 {
        self.total.unwrap_or(self.records.len() as u64)
    }
}

/// Authenticated client for the admin REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a client for the configured API base.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Network` if the HTTP client fails to build.
    pub fn new(config: &ConsoleConfig, session: SessionContext) -> Result<Self, ConsoleError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("storedesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base: config.api_base.as_str().trim_end_matches('/').to_string(),
                session,
            }),
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base)
    }

    /// The stored token, or `ConsoleError::Auth` before anything is sent.
    fn bearer(&self) -> Result<SecretString, ConsoleError> {
        self.inner
            .session
            .token()?
            .ok_or_else(ConsoleError::not_signed_in)
    }

    /// Send an authenticated request and return the parsed JSON body.
    ///
    /// An empty success body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Auth` when no token is stored (no request is
    /// sent), `ConsoleError::Request` for non-2xx statuses and
    /// `ConsoleError::Network` for transport or parse failures.
    #[instrument(skip(self, body))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ConsoleError> {
        let token = self.bearer()?;
        let mut request = self
            .inner
            .client
            .request(method, self.url(path))
            .bearer_auth(token.expose_secret());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "API response");
        parse_response(status, &text)
    }

    /// GET and decode.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`]; a body of the wrong shape is
    /// `ConsoleError::Network`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let value = self.request(Method::GET, path, None).await?;
        decode(value)
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ConsoleError> {
        let body = to_body(body)?;
        self.request(Method::POST, path, Some(&body)).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ConsoleError> {
        let body = to_body(body)?;
        self.request(Method::PUT, path, Some(&body)).await
    }

    /// DELETE.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ConsoleError> {
        self.request(Method::DELETE, path, None).await
    }

    /// POST a form without a bearer token and return the raw status and body.
    ///
    /// Used by sign-in, which interprets failures itself. Only transport
    /// failures are errors here.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Network` if the request cannot be sent.
    #[instrument(skip(self, form))]
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<(StatusCode, Value), ConsoleError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        let value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok((status, value))
    }

    /// List endpoint returning either a bare array or a `{data: [...]}`
    /// envelope.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`]; any other shape is `ConsoleError::Network`.
    pub async fn list_records<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ConsoleError> {
        let value = self.request(Method::GET, path, None).await?;
        let items = list_items(value)
            .ok_or_else(|| ConsoleError::Network(format!("Unexpected list response from {path}")))?;
        Ok(decode_records(items))
    }

    /// Try candidate list endpoints in order; return the first that succeeds.
    ///
    /// # Errors
    ///
    /// Returns the last endpoint's error when every candidate fails, or
    /// `ConsoleError::Auth` immediately when signed out.
    pub async fn first_list<T: DeserializeOwned>(&self, paths: &[&str]) -> Result<Vec<T>, ConsoleError> {
        let mut last_error = ConsoleError::Network("No list endpoint configured".to_string());
        for path in paths {
            match self.list_records(path).await {
                Ok(records) => return Ok(records),
                Err(e) if matches!(e, ConsoleError::Auth(_) | ConsoleError::Storage(_)) => {
                    return Err(e);
                }
                Err(e) => {
                    tracing::debug!(path, error = %e, "List endpoint failed, trying next");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Fetch every page of a `{data, pagination: {last_page, total}}` list.
    ///
    /// Pages after the first are fetched one at a time. The first failing
    /// page stops the fetch: its number is recorded in `truncated_at` and the
    /// records gathered so far are returned. At most [`MAX_PAGES`] pages are
    /// requested; a longer list is truncated at page `MAX_PAGES + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the first page fails.
    #[instrument(skip(self))]
    pub async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Paginated<T>, ConsoleError> {
        let first = self
            .request(Method::GET, &endpoints::with_query(path, "page", 1), None)
            .await?;
        let (last_page, total) = pagination(&first);
        let mut records = decode_records(list_items(first).unwrap_or_default());
        let mut pages_fetched = 1;
        let mut truncated_at = None;

        for page in 2..=last_page.min(MAX_PAGES) {
            let url = endpoints::with_query(path, "page", page);
            match self.request(Method::GET, &url, None).await {
                Ok(value) => {
                    records.extend(decode_records(list_items(value).unwrap_or_default()));
                    pages_fetched += 1;
                }
                Err(e) => {
                    tracing::warn!(page, last_page, error = %e, "Page fetch failed, list is incomplete");
                    truncated_at = Some(page);
                    break;
                }
            }
        }
        if truncated_at.is_none() && last_page > MAX_PAGES {
            tracing::warn!(last_page, max_pages = MAX_PAGES, "Page limit reached, list is incomplete");
            truncated_at = Some(MAX_PAGES + 1);
        }

        Ok(Paginated {
            records,
            last_page,
            total,
            pages_fetched,
            truncated_at,
        })
    }

    /// Fetch only the first page of a paginated list.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn first_page<T: DeserializeOwned>(&self, path: &str) -> Result<Paginated<T>, ConsoleError> {
        let value = self.request(Method::GET, path, None).await?;
        let (last_page, total) = pagination(&value);
        Ok(Paginated {
            records: decode_records(list_items(value).unwrap_or_default()),
            last_page,
            total,
            pages_fetched: 1,
            truncated_at: None,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Response handling
// =============================================================================

fn parse_response(status: StatusCode, text: &str) -> Result<Value, ConsoleError> {
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
        return Err(ConsoleError::Request {
            status: status.as_u16(),
            message,
        });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|e| ConsoleError::Network(format!("Invalid JSON response: {e}")))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ConsoleError> {
    serde_json::from_value(value)
        .map_err(|e| ConsoleError::Network(format!("Unexpected response shape: {e}")))
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ConsoleError> {
    serde_json::to_value(body).map_err(|e| ConsoleError::validation(format!("Unserializable request: {e}")))
}

/// The record array of a list response.
fn list_items(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut obj) => match obj.remove("data")? {
            Value::Array(items) => Some(items),
            nested @ Value::Object(_) => list_items(nested),
            _ => None,
        },
        _ => None,
    }
}

/// Decode records one by one, skipping any the console cannot read.
fn decode_records<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect()
}

/// `(last_page, total)` from `pagination`, `meta` or the top level.
fn pagination(value: &Value) -> (u32, Option<u64>) {
    let source = ["pagination", "meta"]
        .iter()
        .find_map(|k| value.get(*k).filter(|v| v.is_object()))
        .unwrap_or(value);
    let last_page = source
        .get("last_page")
        .and_then(crate::models::de::value_as_i64)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1);
    let total = source
        .get("total")
        .and_then(crate::models::de::value_as_i64)
        .and_then(|n| u64::try_from(n).ok());
    (last_page, total)
}
