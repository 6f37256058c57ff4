// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the observation list, delete, detail and add endpoints.
//!
//! Provides [`HttpObservationApi`], the production [`ObservationApi`]. Every
//! programmatic request carries the `X-Requested-With` marker so the server
//! answers with JSON instead of a full page.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use starlog_config::model::ClientConfig;
use starlog_core::routes::{self, AJAX_HEADER, AJAX_HEADER_VALUE, CSRF_HEADER, SESSIONS_PATH};
use starlog_core::types::{NewObservation, NewSession, ObservationDetail, ObservingSession};
use starlog_core::{
    DeleteResponse, FilterState, ObservationApi, ObservationKey, ObservationPage, StarlogError,
};
use tracing::{debug, warn};
use url::Url;

use crate::bootstrap::{PageBootstrap, parse_bootstrap};

/// Error body of the gateway's non-delete routes.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed observation backend rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpObservationApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpObservationApi {
    /// Builds a client from the `[client]` config section.
    ///
    /// No request timeout is applied unless `request_timeout_secs` is set.
    pub fn new(config: &ClientConfig) -> Result<Self, StarlogError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            StarlogError::Config(format!("invalid base_url `{}`: {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StarlogError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, StarlogError> {
        self.base_url
            .join(path)
            .map_err(|e| StarlogError::Config(format!("cannot join `{path}` to base URL: {e}")))
    }

    /// A programmatic request: marked as such and asking for JSON.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AJAX_HEADER, AJAX_HEADER_VALUE)
            .header(ACCEPT, "application/json")
    }

    /// Loads the server-rendered list page and reads its embedded state.
    ///
    /// The page is requested without the programmatic marker so the server
    /// renders HTML.
    pub async fn fetch_bootstrap(
        &self,
        path: &str,
        filters: &FilterState,
    ) -> Result<PageBootstrap, StarlogError> {
        let url = list_page_url(self.url(path)?, filters, None);
        debug!(%url, "loading list page");

        let html = self
            .client
            .get(url)
            .header(ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("GET {path} failed: {e}"), e))?
            .error_for_status()
            .map_err(|e| StarlogError::transport(format!("GET {path} failed: {e}"), e))?
            .text()
            .await
            .map_err(|e| StarlogError::transport("failed to read list page", e))?;

        Ok(parse_bootstrap(&html))
    }

    /// Full record of one observation.
    pub async fn observation_detail(
        &self,
        key: &ObservationKey,
    ) -> Result<ObservationDetail, StarlogError> {
        let path = routes::detail_path(key);
        let response = self
            .request(Method::GET, self.url(&path)?)
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("GET {path} failed: {e}"), e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StarlogError::NotFound {
                kind: "observation".into(),
                id: key.to_string(),
            });
        }
        decode_json(response, &path).await
    }

    pub async fn list_sessions(&self) -> Result<Vec<ObservingSession>, StarlogError> {
        let response = self
            .request(Method::GET, self.url(SESSIONS_PATH)?)
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("GET {SESSIONS_PATH} failed: {e}"), e))?;
        decode_json(response, SESSIONS_PATH).await
    }

    /// Creates an observing session; the server assigns its slug.
    pub async fn create_session(
        &self,
        session: &NewSession,
        csrf_token: &str,
    ) -> Result<ObservingSession, StarlogError> {
        let response = self
            .request(Method::POST, self.url(SESSIONS_PATH)?)
            .header(CSRF_HEADER, csrf_token)
            .json(session)
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("POST {SESSIONS_PATH} failed: {e}"), e))?;
        decode_json(response, SESSIONS_PATH).await
    }

    /// Submits an observation form.
    pub async fn create_observation(
        &self,
        observation: &NewObservation,
        add_path: &str,
        csrf_token: &str,
    ) -> Result<ObservationDetail, StarlogError> {
        let response = self
            .request(Method::POST, self.url(add_path)?)
            .header(CSRF_HEADER, csrf_token)
            .json(observation)
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("POST {add_path} failed: {e}"), e))?;
        decode_json(response, add_path).await
    }
}

#[async_trait]
impl ObservationApi for HttpObservationApi {
    async fn fetch_page(
        &self,
        path: &str,
        filters: &FilterState,
        page: u32,
    ) -> Result<ObservationPage, StarlogError> {
        let url = list_page_url(self.url(path)?, filters, Some(page));
        debug!(%url, page, "fetching observation page");

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("GET {path} failed: {e}"), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, page, "list endpoint returned an error status");
            return Err(StarlogError::Transport {
                message: format!("list endpoint returned {status}"),
                source: None,
            });
        }
        decode_json(response, path).await
    }

    async fn delete_observation(
        &self,
        key: &ObservationKey,
        csrf_token: &str,
    ) -> Result<DeleteResponse, StarlogError> {
        let path = routes::delete_path(key);
        debug!(%key, "posting delete");

        let response = self
            .request(Method::POST, self.url(&path)?)
            .header(CSRF_HEADER, csrf_token)
            .send()
            .await
            .map_err(|e| StarlogError::transport(format!("POST {path} failed: {e}"), e))?;

        // Refusals carry a `{success: false, error}` body whatever the status.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StarlogError::transport("failed to read delete response", e))?;
        match serde_json::from_str::<DeleteResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => Err(StarlogError::decode(
                "delete response was not the expected JSON",
                e,
            )),
            Err(_) => Err(StarlogError::Transport {
                message: format!("delete endpoint returned {status}"),
                source: None,
            }),
        }
    }
}

/// `url` with the filter query and an optional page number.
///
/// Pair order matches the list page's canonical query string.
fn list_page_url(mut url: Url, filters: &FilterState, page: Option<u32>) -> Url {
    let filters = filters.normalized();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (name, value) in [
            ("session", &filters.session),
            ("object_type", &filters.object_type),
            ("search", &filters.search),
        ] {
            if let Some(value) = value {
                pairs.append_pair(name, value);
            }
        }
        if let Some(page) = page {
            pairs.append_pair("page", &page.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

/// Decodes a JSON success body, mapping error statuses to typed errors.
async fn decode_json<T: DeserializeOwned>(
    response: Response,
    path: &str,
) -> Result<T, StarlogError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| StarlogError::transport(format!("failed to read {path} response"), e))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("{path} returned {status}"));
        return Err(match status {
            StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => StarlogError::Rejected { message },
            _ => StarlogError::Transport {
                message,
                source: None,
            },
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| StarlogError::decode(format!("unexpected {path} response"), e))
}
