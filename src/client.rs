//! The OpenCorporates API client
//!
//! A [`Client`] carries the configuration surface (API version, base URL,
//! optional token, injected transport) and the request counter. It is cheap
//! to clone; clones share the transport and the counter, so the request
//! count covers every call path of one client instance.

use crate::company::Company;
use crate::counter::RequestCounter;
use crate::error::{Error, Result};
use crate::iterator::CompanyIterator;
use crate::pager::PageInfo;
use crate::transport::{HttpTransport, Transport, TransportResponse};
use crate::request::{lookup_url, search_url, LookupRequest, SearchRequest};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Default API version requested when none is configured
pub const API_VERSION: &str = "0.4";

/// Base URL of the public OpenCorporates service
pub const BASE_URL: &str = "https://api.opencorporates.com";

/// Environment variable consulted for the API token
pub const TOKEN_ENV: &str = "OPENCORPORATES_API_TOKEN";

/// Client for the OpenCorporates company registry API
#[derive(Clone)]
pub struct Client {
    base: Url,
    version: String,
    api_token: Option<String>,
    transport: Arc<dyn Transport>,
    counter: RequestCounter,
}

impl Client {
    /// Create a client against the public service with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Search for companies by name
    ///
    /// Returns a lazy iterator; no request is issued until the first
    /// [`CompanyIterator::next`] call.
    pub fn search(&self, request: SearchRequest) -> CompanyIterator {
        CompanyIterator::new(self.clone(), request)
    }

    /// Fetch a single company by registry number and jurisdiction
    ///
    /// Fails with a validation error before any network call if the number
    /// is not an integer or the jurisdiction is empty. A well-formed response
    /// carrying no record yields a zero-value [`Company`], not an error, so
    /// callers should check the returned fields.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<Company> {
        let url = lookup_url(&self.base, &self.version, self.api_token.as_deref(), request)?;
        let response = self.call(&url).await?;
        let envelope: LookupEnvelope =
            serde_json::from_str(&response.body).map_err(|e| Error::decode(e.to_string()))?;
        Ok(envelope.results.company)
    }

    /// Number of HTTP calls this client instance has issued so far
    pub fn request_count(&self) -> u64 {
        self.counter.get()
    }

    /// Fetch one page of search results and its pagination metadata
    pub(crate) async fn fetch_page(
        &self,
        request: &SearchRequest,
        page: usize,
    ) -> Result<(Vec<Company>, PageInfo)> {
        let url = search_url(
            &self.base,
            &self.version,
            self.api_token.as_deref(),
            request,
            page,
        )?;
        let response = self.call(&url).await?;
        let results = serde_json::from_str::<SearchEnvelope>(&response.body)
            .map_err(|e| Error::decode(e.to_string()))?
            .results;

        let info = PageInfo {
            page: results.page,
            total_pages: results.total_pages,
            per_page: results.per_page,
            total_count: results.total_count,
        };
        // The buffer never outgrows the reported totals, even when the
        // server's per_page exceeds the size of the whole result set.
        let mut companies = vec![Company::default(); info.per_page.min(info.total_count)];
        for (slot, record) in companies.iter_mut().zip(results.companies) {
            *slot = record.company;
        }
        Ok((companies, info))
    }

    /// Issue one GET and classify the response status
    ///
    /// The counter records every call, including ones that fail.
    async fn call(&self, url: &str) -> Result<TransportResponse> {
        self.counter.increment();
        debug!(url, "GET");
        let response = self.transport.get(url).await?;
        classify(response)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .field("version", &self.version)
            .field("has_api_token", &self.api_token.is_some())
            .field("request_count", &self.counter.get())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`]
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    version: Option<String>,
    api_token: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("has_api_token", &self.api_token.is_some())
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}

impl ClientBuilder {
    /// Override the service base URL (mainly for tests)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Request a specific API version instead of the default
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Attach an API token to every request
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Inject a transport instead of the default `reqwest`-backed one
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// When no token was set explicitly, `OPENCORPORATES_API_TOKEN` is
    /// consulted. Fails with a validation error if the base URL does not
    /// parse.
    pub fn build(self) -> Result<Client> {
        let raw = self.base_url.as_deref().unwrap_or(BASE_URL);
        let base = Url::parse(raw)
            .map_err(|e| Error::validation(format!("invalid base URL {raw:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::validation(format!(
                "base URL {raw:?} cannot carry path segments"
            )));
        }
        let api_token = self
            .api_token
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .filter(|token| !token.is_empty());

        Ok(Client {
            base,
            version: self.version.unwrap_or_else(|| API_VERSION.to_string()),
            api_token,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpTransport::new())),
            counter: RequestCounter::new(),
        })
    }
}

/// Map a status code onto success or a protocol error
///
/// Client errors (400-499) try the structured `{error:{message}}` envelope
/// and fall back to the status line; server errors (>=500) surface the
/// status line directly without touching the body.
fn classify(response: TransportResponse) -> Result<TransportResponse> {
    match response.status {
        status if status >= 500 => Err(Error::protocol(status, status_line(status))),
        status if status >= 400 => {
            let message = serde_json::from_str::<ErrorEnvelope>(&response.body)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| status_line(status));
            Err(Error::protocol(status, message))
        }
        _ => Ok(response),
    }
}

fn status_line(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| status.to_string(), |reason| format!("{status} {reason}"))
}

// ============================================================================
// Wire envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct LookupEnvelope {
    #[serde(default)]
    results: LookupResults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LookupResults {
    company: Company,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResults {
    companies: Vec<CompanyRecord>,
    page: usize,
    total_pages: usize,
    per_page: usize,
    total_count: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CompanyRecord {
    company: Company,
}
