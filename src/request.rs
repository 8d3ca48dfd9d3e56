//! Request types and URL construction
//!
//! One tagged request struct per query kind, so the two query shapes cannot
//! be confused at the call site. URL assembly goes through the `url` crate,
//! which escapes path segments and query values for us. Lookup requests are
//! validated here, before any network call happens.

use crate::error::{Error, Result};
use url::Url;

/// Fixed sort order for search results; the API ranks by relevance score
const ORDER: &str = "score";

/// A search for companies by name, optionally narrowed to a jurisdiction
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub(crate) query: String,
    pub(crate) jurisdiction: Option<String>,
    pub(crate) single_page: bool,
}

impl SearchRequest {
    /// Search for companies matching the given name
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            jurisdiction: None,
            single_page: false,
        }
    }

    /// Restrict the search to one jurisdiction code, e.g. `"fr"`
    #[must_use]
    pub fn jurisdiction(mut self, code: impl Into<String>) -> Self {
        self.jurisdiction = Some(code.into());
        self
    }

    /// Bound the iteration to a single page fetch
    ///
    /// After the first page is consumed the iterator terminates instead of
    /// requesting the next page. Useful for fixed-result queries where one
    /// call is known to cover everything.
    #[must_use]
    pub fn single_page(mut self) -> Self {
        self.single_page = true;
        self
    }
}

/// A single-company lookup by registry number and jurisdiction
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub(crate) number: String,
    pub(crate) jurisdiction: String,
}

impl LookupRequest {
    /// Look up the company with this registry number in this jurisdiction
    pub fn new(number: impl Into<String>, jurisdiction: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            jurisdiction: jurisdiction.into(),
        }
    }

    /// Reject malformed requests before any network call
    fn validate(&self) -> Result<()> {
        if self.number.parse::<i64>().is_err() {
            return Err(Error::validation(format!(
                "company number must be an integer, got {:?}",
                self.number
            )));
        }
        if self.jurisdiction.is_empty() {
            return Err(Error::validation("missing jurisdiction code"));
        }
        Ok(())
    }
}

/// Build the URL for one page of a company search
pub(crate) fn search_url(
    base: &Url,
    version: &str,
    token: Option<&str>,
    request: &SearchRequest,
    page: usize,
) -> Result<String> {
    let mut url = versioned(base, version)?;
    url.path_segments_mut()
        .map_err(|_| Error::validation("base URL cannot be a base"))?
        .extend(["companies", "search"]);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", &request.query);
        if let Some(code) = &request.jurisdiction {
            pairs.append_pair("jurisdiction_code", code);
        }
        pairs.append_pair("page", &page.to_string());
        pairs.append_pair("order", ORDER);
    }
    append_token(&mut url, token);
    Ok(url.into())
}

/// Build the URL for a single-company lookup
pub(crate) fn lookup_url(
    base: &Url,
    version: &str,
    token: Option<&str>,
    request: &LookupRequest,
) -> Result<String> {
    request.validate()?;
    let mut url = versioned(base, version)?;
    url.path_segments_mut()
        .map_err(|_| Error::validation("base URL cannot be a base"))?
        .extend(["companies", request.jurisdiction.as_str(), request.number.as_str()]);
    url.query_pairs_mut().append_pair("sparse", "true");
    append_token(&mut url, token);
    Ok(url.into())
}

fn versioned(base: &Url, version: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::validation("base URL cannot be a base"))?
        .pop_if_empty()
        .push(&format!("v{version}"));
    Ok(url)
}

fn append_token(url: &mut Url, token: Option<&str>) {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair("api_token", token);
    }
}
