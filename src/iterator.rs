//! Lazy company iteration
//!
//! A [`CompanyIterator`] pulls companies one at a time, fetching pages on
//! demand: a page is requested only when the buffered one is consumed. The
//! end of the result set is signaled with the [`Error::EndOfSequence`]
//! sentinel, and any terminal state (exhaustion or a hard failure) is
//! sticky: every later call returns the same signal without touching the
//! network again.

use crate::client::Client;
use crate::company::Company;
use crate::error::{Error, Result};
use crate::pager::{Pageable, Pager};
use crate::request::SearchRequest;
use futures::Stream;

/// Iterates over the companies matching a search request
///
/// Created by [`Client::search`]. Not restartable: once terminal, it stays
/// terminal. Progress is visible through [`CompanyIterator::info`] at any
/// point without advancing iteration.
#[derive(Debug)]
pub struct CompanyIterator {
    client: Client,
    request: SearchRequest,
    pager: Pager,
    buffer: Vec<Company>,
    error: Option<Error>,
}

impl CompanyIterator {
    pub(crate) fn new(client: Client, request: SearchRequest) -> Self {
        let mut pager = Pager::new(1);
        pager.set_single(request.single_page);
        Self {
            client,
            request,
            pager,
            buffer: Vec::new(),
            error: None,
        }
    }

    /// Return the next company, fetching the next page if needed
    ///
    /// Ends with [`Error::EndOfSequence`] once the result set is consumed;
    /// after that (or after any hard error) the same signal is returned on
    /// every call.
    pub async fn next(&mut self) -> Result<Company> {
        if self.pager.buffer_consumed() && self.error.is_none() {
            if !self.pager.is_single() || self.pager.position() == 0 {
                if self.pager.position() > 0 {
                    // the very first fetch stays on the starting page
                    self.pager.next_page();
                }
                match self
                    .client
                    .fetch_page(&self.request, self.pager.current_page())
                    .await
                {
                    Ok((buffer, info)) => {
                        self.buffer = buffer;
                        self.pager.absorb(info);
                    }
                    Err(err) => self.error = Some(err),
                }
            } else {
                // single-page mode: a second exhaustion terminates instead
                // of fetching again
                self.pager.terminate();
            }
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.pager.remaining() == 0 {
            self.error = Some(Error::EndOfSequence);
            return Err(Error::EndOfSequence);
        }
        let company = self.buffer[self.pager.position()].clone();
        self.pager.advance();
        Ok(company)
    }

    /// Pagination statistics for the result set
    pub fn info(&self) -> &Pager {
        &self.pager
    }

    /// Adapt the iterator into a stream of companies
    ///
    /// The stream ends at the end-of-sequence sentinel; a hard error is
    /// yielded once and then the stream ends.
    pub fn into_stream(self) -> impl Stream<Item = Result<Company>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            match iter.next().await {
                Err(Error::EndOfSequence) => None,
                Err(err) => Some((Err(err), None)),
                Ok(company) => Some((Ok(company), Some(iter))),
            }
        })
    }
}

impl Pageable for CompanyIterator {
    fn info(&self) -> &Pager {
        &self.pager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Transport, TransportResponse};
    use crate::request::LookupRequest;
    use async_trait::async_trait;
    use futures::StreamExt;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Serves a scripted sequence of responses, one per GET
    struct StubTransport {
        responses: Mutex<VecDeque<TransportResponse>>,
    }

    impl StubTransport {
        fn new(responses: impl IntoIterator<Item = TransportResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().collect()),
            })
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(&self, _url: &str) -> Result<TransportResponse> {
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request"))
        }
    }

    fn ok(body: Value) -> TransportResponse {
        TransportResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    fn company(name: &str, number: &str) -> Value {
        json!({"company": {"name": name, "company_number": number}})
    }

    fn page(companies: Vec<Value>, page: usize, total_pages: usize, per_page: usize, total: usize) -> Value {
        json!({"results": {
            "companies": companies,
            "page": page,
            "total_pages": total_pages,
            "per_page": per_page,
            "total_count": total,
        }})
    }

    fn client(transport: Arc<dyn Transport>) -> Client {
        Client::builder().transport(transport).build().unwrap()
    }

    #[tokio::test]
    async fn test_iterates_across_pages_in_order() {
        let transport = StubTransport::new([
            ok(page(
                vec![company("ALPHA", "1"), company("BETA", "2")],
                1,
                2,
                2,
                3,
            )),
            ok(page(vec![company("GAMMA", "3")], 2, 2, 2, 3)),
        ]);
        let client = client(transport);
        let mut iter = client.search(SearchRequest::new("a"));

        let names: Vec<String> = [
            iter.next().await.unwrap(),
            iter.next().await.unwrap(),
            iter.next().await.unwrap(),
        ]
        .into_iter()
        .map(|c| c.name)
        .collect();
        assert_eq!(names, ["ALPHA", "BETA", "GAMMA"]);

        assert_eq!(iter.next().await.unwrap_err(), Error::EndOfSequence);
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_remaining_is_monotonic_and_hits_zero_at_the_sentinel() {
        let transport = StubTransport::new([
            ok(page(
                vec![company("ALPHA", "1"), company("BETA", "2")],
                1,
                2,
                2,
                3,
            )),
            ok(page(vec![company("GAMMA", "3")], 2, 2, 2, 3)),
        ]);
        let mut iter = client(transport).search(SearchRequest::new("a"));

        let mut last = usize::MAX;
        for _ in 0..3 {
            iter.next().await.unwrap();
            let remaining = iter.info().remaining();
            assert!(remaining < last);
            last = remaining;
        }
        assert_eq!(iter.next().await.unwrap_err(), Error::EndOfSequence);
        assert_eq!(iter.info().remaining(), 0);
    }

    #[tokio::test]
    async fn test_sentinel_is_idempotent() {
        let transport = StubTransport::new([ok(page(
            vec![company("ALPHA", "1")],
            1,
            1,
            30,
            1,
        ))]);
        let client = client(transport);
        let mut iter = client.search(SearchRequest::new("alpha"));

        iter.next().await.unwrap();
        for _ in 0..4 {
            assert_eq!(iter.next().await.unwrap_err(), Error::EndOfSequence);
        }
        // terminal state never re-issues a fetch
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_single_page_mode_stops_after_one_fetch() {
        // full page, more results available server-side
        let transport = StubTransport::new([ok(page(
            vec![company("ALPHA", "1"), company("BETA", "2")],
            1,
            2,
            2,
            4,
        ))]);
        let client = client(transport);
        let mut iter = client.search(SearchRequest::new("a").single_page());

        iter.next().await.unwrap();
        iter.next().await.unwrap();
        assert_eq!(iter.next().await.unwrap_err(), Error::EndOfSequence);
        assert_eq!(iter.next().await.unwrap_err(), Error::EndOfSequence);
        assert_eq!(iter.info().current_page(), 0);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_hard_error_is_sticky() {
        let transport = StubTransport::new([
            ok(page(
                vec![company("ALPHA", "1"), company("BETA", "2")],
                1,
                2,
                2,
                4,
            )),
            TransportResponse {
                status: 500,
                body: String::new(),
            },
        ]);
        let client = client(transport);
        let mut iter = client.search(SearchRequest::new("a"));

        iter.next().await.unwrap();
        iter.next().await.unwrap();
        let err = iter.next().await.unwrap_err();
        assert_eq!(err, Error::protocol(500, "500 Internal Server Error"));
        // same failure on every later call, with no further fetch
        assert_eq!(iter.next().await.unwrap_err(), err);
        assert_eq!(iter.next().await.unwrap_err(), err);
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_set() {
        let transport = StubTransport::new([ok(page(vec![], 1, 0, 30, 0))]);
        let client = client(transport);
        let mut iter = client.search(SearchRequest::new("nothing"));

        assert_eq!(iter.next().await.unwrap_err(), Error::EndOfSequence);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_record_with_missing_container_is_zero_valued() {
        let transport = StubTransport::new([ok(page(
            vec![company("ALPHA", "1"), json!({})],
            1,
            1,
            2,
            2,
        ))]);
        let mut iter = client(transport).search(SearchRequest::new("a"));

        assert_eq!(iter.next().await.unwrap().name, "ALPHA");
        assert_eq!(iter.next().await.unwrap(), Company::default());
    }

    #[tokio::test]
    async fn test_into_stream_collects_until_sentinel() {
        let transport = StubTransport::new([
            ok(page(
                vec![company("ALPHA", "1"), company("BETA", "2")],
                1,
                2,
                2,
                3,
            )),
            ok(page(vec![company("GAMMA", "3")], 2, 2, 2, 3)),
        ]);
        let iter = client(transport).search(SearchRequest::new("a"));

        let companies: Vec<Result<Company>> = iter.into_stream().collect().await;
        assert_eq!(companies.len(), 3);
        assert!(companies.iter().all(|c| c.is_ok()));
    }

    #[tokio::test]
    async fn test_into_stream_ends_after_hard_error() {
        let transport = StubTransport::new([TransportResponse {
            status: 502,
            body: String::new(),
        }]);
        let iter = client(transport).search(SearchRequest::new("a"));

        let items: Vec<Result<Company>> = iter.into_stream().collect().await;
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].clone().unwrap_err(),
            Error::protocol(502, "502 Bad Gateway")
        );
    }

    #[tokio::test]
    async fn test_validation_failure_does_not_touch_the_counter() {
        let transport = StubTransport::new([]);
        let client = client(transport);

        let err = client
            .lookup(&LookupRequest::new("abc", "fr"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(client.request_count(), 0);
    }
}
