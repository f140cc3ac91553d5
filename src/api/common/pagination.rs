//
//  bitbucket-lite
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Bitbucket Cloud list endpoints
//!
//! Bitbucket Cloud wraps every list response in an envelope:
//!
//! ```json
//! {
//!     "values": [ ... ],
//!     "page": 1,
//!     "pagelen": 10,
//!     "size": 25,
//!     "next": "https://api.bitbucket.org/2.0/repositories/acme?page=2"
//! }
//! ```
//!
//! Only `values` and `next` matter for walking a listing. `next` is absent on
//! the last page and, when present, already carries every query parameter of
//! the original request.
//!
//! [`Paginator`] turns a chain of such pages into one lazy sequence of
//! [`Resource`]s. Pages are fetched on demand: nothing is requested when the
//! paginator is built, and page `n + 1` is only requested once every item of
//! page `n` has been handed out.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_lite::api::Bitbucket;
//! use bitbucket_lite::api::common::Filters;
//! use bitbucket_lite::auth::AuthCredential;
//!
//! let api = Bitbucket::http("acme", AuthCredential::api_token("me@acme.io", "token"))?;
//!
//! for branch in api.branches("widgets", Filters::new().with("sort", "-name"))? {
//!     println!("{}", branch?.name);
//! }
//! # Ok::<(), bitbucket_lite::api::ApiError>(())
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use super::{ApiError, Filters};
use crate::api::resource::Resource;
use crate::api::transport::Transport;

/// One decoded page of a Bitbucket Cloud listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Raw item records, in server order.
    pub values: VecDeque<Value>,

    /// Absolute URL of the next page; `None` on the last page.
    pub next: Option<String>,

    /// URL of the previous page, when reported. Informational only.
    pub previous: Option<String>,

    /// Current page number (1-indexed), when reported.
    pub page: Option<u64>,

    /// Requested page length, when reported.
    pub pagelen: Option<u64>,

    /// Total item count across all pages, when reported.
    pub size: Option<u64>,
}

impl Page {
    /// Validates and decodes a page envelope fetched from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedEnvelope`] when the body is not an object,
    /// `values` is missing or not an array, or `next` is neither `null` nor an
    /// absolute URL string.
    pub fn from_json(url: &str, body: Value) -> Result<Self, ApiError> {
        let malformed = |reason: &str| ApiError::MalformedEnvelope {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let Value::Object(mut envelope) = body else {
            return Err(malformed("expected a JSON object"));
        };

        let values = match envelope.remove("values") {
            Some(Value::Array(values)) => VecDeque::from(values),
            Some(_) => return Err(malformed("'values' is not an array")),
            None => return Err(malformed("missing 'values'")),
        };

        let next = match envelope.remove("next") {
            None | Some(Value::Null) => None,
            Some(Value::String(next)) => {
                Url::parse(&next)
                    .map_err(|e| malformed(&format!("'next' is not an absolute URL: {e}")))?;
                Some(next)
            }
            Some(_) => return Err(malformed("'next' is not a string")),
        };

        let number = |key: &str| envelope.get(key).and_then(Value::as_u64);
        let previous = envelope
            .get("previous")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            values,
            next,
            previous,
            page: number("page"),
            pagelen: number("pagelen"),
            size: number("size"),
        })
    }

    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL for the next page of results.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// Lazy, single-pass sequence over every item of a paginated listing.
///
/// The first request carries the [`Filters`] as its query string; every
/// follow-up request fetches the server's `next` URL verbatim. Only the
/// current page is held in memory.
///
/// Any error (transport, status, envelope or record decoding) is yielded once
/// and ends the sequence. A paginator cannot be restarted; ask the
/// [`Bitbucket`](crate::api::Bitbucket) facade for a fresh one instead.
///
/// Not meant to be shared between threads: it borrows a [`Transport`] and
/// mutates its cursor on every step.
pub struct Paginator<'a, R> {
    transport: &'a dyn Transport,
    pending: Option<String>,
    filters: Option<Filters>,
    buffer: VecDeque<Value>,
    pages_fetched: usize,
    finished: bool,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: DeserializeOwned> Paginator<'a, R> {
    /// Creates a paginator starting at `url`. Performs no I/O.
    pub fn new(transport: &'a dyn Transport, url: impl Into<String>, filters: Filters) -> Self {
        Self {
            transport,
            pending: Some(url.into()),
            filters: Some(filters),
            buffer: VecDeque::new(),
            pages_fetched: 0,
            finished: false,
            _record: PhantomData,
        }
    }

    /// Number of pages requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Produces the next item, `Ok(None)` at the end of the listing.
    ///
    /// # Errors
    ///
    /// Returns the error of the page fetch or record decode that failed.
    /// After an error every further call returns `Ok(None)`.
    pub fn try_next(&mut self) -> Result<Option<Resource<'a, R>>, ApiError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            if let Some(raw) = self.buffer.pop_front() {
                return match serde_json::from_value(raw) {
                    Ok(record) => Ok(Some(Resource::new(self.transport, record))),
                    Err(e) => {
                        self.finished = true;
                        Err(ApiError::InvalidRecord(e))
                    }
                };
            }

            let Some(url) = self.pending.take() else {
                trace!(pages = self.pages_fetched, "listing exhausted");
                self.finished = true;
                return Ok(None);
            };

            if let Err(e) = self.fetch_page(&url) {
                self.finished = true;
                return Err(e);
            }
        }
    }

    /// Drains the remaining items into a `Vec`, stopping at the first error.
    pub fn collect_all(self) -> Result<Vec<Resource<'a, R>>, ApiError> {
        self.collect()
    }

    fn fetch_page(&mut self, url: &str) -> Result<(), ApiError> {
        // Filters only go on the first request; `next` already embeds them.
        let query = self
            .filters
            .take()
            .map(|filters| filters.to_query())
            .unwrap_or_default();

        debug!(url, ?query, page = self.pages_fetched + 1, "fetching page");

        let body = self.transport.get(url, &query)?;
        self.pages_fetched += 1;
        let page = Page::from_json(url, body)?;

        if page.values.is_empty() && page.has_next() {
            warn!(url, "empty page with a next link, following it");
        }

        self.pending = page.next;
        self.buffer = page.values;
        Ok(())
    }
}

impl<'a, R: DeserializeOwned> Iterator for Paginator<'a, R> {
    type Item = Result<Resource<'a, R>, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

impl<'a, R: DeserializeOwned> FusedIterator for Paginator<'a, R> {}

impl<R> std::fmt::Debug for Paginator<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("pending", &self.pending)
            .field("buffered", &self.buffer.len())
            .field("pages_fetched", &self.pages_fetched)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{page, StubTransport};
    use serde::Deserialize;
    use serde_json::json;

    const BASE: &str = "https://api.bitbucket.org/2.0/repositories/acme/widgets";

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn names(paginator: Paginator<'_, Named>) -> Vec<String> {
        paginator.map(|item| item.unwrap().into_inner().name).collect()
    }

    #[test]
    fn test_page_envelope() {
        let page = Page::from_json(
            BASE,
            json!({
                "values": [{"name": "a"}],
                "page": 1,
                "pagelen": 10,
                "size": 29,
                "next": format!("{BASE}/refs/branches?page=2"),
                "previous": null
            }),
        )
        .unwrap();

        assert_eq!(page.values.len(), 1);
        assert_eq!(page.next_url(), Some(format!("{BASE}/refs/branches?page=2").as_str()));
        assert_eq!((page.page, page.pagelen, page.size), (Some(1), Some(10), Some(29)));
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_page_null_next_is_last_page() {
        let page = Page::from_json(BASE, json!({"values": [], "next": null})).unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_rejects_bad_envelopes() {
        for body in [
            json!({"next": format!("{BASE}?page=2")}),
            json!({"values": {"name": "a"}}),
            json!({"values": [], "next": "/relative?page=2"}),
            json!({"values": [], "next": 2}),
            json!([{"name": "a"}]),
        ] {
            assert!(matches!(
                Page::from_json(BASE, body),
                Err(ApiError::MalformedEnvelope { .. })
            ));
        }
    }

    #[test]
    fn test_yields_concatenation_of_all_pages() {
        let stub = StubTransport::new()
            .with_page(page(
                json!([{"name": "1"}, {"name": "2"}]),
                Some(&format!("{BASE}/refs/branches?page=2")),
            ))
            .with_page(page(
                json!([{"name": "3"}, {"name": "4"}]),
                Some(&format!("{BASE}/refs/branches?page=3")),
            ))
            .with_page(page(json!([{"name": "5"}]), None));

        let paginator = Paginator::<Named>::new(&stub, format!("{BASE}/refs/branches"), Filters::new());

        assert_eq!(names(paginator), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            stub.urls(),
            vec![
                format!("{BASE}/refs/branches"),
                format!("{BASE}/refs/branches?page=2"),
                format!("{BASE}/refs/branches?page=3"),
            ]
        );
    }

    #[test]
    fn test_single_page_fetched_once() {
        let stub = StubTransport::new().with_page(page(json!([{"name": "only"}]), None));
        let mut paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());

        assert_eq!(paginator.next().unwrap().unwrap().name, "only");
        assert!(paginator.next().is_none());
        assert!(paginator.next().is_none());
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_filters_only_on_first_request() {
        let next = format!("{BASE}/pipelines/?page=2&pagelen=20&sort=-created_on");
        let stub = StubTransport::new()
            .with_page(page(json!([{"name": "a"}]), Some(&next)))
            .with_page(page(json!([{"name": "b"}]), None));

        let filters = Filters::new().with("sort", "-created_on").with("pagelen", 20);
        let paginator = Paginator::<Named>::new(&stub, format!("{BASE}/pipelines/"), filters);
        assert_eq!(names(paginator), vec!["a", "b"]);

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].query,
            vec![
                ("pagelen".to_string(), "20".to_string()),
                ("sort".to_string(), "-created_on".to_string()),
            ]
        );
        assert_eq!(calls[1].url, next);
        assert!(calls[1].query.is_empty());
    }

    #[test]
    fn test_is_lazy() {
        let stub = StubTransport::new()
            .with_page(page(
                json!([{"name": "1"}, {"name": "2"}, {"name": "3"}]),
                Some(&format!("{BASE}?page=2")),
            ))
            .with_page(page(json!([{"name": "4"}]), None));

        let mut paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());
        assert_eq!(stub.call_count(), 0);

        paginator.next().unwrap().unwrap();
        assert_eq!(stub.call_count(), 1);

        paginator.next().unwrap().unwrap();
        paginator.next().unwrap().unwrap();
        assert_eq!(stub.call_count(), 1);

        assert_eq!(paginator.next().unwrap().unwrap().name, "4");
        assert_eq!(stub.call_count(), 2);
        assert_eq!(paginator.pages_fetched(), 2);
    }

    #[test]
    fn test_empty_pages_with_next_are_followed() {
        let stub = StubTransport::new()
            .with_page(page(json!([]), Some(&format!("{BASE}?page=2"))))
            .with_page(page(json!([]), Some(&format!("{BASE}?page=3"))))
            .with_page(page(json!([{"name": "late"}]), None));

        let paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());
        assert_eq!(names(paginator), vec!["late"]);
        assert_eq!(stub.call_count(), 3);
    }

    #[test]
    fn test_missing_values_is_an_error_not_the_end() {
        let stub = StubTransport::new()
            .with_page(page(json!([{"name": "1"}]), Some(&format!("{BASE}?page=2"))))
            .with_page(json!({"page": 2, "pagelen": 1}));

        let mut paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());
        assert!(paginator.next().unwrap().is_ok());
        assert!(matches!(
            paginator.next(),
            Some(Err(ApiError::MalformedEnvelope { ref url, .. })) if url == &format!("{BASE}?page=2")
        ));
        assert!(paginator.next().is_none());
        assert_eq!(stub.call_count(), 2);
    }

    #[test]
    fn test_transport_error_surfaces_at_fetch_point() {
        let stub = StubTransport::new()
            .with_page(page(json!([{"name": "1"}]), Some(&format!("{BASE}?page=2"))))
            .with_error(ApiError::Status { status: 502, body: "bad gateway".into() });

        let mut paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());
        assert_eq!(paginator.next().unwrap().unwrap().name, "1");
        let err = paginator.next().unwrap().unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(paginator.next().is_none());
    }

    #[test]
    fn test_undecodable_record_ends_sequence() {
        let stub = StubTransport::new().with_page(page(json!([{"title": "no name"}, {"name": "x"}]), None));
        let mut paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());

        assert!(matches!(paginator.next(), Some(Err(ApiError::InvalidRecord(_)))));
        assert!(paginator.next().is_none());
    }

    #[test]
    fn test_collect_all_stops_at_first_error() {
        let stub = StubTransport::new()
            .with_page(page(json!([{"name": "1"}]), Some(&format!("{BASE}?page=2"))))
            .with_page(json!({"values": "nope"}));

        let paginator = Paginator::<Named>::new(&stub, BASE, Filters::new());
        assert!(paginator.collect_all().is_err());
    }
}
