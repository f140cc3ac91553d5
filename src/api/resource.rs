//
//  bitbucket-lite
//  api/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed wrapper around one Bitbucket record.
//!
//! A [`Resource`] pairs a decoded record (a repository, branch, commit, tag,
//! pipeline or pull request) with a borrowed [`Transport`], so that related
//! resources can be fetched from the record's links. The record never owns the
//! transport; the [`Bitbucket`](super::Bitbucket) facade does.

use std::fmt;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use tracing::debug;
use url::Url;

use super::common::{ApiError, Filters, Paginator};
use super::transport::Transport;

/// A decoded record bound to the transport that produced it.
///
/// Dereferences to the record, so its fields read directly:
///
/// ```rust,no_run
/// # use bitbucket_lite::api::Bitbucket;
/// # use bitbucket_lite::auth::AuthCredential;
/// let api = Bitbucket::http("acme", AuthCredential::access_token("token"))?;
/// let repo = api.repository("widgets")?;
/// println!("{} ({})", repo.full_name, repo.is_private);
/// # Ok::<(), bitbucket_lite::api::ApiError>(())
/// ```
pub struct Resource<'a, R> {
    transport: &'a dyn Transport,
    record: R,
}

impl<'a, R> Resource<'a, R> {
    pub fn new(transport: &'a dyn Transport, record: R) -> Self {
        Self { transport, record }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn into_inner(self) -> R {
        self.record
    }

    /// The transport used to resolve related resources.
    pub fn transport(&self) -> &'a dyn Transport {
        self.transport
    }

    /// Starts a listing at `url` on this resource's transport.
    pub(crate) fn paginate<T: DeserializeOwned>(&self, url: &str, filters: Filters) -> Paginator<'a, T> {
        Paginator::new(self.transport, url, filters)
    }

    /// Fetches a single related record at `url`.
    pub(crate) fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<Resource<'a, T>, ApiError> {
        fetch(self.transport, url)
    }

    pub(crate) fn replace(&mut self, record: R) {
        self.record = record;
    }
}

/// GETs `url` and decodes the body as a single record.
///
/// 404 responses are reported as [`ApiError::NotFound`].
pub(crate) fn fetch<'a, T: DeserializeOwned>(
    transport: &'a dyn Transport,
    url: &str,
) -> Result<Resource<'a, T>, ApiError> {
    debug!(url, "fetching resource");

    let body = transport
        .get(url, &[])
        .map_err(|e| e.not_found_as(|| url.to_string()))?;
    let record = serde_json::from_value(body).map_err(ApiError::InvalidRecord)?;

    Ok(Resource::new(transport, record))
}

/// Appends path segments to `base`, percent-encoding each one.
///
/// A trailing empty segment produces a trailing slash.
pub(crate) fn join_url(base: &str, segments: &[&str]) -> Result<String, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url.into())
}

impl<R> Deref for Resource<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R: Clone> Clone for Resource<'_, R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport,
            record: self.record.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Resource<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.record.fmt(f)
    }
}

impl<R: Serialize> Serialize for Resource<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}
