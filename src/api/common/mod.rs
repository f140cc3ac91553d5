//
//  bitbucket-lite
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket Cloud client
//!
//! This module provides the types shared by every part of the API layer:
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Links`] - HATEOAS-style link representation
//! - [`UserRef`] - Lightweight user reference
//! - [`Filters`] - Query parameters passed through to list endpoints
//! - [`Page`] and [`Paginator`] - The paginated-envelope walker
//!
//! # Example
//!
//! ```rust
//! use bitbucket_lite::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod filters;
mod pagination;

pub use filters::*;
pub use pagination::*;

/// Unified error type for all Bitbucket API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Transport` | Network or connection failure |
/// | `Status` | Non-2xx response, with status code and raw body |
/// | `NotFound` | A single resource lookup returned 404 |
/// | `MalformedBody` | The response body was not valid JSON |
/// | `MalformedEnvelope` | A list page lacked `values` or carried a bad `next` |
/// | `InvalidRecord` | An item could not be decoded into its record type |
/// | `MissingLink` | A resource did not carry the link needed to follow it |
/// | `InvalidUrl` | An endpoint URL could not be built |
///
/// None of these are retried. Reaching the end of a paginated listing is not
/// an error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    ///
    /// The raw body is kept so callers can inspect it; the display form
    /// shows the message Bitbucket put in its error document when there is one.
    #[error("API error ({status}): {}", error_message(.body))]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded as JSON.
    #[error("Malformed response from {url}: {source}")]
    MalformedBody {
        /// URL that produced the body
        url: String,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },

    /// A list page did not follow the `{values, next}` envelope.
    #[error("Malformed page from {url}: {reason}")]
    MalformedEnvelope {
        /// URL of the page
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// An item inside a page could not be decoded.
    #[error("Could not decode record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    /// The resource does not carry the named link.
    #[error("Resource has no '{0}' link")]
    MissingLink(String),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parser message
        reason: String,
    },
}

impl ApiError {
    /// Returns the HTTP status code for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Maps a 404 status into [`ApiError::NotFound`] naming `what`.
    pub(crate) fn not_found_as(self, what: impl FnOnce() -> String) -> Self {
        match self {
            Self::Status { status: 404, .. } => Self::NotFound(what()),
            other => other,
        }
    }
}

/// Extracts a user-friendly message from a Bitbucket error body.
///
/// Bitbucket Cloud returns errors in the format:
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// Some endpoints use `error.detail` or a top-level `message` instead. When
/// none of these are present the raw body is returned.
pub fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidates = [
            json.get("error").and_then(|e| e.get("message")),
            json.get("error").and_then(|e| e.get("detail")),
            json.get("message"),
        ];

        if let Some(message) = candidates.into_iter().flatten().find_map(|m| m.as_str()) {
            return message.to_string();
        }
    }

    body.to_string()
}

/// The `links` object carried by every Bitbucket resource.
///
/// Keys are relation names (`self`, `html`, `commits`, `branches`, `tags`,
/// `pullrequests`, ...). Most values are a single `{"href": ...}` object; a few, such as
/// `clone`, are arrays, so values are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links(pub BTreeMap<String, Value>);

impl Links {
    /// Returns the `href` of the named relation, if present.
    pub fn href(&self, name: &str) -> Option<&str> {
        self.0.get(name)?.get("href")?.as_str()
    }

    /// Like [`href`](Self::href) but reports a missing relation as an error.
    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.href(name)
            .ok_or_else(|| ApiError::MissingLink(name.to_string()))
    }
}

/// Lightweight user reference.
///
/// | UserRef Field | Cloud API Field |
/// |---------------|-----------------|
/// | `account_id` | `account_id` |
/// | `uuid` | `uuid` |
/// | `name` | `display_name` |
/// | `username` | `nickname` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    /// Atlassian account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// UUID identifier for the user (with curly braces).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Display name of the user.
    #[serde(alias = "display_name")]
    pub name: String,

    /// Username or nickname of the user.
    #[serde(default, alias = "nickname", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
