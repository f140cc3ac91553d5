//
//  bitbucket-lite
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport for the Bitbucket API
//!
//! The [`Transport`] trait is the only way the client talks to the network:
//! an authenticated GET against an absolute URL, returning decoded JSON.
//! [`HttpTransport`] implements it on top of a blocking `reqwest` client.
//!
//! ## Features
//!
//! - Authentication header injection on every request
//! - Custom User-Agent header
//! - Optional request timeout
//! - Status and body-decoding errors kept apart in [`ApiError`]

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, trace};

use super::common::ApiError;
use crate::auth::AuthCredential;

/// Capability to perform an authenticated GET.
///
/// `query` is appended to `url` as a query string; an empty slice means the
/// URL is requested exactly as given.
pub trait Transport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, ApiError>;
}

/// Blocking HTTP transport backed by `reqwest`.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_lite::api::transport::{HttpTransport, Transport};
/// use bitbucket_lite::auth::AuthCredential;
///
/// let transport = HttpTransport::new(None)?
///     .with_auth(AuthCredential::api_token("me@acme.io", "token"));
///
/// let user = transport.get("https://api.bitbucket.org/2.0/user", &[])?;
/// println!("{}", user["display_name"]);
/// # Ok::<(), bitbucket_lite::api::ApiError>(())
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
    auth: Option<AuthCredential>,
}

impl HttpTransport {
    /// Creates an unauthenticated transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client could not be built
    /// (for example when no TLS backend is available).
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(format!("bbl/{}", crate::VERSION));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            auth: None,
        })
    }

    /// Sets the authentication credentials for this transport.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let mut request = self.http.get(url);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        debug!(url, ?query, "GET");
        let response = request.send()?;
        let status = response.status();
        trace!(url, %status, "response");

        let text = response.text()?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::MalformedBody {
            url: url.to_string(),
            source,
        })
    }
}
