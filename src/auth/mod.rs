//
//  bitbucket-lite
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials attached to every request the client makes, including the
//! follow-up requests of a paginated listing.
//!
//! ## Supported Authentication Methods
//!
//! - **API token**: HTTP Basic with the Atlassian account e-mail and an API
//!   token (app passwords work the same way with a username).
//! - **Access token**: Bearer authentication with a repository, project or
//!   workspace access token.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_lite::auth::AuthCredential;
//!
//! let credential = AuthCredential::api_token("me@acme.io", "ATATT3x...");
//! assert_eq!(credential.username(), Some("me@acme.io"));
//! ```

use std::fmt;

use reqwest::blocking::RequestBuilder;

/// Represents the credentials used to talk to Bitbucket Cloud.
///
/// # Variants
///
/// - `Basic`: HTTP Basic authentication with a username or e-mail and an API
///   token or app password.
/// - `AccessToken`: Bearer token authentication.
///
/// # Notes
///
/// The `Debug` output never includes the secret.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Basic HTTP authentication.
    Basic {
        /// The Atlassian account e-mail or Bitbucket username.
        username: String,
        /// The API token or app password.
        password: String,
    },
    /// Bearer authentication with an access token.
    AccessToken {
        /// The access token string.
        token: String,
    },
}

impl AuthCredential {
    /// Basic credentials from an account e-mail and an API token.
    pub fn api_token(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Basic {
            username: email.into(),
            password: token.into(),
        }
    }

    /// Bearer credentials from an access token.
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken {
            token: token.into(),
        }
    }

    /// Picks the credential kind from what the user supplied.
    ///
    /// A token together with a username means Basic authentication, a token
    /// alone means an access token, and no token means anonymous access.
    pub fn from_parts(username: Option<&str>, token: Option<&str>) -> Option<Self> {
        match (username, token) {
            (Some(username), Some(token)) => Some(Self::api_token(username, token)),
            (None, Some(token)) => Some(Self::access_token(token)),
            (_, None) => None,
        }
    }

    /// Applies the authentication credential to an HTTP request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::AccessToken { token } => request.bearer_auth(token),
        }
    }

    /// The username for Basic credentials.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username),
            Self::AccessToken { .. } => None,
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::AccessToken { .. } => f
                .debug_struct("AccessToken")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
