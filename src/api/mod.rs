//
//  bitbucket-lite
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Read-only client for the Bitbucket Cloud REST API v2.0.
//!
//! ## Architecture
//!
//! - [`transport`]: The [`Transport`](transport::Transport) trait and its blocking HTTP implementation
//! - [`common`]: Shared types (errors, links, filters, pagination)
//! - [`resource`]: The [`Resource`](resource::Resource) wrapper binding a record to a transport
//! - [`cloud`]: Typed records and their link-following operations
//! - [`client`]: The [`Bitbucket`] facade building endpoint URLs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_lite::api::{Bitbucket, Filters};
//! use bitbucket_lite::auth::AuthCredential;
//!
//! let api = Bitbucket::http("acme", AuthCredential::api_token("me@acme.io", "token"))?;
//!
//! let repo = api.repository("widgets")?;
//! for branch in repo.branches(Filters::new())? {
//!     println!("{}", branch?.name);
//! }
//! # Ok::<(), bitbucket_lite::api::ApiError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. Listings yield their errors as items,
//! at the point the failing page would have been fetched.

/// The [`Bitbucket`] facade.
pub mod client;

/// Bitbucket Cloud records and their operations.
pub mod cloud;

/// Shared types: [`ApiError`], [`Filters`], [`Paginator`], links.
pub mod common;

pub mod resource;

/// The request capability used by every resource.
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Bitbucket;
pub use common::{ApiError, Filters, Paginator};
