//
//  bitbucket-lite
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Lite
//!
//! A read-only client library and CLI for the Bitbucket Cloud REST API v2.0.
//!
//! ## Overview
//!
//! Bitbucket returns every listing as a chain of pages linked by `next`
//! URLs. This crate hides that chain behind [`Paginator`](api::Paginator), a
//! lazy iterator that fetches one page at a time and only when the items
//! already handed out are used up. Records come back as typed
//! [`Resource`](api::resource::Resource)s that can follow their own links to
//! related resources (a repository's branches, a tag's commit, a pull
//! request's merge commit, ...).
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, pagination, resource model and the [`Bitbucket`](api::Bitbucket) facade
//! - [`auth`]: Credentials (API token or access token)
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`output`]: Table and JSON output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_lite::api::{Bitbucket, Filters};
//! use bitbucket_lite::auth::AuthCredential;
//!
//! let api = Bitbucket::http("acme", AuthCredential::api_token("me@acme.io", "token"))?;
//!
//! // Stops after the page holding the fifth branch.
//! for branch in api.branches("widgets", Filters::new())?.take(5) {
//!     println!("{}", branch?.name);
//! }
//! # Ok::<(), bitbucket_lite::api::ApiError>(())
//! ```

/// Bitbucket Cloud API client.
///
/// Listings are lazy and single-pass; single resources are fetched eagerly.
pub mod api;

/// Authentication credentials.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/bbl/config.toml`
/// - macOS: `~/Library/Application Support/bbl/config.toml`
/// - Windows: `%APPDATA%\bbl\config.toml`
pub mod config;

/// Output formatting (tables and JSON).
pub mod output;

pub use cli::Cli;
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for completions and configuration paths.
pub const APP_NAME: &str = "bbl";

/// Application version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes allowing scripts to detect the outcome of a
/// command.
///
/// ```rust,no_run
/// use bitbucket_lite::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::NOT_FOUND);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments (reported by clap).
    pub const USAGE: i32 = 2;

    /// Authentication required or failed (HTTP 401 or 403).
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested repository, tag, ... does not exist or is not visible
    /// with the current credentials.
    pub const NOT_FOUND: i32 = 8;
}
