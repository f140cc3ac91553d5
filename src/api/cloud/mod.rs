//
//  bitbucket-lite
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 resource model.
//!
//! Every resource comes in two halves: a serde record (`RepositoryRecord`,
//! `BranchRecord`, ...) holding the attributes, and a
//! [`Resource`](crate::api::resource::Resource) alias (`Repository`,
//! `Branch`, ...) that binds the record to a transport and adds the
//! operations that follow its links.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repositories, branches, commits and tags
//! - [`pullrequests`] - Pull requests (read-only)
//! - [`pipelines`] - Pipeline runs
//! - [`statuses`] - Commit build statuses
//!
//! # Notes
//!
//! - Timestamps are ISO 8601; commit dates are parsed with `chrono`
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Attributes without a typed field are kept in each record's `extra` map

pub mod pipelines;
pub mod pullrequests;
pub mod repositories;
pub mod statuses;

pub use pipelines::*;
pub use pullrequests::*;
pub use repositories::*;
pub use statuses::*;
