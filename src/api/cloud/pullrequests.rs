//
//  bitbucket-lite
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pull request API types.
//!
//! Pull requests are read-only here: they can be listed, looked up by id, and
//! their commits and merge commit followed.
//!
//! # Pull Request States
//!
//! | State | Description |
//! |-------|-------------|
//! | `OPEN` | Active and awaiting review/merge |
//! | `MERGED` | Merged into the destination branch |
//! | `DECLINED` | Closed without merging |
//! | `SUPERSEDED` | Replaced by another pull request |
//!
//! The listing endpoint only returns open pull requests unless a `state`
//! filter is given; [`PullrequestState`] converts into a filter value:
//!
//! ```rust
//! use bitbucket_lite::api::cloud::PullrequestState;
//! use bitbucket_lite::api::common::Filters;
//!
//! let filters = Filters::new().with("state", PullrequestState::Merged);
//! assert_eq!(filters.to_query(), vec![("state".to_string(), "MERGED".to_string())]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::repositories::{BranchRef, Commit, CommitRecord, CommitRef};
use crate::api::common::{ApiError, FilterValue, Filters, Links, Paginator, UserRef};
use crate::api::resource::Resource;

/// A pull request bound to the transport that fetched it.
pub type Pullrequest<'a> = Resource<'a, PullrequestRecord>;

/// The state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullrequestState {
    Open,
    Merged,
    Declined,
    Superseded,
}

impl PullrequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
            Self::Superseded => "SUPERSEDED",
        }
    }
}

impl fmt::Display for PullrequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullrequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            "DECLINED" => Ok(Self::Declined),
            "SUPERSEDED" => Ok(Self::Superseded),
            _ => Err(format!(
                "invalid state '{s}': expected open, merged, declined or superseded"
            )),
        }
    }
}

impl From<PullrequestState> for FilterValue {
    fn from(state: PullrequestState) -> Self {
        FilterValue::Text(state.as_str().to_string())
    }
}

/// One side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullrequestEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitRef>,
}

/// Represents a Bitbucket Cloud pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullrequestRecord {
    pub id: u64,

    pub title: String,

    pub state: PullrequestState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PullrequestEndpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PullrequestEndpoint>,

    /// Present once the pull request is merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_commit: Option<CommitRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,

    #[serde(default)]
    pub links: Links,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PullrequestRecord {
    pub fn source_branch(&self) -> Option<&str> {
        branch_name(self.source.as_ref())
    }

    pub fn destination_branch(&self) -> Option<&str> {
        branch_name(self.destination.as_ref())
    }
}

fn branch_name(endpoint: Option<&PullrequestEndpoint>) -> Option<&str> {
    endpoint?.branch.as_ref().map(|b| b.name.as_str())
}

impl<'a> Resource<'a, PullrequestRecord> {
    /// Lists the commits the pull request would bring in.
    pub fn commits(&self, filters: Filters) -> Result<Paginator<'a, CommitRecord>, ApiError> {
        Ok(self.paginate(self.links.require("commits")?, filters))
    }

    /// Fetches the merge commit, if the pull request has been merged.
    pub fn merge_commit(&self) -> Result<Option<Commit<'a>>, ApiError> {
        let Some(merge_commit) = self.record().merge_commit.as_ref() else {
            return Ok(None);
        };
        self.fetch(merge_commit.links.require("self")?).map(Some)
    }
}
