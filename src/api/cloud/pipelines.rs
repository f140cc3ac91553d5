//
//  bitbucket-lite
//  api/cloud/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pipelines API types and data structures.
//!
//! # Pipeline Lifecycle
//!
//! ```text
//! PENDING -> IN_PROGRESS -> COMPLETED (SUCCESSFUL/FAILED/STOPPED)
//!                       \-> PAUSED -> IN_PROGRESS -> ...
//! ```
//!
//! # Filtering
//!
//! The pipelines endpoint understands filters such as `target.branch`,
//! `target.ref_type` and `sort`; they are passed through as given:
//!
//! ```rust,no_run
//! use bitbucket_lite::api::Bitbucket;
//! use bitbucket_lite::api::common::{Filters, SortOrder};
//! use bitbucket_lite::auth::AuthCredential;
//!
//! let api = Bitbucket::http("acme", AuthCredential::api_token("me@acme.io", "token"))?;
//! let filters = Filters::new()
//!     .with("target.branch", "main")
//!     .with("sort", SortOrder::descending("created_on"));
//!
//! let last_failure = api
//!     .pipelines("widgets", filters)?
//!     .find(|p| matches!(p, Ok(p) if p.result_name() == Some("FAILED")));
//! # Ok::<(), bitbucket_lite::api::ApiError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::repositories::CommitRef;
use crate::api::common::Links;
use crate::api::resource::Resource;

/// A pipeline run bound to the transport that fetched it.
pub type Pipeline<'a> = Resource<'a, PipelineRecord>;

/// Represents a Bitbucket Pipeline run.
///
/// # Fields
///
/// * `build_number` - Sequential number within the repository
/// * `state` - Current state of the pipeline
/// * `target` - What the pipeline ran against (branch, tag, commit)
/// * `created_on` - ISO 8601 timestamp of creation
/// * `completed_on` - ISO 8601 timestamp of completion (if finished)
/// * `duration_in_seconds` - Total runtime in seconds (if finished)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRecord {
    /// Sequential build number within the repository.
    pub build_number: u64,

    /// Unique identifier for this pipeline run (includes curly braces).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PipelineState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PipelineTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<u64>,

    #[serde(default)]
    pub links: Links,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PipelineRecord {
    /// State name, e.g. `IN_PROGRESS` or `COMPLETED`.
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.name.as_str())
    }

    /// Result name for completed runs, e.g. `SUCCESSFUL` or `FAILED`.
    pub fn result_name(&self) -> Option<&str> {
        self.state.as_ref()?.result.as_ref().map(|r| r.name.as_str())
    }

    /// Branch or tag name the pipeline ran for.
    pub fn ref_name(&self) -> Option<&str> {
        self.target.as_ref()?.ref_name.as_deref()
    }
}

/// The state of a pipeline execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub state_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PipelineResult>,
}

/// The result of a completed pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
}

/// What a pipeline ran against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitRef>,
}
