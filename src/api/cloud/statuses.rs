//
//  bitbucket-lite
//  api/cloud/statuses.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build statuses reported against commits by CI systems.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::resource::Resource;

/// A build status bound to the transport that fetched it.
pub type BuildStatus<'a> = Resource<'a, BuildStatusRecord>;

/// One build status under `commit/{hash}/statuses`.
///
/// # Fields
///
/// * `key` - Identifier of the build within the CI system
/// * `state` - `SUCCESSFUL`, `FAILED`, `INPROGRESS` or `STOPPED`
/// * `url` - Link to the build in the CI system
/// * `refname` - Branch or tag the build ran for, when reported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStatusRecord {
    pub key: String,

    pub state: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
