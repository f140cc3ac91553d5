//
//  bitbucket-lite
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository API types: repositories, branches, commits and tags.
//!
//! # Overview
//!
//! Repositories are the core resource in Bitbucket. Each record keeps the
//! attributes the client knows about as typed fields and everything else in
//! an `extra` attribute bag, so nothing the server sends is lost.
//!
//! Related resources are followed through the record's `links`, the same way
//! the Bitbucket web API expects clients to navigate:
//!
//! ```rust,no_run
//! use bitbucket_lite::api::Bitbucket;
//! use bitbucket_lite::api::cloud::CommitQuery;
//! use bitbucket_lite::api::common::Filters;
//! use bitbucket_lite::auth::AuthCredential;
//!
//! let api = Bitbucket::http("acme", AuthCredential::api_token("me@acme.io", "token"))?;
//! let repo = api.repository("widgets")?;
//!
//! for branch in repo.branches(Filters::new())? {
//!     let branch = branch?;
//!     let ahead = branch
//!         .commits(CommitQuery::new().exclude("main").pagelen(50))?
//!         .count();
//!     println!("{}: {} commits not on main", branch.name, ahead);
//! }
//! # Ok::<(), bitbucket_lite::api::ApiError>(())
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::pullrequests::{Pullrequest, PullrequestRecord};
use super::statuses::BuildStatusRecord;
use crate::api::common::{ApiError, FilterValue, Filters, Links, Paginator, UserRef};
use crate::api::resource::{join_url, Resource};

/// A repository bound to the transport that fetched it.
pub type Repository<'a> = Resource<'a, RepositoryRecord>;

/// A branch bound to the transport that fetched it.
pub type Branch<'a> = Resource<'a, BranchRecord>;

/// A commit bound to the transport that fetched it.
pub type Commit<'a> = Resource<'a, CommitRecord>;

/// A tag bound to the transport that fetched it.
pub type Tag<'a> = Resource<'a, TagRecord>;

/// Represents a Bitbucket Cloud repository.
///
/// # Fields
///
/// * `uuid` - Unique identifier for the repository (includes curly braces)
/// * `name` - Human-readable name of the repository
/// * `full_name` - Full path in format `{workspace_slug}/{repo_slug}`
/// * `slug` - URL-safe identifier derived from the name
/// * `mainbranch` - Reference to the main/default branch
/// * `links` - Navigation links (`branches`, `commits`, `tags`, `pullrequests`, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    pub name: String,

    #[serde(default)]
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mainbranch: Option<BranchRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,

    #[serde(default)]
    pub links: Links,

    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A branch name reference, as embedded in repositories and pull requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
}

/// A commit reference embedded in another resource (branch head, tag
/// target, parent, merge commit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    pub hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub links: Links,
}

impl CommitRef {
    /// First 12 characters of the hash.
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }
}

/// A branch under `refs/branches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRecord {
    pub name: String,

    /// The commit the branch points at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<CommitRef>,

    #[serde(default)]
    pub links: Links,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The author of a commit: the raw `Name <email>` string and, when Bitbucket
/// could map it, the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub raw: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
}

impl CommitAuthor {
    /// Account display name if known, otherwise the raw author string.
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or(self.raw.as_str(), |u| u.name.as_str())
    }
}

/// A commit as returned by the `commits` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,

    pub date: DateTime<FixedOffset>,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,

    #[serde(default)]
    pub parents: Vec<CommitRef>,

    #[serde(default)]
    pub links: Links,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommitRecord {
    /// First 12 characters of the hash.
    pub fn short_hash(&self) -> &str {
        short_hash(&self.hash)
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// A tag under `refs/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,

    /// Annotation message, for annotated tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<CommitRef>,

    #[serde(default)]
    pub links: Links,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for listing the commits of a branch.
///
/// `exclude` drops commits reachable from another branch (the usual "what is
/// on my branch but not on main" question); `pagelen` sets the page size.
/// Anything else goes through `filters` unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitQuery {
    pub exclude: Option<String>,
    pub pagelen: Option<u32>,
    pub filters: Filters,
}

impl CommitQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, branch: impl Into<String>) -> Self {
        self.exclude = Some(branch.into());
        self
    }

    pub fn pagelen(mut self, pagelen: u32) -> Self {
        self.pagelen = Some(pagelen);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key, value);
        self
    }

    pub fn into_filters(self) -> Filters {
        let mut filters = self.filters;
        if let Some(exclude) = self.exclude {
            filters.insert("exclude", exclude);
        }
        if let Some(pagelen) = self.pagelen {
            filters.insert("pagelen", pagelen);
        }
        filters
    }
}

impl<'a> Resource<'a, RepositoryRecord> {
    /// Lists the repository's branches.
    pub fn branches(&self, filters: Filters) -> Result<Paginator<'a, BranchRecord>, ApiError> {
        Ok(self.paginate(self.links.require("branches")?, filters))
    }

    /// Lists the repository's commits, newest first.
    pub fn commits(&self, filters: Filters) -> Result<Paginator<'a, CommitRecord>, ApiError> {
        Ok(self.paginate(self.links.require("commits")?, filters))
    }

    /// Lists the repository's tags.
    pub fn tags(&self, filters: Filters) -> Result<Paginator<'a, TagRecord>, ApiError> {
        Ok(self.paginate(self.links.require("tags")?, filters))
    }

    /// Lists the repository's pull requests (open ones unless `state` is given).
    pub fn pullrequests(&self, filters: Filters) -> Result<Paginator<'a, PullrequestRecord>, ApiError> {
        Ok(self.paginate(self.links.require("pullrequests")?, filters))
    }

    /// Fetches a single branch by name.
    pub fn branch(&self, name: &str) -> Result<Branch<'a>, ApiError> {
        let url = join_url(self.links.require("branches")?, &[name])?;
        self.fetch(&url)
    }

    /// Finds a tag by name.
    ///
    /// Walks the tag listing and stops at the first match, so pages after
    /// the one holding the tag are never requested.
    pub fn tag(&self, name: &str) -> Result<Option<Tag<'a>>, ApiError> {
        find_tag(self.tags(Filters::new())?, name)
    }

    /// Fetches a single pull request by id.
    pub fn pullrequest(&self, id: u64) -> Result<Pullrequest<'a>, ApiError> {
        let url = join_url(self.links.require("pullrequests")?, &[&id.to_string()])?;
        self.fetch(&url)
    }

    /// Re-fetches the repository from its `self` link.
    pub fn refresh(&mut self) -> Result<(), ApiError> {
        let url = self.links.require("self")?.to_string();
        let fresh: Repository<'a> = self.fetch(&url)?;
        self.replace(fresh.into_inner());
        Ok(())
    }
}

impl<'a> Resource<'a, BranchRecord> {
    /// Lists the commits reachable from this branch.
    pub fn commits(&self, query: CommitQuery) -> Result<Paginator<'a, CommitRecord>, ApiError> {
        Ok(self.paginate(self.links.require("commits")?, query.into_filters()))
    }
}

impl<'a> Resource<'a, CommitRecord> {
    /// Lists the build statuses reported against this commit.
    pub fn statuses(&self, filters: Filters) -> Result<Paginator<'a, BuildStatusRecord>, ApiError> {
        Ok(self.paginate(self.links.require("statuses")?, filters))
    }
}

impl<'a> Resource<'a, TagRecord> {
    /// Lists the commits reachable from this tag.
    pub fn commits(&self, filters: Filters) -> Result<Paginator<'a, CommitRecord>, ApiError> {
        Ok(self.paginate(self.links.require("commits")?, filters))
    }

    /// Fetches the full commit the tag points at.
    pub fn target_commit(&self) -> Result<Commit<'a>, ApiError> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| ApiError::MissingLink("target".to_string()))?;
        self.fetch(target.links.require("self")?)
    }
}

/// Linear scan for the first tag called `name`.
pub(crate) fn find_tag<'a>(
    tags: Paginator<'a, TagRecord>,
    name: &str,
) -> Result<Option<Tag<'a>>, ApiError> {
    for tag in tags {
        let tag = tag?;
        if tag.name == name {
            return Ok(Some(tag));
        }
    }
    Ok(None)
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{page, StubTransport};
    use serde_json::json;

    const REPO: &str = "https://api.bitbucket.org/2.0/repositories/acme/widgets";

    fn repository_json() -> Value {
        json!({
            "uuid": "{8f1c5a2e-0000-4000-8000-000000000001}",
            "name": "Widgets",
            "full_name": "acme/widgets",
            "slug": "widgets",
            "is_private": true,
            "scm": "git",
            "mainbranch": {"name": "main", "type": "branch"},
            "links": {
                "self": {"href": REPO},
                "branches": {"href": format!("{REPO}/refs/branches")},
                "commits": {"href": format!("{REPO}/commits")},
                "tags": {"href": format!("{REPO}/refs/tags")},
                "pullrequests": {"href": format!("{REPO}/pullrequests")}
            }
        })
    }

    fn repository(stub: &StubTransport) -> Repository<'_> {
        Resource::new(stub, serde_json::from_value(repository_json()).unwrap())
    }

    fn tag_json(name: &str) -> Value {
        json!({
            "name": name,
            "target": {
                "hash": "1f2e3d4c5b6a79881f2e3d4c5b6a79881f2e3d4c",
                "links": {"self": {"href": format!("{REPO}/commit/1f2e3d4c5b6a")}}
            },
            "links": {"commits": {"href": format!("{REPO}/commits/{name}")}}
        })
    }

    fn commit_json(hash: &str, message: &str) -> Value {
        json!({
            "hash": hash,
            "date": "2021-12-28T12:14:51+00:00",
            "message": message,
            "author": {"raw": "Jane Doe <jane@acme.io>"},
            "links": {"statuses": {"href": format!("{REPO}/commit/{hash}/statuses")}}
        })
    }

    #[test]
    fn test_repository_keeps_unknown_attributes() {
        let record: RepositoryRecord = serde_json::from_value(repository_json()).unwrap();
        assert_eq!(record.full_name, "acme/widgets");
        assert_eq!(record.mainbranch.as_ref().unwrap().name, "main");
        assert_eq!(record.extra.get("scm"), Some(&json!("git")));

        let round = serde_json::to_value(&record).unwrap();
        assert_eq!(round["scm"], "git");
    }

    #[test]
    fn test_repository_listings_follow_links() {
        let stub = StubTransport::new()
            .with_page(page(json!([{"name": "main"}]), None))
            .with_page(page(json!([]), None));
        let repo = repository(&stub);

        let branches = repo.branches(Filters::new().with("sort", "-name")).unwrap();
        assert_eq!(stub.call_count(), 0);
        assert_eq!(branches.count(), 1);

        assert_eq!(repo.pullrequests(Filters::new()).unwrap().count(), 0);
        assert_eq!(
            stub.urls(),
            vec![format!("{REPO}/refs/branches"), format!("{REPO}/pullrequests")]
        );
        assert_eq!(stub.calls()[0].query, vec![("sort".to_string(), "-name".to_string())]);
    }

    #[test]
    fn test_missing_link_is_reported() {
        let stub = StubTransport::new();
        let record: RepositoryRecord = serde_json::from_value(json!({"name": "bare"})).unwrap();
        let repo = Resource::new(&stub, record);

        assert!(matches!(repo.tags(Filters::new()), Err(ApiError::MissingLink(ref l)) if l == "tags"));
    }

    #[test]
    fn test_branch_lookup_by_name() {
        let stub = StubTransport::new().with_page(json!({
            "name": "feature/login",
            "target": {"hash": "abc"},
            "links": {"commits": {"href": format!("{REPO}/commits/feature/login")}}
        }));
        let repo = repository(&stub);

        let branch = repo.branch("feature/login").unwrap();
        assert_eq!(branch.name, "feature/login");
        assert_eq!(stub.urls(), vec![format!("{REPO}/refs/branches/feature%2Flogin")]);
    }

    #[test]
    fn test_branch_lookup_not_found() {
        let stub = StubTransport::new().with_error(ApiError::Status {
            status: 404,
            body: String::new(),
        });
        let repo = repository(&stub);
        assert!(matches!(repo.branch("gone"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_branch_commits_pass_query_through() {
        let stub = StubTransport::new()
            .with_page(json!({
                "name": "feature-x",
                "links": {"commits": {"href": format!("{REPO}/commits/feature-x")}}
            }))
            .with_page(page(
                json!([commit_json("aaaaaaaaaaaaaaaa", "Add login\n\nDetails"), commit_json("bbbb", "Fix")]),
                None,
            ));
        let repo = repository(&stub);
        let branch = repo.branch("feature-x").unwrap();

        let commits: Vec<Commit<'_>> = branch
            .commits(CommitQuery::new().exclude("main").pagelen(2))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].summary(), "Add login");
        assert_eq!(commits[0].short_hash(), "aaaaaaaaaaaa");
        assert_eq!(commits[1].short_hash(), "bbbb");
        assert_eq!(commits[0].author.as_ref().unwrap().display_name(), "Jane Doe <jane@acme.io>");

        let call = &stub.calls()[1];
        assert_eq!(call.url, format!("{REPO}/commits/feature-x"));
        assert_eq!(
            call.query,
            vec![
                ("exclude".to_string(), "main".to_string()),
                ("pagelen".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_tag_lookup_stops_at_first_match() {
        let stub = StubTransport::new()
            .with_page(page(
                json!([tag_json("v1.0.0"), tag_json("v1.1.0")]),
                Some(&format!("{REPO}/refs/tags?page=2")),
            ))
            .with_page(page(json!([tag_json("v2.0.0")]), Some(&format!("{REPO}/refs/tags?page=3"))))
            .with_page(page(json!([tag_json("v3.0.0")]), None));
        let repo = repository(&stub);

        let tag = repo.tag("v1.1.0").unwrap().unwrap();
        assert_eq!(tag.name, "v1.1.0");
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_tag_lookup_missing_walks_everything() {
        let stub = StubTransport::new()
            .with_page(page(json!([tag_json("v1")]), Some(&format!("{REPO}/refs/tags?page=2"))))
            .with_page(page(json!([tag_json("v2")]), None));
        let repo = repository(&stub);

        assert!(repo.tag("v9").unwrap().is_none());
        assert_eq!(stub.call_count(), 2);
    }

    #[test]
    fn test_tag_target_commit_and_statuses() {
        let stub = StubTransport::new()
            .with_page(commit_json("1f2e3d4c5b6a", "Release 1.0"))
            .with_page(page(
                json!([{"key": "build", "state": "SUCCESSFUL", "url": "https://ci.acme.io/1"}]),
                None,
            ));
        let tag: Tag<'_> = Resource::new(&stub, serde_json::from_value(tag_json("v1.0.0")).unwrap());

        let commit = tag.target_commit().unwrap();
        assert_eq!(commit.message, "Release 1.0");
        assert_eq!(commit.date.to_rfc3339(), "2021-12-28T12:14:51+00:00");

        let statuses = commit.statuses(Filters::new()).unwrap().collect_all().unwrap();
        assert_eq!(statuses[0].state, "SUCCESSFUL");
        assert_eq!(
            stub.urls(),
            vec![
                format!("{REPO}/commit/1f2e3d4c5b6a"),
                format!("{REPO}/commit/1f2e3d4c5b6a/statuses"),
            ]
        );
    }

    #[test]
    fn test_refresh_replaces_record() {
        let mut updated = repository_json();
        updated["description"] = json!("Now with docs");
        let stub = StubTransport::new().with_page(updated);
        let mut repo = repository(&stub);

        assert!(repo.description.is_none());
        repo.refresh().unwrap();
        assert_eq!(repo.description.as_deref(), Some("Now with docs"));
        assert_eq!(stub.urls(), vec![REPO.to_string()]);
    }
}
