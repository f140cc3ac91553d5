//
//  bitbucket-lite
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud API Facade
//!
//! [`Bitbucket`] is the entry point of the library. It owns the
//! [`Transport`], knows the workspace, and is the one place that knows
//! Bitbucket's REST path conventions:
//!
//! | Operation | Path |
//! |-----------|------|
//! | [`repositories`](Bitbucket::repositories) | `/repositories/{workspace}` |
//! | [`repository`](Bitbucket::repository) | `/repositories/{workspace}/{repo_slug}` |
//! | [`branches`](Bitbucket::branches) | `/repositories/{workspace}/{repo_slug}/refs/branches` |
//! | [`commits`](Bitbucket::commits) | `/repositories/{workspace}/{repo_slug}/commits` |
//! | [`branch_commits`](Bitbucket::branch_commits) | `/repositories/{workspace}/{repo_slug}/commits/{branch}` |
//! | [`tags`](Bitbucket::tags) | `/repositories/{workspace}/{repo_slug}/refs/tags` |
//! | [`pipelines`](Bitbucket::pipelines) | `/repositories/{workspace}/{repo_slug}/pipelines/` |
//! | [`pullrequests`](Bitbucket::pullrequests) | `/repositories/{workspace}/{repo_slug}/pullrequests` |
//!
//! Listing methods build a fresh [`Paginator`] on every call and perform no
//! I/O; the first page is requested when the paginator is first advanced.

use std::time::Duration;

use tracing::debug;

use super::cloud::{
    find_tag, BranchRecord, CommitQuery, CommitRecord, PipelineRecord, PullrequestRecord,
    Repository, RepositoryRecord, Tag, TagRecord,
};
use super::common::{ApiError, Filters, Paginator};
use super::resource::{fetch, join_url};
use super::transport::{HttpTransport, Transport};
use crate::auth::AuthCredential;

/// Base URL of the Bitbucket Cloud REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// The Bitbucket Cloud API client.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_lite::api::Bitbucket;
/// use bitbucket_lite::api::common::Filters;
/// use bitbucket_lite::auth::AuthCredential;
///
/// let api = Bitbucket::http("acme", AuthCredential::api_token("me@acme.io", "token"))?;
///
/// for pipeline in api.pipelines("widgets", Filters::new().with("sort", "-created_on"))?.take(5) {
///     let pipeline = pipeline?;
///     println!("#{} {:?}", pipeline.build_number, pipeline.result_name());
/// }
/// # Ok::<(), bitbucket_lite::api::ApiError>(())
/// ```
pub struct Bitbucket {
    transport: Box<dyn Transport>,
    workspace: String,
    base_url: String,
}

impl Bitbucket {
    /// Creates a client for `workspace` on top of any transport.
    pub fn new(transport: impl Transport + 'static, workspace: impl Into<String>) -> Self {
        Self {
            transport: Box::new(transport),
            workspace: workspace.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client backed by [`HttpTransport`] with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client could not be built.
    pub fn http(workspace: impl Into<String>, credential: AuthCredential) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(None)?.with_auth(credential);
        Ok(Self::new(transport, workspace))
    }

    /// Creates a client backed by [`HttpTransport`], optionally anonymous,
    /// with a request timeout.
    pub fn http_with(
        workspace: impl Into<String>,
        credential: Option<AuthCredential>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut transport = HttpTransport::new(timeout)?;
        if let Some(credential) = credential {
            transport = transport.with_auth(credential);
        }
        Ok(Self::new(transport, workspace))
    }

    /// Points the client at another API root (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Lists the repositories of the workspace.
    pub fn repositories(&self, filters: Filters) -> Result<Paginator<'_, RepositoryRecord>, ApiError> {
        let url = self.endpoint(&["repositories", &self.workspace])?;
        Ok(self.paginate(url, filters))
    }

    /// Fetches a single repository.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the repository does not exist or is
    /// not visible with the current credentials.
    pub fn repository(&self, repo_slug: &str) -> Result<Repository<'_>, ApiError> {
        let url = self.repo_endpoint(repo_slug, &[])?;
        fetch(self.transport(), &url).map_err(|e| match e {
            ApiError::NotFound(_) => {
                ApiError::NotFound(format!("repository '{}/{}'", self.workspace, repo_slug))
            }
            other => other,
        })
    }

    /// Lists the branches of a repository.
    pub fn branches(&self, repo_slug: &str, filters: Filters) -> Result<Paginator<'_, BranchRecord>, ApiError> {
        let url = self.repo_endpoint(repo_slug, &["refs", "branches"])?;
        Ok(self.paginate(url, filters))
    }

    /// Lists the commits of a repository across all branches, newest first.
    pub fn commits(&self, repo_slug: &str, filters: Filters) -> Result<Paginator<'_, CommitRecord>, ApiError> {
        let url = self.repo_endpoint(repo_slug, &["commits"])?;
        Ok(self.paginate(url, filters))
    }

    /// Lists the commits reachable from `branch`.
    pub fn branch_commits(
        &self,
        repo_slug: &str,
        branch: &str,
        query: CommitQuery,
    ) -> Result<Paginator<'_, CommitRecord>, ApiError> {
        let url = self.repo_endpoint(repo_slug, &["commits", branch])?;
        Ok(self.paginate(url, query.into_filters()))
    }

    /// Lists the tags of a repository.
    pub fn tags(&self, repo_slug: &str, filters: Filters) -> Result<Paginator<'_, TagRecord>, ApiError> {
        let url = self.repo_endpoint(repo_slug, &["refs", "tags"])?;
        Ok(self.paginate(url, filters))
    }

    /// Finds a tag by name, stopping at the first match.
    pub fn tag(&self, repo_slug: &str, name: &str) -> Result<Option<Tag<'_>>, ApiError> {
        find_tag(self.tags(repo_slug, Filters::new())?, name)
    }

    /// Lists the pipeline runs of a repository.
    ///
    /// The repository slug is lower-cased; the pipelines endpoint does not
    /// accept mixed-case slugs.
    pub fn pipelines(&self, repo_slug: &str, filters: Filters) -> Result<Paginator<'_, PipelineRecord>, ApiError> {
        let slug = repo_slug.to_lowercase();
        let url = self.repo_endpoint(&slug, &["pipelines", ""])?;
        Ok(self.paginate(url, filters))
    }

    /// Lists the pull requests of a repository.
    pub fn pullrequests(
        &self,
        repo_slug: &str,
        filters: Filters,
    ) -> Result<Paginator<'_, PullrequestRecord>, ApiError> {
        let url = self.repo_endpoint(repo_slug, &["pullrequests"])?;
        Ok(self.paginate(url, filters))
    }

    fn paginate<R: serde::de::DeserializeOwned>(&self, url: String, filters: Filters) -> Paginator<'_, R> {
        debug!(%url, filters = filters.len(), "new listing");
        Paginator::new(self.transport(), url, filters)
    }

    fn repo_endpoint(&self, repo_slug: &str, rest: &[&str]) -> Result<String, ApiError> {
        let mut segments = vec!["repositories", self.workspace.as_str(), repo_slug];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<String, ApiError> {
        join_url(&self.base_url, segments)
    }
}

impl std::fmt::Debug for Bitbucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitbucket")
            .field("workspace", &self.workspace)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{page, StubTransport};
    use serde_json::json;
    use std::rc::Rc;

    const REPO: &str = "https://api.bitbucket.org/2.0/repositories/acme/widgets";

    /// Shares one stub between the facade and the test body.
    struct Shared(Rc<StubTransport>);

    impl Transport for Shared {
        fn get(&self, url: &str, query: &[(String, String)]) -> Result<serde_json::Value, ApiError> {
            self.0.get(url, query)
        }
    }

    fn api(stub: StubTransport) -> (Bitbucket, Rc<StubTransport>) {
        let stub = Rc::new(stub);
        (Bitbucket::new(Shared(Rc::clone(&stub)), "acme"), stub)
    }

    #[test]
    fn test_listing_urls() {
        let (api, stub) = api(StubTransport::new()
            .with_page(page(json!([]), None))
            .with_page(page(json!([]), None))
            .with_page(page(json!([]), None))
            .with_page(page(json!([]), None))
            .with_page(page(json!([]), None))
            .with_page(page(json!([]), None)));

        api.repositories(Filters::new()).unwrap().for_each(drop);
        api.branches("widgets", Filters::new()).unwrap().for_each(drop);
        api.commits("widgets", Filters::new()).unwrap().for_each(drop);
        api.tags("widgets", Filters::new()).unwrap().for_each(drop);
        api.pipelines("Widgets", Filters::new()).unwrap().for_each(drop);
        api.pullrequests("widgets", Filters::new()).unwrap().for_each(drop);

        assert_eq!(
            stub.urls(),
            vec![
                "https://api.bitbucket.org/2.0/repositories/acme".to_string(),
                format!("{REPO}/refs/branches"),
                format!("{REPO}/commits"),
                format!("{REPO}/refs/tags"),
                format!("{REPO}/pipelines/"),
                format!("{REPO}/pullrequests"),
            ]
        );
    }

    #[test]
    fn test_listing_construction_does_no_io() {
        let (api, stub) = api(StubTransport::new());
        let _branches = api.branches("widgets", Filters::new()).unwrap();
        let _pipelines = api.pipelines("widgets", Filters::new().with("sort", "-created_on")).unwrap();
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_each_call_builds_a_fresh_paginator() {
        let (api, stub) = api(StubTransport::new()
            .with_page(page(json!([{"name": "main"}]), None))
            .with_page(page(json!([{"name": "main"}]), None)));

        assert_eq!(api.branches("widgets", Filters::new()).unwrap().count(), 1);
        assert_eq!(api.branches("widgets", Filters::new()).unwrap().count(), 1);
        assert_eq!(stub.call_count(), 2);
    }

    #[test]
    fn test_branches_across_two_pages() {
        let (api, stub) = api(StubTransport::new()
            .with_page(json!({
                "pagelen": 1,
                "values": [{"name": "main"}],
                "next": format!("{REPO}/refs/branches?pagelen=1&page=2")
            }))
            .with_page(json!({"pagelen": 1, "values": [{"name": "feature-x"}]})));

        let names: Vec<String> = api
            .branches("widgets", Filters::new().with("pagelen", 1))
            .unwrap()
            .map(|b| b.unwrap().into_inner().name)
            .collect();

        assert_eq!(names, vec!["main", "feature-x"]);
        assert_eq!(stub.call_count(), 2);
        assert_eq!(stub.calls()[1].url, format!("{REPO}/refs/branches?pagelen=1&page=2"));
        assert!(stub.calls()[1].query.is_empty());
    }

    #[test]
    fn test_branch_commits_query() {
        let (api, stub) = api(StubTransport::new().with_page(page(json!([]), None)));

        api.branch_commits("widgets", "feature/x", CommitQuery::new().exclude("main").pagelen(30))
            .unwrap()
            .for_each(drop);

        let call = &stub.calls()[0];
        assert_eq!(call.url, format!("{REPO}/commits/feature%2Fx"));
        assert_eq!(
            call.query,
            vec![
                ("exclude".to_string(), "main".to_string()),
                ("pagelen".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_repository_not_found() {
        let (api, _stub) = api(StubTransport::new().with_error(ApiError::Status {
            status: 404,
            body: r#"{"type": "error", "error": {"message": "Repository not found"}}"#.into(),
        }));

        let err = api.repository("missing").unwrap_err();
        assert_eq!(err.to_string(), "Resource not found: repository 'acme/missing'");
    }

    #[test]
    fn test_repository_then_tags_via_links() {
        let (api, stub) = api(StubTransport::new()
            .with_page(json!({
                "name": "widgets",
                "full_name": "acme/widgets",
                "links": {"tags": {"href": format!("{REPO}/refs/tags")}}
            }))
            .with_page(page(json!([{"name": "v1.0.0"}]), None)));

        let repo = api.repository("widgets").unwrap();
        let tag = repo.tag("v1.0.0").unwrap();
        assert!(tag.is_some());
        assert_eq!(stub.urls(), vec![REPO.to_string(), format!("{REPO}/refs/tags")]);
    }

    #[test]
    fn test_custom_base_url() {
        let (api, stub) = api(StubTransport::new().with_page(page(json!([]), None)));
        let api = api.with_base_url("http://127.0.0.1:8080/");

        api.tags("widgets", Filters::new()).unwrap().for_each(drop);
        assert_eq!(
            stub.urls(),
            vec!["http://127.0.0.1:8080/repositories/acme/widgets/refs/tags".to_string()]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let (api, _stub) = api(StubTransport::new());
        let api = api.with_base_url("api.bitbucket.org");
        assert!(matches!(
            api.branches("widgets", Filters::new()),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
