//
//  bitbucket-lite
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod branch;
mod commit;
mod completion;
mod pipeline;
mod pr;
mod repo;
mod tag;

pub use branch::BranchCommand;
pub use commit::CommitCommand;
pub use completion::CompletionCommand;
pub use pipeline::PipelineCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;
pub use tag::TagCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::common::{parse_filter, FilterValue};
use crate::api::resource::Resource;
use crate::api::{Bitbucket, Filters, Paginator};
use crate::auth::AuthCredential;
use crate::config::Config;
use crate::output::OutputWriter;

#[derive(Parser, Debug)]
#[command(
    name = "bbl",
    version,
    about = "Browse Bitbucket Cloud repositories from the command line",
    long_about = "bbl is a read-only CLI for Bitbucket Cloud.\n\n\
                  It lists repositories, branches, commits, tags, pipelines and pull requests,\n\
                  following the API's pagination lazily.",
    propagate_version = true,
    after_help = "Use 'bbl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Workspace slug
    #[arg(long, short = 'w', global = true, env = "BITBUCKET_WORKSPACE")]
    pub workspace: Option<String>,

    /// Atlassian account e-mail used with the API token
    #[arg(long, short = 'u', global = true, env = "BITBUCKET_USERNAME")]
    pub username: Option<String>,

    /// API token (or access token when no username is given)
    #[arg(long, global = true, env = "BITBUCKET_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = "BITBUCKET_API_URL")]
    pub base_url: Option<String>,

    /// Configuration file to use instead of the default one
    #[arg(long, global = true, env = "BBL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Maximum number of items to list
    #[arg(long, short = 'L', global = true)]
    pub limit: Option<usize>,

    /// Query parameter passed to list endpoints (KEY=VALUE, repeatable)
    #[arg(long = "filter", short = 'f', global = true, value_parser = parse_filter)]
    pub filters: Vec<(String, FilterValue)>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    Branch(BranchCommand),

    Commit(CommitCommand),

    Tag(TagCommand),

    Pipeline(PipelineCommand),

    Pr(PrCommand),

    Completion(CompletionCommand),
}

/// Everything a command needs to talk to the API: the client, the listing
/// defaults and the output writer.
pub struct Session {
    api: Bitbucket,
    filters: Filters,
    limit: Option<usize>,
    output: OutputWriter,
}

impl Session {
    /// Resolves options against the config file and builds the client.
    ///
    /// Flags and environment variables win over the config file.
    pub fn open(global: &GlobalOptions) -> Result<Self> {
        let config = match &global.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load().context("Failed to load configuration")?,
        };

        let workspace = global
            .workspace
            .clone()
            .or_else(|| config.workspace.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Workspace required. Use --workspace, BITBUCKET_WORKSPACE or set 'workspace' in {}",
                    describe_config_path(global)
                )
            })?;

        let username = global.username.as_deref().or(config.username.as_deref());
        let credential = AuthCredential::from_parts(username, global.token.as_deref());
        match (&credential, username) {
            (None, Some(username)) => warn!(
                username,
                "username given without an API token, requesting anonymously; private repositories will look missing"
            ),
            (None, None) => debug!("no API token given, requesting anonymously"),
            _ => {}
        }

        let mut api = Bitbucket::http_with(workspace, credential, config.timeout())
            .context("Failed to create HTTP client")?;
        if let Some(base_url) = global.base_url.as_ref().or(config.base_url.as_ref()) {
            api = api.with_base_url(base_url.trim_end_matches('/'));
        }

        let mut filters: Filters = global.filters.iter().cloned().collect();
        if let Some(pagelen) = config.pagelen {
            filters.insert_default("pagelen", pagelen);
        }

        Ok(Self {
            api,
            filters,
            limit: global.limit,
            output: OutputWriter::from_json_flag(global.json),
        })
    }

    pub fn api(&self) -> &Bitbucket {
        &self.api
    }

    /// The `--filter` values plus configured defaults.
    pub fn filters(&self) -> Filters {
        self.filters.clone()
    }

    pub fn output(&self) -> &OutputWriter {
        &self.output
    }

    /// Drains a listing, honouring `--limit`.
    ///
    /// The limit is applied on the lazy sequence, so pages past it are never
    /// requested.
    pub fn collect<'a, R: DeserializeOwned>(
        &self,
        listing: Paginator<'a, R>,
    ) -> Result<Vec<Resource<'a, R>>> {
        let items = match self.limit {
            Some(limit) => listing.take(limit).collect::<Result<Vec<_>, _>>()?,
            None => listing.collect_all()?,
        };
        Ok(items)
    }
}

fn describe_config_path(global: &GlobalOptions) -> String {
    global
        .config
        .clone()
        .or_else(|| Config::config_path().ok())
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "the config file".to_string())
}
