//
//  bitbucket-lite
//  cli/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::cloud::{CommitQuery, CommitRecord};
use crate::output::{truncate, TableRow};

/// Browse commits
#[derive(Args, Debug)]
pub struct CommitCommand {
    #[command(subcommand)]
    pub command: CommitSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommitSubcommand {
    /// List commits, newest first
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository slug
    pub repo: String,

    /// Only commits reachable from this branch
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Leave out commits reachable from this branch
    #[arg(long, short = 'x')]
    pub exclude: Option<String>,
}

impl TableRow for CommitRecord {
    fn headers() -> &'static [&'static str] {
        &["COMMIT", "AUTHOR", "DATE", "MESSAGE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.short_hash().to_string(),
            self.author
                .as_ref()
                .map(|a| a.display_name().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.date.format("%Y-%m-%d %H:%M").to_string(),
            truncate(self.summary(), 72),
        ]
    }
}

impl CommitCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        match &self.command {
            CommitSubcommand::List(args) => {
                let query = CommitQuery {
                    exclude: args.exclude.clone(),
                    pagelen: None,
                    filters: session.filters(),
                };

                let listing = match &args.branch {
                    Some(branch) => session.api().branch_commits(&args.repo, branch, query)?,
                    None => session.api().commits(&args.repo, query.into_filters())?,
                };

                let commits = session.collect(listing)?;
                session.output().write_list(&commits)
            }
        }
    }
}
