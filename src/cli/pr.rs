//
//  bitbucket-lite
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::cloud::{PullrequestRecord, PullrequestState};
use crate::output::{format_status, or_dash, truncate, TableRow};

/// Browse pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests (open ones by default)
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository slug
    pub repo: String,

    /// Only pull requests in this state (open, merged, declined, superseded)
    #[arg(long, short = 's')]
    pub state: Option<PullrequestState>,
}

impl TableRow for PullrequestRecord {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "STATE", "BRANCH", "AUTHOR"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let branches = match (self.source_branch(), self.destination_branch()) {
            (Some(source), Some(destination)) => format!("{source} -> {destination}"),
            (source, _) => or_dash(source),
        };

        vec![
            format!("#{}", self.id),
            truncate(&self.title, 60),
            format_status(self.state.as_str(), color),
            branches,
            or_dash(self.author.as_ref().map(|a| a.name.as_str())),
        ]
    }
}

impl PrCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        match &self.command {
            PrSubcommand::List(args) => {
                let mut filters = session.filters();
                if let Some(state) = args.state {
                    filters.insert("state", state);
                }

                let pullrequests = session.collect(session.api().pullrequests(&args.repo, filters)?)?;
                session.output().write_list(&pullrequests)
            }
        }
    }
}
