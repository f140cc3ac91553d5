//
//  bitbucket-lite
//  cli/branch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::cloud::BranchRecord;
use crate::output::{or_dash, truncate, TableRow};

/// Browse branches
#[derive(Args, Debug)]
pub struct BranchCommand {
    #[command(subcommand)]
    pub command: BranchSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BranchSubcommand {
    /// List the branches of a repository
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository slug
    pub repo: String,
}

impl TableRow for BranchRecord {
    fn headers() -> &'static [&'static str] {
        &["NAME", "COMMIT", "DATE", "MESSAGE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let target = self.target.as_ref();
        vec![
            self.name.clone(),
            or_dash(target.map(|c| c.short_hash())),
            target
                .and_then(|c| c.date)
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            truncate(
                target
                    .and_then(|c| c.message.as_deref())
                    .and_then(|m| m.lines().next())
                    .unwrap_or(""),
                60,
            ),
        ]
    }
}

impl BranchCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        match &self.command {
            BranchSubcommand::List(args) => {
                let branches = session.collect(session.api().branches(&args.repo, session.filters())?)?;
                session.output().write_list(&branches)
            }
        }
    }
}
