//
//  bitbucket-lite
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::{GlobalOptions, Session};
use crate::api::cloud::RepositoryRecord;
use crate::output::{or_dash, print_field, print_header, truncate, TableOutput, TableRow};

/// Browse repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories in the workspace
    #[command(visible_alias = "ls")]
    List,

    /// View repository details
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository slug
    pub repo: String,
}

fn visibility(is_private: bool, color: bool) -> String {
    let text = if is_private { "private" } else { "public" };
    match (color, is_private) {
        (false, _) => text.to_string(),
        (true, true) => style(text).yellow().to_string(),
        (true, false) => style(text).green().to_string(),
    }
}

impl TableRow for RepositoryRecord {
    fn headers() -> &'static [&'static str] {
        &["NAME", "VISIBILITY", "LANGUAGE", "DESCRIPTION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.full_name.clone(),
            visibility(self.is_private, color),
            or_dash(self.language.as_deref().filter(|l| !l.is_empty())),
            truncate(self.description.as_deref().unwrap_or(""), 50),
        ]
    }
}

impl TableOutput for RepositoryRecord {
    fn print_table(&self, color: bool) {
        print_header(&self.full_name);
        println!();

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            print_field("Description", desc, color);
        }

        print_field("Visibility", &visibility(self.is_private, color), color);

        if let Some(lang) = self.language.as_deref().filter(|l| !l.is_empty()) {
            print_field("Language", lang, color);
        }

        if let Some(branch) = &self.mainbranch {
            print_field("Default branch", &branch.name, color);
        }

        if let Some(web) = self.links.href("html") {
            println!();
            print_field("Web URL", web, color);
        }

        if let Some(created) = &self.created_on {
            println!();
            print_field("Created", created, color);
        }
        if let Some(updated) = &self.updated_on {
            print_field("Updated", updated, color);
        }
    }
}

impl RepoCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        match &self.command {
            RepoSubcommand::List => {
                let repos = session.collect(session.api().repositories(session.filters())?)?;
                session.output().write_list(&repos)
            }
            RepoSubcommand::View(args) => {
                let repo = session.api().repository(&args.repo)?;
                session.output().write(&repo)
            }
        }
    }
}
