//
//  bitbucket-lite
//  cli/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tag commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::cloud::TagRecord;
use crate::api::ApiError;
use crate::output::{or_dash, print_field, print_header, truncate, TableOutput, TableRow};

/// Browse tags
#[derive(Args, Debug)]
pub struct TagCommand {
    #[command(subcommand)]
    pub command: TagSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TagSubcommand {
    /// List the tags of a repository
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one tag
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository slug
    pub repo: String,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository slug
    pub repo: String,

    /// Tag name
    pub name: String,
}

fn tag_date(tag: &TagRecord) -> Option<String> {
    tag.date
        .or_else(|| tag.target.as_ref().and_then(|c| c.date))
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
}

impl TableRow for TagRecord {
    fn headers() -> &'static [&'static str] {
        &["NAME", "COMMIT", "DATE", "MESSAGE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(self.target.as_ref().map(|c| c.short_hash())),
            or_dash(tag_date(self).as_deref()),
            truncate(self.message.as_deref().unwrap_or("").trim(), 60),
        ]
    }
}

impl TableOutput for TagRecord {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        println!();

        if let Some(target) = &self.target {
            print_field("Commit", &target.hash, color);
        }
        if let Some(date) = tag_date(self) {
            print_field("Date", &date, color);
        }
        if let Some(message) = self.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            println!();
            println!("{}", message);
        }
    }
}

impl TagCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        match &self.command {
            TagSubcommand::List(args) => {
                let tags = session.collect(session.api().tags(&args.repo, session.filters())?)?;
                session.output().write_list(&tags)
            }
            TagSubcommand::View(args) => {
                let tag = session.api().tag(&args.repo, &args.name)?.ok_or_else(|| {
                    ApiError::NotFound(format!(
                        "tag '{}' in {}/{}",
                        args.name,
                        session.api().workspace(),
                        args.repo
                    ))
                })?;
                session.output().write(&tag)
            }
        }
    }
}
