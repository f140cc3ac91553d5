//
//  bitbucket-lite
//  cli/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::cloud::PipelineRecord;
use crate::output::{format_status, or_dash, TableRow};

/// Browse pipeline runs
#[derive(Args, Debug)]
pub struct PipelineCommand {
    #[command(subcommand)]
    pub command: PipelineSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PipelineSubcommand {
    /// List pipeline runs
    ///
    /// Filters are passed through, e.g. `-f target.branch=main -f sort=-created_on`.
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository slug
    pub repo: String,
}

fn format_duration(seconds: u64) -> String {
    match (seconds / 60, seconds % 60) {
        (0, s) => format!("{s}s"),
        (m, s) => format!("{m}m {s}s"),
    }
}

impl TableRow for PipelineRecord {
    fn headers() -> &'static [&'static str] {
        &["BUILD", "STATE", "RESULT", "REF", "CREATED", "DURATION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            format!("#{}", self.build_number),
            format_status(self.state_name().unwrap_or("-"), color),
            format_status(self.result_name().unwrap_or("-"), color),
            or_dash(self.ref_name()),
            or_dash(self.created_on.as_deref()),
            self.duration_in_seconds
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl PipelineCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        match &self.command {
            PipelineSubcommand::List(args) => {
                let pipelines = session.collect(session.api().pipelines(&args.repo, session.filters())?)?;
                session.output().write_list(&pipelines)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(312), "5m 12s");
    }
}
