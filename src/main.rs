//
//  bitbucket-lite
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_lite::api::ApiError;
use bitbucket_lite::cli::{Cli, Commands};
use bitbucket_lite::exit_codes;

fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging from `BBL_LOG`, writing to stderr
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>().and_then(ApiError::status) {
        Some(401 | 403) => exit_codes::AUTH_ERROR,
        Some(404) => exit_codes::NOT_FOUND,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Repo(cmd) => cmd.run(&cli.global),
        Commands::Branch(cmd) => cmd.run(&cli.global),
        Commands::Commit(cmd) => cmd.run(&cli.global),
        Commands::Tag(cmd) => cmd.run(&cli.global),
        Commands::Pipeline(cmd) => cmd.run(&cli.global),
        Commands::Pr(cmd) => cmd.run(&cli.global),
        Commands::Completion(cmd) => cmd.run(&cli.global),
    }
}
