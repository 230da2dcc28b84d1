// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod decode;
mod generate;

#[derive(Parser)]
#[command(version, about = "Builds and inspects SMBIOS structure tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase the log level (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Build the structure table of a platform described in a JSON file
    Generate {
        /// Platform description
        #[arg(short, long, value_name = "JSON")]
        platform: PathBuf,
        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the structures of a table as JSON
    Decode {
        /// Structure table
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Command::Generate { platform, output } => {
            generate::generate(&platform, output.as_deref())
        }
        Command::Decode { input } => decode::decode(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
