//! `brickyard` command line
//!
//! - `brickyard inspect <path> [--json] [--format <fmt>]`: list declared interceptors
//! - `brickyard check <path> [--format <fmt>]`: validate, exit non-zero on failure
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

use anyhow::Context;
use brickyard_cli::{check_file, inspect_file};
use brickyard_loader::FileFormat;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let path = Arg::new("path")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Interceptor file (json, yaml or toml)");
    let format = Arg::new("format")
        .long("format")
        .value_parser(|s: &str| s.parse::<FileFormat>().map_err(|e| e.to_string()))
        .help("Override format detection");

    Command::new("brickyard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect Brickyard interceptor files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("inspect")
                .about("List declared interceptors")
                .arg(path.clone())
                .arg(format.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate an interceptor file")
                .arg(path)
                .arg(format),
        )
}

fn path_and_format(args: &ArgMatches) -> anyhow::Result<(&Path, Option<FileFormat>)> {
    let path = args.get_one::<PathBuf>("path").context("missing path")?;
    Ok((path.as_path(), args.get_one::<FileFormat>("format").copied()))
}

fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    match matches.subcommand() {
        Some(("inspect", args)) => {
            let (path, format) = path_and_format(args)?;
            let report = inspect_file(path, format).with_context(|| format!("cannot inspect {}", path.display()))?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("check", args)) => {
            let (path, format) = path_and_format(args)?;
            match check_file(path, format) {
                Ok(count) => {
                    println!("{}: ok ({count} interceptors)", path.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "check failed");
                    eprintln!("{}: {err}", path.display());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run(&cli().get_matches())
}
