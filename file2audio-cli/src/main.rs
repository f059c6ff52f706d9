//! file2audio CLI - encode files into a WAV file and decode them back.

mod cli_args;
mod commands;
mod password_prompt;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stderr();
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::Encode(args) => {
            commands::encode(args, &mut input, &mut prompt, &mut out)?;
        }
        Commands::Decode(args) => {
            commands::decode(args, &mut input, &mut prompt, &mut out)?;
        }
        Commands::Info(args) => {
            commands::info(args, &mut out)?;
        }
    }
    Ok(())
}
