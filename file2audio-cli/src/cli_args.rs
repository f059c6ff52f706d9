//! CLI argument definitions for the file2audio command-line interface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use file2audio_core::{DEFAULT_KDF_ITERATIONS, DEFAULT_SAMPLE_RATE};

/// file2audio - pack files into a WAV file and back
#[derive(Parser)]
#[command(name = "file2audio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Encode one or more files into a WAV file
    Encode(EncodeArgs),

    /// Decode a WAV file back into the original files
    Decode(DecodeArgs),

    /// Show what an encoded WAV file contains without decrypting it
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct EncodeArgs {
    /// Files to encode, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output WAV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Encrypt the payload with a password (AES-256-GCM)
    #[arg(short, long)]
    pub encrypt: bool,

    /// Password for --encrypt; prompted for (with confirmation) when absent
    #[arg(long, env = "FILE2AUDIO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Sample rate written to the WAV header
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// PBKDF2 iterations; decode must use the same value
    #[arg(long, default_value_t = DEFAULT_KDF_ITERATIONS)]
    pub kdf_iterations: u32,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,

    /// Print the encode report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DecodeArgs {
    /// Encoded WAV file
    pub input: PathBuf,

    /// Directory to write the decoded files into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Password for encrypted files; prompted for when absent
    #[arg(long, env = "FILE2AUDIO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// PBKDF2 iterations used when the file was encoded
    #[arg(long, default_value_t = DEFAULT_KDF_ITERATIONS)]
    pub kdf_iterations: u32,

    /// Overwrite existing files in the output directory
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct InfoArgs {
    /// Encoded WAV file
    pub input: PathBuf,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}
