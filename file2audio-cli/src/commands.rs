//! One function per subcommand.
//!
//! Each takes its parsed arguments plus explicit input/prompt/output streams
//! and returns the value it printed, so the commands can be driven from tests.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use file2audio_core::storage::{checksum, file_set};
use file2audio_core::{CodecConfiguration, ContainerInfo, EncodeReport, PasswordEntry, Pipeline};

use crate::cli_args::{DecodeArgs, EncodeArgs, InfoArgs};
use crate::password_prompt;

pub fn encode(
    args: &EncodeArgs,
    input: &mut impl BufRead,
    prompt: &mut impl Write,
    out: &mut impl Write,
) -> Result<EncodeReport> {
    if args.output.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.output.display());
    }

    let pipeline = Pipeline::new(CodecConfiguration {
        sample_rate: args.sample_rate,
        kdf_iterations: args.kdf_iterations,
        ..Default::default()
    })?;

    let password = if args.encrypt {
        Some(match &args.password {
            Some(p) => PasswordEntry::confirmed(p.clone()),
            None => password_prompt::prompt_new_password(input, prompt)?,
        })
    } else {
        None
    };
    // Reject a bad password before reading any input files.
    if let Some(entry) = &password {
        entry.check(pipeline.config().min_password_len)?;
    }

    let files = file_set::load_named_blobs(args.files.as_slice()).context("failed to load input files")?;
    let outcome = pipeline
        .encode_with_report(&files, password.as_ref())
        .context("failed to encode files")?;

    fs::write(&args.output, &outcome.audio)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let report = outcome.report;
    if args.json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        writeln!(out, "Encoded {} file(s) into {}", report.file_count, args.output.display())?;
        writeln!(out, "  Audio duration: {:.2} seconds", report.duration_secs)?;
        writeln!(out, "  Audio size: {} bytes", report.audio_size)?;
        writeln!(out, "  Efficiency: {:.1}%", report.efficiency_percent)?;
        if report.encrypted {
            writeln!(out, "  Encrypted: yes")?;
        }
        writeln!(out, "  SHA-256: {}", report.checksum)?;
    }
    Ok(report)
}

pub fn decode(
    args: &DecodeArgs,
    input: &mut impl BufRead,
    prompt: &mut impl Write,
    out: &mut impl Write,
) -> Result<Vec<PathBuf>> {
    let audio = fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;

    let pipeline = Pipeline::new(CodecConfiguration {
        kdf_iterations: args.kdf_iterations,
        ..Default::default()
    })?;

    let info = pipeline.inspect(&audio).context("not a file2audio WAV file")?;
    let password = match (&args.password, info.encrypted) {
        (Some(p), _) => Some(p.clone()),
        (None, true) => Some(password_prompt::prompt_line(input, prompt, "Enter password")?),
        (None, false) => None,
    };

    let files = pipeline
        .decode(&audio, password.as_deref())
        .context("failed to decode audio")?;
    let written = file_set::write_named_blobs(&args.output, &files, args.force)?;

    for (file, path) in files.iter().zip(&written) {
        writeln!(out, "{} ({} bytes)", path.display(), file.data.len())?;
    }
    writeln!(out, "Restored {} file(s)", written.len())?;
    Ok(written)
}

pub fn info(args: &InfoArgs, out: &mut impl Write) -> Result<ContainerInfo> {
    let audio = fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    let info = Pipeline::default()
        .inspect(&audio)
        .context("not a file2audio WAV file")?;

    if args.json {
        writeln!(out, "{}", info.to_json()?)?;
    } else {
        writeln!(out, "{}", args.input.display())?;
        writeln!(out, "  Sample rate: {} Hz", info.sample_rate)?;
        writeln!(out, "  Duration: {:.2} seconds ({} samples)", info.duration_secs, info.sample_count)?;
        writeln!(out, "  Files: {}", info.file_count)?;
        writeln!(out, "  Payload: {} bytes", info.payload_length)?;
        writeln!(out, "  Encrypted: {}", if info.encrypted { "yes" } else { "no" })?;
        writeln!(out, "  SHA-256: {}", checksum::sha256_file(&args.input)?)?;
    }
    Ok(info)
}
