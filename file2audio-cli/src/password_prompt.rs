//! Line-based password prompts.
//!
//! Prompts go to the given writer (stderr in practice) so that stdout
//! stays clean for `--json` output. Input is not masked.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use file2audio_core::PasswordEntry;

/// Print `label` and read one line, without its trailing newline.
pub fn prompt_line(input: &mut impl BufRead, prompt: &mut impl Write, label: &str) -> Result<String> {
    write!(prompt, "{label}: ")?;
    prompt.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read password")?;
    if read == 0 {
        bail!("no password provided (end of input)");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Ask for a new password and its confirmation. Policy is checked by the pipeline.
pub fn prompt_new_password(input: &mut impl BufRead, prompt: &mut impl Write) -> Result<PasswordEntry> {
    let password = prompt_line(input, prompt, "Enter password")?;
    let confirmation = prompt_line(input, prompt, "Confirm password")?;
    Ok(PasswordEntry::new(password, confirmation))
}
