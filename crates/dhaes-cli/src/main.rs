//! Command-line interface for the `dhaes` script protocol.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dhaes_protocol::{run_script, HexMode, Session};
use tracing_subscriber::EnvFilter;

/// Scripted Diffie–Hellman key derivation driving AES-128-CBC.
#[derive(Parser)]
#[command(
    name = "dhaes",
    version,
    about = "Runs dh/e/d command scripts: derive a shared secret, then encrypt or decrypt hex payloads"
)]
struct Cli {
    /// Input script; stdin when omitted.
    input: Option<PathBuf>,
    /// Output file; stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Reject payloads containing non-hex characters instead of ignoring
    /// them.
    #[arg(long)]
    strict_hex: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let script = read_script(cli.input.as_ref())?;

    let mode = if cli.strict_hex {
        HexMode::Strict
    } else {
        HexMode::Lenient
    };
    let mut session = Session::new(mode);
    let lines = run_script(&script, &mut session)?;

    let mut rendered = lines.join("\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?
        }
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("write stdout")?,
    }
    Ok(())
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("read {}", path.display())),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("read stdin")?;
            Ok(script)
        }
    }
}
