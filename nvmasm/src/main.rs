use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{debug, warn};
use nvmasm::{assemble_with_debug, default_output_path};

#[derive(Parser, Debug)]
#[command(
    name = "nvmasm",
    version,
    about = "Assembler for the NVM0 stack machine"
)]
struct Cli {
    /// Assembly source file
    input: PathBuf,
    /// Program image to write. Defaults to the input name with a .bin extension
    output: Option<PathBuf>,
    #[arg(
        short = 'g',
        long = "debug-symbols",
        action = ArgAction::SetTrue,
        long_help = "Also write label and line addresses as JSON next to the output, with a .ndb extension."
    )]
    debug_symbols: bool,
    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::SetTrue,
        long_help = "Only log warnings and errors. The completion line is always printed. RUST_LOG takes precedence."
    )]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let program_text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let name = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let assembly = assemble_with_debug(&program_text, &name)?;

    for diagnostic in &assembly.diagnostics {
        warn!("{}", diagnostic);
    }

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.input));
    fs::write(&output, &assembly.bytes)
        .with_context(|| format!("writing {}", output.display()))?;

    if cli.debug_symbols {
        let debug_path = output.with_extension("ndb");
        debug!("writing debug symbols to {}", debug_path.display());
        fs::write(&debug_path, assembly.debug.to_string()?)
            .with_context(|| format!("writing {}", debug_path.display()))?;
    }

    println!("{}", assembly.summary(&output));

    Ok(())
}
