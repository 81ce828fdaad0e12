// src/bin/cli.rs
use std::process::ExitCode;

use german_dict::cli;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    Ok(cli::run())
}
