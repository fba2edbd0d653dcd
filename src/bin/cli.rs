// src/bin/cli.rs
use hospital_duty::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
