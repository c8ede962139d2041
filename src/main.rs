//! Plantilla CLI — application scaffolding from packaged templates.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "plantilla",
    version,
    about = "Application scaffolding from packaged templates — deterministic substitutions, backend variants"
)]
struct Cli {
    #[command(subcommand)]
    command: plantilla::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = plantilla::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
