#![forbid(unsafe_code)]

//! rprint — test-run result printer CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("rprint: {e}");
        std::process::exit(e.exit_code());
    }
}
