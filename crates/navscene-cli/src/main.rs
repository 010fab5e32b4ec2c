//! Navscene CLI - Lay out navigation graphs and draw them as text

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is installed by the app from its flags and environment
    let mut app = cli::NavsceneApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
