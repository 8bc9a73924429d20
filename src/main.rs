//! # tabscope command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Install the tracing subscriber
//!   └─> Run the subcommand
//! ```
//!
//! ```bash
//! tabscope report data.csv -o analysis_report.json
//! tabscope plot data.csv histogram satisfaction -o satisfaction.svg
//! tabscope demo --dir out/
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    tabscope::logging::init(cli.log_level(), cli.log_dir.as_deref())?;
    cli::run(cli)
}
