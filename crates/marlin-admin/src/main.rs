#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser as _;

fn main() -> anyhow::Result<()> {
    let args = marlin_admin::cli::Cli::parse();

    if let Err(e) = marlin_admin::tracing::init(&args) {
        eprintln!("Failed to start tracing: {e}");
    }

    let configuration = marlin_admin::configuration::get_configuration()?;
    let rt = marlin_admin::runtime::create_runtime()?;
    rt.block_on(marlin_admin::commands::run(args.command, configuration))
}
