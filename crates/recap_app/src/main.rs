mod app;
mod cli;
mod effects;
mod render;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    recap_logging::initialize(args.log, args.log_level());
    app::run(args)
}
