use clap::Parser;
use coolju::config::Cli;
use coolju::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    coolju::logging::init(cli.verbose);

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    // One fatal line naming the failing entry, then a non-zero exit.
    if let Err(err) = coolju::commands::sync::run(&config) {
        tracing::error!("{err}");
        std::process::exit(1);
    }

    Ok(())
}
