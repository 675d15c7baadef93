use clap::Parser;
use coolju::config::ServeCli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ServeCli::parse();
    coolju::logging::init(false);

    coolju::server::serve(cli.root, cli.addr).await?;

    Ok(())
}
