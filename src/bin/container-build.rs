use anyhow::Result;
use clap::Parser;

use container_builder::cli::BuildCli;
use container_builder::commands::build;
use container_builder::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = BuildCli::parse();
    logging::init(cli.common.verbose);

    build::execute(cli).await
}
