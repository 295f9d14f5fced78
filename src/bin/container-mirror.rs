use anyhow::Result;
use clap::Parser;

use container_builder::cli::MirrorCli;
use container_builder::commands::mirror;
use container_builder::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = MirrorCli::parse();
    logging::init(cli.common.verbose);

    mirror::execute(cli).await
}
