use anyhow::Result;
use assethub::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
