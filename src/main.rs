use clap::Parser;
use pp_console::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    pp_console::run(cli).await
}
