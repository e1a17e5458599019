use std::process;

use clap::Parser;
use kusage::Cli;
use tracing_log::AsTrace;

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_max_level(cli.verbose.log_level_filter().as_trace())
    .without_time()
    .init();

  if let Err(err) = kusage::run(&cli).await {
    eprintln!("{err:#}");
    process::exit(1);
  }
}
