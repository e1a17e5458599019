pub mod analysis;
pub mod clients;
pub mod config;
pub mod k8s;
pub mod metrics;
pub mod output;
pub mod quantity;
pub mod report;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::clients::RealK8sClients;

/// Report CPU and memory usage per Deployment
#[derive(Parser, Debug)]
#[command(author, about, version)]
pub struct Cli {
  /// Name of the kubeconfig context to use (skips in-cluster configuration)
  #[arg(long)]
  pub context: Option<String>,

  /// Path to config file (default: .kusage.yaml in current directory)
  #[arg(long)]
  pub config: Option<String>,

  #[arg(short, long, value_enum, default_value_t)]
  pub format: output::Format,

  /// Write to file instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,

  #[clap(flatten)]
  pub verbose: Verbosity<InfoLevel>,
}

/// Runs a single collection pass against the cluster and writes the report
pub async fn run(args: &Cli) -> Result<()> {
  let config = config::load(args.config.as_deref())?;
  let k8s_client = RealK8sClients::new(args.context.as_deref()).await?;

  let rows = analysis::analyze(&k8s_client, &config).await?;
  output::output(&rows, &args.format, &args.output)?;

  Ok(())
}
