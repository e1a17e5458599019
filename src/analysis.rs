use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
  clients::K8sClients,
  config::Config,
  metrics::{self, MetricsIndex, MetricsOutcome},
  report::{self, ReportRow},
};

/// Collects the usage report for every Deployment in the cluster
///
/// Listing Deployments or Pods is required; pod metrics are optional and their absence
/// reports zero usage.
pub async fn analyze(k8s: &impl K8sClients, config: &Config) -> Result<Vec<ReportRow>> {
  let deployments = k8s.get_deployments().await.context("Failed to list deployments")?;
  let pods = k8s.get_pods().await.context("Failed to list pods")?;
  debug!(deployments = deployments.len(), pods = pods.len(), "Listed cluster resources");

  let index = match metrics::collect(k8s).await {
    MetricsOutcome::Collected(index) => index,
    MetricsOutcome::Unavailable { reason } => {
      warn!("Unable to retrieve pod metrics, usage will be reported as zero: {reason}");
      MetricsIndex::new()
    }
  };

  Ok(report::build_report(&deployments, &pods, &index, &config.classification))
}
