use std::{collections::HashMap, ops::AddAssign};

use tracing::{debug, warn};

use crate::{
  clients::K8sClients,
  k8s::resources::PodMetrics,
  quantity::{self, QuantityError},
};

/// Aggregated usage of a pod (or a group of pods)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PodUsage {
  /// CPU in cores
  pub cpu: f64,
  /// Memory in MiB
  pub memory: f64,
}

impl AddAssign for PodUsage {
  fn add_assign(&mut self, rhs: Self) {
    self.cpu += rhs.cpu;
    self.memory += rhs.memory;
  }
}

/// Pod usage keyed by `(namespace, pod name)`
pub type MetricsIndex = HashMap<(String, String), PodUsage>;

/// Result of querying the metrics API
///
/// Failing to reach the metrics API is not an error for the report. Callers decide how to
/// surface `Unavailable`.
#[derive(Debug)]
pub enum MetricsOutcome {
  Collected(MetricsIndex),
  Unavailable { reason: String },
}

/// Fetches pod metrics and indexes them, never failing
pub async fn collect(client: &impl K8sClients) -> MetricsOutcome {
  match client.get_pod_metrics().await {
    Ok(samples) => {
      debug!(samples = samples.len(), "Collected pod metrics");
      MetricsOutcome::Collected(build_metrics_index(&samples))
    }
    Err(err) => MetricsOutcome::Unavailable {
      reason: format!("{err:#}"),
    },
  }
}

/// Sums the usage of all containers per pod
///
/// A later sample for the same pod replaces an earlier one. Samples without a name or namespace,
/// or with a quantity that cannot be parsed, are skipped.
pub fn build_metrics_index(samples: &[PodMetrics]) -> MetricsIndex {
  let mut index = MetricsIndex::with_capacity(samples.len());

  for sample in samples {
    let (Some(name), Some(namespace)) = (&sample.metadata.name, &sample.metadata.namespace) else {
      warn!("Skipping pod metrics without name or namespace");
      continue;
    };

    match pod_usage(sample) {
      Ok(usage) => {
        index.insert((namespace.to_owned(), name.to_owned()), usage);
      }
      Err(err) => warn!("Skipping metrics for pod {namespace}/{name}: {err}"),
    }
  }

  index
}

fn pod_usage(sample: &PodMetrics) -> Result<PodUsage, QuantityError> {
  let mut usage = PodUsage::default();

  for container in &sample.containers {
    usage += PodUsage {
      cpu: quantity::parse_cpu(container.usage.cpu.as_ref().map(|q| q.0.as_str()))?,
      memory: quantity::parse_memory(container.usage.memory.as_ref().map(|q| q.0.as_str()))?,
    };
  }

  Ok(usage)
}
