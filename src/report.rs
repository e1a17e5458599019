use anyhow::Result;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use crate::{
  config::ClassificationConfig,
  k8s::resources::{StdDeployment, StdPod},
  metrics::{MetricsIndex, PodUsage},
};

/// Whether a workload belongs to the cluster itself or to its users
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
  #[serde(rename = "SYS")]
  Sys,
  #[serde(rename = "APP")]
  App,
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      Category::Sys => write!(f, "SYS"),
      Category::App => write!(f, "APP"),
    }
  }
}

/// Kind of workload a row was computed for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
  #[default]
  Deployment,
}

impl std::fmt::Display for Kind {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      Kind::Deployment => write!(f, "Deployment"),
    }
  }
}

/// Usage of a single Deployment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
#[tabled(rename_all = "UpperCase")]
pub struct ReportRow {
  pub category: Category,
  #[serde(rename = "type")]
  #[tabled(rename = "TYPE")]
  pub kind: Kind,
  pub name: String,
  pub replicas: i32,
  /// CPU in cores, rounded to 3 decimals
  #[tabled(rename = "CPU (CORES)")]
  pub cpu_v: f64,
  /// Memory in MiB, rounded to 1 decimal
  #[tabled(rename = "MEMORY (MIB)")]
  pub mem_mib: f64,
}

/// Returns the pods selected by the Deployment's `matchLabels`
///
/// A Deployment without selector labels selects nothing, and pods without labels are never
/// selected. Extra labels on the pod do not prevent a match.
pub fn match_pods<'a>(deployment: &StdDeployment, pods: &'a [StdPod]) -> Vec<&'a StdPod> {
  let selector = match &deployment.match_labels {
    Some(selector) if !selector.is_empty() => selector,
    _ => return Vec::new(),
  };

  pods
    .iter()
    .filter(|pod| pod.namespace == deployment.namespace)
    .filter(|pod| match &pod.labels {
      Some(labels) => selector.iter().all(|(k, v)| labels.get(k) == Some(v)),
      None => false,
    })
    .collect()
}

/// Sums the indexed usage of the given pods
///
/// Pods missing from the index contribute nothing. CPU is rounded to 3 decimals and memory
/// to 1 decimal, with halves rounded away from zero.
pub fn aggregate(pods: &[&StdPod], index: &MetricsIndex) -> PodUsage {
  let mut total = PodUsage::default();

  for pod in pods {
    if let Some(usage) = index.get(&(pod.namespace.clone(), pod.name.clone())) {
      total += *usage;
    }
  }

  PodUsage {
    cpu: round(total.cpu, 3),
    memory: round(total.memory, 1),
  }
}

fn round(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor).round() / factor
}

/// Builds one row per Deployment, in the order the Deployments were given
pub fn build_report(
  deployments: &[StdDeployment],
  pods: &[StdPod],
  index: &MetricsIndex,
  classification: &ClassificationConfig,
) -> Vec<ReportRow> {
  deployments
    .iter()
    .map(|deployment| {
      let matched = match_pods(deployment, pods);
      let usage = aggregate(&matched, index);

      ReportRow {
        category: classification.classify(&deployment.name, &deployment.namespace),
        kind: Kind::Deployment,
        name: deployment.name.clone(),
        replicas: deployment.replicas.unwrap_or(0),
        cpu_v: usage.cpu,
        mem_mib: usage.memory,
      }
    })
    .collect()
}

/// Renders the report as a table for terminal output
pub fn to_stdout_table(rows: &[ReportRow]) -> Result<String> {
  if rows.is_empty() {
    return Ok(String::new());
  }

  let mut table = Table::new(rows);
  table.with(Style::sharp());

  Ok(table.to_string())
}
