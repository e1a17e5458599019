use std::collections::BTreeMap;

use anyhow::{Context, Result};
use k8s_openapi::{
  api::{apps, core},
  apimachinery::pkg::api::resource::Quantity,
};
use kube::{
  Client,
  api::{Api, ObjectMeta},
};
use serde::{Deserialize, Serialize};

/// Group and version served by the metrics-server aggregated API
pub const METRICS_API_GROUP: &str = "metrics.k8s.io";
pub const METRICS_API_VERSION: &str = "v1beta1";

/// Point-in-time usage reported for a single container
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
  #[serde(default)]
  pub cpu: Option<Quantity>,
  #[serde(default)]
  pub memory: Option<Quantity>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerMetrics {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub usage: Usage,
}

/// Pod usage sample as returned by `kubectl get --raw /apis/metrics.k8s.io/v1beta1/pods`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PodMetrics {
  pub metadata: ObjectMeta,
  #[serde(default)]
  pub containers: Vec<ContainerMetrics>,
  #[serde(default)]
  pub timestamp: Option<String>,
  #[serde(default)]
  pub window: Option<String>,
}

// k8s-openapi does not ship the metrics API types
impl k8s_openapi::Resource for PodMetrics {
  const API_VERSION: &'static str = "metrics.k8s.io/v1beta1";
  const GROUP: &'static str = METRICS_API_GROUP;
  const KIND: &'static str = "PodMetrics";
  const VERSION: &'static str = METRICS_API_VERSION;
  const URL_PATH_SEGMENT: &'static str = "pods";
  type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for PodMetrics {
  type Ty = ObjectMeta;

  fn metadata(&self) -> &Self::Ty {
    &self.metadata
  }

  fn metadata_mut(&mut self) -> &mut Self::Ty {
    &mut self.metadata
  }
}

/// The subset of a Deployment that the usage report relies on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StdDeployment {
  pub name: String,
  pub namespace: String,
  /// Number of desired pods. `None` when not specified on the resource
  pub replicas: Option<i32>,
  /// `.spec.selector.matchLabels`
  pub match_labels: Option<BTreeMap<String, String>>,
}

impl TryFrom<&apps::v1::Deployment> for StdDeployment {
  type Error = anyhow::Error;

  fn try_from(dplmnt: &apps::v1::Deployment) -> Result<Self> {
    let objmeta = &dplmnt.metadata;
    let name = objmeta.name.clone().context("Deployment is missing metadata.name")?;
    let namespace = objmeta
      .namespace
      .clone()
      .with_context(|| format!("Deployment {name} is missing metadata.namespace"))?;
    let spec = dplmnt.spec.as_ref();

    Ok(Self {
      name,
      namespace,
      replicas: spec.and_then(|s| s.replicas),
      match_labels: spec.and_then(|s| s.selector.match_labels.clone()),
    })
  }
}

/// The subset of a Pod that the usage report relies on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StdPod {
  pub name: String,
  pub namespace: String,
  pub labels: Option<BTreeMap<String, String>>,
}

impl TryFrom<&core::v1::Pod> for StdPod {
  type Error = anyhow::Error;

  fn try_from(pod: &core::v1::Pod) -> Result<Self> {
    let objmeta = &pod.metadata;
    let name = objmeta.name.clone().context("Pod is missing metadata.name")?;
    let namespace = objmeta
      .namespace
      .clone()
      .with_context(|| format!("Pod {name} is missing metadata.namespace"))?;

    Ok(Self {
      name,
      namespace,
      labels: objmeta.labels.clone(),
    })
  }
}

/// Returns all Deployments across all namespaces, in the order the API server listed them
pub async fn get_deployments(client: &Client) -> Result<Vec<StdDeployment>> {
  let api: Api<apps::v1::Deployment> = Api::all(client.clone());
  let deployment_list = api.list(&Default::default()).await?;

  deployment_list.items.iter().map(StdDeployment::try_from).collect()
}

/// Returns all Pods across all namespaces
pub async fn get_pods(client: &Client) -> Result<Vec<StdPod>> {
  let api: Api<core::v1::Pod> = Api::all(client.clone());
  let pod_list = api.list(&Default::default()).await?;

  pod_list.items.iter().map(StdPod::try_from).collect()
}

/// Returns the current usage samples for all Pods
///
/// Fails when the metrics API is not served by the cluster (no metrics-server installed)
pub async fn get_pod_metrics(client: &Client) -> Result<Vec<PodMetrics>> {
  let api: Api<PodMetrics> = Api::all(client.clone());
  let metrics_list = api.list(&Default::default()).await?;

  Ok(metrics_list.items)
}
