use anyhow::{Context, Result};
use kube::config::KubeConfigOptions;
use tracing::{debug, info};

use crate::k8s::resources::{self as k8s_resources, PodMetrics, StdDeployment, StdPod};

/// Trait abstracting all Kubernetes API operations used by kusage
pub trait K8sClients {
  fn get_deployments(&self) -> impl std::future::Future<Output = Result<Vec<StdDeployment>>> + Send;
  fn get_pods(&self) -> impl std::future::Future<Output = Result<Vec<StdPod>>> + Send;
  fn get_pod_metrics(&self) -> impl std::future::Future<Output = Result<Vec<PodMetrics>>> + Send;
}

/// Real Kubernetes client implementation wrapping kube-rs
pub struct RealK8sClients {
  client: kube::Client,
}

impl RealK8sClients {
  /// Connects using the in-cluster ServiceAccount when available, otherwise the local kubeconfig
  ///
  /// An explicit `context` always selects the local kubeconfig
  pub async fn new(context: Option<&str>) -> Result<Self> {
    let config = match context {
      Some(context) => kubeconfig(Some(context)).await?,
      None => match kube::Config::incluster() {
        Ok(config) => {
          info!("Using in-cluster config (ServiceAccount)");
          config
        }
        Err(err) => {
          debug!("In-cluster config unavailable: {err}");
          kubeconfig(None).await?
        }
      },
    };

    match kube::Client::try_from(config) {
      Ok(client) => Ok(Self { client }),
      Err(e) => {
        anyhow::bail!(
          "Unable to connect to cluster: {e}\n\n\
          Ensure kubeconfig file is present and updated to connect to the cluster."
        );
      }
    }
  }
}

async fn kubeconfig(context: Option<&str>) -> Result<kube::Config> {
  let options = KubeConfigOptions {
    context: context.map(String::from),
    ..Default::default()
  };

  let config = kube::Config::from_kubeconfig(&options)
    .await
    .context("Unable to load local kubeconfig")?;

  match context {
    Some(context) => info!("Using local kubeconfig (context {context})"),
    None => info!("Using local kubeconfig"),
  }

  Ok(config)
}

impl K8sClients for RealK8sClients {
  async fn get_deployments(&self) -> Result<Vec<StdDeployment>> {
    k8s_resources::get_deployments(&self.client).await
  }

  async fn get_pods(&self) -> Result<Vec<StdPod>> {
    k8s_resources::get_pods(&self.client).await
  }

  async fn get_pod_metrics(&self) -> Result<Vec<PodMetrics>> {
    k8s_resources::get_pod_metrics(&self.client).await
  }
}
