use anyhow::{Result, bail};

use kusage::clients::K8sClients;
use kusage::k8s::resources::{PodMetrics, StdDeployment, StdPod};

/// Mock K8s client for testing
///
/// `pod_metrics: None` simulates a cluster without metrics-server
#[derive(Clone, Default)]
pub struct MockK8sClients {
  pub deployments: Vec<StdDeployment>,
  pub pods: Vec<StdPod>,
  pub pod_metrics: Option<Vec<PodMetrics>>,
}

impl K8sClients for MockK8sClients {
  async fn get_deployments(&self) -> Result<Vec<StdDeployment>> {
    Ok(self.deployments.clone())
  }

  async fn get_pods(&self) -> Result<Vec<StdPod>> {
    Ok(self.pods.clone())
  }

  async fn get_pod_metrics(&self) -> Result<Vec<PodMetrics>> {
    match &self.pod_metrics {
      Some(metrics) => Ok(metrics.clone()),
      None => bail!("the server could not find the requested resource (get pods.metrics.k8s.io)"),
    }
  }
}

/// Mock that returns errors for all methods
pub struct MockK8sClientsError;

impl K8sClients for MockK8sClientsError {
  async fn get_deployments(&self) -> Result<Vec<StdDeployment>> { bail!("mock K8s error") }
  async fn get_pods(&self) -> Result<Vec<StdPod>> { bail!("mock K8s error") }
  async fn get_pod_metrics(&self) -> Result<Vec<PodMetrics>> { bail!("mock K8s error") }
}

/// Mock where Deployments list fine but listing Pods fails
pub struct MockK8sClientsPodsError {
  pub deployments: Vec<StdDeployment>,
}

impl K8sClients for MockK8sClientsPodsError {
  async fn get_deployments(&self) -> Result<Vec<StdDeployment>> {
    Ok(self.deployments.clone())
  }

  async fn get_pods(&self) -> Result<Vec<StdPod>> { bail!("mock K8s error") }
  async fn get_pod_metrics(&self) -> Result<Vec<PodMetrics>> { Ok(vec![]) }
}
