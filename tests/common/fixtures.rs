use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::api::ObjectMeta;

use kusage::k8s::resources::{ContainerMetrics, PodMetrics, StdDeployment, StdPod, Usage};

use super::mock_k8s::MockK8sClients;

fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
  pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Creates a Deployment selecting pods by the given `matchLabels`
pub fn make_deployment(name: &str, namespace: &str, replicas: i32, selector: &[(&str, &str)]) -> StdDeployment {
  StdDeployment {
    name: name.into(),
    namespace: namespace.into(),
    replicas: Some(replicas),
    match_labels: Some(labels(selector)),
  }
}

/// Creates a Pod with the given labels
pub fn make_pod(name: &str, namespace: &str, pod_labels: &[(&str, &str)]) -> StdPod {
  StdPod {
    name: name.into(),
    namespace: namespace.into(),
    labels: Some(labels(pod_labels)),
  }
}

/// Creates a metrics sample with one container per `(cpu, memory)` pair
pub fn make_pod_metrics(name: &str, namespace: &str, containers: &[(&str, &str)]) -> PodMetrics {
  PodMetrics {
    metadata: ObjectMeta {
      name: Some(name.into()),
      namespace: Some(namespace.into()),
      ..Default::default()
    },
    containers: containers
      .iter()
      .enumerate()
      .map(|(i, (cpu, memory))| ContainerMetrics {
        name: format!("container-{i}"),
        usage: Usage {
          cpu: Some(Quantity(cpu.to_string())),
          memory: Some(Quantity(memory.to_string())),
        },
      })
      .collect(),
    ..Default::default()
  }
}

/// The single `web` Deployment with one running pod and its metrics
pub fn web_cluster() -> MockK8sClients {
  MockK8sClients {
    deployments: vec![make_deployment("web", "default", 2, &[("app", "web")])],
    pods: vec![make_pod("web-abc", "default", &[("app", "web")])],
    pod_metrics: Some(vec![make_pod_metrics("web-abc", "default", &[("150m", "256Mi")])]),
  }
}

/// A small cluster with system and application workloads
pub fn mixed_cluster() -> MockK8sClients {
  MockK8sClients {
    deployments: vec![
      make_deployment("coredns", "kube-system", 2, &[("k8s-app", "kube-dns")]),
      make_deployment("traefik", "ingress", 1, &[("app.kubernetes.io/name", "traefik")]),
      make_deployment("api", "shop", 3, &[("app", "api")]),
      make_deployment("worker", "shop", 0, &[]),
    ],
    pods: vec![
      make_pod("coredns-1", "kube-system", &[("k8s-app", "kube-dns")]),
      make_pod("coredns-2", "kube-system", &[("k8s-app", "kube-dns")]),
      make_pod("traefik-1", "ingress", &[("app.kubernetes.io/name", "traefik")]),
      make_pod("api-1", "shop", &[("app", "api"), ("pod-template-hash", "abc")]),
      make_pod("api-2", "shop", &[("app", "api"), ("pod-template-hash", "abc")]),
      make_pod("api-3", "shop", &[("app", "api"), ("pod-template-hash", "abc")]),
      make_pod("worker-1", "shop", &[("app", "worker")]),
    ],
    pod_metrics: Some(vec![
      make_pod_metrics("coredns-1", "kube-system", &[("3m", "12Mi")]),
      make_pod_metrics("coredns-2", "kube-system", &[("2m", "13Mi")]),
      make_pod_metrics("traefik-1", "ingress", &[("1800000n", "40960Ki")]),
      make_pod_metrics("api-1", "shop", &[("250m", "128Mi"), ("5m", "16Mi")]),
      make_pod_metrics("api-2", "shop", &[("0.25", "134217728")]),
      make_pod_metrics("worker-1", "shop", &[("1", "1Gi")]),
    ]),
  }
}
