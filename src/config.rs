use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::Category;

/// Top-level configuration loaded from `.kusage.yaml` or an explicit path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub classification: ClassificationConfig,
}

/// Decides which Deployments are reported as system workloads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassificationConfig {
  /// Every Deployment in these namespaces is a system workload (default `kube-system`).
  #[serde(default = "default_system_namespaces")]
  pub system_namespaces: Vec<String>,

  /// Deployment names treated as system workloads in any namespace.
  #[serde(default = "default_system_names")]
  pub system_names: Vec<String>,
}

fn default_system_namespaces() -> Vec<String> {
  vec!["kube-system".to_string()]
}

fn default_system_names() -> Vec<String> {
  ["coredns", "local-path-provisioner", "metrics-server", "traefik"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ClassificationConfig {
  fn default() -> Self {
    Self {
      system_namespaces: default_system_namespaces(),
      system_names: default_system_names(),
    }
  }
}

impl ClassificationConfig {
  /// Returns `SYS` for a system namespace or a well-known system component name, `APP` otherwise.
  pub fn classify(&self, name: &str, namespace: &str) -> Category {
    if self.system_namespaces.iter().any(|ns| ns == namespace) || self.system_names.iter().any(|n| n == name) {
      Category::Sys
    } else {
      Category::App
    }
  }
}

const DEFAULT_CONFIG_FILE: &str = ".kusage.yaml";

/// Load configuration from an explicit path, the default `.kusage.yaml` in the
/// current working directory, or fall back to `Config::default()`.
pub fn load(path: Option<&str>) -> Result<Config> {
  load_from(path, std::env::current_dir().ok().as_deref())
}

fn load_from(path: Option<&str>, base_dir: Option<&std::path::Path>) -> Result<Config> {
  if let Some(p) = path {
    let contents = std::fs::read_to_string(p).with_context(|| format!("Failed to read config file: {p}"))?;
    let config: Config =
      serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config file: {p}"))?;
    return Ok(config);
  }

  if let Some(dir) = base_dir {
    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
      let contents = std::fs::read_to_string(&default_path)
        .with_context(|| format!("Failed to read config file: {}", default_path.display()))?;
      let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", default_path.display()))?;
      return Ok(config);
    }
  }

  Ok(Config::default())
}
