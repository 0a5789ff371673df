// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and kubeconfig utilities

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Create the Kubernetes client shared by every resource handler
#[instrument(skip(config), fields(kubeconfig = %config.kubeconfig))]
pub async fn create_client(config: &ProviderConfig) -> Result<Client> {
    let path = config.kubeconfig_path()?;
    let kubeconfig = load_kubeconfig(&path).await?;

    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..Default::default()
    };

    let client_config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    info!("Connecting to cluster at {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Read and parse a kubeconfig file
async fn load_kubeconfig(path: &Path) -> Result<Kubeconfig> {
    debug!("Reading kubeconfig from {}", path.display());

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        ProviderError::KubeconfigError(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_kubeconfig(&contents)
}

fn parse_kubeconfig(contents: &str) -> Result<Kubeconfig> {
    serde_yaml::from_str(contents)
        .map_err(|e| ProviderError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))
}
