// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid provider configuration: {0}")]
    ConfigError(String),

    #[error("Invalid {type_name} configuration: {source}")]
    InvalidResource {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("failed to create Tekton {kind}: {source}")]
    CreateFailed {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to read Tekton {kind}: {source}")]
    ReadFailed {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to delete Tekton {kind}: {source}")]
    DeleteFailed {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("Invalid manifest: {0}")]
    ManifestError(String),

    #[error("State file error: {0}")]
    StateError(String),
}

impl ProviderError {
    /// True when the wrapped remote error is a 404 from the API server
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::KubeError(e)
            | ProviderError::CreateFailed { source: e, .. }
            | ProviderError::ReadFailed { source: e, .. }
            | ProviderError::DeleteFailed { source: e, .. } => is_not_found(e),
            _ => false,
        }
    }
}

pub(crate) fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

pub type Result<T> = std::result::Result<T, ProviderError>;
