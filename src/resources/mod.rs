// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-kind configuration schemas, converters and the lifecycle they share.

pub mod decode;
pub mod event_listener;
pub mod lifecycle;
pub mod pipeline;
pub mod pipeline_run;
pub mod task;
pub mod task_run;
pub mod trigger_binding;
pub mod trigger_template;

use crate::constants::{DEFAULT_NAMESPACE, DEFAULT_SERVICE_ACCOUNT};
use crate::types::params::{Param, WorkspaceDeclaration};
use k8s_openapi::NamespaceResourceScope;
use kube::api::ObjectMeta;
use kube::Resource;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use decode::decode;
pub use event_listener::EventListenerConfig;
pub use pipeline::PipelineConfig;
pub use pipeline_run::PipelineRunConfig;
pub use task::TaskConfig;
pub use task_run::TaskRunConfig;
pub use trigger_binding::TriggerBindingConfig;
pub use trigger_template::TriggerTemplateConfig;

/// A Tekton kind the provider can create, read and delete.
///
/// Every kind is immutable once submitted, so there is no in-place update:
/// the lifecycle re-reads observed state instead.
pub trait ManagedResource:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Typed configuration decoded from the host's configuration tree
    type Config: DeserializeOwned + JsonSchema + Debug + Send + Sync;

    /// Name the resource type is registered under
    const TYPE_NAME: &'static str;

    fn identity(config: &Self::Config) -> &ResourceIdentity;

    /// Convert the configuration into the object submitted on create
    fn build(config: &Self::Config) -> Self;

    fn kind_name() -> String {
        Self::kind(&()).into_owned()
    }
}

/// Name and namespace of a declared resource; the name doubles as its identifier
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ResourceIdentity {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl ResourceIdentity {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn object_meta(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.name.clone()),
            namespace: Some(self.namespace.clone()),
            ..Default::default()
        }
    }
}

/// Identifier recorded by the host for one resource instance.
///
/// `None` means the instance is unknown and will be created on the next apply.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl ResourceState {
    /// Build a state from the host's opaque identifier; an empty string is no identifier
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            id: (!id.is_empty()).then_some(id),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into()).filter(|id| !id.is_empty());
    }

    pub fn clear(&mut self) {
        self.id = None;
    }
}

/// A `{name, value}` parameter as declared in configuration
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ParamConfig {
    pub name: String,
    pub value: String,
}

impl From<&ParamConfig> for Param {
    fn from(param: &ParamConfig) -> Self {
        Param {
            name: param.name.clone(),
            value: param.value.clone().into(),
        }
    }
}

/// A named workspace as declared in configuration
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct WorkspaceConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&WorkspaceConfig> for WorkspaceDeclaration {
    fn from(workspace: &WorkspaceConfig) -> Self {
        WorkspaceDeclaration {
            name: workspace.name.clone(),
            description: workspace.description.clone(),
        }
    }
}

pub(crate) fn convert_all<'a, C: 'a, T: From<&'a C>>(items: &'a [C]) -> Vec<T> {
    items.iter().map(T::from).collect()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_service_account() -> String {
    DEFAULT_SERVICE_ACCOUNT.to_string()
}
