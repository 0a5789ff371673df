// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, default_service_account, ManagedResource, ParamConfig, ResourceIdentity};
use crate::constants::type_names;
use crate::types::params::TaskRef;
use crate::types::task_run::{TaskRun, TaskRunSpec};
use schemars::JsonSchema;
use serde::Deserialize;

/// Configuration of a `tekton_taskrun`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct TaskRunConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    /// The name of the Tekton Task to run
    pub task_ref_name: String,
    #[serde(default = "default_service_account")]
    pub service_account_name: String,
    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

impl From<&TaskRunConfig> for TaskRunSpec {
    fn from(config: &TaskRunConfig) -> Self {
        TaskRunSpec {
            task_ref: Some(TaskRef {
                name: config.task_ref_name.clone(),
            }),
            service_account_name: Some(config.service_account_name.clone()),
            params: convert_all(&config.params),
        }
    }
}

impl ManagedResource for TaskRun {
    type Config = TaskRunConfig;
    const TYPE_NAME: &'static str = type_names::TASK_RUN;

    fn identity(config: &TaskRunConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &TaskRunConfig) -> Self {
        TaskRun {
            metadata: config.identity.object_meta(),
            spec: config.into(),
        }
    }
}
