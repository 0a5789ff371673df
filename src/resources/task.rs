// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, ManagedResource, ResourceIdentity, WorkspaceConfig};
use crate::constants::type_names;
use crate::types::task::{Step, Task, TaskSpec};
use schemars::JsonSchema;
use serde::Deserialize;

/// Configuration of a `tekton_task`
#[derive(Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TaskConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    pub steps: Vec<StepConfig>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct StepConfig {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl From<&StepConfig> for Step {
    fn from(step: &StepConfig) -> Self {
        Step {
            name: step.name.clone(),
            image: step.image.clone(),
            command: step.command.clone(),
            args: step.args.clone(),
        }
    }
}

impl From<&TaskConfig> for TaskSpec {
    fn from(config: &TaskConfig) -> Self {
        TaskSpec {
            steps: convert_all(&config.steps),
            workspaces: convert_all(&config.workspaces),
        }
    }
}

impl ManagedResource for Task {
    type Config = TaskConfig;
    const TYPE_NAME: &'static str = type_names::TASK;

    fn identity(config: &TaskConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &TaskConfig) -> Self {
        Task {
            metadata: config.identity.object_meta(),
            spec: config.into(),
        }
    }
}
