// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, ManagedResource, ResourceIdentity, WorkspaceConfig};
use crate::constants::type_names;
use crate::types::params::TaskRef;
use crate::types::pipeline::{Pipeline, PipelineSpec, PipelineTask, WorkspacePipelineTaskBinding};
use schemars::JsonSchema;
use serde::Deserialize;

/// Configuration of a `tekton_pipeline`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct PipelineConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    pub tasks: Vec<PipelineTaskConfig>,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct PipelineTaskConfig {
    pub name: String,
    /// The name of the Tekton Task to reference in this Pipeline
    pub task_ref_name: String,
    /// Names of the pipeline tasks this one waits for
    #[serde(default)]
    pub run_after: Vec<String>,
    #[serde(default)]
    pub workspaces: Vec<TaskWorkspaceBindingConfig>,
}

/// Maps the task-local workspace `name` to the pipeline workspace `workspace_ref`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct TaskWorkspaceBindingConfig {
    pub name: String,
    pub workspace_ref: String,
}

impl From<&TaskWorkspaceBindingConfig> for WorkspacePipelineTaskBinding {
    fn from(binding: &TaskWorkspaceBindingConfig) -> Self {
        WorkspacePipelineTaskBinding {
            name: binding.name.clone(),
            workspace: binding.workspace_ref.clone(),
        }
    }
}

impl From<&PipelineTaskConfig> for PipelineTask {
    fn from(task: &PipelineTaskConfig) -> Self {
        PipelineTask {
            name: task.name.clone(),
            task_ref: Some(TaskRef {
                name: task.task_ref_name.clone(),
            }),
            run_after: task.run_after.clone(),
            workspaces: convert_all(&task.workspaces),
        }
    }
}

impl From<&PipelineConfig> for PipelineSpec {
    fn from(config: &PipelineConfig) -> Self {
        PipelineSpec {
            tasks: convert_all(&config.tasks),
            workspaces: convert_all(&config.workspaces),
        }
    }
}

impl ManagedResource for Pipeline {
    type Config = PipelineConfig;
    const TYPE_NAME: &'static str = type_names::PIPELINE;

    fn identity(config: &PipelineConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &PipelineConfig) -> Self {
        Pipeline {
            metadata: config.identity.object_meta(),
            spec: config.into(),
        }
    }
}
