// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, default_service_account, ManagedResource, ParamConfig, ResourceIdentity};
use crate::constants::type_names;
use crate::types::params::PipelineRef;
use crate::types::pipeline_run::{PipelineRun, PipelineRunSpec};
use schemars::JsonSchema;
use serde::Deserialize;

/// Configuration of a `tekton_pipelinerun`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct PipelineRunConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    /// The name of the Tekton Pipeline to reference in this PipelineRun
    pub pipeline_ref_name: String,
    #[serde(default = "default_service_account")]
    pub service_account_name: String,
    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

impl From<&PipelineRunConfig> for PipelineRunSpec {
    fn from(config: &PipelineRunConfig) -> Self {
        PipelineRunSpec {
            pipeline_ref: Some(PipelineRef {
                name: config.pipeline_ref_name.clone(),
            }),
            service_account_name: Some(config.service_account_name.clone()),
            params: convert_all(&config.params),
        }
    }
}

impl ManagedResource for PipelineRun {
    type Config = PipelineRunConfig;
    const TYPE_NAME: &'static str = type_names::PIPELINE_RUN;

    fn identity(config: &PipelineRunConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &PipelineRunConfig) -> Self {
        PipelineRun {
            metadata: config.identity.object_meta(),
            spec: config.into(),
        }
    }
}
