// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, ManagedResource, ParamConfig, ResourceIdentity};
use crate::constants::type_names;
use crate::types::trigger_binding::{TriggerBinding, TriggerBindingSpec};
use schemars::JsonSchema;
use serde::Deserialize;

/// Configuration of a `tekton_triggerbinding`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct TriggerBindingConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    pub bindings: Vec<ParamConfig>,
}

impl From<&TriggerBindingConfig> for TriggerBindingSpec {
    fn from(config: &TriggerBindingConfig) -> Self {
        TriggerBindingSpec {
            params: convert_all(&config.bindings),
        }
    }
}

impl ManagedResource for TriggerBinding {
    type Config = TriggerBindingConfig;
    const TYPE_NAME: &'static str = type_names::TRIGGER_BINDING;

    fn identity(config: &TriggerBindingConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &TriggerBindingConfig) -> Self {
        TriggerBinding {
            metadata: config.identity.object_meta(),
            spec: config.into(),
        }
    }
}
