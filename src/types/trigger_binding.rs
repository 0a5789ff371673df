// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::params::Param;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "triggers.tekton.dev", version = "v1alpha1", kind = "TriggerBinding")]
#[kube(namespaced)]
pub struct TriggerBindingSpec {
    /// Values extracted from the event payload, e.g. `$(body.head_commit.id)`
    #[serde(default)]
    pub params: Vec<Param>,
}
