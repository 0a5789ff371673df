// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::params::ParamSpec;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "triggers.tekton.dev", version = "v1alpha1", kind = "TriggerTemplate")]
#[kube(namespaced)]
pub struct TriggerTemplateSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamSpec>,
    #[serde(default, rename = "resourcetemplates")]
    pub resource_templates: Vec<TriggerResourceTemplate>,
}

/// An object instantiated each time the template fires
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResourceTemplate {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default)]
    pub spec: BTreeMap<String, Value>,
}
