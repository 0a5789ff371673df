// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "triggers.tekton.dev", version = "v1alpha1", kind = "EventListener")]
#[kube(namespaced)]
pub struct EventListenerSpec {
    #[serde(default)]
    pub triggers: Vec<EventListenerTrigger>,
}

/// Pairs one TriggerTemplate with the bindings that feed it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub struct EventListenerTrigger {
    pub template: EventListenerTemplate,
    #[serde(default)]
    pub bindings: Vec<EventListenerBinding>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub struct EventListenerTemplate {
    #[serde(rename = "ref")]
    pub template_ref: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub struct EventListenerBinding {
    #[serde(rename = "ref")]
    pub binding_ref: String,
}
