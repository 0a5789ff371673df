// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace used when a resource does not declare one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Service account used by runs that do not declare one
pub const DEFAULT_SERVICE_ACCOUNT: &str = "default";

/// Resource type names registered with the host
pub mod type_names {
    pub const TASK: &str = "tekton_task";
    pub const TASK_RUN: &str = "tekton_taskrun";
    pub const PIPELINE: &str = "tekton_pipeline";
    pub const PIPELINE_RUN: &str = "tekton_pipelinerun";
    pub const TRIGGER_TEMPLATE: &str = "tekton_triggertemplate";
    pub const TRIGGER_BINDING: &str = "tekton_triggerbinding";
    pub const EVENT_LISTENER: &str = "tekton_eventlistener";
}

/// Environment variables read by the provider configuration
pub mod env {
    pub const KUBECONFIG: &str = "KUBECONFIG";
    pub const KUBE_CONTEXT: &str = "TEKTON_KUBE_CONTEXT";
    pub const READ_POLICY: &str = "TEKTON_READ_POLICY";
}
