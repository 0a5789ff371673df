// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Tekton custom resources as submitted to the cluster.

pub mod event_listener;
pub mod params;
pub mod pipeline;
pub mod pipeline_run;
pub mod task;
pub mod task_run;
pub mod trigger_binding;
pub mod trigger_template;

pub use event_listener::{EventListener, EventListenerSpec};
pub use pipeline::{Pipeline, PipelineSpec};
pub use pipeline_run::{PipelineRun, PipelineRunSpec};
pub use task::{Task, TaskSpec};
pub use task_run::{TaskRun, TaskRunSpec};
pub use trigger_binding::{TriggerBinding, TriggerBindingSpec};
pub use trigger_template::{TriggerTemplate, TriggerTemplateSpec};
