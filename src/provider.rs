// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provider registration: the shared client handle and the registry of
//! resource types the host can drive.

use crate::config::{ProviderConfig, ReadPolicy};
use crate::constants::type_names;
use crate::error::{ProviderError, Result};
use crate::kubernetes::create_client;
use crate::resources::{decode, lifecycle, ManagedResource, ResourceState};
use crate::types::{
    EventListener, Pipeline, PipelineRun, Task, TaskRun, TriggerBinding, TriggerTemplate,
};
use kube::Client;
use schemars::schema::RootSchema;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Client handle and settings shared read-only by every lifecycle operation
#[derive(Clone)]
pub struct ProviderContext {
    client: Client,
    read_policy: ReadPolicy,
}

impl ProviderContext {
    pub fn new(client: Client, read_policy: ReadPolicy) -> Self {
        Self {
            client,
            read_policy,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }
}

/// Lifecycle operation requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

/// Every resource type the provider registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Task,
    TaskRun,
    Pipeline,
    PipelineRun,
    TriggerTemplate,
    TriggerBinding,
    EventListener,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Task,
        ResourceType::TaskRun,
        ResourceType::Pipeline,
        ResourceType::PipelineRun,
        ResourceType::TriggerTemplate,
        ResourceType::TriggerBinding,
        ResourceType::EventListener,
    ];

    pub fn type_name(self) -> &'static str {
        match self {
            ResourceType::Task => type_names::TASK,
            ResourceType::TaskRun => type_names::TASK_RUN,
            ResourceType::Pipeline => type_names::PIPELINE,
            ResourceType::PipelineRun => type_names::PIPELINE_RUN,
            ResourceType::TriggerTemplate => type_names::TRIGGER_TEMPLATE,
            ResourceType::TriggerBinding => type_names::TRIGGER_BINDING,
            ResourceType::EventListener => type_names::EVENT_LISTENER,
        }
    }

    /// JSON schema of the configuration tree this type accepts
    pub fn schema(self) -> RootSchema {
        match self {
            ResourceType::Task => schema_of::<Task>(),
            ResourceType::TaskRun => schema_of::<TaskRun>(),
            ResourceType::Pipeline => schema_of::<Pipeline>(),
            ResourceType::PipelineRun => schema_of::<PipelineRun>(),
            ResourceType::TriggerTemplate => schema_of::<TriggerTemplate>(),
            ResourceType::TriggerBinding => schema_of::<TriggerBinding>(),
            ResourceType::EventListener => schema_of::<EventListener>(),
        }
    }
}

fn schema_of<R: ManagedResource>() -> RootSchema {
    schemars::schema_for!(R::Config)
}

impl FromStr for ResourceType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.type_name() == s)
            .ok_or_else(|| ProviderError::UnknownResourceType(s.to_string()))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Entry point for the host: one configured client, every registered resource type.
#[derive(Clone)]
pub struct Provider {
    context: ProviderContext,
}

impl Provider {
    /// Build the provider around an existing client
    pub fn new(client: Client, read_policy: ReadPolicy) -> Self {
        Self {
            context: ProviderContext::new(client, read_policy),
        }
    }

    /// Build the single client handle from the cluster-access file
    pub async fn configure(config: &ProviderConfig) -> Result<Self> {
        let client = create_client(config).await?;
        info!(
            "Provider configured with read policy {}",
            config.read_policy
        );
        Ok(Self::new(client, config.read_policy))
    }

    pub async fn create(&self, kind: ResourceType, tree: Value) -> Result<ResourceState> {
        self.apply(kind, Operation::Create, tree, ResourceState::default())
            .await
    }

    pub async fn read(
        &self,
        kind: ResourceType,
        tree: Value,
        state: ResourceState,
    ) -> Result<ResourceState> {
        self.apply(kind, Operation::Read, tree, state).await
    }

    pub async fn update(
        &self,
        kind: ResourceType,
        tree: Value,
        state: ResourceState,
    ) -> Result<ResourceState> {
        self.apply(kind, Operation::Update, tree, state).await
    }

    pub async fn delete(
        &self,
        kind: ResourceType,
        tree: Value,
        state: ResourceState,
    ) -> Result<ResourceState> {
        self.apply(kind, Operation::Delete, tree, state).await
    }

    /// Decode `tree` for `kind` and run `op`, returning the resulting state
    #[instrument(skip(self, tree, state), fields(kind = %kind))]
    pub async fn apply(
        &self,
        kind: ResourceType,
        op: Operation,
        tree: Value,
        state: ResourceState,
    ) -> Result<ResourceState> {
        debug!("Dispatching {:?}", op);
        match kind {
            ResourceType::Task => self.run::<Task>(op, tree, state).await,
            ResourceType::TaskRun => self.run::<TaskRun>(op, tree, state).await,
            ResourceType::Pipeline => self.run::<Pipeline>(op, tree, state).await,
            ResourceType::PipelineRun => self.run::<PipelineRun>(op, tree, state).await,
            ResourceType::TriggerTemplate => self.run::<TriggerTemplate>(op, tree, state).await,
            ResourceType::TriggerBinding => self.run::<TriggerBinding>(op, tree, state).await,
            ResourceType::EventListener => self.run::<EventListener>(op, tree, state).await,
        }
    }

    async fn run<R: ManagedResource>(
        &self,
        op: Operation,
        tree: Value,
        mut state: ResourceState,
    ) -> Result<ResourceState> {
        let config: R::Config = decode(R::TYPE_NAME, tree)?;
        let ctx = &self.context;

        match op {
            Operation::Create => lifecycle::create::<R>(ctx, &config, &mut state).await?,
            Operation::Read => lifecycle::read::<R>(ctx, &config, &mut state).await?,
            Operation::Update => lifecycle::update::<R>(ctx, &config, &mut state).await?,
            Operation::Delete => lifecycle::delete::<R>(ctx, &config, &mut state).await?,
        }

        Ok(state)
    }
}
