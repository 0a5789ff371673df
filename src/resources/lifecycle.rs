// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create, read, update and delete of any managed Tekton kind.
//!
//! Each operation issues at most one remote call of its own. The resulting
//! state machine per instance is `unknown -> present` on create and
//! `present -> unknown` when a read finds the object gone or a delete succeeds.

use super::{ManagedResource, ResourceState};
use crate::config::ReadPolicy;
use crate::error::{is_not_found, ProviderError, Result};
use crate::provider::ProviderContext;
use kube::api::{DeleteParams, PostParams};
use kube::Api;
use tracing::{debug, info, instrument, warn};

fn api<R: ManagedResource>(ctx: &ProviderContext, namespace: &str) -> Api<R> {
    Api::namespaced(ctx.client().clone(), namespace)
}

/// Submit the object built from `config`, then refresh observed state.
///
/// On failure the state is left untouched.
#[instrument(
    skip(ctx, config, state),
    fields(kind = R::TYPE_NAME, name = %R::identity(config).name)
)]
pub async fn create<R: ManagedResource>(
    ctx: &ProviderContext,
    config: &R::Config,
    state: &mut ResourceState,
) -> Result<()> {
    let identity = R::identity(config);
    let object = R::build(config);

    api::<R>(ctx, &identity.namespace)
        .create(&PostParams::default(), &object)
        .await
        .map_err(|source| ProviderError::CreateFailed {
            kind: R::kind_name(),
            source,
        })?;

    info!(
        "Created {} {}/{}",
        R::kind_name(),
        identity.namespace,
        identity.name
    );

    state.set_id(identity.name.clone());

    if let Err(e) = read::<R>(ctx, config, state).await {
        warn!(
            "Refreshing {} {}/{} after create failed, clearing identifier: {}",
            R::kind_name(),
            identity.namespace,
            identity.name,
            e
        );
        state.clear();
    }

    Ok(())
}

/// Check that the recorded object still exists, clearing the identifier if it does not.
///
/// Only metadata is fetched, so the object's spec never has to decode.
#[instrument(
    skip(ctx, config, state),
    fields(kind = R::TYPE_NAME, id = ?state.id())
)]
pub async fn read<R: ManagedResource>(
    ctx: &ProviderContext,
    config: &R::Config,
    state: &mut ResourceState,
) -> Result<()> {
    let Some(id) = state.id().map(str::to_owned) else {
        debug!("No identifier recorded, nothing to read");
        return Ok(());
    };
    let namespace = &R::identity(config).namespace;

    match api::<R>(ctx, namespace).get_metadata(&id).await {
        Ok(_) => {
            debug!("{} {}/{} exists", R::kind_name(), namespace, id);
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            info!(
                "{} {}/{} no longer exists, clearing identifier",
                R::kind_name(),
                namespace,
                id
            );
            state.clear();
            Ok(())
        }
        Err(e) => match ctx.read_policy() {
            ReadPolicy::AnyError => {
                warn!(
                    "Failed to read {} {}/{}, treating as absent: {}",
                    R::kind_name(),
                    namespace,
                    id,
                    e
                );
                state.clear();
                Ok(())
            }
            ReadPolicy::NotFoundOnly => Err(ProviderError::ReadFailed {
                kind: R::kind_name(),
                source: e,
            }),
        },
    }
}

/// Tekton objects cannot be changed after submission, so update only re-reads.
pub async fn update<R: ManagedResource>(
    ctx: &ProviderContext,
    config: &R::Config,
    state: &mut ResourceState,
) -> Result<()> {
    read::<R>(ctx, config, state).await
}

/// Delete the recorded object. A missing object is an error here, unlike in [`read`].
#[instrument(
    skip(ctx, config, state),
    fields(kind = R::TYPE_NAME, name = %R::identity(config).name)
)]
pub async fn delete<R: ManagedResource>(
    ctx: &ProviderContext,
    config: &R::Config,
    state: &mut ResourceState,
) -> Result<()> {
    let identity = R::identity(config);
    let name = state
        .id()
        .map(str::to_owned)
        .unwrap_or_else(|| identity.name.clone());

    api::<R>(ctx, &identity.namespace)
        .delete(&name, &DeleteParams::default())
        .await
        .map_err(|source| ProviderError::DeleteFailed {
            kind: R::kind_name(),
            source,
        })?;

    info!(
        "Deleted {} {}/{}",
        R::kind_name(),
        identity.namespace,
        name
    );

    state.clear();
    Ok(())
}
