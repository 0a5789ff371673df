// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, ManagedResource, ResourceIdentity};
use crate::constants::type_names;
use crate::types::event_listener::{
    EventListener, EventListenerBinding, EventListenerSpec, EventListenerTemplate,
    EventListenerTrigger,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Configuration of a `tekton_eventlistener`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct EventListenerConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    pub triggers: Vec<TriggerConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct TriggerConfig {
    pub trigger_template_name: String,
    pub trigger_binding_name: String,
}

impl From<&TriggerConfig> for EventListenerTrigger {
    fn from(trigger: &TriggerConfig) -> Self {
        EventListenerTrigger {
            template: EventListenerTemplate {
                template_ref: trigger.trigger_template_name.clone(),
            },
            bindings: vec![EventListenerBinding {
                binding_ref: trigger.trigger_binding_name.clone(),
            }],
        }
    }
}

impl From<&EventListenerConfig> for EventListenerSpec {
    fn from(config: &EventListenerConfig) -> Self {
        EventListenerSpec {
            triggers: convert_all(&config.triggers),
        }
    }
}

impl ManagedResource for EventListener {
    type Config = EventListenerConfig;
    const TYPE_NAME: &'static str = type_names::EVENT_LISTENER;

    fn identity(config: &EventListenerConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &EventListenerConfig) -> Self {
        EventListener {
            metadata: config.identity.object_meta(),
            spec: config.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReadPolicy;
    use crate::provider::ProviderContext;
    use crate::resources::{decode, lifecycle, ResourceState};
    use crate::test_utils::{object_json, MockService};
    use serde_json::json;

    fn listener() -> EventListenerConfig {
        decode(
            type_names::EVENT_LISTENER,
            json!({
                "name": "github",
                "triggers": [
                    { "trigger_template_name": "on-push", "trigger_binding_name": "github-push" },
                    { "trigger_template_name": "on-pr", "trigger_binding_name": "github-pr" }
                ]
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_build_triggers_in_order_with_one_binding_each() {
        let listener = EventListener::build(&listener());

        let pairs: Vec<_> = listener
            .spec
            .triggers
            .iter()
            .map(|t| {
                assert_eq!(t.bindings.len(), 1);
                (t.template.template_ref.as_str(), t.bindings[0].binding_ref.as_str())
            })
            .collect();
        assert_eq!(pairs, [("on-push", "github-push"), ("on-pr", "github-pr")]);
    }

    #[test]
    fn test_serialized_trigger_shape() {
        let value = serde_json::to_value(EventListener::build(&listener())).unwrap();
        assert_eq!(
            value["spec"]["triggers"][0],
            json!({ "template": { "ref": "on-push" }, "bindings": [{ "ref": "github-push" }] })
        );
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let path = "/apis/triggers.tekton.dev/v1alpha1/namespaces/default/eventlisteners";
        let mock = MockService::new().on_create(path).on_get(
            &format!("{}/github", path),
            200,
            &object_json("triggers.tekton.dev/v1alpha1", "EventListener", "default", "github"),
        );
        let ctx = ProviderContext::new(mock.clone().into_client(), ReadPolicy::default());
        let mut state = ResourceState::default();

        lifecycle::create::<EventListener>(&ctx, &listener(), &mut state)
            .await
            .unwrap();

        assert_eq!(state.id(), Some("github"));
        let submitted = mock.requests_with("POST")[0].json();
        assert_eq!(submitted["spec"]["triggers"][1]["template"]["ref"], "on-pr");
    }
}
