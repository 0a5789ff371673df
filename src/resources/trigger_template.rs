// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{convert_all, ManagedResource, ResourceIdentity};
use crate::constants::type_names;
use crate::types::params::ParamSpec;
use crate::types::trigger_template::{TriggerResourceTemplate, TriggerTemplate, TriggerTemplateSpec};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Configuration of a `tekton_triggertemplate`
#[derive(Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct TriggerTemplateConfig {
    #[serde(flatten)]
    pub identity: ResourceIdentity,
    #[serde(default)]
    pub params: Vec<ParamDeclarationConfig>,
    pub resourcetemplates: Vec<ResourceTemplateConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ParamDeclarationConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// An object to instantiate when the template fires
#[derive(Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ResourceTemplateConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: BTreeMap<String, Value>,
    pub spec: BTreeMap<String, Value>,
}

impl From<&ParamDeclarationConfig> for ParamSpec {
    fn from(param: &ParamDeclarationConfig) -> Self {
        ParamSpec {
            name: param.name.clone(),
            description: param.description.clone(),
        }
    }
}

impl From<&ResourceTemplateConfig> for TriggerResourceTemplate {
    fn from(template: &ResourceTemplateConfig) -> Self {
        TriggerResourceTemplate {
            api_version: template.api_version.clone(),
            kind: template.kind.clone(),
            metadata: template.metadata.clone(),
            spec: template.spec.clone(),
        }
    }
}

impl From<&TriggerTemplateConfig> for TriggerTemplateSpec {
    fn from(config: &TriggerTemplateConfig) -> Self {
        TriggerTemplateSpec {
            params: convert_all(&config.params),
            resource_templates: convert_all(&config.resourcetemplates),
        }
    }
}

impl ManagedResource for TriggerTemplate {
    type Config = TriggerTemplateConfig;
    const TYPE_NAME: &'static str = type_names::TRIGGER_TEMPLATE;

    fn identity(config: &TriggerTemplateConfig) -> &ResourceIdentity {
        &config.identity
    }

    fn build(config: &TriggerTemplateConfig) -> Self {
        TriggerTemplate {
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

    fn push_template() -> TriggerTemplateConfig {
        decode(
            type_names::TRIGGER_TEMPLATE,
            json!({
                "name": "on-push",
                "params": [
                    { "name": "revision", "description": "commit to build" },
                    { "name": "repo-url" }
                ],
                "resourcetemplates": [{
                    "api_version": "tekton.dev/v1beta1",
                    "kind": "PipelineRun",
                    "metadata": { "generateName": "ci-run-" },
                    "spec": {
                        "pipelineRef": { "name": "ci" },
                        "params": [{ "name": "revision", "value": "$(tt.params.revision)" }]
                    }
                }]
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_build_params_with_optional_description() {
        let template = TriggerTemplate::build(&push_template());

        assert_eq!(
            template.spec.params,
            vec![
                ParamSpec {
                    name: "revision".to_string(),
                    description: Some("commit to build".to_string()),
                },
                ParamSpec {
                    name: "repo-url".to_string(),
                    description: None,
                },
            ]
        );
    }

    #[test]
    fn test_build_resource_templates() {
        let template = TriggerTemplate::build(&push_template());

        assert_eq!(template.spec.resource_templates.len(), 1);
        let resource = &template.spec.resource_templates[0];
        assert_eq!(resource.api_version, "tekton.dev/v1beta1");
        assert_eq!(resource.kind, "PipelineRun");
        assert_eq!(resource.metadata["generateName"], "ci-run-");
        assert_eq!(resource.spec["pipelineRef"], json!({ "name": "ci" }));
    }

    #[test]
    fn test_serialized_spec_uses_wire_names() {
        let value = serde_json::to_value(TriggerTemplate::build(&push_template())).unwrap();
        assert_eq!(value["apiVersion"], "triggers.tekton.dev/v1alpha1");
        let resource = &value["spec"]["resourcetemplates"][0];
        assert_eq!(resource["apiVersion"], "tekton.dev/v1beta1");
        assert!(value["spec"]["params"][1].get("description").is_none());
    }

    #[tokio::test]
    async fn test_create_uses_triggers_group() {
        let path = "/apis/triggers.tekton.dev/v1alpha1/namespaces/default/triggertemplates";
        let mock = MockService::new().on_create(path).on_get(
            &format!("{}/on-push", path),
            200,
            &object_json("triggers.tekton.dev/v1alpha1", "TriggerTemplate", "default", "on-push"),
        );
        let ctx = ProviderContext::new(mock.clone().into_client(), ReadPolicy::default());
        let mut state = ResourceState::default();

        lifecycle::create::<TriggerTemplate>(&ctx, &push_template(), &mut state)
            .await
            .unwrap();

        assert_eq!(state.id(), Some("on-push"));
        assert_eq!(mock.requests_with("POST")[0].path, path);
    }
}
