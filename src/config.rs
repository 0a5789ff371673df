// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as env_vars;
use crate::error::{ProviderError, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How a failed lookup during Read is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReadPolicy {
    /// Only a 404 clears the identifier, every other failure is surfaced
    #[default]
    NotFoundOnly,
    /// Any failure clears the identifier
    AnyError,
}

impl FromStr for ReadPolicy {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "not-found-only" => Ok(ReadPolicy::NotFoundOnly),
            "any-error" => Ok(ReadPolicy::AnyError),
            other => Err(ProviderError::ConfigError(format!(
                "unknown read policy '{}', expected 'not-found-only' or 'any-error'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadPolicy::NotFoundOnly => f.write_str("not-found-only"),
            ReadPolicy::AnyError => f.write_str("any-error"),
        }
    }
}

/// Provider configuration, resolved once per process
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Path to the cluster-access (kubeconfig) file, `~/` not yet expanded
    pub kubeconfig: String,
    /// Kubeconfig context to use instead of the file's current context
    pub context: Option<String>,
    pub read_policy: ReadPolicy,
}

impl ProviderConfig {
    /// Pick the explicit kubeconfig path, falling back to the environment value
    pub fn resolve(explicit: Option<String>, from_env: Option<String>) -> Result<Self> {
        let kubeconfig = explicit
            .filter(|p| !p.is_empty())
            .or(from_env)
            .unwrap_or_default();

        if kubeconfig.is_empty() {
            return Err(ProviderError::ConfigError(format!(
                "{} environment variable or kubeconfig file must be provided",
                env_vars::KUBECONFIG
            )));
        }

        Ok(ProviderConfig {
            kubeconfig,
            context: None,
            read_policy: ReadPolicy::default(),
        })
    }

    /// Load configuration from environment variables, preferring an explicit kubeconfig path
    pub fn from_env(explicit: Option<String>) -> Result<Self> {
        Self::from_lookup(explicit, |key| env::var(key).ok())
    }

    fn from_lookup(
        explicit: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::resolve(explicit, lookup(env_vars::KUBECONFIG))?;
        config.context = lookup(env_vars::KUBE_CONTEXT).filter(|c| !c.is_empty());
        if let Some(policy) = lookup(env_vars::READ_POLICY).filter(|p| !p.is_empty()) {
            config.read_policy = policy.parse()?;
        }
        Ok(config)
    }

    /// Kubeconfig path with a leading `~/` expanded
    pub fn kubeconfig_path(&self) -> Result<PathBuf> {
        expand_home(&self.kubeconfig)
    }
}

/// Expand a leading `~/` to the invoking user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                ProviderError::ConfigError("failed to get home directory".to_string())
            })?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let config = ProviderConfig::resolve(
            Some("/etc/kube/config".to_string()),
            Some("/home/me/.kube/config".to_string()),
        )
        .unwrap();
        assert_eq!(config.kubeconfig, "/etc/kube/config");
        assert_eq!(config.read_policy, ReadPolicy::NotFoundOnly);
    }

    #[test]
    fn test_resolve_falls_back_to_env() {
        let config =
            ProviderConfig::resolve(None, Some("/home/me/.kube/config".to_string())).unwrap();
        assert_eq!(config.kubeconfig, "/home/me/.kube/config");
    }

    #[test]
    fn test_resolve_empty_explicit_falls_back_to_env() {
        let config =
            ProviderConfig::resolve(Some(String::new()), Some("/tmp/kc".to_string())).unwrap();
        assert_eq!(config.kubeconfig, "/tmp/kc");
    }

    #[test]
    fn test_resolve_missing_path_fails() {
        let err = ProviderConfig::resolve(None, None).unwrap_err();
        assert!(matches!(err, ProviderError::ConfigError(_)));
        assert!(err.to_string().contains("KUBECONFIG"));
    }

    #[test]
    fn test_resolve_empty_env_fails() {
        assert!(ProviderConfig::resolve(None, Some(String::new())).is_err());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_from_lookup_reads_context_and_policy() {
        let config = ProviderConfig::from_lookup(
            None,
            vars(&[
                ("KUBECONFIG", "/tmp/kc"),
                ("TEKTON_KUBE_CONTEXT", "staging"),
                ("TEKTON_READ_POLICY", "any-error"),
            ]),
        )
        .unwrap();
        assert_eq!(config.kubeconfig, "/tmp/kc");
        assert_eq!(config.context.as_deref(), Some("staging"));
        assert_eq!(config.read_policy, ReadPolicy::AnyError);
    }

    #[test]
    fn test_from_lookup_defaults_without_optional_vars() {
        let config = ProviderConfig::from_lookup(
            Some("/etc/kube/config".to_string()),
            vars(&[("TEKTON_KUBE_CONTEXT", ""), ("TEKTON_READ_POLICY", "")]),
        )
        .unwrap();
        assert_eq!(config.kubeconfig, "/etc/kube/config");
        assert_eq!(config.context, None);
        assert_eq!(config.read_policy, ReadPolicy::NotFoundOnly);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_policy() {
        let err = ProviderConfig::from_lookup(
            None,
            vars(&[("KUBECONFIG", "/tmp/kc"), ("TEKTON_READ_POLICY", "sometimes")]),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::ConfigError(_)));
    }

    #[test]
    fn test_read_policy_value_names() {
        use clap::ValueEnum;
        assert_eq!(
            <ReadPolicy as ValueEnum>::from_str("any-error", false).unwrap(),
            ReadPolicy::AnyError
        );
        let names: Vec<_> = ReadPolicy::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, ["not-found-only", "any-error"]);
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home("/etc/kube/config").unwrap(),
            PathBuf::from("/etc/kube/config")
        );
    }

    #[test]
    fn test_expand_home_only_touches_leading_tilde_slash() {
        assert_eq!(expand_home("~config").unwrap(), PathBuf::from("~config"));
        assert_eq!(expand_home("a/~/b").unwrap(), PathBuf::from("a/~/b"));
    }

    #[test]
    fn test_expand_home_expands_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_home("~/.kube/config").unwrap(),
            home.join(".kube/config")
        );
    }

    #[test]
    fn test_read_policy_parse() {
        assert_eq!(
            "not-found-only".parse::<ReadPolicy>().unwrap(),
            ReadPolicy::NotFoundOnly
        );
        assert_eq!("any-error".parse::<ReadPolicy>().unwrap(), ReadPolicy::AnyError);
        assert!("sometimes".parse::<ReadPolicy>().is_err());
    }

    #[test]
    fn test_read_policy_display_round_trips() {
        for policy in [ReadPolicy::NotFoundOnly, ReadPolicy::AnyError] {
            assert_eq!(policy.to_string().parse::<ReadPolicy>().unwrap(), policy);
        }
    }
}
