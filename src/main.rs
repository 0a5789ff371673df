// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use tekton_provider::config::{ProviderConfig, ReadPolicy};
use tekton_provider::manifest::{self, Manifest, StateFile};
use tekton_provider::{Provider, ResourceType};

/// Manage Tekton pipeline and trigger resources from a declarative manifest.
#[derive(Parser)]
#[command(name = "tekton-provider")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Settings {
    /// Path to the Kubernetes configuration file [env: KUBECONFIG]
    #[arg(long, global = true)]
    kubeconfig: Option<String>,

    /// Kubeconfig context to use instead of the current one [env: TEKTON_KUBE_CONTEXT]
    #[arg(long, global = true)]
    context: Option<String>,

    /// How failed reads are treated [env: TEKTON_READ_POLICY]
    #[arg(long, global = true, value_enum)]
    read_policy: Option<ReadPolicy>,

    /// File recording the identifiers of managed resources
    #[arg(long, global = true, default_value = "tekton.state.json")]
    state: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Create declared resources and delete the ones no longer declared
    Apply {
        /// Path to the manifest YAML file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Drop recorded resources that no longer exist in the cluster
    Refresh,

    /// Delete every recorded resource
    Destroy,

    /// Print the configuration schema of one or all resource types
    Schema {
        /// Resource type name, e.g. tekton_task
        #[arg(value_name = "TYPE")]
        type_name: Option<String>,
    },
}

/// Commands that talk to the cluster
enum Action {
    Apply(Manifest),
    Refresh,
    Destroy,
}

impl Settings {
    /// Environment settings, overridden by any flags given on the command line
    fn provider_config(&self) -> Result<ProviderConfig> {
        let mut config = ProviderConfig::from_env(self.kubeconfig.clone())?;
        if let Some(context) = &self.context {
            config.context = Some(context.clone());
        }
        if let Some(policy) = self.read_policy {
            config.read_policy = policy;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let action = match cli.command {
        Commands::Schema { type_name } => return print_schema(type_name.as_deref()),
        Commands::Apply { file } => Action::Apply(Manifest::load(&file).await?),
        Commands::Refresh => Action::Refresh,
        Commands::Destroy => Action::Destroy,
    };

    let settings = cli.settings;
    let provider = Provider::configure(&settings.provider_config()?)
        .await
        .context("Failed to configure provider")?;

    let mut state = StateFile::load(&settings.state).await?;

    let outcome = match &action {
        Action::Apply(declared) => manifest::apply(&provider, declared, &mut state)
            .await
            .map(|summary| {
                info!(
                    "{} created, {} unchanged, {} deleted",
                    summary.created, summary.unchanged, summary.deleted
                )
            }),
        Action::Refresh => manifest::refresh(&provider, &mut state)
            .await
            .map(|kept| info!("{} resources still present", kept)),
        Action::Destroy => manifest::destroy(&provider, &mut state)
            .await
            .map(|deleted| info!("{} resources deleted", deleted)),
    };

    // Persist whatever progress was made, even on failure
    state.save(&settings.state).await?;

    if let Err(e) = outcome {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}

fn print_schema(type_name: Option<&str>) -> Result<()> {
    let kinds = match type_name {
        Some(name) => vec![name.parse::<ResourceType>()?],
        None => ResourceType::ALL.to_vec(),
    };

    let mut schemas = serde_json::Map::new();
    for kind in kinds {
        schemas.insert(
            kind.type_name().to_string(),
            serde_json::to_value(kind.schema())?,
        );
    }

    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
