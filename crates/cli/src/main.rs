//! PAI Job CLI - submit jobs and query a PAI cluster

mod output;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use paijob_core::port::{CredentialStore, Notifier, StoreError};
use paijob_core::{AdapterError, Credentials, JobClientAdapter, Outcome, PortalConfig};
use paijob_infra_store::FileCredentialStore;
use paijob_sdk::{PaiRestClient, ReqwestFetch};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_REAUTH: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "paijob")]
#[command(about = "Submit jobs to a PAI cluster", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(long, env = "PAIJOB_CONFIG")]
    config: Option<PathBuf>,

    /// REST server URI, absolute or relative to the webportal URL
    #[arg(long)]
    rest_server_uri: Option<String>,

    /// Launcher scheduler (e.g. hivedscheduler)
    #[arg(long)]
    scheduler: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Cluster(ClusterCommand),

    /// Store a session token
    Login {
        #[arg(short, long)]
        user: String,

        #[arg(short, long, env = "PAIJOB_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Forget the stored session
    Logout,
}

/// Commands that talk to the cluster
#[derive(Subcommand)]
enum ClusterCommand {
    /// Submit a job protocol (YAML)
    Submit {
        /// Job protocol file, or `-` for stdin
        file: PathBuf,
    },

    /// Print the protocol a job was submitted with
    JobConfig {
        /// Job owner
        user: String,

        /// Job name
        job: String,
    },

    /// List virtual clusters a user may submit to
    VirtualClusters {
        /// User name (default: signed-in user)
        user: Option<String>,
    },

    /// List SKU types of a virtual cluster (hivedscheduler only)
    SkuTypes {
        /// Virtual cluster name
        virtual_cluster: String,
    },
}

fn init_logging() {
    let log_format = std::env::var("PAIJOB_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paijob=warn"));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn read_job_text(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read job protocol from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read job protocol {}", file.display()))
}

// Session commands touch only the store, so they work without a reachable
// server and can replace or remove an unreadable session file.
fn login(store: &dyn CredentialStore, user: &str, token: &str) -> Result<()> {
    store
        .save(&Credentials::new(user, token))
        .context("Failed to store session")
}

fn logout(store: &dyn CredentialStore) -> Result<()> {
    store.clear().context("Failed to clear stored session")
}

/// Wire the adapter once: session, REST client, raw fetcher, notifier
fn build_adapter(
    config: &PortalConfig,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
) -> Result<JobClientAdapter> {
    let credentials = match store.load() {
        Ok(credentials) => credentials,
        Err(StoreError::Corrupt(reason)) => {
            warn!(%reason, "Ignoring unreadable session file; run `paijob login` to replace it");
            None
        }
        Err(e) => return Err(e).context("Failed to read stored session"),
    };
    match &credentials {
        Some(creds) => debug!(user = %creds.user, "Using stored session"),
        None => debug!("No stored session, requests are anonymous"),
    }

    let endpoint = config
        .endpoint()
        .context("Cannot resolve the cluster endpoint")?;
    info!(base = %endpoint.base(), https = endpoint.https(), "Cluster endpoint");

    let api = PaiRestClient::new(endpoint.clone(), credentials.clone(), config.request_timeout())?;
    let http = ReqwestFetch::new(config.request_timeout())?;

    Ok(JobClientAdapter::new(
        Arc::new(api),
        Arc::new(http),
        store,
        notifier,
        endpoint,
        config.launcher_scheduler.clone(),
        credentials,
    ))
}

/// Print the reauth hint; `Some(value)` when the call completed
fn completed<T>(outcome: Outcome<T>) -> Option<T> {
    if outcome.is_reauth_required() {
        output::reauth_hint();
    }
    outcome.completed()
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let config = settings::load(
        cli.config.as_deref(),
        settings::Overrides {
            rest_server_uri: cli.rest_server_uri,
            launcher_scheduler: cli.scheduler,
        },
    )?;
    let session_path = settings::session_path(&config)?;
    let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(session_path));

    let command = match cli.command {
        Commands::Cluster(command) => command,

        Commands::Login { user, token } => {
            login(store.as_ref(), &user, &token)?;
            println!("{}", format!("✓ Signed in as {}", user).green().bold());
            return Ok(ExitCode::SUCCESS);
        }

        Commands::Logout => {
            logout(store.as_ref())?;
            println!("{}", "✓ Signed out".green().bold());
            return Ok(ExitCode::SUCCESS);
        }
    };

    let adapter = build_adapter(&config, store, Arc::new(output::StderrNotifier))?;
    run(&adapter, command).await
}

async fn run(adapter: &JobClientAdapter, command: ClusterCommand) -> Result<ExitCode> {
    match command {
        ClusterCommand::Submit { file } => {
            let text = read_job_text(&file)?;
            let Some(response) = completed(adapter.submit_job(&text).await?) else {
                return Ok(ExitCode::from(EXIT_REAUTH));
            };

            println!("{}", "✓ Job submitted successfully".green().bold());
            if !response.is_null() {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
        }

        ClusterCommand::JobConfig { user, job } => {
            match adapter.fetch_job_config(&user, &job).await {
                Ok(outcome) => {
                    let Some(job_config) = completed(outcome) else {
                        return Ok(ExitCode::from(EXIT_REAUTH));
                    };
                    print!("{}", job_config.to_yaml()?);
                }
                Err(AdapterError::NotFound(message)) => {
                    eprintln!("{} {}", "Not found:".yellow().bold(), message);
                    return Ok(ExitCode::from(EXIT_NOT_FOUND));
                }
                Err(e) => return Err(e.into()),
            }
        }

        ClusterCommand::VirtualClusters { user } => {
            let user = user
                .or_else(|| adapter.credentials().map(|c| c.user.clone()))
                .context("No user given and no stored session; pass a user or run `paijob login`")?;

            let Some(vcs) = completed(adapter.list_user_virtual_clusters(&user).await?) else {
                return Ok(ExitCode::from(EXIT_REAUTH));
            };

            if vcs.is_empty() {
                println!("{}", format!("{} has no virtual clusters", user).yellow());
            } else {
                println!("{}", output::virtual_cluster_table(&vcs));
            }
        }

        ClusterCommand::SkuTypes { virtual_cluster } => {
            let Some(skus) = completed(adapter.list_hived_sku_types(&virtual_cluster).await?)
            else {
                return Ok(ExitCode::from(EXIT_REAUTH));
            };

            println!("{}", output::sku_types_json(&skus));
        }
    }

    Ok(ExitCode::SUCCESS)
}
