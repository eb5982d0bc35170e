use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use berth::bootstrap::{Bootstrapper, Ensured};
use berth::config::{AppConfig, DEFAULT_DATA_DIR};
use berth::error::{Error, Result};
use berth::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "berth")]
#[command(about = "Bootstraps the baseline records of a control plane store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create any missing baseline records
    Init {
        /// Data directory holding the database [default: ./data]
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// TOML file overriding the built-in settings defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the stored baseline records as JSON
    Show {
        /// Data directory holding the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

fn describe(outcome: Ensured) -> &'static str {
    match outcome {
        Ensured::Created => "created",
        Ensured::Existing => "existing",
    }
}

/// Maps an absent record to `None`, keeping every other error.
fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(record) => Ok(Some(record)),
        Err(Error::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

fn run_init(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load(&path, data_dir)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::new(data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))),
    };

    fs::create_dir_all(&config.data_dir)?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    let report = Bootstrapper::new(&store)
        .with_defaults(config.defaults.clone())
        .run()
        .context("bootstrap failed")?;

    info!("Store ready at {}", config.db_path().display());

    println!("instance id:          {}", describe(report.instance_id));
    println!("settings:             {}", describe(report.settings));
    println!("registry credentials: {}", describe(report.registry_credentials));
    println!("resource groups:      {}", describe(report.resource_groups));
    println!("roles:                {}", describe(report.roles));

    Ok(())
}

fn run_show(data_dir: PathBuf) -> anyhow::Result<()> {
    let config = AppConfig::new(data_dir);
    let db_path = config.db_path();
    if !db_path.exists() {
        bail!("Store not initialized. Run 'berth init' first.");
    }

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    let roles: Vec<_> = store
        .roles()?
        .into_iter()
        .map(|role| {
            json!({
                "id": role.id,
                "name": role.name,
                "description": role.description,
                "priority": role.priority,
                "authorizations": role.authorizations.to_strings(),
            })
        })
        .collect();

    let output = json!({
        "instance_id": optional(store.instance_id())?,
        "settings": optional(store.settings())?,
        "registry_credentials": optional(store.registry_credentials())?,
        "resource_groups": store.resource_groups()?,
        "roles": roles,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("berth=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir, config } => run_init(data_dir, config)?,
        Commands::Show { data_dir } => run_show(data_dir)?,
    }

    Ok(())
}
