//! Spore Cobuild CLI: the `spore` command.
//!
//! Assembles Spore and Cluster transactions offline against a protocol
//! config and a signer snapshot, and inspects cobuild witnesses.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use spore_cobuild::memory::MemorySigner;
use spore_cobuild::witness::cobuild_actions;
use spore_cobuild::{
    create_clusters, create_spores, derive_type_ids, melt_spores, transfer_clusters,
    transfer_spores, Byte32, ClusterData, ClusterMode, ClusterSpec, ClusterTransfer,
    CreateOutcome, ProtocolConfig, Script, SporeData, SporeSpec, SporeTransfer, Transaction,
};

// ── CLI definitions ──────────────────────────────────────────────────────────

/// Spore Cobuild CLI: derive identifiers and assemble spore and cluster
/// transactions with cobuild action proofs.
#[derive(Parser, Debug)]
#[command(
    name = "spore",
    about = "Spore Cobuild CLI",
    version,
    long_about = "spore: Spore Cobuild CLI\n\nDerive entity identifiers, assemble create/transfer/melt transactions\nfor spores and clusters, and decode cobuild witnesses."
)]
struct Cli {
    /// Protocol config JSON (script versions, cell deps, cobuild flags)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Signer snapshot JSON (lock and live cells)
    #[arg(long, global = true)]
    chain: Option<PathBuf>,

    /// Transaction skeleton to extend (default: empty)
    #[arg(long, global = true)]
    tx: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the identifiers the next outputs of --tx would get
    Id {
        /// Number of identifiers to derive
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Create a spore
    Create {
        /// MIME type of the content
        #[arg(long)]
        content_type: String,

        /// Content as UTF-8 text
        #[arg(long, conflicts_with = "content_hex")]
        content: Option<String>,

        /// Content as 0x-prefixed hex
        #[arg(long)]
        content_hex: Option<String>,

        /// Cluster the spore belongs to
        #[arg(long)]
        cluster: Option<Byte32>,

        /// How the cluster is proven: skip, lockProxy or clusterCell
        #[arg(long)]
        cluster_mode: Option<ClusterMode>,

        /// Owner lock script as JSON (default: the signer's lock)
        #[arg(long)]
        to: Option<String>,

        /// Spore script version (default: latest)
        #[arg(long)]
        script_version: Option<String>,
    },

    /// Transfer a spore to a new owner
    Transfer {
        /// Spore identifier
        #[arg(long)]
        id: Byte32,

        /// New owner lock script as JSON
        #[arg(long)]
        to: String,
    },

    /// Melt one or more spores
    Melt {
        /// Spore identifiers
        #[arg(long = "id", required = true)]
        ids: Vec<Byte32>,
    },

    /// Cluster operations
    Cluster {
        #[command(subcommand)]
        subcommand: ClusterCommands,
    },

    /// Cobuild witness operations
    Witness {
        #[command(subcommand)]
        subcommand: WitnessCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ClusterCommands {
    /// Create a cluster
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Owner lock script as JSON (default: the signer's lock)
        #[arg(long)]
        to: Option<String>,

        /// Cluster script version (default: latest)
        #[arg(long)]
        script_version: Option<String>,
    },

    /// Transfer a cluster to a new owner
    Transfer {
        #[arg(long)]
        id: Byte32,

        /// New owner lock script as JSON
        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand, Debug)]
enum WitnessCommands {
    /// Print the actions bound to --tx
    Decode,
}

// ── Input helpers ────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<ProtocolConfig> {
    let path = path.ok_or_else(|| anyhow!("--config is required for this command"))?;
    ProtocolConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
}

fn load_signer(path: Option<&Path>) -> Result<MemorySigner> {
    let path = path.ok_or_else(|| anyhow!("--chain is required for this command"))?;
    MemorySigner::load(path).with_context(|| format!("failed to load chain {}", path.display()))
}

fn load_tx(path: Option<&Path>) -> Result<Option<Transaction>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transaction {}", path.display()))?;
    let tx = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse transaction {}", path.display()))?;
    Ok(Some(tx))
}

fn parse_lock(json: &str) -> Result<Script> {
    serde_json::from_str(json).context("lock must be a JSON script")
}

fn parse_content(text: Option<String>, hex: Option<String>) -> Result<Vec<u8>> {
    match (text, hex) {
        (Some(text), _) => Ok(text.into_bytes()),
        (None, Some(hex)) => {
            spore_cobuild::types::hex::decode(&hex).context("--content-hex is not valid hex")
        }
        (None, None) => Err(anyhow!("one of --content or --content-hex is required")),
    }
}

// ── Output helpers ───────────────────────────────────────────────────────────

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => std::fs::write(path, text + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

fn emit_outcome(outcome: &CreateOutcome, out: Option<&Path>) -> Result<()> {
    emit(&json!({ "ids": outcome.ids, "tx": outcome.tx }), out)
}

// ── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let out = cli.out.as_deref();
    let tx = load_tx(cli.tx.as_deref())?;

    match cli.command {
        Commands::Id { count } => {
            let tx = tx.ok_or_else(|| anyhow!("--tx is required to derive identifiers"))?;
            let ids = derive_type_ids(&tx, count)?;
            emit(&ids, out)
        }
        Commands::Create {
            content_type,
            content,
            content_hex,
            cluster,
            cluster_mode,
            to,
            script_version,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let signer = load_signer(cli.chain.as_deref())?;
            let mut data = SporeData::new(content_type, parse_content(content, content_hex)?);
            if let Some(cluster_id) = cluster {
                data = data.in_cluster(cluster_id);
            }
            let request = SporeSpec {
                data,
                to: to.as_deref().map(parse_lock).transpose()?,
            };
            let outcome = create_spores(
                &signer,
                &config,
                vec![request],
                cluster_mode,
                script_version.as_deref(),
                tx,
            )
            .await?;
            emit_outcome(&outcome, out)
        }
        Commands::Transfer { id, to } => {
            let config = load_config(cli.config.as_deref())?;
            let signer = load_signer(cli.chain.as_deref())?;
            let transfer = SporeTransfer {
                id,
                to: parse_lock(&to)?,
            };
            let tx = transfer_spores(&signer, &config, vec![transfer], tx).await?;
            emit(&tx, out)
        }
        Commands::Melt { ids } => {
            let config = load_config(cli.config.as_deref())?;
            let signer = load_signer(cli.chain.as_deref())?;
            let tx = melt_spores(&signer, &config, ids, tx).await?;
            emit(&tx, out)
        }
        Commands::Cluster { subcommand } => {
            let config = load_config(cli.config.as_deref())?;
            let signer = load_signer(cli.chain.as_deref())?;
            match subcommand {
                ClusterCommands::Create {
                    name,
                    description,
                    to,
                    script_version,
                } => {
                    let request = ClusterSpec {
                        data: ClusterData::new(name, description),
                        to: to.as_deref().map(parse_lock).transpose()?,
                    };
                    let outcome = create_clusters(
                        &signer,
                        &config,
                        vec![request],
                        script_version.as_deref(),
                        tx,
                    )
                    .await?;
                    emit_outcome(&outcome, out)
                }
                ClusterCommands::Transfer { id, to } => {
                    let transfer = ClusterTransfer {
                        id,
                        to: parse_lock(&to)?,
                    };
                    let tx = transfer_clusters(&signer, &config, vec![transfer], tx).await?;
                    emit(&tx, out)
                }
            }
        }
        Commands::Witness { subcommand } => match subcommand {
            WitnessCommands::Decode => {
                let tx = tx.ok_or_else(|| anyhow!("--tx is required to decode witnesses"))?;
                let actions = cobuild_actions(&tx)?
                    .iter()
                    .map(|action| {
                        Ok(json!({
                            "script_info_hash": action.script_info_hash,
                            "script_hash": action.script_hash,
                            "action": action.spore_action()?,
                        }))
                    })
                    .collect::<Result<Vec<_>>>()?;
                emit(&actions, out)
            }
        },
    }
}
