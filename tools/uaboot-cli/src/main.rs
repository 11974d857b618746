// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! uaboot CLI
//!
//! Loads a nodeset into an in-memory address space, runs the type bootstrap
//! and prints every registered type.
//!
//! # Usage
//!
//! ```bash
//! # Load a vendor model on top of the core skeleton
//! uaboot load --nodeset pumps.toml
//!
//! # With a bootstrap configuration
//! uaboot load --nodeset pumps.toml --config uaboot.toml
//!
//! # Nodeset already contains namespace 0
//! uaboot load --nodeset full.toml --skip-core
//!
//! # Generate / check a configuration file
//! uaboot gen-config --output uaboot.toml
//! uaboot validate --config uaboot.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uaboot::address_space::{bulk_load_address_space, core_type_nodes, MemoryAddressSpace, NodeSet};
use uaboot::config::BootstrapConfig;
use uaboot::dynamic::{RuntimeKind, RuntimeType, TypeBootstrap};

/// OPC UA information-model bootstrap
#[derive(Parser, Debug)]
#[command(name = "uaboot")]
#[command(about = "Load an OPC UA nodeset and register its data types")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bulk load a nodeset and run the type bootstrap
    Load {
        /// Nodeset file (TOML)
        #[arg(short, long)]
        nodeset: PathBuf,

        /// Bootstrap configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not seed the namespace-0 skeleton first
        #[arg(long)]
        skip_core: bool,
    },

    /// Generate a default configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "uaboot.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match args.command {
        Commands::Load {
            nodeset,
            config,
            skip_core,
        } => cmd_load(&nodeset, config.as_deref(), skip_core).await,
        Commands::GenConfig { output } => cmd_gen_config(&output),
        Commands::Validate { config } => cmd_validate(&config),
    }
}

async fn cmd_load(nodeset: &Path, config: Option<&Path>, skip_core: bool) -> Result<()> {
    let config = match config {
        Some(path) => BootstrapConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BootstrapConfig::default(),
    };
    let model = NodeSet::from_file(nodeset)
        .with_context(|| format!("loading nodeset {}", nodeset.display()))?;

    let mut batch = if skip_core {
        NodeSet::default()
    } else {
        core_type_nodes()
    };
    batch.extend(model);
    batch.validate().context("nodeset")?;

    let space = MemoryAddressSpace::new();
    let load = bulk_load_address_space(&space, batch.nodes, batch.references, config.retry)
        .await
        .context("bulk load")?;
    tracing::info!(
        "address space: {} node(s), {} deferred, {} pass(es)",
        space.len(),
        load.deferred,
        load.passes
    );

    let mut boot = TypeBootstrap::new(&space, config);
    let report = boot
        .load_data_type_definitions()
        .await
        .context("type bootstrap")?;

    for skipped in &report.skipped {
        println!("skipped {} ({}): {:?}", skipped.name, skipped.node_id, skipped.reason);
    }
    for ty in boot.registry().types() {
        print!("{}", render_type(ty));
    }
    println!(
        "{} type(s) registered, {} skipped",
        report.registered.len(),
        report.skipped.len()
    );
    Ok(())
}

fn cmd_gen_config(output: &Path) -> Result<()> {
    let text = toml::to_string_pretty(&BootstrapConfig::default())?;
    std::fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;
    println!("Generated configuration: {}", output.display());
    Ok(())
}

fn cmd_validate(config: &Path) -> Result<()> {
    BootstrapConfig::from_file(config)
        .with_context(|| format!("validating {}", config.display()))?;
    println!("Configuration is valid: {}", config.display());
    Ok(())
}

/// One registered type as indented text.
fn render_type(ty: &RuntimeType) -> String {
    let mut out = String::new();
    let encoding = ty
        .encoding_id
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let _ = writeln!(out, "{} [{}] encoding {}", ty.name, ty.data_type_id, encoding);
    match &ty.kind {
        RuntimeKind::Structure(layout) => {
            for field in &layout.fields {
                let _ = match field.optional_bit {
                    Some(bit) => writeln!(out, "  {}: {} (bit {})", field.name, field.wire, bit),
                    None => writeln!(out, "  {}: {}", field.name, field.wire),
                };
            }
        }
        RuntimeKind::Enumeration(layout) => {
            for member in &layout.members {
                let _ = writeln!(out, "  {} = {}", member.name, member.value);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uaboot::address_space::{EnumBuilder, StructureBuilder};
    use uaboot::types::{ids, NodeId, StructureField};

    #[test]
    fn test_gen_config_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uaboot.toml");
        cmd_gen_config(&path).unwrap();
        cmd_validate(&path).unwrap();
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "structure_root = 42").unwrap();
        assert!(cmd_validate(&path).is_err());
    }

    #[tokio::test]
    async fn test_load_nodeset_file() {
        let mut set = EnumBuilder::new(NodeId::numeric(1, 10), "Mode")
            .values(["Off", "On"])
            .build();
        set.extend(
            StructureBuilder::new(NodeId::numeric(1, 20), "Status")
                .encoding_id(NodeId::numeric(1, 21))
                .field(StructureField::new("Mode", NodeId::numeric(1, 10)))
                .field(StructureField::new("Note", ids::STRING).optional())
                .build(),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        std::fs::write(&path, set.to_toml_string().unwrap()).unwrap();

        cmd_load(&path, None, false).await.unwrap();
        assert!(cmd_load(&path, None, true).await.is_err());
    }

    #[test]
    fn test_render_enumeration() {
        let ty = RuntimeType {
            name: "Status".into(),
            data_type_id: NodeId::numeric(1, 20),
            encoding_id: None,
            kind: RuntimeKind::Enumeration(uaboot::dynamic::EnumLayout {
                flavor: uaboot::dynamic::EnumFlavor::Plain,
                members: vec![uaboot::dynamic::EnumMember {
                    name: "Off".into(),
                    value: 0,
                }],
            }),
        };
        assert_eq!(render_type(&ty), "Status [ns=1;i=20] encoding -\n  Off = 0\n");
    }
}
