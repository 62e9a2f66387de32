//! casing-design - casing string design from a well design file
//!
//! # Usage
//!
//! ```bash
//! # Text report, policy from ./casing_config.toml or built-in defaults
//! casing-design well.toml
//!
//! # Force the traversal method and emit JSON
//! casing-design well.toml --method bottom_up --json
//!
//! # Detail for one section
//! casing-design well.toml --section production
//!
//! # Print the effective design policy as TOML
//! casing-design --dump-config
//! ```
//!
//! # Environment Variables
//!
//! - `CASING_CONFIG`: Path to the design policy TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use casing_design::config::design_file::WellDesign;
use casing_design::{report, DesignConfig, TraversalMethod};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "casing-design")]
#[command(about = "Casing string design: burst, collapse, tension, cement and MASP")]
#[command(version, author)]
struct CliArgs {
    /// Well design file (TOML with [wellbore], [[survey]], [[section]])
    #[arg(value_name = "DESIGN_FILE", required_unless_present = "dump_config")]
    design_file: Option<PathBuf>,

    /// Design policy TOML. Falls back to ./casing_config.toml, then defaults
    #[arg(long, value_name = "PATH", env = "CASING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the traversal method from the design file (top_down | bottom_up)
    #[arg(long)]
    method: Option<TraversalMethod>,

    /// Print the calculated design as JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// Print full detail for a single section
    #[arg(long, value_name = "LABEL")]
    section: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Print the effective design policy as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr so stdout stays clean for the report
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match &args.config {
        Some(path) => DesignConfig::load_from_file(path)
            .with_context(|| format!("Failed to load design policy {}", path.display()))?,
        None => DesignConfig::load(),
    };

    if args.dump_config {
        print!("{}", config.to_toml().context("Failed to serialize design policy")?);
        return Ok(());
    }

    let Some(path) = args.design_file.as_deref() else {
        anyhow::bail!("No design file given");
    };
    let mut design = WellDesign::load_from_file(path)
        .with_context(|| format!("Failed to load design file {}", path.display()))?;
    if let Some(method) = args.method {
        info!(method = %method, "Traversal method overridden from command line");
        design.wellbore.method = method;
    }

    let mut wellbore = design
        .build(config.policy.clone())
        .with_context(|| format!("Invalid design in {}", path.display()))?;
    wellbore
        .calc_parameters_contained()
        .context("Design calculation failed")?;

    if args.json {
        let value = match &args.section {
            Some(label) => {
                let section = wellbore.section(label)?;
                serde_json::json!({ "inputs": section.inputs(), "results": section.results() })
            }
            None => report::to_json(&wellbore),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if let Some(label) = &args.section {
        print!("{}", report::render_section(&wellbore, label, &config.report)?);
    } else {
        print!("{}", report::render_table(&wellbore, &config.report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_metadata_is_own() {
        let cmd = CliArgs::command();
        assert_eq!(cmd.get_author(), Some("Casing Design Developers"));
        assert_eq!(env!("CARGO_PKG_LICENSE"), "MIT OR Apache-2.0");
        cmd.debug_assert();
    }

    #[test]
    fn test_dump_config_needs_no_design_file() {
        let args = CliArgs::try_parse_from(["casing-design", "--dump-config"]).unwrap();
        assert!(args.dump_config);
        assert!(CliArgs::try_parse_from(["casing-design"]).is_err());
    }
}
