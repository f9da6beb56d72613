//! CLI entry point for conforma-pvp.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `conforma-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use conforma_app::{
    ConformaProvider, PolicyProvider, parse_catalog_json, serialize_result, write_output,
};
use conforma_settings::ConformaConfig;
use conforma_types::{Evidence, PvpResult, RuleCatalog};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info_span};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "conforma-pvp",
    version,
    about = "Policy validation point for Conforma scan results"
)]
struct Cli {
    /// Path to the provider config TOML. A missing file means no file settings.
    #[arg(long, default_value = "conforma.toml")]
    config: Utf8PathBuf,

    /// Set a provider option, overriding the config file (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Complete and validate the provider configuration.
    Validate,

    /// Write the Conforma policy for a rule catalog.
    Generate {
        /// Path to the rule catalog JSON.
        #[arg(long)]
        catalog: Utf8PathBuf,
    },

    /// Aggregate scan results into observations, writing OCSF evidence next to them.
    Results {
        /// Path to the rule catalog JSON.
        #[arg(long)]
        catalog: Utf8PathBuf,

        /// Where to write the result JSON (if not specified, prints to stdout).
        #[arg(long, short)]
        out: Option<Utf8PathBuf>,
    },

    /// Print a JSON Schema.
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    /// OCSF evidence record written per check.
    Evidence,
    /// Result returned to the host.
    Result,
    /// Provider configuration file.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.cmd {
        Commands::Validate => cmd_validate(&cli),
        Commands::Generate { ref catalog } => cmd_generate(&cli, catalog),
        Commands::Results {
            ref catalog,
            ref out,
        } => cmd_results(&cli, catalog, out.as_deref()),
        Commands::Schema { kind } => cmd_schema(kind),
    }
}

/// Log to stderr, filtered by `CONFORMA_LOG` (default `conforma=info`).
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CONFORMA_LOG").unwrap_or_else(|_| EnvFilter::new("conforma=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// File settings overlaid with `--set` options.
fn load_config(cli: &Cli) -> anyhow::Result<ConformaConfig> {
    let file_cfg = match std::fs::read_to_string(&cli.config) {
        Ok(text) if !text.trim().is_empty() => conforma_settings::parse_config_toml(&text)
            .with_context(|| format!("parse config: {}", cli.config))?,
        Ok(_) => ConformaConfig::default(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ConformaConfig::default(),
        Err(err) => return Err(err).with_context(|| format!("read config: {}", cli.config)),
    };

    let options: BTreeMap<String, String> = cli.set.iter().cloned().collect();
    for key in ConformaConfig::ignored_options(&options) {
        debug!(key, "ignoring --set option not read by this provider");
    }
    let overrides = ConformaConfig::from_options(&options).context("parse --set options")?;
    Ok(file_cfg.merge(overrides))
}

fn configured_provider(cli: &Cli) -> anyhow::Result<ConformaProvider> {
    let span = info_span!("conforma_pvp", config = %cli.config);
    let mut provider = ConformaProvider::new(span);
    provider.apply_config(load_config(cli)?)?;
    Ok(provider)
}

fn read_catalog(path: &Utf8Path) -> anyhow::Result<RuleCatalog> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read rule catalog: {path}"))?;
    parse_catalog_json(&text)
}

fn cmd_validate(cli: &Cli) -> anyhow::Result<()> {
    let provider = configured_provider(cli)?;
    let text = toml::to_string(provider.config()).context("render resolved config")?;
    print!("{text}");
    Ok(())
}

fn cmd_generate(cli: &Cli, catalog: &Utf8Path) -> anyhow::Result<()> {
    let provider = configured_provider(cli)?;
    let catalog = read_catalog(catalog)?;
    provider.generate(&catalog)
}

fn cmd_results(cli: &Cli, catalog: &Utf8Path, out: Option<&Utf8Path>) -> anyhow::Result<()> {
    let provider = configured_provider(cli)?;
    let catalog = read_catalog(catalog)?;
    let result = provider.get_results(&catalog)?;
    let bytes = serialize_result(&result)?;

    match out {
        Some(path) => write_output(path, &bytes).context("write result json"),
        None => std::io::stdout()
            .write_all(&bytes)
            .context("write result to stdout"),
    }
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let schema = match kind {
        SchemaKind::Evidence => schemars::schema_for!(Evidence),
        SchemaKind::Result => schemars::schema_for!(PvpResult),
        SchemaKind::Config => schemars::schema_for!(ConformaConfig),
    };
    let text = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{text}");
    Ok(())
}
