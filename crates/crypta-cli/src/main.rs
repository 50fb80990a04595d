//! crypta: personal cryptography workflows
//!
//! Commands:
//!   menu          - interactive menu (default)
//!   config show   - display the effective configuration

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crypta_core::config::{default_config_path, expand_tilde, CryptaConfig};
use crypta_core::SessionSettings;
use crypta_crypto::{KeyRole, PrimitiveProvider, RustCryptoProvider};
use crypta_workflow::menu;

use crate::terminal::TerminalInteraction;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "crypta",
    version,
    about = "Personal cryptography workflows",
    long_about = "crypta: RSA key pairs, symmetric encryption, key distribution, MAC/HMAC checksums and signatures"
)]
struct Cli {
    /// Path to config.toml (default: ~/.config/crypta/config.toml)
    #[arg(long, short = 'c', env = "CRYPTA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (overrides config; RUST_LOG overrides both)
    #[arg(long, env = "CRYPTA_LOG")]
    log: Option<String>,

    /// Log format (overrides config)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Initial output directory for this session
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Initial private key (PEM) for decrypting and signing
    #[arg(long, short = 'k')]
    private_key: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive menu
    Menu,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    fn from_config(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = CryptaConfig::load(&config_path)
        .with_context(|| format!("loading config: {}", config_path.display()))?;

    let level = cli.log.as_deref().unwrap_or(&config.logging.level);
    let format = cli
        .log_format
        .unwrap_or_else(|| LogFormat::from_config(&config.logging.format));
    init_logging(level, format);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "crypta starting"
    );

    match cli.command {
        None | Some(Commands::Menu) => cmd_menu(
            &config,
            cli.output_dir.as_deref(),
            cli.private_key.as_deref(),
        ),
        Some(Commands::Config {
            action: ConfigAction::Show,
        }) => cmd_config_show(&config, &config_path),
    }
}

/// Logs go to stderr so they never interleave with prompts on stdout.
fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── `crypta menu` ─────────────────────────────────────────────────────────────

/// Session settings from config, then command-line overrides.
fn initial_settings(
    config: &CryptaConfig,
    output_dir: Option<&Path>,
    private_key: Option<&Path>,
) -> SessionSettings {
    let mut settings = SessionSettings::from_config(&config.session);
    if let Some(dir) = output_dir {
        settings.output_dir = expand_tilde(dir);
    }
    if let Some(key) = private_key {
        settings.private_key = Some(expand_tilde(key));
    }
    settings
}

/// A configured key that does not load is dropped, not fatal.
fn check_private_key(provider: &dyn PrimitiveProvider, settings: &mut SessionSettings) {
    let Some(path) = settings.private_key.clone() else {
        return;
    };
    let usable = std::fs::read(&path)
        .map(|pem| provider.validate_key(&pem, KeyRole::Private))
        .unwrap_or(false);
    if !usable {
        tracing::warn!(key = %path.display(), "configured private key is not usable; ignoring it");
        eprintln!(
            "warning: {} is not a usable private key; choose one under Settings",
            path.display()
        );
        settings.private_key = None;
    }
}

fn cmd_menu(
    config: &CryptaConfig,
    output_dir: Option<&Path>,
    private_key: Option<&Path>,
) -> Result<()> {
    let provider = RustCryptoProvider::new();
    let mut settings = initial_settings(config, output_dir, private_key);
    check_private_key(&provider, &mut settings);

    if !settings.output_dir.is_dir() {
        anyhow::bail!(
            "output directory does not exist: {}",
            settings.output_dir.display()
        );
    }

    println!("crypta {}  (empty answer or q cancels)", env!("CARGO_PKG_VERSION"));
    let mut io = TerminalInteraction::stdio();
    menu::run(&provider, &mut io, &mut settings)?;
    Ok(())
}

// ── `crypta config show` ──────────────────────────────────────────────────────

fn cmd_config_show(config: &CryptaConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!(
            "# Configuration: defaults (no file at {})",
            config_path.display()
        );
    }
    println!();
    let rendered = config.to_toml().context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["crypta", "-o", "/tmp"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_config_show_parses() {
        let cli =
            Cli::try_parse_from(["crypta", "--log-format", "json", "config", "show"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = CryptaConfig::default();
        config.session.output_dir = PathBuf::from("/from/config");
        config.session.private_key = Some(PathBuf::from("/from/config/key.pem"));

        let settings = initial_settings(&config, Some(Path::new("/from/flag")), None);
        assert_eq!(settings.output_dir, PathBuf::from("/from/flag"));
        assert_eq!(
            settings.private_key,
            Some(PathBuf::from("/from/config/key.pem"))
        );
    }

    #[test]
    fn test_unusable_private_key_is_dropped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let junk = tmp.path().join("junk.pem");
        std::fs::write(&junk, "not a key").unwrap();

        let mut settings = SessionSettings {
            output_dir: tmp.path().to_path_buf(),
            private_key: Some(junk),
        };
        check_private_key(&RustCryptoProvider::new(), &mut settings);
        assert!(settings.private_key.is_none());
    }

    #[test]
    fn test_log_format_from_config() {
        assert_eq!(LogFormat::from_config("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_config("text"), LogFormat::Text);
        assert_eq!(LogFormat::from_config("whatever"), LogFormat::Text);
    }
}
