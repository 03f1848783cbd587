// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use hitchkit::app_config::{self, Config};
use hitchkit::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate site templates into the configured target languages
    Templates {
        /// Redo translations that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Translate point comments into the configured target languages
    Comments,

    /// Check two template files for structural equivalence
    Verify {
        /// First template file
        file_a: PathBuf,

        /// Second template file
        file_b: PathBuf,

        /// Require exact whitespace in text nodes
        #[arg(long)]
        strict_whitespace: bool,
    },

    /// Show stored translation totals
    Status,

    /// Generate shell completions for hitchkit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// hitchkit - operational tooling for a hitchhiking spot map
///
/// Translates the site's templates and user comments with AI while keeping
/// all markup and templating syntax byte-identical.
#[derive(Parser, Debug)]
#[command(name = "hitchkit")]
#[command(version = "1.0.0")]
#[command(about = "AI translation tooling for a hitchhiking spot map")]
#[command(long_about = "hitchkit translates site templates and user comments with AI.

EXAMPLES:
    hitchkit templates                        # Translate templates per config
    hitchkit templates --force                # Redo existing translations
    hitchkit comments                         # Translate point comments
    hitchkit verify a.html b.html             # Compare two template files
    hitchkit status                           # Show stored translation totals
    hitchkit completions bash > hitchkit.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// API key for the chat provider
    #[arg(long, env = "OPENAI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Provider endpoint URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Database file path
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Completions need no config at all
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "hitchkit", &mut std::io::stdout());
        return Ok(());
    }

    // Verify is a pure file comparison; no config, database or provider
    if let Commands::Verify {
        file_a,
        file_b,
        strict_whitespace,
    } = &cli.command
    {
        let report = Controller::verify_files(file_a, file_b, *strict_whitespace)?;
        println!("{}", report.reason);
        if !report.equivalent {
            std::process::exit(1);
        }
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = load_config(&cli)?;

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Templates { force } => controller.run_templates(force).await,
        Commands::Comments => controller.run_comments().await,
        Commands::Status => controller.status().await,
        Commands::Verify { .. } | Commands::Completions { .. } => unreachable!(),
    }
}

/// Load the configuration file, creating a default one when missing, and
/// apply command-line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(api_key) = &cli.api_key {
        config.provider.api_key = api_key.clone();
    }

    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }

    if let Some(endpoint) = &cli.endpoint {
        config.provider.endpoint = endpoint.clone();
    }

    if let Some(database) = &cli.database {
        config.database_path = Some(database.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
