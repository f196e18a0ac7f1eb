use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use skgen::asc::auth::AscCredentials;
use skgen::asc::client::AscClient;
use skgen::asc::http::format_asc_error;
use skgen::storekit::Generator;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Generate StoreKit configuration files from the App Store Connect API
#[derive(Parser, Debug)]
#[command(name = "skgen", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a StoreKit configuration file
    Generate {
        /// Output path for the configuration file
        #[arg(short, long)]
        output: PathBuf,

        /// App ID to generate the StoreKit configuration for
        #[arg(short, long)]
        app_id: String,

        /// Issuer ID of the App Store Connect API key
        #[arg(short, long)]
        issuer_id: String,

        /// App Store Connect API key ID
        #[arg(short = 'k', long)]
        api_key: String,

        /// EC private key in PEM form (newline-escaped input accepted)
        #[arg(short, long)]
        private_key: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level);

    match args.command {
        Command::Generate {
            output,
            app_id,
            issuer_id,
            api_key,
            private_key,
        } => {
            // Keys passed through shells or CI secrets often arrive with
            // escaped newlines
            let private_key = private_key.replace("\\n", "\n");

            let credentials = AscCredentials::new(&issuer_id, &api_key, &private_key)?;
            let client = AscClient::new(credentials)?;
            let generator = Generator::new(client, &app_id);

            if let Err(err) = generator.generate(&output).await {
                tracing::error!("Generation failed: {}", format_asc_error(&err));
                return Err(err);
            }
        }
    }

    Ok(())
}
