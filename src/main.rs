use anyhow::{Context, Result};
use cfcerts::cloudflare::auth::Credentials;
use cfcerts::cloudflare::client::ApiClient;
use cfcerts::cloudflare::client_certificates::{
    CreateClientCertificateParams, ListClientCertificatesParams,
};
use cfcerts::cloudflare::error::format_api_error;
use cfcerts::cloudflare::response::ResultInfo;
use cfcerts::config::Config;
use cfcerts::output::{render, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Cloudflare API Shield mTLS client certificates
#[derive(Parser, Debug)]
#[command(name = "cfcerts", version, about, long_about = None)]
struct Args {
    /// Zone ID to operate on
    #[arg(short, long, global = true)]
    zone: Option<String>,

    /// Cloudflare API endpoint
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the client certificates of a zone
    List {
        /// Only show certificates with this status
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },
    /// Issue a client certificate from a PEM-encoded CSR
    Create {
        /// Path to the CSR file
        #[arg(long)]
        csr_file: PathBuf,

        /// Requested validity in days
        #[arg(long, default_value_t = 3650, value_parser = clap::value_parser!(u32).range(1..))]
        validity_days: u32,
    },
    /// Show a single client certificate
    Get {
        certificate_id: String,
    },
    /// Manage stored defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Remember a default zone
    SetZone { zone_id: String },
    /// Print the stored configuration
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "snake_case")]
enum StatusFilter {
    Active,
    PendingReactivation,
    PendingRevocation,
    Revoked,
}

impl StatusFilter {
    fn as_str(self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::PendingReactivation => "pending_reactivation",
            StatusFilter::PendingRevocation => "pending_revocation",
            StatusFilter::Revoked => "revoked",
        }
    }
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

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cfcerts started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cfcerts").join("cfcerts.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cfcerts").join("cfcerts.log");
    }
    PathBuf::from("cfcerts.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: {err:#}");
            None
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // API failures get a short message; details stay in the log
            match err.downcast_ref::<cfcerts::Error>() {
                Some(api_err) => {
                    tracing::error!("{:#}", err);
                    eprintln!("Error: {}", format_api_error(api_err));
                }
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Resolve the zone and endpoint and build an authenticated client
fn connect(config: &Config, zone: Option<&str>, base_url: Option<&str>) -> Result<(ApiClient, String)> {
    let zone = config.effective_zone(zone).context(
        "No zone configured. Use --zone, set CLOUDFLARE_ZONE_ID, or run 'cfcerts config set-zone'",
    )?;
    let base_url = config.effective_base_url(base_url);

    tracing::info!("Using zone: {}, endpoint: {}", zone, base_url);

    let client = ApiClient::with_base_url(&base_url, Credentials::from_env()?)?;
    Ok((client, zone))
}

fn page_summary(shown: usize, info: &ResultInfo) -> String {
    format!(
        "Showing {} of {} certificates (page {}, {} per page)",
        shown, info.total_count, info.page, info.per_page
    )
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();
    let zone = args.zone.as_deref();
    let base_url = args.base_url.as_deref();

    let rendered = match args.command {
        Command::Config { action } => match action {
            ConfigAction::SetZone { zone_id } => {
                config.set_zone(&zone_id)?;
                format!("Default zone set to {}", zone_id)
            }
            ConfigAction::Show => render(&config, args.output)?,
        },
        Command::List {
            status,
            limit,
            offset,
        } => {
            let (client, zone) = connect(&config, zone, base_url)?;
            let params = ListClientCertificatesParams {
                status: status.map(|s| s.as_str().to_string()),
                limit,
                offset,
            };
            let (certificates, result_info) = client
                .list_per_zone_client_certificates(&zone, &params)
                .await?;
            // Stderr keeps stdout parseable
            if let Some(info) = &result_info {
                eprintln!("{}", page_summary(certificates.len(), info));
            }
            render(&certificates, args.output)?
        }
        Command::Create {
            csr_file,
            validity_days,
        } => {
            let (client, zone) = connect(&config, zone, base_url)?;
            let csr = std::fs::read_to_string(&csr_file)
                .with_context(|| format!("Failed to read CSR from {:?}", csr_file))?;
            let params = CreateClientCertificateParams { csr, validity_days };
            let certificate = client
                .create_per_zone_client_certificate(&zone, &params)
                .await?;
            render(&certificate, args.output)?
        }
        Command::Get { certificate_id } => {
            let (client, zone) = connect(&config, zone, base_url)?;
            let certificate = client
                .get_per_zone_client_certificate(&zone, &certificate_id)
                .await?;
            render(&certificate, args.output)?
        }
    };

    println!("{}", rendered);
    Ok(())
}
