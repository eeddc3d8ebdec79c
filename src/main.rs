use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use product_admin::api::ApiClient;
use product_admin::config::Config;
use product_admin::model::{list_records, list_total};
use product_admin::view::{extract_json_value, render_list, render_show};
use product_admin::{import, CreatePayload, DataProvider, PdfFile, ProviderError};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const RESOURCE: &str = "products";

/// Admin front-end for extracted product records
#[derive(Parser, Debug)]
#[command(name = "padmin", version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides PRODUCT_ADMIN_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all products
    List {
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Show one product from the list
    Show {
        id: String,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Extract a new product from a URL, text or PDF
    Create {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Extract products from every source listed in a file
    Import {
        file: PathBuf,
        /// Number of extractions in flight at once
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
    /// Inspect or change saved settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Product page URL
    #[arg(long)]
    url: Option<String>,
    /// Free-form product description
    #[arg(long)]
    text: Option<String>,
    /// PDF datasheet to upload
    #[arg(long)]
    pdf: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective settings
    Show,
    /// Save the backend base URL
    SetApiUrl { url: String },
    /// Save a request timeout in seconds
    SetTimeout {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        seconds: u64,
    },
    /// Remove the saved timeout
    ClearTimeout,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
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

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

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

    tracing::info!("padmin started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("product-admin").join("product-admin.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".product-admin").join("product-admin.log");
    }
    PathBuf::from("product-admin.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", user_facing(&err));
            ExitCode::FAILURE
        }
    }
}

/// Provider errors get their short form; everything else shows its context chain
fn user_facing(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ProviderError>() {
        Some(provider_err) => provider_err.user_message(),
        None => format!("{err:#}"),
    }
}

fn build_provider(
    config: &Config,
    cli_api_url: Option<&str>,
    cli_timeout: Option<u64>,
) -> Result<DataProvider> {
    let api_url = config.effective_api_url(cli_api_url)?;
    let timeout = config.effective_timeout(cli_timeout);
    tracing::info!("Using API: {}, timeout: {:?}", api_url, timeout);

    let client = ApiClient::new(&api_url, timeout).context("Failed to create HTTP client")?;
    Ok(DataProvider::new(client))
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();
    let api_url = args.api_url.as_deref();

    match args.command {
        Command::Config(cmd) => run_config(cmd, &mut config, api_url, args.timeout)?,
        Command::List { format } => {
            let provider = build_provider(&config, api_url, args.timeout)?;
            let response = provider.list(RESOURCE).await?;
            match format {
                Format::Json => print_json(&response)?,
                Format::Table => {
                    let records = list_records(&response);
                    println!("{}", render_list(&records));
                    println!("\n{} of {} products", records.len(), list_total(&response));
                }
            }
        }
        Command::Show { id, format } => {
            let provider = build_provider(&config, api_url, args.timeout)?;
            let response = provider.list(RESOURCE).await?;
            let record = list_records(&response)
                .into_iter()
                .find(|r| extract_json_value(r, "id") == id)
                .with_context(|| format!("Product not found: {}", id))?;
            print_record(&record, format)?;
        }
        Command::Create { source, format } => {
            let provider = build_provider(&config, api_url, args.timeout)?;
            let pdf = match source.pdf {
                Some(path) => Some(
                    PdfFile::from_path(&path)
                        .await
                        .with_context(|| format!("Failed to read PDF {:?}", path))?,
                ),
                None => None,
            };
            let payload = CreatePayload {
                url: source.url,
                text: source.text,
                pdf,
            };
            let envelope = provider.create(RESOURCE, payload).await?;
            print_record(&envelope.data, format)?;
        }
        Command::Import { file, concurrency } => {
            let provider = build_provider(&config, api_url, args.timeout)?;
            let requests = import::load_requests(&file).await?;
            let total = requests.len();
            let results = provider.create_many(RESOURCE, requests, concurrency).await?;

            let mut failed = 0;
            for (idx, result) in results.iter().enumerate() {
                match result {
                    Ok(envelope) => println!(
                        "[{}/{}] created {} ({})",
                        idx + 1,
                        total,
                        extract_json_value(&envelope.data, "name"),
                        extract_json_value(&envelope.data, "id")
                    ),
                    Err(err) => {
                        failed += 1;
                        println!("[{}/{}] failed: {}", idx + 1, total, err.user_message());
                    }
                }
            }

            if failed > 0 {
                anyhow::bail!("{} of {} imports failed", failed, total);
            }
        }
    }

    Ok(())
}

fn run_config(
    cmd: ConfigCommand,
    config: &mut Config,
    cli_api_url: Option<&str>,
    cli_timeout: Option<u64>,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let path = Config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("config file  {}", path);
            println!("api url      {}", config.effective_api_url(cli_api_url)?);
            match config.effective_timeout(cli_timeout) {
                Some(timeout) => println!("timeout      {}s", timeout.as_secs()),
                None => println!("timeout      none"),
            }
        }
        ConfigCommand::SetApiUrl { url } => {
            config.set_api_url(&url)?;
            println!("Saved API URL: {}", url.trim_end_matches('/'));
        }
        ConfigCommand::SetTimeout { seconds } => {
            config.set_timeout(Some(seconds))?;
            println!("Saved timeout: {}s", seconds);
        }
        ConfigCommand::ClearTimeout => {
            config.set_timeout(None)?;
            println!("Cleared timeout");
        }
    }
    Ok(())
}

fn print_record(record: &Value, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(record),
        Format::Table => {
            println!("{}", render_show(record));
            Ok(())
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
