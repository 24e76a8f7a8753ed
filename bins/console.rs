//! Command-line console for the Kapok admin API.
//!
//! Keeps its session under the configured session directory so consecutive
//! invocations share one login.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client::{ApiClient, ClientError};
use configs::ConsoleConfig;
use models::metrics::{MetricsResponse, TimeRange};
use models::tenant::{CreateTenantRequest, IsolationLevel, Tenant, TenantStatus};
use service::pagination::Pagination;
use service::tenants::{total_storage_bytes, TenantFilter};
use service::FileSessionStore;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Kapok admin console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to $CONFIG_PATH or kapok.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange credentials for a session
    Login {
        #[arg(long)]
        email: String,
        /// Falls back to $KAPOK_PASSWORD
        #[arg(long, env = "KAPOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Platform-wide counters
    Stats,
    /// Latency, error-rate and throughput series
    Metrics {
        #[arg(long, default_value = "24h", value_parser = parse_range)]
        range: TimeRange,
        #[arg(short, long, value_enum, default_value_t = Output::Table)]
        output: Output,
    },
    /// Tenant management
    #[command(subcommand)]
    Tenant(TenantCommand),
}

#[derive(Subcommand)]
enum TenantCommand {
    /// List tenants
    List {
        /// Filter by status (active, provisioning, suspended, deleted, migrating)
        #[arg(long, value_parser = parse_status)]
        status: Option<TenantStatus>,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(short, long, value_enum, default_value_t = Output::Table)]
        output: Output,
    },
    /// Show one tenant
    Get {
        id: String,
        #[arg(short, long, value_enum, default_value_t = Output::Table)]
        output: Output,
    },
    /// Create a tenant
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "schema", value_parser = parse_isolation)]
        isolation: IsolationLevel,
    },
    /// Delete a tenant
    Delete { id: String },
    /// Print the tenant's GraphQL endpoint
    GraphqlEndpoint { id: String },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Table,
    Json,
}

fn parse_range(s: &str) -> Result<TimeRange, String> {
    s.parse().map_err(|e: models::ModelError| e.to_string())
}

fn parse_status(s: &str) -> Result<TenantStatus, String> {
    s.parse().map_err(|e: models::ModelError| e.to_string())
}

fn parse_isolation(s: &str) -> Result<IsolationLevel, String> {
    s.parse().map_err(|e: models::ModelError| e.to_string())
}

fn init_logging(cli: &Cli) {
    if cli.json_logs {
        common::utils::logging::init_logging_json();
    } else if cli.verbose {
        common::utils::logging::init_logging_verbose();
    } else {
        common::utils::logging::init_logging_default();
    }
    debug!(version = common::VERSION, "tracing subscriber initialized");
}

fn load_config(cli: &Cli) -> Result<ConsoleConfig> {
    match &cli.config {
        Some(path) => ConsoleConfig::load_path_and_validate(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => ConsoleConfig::load_and_validate().context("loading config"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(client_err) = e.downcast_ref::<ClientError>() {
                error!(code = client_err.code(), status = ?client_err.status(), "command failed");
                if let Some(redirect) = client_err.login_redirect() {
                    eprintln!("session expired; run `console login` ({})", redirect.path);
                    return ExitCode::FAILURE;
                }
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    let session = FileSessionStore::open(&cfg.session.dir)
        .await
        .with_context(|| format!("opening session dir {}", cfg.session.dir.display()))?;
    let api = ApiClient::new(&cfg.api, Arc::new(session))?;
    debug!(base_url = api.base_url(), "client ready");

    match cli.command {
        Commands::Login { email, password } => {
            api.login(&email, &password).await?;
            println!("logged in as {email}");
        }
        Commands::Logout => {
            let redirect = api.logout().await;
            debug!(path = redirect.path, "session cleared");
            println!("logged out");
        }
        Commands::Whoami => {
            let me = api.me().await?;
            println!("{} ({}) id={}", me.email, me.role, me.id);
        }
        Commands::Stats => {
            let s = api.stats().await?;
            println!("tenants         {} ({} active)", s.total_tenants, s.active_tenants);
            println!("storage         {}", human_bytes(s.total_storage_bytes));
            println!("queries today   {}", s.total_queries_today);
        }
        Commands::Metrics { range, output } => {
            let m = api.metrics(range).await?;
            match output {
                Output::Json => println!("{}", serde_json::to_string_pretty(&m)?),
                Output::Table => print_metrics(range, &m),
            }
        }
        Commands::Tenant(cmd) => run_tenant(&api, cmd).await?,
    }
    Ok(())
}

async fn run_tenant(api: &ApiClient, cmd: TenantCommand) -> Result<()> {
    match cmd {
        TenantCommand::List { status, limit, offset, output } => {
            let filter = TenantFilter { status, pagination: Pagination { offset, limit } };
            let tenants = filter.apply(api.list_tenants().await?);
            match output {
                Output::Json => println!("{}", serde_json::to_string_pretty(&tenants)?),
                Output::Table => print_tenants(&tenants),
            }
        }
        TenantCommand::Get { id, output } => {
            let t = api.get_tenant(&id).await?;
            match output {
                Output::Json => println!("{}", serde_json::to_string_pretty(&t)?),
                Output::Table => print_tenants(std::slice::from_ref(&t)),
            }
        }
        TenantCommand::Create { name, isolation } => {
            let t = api.create_tenant(&CreateTenantRequest::new(name, isolation)).await?;
            println!("created tenant {} ({})", t.name, t.id);
        }
        TenantCommand::Delete { id } => {
            api.delete_tenant(&id).await?;
            println!("deleted tenant {id}");
        }
        TenantCommand::GraphqlEndpoint { id } => {
            println!("{}", api.graphql_endpoint(&id)?);
        }
    }
    Ok(())
}

fn print_tenants(tenants: &[Tenant]) {
    if tenants.is_empty() {
        println!("no tenants");
        return;
    }
    println!("{:<36}  {:<20}  {:<10}  {:<10}  {:>10}  CREATED", "ID", "NAME", "STATUS", "ISOLATION", "STORAGE");
    for t in tenants {
        println!(
            "{:<36}  {:<20}  {:<10}  {:<10}  {:>10}  {}",
            t.id,
            t.name,
            t.status,
            t.isolation_level,
            human_bytes(t.storage_used_bytes),
            t.created_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    println!("\n{} tenant(s), {} total", tenants.len(), human_bytes(total_storage_bytes(tenants)));
}

fn print_metrics(range: TimeRange, m: &MetricsResponse) {
    println!("range {range}");
    println!("{:<18}  {:<12}  {:>7}  {:>12}", "SERIES", "LABEL", "POINTS", "LATEST");
    for (name, series) in m.series() {
        let latest = series.latest().map(|p| format!("{:.3}", p.value)).unwrap_or_else(|| "-".into());
        println!("{:<18}  {:<12}  {:>7}  {:>12}", name, series.label, series.data.len(), latest);
    }
}

fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
