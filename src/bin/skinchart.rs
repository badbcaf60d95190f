//! skinchart CLI: chart server and maintenance commands.
//!
//! Usage:
//!   skinchart serve [--port N] [--public-dir DIR]
//!   skinchart chart <subcommand>
//!   skinchart extract <text>
//!   skinchart advice <user-id> <question>
//!
//! Global: --data-dir DIR, --store json|sqlite|memory

use clap::{Parser, Subcommand};
use skinchart::{
    AdviceClient, ChartService, ChartStore, Config, JsonFileStore, MemoryStore, PerplexityClient,
    SqliteStore, StoreKind,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "skinchart",
    version,
    about = "Skincare chat backend with keyword-derived skin profiles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory holding users.json / skinchart.db
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Chart store backend: json, sqlite or memory
    #[arg(long, global = true)]
    store: Option<StoreKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// Directory of static files served at /
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },
    /// Open a session, issuing a new user id if needed
    Session {
        /// Existing user id to resume
        #[arg(long)]
        user: Option<String>,
    },
    /// Inspect and update charts
    Chart {
        #[command(subcommand)]
        action: ChartAction,
    },
    /// Show what would be extracted from text, without saving
    Extract {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Ask for skincare advice using a user's chart
    Advice {
        /// User id
        user: String,
        #[arg(required = true)]
        question: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ChartAction {
    /// Print a user's chart as JSON
    Show {
        /// User id
        user: String,
    },
    /// Merge facts extracted from text into a user's chart
    Update {
        /// User id
        user: String,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List all user ids
    List,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &Config) -> Result<Arc<dyn ChartStore>, String> {
    let store: Arc<dyn ChartStore> = match config.store {
        StoreKind::Json => {
            let path = config.json_store_path();
            Arc::new(
                JsonFileStore::open(&path)
                    .map_err(|e| format!("failed to open {}: {}", path.display(), e))?,
            )
        }
        StoreKind::Sqlite => {
            let path = config.sqlite_store_path();
            Arc::new(
                SqliteStore::open(&path)
                    .map_err(|e| format!("failed to open database at {}: {}", path.display(), e))?,
            )
        }
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

fn open_service(config: &Config) -> Result<ChartService, String> {
    let store = open_store(config)?;
    let client: Arc<dyn AdviceClient> = Arc::new(
        PerplexityClient::new(config.advice.clone()).map_err(|e| e.to_string())?,
    );
    Ok(ChartService::new(store, client))
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_serve(service: ChartService, config: &Config) -> i32 {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    match skinchart::server::serve(addr, service, Some(&config.public_dir)).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_session(service: &ChartService, user: Option<&str>) -> i32 {
    match service.open_session(user).await {
        Ok(session) => {
            if session.created {
                eprintln!("Issued new user id {}", session.user_id);
            }
            print_json(&session)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_chart_show(service: &ChartService, user: &str) -> i32 {
    match service.chart(user).await {
        Ok(chart) => print_json(&chart),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_chart_update(service: &ChartService, user: &str, text: &str) -> i32 {
    match service.update_chart(user, text).await {
        Ok(chart) => print_json(&chart),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_chart_list(service: &ChartService) -> i32 {
    let ids = match service.list_users() {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if ids.is_empty() {
        println!("No charts stored.");
        return 0;
    }
    println!("{:<36}  {:<12}  {:>8}  {}", "USER", "SKIN TYPE", "CONCERNS", "UPDATED");
    println!("{}", "-".repeat(87));
    let mut code = 0;
    for id in ids {
        match service.store().load(&id) {
            Ok(Some(chart)) => println!(
                "{:<36}  {:<12}  {:>8}  {}",
                id,
                chart.skin_type.map(|t| t.as_str()).unwrap_or("-"),
                chart.skin_concerns.len(),
                chart.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Ok(None) => {}
            Err(e) => {
                eprintln!("Error: {}: {}", id, e);
                code = 1;
            }
        }
    }
    code
}

async fn cmd_advice(service: &ChartService, user: &str, question: &str) -> i32 {
    match service.advice(user, question).await {
        Ok(advice) => {
            println!("{}", advice);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(store) = cli.store {
        config.store = store;
    }

    let service = match open_service(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let code = rt.block_on(async {
        match cli.command {
            Commands::Serve { port, public_dir } => {
                if let Some(port) = port {
                    config.port = port;
                }
                if let Some(dir) = public_dir {
                    config.public_dir = dir;
                }
                cmd_serve(service, &config).await
            }
            Commands::Session { user } => cmd_session(&service, user.as_deref()).await,
            Commands::Chart { action } => match action {
                ChartAction::Show { user } => cmd_chart_show(&service, &user).await,
                ChartAction::Update { user, text } => {
                    cmd_chart_update(&service, &user, &text.join(" ")).await
                }
                ChartAction::List => cmd_chart_list(&service),
            },
            Commands::Extract { text } => print_json(&service.extract_preview(&text.join(" "))),
            Commands::Advice { user, question } => {
                cmd_advice(&service, &user, &question.join(" ")).await
            }
        }
    });
    std::process::exit(code);
}
