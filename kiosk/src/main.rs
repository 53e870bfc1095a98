mod repl;

use anyhow::Context;
use checkin_client::CheckInClient;
use clap::{Parser, Subcommand};
use kiosk::{Config, DataStore, FloorPlan, find_guest, init_logger, suggest};
use shared::{AppError, GuestRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(about = "Wedding check-in kiosk", long_about = None)]
#[command(version)]
struct Cli {
    /// Guest dataset (name -> table assignment)
    #[arg(long, global = true, env = "KIOSK_GUESTS", value_name = "PATH")]
    guests: Option<PathBuf>,

    /// Table layout dataset
    #[arg(long, global = true, env = "KIOSK_TABLES", value_name = "PATH")]
    tables: Option<PathBuf>,

    /// Remote check-in endpoint; omit to run offline
    #[arg(long, global = true, env = "KIOSK_ENDPOINT_URL", value_name = "URL")]
    endpoint: Option<String>,

    /// Local check-in cache directory
    #[arg(long, global = true, env = "KIOSK_CACHE_DIR", value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Remote call timeout in seconds
    #[arg(long, global = true, env = "KIOSK_TIMEOUT_SECS", value_name = "SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive kiosk session (default)
    Run,

    /// Find a guest's table
    Find {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Show autocomplete suggestions
    Suggest {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show check-in status of a guest and their table
    Status {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Check a guest in
    Checkin {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List check-ins cached on this device
    Checkins,

    /// Delete every check-in cached on this device
    ClearCheckins,

    /// Print every table marker
    Layout,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.guests {
            config.guests_path = path.clone();
        }
        if let Some(path) = &self.tables {
            config.tables_path = path.clone();
        }
        if let Some(url) = &self.endpoint {
            config.endpoint_url = Some(url.clone()).filter(|u| !u.trim().is_empty());
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = dir.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    cli.apply(&mut config);
    init_logger(Some(&config.log_level), config.log_dir.as_deref());

    let store = DataStore::load(&config.guests_path, &config.tables_path).map_err(|e| {
        tracing::error!(error = %e, "Dataset load failed");
        AppError::from(e)
    })?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let client = CheckInClient::new(&config.client_config())?;
            repl::run(kiosk::Kiosk::new(store, client, &config)).await?;
        }
        Command::Find { name } => {
            let guest = lookup(&store, &name)?;
            let plan = FloorPlan::new(&store, config.highlight);
            println!("{} -> table {} ({})", guest.name, guest.table, guest.display_description());
            match plan.marker(guest.table) {
                Some(m) => println!("  marker at ({}, {}) r={}", m.position.x, m.position.y, m.radius),
                None => println!("  table {} is not on the floor plan", guest.table),
            }
        }
        Command::Suggest { query } => {
            for s in suggest(store.guests(), &query.join(" ")) {
                println!("[{}] {:<30} {}", s.priority, s.name, s.description);
            }
        }
        Command::Status { name } => {
            let guest = lookup(&store, &name)?;
            let client = CheckInClient::new(&config.client_config())?;
            let status = client.get_guest_and_table_status(guest).await;
            repl::print_status(guest, &status);
        }
        Command::Checkin { name } => {
            let guest = lookup(&store, &name)?;
            let client = CheckInClient::new(&config.client_config())?;
            let outcome = client
                .record_check_in(guest)
                .await
                .with_context(|| format!("check-in of {} failed", guest.name))?;
            if outcome.is_offline() {
                println!("{} checked in (saved offline)", guest.name);
            } else {
                println!("{} checked in", guest.name);
            }
        }
        Command::Checkins => {
            let client = CheckInClient::new(&config.client_config())?;
            let records = client.local_check_ins();
            println!("{} check-ins on {}", records.len(), client.device_id());
            for r in records {
                println!(
                    "{}  {:<30} table {:<4} {}",
                    r.timestamp_utc.to_rfc3339(),
                    r.guest_name,
                    r.table,
                    r.guest_id
                );
            }
        }
        Command::ClearCheckins => {
            let client = CheckInClient::new(&config.client_config())?;
            let removed = client.clear_local_check_ins()?;
            println!("Removed {removed} cached check-ins");
        }
        Command::Layout => {
            let plan = FloorPlan::new(&store, config.highlight);
            for m in plan.markers() {
                println!("table {:<4} ({}, {}) r={}", m.table, m.position.x, m.position.y, m.radius);
            }
        }
    }

    Ok(())
}

fn lookup<'a>(store: &'a DataStore, words: &[String]) -> Result<&'a GuestRecord, AppError> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        return Err(AppError::empty_query());
    }
    find_guest(store.guests(), &query).ok_or_else(|| AppError::no_match(query))
}
