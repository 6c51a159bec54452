//! pilot-math: timed mental-math drills for pilots.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use pilot_core::model::Category;
use services::SessionLength;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::{AppConfig, DEFAULT_DATA_DIR, parse_minutes};

const DEFAULT_LOG_FILTER: &str = "pilot_math=info,services=info,storage=warn";

#[derive(Parser)]
#[command(name = "pilot-math", version, about = "Mental-math drills for pilots")]
struct Cli {
    /// Directory for the local attempt log
    #[arg(long, global = true, env = "PILOT_MATH_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// SQLite database URL; when set it is the primary store
    #[arg(long = "db", global = true, env = "PILOT_MATH_DB_URL")]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timed practice session
    Practice {
        /// Session length: 5, 10, 15, 20, 25 or 30
        #[arg(long, env = "PILOT_MATH_MINUTES", default_value = "15", value_parser = parse_minutes)]
        minutes: SessionLength,

        /// Drill a single category (see `categories`)
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show accuracy, timing, streak and calendar
    Stats {
        /// Calendar window in days
        #[arg(long, default_value_t = services::progress_service::DEFAULT_CALENDAR_DAYS)]
        days: u32,
    },

    /// List category slugs
    Categories,

    /// Show the formula card for a category, or all of them
    Reference { category: Option<Category> },

    /// Write every session, result and the streak as JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace stored attempts with an exported bundle
    Import { path: PathBuf },

    /// Delete every stored attempt
    Clear,

    /// Move the local attempt log into the database
    Sync,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::new(cli.data_dir, cli.db_url);

    let result = match cli.command {
        Commands::Practice { minutes, category } => {
            commands::practice::execute(&config, minutes, category).await
        }
        Commands::Stats { days } => commands::stats::execute(&config, days).await,
        Commands::Categories => {
            commands::reference::list_categories();
            Ok(())
        }
        Commands::Reference { category } => {
            commands::reference::execute(category);
            Ok(())
        }
        Commands::Export { out } => commands::data::export(&config, out).await,
        Commands::Import { path } => commands::data::import(&config, &path).await,
        Commands::Clear => commands::data::clear(&config).await,
        Commands::Sync => commands::data::sync(&config).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn practice_flags_parse_into_domain_types() {
        let cli = Cli::try_parse_from([
            "pilot-math",
            "practice",
            "--minutes",
            "5",
            "--category",
            "crosswind",
        ])
        .unwrap();
        match cli.command {
            Commands::Practice { minutes, category } => {
                assert_eq!(minutes.minutes(), 5);
                assert_eq!(category, Some(Category::Crosswind));
            }
            _ => panic!("expected practice"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Cli::try_parse_from(["pilot-math", "reference", "warp-drive"]).is_err());
        assert!(Cli::try_parse_from(["pilot-math", "practice", "--minutes", "12"]).is_err());
    }
}
