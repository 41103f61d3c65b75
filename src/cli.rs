use clap::{Parser, Subcommand};

use crate::error::AutoclassError;
use crate::query::{DateWindow, SortKey};
use crate::types::Engine;

#[derive(Parser)]
#[command(name = "autoclass")]
#[command(about = "Ticket classification result viewer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the latest upload and save the result
    Run {
        /// Engine: rule, ai (default: configured engine)
        #[arg(short, long, value_parser = parse_engine)]
        engine: Option<Engine>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one page of the ticket list of the last run
    #[command(visible_alias = "ls")]
    Show {
        /// Substring to look for in ticket content (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Received within: today, week, month, quarter
        #[arg(short, long, value_parser = parse_date_window)]
        date: Option<DateWindow>,

        /// Exact channel name
        #[arg(long)]
        channel: Option<String>,

        /// Exact category name
        #[arg(long)]
        category: Option<String>,

        /// Sort: date-desc, date-asc, confidence-desc, confidence-asc, category, channel
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1", value_parser = parse_page)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the category table, channel cards and reliability of the last run
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show server-side statistics for the latest upload
    Stats,

    /// Forget the saved run
    Reset {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Email the latest analysis report as a PDF
    Email {
        /// Recipient address
        address: String,

        /// Report to send (default: latest report)
        #[arg(long)]
        report_id: Option<u64>,
    },

    /// Append a contact form submission read from stdin to the workbook
    Contact {
        /// Content type of the body on stdin
        #[arg(long, default_value = "application/json")]
        content_type: String,

        /// Sheet to append to (default: configured sheet)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, user_id, engine, request_timeout, workbook_sheet)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            ShowOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_contact, cmd_email,
            cmd_reset, cmd_run, cmd_show, cmd_stats, cmd_summary,
        };

        match self {
            Commands::Run { engine, json } => cmd_run(engine, json).await,

            Commands::Show {
                search,
                date,
                channel,
                category,
                sort,
                page,
                json,
            } => cmd_show(ShowOptions {
                search,
                date_window: date,
                channel,
                category,
                sort,
                page,
                output_json: json,
            }),

            Commands::Summary { json } => cmd_summary(json),
            Commands::Stats => cmd_stats().await,
            Commands::Reset { json } => cmd_reset(json),

            Commands::Email { address, report_id } => cmd_email(&address, report_id).await,

            Commands::Contact {
                content_type,
                sheet,
            } => cmd_contact(&content_type, sheet.as_deref()),

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },
        }
    }
}

fn parse_engine(s: &str) -> Result<Engine, String> {
    s.parse().map_err(|e: AutoclassError| e.to_string())
}

fn parse_date_window(s: &str) -> Result<DateWindow, String> {
    s.parse().map_err(|e: AutoclassError| e.to_string())
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse().map_err(|e: AutoclassError| e.to_string())
}

fn parse_page(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("invalid page '{s}', expected a positive integer")),
        Ok(page) => Ok(page),
    }
}
