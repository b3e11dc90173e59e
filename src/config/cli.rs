use crate::config::{LogFormat, Settings};
use crate::domain::model::{AnomalyStatus, RecordId, RiskFilter};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "finboard")]
#[command(about = "Budgets, transactions, contacts and security alerts from the command line")]
#[command(version)]
pub struct CliConfig {
    /// Path to a TOML configuration file (default: ./finboard.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true)]
    pub db_api_base_url: Option<String>,

    /// Serve static demo data instead of calling the services
    #[arg(long, global = true)]
    pub mock: bool,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Budget cards, overview and security alert count
    Dashboard,
    #[command(subcommand)]
    Budgets(BudgetCommand),
    /// Income, savings and spending totals
    Overview,
    /// Spending tips
    Tips,
    #[command(subcommand)]
    Transactions(TransactionCommand),
    #[command(subcommand)]
    Anomalies(AnomalyCommand),
    #[command(subcommand)]
    Contacts(ContactCommand),
    /// Ask the assistant a question
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BudgetArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub limit: f64,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = crate::app::budgets::DEFAULT_COLOR)]
    pub color: String,
}

#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    List,
    Create(BudgetArgs),
    Update {
        id: RecordId,
        #[command(flatten)]
        budget: BudgetArgs,
    },
    Delete {
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
pub enum TransactionCommand {
    List {
        #[arg(long, default_value_t = crate::api::transactions::DEFAULT_PAGE_SIZE)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Suspicious transactions with the anomaly log
    #[command(alias = "flagged")]
    Suspicious,
}

#[derive(Debug, Subcommand)]
pub enum AnomalyCommand {
    Summary,
    List {
        #[arg(long, default_value_t = crate::api::anomalies::DEFAULT_LOG_LIMIT)]
        limit: u32,
        /// all, low, medium or high
        #[arg(long, default_value = "all")]
        risk: RiskFilter,
    },
    SetStatus {
        id: RecordId,
        /// pending_review, investigating or resolved
        status: AnomalyStatus,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub external: bool,
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    Search {
        query: String,
    },
    Create(ContactArgs),
    Update {
        id: RecordId,
        #[command(flatten)]
        contact: ContactArgs,
    },
    Delete {
        id: RecordId,
    },
}

impl CliConfig {
    /// Flags win over the file and the environment.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_base_url {
            settings.api_base_url = url.clone();
        }
        if let Some(url) = &self.db_api_base_url {
            settings.db_api_base_url = url.clone();
        }
        if self.mock {
            settings.use_mock_api = true;
        }
        if let Some(token) = &self.token {
            settings.auth_token = Some(token.clone());
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = timeout;
        }
        if self.json_logs {
            settings.log_format = LogFormat::Json;
        }
    }
}
