use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use twitter_bot_api::config::AppConfig;
use twitter_bot_api::logging::init_logging;
use twitter_bot_api::repository::{Entity, Repository};
use twitter_bot_api::validation::InputValidator;
use twitter_bot_api::{BotService, ControlSurface};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the JSON documents (overrides configuration)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing data files and record the startup event
    Init,
    /// Manage monitored accounts
    Accounts {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Manage response templates
    Responses {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Show the activity log
    Logs {
        /// Only show entries with this level (info, success, warning, error, all)
        #[arg(short, long, default_value = "all")]
        level: String,

        /// Print as text lines instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Show or replace bot settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Control the automation process
    Bot {
        #[command(subcommand)]
        action: BotAction,
    },
    /// Show dashboard totals
    Stats,
}

#[derive(Subcommand)]
enum CollectionAction {
    /// List every record
    List,
    /// Add a record from a JSON payload
    Add {
        /// Record as JSON
        payload: String,
    },
    /// Replace the record with the given id
    Update {
        /// Id of the record to replace
        id: String,
        /// Replacement record as JSON
        payload: String,
    },
    /// Delete the record with the given id
    Delete {
        /// Id of the record to delete
        id: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,
    /// Replace settings from a JSON payload
    Set {
        /// Complete settings document as JSON
        payload: String,
    },
}

#[derive(Subcommand)]
enum BotAction {
    /// Start automation
    Start,
    /// Stop automation
    Stop,
    /// Show automation status
    Status,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let _log_guard = init_logging(
        Some(&config.logging.level),
        config.log_file().as_deref(),
        &config.logging.format,
    )?;

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    info!(data_dir = %data_dir.display(), "Starting twitter-bot");
    let service = BotService::open(data_dir);

    match run(&service, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "command failed");
            eprintln!("Error: {}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(service: &BotService, command: Commands) -> twitter_bot_api::Result<String> {
    if !matches!(command, Commands::Init) {
        service.initialize().await?;
    }

    match command {
        Commands::Init => to_pretty(&service.startup().await?),
        Commands::Accounts { action } => {
            let output =
                run_collection(service.accounts(), action, InputValidator::validate_account)
                    .await?;
            to_pretty(&output)
        }
        Commands::Responses { action } => {
            let output =
                run_collection(service.responses(), action, InputValidator::validate_response)
                    .await?;
            to_pretty(&output)
        }
        Commands::Logs { level, text } => {
            if text && level.eq_ignore_ascii_case("all") {
                return Ok(service.logs().export_text().await);
            }
            let entries = service.logs().list_by_level(&level).await;
            if text {
                let lines: Vec<String> = entries
                    .iter()
                    .map(twitter_bot_api::utils::format_log_line)
                    .collect();
                return Ok(lines.join("\n"));
            }
            to_pretty(&entries)
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => to_pretty(&service.settings().get().await),
            SettingsAction::Set { payload } => {
                let settings = InputValidator::parse_payload(&payload)?;
                InputValidator::validate_settings(&settings)?;
                to_pretty(&service.settings().replace(settings).await?)
            }
        },
        Commands::Bot { action } => match action {
            BotAction::Start => to_pretty(&service.control().start().await),
            BotAction::Stop => to_pretty(&service.control().stop().await),
            BotAction::Status => to_pretty(&service.control().status().await),
        },
        Commands::Stats => to_pretty(&service.stats().await),
    }
}

async fn run_collection<T, R>(
    repository: &R,
    action: CollectionAction,
    validate: fn(&T) -> twitter_bot_api::Result<()>,
) -> twitter_bot_api::Result<Value>
where
    T: Entity,
    R: Repository<T>,
{
    let output = match action {
        CollectionAction::List => serde_json::to_value(repository.list().await)?,
        CollectionAction::Add { payload } => {
            let entity: T = InputValidator::parse_payload(&payload)?;
            validate(&entity)?;
            serde_json::to_value(repository.create(entity).await?)?
        }
        CollectionAction::Update { id, payload } => {
            InputValidator::validate_id(&id)?;
            let entity: T = InputValidator::parse_payload(&payload)?;
            validate(&entity)?;
            serde_json::to_value(repository.update(&id, entity).await?)?
        }
        CollectionAction::Delete { id } => {
            InputValidator::validate_id(&id)?;
            serde_json::to_value(repository.delete(&id).await?)?
        }
    };
    Ok(output)
}

fn to_pretty<T: serde::Serialize>(value: &T) -> twitter_bot_api::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
