pub mod commands;
pub mod config;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::{build_client, ApiClient};
use crate::error::ApiError;
use crate::recovery::{Navigator, TracingNavigator};

#[derive(Parser)]
#[command(name = "institution")]
#[command(about = "Institution admin CLI - manage classes, staff, students and mappings")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout, registration and password management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "CRUD on designations, classes, staff, subjects, students, hierarchy, credentials")]
    Data {
        #[command(subcommand)]
        cmd: commands::data::DataCommands,
    },

    #[command(about = "Staff listing and onboarding")]
    Staff {
        #[command(subcommand)]
        cmd: commands::staff::StaffCommands,
    },

    #[command(about = "Student listing, search and bulk import")]
    Students {
        #[command(subcommand)]
        cmd: commands::students::StudentCommands,
    },

    #[command(about = "Staff-class, class-subject and teacher-subject mappings")]
    Mappings {
        #[command(subcommand)]
        cmd: commands::mappings::MappingCommands,
    },

    #[command(about = "Staff login credential provisioning")]
    Credentials {
        #[command(subcommand)]
        cmd: commands::credentials::CredentialCommands,
    },

    #[command(about = "Institution and staff dashboards")]
    Dashboard {
        #[command(subcommand)]
        cmd: commands::dashboard::DashboardCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let app_config = crate::config::config();
    let store = Arc::new(config::open_session_store(app_config)?);
    // JSON output stays machine-readable; recovery notices go to the log instead.
    let navigator: Arc<dyn Navigator> = match output_format {
        OutputFormat::Json => Arc::new(TracingNavigator),
        OutputFormat::Text => Arc::new(utils::TerminalNavigator),
    };
    let client = build_client(app_config, store, navigator)?;

    let result = dispatch(cli.command, &client, output_format).await;

    // Let a pending login redirect print before the process exits.
    if client.recovery().redirect_pending() {
        client.recovery().settle().await;
    }

    if let Err(e) = &result {
        if let OutputFormat::Json = output_format {
            match e.downcast_ref::<ApiError>() {
                Some(api_error) => println!("{}", serde_json::to_string_pretty(&api_error.to_json())?),
                None => utils::output_error(&output_format, &e.to_string(), None)?,
            }
        }
    }
    result
}

async fn dispatch(command: Commands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, client, output_format).await,
        Commands::Data { cmd } => commands::data::handle(cmd, client, output_format).await,
        Commands::Staff { cmd } => commands::staff::handle(cmd, client, output_format).await,
        Commands::Students { cmd } => commands::students::handle(cmd, client, output_format).await,
        Commands::Mappings { cmd } => commands::mappings::handle(cmd, client, output_format).await,
        Commands::Credentials { cmd } => commands::credentials::handle(cmd, client, output_format).await,
        Commands::Dashboard { cmd } => commands::dashboard::handle(cmd, client, output_format).await,
    }
}
