use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::config::read_json_input;
use crate::cli::utils::{output_collection, output_record, output_success, response_message};
use crate::cli::OutputFormat;
use crate::services::{Resource, ResourceService};

#[derive(Subcommand)]
pub enum DataCommands {
    #[command(about = "List all records of a resource")]
    List {
        #[arg(help = "designations, classes, staff, subjects, students, hierarchy, credentials or attendance")]
        resource: Resource,
    },

    #[command(about = "Get one record by id")]
    Get { resource: Resource, id: String },

    #[command(about = "Create a record from JSON (--data or stdin)")]
    Create {
        resource: Resource,
        #[arg(long, help = "JSON body; read from stdin when omitted")]
        data: Option<String>,
    },

    #[command(about = "Update a record from JSON (--data or stdin)")]
    Update {
        resource: Resource,
        id: String,
        #[arg(long, help = "JSON body; read from stdin when omitted")]
        data: Option<String>,
    },

    #[command(about = "Delete a record by id")]
    Delete { resource: Resource, id: String },

    #[command(about = "Replace the institution hierarchy, top level first")]
    Hierarchy {
        #[arg(required = true, help = "Level names, e.g. Principal \"Vice Principal\" HOD")]
        levels: Vec<String>,
    },
}

pub async fn handle(cmd: DataCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let resources = ResourceService::new(client.clone());

    match cmd {
        DataCommands::List { resource } => {
            let response = resources.list(resource).await?;
            output_collection(&output_format, resource.name(), &response)
        }
        DataCommands::Get { resource, id } => {
            let response = resources.get(resource, &id).await?;
            output_record(&output_format, &response)
        }
        DataCommands::Create { resource, data } => {
            let body = read_json_input(data)?;
            let response = resources.create(resource, &body).await?;
            output_success(
                &output_format,
                &response_message(&response, &format!("Created {} record", resource)),
                Some(response),
            )
        }
        DataCommands::Update { resource, id, data } => {
            let body = read_json_input(data)?;
            let response = resources.update(resource, &id, &body).await?;
            output_success(
                &output_format,
                &response_message(&response, &format!("Updated {} {}", resource, id)),
                Some(response),
            )
        }
        DataCommands::Delete { resource, id } => {
            let response = resources.delete(resource, &id).await?;
            output_success(
                &output_format,
                &response_message(&response, &format!("Deleted {} {}", resource, id)),
                Some(response),
            )
        }
        DataCommands::Hierarchy { levels } => {
            let response = resources.save_hierarchy(&levels).await?;
            output_success(
                &output_format,
                &response_message(&response, &format!("Saved {} hierarchy levels", levels.len())),
                Some(response),
            )
        }
    }
}
