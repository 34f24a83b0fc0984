use std::path::PathBuf;

use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::utils::{output_collection, output_success, response_message};
use crate::cli::OutputFormat;
use crate::services::{NewStudent, StudentService};

#[derive(Subcommand)]
pub enum StudentCommands {
    #[command(about = "List students")]
    List {
        #[arg(long, help = "Maximum number of students to return")]
        limit: Option<u32>,
    },

    #[command(about = "Search students by name or mobile number")]
    Search { term: String },

    #[command(about = "List the students of one class")]
    ByClass { class_id: String },

    #[command(about = "Add a single student")]
    Add {
        #[arg(help = "Student name")]
        name: String,
        #[arg(long)]
        father_name: String,
        #[arg(long)]
        class_id: String,
        #[arg(long, help = "10-digit mobile number starting with 6-9")]
        mobile: String,
    },

    #[command(about = "Import students from a spreadsheet (max 10MB)")]
    BulkUpload { class_id: String, file: PathBuf },
}

pub async fn handle(cmd: StudentCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let students = StudentService::new(client.clone());

    match cmd {
        StudentCommands::List { limit } => {
            let response = students.list(limit).await?;
            output_collection(&output_format, "students", &response)
        }
        StudentCommands::Search { term } => {
            let response = students.search(&term).await?;
            output_collection(&output_format, "students", &response)
        }
        StudentCommands::ByClass { class_id } => {
            let response = students.by_class(&class_id).await?;
            output_collection(&output_format, "students", &response)
        }
        StudentCommands::Add { name, father_name, class_id, mobile } => {
            let student = NewStudent {
                name,
                father_name,
                class_id,
                mobile_no: mobile,
            };
            let response = students.add(&student).await?;
            output_success(&output_format, &response_message(&response, "Student added"), Some(response))
        }
        StudentCommands::BulkUpload { class_id, file } => {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "students.xlsx".to_string());
            let bytes = std::fs::read(&file)?;
            let stats = students.bulk_upload(&class_id, &file_name, bytes).await?;
            output_success(
                &output_format,
                &format!(
                    "Processed {} students: {} added, {} failed",
                    stats.total_processed, stats.successful, stats.failed
                ),
                Some(serde_json::to_value(&stats)?),
            )
        }
    }
}
