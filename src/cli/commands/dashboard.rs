use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;
use crate::services::DashboardService;

#[derive(Subcommand)]
pub enum DashboardCommands {
    #[command(about = "Profile of the signed-in account")]
    Profile,

    #[command(about = "Institution profile and statistics")]
    Institution,

    #[command(about = "Staff profile and class assignments")]
    Staff,

    #[command(about = "Counts of staff, classes, subjects, designations and mappings")]
    Overview,
}

pub async fn handle(cmd: DashboardCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let dashboard = DashboardService::new(client.clone());

    match cmd {
        DashboardCommands::Profile => {
            let profile = dashboard.profile().await?;
            output_record(&output_format, &profile)
        }
        DashboardCommands::Institution => {
            let profile = dashboard.institution_profile().await?;
            let stats = dashboard.stats().await?;
            output_record(
                &output_format,
                &json!({
                    "profile": profile.get("data").cloned().unwrap_or(profile),
                    "stats": stats.get("data").cloned().unwrap_or(stats),
                }),
            )
        }
        DashboardCommands::Staff => {
            let profile = dashboard.staff_profile().await?;
            let assignments = dashboard.staff_assignments().await?;
            output_record(
                &output_format,
                &json!({
                    "profile": profile.get("data").cloned().unwrap_or(profile),
                    "assignments": assignments.get("data").cloned().unwrap_or(assignments),
                }),
            )
        }
        DashboardCommands::Overview => {
            let overview = dashboard.overview().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&overview)?),
                OutputFormat::Text => {
                    println!("Staff:        {}", overview.staff.len());
                    println!("Classes:      {}", overview.classes.len());
                    println!("Subjects:     {}", overview.subjects.len());
                    println!("Designations: {}", overview.designations.len());
                }
            }
            Ok(())
        }
    }
}
