use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::utils::{output_collection, output_success, response_message};
use crate::cli::OutputFormat;
use crate::services::{NewStaff, StaffService};

#[derive(Subcommand)]
pub enum StaffCommands {
    #[command(about = "List staff members")]
    List,

    #[command(about = "Add a staff member")]
    Add {
        #[arg(help = "Staff name")]
        name: String,
        #[arg(long, help = "10-digit mobile number starting with 6-9")]
        mobile: String,
        #[arg(long)]
        designation_id: String,
    },
}

pub async fn handle(cmd: StaffCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let staff = StaffService::new(client.clone());

    match cmd {
        StaffCommands::List => {
            let response = staff.list().await?;
            output_collection(&output_format, "staff", &response)
        }
        StaffCommands::Add { name, mobile, designation_id } => {
            let response = staff
                .add(&NewStaff {
                    name,
                    mobile_no: mobile,
                    designation_id,
                })
                .await?;
            output_success(&output_format, &response_message(&response, "Staff member added"), Some(response))
        }
    }
}
