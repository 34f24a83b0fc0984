use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::config::password_or_prompt;
use crate::cli::utils::{output_collection, output_success, response_message};
use crate::cli::OutputFormat;
use crate::services::{AccessLevel, AdditionalAccess, CredentialService, NewCredential};

#[derive(Subcommand)]
pub enum CredentialCommands {
    #[command(about = "List staff credentials")]
    List,

    #[command(about = "Create a login for a staff member")]
    Create {
        staff_id: String,
        #[arg(long, default_value = "teacher", help = "teacher, coordinator or admin")]
        access_level: AccessLevel,
        #[arg(long, help = "Grant access to every class")]
        all_classes: bool,
        #[arg(long = "class", help = "Class id; repeat for several classes")]
        classes: Vec<String>,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Change a credential's password")]
    SetPassword {
        id: String,
        #[arg(long, help = "New password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Re-enable a credential")]
    Activate { id: String },

    #[command(about = "Disable a credential without deleting it")]
    Deactivate { id: String },

    #[command(about = "Delete a credential")]
    Delete { id: String },
}

pub async fn handle(cmd: CredentialCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let credentials = CredentialService::new(client.clone());

    let (response, fallback) = match cmd {
        CredentialCommands::List => {
            let response = credentials.list().await?;
            return output_collection(&output_format, "credentials", &response);
        }
        CredentialCommands::Create { staff_id, access_level, all_classes, classes, password } => {
            let password = password_or_prompt(password, "Password")?;
            let credential = NewCredential {
                staff_id,
                password,
                access_level,
                additional_access: AdditionalAccess::new(all_classes, classes),
            };
            (credentials.create(&credential).await?, "Credential created")
        }
        CredentialCommands::SetPassword { id, password } => {
            let password = password_or_prompt(password, "New password")?;
            (credentials.update_password(&id, &password).await?, "Password updated")
        }
        CredentialCommands::Activate { id } => (credentials.set_active(&id, true).await?, "Credential activated"),
        CredentialCommands::Deactivate { id } => (credentials.set_active(&id, false).await?, "Credential deactivated"),
        CredentialCommands::Delete { id } => (credentials.delete(&id).await?, "Credential deleted"),
    };

    output_success(&output_format, &response_message(&response, fallback), Some(response))
}
