use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::cli::config::{guess_content_type, password_or_prompt};
use crate::cli::utils::{output_success, response_message};
use crate::cli::OutputFormat;
use crate::recovery::TOKEN_EXPIRED_MESSAGE;
use crate::services::{Address, AuthService, Contacts, LogoFile, Registration};
use crate::validation::{mask_email, mask_mobile};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login as an institution")]
    LoginInstitution {
        #[arg(help = "Institution code")]
        institution_code: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Login as a staff member")]
    LoginStaff {
        #[arg(help = "Login ID (10-digit mobile number)")]
        login_id: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Register a new institution")]
    Register {
        #[arg(long, help = "Institution name")]
        name: String,
        #[arg(long = "type", help = "Institution type, e.g. school or college")]
        institution_type: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        district: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        location: String,
        #[arg(long, help = "Primary 10-digit mobile number")]
        mobile1: String,
        #[arg(long, help = "Secondary 10-digit mobile number")]
        mobile2: Option<String>,
        #[arg(long)]
        email: String,
        #[arg(long, help = "Path to a logo image")]
        logo: Option<PathBuf>,
    },

    #[command(about = "Verify the OTP sent after registration")]
    VerifyOtp {
        institution_code: String,
        otp: String,
    },

    #[command(about = "Send the registration OTP again")]
    ResendOtp { institution_code: String },

    #[command(about = "Set the institution password after OTP verification")]
    SetPassword {
        institution_code: String,
        #[arg(long, help = "New password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Request a password reset OTP")]
    ForgotPassword { institution_code: String },

    #[command(about = "Reset the password with an OTP")]
    ResetPassword {
        institution_code: String,
        otp: String,
        #[arg(long, help = "New password (will prompt if not provided)")]
        password: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let auth = AuthService::new(client.clone());

    match cmd {
        AuthCommands::LoginInstitution { institution_code, password } => {
            let password = password_or_prompt(password, "Password")?;
            let result = auth.login_institution(&institution_code, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as institution {}", institution_code.trim()),
                Some(json!({ "user_type": result.user_type, "institution_code": institution_code.trim() })),
            )
        }
        AuthCommands::LoginStaff { login_id, password } => {
            let password = password_or_prompt(password, "Password")?;
            let result = auth.login_staff(&login_id, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as staff {}", mask_mobile(login_id.trim())),
                Some(json!({ "user_type": result.user_type, "login_id": login_id.trim() })),
            )
        }
        AuthCommands::Logout => {
            auth.logout()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = auth.status();
            let expired = session
                .token
                .as_deref()
                .map(|token| client.session().is_expired(token));

            match output_format {
                OutputFormat::Json => {
                    let mut status = serde_json::to_value(&session)?;
                    status["authenticated"] = json!(expired == Some(false));
                    status["expired"] = json!(expired);
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                OutputFormat::Text => match (&session.role, expired) {
                    (_, None) => println!("Not logged in"),
                    (_, Some(true)) => println!("{}", TOKEN_EXPIRED_MESSAGE),
                    (Some(role), Some(false)) => println!(
                        "Logged in as {} {}",
                        role,
                        session.subject_identifier.as_deref().unwrap_or("")
                    ),
                    (None, Some(false)) => println!("Token present but no role is stored"),
                },
            }
            Ok(())
        }
        AuthCommands::Register {
            name,
            institution_type,
            state,
            district,
            city,
            location,
            mobile1,
            mobile2,
            email,
            logo,
        } => {
            let logo = match logo {
                Some(path) => Some(LogoFile {
                    file_name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "logo".to_string()),
                    content_type: guess_content_type(&path),
                    bytes: std::fs::read(&path)?,
                }),
                None => None,
            };
            let masked_email = mask_email(&email);

            let registration = Registration {
                name,
                institution_type,
                address: Address { state, district, city, location },
                contacts: Contacts { mobile1, mobile2, email },
                logo,
            };
            let response = auth.register(registration).await?;
            output_success(
                &output_format,
                &format!(
                    "{} An OTP was sent to {}",
                    response_message(&response, "Registration submitted."),
                    masked_email
                ),
                Some(response),
            )
        }
        AuthCommands::VerifyOtp { institution_code, otp } => {
            let response = auth.verify_otp(&institution_code, &otp).await?;
            output_success(&output_format, &response_message(&response, "OTP verified"), Some(response))
        }
        AuthCommands::ResendOtp { institution_code } => {
            let response = auth.resend_otp(&institution_code).await?;
            output_success(&output_format, &response_message(&response, "OTP sent"), Some(response))
        }
        AuthCommands::SetPassword { institution_code, password } => {
            let password = password_or_prompt(password, "New password")?;
            let response = auth.set_password(&institution_code, &password).await?;
            output_success(&output_format, &response_message(&response, "Password set"), Some(response))
        }
        AuthCommands::ForgotPassword { institution_code } => {
            let response = auth.forgot_password(&institution_code).await?;
            output_success(&output_format, &response_message(&response, "Reset OTP sent"), Some(response))
        }
        AuthCommands::ResetPassword { institution_code, otp, password } => {
            let password = password_or_prompt(password, "New password")?;
            let response = auth.reset_password(&institution_code, &otp, &password).await?;
            output_success(&output_format, &response_message(&response, "Password reset"), Some(response))
        }
    }
}
