use clap::Subcommand;

use crate::api::ApiClient;
use crate::cli::utils::{output_record, output_success, response_message};
use crate::cli::OutputFormat;
use crate::services::{
    ClassSubjectAssignment, MappingService, StaffClassAssignment, TeacherSubjectAssignment,
};

#[derive(Subcommand)]
pub enum MappingCommands {
    #[command(about = "Show all mappings")]
    List,

    #[command(about = "Assign a staff member a designation and classes")]
    StaffClass {
        staff_id: String,
        designation_id: String,
        #[arg(long = "class", help = "Class id; repeat for several classes")]
        classes: Vec<String>,
    },

    #[command(about = "Attach subjects to a class")]
    ClassSubject {
        class_id: String,
        #[arg(long = "subject", required = true, help = "Subject id; repeat for several subjects")]
        subjects: Vec<String>,
    },

    #[command(about = "Assign a teacher subjects within a class")]
    TeacherSubject {
        teacher_id: String,
        class_id: String,
        #[arg(long = "subject", required = true, help = "Subject id; repeat for several subjects")]
        subjects: Vec<String>,
    },
}

pub async fn handle(cmd: MappingCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let mappings = MappingService::new(client.clone());

    let response = match cmd {
        MappingCommands::List => {
            let response = mappings.all().await?;
            return output_record(&output_format, &response);
        }
        MappingCommands::StaffClass { staff_id, designation_id, classes } => {
            mappings
                .assign_staff_class(&StaffClassAssignment {
                    staff_id,
                    designation_id,
                    assigned_classes: classes,
                })
                .await?
        }
        MappingCommands::ClassSubject { class_id, subjects } => {
            mappings
                .assign_class_subjects(&ClassSubjectAssignment {
                    class_id,
                    subject_ids: subjects,
                })
                .await?
        }
        MappingCommands::TeacherSubject { teacher_id, class_id, subjects } => {
            mappings
                .assign_teacher_subjects(&TeacherSubjectAssignment {
                    teacher_id,
                    class_id,
                    subject_ids: subjects,
                })
                .await?
        }
    };

    output_success(&output_format, &response_message(&response, "Mapping saved"), Some(response))
}
