use serde::Serialize;
use serde_json::Value;

use crate::api::{endpoints, ApiClient};
use crate::error::ApiResult;
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffClassAssignment {
    pub staff_id: String,
    pub designation_id: String,
    pub assigned_classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSubjectAssignment {
    pub class_id: String,
    pub subject_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSubjectAssignment {
    pub teacher_id: String,
    pub class_id: String,
    pub subject_ids: Vec<String>,
}

/// Staff↔class, class↔subject and teacher↔subject links.
#[derive(Clone)]
pub struct MappingService {
    client: ApiClient,
}

impl MappingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> ApiResult<Value> {
        self.client.get(endpoints::ALL_MAPPINGS, true).await
    }

    pub async fn assign_staff_class(&self, assignment: &StaffClassAssignment) -> ApiResult<Value> {
        validation::require(&assignment.staff_id, "Staff member")?;
        validation::require(&assignment.designation_id, "Designation")?;
        self.client
            .post(endpoints::STAFF_CLASS_MAPPING, assignment, true)
            .await
    }

    pub async fn assign_class_subjects(&self, assignment: &ClassSubjectAssignment) -> ApiResult<Value> {
        validation::require(&assignment.class_id, "Class")?;
        if assignment.subject_ids.is_empty() {
            return Err(ValidationError::EmptySelection("subject").into());
        }
        self.client
            .post(endpoints::CLASS_SUBJECT_MAPPING, assignment, true)
            .await
    }

    pub async fn assign_teacher_subjects(&self, assignment: &TeacherSubjectAssignment) -> ApiResult<Value> {
        validation::require(&assignment.teacher_id, "Teacher")?;
        validation::require(&assignment.class_id, "Class")?;
        if assignment.subject_ids.is_empty() {
            return Err(ValidationError::EmptySelection("subject").into());
        }
        self.client
            .post(endpoints::TEACHER_SUBJECT_MAPPING, assignment, true)
            .await
    }
}
