use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{endpoints, ensure_success, ApiClient, Envelope, FormPayload};
use crate::error::ApiResult;
use crate::validation::{self, ValidationError, MAX_UPLOAD_BYTES};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub father_name: String,
    pub class_id: String,
    pub mobile_no: String,
}

/// Counters the backend reports after a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkUploadStats {
    pub total_processed: u64,
    pub successful: u64,
    pub failed: u64,
}

#[derive(Clone)]
pub struct StudentService {
    client: ApiClient,
}

impl StudentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, limit: Option<u32>) -> ApiResult<Value> {
        let path = match limit {
            Some(limit) => endpoints::with_query(endpoints::STUDENTS, &[("limit", &limit.to_string())]),
            None => endpoints::STUDENTS.to_string(),
        };
        self.client.get(&path, true).await
    }

    pub async fn search(&self, term: &str) -> ApiResult<Value> {
        validation::require(term, "Search term")?;
        let path = endpoints::with_query(endpoints::STUDENTS, &[("search", term.trim())]);
        self.client.get(&path, true).await
    }

    pub async fn by_class(&self, class_id: &str) -> ApiResult<Value> {
        validation::require(class_id, "Class")?;
        self.client
            .get(&endpoints::item(endpoints::STUDENTS_BY_CLASS, class_id), true)
            .await
    }

    pub async fn add(&self, student: &NewStudent) -> ApiResult<Value> {
        validation::require(&student.name, "Student name")?;
        validation::require(&student.father_name, "Father name")?;
        validation::require(&student.class_id, "Class")?;
        let mobile_no = validation::require_indian_mobile(&student.mobile_no, "Mobile number")?;

        let student = NewStudent {
            name: student.name.trim().to_string(),
            father_name: student.father_name.trim().to_string(),
            class_id: student.class_id.clone(),
            mobile_no,
        };
        self.client.post(endpoints::STUDENTS, &student, true).await
    }

    /// Import a spreadsheet of students into one class.
    pub async fn bulk_upload(&self, class_id: &str, file_name: &str, bytes: Vec<u8>) -> ApiResult<BulkUploadStats> {
        validation::require(class_id, "Class")?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::FileTooLarge.into());
        }

        let form = FormPayload::new()
            .text("classId", class_id.trim())
            .file("file", file_name, None, bytes);

        let response = self
            .client
            .post_form(endpoints::STUDENTS_BULK_UPLOAD, form, true)
            .await?;
        let body = ensure_success(response, "Upload failed")?;

        let stats = Envelope::from_value(&body)
            .stats
            .and_then(|s| serde_json::from_value(s).ok())
            .unwrap_or_default();
        tracing::info!(?stats, "bulk upload finished");
        Ok(stats)
    }
}
