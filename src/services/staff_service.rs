use serde::Serialize;
use serde_json::Value;

use crate::api::{endpoints, ApiClient};
use crate::error::ApiResult;
use crate::validation;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    pub name: String,
    pub mobile_no: String,
    pub designation_id: String,
}

#[derive(Clone)]
pub struct StaffService {
    client: ApiClient,
}

impl StaffService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Value> {
        self.client.get(endpoints::STAFF, true).await
    }

    /// Adds a staff member under a designation; the mobile number is sent as bare digits.
    pub async fn add(&self, staff: &NewStaff) -> ApiResult<Value> {
        validation::require(&staff.name, "Staff name")?;
        let mobile_no = validation::require_indian_mobile(&staff.mobile_no, "Mobile number")?;
        validation::require(&staff.designation_id, "Designation")?;

        let staff = NewStaff {
            name: staff.name.trim().to_string(),
            mobile_no,
            designation_id: staff.designation_id.clone(),
        };
        self.client.post(endpoints::STAFF, &staff, true).await
    }
}
