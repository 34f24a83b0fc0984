use serde::Serialize;
use serde_json::Value;

use super::guard;
use crate::api::{data_list, endpoints, ensure_success, ApiClient};
use crate::error::ApiResult;
use crate::session::UserType;

/// Everything the mapping and credential screens need before they can render.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overview {
    pub staff: Vec<Value>,
    pub classes: Vec<Value>,
    pub subjects: Vec<Value>,
    pub designations: Vec<Value>,
    pub mappings: Value,
}

#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Profile of whoever is signed in, institution or staff.
    pub async fn profile(&self) -> ApiResult<Value> {
        self.client.get(endpoints::DASHBOARD_PROFILE, true).await
    }

    pub async fn institution_profile(&self) -> ApiResult<Value> {
        guard(&self.client, UserType::Institution)?;
        let response = self.client.get(endpoints::INSTITUTION_PROFILE, true).await?;
        ensure_success(response, "Failed to load dashboard data")
    }

    pub async fn stats(&self) -> ApiResult<Value> {
        guard(&self.client, UserType::Institution)?;
        self.client.get(endpoints::DASHBOARD_STATS, true).await
    }

    pub async fn staff_profile(&self) -> ApiResult<Value> {
        guard(&self.client, UserType::Staff)?;
        let response = self.client.get(endpoints::STAFF_PROFILE, true).await?;
        ensure_success(response, "Failed to load profile")
    }

    pub async fn staff_assignments(&self) -> ApiResult<Value> {
        guard(&self.client, UserType::Staff)?;
        self.client.get(endpoints::STAFF_ASSIGNMENTS, true).await
    }

    /// Loads the five reference lists concurrently; the first failure wins.
    pub async fn overview(&self) -> ApiResult<Overview> {
        let (staff, classes, subjects, designations, mappings) = futures::try_join!(
            self.client.get(endpoints::STAFF, true),
            self.client.get(endpoints::CLASSES, true),
            self.client.get(endpoints::SUBJECTS, true),
            self.client.get(endpoints::DESIGNATIONS, true),
            self.client.get(endpoints::ALL_MAPPINGS, true),
        )?;

        Ok(Overview {
            staff: data_list(&staff),
            classes: data_list(&classes),
            subjects: data_list(&subjects),
            designations: data_list(&designations),
            mappings: mappings.get("data").cloned().unwrap_or(Value::Null),
        })
    }
}
