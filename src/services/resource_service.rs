use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{endpoints, ApiClient};
use crate::error::ApiResult;
use crate::validation::ValidationError;

/// Collections managed through the generic CRUD screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Designations,
    Classes,
    Staff,
    Subjects,
    Students,
    Hierarchy,
    Credentials,
    Attendance,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Designations,
        Resource::Classes,
        Resource::Staff,
        Resource::Subjects,
        Resource::Students,
        Resource::Hierarchy,
        Resource::Credentials,
        Resource::Attendance,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Designations => endpoints::DESIGNATIONS,
            Resource::Classes => endpoints::CLASSES,
            Resource::Staff => endpoints::STAFF,
            Resource::Subjects => endpoints::SUBJECTS,
            Resource::Students => endpoints::STUDENTS,
            Resource::Hierarchy => endpoints::HIERARCHY,
            Resource::Credentials => endpoints::CREDENTIALS,
            Resource::Attendance => endpoints::ATTENDANCE,
        }
    }

    pub fn name(&self) -> &'static str {
        self.path().trim_start_matches('/')
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('/').to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Resource::ALL.iter().map(Resource::name).collect();
                format!("unknown resource '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyLevel {
    pub level_number: u32,
    pub name: String,
}

/// Plain CRUD over a [`Resource`]; payloads pass through untouched.
#[derive(Clone)]
pub struct ResourceService {
    client: ApiClient,
}

impl ResourceService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, resource: Resource) -> ApiResult<Value> {
        self.client.get(resource.path(), true).await
    }

    pub async fn get(&self, resource: Resource, id: &str) -> ApiResult<Value> {
        self.client.get(&endpoints::item(resource.path(), id), true).await
    }

    pub async fn create(&self, resource: Resource, body: &Value) -> ApiResult<Value> {
        self.client.post(resource.path(), body, true).await
    }

    pub async fn update(&self, resource: Resource, id: &str, body: &Value) -> ApiResult<Value> {
        self.client.put(&endpoints::item(resource.path(), id), body, true).await
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> ApiResult<Value> {
        self.client.delete(&endpoints::item(resource.path(), id), true).await
    }

    /// Replace the institution's hierarchy with the given level names, top level first.
    pub async fn save_hierarchy(&self, names: &[String]) -> ApiResult<Value> {
        let levels = hierarchy_levels(names)?;
        self.client
            .post(endpoints::HIERARCHY, &json!({ "levels": levels }), true)
            .await
    }
}

fn hierarchy_levels(names: &[String]) -> Result<Vec<HierarchyLevel>, ValidationError> {
    if names.is_empty() {
        return Err(ValidationError::EmptySelection("hierarchy level"));
    }
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            crate::validation::require(name, "Hierarchy level name")?;
            Ok(HierarchyLevel {
                level_number: i as u32 + 1,
                name: name.trim().to_string(),
            })
        })
        .collect()
}
