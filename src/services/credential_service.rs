use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{endpoints, ensure_success, ApiClient};
use crate::error::ApiResult;
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Teacher,
    Coordinator,
    Admin,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Teacher => "teacher",
            AccessLevel::Coordinator => "coordinator",
            AccessLevel::Admin => "admin",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(AccessLevel::Teacher),
            "coordinator" => Ok(AccessLevel::Coordinator),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(ValidationError::InvalidAccessLevel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalAccess {
    pub can_access_all_classes: bool,
    pub specific_classes: Vec<String>,
}

impl AdditionalAccess {
    /// Class restrictions are meaningless once every class is granted.
    pub fn new(can_access_all_classes: bool, specific_classes: Vec<String>) -> Self {
        Self {
            can_access_all_classes,
            specific_classes: if can_access_all_classes {
                Vec::new()
            } else {
                specific_classes
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCredential {
    pub staff_id: String,
    pub password: String,
    pub access_level: AccessLevel,
    pub additional_access: AdditionalAccess,
}

/// Login provisioning for staff members.
#[derive(Clone)]
pub struct CredentialService {
    client: ApiClient,
}

impl CredentialService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Value> {
        self.client.get(endpoints::CREDENTIALS, true).await
    }

    pub async fn create(&self, credential: &NewCredential) -> ApiResult<Value> {
        validation::require(&credential.staff_id, "Staff member")?;
        validation::require_password(&credential.password)?;
        self.client.post(endpoints::CREDENTIALS, credential, true).await
    }

    pub async fn update_password(&self, id: &str, new_password: &str) -> ApiResult<Value> {
        validation::require_password(new_password)?;
        let response = self
            .client
            .put(&endpoints::item(endpoints::CREDENTIALS, id), &json!({ "password": new_password }), true)
            .await?;
        ensure_success(response, "Update failed")
    }

    pub async fn set_active(&self, id: &str, active: bool) -> ApiResult<Value> {
        let response = self
            .client
            .put(&endpoints::item(endpoints::CREDENTIALS, id), &json!({ "isActive": active }), true)
            .await?;
        ensure_success(response, "Update failed")
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Value> {
        let response = self
            .client
            .delete(&endpoints::item(endpoints::CREDENTIALS, id), true)
            .await?;
        ensure_success(response, "Delete failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_classes_drops_specific_list() {
        let access = AdditionalAccess::new(true, vec!["c1".to_string()]);
        assert!(access.specific_classes.is_empty());
        let access = AdditionalAccess::new(false, vec!["c1".to_string()]);
        assert_eq!(access.specific_classes, vec!["c1".to_string()]);
    }

    #[test]
    fn test_credential_wire_format() {
        let credential = NewCredential {
            staff_id: "s1".to_string(),
            password: "secret1".to_string(),
            access_level: "Coordinator".parse().unwrap(),
            additional_access: AdditionalAccess::new(false, vec!["c1".to_string()]),
        };
        let value = serde_json::to_value(&credential).unwrap();
        assert_eq!(value["accessLevel"], "coordinator");
        assert_eq!(value["additionalAccess"]["canAccessAllClasses"], false);
        assert_eq!(value["additionalAccess"]["specificClasses"][0], "c1");
    }

    #[test]
    fn test_unknown_access_level() {
        assert!("principal".parse::<AccessLevel>().is_err());
    }
}
