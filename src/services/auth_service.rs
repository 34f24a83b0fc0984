use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{endpoints, ensure_success, ApiClient, Envelope, FormPayload};
use crate::error::{ApiError, ApiResult};
use crate::session::{Identity, Session, UserType};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    pub user_type: UserType,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub state: String,
    pub district: String,
    pub city: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contacts {
    pub mobile1: String,
    pub mobile2: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct LogoFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// New institution sign-up, sent as a multipart form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub institution_type: String,
    pub address: Address,
    pub contacts: Contacts,
    pub logo: Option<LogoFile>,
}

impl Registration {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::require(&self.name, "Institution name")?;
        validation::require(&self.institution_type, "Institution type")?;
        validation::require_mobile(&self.contacts.mobile1, "Mobile Number 1")?;
        if let Some(mobile2) = self.contacts.mobile2.as_deref().filter(|m| !m.is_empty()) {
            validation::require_mobile(mobile2, "Mobile Number 2")?;
        }
        if !validation::validate_email(&self.contacts.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    fn into_form(self) -> ApiResult<FormPayload> {
        let contacts = Contacts {
            mobile2: self.contacts.mobile2.clone().filter(|m| !m.is_empty()),
            ..self.contacts.clone()
        };

        let mut form = FormPayload::new()
            .text("name", self.name.trim())
            .text("type", self.institution_type.trim())
            .text("address", encode_field(&self.address)?)
            .text("contacts", encode_field(&contacts)?);

        if let Some(logo) = self.logo {
            form = form.file("logo", logo.file_name, logo.content_type, logo.bytes);
        }
        Ok(form)
    }
}

/// Nested objects travel as JSON strings inside the multipart form.
fn encode_field<T: Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value)
        .map_err(|e| ApiError::domain(None, format!("Registration could not be encoded: {}", e)))
}

/// Login, logout, registration and password flows.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login_institution(&self, institution_code: &str, password: &str) -> ApiResult<LoginResult> {
        let institution_code = institution_code.trim();
        if institution_code.is_empty() || password.is_empty() {
            return Err(ApiError::domain(None, "Please enter both institution code and password"));
        }

        let body = json!({ "institutionCode": institution_code, "password": password });
        let identity = Identity::Institution {
            institution_code: institution_code.to_string(),
        };
        self.login(endpoints::INSTITUTION_LOGIN, body, identity).await
    }

    pub async fn login_staff(&self, login_id: &str, password: &str) -> ApiResult<LoginResult> {
        let login_id = login_id.trim();
        if login_id.is_empty() || password.is_empty() {
            return Err(ApiError::domain(None, "Please enter both login ID and password"));
        }
        validation::require_mobile(login_id, "Login ID")?;

        let body = json!({ "loginId": login_id, "password": password });
        let identity = Identity::Staff {
            login_id: login_id.to_string(),
        };
        self.login(endpoints::STAFF_LOGIN, body, identity).await
    }

    async fn login(&self, path: &str, body: Value, identity: Identity) -> ApiResult<LoginResult> {
        let response = self.client.post(path, &body, false).await?;
        let envelope = Envelope::from_value(&ensure_success(response, "Login failed")?);

        let token = envelope
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::domain(None, "Login response did not include a token"))?;

        self.client.session().store_login(&token, &identity)?;
        tracing::info!(user_type = %identity.user_type(), "logged in");

        Ok(LoginResult {
            user_type: identity.user_type(),
            message: envelope.message,
        })
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.client.session().clear_session()?;
        tracing::info!("logged out");
        Ok(())
    }

    pub fn status(&self) -> Session {
        self.client.session().snapshot()
    }

    pub async fn register(&self, registration: Registration) -> ApiResult<Value> {
        registration.validate()?;
        let form = registration.into_form()?;
        let response = self.client.post_form(endpoints::REGISTER, form, false).await?;
        ensure_success(response, "Registration failed")
    }

    pub async fn verify_otp(&self, institution_code: &str, otp: &str) -> ApiResult<Value> {
        validation::require(institution_code, "Institution code")?;
        validation::require(otp, "OTP")?;
        let body = json!({ "institutionCode": institution_code.trim(), "otp": otp.trim() });
        let response = self.client.post(endpoints::VERIFY_OTP, &body, false).await?;
        ensure_success(response, "OTP verification failed")
    }

    pub async fn resend_otp(&self, institution_code: &str) -> ApiResult<Value> {
        validation::require(institution_code, "Institution code")?;
        let body = json!({ "institutionCode": institution_code.trim() });
        let response = self.client.post(endpoints::RESEND_OTP, &body, false).await?;
        ensure_success(response, "Could not resend OTP")
    }

    pub async fn set_password(&self, institution_code: &str, password: &str) -> ApiResult<Value> {
        validation::require(institution_code, "Institution code")?;
        validation::require_password(password)?;
        let body = json!({ "institutionCode": institution_code.trim(), "password": password });
        let response = self.client.post(endpoints::SET_PASSWORD, &body, false).await?;
        ensure_success(response, "Could not set password")
    }

    pub async fn forgot_password(&self, institution_code: &str) -> ApiResult<Value> {
        validation::require(institution_code, "Institution code")?;
        let body = json!({ "institutionCode": institution_code.trim() });
        let response = self.client.post(endpoints::FORGOT_PASSWORD, &body, false).await?;
        ensure_success(response, "Could not start password reset")
    }

    pub async fn reset_password(&self, institution_code: &str, otp: &str, new_password: &str) -> ApiResult<Value> {
        validation::require(institution_code, "Institution code")?;
        validation::require(otp, "OTP")?;
        validation::require_password(new_password)?;
        let body = json!({
            "institutionCode": institution_code.trim(),
            "otp": otp.trim(),
            "newPassword": new_password,
        });
        let response = self.client.post(endpoints::RESET_PASSWORD, &body, false).await?;
        ensure_success(response, "Could not reset password")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: " Green Valley School ".to_string(),
            institution_type: "School".to_string(),
            address: Address {
                state: "Kerala".to_string(),
                district: "Ernakulam".to_string(),
                city: "Kochi".to_string(),
                location: "MG Road".to_string(),
            },
            contacts: Contacts {
                mobile1: "9876543210".to_string(),
                mobile2: Some(String::new()),
                email: "office@greenvalley.edu".to_string(),
            },
            logo: None,
        }
    }

    #[test]
    fn test_registration_form_fields() {
        let reg = registration();
        reg.validate().unwrap();
        let form = reg.into_form().unwrap();

        assert_eq!(form.text_value("name"), Some("Green Valley School"));
        assert_eq!(form.text_value("type"), Some("School"));
        let contacts: Value = serde_json::from_str(form.text_value("contacts").unwrap()).unwrap();
        assert_eq!(contacts["mobile2"], Value::Null);
        assert_eq!(contacts["email"], "office@greenvalley.edu");
        let address: Value = serde_json::from_str(form.text_value("address").unwrap()).unwrap();
        assert_eq!(address["city"], "Kochi");
    }

    #[test]
    fn test_registration_rejects_bad_contacts() {
        let mut reg = registration();
        reg.contacts.mobile2 = Some("123".to_string());
        assert_eq!(
            reg.validate(),
            Err(ValidationError::InvalidMobile { field: "Mobile Number 2" })
        );

        let mut reg = registration();
        reg.contacts.email = "office".to_string();
        assert_eq!(reg.validate(), Err(ValidationError::InvalidEmail));
    }
}
