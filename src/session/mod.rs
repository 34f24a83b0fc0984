pub mod store;
pub mod token;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

pub const TOKEN_KEY: &str = "token";
pub const USER_TYPE_KEY: &str = "userType";
pub const INSTITUTION_CODE_KEY: &str = "institutionCode";
pub const LOGIN_ID_KEY: &str = "loginId";

const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_TYPE_KEY, INSTITUTION_CODE_KEY, LOGIN_ID_KEY];

/// Which kind of account the session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Institution,
    Staff,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Institution => "institution",
            UserType::Staff => "staff",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "institution" => Some(UserType::Institution),
            "staff" => Some(UserType::Staff),
            _ => None,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who logged in: an institution by its code, or a staff member by login id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Institution { institution_code: String },
    Staff { login_id: String },
}

impl Identity {
    pub fn user_type(&self) -> UserType {
        match self {
            Identity::Institution { .. } => UserType::Institution,
            Identity::Staff { .. } => UserType::Staff,
        }
    }
}

/// Point-in-time view of the stored session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub role: Option<UserType>,
    pub subject_identifier: Option<String>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.role.is_none() && self.subject_identifier.is_none()
    }
}

/// Narrow access to the session fields held by a [`SessionStore`].
///
/// Nothing is cached here: every call goes back to the store.
#[derive(Clone)]
pub struct SessionAccessor {
    store: Arc<dyn SessionStore>,
}

impl SessionAccessor {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_expired(&self, token: &str) -> bool {
        token::is_expired(token)
    }

    /// Remove every session field. Safe to call on an already empty session.
    pub fn clear_session(&self) -> Result<(), SessionError> {
        self.store.clear(&SESSION_KEYS)
    }

    /// Persist a fresh login, dropping the identifier of the other account type.
    pub fn store_login(&self, token: &str, identity: &Identity) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_TYPE_KEY, identity.user_type().as_str())?;
        match identity {
            Identity::Institution { institution_code } => {
                self.store.set(INSTITUTION_CODE_KEY, institution_code)?;
                self.store.remove(LOGIN_ID_KEY)?;
            }
            Identity::Staff { login_id } => {
                self.store.set(LOGIN_ID_KEY, login_id)?;
                self.store.remove(INSTITUTION_CODE_KEY)?;
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Session {
        let role = self
            .store
            .get(USER_TYPE_KEY)
            .and_then(|v| UserType::parse(&v));
        let subject_identifier = match role {
            Some(UserType::Staff) => self.store.get(LOGIN_ID_KEY),
            _ => self.store.get(INSTITUTION_CODE_KEY),
        };

        Session {
            token: self.token(),
            role,
            subject_identifier,
        }
    }

    /// Guard for role-specific areas such as the institution and staff dashboards.
    pub fn require_role(&self, expected: UserType) -> ApiResult<Session> {
        let session = self.snapshot();
        if session.token.is_none() {
            return Err(ApiError::auth(None, crate::api::NO_TOKEN_MESSAGE));
        }
        match session.role {
            Some(role) if role == expected => Ok(session),
            Some(role) => Err(ApiError::domain(
                None,
                format!("Signed in as {} user; this area is for {} users", role, expected),
            )),
            None => Err(ApiError::auth(
                None,
                format!("Unauthorized access. Please login as {}.", expected),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accessor() -> (Arc<MemorySessionStore>, SessionAccessor) {
        let store = Arc::new(MemorySessionStore::new());
        (store.clone(), SessionAccessor::new(store))
    }

    #[test]
    fn test_store_login_institution() {
        let (store, session) = accessor();
        store.set(LOGIN_ID_KEY, "9876543210").unwrap();
        session
            .store_login(
                "tok",
                &Identity::Institution {
                    institution_code: "INST001".to_string(),
                },
            )
            .unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.token.as_deref(), Some("tok"));
        assert_eq!(snap.role, Some(UserType::Institution));
        assert_eq!(snap.subject_identifier.as_deref(), Some("INST001"));
        assert_eq!(store.get(LOGIN_ID_KEY), None);
    }

    #[test]
    fn test_clear_session_is_idempotent() {
        let (store, session) = accessor();
        session
            .store_login(
                "tok",
                &Identity::Staff {
                    login_id: "9876543210".to_string(),
                },
            )
            .unwrap();

        session.clear_session().unwrap();
        let once = session.snapshot();
        session.clear_session().unwrap();
        let twice = session.snapshot();

        assert!(once.is_empty());
        assert_eq!(once, twice);
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_token_treated_as_absent() {
        let (store, session) = accessor();
        store.set(TOKEN_KEY, "").unwrap();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_require_role() {
        let (_store, session) = accessor();
        assert!(session.require_role(UserType::Institution).unwrap_err().is_auth());

        session
            .store_login(
                "tok",
                &Identity::Staff {
                    login_id: "9876543210".to_string(),
                },
            )
            .unwrap();
        assert!(session.require_role(UserType::Staff).is_ok());

        let err = session.require_role(UserType::Institution).unwrap_err();
        assert!(!err.is_auth());
    }
}
