//! Typed operations for each area of the admin dashboard, all built on [`ApiClient`].

pub mod auth_service;
pub mod credential_service;
pub mod dashboard_service;
pub mod mapping_service;
pub mod resource_service;
pub mod staff_service;
pub mod student_service;

pub use auth_service::{Address, AuthService, Contacts, LoginResult, LogoFile, Registration};
pub use credential_service::{AccessLevel, AdditionalAccess, CredentialService, NewCredential};
pub use dashboard_service::{DashboardService, Overview};
pub use mapping_service::{
    ClassSubjectAssignment, MappingService, StaffClassAssignment, TeacherSubjectAssignment,
};
pub use resource_service::{HierarchyLevel, Resource, ResourceService};
pub use staff_service::{NewStaff, StaffService};
pub use student_service::{BulkUploadStats, NewStudent, StudentService};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::recovery::RecoveryTrigger;
use crate::session::{Session, UserType};

/// Role check for role-specific areas; a missing or role-less session goes through recovery.
pub(crate) fn guard(client: &ApiClient, role: UserType) -> ApiResult<Session> {
    client.session().require_role(role).map_err(|err| {
        if err.is_auth() {
            client.recovery().recover(RecoveryTrigger::Rejected);
        }
        err
    })
}
