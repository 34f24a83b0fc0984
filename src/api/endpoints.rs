// Backend routes, relative to the configured base URL

// Auth
pub const REGISTER: &str = "/auth/register";
pub const VERIFY_OTP: &str = "/auth/verify-otp";
pub const RESEND_OTP: &str = "/auth/resend-otp";
pub const SET_PASSWORD: &str = "/auth/set-password";
pub const INSTITUTION_LOGIN: &str = "/auth/institution/login";
pub const STAFF_LOGIN: &str = "/auth/staff/login";
pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const RESET_PASSWORD: &str = "/auth/reset-password";

// Dashboard
pub const DASHBOARD_PROFILE: &str = "/dashboard/profile";
pub const DASHBOARD_STATS: &str = "/dashboard/stats";
pub const INSTITUTION_PROFILE: &str = "/institution/profile";
pub const STAFF_PROFILE: &str = "/staff/profile";
pub const STAFF_ASSIGNMENTS: &str = "/staff/assignments";

// Basic information
pub const DESIGNATIONS: &str = "/designations";
pub const CLASSES: &str = "/classes";
pub const STAFF: &str = "/staff";
pub const SUBJECTS: &str = "/subjects";
pub const STUDENTS: &str = "/students";
pub const STUDENTS_BULK_UPLOAD: &str = "/students/bulk-upload";
pub const STUDENTS_BY_CLASS: &str = "/students/class";
pub const HIERARCHY: &str = "/hierarchy";

// Mappings
pub const STAFF_CLASS_MAPPING: &str = "/mappings/staff-class";
pub const CLASS_SUBJECT_MAPPING: &str = "/mappings/class-subject";
pub const TEACHER_SUBJECT_MAPPING: &str = "/mappings/teacher-subject";
pub const ALL_MAPPINGS: &str = "/mappings/all";

pub const CREDENTIALS: &str = "/credentials";
pub const ATTENDANCE: &str = "/attendance";

/// `<collection>/<id>` with the id percent-encoded as a single path segment.
pub fn item(collection: &str, id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{}/{}", collection.trim_end_matches('/'), encoded.replace('+', "%20"))
}

/// Appends URL-encoded query pairs to a path.
pub fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();
    format!("{}?{}", path, query.replace('+', "%20"))
}
