pub mod auth;
pub mod credentials;
pub mod dashboard;
pub mod data;
pub mod mappings;
pub mod staff;
pub mod students;
