pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod recovery;
pub mod services;
pub mod session;
pub mod validation;
