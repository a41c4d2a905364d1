//! Startup helpers shared by the server binary
//!
//! - Configuration loading and validation
//! - Database pool initialization

pub mod config;
pub mod database;

pub use config::load_config;
pub use database::init_database;
