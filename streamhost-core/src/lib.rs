pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod playback;
pub mod repository;
pub mod service;
pub mod upstream;

pub use config::Config;
pub use error::{Error, Result};
pub use upstream::UpstreamResolver;
