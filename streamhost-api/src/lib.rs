// streamhost API library
//
// HTTP routes for the content proxy, the embedded players and health checks

pub mod http;

pub use http::{create_router, AppState};
