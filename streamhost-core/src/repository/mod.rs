pub mod catalog;

pub use catalog::{MediaCatalog, MySqlMediaCatalog};
