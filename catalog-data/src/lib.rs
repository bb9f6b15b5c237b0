pub mod config;
pub mod entries;
pub mod error;
pub mod explorer;
pub mod registry;
pub mod services;
pub mod store;

pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use explorer::{EntityLinker, Explorer};
