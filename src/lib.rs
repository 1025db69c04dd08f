pub mod error;
pub mod index_templates;
pub mod schema;
pub mod upload;

pub use error::Error;
