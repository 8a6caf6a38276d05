pub mod database;
pub mod error;
pub mod schema;
pub mod todos;

pub use database::Database;
pub use error::StoreError;
pub use todos::{Todo, TodoRepo};
