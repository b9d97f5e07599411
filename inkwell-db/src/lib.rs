// Data-access layer shared by the Inkwell scripts and their tests

pub mod config;
pub mod db;
pub mod error;

pub use db::{Client, Database};
pub use error::{DbError, DbResult};
