pub mod client;
pub mod connection;
pub mod query;
pub mod repositories;
mod rows;
pub mod schema;

pub use client::{Client, EntityCounts};
pub use connection::{Database, DbConnection, DbPool};
