pub mod connection;
pub mod entities;
pub mod migrate;
pub mod migrations;

pub use connection::*;
pub use entities::*;
pub use migrate::{migrate_database, MigrateDirection};
