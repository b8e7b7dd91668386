mod db;
mod kv;
mod migrations;

pub use db::Database;
pub use kv::KeyValueStore;
pub use migrations::{Migration, MIGRATIONS};
