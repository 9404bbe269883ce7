pub mod edit;
pub mod files;
pub mod health;
pub mod lists;
