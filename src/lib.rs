pub mod cache;
pub mod common;
pub mod config;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod i18n;
pub mod persistence;
pub mod storage;

pub mod database;
pub mod services;

#[cfg(feature = "server")]
pub mod server;
