//! Common utilities shared by the persistence and web layers

pub mod db_errors;
pub mod handlebars;

pub use handlebars::{get_handlebars, get_page_templates};
