pub mod file_content;
pub mod file_metadata;
pub mod groups;
pub mod persons;
