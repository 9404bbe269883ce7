//! Entities edited through the admin pages

pub mod group;
pub mod person;

pub use group::Group;
pub use person::Person;
