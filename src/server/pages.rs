//! Edit pages of the admin application

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::cache::CacheInvalidator;
use crate::domain::{Group, Person};
use crate::errors::EditPageResult;
use crate::forms::{EditPageDefinition, FieldDescriptor, PageLink};
use crate::i18n::Messages;
use crate::persistence::{GroupRepository, PersonRepository};

pub const GROUPS_PATH: &str = "/groups";
pub const PERSONS_PATH: &str = "/persons";

const SECTION_DETAILS: &str = "details";
const SECTION_MEMBERSHIP: &str = "membership";

pub fn group_page(
    db: DatabaseConnection,
    messages: Arc<Messages>,
    invalidator: Arc<dyn CacheInvalidator>,
) -> EditPageResult<EditPageDefinition<Group>> {
    EditPageDefinition::builder("group")
        .title("group.title")
        .repository(Arc::new(GroupRepository::new(db)))
        .list_page(PageLink::new(GROUPS_PATH))
        .new_instance(|| Some(Group::default()))
        .field(
            FieldDescriptor::text("name", "group.name")
                .required()
                .max_length(100),
        )
        .field(FieldDescriptor::text_area("description", "group.description").max_length(1000))
        .cache_invalidator(invalidator)
        .messages(messages)
        .build()
}

pub fn person_page(
    db: DatabaseConnection,
    messages: Arc<Messages>,
    invalidator: Arc<dyn CacheInvalidator>,
) -> EditPageResult<EditPageDefinition<Person>> {
    EditPageDefinition::builder("person")
        .title("person.title")
        .repository(Arc::new(PersonRepository::new(db.clone())))
        .list_page(PageLink::new(PERSONS_PATH))
        .new_instance(|| Some(Person::default()))
        .field(
            FieldDescriptor::text("first_name", "person.firstName")
                .required()
                .max_length(100)
                .in_section(SECTION_DETAILS),
        )
        .field(
            FieldDescriptor::text("last_name", "person.lastName")
                .required()
                .max_length(100)
                .in_section(SECTION_DETAILS),
        )
        .field(FieldDescriptor::email("email", "person.email").in_section(SECTION_DETAILS))
        .field(FieldDescriptor::select("group_id", "person.group", true).in_section(SECTION_MEMBERSHIP))
        .field(FieldDescriptor::checkbox("enabled", "person.enabled").in_section(SECTION_MEMBERSHIP))
        .choices("group_id", Arc::new(GroupRepository::new(db)))
        .cache_invalidator(invalidator)
        .messages(messages)
        .build()
}
