pub mod attachment;
pub mod document_collection;
pub mod document_collection_edition;
pub mod edition;
pub mod edition_audit_entry;
pub mod edition_ministerial_role;
pub mod edition_organisation;
pub mod edition_relation;
pub mod edition_world_location;
pub mod fact_check_request;
pub mod organisation;
pub mod person;
pub mod role;
pub mod role_appointment;
pub mod role_organisation;
pub mod statistics_announcement;
pub mod statistics_announcement_date;
pub mod topic;
pub mod topic_membership;
pub mod world_location;
