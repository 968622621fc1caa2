//! CSV uploader: turns spreadsheet rows into imported editions.

pub mod finders;
pub mod heading_validator;
pub mod import_log;
pub mod importer;
pub mod parsers;
pub mod publication_row;
pub mod reference_data;
pub mod row;

pub use heading_validator::HeadingValidator;
pub use import_log::{ImportLog, LogEntry, LogLevel};
pub use importer::{ImportOptions, ImportReport, import_publications, import_publications_file};
pub use publication_row::{PublicationAttributes, PublicationRow};
pub use reference_data::ReferenceData;
pub use row::{AttachmentAttributes, Row};
