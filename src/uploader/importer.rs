//! Bulk import of publications from a CSV export.
//!
//! Headings are checked up front; each data row is then resolved against
//! reference data loaded once, validated, and written in its own transaction.
//! An unreadable or invalid row is reported against its line and skipped.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, Set, TransactionTrait};
use serde::Serialize;

use crate::domain::{DocumentType, DomainError, EditionState};
use crate::models::{
    attachment, document_collection_edition, edition, edition_audit_entry,
    edition_ministerial_role, edition_organisation, edition_relation, edition_world_location,
    topic_membership,
};
use crate::utils::slug::parameterize;

use super::import_log::{ImportLog, LogEntry};
use super::publication_row::{PublicationAttributes, PublicationRow};
use super::reference_data::ReferenceData;
use super::row::Row;

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Name, slug or acronym used when a row leaves `organisation` blank
    pub default_organisation: Option<String>,
    pub dry_run: bool,
    /// Recorded on the audit trail of every imported edition
    pub creator: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub edition_ids: Vec<i32>,
    pub entries: Vec<LogEntry>,
}

fn csv_error(e: csv::Error) -> DomainError {
    DomainError::invalid(format!("Unable to read CSV: {e}"))
}

fn normalise_heading(heading: &str) -> String {
    heading.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn timestamp(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc3339())
        .unwrap_or_else(|| date.to_string())
}

pub async fn import_publications(
    db: &DatabaseConnection,
    content: &[u8],
    options: &ImportOptions,
) -> Result<ImportReport, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headings: Vec<String> = rdr
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalise_heading)
        .collect();

    let heading_errors = PublicationRow::heading_validator().errors(&headings);
    if !heading_errors.is_empty() {
        tracing::warn!(errors = ?heading_errors, "Rejected import with invalid headings");
        return Err(DomainError::InvalidHeadings(heading_errors));
    }

    let data = ReferenceData::load(db).await?;

    let default_organisation = match options.default_organisation.as_deref() {
        Some(name) if !name.trim().is_empty() => Some(data.organisation(name).ok_or_else(|| {
            DomainError::invalid(format!("Unable to find default organisation '{name}'"))
        })?),
        _ => None,
    };

    let mut report = ImportReport {
        dry_run: options.dry_run,
        ..Default::default()
    };

    for (index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(index + 2);
                let mut log = ImportLog::new();
                log.error(line, format!("Unable to read row: {e}"));
                report.failed += 1;
                report.entries.extend(log.into_entries());
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        let fields = headings.iter().zip(record.iter());
        let mut row = PublicationRow::from(Row::new(line, fields, &data, default_organisation));
        let attributes = row.attributes();
        let mut log = row.into_row().into_log();

        let errors = attributes.validate();
        if !errors.is_empty() {
            for error in errors {
                log.error(line, error);
            }
            report.failed += 1;
            report.entries.extend(log.into_entries());
            continue;
        }

        if options.dry_run {
            log.info(line, "Row is valid");
            report.imported += 1;
            report.entries.extend(log.into_entries());
            continue;
        }

        match persist(db, &attributes, line, options.creator.as_deref()).await {
            Ok(id) => {
                log.info(line, format!("Imported edition {id}"));
                report.imported += 1;
                report.edition_ids.push(id);
            }
            Err(e) => {
                log.error(line, format!("Unable to save row: {e}"));
                report.failed += 1;
            }
        }
        report.entries.extend(log.into_entries());
    }

    tracing::info!(
        imported = report.imported,
        failed = report.failed,
        dry_run = report.dry_run,
        "Publication import finished"
    );

    Ok(report)
}

async fn persist(
    db: &DatabaseConnection,
    attributes: &PublicationAttributes,
    line: usize,
    creator: Option<&str>,
) -> Result<i32, DomainError> {
    let txn = db.begin().await?;
    let id = insert_publication(&txn, attributes, line, creator).await?;
    txn.commit().await?;
    Ok(id)
}

async fn insert_publication(
    txn: &DatabaseTransaction,
    attributes: &PublicationAttributes,
    line: usize,
    creator: Option<&str>,
) -> Result<i32, DomainError> {
    let now = Utc::now().to_rfc3339();
    let title = attributes.title.clone().unwrap_or_default();

    let saved = edition::ActiveModel {
        slug: Set(parameterize(&title)),
        title: Set(title),
        summary: Set(attributes.summary.clone().unwrap_or_default()),
        body: Set(attributes.body.clone().unwrap_or_default()),
        document_type: Set(DocumentType::Publication.as_str().to_string()),
        state: Set(EditionState::Imported.as_str().to_string()),
        publication_type: Set(attributes.publication_type.map(|t| t.slug().to_string())),
        old_url: Set(attributes.old_url.clone()),
        first_published_at: Set(attributes.first_published_at.map(timestamp)),
        published_at: Set(None),
        alternative_format_provider_id: Set(attributes.alternative_format_provider),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(txn)
    .await?;
    let edition_id = saved.id;

    for (i, organisation_id) in attributes.lead_organisations.iter().enumerate() {
        edition_organisation::ActiveModel {
            edition_id: Set(edition_id),
            organisation_id: Set(*organisation_id),
            lead: Set(true),
            lead_ordering: Set(Some(i as i32 + 1)),
        }
        .insert(txn)
        .await?;
    }

    for related in &attributes.related_editions {
        edition_relation::ActiveModel {
            edition_id: Set(edition_id),
            related_edition_id: Set(*related),
        }
        .insert(txn)
        .await?;
    }

    for role_id in &attributes.ministerial_roles {
        edition_ministerial_role::ActiveModel {
            edition_id: Set(edition_id),
            role_id: Set(*role_id),
        }
        .insert(txn)
        .await?;
    }

    for topic_id in &attributes.topics {
        topic_membership::ActiveModel {
            topic_id: Set(*topic_id),
            edition_id: Set(edition_id),
        }
        .insert(txn)
        .await?;
    }

    for location_id in &attributes.world_locations {
        edition_world_location::ActiveModel {
            edition_id: Set(edition_id),
            world_location_id: Set(*location_id),
        }
        .insert(txn)
        .await?;
    }

    for collection_id in &attributes.document_collections {
        document_collection_edition::ActiveModel {
            document_collection_id: Set(*collection_id),
            edition_id: Set(edition_id),
        }
        .insert(txn)
        .await?;
    }

    let mut ordering = 0;
    for file in &attributes.attachments {
        attachment::ActiveModel {
            edition_id: Set(edition_id),
            kind: Set("file".to_string()),
            title: Set(file.title.clone()),
            url: Set(Some(file.url.clone())),
            body: Set(None),
            ordering: Set(ordering),
            order_url: Set(file.order_url.clone()),
            isbn: Set(file.isbn.clone()),
            unique_reference: Set(file.unique_reference.clone()),
            command_paper_number: Set(file.command_paper_number.clone()),
            price: Set(file.price.clone()),
            hoc_paper_number: Set(file.hoc_paper_number.clone()),
            parliamentary_session: Set(file.parliamentary_session.clone()),
            unnumbered_hoc_paper: Set(file.unnumbered_hoc_paper),
            unnumbered_command_paper: Set(file.unnumbered_command_paper),
            created_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        ordering += 1;
    }

    if let Some(html) = &attributes.html_attachment_attributes {
        attachment::ActiveModel {
            edition_id: Set(edition_id),
            kind: Set("html".to_string()),
            title: Set(html.title.clone()),
            url: Set(None),
            body: Set(Some(html.body.clone())),
            ordering: Set(ordering),
            unnumbered_hoc_paper: Set(false),
            unnumbered_command_paper: Set(false),
            created_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
    }

    edition_audit_entry::ActiveModel {
        edition_id: Set(edition_id),
        action: Set("imported".to_string()),
        actor: Set(creator.map(str::to_string)),
        note: Set(Some(format!("Imported from CSV line {line}"))),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    tracing::debug!(edition_id, line, "Saved imported publication");
    Ok(edition_id)
}

/// Convenience wrapper for callers holding the file on disk
pub async fn import_publications_file(
    db: &DatabaseConnection,
    path: &std::path::Path,
    options: &ImportOptions,
) -> Result<ImportReport, DomainError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::invalid(format!("Unable to read {}: {e}", path.display())))?;
    import_publications(db, &content, options).await
}

