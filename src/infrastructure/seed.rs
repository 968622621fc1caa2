//! Demo content for local development (`SEED_DEMO=1`)

use sea_orm::*;

use crate::domain::{DocumentType, EditionState, RoleType};
use crate::models::{
    edition, edition_relation, organisation, person, role, role_appointment, role_organisation,
    statistics_announcement, statistics_announcement_date, topic, topic_membership,
    world_location,
};
use crate::utils::slug::parameterize;

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

async fn insert_organisation(
    db: &DatabaseConnection,
    name: &str,
    acronym: Option<&str>,
    worldwide: bool,
) -> Result<i32, DbErr> {
    let model = organisation::ActiveModel {
        name: Set(name.to_owned()),
        slug: Set(parameterize(name)),
        acronym: Set(acronym.map(str::to_owned)),
        worldwide: Set(worldwide),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model.id)
}

async fn insert_edition(
    db: &DatabaseConnection,
    title: &str,
    document_type: DocumentType,
    state: EditionState,
    published_at: Option<&str>,
) -> Result<i32, DbErr> {
    let model = edition::ActiveModel {
        title: Set(title.to_owned()),
        slug: Set(parameterize(title)),
        summary: Set(format!("Summary of {title}")),
        body: Set(format!("## {title}\n\nDemo content.")),
        document_type: Set(document_type.as_str().to_owned()),
        state: Set(state.as_str().to_owned()),
        first_published_at: Set(published_at.map(str::to_owned)),
        published_at: Set(published_at.map(str::to_owned)),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model.id)
}

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if organisation::Entity::find().count(db).await? > 0 {
        tracing::info!("Database already has organisations, skipping demo seed");
        return Ok(());
    }

    // 1. Organisations
    let treasury = insert_organisation(db, "HM Treasury", Some("HMT"), false).await?;
    let transport = insert_organisation(db, "Department for Transport", Some("DfT"), false).await?;
    let paris = insert_organisation(db, "British Embassy Paris", None, true).await?;

    // 2. People and roles
    let person = person::ActiveModel {
        name: Set("Jane Smith".to_owned()),
        slug: Set("jane-smith".to_owned()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let roles = [
        ("Chancellor of the Exchequer", RoleType::CabinetMinister, Some(treasury)),
        ("Permanent Secretary", RoleType::PermanentSecretary, Some(treasury)),
        ("Secretary of State for Transport", RoleType::CabinetMinister, Some(transport)),
        ("Ambassador to France", RoleType::WorldwideOfficeStaff, Some(paris)),
    ];
    for (name, role_type, organisation_id) in roles {
        let saved = role::ActiveModel {
            name: Set(name.to_owned()),
            role_type: Set(role_type.as_str().to_owned()),
            kind: Set(role_type.kind().to_owned()),
            permanent_secretary: Set(role_type.permanent_secretary()),
            cabinet_member: Set(role_type.cabinet_member()),
            attends_cabinet_type_id: Set(role_type.is_ministerial().then_some(1)),
            created_at: Set(now()),
            updated_at: Set(now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        if let Some(organisation_id) = organisation_id {
            role_organisation::ActiveModel {
                role_id: Set(saved.id),
                organisation_id: Set(organisation_id),
            }
            .insert(db)
            .await?;
        }

        if name == "Secretary of State for Transport" {
            role_appointment::ActiveModel {
                role_id: Set(saved.id),
                person_id: Set(person.id),
                started_at: Set("2010-05-12".to_owned()),
                ended_at: Set(None),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    // 3. Topics, policies and related documents
    let topics = [
        ("Transport", "Roads, railways and aviation.", true),
        ("Public finances", "Tax, spending and borrowing.", false),
    ];
    let mut topic_ids = Vec::new();
    for (name, description, featured) in topics {
        let saved = topic::ActiveModel {
            name: Set(name.to_owned()),
            slug: Set(parameterize(name)),
            description: Set(description.to_owned()),
            featured: Set(featured),
            created_at: Set(now()),
            updated_at: Set(now()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        topic_ids.push(saved.id);
    }

    let policy = insert_edition(
        db,
        "Improving road safety",
        DocumentType::Policy,
        EditionState::Published,
        Some("2012-01-10T09:30:00+00:00"),
    )
    .await?;
    let news = insert_edition(
        db,
        "New speed camera guidance",
        DocumentType::NewsArticle,
        EditionState::Published,
        Some("2012-02-01T10:00:00+00:00"),
    )
    .await?;
    let publication = insert_edition(
        db,
        "Reported road casualties 2011",
        DocumentType::Publication,
        EditionState::Published,
        Some("2012-06-28T09:30:00+00:00"),
    )
    .await?;
    insert_edition(db, "Draft cycling strategy", DocumentType::Policy, EditionState::Draft, None)
        .await?;

    for edition_id in [policy, news] {
        topic_membership::ActiveModel {
            topic_id: Set(topic_ids[0]),
            edition_id: Set(edition_id),
        }
        .insert(db)
        .await?;
    }
    edition_relation::ActiveModel {
        edition_id: Set(publication),
        related_edition_id: Set(policy),
    }
    .insert(db)
    .await?;

    // 4. World locations
    for name in ["France", "Germany"] {
        world_location::ActiveModel {
            name: Set(name.to_owned()),
            slug: Set(parameterize(name)),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    // 5. Statistics announcements
    let release_date = "2025-06-26T09:30:00+00:00";
    let announcement = statistics_announcement::ActiveModel {
        title: Set("Reported road casualties 2024".to_owned()),
        slug: Set("reported-road-casualties-2024".to_owned()),
        summary: Set("Annual statistics on road casualties in Great Britain.".to_owned()),
        organisation_id: Set(Some(transport)),
        current_release_date: Set(release_date.to_owned()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    statistics_announcement_date::ActiveModel {
        statistics_announcement_id: Set(announcement.id),
        release_date: Set(release_date.to_owned()),
        precision: Set("one_month".to_owned()),
        confirmed: Set(false),
        created_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Demo data seeded");
    Ok(())
}
