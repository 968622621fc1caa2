use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS organisations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        acronym TEXT,
        worldwide BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS people (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        role_type TEXT NOT NULL,
        kind TEXT NOT NULL,
        permanent_secretary BOOLEAN NOT NULL DEFAULT 0,
        cabinet_member BOOLEAN NOT NULL DEFAULT 0,
        whip_organisation_id INTEGER,
        role_payment_type_id INTEGER,
        attends_cabinet_type_id INTEGER,
        responsibilities TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS role_organisations (
        role_id INTEGER NOT NULL,
        organisation_id INTEGER NOT NULL,
        PRIMARY KEY (role_id, organisation_id),
        FOREIGN KEY (role_id) REFERENCES roles(id) ON DELETE CASCADE,
        FOREIGN KEY (organisation_id) REFERENCES organisations(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS role_appointments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        role_id INTEGER NOT NULL,
        person_id INTEGER NOT NULL,
        started_at TEXT NOT NULL,
        ended_at TEXT,
        FOREIGN KEY (role_id) REFERENCES roles(id),
        FOREIGN KEY (person_id) REFERENCES people(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS topics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        slug TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL,
        featured BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS editions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        summary TEXT NOT NULL,
        body TEXT NOT NULL,
        document_type TEXT NOT NULL,
        state TEXT NOT NULL DEFAULT 'draft',
        publication_type TEXT,
        old_url TEXT,
        first_published_at TEXT,
        published_at TEXT,
        alternative_format_provider_id INTEGER,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_editions_slug ON editions(slug)",
    "CREATE INDEX IF NOT EXISTS idx_editions_state ON editions(state, document_type)",
    r#"
    CREATE TABLE IF NOT EXISTS topic_memberships (
        topic_id INTEGER NOT NULL,
        edition_id INTEGER NOT NULL,
        PRIMARY KEY (topic_id, edition_id),
        FOREIGN KEY (topic_id) REFERENCES topics(id) ON DELETE CASCADE,
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS edition_relations (
        edition_id INTEGER NOT NULL,
        related_edition_id INTEGER NOT NULL,
        PRIMARY KEY (edition_id, related_edition_id),
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE,
        FOREIGN KEY (related_edition_id) REFERENCES editions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS edition_organisations (
        edition_id INTEGER NOT NULL,
        organisation_id INTEGER NOT NULL,
        lead BOOLEAN NOT NULL DEFAULT 0,
        lead_ordering INTEGER,
        PRIMARY KEY (edition_id, organisation_id),
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE,
        FOREIGN KEY (organisation_id) REFERENCES organisations(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS edition_ministerial_roles (
        edition_id INTEGER NOT NULL,
        role_id INTEGER NOT NULL,
        PRIMARY KEY (edition_id, role_id),
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE,
        FOREIGN KEY (role_id) REFERENCES roles(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS world_locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS edition_world_locations (
        edition_id INTEGER NOT NULL,
        world_location_id INTEGER NOT NULL,
        PRIMARY KEY (edition_id, world_location_id),
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE,
        FOREIGN KEY (world_location_id) REFERENCES world_locations(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS document_collections (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS document_collection_editions (
        document_collection_id INTEGER NOT NULL,
        edition_id INTEGER NOT NULL,
        PRIMARY KEY (document_collection_id, edition_id),
        FOREIGN KEY (document_collection_id) REFERENCES document_collections(id) ON DELETE CASCADE,
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attachments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        edition_id INTEGER NOT NULL,
        kind TEXT NOT NULL DEFAULT 'file',
        title TEXT NOT NULL,
        url TEXT,
        body TEXT,
        ordering INTEGER NOT NULL DEFAULT 0,
        order_url TEXT,
        isbn TEXT,
        unique_reference TEXT,
        command_paper_number TEXT,
        price TEXT,
        hoc_paper_number TEXT,
        parliamentary_session TEXT,
        unnumbered_hoc_paper BOOLEAN NOT NULL DEFAULT 0,
        unnumbered_command_paper BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS statistics_announcements (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        summary TEXT NOT NULL,
        organisation_id INTEGER,
        current_release_date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (organisation_id) REFERENCES organisations(id) ON DELETE SET NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_statistics_announcements_release ON statistics_announcements(current_release_date)",
    r#"
    CREATE TABLE IF NOT EXISTS statistics_announcement_dates (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        statistics_announcement_id INTEGER NOT NULL,
        release_date TEXT NOT NULL,
        precision TEXT NOT NULL DEFAULT 'exact',
        confirmed BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        FOREIGN KEY (statistics_announcement_id) REFERENCES statistics_announcements(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS edition_audit_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        edition_id INTEGER NOT NULL,
        action TEXT NOT NULL,
        actor TEXT,
        note TEXT,
        created_at TEXT NOT NULL,
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS fact_check_requests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        edition_id INTEGER NOT NULL,
        email_address TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TEXT NOT NULL,
        FOREIGN KEY (edition_id) REFERENCES editions(id) ON DELETE CASCADE
    )
    "#,
];

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    for sql in SCHEMA {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_string(),
        ))
        .await?;
    }

    tracing::debug!("Applied {} schema statements", SCHEMA.len());

    Ok(())
}
