use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whitehall_admin::infrastructure::AppState;
use whitehall_admin::uploader::{ImportOptions, import_publications_file};
use whitehall_admin::{config, db, seed, server};

/// `--import <file> [--default-organisation <name>] [--dry-run]`
struct ImportArgs {
    path: PathBuf,
    options: ImportOptions,
}

fn import_args(args: &[String]) -> Option<ImportArgs> {
    let pos = args.iter().position(|arg| arg == "--import")?;
    let path = PathBuf::from(args.get(pos + 1)?);
    let default_organisation = args
        .iter()
        .position(|arg| arg == "--default-organisation")
        .and_then(|i| args.get(i + 1))
        .cloned();

    Some(ImportArgs {
        path,
        options: ImportOptions {
            default_organisation,
            dry_run: args.iter().any(|arg| arg == "--dry-run"),
            creator: std::env::var("USER").ok(),
        },
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whitehall_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    // One-off import from the command line
    let args: Vec<String> = std::env::args().collect();
    if let Some(import) = import_args(&args) {
        match import_publications_file(&db, &import.path, &import.options).await {
            Ok(report) => {
                for entry in &report.entries {
                    eprintln!("line {}: {:?}: {}", entry.line, entry.level, entry.message);
                }
                eprintln!(
                    "{} imported, {} failed{}",
                    report.imported,
                    report.failed,
                    if report.dry_run { " (dry run)" } else { "" }
                );
                if report.failed > 0 {
                    std::process::exit(2);
                }
            }
            Err(e) => {
                tracing::error!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let state = AppState::with_page_size(db, config.page_size);
    let app = server::build_router(state, &config.cors_allowed_origins);

    if let Err(e) = server::serve(app, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
