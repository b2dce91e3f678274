use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use petmatch_api::config::ApiConfig;
use petmatch_api::router::build_router;
use petmatch_api::state::AppState;
use petmatch_api::usecase::auth::EnsureAdminUseCase;
use petmatch_api_migration::{Migrator, MigratorTrait};
use petmatch_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    petmatch_core::tracing::init_tracing();

    let config = ApiConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;
    Migrator::up(&db, None).await.context("run migrations")?;

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
    };

    let created = EnsureAdminUseCase {
        repo: state.user_repo(),
    }
    .execute(&config.admin_email, &config.admin_password)
    .await
    .context("bootstrap admin account")?;
    info!(admin_email = %config.admin_email, created, "admin account ensured");

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("petmatch api listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
