mod api;
mod config;
pub mod health;
pub mod modules;
mod shared;

pub use modules::auth;
pub use modules::email;
pub use modules::scheduler;
pub use modules::storage;
pub use modules::user;

use crate::api::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::Argon2Hasher;
use crate::auth::adapter::outgoing::{PasswordResetRepositoryPostgres, SessionRepositoryPostgres};
use crate::auth::application::auth_use_cases::{AuthPorts, AuthUseCases};
use crate::auth::application::ports::outgoing::{
    PasswordHasher, PasswordResetRepository, SessionRepository, TokenProvider,
};
use crate::auth::application::services::CodeGenerator;
use crate::config::AppSettings;
use crate::email::adapter::outgoing::build_email_sender;
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::email::application::services::EmailService;
use crate::scheduler::tasks::{
    PurgeDeletedSessionsTask, PurgeDeletedUsersTask, PurgeExpiredResetsTask,
};
use crate::scheduler::ScheduleHost;
use crate::shared::api::{custom_json_config, custom_query_config};
use crate::storage::adapter::outgoing::LocalFileStorage;
use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::file_use_cases::FileUseCases;
use crate::storage::application::ports::outgoing::FileStorage;
use crate::user::adapter::outgoing::UserRepositoryPostgres;
use crate::user::application::ports::outgoing::UserRepository;
use crate::user::application::user_use_cases::UserUseCases;

use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

const APP_NAME: &str = "Admin Backend";

#[derive(Clone)]
pub struct AppState {
    pub user: UserUseCases,
    pub auth: AuthUseCases,
    pub files: FileUseCases,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(environment = %env, "Starting application...");

    let settings = AppSettings::load()?;

    // Database connection
    let mut opt = ConnectOptions::new(settings.database.url.clone());
    opt.max_connections(settings.database.max_connections)
        .min_connections(settings.database.min_connections)
        .connect_timeout(Duration::from_secs(settings.database.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(settings.database.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.database.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt).await?;
    if settings.database.run_migrations {
        Migrator::up(&conn, None).await?;
        info!("Migrations applied");
    }
    let db_arc = Arc::new(conn);

    // Outgoing adapters
    let users: Arc<dyn UserRepository + Send + Sync> =
        Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc)));
    let sessions: Arc<dyn SessionRepository + Send + Sync> =
        Arc::new(SessionRepositoryPostgres::new(Arc::clone(&db_arc)));
    let resets: Arc<dyn PasswordResetRepository + Send + Sync> =
        Arc::new(PasswordResetRepositoryPostgres::new(Arc::clone(&db_arc)));
    let hasher: Arc<dyn PasswordHasher + Send + Sync> = Arc::new(Argon2Hasher::from_env());
    let tokens: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(JwtConfig::from_settings(&settings.jwt)));
    let sender = build_email_sender(&settings.email).map_err(anyhow::Error::msg)?;
    let notifier: Arc<dyn UserEmailNotifier + Send + Sync> = Arc::new(EmailService::new(
        sender,
        APP_NAME,
        settings.host.public_url.clone(),
    ));
    let storage: Arc<dyn FileStorage + Send + Sync> =
        Arc::new(LocalFileStorage::from_settings(&settings.file_storage));

    // Use cases
    let state = AppState {
        user: UserUseCases::new(
            users.clone(),
            sessions.clone(),
            hasher.clone(),
            notifier.clone(),
        ),
        auth: AuthUseCases::new(
            AuthPorts {
                users: users.clone(),
                sessions: sessions.clone(),
                resets: resets.clone(),
                hasher,
                tokens: tokens.clone(),
                notifier,
            },
            CodeGenerator::from_settings(&settings.code_generation),
            settings.code_generation.expiry_seconds,
        ),
        files: FileUseCases::new(storage, UploadPolicy::from_settings(&settings.file_storage)),
    };

    // Background jobs
    let mut host = ScheduleHost::new();
    if settings.schedule.enabled {
        host.register(Arc::new(PurgeDeletedSessionsTask::new(
            sessions,
            settings.schedule.purge_sessions_cron.clone(),
            settings.schedule.session_retention_days,
        )))?;
        host.register(Arc::new(PurgeExpiredResetsTask::new(
            resets,
            settings.schedule.purge_sessions_cron.clone(),
        )))?;
        host.register(Arc::new(PurgeDeletedUsersTask::new(
            users,
            settings.schedule.purge_users_cron.clone(),
            settings.schedule.user_retention_days,
        )))?;
    } else {
        info!("Scheduled jobs disabled");
    }
    let running = host.start();

    let server_url = settings.host.bind_address();
    let max_payload = usize::try_from(settings.file_storage.max_file_size_bytes)?;
    let openapi = ApiDoc::openapi();
    info!(address = %server_url, "Server listening");

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&tokens)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(web::PayloadConfig::new(max_payload))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await;

    running.shutdown().await;
    info!("Scheduler stopped");

    server_result?;
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::refresh_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_all_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::list_sessions_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::update_push_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::request_password_reset_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::confirm_password_reset_handler);
    // Users ("me" before "{id}")
    cfg.service(crate::user::adapter::incoming::web::routes::get_me_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::change_password_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::create_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::get_users_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::get_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::update_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::soft_delete_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::restore_user_handler);
    cfg.service(crate::user::adapter::incoming::web::routes::hard_delete_user_handler);
    // Files
    cfg.service(crate::storage::adapter::incoming::web::routes::upload_file_handler);
    cfg.service(crate::storage::adapter::incoming::web::routes::get_file_handler);
    cfg.service(crate::storage::adapter::incoming::web::routes::delete_file_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() -> anyhow::Result<()> {
    // A returned error prints its cause chain and exits with status 1
    start()
}
