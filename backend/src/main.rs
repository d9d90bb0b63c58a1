//! Backend entry-point: loads settings, seeds the directory when asked to,
//! and serves the directory page.

mod server;

use std::sync::Arc;

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_directory::domain::ViewMode;
use user_directory::inbound::http::state::HttpState;
use user_directory::inbound::http::templates::PageTemplates;
use user_directory::outbound::redis_store::RedisDirectoryStore;
use user_directory::seeding::seed_directory_on_startup;
use user_directory::settings::DirectorySettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let mode = settings.view_mode();
    let seed_path = settings
        .seed_path
        .as_ref()
        .map(|path| path.display().to_string());
    info!(
        redis_addr = settings.redis_addr(),
        redis_timeout_ms = u64::try_from(settings.redis_timeout().as_millis()).unwrap_or(u64::MAX),
        listen_addr = settings.listen_addr(),
        is_production = settings.is_production,
        print_emoji = settings.print_emoji,
        seed_path = seed_path.as_deref(),
        "settings loaded"
    );

    let templates = PageTemplates::compile().map_err(std::io::Error::other)?;
    let store = Arc::new(RedisDirectoryStore::new(settings.redis_config()));

    seed_directory_on_startup(&settings.seed_settings(), store.as_ref())
        .await
        .map_err(std::io::Error::other)?;

    match mode {
        ViewMode::Summary => info!("setting up production server"),
        ViewMode::Detail => info!("setting up development server"),
    }

    let http_state = HttpState::new(
        store,
        Arc::new(templates),
        Arc::new(DefaultClock),
        settings.print_emoji,
    );
    let server = create_server(http_state, ServerConfig::new(settings.listen_addr(), mode))?;
    info!(listen_addr = settings.listen_addr(), "listening");
    server.await
}
