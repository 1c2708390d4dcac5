use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use chat_assistant::application::ports::{MessageStore, Responder};
use chat_assistant::infrastructure::llm::{
    ScaffoldResponder, SystemPrompts, create_chat_completion_responder,
};
use chat_assistant::infrastructure::observability::{TracingConfig, init_tracing};
use chat_assistant::infrastructure::persistence::{
    InMemoryMessageStore, PgMessageStore, create_pool, run_migrations,
};
use chat_assistant::presentation::{
    AppState, Environment, Settings, StorageProvider, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let system_prompts = Arc::new(SystemPrompts::load(&settings.chat.prompts_path)?);
    tracing::info!(modes = ?system_prompts.modes(), "System prompts loaded");

    let store = build_store(&settings).await?;
    let responder = build_responder(&settings, Arc::clone(&system_prompts))?;

    let state = AppState::new(
        Arc::clone(&store),
        responder,
        system_prompts,
        settings.clone(),
    );
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing store connection");
    store.close().await;

    Ok(())
}

async fn build_store(settings: &Settings) -> anyhow::Result<Arc<dyn MessageStore>> {
    match settings.storage.provider {
        StorageProvider::Memory => {
            tracing::warn!("Using in-memory store; conversations are lost on restart");
            Ok(Arc::new(InMemoryMessageStore::new()))
        }
        StorageProvider::Postgres => match settings.database.url.as_deref() {
            Some(url) => {
                let pool = create_pool(url, &settings.database)?;
                if let Err(e) = run_migrations(&pool).await {
                    tracing::error!(error = %e, "Migrations failed; store operations may fail");
                }
                Ok(Arc::new(PgMessageStore::new(pool)))
            }
            None => {
                tracing::error!("APP_DATABASE__URL not set; store operations will fail");
                Ok(Arc::new(PgMessageStore::unconfigured()))
            }
        },
    }
}

fn build_responder(
    settings: &Settings,
    system_prompts: Arc<SystemPrompts>,
) -> anyhow::Result<Arc<dyn Responder>> {
    if settings.scaffold.enabled {
        tracing::warn!("Scaffold mode enabled; replies are canned");
        return Ok(Arc::new(ScaffoldResponder::new(&settings.scaffold)));
    }

    let responder = create_chat_completion_responder(&settings.llm, system_prompts)?;
    Ok(Arc::new(responder))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
