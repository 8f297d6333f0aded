use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use flicknight_api::api::{create_router, AppState};
use flicknight_api::config::Config;
use flicknight_api::services::providers::gemini::GeminiProvider;
use flicknight_api::store::{self, JsonFileStore, StateStore};
use flicknight_api::sync;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::new(&config.state_path));
    let mut user_state = store::load_or_default(store.as_ref()).await;

    // A shared link token merges exactly once, at startup; a bad token is
    // logged and ignored, local state wins
    if let Some(token) = &config.sync_token {
        match sync::decode_snapshot(token) {
            Ok(incoming) => {
                user_state = sync::merge_states(&user_state, &incoming);
                if let Err(e) = store.save(&user_state).await {
                    tracing::error!(error = %e, "Failed to persist merged state");
                }
                tracing::info!("Merged partner snapshot into local state");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid sync token");
            }
        }
    }

    let provider = Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        config.gemini_model.clone(),
    ));

    let state = AppState::new(user_state, store, provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
