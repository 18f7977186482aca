mod app;
mod config;
mod lookup;
mod nutrition;
mod sessions;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fuelfocus=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init()?;
    tracing::info!(nutrition = ?app_state.config.nutrition, "nutrition lookup configured");
    app_state
        .sessions
        .spawn_sweeper(std::time::Duration::from_secs(app_state.config.session_ttl_secs));

    app::serve(app::build_app(app_state)).await
}
