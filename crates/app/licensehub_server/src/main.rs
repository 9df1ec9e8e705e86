//! LicenseHub API server binary.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use licensehub_api::config::ApiConfig;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "licensehub_server", about = "LicenseHub API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "APP_PORT", default_value_t = 8000)]
    port: u16,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,licensehub_api=debug,licensehub_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    // Required configuration is validated here, before the listener opens.
    let config = ApiConfig::from_env()?;

    info!(site_name = %config.site_name, "starting licensehub_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    licensehub_api::migrate(&pool).await?;

    let state = licensehub_api::AppState::new(pool, config);
    let app = licensehub_api::router(state);

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
