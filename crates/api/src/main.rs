//! Station server entry point.

use std::sync::Arc;

use api::config::Config;
use api::seed::SeedData;
use api::station::Station;
use robot::{InMemoryRobotClient, RobotClient, TcpRobotClient};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load seed data
    let seed = match &config.seed_file {
        Some(path) => SeedData::from_path(path).expect("failed to load seed file"),
        None => SeedData::demo(),
    };
    let seeded = seed
        .build(chrono::Utc::now())
        .expect("invalid seed data");

    // 4. Pick the robot client
    let robot: Arc<dyn RobotClient> = if config.robot_enabled {
        tracing::info!(robot = %config.robot_addr(), "robot programs go over TCP");
        Arc::new(
            TcpRobotClient::new(&config.robot_host, config.robot_port)
                .with_connect_timeout(config.robot_connect_timeout),
        )
    } else {
        tracing::info!("robot disabled, programs are recorded in memory");
        Arc::new(InMemoryRobotClient::new())
    };

    // 5. Build the application
    let state = api::create_state(Station::new(seeded, robot));
    let app = api::create_app(state, metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting station server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
