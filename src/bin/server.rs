use std::{
    error::Error,
    fs::OpenOptions,
    net::SocketAddr,
    path::Path,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{AppState, build_router, graceful_shutdown, logging_middleware};

/// The web server for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database, created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone used to decide what "today" and the current month are,
    /// e.g. "Pacific/Auckland".
    #[arg(long, env = "EXPENSES_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(Path::new(&args.log_path))?;

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path)?;
    let state = AppState::new(conn, &args.timezone)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging(log_path: &Path) -> Result<(), std::io::Error> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are handled.
        .on_failure(());

    router.layer(tracing_layer)
}
