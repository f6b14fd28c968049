use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use talent_match_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route(
            "/api/candidates/register",
            post(routes::candidate_routes::register_candidate),
        )
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate),
        )
        .route(
            "/api/candidates/:id/history",
            get(routes::candidate_routes::get_candidate_history),
        )
        .route("/api/candidates/files", post(routes::file_routes::upload_file))
        .route(
            "/api/candidates/files/:id",
            delete(routes::file_routes::delete_file),
        )
        .route(
            "/api/candidates/files/:id/link",
            post(routes::file_routes::link_file),
        )
        .route(
            "/api/dashboard/stats",
            get(routes::dashboard::get_dashboard_stats),
        )
        .layer(axum::middleware::from_fn_with_state(
            talent_match_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            talent_match_backend::middleware::rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(public_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(talent_match_backend::middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
